// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Hook manager for installing and managing git hooks.

use crate::error::{CmcError, HookError, Result};
use crate::git;
use std::fs;
use std::path::{Path, PathBuf};

use super::templates::{HookTemplate, HOOK_MARKER};

/// Manager for git hooks.
pub struct HookManager {
    hooks_dir: PathBuf,
}

impl HookManager {
    /// Create a new hook manager for the current repository.
    pub fn new() -> Result<Self> {
        let repo = git::open_repo()?;
        Self::for_dir(repo.git_dir().join("hooks"))
    }

    /// Create a hook manager for an explicit hooks directory.
    pub fn for_dir(hooks_dir: impl Into<PathBuf>) -> Result<Self> {
        let hooks_dir = hooks_dir.into();

        if !hooks_dir.exists() {
            fs::create_dir_all(&hooks_dir).map_err(|e| {
                CmcError::Hook(HookError::InstallFailed {
                    hook: "all".to_string(),
                    message: format!("Failed to create hooks directory: {}", e),
                })
            })?;
        }

        Ok(Self { hooks_dir })
    }

    /// Install a specific hook.
    pub fn install_hook(&self, hook_name: &str, force: bool, block: bool) -> Result<()> {
        let template = parse_hook(hook_name)?;
        self.install_template(&template, force, block)
    }

    /// Install all hooks.
    pub fn install_all(&self, force: bool, block: bool) -> Result<()> {
        for template in HookTemplate::all() {
            self.install_template(template, force, block)?;
        }
        Ok(())
    }

    /// Install a hook from a template.
    fn install_template(&self, template: &HookTemplate, force: bool, block: bool) -> Result<()> {
        let hook_path = self.hooks_dir.join(template.filename());
        let backup_path = self.backup_path(template);
        let install_err = |message: String| {
            CmcError::Hook(HookError::InstallFailed {
                hook: template.filename().to_string(),
                message,
            })
        };

        // A foreign hook is only replaced with --force, and is kept as a backup
        if hook_path.exists() && !self.is_cmc_hook(&hook_path)? {
            if !force {
                return Err(CmcError::Hook(HookError::AlreadyExists {
                    hook: template.filename().to_string(),
                }));
            }

            fs::rename(&hook_path, &backup_path)
                .map_err(|e| install_err(format!("Failed to backup existing hook: {}", e)))?;
        }

        let script = template.generate(block)?;
        fs::write(&hook_path, &script)
            .map_err(|e| install_err(format!("Failed to write hook: {}", e)))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;

            let mut perms = fs::metadata(&hook_path)
                .map_err(|e| install_err(format!("Failed to get permissions: {}", e)))?
                .permissions();

            perms.set_mode(0o755);
            fs::set_permissions(&hook_path, perms)
                .map_err(|e| install_err(format!("Failed to set permissions: {}", e)))?;
        }

        tracing::debug!("Installed {} hook at {:?}", template.filename(), hook_path);
        Ok(())
    }

    /// Uninstall a specific hook.
    pub fn uninstall_hook(&self, hook_name: &str) -> Result<()> {
        let template = parse_hook(hook_name)?;

        let hook_path = self.hooks_dir.join(template.filename());
        let backup_path = self.backup_path(&template);

        if !hook_path.exists() {
            return Ok(()); // Nothing to uninstall
        }

        // Only remove if it's our hook
        if !self.is_cmc_hook(&hook_path)? {
            return Err(CmcError::Hook(HookError::RemoveFailed {
                hook: hook_name.to_string(),
                message: "Hook was not installed by cmc".to_string(),
            }));
        }

        fs::remove_file(&hook_path).map_err(|e| {
            CmcError::Hook(HookError::RemoveFailed {
                hook: hook_name.to_string(),
                message: format!("Failed to remove hook: {}", e),
            })
        })?;

        if backup_path.exists() {
            fs::rename(&backup_path, &hook_path).map_err(|e| {
                CmcError::Hook(HookError::RemoveFailed {
                    hook: hook_name.to_string(),
                    message: format!("Failed to restore backup: {}", e),
                })
            })?;
        }

        Ok(())
    }

    /// Uninstall all hooks.
    pub fn uninstall_all(&self) -> Result<()> {
        for template in HookTemplate::all() {
            self.uninstall_hook(template.filename())?;
        }
        Ok(())
    }

    /// Get the status of all hooks.
    pub fn status(&self) -> Result<Vec<(String, bool)>> {
        let mut status = Vec::new();

        for template in HookTemplate::all() {
            let hook_path = self.hooks_dir.join(template.filename());
            let installed = hook_path.exists() && self.is_cmc_hook(&hook_path).unwrap_or(false);
            status.push((template.filename().to_string(), installed));
        }

        Ok(status)
    }

    fn backup_path(&self, template: &HookTemplate) -> PathBuf {
        self.hooks_dir
            .join(format!("{}.backup", template.filename()))
    }

    /// Check if a hook was installed by cmc.
    fn is_cmc_hook(&self, path: &Path) -> Result<bool> {
        let content = fs::read_to_string(path).map_err(|e| {
            CmcError::Hook(HookError::InstallFailed {
                hook: path.display().to_string(),
                message: format!("Failed to read hook: {}", e),
            })
        })?;

        Ok(content.contains(HOOK_MARKER))
    }
}

fn parse_hook(hook_name: &str) -> Result<HookTemplate> {
    hook_name.parse::<HookTemplate>().map_err(|_| {
        CmcError::Hook(HookError::NotFound {
            hook: hook_name.to_string(),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn manager() -> (TempDir, HookManager) {
        let dir = TempDir::new().unwrap();
        let manager = HookManager::for_dir(dir.path().join("hooks")).unwrap();
        (dir, manager)
    }

    #[test]
    fn test_install_and_status() {
        let (dir, manager) = manager();
        manager.install_hook("commit-msg", false, false).unwrap();

        let script = fs::read_to_string(dir.path().join("hooks/commit-msg")).unwrap();
        assert!(script.contains(HOOK_MARKER));
        assert_eq!(manager.status().unwrap(), vec![("commit-msg".to_string(), true)]);
    }

    #[cfg(unix)]
    #[test]
    fn test_install_makes_executable() {
        use std::os::unix::fs::PermissionsExt;

        let (dir, manager) = manager();
        manager.install_all(false, true).unwrap();
        let mode = fs::metadata(dir.path().join("hooks/commit-msg"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o755);
    }

    #[test]
    fn test_reinstall_own_hook_without_force() {
        let (_dir, manager) = manager();
        manager.install_hook("commit-msg", false, false).unwrap();
        manager.install_hook("commit-msg", false, true).unwrap();
    }

    #[test]
    fn test_foreign_hook_requires_force_and_is_restored() {
        let (dir, manager) = manager();
        let hook_path = dir.path().join("hooks/commit-msg");
        fs::write(&hook_path, "#!/bin/sh\necho mine\n").unwrap();

        assert!(matches!(
            manager.install_hook("commit-msg", false, false),
            Err(CmcError::Hook(HookError::AlreadyExists { .. }))
        ));

        manager.install_hook("commit-msg", true, false).unwrap();
        assert!(dir.path().join("hooks/commit-msg.backup").exists());

        manager.uninstall_hook("commit-msg").unwrap();
        assert_eq!(
            fs::read_to_string(&hook_path).unwrap(),
            "#!/bin/sh\necho mine\n"
        );
    }

    #[test]
    fn test_uninstall_refuses_foreign_hook() {
        let (dir, manager) = manager();
        fs::write(dir.path().join("hooks/commit-msg"), "#!/bin/sh\n").unwrap();
        assert!(matches!(
            manager.uninstall_hook("commit-msg"),
            Err(CmcError::Hook(HookError::RemoveFailed { .. }))
        ));
    }

    #[test]
    fn test_unknown_hook() {
        let (_dir, manager) = manager();
        assert!(matches!(
            manager.install_hook("pre-push", false, false),
            Err(CmcError::Hook(HookError::NotFound { .. }))
        ));
    }
}
