// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration module for cmc.
//!
//! This module holds the commit type registry and loads the tool settings
//! (CI, hooks, UI) from configuration files.

mod loader;
mod schema;
mod types;

pub use loader::{find_config_file, find_config_file_from, load_config, parse_config};
pub use schema::*;
pub use types::CommitType;
