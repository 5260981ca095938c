// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Commit module for message splitting and special commit classification.

pub mod classify;
mod message;

pub use classify::{classify, is_merge_commit, is_revert_commit, SpecialCommit};
pub use message::CommitMessage;
