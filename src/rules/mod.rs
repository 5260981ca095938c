// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Rule engine module for commit validation.
//!
//! A message is first checked for merge/revert status, then run through the
//! summary-format, commit-type and separator rules in that order.

mod builtin;
mod engine;
mod failure;
mod outcome;

pub use builtin::*;
pub use engine::{validate, validate_batch, Validator};
pub use failure::FailureCode;
pub use outcome::ValidationOutcome;
