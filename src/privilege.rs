//! Privilege gate
//!
//! Apply mode runs every mutating step as the current user, so it must be
//! root from the start. Checking up front avoids applying half the pipeline
//! and then hitting a permission error.

use provision::{ExecutionMode, ProvisionError};

/// Effective uid of root
pub const ROOT_UID: u32 = 0;

/// Pass/fail for the requested mode. Dry run never needs privilege.
pub fn check(mode: ExecutionMode, euid: u32) -> Result<(), ProvisionError> {
    match mode {
        ExecutionMode::DryRun => Ok(()),
        ExecutionMode::Apply if euid == ROOT_UID => Ok(()),
        ExecutionMode::Apply => Err(ProvisionError::InsufficientPrivilege { euid }),
    }
}
