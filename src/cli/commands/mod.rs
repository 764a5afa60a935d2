//! CLI command implementations
//!
//! This module contains all CLI command implementations.

pub mod export;
pub mod init;
pub mod list_realms;
pub mod validate;
pub mod verify;

use crate::domain::{KeyportError, StoreError};

/// Exit code for an error that ended a command
pub(crate) fn exit_code_for(error: &KeyportError) -> i32 {
    match error.root_cause() {
        KeyportError::Configuration(_) => 2,
        KeyportError::Store(StoreError::Unavailable(_)) => 4,
        _ => 5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ExportStage;

    #[test]
    fn test_exit_codes() {
        assert_eq!(exit_code_for(&KeyportError::Configuration("x".into())), 2);
        assert_eq!(
            exit_code_for(&StoreError::Unavailable("gone".into()).into()),
            4
        );
        assert_eq!(
            exit_code_for(
                &KeyportError::from(StoreError::TransactionAborted("x".into()))
                    .in_stage("acme", ExportStage::Metadata)
            ),
            5
        );
        assert_eq!(exit_code_for(&KeyportError::RealmNotFound("acme".into())), 5);
    }
}
