//! Maps terminal allocator results to a single exit status and diagnostic.
use std::fmt;

use nametag_model::EntityId;
use tracing::{error, info};

use crate::error::{AllocError, AllocResult, ErrorClass};

/// Confirmed name of an entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub entity: EntityId,
    pub name: String,
    /// Commit+verify rounds spent, the successful one included.
    pub attempts: u32,
    /// Retry budget the run started with.
    pub retries: u32,
    /// Candidates skipped without a write.
    pub skipped: u32,
}

/// Process exit status. Each class has its own code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Config,
    Precondition,
    Exhausted,
    Registry,
}

impl ExitStatus {
    pub fn code(self) -> u8 {
        match self {
            ExitStatus::Success => 0,
            ExitStatus::Config => 1,
            ExitStatus::Precondition => 3,
            ExitStatus::Exhausted => 4,
            ExitStatus::Registry => 5,
        }
    }

    pub fn is_success(self) -> bool {
        self == ExitStatus::Success
    }
}

impl From<ErrorClass> for ExitStatus {
    fn from(class: ErrorClass) -> Self {
        match class {
            ErrorClass::Precondition => ExitStatus::Precondition,
            ErrorClass::Exhausted => ExitStatus::Exhausted,
            ErrorClass::Registry => ExitStatus::Registry,
            ErrorClass::Config => ExitStatus::Config,
        }
    }
}

/// Final verdict of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub status: ExitStatus,
    pub message: String,
}

impl Report {
    /// Build the report and log it once at the matching severity.
    pub fn from_result(result: &AllocResult<Assignment>) -> Self {
        let report = match result {
            Ok(a) => Report {
                status: ExitStatus::Success,
                message: format!(
                    "{} named '{}' ({} of {} retries used)",
                    a.entity, a.name, a.attempts, a.retries
                ),
            },
            Err(e) => Report {
                status: e.class().into(),
                message: diagnostic(e),
            },
        };

        if report.status.is_success() {
            info!(code = report.status.code(), "{}", report.message);
        } else {
            error!(code = report.status.code(), "{}", report.message);
        }
        report
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

fn diagnostic(e: &AllocError) -> String {
    match e.class() {
        ErrorClass::Precondition => format!("precondition failed: {e}"),
        ErrorClass::Exhausted => format!("group contended: {e}"),
        ErrorClass::Registry => format!("registry failure: {e}"),
        ErrorClass::Config => format!("configuration error: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::RegistryError;

    #[test]
    fn success_maps_to_zero() {
        let ok = Ok(Assignment {
            entity: EntityId::new("i-1"),
            name: "web2".into(),
            attempts: 1,
            retries: 5,
            skipped: 1,
        });
        let report = Report::from_result(&ok);

        assert_eq!(report.status.code(), 0);
        assert_eq!(report.message, "i-1 named 'web2' (1 of 5 retries used)");
    }

    #[test]
    fn each_failure_class_has_its_own_code() {
        let cases: Vec<(AllocError, u8, &str)> = vec![
            (AllocError::EntityNotFound(EntityId::new("i-1")), 3, "precondition failed"),
            (
                AllocError::Exhausted {
                    prefix: "web".into(),
                    retries: 10,
                    last_candidate: "web12".into(),
                },
                4,
                "group contended",
            ),
            (
                AllocError::Registry(RegistryError::Io("denied".into())),
                5,
                "registry failure",
            ),
            (
                AllocError::InvalidSpec(nametag_model::ModelError::Invalid("bad".into())),
                1,
                "configuration error",
            ),
        ];

        for (err, code, prefix) in cases {
            let report = Report::from_result(&Err(err));
            assert_eq!(report.status.code(), code);
            assert!(!report.status.is_success());
            assert!(report.message.starts_with(prefix), "{}", report.message);
        }
    }
}
