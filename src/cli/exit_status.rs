use std::process::ExitCode;

/// Exit status of a checker run.
///
/// - `Success` (0): all cross-references resolved
/// - `Failure` (1): the run completed and found consistency errors
/// - `Error` (1): the run aborted before completing (wrong invocation
///   directory, failed file enumeration)
///
/// Both failure tiers map to exit code 1; callers are expected to rely on
/// zero versus non-zero only.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure | ExitStatus::Error => ExitCode::from(1),
        }
    }
}
