use anyhow::Result;

pub mod args;
pub mod exit_status;
pub mod run;

pub use args::Arguments;
pub use exit_status::ExitStatus;

use crate::report;

pub fn run_cli(args: &Arguments) -> Result<ExitStatus> {
    let root = std::env::current_dir()?;
    let result = run::run(&root)?;
    report::print(&result, args.verbose);

    if result.error_count() == 0 {
        Ok(ExitStatus::Success)
    } else {
        Ok(ExitStatus::Failure)
    }
}
