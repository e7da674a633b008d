pub mod check;
pub mod config;
pub mod engine;
pub mod files;
pub mod invoke;
pub mod matcher;
pub mod probe;
pub mod reporter;

pub use check::{run_check, CheckOutcome};
pub use config::{CheckDefinition, Classification, ConfigError};
pub use engine::{run_all, CheckReport, RunResult};
pub use invoke::{CommandCall, CommandResult, CommandRunner, RealCommandRunner};
