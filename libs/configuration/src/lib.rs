mod configuration;
pub mod descriptor;
mod error;
mod hardware;
mod mode;
mod parser;
mod schema;
mod settings;

// region:    --- Exports
pub use configuration::Configuration;
pub use error::ConfigError;
pub use hardware::{FixedCores, Hardware, Host};
pub use mode::TestingMode;
pub use parser::{Outcome, parse};
pub use schema::{Category, OptionGroup, OptionKind, OptionSpec, PROGRAM, Schema};
pub use settings::{DomainViolation, Field, Settings};
// endregion: --- Exports
