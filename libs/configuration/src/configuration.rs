use std::ffi::OsString;

use crate::TestingMode;
use crate::error::ConfigError;
use crate::hardware::{Hardware, Host};
use crate::parser::{self, Outcome};
use crate::schema::Schema;
use crate::settings::Settings;

/// Entry point of the crate: the option schema of one testing mode and the means to bind a command
/// line against it.
///
/// ```
/// use configuration::{Configuration, FixedCores, Outcome, TestingMode};
///
/// let cfg = Configuration::with_hardware(TestingMode::Bandwidth, &FixedCores(8));
/// let Outcome::Parsed(settings) = cfg.parse(["--read_write_mix", "2"]).unwrap() else {
///     unreachable!()
/// };
/// assert_eq!(settings.num_threads, 8);
/// assert_eq!(settings.read_write_mix, 2);
/// ```
#[derive(Debug, Clone)]
pub struct Configuration {
    schema: Schema,
}

impl Configuration {
    /// Configuration for `mode` with defaults derived from the host machine.
    pub fn new(mode: TestingMode) -> Self {
        Self::with_hardware(mode, &Host)
    }

    pub fn with_hardware(mode: TestingMode, hardware: &impl Hardware) -> Self {
        Self {
            schema: Schema::build(mode, hardware),
        }
    }

    pub fn mode(&self) -> TestingMode {
        self.schema.mode()
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// The settings a run would use if no option were given.
    pub fn defaults(&self) -> Settings {
        self.schema.defaults()
    }

    pub fn usage(&self) -> String {
        self.schema.render_help()
    }

    /// Binds `args` (without the program name). See [`parse`](crate::parse).
    pub fn parse<I, T>(&self, args: I) -> Result<Outcome, ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        parser::parse(&self.schema, args)
    }
}
