use clap::error::{ContextKind, ContextValue, ErrorKind};

/// Why a command line could not be turned into [`Settings`](crate::Settings).
///
/// Every variant is fatal for the run: no benchmark work may start from a partially bound
/// configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A token that names no option of the active mode.
    #[error("unrecognized argument '{0}'")]
    UnknownOption(String),

    /// A value that cannot be coerced into its option's type.
    #[error("invalid value '{value}' for '--{option}': {reason}")]
    InvalidValue {
        option: &'static str,
        value: String,
        reason: String,
    },

    /// Any other malformed command line, e.g. an option missing its value.
    #[error(transparent)]
    CommandLine(clap::Error),
}

impl ConfigError {
    /// The option or token the error is about, when one can be named.
    pub fn offending(&self) -> Option<&str> {
        match self {
            ConfigError::UnknownOption(token) => Some(token),
            ConfigError::InvalidValue { option, .. } => Some(option),
            ConfigError::CommandLine(err) => match err.get(ContextKind::InvalidArg) {
                Some(ContextValue::String(arg)) => Some(arg),
                _ => None,
            },
        }
    }
}

impl From<clap::Error> for ConfigError {
    fn from(err: clap::Error) -> Self {
        if err.kind() == ErrorKind::UnknownArgument {
            if let Some(ContextValue::String(token)) = err.get(ContextKind::InvalidArg) {
                return ConfigError::UnknownOption(token.clone());
            }
        }
        ConfigError::CommandLine(err)
    }
}
