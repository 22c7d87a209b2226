use std::ffi::OsString;

use crate::error::ConfigError;
use crate::schema::{OptionKind, Schema};
use crate::settings::{Field, Settings};

/// Result of a successful parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Every option was bound; options that were not given hold their schema default.
    Parsed(Settings),
    /// `-h`/`--help` was given. Carries the usage text; no option was bound.
    HelpRequested(String),
}

/// Binds command line tokens (without the program name) against `schema`.
///
/// A help flag anywhere in `args` wins over everything else, including malformed tokens. When an
/// option is repeated the last occurrence wins.
pub fn parse<I, T>(schema: &Schema, args: I) -> Result<Outcome, ConfigError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    if args.iter().any(|arg| arg == "-h" || arg == "--help") {
        return Ok(Outcome::HelpRequested(schema.render_help()));
    }

    let matches = schema.command().try_get_matches_from(args)?;
    // bundled short flags such as `-hn4` only surface after tokenising
    if matches.get_flag("help") {
        return Ok(Outcome::HelpRequested(schema.render_help()));
    }

    let mut settings = schema.defaults();
    for spec in schema.options() {
        let OptionKind::Value { field, .. } = spec.kind else {
            continue;
        };
        if let Some(text) = matches.get_one::<String>(spec.name) {
            settings.store(field, coerce(spec.name, field, text)?);
        }
    }
    tracing::debug!(mode = %schema.mode(), ?settings, "bound configuration");
    Ok(Outcome::Parsed(settings))
}

fn coerce(option: &'static str, field: Field, text: &str) -> Result<u64, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidValue {
        option,
        value: text.to_string(),
        reason,
    };

    let value = text.parse::<u64>().map_err(|e| invalid(e.to_string()))?;
    if value < field.min() {
        return Err(invalid(format!("must be at least {}", field.min())));
    }
    if value > field.max() {
        return Err(invalid(format!("must be at most {}", field.max())));
    }
    Ok(value)
}
