//! Structured CLI errors with meaningful exit codes.
//!
//! Exit code scheme:
//! - 0:  success
//! - 2:  clap arg parse error (automatic, before our code runs)
//! - 10: simulation error (bad dimensions, bad params, unknown source/brush)
//! - 11: I/O error (scenario file read)
//! - 12: input error (malformed scenario JSON, bad probe arguments)
//! - 13: serialization error (JSON output failure)

use flowfield_core::SimError;
use std::fmt;

/// Errors produced by CLI operations, each mapped to a distinct exit code.
#[derive(Debug)]
pub enum CliError {
    /// A simulation-level error (bad dimensions, params, or specs).
    Sim(SimError),
    /// An I/O error (scenario file read).
    Io(String),
    /// A user input error (malformed scenario, bad probe arguments).
    Input(String),
    /// A serialization error (JSON output failure).
    Serialization(String),
}

impl CliError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Sim(_) => 10,
            CliError::Io(_) => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Sim(e) => write!(f, "{e}"),
            CliError::Io(msg) => write!(f, "{msg}"),
            CliError::Input(msg) => write!(f, "{msg}"),
            CliError::Serialization(msg) => write!(f, "{msg}"),
        }
    }
}

impl From<SimError> for CliError {
    fn from(e: SimError) -> Self {
        CliError::Sim(e)
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct_per_category() {
        let errors = [
            CliError::Sim(SimError::InvalidDimensions),
            CliError::Io("gone".into()),
            CliError::Input("bad".into()),
            CliError::Serialization("oops".into()),
        ];
        let codes: Vec<i32> = errors.iter().map(CliError::exit_code).collect();
        assert_eq!(codes, vec![10, 11, 12, 13]);
    }

    #[test]
    fn sim_errors_convert_with_their_message() {
        let err: CliError = SimError::UnknownSource("magnetron".into()).into();
        assert_eq!(err.exit_code(), 10);
        assert!(format!("{err}").contains("magnetron"));
    }

    #[test]
    fn io_errors_map_to_io_exit_code() {
        let err: CliError = std::io::Error::new(std::io::ErrorKind::NotFound, "missing").into();
        assert_eq!(err.exit_code(), 11);
    }
}
