//! CLI-specific error types and mappings.
//!
//! This module provides error types for the CLI adapter and mappings
//! from `CoreError` and adapter errors to exit codes.

use cablesync_core::{CoreError, FixtureError, PointWriteError, RepositoryError, SettingsError};
use cablesync_influx::InfluxError;
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid arguments or generator parameters.
    #[error("Invalid arguments: {0}")]
    Usage(String),

    /// Input data could not be decoded or was refused as malformed.
    #[error("Data error: {0}")]
    Data(String),

    /// An input file or record does not exist.
    #[error("Input not found: {0}")]
    NoInput(String),

    /// A backing service could not be reached.
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    /// IO error (storage failure, permission denied, etc.).
    #[error("IO error: {0}")]
    Io(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow sysexits.h:
    /// - 2: Misuse of shell command (invalid arguments)
    /// - 65: EX_DATAERR
    /// - 66: EX_NOINPUT
    /// - 69: EX_UNAVAILABLE
    /// - 74: EX_IOERR
    /// - 78: EX_CONFIG
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Usage(_) => 2,
            Self::Data(_) => 65,
            Self::NoInput(_) => 66,
            Self::Unavailable(_) => 69,
            Self::Io(_) => 74,
            Self::Config(_) => 78,
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Repository(repo_err) => repo_err.into(),
            CoreError::PointWrite(write_err) => match &write_err {
                PointWriteError::Connection(msg) => Self::Unavailable(msg.clone()),
                PointWriteError::Rejected { status: 401 | 403, .. } => {
                    Self::Config(write_err.to_string())
                }
                PointWriteError::Rejected { status, .. } if *status >= 500 => {
                    Self::Unavailable(write_err.to_string())
                }
                PointWriteError::Rejected { .. } | PointWriteError::Encoding(_) => {
                    Self::Data(write_err.to_string())
                }
            },
            CoreError::Fixture(fixture_err) => match &fixture_err {
                FixtureError::Read { .. } => Self::NoInput(fixture_err.to_string()),
                FixtureError::Malformed(_) => Self::Data(fixture_err.to_string()),
            },
            CoreError::Settings(settings_err) => settings_err.into(),
            CoreError::Validation(msg) => Self::Usage(msg),
            CoreError::Configuration(msg) => Self::Config(msg),
        }
    }
}

impl From<RepositoryError> for CliError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Connection(msg) => Self::Unavailable(msg),
            RepositoryError::NotFound(msg) => Self::NoInput(msg),
            RepositoryError::Serialization(msg) => Self::Data(msg),
            RepositoryError::Storage(msg) => Self::Io(msg),
        }
    }
}

impl From<SettingsError> for CliError {
    fn from(err: SettingsError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<InfluxError> for CliError {
    fn from(err: InfluxError) -> Self {
        match &err {
            InfluxError::ApiRequestFailed { status, .. } => match *status {
                401 | 403 => Self::Config(err.to_string()),
                400..=499 => Self::Usage(err.to_string()),
                _ => Self::Unavailable(err.to_string()),
            },
            InfluxError::Network(_) => Self::Unavailable(err.to_string()),
            InfluxError::InvalidResponse { .. } | InfluxError::Encoding(_) => {
                Self::Data(err.to_string())
            }
            InfluxError::InvalidUrl(_) | InfluxError::InvalidConfig(_) => {
                Self::Config(err.to_string())
            }
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        let err = match err.downcast::<Self>() {
            Ok(cli) => return cli,
            Err(err) => err,
        };
        let err = match err.downcast::<CoreError>() {
            Ok(core) => return core.into(),
            Err(err) => err,
        };
        let err = match err.downcast::<SettingsError>() {
            Ok(settings) => return settings.into(),
            Err(err) => err,
        };
        let err = match err.downcast::<RepositoryError>() {
            Ok(repo) => return repo.into(),
            Err(err) => err,
        };
        match err.downcast::<InfluxError>() {
            Ok(influx) => influx.into(),
            Err(err) => Self::Unavailable(format!("{err:#}")),
        }
    }
}
