//! Error types for the interpreter.
//!
//! Two tiers:
//! - [`LineError`]: a single line could not be translated. The dispatcher
//!   logs it and moves on to the next line.
//! - [`Error`]: everything else aborts the whole top-level run. Whatever
//!   was logged before the failure stays in the execution log.

use alloc::string::String;
use thiserror::Error;

/// Top-level error type used across the interpreter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// `LOCALE` named a layout that is not compiled in.
    #[error("locale not found: {0}")]
    LocaleNotFound(String),

    /// `IMPORT` (or a trigger slot) named a script the store does not have.
    #[error("script not found: {0}")]
    ScriptNotFound(String),

    /// `IMPORT` chain exceeded the nesting limit (usually a script that
    /// imports itself).
    #[error("IMPORT nested too deep: {0}")]
    ImportTooDeep(String),

    /// A numeric argument did not parse.
    #[error("{command}: invalid number '{value}'")]
    InvalidNumber { command: String, value: String },

    /// A required argument was absent.
    #[error("{command}: missing argument")]
    MissingArgument { command: String },

    /// Remote payload was not valid base64 / UTF-8.
    #[error("payload is not valid base64-encoded UTF-8")]
    InvalidPayload,

    /// The script store refused the write.
    #[error("script store is not writable")]
    StoreNotWritable,

    /// Recoverable translation failure of one line.
    #[error(transparent)]
    Line(#[from] LineError),
}

impl Error {
    /// Returns `true` if the run may continue with the next line.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::Line(_))
    }

    pub(crate) fn invalid_number(command: &str, value: &str) -> Self {
        Error::InvalidNumber {
            command: command.into(),
            value: value.into(),
        }
    }

    pub(crate) fn missing_argument(command: &str) -> Self {
        Error::MissingArgument {
            command: command.into(),
        }
    }
}

/// Per-line translation errors (logged, line skipped).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineError {
    #[error("Unknown mouse button: <{0}>")]
    UnknownMouseButton(String),

    #[error("Unknown mouse command: <{0}>")]
    UnknownMouseCommand(String),

    #[error("Unknown consumer control code: <{0}>")]
    UnknownConsumerCode(String),

    #[error("Unknown consumer control command: <{0}>")]
    UnknownConsumerCommand(String),

    #[error("Unknown LED: <{0}>")]
    UnknownLed(String),
}

pub type Result<T> = core::result::Result<T, Error>;
