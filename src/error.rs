//! Error types for the shell.
//!
//! Handlers return [`CommandError`], which keeps the underlying cause around
//! for logging. The dispatcher reduces every failure to one of the two
//! user-visible [`ShellError`] kinds before anything is printed.

use std::fmt;

// ---------------------------------------------------------------------------
// ShellError
// ---------------------------------------------------------------------------

/// The only failures a user ever sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellError {
    /// Unknown command or missing arguments.
    InvalidInput,
    /// Anything else that went wrong while running a command.
    OperationFailed,
}

impl fmt::Display for ShellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput => write!(f, "Invalid input"),
            Self::OperationFailed => write!(f, "Operation Failed"),
        }
    }
}

impl std::error::Error for ShellError {}

impl From<&CommandError> for ShellError {
    fn from(e: &CommandError) -> Self {
        match e {
            CommandError::InvalidInput => Self::InvalidInput,
            _ => Self::OperationFailed,
        }
    }
}

// ---------------------------------------------------------------------------
// CursorError
// ---------------------------------------------------------------------------

/// Rejected session cursor mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CursorError {
    /// The requested path was empty.
    EmptyPath,
}

impl fmt::Display for CursorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPath => write!(f, "cannot move the cursor to an empty path"),
        }
    }
}

impl std::error::Error for CursorError {}

// ---------------------------------------------------------------------------
// CommandError
// ---------------------------------------------------------------------------

/// Errors raised by command handlers.
#[derive(Debug)]
pub enum CommandError {
    /// Missing or malformed arguments.
    InvalidInput,
    /// File-system or stream failure.
    Io(std::io::Error),
    /// The cursor refused the requested path.
    Cursor(CursorError),
    /// Any other handler-specific failure.
    Failed(String),
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput => write!(f, "invalid input"),
            Self::Io(e) => write!(f, "io: {e}"),
            Self::Cursor(e) => write!(f, "cursor: {e}"),
            Self::Failed(msg) => write!(f, "failed: {msg}"),
        }
    }
}

impl std::error::Error for CommandError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Cursor(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CommandError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<CursorError> for CommandError {
    fn from(e: CursorError) -> Self {
        Self::Cursor(e)
    }
}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Errors when loading or parsing configuration.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Toml(toml::de::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io: {e}"),
            Self::Toml(e) => write!(f, "toml: {e}"),
            Self::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        Self::Toml(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shell_error_messages_are_fixed() {
        assert_eq!(ShellError::InvalidInput.to_string(), "Invalid input");
        assert_eq!(ShellError::OperationFailed.to_string(), "Operation Failed");
    }

    #[test]
    fn only_invalid_input_survives_normalization() {
        assert_eq!(
            ShellError::from(&CommandError::InvalidInput),
            ShellError::InvalidInput
        );
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert_eq!(
            ShellError::from(&CommandError::from(io_err)),
            ShellError::OperationFailed
        );
        assert_eq!(
            ShellError::from(&CommandError::from(CursorError::EmptyPath)),
            ShellError::OperationFailed
        );
        assert_eq!(
            ShellError::from(&CommandError::Failed("codec".into())),
            ShellError::OperationFailed
        );
    }

    #[test]
    fn command_error_keeps_io_cause() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let e = CommandError::from(io_err);
        let s = e.to_string();
        assert!(s.starts_with("io:"), "got: {s}");
        assert!(s.contains("denied"));
        assert!(std::error::Error::source(&e).is_some());
    }

    #[test]
    fn config_error_from_toml() {
        let toml_err: toml::de::Error = toml::from_str::<toml::Value>("x = [unclosed").unwrap_err();
        let e = ConfigError::from(toml_err);
        assert!(e.to_string().starts_with("toml:"));
    }

    #[test]
    fn config_error_invalid_message() {
        let e = ConfigError::Invalid("bad color".into());
        assert_eq!(e.to_string(), "invalid config: bad color");
    }
}
