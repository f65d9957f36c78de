//! Driver errors.

use hype_checker::RegistrationError;
use hype_diagnostics::{messages, Diagnostic};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompileError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration in {path}: {source}")]
    Config {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// An AST file that does not deserialize into a source file.
    #[error("failed to parse {path}: {source}")]
    Ast {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("no source file was provided to the program")]
    NoSource,

    #[error(transparent)]
    Registration(#[from] RegistrationError),
}

impl CompileError {
    /// Render this error as a diagnostic.
    pub fn diagnostic(&self) -> Diagnostic {
        let (message, path, source) = match self {
            CompileError::Io { path, source } => {
                (&messages::CANNOT_READ_FILE_0_1, path, source.to_string())
            }
            CompileError::Config { path, source } => {
                (&messages::INVALID_CONFIGURATION_0_1, path, source.to_string())
            }
            CompileError::Ast { path, source } => {
                (&messages::FAILED_TO_PARSE_0_1, path, source.to_string())
            }
            CompileError::NoSource => return Diagnostic::new(&messages::NO_SOURCE_TO_COMPILE, &[]),
            CompileError::Registration(err) => return err.diagnostic(),
        };
        Diagnostic::new(message, &[path.as_str(), source.as_str()]).in_file(path.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_source_diagnostic() {
        let diag = CompileError::NoSource.diagnostic();
        assert_eq!(diag.code, 5003);
        assert!(diag.file.is_none());
    }

    #[test]
    fn test_io_diagnostic_names_file() {
        let err = CompileError::Io {
            path: "missing.json".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        let diag = err.diagnostic();
        assert_eq!(diag.code, 5001);
        assert_eq!(diag.file.as_deref(), Some("missing.json"));
        assert_eq!(diag.message_text, "Cannot read file 'missing.json': not found.");
    }

    #[test]
    fn test_registration_error_passes_through() {
        let err = CompileError::from(RegistrationError::ReturnOutsideFunction);
        assert_eq!(err.diagnostic().code, 1108);
        assert!(matches!(err, CompileError::Registration(_)));
    }
}
