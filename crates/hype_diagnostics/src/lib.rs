//! hype_diagnostics: Diagnostic messages and error reporting infrastructure.
//!
//! Every error the registration pass can raise has a message template and a
//! stable `HS` code here. Crates turn their error values into a [`Diagnostic`]
//! so the driver can print them uniformly.

use std::fmt;

/// Diagnostic category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCategory {
    Error,
}

impl fmt::Display for DiagnosticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticCategory::Error => write!(f, "error"),
        }
    }
}

/// A diagnostic message template with a code and category.
#[derive(Debug, Clone)]
pub struct DiagnosticMessage {
    /// The diagnostic code (e.g., 2304).
    pub code: u32,
    /// The category of this diagnostic.
    pub category: DiagnosticCategory,
    /// The message template string. May contain `{0}`, `{1}`, etc. placeholders.
    pub message: &'static str,
}

/// A realized diagnostic with resolved message text.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// The file the diagnostic belongs to, if known.
    pub file: Option<String>,
    pub message_text: String,
    pub code: u32,
    pub category: DiagnosticCategory,
    /// Related diagnostics.
    pub related_information: Vec<Diagnostic>,
}

impl Diagnostic {
    /// Create a new diagnostic without location info.
    pub fn new(message: &DiagnosticMessage, args: &[&str]) -> Self {
        Self {
            file: None,
            message_text: format_message(message.message, args),
            code: message.code,
            category: message.category,
            related_information: Vec::new(),
        }
    }

    /// Attach the file name the diagnostic was produced for.
    pub fn in_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Add related diagnostic information.
    pub fn with_related(mut self, related: Diagnostic) -> Self {
        self.related_information.push(related);
        self
    }

    pub fn is_error(&self) -> bool {
        self.category == DiagnosticCategory::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref file) = self.file {
            write!(f, "{}: ", file)?;
        }
        write!(f, "{} HS{}: {}", self.category, self.code, self.message_text)?;
        for related in &self.related_information {
            write!(f, "\n  {}", related)?;
        }
        Ok(())
    }
}

/// Format a diagnostic message template by replacing `{0}`, `{1}`, etc. with arguments.
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{}}}", i), arg);
    }
    result
}

// ============================================================================
// Diagnostic Messages
// ============================================================================

pub mod messages {
    use super::*;

    macro_rules! diag {
        ($code:expr, Error, $msg:expr) => {
            DiagnosticMessage { code: $code, category: DiagnosticCategory::Error, message: $msg }
        };
    }

    // ========================================================================
    // Names and members
    // ========================================================================
    pub const DUPLICATE_MEMBER_0: DiagnosticMessage =
        diag!(2300, Error, "Duplicate member '{0}' in object literal.");
    pub const CANNOT_FIND_NAME_0: DiagnosticMessage = diag!(2304, Error, "Cannot find name '{0}'.");
    pub const CANNOT_FIND_TYPE_0: DiagnosticMessage = diag!(2305, Error, "Cannot find type '{0}'.");
    pub const FAILED_TO_RESOLVE_TYPES_0: DiagnosticMessage =
        diag!(2306, Error, "Failed to resolve types: {0}.");
    pub const PROPERTY_0_DOES_NOT_EXIST_ON_TYPE_1: DiagnosticMessage =
        diag!(2339, Error, "Property '{0}' does not exist on type '{1}'.");
    pub const MEMBER_0_REFERENCED_THROUGH_THIS_WAS_NEVER_DECLARED: DiagnosticMessage = diag!(
        2340,
        Error,
        "Member '{0}' is referenced through 'this' but is never declared in the object literal."
    );
    pub const TIMED_OUT_WAITING_FOR_MEMBER_0: DiagnosticMessage =
        diag!(2341, Error, "Timed out waiting for member '{0}' to be declared.");
    pub const WAITING_FOR_MEMBER_0_FAILED_1: DiagnosticMessage =
        diag!(2342, Error, "Waiting for member '{0}' failed: {1}.");
    pub const THIS_OUTSIDE_OBJECT_LITERAL: DiagnosticMessage =
        diag!(2332, Error, "'this' cannot be referenced outside an object literal.");

    // ========================================================================
    // Assignability
    // ========================================================================
    pub const _0_WAS_ANNOTATED_1_BUT_FOUND_2: DiagnosticMessage = diag!(
        2322,
        Error,
        "'{0}' had a type annotation of '{1}', but the type was found to be '{2}'."
    );
    pub const CANNOT_ASSIGN_TYPE_0_TO_1_OF_TYPE_2: DiagnosticMessage =
        diag!(2323, Error, "Cannot assign type '{0}' to '{1}' of type '{2}'.");
    pub const INVALID_ASSIGNMENT_TARGET: DiagnosticMessage = diag!(
        2364,
        Error,
        "The left-hand side of an assignment must be a variable or a member access."
    );
    pub const TYPE_0_CIRCULARLY_REFERENCES_ITSELF: DiagnosticMessage =
        diag!(2456, Error, "Type '{0}' circularly references itself.");

    // ========================================================================
    // Functions and calls
    // ========================================================================
    pub const FUNCTION_0_DECLARES_RETURN_TYPE_1_BUT_RETURNS_2: DiagnosticMessage = diag!(
        2355,
        Error,
        "Function '{0}' declares return type '{1}', but its body returns '{2}'."
    );
    pub const RETURN_OUTSIDE_FUNCTION_BODY: DiagnosticMessage =
        diag!(1108, Error, "A 'return' statement can only be used within a function body.");
    pub const _0_OF_TYPE_1_IS_NOT_CALLABLE: DiagnosticMessage =
        diag!(2349, Error, "'{0}' of type '{1}' is not callable.");
    pub const TOO_MANY_ARGUMENTS_FOR_0_EXPECTED_1_GOT_2: DiagnosticMessage = diag!(
        2554,
        Error,
        "Too many arguments for invocation of function '{0}': expected at most {1}, got {2}."
    );
    pub const MISSING_ARGUMENT_FOR_0_IN_CALL_TO_1: DiagnosticMessage =
        diag!(2555, Error, "Missing argument for parameter '{0}' in call to function '{1}'.");
    pub const CANNOT_USE_TYPE_0_FOR_ARGUMENT_1_IN_CALL_TO_2: DiagnosticMessage = diag!(
        2345,
        Error,
        "Cannot use type '{0}' for argument '{1}' in call to function '{2}'; expected '{3}'."
    );

    // ========================================================================
    // Driver
    // ========================================================================
    pub const CANNOT_READ_FILE_0_1: DiagnosticMessage =
        diag!(5001, Error, "Cannot read file '{0}': {1}.");
    pub const FAILED_TO_PARSE_0_1: DiagnosticMessage =
        diag!(5002, Error, "Failed to parse '{0}': {1}.");
    pub const NO_SOURCE_TO_COMPILE: DiagnosticMessage =
        diag!(5003, Error, "No source file was provided to the program.");
    pub const INVALID_CONFIGURATION_0_1: DiagnosticMessage =
        diag!(5004, Error, "Invalid configuration in '{0}': {1}.");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_message() {
        let text = format_message("'{0}' had a type annotation of '{1}'", &["foo", "string"]);
        assert_eq!(text, "'foo' had a type annotation of 'string'");
    }

    #[test]
    fn test_format_message_reused_placeholder() {
        assert_eq!(format_message("{0} and {0}", &["x"]), "x and x");
    }

    #[test]
    fn test_diagnostic_display() {
        let diag = Diagnostic::new(&messages::CANNOT_FIND_NAME_0, &["foo"]).in_file("main.hs.json");
        assert!(diag.is_error());
        assert_eq!(diag.to_string(), "main.hs.json: error HS2304: Cannot find name 'foo'.");
    }

    #[test]
    fn test_diagnostic_with_related() {
        let primary = Diagnostic::new(&messages::FAILED_TO_RESOLVE_TYPES_0, &["Foo"]);
        let related = Diagnostic::new(&messages::CANNOT_FIND_TYPE_0, &["Foo"]);
        let combined = primary.with_related(related);
        assert_eq!(combined.related_information.len(), 1);
        assert!(combined.to_string().contains("HS2305"));
    }
}
