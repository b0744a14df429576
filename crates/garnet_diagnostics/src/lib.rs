//! garnet_diagnostics: Diagnostic messages and error reporting.
//!
//! Every error the front end can produce is declared once in [`messages`]
//! with a stable code. A failed parse surfaces exactly one of them wrapped
//! in a [`ParseError`].

use garnet_core::text::{LineAndColumn, LineMap, TextSpan};
use std::fmt;
use std::ops::Range;
use thiserror::Error;

/// Codes reserved for lexical errors. Syntax errors use 1100-1199.
pub const LEXICAL_CODES: Range<u32> = 1000..1100;

/// A message template with its stable code. `{0}`, `{1}`, ... are filled
/// from the arguments given when the diagnostic is raised.
#[derive(Debug, Clone)]
pub struct DiagnosticMessage {
    pub code: u32,
    pub message: &'static str,
}

impl DiagnosticMessage {
    pub fn is_lexical(&self) -> bool {
        LEXICAL_CODES.contains(&self.code)
    }
}

/// A raised error: filled-in message text plus where it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub file: Option<String>,
    pub span: Option<TextSpan>,
    /// Line and column of `span.start`, once resolved against a [`LineMap`].
    pub location: Option<LineAndColumn>,
    pub message_text: String,
    pub code: u32,
}

impl Diagnostic {
    pub fn new(message: &DiagnosticMessage, args: &[&str]) -> Self {
        Self {
            file: None,
            span: None,
            location: None,
            message_text: format_message(message.message, args),
            code: message.code,
        }
    }

    pub fn at(span: TextSpan, message: &DiagnosticMessage, args: &[&str]) -> Self {
        Self {
            span: Some(span),
            ..Self::new(message, args)
        }
    }

    /// Attach the file name and resolve the span to a line and column.
    pub fn in_file(mut self, file: &str, line_map: &LineMap<'_>) -> Self {
        self.file = Some(file.to_string());
        self.location = self.span.map(|span| line_map.line_and_column_of(span.start));
        self
    }

    pub fn is_lexical(&self) -> bool {
        LEXICAL_CODES.contains(&self.code)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // `file:line:col: ` when resolved, `file(offset): ` when only the span is known.
        if let Some(file) = &self.file {
            match (self.location, self.span) {
                (Some(location), _) => write!(f, "{}:{}: ", file, location)?,
                (None, Some(span)) => write!(f, "{}({}): ", file, span.start)?,
                (None, None) => write!(f, "{}: ", file)?,
            }
        }
        write!(f, "error RB{}: {}", self.code, self.message_text)
    }
}

/// Substitute `args[i]` for each `{i}` in `template`.
pub fn format_message(template: &str, args: &[&str]) -> String {
    args.iter()
        .enumerate()
        .fold(template.to_string(), |text, (index, arg)| {
            text.replace(&format!("{{{}}}", index), arg)
        })
}

/// The single error a failed parse produces. There is no partial result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Unknown character or unterminated literal.
    #[error("{0}")]
    Lexical(Diagnostic),
    /// Grammar violation.
    #[error("{0}")]
    Syntax(Diagnostic),
}

impl ParseError {
    /// Classify a diagnostic by its code range.
    pub fn from_diagnostic(diagnostic: Diagnostic) -> Self {
        if diagnostic.is_lexical() {
            ParseError::Lexical(diagnostic)
        } else {
            ParseError::Syntax(diagnostic)
        }
    }

    pub fn diagnostic(&self) -> &Diagnostic {
        match self {
            ParseError::Lexical(d) | ParseError::Syntax(d) => d,
        }
    }

    /// The human-readable message, without location prefix.
    pub fn message(&self) -> &str {
        &self.diagnostic().message_text
    }

    pub fn code(&self) -> u32 {
        self.diagnostic().code
    }

    pub fn span(&self) -> Option<TextSpan> {
        self.diagnostic().span
    }

    /// 0-based line and column of the error, when known.
    pub fn location(&self) -> Option<LineAndColumn> {
        self.diagnostic().location
    }

    pub fn is_lexical(&self) -> bool {
        matches!(self, ParseError::Lexical(_))
    }
}

// ============================================================================
// Messages
// ============================================================================

pub mod messages {
    use super::*;

    macro_rules! diag {
        ($code:expr, $msg:expr) => {
            DiagnosticMessage { code: $code, message: $msg }
        };
    }

    // ========================================================================
    // Lexical errors (1000-1099)
    // ========================================================================

    pub const UNEXPECTED_CHARACTER_0: DiagnosticMessage = diag!(1001, "Unexpected character '{0}'.");
    pub const UNTERMINATED_STRING_LITERAL: DiagnosticMessage = diag!(1002, "Unterminated string literal.");
    pub const UNTERMINATED_HEREDOC_0: DiagnosticMessage = diag!(1003, "Unterminated heredoc; terminator '{0}' not found.");
    pub const UNTERMINATED_REGULAR_EXPRESSION_LITERAL: DiagnosticMessage = diag!(1004, "Unterminated regular expression literal.");
    pub const UNTERMINATED_PERCENT_LITERAL_0: DiagnosticMessage = diag!(1005, "Unterminated percent literal; '{0}' expected.");
    pub const UNTERMINATED_SUBSHELL_COMMAND: DiagnosticMessage = diag!(1006, "Unterminated subshell command.");
    pub const UNTERMINATED_SYMBOL_LITERAL: DiagnosticMessage = diag!(1007, "Unterminated symbol literal.");
    pub const INVALID_CHARACTER_LITERAL: DiagnosticMessage = diag!(1008, "'?' must be followed by a printable character.");
    pub const INVALID_GLOBAL_VARIABLE_NAME: DiagnosticMessage = diag!(1009, "'$' must be followed by a global variable name.");
    pub const INVALID_VARIABLE_NAME_0: DiagnosticMessage = diag!(1010, "'{0}' must be followed by a variable name.");
    pub const UNKNOWN_PERCENT_LITERAL_0: DiagnosticMessage = diag!(1011, "Unknown type of percent literal '%{0}'.");

    // ========================================================================
    // Syntax errors (1100-1199)
    // ========================================================================

    pub const UNEXPECTED_TOKEN_0: DiagnosticMessage = diag!(1100, "Unexpected '{0}'.");
    pub const _0_EXPECTED: DiagnosticMessage = diag!(1101, "'{0}' expected.");
    pub const _0_EXPECTED_BUT_FOUND_1: DiagnosticMessage = diag!(1102, "'{0}' expected, but found '{1}'.");
    pub const EXPRESSION_EXPECTED_BUT_FOUND_0: DiagnosticMessage = diag!(1103, "Expression expected, but found '{0}'.");
    pub const CLASS_NAME_MUST_BE_A_CONSTANT_0: DiagnosticMessage = diag!(1104, "Class name must begin with an uppercase letter, found '{0}'.");
    pub const MODULE_NAME_MUST_BE_A_CONSTANT_0: DiagnosticMessage = diag!(1105, "Module name must begin with an uppercase letter, found '{0}'.");
    pub const SUPERCLASS_MUST_BE_A_CONSTANT_0: DiagnosticMessage = diag!(1106, "Superclass must be a constant, found '{0}'.");
    pub const CANNOT_ASSIGN_TO_0: DiagnosticMessage = diag!(1107, "Cannot assign to {0}.");
    pub const INTEGER_LITERAL_0_IS_TOO_LARGE: DiagnosticMessage = diag!(1108, "Integer literal '{0}' is too large.");
    pub const INVALID_NUMERIC_LITERAL_0: DiagnosticMessage = diag!(1109, "Invalid numeric literal '{0}'.");
    pub const METHOD_NAME_EXPECTED_BUT_FOUND_0: DiagnosticMessage = diag!(1110, "Method name expected, but found '{0}'.");
    pub const PARAMETER_NAME_EXPECTED_BUT_FOUND_0: DiagnosticMessage = diag!(1111, "Parameter name expected, but found '{0}'.");
    pub const ALIAS_NAME_EXPECTED_BUT_FOUND_0: DiagnosticMessage = diag!(1112, "Method name or symbol expected after 'alias', but found '{0}'.");
    pub const EXCEPTION_CLASS_EXPECTED_BUT_FOUND_0: DiagnosticMessage = diag!(1113, "Exception class expected, but found '{0}'.");
    pub const MULTIPLE_ASSIGNMENT_EXPECTS_EQUALS: DiagnosticMessage = diag!(1114, "A multiple assignment target list must be followed by '='.");
    pub const _0_DOES_NOT_TAKE_A_VALUE: DiagnosticMessage = diag!(1115, "'{0}' does not take a value.");
    pub const MAXIMUM_NESTING_DEPTH_0_EXCEEDED: DiagnosticMessage = diag!(1116, "Maximum nesting depth of {0} exceeded.");
    pub const UNEXPECTED_END_OF_INPUT_0_EXPECTED: DiagnosticMessage = diag!(1117, "Unexpected end of input; '{0}' expected.");
}
