//! The lexical analyzer.
//!
//! A state machine over a [`Scanner`]. [`LexState::Dispatch`] skips trivia,
//! inspects the next rune and picks a recognizer state; every recognizer
//! emits exactly one token and hands control back to `Dispatch`. An unknown
//! character or an unterminated literal emits one [`SyntaxKind::Unknown`]
//! token and moves to [`LexState::Halted`], after which nothing more is
//! produced.
//!
//! Several runes mean different things depending on whether an operand or
//! an operator is expected (`/`, `%`, `<<`, `?`, `:`). The lexer tracks the
//! previous significant token and the spacing around the current rune to
//! decide.

use crate::char_codes::*;
use crate::scanner::{line_end_from, Scanner};
use crate::token::Token;
use garnet_ast::syntax_kind::SyntaxKind;
use garnet_ast::types::TokenFlags;
use garnet_core::text::{TextPos, TextSpan};
use garnet_diagnostics::{messages, Diagnostic, DiagnosticMessage};
use tracing::{debug, trace};

/// The states of the lexer. Each non-terminal state names the recognizer
/// that runs next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexState {
    Dispatch,
    Number,
    Identifier,
    SingleQuote,
    DoubleQuote,
    Backtick,
    Symbol,
    /// Instance, class and global variables.
    Sigil,
    Character,
    Heredoc,
    Percent,
    Regex,
    Operator,
    Halted,
}

/// Result of running one state.
enum Step {
    Emit(Token),
    Goto(LexState),
}

/// A heredoc whose body has been read ahead. When the lexer consumes the
/// line feed at `line_end` it continues at `resume`, past the body.
#[derive(Debug, Clone, Copy)]
struct PendingHeredoc {
    line_end: usize,
    resume: usize,
}

/// Malformed literal; the caller reports the matching diagnostic.
struct Unterminated;

pub struct Lexer<'src> {
    scanner: Scanner<'src>,
    state: LexState,
    /// Kind of the previously emitted token.
    last_kind: Option<SyntaxKind>,
    heredoc: Option<PendingHeredoc>,
    /// Spacing seen since the previous token.
    pending_flags: TokenFlags,
    error: Option<Diagnostic>,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            scanner: Scanner::new(source),
            state: LexState::Dispatch,
            last_kind: None,
            heredoc: None,
            pending_flags: TokenFlags::NONE,
            error: None,
        }
    }

    pub fn state(&self) -> LexState {
        self.state
    }

    /// The diagnostic behind a terminal `Unknown` token.
    pub fn take_error(&mut self) -> Option<Diagnostic> {
        self.error.take()
    }

    /// Produce the next token. Returns `None` once the end-of-file or error
    /// token has been produced.
    pub fn next_token(&mut self) -> Option<Token> {
        loop {
            let step = match self.state {
                LexState::Halted => return None,
                LexState::Dispatch => self.lex_dispatch(),
                LexState::Number => self.lex_number(),
                LexState::Identifier => self.lex_identifier(),
                LexState::SingleQuote => self.lex_quoted('\'', SyntaxKind::StringLiteral),
                LexState::DoubleQuote => self.lex_quoted('"', SyntaxKind::InterpolatedStringLiteral),
                LexState::Backtick => self.lex_quoted('`', SyntaxKind::SubshellLiteral),
                LexState::Symbol => self.lex_symbol(),
                LexState::Sigil => self.lex_sigil(),
                LexState::Character => self.lex_character(),
                LexState::Heredoc => self.lex_heredoc(),
                LexState::Percent => self.lex_percent(),
                LexState::Regex => self.lex_regex(),
                LexState::Operator => self.lex_operator(),
            };
            match step {
                Step::Goto(state) => self.state = state,
                Step::Emit(token) => {
                    self.state = if token.is_terminal() {
                        LexState::Halted
                    } else {
                        LexState::Dispatch
                    };
                    return Some(self.finish(token));
                }
            }
        }
    }

    // ========================================================================
    // Bookkeeping
    // ========================================================================

    fn finish(&mut self, mut token: Token) -> Token {
        let trailing = self.scanner.peek().map_or(true, is_white_space);
        token.flags = self.pending_flags;
        if trailing {
            token.flags |= TokenFlags::TRAILING_WHITESPACE;
        }
        self.pending_flags = TokenFlags::NONE;
        self.last_kind = Some(token.kind);
        trace!(kind = ?token.kind, span = ?token.span, "token");
        token
    }

    /// Record a lexical error and emit the terminal error token.
    fn fail(&mut self, message: &DiagnosticMessage, args: &[&str]) -> Step {
        if self.scanner.pending().is_empty() {
            self.scanner.next();
        }
        let diagnostic = Diagnostic::at(self.scanner.pending_span(), message, args);
        debug!(code = diagnostic.code, message = %diagnostic.message_text, "lexer halted");
        self.error = Some(diagnostic);
        Step::Emit(self.scanner.emit(SyntaxKind::Unknown))
    }

    /// Whether the previous token leaves us expecting an operand.
    fn expects_operand(&self) -> bool {
        self.last_kind.map_or(true, |kind| !kind.ends_value())
    }

    /// `foo /x/`, `puts %w(a)`, `p ?a`: an identifier, whitespace, then a
    /// rune glued to what follows it.
    fn in_command_argument_position(&self) -> bool {
        self.last_kind == Some(SyntaxKind::Identifier)
            && self.pending_flags.is_spaced_before()
            && self.scanner.peek_nth(1).map_or(false, |c| !is_white_space(c))
    }

    fn starts_operand(&self) -> bool {
        self.expects_operand() || self.in_command_argument_position()
    }

    fn at_line_start(&self) -> bool {
        let pos = self.scanner.pos();
        pos == 0 || self.scanner.source().as_bytes()[pos - 1] == b'\n'
    }

    // ========================================================================
    // Dispatch and trivia
    // ========================================================================

    fn lex_dispatch(&mut self) -> Step {
        loop {
            self.scanner.ignore();
            let Some(ch) = self.scanner.peek() else {
                return Step::Emit(self.scanner.emit(SyntaxKind::EndOfFileToken));
            };
            match ch {
                '\n' => {
                    if let Some(token) = self.lex_line_break() {
                        return Step::Emit(token);
                    }
                }
                '#' => self.scanner.skip_to_line_end(),
                '\\' if self.line_continuation_follows() => self.skip_line_continuation(),
                '=' if self.at_line_start() && self.scanner.rest().starts_with("=begin") => {
                    self.skip_block_comment()
                }
                c if is_white_space_single_line(c) => {
                    self.scanner.next();
                    self.pending_flags |= TokenFlags::PRECEDING_WHITESPACE;
                }
                c => return Step::Goto(self.select_state(c)),
            }
        }
    }

    fn select_state(&self, ch: char) -> LexState {
        // After `def` and `.` an operator rune is a method name.
        let operator_name = matches!(
            self.last_kind,
            Some(SyntaxKind::DefKeyword | SyntaxKind::DotToken | SyntaxKind::AmpersandDotToken)
        );
        match ch {
            '0'..='9' => LexState::Number,
            '\'' => LexState::SingleQuote,
            '"' => LexState::DoubleQuote,
            '`' if !operator_name => LexState::Backtick,
            '@' | '$' => LexState::Sigil,
            ':' if self.symbol_follows() => LexState::Symbol,
            '?' if !operator_name && self.character_literal_follows() => LexState::Character,
            '<' if !operator_name && self.heredoc_follows() => LexState::Heredoc,
            '%' if !operator_name && self.percent_literal_follows() => LexState::Percent,
            '/' if !operator_name && self.starts_operand() => LexState::Regex,
            c if is_identifier_start(c) => LexState::Identifier,
            _ => LexState::Operator,
        }
    }

    /// Consume a line feed. Returns the newline token unless the previous
    /// token already ended the statement or a leading-dot line follows.
    /// Brackets do not hide line feeds: a `(` group holds newline-separated
    /// statements, and bracketed lists skip them in the parser.
    fn lex_line_break(&mut self) -> Option<Token> {
        let at = self.scanner.pos();
        self.scanner.next();
        self.resume_after_heredoc(at);

        let insignificant = self.last_kind.map_or(true, SyntaxKind::is_statement_separator)
            || self.leading_dot_follows();
        self.scanner.ignore();
        if insignificant {
            self.pending_flags |= TokenFlags::PRECEDING_LINE_BREAK;
            return None;
        }
        Some(Token::new(SyntaxKind::NewLineToken, "\n", TextSpan::new(at as TextPos, 1)))
    }

    /// Skip a heredoc body once the line that opened it has ended.
    fn resume_after_heredoc(&mut self, line_feed_at: usize) {
        if let Some(pending) = self.heredoc {
            if pending.line_end == line_feed_at {
                self.heredoc = None;
                self.scanner.jump_to(pending.resume);
            }
        }
    }

    /// The next line continues a method chain: `foo\n  .bar`.
    fn leading_dot_follows(&self) -> bool {
        let rest = self.scanner.rest().trim_start_matches(is_white_space_single_line);
        (rest.starts_with('.') && !rest.starts_with("..")) || rest.starts_with("&.")
    }

    fn line_continuation_follows(&self) -> bool {
        let rest = self.scanner.rest();
        rest.starts_with("\\\n") || rest.starts_with("\\\r\n")
    }

    /// Swallow `\` line feeds together with any comment-only lines they lead
    /// into. The next token counts as whitespace-separated.
    fn skip_line_continuation(&mut self) {
        while self.line_continuation_follows() {
            self.scanner.next();
            self.scanner.accept("\r");
            let at = self.scanner.pos();
            self.scanner.next();
            self.resume_after_heredoc(at);
            loop {
                self.scanner.accept_while(is_white_space_single_line);
                if self.scanner.peek() != Some('#') {
                    break;
                }
                self.scanner.skip_to_line_end();
                let at = self.scanner.pos();
                if self.scanner.next().is_none() {
                    break;
                }
                self.resume_after_heredoc(at);
            }
        }
        self.scanner.ignore();
        self.pending_flags |= TokenFlags::PRECEDING_WHITESPACE;
    }

    /// `=begin` ... `=end` at the start of lines.
    fn skip_block_comment(&mut self) {
        loop {
            self.scanner.skip_to_line_end();
            if self.scanner.next().is_none() {
                return;
            }
            if self.scanner.rest().starts_with("=end") {
                self.scanner.skip_to_line_end();
                return;
            }
        }
    }

    // ========================================================================
    // Context checks used by dispatch
    // ========================================================================

    fn symbol_follows(&self) -> bool {
        let Some(after) = self.scanner.rest().strip_prefix(':') else {
            return false;
        };
        if after.starts_with(':') {
            return false;
        }
        // `a ?b:c`, `{"a":1}`
        let glued_to_value =
            self.last_kind.map_or(false, SyntaxKind::ends_value) && !self.pending_flags.is_spaced_before();
        if glued_to_value {
            return false;
        }
        match after.chars().next() {
            Some(c) if matches!(c, '"' | '\'' | '@' | '$') || is_identifier_start(c) => true,
            Some(_) => OPERATOR_SYMBOLS.iter().any(|op| {
                after.strip_prefix(op).map_or(false, |tail| {
                    tail.chars().next().map_or(true, |c| is_white_space(c) || ",)]};".contains(c))
                })
            }),
            None => false,
        }
    }

    fn character_literal_follows(&self) -> bool {
        if !self.starts_operand() {
            return false;
        }
        match self.scanner.peek_nth(1) {
            Some(c) if is_printable_ascii(c) => {
                !(is_identifier_part(c) && self.scanner.peek_nth(2).map_or(false, is_identifier_part))
            }
            _ => false,
        }
    }

    fn heredoc_follows(&self) -> bool {
        let Some(after) = self.scanner.rest().strip_prefix("<<") else {
            return false;
        };
        let expects_operand = self.expects_operand();
        if !expects_operand && !self.in_command_argument_position() {
            return false;
        }
        let marked = after.starts_with(|c: char| c == '-' || c == '~');
        let id = after.trim_start_matches(|c: char| c == '-' || c == '~');
        match id.chars().next() {
            Some('\'' | '"') => true,
            // `x <<y` after a bare identifier stays a shift unless the
            // heredoc is unmistakable.
            Some(c) if is_identifier_start(c) => expects_operand || marked || is_constant_start(c),
            _ => false,
        }
    }

    fn percent_literal_follows(&self) -> bool {
        if !self.starts_operand() {
            return false;
        }
        match (self.scanner.peek_nth(1), self.scanner.peek_nth(2)) {
            (Some('(' | '[' | '{' | '<'), _) => true,
            (Some(letter), Some(open)) if letter.is_ascii_alphabetic() => closing_delimiter(open).is_some(),
            _ => false,
        }
    }

    // ========================================================================
    // Recognizers
    // ========================================================================

    fn lex_number(&mut self) -> Step {
        let is_digit_or_separator = |c: char| is_digit(c) || c == '_';
        self.scanner.accept_while(is_digit_or_separator);
        let mut kind = SyntaxKind::IntegerLiteral;

        if self.scanner.peek() == Some('.') && self.scanner.peek_nth(1).map_or(false, is_digit) {
            self.scanner.next();
            self.scanner.accept_while(is_digit_or_separator);
            kind = SyntaxKind::FloatLiteral;
        }
        if matches!(self.scanner.peek(), Some('e' | 'E')) {
            let exponent_follows = match self.scanner.peek_nth(1) {
                Some('+' | '-') => self.scanner.peek_nth(2).map_or(false, is_digit),
                Some(c) => is_digit(c),
                None => false,
            };
            if exponent_follows {
                self.scanner.next();
                self.scanner.accept("+-");
                self.scanner.accept_while(is_digit);
                kind = SyntaxKind::FloatLiteral;
            }
        }
        Step::Emit(self.scanner.emit(kind))
    }

    fn lex_identifier(&mut self) -> Step {
        let first = self.scanner.peek().unwrap_or('_');
        self.scanner.accept_while(is_identifier_part);
        let constant = is_constant_start(first);

        // `empty?`, `save!`, but `a!=b` is `a != b`.
        if !constant
            && matches!(self.scanner.peek(), Some('?' | '!'))
            && self.scanner.peek_nth(1) != Some('=')
        {
            self.scanner.next();
        }

        // `key: value`
        if self.scanner.peek() == Some(':')
            && self.scanner.peek_nth(1) != Some(':')
            && self.last_kind != Some(SyntaxKind::QuestionToken)
        {
            let name = self.scanner.pending();
            self.scanner.next();
            return Step::Emit(self.scanner.emit_text(SyntaxKind::Label, name));
        }

        let after_dot = matches!(
            self.last_kind,
            Some(SyntaxKind::DotToken | SyntaxKind::AmpersandDotToken)
        );
        let keyword = if after_dot {
            None
        } else {
            SyntaxKind::from_keyword(self.scanner.pending())
        };
        let kind = match keyword {
            Some(keyword) => keyword,
            None if constant => SyntaxKind::ConstantIdentifier,
            None => SyntaxKind::Identifier,
        };
        Step::Emit(self.scanner.emit(kind))
    }

    /// Quoted literal whose token text is the body between the quotes.
    fn lex_quoted(&mut self, quote: char, kind: SyntaxKind) -> Step {
        self.scanner.next();
        self.scanner.ignore();
        let interpolate = quote != '\'';
        if self.scan_body(None, quote, interpolate).is_err() {
            let message = if quote == '`' {
                &messages::UNTERMINATED_SUBSHELL_COMMAND
            } else {
                &messages::UNTERMINATED_STRING_LITERAL
            };
            return self.fail(message, &[]);
        }
        Step::Emit(self.emit_before_closing(kind))
    }

    /// Emit the pending text minus the closing delimiter just consumed, then
    /// drop the delimiter.
    fn emit_before_closing(&mut self, kind: SyntaxKind) -> Token {
        self.scanner.backup();
        let token = self.scanner.emit(kind);
        self.scanner.next();
        self.scanner.ignore();
        token
    }

    fn lex_symbol(&mut self) -> Step {
        self.scanner.next();
        self.scanner.ignore();
        match self.scanner.peek() {
            Some(quote @ ('"' | '\'')) => {
                self.scanner.next();
                self.scanner.ignore();
                if self.scan_body(None, quote, quote == '"').is_err() {
                    return self.fail(&messages::UNTERMINATED_SYMBOL_LITERAL, &[]);
                }
                return Step::Emit(self.emit_before_closing(SyntaxKind::SymbolLiteral));
            }
            Some('@') => {
                self.scanner.next();
                self.scanner.accept("@");
                if self.scanner.accept_while(is_identifier_part) == 0 {
                    let sigil = self.scanner.pending().to_string();
                    return self.fail(&messages::INVALID_VARIABLE_NAME_0, &[&sigil]);
                }
            }
            Some('$') => {
                self.scanner.next();
                if self.scanner.accept_while(is_identifier_part) == 0
                    && !self.scanner.accept(SPECIAL_GLOBAL_CHARS)
                {
                    return self.fail(&messages::INVALID_GLOBAL_VARIABLE_NAME, &[]);
                }
            }
            Some(c) if is_identifier_start(c) => {
                self.scanner
                    .accept_while(|c| is_identifier_part(c) || c == '!' || c == '?');
                // `:name=` but not `:a=>1` or `:a==b`.
                if self.scanner.peek() == Some('=')
                    && !matches!(self.scanner.peek_nth(1), Some('=' | '~' | '>'))
                {
                    self.scanner.next();
                }
            }
            _ => {
                for op in OPERATOR_SYMBOLS {
                    if self.scanner.accept_str(op) {
                        break;
                    }
                }
            }
        }
        Step::Emit(self.scanner.emit(SyntaxKind::SymbolLiteral))
    }

    fn lex_sigil(&mut self) -> Step {
        if self.scanner.next() == Some('$') {
            if self.scanner.accept_while(is_identifier_part) == 0 && !self.scanner.accept(SPECIAL_GLOBAL_CHARS) {
                return self.fail(&messages::INVALID_GLOBAL_VARIABLE_NAME, &[]);
            }
            return Step::Emit(self.scanner.emit(SyntaxKind::GlobalVariable));
        }

        let kind = if self.scanner.accept("@") {
            SyntaxKind::ClassVariable
        } else {
            SyntaxKind::InstanceVariable
        };
        if !self.scanner.peek().map_or(false, is_identifier_start) {
            let sigil = self.scanner.pending().to_string();
            return self.fail(&messages::INVALID_VARIABLE_NAME_0, &[&sigil]);
        }
        self.scanner.accept_while(is_identifier_part);
        Step::Emit(self.scanner.emit(kind))
    }

    fn lex_character(&mut self) -> Step {
        self.scanner.next();
        self.scanner.ignore();
        match self.scanner.next() {
            Some(c) if is_printable_ascii(c) => Step::Emit(self.scanner.emit(SyntaxKind::CharacterLiteral)),
            _ => self.fail(&messages::INVALID_CHARACTER_LITERAL, &[]),
        }
    }

    fn lex_heredoc(&mut self) -> Step {
        self.scanner.accept_str("<<");
        let squiggly = self.scanner.accept("~");
        let indented_terminator = squiggly || self.scanner.accept("-");
        let source = self.scanner.source();

        let (id, kind) = match self.scanner.peek() {
            Some(quote @ ('\'' | '"')) => {
                self.scanner.next();
                let from = self.scanner.pos();
                self.scanner.accept_while(|c| c != quote && !is_line_break(c));
                let to = self.scanner.pos();
                if !self.scanner.accept(if quote == '"' { "\"" } else { "'" }) {
                    return self.fail(&messages::UNTERMINATED_STRING_LITERAL, &[]);
                }
                let kind = if quote == '\'' {
                    SyntaxKind::StringLiteral
                } else {
                    SyntaxKind::InterpolatedStringLiteral
                };
                (&source[from..to], kind)
            }
            _ => {
                let from = self.scanner.pos();
                self.scanner.accept_while(is_identifier_part);
                (&source[from..self.scanner.pos()], SyntaxKind::InterpolatedStringLiteral)
            }
        };

        // Bodies of several heredocs opened on one line follow each other.
        let (line_end, body_start) = match self.heredoc {
            Some(pending) => (pending.line_end, pending.resume),
            None => {
                let line_end = line_end_from(source, self.scanner.pos());
                (line_end, line_end + 1)
            }
        };

        let Some((body, resume)) = find_heredoc_body(source, body_start, id, indented_terminator) else {
            return self.fail(&messages::UNTERMINATED_HEREDOC_0, &[id]);
        };
        let body = if squiggly { dedent(body) } else { body.to_string() };
        self.heredoc = Some(PendingHeredoc { line_end, resume });
        Step::Emit(self.scanner.emit_text(kind, body))
    }

    fn lex_percent(&mut self) -> Step {
        self.scanner.next();
        let type_letter = match self.scanner.peek() {
            Some(c) if c.is_ascii_alphabetic() => {
                self.scanner.next();
                Some(c)
            }
            _ => None,
        };
        let (kind, interpolate) = match type_letter {
            None | Some('Q') => (SyntaxKind::InterpolatedStringLiteral, true),
            Some('q') => (SyntaxKind::StringLiteral, false),
            Some('w') => (SyntaxKind::WordListLiteral, false),
            Some('W') => (SyntaxKind::WordListLiteral, true),
            Some('r') => (SyntaxKind::RegularExpressionLiteral, true),
            Some('x') => (SyntaxKind::SubshellLiteral, true),
            Some(other) => {
                let letter = other.to_string();
                return self.fail(&messages::UNKNOWN_PERCENT_LITERAL_0, &[&letter]);
            }
        };
        debug_assert!(PERCENT_LITERAL_TYPES.contains(type_letter.unwrap_or('Q')));

        let open = self.scanner.next().unwrap_or(' ');
        let Some(close) = closing_delimiter(open) else {
            let letter = type_letter.map(String::from).unwrap_or_default();
            return self.fail(&messages::UNKNOWN_PERCENT_LITERAL_0, &[&letter]);
        };
        let nested = (open != close).then_some(open);
        self.scanner.ignore();
        if self.scan_body(nested, close, interpolate).is_err() {
            let expected = close.to_string();
            return self.fail(&messages::UNTERMINATED_PERCENT_LITERAL_0, &[&expected]);
        }
        let mut token = self.emit_before_closing(kind);
        if kind == SyntaxKind::RegularExpressionLiteral {
            token.suffix = self.regex_options();
        }
        Step::Emit(token)
    }

    fn lex_regex(&mut self) -> Step {
        self.scanner.next();
        self.scanner.ignore();
        if self.scan_regex_body().is_err() {
            return self.fail(&messages::UNTERMINATED_REGULAR_EXPRESSION_LITERAL, &[]);
        }
        let mut token = self.emit_before_closing(SyntaxKind::RegularExpressionLiteral);
        token.suffix = self.regex_options();
        Step::Emit(token)
    }

    fn regex_options(&mut self) -> String {
        self.scanner.accept_run(REGEX_OPTIONS);
        let options = self.scanner.pending().to_string();
        self.scanner.ignore();
        options
    }

    /// Operators and punctuation, longest match first.
    fn lex_operator(&mut self) -> Step {
        let Some(ch) = self.scanner.next() else {
            return Step::Emit(self.scanner.emit(SyntaxKind::EndOfFileToken));
        };
        let s = &mut self.scanner;
        let kind = match ch {
            '(' => SyntaxKind::OpenParenToken,
            ')' => SyntaxKind::CloseParenToken,
            '[' => SyntaxKind::OpenBracketToken,
            ']' => SyntaxKind::CloseBracketToken,
            '{' => SyntaxKind::OpenBraceToken,
            '}' => SyntaxKind::CloseBraceToken,
            ',' => SyntaxKind::CommaToken,
            ';' => SyntaxKind::SemicolonToken,
            '~' => SyntaxKind::TildeToken,
            '?' => SyntaxKind::QuestionToken,
            ':' => {
                if s.accept(":") {
                    SyntaxKind::ColonColonToken
                } else {
                    SyntaxKind::ColonToken
                }
            }
            '.' => {
                if s.accept(".") {
                    if s.accept(".") {
                        SyntaxKind::DotDotDotToken
                    } else {
                        SyntaxKind::DotDotToken
                    }
                } else {
                    SyntaxKind::DotToken
                }
            }
            '=' => {
                if s.accept("=") {
                    if s.accept("=") {
                        SyntaxKind::EqualsEqualsEqualsToken
                    } else {
                        SyntaxKind::EqualsEqualsToken
                    }
                } else if s.accept("~") {
                    SyntaxKind::EqualsTildeToken
                } else if s.accept(">") {
                    SyntaxKind::EqualsGreaterThanToken
                } else {
                    SyntaxKind::EqualsToken
                }
            }
            '!' => {
                if s.accept("=") {
                    SyntaxKind::ExclamationEqualsToken
                } else if s.accept("~") {
                    SyntaxKind::ExclamationTildeToken
                } else {
                    SyntaxKind::ExclamationToken
                }
            }
            '<' => {
                if s.accept("=") {
                    if s.accept(">") {
                        SyntaxKind::LessThanEqualsGreaterThanToken
                    } else {
                        SyntaxKind::LessThanEqualsToken
                    }
                } else if s.accept("<") {
                    if s.accept("=") {
                        SyntaxKind::LessThanLessThanEqualsToken
                    } else {
                        SyntaxKind::LessThanLessThanToken
                    }
                } else {
                    SyntaxKind::LessThanToken
                }
            }
            '>' => {
                if s.accept("=") {
                    SyntaxKind::GreaterThanEqualsToken
                } else if s.accept(">") {
                    if s.accept("=") {
                        SyntaxKind::GreaterThanGreaterThanEqualsToken
                    } else {
                        SyntaxKind::GreaterThanGreaterThanToken
                    }
                } else {
                    SyntaxKind::GreaterThanToken
                }
            }
            '+' => {
                if s.accept("=") {
                    SyntaxKind::PlusEqualsToken
                } else {
                    SyntaxKind::PlusToken
                }
            }
            '-' => {
                if s.accept("=") {
                    SyntaxKind::MinusEqualsToken
                } else if s.accept(">") {
                    SyntaxKind::MinusGreaterThanToken
                } else {
                    SyntaxKind::MinusToken
                }
            }
            '*' => {
                if s.accept("*") {
                    if s.accept("=") {
                        SyntaxKind::AsteriskAsteriskEqualsToken
                    } else {
                        SyntaxKind::AsteriskAsteriskToken
                    }
                } else if s.accept("=") {
                    SyntaxKind::AsteriskEqualsToken
                } else {
                    SyntaxKind::AsteriskToken
                }
            }
            '/' => {
                if s.accept("=") {
                    SyntaxKind::SlashEqualsToken
                } else {
                    SyntaxKind::SlashToken
                }
            }
            '%' => {
                if s.accept("=") {
                    SyntaxKind::PercentEqualsToken
                } else {
                    SyntaxKind::PercentToken
                }
            }
            '&' => {
                if s.accept("&") {
                    if s.accept("=") {
                        SyntaxKind::AmpersandAmpersandEqualsToken
                    } else {
                        SyntaxKind::AmpersandAmpersandToken
                    }
                } else if s.accept("=") {
                    SyntaxKind::AmpersandEqualsToken
                } else if s.accept(".") {
                    SyntaxKind::AmpersandDotToken
                } else {
                    SyntaxKind::AmpersandToken
                }
            }
            '|' => {
                if s.accept("|") {
                    if s.accept("=") {
                        SyntaxKind::BarBarEqualsToken
                    } else {
                        SyntaxKind::BarBarToken
                    }
                } else if s.accept("=") {
                    SyntaxKind::BarEqualsToken
                } else {
                    SyntaxKind::BarToken
                }
            }
            '^' => {
                if s.accept("=") {
                    SyntaxKind::CaretEqualsToken
                } else {
                    SyntaxKind::CaretToken
                }
            }
            other => {
                let text = other.to_string();
                return self.fail(&messages::UNEXPECTED_CHARACTER_0, &[&text]);
            }
        };
        Step::Emit(self.scanner.emit(kind))
    }

    // ========================================================================
    // Delimited bodies
    // ========================================================================

    /// Consume a literal body up to and including `close`. `open` nests when
    /// the delimiters are a bracket pair. Backslash escapes any rune and the
    /// escape is kept verbatim.
    fn scan_body(&mut self, open: Option<char>, close: char, interpolate: bool) -> Result<(), Unterminated> {
        let mut depth = 0usize;
        loop {
            match self.scanner.next() {
                None => return Err(Unterminated),
                Some(BACKSLASH) => {
                    if self.scanner.next().is_none() {
                        return Err(Unterminated);
                    }
                }
                Some('#') if interpolate && self.scanner.peek() == Some('{') => {
                    self.scanner.next();
                    self.scan_interpolation()?;
                }
                Some(c) if c == close => {
                    if depth == 0 {
                        return Ok(());
                    }
                    depth -= 1;
                }
                Some(c) if Some(c) == open => depth += 1,
                Some(_) => {}
            }
        }
    }

    /// Consume a `#{ ... }` region after its opening brace, balancing braces
    /// and skipping nested string literals.
    fn scan_interpolation(&mut self) -> Result<(), Unterminated> {
        let mut depth = 1usize;
        loop {
            match self.scanner.next() {
                None => return Err(Unterminated),
                Some('{') => depth += 1,
                Some('}') => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(());
                    }
                }
                Some('"') => self.scan_body(None, '"', true)?,
                Some('\'') => self.scan_body(None, '\'', false)?,
                Some('`') => self.scan_body(None, '`', true)?,
                Some(BACKSLASH) => {
                    self.scanner.next();
                }
                Some(_) => {}
            }
        }
    }

    /// Consume a `/.../` body; `/` inside a character class does not close it.
    fn scan_regex_body(&mut self) -> Result<(), Unterminated> {
        let mut in_class = false;
        loop {
            match self.scanner.next() {
                None => return Err(Unterminated),
                Some(BACKSLASH) => {
                    if self.scanner.next().is_none() {
                        return Err(Unterminated);
                    }
                }
                Some('#') if self.scanner.peek() == Some('{') => {
                    self.scanner.next();
                    self.scan_interpolation()?;
                }
                Some('[') => in_class = true,
                Some(']') => in_class = false,
                Some('/') if !in_class => return Ok(()),
                Some(_) => {}
            }
        }
    }
}

/// Locate a heredoc terminator starting at `body_start`. Returns the body
/// (without the line feed before the terminator) and the offset just past
/// the terminator line.
fn find_heredoc_body<'a>(
    source: &'a str,
    body_start: usize,
    id: &str,
    indented_terminator: bool,
) -> Option<(&'a str, usize)> {
    if id.is_empty() {
        return None;
    }
    let mut line_start = body_start;
    while line_start < source.len() {
        let line_end = line_end_from(source, line_start);
        let line = source[line_start..line_end].trim_end();
        let is_terminator = if indented_terminator {
            line.trim_start() == id
        } else {
            line == id
        };
        if is_terminator {
            let body_end = line_start.saturating_sub(1).max(body_start);
            let resume = (line_end + 1).min(source.len());
            return Some((&source[body_start..body_end], resume));
        }
        line_start = line_end + 1;
    }
    None
}

/// Strip the indentation shared by every non-blank line.
fn dedent(body: &str) -> String {
    let indent = body
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start().len())
        .min()
        .unwrap_or(0);
    body.lines()
        .map(|line| line.get(indent..).unwrap_or_else(|| line.trim_start()))
        .collect::<Vec<_>>()
        .join("\n")
}
