//! SyntaxKind enum - every token kind the lexer can produce.

/// The kind of a lexical token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[repr(u16)]
pub enum SyntaxKind {
    // ========================================================================
    // Control tokens
    // ========================================================================
    /// Terminal error token: unknown character or unterminated literal.
    Unknown = 0,
    EndOfFileToken = 1,
    NewLineToken = 2,
    SemicolonToken = 3,

    // ========================================================================
    // Literals
    // ========================================================================
    IntegerLiteral = 10,
    FloatLiteral = 11,
    /// Single-quoted string, `%q()` or quoted heredoc.
    StringLiteral = 12,
    /// Double-quoted string, percent string or heredoc; raw template text.
    InterpolatedStringLiteral = 13,
    SymbolLiteral = 14,
    CharacterLiteral = 15,
    RegularExpressionLiteral = 16,
    /// Backtick command.
    SubshellLiteral = 17,
    /// `%w()` word list; the text is the whitespace-separated body.
    WordListLiteral = 18,

    // ========================================================================
    // Names
    // ========================================================================
    Identifier = 30,
    ConstantIdentifier = 31,
    InstanceVariable = 32,
    ClassVariable = 33,
    GlobalVariable = 34,
    /// `name:` inside a hash literal or argument list.
    Label = 35,

    // ========================================================================
    // Punctuation
    // ========================================================================
    OpenBraceToken = 50,
    CloseBraceToken = 51,
    OpenParenToken = 52,
    CloseParenToken = 53,
    OpenBracketToken = 54,
    CloseBracketToken = 55,
    DotToken = 56,
    AmpersandDotToken = 57,
    DotDotToken = 58,
    DotDotDotToken = 59,
    CommaToken = 60,
    ColonToken = 61,
    ColonColonToken = 62,
    QuestionToken = 63,
    EqualsGreaterThanToken = 64,
    MinusGreaterThanToken = 65,

    // Operators
    PlusToken = 70,
    MinusToken = 71,
    AsteriskToken = 72,
    AsteriskAsteriskToken = 73,
    SlashToken = 74,
    PercentToken = 75,
    LessThanToken = 76,
    GreaterThanToken = 77,
    LessThanEqualsToken = 78,
    GreaterThanEqualsToken = 79,
    LessThanEqualsGreaterThanToken = 80,
    EqualsEqualsToken = 81,
    EqualsEqualsEqualsToken = 82,
    ExclamationEqualsToken = 83,
    EqualsTildeToken = 84,
    ExclamationTildeToken = 85,
    AmpersandAmpersandToken = 86,
    BarBarToken = 87,
    AmpersandToken = 88,
    BarToken = 89,
    CaretToken = 90,
    LessThanLessThanToken = 91,
    GreaterThanGreaterThanToken = 92,
    ExclamationToken = 93,
    TildeToken = 94,

    // Assignment
    EqualsToken = 100,
    PlusEqualsToken = 101,
    MinusEqualsToken = 102,
    AsteriskEqualsToken = 103,
    SlashEqualsToken = 104,
    PercentEqualsToken = 105,
    AsteriskAsteriskEqualsToken = 106,
    LessThanLessThanEqualsToken = 107,
    GreaterThanGreaterThanEqualsToken = 108,
    AmpersandEqualsToken = 109,
    BarEqualsToken = 110,
    CaretEqualsToken = 111,
    AmpersandAmpersandEqualsToken = 112,
    BarBarEqualsToken = 113,

    // ========================================================================
    // Keywords
    // ========================================================================
    AliasKeyword = 150,
    AndKeyword = 151,
    BeginKeyword = 152,
    BreakKeyword = 153,
    CaseKeyword = 154,
    ClassKeyword = 155,
    DefKeyword = 156,
    DoKeyword = 157,
    ElseKeyword = 158,
    ElsifKeyword = 159,
    EndKeyword = 160,
    EnsureKeyword = 161,
    FalseKeyword = 162,
    ForKeyword = 163,
    IfKeyword = 164,
    InKeyword = 165,
    ModuleKeyword = 166,
    NextKeyword = 167,
    NilKeyword = 168,
    NotKeyword = 169,
    OrKeyword = 170,
    RedoKeyword = 171,
    RescueKeyword = 172,
    RetryKeyword = 173,
    ReturnKeyword = 174,
    SelfKeyword = 175,
    ThenKeyword = 176,
    TrueKeyword = 177,
    UnlessKeyword = 178,
    UntilKeyword = 179,
    WhenKeyword = 180,
    WhileKeyword = 181,
    YieldKeyword = 182,
    FileKeyword = 183,
    LineKeyword = 184,
}

impl SyntaxKind {
    pub const FIRST_LITERAL: SyntaxKind = SyntaxKind::IntegerLiteral;
    pub const LAST_LITERAL: SyntaxKind = SyntaxKind::WordListLiteral;
    pub const FIRST_PUNCTUATION: SyntaxKind = SyntaxKind::OpenBraceToken;
    pub const LAST_PUNCTUATION: SyntaxKind = SyntaxKind::BarBarEqualsToken;
    pub const FIRST_ASSIGNMENT: SyntaxKind = SyntaxKind::EqualsToken;
    pub const LAST_ASSIGNMENT: SyntaxKind = SyntaxKind::BarBarEqualsToken;
    pub const FIRST_KEYWORD: SyntaxKind = SyntaxKind::AliasKeyword;
    pub const LAST_KEYWORD: SyntaxKind = SyntaxKind::LineKeyword;
}

impl SyntaxKind {
    /// Whether this kind represents a keyword.
    #[inline]
    pub fn is_keyword(self) -> bool {
        let v = self as u16;
        v >= Self::FIRST_KEYWORD as u16 && v <= Self::LAST_KEYWORD as u16
    }

    /// Whether this kind represents a punctuation or operator token.
    #[inline]
    pub fn is_punctuation(self) -> bool {
        let v = self as u16;
        v >= Self::FIRST_PUNCTUATION as u16 && v <= Self::LAST_PUNCTUATION as u16
    }

    /// Whether this kind represents a literal token.
    #[inline]
    pub fn is_literal(self) -> bool {
        let v = self as u16;
        v >= Self::FIRST_LITERAL as u16 && v <= Self::LAST_LITERAL as u16
    }

    /// Whether this kind represents an assignment operator, plain or compound.
    #[inline]
    pub fn is_assignment_operator(self) -> bool {
        let v = self as u16;
        v >= Self::FIRST_ASSIGNMENT as u16 && v <= Self::LAST_ASSIGNMENT as u16
    }

    /// Whether this kind is a compound assignment lowered to an operator call.
    /// `||=` is excluded: it has its own node.
    #[inline]
    pub fn is_compound_assignment(self) -> bool {
        self.is_assignment_operator()
            && !matches!(self, SyntaxKind::EqualsToken | SyntaxKind::BarBarEqualsToken)
    }

    /// Whether this token terminates a statement.
    #[inline]
    pub fn is_statement_separator(self) -> bool {
        matches!(self, SyntaxKind::NewLineToken | SyntaxKind::SemicolonToken)
    }

    /// Whether the token, as the previous significant token, ends an operand.
    /// The lexer uses this to tell binary operators from literal openers.
    pub fn ends_value(self) -> bool {
        self.is_literal()
            || matches!(
                self,
                SyntaxKind::Identifier
                    | SyntaxKind::ConstantIdentifier
                    | SyntaxKind::InstanceVariable
                    | SyntaxKind::ClassVariable
                    | SyntaxKind::GlobalVariable
                    | SyntaxKind::CloseParenToken
                    | SyntaxKind::CloseBracketToken
                    | SyntaxKind::CloseBraceToken
                    | SyntaxKind::EndKeyword
                    | SyntaxKind::SelfKeyword
                    | SyntaxKind::TrueKeyword
                    | SyntaxKind::FalseKeyword
                    | SyntaxKind::NilKeyword
                    | SyntaxKind::FileKeyword
                    | SyntaxKind::LineKeyword
            )
    }

    /// Get the keyword text for a keyword kind, or None.
    pub fn keyword_text(self) -> Option<&'static str> {
        match self {
            SyntaxKind::AliasKeyword => Some("alias"),
            SyntaxKind::AndKeyword => Some("and"),
            SyntaxKind::BeginKeyword => Some("begin"),
            SyntaxKind::BreakKeyword => Some("break"),
            SyntaxKind::CaseKeyword => Some("case"),
            SyntaxKind::ClassKeyword => Some("class"),
            SyntaxKind::DefKeyword => Some("def"),
            SyntaxKind::DoKeyword => Some("do"),
            SyntaxKind::ElseKeyword => Some("else"),
            SyntaxKind::ElsifKeyword => Some("elsif"),
            SyntaxKind::EndKeyword => Some("end"),
            SyntaxKind::EnsureKeyword => Some("ensure"),
            SyntaxKind::FalseKeyword => Some("false"),
            SyntaxKind::ForKeyword => Some("for"),
            SyntaxKind::IfKeyword => Some("if"),
            SyntaxKind::InKeyword => Some("in"),
            SyntaxKind::ModuleKeyword => Some("module"),
            SyntaxKind::NextKeyword => Some("next"),
            SyntaxKind::NilKeyword => Some("nil"),
            SyntaxKind::NotKeyword => Some("not"),
            SyntaxKind::OrKeyword => Some("or"),
            SyntaxKind::RedoKeyword => Some("redo"),
            SyntaxKind::RescueKeyword => Some("rescue"),
            SyntaxKind::RetryKeyword => Some("retry"),
            SyntaxKind::ReturnKeyword => Some("return"),
            SyntaxKind::SelfKeyword => Some("self"),
            SyntaxKind::ThenKeyword => Some("then"),
            SyntaxKind::TrueKeyword => Some("true"),
            SyntaxKind::UnlessKeyword => Some("unless"),
            SyntaxKind::UntilKeyword => Some("until"),
            SyntaxKind::WhenKeyword => Some("when"),
            SyntaxKind::WhileKeyword => Some("while"),
            SyntaxKind::YieldKeyword => Some("yield"),
            SyntaxKind::FileKeyword => Some("__FILE__"),
            SyntaxKind::LineKeyword => Some("__LINE__"),
            _ => None,
        }
    }

    /// Look up a keyword by its text.
    pub fn from_keyword(text: &str) -> Option<SyntaxKind> {
        match text {
            "alias" => Some(SyntaxKind::AliasKeyword),
            "and" => Some(SyntaxKind::AndKeyword),
            "begin" => Some(SyntaxKind::BeginKeyword),
            "break" => Some(SyntaxKind::BreakKeyword),
            "case" => Some(SyntaxKind::CaseKeyword),
            "class" => Some(SyntaxKind::ClassKeyword),
            "def" => Some(SyntaxKind::DefKeyword),
            "do" => Some(SyntaxKind::DoKeyword),
            "else" => Some(SyntaxKind::ElseKeyword),
            "elsif" => Some(SyntaxKind::ElsifKeyword),
            "end" => Some(SyntaxKind::EndKeyword),
            "ensure" => Some(SyntaxKind::EnsureKeyword),
            "false" => Some(SyntaxKind::FalseKeyword),
            "for" => Some(SyntaxKind::ForKeyword),
            "if" => Some(SyntaxKind::IfKeyword),
            "in" => Some(SyntaxKind::InKeyword),
            "module" => Some(SyntaxKind::ModuleKeyword),
            "next" => Some(SyntaxKind::NextKeyword),
            "nil" => Some(SyntaxKind::NilKeyword),
            "not" => Some(SyntaxKind::NotKeyword),
            "or" => Some(SyntaxKind::OrKeyword),
            "redo" => Some(SyntaxKind::RedoKeyword),
            "rescue" => Some(SyntaxKind::RescueKeyword),
            "retry" => Some(SyntaxKind::RetryKeyword),
            "return" => Some(SyntaxKind::ReturnKeyword),
            "self" => Some(SyntaxKind::SelfKeyword),
            "then" => Some(SyntaxKind::ThenKeyword),
            "true" => Some(SyntaxKind::TrueKeyword),
            "unless" => Some(SyntaxKind::UnlessKeyword),
            "until" => Some(SyntaxKind::UntilKeyword),
            "when" => Some(SyntaxKind::WhenKeyword),
            "while" => Some(SyntaxKind::WhileKeyword),
            "yield" => Some(SyntaxKind::YieldKeyword),
            "__FILE__" => Some(SyntaxKind::FileKeyword),
            "__LINE__" => Some(SyntaxKind::LineKeyword),
            _ => None,
        }
    }

    /// Get the punctuation text for a punctuation kind, or None.
    pub fn punctuation_text(self) -> Option<&'static str> {
        match self {
            SyntaxKind::OpenBraceToken => Some("{"),
            SyntaxKind::CloseBraceToken => Some("}"),
            SyntaxKind::OpenParenToken => Some("("),
            SyntaxKind::CloseParenToken => Some(")"),
            SyntaxKind::OpenBracketToken => Some("["),
            SyntaxKind::CloseBracketToken => Some("]"),
            SyntaxKind::DotToken => Some("."),
            SyntaxKind::AmpersandDotToken => Some("&."),
            SyntaxKind::DotDotToken => Some(".."),
            SyntaxKind::DotDotDotToken => Some("..."),
            SyntaxKind::CommaToken => Some(","),
            SyntaxKind::SemicolonToken => Some(";"),
            SyntaxKind::ColonToken => Some(":"),
            SyntaxKind::ColonColonToken => Some("::"),
            SyntaxKind::QuestionToken => Some("?"),
            SyntaxKind::EqualsGreaterThanToken => Some("=>"),
            SyntaxKind::MinusGreaterThanToken => Some("->"),
            SyntaxKind::PlusToken => Some("+"),
            SyntaxKind::MinusToken => Some("-"),
            SyntaxKind::AsteriskToken => Some("*"),
            SyntaxKind::AsteriskAsteriskToken => Some("**"),
            SyntaxKind::SlashToken => Some("/"),
            SyntaxKind::PercentToken => Some("%"),
            SyntaxKind::LessThanToken => Some("<"),
            SyntaxKind::GreaterThanToken => Some(">"),
            SyntaxKind::LessThanEqualsToken => Some("<="),
            SyntaxKind::GreaterThanEqualsToken => Some(">="),
            SyntaxKind::LessThanEqualsGreaterThanToken => Some("<=>"),
            SyntaxKind::EqualsEqualsToken => Some("=="),
            SyntaxKind::EqualsEqualsEqualsToken => Some("==="),
            SyntaxKind::ExclamationEqualsToken => Some("!="),
            SyntaxKind::EqualsTildeToken => Some("=~"),
            SyntaxKind::ExclamationTildeToken => Some("!~"),
            SyntaxKind::AmpersandAmpersandToken => Some("&&"),
            SyntaxKind::BarBarToken => Some("||"),
            SyntaxKind::AmpersandToken => Some("&"),
            SyntaxKind::BarToken => Some("|"),
            SyntaxKind::CaretToken => Some("^"),
            SyntaxKind::LessThanLessThanToken => Some("<<"),
            SyntaxKind::GreaterThanGreaterThanToken => Some(">>"),
            SyntaxKind::ExclamationToken => Some("!"),
            SyntaxKind::TildeToken => Some("~"),
            SyntaxKind::EqualsToken => Some("="),
            SyntaxKind::PlusEqualsToken => Some("+="),
            SyntaxKind::MinusEqualsToken => Some("-="),
            SyntaxKind::AsteriskEqualsToken => Some("*="),
            SyntaxKind::SlashEqualsToken => Some("/="),
            SyntaxKind::PercentEqualsToken => Some("%="),
            SyntaxKind::AsteriskAsteriskEqualsToken => Some("**="),
            SyntaxKind::LessThanLessThanEqualsToken => Some("<<="),
            SyntaxKind::GreaterThanGreaterThanEqualsToken => Some(">>="),
            SyntaxKind::AmpersandEqualsToken => Some("&="),
            SyntaxKind::BarEqualsToken => Some("|="),
            SyntaxKind::CaretEqualsToken => Some("^="),
            SyntaxKind::AmpersandAmpersandEqualsToken => Some("&&="),
            SyntaxKind::BarBarEqualsToken => Some("||="),
            _ => None,
        }
    }

    /// Fixed source text of a keyword or punctuation kind.
    pub fn text(self) -> Option<&'static str> {
        self.keyword_text().or_else(|| self.punctuation_text())
    }
}

impl std::fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}
