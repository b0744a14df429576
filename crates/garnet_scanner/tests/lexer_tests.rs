//! Lexer integration tests.
//!
//! Verifies the token stream the lexer produces for Ruby constructs.

use garnet_ast::syntax_kind::SyntaxKind;
use garnet_ast::types::TokenFlags;
use garnet_scanner::{tokenize, Token, TokenStream};
use pretty_assertions::assert_eq;

/// Helper: lex a source and return (kind, text) pairs without the
/// end-of-file token.
fn scan_all(source: &str) -> Vec<(SyntaxKind, String)> {
    let tokens = tokenize(source).expect("source should lex");
    assert_eq!(tokens.last().map(|t| t.kind), Some(SyntaxKind::EndOfFileToken));
    tokens
        .into_iter()
        .filter(|t| t.kind != SyntaxKind::EndOfFileToken)
        .map(|t| (t.kind, t.text))
        .collect()
}

/// Helper: lex a source and return token kinds.
fn scan_kinds(source: &str) -> Vec<SyntaxKind> {
    scan_all(source).into_iter().map(|(k, _)| k).collect()
}

fn token(kind: SyntaxKind, text: &str) -> (SyntaxKind, String) {
    (kind, text.to_string())
}

fn find(tokens: &[Token], kind: SyntaxKind) -> &Token {
    tokens.iter().find(|t| t.kind == kind).expect("token kind present")
}

// ============================================================================
// Basics
// ============================================================================

#[test]
fn test_empty_source() {
    assert!(scan_all("").is_empty());
}

#[test]
fn test_whitespace_only() {
    assert!(scan_all("   \n\t  ").is_empty());
}

#[test]
fn test_stream_ends_after_end_of_file() {
    let mut stream = TokenStream::new("a");
    assert_eq!(stream.next().map(|t| t.kind), Some(SyntaxKind::Identifier));
    assert_eq!(stream.next().map(|t| t.kind), Some(SyntaxKind::EndOfFileToken));
    assert!(stream.next().is_none());
    assert!(stream.next().is_none());
}

// ============================================================================
// Literals
// ============================================================================

#[test]
fn test_numeric_literals() {
    assert_eq!(scan_all("42"), vec![token(SyntaxKind::IntegerLiteral, "42")]);
    assert_eq!(scan_all("3.14"), vec![token(SyntaxKind::FloatLiteral, "3.14")]);
    assert_eq!(scan_all("1_000"), vec![token(SyntaxKind::IntegerLiteral, "1_000")]);
    assert_eq!(scan_all("1e10"), vec![token(SyntaxKind::FloatLiteral, "1e10")]);
    assert_eq!(scan_all("1.5e-3"), vec![token(SyntaxKind::FloatLiteral, "1.5e-3")]);
    assert_eq!(scan_all("01777"), vec![token(SyntaxKind::IntegerLiteral, "01777")]);
}

#[test]
fn test_integer_before_range() {
    assert_eq!(
        scan_all("1..2"),
        vec![
            token(SyntaxKind::IntegerLiteral, "1"),
            token(SyntaxKind::DotDotToken, ".."),
            token(SyntaxKind::IntegerLiteral, "2"),
        ]
    );
}

#[test]
fn test_string_literals_keep_escapes_and_drop_quotes() {
    assert_eq!(scan_all(r"'it\'s'"), vec![token(SyntaxKind::StringLiteral, r"it\'s")]);
    assert_eq!(
        scan_all(r#""a #{b + "c"} d""#),
        vec![token(SyntaxKind::InterpolatedStringLiteral, r#"a #{b + "c"} d"#)]
    );
}

#[test]
fn test_interpolation_with_nested_braces() {
    assert_eq!(
        scan_all(r##""#{h.map { |k| k }}""##),
        vec![token(SyntaxKind::InterpolatedStringLiteral, "#{h.map { |k| k }}")]
    );
}

#[test]
fn test_subshell_literal() {
    assert_eq!(scan_all("`ls -l`"), vec![token(SyntaxKind::SubshellLiteral, "ls -l")]);
}

#[test]
fn test_character_literal() {
    assert_eq!(
        scan_all("x = ?a"),
        vec![
            token(SyntaxKind::Identifier, "x"),
            token(SyntaxKind::EqualsToken, "="),
            token(SyntaxKind::CharacterLiteral, "a"),
        ]
    );
}

#[test]
fn test_character_literal_covers_printable_ascii() {
    for ch in '!'..='~' {
        let source = format!("x = ?{}", ch);
        assert_eq!(
            scan_all(&source),
            vec![
                token(SyntaxKind::Identifier, "x"),
                token(SyntaxKind::EqualsToken, "="),
                token(SyntaxKind::CharacterLiteral, &ch.to_string()),
            ],
            "{}",
            source
        );
    }
}

#[test]
fn test_symbols() {
    assert_eq!(
        scan_all(r#":foo :"a b" :+ :[]= :name="#),
        vec![
            token(SyntaxKind::SymbolLiteral, "foo"),
            token(SyntaxKind::SymbolLiteral, "a b"),
            token(SyntaxKind::SymbolLiteral, "+"),
            token(SyntaxKind::SymbolLiteral, "[]="),
            token(SyntaxKind::SymbolLiteral, "name="),
        ]
    );
}

#[test]
fn test_ternary_colon_is_not_a_symbol() {
    assert_eq!(
        scan_kinds("a ? b : c"),
        vec![
            SyntaxKind::Identifier,
            SyntaxKind::QuestionToken,
            SyntaxKind::Identifier,
            SyntaxKind::ColonToken,
            SyntaxKind::Identifier,
        ]
    );
}

#[test]
fn test_regex_literal_and_options() {
    let tokens = tokenize("x = /ab+c/im").unwrap();
    let regex = find(&tokens, SyntaxKind::RegularExpressionLiteral);
    assert_eq!(regex.text, "ab+c");
    assert_eq!(regex.suffix, "im");

    let tokens = tokenize("x = /[/]/").unwrap();
    assert_eq!(find(&tokens, SyntaxKind::RegularExpressionLiteral).text, "[/]");
}

#[test]
fn test_slash_is_division_after_a_value() {
    assert_eq!(
        scan_kinds("a / b"),
        vec![SyntaxKind::Identifier, SyntaxKind::SlashToken, SyntaxKind::Identifier]
    );
}

#[test]
fn test_slash_starts_regex_in_command_argument() {
    assert_eq!(
        scan_all("foo /x/"),
        vec![
            token(SyntaxKind::Identifier, "foo"),
            token(SyntaxKind::RegularExpressionLiteral, "x"),
        ]
    );
}

#[test]
fn test_percent_literals() {
    assert_eq!(scan_all("%w(a b)"), vec![token(SyntaxKind::WordListLiteral, "a b")]);
    assert_eq!(scan_all("%q{x}"), vec![token(SyntaxKind::StringLiteral, "x")]);
    assert_eq!(scan_all("%(a (b))"), vec![token(SyntaxKind::InterpolatedStringLiteral, "a (b)")]);
    for (source, body) in [("%[a [b]]", "a [b]"), ("%<a <b>>", "a <b>"), ("%{a {b}}", "a {b}")] {
        assert_eq!(scan_all(source), vec![token(SyntaxKind::InterpolatedStringLiteral, body)], "{}", source);
    }
    assert_eq!(
        scan_kinds("x % 2"),
        vec![SyntaxKind::Identifier, SyntaxKind::PercentToken, SyntaxKind::IntegerLiteral]
    );
}

// ============================================================================
// Heredocs
// ============================================================================

#[test]
fn test_heredoc_body_is_skipped_after_its_line() {
    assert_eq!(
        scan_all("x = <<EOS\n  hello\nEOS\ny"),
        vec![
            token(SyntaxKind::Identifier, "x"),
            token(SyntaxKind::EqualsToken, "="),
            token(SyntaxKind::InterpolatedStringLiteral, "  hello"),
            token(SyntaxKind::NewLineToken, "\n"),
            token(SyntaxKind::Identifier, "y"),
        ]
    );
}

#[test]
fn test_squiggly_heredoc_strips_common_indent() {
    let tokens = scan_all("<<~EOS\n    a\n      b\n    EOS\n");
    assert_eq!(tokens[0], token(SyntaxKind::InterpolatedStringLiteral, "a\n  b"));
}

#[test]
fn test_two_heredocs_on_one_line() {
    assert_eq!(
        scan_all("foo(<<A, <<B)\na\nA\nb\nB\n"),
        vec![
            token(SyntaxKind::Identifier, "foo"),
            token(SyntaxKind::OpenParenToken, "("),
            token(SyntaxKind::InterpolatedStringLiteral, "a"),
            token(SyntaxKind::CommaToken, ","),
            token(SyntaxKind::InterpolatedStringLiteral, "b"),
            token(SyntaxKind::CloseParenToken, ")"),
            token(SyntaxKind::NewLineToken, "\n"),
        ]
    );
}

// ============================================================================
// Names and keywords
// ============================================================================

#[test]
fn test_identifiers_constants_and_keywords() {
    assert_eq!(
        scan_kinds("foo Bar if end self nil"),
        vec![
            SyntaxKind::Identifier,
            SyntaxKind::ConstantIdentifier,
            SyntaxKind::IfKeyword,
            SyntaxKind::EndKeyword,
            SyntaxKind::SelfKeyword,
            SyntaxKind::NilKeyword,
        ]
    );
}

#[test]
fn test_method_name_suffixes() {
    assert_eq!(
        scan_all("empty? save! a!=b"),
        vec![
            token(SyntaxKind::Identifier, "empty?"),
            token(SyntaxKind::Identifier, "save!"),
            token(SyntaxKind::Identifier, "a"),
            token(SyntaxKind::ExclamationEqualsToken, "!="),
            token(SyntaxKind::Identifier, "b"),
        ]
    );
}

#[test]
fn test_labels_and_scope_resolution() {
    assert_eq!(
        scan_all("{a: 1}"),
        vec![
            token(SyntaxKind::OpenBraceToken, "{"),
            token(SyntaxKind::Label, "a"),
            token(SyntaxKind::IntegerLiteral, "1"),
            token(SyntaxKind::CloseBraceToken, "}"),
        ]
    );
    assert_eq!(
        scan_kinds("Foo::Bar"),
        vec![
            SyntaxKind::ConstantIdentifier,
            SyntaxKind::ColonColonToken,
            SyntaxKind::ConstantIdentifier,
        ]
    );
}

#[test]
fn test_keyword_after_dot_is_a_method_name() {
    assert_eq!(
        scan_all("x.class"),
        vec![
            token(SyntaxKind::Identifier, "x"),
            token(SyntaxKind::DotToken, "."),
            token(SyntaxKind::Identifier, "class"),
        ]
    );
}

#[test]
fn test_variable_sigils() {
    assert_eq!(
        scan_all("@a @@b $c $: $0"),
        vec![
            token(SyntaxKind::InstanceVariable, "@a"),
            token(SyntaxKind::ClassVariable, "@@b"),
            token(SyntaxKind::GlobalVariable, "$c"),
            token(SyntaxKind::GlobalVariable, "$:"),
            token(SyntaxKind::GlobalVariable, "$0"),
        ]
    );
}

#[test]
fn test_operator_method_names_after_def() {
    assert_eq!(
        scan_kinds("def /(o)"),
        vec![
            SyntaxKind::DefKeyword,
            SyntaxKind::SlashToken,
            SyntaxKind::OpenParenToken,
            SyntaxKind::Identifier,
            SyntaxKind::CloseParenToken,
        ]
    );
}

// ============================================================================
// Operators
// ============================================================================

#[test]
fn test_multi_character_operators_are_atomic() {
    assert_eq!(
        scan_kinds("a ||= b &. -> ... <=> **="),
        vec![
            SyntaxKind::Identifier,
            SyntaxKind::BarBarEqualsToken,
            SyntaxKind::Identifier,
            SyntaxKind::AmpersandDotToken,
            SyntaxKind::MinusGreaterThanToken,
            SyntaxKind::DotDotDotToken,
            SyntaxKind::LessThanEqualsGreaterThanToken,
            SyntaxKind::AsteriskAsteriskEqualsToken,
        ]
    );
}

#[test]
fn test_whitespace_flags() {
    let tokens = tokenize("foo -1").unwrap();
    let minus = find(&tokens, SyntaxKind::MinusToken);
    assert!(minus.flags.contains(TokenFlags::PRECEDING_WHITESPACE));
    assert!(!minus.has_trailing_whitespace());
    assert!(minus.flags.is_prefix_position());

    let tokens = tokenize("foo - 1").unwrap();
    let minus = find(&tokens, SyntaxKind::MinusToken);
    assert!(minus.has_preceding_whitespace());
    assert!(minus.has_trailing_whitespace());
    assert!(!minus.flags.is_prefix_position());
}

// ============================================================================
// Line structure
// ============================================================================

#[test]
fn test_newlines_separate_statements() {
    assert_eq!(
        scan_kinds("a\n\n\nb"),
        vec![SyntaxKind::Identifier, SyntaxKind::NewLineToken, SyntaxKind::Identifier]
    );
    assert_eq!(scan_kinds("\n\nfoo"), vec![SyntaxKind::Identifier]);
}

#[test]
fn test_newlines_inside_brackets_are_kept() {
    assert_eq!(
        scan_kinds("(a\nb)"),
        vec![
            SyntaxKind::OpenParenToken,
            SyntaxKind::Identifier,
            SyntaxKind::NewLineToken,
            SyntaxKind::Identifier,
            SyntaxKind::CloseParenToken,
        ]
    );
    assert!(scan_kinds("[1,\n2]").contains(&SyntaxKind::NewLineToken));
    // A line feed straight after another separator is still dropped.
    assert_eq!(scan_kinds("(a;\nb)").iter().filter(|&&kind| kind == SyntaxKind::NewLineToken).count(), 0);
}

#[test]
fn test_leading_dot_continues_the_line() {
    assert_eq!(
        scan_kinds("foo\n  .bar"),
        vec![SyntaxKind::Identifier, SyntaxKind::DotToken, SyntaxKind::Identifier]
    );
}

#[test]
fn test_comments() {
    assert_eq!(
        scan_kinds("a # comment\nb"),
        vec![SyntaxKind::Identifier, SyntaxKind::NewLineToken, SyntaxKind::Identifier]
    );
    assert_eq!(scan_all("=begin\nignored\n=end\nx"), vec![token(SyntaxKind::Identifier, "x")]);
}

#[test]
fn test_line_continuation() {
    let tokens = tokenize("foo \\\n  # note\n  \\\n  bar").unwrap();
    let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![SyntaxKind::Identifier, SyntaxKind::Identifier, SyntaxKind::EndOfFileToken]
    );
    assert!(tokens[1].has_preceding_whitespace());
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_unterminated_string() {
    let err = tokenize("'open").unwrap_err();
    assert_eq!(err.code, 1002);
}

#[test]
fn test_unexpected_character() {
    let err = tokenize("x = §").unwrap_err();
    assert_eq!(err.code, 1001);
    assert_eq!(err.span.map(|s| s.start), Some(4));
}

#[test]
fn test_lexical_error_codes() {
    assert_eq!(tokenize("%z(a)").unwrap_err().code, 1011);
    assert_eq!(tokenize("<<EOS\nbody").unwrap_err().code, 1003);
    assert_eq!(tokenize("@1").unwrap_err().code, 1010);
    assert_eq!(tokenize("x = /abc").unwrap_err().code, 1004);
    assert_eq!(tokenize("x = `ls").unwrap_err().code, 1006);
}

#[test]
fn test_stream_stops_after_error_token() {
    let mut stream = TokenStream::new("a ' b");
    let kinds: Vec<_> = stream.by_ref().map(|t| t.kind).collect();
    assert_eq!(kinds, vec![SyntaxKind::Identifier, SyntaxKind::Unknown]);
    assert_eq!(stream.take_error().map(|d| d.code), Some(1002));
}
