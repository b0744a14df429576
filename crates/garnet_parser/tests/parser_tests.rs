//! Parser integration tests.
//!
//! Verifies that the parser builds the expected trees from Ruby source and
//! reports the first error with its code and location.

use garnet_ast::node::*;
use garnet_parser::{parse, parse_batch, parse_with_options, ParseError, ParseOptions};
use pretty_assertions::assert_eq;

/// Helper: parse source text that must be valid.
fn parse_ok(source: &str) -> Program {
    match parse(source) {
        Ok(program) => program,
        Err(error) => panic!("source {:?} failed to parse: {}", source, error),
    }
}

/// Helper: parse a single statement.
fn parse_one(source: &str) -> Node {
    let mut program = parse_ok(source);
    assert_eq!(program.len(), 1, "source: {:?}", source);
    program.remove(0)
}

/// Helper: parse source text that must fail.
fn parse_err(source: &str) -> ParseError {
    match parse(source) {
        Ok(program) => panic!("source {:?} parsed unexpectedly: {:?}", source, program),
        Err(error) => error,
    }
}

fn int(value: i64) -> Node {
    Node::Integer(value)
}

fn call(target: Node, name: &str, args: Vec<Node>) -> Node {
    Node::method_call(target, name, args)
}

// ============================================================================
// Programs
// ============================================================================

#[test]
fn test_empty_program() {
    assert_eq!(parse_ok(""), Vec::<Node>::new());
    assert_eq!(parse_ok("\n\n;;\n"), Vec::<Node>::new());
    assert_eq!(parse_ok("# only a comment\n"), Vec::<Node>::new());
}

#[test]
fn test_statement_separators() {
    assert_eq!(parse_ok(";;a; b; c;;"), vec![Node::bare("a"), Node::bare("b"), Node::bare("c")]);
    assert_eq!(parse_ok("a\nb\n"), parse_ok("a;b"));
}

#[test]
fn test_statements_need_separators() {
    let error = parse_err("5 5");
    assert_eq!(error.code(), 1100);
}

#[test]
fn test_group_holds_newline_separated_statements() {
    assert_eq!(parse_one("(a\nb)"), Node::Group(vec![Node::bare("a"), Node::bare("b")]));
    assert_eq!(parse_one("(a\nb)"), parse_one("(a; b)"));
    assert_eq!(
        parse_one("(x = 1\ny = 2)"),
        Node::Group(vec![
            Node::Assignment(Assignment {
                lhs: Box::new(Node::bare("x")),
                rhs: Box::new(int(1)),
            }),
            Node::Assignment(Assignment {
                lhs: Box::new(Node::bare("y")),
                rhs: Box::new(int(2)),
            }),
        ])
    );
}

#[test]
fn test_keyword_bodies_inside_brackets_keep_their_lines() {
    let begin = Node::Begin(BeginBlock {
        body: vec![Node::bare("a"), Node::bare("b")],
        rescues: vec![],
        else_body: vec![],
    });
    assert_eq!(
        parse_one("foo(begin\n  a\n  b\nend)"),
        Node::function_call("foo", vec![begin.clone()])
    );
    assert_eq!(parse_one("[begin\n  a\n  b\nend]"), Node::Array(vec![begin]));
}

#[test]
fn test_bracketed_lists_span_lines() {
    assert_eq!(parse_one("[\n  1,\n  2\n]"), Node::Array(vec![int(1), int(2)]));
    assert_eq!(
        parse_one("foo(\n  1,\n  2\n)"),
        Node::function_call("foo", vec![int(1), int(2)])
    );
    assert_eq!(
        parse_one("->(\n  x,\n  y\n) { x }"),
        Node::Lambda(Block {
            params: vec![Node::bare("x"), Node::bare("y")],
            body: vec![Node::bare("x")],
        })
    );
    match parse_one("def add(\n  a,\n  b\n)\n  a + b\nend") {
        Node::FuncDecl(decl) => {
            assert_eq!(decl.params, vec![MethodParam::named("a"), MethodParam::named("b")]);
            assert_eq!(decl.body, vec![call(Node::bare("a"), "+", vec![Node::bare("b")])]);
        }
        other => panic!("expected a method definition, got {:?}", other),
    }
}

// ============================================================================
// Literals
// ============================================================================

#[test]
fn test_number_literals() {
    assert_eq!(parse_one("1_000"), int(1000));
    assert_eq!(parse_one("123.4567"), Node::Float(123.4567));
    assert_eq!(parse_one("01777"), int(1777));
}

#[test]
fn test_integer_too_large() {
    let error = parse_err("99999999999999999999");
    assert_eq!(error.code(), 1108);
    assert!(!error.is_lexical());
}

#[test]
fn test_word_list_literal() {
    assert_eq!(
        parse_one("%w(a b  c)"),
        Node::Array(vec![Node::string("a"), Node::string("b"), Node::string("c")])
    );
}

#[test]
fn test_regex_literal_keeps_options() {
    assert_eq!(
        parse_one("/ab+c/im"),
        Node::Regex(RegexLiteral {
            pattern: "ab+c".to_string(),
            flags: "im".to_string(),
        })
    );
}

#[test]
fn test_variables_drop_sigils() {
    assert_eq!(
        parse_ok("@a; @@b; $c; $:"),
        vec![
            Node::InstanceVariable("a".to_string()),
            Node::ClassVariable("b".to_string()),
            Node::GlobalVariable("c".to_string()),
            Node::GlobalVariable(":".to_string()),
        ]
    );
}

#[test]
fn test_hash_literal_with_labels_and_rockets() {
    assert_eq!(
        parse_one("{\n  a: 1,\n  'b' => 2,\n}"),
        Node::Hash(vec![
            HashPair {
                key: Node::symbol("a"),
                value: int(1),
            },
            HashPair {
                key: Node::string("b"),
                value: int(2),
            },
        ])
    );
    assert_eq!(parse_one("{}"), Node::Hash(Vec::new()));
}

#[test]
fn test_ranges() {
    assert_eq!(
        parse_one("1...n + 1"),
        Node::Range(RangeLiteral {
            start: Box::new(int(1)),
            end: Box::new(call(Node::bare("n"), "+", vec![int(1)])),
            exclusive: true,
        })
    );
}

// ============================================================================
// Operators
// ============================================================================

#[test]
fn test_multiplicative_binds_tighter_than_additive() {
    assert_eq!(
        parse_one("1 + 2 * 3"),
        call(int(1), "+", vec![call(int(2), "*", vec![int(3)])])
    );
}

#[test]
fn test_binary_operators_are_left_associative() {
    assert_eq!(
        parse_one("1 - 2 - 3"),
        call(call(int(1), "-", vec![int(2)]), "-", vec![int(3)])
    );
}

#[test]
fn test_power_is_right_associative_and_beats_unary_minus() {
    assert_eq!(
        parse_one("-2 ** 3 ** 2"),
        Node::Negative(Box::new(call(int(2), "**", vec![call(int(3), "**", vec![int(2)])])))
    );
}

#[test]
fn test_logical_operators() {
    assert_eq!(
        parse_one("a || b && c"),
        call(Node::bare("a"), "||", vec![call(Node::bare("b"), "&&", vec![Node::bare("c")])])
    );
    assert_eq!(
        parse_one("a and not b"),
        Node::WeakLogicalAnd(LogicalPair {
            lhs: Box::new(Node::bare("a")),
            rhs: Box::new(Node::Negation(Box::new(Node::bare("b")))),
        })
    );
}

#[test]
fn test_newline_after_operator_continues_expression() {
    assert_eq!(parse_one("foo ||\n  bar"), call(Node::bare("foo"), "||", vec![Node::bare("bar")]));
}

#[test]
fn test_ternary_is_right_associative() {
    let node = parse_one("a ? b : c ? d : e");
    let Node::Ternary(ternary) = node else {
        panic!("expected ternary, got {:?}", node);
    };
    assert_eq!(*ternary.if_true, Node::bare("b"));
    assert!(matches!(*ternary.if_false, Node::Ternary(_)));
}

// ============================================================================
// Assignment
// ============================================================================

#[test]
fn test_assignment_is_right_associative() {
    assert_eq!(
        parse_one("a = b = 1"),
        Node::Assignment(Assignment {
            lhs: Box::new(Node::bare("a")),
            rhs: Box::new(Node::Assignment(Assignment {
                lhs: Box::new(Node::bare("b")),
                rhs: Box::new(int(1)),
            })),
        })
    );
}

#[test]
fn test_compound_assignment_lowers_to_call() {
    assert_eq!(parse_one("a **= 2"), call(Node::bare("a"), "**=", vec![int(2)]));
    assert_eq!(parse_one("a <<= 1"), call(Node::bare("a"), "<<=", vec![int(1)]));
    for operator in ["+=", "-=", "*=", "/=", "%=", ">>=", "|=", "&=", "^=", "&&="] {
        let source = format!("@total {} step", operator);
        assert_eq!(
            parse_one(&source),
            call(Node::InstanceVariable("total".to_string()), operator, vec![Node::bare("step")]),
            "{}",
            source
        );
    }
}

#[test]
fn test_attribute_and_index_setters() {
    assert_eq!(
        parse_one("obj.name = 1"),
        call(Node::bare("obj"), "name=", vec![int(1)])
    );
    assert_eq!(
        parse_one("h[1, 2] = 3"),
        call(Node::bare("h"), "[]=", vec![int(1), int(2), int(3)])
    );
}

#[test]
fn test_conditional_assignment_keeps_index_read() {
    assert_eq!(
        parse_one("h[:k] ||= 1"),
        Node::ConditionalAssignment(Assignment {
            lhs: Box::new(call(Node::bare("h"), "[]", vec![Node::symbol("k")])),
            rhs: Box::new(int(1)),
        })
    );
}

#[test]
fn test_multiple_assignment_with_splat() {
    assert_eq!(
        parse_one("*a, b = 1, 2"),
        Node::Assignment(Assignment {
            lhs: Box::new(Node::Array(vec![
                Node::StarSplat(Box::new(Node::bare("a"))),
                Node::bare("b"),
            ])),
            rhs: Box::new(Node::Array(vec![int(1), int(2)])),
        })
    );
}

#[test]
fn test_multiple_assignment_requires_equals() {
    assert_eq!(parse_err("a, b").code(), 1114);
}

#[test]
fn test_cannot_assign_to_literal() {
    let error = parse_err("1 = 2");
    assert_eq!(error.code(), 1107);
    assert_eq!(error.message(), "Cannot assign to integer literal.");
}

#[test]
fn test_rescue_modifier_wraps_assignment_value() {
    assert_eq!(
        parse_one("v = risky rescue nil"),
        Node::Assignment(Assignment {
            lhs: Box::new(Node::bare("v")),
            rhs: Box::new(Node::RescueModifier(RescueModifier {
                statement: Box::new(Node::bare("risky")),
                rescue: Box::new(Node::Nil),
            })),
        })
    );
}

// ============================================================================
// Calls
// ============================================================================

#[test]
fn test_command_call_arguments() {
    assert_eq!(
        parse_one("puts 'a', :b"),
        Node::function_call("puts", vec![Node::string("a"), Node::symbol("b")])
    );
}

#[test]
fn test_spacing_decides_prefix_operators() {
    assert_eq!(parse_one("foo -1"), Node::function_call("foo", vec![Node::Negative(Box::new(int(1)))]));
    assert_eq!(parse_one("foo - 1"), call(Node::bare("foo"), "-", vec![int(1)]));
    assert_eq!(
        parse_one("foo *args"),
        Node::function_call("foo", vec![Node::StarSplat(Box::new(Node::bare("args")))])
    );
    assert_eq!(parse_one("foo * args"), call(Node::bare("foo"), "*", vec![Node::bare("args")]));
}

#[test]
fn test_spacing_decides_index_or_argument() {
    assert_eq!(parse_one("foo[1]"), call(Node::bare("foo"), "[]", vec![int(1)]));
    assert_eq!(
        parse_one("foo [1]"),
        Node::function_call("foo", vec![Node::Array(vec![int(1)])])
    );
    assert_eq!(
        parse_one("@foo [1]"),
        call(Node::InstanceVariable("foo".to_string()), "[]", vec![int(1)])
    );
}

#[test]
fn test_trailing_pairs_become_one_hash_argument() {
    assert_eq!(
        parse_one("link 'x', to: 1, :as => 2"),
        Node::function_call(
            "link",
            vec![
                Node::string("x"),
                Node::Hash(vec![
                    HashPair {
                        key: Node::symbol("to"),
                        value: int(1),
                    },
                    HashPair {
                        key: Node::symbol("as"),
                        value: int(2),
                    },
                ]),
            ]
        )
    );
}

#[test]
fn test_do_block_attaches_to_outermost_command() {
    let node = parse_one("foo bar do\nend");
    let Node::Call(outer) = node else {
        panic!("expected call, got {:?}", node);
    };
    assert_eq!(outer.name, "foo");
    assert!(outer.block.is_some());
    assert_eq!(outer.args, vec![Node::bare("bar")]);
}

#[test]
fn test_brace_block_attaches_to_nearest_call() {
    let node = parse_one("foo bar { 1 }");
    let Node::Call(outer) = node else {
        panic!("expected call, got {:?}", node);
    };
    assert!(outer.block.is_none());
    assert_eq!(
        outer.args,
        vec![Node::Call(CallExpression {
            target: None,
            name: "bar".to_string(),
            args: Vec::new(),
            block: Some(Block {
                params: Vec::new(),
                body: vec![int(1)],
            }),
        })]
    );
}

#[test]
fn test_block_params() {
    let node = parse_one("each { |a, *rest, &blk| a }");
    let Node::Call(CallExpression { block: Some(block), .. }) = node else {
        panic!("expected call with block, got {:?}", node);
    };
    assert_eq!(
        block.params,
        vec![
            Node::bare("a"),
            Node::StarSplat(Box::new(Node::bare("rest"))),
            call(Node::bare("blk"), "to_proc", Vec::new()),
        ]
    );
}

#[test]
fn test_safe_navigation_and_leading_dot() {
    assert_eq!(
        parse_one("a&.b\n  .c"),
        call(call(Node::bare("a"), "b", Vec::new()), "c", Vec::new())
    );
}

#[test]
fn test_stabby_lambda() {
    assert_eq!(
        parse_one("->(x) { x * 2 }"),
        Node::Lambda(Block {
            params: vec![Node::bare("x")],
            body: vec![call(Node::bare("x"), "*", vec![int(2)])],
        })
    );
}

#[test]
fn test_constant_paths() {
    assert_eq!(parse_one("Foo"), Node::bare("Foo"));
    assert_eq!(
        parse_one("Foo::Bar::Baz"),
        Node::Constant(ConstantRef::namespaced("Baz", "Foo::Bar"))
    );
    assert_eq!(parse_one("String(1)"), Node::function_call("String", vec![int(1)]));
}

// ============================================================================
// Control flow
// ============================================================================

#[test]
fn test_if_with_elsif_ends_with_true_guard() {
    let node = parse_one("if a\n1\nelsif b\n2\nend");
    let Node::If(block) = node else {
        panic!("expected if, got {:?}", node);
    };
    assert_eq!(
        block.else_body,
        vec![
            Node::If(IfBlock {
                condition: Box::new(Node::bare("b")),
                body: vec![int(2)],
                else_body: Vec::new(),
            }),
            Node::If(IfBlock {
                condition: Box::new(Node::Boolean(true)),
                body: Vec::new(),
                else_body: Vec::new(),
            }),
        ]
    );
}

#[test]
fn test_single_line_forms() {
    assert_eq!(
        parse_one("if a then 1 else 2 end"),
        Node::If(IfBlock {
            condition: Box::new(Node::bare("a")),
            body: vec![int(1)],
            else_body: vec![Node::If(IfBlock {
                condition: Box::new(Node::Boolean(true)),
                body: vec![int(2)],
                else_body: Vec::new(),
            })],
        })
    );
    assert_eq!(
        parse_one("while x do x -= 1 end"),
        Node::Loop(LoopBlock {
            condition: Box::new(Node::bare("x")),
            body: vec![call(Node::bare("x"), "-=", vec![int(1)])],
        })
    );
}

#[test]
fn test_break_does_not_take_a_value() {
    let error = parse_err("loop do\n  break 1\nend");
    assert_eq!(error.code(), 1115);
    assert_eq!(error.message(), "'break' does not take a value.");
}

#[test]
fn test_yield_with_parentheses() {
    assert_eq!(
        parse_one("yield(1, 2)"),
        Node::Yield(Some(ReturnValue::Multiple(vec![int(1), int(2)])))
    );
    assert_eq!(parse_one("yield()"), Node::Yield(None));
}

// ============================================================================
// Declarations
// ============================================================================

#[test]
fn test_operator_and_index_method_names() {
    for (source, name) in [
        ("def ==(other)\nend", "=="),
        ("def [](key)\nend", "[]"),
        ("def []=(key, value)\nend", "[]="),
        ("def <<(item)\nend", "<<"),
        ("def empty?\nend", "empty?"),
        ("def name=(value)\nend", "name="),
    ] {
        let node = parse_one(source);
        let Node::FuncDecl(decl) = node else {
            panic!("expected method definition, got {:?}", node);
        };
        assert_eq!(decl.name, name, "source: {:?}", source);
    }
}

#[test]
fn test_method_else_clause_wraps_body_in_begin() {
    let node = parse_one("def go\n  work\nrescue\n  retry\nelse\n  done\nend");
    let Node::FuncDecl(decl) = node else {
        panic!("expected method definition, got {:?}", node);
    };
    assert!(decl.rescues.is_empty());
    assert_eq!(
        decl.body,
        vec![Node::Begin(BeginBlock {
            body: vec![Node::bare("work")],
            rescues: vec![RescueClause {
                classes: Vec::new(),
                var: None,
                body: vec![Node::Retry],
            }],
            else_body: vec![Node::bare("done")],
        })]
    );
}

#[test]
fn test_keyword_parameters() {
    let node = parse_one("def connect(host:, port: 80)\nend");
    let Node::FuncDecl(decl) = node else {
        panic!("expected method definition, got {:?}", node);
    };
    assert_eq!(
        decl.params,
        vec![
            MethodParam::named("host"),
            MethodParam {
                name: "port".to_string(),
                default_value: Some(Box::new(int(80))),
                is_splat: false,
                is_proc: false,
            },
        ]
    );
}

#[test]
fn test_class_name_must_be_constant() {
    let error = parse_err("class foo\nend");
    assert_eq!(error.code(), 1104);
    let location = error.location().map(|l| l.one_based());
    assert_eq!(location, Some((1, 7)));
}

#[test]
fn test_superclass_must_be_constant() {
    assert_eq!(parse_err("class Foo < bar\nend").code(), 1106);
}

#[test]
fn test_missing_end_reports_end_of_input() {
    let error = parse_err("def foo\n  1\n");
    assert_eq!(error.code(), 1117);
    assert_eq!(error.message(), "Unexpected end of input; 'end' expected.");
}

// ============================================================================
// Errors and options
// ============================================================================

#[test]
fn test_lexical_error_surfaces_through_parse() {
    let error = parse_err("x = 'open");
    assert!(error.is_lexical());
    assert_eq!(error.code(), 1002);
}

#[test]
fn test_error_display_uses_file_name() {
    let options = ParseOptions::new("script.rb");
    let error = match parse_with_options("1 +", &options) {
        Ok(program) => panic!("parsed unexpectedly: {:?}", program),
        Err(error) => error,
    };
    let rendered = error.to_string();
    assert!(rendered.starts_with("script.rb:1:4: error RB1103"), "{}", rendered);
}

#[test]
fn test_nesting_depth_limit() {
    let options = ParseOptions::default().with_max_depth(16);
    let deep = format!("{}1{}", "(".repeat(40), ")".repeat(40));
    let error = match parse_with_options(&deep, &options) {
        Ok(program) => panic!("parsed unexpectedly: {:?}", program),
        Err(error) => error,
    };
    assert_eq!(error.code(), 1116);

    let shallow = format!("{}1{}", "(".repeat(3), ")".repeat(3));
    assert!(parse_with_options(&shallow, &options).is_ok());
}

/// Run `f` on a thread with the default 2 MiB test stack.
fn on_small_stack<T: Send + 'static>(f: impl FnOnce() -> T + Send + 'static) -> T {
    std::thread::Builder::new()
        .stack_size(2 * 1024 * 1024)
        .spawn(f)
        .unwrap()
        .join()
        .unwrap()
}

fn nested_source(open: &str, close: &str, levels: usize) -> String {
    format!("{}1{}", open.repeat(levels), close.repeat(levels))
}

#[test]
fn test_deep_nesting_within_default_limit_fits_small_stack() {
    let results = on_small_stack(|| {
        [("(", ")"), ("[", "]")]
            .iter()
            .map(|(open, close)| parse(&nested_source(open, close, 255)).map(|program| program.len()))
            .collect::<Vec<_>>()
    });
    assert_eq!(results, vec![Ok(1), Ok(1)]);
}

#[test]
fn test_nesting_past_default_limit_is_a_syntax_error() {
    let codes = on_small_stack(|| {
        [("(", ")"), ("[", "]"), ("*(", ")"), ("foo(&", ")")]
            .iter()
            .map(|(open, close)| parse(&nested_source(open, close, 400)).map_err(|error| error.code()))
            .map(|result| result.err())
            .collect::<Vec<_>>()
    });
    assert_eq!(codes, vec![Some(1116); 4]);
}

#[test]
fn test_parse_batch_keeps_order() {
    let results = parse_batch(&["1", "class foo; end", "2"]);
    assert_eq!(results.len(), 3);
    assert_eq!(results[0], Ok(vec![int(1)]));
    assert!(results[1].is_err());
    assert_eq!(results[2], Ok(vec![int(2)]));
}
