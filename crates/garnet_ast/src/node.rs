//! AST node definitions.
//!
//! [`Node`] is a closed sum type with one variant per node kind. Every
//! composite variant owns its children (`Box<Node>` / `Vec<Node>`), so a
//! tree is acyclic and no sub-tree is shared. A parsed program is a plain
//! `Vec<Node>` of top-level statements.

#[cfg(feature = "serde")]
use serde::Serialize;

/// A parsed program: the ordered top-level statements.
pub type Program = Vec<Node>;

// ============================================================================
// Node
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum Node {
    // -- Literals --
    Integer(i64),
    Float(f64),
    /// Single-quoted text, kept verbatim (`\'` is not collapsed).
    SimpleString(String),
    /// Raw template text; `#{...}` regions are delimited, never evaluated.
    InterpolatedString(String),
    /// Symbol name without the leading colon; may hold a raw template.
    Symbol(String),
    Character(char),
    Regex(RegexLiteral),
    /// Backtick command text.
    Subshell(String),
    Boolean(bool),
    Nil,

    // -- References --
    /// An unqualified name; local variable vs. method call is decided at run time.
    BareReference(String),
    /// `@name`, stored without the sigil.
    InstanceVariable(String),
    /// `@@name`, stored without the sigils.
    ClassVariable(String),
    /// `$name`, stored without the sigil.
    GlobalVariable(String),
    Constant(ConstantRef),
    /// `__FILE__`
    FileName,
    /// `__LINE__`
    LineNumber,
    /// `self`
    SelfRef,

    // -- Composite expressions --
    Call(CallExpression),
    Assignment(Assignment),
    /// `lhs ||= rhs`
    ConditionalAssignment(Assignment),
    Ternary(Ternary),
    Negation(Box<Node>),
    Complement(Box<Node>),
    Positive(Box<Node>),
    Negative(Box<Node>),
    StarSplat(Box<Node>),
    WeakLogicalAnd(LogicalPair),
    WeakLogicalOr(LogicalPair),

    // -- Containers --
    Array(Vec<Node>),
    /// Pairs in source order; duplicate keys are kept.
    Hash(Vec<HashPair>),
    Range(RangeLiteral),

    // -- Control --
    If(IfBlock),
    Loop(LoopBlock),
    Switch(SwitchStatement),
    Begin(BeginBlock),
    RescueModifier(RescueModifier),
    Retry,
    Break,
    Next,
    Return(Option<ReturnValue>),
    Yield(Option<ReturnValue>),

    // -- Declarations --
    FuncDecl(FuncDecl),
    ClassDecl(ClassDecl),
    ModuleDecl(ModuleDecl),
    EigenClass(EigenClass),
    Alias(Alias),

    // -- Grouping --
    /// Parenthesized statements; evaluates to the last one.
    Group(Vec<Node>),
    Lambda(Block),
}

// ============================================================================
// Payloads
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct RegexLiteral {
    pub pattern: String,
    /// Trailing option letters, e.g. `"im"`.
    pub flags: String,
}

/// A constant path such as `Foo`, `Foo::Bar` or `::Bar`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ConstantRef {
    pub name: String,
    /// Outer segments joined with `::`, empty when unqualified.
    pub namespace: String,
    /// Path written with a leading `::`.
    pub is_global: bool,
}

impl ConstantRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn namespaced(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            is_global: false,
        }
    }

    /// Outer namespace segments, outermost first.
    pub fn namespace_path(&self) -> impl Iterator<Item = &str> {
        self.namespace.split("::").filter(|segment| !segment.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct CallExpression {
    pub target: Option<Box<Node>>,
    pub name: String,
    pub args: Vec<Node>,
    pub block: Option<Block>,
}

/// A `do ... end` / `{ ... }` block, or a lambda body.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Block {
    pub params: Vec<Node>,
    pub body: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Assignment {
    /// A reference, or an array of targets for multiple assignment.
    pub lhs: Box<Node>,
    pub rhs: Box<Node>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Ternary {
    pub condition: Box<Node>,
    pub if_true: Box<Node>,
    pub if_false: Box<Node>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct LogicalPair {
    pub lhs: Box<Node>,
    pub rhs: Box<Node>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct HashPair {
    pub key: Node,
    pub value: Node,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct RangeLiteral {
    pub start: Box<Node>,
    pub end: Box<Node>,
    /// `a...b`
    pub exclusive: bool,
}

/// `if`/`unless`. The `else_body` of a chain holds further `If` nodes; the
/// last one is guarded by `Boolean(true)`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct IfBlock {
    pub condition: Box<Node>,
    pub body: Vec<Node>,
    pub else_body: Vec<Node>,
}

/// `while`/`until`; `until` negates the condition.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct LoopBlock {
    pub condition: Box<Node>,
    pub body: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SwitchStatement {
    pub subject: Option<Box<Node>>,
    pub cases: Vec<SwitchCase>,
    pub else_body: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SwitchCase {
    pub conditions: Vec<Node>,
    pub body: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct BeginBlock {
    pub body: Vec<Node>,
    pub rescues: Vec<RescueClause>,
    pub else_body: Vec<Node>,
}

/// One `rescue` arm. An empty class list matches anything.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct RescueClause {
    pub classes: Vec<ConstantRef>,
    pub var: Option<String>,
    pub body: Vec<Node>,
}

/// `statement rescue fallback`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct RescueModifier {
    pub statement: Box<Node>,
    pub rescue: Box<Node>,
}

/// The value carried by `return` or `yield`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum ReturnValue {
    Single(Box<Node>),
    /// `return a, b, c`
    Multiple(Vec<Node>),
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct FuncDecl {
    /// Singleton target: `def self.foo`, `def obj.foo`.
    pub target: Option<Box<Node>>,
    pub name: String,
    pub params: Vec<MethodParam>,
    pub body: Vec<Node>,
    pub rescues: Vec<RescueClause>,
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct MethodParam {
    pub name: String,
    pub default_value: Option<Box<Node>>,
    /// `*args`
    pub is_splat: bool,
    /// `&block`
    pub is_proc: bool,
}

impl MethodParam {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ClassDecl {
    pub name: String,
    pub namespace: String,
    pub superclass: Option<ConstantRef>,
    pub body: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ModuleDecl {
    pub name: String,
    pub namespace: String,
    pub body: Vec<Node>,
}

/// `class << target ... end`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct EigenClass {
    pub target: Box<Node>,
    pub body: Vec<Node>,
}

/// `alias to from`, both names as symbol text.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Alias {
    pub to: String,
    pub from: String,
}

// ============================================================================
// Constructors and queries
// ============================================================================

impl Node {
    pub fn bare(name: impl Into<String>) -> Node {
        Node::BareReference(name.into())
    }

    pub fn string(text: impl Into<String>) -> Node {
        Node::SimpleString(text.into())
    }

    pub fn symbol(name: impl Into<String>) -> Node {
        Node::Symbol(name.into())
    }

    /// A call with a receiver and no block.
    pub fn method_call(target: Node, name: impl Into<String>, args: Vec<Node>) -> Node {
        Node::Call(CallExpression {
            target: Some(Box::new(target)),
            name: name.into(),
            args,
            block: None,
        })
    }

    /// A receiver-less call with no block.
    pub fn function_call(name: impl Into<String>, args: Vec<Node>) -> Node {
        Node::Call(CallExpression {
            target: None,
            name: name.into(),
            args,
            block: None,
        })
    }

    /// `lhs <op> rhs` lowered to a call on `lhs`.
    pub fn operator_call(lhs: Node, op: &str, rhs: Node) -> Node {
        Node::method_call(lhs, op, vec![rhs])
    }

    /// Short name of the variant, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::Integer(_) => "integer literal",
            Node::Float(_) => "float literal",
            Node::SimpleString(_) | Node::InterpolatedString(_) => "string literal",
            Node::Symbol(_) => "symbol",
            Node::Character(_) => "character literal",
            Node::Regex(_) => "regular expression",
            Node::Subshell(_) => "subshell command",
            Node::Boolean(_) => "boolean literal",
            Node::Nil => "nil",
            Node::BareReference(_) => "reference",
            Node::InstanceVariable(_) => "instance variable",
            Node::ClassVariable(_) => "class variable",
            Node::GlobalVariable(_) => "global variable",
            Node::Constant(_) => "constant",
            Node::FileName => "__FILE__",
            Node::LineNumber => "__LINE__",
            Node::SelfRef => "self",
            Node::Call(_) => "method call",
            Node::Assignment(_) | Node::ConditionalAssignment(_) => "assignment",
            Node::Ternary(_) => "ternary expression",
            Node::Negation(_) | Node::Complement(_) | Node::Positive(_) | Node::Negative(_) => {
                "unary expression"
            }
            Node::StarSplat(_) => "splat",
            Node::WeakLogicalAnd(_) | Node::WeakLogicalOr(_) => "logical expression",
            Node::Array(_) => "array literal",
            Node::Hash(_) => "hash literal",
            Node::Range(_) => "range",
            Node::If(_) => "if block",
            Node::Loop(_) => "loop",
            Node::Switch(_) => "case statement",
            Node::Begin(_) => "begin block",
            Node::RescueModifier(_) => "rescue modifier",
            Node::Retry => "retry",
            Node::Break => "break",
            Node::Next => "next",
            Node::Return(_) => "return",
            Node::Yield(_) => "yield",
            Node::FuncDecl(_) => "method definition",
            Node::ClassDecl(_) => "class definition",
            Node::ModuleDecl(_) => "module definition",
            Node::EigenClass(_) => "singleton class",
            Node::Alias(_) => "alias",
            Node::Group(_) => "parenthesized expression",
            Node::Lambda(_) => "lambda",
        }
    }
}
