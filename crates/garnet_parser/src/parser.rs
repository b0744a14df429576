//! The recursive descent parser.
//!
//! The parser pulls tokens from a [`TokenStream`] one at a time and holds
//! only the current one. Expressions descend through these levels, loosest
//! first:
//!
//! ```text
//! statement     modifiers: if unless while until rescue
//! assignment    = ||= op=        right-associative; rhs may carry `rescue`
//! ternary       ?:               right-associative
//! weak logical  and or
//! not
//! range         .. ...
//! binary        see `precedence`
//! unary         ! ~ + -
//! power         **               right-associative
//! postfix       .name ::name [index]
//! primary
//! ```
//!
//! The first error ends the parse; there is no recovery and no partial tree.

use garnet_ast::node::*;
use garnet_ast::syntax_kind::SyntaxKind;
use garnet_ast::types::TokenFlags;
use garnet_core::text::{LineMap, TextPos, TextSpan};
use garnet_diagnostics::{messages, Diagnostic, DiagnosticMessage, ParseError};
use garnet_scanner::{Token, TokenStream};
use std::num::IntErrorKind;
use tracing::{debug, trace};

use crate::options::ParseOptions;
use crate::precedence::{binary_operator_precedence, OperatorPrecedence};
use crate::stack::ensure_sufficient_stack;
use crate::utilities::{can_start_expression, is_multiple_assignment_target, is_operator_method_name};

type PResult<T> = Result<T, ParseError>;

const BODY_END: &[SyntaxKind] = &[SyntaxKind::EndKeyword];
const BEGIN_BODY_END: &[SyntaxKind] = &[
    SyntaxKind::RescueKeyword,
    SyntaxKind::ElseKeyword,
    SyntaxKind::EnsureKeyword,
    SyntaxKind::EndKeyword,
];
const IF_BODY_END: &[SyntaxKind] = &[SyntaxKind::ElsifKeyword, SyntaxKind::ElseKeyword, SyntaxKind::EndKeyword];
const WHEN_BODY_END: &[SyntaxKind] = &[SyntaxKind::WhenKeyword, SyntaxKind::ElseKeyword, SyntaxKind::EndKeyword];
const GROUP_END: &[SyntaxKind] = &[SyntaxKind::CloseParenToken];

/// Parses one source buffer into a [`Program`].
pub struct Parser<'src> {
    source: &'src str,
    tokens: TokenStream<'src>,
    /// The single token in flight.
    token: Token,
    file_name: String,
    max_depth: usize,
    depth: usize,
    /// Set while parsing command arguments or a loop condition, where a
    /// `do` belongs to the enclosing construct.
    no_do: bool,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str, options: &ParseOptions) -> Self {
        Self {
            source,
            tokens: TokenStream::new(source),
            token: Token::new(SyntaxKind::EndOfFileToken, "", TextSpan::empty(0)),
            file_name: options.file_name.clone(),
            max_depth: options.max_depth,
            depth: 0,
            no_do: false,
        }
    }

    pub fn parse_program(mut self) -> PResult<Program> {
        debug!(file = %self.file_name, bytes = self.source.len(), "parse start");
        self.advance()?;
        let program = self.parse_statements(&[])?;
        debug!(file = %self.file_name, statements = program.len(), "parse finished");
        Ok(program)
    }

    // ========================================================================
    // Token management
    // ========================================================================

    #[inline]
    fn kind(&self) -> SyntaxKind {
        self.token.kind
    }

    #[inline]
    fn at(&self, kind: SyntaxKind) -> bool {
        self.token.kind == kind
    }

    /// The current token is `kind` and touches the previous token.
    #[inline]
    fn at_glued(&self, kind: SyntaxKind) -> bool {
        self.at(kind) && !self.token.has_preceding_whitespace()
    }

    /// Move to the next token, returning the one just left behind.
    fn advance(&mut self) -> PResult<Token> {
        let next = match self.tokens.next() {
            Some(token) if token.kind == SyntaxKind::Unknown => return Err(self.lexical_error(token)),
            Some(token) => token,
            None => Token::new(
                SyntaxKind::EndOfFileToken,
                "",
                TextSpan::empty(self.source.len() as TextPos),
            ),
        };
        trace!(kind = ?next.kind, start = next.span.start, "advance");
        Ok(std::mem::replace(&mut self.token, next))
    }

    fn eat(&mut self, kind: SyntaxKind) -> PResult<bool> {
        if !self.at(kind) {
            return Ok(false);
        }
        self.advance()?;
        Ok(true)
    }

    fn expect(&mut self, kind: SyntaxKind) -> PResult<Token> {
        if self.at(kind) {
            return self.advance();
        }
        let expected = kind.text().unwrap_or("token");
        if self.at(SyntaxKind::EndOfFileToken) {
            return self.fail(&messages::UNEXPECTED_END_OF_INPUT_0_EXPECTED, &[expected]);
        }
        self.fail(&messages::_0_EXPECTED_BUT_FOUND_1, &[expected, self.token.display_text()])
    }

    fn skip_newlines(&mut self) -> PResult<()> {
        while self.at(SyntaxKind::NewLineToken) {
            self.advance()?;
        }
        Ok(())
    }

    fn skip_terminators(&mut self) -> PResult<()> {
        while self.kind().is_statement_separator() {
            self.advance()?;
        }
        Ok(())
    }

    fn fail<T>(&self, message: &DiagnosticMessage, args: &[&str]) -> PResult<T> {
        let diagnostic =
            Diagnostic::at(self.token.span, message, args).in_file(&self.file_name, &LineMap::new(self.source));
        debug!(code = diagnostic.code, message = %diagnostic.message_text, "syntax error");
        Err(ParseError::Syntax(diagnostic))
    }

    fn unexpected<T>(&self) -> PResult<T> {
        self.fail(&messages::UNEXPECTED_TOKEN_0, &[self.token.display_text()])
    }

    fn lexical_error(&mut self, token: Token) -> ParseError {
        let diagnostic = self
            .tokens
            .take_error()
            .unwrap_or_else(|| Diagnostic::at(token.span, &messages::UNEXPECTED_CHARACTER_0, &[&token.text]));
        ParseError::Lexical(diagnostic.in_file(&self.file_name, &LineMap::new(self.source)))
    }

    /// Run `parse` one nesting level deeper. Every recursive cycle of the
    /// grammar passes through here.
    fn nested<T>(&mut self, parse: impl FnOnce(&mut Self) -> PResult<T>) -> PResult<T> {
        if self.depth >= self.max_depth {
            return self.fail(&messages::MAXIMUM_NESTING_DEPTH_0_EXCEEDED, &[&self.max_depth.to_string()]);
        }
        self.depth += 1;
        let result = ensure_sufficient_stack(|| parse(self));
        self.depth -= 1;
        result
    }

    fn with_no_do<T>(&mut self, no_do: bool, parse: impl FnOnce(&mut Self) -> PResult<T>) -> PResult<T> {
        let saved = std::mem::replace(&mut self.no_do, no_do);
        let result = parse(self);
        self.no_do = saved;
        result
    }

    // ========================================================================
    // Statements
    // ========================================================================

    /// Parse statements until end of input or one of `ends`, which is left
    /// unconsumed.
    fn parse_statements(&mut self, ends: &[SyntaxKind]) -> PResult<Vec<Node>> {
        let mut statements = Vec::new();
        loop {
            self.skip_terminators()?;
            if self.at(SyntaxKind::EndOfFileToken) || ends.contains(&self.kind()) {
                break;
            }
            statements.push(self.parse_statement()?);

            let kind = self.kind();
            if !(kind.is_statement_separator() || kind == SyntaxKind::EndOfFileToken || ends.contains(&kind)) {
                return self.unexpected();
            }
        }
        Ok(statements)
    }

    fn parse_statement(&mut self) -> PResult<Node> {
        let mut statement = self.parse_expression_statement()?;
        loop {
            statement = match self.kind() {
                SyntaxKind::IfKeyword | SyntaxKind::UnlessKeyword => {
                    let negate = self.advance()?.kind == SyntaxKind::UnlessKeyword;
                    let condition = self.parse_expression()?;
                    Node::If(IfBlock {
                        condition: guard(condition, negate),
                        body: vec![statement],
                        else_body: Vec::new(),
                    })
                }
                SyntaxKind::WhileKeyword | SyntaxKind::UntilKeyword => {
                    let negate = self.advance()?.kind == SyntaxKind::UntilKeyword;
                    let condition = self.parse_expression()?;
                    Node::Loop(LoopBlock {
                        condition: guard(condition, negate),
                        body: vec![statement],
                    })
                }
                SyntaxKind::RescueKeyword => {
                    self.advance()?;
                    let rescue = self.parse_expression()?;
                    Node::RescueModifier(RescueModifier {
                        statement: Box::new(statement),
                        rescue: Box::new(rescue),
                    })
                }
                _ => return Ok(statement),
            };
        }
    }

    fn parse_expression_statement(&mut self) -> PResult<Node> {
        if self.eat(SyntaxKind::AsteriskToken)? {
            let target = Node::StarSplat(Box::new(self.nested(Self::parse_postfix)?));
            if self.at(SyntaxKind::CommaToken) || self.at(SyntaxKind::EqualsToken) {
                return self.parse_multiple_assignment(target);
            }
            return Ok(target);
        }

        let expression = self.parse_expression()?;
        if self.at(SyntaxKind::CommaToken) && is_multiple_assignment_target(&expression) {
            return self.parse_multiple_assignment(expression);
        }
        Ok(expression)
    }

    /// `a, b = ...` once the first target has been parsed.
    fn parse_multiple_assignment(&mut self, first: Node) -> PResult<Node> {
        let mut targets = vec![self.multiple_assignment_target(first)?];
        while self.eat(SyntaxKind::CommaToken)? {
            self.skip_newlines()?;
            let target = if self.eat(SyntaxKind::AsteriskToken)? {
                Node::StarSplat(Box::new(self.nested(Self::parse_postfix)?))
            } else {
                self.nested(Self::parse_postfix)?
            };
            targets.push(self.multiple_assignment_target(target)?);
        }
        if !self.eat(SyntaxKind::EqualsToken)? {
            return self.fail(&messages::MULTIPLE_ASSIGNMENT_EXPECTS_EQUALS, &[]);
        }
        self.skip_newlines()?;

        let first = self.parse_splat_or_expression()?;
        let value = if self.at(SyntaxKind::CommaToken) {
            let mut values = vec![first];
            while self.eat(SyntaxKind::CommaToken)? {
                self.skip_newlines()?;
                values.push(self.parse_splat_or_expression()?);
            }
            Node::Array(values)
        } else {
            first
        };

        Ok(Node::Assignment(Assignment {
            lhs: Box::new(Node::Array(targets)),
            rhs: Box::new(value),
        }))
    }

    fn multiple_assignment_target(&self, target: Node) -> PResult<Node> {
        if !is_multiple_assignment_target(&target) {
            return self.fail(&messages::CANNOT_ASSIGN_TO_0, &[target.kind_name()]);
        }
        Ok(match target {
            Node::Call(mut call) => {
                call.name = setter_name(&call.name);
                Node::Call(call)
            }
            other => other,
        })
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    fn parse_expression(&mut self) -> PResult<Node> {
        self.nested(Self::parse_assignment)
    }

    fn parse_assignment(&mut self) -> PResult<Node> {
        let target = self.parse_ternary()?;
        let kind = self.kind();
        if !kind.is_assignment_operator() {
            return Ok(target);
        }
        let operator = self.advance()?;
        self.skip_newlines()?;
        let value = self.parse_assignment_value()?;

        match kind {
            SyntaxKind::EqualsToken => self.assign(target, value),
            SyntaxKind::BarBarEqualsToken => {
                if !is_assignable(&target) {
                    return self.fail(&messages::CANNOT_ASSIGN_TO_0, &[target.kind_name()]);
                }
                Ok(Node::ConditionalAssignment(Assignment {
                    lhs: Box::new(target),
                    rhs: Box::new(value),
                }))
            }
            // The method name keeps the `=`: `a += 1` calls `+=` on `a`.
            _ => Ok(Node::operator_call(target, &operator.text, value)),
        }
    }

    fn parse_assignment_value(&mut self) -> PResult<Node> {
        let value = self.parse_expression()?;
        if !self.eat(SyntaxKind::RescueKeyword)? {
            return Ok(value);
        }
        let rescue = self.parse_expression()?;
        Ok(Node::RescueModifier(RescueModifier {
            statement: Box::new(value),
            rescue: Box::new(rescue),
        }))
    }

    /// Lower `target = value`. Index and attribute targets become setter calls.
    fn assign(&self, target: Node, value: Node) -> PResult<Node> {
        match target {
            Node::BareReference(_)
            | Node::InstanceVariable(_)
            | Node::ClassVariable(_)
            | Node::GlobalVariable(_)
            | Node::Constant(_) => Ok(Node::Assignment(Assignment {
                lhs: Box::new(target),
                rhs: Box::new(value),
            })),
            Node::Call(mut call) if is_setter_target(&call) => {
                call.name = setter_name(&call.name);
                call.args.push(value);
                Ok(Node::Call(call))
            }
            other => self.fail(&messages::CANNOT_ASSIGN_TO_0, &[other.kind_name()]),
        }
    }

    fn parse_ternary(&mut self) -> PResult<Node> {
        let condition = self.parse_weak_logical()?;
        if !self.eat(SyntaxKind::QuestionToken)? {
            return Ok(condition);
        }
        self.skip_newlines()?;
        let if_true = self.nested(Self::parse_ternary)?;
        self.skip_newlines()?;
        self.expect(SyntaxKind::ColonToken)?;
        self.skip_newlines()?;
        let if_false = self.nested(Self::parse_ternary)?;
        Ok(Node::Ternary(Ternary {
            condition: Box::new(condition),
            if_true: Box::new(if_true),
            if_false: Box::new(if_false),
        }))
    }

    fn parse_weak_logical(&mut self) -> PResult<Node> {
        let mut lhs = self.parse_not()?;
        loop {
            let is_and = match self.kind() {
                SyntaxKind::AndKeyword => true,
                SyntaxKind::OrKeyword => false,
                _ => return Ok(lhs),
            };
            self.advance()?;
            self.skip_newlines()?;
            let pair = LogicalPair {
                lhs: Box::new(lhs),
                rhs: Box::new(self.parse_not()?),
            };
            lhs = if is_and {
                Node::WeakLogicalAnd(pair)
            } else {
                Node::WeakLogicalOr(pair)
            };
        }
    }

    fn parse_not(&mut self) -> PResult<Node> {
        if !self.eat(SyntaxKind::NotKeyword)? {
            return self.parse_range();
        }
        let operand = self.nested(Self::parse_not)?;
        Ok(Node::Negation(Box::new(operand)))
    }

    fn parse_range(&mut self) -> PResult<Node> {
        let start = self.parse_binary(OperatorPrecedence::Lowest)?;
        let exclusive = match self.kind() {
            SyntaxKind::DotDotToken => false,
            SyntaxKind::DotDotDotToken => true,
            _ => return Ok(start),
        };
        self.advance()?;
        self.skip_newlines()?;
        let end = self.parse_binary(OperatorPrecedence::Lowest)?;
        Ok(Node::Range(RangeLiteral {
            start: Box::new(start),
            end: Box::new(end),
            exclusive,
        }))
    }

    /// Precedence climbing over the binary operator table. Every operator
    /// becomes a call on its left operand.
    fn parse_binary(&mut self, precedence: OperatorPrecedence) -> PResult<Node> {
        let mut lhs = self.parse_unary()?;
        while let Some(operator_precedence) = binary_operator_precedence(self.kind()) {
            if operator_precedence <= precedence {
                break;
            }
            let operator = self.advance()?;
            self.skip_newlines()?;
            let rhs = self.nested(|p| p.parse_binary(operator_precedence))?;
            lhs = Node::operator_call(lhs, &operator.text, rhs);
        }
        Ok(lhs)
    }

    fn parse_unary(&mut self) -> PResult<Node> {
        let wrap: fn(Box<Node>) -> Node = match self.kind() {
            SyntaxKind::ExclamationToken => Node::Negation,
            SyntaxKind::TildeToken => Node::Complement,
            SyntaxKind::PlusToken => Node::Positive,
            SyntaxKind::MinusToken => Node::Negative,
            _ => return self.parse_power(),
        };
        self.advance()?;
        let operand = self.nested(Self::parse_unary)?;
        Ok(wrap(Box::new(operand)))
    }

    fn parse_power(&mut self) -> PResult<Node> {
        let base = self.parse_postfix()?;
        if !self.eat(SyntaxKind::AsteriskAsteriskToken)? {
            return Ok(base);
        }
        self.skip_newlines()?;
        let exponent = self.nested(Self::parse_unary)?;
        Ok(Node::operator_call(base, "**", exponent))
    }

    fn parse_postfix(&mut self) -> PResult<Node> {
        let mut node = self.parse_primary()?;
        loop {
            node = match self.kind() {
                SyntaxKind::DotToken | SyntaxKind::AmpersandDotToken => {
                    self.advance()?;
                    self.skip_newlines()?;
                    self.parse_method_call(node)?
                }
                SyntaxKind::ColonColonToken if !self.token.has_preceding_whitespace() => {
                    self.advance()?;
                    self.parse_method_call(node)?
                }
                SyntaxKind::OpenBracketToken if self.starts_index(&node) => {
                    self.advance()?;
                    let args = self.parse_bracketed_arguments(SyntaxKind::CloseBracketToken)?;
                    Node::method_call(node, "[]", args)
                }
                _ => return Ok(node),
            };
        }
    }

    /// `x[1]` indexes; `foo [1]` passes an array unless the receiver is a
    /// variable (`@shared [key]`).
    fn starts_index(&self, receiver: &Node) -> bool {
        !self.token.flags.is_prefix_position()
            || matches!(
                receiver,
                Node::InstanceVariable(_) | Node::ClassVariable(_) | Node::GlobalVariable(_)
            )
    }

    // ========================================================================
    // Calls and arguments
    // ========================================================================

    /// The method name after `.`, `&.` or `::`, then its arguments.
    fn parse_method_call(&mut self, receiver: Node) -> PResult<Node> {
        let kind = self.kind();
        let is_name = matches!(kind, SyntaxKind::Identifier | SyntaxKind::ConstantIdentifier)
            || kind.is_keyword()
            || is_operator_method_name(kind);
        if !is_name {
            return self.fail(&messages::METHOD_NAME_EXPECTED_BUT_FOUND_0, &[self.token.display_text()]);
        }
        let name = self.advance()?.text;
        self.parse_call_rest(Some(Box::new(receiver)), name)
    }

    /// Arguments and block of a call whose name has been consumed.
    fn parse_call_rest(&mut self, target: Option<Box<Node>>, name: String) -> PResult<Node> {
        let mut args = Vec::new();
        if self.at_glued(SyntaxKind::OpenParenToken) {
            self.advance()?;
            args = self.parse_bracketed_arguments(SyntaxKind::CloseParenToken)?;
        } else if self.can_start_command_argument() {
            args = self.with_no_do(true, |p| p.parse_argument_list(None))?;
        }
        let block = self.parse_block()?;
        Ok(Node::Call(CallExpression {
            target,
            name,
            args,
            block,
        }))
    }

    /// Whether the current token opens the argument list of a command call
    /// (`puts 'x'`, `foo -1`, `bar *args`).
    fn can_start_command_argument(&self) -> bool {
        let token = &self.token;
        if !token.flags.contains(TokenFlags::PRECEDING_WHITESPACE) {
            return false;
        }
        match token.kind {
            SyntaxKind::MinusToken
            | SyntaxKind::PlusToken
            | SyntaxKind::AsteriskToken
            | SyntaxKind::AmpersandToken
            | SyntaxKind::ColonColonToken
            | SyntaxKind::ExclamationToken
            | SyntaxKind::OpenBracketToken => token.flags.is_prefix_position(),
            kind => {
                kind.is_literal()
                    || matches!(
                        kind,
                        SyntaxKind::Identifier
                            | SyntaxKind::ConstantIdentifier
                            | SyntaxKind::InstanceVariable
                            | SyntaxKind::ClassVariable
                            | SyntaxKind::GlobalVariable
                            | SyntaxKind::Label
                            | SyntaxKind::OpenParenToken
                            | SyntaxKind::MinusGreaterThanToken
                            | SyntaxKind::TildeToken
                            | SyntaxKind::NilKeyword
                            | SyntaxKind::TrueKeyword
                            | SyntaxKind::FalseKeyword
                            | SyntaxKind::SelfKeyword
                            | SyntaxKind::FileKeyword
                            | SyntaxKind::LineKeyword
                            | SyntaxKind::NotKeyword
                            | SyntaxKind::DefKeyword
                    )
            }
        }
    }

    /// Arguments up to `close`, whose opener has been consumed. Consumes `close`.
    fn parse_bracketed_arguments(&mut self, close: SyntaxKind) -> PResult<Vec<Node>> {
        let args = self.with_no_do(false, |p| p.parse_argument_list(Some(close)))?;
        self.expect(close)?;
        Ok(args)
    }

    /// Comma-separated arguments. Inside brackets (`close` set) newlines are
    /// skipped; trailing `key => value` and `key: value` pairs are collected
    /// into one hash argument.
    fn parse_argument_list(&mut self, close: Option<SyntaxKind>) -> PResult<Vec<Node>> {
        let mut args = Vec::new();
        let mut pairs = Vec::new();
        loop {
            if let Some(close) = close {
                self.skip_newlines()?;
                if self.at(close) {
                    break;
                }
            }
            match self.kind() {
                SyntaxKind::Label => {
                    let key = Node::symbol(self.advance()?.text);
                    self.skip_newlines()?;
                    let value = self.parse_expression()?;
                    pairs.push(HashPair { key, value });
                }
                SyntaxKind::AmpersandToken => {
                    self.advance()?;
                    let proc = self.nested(Self::parse_ternary)?;
                    args.push(Node::method_call(proc, "to_proc", Vec::new()));
                }
                _ => {
                    let key = self.parse_splat_or_expression()?;
                    if self.eat(SyntaxKind::EqualsGreaterThanToken)? {
                        self.skip_newlines()?;
                        let value = self.parse_expression()?;
                        pairs.push(HashPair { key, value });
                    } else {
                        args.push(key);
                    }
                }
            }
            if close.is_some() {
                self.skip_newlines()?;
            }
            if !self.eat(SyntaxKind::CommaToken)? {
                break;
            }
            self.skip_newlines()?;
        }
        if !pairs.is_empty() {
            args.push(Node::Hash(pairs));
        }
        Ok(args)
    }

    fn parse_splat_or_expression(&mut self) -> PResult<Node> {
        if self.eat(SyntaxKind::AsteriskToken)? {
            let value = self.nested(Self::parse_ternary)?;
            return Ok(Node::StarSplat(Box::new(value)));
        }
        self.parse_expression()
    }

    fn starts_block(&self) -> bool {
        self.at(SyntaxKind::OpenBraceToken) || (self.at(SyntaxKind::DoKeyword) && !self.no_do)
    }

    /// `{ |params| ... }` or `do |params| ... end`, if one follows.
    fn parse_block(&mut self) -> PResult<Option<Block>> {
        let close = match self.kind() {
            SyntaxKind::OpenBraceToken => SyntaxKind::CloseBraceToken,
            SyntaxKind::DoKeyword if !self.no_do => SyntaxKind::EndKeyword,
            _ => return Ok(None),
        };
        self.advance()?;
        let params = self.parse_block_params()?;
        let body = self.with_no_do(false, |p| p.parse_statements(&[close]))?;
        self.expect(close)?;
        Ok(Some(Block { params, body }))
    }

    fn parse_block_params(&mut self) -> PResult<Vec<Node>> {
        if self.eat(SyntaxKind::BarBarToken)? || !self.eat(SyntaxKind::BarToken)? {
            return Ok(Vec::new());
        }
        let mut params = Vec::new();
        while !self.at(SyntaxKind::BarToken) {
            params.push(self.parse_block_param()?);
            if !self.eat(SyntaxKind::CommaToken)? {
                break;
            }
        }
        self.expect(SyntaxKind::BarToken)?;
        Ok(params)
    }

    /// `name`, `*rest` or `&blk`.
    fn parse_block_param(&mut self) -> PResult<Node> {
        let prefix = self.kind();
        if matches!(prefix, SyntaxKind::AsteriskToken | SyntaxKind::AmpersandToken) {
            self.advance()?;
        }
        if !self.at(SyntaxKind::Identifier) {
            return self.fail(&messages::PARAMETER_NAME_EXPECTED_BUT_FOUND_0, &[self.token.display_text()]);
        }
        let name = Node::BareReference(self.advance()?.text);
        Ok(match prefix {
            SyntaxKind::AsteriskToken => Node::StarSplat(Box::new(name)),
            SyntaxKind::AmpersandToken => Node::method_call(name, "to_proc", Vec::new()),
            _ => name,
        })
    }

    // ========================================================================
    // Primary expressions
    // ========================================================================

    fn parse_primary(&mut self) -> PResult<Node> {
        match self.kind() {
            SyntaxKind::IntegerLiteral => self.parse_integer(),
            SyntaxKind::FloatLiteral => self.parse_float(),
            SyntaxKind::StringLiteral => Ok(Node::SimpleString(self.advance()?.text)),
            SyntaxKind::InterpolatedStringLiteral => Ok(Node::InterpolatedString(self.advance()?.text)),
            SyntaxKind::SymbolLiteral => Ok(Node::Symbol(self.advance()?.text)),
            SyntaxKind::SubshellLiteral => Ok(Node::Subshell(self.advance()?.text)),
            SyntaxKind::CharacterLiteral => {
                let ch = self.token.text.chars().next();
                match ch {
                    Some(ch) => self.leaf(Node::Character(ch)),
                    None => self.unexpected(),
                }
            }
            SyntaxKind::RegularExpressionLiteral => {
                let token = self.advance()?;
                Ok(Node::Regex(RegexLiteral {
                    pattern: token.text,
                    flags: token.suffix,
                }))
            }
            SyntaxKind::WordListLiteral => {
                let words = self.advance()?.text;
                Ok(Node::Array(words.split_whitespace().map(Node::string).collect()))
            }
            SyntaxKind::TrueKeyword => self.leaf(Node::Boolean(true)),
            SyntaxKind::FalseKeyword => self.leaf(Node::Boolean(false)),
            SyntaxKind::NilKeyword => self.leaf(Node::Nil),
            SyntaxKind::SelfKeyword => self.leaf(Node::SelfRef),
            SyntaxKind::FileKeyword => self.leaf(Node::FileName),
            SyntaxKind::LineKeyword => self.leaf(Node::LineNumber),
            SyntaxKind::RetryKeyword => self.parse_jump(Node::Retry),
            SyntaxKind::BreakKeyword => self.parse_jump(Node::Break),
            SyntaxKind::NextKeyword => self.parse_jump(Node::Next),
            SyntaxKind::InstanceVariable => {
                let text = self.advance()?.text;
                Ok(Node::InstanceVariable(text.trim_start_matches('@').to_string()))
            }
            SyntaxKind::ClassVariable => {
                let text = self.advance()?.text;
                Ok(Node::ClassVariable(text.trim_start_matches('@').to_string()))
            }
            SyntaxKind::GlobalVariable => {
                let text = self.advance()?.text;
                Ok(Node::GlobalVariable(text.strip_prefix('$').unwrap_or(&text).to_string()))
            }
            SyntaxKind::Identifier => self.parse_identifier(),
            SyntaxKind::ConstantIdentifier | SyntaxKind::ColonColonToken => self.parse_constant(),
            SyntaxKind::OpenParenToken => self.parse_group(),
            SyntaxKind::OpenBracketToken => {
                self.advance()?;
                let elements = self.parse_bracketed_arguments(SyntaxKind::CloseBracketToken)?;
                Ok(Node::Array(elements))
            }
            SyntaxKind::OpenBraceToken => self.parse_hash(),
            SyntaxKind::MinusGreaterThanToken => self.parse_stabby_lambda(),
            SyntaxKind::IfKeyword | SyntaxKind::UnlessKeyword => self.parse_if(),
            SyntaxKind::WhileKeyword | SyntaxKind::UntilKeyword => self.parse_loop(),
            SyntaxKind::CaseKeyword => self.parse_case(),
            SyntaxKind::BeginKeyword => self.parse_begin(),
            SyntaxKind::DefKeyword => self.parse_def(),
            SyntaxKind::ClassKeyword => self.parse_class(),
            SyntaxKind::ModuleKeyword => self.parse_module(),
            SyntaxKind::AliasKeyword => self.parse_alias(),
            SyntaxKind::ReturnKeyword => {
                self.advance()?;
                let values = self.parse_jump_values()?;
                Ok(Node::Return(return_value(values)))
            }
            SyntaxKind::YieldKeyword => {
                self.advance()?;
                let values = if self.at_glued(SyntaxKind::OpenParenToken) {
                    self.advance()?;
                    self.parse_bracketed_arguments(SyntaxKind::CloseParenToken)?
                } else {
                    self.parse_jump_values()?
                };
                Ok(Node::Yield(return_value(values)))
            }
            _ => self.fail(&messages::EXPRESSION_EXPECTED_BUT_FOUND_0, &[self.token.display_text()]),
        }
    }

    fn leaf(&mut self, node: Node) -> PResult<Node> {
        self.advance()?;
        Ok(node)
    }

    fn parse_integer(&mut self) -> PResult<Node> {
        let digits = self.token.text.replace('_', "");
        match digits.parse::<i64>() {
            Ok(value) => self.leaf(Node::Integer(value)),
            Err(error) if *error.kind() == IntErrorKind::PosOverflow => {
                self.fail(&messages::INTEGER_LITERAL_0_IS_TOO_LARGE, &[&self.token.text])
            }
            Err(_) => self.fail(&messages::INVALID_NUMERIC_LITERAL_0, &[&self.token.text]),
        }
    }

    fn parse_float(&mut self) -> PResult<Node> {
        match self.token.text.replace('_', "").parse::<f64>() {
            Ok(value) => self.leaf(Node::Float(value)),
            Err(_) => self.fail(&messages::INVALID_NUMERIC_LITERAL_0, &[&self.token.text]),
        }
    }

    /// `break`, `next` and `retry` carry no value.
    fn parse_jump(&mut self, node: Node) -> PResult<Node> {
        let keyword = self.advance()?;
        if can_start_expression(self.kind()) {
            return self.fail(&messages::_0_DOES_NOT_TAKE_A_VALUE, &[&keyword.text]);
        }
        Ok(node)
    }

    /// Zero or more comma-separated values after `return` or `yield`.
    fn parse_jump_values(&mut self) -> PResult<Vec<Node>> {
        let mut values = Vec::new();
        if !can_start_expression(self.kind()) {
            return Ok(values);
        }
        loop {
            values.push(self.parse_splat_or_expression()?);
            if !self.eat(SyntaxKind::CommaToken)? {
                return Ok(values);
            }
            self.skip_newlines()?;
        }
    }

    fn parse_identifier(&mut self) -> PResult<Node> {
        let name = self.advance()?.text;
        if matches!(name.as_str(), "lambda" | "proc") {
            if let Some(block) = self.parse_block()? {
                return Ok(Node::Lambda(block));
            }
        }
        if self.at_glued(SyntaxKind::OpenParenToken) || self.can_start_command_argument() || self.starts_block() {
            return self.parse_call_rest(None, name);
        }
        if name.ends_with(|c: char| c == '?' || c == '!') {
            return Ok(Node::function_call(name, Vec::new()));
        }
        Ok(Node::BareReference(name))
    }

    /// `Foo`, `Foo::Bar`, `::Foo`, `String(x)` or `Foo::bar`.
    fn parse_constant(&mut self) -> PResult<Node> {
        let is_global = self.eat(SyntaxKind::ColonColonToken)?;
        let mut segments = vec![self.expect_constant_name()?];
        while self.at_glued(SyntaxKind::ColonColonToken) {
            self.advance()?;
            if !self.at(SyntaxKind::ConstantIdentifier) {
                let receiver = constant_reference(constant_path(segments, is_global));
                return self.parse_method_call(receiver);
            }
            segments.push(self.advance()?.text);
        }
        if segments.len() == 1 && !is_global && self.at_glued(SyntaxKind::OpenParenToken) {
            let name = segments.remove(0);
            return self.parse_call_rest(None, name);
        }
        Ok(constant_reference(constant_path(segments, is_global)))
    }

    /// A constant path in a declaration or rescue clause.
    fn parse_constant_path(&mut self) -> PResult<ConstantRef> {
        let is_global = self.eat(SyntaxKind::ColonColonToken)?;
        let mut segments = vec![self.expect_constant_name()?];
        while self.eat(SyntaxKind::ColonColonToken)? {
            segments.push(self.expect_constant_name()?);
        }
        Ok(constant_path(segments, is_global))
    }

    fn expect_constant_name(&mut self) -> PResult<String> {
        if !self.at(SyntaxKind::ConstantIdentifier) {
            return self.fail(&messages::_0_EXPECTED_BUT_FOUND_1, &["constant", self.token.display_text()]);
        }
        Ok(self.advance()?.text)
    }

    fn at_constant_path(&self) -> bool {
        self.at(SyntaxKind::ConstantIdentifier) || self.at(SyntaxKind::ColonColonToken)
    }

    fn parse_group(&mut self) -> PResult<Node> {
        self.advance()?;
        let body = self.with_no_do(false, |p| p.parse_statements(GROUP_END))?;
        self.expect(SyntaxKind::CloseParenToken)?;
        Ok(Node::Group(body))
    }

    fn parse_hash(&mut self) -> PResult<Node> {
        self.advance()?;
        let mut pairs = Vec::new();
        self.with_no_do(false, |p| {
            loop {
                p.skip_newlines()?;
                if p.at(SyntaxKind::CloseBraceToken) {
                    break;
                }
                let key = if p.at(SyntaxKind::Label) {
                    Node::symbol(p.advance()?.text)
                } else {
                    let key = p.parse_expression()?;
                    p.skip_newlines()?;
                    p.expect(SyntaxKind::EqualsGreaterThanToken)?;
                    key
                };
                p.skip_newlines()?;
                let value = p.parse_expression()?;
                pairs.push(HashPair { key, value });
                p.skip_newlines()?;
                if !p.eat(SyntaxKind::CommaToken)? {
                    break;
                }
            }
            p.skip_newlines()
        })?;
        self.expect(SyntaxKind::CloseBraceToken)?;
        Ok(Node::Hash(pairs))
    }

    /// `-> (a, b) { ... }`, `-> x do ... end`, `-> { ... }`.
    fn parse_stabby_lambda(&mut self) -> PResult<Node> {
        self.advance()?;
        let mut params = Vec::new();
        if self.eat(SyntaxKind::OpenParenToken)? {
            loop {
                self.skip_newlines()?;
                if self.at(SyntaxKind::CloseParenToken) {
                    break;
                }
                params.push(self.parse_block_param()?);
                self.skip_newlines()?;
                if !self.eat(SyntaxKind::CommaToken)? {
                    break;
                }
            }
            self.expect(SyntaxKind::CloseParenToken)?;
        } else {
            while self.at(SyntaxKind::Identifier) {
                params.push(self.parse_block_param()?);
                if !self.eat(SyntaxKind::CommaToken)? {
                    break;
                }
            }
        }
        match self.with_no_do(false, Self::parse_block)? {
            Some(block) => {
                params.extend(block.params);
                Ok(Node::Lambda(Block { params, body: block.body }))
            }
            None => self.fail(&messages::_0_EXPECTED_BUT_FOUND_1, &["{", self.token.display_text()]),
        }
    }

    // ========================================================================
    // Control flow
    // ========================================================================

    /// Condition of a block-form `if`/`while`, up to its optional `then`/`do`.
    fn parse_condition(&mut self, keyword: SyntaxKind) -> PResult<Node> {
        let condition = self.with_no_do(true, Self::parse_expression)?;
        self.eat(keyword)?;
        Ok(condition)
    }

    fn parse_if(&mut self) -> PResult<Node> {
        let negate = self.advance()?.kind == SyntaxKind::UnlessKeyword;
        let condition = self.parse_condition(SyntaxKind::ThenKeyword)?;
        let body = self.parse_statements(IF_BODY_END)?;

        let mut else_body = Vec::new();
        while self.eat(SyntaxKind::ElsifKeyword)? {
            let condition = self.parse_condition(SyntaxKind::ThenKeyword)?;
            let body = self.parse_statements(IF_BODY_END)?;
            else_body.push(Node::If(IfBlock {
                condition: Box::new(condition),
                body,
                else_body: Vec::new(),
            }));
        }
        if self.eat(SyntaxKind::ElseKeyword)? {
            let body = self.parse_statements(BODY_END)?;
            else_body.push(always(body));
        } else if !else_body.is_empty() {
            else_body.push(always(Vec::new()));
        }
        self.expect(SyntaxKind::EndKeyword)?;

        Ok(Node::If(IfBlock {
            condition: guard(condition, negate),
            body,
            else_body,
        }))
    }

    fn parse_loop(&mut self) -> PResult<Node> {
        let negate = self.advance()?.kind == SyntaxKind::UntilKeyword;
        let condition = self.parse_condition(SyntaxKind::DoKeyword)?;
        let body = self.parse_statements(BODY_END)?;
        self.expect(SyntaxKind::EndKeyword)?;
        Ok(Node::Loop(LoopBlock {
            condition: guard(condition, negate),
            body,
        }))
    }

    fn parse_case(&mut self) -> PResult<Node> {
        self.advance()?;
        let subject = if self.kind().is_statement_separator() {
            None
        } else {
            Some(Box::new(self.parse_expression()?))
        };
        self.skip_terminators()?;

        let mut cases = Vec::new();
        while self.eat(SyntaxKind::WhenKeyword)? {
            let mut conditions = Vec::new();
            loop {
                conditions.push(self.parse_splat_or_expression()?);
                if !self.eat(SyntaxKind::CommaToken)? {
                    break;
                }
                self.skip_newlines()?;
            }
            self.eat(SyntaxKind::ThenKeyword)?;
            let body = self.parse_statements(WHEN_BODY_END)?;
            cases.push(SwitchCase { conditions, body });
        }
        let else_body = if self.eat(SyntaxKind::ElseKeyword)? {
            self.parse_statements(BODY_END)?
        } else {
            Vec::new()
        };
        self.expect(SyntaxKind::EndKeyword)?;

        Ok(Node::Switch(SwitchStatement {
            subject,
            cases,
            else_body,
        }))
    }

    fn parse_begin(&mut self) -> PResult<Node> {
        self.advance()?;
        let body = self.parse_statements(BEGIN_BODY_END)?;
        let rescues = self.parse_rescue_clauses()?;
        let else_body = if self.eat(SyntaxKind::ElseKeyword)? {
            self.parse_statements(BODY_END)?
        } else {
            Vec::new()
        };
        self.expect(SyntaxKind::EndKeyword)?;
        Ok(Node::Begin(BeginBlock {
            body,
            rescues,
            else_body,
        }))
    }

    /// `rescue [Class, ...] [=> var]` clauses, each with its body.
    fn parse_rescue_clauses(&mut self) -> PResult<Vec<RescueClause>> {
        let mut clauses = Vec::new();
        while self.eat(SyntaxKind::RescueKeyword)? {
            let mut classes = Vec::new();
            if self.at_constant_path() {
                loop {
                    classes.push(self.parse_constant_path()?);
                    if !self.eat(SyntaxKind::CommaToken)? {
                        break;
                    }
                    self.skip_newlines()?;
                }
            } else if !(self.at(SyntaxKind::EqualsGreaterThanToken)
                || self.at(SyntaxKind::ThenKeyword)
                || self.kind().is_statement_separator())
            {
                return self.fail(&messages::EXCEPTION_CLASS_EXPECTED_BUT_FOUND_0, &[self.token.display_text()]);
            }

            let var = if self.eat(SyntaxKind::EqualsGreaterThanToken)? {
                if !self.at(SyntaxKind::Identifier) {
                    return self.fail(&messages::_0_EXPECTED_BUT_FOUND_1, &["variable name", self.token.display_text()]);
                }
                Some(self.advance()?.text)
            } else {
                None
            };
            self.eat(SyntaxKind::ThenKeyword)?;
            let body = self.parse_statements(BEGIN_BODY_END)?;
            clauses.push(RescueClause { classes, var, body });
        }
        Ok(clauses)
    }

    // ========================================================================
    // Declarations
    // ========================================================================

    fn parse_def(&mut self) -> PResult<Node> {
        self.advance()?;
        let (target, name) = self.parse_def_name()?;
        let params = match self.kind() {
            SyntaxKind::OpenParenToken => {
                self.advance()?;
                let params = self.parse_params(Some(SyntaxKind::CloseParenToken))?;
                self.expect(SyntaxKind::CloseParenToken)?;
                params
            }
            SyntaxKind::Identifier | SyntaxKind::Label | SyntaxKind::AsteriskToken | SyntaxKind::AmpersandToken => {
                self.parse_params(None)?
            }
            _ => Vec::new(),
        };

        let mut body = self.parse_statements(BEGIN_BODY_END)?;
        let mut rescues = self.parse_rescue_clauses()?;
        // A method has no else slot of its own; wrap the body in a begin block.
        if self.eat(SyntaxKind::ElseKeyword)? {
            let else_body = self.parse_statements(BODY_END)?;
            body = vec![Node::Begin(BeginBlock {
                body,
                rescues: std::mem::take(&mut rescues),
                else_body,
            })];
        }
        self.expect(SyntaxKind::EndKeyword)?;

        Ok(Node::FuncDecl(FuncDecl {
            target,
            name,
            params,
            body,
            rescues,
        }))
    }

    /// `name`, `self.name`, `obj.name`, with setter and operator names.
    fn parse_def_name(&mut self) -> PResult<(Option<Box<Node>>, String)> {
        let first = self.kind();
        if !matches!(
            first,
            SyntaxKind::SelfKeyword | SyntaxKind::Identifier | SyntaxKind::ConstantIdentifier
        ) {
            return Ok((None, self.parse_method_name()?));
        }
        let token = self.advance()?;
        if !self.at_glued(SyntaxKind::DotToken) {
            return Ok((None, self.finish_method_name(token.text)?));
        }
        self.advance()?;
        let target = if first == SyntaxKind::SelfKeyword {
            Node::SelfRef
        } else {
            Node::BareReference(token.text)
        };
        Ok((Some(Box::new(target)), self.parse_method_name()?))
    }

    fn parse_method_name(&mut self) -> PResult<String> {
        let kind = self.kind();
        if kind == SyntaxKind::OpenBracketToken {
            self.advance()?;
            self.expect(SyntaxKind::CloseBracketToken)?;
            return self.finish_method_name("[]".to_string());
        }
        if matches!(kind, SyntaxKind::Identifier | SyntaxKind::ConstantIdentifier) || kind.is_keyword() {
            let name = self.advance()?.text;
            return self.finish_method_name(name);
        }
        if is_operator_method_name(kind) {
            return Ok(self.advance()?.text);
        }
        self.fail(&messages::METHOD_NAME_EXPECTED_BUT_FOUND_0, &[self.token.display_text()])
    }

    /// Append a setter `=` written directly after the name.
    fn finish_method_name(&mut self, name: String) -> PResult<String> {
        if self.at_glued(SyntaxKind::EqualsToken) && !name.ends_with(|c: char| c == '?' || c == '!') {
            self.advance()?;
            return Ok(name + "=");
        }
        Ok(name)
    }

    /// Parameters up to `close`, or to the end of the line when unbracketed.
    fn parse_params(&mut self, close: Option<SyntaxKind>) -> PResult<Vec<MethodParam>> {
        let mut params = Vec::new();
        loop {
            if let Some(close) = close {
                self.skip_newlines()?;
                if self.at(close) {
                    break;
                }
            }
            params.push(self.parse_param()?);
            if close.is_some() {
                self.skip_newlines()?;
            }
            if !self.eat(SyntaxKind::CommaToken)? {
                break;
            }
            self.skip_newlines()?;
        }
        Ok(params)
    }

    fn parse_param(&mut self) -> PResult<MethodParam> {
        let is_splat = self.eat(SyntaxKind::AsteriskToken)?;
        let is_proc = !is_splat && self.eat(SyntaxKind::AmpersandToken)?;
        let plain = !is_splat && !is_proc;

        // Keyword parameter: `name:` with an optional default.
        if plain && self.at(SyntaxKind::Label) {
            let name = self.advance()?.text;
            let ends_param = matches!(self.kind(), SyntaxKind::CommaToken | SyntaxKind::CloseParenToken)
                || self.kind().is_statement_separator();
            let default_value = if ends_param {
                None
            } else {
                Some(Box::new(self.nested(Self::parse_ternary)?))
            };
            return Ok(MethodParam {
                name,
                default_value,
                is_splat,
                is_proc,
            });
        }

        if !self.at(SyntaxKind::Identifier) {
            return self.fail(&messages::PARAMETER_NAME_EXPECTED_BUT_FOUND_0, &[self.token.display_text()]);
        }
        let name = self.advance()?.text;
        let default_value = if plain && self.eat(SyntaxKind::EqualsToken)? {
            self.skip_newlines()?;
            Some(Box::new(self.nested(Self::parse_ternary)?))
        } else {
            None
        };
        Ok(MethodParam {
            name,
            default_value,
            is_splat,
            is_proc,
        })
    }

    fn parse_class(&mut self) -> PResult<Node> {
        self.advance()?;
        if self.eat(SyntaxKind::LessThanLessThanToken)? {
            let target = self.parse_expression()?;
            let body = self.parse_statements(BODY_END)?;
            self.expect(SyntaxKind::EndKeyword)?;
            return Ok(Node::EigenClass(EigenClass {
                target: Box::new(target),
                body,
            }));
        }

        if !self.at_constant_path() {
            return self.fail(&messages::CLASS_NAME_MUST_BE_A_CONSTANT_0, &[self.token.display_text()]);
        }
        let path = self.parse_constant_path()?;
        let superclass = if self.eat(SyntaxKind::LessThanToken)? {
            if !self.at_constant_path() {
                return self.fail(&messages::SUPERCLASS_MUST_BE_A_CONSTANT_0, &[self.token.display_text()]);
            }
            Some(self.parse_constant_path()?)
        } else {
            None
        };
        let body = self.parse_statements(BODY_END)?;
        self.expect(SyntaxKind::EndKeyword)?;

        Ok(Node::ClassDecl(ClassDecl {
            name: path.name,
            namespace: path.namespace,
            superclass,
            body,
        }))
    }

    fn parse_module(&mut self) -> PResult<Node> {
        self.advance()?;
        if !self.at_constant_path() {
            return self.fail(&messages::MODULE_NAME_MUST_BE_A_CONSTANT_0, &[self.token.display_text()]);
        }
        let path = self.parse_constant_path()?;
        let body = self.parse_statements(BODY_END)?;
        self.expect(SyntaxKind::EndKeyword)?;
        Ok(Node::ModuleDecl(ModuleDecl {
            name: path.name,
            namespace: path.namespace,
            body,
        }))
    }

    fn parse_alias(&mut self) -> PResult<Node> {
        self.advance()?;
        let to = self.parse_alias_name()?;
        let from = self.parse_alias_name()?;
        Ok(Node::Alias(Alias { to, from }))
    }

    fn parse_alias_name(&mut self) -> PResult<String> {
        let kind = self.kind();
        let is_name = matches!(
            kind,
            SyntaxKind::Identifier
                | SyntaxKind::ConstantIdentifier
                | SyntaxKind::SymbolLiteral
                | SyntaxKind::GlobalVariable
        ) || kind.is_keyword()
            || is_operator_method_name(kind);
        if !is_name {
            return self.fail(&messages::ALIAS_NAME_EXPECTED_BUT_FOUND_0, &[self.token.display_text()]);
        }
        Ok(self.advance()?.text)
    }
}

// ============================================================================
// Tree helpers
// ============================================================================

fn guard(condition: Node, negate: bool) -> Box<Node> {
    if negate {
        Box::new(Node::Negation(Box::new(condition)))
    } else {
        Box::new(condition)
    }
}

/// The trailing, unconditionally-true arm of an `if` chain.
fn always(body: Vec<Node>) -> Node {
    Node::If(IfBlock {
        condition: Box::new(Node::Boolean(true)),
        body,
        else_body: Vec::new(),
    })
}

fn return_value(mut values: Vec<Node>) -> Option<ReturnValue> {
    match values.len() {
        0 => None,
        1 => values.pop().map(|value| ReturnValue::Single(Box::new(value))),
        _ => Some(ReturnValue::Multiple(values)),
    }
}

fn constant_path(mut segments: Vec<String>, is_global: bool) -> ConstantRef {
    let name = segments.pop().unwrap_or_default();
    ConstantRef {
        name,
        namespace: segments.join("::"),
        is_global,
    }
}

/// A lone relative constant reads as a bare reference.
fn constant_reference(path: ConstantRef) -> Node {
    if path.namespace.is_empty() && !path.is_global {
        Node::BareReference(path.name)
    } else {
        Node::Constant(path)
    }
}

/// `[]` becomes `[]=`, `name` becomes `name=`.
fn setter_name(name: &str) -> String {
    format!("{}=", name)
}

/// `recv[i]` or `recv.name` with no arguments or block.
fn is_setter_target(call: &CallExpression) -> bool {
    if call.target.is_none() || call.block.is_some() {
        return false;
    }
    if call.name == "[]" {
        return true;
    }
    call.args.is_empty()
        && call.name.starts_with(|c: char| c == '_' || c.is_alphabetic())
        && !call.name.ends_with(|c: char| c == '?' || c == '!')
}

fn is_assignable(node: &Node) -> bool {
    match node {
        Node::BareReference(_)
        | Node::InstanceVariable(_)
        | Node::ClassVariable(_)
        | Node::GlobalVariable(_)
        | Node::Constant(_) => true,
        Node::Call(call) => is_setter_target(call),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setter_targets() {
        let index = CallExpression {
            target: Some(Box::new(Node::bare("hash"))),
            name: "[]".to_string(),
            args: vec![Node::symbol("key")],
            block: None,
        };
        assert!(is_setter_target(&index));

        let predicate = CallExpression {
            target: Some(Box::new(Node::bare("obj"))),
            name: "empty?".to_string(),
            args: Vec::new(),
            block: None,
        };
        assert!(!is_setter_target(&predicate));
        assert!(!is_assignable(&Node::Integer(1)));
        assert_eq!(setter_name("[]"), "[]=");
    }

    #[test]
    fn test_constant_reference_shapes() {
        assert_eq!(
            constant_reference(constant_path(vec!["Foo".into()], false)),
            Node::bare("Foo")
        );
        assert_eq!(
            constant_reference(constant_path(vec!["Foo".into(), "Bar".into(), "Baz".into()], false)),
            Node::Constant(ConstantRef::namespaced("Baz", "Foo::Bar"))
        );
        let global = constant_path(vec!["Foo".into()], true);
        assert!(global.is_global);
        assert_eq!(global.namespace, "");
    }

    #[test]
    fn test_return_value_arity() {
        assert_eq!(return_value(Vec::new()), None);
        assert_eq!(
            return_value(vec![Node::Integer(1)]),
            Some(ReturnValue::Single(Box::new(Node::Integer(1))))
        );
        assert!(matches!(
            return_value(vec![Node::Integer(1), Node::Integer(2)]),
            Some(ReturnValue::Multiple(values)) if values.len() == 2
        ));
    }
}
