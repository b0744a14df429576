//! AST visitor trait for traversing the syntax tree.
//!
//! The runtime walks parsed programs through [`AstVisitor`]. Default method
//! implementations visit every child in source order; override a method to
//! intercept a node kind and call the matching `walk_*` function to keep
//! descending.

use crate::node::*;

pub trait AstVisitor {
    fn visit_program(&mut self, program: &[Node]) {
        walk_nodes(self, program);
    }

    fn visit_node(&mut self, node: &Node) {
        walk_node(self, node);
    }

    fn visit_call(&mut self, call: &CallExpression) {
        walk_call(self, call);
    }

    fn visit_block(&mut self, block: &Block) {
        walk_nodes(self, &block.params);
        walk_nodes(self, &block.body);
    }

    fn visit_rescue_clause(&mut self, clause: &RescueClause) {
        walk_nodes(self, &clause.body);
    }

    fn visit_method_param(&mut self, param: &MethodParam) {
        if let Some(default) = &param.default_value {
            self.visit_node(default);
        }
    }

    fn visit_func_decl(&mut self, decl: &FuncDecl) {
        if let Some(target) = &decl.target {
            self.visit_node(target);
        }
        for param in &decl.params {
            self.visit_method_param(param);
        }
        walk_nodes(self, &decl.body);
        for clause in &decl.rescues {
            self.visit_rescue_clause(clause);
        }
    }
}

pub fn walk_nodes<V: AstVisitor + ?Sized>(visitor: &mut V, nodes: &[Node]) {
    for node in nodes {
        visitor.visit_node(node);
    }
}

pub fn walk_call<V: AstVisitor + ?Sized>(visitor: &mut V, call: &CallExpression) {
    if let Some(target) = &call.target {
        visitor.visit_node(target);
    }
    walk_nodes(visitor, &call.args);
    if let Some(block) = &call.block {
        visitor.visit_block(block);
    }
}

fn walk_value<V: AstVisitor + ?Sized>(visitor: &mut V, value: &Option<ReturnValue>) {
    match value {
        Some(ReturnValue::Single(node)) => visitor.visit_node(node),
        Some(ReturnValue::Multiple(nodes)) => walk_nodes(visitor, nodes),
        None => {}
    }
}

/// Visit the direct children of `node`.
pub fn walk_node<V: AstVisitor + ?Sized>(visitor: &mut V, node: &Node) {
    match node {
        Node::Integer(_)
        | Node::Float(_)
        | Node::SimpleString(_)
        | Node::InterpolatedString(_)
        | Node::Symbol(_)
        | Node::Character(_)
        | Node::Regex(_)
        | Node::Subshell(_)
        | Node::Boolean(_)
        | Node::Nil
        | Node::BareReference(_)
        | Node::InstanceVariable(_)
        | Node::ClassVariable(_)
        | Node::GlobalVariable(_)
        | Node::Constant(_)
        | Node::FileName
        | Node::LineNumber
        | Node::SelfRef
        | Node::Retry
        | Node::Break
        | Node::Next
        | Node::Alias(_) => {}

        Node::Call(call) => visitor.visit_call(call),
        Node::Assignment(assign) | Node::ConditionalAssignment(assign) => {
            visitor.visit_node(&assign.lhs);
            visitor.visit_node(&assign.rhs);
        }
        Node::Ternary(ternary) => {
            visitor.visit_node(&ternary.condition);
            visitor.visit_node(&ternary.if_true);
            visitor.visit_node(&ternary.if_false);
        }
        Node::Negation(inner)
        | Node::Complement(inner)
        | Node::Positive(inner)
        | Node::Negative(inner)
        | Node::StarSplat(inner) => visitor.visit_node(inner),
        Node::WeakLogicalAnd(pair) | Node::WeakLogicalOr(pair) => {
            visitor.visit_node(&pair.lhs);
            visitor.visit_node(&pair.rhs);
        }
        Node::Array(items) | Node::Group(items) => walk_nodes(visitor, items),
        Node::Hash(pairs) => {
            for pair in pairs {
                visitor.visit_node(&pair.key);
                visitor.visit_node(&pair.value);
            }
        }
        Node::Range(range) => {
            visitor.visit_node(&range.start);
            visitor.visit_node(&range.end);
        }
        Node::If(block) => {
            visitor.visit_node(&block.condition);
            walk_nodes(visitor, &block.body);
            walk_nodes(visitor, &block.else_body);
        }
        Node::Loop(block) => {
            visitor.visit_node(&block.condition);
            walk_nodes(visitor, &block.body);
        }
        Node::Switch(switch) => {
            if let Some(subject) = &switch.subject {
                visitor.visit_node(subject);
            }
            for case in &switch.cases {
                walk_nodes(visitor, &case.conditions);
                walk_nodes(visitor, &case.body);
            }
            walk_nodes(visitor, &switch.else_body);
        }
        Node::Begin(begin) => {
            walk_nodes(visitor, &begin.body);
            for clause in &begin.rescues {
                visitor.visit_rescue_clause(clause);
            }
            walk_nodes(visitor, &begin.else_body);
        }
        Node::RescueModifier(modifier) => {
            visitor.visit_node(&modifier.statement);
            visitor.visit_node(&modifier.rescue);
        }
        Node::Return(value) | Node::Yield(value) => walk_value(visitor, value),
        Node::FuncDecl(decl) => visitor.visit_func_decl(decl),
        Node::ClassDecl(decl) => walk_nodes(visitor, &decl.body),
        Node::ModuleDecl(decl) => walk_nodes(visitor, &decl.body),
        Node::EigenClass(eigen) => {
            visitor.visit_node(&eigen.target);
            walk_nodes(visitor, &eigen.body);
        }
        Node::Lambda(block) => visitor.visit_block(block),
    }
}
