//! Recursive-descent parser with standard precedence:
//!
//! ```text
//! expression := term (('+'|'-') term)*
//! term       := factor (('*'|'/') factor)*
//! factor     := number | '(' expression ')'
//! number     := ['-'|'+'] (digit | '.')+
//! ```
//!
//! A sign belongs to the numeric literal, so `-9` is a single leaf. A leading
//! `+` is only accepted at the very start of the input or right after `(`.

use distcalc_core::Operator;

use super::ast::{Ast, Node, NodeId};
use super::error::ParseError;

/// Deepest parenthesis nesting accepted.
pub const MAX_NESTING: usize = 256;

/// Compile an expression into a binary tree. No partial tree is returned on error.
pub fn compile(text: &str) -> Result<Ast, ParseError> {
    let input: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    if input.is_empty() {
        return Err(ParseError::EmptyExpression);
    }

    let mut parser = Parser::new(&input);
    let root = parser.expression()?;
    if parser.pos < parser.input.len() {
        return Err(ParseError::UnexpectedToken(parser.pos));
    }

    Ok(Ast::from_parts(parser.nodes, root))
}

struct Parser<'a> {
    input: &'a [u8],
    pos: usize,
    depth: usize,
    nodes: Vec<Node>,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input: input.as_bytes(),
            pos: 0,
            depth: 0,
            nodes: Vec::new(),
        }
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn push(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    fn binary(&mut self, op: Operator, left: NodeId, right: NodeId) -> NodeId {
        self.push(Node::Internal { op, left, right, scheduled: false })
    }

    fn expression(&mut self) -> Result<NodeId, ParseError> {
        let mut node = self.term()?;
        while let Some(op @ (b'+' | b'-')) = self.peek() {
            self.pos += 1;
            let right = self.term()?;
            let op = if op == b'+' { Operator::Add } else { Operator::Sub };
            node = self.binary(op, node, right);
        }
        Ok(node)
    }

    fn term(&mut self) -> Result<NodeId, ParseError> {
        let mut node = self.factor()?;
        while let Some(op @ (b'*' | b'/')) = self.peek() {
            self.pos += 1;
            let right = self.factor()?;
            let op = if op == b'*' { Operator::Mul } else { Operator::Div };
            node = self.binary(op, node, right);
        }
        Ok(node)
    }

    fn factor(&mut self) -> Result<NodeId, ParseError> {
        if self.peek() == Some(b'(') {
            return self.group();
        }
        self.number()
    }

    fn group(&mut self) -> Result<NodeId, ParseError> {
        if self.depth >= MAX_NESTING {
            return Err(ParseError::NestingTooDeep(MAX_NESTING));
        }
        self.pos += 1;
        self.depth += 1;
        let node = self.expression()?;
        if self.peek() != Some(b')') {
            return Err(ParseError::MissingClosingParen);
        }
        self.pos += 1;
        self.depth -= 1;
        Ok(node)
    }

    fn number(&mut self) -> Result<NodeId, ParseError> {
        let start = self.pos;
        match self.peek() {
            Some(b'+') => {
                if self.pos > 0 && self.input[self.pos - 1] != b'(' {
                    return Err(ParseError::UnexpectedUnaryPlus(self.pos));
                }
                self.pos += 1;
            }
            Some(b'-') => self.pos += 1,
            _ => {}
        }

        while matches!(self.peek(), Some(c) if c.is_ascii_digit() || c == b'.') {
            self.pos += 1;
        }

        // Only ASCII bytes were consumed, so the slice is valid UTF-8.
        let token = String::from_utf8_lossy(&self.input[start..self.pos]);
        if token.is_empty() {
            return Err(ParseError::ExpectedNumber(start));
        }
        let value: f64 = token
            .parse()
            .map_err(|_| ParseError::InvalidNumber(token.to_string()))?;

        Ok(self.push(Node::Leaf(value)))
    }
}
