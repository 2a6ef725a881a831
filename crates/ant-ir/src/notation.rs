//! Textual notations for ant programs.
//!
//! - RPN (postfix): the root token comes last. A branch writes its children
//!   accumulated right-to-left, so its first child sits directly before it:
//!   `if( m , l )` is written `l m if`.
//! - PN (prefix): the root token comes first, children follow in order:
//!   `if( m , l )` is written `if m l`.
//! - `Display`: the readable `if( m , l )` form.

use crate::node::{Node, NodeKind};
use ant_core::{Error, Result};
use std::collections::HashMap;
use std::fmt;

/// Write a tree in postfix notation
pub fn to_rpn(node: &Node) -> String {
    let mut out = String::new();
    write_rpn(node, &mut out);
    out
}

fn write_rpn(node: &Node, out: &mut String) {
    for child in node.children().iter().rev() {
        write_rpn(child, out);
        out.push(' ');
    }
    out.push_str(node.token());
}

/// Write a tree in prefix notation
pub fn to_pn(node: &Node) -> String {
    let mut out = String::new();
    write_pn(node, &mut out);
    out
}

fn write_pn(node: &Node, out: &mut String) {
    out.push_str(node.token());
    for child in node.children() {
        out.push(' ');
        write_pn(child, out);
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())?;
        let children = self.children();
        if children.is_empty() {
            return Ok(());
        }
        f.write_str("( ")?;
        for (i, child) in children.iter().enumerate() {
            if i > 0 {
                f.write_str(" , ")?;
            }
            write!(f, "{}", child)?;
        }
        f.write_str(" )")
    }
}

/// Token to node-kind lookup used by the parsers.
///
/// Build it once and pass it to every parse call.
#[derive(Debug, Clone)]
pub struct TokenTable {
    kinds: HashMap<&'static str, NodeKind>,
}

impl TokenTable {
    pub fn new() -> Self {
        Self::with_kinds(&NodeKind::ALL)
    }

    /// A table that only knows the given kinds
    pub fn with_kinds(kinds: &[NodeKind]) -> Self {
        Self {
            kinds: kinds.iter().map(|kind| (kind.token(), *kind)).collect(),
        }
    }

    pub fn lookup(&self, token: &str) -> Result<NodeKind> {
        self.kinds
            .get(token)
            .copied()
            .ok_or_else(|| Error::UnknownToken(token.to_string()))
    }

    /// Parse postfix notation, consuming tokens back to front
    pub fn parse_rpn(&self, text: &str) -> Result<Node> {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        if tokens.is_empty() {
            return Err(Error::MalformedProgram("empty program".to_string()));
        }

        let mut remaining = tokens.len();
        let root = self.parse_backward(&tokens, &mut remaining)?;
        if remaining > 0 {
            return Err(Error::MalformedProgram(format!(
                "{} unused token(s) before the root, starting with >>{}<<",
                remaining, tokens[0]
            )));
        }
        Ok(root)
    }

    fn parse_backward(&self, tokens: &[&str], remaining: &mut usize) -> Result<Node> {
        if *remaining == 0 {
            return Err(Error::MalformedProgram(
                "ran out of tokens while reading children".to_string(),
            ));
        }
        *remaining -= 1;
        let kind = self.lookup(tokens[*remaining])?;
        Node::try_build(kind, || self.parse_backward(tokens, remaining))
    }

    /// Parse prefix notation, consuming tokens front to back
    pub fn parse_pn(&self, text: &str) -> Result<Node> {
        let mut tokens = text.split_whitespace().peekable();
        if tokens.peek().is_none() {
            return Err(Error::MalformedProgram("empty program".to_string()));
        }

        let root = self.parse_forward(&mut tokens)?;
        let unused = tokens.count();
        if unused > 0 {
            return Err(Error::MalformedProgram(format!(
                "{} unused token(s) after the root",
                unused
            )));
        }
        Ok(root)
    }

    fn parse_forward<'a>(&self, tokens: &mut impl Iterator<Item = &'a str>) -> Result<Node> {
        let token = tokens.next().ok_or_else(|| {
            Error::MalformedProgram("ran out of tokens while reading children".to_string())
        })?;
        let kind = self.lookup(token)?;
        Node::try_build(kind, || self.parse_forward(&mut *tokens))
    }
}

impl Default for TokenTable {
    fn default() -> Self {
        Self::new()
    }
}
