//! Program representation for artificial ants.
//!
//! An ant program is a tree of six node kinds. This crate holds:
//! - the tree itself and its traversal utilities
//! - the postfix (RPN), prefix (PN) and readable notations
//! - random tree generation within height bounds
//! - subtree crossover
//! - the interpreter that drives anything implementing [`AntActions`]

pub mod node;
pub mod notation;
pub mod generator;
pub mod crossover;
pub mod interpreter;

pub use node::{Node, NodeKind, PreOrder};
pub use notation::{TokenTable, to_pn, to_rpn};
pub use generator::Generator;
pub use crossover::crossover;
pub use interpreter::{execute, AntActions};
