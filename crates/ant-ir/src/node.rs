//! Program tree for ant genomes.

use serde::{Deserialize, Serialize};
use std::convert::Infallible;

/// The kinds of node an ant program is built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    Move,
    Left,
    Right,
    IfFoodAhead,
    Seq2,
    Seq3,
}

impl NodeKind {
    pub const ALL: [NodeKind; 6] = [
        NodeKind::Move,
        NodeKind::Left,
        NodeKind::Right,
        NodeKind::IfFoodAhead,
        NodeKind::Seq2,
        NodeKind::Seq3,
    ];

    /// Number of children a node of this kind owns
    pub fn arity(&self) -> usize {
        match self {
            NodeKind::Move | NodeKind::Left | NodeKind::Right => 0,
            NodeKind::IfFoodAhead | NodeKind::Seq2 => 2,
            NodeKind::Seq3 => 3,
        }
    }

    /// Canonical token used in the textual notations
    pub fn token(&self) -> &'static str {
        match self {
            NodeKind::Move => "m",
            NodeKind::Left => "l",
            NodeKind::Right => "r",
            NodeKind::IfFoodAhead => "if",
            NodeKind::Seq2 => "p2",
            NodeKind::Seq3 => "p3",
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.arity() == 0
    }
}

/// A node of an ant program. Branch nodes own their children.
///
/// Children are stored as boxed fixed-size arrays, so a branch can never hold
/// more or fewer children than its kind declares.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Node {
    Move,
    Left,
    Right,
    /// `[then, else]`
    IfFoodAhead(Box<[Node; 2]>),
    Seq2(Box<[Node; 2]>),
    Seq3(Box<[Node; 3]>),
}

impl Node {
    pub fn if_food_ahead(then: Node, otherwise: Node) -> Self {
        Node::IfFoodAhead(Box::new([then, otherwise]))
    }

    pub fn seq2(first: Node, second: Node) -> Self {
        Node::Seq2(Box::new([first, second]))
    }

    pub fn seq3(first: Node, second: Node, third: Node) -> Self {
        Node::Seq3(Box::new([first, second, third]))
    }

    /// Build a node of `kind`, asking `next_child` for each child in order.
    ///
    /// Stops at the first child that fails.
    pub fn try_build<E>(
        kind: NodeKind,
        mut next_child: impl FnMut() -> Result<Node, E>,
    ) -> Result<Node, E> {
        Ok(match kind {
            NodeKind::Move => Node::Move,
            NodeKind::Left => Node::Left,
            NodeKind::Right => Node::Right,
            NodeKind::IfFoodAhead => {
                let then = next_child()?;
                let otherwise = next_child()?;
                Node::if_food_ahead(then, otherwise)
            }
            NodeKind::Seq2 => {
                let first = next_child()?;
                let second = next_child()?;
                Node::seq2(first, second)
            }
            NodeKind::Seq3 => {
                let first = next_child()?;
                let second = next_child()?;
                let third = next_child()?;
                Node::seq3(first, second, third)
            }
        })
    }

    /// Infallible form of [`Node::try_build`]
    pub fn build(kind: NodeKind, mut next_child: impl FnMut() -> Node) -> Node {
        match Self::try_build(kind, || Ok::<Node, Infallible>(next_child())) {
            Ok(node) => node,
            Err(never) => match never {},
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Move => NodeKind::Move,
            Node::Left => NodeKind::Left,
            Node::Right => NodeKind::Right,
            Node::IfFoodAhead(_) => NodeKind::IfFoodAhead,
            Node::Seq2(_) => NodeKind::Seq2,
            Node::Seq3(_) => NodeKind::Seq3,
        }
    }

    pub fn token(&self) -> &'static str {
        self.kind().token()
    }

    pub fn is_terminal(&self) -> bool {
        self.kind().is_terminal()
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Move | Node::Left | Node::Right => &[],
            Node::IfFoodAhead(children) | Node::Seq2(children) => children.as_slice(),
            Node::Seq3(children) => children.as_slice(),
        }
    }

    pub fn children_mut(&mut self) -> &mut [Node] {
        match self {
            Node::Move | Node::Left | Node::Right => &mut [],
            Node::IfFoodAhead(children) | Node::Seq2(children) => children.as_mut_slice(),
            Node::Seq3(children) => children.as_mut_slice(),
        }
    }

    /// Total number of nodes in this tree
    pub fn node_count(&self) -> usize {
        1 + self.children().iter().map(Node::node_count).sum::<usize>()
    }

    /// Number of edges on the longest root-to-leaf path (a leaf has height 0)
    pub fn height(&self) -> usize {
        self.children()
            .iter()
            .map(|child| child.height() + 1)
            .max()
            .unwrap_or(0)
    }

    /// Pre-order walk: a node comes before its children, children left to right
    pub fn iter(&self) -> PreOrder<'_> {
        PreOrder { stack: vec![self] }
    }

    /// Node kinds in pre-order
    pub fn kinds(&self) -> Vec<NodeKind> {
        self.iter().map(Node::kind).collect()
    }

    /// Subtree rooted at pre-order position `index` (0 is the root)
    pub fn subtree(&self, index: usize) -> Option<&Node> {
        if index == 0 {
            return Some(self);
        }
        let mut offset = index - 1;
        for child in self.children() {
            let size = child.node_count();
            if offset < size {
                return child.subtree(offset);
            }
            offset -= size;
        }
        None
    }

    /// Mutable subtree rooted at pre-order position `index` (0 is the root)
    pub fn subtree_mut(&mut self, index: usize) -> Option<&mut Node> {
        if index == 0 {
            return Some(self);
        }
        let mut offset = index - 1;
        for child in self.children_mut() {
            let size = child.node_count();
            if offset < size {
                return child.subtree_mut(offset);
            }
            offset -= size;
        }
        None
    }

    /// Replace the subtree at `index`, returning the old one
    pub fn replace_subtree(&mut self, index: usize, replacement: Node) -> Option<Node> {
        self.subtree_mut(index)
            .map(|slot| std::mem::replace(slot, replacement))
    }

    /// Serialize the tree to bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>, ant_core::Error> {
        Ok(bincode::serialize(self)?)
    }

    /// Deserialize a tree from bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ant_core::Error> {
        Ok(bincode::deserialize(bytes)?)
    }
}

/// Pre-order iterator over the nodes of a tree
pub struct PreOrder<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().iter().rev());
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> Node {
        // if( m , p2( r , l ) )
        Node::if_food_ahead(Node::Move, Node::seq2(Node::Right, Node::Left))
    }

    #[test]
    fn test_arity_matches_children() {
        for kind in NodeKind::ALL {
            let node = Node::build(kind, || Node::Move);
            assert_eq!(node.kind(), kind);
            assert_eq!(node.children().len(), kind.arity());
        }
    }

    #[test]
    fn test_node_count_and_height() {
        let tree = sample_tree();
        assert_eq!(tree.node_count(), 5);
        assert_eq!(tree.height(), 2);
        assert_eq!(Node::Move.node_count(), 1);
        assert_eq!(Node::Move.height(), 0);
    }

    #[test]
    fn test_pre_order_walk() {
        let tree = sample_tree();
        assert_eq!(
            tree.kinds(),
            vec![
                NodeKind::IfFoodAhead,
                NodeKind::Move,
                NodeKind::Seq2,
                NodeKind::Right,
                NodeKind::Left,
            ]
        );
    }

    #[test]
    fn test_subtree_indexing_follows_pre_order() {
        let tree = sample_tree();
        for (index, node) in tree.iter().enumerate() {
            assert_eq!(tree.subtree(index), Some(node));
        }
        assert!(tree.subtree(5).is_none());
    }

    #[test]
    fn test_replace_subtree() {
        let mut tree = sample_tree();
        let old = tree.replace_subtree(2, Node::Move).unwrap();
        assert_eq!(old, Node::seq2(Node::Right, Node::Left));
        assert_eq!(tree, Node::if_food_ahead(Node::Move, Node::Move));
        assert!(tree.replace_subtree(7, Node::Left).is_none());
    }

    #[test]
    fn test_try_build_stops_on_error() {
        let mut calls = 0;
        let result: Result<Node, &str> = Node::try_build(NodeKind::Seq3, || {
            calls += 1;
            if calls == 2 {
                Err("out of children")
            } else {
                Ok(Node::Move)
            }
        });
        assert_eq!(result, Err("out of children"));
        assert_eq!(calls, 2);
    }

    #[test]
    fn test_tree_bytes() {
        let tree = sample_tree();
        let bytes = tree.to_bytes().unwrap();
        assert_eq!(Node::from_bytes(&bytes).unwrap(), tree);
        assert!(matches!(
            Node::from_bytes(&[0xff, 0xff]),
            Err(ant_core::Error::Serialization(_))
        ));
        assert!(matches!(
            Node::from_bytes(&bytes[..bytes.len() - 1]),
            Err(ant_core::Error::Serialization(_))
        ));
    }
}
