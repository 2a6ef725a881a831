//! Random program generation within height bounds.

use crate::node::{Node, NodeKind};
use ant_core::{Error, GeneratorConfig, Result};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

/// Grows random, well-formed trees.
///
/// The root is always a branch. A node at depth `d` is drawn from the branch
/// kinds while `d < min_height`, from every kind while `d < max_height`, and
/// from the leaf kinds once `d == max_height`.
#[derive(Debug, Clone)]
pub struct Generator {
    min_height: u32,
    max_height: u32,
    terminals: Vec<NodeKind>,
    non_terminals: Vec<NodeKind>,
    all: Vec<NodeKind>,
}

impl Generator {
    pub fn new(config: &GeneratorConfig) -> Result<Self> {
        Self::with_kinds(config, &NodeKind::ALL)
    }

    /// A generator restricted to `kinds`
    pub fn with_kinds(config: &GeneratorConfig, kinds: &[NodeKind]) -> Result<Self> {
        config.validate()?;

        let (terminals, non_terminals): (Vec<NodeKind>, Vec<NodeKind>) =
            kinds.iter().partition(|kind| kind.is_terminal());

        if terminals.is_empty() {
            return Err(Error::EmptyPopulation(
                "no terminal node kinds defined".to_string(),
            ));
        }
        if non_terminals.is_empty() {
            return Err(Error::EmptyPopulation(
                "no non-terminal node kinds defined".to_string(),
            ));
        }

        Ok(Self {
            min_height: config.min_height,
            max_height: config.max_height,
            terminals,
            non_terminals,
            all: kinds.to_vec(),
        })
    }

    pub fn min_height(&self) -> u32 {
        self.min_height
    }

    pub fn max_height(&self) -> u32 {
        self.max_height
    }

    /// Generate one random tree
    pub fn generate(&self, rng: &mut ChaCha8Rng) -> Node {
        let root = pick(&self.non_terminals, rng);
        Node::build(root, || self.grow(1, rng))
    }

    fn grow(&self, depth: u32, rng: &mut ChaCha8Rng) -> Node {
        let kind = if depth >= self.max_height {
            pick(&self.terminals, rng)
        } else if depth < self.min_height {
            pick(&self.non_terminals, rng)
        } else {
            pick(&self.all, rng)
        };
        Node::build(kind, || self.grow(depth + 1, rng))
    }
}

fn pick(kinds: &[NodeKind], rng: &mut ChaCha8Rng) -> NodeKind {
    kinds[rng.gen_range(0..kinds.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::{any, prop_assert, proptest};
    use rand::SeedableRng;

    fn config(min_height: u32, max_height: u32) -> GeneratorConfig {
        GeneratorConfig {
            min_height,
            max_height,
        }
    }

    #[test]
    fn test_root_is_branch() {
        let generator = Generator::new(&config(1, 1)).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        for _ in 0..50 {
            let tree = generator.generate(&mut rng);
            assert!(!tree.is_terminal());
            // max_height 1: every child is a leaf
            assert!(tree.children().iter().all(Node::is_terminal));
            assert_eq!(tree.height(), 1);
        }
    }

    #[test]
    fn test_same_seed_same_tree() {
        let generator = Generator::new(&GeneratorConfig::default()).unwrap();
        let mut rng_a = ChaCha8Rng::seed_from_u64(7);
        let mut rng_b = ChaCha8Rng::seed_from_u64(7);

        for _ in 0..20 {
            assert_eq!(generator.generate(&mut rng_a), generator.generate(&mut rng_b));
        }
    }

    #[test]
    fn test_missing_kinds_rejected() {
        let err = Generator::with_kinds(&config(2, 4), &[NodeKind::Move, NodeKind::Left])
            .unwrap_err();
        assert!(matches!(err, Error::EmptyPopulation(_)));

        let err = Generator::with_kinds(&config(2, 4), &[NodeKind::Seq2, NodeKind::Seq3])
            .unwrap_err();
        assert!(matches!(err, Error::EmptyPopulation(_)));
    }

    #[test]
    fn test_invalid_heights_rejected() {
        assert!(matches!(
            Generator::new(&config(5, 2)),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            Generator::new(&config(0, 0)),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_restricted_kinds_only() {
        let kinds = [NodeKind::Move, NodeKind::Right, NodeKind::Seq2];
        let generator = Generator::with_kinds(&config(2, 4), &kinds).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        for _ in 0..20 {
            let tree = generator.generate(&mut rng);
            assert!(tree.iter().all(|node| kinds.contains(&node.kind())));
        }
    }

    proptest! {
        #[test]
        fn prop_height_within_bounds(seed in any::<u64>(), min in 0u32..5, extra in 0u32..3) {
            let max = (min + extra).max(1);
            let generator = Generator::new(&config(min, max)).unwrap();
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let tree = generator.generate(&mut rng);

            let height = tree.height() as u32;
            prop_assert!(height >= min.max(1));
            prop_assert!(height <= max);
        }
    }
}
