//! The conjunction tree submitted as one transaction.
//!
//! Conjunction is associative and commutative at the semantic level; the tree
//! shape only fixes a deterministic serialization order.

use schemagraph_dsl::Declaration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaTree {
    Declare(Declaration),
    And(Vec<SchemaTree>),
}

impl SchemaTree {
    /// The empty conjunction (trivially true).
    pub fn empty() -> Self {
        SchemaTree::And(Vec::new())
    }

    pub fn leaf(declaration: impl Into<Declaration>) -> Self {
        SchemaTree::Declare(declaration.into())
    }

    /// Conjoin `other` onto the right of this tree.
    ///
    /// An existing conjunction node is extended rather than nested, so a left
    /// fold over leaves yields one flat conjunction in input order.
    #[must_use]
    pub fn and(self, other: SchemaTree) -> SchemaTree {
        match self {
            SchemaTree::And(mut children) => {
                children.push(other);
                SchemaTree::And(children)
            }
            leaf @ SchemaTree::Declare(_) => SchemaTree::And(vec![leaf, other]),
        }
    }

    /// Left-to-right fold of `trees` with [`SchemaTree::and`]. A single tree is
    /// returned unwrapped; no trees yields [`SchemaTree::empty`].
    pub fn conjoin_all(trees: impl IntoIterator<Item = SchemaTree>) -> SchemaTree {
        trees
            .into_iter()
            .fold(None, |acc: Option<SchemaTree>, tree| {
                Some(match acc {
                    None => tree,
                    Some(acc) => acc.and(tree),
                })
            })
            .unwrap_or_else(SchemaTree::empty)
    }

    /// Declarations in depth-first, left-to-right order.
    pub fn leaves(&self) -> Vec<&Declaration> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a Declaration>) {
        match self {
            SchemaTree::Declare(d) => out.push(d),
            SchemaTree::And(children) => {
                for child in children {
                    child.collect_leaves(out);
                }
            }
        }
    }

    pub fn leaf_count(&self) -> usize {
        match self {
            SchemaTree::Declare(_) => 1,
            SchemaTree::And(children) => children.iter().map(SchemaTree::leaf_count).sum(),
        }
    }

    /// Number of conjunction levels above the deepest leaf.
    pub fn depth(&self) -> usize {
        match self {
            SchemaTree::Declare(_) => 0,
            SchemaTree::And(children) => {
                1 + children.iter().map(SchemaTree::depth).max().unwrap_or(0)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schemagraph_dsl::make_class;

    fn class(id: &str) -> SchemaTree {
        SchemaTree::leaf(make_class(id, id, "").unwrap())
    }

    #[test]
    fn fold_is_flat_and_ordered() {
        let tree = SchemaTree::conjoin_all(vec![class("A"), class("B"), class("C")]);
        assert_eq!(tree.depth(), 1);
        let ids: Vec<&str> = tree.leaves().into_iter().map(|d| d.identifier()).collect();
        assert_eq!(ids, ["A", "B", "C"]);
    }

    #[test]
    fn single_tree_is_not_wrapped() {
        let tree = SchemaTree::conjoin_all(vec![class("A")]);
        assert!(matches!(tree, SchemaTree::Declare(_)));
    }

    #[test]
    fn empty_fold_is_the_empty_conjunction() {
        let tree = SchemaTree::conjoin_all(Vec::new());
        assert_eq!(tree, SchemaTree::empty());
        assert_eq!(tree.leaf_count(), 0);
    }

    #[test]
    fn nested_groups_keep_their_shape() {
        let group = SchemaTree::And(vec![class("A"), class("B")]);
        let tree = SchemaTree::And(vec![group, class("C")]);
        assert_eq!(tree.depth(), 2);
        assert_eq!(tree.leaf_count(), 3);
    }
}
