// Copyright 2025 Cowboy AI, LLC.

//! Explanation and metadata trees
//!
//! Both trees are assembled the same way: a node's own set is the ordered,
//! deduplicated union of its causes' sets (or the combinator's substitute),
//! and its underlying nodes are the causes' nodes. A cause whose set is
//! identical to the parent's is skipped and its own underlying nodes are
//! spliced in instead, so forwarding operators such as NOT do not add a
//! level that repeats the parent.

use std::cmp::Ordering;
use std::hash::Hash;
use std::sync::Arc;

use indexmap::IndexSet;
use serde::Serialize;

use super::{BooleanResult, ResultKind};
use crate::humanize;
use crate::metadata::Metadata;

/// Human-readable assertions and the explanations beneath them
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Explanation {
    assertions: IndexSet<String>,
    underlying: Vec<Arc<Explanation>>,
}

impl Explanation {
    /// Assertions at this level, deduplicated in first-seen order
    pub fn assertions(&self) -> &IndexSet<String> {
        &self.assertions
    }

    /// Assertions at this level joined as prose
    pub fn summary(&self) -> String {
        humanize::join_and(&self.assertions)
    }

    /// Explanations of the causes at this level
    pub fn underlying(&self) -> impl Iterator<Item = &Explanation> + '_ {
        self.underlying.iter().map(Arc::as_ref)
    }

    /// Number of levels in this tree, counting this one
    pub fn depth(&self) -> usize {
        1 + self
            .underlying
            .iter()
            .map(|node| node.depth())
            .max()
            .unwrap_or(0)
    }
}

/// Metadata values and the metadata nodes beneath them
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetadataNode<T: Metadata> {
    metadata: IndexSet<T>,
    underlying: Vec<Arc<MetadataNode<T>>>,
}

impl<T: Metadata> MetadataNode<T> {
    /// Metadata at this level, deduplicated in first-seen order
    pub fn metadata(&self) -> &IndexSet<T> {
        &self.metadata
    }

    /// Metadata nodes of the causes at this level
    pub fn underlying(&self) -> impl Iterator<Item = &MetadataNode<T>> + '_ {
        self.underlying.iter().map(Arc::as_ref)
    }

    /// Every metadata value in this tree, depth first, deduplicated
    pub fn flatten(&self) -> IndexSet<T> {
        let mut values = self.metadata.clone();
        for node in &self.underlying {
            values.extend(node.flatten());
        }
        values
    }
}

trait TreeNode {
    type Item: Clone + Eq + Hash;

    fn items(&self) -> &IndexSet<Self::Item>;
    fn children(&self) -> &[Arc<Self>];
}

impl TreeNode for Explanation {
    type Item = String;

    fn items(&self) -> &IndexSet<String> {
        &self.assertions
    }

    fn children(&self) -> &[Arc<Self>] {
        &self.underlying
    }
}

impl<T: Metadata> TreeNode for MetadataNode<T> {
    type Item = T;

    fn items(&self) -> &IndexSet<T> {
        &self.metadata
    }

    fn children(&self) -> &[Arc<Self>] {
        &self.underlying
    }
}

fn union<N: TreeNode>(causes: &[Arc<N>]) -> IndexSet<N::Item> {
    causes
        .iter()
        .flat_map(|cause| cause.items().iter().cloned())
        .collect()
}

fn resolve_underlying<N: TreeNode>(own: &IndexSet<N::Item>, causes: Vec<Arc<N>>) -> Vec<Arc<N>> {
    let mut underlying = Vec::with_capacity(causes.len());
    for cause in causes {
        if cause.items() == own {
            underlying.extend(cause.children().iter().cloned());
        } else {
            underlying.push(cause);
        }
    }
    underlying
}

/// Assertion used when a composite has no causes to draw from
fn vacuous_assertion<T: Metadata>(result: &BooleanResult<T>) -> IndexSet<String> {
    IndexSet::from([result.reason().to_string()])
}

pub(super) fn build_explanation<T: Metadata>(result: &BooleanResult<T>) -> Explanation {
    if let ResultKind::Leaf { assertion, .. } = result.kind() {
        return Explanation {
            assertions: IndexSet::from([assertion.clone()]),
            underlying: Vec::new(),
        };
    }

    let causes: Vec<Arc<Explanation>> = result
        .causes()
        .iter()
        .map(|cause| Arc::clone(cause.explanation_arc_ref()))
        .collect();

    let assertions = match result.kind().metadata_override() {
        Some(substitute) => substitute.assertions().clone(),
        None if causes.is_empty() => vacuous_assertion(result),
        None => union(&causes),
    };
    let underlying = resolve_underlying(&assertions, causes);

    Explanation {
        assertions,
        underlying,
    }
}

pub(super) fn build_metadata_tree<T: Metadata>(result: &BooleanResult<T>) -> MetadataNode<T> {
    if let ResultKind::Leaf { metadata, .. } = result.kind() {
        return MetadataNode {
            metadata: IndexSet::from([metadata.clone()]),
            underlying: Vec::new(),
        };
    }

    let causes: Vec<Arc<MetadataNode<T>>> = result
        .causes()
        .iter()
        .map(|cause| Arc::clone(cause.metadata_tree_arc_ref()))
        .collect();

    let mut metadata = match result.kind().metadata_override() {
        Some(substitute) => substitute.metadata().clone(),
        None => union(&causes),
    };
    // Stable, so unordered types keep first-seen order.
    metadata.sort_by(|a, b| a.natural_order(b).unwrap_or(Ordering::Equal));
    let underlying = resolve_underlying(&metadata, causes);

    MetadataNode {
        metadata,
        underlying,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combinators::binary;

    fn leaf(satisfied: bool, text: &str) -> BooleanResult {
        BooleanResult::leaf(satisfied, text, text.to_string())
    }

    #[test]
    fn test_composite_unions_cause_assertions_in_order() {
        let result = binary::and(leaf(false, "b"), leaf(false, "a"));
        let assertions: Vec<_> = result.assertions().iter().cloned().collect();
        assert_eq!(assertions, vec!["b".to_string(), "a".to_string()]);
        assert_eq!(result.explanation().underlying().count(), 2);
        assert_eq!(result.explanation().depth(), 2);
    }

    #[test]
    fn test_duplicate_assertions_are_merged() {
        let result = binary::or(leaf(true, "valid"), leaf(true, "valid"));
        assert_eq!(result.assertions().len(), 1);
        assert_eq!(result.metadata().len(), 1);
        assert_eq!(result.underlying().len(), 2);
        assert_eq!(result.causes().len(), 2);
    }

    #[test]
    fn test_forwarding_operator_does_not_telescope() {
        let operand = binary::and(leaf(true, "a"), leaf(true, "b"));
        let negated = binary::not(operand.clone());

        assert_eq!(negated.assertions(), operand.assertions());
        // NOT forwards its operand's explanation, so the operand's children
        // appear directly beneath it.
        let children: Vec<_> = negated.explanation().underlying().collect();
        assert_eq!(children.len(), 2);
        assert!(children[0].assertions().contains("a"));
        assert!(children[1].assertions().contains("b"));
        assert_eq!(negated.explanation().depth(), 2);
    }

    #[test]
    fn test_metadata_tree_mirrors_explanation() {
        let result = binary::and(leaf(false, "too young"), leaf(false, "no licence"));
        let tree = result.metadata_tree();
        assert_eq!(tree.metadata().len(), 2);
        assert_eq!(tree.underlying().count(), 2);
        assert_eq!(tree.flatten().len(), 2);
    }

    #[test]
    fn test_ordered_metadata_is_sorted() {
        let result = binary::and(
            BooleanResult::leaf(false, "!high", 30),
            binary::and(
                BooleanResult::leaf(false, "!mid", 20),
                BooleanResult::leaf(false, "!low", 10),
            ),
        );
        let metadata: Vec<i32> = result.metadata().iter().copied().collect();
        assert_eq!(metadata, vec![10, 20, 30]);

        // assertions keep first-seen order
        let assertions: Vec<_> = result.assertions().iter().cloned().collect();
        assert_eq!(assertions, vec!["!high", "!mid", "!low"]);
    }

    #[test]
    fn test_unordered_metadata_keeps_first_seen_order() {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        enum Reason {
            Late,
            Early,
        }
        impl Metadata for Reason {}

        let result = binary::or(
            BooleanResult::leaf(false, "!on time", Reason::Late),
            BooleanResult::leaf(false, "!waited", Reason::Early),
        );
        let metadata: Vec<_> = result.metadata().iter().cloned().collect();
        assert_eq!(metadata, vec![Reason::Late, Reason::Early]);
    }

    #[test]
    fn test_explanation_serializes() {
        let result = binary::xor(leaf(true, "a"), leaf(false, "!b"));
        let json = serde_json::to_value(result.explanation()).unwrap();
        assert_eq!(json["assertions"][0], "a");
        assert_eq!(json["assertions"][1], "!b");
        assert_eq!(json["underlying"].as_array().unwrap().len(), 2);
        assert_eq!(result.explanation().summary(), "a and !b");
    }
}
