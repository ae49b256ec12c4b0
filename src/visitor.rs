// Copyright 2025 Cowboy AI, LLC.

//! Flattening of result trees
//!
//! A [`MetadataVisitor`] walks the causes of a [`BooleanResult`] and collects
//! the metadata or assertions found there. The [`VisitPolicy`] decides
//! whether substitute metadata recorded by a quantifier or a summary stops
//! the walk.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::metadata::Metadata;
use crate::result::{BooleanResult, ResultKind};

/// How a visitor treats substitute metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisitPolicy {
    /// Return the substitute when one was recorded, otherwise recurse
    #[default]
    Summary,
    /// Ignore substitutes and always recurse to the leaves
    Deep,
}

/// Collects metadata and assertions from the causes of a result
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetadataVisitor {
    policy: VisitPolicy,
}

impl MetadataVisitor {
    /// Visitor with the given policy
    pub fn new(policy: VisitPolicy) -> Self {
        Self { policy }
    }

    /// Visitor that always drills to the leaves
    pub fn deep() -> Self {
        Self::new(VisitPolicy::Deep)
    }

    /// The traversal policy
    pub fn policy(&self) -> VisitPolicy {
        self.policy
    }

    /// Metadata items, deduplicated in first-seen order
    pub fn metadata<T: Metadata>(&self, result: &BooleanResult<T>) -> Vec<T> {
        let mut found = Found::default();
        self.visit(result, &mut found);
        found.metadata.into_iter().collect()
    }

    /// Assertions, deduplicated in first-seen order
    pub fn assertions<T: Metadata>(&self, result: &BooleanResult<T>) -> Vec<String> {
        let mut found = Found::default();
        self.visit(result, &mut found);
        found.assertions.into_iter().collect()
    }

    fn visit<T: Metadata>(&self, result: &BooleanResult<T>, found: &mut Found<T>) {
        match result.kind() {
            ResultKind::Leaf {
                assertion,
                metadata,
            } => {
                found.assertions.insert(assertion.clone());
                found.metadata.insert(metadata.clone());
            }
            kind => match kind.metadata_override() {
                Some(substitute) if self.policy == VisitPolicy::Summary => {
                    found.assertions.extend(substitute.assertions().iter().cloned());
                    found.metadata.extend(substitute.metadata().iter().cloned());
                }
                _ => {
                    for cause in result.causes() {
                        self.visit(cause, found);
                    }
                }
            },
        }
    }
}

struct Found<T: Metadata> {
    assertions: IndexSet<String>,
    metadata: IndexSet<T>,
}

impl<T: Metadata> Default for Found<T> {
    fn default() -> Self {
        Self {
            assertions: IndexSet::new(),
            metadata: IndexSet::new(),
        }
    }
}
