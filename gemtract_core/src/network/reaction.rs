//! This module provides the reaction node of a derived network

use indexmap::IndexSet;

/// Represents a reaction of the derived network
#[derive(Debug, Clone)]
pub struct Reaction {
    /// Used to identify the reaction
    pub id: String,
    /// Human readable name of the reaction
    pub name: String,
    /// Whether the reaction may also run backwards
    pub reversible: bool,
    /// Species consumed by the reaction
    pub consumed: IndexSet<String>,
    /// Species produced by the reaction
    pub produced: IndexSet<String>,
    /// Single gene catalysts of the reaction
    pub genes: Vec<String>,
    /// Gene complex catalysts of the reaction
    pub gene_complexes: Vec<String>,
    /// Reactions producing a species this reaction consumes
    ///
    /// Filled by the reaction-centric network calculation.
    pub links: IndexSet<String>,
}

impl Reaction {
    pub fn new(id: String, name: String, reversible: bool) -> Reaction {
        Reaction {
            id,
            name,
            reversible,
            consumed: IndexSet::new(),
            produced: IndexSet::new(),
            genes: Vec::new(),
            gene_complexes: Vec::new(),
            links: IndexSet::new(),
        }
    }
}
