//! This module provides the species node of a derived network

use indexmap::IndexSet;

/// Ids of the entities consuming or producing a species, kept per entity kind
///
/// Filled by the network calculations, which join reactions (or catalysts)
/// through the species they share.
#[derive(Debug, Clone, Default)]
pub(crate) struct EntityTags {
    /// Reaction ids
    pub(crate) reactions: IndexSet<String>,
    /// Gene ids
    pub(crate) genes: IndexSet<String>,
    /// Gene complex ids
    pub(crate) complexes: IndexSet<String>,
}

impl EntityTags {
    pub(crate) fn clear(&mut self) {
        self.reactions.clear();
        self.genes.clear();
        self.complexes.clear();
    }
}

/// Represents a species of the derived network
#[derive(Debug, Clone)]
pub struct Species {
    /// Used to identify the species
    pub id: String,
    /// Human readable name of the species
    pub name: String,
    /// Reactions this species takes part in, one entry per participation
    pub occurrence: Vec<String>,
    /// Entities consuming this species
    pub(crate) consumption: EntityTags,
    /// Entities producing this species
    pub(crate) production: EntityTags,
}

impl Species {
    pub fn new(id: String, name: String) -> Species {
        Species {
            id,
            name,
            occurrence: Vec::new(),
            consumption: EntityTags::default(),
            production: EntityTags::default(),
        }
    }
}
