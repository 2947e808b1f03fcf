//! This module provides the Gene struct, an enzyme node of a derived network

use std::fmt::{Display, Formatter};

use indexmap::IndexSet;

/// Represents a gene of the derived network
#[derive(Debug, Clone)]
pub struct Gene {
    /// Used to identify the gene
    pub id: String,
    /// Reactions catalyzed by this gene on its own
    pub reactions: Vec<String>,
    /// Gene targets this gene links to
    ///
    /// Filled by the enzyme-centric network calculation.
    pub gene_links: IndexSet<String>,
    /// Gene complex targets this gene links to
    pub complex_links: IndexSet<String>,
}

impl Gene {
    pub fn new(id: String) -> Gene {
        Gene {
            id,
            reactions: Vec::new(),
            gene_links: IndexSet::new(),
            complex_links: IndexSet::new(),
        }
    }
}

impl Display for Gene {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id)
    }
}
