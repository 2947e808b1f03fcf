//! This module provides gene complexes and the catalysts built from them
//!
//! While a gene association is unfolded, each alternative collects its genes
//! in a [`ComplexBuilder`]. Sealing a builder yields a [`Catalyst`], either a
//! single gene or a gene complex with a canonical id. The [`GeneComplex`]
//! struct is the corresponding node of the enzyme-centric network.

use std::fmt::{Display, Formatter};

use indexmap::IndexSet;

/// Prefix of catalysts that stand in for reactions without annotated genes
pub const PLACEHOLDER_PREFIX: &str = "reaction_";

/// Collects the genes of one alternative of an unfolded gene association
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComplexBuilder {
    genes: IndexSet<String>,
}

impl ComplexBuilder {
    pub fn new() -> ComplexBuilder {
        ComplexBuilder {
            genes: IndexSet::new(),
        }
    }

    /// Create a builder already holding a single gene
    pub fn with_gene(gene: &str) -> ComplexBuilder {
        let mut builder = ComplexBuilder::new();
        builder.add_gene(gene);
        builder
    }

    pub fn add_gene(&mut self, gene: &str) {
        self.genes.insert(gene.to_string());
    }

    /// Union the genes of another builder into this one
    pub fn merge(&mut self, other: &ComplexBuilder) {
        for gene in &other.genes {
            self.genes.insert(gene.clone());
        }
    }

    pub fn genes(&self) -> &IndexSet<String> {
        &self.genes
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Finish the builder into a [`Catalyst`]
    ///
    /// A single gene becomes a gene catalyst. Two or more genes become a
    /// complex whose id joins the member genes sorted alphabetically, so the
    /// id does not depend on the order in which the genes were encountered.
    /// An empty builder seals to `None`.
    pub fn seal(self) -> Option<Catalyst> {
        let mut members: Vec<String> = self.genes.into_iter().collect();
        match members.len() {
            0 => None,
            1 => Some(Catalyst::Gene(members.remove(0))),
            _ => {
                members.sort();
                let id = members.join(" + ");
                Some(Catalyst::Complex {
                    id,
                    genes: members.into_iter().collect(),
                })
            }
        }
    }
}

/// A catalyst of a reaction, either a single gene or a complex of genes
///
/// The complex id is computed once when the builder is sealed and treated as
/// opaque afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Catalyst {
    Gene(String),
    Complex { id: String, genes: IndexSet<String> },
}

impl Catalyst {
    /// Placeholder catalyst standing in for a reaction without annotated genes
    pub fn placeholder(reaction_id: &str) -> Catalyst {
        Catalyst::Gene(format!("{}{}", PLACEHOLDER_PREFIX, reaction_id))
    }

    /// Whether this catalyst stands in for a reaction without annotated genes
    pub fn is_placeholder(&self) -> bool {
        self.id().starts_with(PLACEHOLDER_PREFIX)
    }

    pub fn id(&self) -> &str {
        match self {
            Catalyst::Gene(id) => id,
            Catalyst::Complex { id, .. } => id,
        }
    }

    /// Whether this catalyst is, or contains, one of the given genes
    pub fn contains_one_of(&self, genes: &IndexSet<String>) -> bool {
        match self {
            Catalyst::Gene(id) => genes.contains(id),
            Catalyst::Complex { genes: members, .. } => {
                members.iter().any(|gene| genes.contains(gene))
            }
        }
    }

    /// Render the catalyst back into gene association syntax
    pub fn to_association_string(&self) -> String {
        match self {
            Catalyst::Gene(id) => format!("({})", id),
            Catalyst::Complex { genes, .. } => {
                let members: Vec<&str> = genes.iter().map(|gene| gene.as_str()).collect();
                format!("({})", members.join(" and "))
            }
        }
    }
}

impl Display for Catalyst {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Represents a gene complex of the derived network
#[derive(Debug, Clone)]
pub struct GeneComplex {
    /// Used to identify the complex
    pub id: String,
    /// Member genes of the complex
    pub genes: IndexSet<String>,
    /// Reactions catalyzed by this complex
    pub reactions: Vec<String>,
    /// Gene targets this complex links to
    ///
    /// Filled by the enzyme-centric network calculation.
    pub gene_links: IndexSet<String>,
    /// Gene complex targets this complex links to
    pub complex_links: IndexSet<String>,
}

impl GeneComplex {
    pub fn new(id: String, genes: IndexSet<String>) -> GeneComplex {
        GeneComplex {
            id,
            genes,
            reactions: Vec::new(),
            gene_links: IndexSet::new(),
            complex_links: IndexSet::new(),
        }
    }
}

impl Display for GeneComplex {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id)
    }
}
