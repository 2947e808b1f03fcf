//! This module provides a struct for representing reactions

use std::fmt::{Display, Formatter};

use derive_builder::Builder;

/// Represents a reaction in the metabolic model
#[derive(Builder, Debug, Clone, PartialEq, Eq)]
pub struct Reaction {
    /// Used to identify the reaction
    pub id: String,
    /// Human-readable reaction name
    #[builder(default = "None")]
    pub name: Option<String>,
    /// Whether the reaction may also run backwards
    #[builder(default = "true")]
    pub reversible: bool,
    /// Species consumed by the reaction
    #[builder(default = "Vec::new()")]
    pub reactants: Vec<String>,
    /// Species produced by the reaction
    #[builder(default = "Vec::new()")]
    pub products: Vec<String>,
    /// Species modifying the reaction without being consumed or produced
    #[builder(default = "Vec::new()")]
    pub modifiers: Vec<String>,
    /// Gene association rule describing which genes catalyze the reaction
    #[builder(default = "None")]
    pub gene_association: Option<String>,
    /// Notes about the reaction, stored as raw XHTML
    #[builder(default = "None")]
    pub notes: Option<String>,
}

impl Display for Reaction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id)
    }
}
