//! This module provides the species struct representing a metabolite

use std::fmt::{Display, Formatter};

/// Represents a species of the metabolic model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Species {
    /// Used to identify the species (must be unique)
    pub id: String,
    /// Human Readable name of the species
    pub name: Option<String>,
}

impl Species {
    pub fn new(id: String, name: Option<String>) -> Species {
        Species { id, name }
    }
}

impl Display for Species {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id)
    }
}
