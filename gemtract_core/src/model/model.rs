//! This module provides the Model struct for representing an entire metabolic model

use indexmap::IndexMap;

use crate::model::reaction::Reaction;
use crate::model::species::Species;

/// Represents a Genome Scale Metabolic Model
#[derive(Clone, Debug, Default)]
pub struct Model {
    /// Id associated with the Model
    pub id: String,
    /// Human readable name of the Model
    pub name: String,
    /// Map of species ids to Species Objects
    pub species: IndexMap<String, Species>,
    /// Map of reaction ids to Reaction Objects
    pub reactions: IndexMap<String, Reaction>,
    /// Notes attached to the model, one paragraph per entry
    pub notes: Vec<String>,
}

impl Model {
    pub fn new_empty() -> Self {
        Model {
            id: String::new(),
            name: String::new(),
            species: IndexMap::new(),
            reactions: IndexMap::new(),
            notes: Vec::new(),
        }
    }

    /// Add a species to the model
    ///
    /// # Parameters
    /// - species: Species to add
    ///
    /// # Examples
    /// ```rust
    /// use gemtract_core::model::model::Model;
    /// use gemtract_core::model::species::Species;
    /// let mut model = Model::new_empty();
    /// let new_species = Species::new("new_species".to_string(), None);
    /// model.add_species(new_species);
    /// ```
    pub fn add_species(&mut self, species: Species) {
        let id = species.id.clone();
        self.species.insert(id, species);
    }

    /// Add a reaction to the model
    ///
    /// # Parameters
    /// - reaction: Reaction to add
    ///
    /// # Examples
    /// ```rust
    /// use gemtract_core::model::model::Model;
    /// use gemtract_core::model::reaction::{Reaction, ReactionBuilder};
    /// let mut model = Model::new_empty();
    /// let new_reaction = ReactionBuilder::default().id("new_reaction".to_string()).build().unwrap();
    /// model.add_reaction(new_reaction);
    /// ```
    pub fn add_reaction(&mut self, reaction: Reaction) {
        let id = reaction.id.clone();
        self.reactions.insert(id, reaction);
    }

    /// Append a paragraph to the model notes
    pub fn append_note(&mut self, note: String) {
        self.notes.push(note);
    }

    /// Total number of species and reactions in the model
    pub fn entity_count(&self) -> usize {
        self.species.len() + self.reactions.len()
    }
}
