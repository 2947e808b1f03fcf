//! This module provides the Network struct holding a derived network and the
//! calculations turning it into reaction-centric and enzyme-centric views

use indexmap::IndexMap;
use tracing::{debug, info};

use crate::network::gene::Gene;
use crate::network::gene_complex::{Catalyst, GeneComplex};
use crate::network::reaction::Reaction;
use crate::network::species::Species;

/// A network derived from a metabolic model
///
/// Holds the metabolite-reaction graph extracted from a model together with
/// the gene and gene complex nodes of its catalysts. The reaction-centric and
/// enzyme-centric views are computed on demand by [`Network::calc_reaction_net`]
/// and [`Network::calc_genenet`].
#[derive(Debug, Clone, Default)]
pub struct Network {
    /// Map of species ids to network Species
    pub species: IndexMap<String, Species>,
    /// Map of reaction ids to network Reactions
    pub reactions: IndexMap<String, Reaction>,
    /// Map of gene ids to network Genes
    pub genes: IndexMap<String, Gene>,
    /// Map of gene complex ids to network GeneComplexes
    pub gene_complexes: IndexMap<String, GeneComplex>,
    have_reaction_net: bool,
    have_gene_net: bool,
}

impl Network {
    pub fn new() -> Network {
        Network::default()
    }

    /// Add a species to the network, keeping an existing species with the
    /// same id
    pub fn add_species(&mut self, id: &str, name: &str) {
        if !self.species.contains_key(id) {
            self.species
                .insert(id.to_string(), Species::new(id.to_string(), name.to_string()));
        }
    }

    /// Add a reaction to the network, keeping an existing reaction with the
    /// same id
    pub fn add_reaction(&mut self, id: &str, name: &str, reversible: bool) {
        if !self.reactions.contains_key(id) {
            self.reactions.insert(
                id.to_string(),
                Reaction::new(id.to_string(), name.to_string(), reversible),
            );
        }
    }

    /// Record that the reaction consumes the species
    ///
    /// Both entities must already be part of the network, unknown ids are
    /// ignored.
    pub fn add_reaction_input(&mut self, reaction_id: &str, species_id: &str) {
        if !self.reactions.contains_key(reaction_id) {
            return;
        }
        match self.species.get_mut(species_id) {
            Some(species) => species.occurrence.push(reaction_id.to_string()),
            None => return,
        }
        if let Some(reaction) = self.reactions.get_mut(reaction_id) {
            reaction.consumed.insert(species_id.to_string());
        }
    }

    /// Record that the reaction produces the species
    ///
    /// Both entities must already be part of the network, unknown ids are
    /// ignored.
    pub fn add_reaction_output(&mut self, reaction_id: &str, species_id: &str) {
        if !self.reactions.contains_key(reaction_id) {
            return;
        }
        match self.species.get_mut(species_id) {
            Some(species) => species.occurrence.push(reaction_id.to_string()),
            None => return,
        }
        if let Some(reaction) = self.reactions.get_mut(reaction_id) {
            reaction.produced.insert(species_id.to_string());
        }
    }

    /// Attach the catalysts of a reaction to the network
    ///
    /// Gene catalysts become gene nodes, complex catalysts become gene
    /// complex nodes plus gene nodes for their members. Nodes are
    /// deduplicated by id, and the reaction and its catalysts reference one
    /// another.
    pub fn add_genes(&mut self, reaction_id: &str, catalysts: &[Catalyst]) {
        let reaction = match self.reactions.get_mut(reaction_id) {
            Some(reaction) => reaction,
            None => return,
        };

        for catalyst in catalysts {
            match catalyst {
                Catalyst::Gene(id) => {
                    let gene = self
                        .genes
                        .entry(id.clone())
                        .or_insert_with(|| Gene::new(id.clone()));
                    gene.reactions.push(reaction_id.to_string());
                    reaction.genes.push(id.clone());
                }
                Catalyst::Complex { id, genes } => {
                    // Member genes become nodes of their own, but only the
                    // complex references the reaction
                    for member in genes {
                        self.genes
                            .entry(member.clone())
                            .or_insert_with(|| Gene::new(member.clone()));
                    }
                    let complex = self
                        .gene_complexes
                        .entry(id.clone())
                        .or_insert_with(|| GeneComplex::new(id.clone(), genes.clone()));
                    complex.reactions.push(reaction_id.to_string());
                    reaction.gene_complexes.push(id.clone());
                }
            }
        }
    }

    /// Calculate the reaction-centric network
    ///
    /// Let's say you have this network:
    ///
    /// - A -r-> B (reaction r turns A into B)
    /// - B -s-> C (reaction s turns B into C)
    ///
    /// then s links to r: every reaction records the reactions that produce
    /// a species it consumes. Reversible reactions are tagged as consumer
    /// and producer on both sides of the arrow.
    ///
    /// Recomputation clears earlier results first, so the calculation is
    /// idempotent.
    pub fn calc_reaction_net(&mut self) {
        info!("calc reaction net");

        for species in self.species.values_mut() {
            species.consumption.reactions.clear();
            species.production.reactions.clear();
        }
        for reaction in self.reactions.values_mut() {
            reaction.links.clear();
        }

        let mut num = 0;
        for (identifier, reaction) in &self.reactions {
            num += 1;
            if num % 100 == 0 {
                info!("calc reaction net {}", num);
            }
            debug!("calc reaction net {}", reaction.id);

            for species_id in &reaction.consumed {
                if let Some(species) = self.species.get_mut(species_id) {
                    species.consumption.reactions.insert(identifier.clone());
                    if reaction.reversible {
                        species.production.reactions.insert(identifier.clone());
                    }
                }
            }
            for species_id in &reaction.produced {
                if let Some(species) = self.species.get_mut(species_id) {
                    species.production.reactions.insert(identifier.clone());
                    if reaction.reversible {
                        species.consumption.reactions.insert(identifier.clone());
                    }
                }
            }
        }

        // Join consumers and producers through their shared species
        for species in self.species.values() {
            for consumption in &species.consumption.reactions {
                let reaction = match self.reactions.get_mut(consumption) {
                    Some(reaction) => reaction,
                    None => continue,
                };
                for production in &species.production.reactions {
                    reaction.links.insert(production.clone());
                }
            }
        }

        self.have_reaction_net = true;
    }

    /// Calculate the enzyme-centric network
    ///
    /// Let's say you have this network:
    ///
    /// - A -r-> B (reaction r turns A into B)
    /// - B -s-> C (reaction s turns B into C)
    ///
    /// and let's assume the reactions are catalyzed by the following enzymes:
    ///
    /// - r: V or W
    /// - s: X and (Y or Z)
    ///
    /// then the enzyme-centric network will be:
    ///
    /// - V -> X+Y  (V links to X+Y)
    /// - V -> X+Z  (V links to X+Z)
    /// - W -> X+Y  (W links to X+Y)
    /// - W -> X+Z  (W links to X+Z)
    ///
    /// The species-mediated join runs at four granularities at once, linking
    /// genes and gene complexes to genes and gene complexes. Each producing
    /// catalyst records the catalysts consuming one of its product species.
    ///
    /// Recomputation clears earlier results first, so the calculation is
    /// idempotent.
    pub fn calc_genenet(&mut self) {
        info!("calc gene net");

        for species in self.species.values_mut() {
            species.consumption.genes.clear();
            species.production.genes.clear();
            species.consumption.complexes.clear();
            species.production.complexes.clear();
        }
        for gene in self.genes.values_mut() {
            gene.gene_links.clear();
            gene.complex_links.clear();
        }
        for complex in self.gene_complexes.values_mut() {
            complex.gene_links.clear();
            complex.complex_links.clear();
        }

        let mut num = 0;
        for reaction in self.reactions.values() {
            num += 1;
            if num % 100 == 0 {
                info!("calc gene associations for reaction {}", num);
            }
            debug!("calc gene associations for reaction {}", reaction.id);

            for gene in &reaction.genes {
                debug!("processing gene {}", gene);
                for species_id in &reaction.consumed {
                    if let Some(species) = self.species.get_mut(species_id) {
                        species.consumption.genes.insert(gene.clone());
                        if reaction.reversible {
                            species.production.genes.insert(gene.clone());
                        }
                    }
                }
                for species_id in &reaction.produced {
                    if let Some(species) = self.species.get_mut(species_id) {
                        species.production.genes.insert(gene.clone());
                        if reaction.reversible {
                            species.consumption.genes.insert(gene.clone());
                        }
                    }
                }
            }

            for complex in &reaction.gene_complexes {
                debug!("processing gene complex {}", complex);
                for species_id in &reaction.consumed {
                    if let Some(species) = self.species.get_mut(species_id) {
                        species.consumption.complexes.insert(complex.clone());
                        if reaction.reversible {
                            species.production.complexes.insert(complex.clone());
                        }
                    }
                }
                for species_id in &reaction.produced {
                    if let Some(species) = self.species.get_mut(species_id) {
                        species.production.complexes.insert(complex.clone());
                        if reaction.reversible {
                            species.consumption.complexes.insert(complex.clone());
                        }
                    }
                }
            }
        }

        info!("got gene associations");
        for species in self.species.values() {
            for consumption in &species.consumption.genes {
                for production in &species.production.genes {
                    if let Some(gene) = self.genes.get_mut(production) {
                        gene.gene_links.insert(consumption.clone());
                    }
                }
                for production in &species.production.complexes {
                    if let Some(complex) = self.gene_complexes.get_mut(production) {
                        complex.gene_links.insert(consumption.clone());
                    }
                }
            }
            for consumption in &species.consumption.complexes {
                for production in &species.production.genes {
                    if let Some(gene) = self.genes.get_mut(production) {
                        gene.complex_links.insert(consumption.clone());
                    }
                }
                for production in &species.production.complexes {
                    if let Some(complex) = self.gene_complexes.get_mut(production) {
                        complex.complex_links.insert(consumption.clone());
                    }
                }
            }
        }

        info!("got gene net");
        self.have_gene_net = true;
    }

    /// Calculate the reaction-centric network unless it is already available
    pub fn ensure_reaction_net(&mut self) {
        if !self.have_reaction_net {
            self.calc_reaction_net();
        }
    }

    /// Calculate the enzyme-centric network unless it is already available
    pub fn ensure_gene_net(&mut self) {
        if !self.have_gene_net {
            self.calc_genenet();
        }
    }

    pub fn have_reaction_net(&self) -> bool {
        self.have_reaction_net
    }

    pub fn have_gene_net(&self) -> bool {
        self.have_gene_net
    }

    /// Total number of entities in the network
    pub fn entity_count(&self) -> usize {
        self.species.len() + self.reactions.len() + self.genes.len() + self.gene_complexes.len()
    }
}
