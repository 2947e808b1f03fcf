//! Module providing JSON serialization for derived networks
//!
//! The wire format references entities by their position in the serialized
//! tables instead of by id, keeping the payload small for large models.
use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::network::network::Network;

// region Serialized Network

/// Represents a JSON serialized network
#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct SerializedNetwork {
    pub species: Vec<SerializedSpecies>,
    pub reactions: Vec<SerializedReaction>,
    pub enzs: Vec<SerializedGene>,
    pub enzc: Vec<SerializedGeneComplex>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct SerializedSpecies {
    pub id: String,
    pub name: String,
    /// Indices of the reactions this species occurs in
    pub occ: Vec<usize>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct SerializedReaction {
    pub id: String,
    pub name: String,
    pub rev: bool,
    /// Indices of the consumed species
    pub cons: Vec<usize>,
    /// Indices of the produced species
    pub prod: Vec<usize>,
    /// Indices of the catalyzing genes
    pub enzs: Vec<usize>,
    /// Indices of the catalyzing gene complexes
    pub enzc: Vec<usize>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct SerializedGene {
    pub id: String,
    /// Indices of the reactions this gene catalyzes
    pub reactions: Vec<usize>,
    /// Indices of the complexes this gene is part of
    pub cplx: Vec<usize>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct SerializedGeneComplex {
    pub id: String,
    /// Indices of the member genes
    pub enzs: Vec<usize>,
    /// Indices of the reactions this complex catalyzes
    pub reactions: Vec<usize>,
}

// endregion Serialized Network

#[derive(Error, Debug)]
pub enum JsonError {
    #[error("Serde json serialize error")]
    SerdeJsonError(#[from] serde_json::Error),
    #[error("Unable to write to file")]
    UnableToWrite(#[from] std::io::Error),
}

impl Network {
    /// Convert the network into its JSON wire structure
    pub fn serialize(&self) -> SerializedNetwork {
        let species_index: IndexMap<&String, usize> = self
            .species
            .keys()
            .enumerate()
            .map(|(index, id)| (id, index))
            .collect();
        let reaction_index: IndexMap<&String, usize> = self
            .reactions
            .keys()
            .enumerate()
            .map(|(index, id)| (id, index))
            .collect();
        let gene_index: IndexMap<&String, usize> = self
            .genes
            .keys()
            .enumerate()
            .map(|(index, id)| (id, index))
            .collect();
        let complex_index: IndexMap<&String, usize> = self
            .gene_complexes
            .keys()
            .enumerate()
            .map(|(index, id)| (id, index))
            .collect();

        let species = self
            .species
            .values()
            .map(|species| SerializedSpecies {
                id: species.id.clone(),
                name: species.name.clone(),
                occ: species
                    .occurrence
                    .iter()
                    .filter_map(|reaction| reaction_index.get(reaction).copied())
                    .collect(),
            })
            .collect();

        let mut enzs: Vec<SerializedGene> = self
            .genes
            .values()
            .map(|gene| SerializedGene {
                id: gene.id.clone(),
                reactions: gene
                    .reactions
                    .iter()
                    .filter_map(|reaction| reaction_index.get(reaction).copied())
                    .collect(),
                cplx: Vec::new(),
            })
            .collect();

        let enzc: Vec<SerializedGeneComplex> = self
            .gene_complexes
            .values()
            .enumerate()
            .map(|(complex_number, complex)| {
                // Backfill the complex membership of its genes
                for gene in &complex.genes {
                    if let Some(gene_number) = gene_index.get(gene).copied() {
                        enzs[gene_number].cplx.push(complex_number);
                    }
                }
                SerializedGeneComplex {
                    id: complex.id.clone(),
                    enzs: complex
                        .genes
                        .iter()
                        .filter_map(|gene| gene_index.get(gene).copied())
                        .collect(),
                    reactions: complex
                        .reactions
                        .iter()
                        .filter_map(|reaction| reaction_index.get(reaction).copied())
                        .collect(),
                }
            })
            .collect();

        let reactions = self
            .reactions
            .values()
            .map(|reaction| SerializedReaction {
                id: reaction.id.clone(),
                name: reaction.name.clone(),
                rev: reaction.reversible,
                cons: reaction
                    .consumed
                    .iter()
                    .filter_map(|species| species_index.get(species).copied())
                    .collect(),
                prod: reaction
                    .produced
                    .iter()
                    .filter_map(|species| species_index.get(species).copied())
                    .collect(),
                enzs: reaction
                    .genes
                    .iter()
                    .filter_map(|gene| gene_index.get(gene).copied())
                    .collect(),
                enzc: reaction
                    .gene_complexes
                    .iter()
                    .filter_map(|complex| complex_index.get(complex).copied())
                    .collect(),
            })
            .collect();

        SerializedNetwork {
            species,
            reactions,
            enzs,
            enzc,
        }
    }

    /// Serialize the network to a JSON string
    pub fn to_json_string(&self) -> Result<String, JsonError> {
        Ok(serde_json::to_string(&self.serialize())?)
    }

    /// Write the network to a JSON file
    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> Result<(), JsonError> {
        let network_string = self.to_json_string()?;
        fs::write(path, network_string)?;
        Ok(())
    }
}

#[cfg(test)]
mod json_tests {
    use super::*;
    use crate::network::gene_complex::ComplexBuilder;

    /// a -r-> b -s-> c with r catalyzed by v or w, s by the complex x + y
    fn two_step_network() -> Network {
        let mut network = Network::new();
        network.add_species("a", "species a");
        network.add_species("b", "species b");
        network.add_species("c", "species c");
        network.add_reaction("r", "first", false);
        network.add_reaction("s", "second", false);

        let v = ComplexBuilder::with_gene("v").seal().unwrap();
        let w = ComplexBuilder::with_gene("w").seal().unwrap();
        let mut complex = ComplexBuilder::with_gene("x");
        complex.add_gene("y");
        let xy = complex.seal().unwrap();

        network.add_genes("r", &[v, w]);
        network.add_genes("s", &[xy]);
        network.add_reaction_input("r", "a");
        network.add_reaction_output("r", "b");
        network.add_reaction_input("s", "b");
        network.add_reaction_output("s", "c");
        network
    }

    #[test]
    fn test_serialize_references_by_index() {
        let serialized = two_step_network().serialize();

        assert_eq!(serialized.species.len(), 3);
        assert_eq!(serialized.reactions.len(), 2);
        assert_eq!(serialized.enzs.len(), 4);
        assert_eq!(serialized.enzc.len(), 1);

        // b occurs in r (0) and s (1)
        assert_eq!(serialized.species[1].id, "b");
        assert_eq!(serialized.species[1].occ, [0, 1]);

        let second = &serialized.reactions[1];
        assert_eq!(second.id, "s");
        assert_eq!(second.cons, [1]);
        assert_eq!(second.prod, [2]);
        assert!(second.enzs.is_empty());
        assert_eq!(second.enzc, [0]);

        // Genes appear in encounter order v, w, x, y
        assert_eq!(serialized.enzs[0].id, "v");
        assert_eq!(serialized.enzs[0].reactions, [0]);
        assert_eq!(serialized.enzc[0].enzs, [2, 3]);
        assert_eq!(serialized.enzc[0].reactions, [1]);
        // x and y know they are part of the complex
        assert_eq!(serialized.enzs[2].cplx, [0]);
        assert_eq!(serialized.enzs[3].cplx, [0]);
    }

    #[test]
    fn test_to_json_string() {
        let json = two_step_network().to_json_string().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["species"][0]["id"], "a");
        assert_eq!(value["reactions"][0]["rev"], false);
        assert_eq!(value["enzc"][0]["id"], "x + y");
    }
}
