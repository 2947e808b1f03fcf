//! This module provides the Gemtractor struct, the engine trimming a
//! metabolic model and deriving its network

use derive_builder::Builder;
use indexmap::{IndexMap, IndexSet};
use thiserror::Error;
use tracing::{debug, info};

use crate::io::gene_assoc::{unfold_association, AssociationError};
use crate::model::model::Model;
use crate::network::gene_complex::Catalyst;
use crate::network::network::Network;

/// Settings steering one trim pass
///
/// The four filter lists name the entities to get rid of, the five flags
/// decide how aggressively removals cascade.
#[derive(Builder, Debug, Clone)]
pub struct TrimSettings {
    /// Species identifiers to get rid of
    #[builder(default = "Vec::new()")]
    pub filter_species: Vec<String>,
    /// Reaction identifiers to get rid of
    #[builder(default = "Vec::new()")]
    pub filter_reactions: Vec<String>,
    /// Enzyme identifiers to get rid of
    #[builder(default = "Vec::new()")]
    pub filter_genes: Vec<String>,
    /// Enzyme complex identifiers to get rid of, every list item should be
    /// of the format 'A + B + gene42'
    #[builder(default = "Vec::new()")]
    pub filter_gene_complexes: Vec<String>,
    /// Should a reaction be removed if all its enzymes were removed?
    #[builder(default = "true")]
    pub remove_reaction_enzymes_removed: bool,
    /// Should species be removed that do not participate in any reaction
    /// anymore, even though they might be required in other entities?
    #[builder(default = "false")]
    pub remove_ghost_species: bool,
    /// Should fake enzymes be discarded (enzymes implicitly assumed when no
    /// enzyme is annotated to a reaction)?
    #[builder(default = "false")]
    pub discard_fake_enzymes: bool,
    /// Should a reaction be removed if one of its participating species was
    /// removed?
    #[builder(default = "false")]
    pub remove_reaction_missing_species: bool,
    /// If an enzyme is removed, should all enzyme complexes be removed in
    /// which it participates?
    #[builder(default = "true")]
    pub removing_enzyme_removes_complex: bool,
}

impl Default for TrimSettings {
    fn default() -> Self {
        TrimSettings {
            filter_species: Vec::new(),
            filter_reactions: Vec::new(),
            filter_genes: Vec::new(),
            filter_gene_complexes: Vec::new(),
            remove_reaction_enzymes_removed: true,
            remove_ghost_species: false,
            discard_fake_enzymes: false,
            remove_reaction_missing_species: false,
            removing_enzyme_removes_complex: true,
        }
    }
}

impl TrimSettings {
    /// Whether any of the filter lists is non empty
    pub fn has_filters(&self) -> bool {
        !self.filter_species.is_empty()
            || !self.filter_reactions.is_empty()
            || !self.filter_genes.is_empty()
            || !self.filter_gene_complexes.is_empty()
    }

    /// Render the settings into audit note paragraphs
    pub fn describe(&self) -> Vec<String> {
        let mut notes = vec![
            "This model was trimmed using the GEMtractor with the following settings:".to_string(),
        ];
        if !self.filter_species.is_empty() {
            notes.push(format!("Filter Species: {}", self.filter_species.join(", ")));
        }
        if !self.filter_reactions.is_empty() {
            notes.push(format!(
                "Filter Reactions: {}",
                self.filter_reactions.join(", ")
            ));
        }
        if !self.filter_genes.is_empty() {
            notes.push(format!("Filter Enzymes: {}", self.filter_genes.join(", ")));
        }
        if !self.filter_gene_complexes.is_empty() {
            notes.push(format!(
                "Filter Enzyme Complexes: {}",
                self.filter_gene_complexes.join(", ")
            ));
        }
        notes.push(format!(
            "Remove reactions whose enzymes are removed: {}",
            self.remove_reaction_enzymes_removed
        ));
        notes.push(format!(
            "Remove ghost species: {}",
            self.remove_ghost_species
        ));
        notes.push(format!(
            "Discard fake enzymes: {}",
            self.discard_fake_enzymes
        ));
        notes.push(format!(
            "Remove reactions that are missing a species: {}",
            self.remove_reaction_missing_species
        ));
        notes.push(format!(
            "Removing an enzyme removes the complexes it participates in: {}",
            self.removing_enzyme_removes_complex
        ));
        notes
    }
}

/// Canonicalize a user supplied complex id
///
/// Complex ids join their member genes sorted alphabetically. User input may
/// list the members in any order and with uneven spacing, so it is brought
/// into the canonical form before being compared against complex ids.
pub fn normalize_complex_id(id: &str) -> String {
    let mut members: Vec<&str> = id
        .split('+')
        .map(|member| member.trim())
        .filter(|member| !member.is_empty())
        .collect();
    members.sort_unstable();
    members.join(" + ")
}

/// Render a list of catalysts back into one gene association string
///
/// # Examples
/// ```rust
/// use gemtract_core::gemtractor::implode_catalysts;
/// use gemtract_core::network::gene_complex::ComplexBuilder;
/// let mut complex = ComplexBuilder::with_gene("b");
/// complex.add_gene("c");
/// let catalysts = vec![
///     ComplexBuilder::with_gene("a").seal().unwrap(),
///     complex.seal().unwrap(),
/// ];
/// assert_eq!(implode_catalysts(&catalysts), "((a) or (b and c))");
/// ```
pub fn implode_catalysts(catalysts: &[Catalyst]) -> String {
    let parts: Vec<String> = catalysts
        .iter()
        .map(|catalyst| catalyst.to_association_string())
        .collect();
    format!("({})", parts.join(" or "))
}

/// Enum representing errors while trimming a model
#[derive(Debug, Error)]
pub enum TrimError {
    /// A reaction's gene association could not be resolved
    #[error("unable to resolve the gene association of reaction {reaction}: {source}")]
    Association {
        reaction: String,
        #[source]
        source: AssociationError,
    },
    /// A reaction resolved to no catalysts at all
    #[error("reaction {reaction} has no catalysts")]
    NoCatalysts { reaction: String },
}

/// The trimming engine
///
/// Owns the model being trimmed together with a per reaction cache of its
/// resolved catalysts. One instance is meant to serve one trim and
/// extraction pass.
#[derive(Debug)]
pub struct Gemtractor {
    model: Model,
    catalysts: IndexMap<String, Vec<Catalyst>>,
}

impl Gemtractor {
    pub fn new(model: Model) -> Gemtractor {
        Gemtractor {
            model,
            catalysts: IndexMap::new(),
        }
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Give up the engine and return the owned model
    pub fn into_model(self) -> Model {
        self.model
    }

    /// Resolve the catalysts of a reaction, caching the result by reaction id
    ///
    /// A reaction without machine readable gene annotation gets a synthetic
    /// placeholder catalyst named after the reaction.
    fn resolve_catalysts(&mut self, reaction_id: &str) -> Result<&Vec<Catalyst>, TrimError> {
        if !self.catalysts.contains_key(reaction_id) {
            let association = match self.model.reactions.get(reaction_id) {
                Some(reaction) => reaction
                    .gene_association
                    .as_deref()
                    .map(str::trim)
                    .unwrap_or("")
                    .to_string(),
                None => String::new(),
            };
            let resolved = if association.is_empty() {
                debug!(
                    "no gene association for reaction {}, assuming fake enzyme",
                    reaction_id
                );
                vec![Catalyst::placeholder(reaction_id)]
            } else {
                let alternatives =
                    unfold_association(&association).map_err(|source| TrimError::Association {
                        reaction: reaction_id.to_string(),
                        source,
                    })?;
                alternatives
                    .into_iter()
                    .filter_map(|builder| builder.seal())
                    .collect()
            };
            self.catalysts.insert(reaction_id.to_string(), resolved);
        }
        Ok(&self.catalysts[reaction_id])
    }

    /// Trim the model according to the settings
    ///
    /// Decorates the model id and name, appends the audit note, and applies
    /// the filters. Trimming with neither filter lists nor
    /// discard_fake_enzymes set only decorates the model.
    pub fn trim(&mut self, settings: &TrimSettings) -> Result<(), TrimError> {
        let name = if self.model.name.is_empty() {
            self.model.id.clone()
        } else {
            self.model.name.clone()
        };
        self.model.id = format!("{}_gemtracted", self.model.id);
        self.model.name = format!("GEMtracted model of {}", name);

        debug!("appending the audit note");
        for note in settings.describe() {
            self.model.append_note(note);
        }

        if !settings.has_filters() && !settings.discard_fake_enzymes {
            return Ok(());
        }

        debug!("filtering things");
        let filter_species: IndexSet<String> = settings.filter_species.iter().cloned().collect();
        let filter_reactions: IndexSet<String> =
            settings.filter_reactions.iter().cloned().collect();
        let filter_genes: IndexSet<String> = settings.filter_genes.iter().cloned().collect();
        let filter_complexes: IndexSet<String> = settings
            .filter_gene_complexes
            .iter()
            .map(|id| normalize_complex_id(id))
            .collect();

        let reaction_ids: Vec<String> = self.model.reactions.keys().cloned().collect();
        for reaction_id in reaction_ids {
            let keep = self.trim_reaction(
                &reaction_id,
                settings,
                &filter_species,
                &filter_reactions,
                &filter_genes,
                &filter_complexes,
            )?;
            if !keep {
                self.model.reactions.shift_remove(&reaction_id);
            }
        }

        if !filter_species.is_empty() && settings.remove_ghost_species {
            self.model
                .species
                .retain(|id, _| !filter_species.contains(id));
        }

        Ok(())
    }

    /// Apply the filters to a single reaction
    ///
    /// Returns whether the reaction stays in the model.
    fn trim_reaction(
        &mut self,
        reaction_id: &str,
        settings: &TrimSettings,
        filter_species: &IndexSet<String>,
        filter_reactions: &IndexSet<String>,
        filter_genes: &IndexSet<String>,
        filter_complexes: &IndexSet<String>,
    ) -> Result<bool, TrimError> {
        if filter_reactions.contains(reaction_id) {
            return Ok(false);
        }

        if !filter_species.is_empty() {
            let reaction = match self.model.reactions.get_mut(reaction_id) {
                Some(reaction) => reaction,
                None => return Ok(false),
            };
            if settings.remove_reaction_missing_species {
                let refers_filtered = reaction
                    .reactants
                    .iter()
                    .chain(reaction.products.iter())
                    .chain(reaction.modifiers.iter())
                    .any(|species| filter_species.contains(species));
                if refers_filtered {
                    return Ok(false);
                }
            } else {
                reaction
                    .reactants
                    .retain(|species| !filter_species.contains(species));
                reaction
                    .products
                    .retain(|species| !filter_species.contains(species));
                reaction
                    .modifiers
                    .retain(|species| !filter_species.contains(species));
            }
        }

        let current = self.resolve_catalysts(reaction_id)?.clone();
        debug!(
            "current genes: {} - reaction: {}",
            implode_catalysts(&current),
            reaction_id
        );
        if current.is_empty() {
            info!("did not find genes in reaction {}", reaction_id);
            return Err(TrimError::NoCatalysts {
                reaction: reaction_id.to_string(),
            });
        }

        if settings.discard_fake_enzymes && current.len() == 1 && current[0].is_placeholder() {
            return Ok(false);
        }

        let mut final_catalysts: Vec<Catalyst> = current
            .iter()
            .filter(|catalyst| {
                !(filter_genes.contains(catalyst.id())
                    || filter_complexes.contains(catalyst.id())
                    || (settings.removing_enzyme_removes_complex
                        && catalyst.contains_one_of(filter_genes)))
            })
            .cloned()
            .collect();

        if final_catalysts.is_empty() {
            if settings.remove_reaction_enzymes_removed {
                return Ok(false);
            }
            final_catalysts = vec![Catalyst::placeholder(reaction_id)];
        }

        // Only rewrite the association text if catalysts were dropped
        if final_catalysts.len() != current.len() {
            if let Some(reaction) = self.model.reactions.get_mut(reaction_id) {
                reaction.gene_association = Some(implode_catalysts(&final_catalysts));
            }
        }
        self.catalysts
            .insert(reaction_id.to_string(), final_catalysts);

        let reaction = match self.model.reactions.get(reaction_id) {
            Some(reaction) => reaction,
            None => return Ok(false),
        };
        if reaction.reactants.len() + reaction.products.len() + reaction.modifiers.len() == 0 {
            return Ok(false);
        }

        Ok(true)
    }

    /// Derive the network of the (possibly trimmed) model
    ///
    /// One pass over the species, one pass over the reactions. Modifier
    /// references are not part of the derived graph.
    pub fn extract_network(&mut self) -> Result<Network, TrimError> {
        info!("extracting network from model");
        let mut network = Network::new();

        for species in self.model.species.values() {
            let name = species.name.as_deref().unwrap_or(&species.id);
            network.add_species(&species.id, name);
        }

        let reaction_ids: Vec<String> = self.model.reactions.keys().cloned().collect();
        let mut num = 0;
        for reaction_id in reaction_ids {
            num += 1;
            if num % 100 == 0 {
                info!("extracting reaction {}", num);
            }

            let catalysts = self.resolve_catalysts(&reaction_id)?.clone();
            if catalysts.is_empty() {
                return Err(TrimError::NoCatalysts {
                    reaction: reaction_id.clone(),
                });
            }

            let reaction = match self.model.reactions.get(&reaction_id) {
                Some(reaction) => reaction,
                None => continue,
            };
            let name = reaction.name.as_deref().unwrap_or(&reaction.id);
            network.add_reaction(&reaction_id, name, reaction.reversible);
            network.add_genes(&reaction_id, &catalysts);
            for species_id in &reaction.reactants {
                network.add_reaction_input(&reaction_id, species_id);
            }
            for species_id in &reaction.products {
                network.add_reaction_output(&reaction_id, species_id);
            }
        }

        info!("extracted network");
        Ok(network)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::reaction::ReactionBuilder;
    use crate::model::species::Species;

    /// a -r1-> b -r2-> c -r3-> a with r1: "x or (y and z)", r2: "y",
    /// r3 unannotated
    fn test_model() -> Model {
        let mut model = Model::new_empty();
        model.id = "test_model".to_string();
        model.name = "test model".to_string();
        model.add_species(Species::new("a".to_string(), Some("species a".to_string())));
        model.add_species(Species::new("b".to_string(), Some("species b".to_string())));
        model.add_species(Species::new("c".to_string(), Some("species c".to_string())));
        model.add_reaction(
            ReactionBuilder::default()
                .id("r1".to_string())
                .reversible(false)
                .reactants(vec!["a".to_string()])
                .products(vec!["b".to_string()])
                .gene_association(Some("x or (y and z)".to_string()))
                .build()
                .unwrap(),
        );
        model.add_reaction(
            ReactionBuilder::default()
                .id("r2".to_string())
                .reversible(false)
                .reactants(vec!["b".to_string()])
                .products(vec!["c".to_string()])
                .gene_association(Some("y".to_string()))
                .build()
                .unwrap(),
        );
        model.add_reaction(
            ReactionBuilder::default()
                .id("r3".to_string())
                .reversible(false)
                .reactants(vec!["c".to_string()])
                .products(vec!["a".to_string()])
                .build()
                .unwrap(),
        );
        model
    }

    #[test]
    fn test_trim_without_filters_only_decorates() {
        let mut model = test_model();
        // An association that would fail to parse must not be touched when
        // there is nothing to filter
        model.reactions.get_mut("r1").unwrap().gene_association =
            Some("q and w or e".to_string());

        let mut gemtractor = Gemtractor::new(model);
        gemtractor.trim(&TrimSettings::default()).unwrap();

        let model = gemtractor.model();
        assert_eq!(model.id, "test_model_gemtracted");
        assert_eq!(model.name, "GEMtracted model of test model");
        assert!(!model.notes.is_empty());
        assert_eq!(model.reactions.len(), 3);
        assert_eq!(model.species.len(), 3);
    }

    #[test]
    fn test_filter_reactions() {
        let mut gemtractor = Gemtractor::new(test_model());
        let settings = TrimSettingsBuilder::default()
            .filter_reactions(vec!["r2".to_string()])
            .build()
            .unwrap();
        gemtractor.trim(&settings).unwrap();

        let model = gemtractor.model();
        assert_eq!(model.reactions.len(), 2);
        assert!(!model.reactions.contains_key("r2"));
    }

    #[test]
    fn test_filter_species_strips_references() {
        let mut gemtractor = Gemtractor::new(test_model());
        let settings = TrimSettingsBuilder::default()
            .filter_species(vec!["b".to_string()])
            .build()
            .unwrap();
        gemtractor.trim(&settings).unwrap();

        let model = gemtractor.model();
        assert_eq!(model.reactions.len(), 3);
        assert!(model.reactions["r1"].products.is_empty());
        assert_eq!(model.reactions["r1"].reactants, ["a"]);
        assert!(model.reactions["r2"].reactants.is_empty());
        // Without remove_ghost_species the species table keeps b
        assert!(model.species.contains_key("b"));
    }

    #[test]
    fn test_filter_species_removes_ghosts() {
        let mut gemtractor = Gemtractor::new(test_model());
        let settings = TrimSettingsBuilder::default()
            .filter_species(vec!["b".to_string()])
            .remove_ghost_species(true)
            .build()
            .unwrap();
        gemtractor.trim(&settings).unwrap();

        assert!(!gemtractor.model().species.contains_key("b"));
        assert_eq!(gemtractor.model().species.len(), 2);
    }

    #[test]
    fn test_filter_species_removes_reactions() {
        let mut gemtractor = Gemtractor::new(test_model());
        let settings = TrimSettingsBuilder::default()
            .filter_species(vec!["b".to_string()])
            .remove_reaction_missing_species(true)
            .build()
            .unwrap();
        gemtractor.trim(&settings).unwrap();

        let model = gemtractor.model();
        assert_eq!(model.reactions.len(), 1);
        assert!(model.reactions.contains_key("r3"));
    }

    #[test]
    fn test_filter_gene_removes_alternative() {
        let mut gemtractor = Gemtractor::new(test_model());
        let settings = TrimSettingsBuilder::default()
            .filter_genes(vec!["x".to_string()])
            .build()
            .unwrap();
        gemtractor.trim(&settings).unwrap();

        let model = gemtractor.model();
        assert_eq!(model.reactions.len(), 3);
        assert_eq!(
            model.reactions["r1"].gene_association.as_deref(),
            Some("((y and z))")
        );
        // r2 only knows y and stays untouched
        assert_eq!(
            model.reactions["r2"].gene_association.as_deref(),
            Some("y")
        );
    }

    #[test]
    fn test_removing_enzyme_removes_complex() {
        let mut gemtractor = Gemtractor::new(test_model());
        let settings = TrimSettingsBuilder::default()
            .filter_genes(vec!["z".to_string()])
            .build()
            .unwrap();
        gemtractor.trim(&settings).unwrap();

        // z is only part of the complex, which dies with it
        assert_eq!(
            gemtractor.model().reactions["r1"]
                .gene_association
                .as_deref(),
            Some("((x))")
        );
    }

    #[test]
    fn test_removing_enzyme_keeps_complex() {
        let mut gemtractor = Gemtractor::new(test_model());
        let settings = TrimSettingsBuilder::default()
            .filter_genes(vec!["z".to_string()])
            .removing_enzyme_removes_complex(false)
            .build()
            .unwrap();
        gemtractor.trim(&settings).unwrap();

        // The complex id is not z itself, so the complex survives
        assert_eq!(
            gemtractor.model().reactions["r1"]
                .gene_association
                .as_deref(),
            Some("x or (y and z)")
        );
    }

    #[test]
    fn test_filter_complex_by_id() {
        let mut gemtractor = Gemtractor::new(test_model());
        // Members listed in the wrong order still match the canonical id
        let settings = TrimSettingsBuilder::default()
            .filter_gene_complexes(vec!["z + y".to_string()])
            .build()
            .unwrap();
        gemtractor.trim(&settings).unwrap();

        assert_eq!(
            gemtractor.model().reactions["r1"]
                .gene_association
                .as_deref(),
            Some("((x))")
        );
    }

    #[test]
    fn test_enzyme_exhaustion_removes_reaction() {
        let mut gemtractor = Gemtractor::new(test_model());
        let settings = TrimSettingsBuilder::default()
            .filter_genes(vec!["y".to_string()])
            .build()
            .unwrap();
        gemtractor.trim(&settings).unwrap();

        let model = gemtractor.model();
        // r2 lost its only catalyst, r1 lost the complex but keeps x
        assert!(!model.reactions.contains_key("r2"));
        assert!(model.reactions.contains_key("r1"));
        assert!(model.reactions.contains_key("r3"));
    }

    #[test]
    fn test_enzyme_exhaustion_keeps_reaction_with_placeholder() {
        let mut gemtractor = Gemtractor::new(test_model());
        let settings = TrimSettingsBuilder::default()
            .filter_genes(vec!["y".to_string()])
            .remove_reaction_enzymes_removed(false)
            .build()
            .unwrap();
        gemtractor.trim(&settings).unwrap();
        assert!(gemtractor.model().reactions.contains_key("r2"));

        let network = gemtractor.extract_network().unwrap();
        assert!(network.genes.contains_key("reaction_r2"));
    }

    #[test]
    fn test_discard_fake_enzymes() {
        let mut gemtractor = Gemtractor::new(test_model());
        let settings = TrimSettingsBuilder::default()
            .discard_fake_enzymes(true)
            .build()
            .unwrap();
        gemtractor.trim(&settings).unwrap();

        let model = gemtractor.model();
        assert!(!model.reactions.contains_key("r3"));
        assert_eq!(model.reactions.len(), 2);
    }

    #[test]
    fn test_trim_fails_on_malformed_association() {
        let mut model = test_model();
        model.reactions.get_mut("r1").unwrap().gene_association =
            Some("q and w or e".to_string());

        let mut gemtractor = Gemtractor::new(model);
        let settings = TrimSettingsBuilder::default()
            .filter_genes(vec!["x".to_string()])
            .build()
            .unwrap();
        match gemtractor.trim(&settings) {
            Ok(_) => panic!("Trim should fail on a malformed association"),
            Err(TrimError::Association { reaction, .. }) => assert_eq!(reaction, "r1"),
            Err(_) => panic!("Incorrect error returned"),
        }
    }

    #[test]
    fn test_extract_network() {
        let mut gemtractor = Gemtractor::new(test_model());
        let network = gemtractor.extract_network().unwrap();

        assert_eq!(network.species.len(), 3);
        assert_eq!(network.reactions.len(), 3);
        // x, y, z plus the placeholder of r3
        assert_eq!(network.genes.len(), 4);
        assert!(network.genes.contains_key("reaction_r3"));
        assert_eq!(network.gene_complexes.len(), 1);
        assert!(network.gene_complexes.contains_key("y + z"));

        assert_eq!(
            network.reactions["r1"].consumed.iter().next().unwrap(),
            "a"
        );
        assert_eq!(
            network.reactions["r1"].produced.iter().next().unwrap(),
            "b"
        );
    }

    #[test]
    fn test_normalize_complex_id() {
        assert_eq!(normalize_complex_id("b + a"), "a + b");
        assert_eq!(normalize_complex_id("c+b+  a"), "a + b + c");
        assert_eq!(normalize_complex_id("a"), "a");
    }

    #[test]
    fn test_filtered_enzyme_network_links_complex_to_gene() {
        let mut gemtractor = Gemtractor::new(test_model());
        let settings = TrimSettingsBuilder::default()
            .filter_genes(vec!["x".to_string()])
            .build()
            .unwrap();
        gemtractor.trim(&settings).unwrap();

        let mut network = gemtractor.extract_network().unwrap();
        network.calc_genenet();

        // r1 produces b under y + z, r2 consumes b under y
        let links: Vec<&String> = network.gene_complexes["y + z"].gene_links.iter().collect();
        assert_eq!(links, ["y"]);
    }

    fn reaction_link_count(network: &Network) -> usize {
        network.reactions.values().map(|r| r.links.len()).sum()
    }

    fn enzyme_link_count(network: &Network) -> usize {
        let gene_links: usize = network
            .genes
            .values()
            .map(|g| g.gene_links.len() + g.complex_links.len())
            .sum();
        let complex_links: usize = network
            .gene_complexes
            .values()
            .map(|c| c.gene_links.len() + c.complex_links.len())
            .sum();
        gene_links + complex_links
    }

    #[test]
    fn test_trimmed_model_survives_sbml_roundtrip() {
        let mut gemtractor = Gemtractor::new(test_model());
        let settings = TrimSettingsBuilder::default()
            .filter_genes(vec!["x".to_string()])
            .build()
            .unwrap();
        gemtractor.trim(&settings).unwrap();
        let mut network = gemtractor.extract_network().unwrap();

        let written = gemtractor.model().to_sbml_string().unwrap();
        let mut reread = Gemtractor::new(Model::from_sbml_str(&written).unwrap());
        let mut reread_network = reread.extract_network().unwrap();

        assert_eq!(reread_network.species.len(), network.species.len());
        assert_eq!(reread_network.reactions.len(), network.reactions.len());
        assert_eq!(reread_network.genes.len(), network.genes.len());
        assert_eq!(
            reread_network.gene_complexes.len(),
            network.gene_complexes.len()
        );
        assert!(reread_network.gene_complexes.contains_key("y + z"));
        assert!(reread_network.genes.contains_key("reaction_r3"));

        network.calc_reaction_net();
        network.calc_genenet();
        reread_network.calc_reaction_net();
        reread_network.calc_genenet();
        assert_eq!(
            reaction_link_count(&reread_network),
            reaction_link_count(&network)
        );
        assert_eq!(
            enzyme_link_count(&reread_network),
            enzyme_link_count(&network)
        );
    }
}
