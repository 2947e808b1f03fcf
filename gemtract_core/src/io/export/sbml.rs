//! SBML exports of the derived network views
//!
//! Both views encode their nodes as SBML species and their edges as
//! reactions consuming and producing exactly one species. The trim settings
//! travel along as a model note, gene complexes additionally carry their
//! members as a bqbiol:hasPart annotation.
use std::io::Write;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use tracing::warn;

use crate::gemtractor::TrimSettings;
use crate::io::export::ExportError;
use crate::io::sbml::write_notes;
use crate::network::network::Network;

/// Open the document down to the model element and write the shared parts,
/// audit note and the single compartment
fn begin_network_sbml(
    xml: &mut Writer<Vec<u8>>,
    model_id: &str,
    model_name: &str,
    settings: &TrimSettings,
) -> Result<(), ExportError> {
    xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut sbml = BytesStart::new("sbml");
    sbml.push_attribute(("xmlns", "http://www.sbml.org/sbml/level3/version1/core"));
    sbml.push_attribute(("level", "3"));
    sbml.push_attribute(("version", "1"));
    xml.write_event(Event::Start(sbml))?;

    let mut model = BytesStart::new("model");
    model.push_attribute(("id", model_id));
    model.push_attribute(("name", model_name));
    xml.write_event(Event::Start(model))?;

    write_notes(xml, &settings.describe())?;

    xml.write_event(Event::Start(BytesStart::new("listOfCompartments")))?;
    let mut compartment = BytesStart::new("compartment");
    compartment.push_attribute(("id", "compartment"));
    compartment.push_attribute(("constant", "true"));
    xml.write_event(Event::Empty(compartment))?;
    xml.write_event(Event::End(BytesEnd::new("listOfCompartments")))?;
    Ok(())
}

/// A species element with the boilerplate attributes every network node gets
fn species_element(id: &str, name: &str) -> BytesStart<'static> {
    let mut element = BytesStart::new("species");
    element.push_attribute(("id", id));
    element.push_attribute(("metaid", id));
    element.push_attribute(("name", name));
    element.push_attribute(("compartment", "compartment"));
    element.push_attribute(("hasOnlySubstanceUnits", "false"));
    element.push_attribute(("boundaryCondition", "false"));
    element.push_attribute(("constant", "false"));
    element
}

/// Write one edge as a reaction consuming the source and producing the target
fn write_link_reaction(
    xml: &mut Writer<Vec<u8>>,
    num: usize,
    reactant: &str,
    product: &str,
) -> Result<(), ExportError> {
    let id = format!("r{}", num);
    let mut reaction = BytesStart::new("reaction");
    reaction.push_attribute(("id", id.as_str()));
    reaction.push_attribute(("reversible", "false"));
    reaction.push_attribute(("fast", "false"));
    xml.write_event(Event::Start(reaction))?;

    xml.write_event(Event::Start(BytesStart::new("listOfReactants")))?;
    let mut reference = BytesStart::new("speciesReference");
    reference.push_attribute(("species", reactant));
    xml.write_event(Event::Empty(reference))?;
    xml.write_event(Event::End(BytesEnd::new("listOfReactants")))?;

    xml.write_event(Event::Start(BytesStart::new("listOfProducts")))?;
    let mut reference = BytesStart::new("speciesReference");
    reference.push_attribute(("species", product));
    xml.write_event(Event::Empty(reference))?;
    xml.write_event(Event::End(BytesEnd::new("listOfProducts")))?;

    xml.write_event(Event::End(BytesEnd::new("reaction")))?;
    Ok(())
}

fn end_network_sbml<W: Write>(
    xml: Writer<Vec<u8>>,
    writer: &mut W,
) -> Result<(), ExportError> {
    let bytes = xml.into_inner();
    writer.write_all(&bytes)?;
    Ok(())
}

impl Network {
    /// Export the reaction-centric network in SBML format
    ///
    /// Every reaction of the network becomes a species, every link becomes a
    /// reaction turning the linking reaction into the linked one.
    pub fn write_rn_sbml<W: Write>(
        &mut self,
        writer: &mut W,
        model_id: &str,
        model_name: Option<&str>,
        settings: &TrimSettings,
    ) -> Result<(), ExportError> {
        self.ensure_reaction_net();

        let mut xml = Writer::new_with_indent(Vec::new(), b' ', 2);
        begin_network_sbml(
            &mut xml,
            &format!("{}_GEMtracted_ReactionNetwork", model_id),
            &format!(
                "GEMtracted ReactionNetwork of {}",
                model_name.unwrap_or(model_id)
            ),
            settings,
        )?;

        if !self.reactions.is_empty() {
            xml.write_event(Event::Start(BytesStart::new("listOfSpecies")))?;
            for (identifier, reaction) in &self.reactions {
                xml.write_event(Event::Empty(species_element(identifier, &reaction.name)))?;
            }
            xml.write_event(Event::End(BytesEnd::new("listOfSpecies")))?;
        }

        xml.write_event(Event::Start(BytesStart::new("listOfReactions")))?;
        let mut num = 0;
        for (identifier, reaction) in &self.reactions {
            for target in &reaction.links {
                num += 1;
                write_link_reaction(&mut xml, num, identifier, target)?;
            }
        }
        xml.write_event(Event::End(BytesEnd::new("listOfReactions")))?;

        xml.write_event(Event::End(BytesEnd::new("model")))?;
        xml.write_event(Event::End(BytesEnd::new("sbml")))?;
        end_network_sbml(xml, writer)
    }

    /// Export the enzyme-centric network in SBML format
    ///
    /// Genes and gene complexes become species named after their identifier,
    /// every link becomes a reaction turning the producing catalyst into the
    /// consuming one.
    pub fn write_en_sbml<W: Write>(
        &mut self,
        writer: &mut W,
        model_id: &str,
        model_name: Option<&str>,
        settings: &TrimSettings,
    ) -> Result<(), ExportError> {
        self.ensure_gene_net();
        let nodemap = self.enzyme_node_ids();

        let mut xml = Writer::new_with_indent(Vec::new(), b' ', 2);
        begin_network_sbml(
            &mut xml,
            &format!("{}_GEMtracted_EnzymeNetwork", model_id),
            &format!(
                "GEMtracted EnzymeNetwork of {}",
                model_name.unwrap_or(model_id)
            ),
            settings,
        )?;

        if !nodemap.is_empty() {
            xml.write_event(Event::Start(BytesStart::new("listOfSpecies")))?;
            for identifier in self.genes.keys() {
                if let Some(node) = nodemap.get(identifier) {
                    xml.write_event(Event::Empty(species_element(node, identifier)))?;
                }
            }
            for (identifier, complex) in &self.gene_complexes {
                let node = match nodemap.get(identifier) {
                    Some(node) => node,
                    None => continue,
                };
                let members: String = complex
                    .genes
                    .iter()
                    .filter_map(|gene| nodemap.get(gene))
                    .map(|member| format!("<rdf:li rdf:resource=\"#{}\" />", member))
                    .collect();
                if members.is_empty() {
                    warn!("gene complex has no genes: {}", identifier);
                    xml.write_event(Event::Empty(species_element(node, identifier)))?;
                    continue;
                }
                let annotation = format!(
                    "<annotation><rdf:RDF xmlns:rdf=\"http://www.w3.org/1999/02/22-rdf-syntax-ns#\" xmlns:bqbiol=\"http://biomodels.net/biology-qualifiers/\"><rdf:Description rdf:about=\"#{}\"><bqbiol:hasPart><rdf:Bag>{}</rdf:Bag></bqbiol:hasPart></rdf:Description></rdf:RDF></annotation>",
                    node, members
                );
                xml.write_event(Event::Start(species_element(node, identifier)))?;
                xml.write_event(Event::Text(BytesText::from_escaped(annotation.as_str())))?;
                xml.write_event(Event::End(BytesEnd::new("species")))?;
            }
            xml.write_event(Event::End(BytesEnd::new("listOfSpecies")))?;
        }

        xml.write_event(Event::Start(BytesStart::new("listOfReactions")))?;
        let mut num = 0;
        for (source, target) in self.enzyme_links() {
            let source = match nodemap.get(source) {
                Some(node) => node,
                None => continue,
            };
            let target = match nodemap.get(target) {
                Some(node) => node,
                None => continue,
            };
            num += 1;
            write_link_reaction(&mut xml, num, source, target)?;
        }
        xml.write_event(Event::End(BytesEnd::new("listOfReactions")))?;

        xml.write_event(Event::End(BytesEnd::new("model")))?;
        xml.write_event(Event::End(BytesEnd::new("sbml")))?;
        end_network_sbml(xml, writer)
    }
}

#[cfg(test)]
mod sbml_export_tests {
    use crate::gemtractor::TrimSettings;
    use crate::io::export::test_support::two_step_network;
    use crate::model::model::Model;

    #[test]
    fn test_rn_sbml() {
        let mut network = two_step_network();
        let mut out = Vec::new();
        network
            .write_rn_sbml(&mut out, "toy", Some("toy model"), &TrimSettings::default())
            .unwrap();
        let sbml = String::from_utf8(out).unwrap();

        assert!(sbml.contains("id=\"toy_GEMtracted_ReactionNetwork\""));
        assert!(sbml.contains("name=\"GEMtracted ReactionNetwork of toy model\""));
        assert!(sbml.contains("<p>Remove ghost species: false</p>"));
        assert!(sbml.contains("<compartment id=\"compartment\" constant=\"true\"/>"));
        assert!(sbml.contains("<species id=\"r\" metaid=\"r\" name=\"first\""));
        assert!(sbml.contains("<species id=\"s\" metaid=\"s\" name=\"second\""));
        // The only link is s -> r
        assert!(sbml.contains("<reaction id=\"r1\" reversible=\"false\" fast=\"false\">"));
        assert!(!sbml.contains("<reaction id=\"r2\""));
        let reactants = sbml.find("<listOfReactants>").unwrap();
        let products = sbml.find("<listOfProducts>").unwrap();
        let source = sbml.find("<speciesReference species=\"s\"/>").unwrap();
        let target = sbml.find("<speciesReference species=\"r\"/>").unwrap();
        assert!(reactants < source && source < products && products < target);
    }

    #[test]
    fn test_en_sbml() {
        let mut network = two_step_network();
        let mut out = Vec::new();
        network
            .write_en_sbml(&mut out, "toy", None, &TrimSettings::default())
            .unwrap();
        let sbml = String::from_utf8(out).unwrap();

        assert!(sbml.contains("id=\"toy_GEMtracted_EnzymeNetwork\""));
        assert!(sbml.contains("name=\"GEMtracted EnzymeNetwork of toy\""));
        assert!(sbml.contains("<species id=\"g1\" metaid=\"g1\" name=\"v\""));
        assert!(sbml.contains("<species id=\"gc5\" metaid=\"gc5\" name=\"x + y\""));
        // The complex annotation references its member genes
        assert!(sbml.contains("<bqbiol:hasPart>"));
        assert!(sbml.contains("<rdf:li rdf:resource=\"#g3\" />"));
        assert!(sbml.contains("<rdf:li rdf:resource=\"#g4\" />"));
        // v -> x + y and w -> x + y
        assert!(sbml.contains("<reaction id=\"r1\""));
        assert!(sbml.contains("<reaction id=\"r2\""));
        assert!(sbml.contains("<speciesReference species=\"gc5\"/>"));
    }

    #[test]
    fn test_en_sbml_reads_back_as_model() {
        let mut network = two_step_network();
        let mut out = Vec::new();
        network
            .write_en_sbml(&mut out, "toy", None, &TrimSettings::default())
            .unwrap();
        let sbml = String::from_utf8(out).unwrap();

        let model = Model::from_sbml_str(&sbml).unwrap();
        // One species per gene and complex, one reaction per enzyme link
        assert_eq!(
            model.species.len(),
            network.genes.len() + network.gene_complexes.len()
        );
        assert_eq!(model.reactions.len(), 2);
    }
}
