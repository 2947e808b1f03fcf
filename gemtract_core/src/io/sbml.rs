//! Module providing SBML IO for gemtract Models
//!
//! Reading understands gene associations in two flavors, the fbc package's
//! geneProductAssociation trees and the classic GENE_ASSOCIATION note
//! convention. When both are present fbc wins. Writing always persists the
//! association as a note, so a written model can be read back without the
//! fbc package.
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use indexmap::IndexMap;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use regex::Regex;
use thiserror::Error;
use tracing::{debug, info};

use crate::model::model::Model;
use crate::model::reaction::Reaction;
use crate::model::species::Species;

/// Matches the gene association convention in reaction notes, like
/// `<p>GENE_ASSOCIATION: a or b</p>`
static ASSOCIATION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("(?s)GENE_ASSOCIATION:([^<]+)<").expect("the association pattern is valid")
});

/// Matches a single paragraph in a notes body
static PARAGRAPH_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("(?s)<p[^>]*>(.*?)</p>").expect("the paragraph pattern is valid"));

/// Enum representing errors while reading or writing SBML
#[derive(Error, Debug)]
pub enum SbmlError {
    #[error("Unable to read file due to {0}")]
    UnableToRead(String),
    #[error("Unable to parse SBML due to {0}")]
    UnableToParse(String),
    #[error("The document does not contain a model")]
    NoModel,
    #[error("Missing attribute {attribute} on element {element}")]
    MissingAttribute { element: String, attribute: String },
    #[error("XML error")]
    Xml(#[from] quick_xml::Error),
    #[error("Unable to write to file")]
    UnableToWrite(#[from] std::io::Error),
}

// region Reading

/// A node in an fbc geneProductAssociation tree
#[derive(Debug, Clone, PartialEq, Eq)]
enum FbcNode {
    Ref(String),
    And(Vec<FbcNode>),
    Or(Vec<FbcNode>),
}

impl FbcNode {
    /// Render the tree into an association string, resolving gene product
    /// ids to their labels
    fn render(&self, labels: &IndexMap<String, String>) -> String {
        match self {
            FbcNode::Ref(gene) => labels.get(gene).cloned().unwrap_or_else(|| gene.clone()),
            FbcNode::And(children) => FbcNode::join(children, " and ", labels),
            FbcNode::Or(children) => FbcNode::join(children, " or ", labels),
        }
    }

    /// Join the children with an operator, composite children get
    /// parenthesized
    fn join(children: &[FbcNode], operator: &str, labels: &IndexMap<String, String>) -> String {
        let parts: Vec<String> = children
            .iter()
            .map(|child| match child {
                FbcNode::Ref(_) => child.render(labels),
                _ => format!("({})", child.render(labels)),
            })
            .collect();
        parts.join(operator)
    }
}

/// Find an attribute by its local name, ignoring namespace prefixes
fn attribute(element: &BytesStart, name: &[u8]) -> Option<String> {
    for attr in element.attributes().flatten() {
        if attr.key.local_name().as_ref() == name {
            return attr.unescape_value().ok().map(|value| value.into_owned());
        }
    }
    None
}

/// Like [attribute], but the attribute must be present
fn required_attribute(element: &BytesStart, name: &[u8]) -> Result<String, SbmlError> {
    match attribute(element, name) {
        Some(value) => Ok(value),
        None => Err(SbmlError::MissingAttribute {
            element: String::from_utf8_lossy(element.local_name().as_ref()).into_owned(),
            attribute: String::from_utf8_lossy(name).into_owned(),
        }),
    }
}

/// Parse the children of an fbc association element until its end tag
fn read_fbc_children(reader: &mut Reader<&[u8]>, end: &[u8]) -> Result<Vec<FbcNode>, SbmlError> {
    let mut children = Vec::new();
    loop {
        match reader.read_event()? {
            Event::Start(element) => match element.local_name().as_ref() {
                b"and" => children.push(FbcNode::And(read_fbc_children(reader, b"and")?)),
                b"or" => children.push(FbcNode::Or(read_fbc_children(reader, b"or")?)),
                b"geneProductRef" => {
                    if let Some(gene) = attribute(&element, b"geneProduct") {
                        children.push(FbcNode::Ref(gene));
                    }
                    reader.read_to_end(element.name())?;
                }
                _ => {
                    reader.read_to_end(element.name())?;
                }
            },
            Event::Empty(element) => {
                if element.local_name().as_ref() == b"geneProductRef" {
                    if let Some(gene) = attribute(&element, b"geneProduct") {
                        children.push(FbcNode::Ref(gene));
                    }
                }
            }
            Event::End(element) => {
                if element.local_name().as_ref() == end {
                    return Ok(children);
                }
            }
            Event::Eof => {
                return Err(SbmlError::UnableToParse(
                    "unexpected end of document inside a gene product association".to_string(),
                ))
            }
            _ => {}
        }
    }
}

/// Which participant list of a reaction is currently being read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParticipantList {
    None,
    Reactants,
    Products,
}

impl Model {
    /// Read a model from an SBML file
    pub fn read_sbml<P: AsRef<Path>>(path: P) -> Result<Model, SbmlError> {
        let sbml_data = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(err) => return Err(SbmlError::UnableToRead(format!("{:?}", err))),
        };
        Model::from_sbml_str(&sbml_data)
    }

    /// Write the model to an SBML file
    pub fn write_sbml<P: AsRef<Path>>(&self, path: P) -> Result<(), SbmlError> {
        let sbml_string = self.to_sbml_string()?;
        fs::write(path, sbml_string)?;
        Ok(())
    }

    /// Parse a model from an SBML string
    pub fn from_sbml_str(sbml_data: &str) -> Result<Model, SbmlError> {
        let mut reader = Reader::from_str(sbml_data);
        reader.trim_text(true);

        let mut model = Model::new_empty();
        let mut found_model = false;
        let mut current_reaction: Option<Reaction> = None;
        let mut current_list = ParticipantList::None;
        // fbc associations are resolved at the end of the document, the
        // gene product labels they point to may be defined anywhere
        let mut fbc_associations: IndexMap<String, FbcNode> = IndexMap::new();
        let mut gene_products: IndexMap<String, String> = IndexMap::new();

        loop {
            match reader.read_event()? {
                Event::Start(element) => match element.local_name().as_ref() {
                    b"model" => {
                        found_model = true;
                        model.id = attribute(&element, b"id").unwrap_or_default();
                        model.name = attribute(&element, b"name").unwrap_or_default();
                    }
                    b"species" => {
                        let id = required_attribute(&element, b"id")?;
                        let name = attribute(&element, b"name");
                        model.add_species(Species::new(id, name));
                        reader.read_to_end(element.name())?;
                    }
                    b"reaction" => {
                        let id = required_attribute(&element, b"id")?;
                        let reversible = !matches!(
                            attribute(&element, b"reversible").as_deref(),
                            Some("false") | Some("0")
                        );
                        current_reaction = Some(Reaction {
                            id,
                            name: attribute(&element, b"name"),
                            reversible,
                            reactants: Vec::new(),
                            products: Vec::new(),
                            modifiers: Vec::new(),
                            gene_association: None,
                            notes: None,
                        });
                    }
                    b"listOfReactants" => current_list = ParticipantList::Reactants,
                    b"listOfProducts" => current_list = ParticipantList::Products,
                    b"speciesReference" => {
                        let species = required_attribute(&element, b"species")?;
                        push_participant(&mut current_reaction, current_list, species);
                        reader.read_to_end(element.name())?;
                    }
                    b"modifierSpeciesReference" => {
                        let species = required_attribute(&element, b"species")?;
                        if let Some(reaction) = current_reaction.as_mut() {
                            reaction.modifiers.push(species);
                        }
                        reader.read_to_end(element.name())?;
                    }
                    b"notes" => {
                        let raw = reader.read_text(element.name())?.into_owned();
                        match current_reaction.as_mut() {
                            Some(reaction) => reaction.notes = Some(raw),
                            None => {
                                for capture in PARAGRAPH_PATTERN.captures_iter(&raw) {
                                    model.append_note(capture[1].trim().to_string());
                                }
                            }
                        }
                    }
                    b"geneProductAssociation" => {
                        let children = read_fbc_children(&mut reader, b"geneProductAssociation")?;
                        if let (Some(reaction), Some(node)) =
                            (current_reaction.as_ref(), children.into_iter().next())
                        {
                            fbc_associations.insert(reaction.id.clone(), node);
                        }
                    }
                    b"geneProduct" => {
                        let id = required_attribute(&element, b"id")?;
                        let label = attribute(&element, b"label").unwrap_or_else(|| id.clone());
                        gene_products.insert(id, label);
                        reader.read_to_end(element.name())?;
                    }
                    b"annotation" | b"kineticLaw" => {
                        reader.read_to_end(element.name())?;
                    }
                    _ => {}
                },
                Event::Empty(element) => match element.local_name().as_ref() {
                    b"species" => {
                        let id = required_attribute(&element, b"id")?;
                        let name = attribute(&element, b"name");
                        model.add_species(Species::new(id, name));
                    }
                    b"speciesReference" => {
                        let species = required_attribute(&element, b"species")?;
                        push_participant(&mut current_reaction, current_list, species);
                    }
                    b"modifierSpeciesReference" => {
                        let species = required_attribute(&element, b"species")?;
                        if let Some(reaction) = current_reaction.as_mut() {
                            reaction.modifiers.push(species);
                        }
                    }
                    b"geneProduct" => {
                        let id = required_attribute(&element, b"id")?;
                        let label = attribute(&element, b"label").unwrap_or_else(|| id.clone());
                        gene_products.insert(id, label);
                    }
                    _ => {}
                },
                Event::End(element) => match element.local_name().as_ref() {
                    b"reaction" => {
                        if let Some(reaction) = current_reaction.take() {
                            model.add_reaction(reaction);
                        }
                    }
                    b"listOfReactants" | b"listOfProducts" => {
                        current_list = ParticipantList::None
                    }
                    _ => {}
                },
                Event::Eof => break,
                _ => {}
            }
        }

        if !found_model {
            return Err(SbmlError::NoModel);
        }

        // Resolve the gene associations, fbc trees take precedence over the
        // note convention
        for reaction in model.reactions.values_mut() {
            if let Some(node) = fbc_associations.get(&reaction.id) {
                reaction.gene_association = Some(node.render(&gene_products));
            } else if let Some(notes) = &reaction.notes {
                if let Some(capture) = ASSOCIATION_PATTERN.captures(notes) {
                    let association = capture[1].trim().to_string();
                    if !association.is_empty() {
                        reaction.gene_association = Some(association);
                    }
                }
            }
        }

        info!(
            "read model {} with {} species and {} reactions",
            model.id,
            model.species.len(),
            model.reactions.len()
        );
        Ok(model)
    }

    /// Serialize the model to an SBML string
    pub fn to_sbml_string(&self) -> Result<String, SbmlError> {
        debug!("serializing model {}", self.id);
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        let mut sbml = BytesStart::new("sbml");
        sbml.push_attribute(("xmlns", "http://www.sbml.org/sbml/level3/version1/core"));
        sbml.push_attribute(("level", "3"));
        sbml.push_attribute(("version", "1"));
        writer.write_event(Event::Start(sbml))?;

        let mut model = BytesStart::new("model");
        model.push_attribute(("id", self.id.as_str()));
        if !self.name.is_empty() {
            model.push_attribute(("name", self.name.as_str()));
        }
        writer.write_event(Event::Start(model))?;

        if !self.notes.is_empty() {
            write_notes(&mut writer, &self.notes)?;
        }

        if !self.species.is_empty() {
            writer.write_event(Event::Start(BytesStart::new("listOfSpecies")))?;
            for species in self.species.values() {
                let mut element = BytesStart::new("species");
                element.push_attribute(("id", species.id.as_str()));
                if let Some(name) = &species.name {
                    element.push_attribute(("name", name.as_str()));
                }
                writer.write_event(Event::Empty(element))?;
            }
            writer.write_event(Event::End(BytesEnd::new("listOfSpecies")))?;
        }

        if !self.reactions.is_empty() {
            writer.write_event(Event::Start(BytesStart::new("listOfReactions")))?;
            for reaction in self.reactions.values() {
                let mut element = BytesStart::new("reaction");
                element.push_attribute(("id", reaction.id.as_str()));
                if let Some(name) = &reaction.name {
                    element.push_attribute(("name", name.as_str()));
                }
                element.push_attribute((
                    "reversible",
                    if reaction.reversible { "true" } else { "false" },
                ));
                writer.write_event(Event::Start(element))?;

                if let Some(notes) = merged_reaction_notes(reaction) {
                    writer.write_event(Event::Start(BytesStart::new("notes")))?;
                    writer.write_event(Event::Text(BytesText::from_escaped(notes.as_str())))?;
                    writer.write_event(Event::End(BytesEnd::new("notes")))?;
                }

                write_participants(&mut writer, "listOfReactants", &reaction.reactants)?;
                write_participants(&mut writer, "listOfProducts", &reaction.products)?;
                if !reaction.modifiers.is_empty() {
                    writer.write_event(Event::Start(BytesStart::new("listOfModifiers")))?;
                    for species in &reaction.modifiers {
                        let mut reference = BytesStart::new("modifierSpeciesReference");
                        reference.push_attribute(("species", species.as_str()));
                        writer.write_event(Event::Empty(reference))?;
                    }
                    writer.write_event(Event::End(BytesEnd::new("listOfModifiers")))?;
                }

                writer.write_event(Event::End(BytesEnd::new("reaction")))?;
            }
            writer.write_event(Event::End(BytesEnd::new("listOfReactions")))?;
        }

        writer.write_event(Event::End(BytesEnd::new("model")))?;
        writer.write_event(Event::End(BytesEnd::new("sbml")))?;

        let bytes = writer.into_inner();
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// Push a species reference into the participant list currently being read
fn push_participant(
    current_reaction: &mut Option<Reaction>,
    current_list: ParticipantList,
    species: String,
) {
    let reaction = match current_reaction.as_mut() {
        Some(reaction) => reaction,
        None => return,
    };
    match current_list {
        ParticipantList::Reactants => reaction.reactants.push(species),
        ParticipantList::Products => reaction.products.push(species),
        ParticipantList::None => {}
    }
}

// endregion Reading

// region Writing

/// Write a notes element wrapping the paragraphs in an XHTML body
pub(crate) fn write_notes(
    writer: &mut Writer<Vec<u8>>,
    paragraphs: &[String],
) -> Result<(), quick_xml::Error> {
    writer.write_event(Event::Start(BytesStart::new("notes")))?;
    let mut body = BytesStart::new("body");
    body.push_attribute(("xmlns", "http://www.w3.org/1999/xhtml"));
    writer.write_event(Event::Start(body))?;
    for note in paragraphs {
        writer.write_event(Event::Start(BytesStart::new("p")))?;
        writer.write_event(Event::Text(BytesText::new(note)))?;
        writer.write_event(Event::End(BytesEnd::new("p")))?;
    }
    writer.write_event(Event::End(BytesEnd::new("body")))?;
    writer.write_event(Event::End(BytesEnd::new("notes")))?;
    Ok(())
}

/// Merge the reaction's raw notes with its gene association
///
/// An existing GENE_ASSOCIATION note is updated in place, otherwise a new
/// paragraph is attached. The raw notes are kept as they were read.
fn merged_reaction_notes(reaction: &Reaction) -> Option<String> {
    let association = match &reaction.gene_association {
        Some(association) => association,
        None => return reaction.notes.clone(),
    };
    match &reaction.notes {
        Some(notes) => {
            if ASSOCIATION_PATTERN.is_match(notes) {
                Some(
                    ASSOCIATION_PATTERN
                        .replace(notes, format!("GENE_ASSOCIATION: {}<", association))
                        .into_owned(),
                )
            } else if notes.contains("</body>") {
                Some(notes.replacen(
                    "</body>",
                    &format!("<p>GENE_ASSOCIATION: {}</p></body>", association),
                    1,
                ))
            } else {
                Some(format!(
                    "{}<p>GENE_ASSOCIATION: {}</p>",
                    notes, association
                ))
            }
        }
        None => Some(format!(
            "<body xmlns=\"http://www.w3.org/1999/xhtml\"><p>GENE_ASSOCIATION: {}</p></body>",
            association
        )),
    }
}

/// Write one participant list of a reaction
fn write_participants(
    writer: &mut Writer<Vec<u8>>,
    list: &str,
    participants: &[String],
) -> Result<(), SbmlError> {
    if participants.is_empty() {
        return Ok(());
    }
    writer.write_event(Event::Start(BytesStart::new(list)))?;
    for species in participants {
        let mut reference = BytesStart::new("speciesReference");
        reference.push_attribute(("species", species.as_str()));
        writer.write_event(Event::Empty(reference))?;
    }
    writer.write_event(Event::End(BytesEnd::new(list)))?;
    Ok(())
}

// endregion Writing
