//! GML exports of the network views
//!
//! GML nodes are addressed by integers, so every view numbers its nodes
//! while writing them.
use std::io::Write;

use indexmap::IndexMap;

use crate::io::export::ExportError;
use crate::network::network::Network;

fn write_gml_prefix<W: Write>(writer: &mut W) -> Result<(), ExportError> {
    writeln!(writer, "graph [")?;
    writeln!(writer, "\tcomment \"generated using the GEMtractor\"")?;
    writeln!(writer, "\tdirected 1")?;
    Ok(())
}

fn write_gml_node<W: Write>(writer: &mut W, id: usize, label: &str) -> Result<(), ExportError> {
    writeln!(writer, "\tnode [")?;
    writeln!(writer, "\t\tid {}", id)?;
    writeln!(writer, "\t\tlabel \"{}\"", label)?;
    writeln!(writer, "\t]")?;
    Ok(())
}

fn write_gml_edge<W: Write>(writer: &mut W, source: usize, target: usize) -> Result<(), ExportError> {
    writeln!(writer, "\tedge [")?;
    writeln!(writer, "\t\tsource {}", source)?;
    writeln!(writer, "\t\ttarget {}", target)?;
    writeln!(writer, "\t]")?;
    Ok(())
}

impl Network {
    /// Export the metabolite-reaction network in GML format
    pub fn write_mn_gml<W: Write>(&self, writer: &mut W) -> Result<(), ExportError> {
        write_gml_prefix(writer)?;

        let mut nodemap: IndexMap<&String, usize> = IndexMap::new();
        let mut num = 0;
        for identifier in self.species.keys() {
            num += 1;
            nodemap.insert(identifier, num);
            write_gml_node(writer, num, identifier)?;
        }
        for (identifier, reaction) in &self.reactions {
            num += 1;
            write_gml_node(writer, num, identifier)?;
            for species in &reaction.consumed {
                if let Some(source) = nodemap.get(species) {
                    write_gml_edge(writer, *source, num)?;
                }
            }
            for species in &reaction.produced {
                if let Some(target) = nodemap.get(species) {
                    write_gml_edge(writer, num, *target)?;
                }
            }
        }
        writeln!(writer, "]")?;
        Ok(())
    }

    /// Export the reaction-centric network in GML format
    pub fn write_rn_gml<W: Write>(&mut self, writer: &mut W) -> Result<(), ExportError> {
        self.ensure_reaction_net();
        write_gml_prefix(writer)?;

        let mut nodemap: IndexMap<&String, usize> = IndexMap::new();
        let mut num = 0;
        for (identifier, reaction) in &self.reactions {
            num += 1;
            nodemap.insert(identifier, num);
            write_gml_node(writer, num, &reaction.name)?;
        }
        for (identifier, reaction) in &self.reactions {
            for target in &reaction.links {
                if let (Some(source), Some(target)) = (nodemap.get(identifier), nodemap.get(target))
                {
                    write_gml_edge(writer, *source, *target)?;
                }
            }
        }
        writeln!(writer, "]")?;
        Ok(())
    }

    /// Export the enzyme-centric network in GML format
    pub fn write_en_gml<W: Write>(&mut self, writer: &mut W) -> Result<(), ExportError> {
        self.ensure_gene_net();
        write_gml_prefix(writer)?;

        let mut nodemap: IndexMap<&String, usize> = IndexMap::new();
        let mut num = 0;
        for identifier in self.genes.keys() {
            num += 1;
            nodemap.insert(identifier, num);
            write_gml_node(writer, num, identifier)?;
        }
        for identifier in self.gene_complexes.keys() {
            num += 1;
            nodemap.insert(identifier, num);
            write_gml_node(writer, num, identifier)?;
        }
        for (source, target) in self.enzyme_links() {
            if let (Some(source), Some(target)) = (nodemap.get(source), nodemap.get(target)) {
                write_gml_edge(writer, *source, *target)?;
            }
        }
        writeln!(writer, "]")?;
        Ok(())
    }
}
