//! DOT exports of the network views
use std::io::Write;

use crate::io::export::ExportError;
use crate::network::network::Network;

impl Network {
    /// Export the metabolite-reaction network in DOT format
    ///
    /// Species nodes are prefixed with `s`, reaction nodes with `r`, so the
    /// two id spaces cannot collide.
    pub fn write_mn_dot<W: Write>(&self, writer: &mut W) -> Result<(), ExportError> {
        writeln!(writer, "digraph GEMtractor {{")?;
        for identifier in self.species.keys() {
            writeln!(writer, "\ts{} [label=\"{}\"];", identifier, identifier)?;
        }
        for (identifier, reaction) in &self.reactions {
            writeln!(
                writer,
                "\tr{} [label=\"{}\" shape=box];",
                identifier, identifier
            )?;
            for species in &reaction.consumed {
                writeln!(writer, "\ts{} -> r{};", species, identifier)?;
            }
            for species in &reaction.produced {
                writeln!(writer, "\tr{} -> s{};", identifier, species)?;
            }
        }
        writeln!(writer, "}}")?;
        Ok(())
    }

    /// Export the reaction-centric network in DOT format
    pub fn write_rn_dot<W: Write>(&mut self, writer: &mut W) -> Result<(), ExportError> {
        self.ensure_reaction_net();
        writeln!(writer, "digraph GEMtractor {{")?;
        for (identifier, reaction) in &self.reactions {
            writeln!(writer, "\t{} [label=\"{}\"];", identifier, reaction.name)?;
        }
        for (identifier, reaction) in &self.reactions {
            for target in &reaction.links {
                writeln!(writer, "\t{} -> {};", identifier, target)?;
            }
        }
        writeln!(writer, "}}")?;
        Ok(())
    }

    /// Export the enzyme-centric network in DOT format
    pub fn write_en_dot<W: Write>(&mut self, writer: &mut W) -> Result<(), ExportError> {
        self.ensure_gene_net();
        let nodemap = self.enzyme_node_ids();
        writeln!(writer, "digraph GEMtractor {{")?;
        for (identifier, node) in &nodemap {
            writeln!(writer, "\t{} [label=\"{}\"];", node, identifier)?;
        }
        for (source, target) in self.enzyme_links() {
            let source = match nodemap.get(source) {
                Some(node) => node,
                None => continue,
            };
            let target = match nodemap.get(target) {
                Some(node) => node,
                None => continue,
            };
            writeln!(writer, "\t{} -> {};", source, target)?;
        }
        writeln!(writer, "}}")?;
        Ok(())
    }
}
