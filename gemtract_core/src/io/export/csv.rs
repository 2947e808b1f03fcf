//! CSV exports of the network views, one edge per line
use std::io::Write;

use crate::io::export::ExportError;
use crate::network::network::Network;

impl Network {
    /// Export the metabolite-reaction network as a CSV edge list
    pub fn write_mn_csv<W: Write>(&self, writer: &mut W) -> Result<(), ExportError> {
        writeln!(writer, "\"source\",\"target\"")?;
        for (identifier, reaction) in &self.reactions {
            for species in &reaction.consumed {
                writeln!(writer, "\"s{}\",\"r{}\"", species, identifier)?;
            }
            for species in &reaction.produced {
                writeln!(writer, "\"r{}\",\"s{}\"", identifier, species)?;
            }
        }
        Ok(())
    }

    /// Export the reaction-centric network as a CSV edge list
    pub fn write_rn_csv<W: Write>(&mut self, writer: &mut W) -> Result<(), ExportError> {
        self.ensure_reaction_net();
        writeln!(writer, "\"source\",\"target\"")?;
        for (identifier, reaction) in &self.reactions {
            for target in &reaction.links {
                writeln!(writer, "\"{}\",\"{}\"", identifier, target)?;
            }
        }
        Ok(())
    }

    /// Export the enzyme-centric network as a CSV edge list
    pub fn write_en_csv<W: Write>(&mut self, writer: &mut W) -> Result<(), ExportError> {
        self.ensure_gene_net();
        writeln!(writer, "\"source\",\"target\"")?;
        for (source, target) in self.enzyme_links() {
            writeln!(writer, "\"{}\",\"{}\"", source, target)?;
        }
        Ok(())
    }
}
