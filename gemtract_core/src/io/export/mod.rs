//! Module providing the network export formats
//!
//! Each submodule implements one format for the three network views,
//! writing into any [`std::io::Write`] sink.
pub mod csv;
pub mod dot;
pub mod gml;
pub mod graphml;
pub mod sbml;

use indexmap::IndexMap;
use thiserror::Error;

use crate::network::network::Network;

/// Enum representing errors while exporting a network
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Unable to write the export")]
    UnableToWrite(#[from] std::io::Error),
    #[error("XML error")]
    Xml(#[from] quick_xml::Error),
}

impl Network {
    /// Number the enzyme nodes for export, genes first, complexes continuing
    /// the same counter
    pub(crate) fn enzyme_node_ids(&self) -> IndexMap<String, String> {
        let mut nodemap = IndexMap::new();
        let mut num = 0;
        for gene in self.genes.keys() {
            num += 1;
            nodemap.insert(gene.clone(), format!("g{}", num));
        }
        for complex in self.gene_complexes.keys() {
            num += 1;
            nodemap.insert(complex.clone(), format!("gc{}", num));
        }
        nodemap
    }

    /// Enumerate the enzyme network edges in export order, gene sources
    /// before complex sources and gene targets before complex targets
    pub(crate) fn enzyme_links(&self) -> Vec<(&String, &String)> {
        let mut links = Vec::new();
        for (identifier, gene) in &self.genes {
            for target in &gene.gene_links {
                links.push((identifier, target));
            }
            for target in &gene.complex_links {
                links.push((identifier, target));
            }
        }
        for (identifier, complex) in &self.gene_complexes {
            for target in &complex.gene_links {
                links.push((identifier, target));
            }
            for target in &complex.complex_links {
                links.push((identifier, target));
            }
        }
        links
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::network::gene_complex::ComplexBuilder;
    use crate::network::network::Network;

    /// a -r-> b -s-> c with r catalyzed by v or w, s by the complex x + y
    pub(crate) fn two_step_network() -> Network {
        let mut network = Network::new();
        network.add_species("a", "species a");
        network.add_species("b", "species b");
        network.add_species("c", "species c");
        network.add_reaction("r", "first", false);
        network.add_reaction("s", "second", false);
        network.add_reaction_input("r", "a");
        network.add_reaction_output("r", "b");
        network.add_reaction_input("s", "b");
        network.add_reaction_output("s", "c");

        let v = ComplexBuilder::with_gene("v").seal().unwrap();
        let w = ComplexBuilder::with_gene("w").seal().unwrap();
        network.add_genes("r", &[v, w]);

        let mut xy = ComplexBuilder::with_gene("x");
        xy.add_gene("y");
        let xy = xy.seal().unwrap();
        network.add_genes("s", &[xy]);

        network
    }
}
