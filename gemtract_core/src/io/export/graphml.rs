//! GraphML exports of the network views
//!
//! The output carries yFiles layout hints, so the graphs open nicely in
//! editors of the yEd family.
use std::io::Write;

use crate::io::export::ExportError;
use crate::network::network::Network;

fn write_graphml_prefix<W: Write>(writer: &mut W) -> Result<(), ExportError> {
    writeln!(writer, "<graphml xmlns=\"http://graphml.graphdrawing.org/xmlns\"")?;
    writeln!(writer, "\txmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\"")?;
    writeln!(
        writer,
        "\txsi:schemaLocation=\"http://graphml.graphdrawing.org/xmlns/1.0/graphml.xsd\""
    )?;
    writeln!(writer, "\txmlns:y=\"http://www.yworks.com/xml/graphml\">")?;
    writeln!(writer)?;
    writeln!(
        writer,
        "\t<key for=\"node\" id=\"layout\" yfiles.type=\"nodegraphics\"/>"
    )?;
    writeln!(
        writer,
        "\t<key for=\"node\" id=\"type\" attr.type=\"string\"><default>species</default></key>"
    )?;
    writeln!(writer, "\t<graph id=\"GEMtractor\" edgedefault=\"directed\">")?;
    Ok(())
}

fn write_graphml_node<W: Write>(
    writer: &mut W,
    id: &str,
    node_type: &str,
    shape: &str,
    label: &str,
) -> Result<(), ExportError> {
    writeln!(writer, "\t\t<node id=\"{}\">", id)?;
    writeln!(writer, "\t\t\t<data key=\"type\">{}</data>", node_type)?;
    writeln!(writer, "\t\t\t<data key=\"layout\">")?;
    writeln!(writer, "\t\t\t\t<y:ShapeNode>")?;
    writeln!(writer, "\t\t\t\t\t<y:Shape type=\"{}\"/>", shape)?;
    writeln!(writer, "\t\t\t\t\t<y:NodeLabel>{}</y:NodeLabel>", label)?;
    writeln!(writer, "\t\t\t\t</y:ShapeNode>")?;
    writeln!(writer, "\t\t\t</data>")?;
    writeln!(writer, "\t\t</node>")?;
    Ok(())
}

fn write_graphml_edge<W: Write>(
    writer: &mut W,
    num: usize,
    source: &str,
    target: &str,
) -> Result<(), ExportError> {
    writeln!(
        writer,
        "\t\t<edge id=\"e{}\" source=\"{}\" target=\"{}\"/>",
        num, source, target
    )?;
    Ok(())
}

fn write_graphml_suffix<W: Write>(writer: &mut W) -> Result<(), ExportError> {
    writeln!(writer, "\t</graph>")?;
    writeln!(writer, "</graphml>")?;
    Ok(())
}

impl Network {
    /// Export the metabolite-reaction network in GraphML format
    pub fn write_mn_graphml<W: Write>(&self, writer: &mut W) -> Result<(), ExportError> {
        write_graphml_prefix(writer)?;
        for identifier in self.species.keys() {
            write_graphml_node(
                writer,
                &format!("s{}", identifier),
                "species",
                "ellipse",
                identifier,
            )?;
        }
        let mut num = 0;
        for (identifier, reaction) in &self.reactions {
            let rid = format!("r{}", identifier);
            write_graphml_node(writer, &rid, "reaction", "rectangle", identifier)?;
            for species in &reaction.consumed {
                num += 1;
                write_graphml_edge(writer, num, &format!("s{}", species), &rid)?;
            }
            for species in &reaction.produced {
                num += 1;
                write_graphml_edge(writer, num, &rid, &format!("s{}", species))?;
            }
        }
        write_graphml_suffix(writer)
    }

    /// Export the reaction-centric network in GraphML format
    pub fn write_rn_graphml<W: Write>(&mut self, writer: &mut W) -> Result<(), ExportError> {
        self.ensure_reaction_net();
        write_graphml_prefix(writer)?;
        for (identifier, reaction) in &self.reactions {
            write_graphml_node(writer, identifier, "reaction", "ellipse", &reaction.name)?;
        }
        let mut num = 0;
        for (identifier, reaction) in &self.reactions {
            for target in &reaction.links {
                num += 1;
                write_graphml_edge(writer, num, identifier, target)?;
            }
        }
        write_graphml_suffix(writer)
    }

    /// Export the enzyme-centric network in GraphML format
    pub fn write_en_graphml<W: Write>(&mut self, writer: &mut W) -> Result<(), ExportError> {
        self.ensure_gene_net();
        let nodemap = self.enzyme_node_ids();
        write_graphml_prefix(writer)?;
        for identifier in self.genes.keys() {
            if let Some(node) = nodemap.get(identifier) {
                write_graphml_node(writer, node, "enzyme", "ellipse", identifier)?;
            }
        }
        for identifier in self.gene_complexes.keys() {
            if let Some(node) = nodemap.get(identifier) {
                write_graphml_node(writer, node, "enzyme_complex", "ellipse", identifier)?;
            }
        }
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
            write_graphml_edge(writer, num, source, target)?;
        }
        write_graphml_suffix(writer)
    }
}

#[cfg(test)]
mod graphml_tests {
    use crate::io::export::test_support::two_step_network;

    #[test]
    fn test_mn_graphml() {
        let network = two_step_network();
        let mut out = Vec::new();
        network.write_mn_graphml(&mut out).unwrap();
        let graphml = String::from_utf8(out).unwrap();

        assert!(graphml.starts_with("<graphml xmlns=\"http://graphml.graphdrawing.org/xmlns\"\n"));
        assert!(graphml.ends_with("\t</graph>\n</graphml>\n"));
        assert!(graphml.contains("\t\t<node id=\"sa\">\n\t\t\t<data key=\"type\">species</data>\n"));
        assert!(graphml.contains("\t\t<node id=\"rr\">\n\t\t\t<data key=\"type\">reaction</data>\n"));
        assert!(graphml.contains("<y:Shape type=\"rectangle\"/>"));
        assert!(graphml.contains("\t\t<edge id=\"e1\" source=\"sa\" target=\"rr\"/>\n"));
        assert!(graphml.contains("\t\t<edge id=\"e2\" source=\"rr\" target=\"sb\"/>\n"));
    }

    #[test]
    fn test_rn_graphml() {
        let mut network = two_step_network();
        let mut out = Vec::new();
        network.write_rn_graphml(&mut out).unwrap();
        let graphml = String::from_utf8(out).unwrap();

        assert!(graphml.contains("<y:NodeLabel>first</y:NodeLabel>"));
        assert!(graphml.contains("\t\t<edge id=\"e1\" source=\"s\" target=\"r\"/>\n"));
    }

    #[test]
    fn test_en_graphml() {
        let mut network = two_step_network();
        let mut out = Vec::new();
        network.write_en_graphml(&mut out).unwrap();
        let graphml = String::from_utf8(out).unwrap();

        assert!(graphml.contains("\t\t<node id=\"g1\">\n\t\t\t<data key=\"type\">enzyme</data>\n"));
        assert!(graphml
            .contains("\t\t<node id=\"gc5\">\n\t\t\t<data key=\"type\">enzyme_complex</data>\n"));
        assert!(graphml.contains("<y:NodeLabel>x + y</y:NodeLabel>"));
        assert!(graphml.contains("\t\t<edge id=\"e1\" source=\"g1\" target=\"gc5\"/>\n"));
        assert!(graphml.contains("\t\t<edge id=\"e2\" source=\"g2\" target=\"gc5\"/>\n"));
    }
}
