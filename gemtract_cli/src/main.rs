//! GEMtractor CLI.
//!
//! Provides the `gemtract` binary with subcommands for trimming genome scale
//! metabolic models and for exporting the networks encoded in them. `trim`
//! reads an SBML file, applies the requested filters and writes the trimmed
//! model back out as SBML. `export` runs the same trim pipeline and then
//! emits one of the derived network views in a choice of graph formats.
//!
//! Both subcommands share the `gemtract_core` pipeline, so a trimmed model
//! and a network exported with the same flags always agree.

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::{Args, Parser, Subcommand};
use tracing::info;

use gemtract_core::configuration::CONFIGURATION;
use gemtract_core::gemtractor::{Gemtractor, TrimSettings};
use gemtract_core::io::export::ExportError;
use gemtract_core::model::model::Model;
use gemtract_core::network::network::Network;

/// GEMtractor: trim genome scale metabolic models and extract their networks.
#[derive(Parser)]
#[command(
    name = "gemtract",
    about = "Trim genome scale metabolic models and extract their networks"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Trim a model and write the result as SBML.
    Trim {
        /// Path to the SBML input file.
        input: PathBuf,

        /// Output file (default: stdout).
        #[arg(short, long)]
        out: Option<PathBuf>,

        #[command(flatten)]
        trim: TrimArgs,
    },

    /// Trim a model, derive a network view and export it.
    Export {
        /// Path to the SBML input file.
        input: PathBuf,

        /// Output file (default: stdout).
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Network view: mn (metabolite-reaction), rn (reaction-centric)
        /// or en (enzyme-centric).
        #[arg(short, long, default_value = "rn")]
        network: String,

        /// Output format: dot, gml, graphml, csv, sbml or json. The json
        /// format serializes every view at once and ignores --network.
        #[arg(short, long, default_value = "dot")]
        format: String,

        /// Upper limit on network entities (default: 100000).
        #[arg(long)]
        max_entities: Option<usize>,

        #[command(flatten)]
        trim: TrimArgs,
    },
}

/// Trim settings shared by all subcommands.
#[derive(Args)]
struct TrimArgs {
    /// Species ids to get rid of, comma separated.
    #[arg(long, value_delimiter = ',')]
    filter_species: Vec<String>,

    /// Reaction ids to get rid of, comma separated.
    #[arg(long, value_delimiter = ',')]
    filter_reactions: Vec<String>,

    /// Enzyme ids to get rid of, comma separated.
    #[arg(long, value_delimiter = ',')]
    filter_genes: Vec<String>,

    /// Enzyme complex ids to get rid of, comma separated. Member order and
    /// spacing do not matter, 'b+a' matches the complex 'a + b'.
    #[arg(long, value_delimiter = ',')]
    filter_gene_complexes: Vec<String>,

    /// Keep reactions even if all their enzymes were removed.
    #[arg(long)]
    keep_enzymeless_reactions: bool,

    /// Remove species that no longer participate in any reaction.
    #[arg(long)]
    remove_ghost_species: bool,

    /// Discard the fake enzymes assumed for unannotated reactions.
    #[arg(long)]
    discard_fake_enzymes: bool,

    /// Remove reactions that lost one of their participating species.
    #[arg(long)]
    remove_reactions_missing_species: bool,

    /// Keep enzyme complexes even if a member enzyme was removed.
    #[arg(long)]
    keep_affected_complexes: bool,
}

impl TrimArgs {
    fn into_settings(self) -> TrimSettings {
        TrimSettings {
            filter_species: self.filter_species,
            filter_reactions: self.filter_reactions,
            filter_genes: self.filter_genes,
            filter_gene_complexes: self.filter_gene_complexes,
            remove_reaction_enzymes_removed: !self.keep_enzymeless_reactions,
            remove_ghost_species: self.remove_ghost_species,
            discard_fake_enzymes: self.discard_fake_enzymes,
            remove_reaction_missing_species: self.remove_reactions_missing_species,
            removing_enzyme_removes_complex: !self.keep_affected_complexes,
        }
    }
}

/// Network view selected on the command line.
#[derive(Clone, Copy, PartialEq)]
enum View {
    Mn,
    Rn,
    En,
}

/// Export format selected on the command line.
#[derive(Clone, Copy, PartialEq)]
enum Format {
    Dot,
    Gml,
    GraphMl,
    Csv,
    Sbml,
    Json,
}

fn main() {
    // Exported data goes to stdout, so log to stderr only.
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let cli = Cli::parse();

    let exit_code = match cli.command {
        Commands::Trim { input, out, trim } => run_trim(&input, out.as_deref(), trim),
        Commands::Export {
            input,
            out,
            network,
            format,
            max_entities,
            trim,
        } => run_export(&input, out.as_deref(), &network, &format, max_entities, trim),
    };
    process::exit(exit_code);
}

/// Execute the trim subcommand.
///
/// Returns exit code: 0 = success, 1 = trim error, 3 = I/O error.
fn run_trim(input: &Path, out: Option<&Path>, trim: TrimArgs) -> i32 {
    let model = match Model::read_sbml(input) {
        Ok(model) => model,
        Err(err) => {
            eprintln!("Error: failed to read '{}': {}", input.display(), err);
            return 3;
        }
    };
    info!(
        "read model {} with {} species and {} reactions",
        model.id,
        model.species.len(),
        model.reactions.len()
    );

    let settings = trim.into_settings();
    let mut gemtractor = Gemtractor::new(model);
    if let Err(err) = gemtractor.trim(&settings) {
        eprintln!("Error: failed to trim the model: {}", err);
        return 1;
    }
    let model = gemtractor.into_model();
    info!(
        "trimmed model keeps {} species and {} reactions",
        model.species.len(),
        model.reactions.len()
    );

    match out {
        Some(path) => {
            if let Err(err) = model.write_sbml(path) {
                eprintln!("Error: failed to write '{}': {}", path.display(), err);
                return 3;
            }
        }
        None => {
            let sbml = match model.to_sbml_string() {
                Ok(sbml) => sbml,
                Err(err) => {
                    eprintln!("Error: failed to serialize the model: {}", err);
                    return 3;
                }
            };
            print!("{}", sbml);
        }
    }
    0
}

/// Execute the export subcommand.
///
/// Returns exit code: 0 = success, 1 = trim or entity limit error,
/// 2 = usage error, 3 = I/O error.
fn run_export(
    input: &Path,
    out: Option<&Path>,
    view: &str,
    format: &str,
    max_entities: Option<usize>,
    trim: TrimArgs,
) -> i32 {
    let view = match parse_view(view) {
        Ok(view) => view,
        Err(msg) => {
            eprintln!("Error: {}", msg);
            return 2;
        }
    };
    let format = match parse_format(format) {
        Ok(format) => format,
        Err(msg) => {
            eprintln!("Error: {}", msg);
            return 2;
        }
    };
    if view == View::Mn && format == Format::Sbml {
        eprintln!("Error: the metabolite-reaction view has no SBML export");
        return 2;
    }

    if let Some(limit) = max_entities {
        CONFIGURATION.write().unwrap().max_entities = limit;
    }

    let model = match Model::read_sbml(input) {
        Ok(model) => model,
        Err(err) => {
            eprintln!("Error: failed to read '{}': {}", input.display(), err);
            return 3;
        }
    };

    let settings = trim.into_settings();
    let mut gemtractor = Gemtractor::new(model);
    if let Err(err) = gemtractor.trim(&settings) {
        eprintln!("Error: failed to trim the model: {}", err);
        return 1;
    }
    let mut network = match gemtractor.extract_network() {
        Ok(network) => network,
        Err(err) => {
            eprintln!("Error: failed to extract the network: {}", err);
            return 1;
        }
    };
    let model = gemtractor.model();
    info!(
        "extracted a network of {} entities from model {}",
        network.entity_count(),
        model.id
    );

    let limit = CONFIGURATION.read().unwrap().max_entities;
    if network.entity_count() > limit {
        eprintln!(
            "Error: the network has {} entities, exceeding the limit of {}",
            network.entity_count(),
            limit
        );
        return 1;
    }

    let mut writer: Box<dyn Write> = match out {
        Some(path) => match File::create(path) {
            Ok(file) => Box::new(file),
            Err(err) => {
                eprintln!("Error: failed to create '{}': {}", path.display(), err);
                return 3;
            }
        },
        None => Box::new(io::stdout()),
    };

    let result = if format == Format::Json {
        match network.to_json_string() {
            Ok(json) => writer.write_all(json.as_bytes()).map_err(ExportError::from),
            Err(err) => {
                eprintln!("Error: failed to serialize the network: {}", err);
                return 1;
            }
        }
    } else {
        write_network(&mut network, view, format, model, &settings, &mut writer)
    };
    if let Err(err) = result {
        eprintln!("Error: failed to export the network: {}", err);
        return 3;
    }
    0
}

/// Parse a network view name.
fn parse_view(value: &str) -> Result<View, String> {
    match value {
        "mn" => Ok(View::Mn),
        "rn" => Ok(View::Rn),
        "en" => Ok(View::En),
        other => Err(format!(
            "unknown network view '{}', expected mn, rn or en",
            other
        )),
    }
}

/// Parse an export format name.
fn parse_format(value: &str) -> Result<Format, String> {
    match value {
        "dot" => Ok(Format::Dot),
        "gml" => Ok(Format::Gml),
        "graphml" => Ok(Format::GraphMl),
        "csv" => Ok(Format::Csv),
        "sbml" => Ok(Format::Sbml),
        "json" => Ok(Format::Json),
        other => Err(format!(
            "unknown format '{}', expected dot, gml, graphml, csv, sbml or json",
            other
        )),
    }
}

/// Dispatch one view and format combination to its exporter.
fn write_network<W: Write>(
    network: &mut Network,
    view: View,
    format: Format,
    model: &Model,
    settings: &TrimSettings,
    writer: &mut W,
) -> Result<(), ExportError> {
    match (view, format) {
        (View::Mn, Format::Dot) => network.write_mn_dot(writer),
        (View::Rn, Format::Dot) => network.write_rn_dot(writer),
        (View::En, Format::Dot) => network.write_en_dot(writer),
        (View::Mn, Format::Gml) => network.write_mn_gml(writer),
        (View::Rn, Format::Gml) => network.write_rn_gml(writer),
        (View::En, Format::Gml) => network.write_en_gml(writer),
        (View::Mn, Format::GraphMl) => network.write_mn_graphml(writer),
        (View::Rn, Format::GraphMl) => network.write_rn_graphml(writer),
        (View::En, Format::GraphMl) => network.write_en_graphml(writer),
        (View::Mn, Format::Csv) => network.write_mn_csv(writer),
        (View::Rn, Format::Csv) => network.write_rn_csv(writer),
        (View::En, Format::Csv) => network.write_en_csv(writer),
        (View::Rn, Format::Sbml) => {
            network.write_rn_sbml(writer, &model.id, Some(&model.name), settings)
        }
        (View::En, Format::Sbml) => {
            network.write_en_sbml(writer, &model.id, Some(&model.name), settings)
        }
        (View::Mn, Format::Sbml) | (_, Format::Json) => {
            unreachable!("combination rejected during argument validation")
        }
    }
}

#[cfg(test)]
mod cli_tests {
    use super::*;

    #[test]
    fn test_parse_view() {
        assert!(matches!(parse_view("mn"), Ok(View::Mn)));
        assert!(matches!(parse_view("rn"), Ok(View::Rn)));
        assert!(matches!(parse_view("en"), Ok(View::En)));
        assert!(parse_view("enzymes").is_err());
    }

    #[test]
    fn test_parse_format() {
        assert!(matches!(parse_format("dot"), Ok(Format::Dot)));
        assert!(matches!(parse_format("graphml"), Ok(Format::GraphMl)));
        assert!(matches!(parse_format("json"), Ok(Format::Json)));
        assert!(parse_format("xml").is_err());
    }

    #[test]
    fn test_trim_args_invert_default_true_flags() {
        let args = TrimArgs {
            filter_species: vec!["a".to_string()],
            filter_reactions: Vec::new(),
            filter_genes: Vec::new(),
            filter_gene_complexes: Vec::new(),
            keep_enzymeless_reactions: true,
            remove_ghost_species: true,
            discard_fake_enzymes: false,
            remove_reactions_missing_species: false,
            keep_affected_complexes: true,
        };
        let settings = args.into_settings();
        assert_eq!(settings.filter_species, vec!["a".to_string()]);
        assert!(!settings.remove_reaction_enzymes_removed);
        assert!(!settings.removing_enzyme_removes_complex);
        assert!(settings.remove_ghost_species);
        assert!(!settings.discard_fake_enzymes);
    }

    #[test]
    fn test_cli_parses_export_flags() {
        let cli = Cli::try_parse_from([
            "gemtract",
            "export",
            "model.xml",
            "--network",
            "en",
            "--format",
            "gml",
            "--filter-genes",
            "fbaA,fbaB",
            "--discard-fake-enzymes",
        ])
        .unwrap();
        match cli.command {
            Commands::Export {
                input,
                network,
                format,
                trim,
                ..
            } => {
                assert_eq!(input, PathBuf::from("model.xml"));
                assert_eq!(network, "en");
                assert_eq!(format, "gml");
                assert_eq!(
                    trim.filter_genes,
                    vec!["fbaA".to_string(), "fbaB".to_string()]
                );
                assert!(trim.discard_fake_enzymes);
            }
            _ => panic!("expected the export subcommand"),
        }
    }
}
