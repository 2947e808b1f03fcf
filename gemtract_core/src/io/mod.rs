//! Module for reading and writing models and networks
pub mod export;
pub mod gene_assoc;
pub mod json;
pub mod sbml;
