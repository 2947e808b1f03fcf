//! Module providing the Network struct for representing derived networks.

pub mod gene;
pub mod gene_complex;
pub mod network;
pub mod reaction;
pub mod species;
