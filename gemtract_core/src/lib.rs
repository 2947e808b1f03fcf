//! Core rust implementation of the GEMtractor, a crate for trimming genome-scale
//! metabolic models and deriving reaction-centric and enzyme-centric networks.

pub mod configuration;
pub mod gemtractor;
pub mod io;
pub mod model;
pub mod network;
