//! Configuration of gemtract settings

use std::sync::{LazyLock, RwLock};

use serde::{Deserialize, Serialize};

/// Global Configuration for gemtract
pub static CONFIGURATION: LazyLock<RwLock<Configuration>> =
    LazyLock::new(|| RwLock::new(Configuration::default()));

/// Represents the current configuration
#[derive(Debug, Serialize, Deserialize)]
pub struct Configuration {
    /// Upper limit on the number of network entities (species, reactions,
    /// genes, and gene complexes) a derived network may contain
    pub max_entities: usize,
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            max_entities: 100_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_configuration() {
        let configuration = Configuration::default();
        assert_eq!(configuration.max_entities, 100_000);
    }
}
