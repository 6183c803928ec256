//! Configuration for property service module

use serde::Deserialize;

/// Property service configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_page_size: default_max_page_size(),
        }
    }
}

fn default_max_page_size() -> u64 {
    100
}
