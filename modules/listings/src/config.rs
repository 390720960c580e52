use serde::{Deserialize, Serialize};

/// Configuration for the listings module
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ListingsConfig {
    /// Result cap for browse queries when the caller does not pass a limit.
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,
    /// Result cap for title search.
    #[serde(default = "default_search_page_size")]
    pub search_page_size: u32,
}

impl Default for ListingsConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            search_page_size: default_search_page_size(),
        }
    }
}

fn default_page_size() -> u32 {
    20
}

fn default_search_page_size() -> u32 {
    20
}
