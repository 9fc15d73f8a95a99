mod parser;
mod types;

pub use parser::parse_catalog;
pub use types::Catalog;

use once_cell::sync::Lazy;

// Loaded once from the embedded resource and never mutated afterwards
pub static CATALOG: Lazy<Catalog> = Lazy::new(|| {
    let content = include_str!("../../resources/catalog.json");
    parse_catalog(content).unwrap_or_else(|e| {
        tracing::error!("Failed to parse embedded catalog: {}", e);
        Catalog::default()
    })
});
