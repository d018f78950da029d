//! Static registries: keys, types, categories, environments and MIME rules

pub mod categories;
pub mod environments;
pub mod keys;
pub mod mime;
pub mod types;
