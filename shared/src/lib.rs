pub mod configuration;
pub mod core;
pub mod loader;
pub mod observability;
pub mod preload;
pub mod search_path;
