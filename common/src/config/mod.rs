mod config_content_provider;
mod config_loader;
mod validate;

pub use config_content_provider::{ConfigContentProvider, FileContentConfigProvider};
pub use config_loader::{ConfigLoader, to_yaml};
pub use validate::Validate;
