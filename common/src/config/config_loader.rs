use serde::Serialize;
use serde::de::DeserializeOwned;

use super::{ConfigContentProvider, Validate};

/// Reads a YAML config through a content provider, falling back to
/// `TConfig::default()` when the provider has nothing.
pub struct ConfigLoader<TConfigContentProvider>
where
    TConfigContentProvider: ConfigContentProvider,
{
    config_content_provider: TConfigContentProvider,
}

impl<TConfigContentProvider> ConfigLoader<TConfigContentProvider>
where
    TConfigContentProvider: ConfigContentProvider,
{
    pub fn new(config_content_provider: TConfigContentProvider) -> Self {
        Self {
            config_content_provider,
        }
    }

    /// `overrides` runs after parsing and before validation, so values taken
    /// from the environment are validated like file values.
    pub fn load<TConfig>(&self, overrides: impl FnOnce(&mut TConfig)) -> Result<TConfig, String>
    where
        TConfig: DeserializeOwned + Default + Validate,
    {
        let mut config = match self.config_content_provider.get_config_content()? {
            Some(content) => serde_yaml_ng::from_str(&content)
                .map_err(|e| format!("Failed to deserialize config: {}", e))?,
            None => TConfig::default(),
        };

        overrides(&mut config);

        config
            .validate()
            .map_err(|e| format!("Config validation error: {}", e))?;

        Ok(config)
    }
}

pub fn to_yaml<TConfig: Serialize>(config: &TConfig) -> Result<String, String> {
    serde_yaml_ng::to_string(config).map_err(|e| format!("Failed to serialize config: {}", e))
}
