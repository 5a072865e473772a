use predsql::FormatConfig;
use serde::Deserialize;
use std::path::Path;

/// Contents of `predsql.toml`.
///
/// ```toml
/// [format]
/// placeholder = "dollar"   # question | dollar
/// indent = 2
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub format: FormatConfig,
}

impl ConfigFile {
    /// Load the config file. A missing file yields defaults unless `required`.
    pub fn load(path: &Path, required: bool) -> anyhow::Result<Self> {
        if !required && !path.exists() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::parse(&raw)
            .map_err(|e| anyhow::anyhow!("failed to parse config file {}: {e}", path.display()))
    }

    pub fn parse(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }
}
