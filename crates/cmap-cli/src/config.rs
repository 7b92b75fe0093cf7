use crate::cli::MapFormat;
use crate::error::{CliError, Result};
use cmapper::engine::config::ContactConfig;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialContactsConfig {
    #[serde(rename = "threshold-angstrom")]
    threshold_angstrom: Option<f32>,
    #[serde(rename = "generated-contacts")]
    generated_contacts: Option<u32>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialOutputConfig {
    format: Option<MapFormat>,
}

/// Settings read from a TOML file; every field is optional.
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialConfig {
    contacts: Option<PartialContactsConfig>,
    output: Option<PartialOutputConfig>,
}

/// Values given directly on the command line. They win over the file.
#[derive(Debug, Default)]
pub struct CliOverrides<'a> {
    pub threshold_angstrom: Option<f32>,
    pub generated_contacts: Option<u32>,
    pub format: Option<MapFormat>,
    pub set_values: &'a [String],
}

/// Fully resolved settings for one command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedConfig {
    pub contacts: ContactConfig,
    pub format: MapFormat,
}

impl PartialConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Loads `path` if given, otherwise starts from an empty configuration.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Resolves the final settings. Precedence: explicit flags, then `--set` values,
    /// then the file, then built-in defaults.
    pub fn merge_with_cli(mut self, overrides: &CliOverrides) -> Result<ResolvedConfig> {
        self.apply_set_values(overrides.set_values)?;

        let contacts = self.contacts.take().unwrap_or_default();
        let output = self.output.take().unwrap_or_default();

        let mut builder = ContactConfig::builder();
        if let Some(threshold) = overrides.threshold_angstrom.or(contacts.threshold_angstrom) {
            builder = builder.threshold_angstrom(threshold);
        }
        if let Some(count) = overrides.generated_contacts.or(contacts.generated_contacts) {
            builder = builder.generated_contacts(count);
        }
        let contacts = builder.build().map_err(|e| CliError::Config(e.to_string()))?;

        Ok(ResolvedConfig {
            contacts,
            format: overrides
                .format
                .or(output.format)
                .unwrap_or(MapFormat::Packed),
        })
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let Some((key, value_str)) = kv_pair.split_once('=') else {
                return Err(CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                )));
            };

            match key {
                "contacts.threshold-angstrom" => {
                    let value = value_str.parse().map_err(|_| {
                        CliError::Config(format!("Invalid float value for {}: {}", key, value_str))
                    })?;
                    self.contacts
                        .get_or_insert_with(Default::default)
                        .threshold_angstrom = Some(value);
                }
                "contacts.generated-contacts" => {
                    let value = value_str.parse().map_err(|_| {
                        CliError::Config(format!(
                            "Invalid non-negative integer for {}: {}",
                            key, value_str
                        ))
                    })?;
                    self.contacts
                        .get_or_insert_with(Default::default)
                        .generated_contacts = Some(value);
                }
                "output.format" => {
                    let value = match value_str {
                        "packed" => MapFormat::Packed,
                        "sparse" => MapFormat::Sparse,
                        _ => {
                            return Err(CliError::Config(format!(
                                "Invalid value for {}: {} (expected 'packed' or 'sparse')",
                                key, value_str
                            )));
                        }
                    };
                    self.output.get_or_insert_with(Default::default).format = Some(value);
                }
                _ => {
                    return Err(CliError::Config(format!(
                        "Unknown configuration key for --set: {}",
                        key
                    )));
                }
            }
        }
        Ok(())
    }
}
