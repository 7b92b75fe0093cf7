use thiserror::Error;

pub const DEFAULT_THRESHOLD_ANGSTROM: f32 = 6.0;
pub const DEFAULT_GENERATED_CONTACTS: u32 = 2;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Invalid value for '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

/// Parameters shared by contact detection and alignment remapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactConfig {
    /// Two residues are in contact when any of their atoms are at most this far apart.
    pub threshold_angstrom: f32,
    /// How many sequence neighbours on each side an inserted query residue is linked to.
    pub generated_contacts: u32,
}

impl ContactConfig {
    pub fn builder() -> ContactConfigBuilder {
        ContactConfigBuilder::new()
    }

    pub fn threshold_squared(&self) -> f32 {
        self.threshold_angstrom * self.threshold_angstrom
    }
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            threshold_angstrom: DEFAULT_THRESHOLD_ANGSTROM,
            generated_contacts: DEFAULT_GENERATED_CONTACTS,
        }
    }
}

pub(crate) fn validate_threshold(threshold_angstrom: f32) -> Result<(), ConfigError> {
    if threshold_angstrom.is_finite() && threshold_angstrom > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidParameter {
            name: "threshold_angstrom",
            reason: format!("must be positive and finite, got {threshold_angstrom}"),
        })
    }
}

/// Builds a [`ContactConfig`]; unset fields fall back to the pipeline defaults.
#[derive(Default)]
pub struct ContactConfigBuilder {
    threshold_angstrom: Option<f32>,
    generated_contacts: Option<u32>,
}

impl ContactConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn threshold_angstrom(mut self, threshold: f32) -> Self {
        self.threshold_angstrom = Some(threshold);
        self
    }
    pub fn generated_contacts(mut self, count: u32) -> Self {
        self.generated_contacts = Some(count);
        self
    }

    pub fn build(self) -> Result<ContactConfig, ConfigError> {
        let threshold_angstrom = self
            .threshold_angstrom
            .unwrap_or(DEFAULT_THRESHOLD_ANGSTROM);
        validate_threshold(threshold_angstrom)?;
        Ok(ContactConfig {
            threshold_angstrom,
            generated_contacts: self
                .generated_contacts
                .unwrap_or(DEFAULT_GENERATED_CONTACTS),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_falls_back_to_defaults() {
        let config = ContactConfig::builder().build().unwrap();
        assert_eq!(config, ContactConfig::default());
        assert_eq!(config.threshold_angstrom, 6.0);
        assert_eq!(config.generated_contacts, 2);
        assert_eq!(config.threshold_squared(), 36.0);
    }

    #[test]
    fn builder_applies_overrides() {
        let config = ContactConfigBuilder::new()
            .threshold_angstrom(8.0)
            .generated_contacts(0)
            .build()
            .unwrap();
        assert_eq!(config.threshold_angstrom, 8.0);
        assert_eq!(config.generated_contacts, 0);
    }

    #[test]
    fn builder_rejects_unusable_thresholds() {
        for bad in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            let result = ContactConfig::builder().threshold_angstrom(bad).build();
            assert!(
                matches!(
                    result,
                    Err(ConfigError::InvalidParameter {
                        name: "threshold_angstrom",
                        ..
                    })
                ),
                "threshold {bad} should be rejected"
            );
        }
    }
}
