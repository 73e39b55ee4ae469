use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{OrderError, OrderResult};
use crate::ranking::SortMode;

/// Order desk configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrdersConfig {
    /// Ranking configuration
    #[serde(default)]
    pub ranking: RankingConfig,

    /// Intake limits
    #[serde(default)]
    pub intake: IntakeConfig,

    /// Order desk switches
    #[serde(default)]
    pub desk: DeskConfig,
}

/// Ranking configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingConfig {
    /// Mode used when a listing request names none
    #[serde(default)]
    pub default_mode: SortMode,
}

/// Intake limits, sized after the order and buyer record columns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntakeConfig {
    /// Quantity assumed when the form leaves it out
    #[serde(default = "default_quantity")]
    pub default_quantity: u32,

    /// Largest quantity accepted on one order
    #[serde(default = "default_max_quantity")]
    pub max_quantity: u32,

    /// Maximum buyer name length
    #[serde(default = "default_max_name_len")]
    pub max_name_len: usize,

    /// Maximum contact number length
    #[serde(default = "default_max_contact_len")]
    pub max_contact_len: usize,

    /// Maximum address length
    #[serde(default = "default_max_text_len")]
    pub max_address_len: usize,

    /// Maximum pickup place length
    #[serde(default = "default_max_text_len")]
    pub max_pickup_place_len: usize,

    /// Maximum special request length
    #[serde(default = "default_max_text_len")]
    pub max_special_request_len: usize,
}

/// Order desk switches
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeskConfig {
    /// Run intake validation on submit and update
    #[serde(default = "default_enable_validation")]
    pub enable_validation: bool,
}

// Default value functions
fn default_quantity() -> u32 {
    1
}

fn default_max_quantity() -> u32 {
    1000
}

fn default_max_name_len() -> usize {
    100
}

fn default_max_contact_len() -> usize {
    15
}

fn default_max_text_len() -> usize {
    255
}

fn default_enable_validation() -> bool {
    true
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            default_quantity: default_quantity(),
            max_quantity: default_max_quantity(),
            max_name_len: default_max_name_len(),
            max_contact_len: default_max_contact_len(),
            max_address_len: default_max_text_len(),
            max_pickup_place_len: default_max_text_len(),
            max_special_request_len: default_max_text_len(),
        }
    }
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self {
            enable_validation: default_enable_validation(),
        }
    }
}

impl OrdersConfig {
    /// Load configuration from YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> OrderResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Load configuration from YAML string
    pub fn from_yaml(yaml: &str) -> OrderResult<Self> {
        let config: OrdersConfig = serde_yaml::from_str(yaml)?;
        config.check()?;
        Ok(config)
    }

    fn check(&self) -> OrderResult<()> {
        let intake = &self.intake;
        if intake.default_quantity == 0 {
            return Err(OrderError::ConfigError(
                "intake.default_quantity must be at least 1".to_string(),
            ));
        }
        if intake.default_quantity > intake.max_quantity {
            return Err(OrderError::ConfigError(format!(
                "intake.default_quantity {} exceeds intake.max_quantity {}",
                intake.default_quantity, intake.max_quantity
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = OrdersConfig::default();
        assert_eq!(config.ranking.default_mode, SortMode::PickupDate);
        assert_eq!(config.intake.default_quantity, 1);
        assert_eq!(config.intake.max_contact_len, 15);
        assert_eq!(config.intake.max_address_len, 255);
        assert!(config.desk.enable_validation);
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let yaml = r#"
ranking:
  default_mode: delicacy
intake:
  max_quantity: 50
"#;

        let config = OrdersConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.ranking.default_mode, SortMode::Delicacy);
        assert_eq!(config.intake.max_quantity, 50);
        assert_eq!(config.intake.default_quantity, 1);
        assert!(config.desk.enable_validation);
    }

    #[test]
    fn test_empty_yaml_is_default() {
        let config = OrdersConfig::from_yaml("{}").unwrap();
        assert_eq!(config, OrdersConfig::default());
    }

    #[test]
    fn test_unknown_mode_rejected() {
        let yaml = "ranking:\n  default_mode: price\n";
        assert!(matches!(
            OrdersConfig::from_yaml(yaml),
            Err(OrderError::YamlError(_))
        ));
    }

    #[test]
    fn test_inconsistent_quantities_rejected() {
        let yaml = "intake:\n  default_quantity: 10\n  max_quantity: 5\n";
        assert!(matches!(
            OrdersConfig::from_yaml(yaml),
            Err(OrderError::ConfigError(_))
        ));
    }

    #[test]
    fn test_from_yaml_file() {
        let path = std::env::temp_dir().join(format!("bilao-config-{}.yaml", uuid::Uuid::new_v4()));
        std::fs::write(&path, "ranking:\n  default_mode: status\n").unwrap();

        let config = OrdersConfig::from_yaml_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.ranking.default_mode, SortMode::Status);
        assert_eq!(config.intake, IntakeConfig::default());
    }

    #[test]
    fn test_missing_yaml_file_is_io_error() {
        let path = std::env::temp_dir().join(format!("bilao-missing-{}.yaml", uuid::Uuid::new_v4()));

        assert!(matches!(
            OrdersConfig::from_yaml_file(&path),
            Err(OrderError::IoError(_))
        ));
    }

    #[test]
    fn test_yaml_serialization() {
        let config = OrdersConfig::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        assert!(yaml.contains("ranking:"));
        assert!(yaml.contains("default_mode: pickup_date"));

        let parsed: OrdersConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, config);
    }
}
