use anyhow::{Context, Result};
use bilao_orders::OrdersConfig;
use std::path::Path;

/// Load the desk configuration, falling back to defaults when no file is given
pub fn load(path: Option<&Path>) -> Result<OrdersConfig> {
    let Some(path) = path else {
        return Ok(OrdersConfig::default());
    };

    let config = OrdersConfig::from_yaml_file(path)
        .with_context(|| format!("Failed to load config {}", path.display()))?;
    Ok(config)
}
