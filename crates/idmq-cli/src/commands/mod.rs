pub mod builders;
pub mod migrate;
pub mod search;

use std::path::Path;
use std::sync::Arc;

use idmq_core::{ConfigurationService, PropertiesConfiguration};

/// File configuration (when given) overlaid with `IDMQ_` environment variables
pub(crate) fn load_config(
    path: Option<&Path>,
) -> Result<Arc<dyn ConfigurationService>, Box<dyn std::error::Error>> {
    Ok(Arc::new(PropertiesConfiguration::load(path)?))
}
