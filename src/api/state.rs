use std::sync::Arc;

use crate::core::{AppConfig, QuotationResult};
use crate::generators::QuotationGenerator;
use crate::models::ProductCatalog;

#[derive(Clone)]
pub struct ApiState {
    pub generator: Arc<QuotationGenerator>,
    pub catalog: Arc<ProductCatalog>,
    pub config: Arc<AppConfig>,
}

impl ApiState {
    pub fn new(config: AppConfig) -> QuotationResult<Self> {
        // The catalog is read once at startup; it is edited outside this service
        let catalog = ProductCatalog::load(&config.catalog.path)?;
        let generator = QuotationGenerator::from_config(&config);

        if !config.stamp.path.exists() {
            tracing::warn!(
                "Stamp asset {} not found; quotations will be generated without it",
                config.stamp.path.display()
            );
        }

        Ok(Self::with_parts(generator, catalog, config))
    }

    pub fn with_parts(generator: QuotationGenerator, catalog: ProductCatalog, config: AppConfig) -> Self {
        ApiState {
            generator: Arc::new(generator),
            catalog: Arc::new(catalog),
            config: Arc::new(config),
        }
    }
}
