use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::QuotationResult;
use crate::models::{IssuerProfile, StampLayout, SupplyRatio};

/// Prefijo de las variables de entorno: `QUOTE__SERVER__PORT=9000`.
pub const ENV_PREFIX: &str = "QUOTE";

/// Archivo de configuración opcional (toml, yaml o json).
pub const CONFIG_FILE: &str = "config/quotation";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub catalog: CatalogConfig,
    pub output: OutputConfig,
    pub stamp: StampLayout,
    pub pricing: PricingConfig,
    pub issuer: IssuerProfile,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub path: PathBuf,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        CatalogConfig {
            path: PathBuf::from("assets/products.json"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            dir: PathBuf::from("downloads"),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    pub supply_ratio: SupplyRatio,
}

impl AppConfig {
    /// Valores por defecto, luego `config/quotation.*` y por último el entorno.
    pub fn load() -> QuotationResult<Self> {
        Self::build(config::File::with_name(CONFIG_FILE).required(false))
    }

    pub fn load_from<P: AsRef<Path>>(path: P) -> QuotationResult<Self> {
        Self::build(config::File::from(path.as_ref()).required(true))
    }

    fn build<S>(file: S) -> QuotationResult<Self>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let settings = config::Config::builder()
            .add_source(file)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
