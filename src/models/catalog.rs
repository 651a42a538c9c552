use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::QuotationResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub price: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Catálogo de productos de solo lectura, cargado desde un JSON plano.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct ProductCatalog {
    products: Vec<Product>,
}

impl ProductCatalog {
    pub fn from_products(products: Vec<Product>) -> Self {
        ProductCatalog { products }
    }

    /// Un archivo inexistente produce un catálogo vacío.
    pub fn load<P: AsRef<Path>>(path: P) -> QuotationResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::warn!("Catálogo no encontrado en {}, se usa uno vacío", path.display());
            return Ok(ProductCatalog::default());
        }

        let raw = std::fs::read_to_string(path)?;
        let products: Vec<Product> = serde_json::from_str(&raw)?;
        tracing::info!("Catálogo cargado: {} productos desde {}", products.len(), path.display());

        Ok(ProductCatalog { products })
    }

    pub fn find(&self, name: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.name == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.products.iter().map(|p| p.name.as_str()).collect()
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::QuotationError;

    #[test]
    fn missing_file_is_empty_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = ProductCatalog::load(dir.path().join("products.json")).unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn loads_products_with_optional_category() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.json");
        std::fs::write(
            &path,
            r#"[
                {"name": "실버볼 슬림컵", "price": 70000, "category": "컵"},
                {"name": "실버볼 컵", "price": 60000}
            ]"#,
        )
        .unwrap();

        let catalog = ProductCatalog::load(&path).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.names(), vec!["실버볼 슬림컵", "실버볼 컵"]);
        assert_eq!(catalog.find("실버볼 컵").map(|p| p.price), Some(60000));
        assert_eq!(catalog.find("실버볼 컵").and_then(|p| p.category.clone()), None);
        assert!(catalog.find("없음").is_none());
    }

    #[test]
    fn malformed_json_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(matches!(ProductCatalog::load(&path), Err(QuotationError::Catalog(_))));
    }
}
