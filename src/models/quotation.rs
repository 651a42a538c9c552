use serde::{Deserialize, Serialize};

use crate::core::{QuotationError, QuotationResult};
use super::ProductCatalog;

/// Artículo de la cotización, en unidades enteras de moneda.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub name: String,
    pub quantity: i64,
    pub unit_price: i64,
}

impl LineItem {
    pub fn new(name: impl Into<String>, quantity: i64, unit_price: i64) -> Self {
        LineItem {
            name: name.into(),
            quantity,
            unit_price,
        }
    }

    pub fn supply_price(&self, ratio: SupplyRatio) -> QuotationResult<i64> {
        ratio
            .supply_price(self.unit_price)
            .ok_or_else(|| QuotationError::Overflow(self.name.clone()))
    }

    /// Precio de suministro multiplicado por la cantidad.
    pub fn row_total(&self, ratio: SupplyRatio) -> QuotationResult<i64> {
        self.supply_price(ratio)?
            .checked_mul(self.quantity)
            .ok_or_else(|| QuotationError::Overflow(self.name.clone()))
    }
}

/// Proporción del precio de lista que se cotiza como valor de suministro.
///
/// Se guarda como porcentaje entero para que el cálculo sea exacto:
/// `66667 * 60 / 100 = 40000`, sin pasar por coma flotante.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SupplyRatio {
    percent: i64,
}

impl SupplyRatio {
    pub const DEFAULT_PERCENT: i64 = 60;

    pub fn from_percent(percent: i64) -> Self {
        SupplyRatio { percent }
    }

    pub fn percent(&self) -> i64 {
        self.percent
    }

    /// Trunca hacia cero; para precios no negativos equivale al piso.
    pub fn supply_price(&self, unit_price: i64) -> Option<i64> {
        unit_price.checked_mul(self.percent).map(|v| v / 100)
    }
}

impl Default for SupplyRatio {
    fn default() -> Self {
        SupplyRatio::from_percent(Self::DEFAULT_PERCENT)
    }
}

/// Suma de los totales de fila de todos los artículos.
pub fn grand_total(items: &[LineItem], ratio: SupplyRatio) -> QuotationResult<i64> {
    items.iter().try_fold(0i64, |acc, item| {
        let row = item.row_total(ratio)?;
        acc.checked_add(row)
            .ok_or_else(|| QuotationError::Overflow(item.name.clone()))
    })
}

/// Petición de cotización tal como llega por HTTP o desde un archivo JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuotationRequest {
    #[serde(default)]
    pub recipient_name: String,
    #[serde(default)]
    pub items: Vec<RequestItem>,
}

/// Artículo pedido; sin `unit_price` el precio se toma del catálogo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestItem {
    pub name: String,
    pub quantity: i64,
    pub unit_price: Option<i64>,
}

impl QuotationRequest {
    /// Comprobaciones de frontera. El generador en sí acepta cualquier valor.
    pub fn validate(&self) -> QuotationResult<()> {
        for (idx, item) in self.items.iter().enumerate() {
            if item.name.trim().is_empty() {
                return Err(QuotationError::Validation(format!(
                    "items[{}]: el nombre no puede estar vacío",
                    idx
                )));
            }
            if item.quantity < 1 {
                return Err(QuotationError::Validation(format!(
                    "items[{}] '{}': la cantidad debe ser al menos 1 (recibido {})",
                    idx, item.name, item.quantity
                )));
            }
            if let Some(price) = item.unit_price {
                if price < 0 {
                    return Err(QuotationError::Validation(format!(
                        "items[{}] '{}': el precio unitario no puede ser negativo (recibido {})",
                        idx, item.name, price
                    )));
                }
            }
        }
        Ok(())
    }

    /// Completa los precios ausentes con los del catálogo.
    pub fn resolve(&self, catalog: &ProductCatalog) -> QuotationResult<Vec<LineItem>> {
        self.items
            .iter()
            .map(|item| {
                let unit_price = match item.unit_price {
                    Some(price) => price,
                    None => catalog
                        .find(&item.name)
                        .map(|product| product.price)
                        .ok_or_else(|| QuotationError::UnknownProduct(item.name.clone()))?,
                };
                Ok(LineItem::new(item.name.clone(), item.quantity, unit_price))
            })
            .collect()
    }
}
