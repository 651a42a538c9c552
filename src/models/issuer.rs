use serde::{Deserialize, Serialize};

/// Datos fijos del emisor que aparecen en el recuadro de proveedor y el pie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IssuerProfile {
    pub registration_number: String,
    pub company_name: String,
    pub representative: String,
    pub address: String,
    pub business_type: String,
    pub business_item: String,
    pub phone: String,
    pub bank_account: String,
}

impl Default for IssuerProfile {
    fn default() -> Self {
        IssuerProfile {
            registration_number: "692-27-01163".to_string(),
            company_name: "물터 (multeo)".to_string(),
            representative: "김예지".to_string(),
            address: "서울시 성동구 행당동 138-7 202호".to_string(),
            business_type: "소매업".to_string(),
            business_item: "공예, 시각디자인".to_string(),
            phone: "010-4341-7978".to_string(),
            bank_account: "신한 110-540-155149 김예지(물터)".to_string(),
        }
    }
}

impl IssuerProfile {
    /// Nombre del representante con la marca de sello `(인)`.
    pub fn representative_with_seal(&self) -> String {
        format!("{}  (인)", self.representative)
    }
}
