use thiserror::Error;

#[derive(Debug, Error)]
pub enum QuotationError {
    #[error("Error de E/S: {0}")]
    Io(#[from] std::io::Error),

    #[error("Error generando el libro Excel: {0}")]
    Workbook(#[from] rust_xlsxwriter::XlsxError),

    #[error("Demasiados artículos: la tabla admite {max}, se recibieron {got}")]
    TooManyItems { max: usize, got: usize },

    #[error("Desbordamiento aritmético calculando el artículo '{0}'")]
    Overflow(String),

    #[error("Error de validación: {0}")]
    Validation(String),

    #[error("Producto desconocido: {0}")]
    UnknownProduct(String),

    #[error("Error de catálogo: {0}")]
    Catalog(#[from] serde_json::Error),

    #[error("Error de configuración: {0}")]
    Config(#[from] config::ConfigError),
}

pub type QuotationResult<T> = Result<T, QuotationError>;
