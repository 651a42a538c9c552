use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Posición y tamaño de una imagen respecto a la esquina de una celda (base 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageAnchor {
    pub row: u32,
    pub col: u16,
    pub x_offset: u32,
    pub y_offset: u32,
    pub width: u32,
    pub height: u32,
}

/// Dónde se coloca el sello: primero `primary`, si falla `fallback`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StampLayout {
    pub path: PathBuf,
    pub primary: ImageAnchor,
    pub fallback: ImageAnchor,
}

impl Default for StampLayout {
    fn default() -> Self {
        StampLayout {
            path: PathBuf::from("assets/stamp.png"),
            // Sobre "(인)" en I6, desplazado para centrar el sello de 104 px
            primary: ImageAnchor {
                row: 3,
                col: 8,
                x_offset: 55,
                y_offset: 0,
                width: 104,
                height: 133,
            },
            fallback: ImageAnchor {
                row: 5,
                col: 8,
                x_offset: 0,
                y_offset: 0,
                width: 45,
                height: 45,
            },
        }
    }
}

/// Resultado de intentar incrustar el sello.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StampOutcome {
    Anchored,
    Fallback,
    /// Existía el archivo pero ninguna de las dos colocaciones funcionó.
    Skipped,
    Missing,
}

impl StampOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            StampOutcome::Anchored => "anchored",
            StampOutcome::Fallback => "fallback",
            StampOutcome::Skipped => "skipped",
            StampOutcome::Missing => "missing",
        }
    }
}
