use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use std::path::PathBuf;

use quotation_generator::core::quotation_file_name;
use quotation_generator::{AppConfig, ProductCatalog, QuotationGenerator, QuotationRequest};

/// Genera una cotización desde un archivo JSON.
#[derive(Parser, Debug)]
#[command(author, version, about = "Write a quotation spreadsheet from a JSON request")]
struct Args {
    /// Request JSON: recipient_name and items
    request: PathBuf,

    /// Output xlsx (default: output.dir with a timestamped name)
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
        )
        .init();

    let config = AppConfig::load()?;

    let raw = std::fs::read_to_string(&args.request)
        .with_context(|| format!("No se pudo leer {}", args.request.display()))?;
    let request: QuotationRequest = serde_json::from_str(&raw)
        .with_context(|| format!("Petición inválida en {}", args.request.display()))?;
    request.validate()?;

    let catalog = ProductCatalog::load(&config.catalog.path)?;
    let items = request.resolve(&catalog)?;

    let output = match args.output {
        Some(path) => path,
        None => config
            .output
            .dir
            .join(quotation_file_name(&request.recipient_name, Local::now().naive_local())),
    };

    let generator = QuotationGenerator::from_config(&config);
    let summary = generator.generate(&request.recipient_name, &items, &output)?;

    println!("Cotización guardada en {}", output.display());
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_path_is_required() {
        assert!(Args::try_parse_from(["quote"]).is_err());
    }

    #[test]
    fn output_path_is_optional() {
        let args = Args::try_parse_from(["quote", "request.json"]).unwrap();
        assert_eq!(args.request, PathBuf::from("request.json"));
        assert!(args.output.is_none());

        let args = Args::try_parse_from(["quote", "request.json", "out/q.xlsx"]).unwrap();
        assert_eq!(args.output, Some(PathBuf::from("out/q.xlsx")));
    }

    #[test]
    fn extra_arguments_are_rejected() {
        assert!(Args::try_parse_from(["quote", "a.json", "b.xlsx", "c"]).is_err());
    }
}
