use chrono::{Local, NaiveDate};
use rust_xlsxwriter::{
    Color, Format, FormatAlign, FormatBorder, FormatUnderline, Image, Workbook, Worksheet,
    XlsxError,
};
use serde::Serialize;
use std::path::Path;

use crate::core::{format_korean_date, format_thousands, AppConfig, QuotationError, QuotationResult};
use crate::models::{
    grand_total, ImageAnchor, IssuerProfile, LineItem, StampLayout, StampOutcome, SupplyRatio,
};

/// Coordenadas fijas de la plantilla (base 0; la fila 13 es la fila 14 de Excel).
pub mod layout {
    pub const SHEET_NAME: &str = "견적서";

    pub const FIRST_COL: u16 = 1; // B
    pub const LAST_COL: u16 = 8; // I

    pub const TITLE_ROWS: (u32, u32) = (1, 2);
    pub const DATE_ROW: u32 = 4;
    pub const RECIPIENT_ROW: u32 = 6;
    pub const GREETING_ROW: u32 = 8;
    pub const SUPPLIER_ROWS: (u32, u32) = (4, 8);
    pub const BANNER_ROWS: (u32, u32) = (10, 11);

    pub const HEADER_ROW: u32 = 13;
    pub const FIRST_ITEM_ROW: u32 = 14;
    pub const FOOTER_ROW: u32 = 30;
    pub const TOTAL_ROW: u32 = 31;

    /// Filas de datos disponibles entre la cabecera y el pie.
    pub const MAX_ITEMS: usize = (FOOTER_ROW - FIRST_ITEM_ROW) as usize;

    pub const ITEM_ROW_HEIGHT: f64 = 25.0;

    pub const COLUMN_WIDTHS: [(u16, f64); 9] = [
        (0, 6.0),
        (1, 35.0),
        (2, 10.0),
        (3, 8.0),
        (4, 15.0),
        (5, 15.0),
        (6, 15.0),
        (7, 10.0),
        (8, 20.0),
    ];

    pub const ITEM_HEADERS: [&str; 8] = [
        "품  명",
        "규  격",
        "수 량",
        "단  가",
        "공 급 가 액",
        "합  계",
        "세 액",
        "비  고",
    ];

    pub const TAX_INCLUDED: &str = "포함";
    pub const MONEY_FORMAT: &str = "#,##0";
}

/// Lo que se generó; no contiene el documento en sí.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuotationSummary {
    pub grand_total: i64,
    pub line_count: usize,
    /// Fila (base 0) donde empieza el pie; siempre `layout::FOOTER_ROW`.
    pub footer_row: u32,
    pub stamp: StampOutcome,
}

struct PricedLine<'a> {
    item: &'a LineItem,
    supply_price: i64,
    row_total: i64,
}

/// Formatos compartidos por todas las secciones de la hoja.
struct Styles {
    title: Format,
    plain_left: Format,
    recipient: Format,
    boxed_center: Format,
    boxed_left: Format,
    boxed_wrap: Format,
    banner: Format,
    header: Format,
    boxed: Format,
    money_center: Format,
    money: Format,
    footer: Format,
}

impl Styles {
    fn new() -> Self {
        let center = Format::new()
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter);
        let left = Format::new()
            .set_align(FormatAlign::Left)
            .set_align(FormatAlign::VerticalCenter);

        Styles {
            title: center
                .clone()
                .set_font_size(20)
                .set_bold()
                .set_underline(FormatUnderline::Single)
                .set_border_bottom(FormatBorder::Double),
            plain_left: left.clone(),
            recipient: left
                .clone()
                .set_font_size(14)
                .set_bold()
                .set_border_bottom(FormatBorder::Thin),
            boxed_center: center.clone().set_border(FormatBorder::Thin),
            boxed_left: left.set_border(FormatBorder::Thin),
            boxed_wrap: center
                .clone()
                .set_text_wrap()
                .set_border(FormatBorder::Thin),
            banner: center
                .clone()
                .set_font_size(16)
                .set_bold()
                .set_border(FormatBorder::Thin),
            header: center
                .clone()
                .set_bold()
                .set_background_color(Color::RGB(0xEEEEEE))
                .set_border(FormatBorder::Thin),
            boxed: Format::new().set_border(FormatBorder::Thin),
            money_center: center
                .set_num_format(layout::MONEY_FORMAT)
                .set_border(FormatBorder::Thin),
            money: Format::new()
                .set_num_format(layout::MONEY_FORMAT)
                .set_border(FormatBorder::Thin),
            footer: Format::new()
                .set_align(FormatAlign::Center)
                .set_align(FormatAlign::Bottom)
                .set_bold()
                .set_border(FormatBorder::Thin),
        }
    }
}

/// Generador del documento de cotización con plantilla fija.
#[derive(Debug, Clone, Default)]
pub struct QuotationGenerator {
    issuer: IssuerProfile,
    ratio: SupplyRatio,
    stamp: StampLayout,
}

impl QuotationGenerator {
    pub fn new(issuer: IssuerProfile, ratio: SupplyRatio, stamp: StampLayout) -> Self {
        QuotationGenerator {
            issuer,
            ratio,
            stamp,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config.issuer.clone(),
            config.pricing.supply_ratio,
            config.stamp.clone(),
        )
    }

    pub fn issuer(&self) -> &IssuerProfile {
        &self.issuer
    }

    pub fn supply_ratio(&self) -> SupplyRatio {
        self.ratio
    }

    /// Genera la cotización con la fecha de hoy y la guarda en `output_path`.
    pub fn generate<P: AsRef<Path>>(
        &self,
        recipient_name: &str,
        items: &[LineItem],
        output_path: P,
    ) -> QuotationResult<QuotationSummary> {
        self.generate_on(Local::now().date_naive(), recipient_name, items, output_path)
    }

    pub fn generate_on<P: AsRef<Path>>(
        &self,
        date: NaiveDate,
        recipient_name: &str,
        items: &[LineItem],
        output_path: P,
    ) -> QuotationResult<QuotationSummary> {
        let output_path = output_path.as_ref();
        let (mut workbook, summary) = self.build_workbook(date, recipient_name, items)?;

        if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        workbook.save(output_path)?;

        tracing::info!(
            path = %output_path.display(),
            grand_total = summary.grand_total,
            lines = summary.line_count,
            stamp = summary.stamp.as_str(),
            "Cotización guardada"
        );
        Ok(summary)
    }

    /// Igual que `generate` pero devuelve el archivo en memoria.
    pub fn generate_to_buffer(
        &self,
        recipient_name: &str,
        items: &[LineItem],
    ) -> QuotationResult<(Vec<u8>, QuotationSummary)> {
        let (mut workbook, summary) =
            self.build_workbook(Local::now().date_naive(), recipient_name, items)?;
        let buffer = workbook.save_to_buffer()?;
        Ok((buffer, summary))
    }

    /// Construye el libro completo sin escribirlo.
    pub fn build_workbook(
        &self,
        date: NaiveDate,
        recipient_name: &str,
        items: &[LineItem],
    ) -> QuotationResult<(Workbook, QuotationSummary)> {
        if items.len() > layout::MAX_ITEMS {
            return Err(QuotationError::TooManyItems {
                max: layout::MAX_ITEMS,
                got: items.len(),
            });
        }

        // Calcular todo antes de escribir: un desbordamiento no deja hoja a medias
        let lines = self.price_lines(items)?;
        let grand_total = grand_total(items, self.ratio)?;

        let styles = Styles::new();
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(layout::SHEET_NAME)?;

        for (col, width) in layout::COLUMN_WIDTHS {
            worksheet.set_column_width(col, width)?;
        }

        self.write_heading(worksheet, &styles, date, recipient_name)?;
        self.write_supplier_box(worksheet, &styles)?;
        write_total_banner(worksheet, &styles, grand_total)?;
        write_item_table(worksheet, &styles, &lines)?;
        self.write_footer(worksheet, &styles, grand_total)?;
        let stamp = self.place_stamp(worksheet);

        Ok((
            workbook,
            QuotationSummary {
                grand_total,
                line_count: lines.len(),
                footer_row: layout::FOOTER_ROW,
                stamp,
            },
        ))
    }

    fn price_lines<'a>(&self, items: &'a [LineItem]) -> QuotationResult<Vec<PricedLine<'a>>> {
        items
            .iter()
            .map(|item| {
                Ok(PricedLine {
                    item,
                    supply_price: item.supply_price(self.ratio)?,
                    row_total: item.row_total(self.ratio)?,
                })
            })
            .collect()
    }

    fn write_heading(
        &self,
        worksheet: &mut Worksheet,
        styles: &Styles,
        date: NaiveDate,
        recipient_name: &str,
    ) -> Result<(), XlsxError> {
        let (first, last) = layout::TITLE_ROWS;
        worksheet.merge_range(
            first,
            layout::FIRST_COL,
            last,
            layout::LAST_COL,
            "견  적  서",
            &styles.title,
        )?;

        // Columnas B:D, a la izquierda del recuadro del proveedor
        worksheet.merge_range(
            layout::DATE_ROW,
            1,
            layout::DATE_ROW,
            3,
            &format_korean_date(date),
            &styles.plain_left,
        )?;
        worksheet.merge_range(
            layout::RECIPIENT_ROW,
            1,
            layout::RECIPIENT_ROW,
            3,
            &format!("{}   귀하", recipient_name),
            &styles.recipient,
        )?;
        worksheet.merge_range(
            layout::GREETING_ROW,
            1,
            layout::GREETING_ROW,
            3,
            "아래와 같이 견적합니다.",
            &styles.plain_left,
        )?;

        Ok(())
    }

    /// Recuadro E5:I9 con los datos del emisor; todas las celdas con borde.
    fn write_supplier_box(&self, worksheet: &mut Worksheet, styles: &Styles) -> Result<(), XlsxError> {
        let (top, bottom) = layout::SUPPLIER_ROWS;
        let issuer = &self.issuer;
        let center = &styles.boxed_center;

        worksheet.merge_range(top, 4, bottom, 4, "공급자", &styles.boxed_wrap)?;

        worksheet.merge_range(top, 5, top, 6, "등 록 번 호", center)?;
        worksheet.merge_range(top, 7, top, 8, &issuer.registration_number, center)?;

        worksheet.write_string_with_format(top + 1, 5, "상호(법인명)", center)?;
        worksheet.write_string_with_format(top + 1, 6, &issuer.company_name, center)?;
        worksheet.write_string_with_format(top + 1, 7, "성  명", center)?;
        worksheet.write_string_with_format(top + 1, 8, issuer.representative_with_seal(), center)?;

        worksheet.write_string_with_format(top + 2, 5, "사업장주소", center)?;
        worksheet.merge_range(top + 2, 6, top + 2, 8, &issuer.address, &styles.boxed_left)?;

        worksheet.write_string_with_format(top + 3, 5, "업    태", center)?;
        worksheet.write_string_with_format(top + 3, 6, &issuer.business_type, center)?;
        worksheet.write_string_with_format(top + 3, 7, "종  목", center)?;
        worksheet.write_string_with_format(top + 3, 8, &issuer.business_item, center)?;

        worksheet.write_string_with_format(top + 4, 5, "전 화 번 호", center)?;
        worksheet.merge_range(top + 4, 6, top + 4, 8, &issuer.phone, &styles.boxed_left)?;

        Ok(())
    }

    fn write_footer(
        &self,
        worksheet: &mut Worksheet,
        styles: &Styles,
        grand_total: i64,
    ) -> Result<(), XlsxError> {
        worksheet.merge_range(
            layout::FOOTER_ROW,
            layout::FIRST_COL,
            layout::FOOTER_ROW,
            layout::LAST_COL,
            &self.issuer.bank_account,
            &styles.footer,
        )?;

        let row = layout::TOTAL_ROW;
        worksheet.write_string_with_format(row, 1, "합계금액", &styles.boxed_center)?;
        worksheet.merge_range(row, 2, row, 5, "", &styles.boxed)?;
        worksheet.write_number_with_format(row, 6, grand_total as f64, &styles.money)?;
        worksheet.write_string_with_format(row, 7, layout::TAX_INCLUDED, &styles.boxed_center)?;
        worksheet.write_blank(row, 8, &styles.boxed)?;

        Ok(())
    }

    /// Incrusta el sello si existe. Nunca hace fallar la generación.
    fn place_stamp(&self, worksheet: &mut Worksheet) -> StampOutcome {
        let path = &self.stamp.path;
        if !path.exists() {
            tracing::debug!("Sin sello en {}, se omite la imagen", path.display());
            return StampOutcome::Missing;
        }

        match insert_image(worksheet, path, &self.stamp.primary) {
            Ok(()) => return StampOutcome::Anchored,
            Err(e) => tracing::warn!("Error colocando el sello en la posición principal: {}", e),
        }

        match insert_image(worksheet, path, &self.stamp.fallback) {
            Ok(()) => StampOutcome::Fallback,
            Err(e) => {
                tracing::warn!("No se pudo cargar el sello {}: {}", path.display(), e);
                StampOutcome::Skipped
            }
        }
    }
}

fn write_total_banner(
    worksheet: &mut Worksheet,
    styles: &Styles,
    grand_total: i64,
) -> Result<(), XlsxError> {
    let (first, last) = layout::BANNER_ROWS;
    let text = format!(
        "합 계 금 액   (공급가액VAT포함)          KRW {}",
        format_thousands(grand_total)
    );
    worksheet.merge_range(
        first,
        layout::FIRST_COL,
        last,
        layout::LAST_COL,
        &text,
        &styles.banner,
    )?;
    Ok(())
}

/// Cabecera, una fila por artículo y filas vacías hasta el pie.
fn write_item_table(
    worksheet: &mut Worksheet,
    styles: &Styles,
    lines: &[PricedLine<'_>],
) -> Result<(), XlsxError> {
    for (offset, header) in layout::ITEM_HEADERS.iter().enumerate() {
        worksheet.write_string_with_format(
            layout::HEADER_ROW,
            layout::FIRST_COL + offset as u16,
            *header,
            &styles.header,
        )?;
    }

    for row in layout::FIRST_ITEM_ROW..layout::FOOTER_ROW {
        worksheet.set_row_height(row, layout::ITEM_ROW_HEIGHT)?;

        let line = lines.get((row - layout::FIRST_ITEM_ROW) as usize);
        let Some(line) = line else {
            for col in layout::FIRST_COL..=layout::LAST_COL {
                worksheet.write_blank(row, col, &styles.boxed)?;
            }
            continue;
        };

        worksheet.write_string_with_format(row, 1, &line.item.name, &styles.boxed_center)?;
        worksheet.write_blank(row, 2, &styles.boxed)?;
        worksheet.write_number_with_format(row, 3, line.item.quantity as f64, &styles.boxed_center)?;
        worksheet.write_number_with_format(row, 4, line.item.unit_price as f64, &styles.money_center)?;
        worksheet.write_number_with_format(row, 5, line.supply_price as f64, &styles.money_center)?;
        worksheet.write_number_with_format(row, 6, line.row_total as f64, &styles.money_center)?;
        worksheet.write_string_with_format(row, 7, layout::TAX_INCLUDED, &styles.boxed_center)?;
        worksheet.write_blank(row, 8, &styles.boxed)?;
    }

    Ok(())
}

fn insert_image(worksheet: &mut Worksheet, path: &Path, anchor: &ImageAnchor) -> Result<(), XlsxError> {
    let mut image = Image::new(path)?;
    image.set_scale_to_size(anchor.width, anchor.height, false);
    worksheet.insert_image_with_offset(
        anchor.row,
        anchor.col,
        &image,
        anchor.x_offset,
        anchor.y_offset,
    )?;
    Ok(())
}
