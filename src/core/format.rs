use chrono::{Datelike, NaiveDate, NaiveDateTime};

/// Formatea un entero con separadores de miles: `594000` -> `594,000`.
pub fn format_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut result = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }

    if value < 0 {
        format!("-{}", result)
    } else {
        result
    }
}

/// Fecha al estilo coreano: `2025년 01월 07일`.
pub fn format_korean_date(date: NaiveDate) -> String {
    format!("{}년 {:02}월 {:02}일", date.year(), date.month(), date.day())
}

/// Nombre de archivo con marca de tiempo: `견적서_{destinatario}_20250314_093000.xlsx`.
///
/// Los caracteres no válidos en rutas se sustituyen por `_`.
pub fn quotation_file_name(recipient_name: &str, timestamp: NaiveDateTime) -> String {
    let recipient: String = recipient_name
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    format!("견적서_{}_{}.xlsx", recipient, timestamp.format("%Y%m%d_%H%M%S"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1000), "1,000");
        assert_eq!(format_thousands(378000), "378,000");
        assert_eq!(format_thousands(1234567), "1,234,567");
        assert_eq!(format_thousands(-42000), "-42,000");
    }

    #[test]
    fn file_name_is_timestamped_and_path_safe() {
        let ts = NaiveDate::from_ymd_opt(2025, 3, 14)
            .unwrap()
            .and_hms_opt(9, 30, 5)
            .unwrap();
        assert_eq!(
            quotation_file_name("레퍼토리 성수", ts),
            "견적서_레퍼토리 성수_20250314_093005.xlsx"
        );
        assert_eq!(
            quotation_file_name("../etc/passwd", ts),
            "견적서_.._etc_passwd_20250314_093005.xlsx"
        );
    }

    #[test]
    fn korean_date_is_zero_padded() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 7).unwrap();
        assert_eq!(format_korean_date(date), "2025년 01월 07일");
    }
}
