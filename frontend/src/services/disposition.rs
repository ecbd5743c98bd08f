//! Download filename extraction from a `Content-Disposition` header.

use once_cell::sync::Lazy;
use regex::Regex;

/// First `filename…=` parameter, quoted or up to the next `;`.
static FILENAME_PARAM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"filename[^;=\n]*=("[^"]*"|'[^']*'|[^;\n]*)"#).expect("valid filename pattern")
});

/// Filename suggested by the header, or `fallback` when the header is
/// missing, has no filename parameter or an empty one.
///
/// Quote characters are stripped from the value.
pub fn file_name_from_disposition(header: Option<&str>, fallback: &str) -> String {
    header
        .and_then(|header| {
            let value = FILENAME_PARAM.captures(header)?.get(1)?.as_str();
            let name: String = value.chars().filter(|c| *c != '"' && *c != '\'').collect();
            let name = name.trim();
            (!name.is_empty()).then(|| name.to_string())
        })
        .unwrap_or_else(|| fallback.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const FALLBACK: &str = "processed_final.xlsx";

    #[test]
    fn test_filename_pattern_compiles() {
        Lazy::force(&FILENAME_PARAM);
        assert_eq!(FILENAME_PARAM.captures_len(), 2);
    }

    #[test]
    fn test_quoted_filename_with_space() {
        let header = Some(r#"attachment; filename="report 1.xlsx""#);
        assert_eq!(file_name_from_disposition(header, FALLBACK), "report 1.xlsx");
    }

    #[test]
    fn test_missing_header_uses_fallback() {
        assert_eq!(file_name_from_disposition(None, FALLBACK), FALLBACK);
    }

    #[test]
    fn test_header_without_filename_uses_fallback() {
        assert_eq!(file_name_from_disposition(Some("attachment"), FALLBACK), FALLBACK);
        assert_eq!(file_name_from_disposition(Some(r#"attachment; filename="""#), FALLBACK), FALLBACK);
    }

    #[test]
    fn test_unquoted_filename_stops_at_semicolon() {
        let header = Some("attachment; filename=updated_clients.xlsx; size=2048");
        assert_eq!(file_name_from_disposition(header, FALLBACK), "updated_clients.xlsx");
    }

    #[test]
    fn test_single_quoted_filename() {
        let header = Some("attachment; filename='stock.xlsx'");
        assert_eq!(file_name_from_disposition(header, FALLBACK), "stock.xlsx");
    }

    #[test]
    fn test_first_filename_parameter_wins() {
        let header = Some(r#"attachment; filename="plain.xlsx"; filename*=UTF-8''pl%C3%A1in.xlsx"#);
        assert_eq!(file_name_from_disposition(header, FALLBACK), "plain.xlsx");
    }
}
