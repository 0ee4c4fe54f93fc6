//! Quote-aware CSV tokenizer plus file decoding.
//!
//! The tokenizer scans the whole text in one pass instead of splitting on
//! lines first, so quoted cells may hold commas, escaped quotes (`""`) and
//! line breaks. It never fails: malformed quoting just leaves the scanner
//! inside a quoted cell until the end of input.
//!
//! Rows holding a single empty cell are dropped. That rule is what skips
//! blank lines, and it also drops a genuine one-column row whose only value is
//! empty; the two cases cannot be told apart.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::{ConfigError, CsvResult};

/// One parsed CSV row.
pub type Row = Vec<String>;

/// Split CSV text into rows of cells.
///
/// # Example
/// ```
/// use gtin_extract::parse_csv;
///
/// let rows = parse_csv("sku,desc\n1,\"a, b\"\n");
/// assert_eq!(rows, vec![vec!["sku", "desc"], vec!["1", "a, b"]]);
/// ```
pub fn parse_csv(content: &str) -> Vec<Row> {
    let mut rows = Vec::new();
    let mut row: Row = Vec::new();
    let mut cell = String::new();
    let mut in_quotes = false;
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' => {
                if in_quotes && chars.peek() == Some(&'"') {
                    cell.push('"');
                    chars.next();
                } else {
                    in_quotes = !in_quotes;
                }
            }
            ',' if !in_quotes => row.push(std::mem::take(&mut cell)),
            '\r' | '\n' if !in_quotes => {
                if c == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                row.push(std::mem::take(&mut cell));
                if row.len() > 1 || !row[0].is_empty() {
                    rows.push(std::mem::take(&mut row));
                } else {
                    row.clear();
                }
            }
            _ => cell.push(c),
        }
    }

    // No trailing line break
    if !cell.is_empty() || !row.is_empty() {
        row.push(cell);
        rows.push(row);
    }

    rows
}

// =============================================================================
// Decoding
// =============================================================================

/// How raw file bytes are turned into text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextEncoding {
    /// UTF-8, invalid sequences replaced with U+FFFD.
    #[default]
    Utf8,
    /// Guess the charset per file (UTF-8, ISO-8859-1, Windows-1252...).
    Auto,
}

impl FromStr for TextEncoding {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "utf8" | "utf-8" => Ok(Self::Utf8),
            "auto" => Ok(Self::Auto),
            other => Err(ConfigError::UnknownEncoding(other.to_string())),
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Utf8 => write!(f, "utf8"),
            Self::Auto => write!(f, "auto"),
        }
    }
}

/// Detect the charset of raw bytes using chardet.
pub fn detect_encoding(bytes: &[u8]) -> String {
    let charset = chardet::detect(bytes).0;

    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" | "" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        _ => charset,
    }
}

/// Decode file bytes to text. A leading UTF-8 byte order mark is removed so
/// it does not end up glued to the first header name.
pub fn decode_content(bytes: &[u8], encoding: TextEncoding) -> String {
    let text = match encoding {
        TextEncoding::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
        TextEncoding::Auto => {
            let label = detect_encoding(bytes);
            match encoding_rs::Encoding::for_label(label.as_bytes()) {
                Some(enc) => enc.decode(bytes).0.into_owned(),
                None => String::from_utf8_lossy(bytes).into_owned(),
            }
        }
    };

    match text.strip_prefix('\u{feff}') {
        Some(stripped) => stripped.to_string(),
        None => text,
    }
}

/// Read a whole file and decode it.
pub fn read_csv_file<P: AsRef<Path>>(path: P, encoding: TextEncoding) -> CsvResult<String> {
    let bytes = std::fs::read(path.as_ref())?;
    Ok(decode_content(&bytes, encoding))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(rows: &[Row]) -> Vec<Vec<&str>> {
        rows.iter()
            .map(|r| r.iter().map(String::as_str).collect())
            .collect()
    }

    #[test]
    fn test_simple_rows() {
        let rows = parse_csv("a,b,c\n1,2,3\n");
        assert_eq!(cells(&rows), vec![vec!["a", "b", "c"], vec!["1", "2", "3"]]);
    }

    #[test]
    fn test_quoted_comma() {
        let rows = parse_csv("a,\"b,c\",d");
        assert_eq!(cells(&rows), vec![vec!["a", "b,c", "d"]]);
    }

    #[test]
    fn test_escaped_quotes() {
        let rows = parse_csv("\"say \"\"hi\"\"\",x\n");
        assert_eq!(rows[0][0], "say \"hi\"");
        assert_eq!(rows[0][1], "x");
    }

    #[test]
    fn test_embedded_newline() {
        let rows = parse_csv("sku1,\"line1\nline2\",GTIN1\n");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].len(), 3);
        assert_eq!(rows[0][1], "line1\nline2");
    }

    #[test]
    fn test_embedded_crlf_kept_literally() {
        let rows = parse_csv("a,\"x\r\ny\"\r\nb,c\r\n");
        assert_eq!(cells(&rows), vec![vec!["a", "x\r\ny"], vec!["b", "c"]]);
    }

    #[test]
    fn test_crlf_is_one_terminator() {
        let rows = parse_csv("a,b\r\n1,2\r\n");
        assert_eq!(cells(&rows), vec![vec!["a", "b"], vec!["1", "2"]]);
    }

    #[test]
    fn test_lone_cr_terminates_row() {
        let rows = parse_csv("a,b\r1,2");
        assert_eq!(cells(&rows), vec![vec!["a", "b"], vec!["1", "2"]]);
    }

    #[test]
    fn test_blank_lines_dropped() {
        let rows = parse_csv("a,b\n\n1,2\n\r\n\n");
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_single_empty_cell_row_dropped() {
        // A one-column file with an empty value looks exactly like a blank line
        let rows = parse_csv("name\n\"\"\nbob\n");
        assert_eq!(cells(&rows), vec![vec!["name"], vec!["bob"]]);
    }

    #[test]
    fn test_row_of_empty_cells_kept() {
        let rows = parse_csv(",\n");
        assert_eq!(cells(&rows), vec![vec!["", ""]]);
    }

    #[test]
    fn test_no_trailing_newline() {
        let rows = parse_csv("a,b\n1,2");
        assert_eq!(cells(&rows), vec![vec!["a", "b"], vec!["1", "2"]]);
    }

    #[test]
    fn test_trailing_comma_at_eof_flushes_row() {
        let rows = parse_csv("a,");
        assert_eq!(cells(&rows), vec![vec!["a", ""]]);
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_csv("").is_empty());
        assert!(parse_csv("\n\r\n").is_empty());
    }

    #[test]
    fn test_unterminated_quote_swallows_rest() {
        let rows = parse_csv("a,\"open\nb,c\n");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0][1], "open\nb,c\n");
    }

    #[test]
    fn test_quote_inside_unquoted_cell_toggles() {
        let rows = parse_csv("ab\"c,d\"e,f\n");
        assert_eq!(cells(&rows), vec![vec!["abc,de", "f"]]);
    }

    #[test]
    fn test_non_ascii_cells() {
        let rows = parse_csv("Código (SKU),Descrição\nX1,Pão de queijo\n");
        assert_eq!(rows[0][0], "Código (SKU)");
        assert_eq!(rows[1][1], "Pão de queijo");
    }

    #[test]
    fn test_encoding_from_str() {
        assert_eq!("UTF-8".parse::<TextEncoding>().unwrap(), TextEncoding::Utf8);
        assert_eq!("auto".parse::<TextEncoding>().unwrap(), TextEncoding::Auto);
        assert!("latin9".parse::<TextEncoding>().is_err());
    }

    #[test]
    fn test_utf8_lossy_decoding() {
        let bytes: &[u8] = &[b'a', 0xFF, b'b'];
        assert_eq!(decode_content(bytes, TextEncoding::Utf8), "a\u{fffd}b");
    }

    #[test]
    fn test_bom_stripped() {
        let bytes = "\u{feff}Código (SKU),x".as_bytes();
        let text = decode_content(bytes, TextEncoding::Utf8);
        assert!(text.starts_with("Código"));
    }

    #[test]
    fn test_auto_decodes_ascii() {
        let text = decode_content(b"sku,gtin\n1,789\n", TextEncoding::Auto);
        assert_eq!(text, "sku,gtin\n1,789\n");
    }

    #[test]
    fn test_read_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_csv_file(dir.path().join("nope.csv"), TextEncoding::Utf8).unwrap_err();
        assert!(err.to_string().contains("Failed to read file"));
    }
}
