//! Cross-file record collection and CSV serialization.
//!
//! The output is always three fully quoted columns with `"` doubled inside
//! fields and `\n` line endings, so it parses back through
//! [`crate::parser::parse_csv`] into the same values.

use std::io;
use std::path::Path;

use crate::error::{CsvError, CsvResult};
use crate::models::ProductRecord;
use crate::schema::{DESCRIPTION_COLUMN, GTIN_COLUMN, SKU_COLUMN};

/// Header line of the consolidated file.
pub const OUTPUT_HEADER: [&str; 3] = [SKU_COLUMN, DESCRIPTION_COLUMN, GTIN_COLUMN];

/// Records from every processed file, in processing order. Duplicates are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregate {
    records: Vec<ProductRecord>,
}

impl Aggregate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: ProductRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[ProductRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<ProductRecord> {
        self.records
    }

    /// Serialize the collected records; see [`serialize`].
    pub fn to_csv(&self) -> CsvResult<String> {
        serialize(&self.records)
    }
}

impl Extend<ProductRecord> for Aggregate {
    fn extend<I: IntoIterator<Item = ProductRecord>>(&mut self, iter: I) {
        self.records.extend(iter);
    }
}

impl FromIterator<ProductRecord> for Aggregate {
    fn from_iter<I: IntoIterator<Item = ProductRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

/// Render records as quoted CSV text, header first.
pub fn serialize(records: &[ProductRecord]) -> CsvResult<String> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(OUTPUT_HEADER)?;
    for record in records {
        writer.write_record(record.fields())?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| CsvError::Io(e.into_error()))?;

    String::from_utf8(bytes)
        .map_err(|e| CsvError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
}

/// Write serialized output to disk, replacing any existing file.
pub fn write_output<P: AsRef<Path>>(path: P, content: &str) -> CsvResult<()> {
    std::fs::write(path.as_ref(), content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_csv;

    #[test]
    fn test_header_only() {
        let out = serialize(&[]).unwrap();
        assert_eq!(out, "\"Código (SKU)\",\"Descrição\",\"GTIN/EAN\"\n");
    }

    #[test]
    fn test_fields_always_quoted() {
        let out = serialize(&[ProductRecord::new("A1", "", "789")]).unwrap();
        assert_eq!(out.lines().nth(1), Some("\"A1\",\"\",\"789\""));
        assert!(out.ends_with('\n'));
    }

    #[test]
    fn test_quotes_doubled() {
        let out = serialize(&[ProductRecord::new("A\"1", "Tela 15\"", "789")]).unwrap();
        assert_eq!(out.lines().nth(1), Some("\"A\"\"1\",\"Tela 15\"\"\",\"789\""));
    }

    #[test]
    fn test_round_trip() {
        let records = vec![
            ProductRecord::new("A1", "Caneta, azul", "7891234567895"),
            ProductRecord::new("B2", "<p>linha 1</p>\n<p>linha 2</p>", "7890000000001"),
            ProductRecord::new("C3", "Monitor 24\" \"\"Full HD\"\"", "0012345678905"),
            ProductRecord::new("D4", "Café\r\nespresso", "789"),
        ];

        let rows = parse_csv(&serialize(&records).unwrap());

        assert_eq!(rows[0], OUTPUT_HEADER.to_vec());
        let parsed: Vec<ProductRecord> = rows[1..]
            .iter()
            .map(|r| ProductRecord::new(r[0].as_str(), r[1].as_str(), r[2].as_str()))
            .collect();
        assert_eq!(parsed, records);
    }

    #[test]
    fn test_quote_count_preserved() {
        for n in 0..6 {
            let description = "\"".repeat(n);
            let out = serialize(&[ProductRecord::new("X", description.as_str(), "1")]).unwrap();
            let rows = parse_csv(&out);
            assert_eq!(rows[1][1].matches('"').count(), n);
        }
    }

    #[test]
    fn test_aggregate_keeps_order_and_duplicates() {
        let mut aggregate = Aggregate::new();
        aggregate.push(ProductRecord::new("A1", "x", "789"));
        aggregate.extend(vec![
            ProductRecord::new("A1", "x", "789"),
            ProductRecord::new("B1", "y", "790"),
        ]);

        assert_eq!(aggregate.len(), 3);
        let skus: Vec<&str> = aggregate.records().iter().map(|r| r.sku.as_str()).collect();
        assert_eq!(skus, vec!["A1", "A1", "B1"]);
    }

    #[test]
    fn test_write_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let aggregate: Aggregate = vec![ProductRecord::new("A1", "x", "789")].into_iter().collect();

        write_output(&path, &aggregate.to_csv().unwrap()).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.ends_with("\"A1\",\"x\",\"789\"\n"));
    }
}
