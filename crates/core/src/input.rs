//! CSV input adapter.
//!
//! Parsing is header-driven: the canonical columns may appear in any
//! order, and unknown columns are ignored. Missing columns simply leave
//! the corresponding [`RawRow`] fields empty; normalization decides
//! what that means.

use crate::error::InputError;
use crate::row::RawRow;

/// Canonical column headers, in sample-file order.
pub const COLUMN_HEADERS: [&str; 4] = ["Name", "TrackingNumber", "TrackingCompany", "TrackingUrl"];

/// Parse uploaded spreadsheet bytes into raw rows.
///
/// Returns [`InputError::Malformed`] if the CSV cannot be read and
/// [`InputError::EmptyFile`] if it parses but has no data rows. Both
/// abort the batch before any row is processed.
pub fn parse_rows(bytes: &[u8]) -> Result<Vec<RawRow>, InputError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(bytes);

    let mut rows = Vec::new();
    for record in reader.deserialize::<RawRow>() {
        rows.push(record.map_err(|e| InputError::Malformed(e.to_string()))?);
    }

    if rows.is_empty() {
        return Err(InputError::EmptyFile);
    }
    Ok(rows)
}

/// One-row template file documenting the expected input schema.
pub fn sample_csv() -> String {
    let mut out = COLUMN_HEADERS.join(",");
    out.push('\n');
    out.push_str("#1025,RX123456789IN,India Post,https://www.indiapost.gov.in/VAS/Pages/trackconsignment.aspx?tn=RX123456789IN\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_canonical_columns() {
        let csv = "Name,TrackingNumber,TrackingCompany,TrackingUrl\n\
                   #1025,RX1,India Post,https://track.example/RX1\n";
        let rows = parse_rows(csv.as_bytes()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name.as_deref(), Some("#1025"));
        assert_eq!(rows[0].tracking_number.as_deref(), Some("RX1"));
    }

    #[test]
    fn test_column_order_is_irrelevant() {
        let csv = "TrackingNumber,Name\nRX1,#1025\n";
        let rows = parse_rows(csv.as_bytes()).unwrap();
        assert_eq!(rows[0].name.as_deref(), Some("#1025"));
        assert_eq!(rows[0].tracking_number.as_deref(), Some("RX1"));
        assert!(rows[0].tracking_company.is_none());
        assert!(rows[0].tracking_url.is_none());
    }

    #[test]
    fn test_empty_fields_are_absent() {
        let csv = "Name,TrackingNumber,TrackingCompany,TrackingUrl\n#1025,RX1,,\n";
        let rows = parse_rows(csv.as_bytes()).unwrap();
        assert!(rows[0].tracking_company.is_none());
        assert!(rows[0].tracking_url.is_none());
    }

    #[test]
    fn test_no_data_rows_is_an_input_error() {
        let csv = "Name,TrackingNumber,TrackingCompany,TrackingUrl\n";
        assert!(matches!(
            parse_rows(csv.as_bytes()),
            Err(InputError::EmptyFile)
        ));
    }

    #[test]
    fn test_empty_bytes_is_an_input_error() {
        assert!(matches!(parse_rows(b""), Err(InputError::EmptyFile)));
    }

    #[test]
    fn test_sample_file_round_trips() {
        let rows = parse_rows(sample_csv().as_bytes()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name.as_deref(), Some("#1025"));
        assert_eq!(rows[0].tracking_company.as_deref(), Some("India Post"));
    }

    #[test]
    fn test_row_order_preserved() {
        let csv = "Name\n#3\n#1\n#2\n";
        let rows = parse_rows(csv.as_bytes()).unwrap();
        let names: Vec<_> = rows.iter().map(|r| r.name.as_deref().unwrap()).collect();
        assert_eq!(names, vec!["#3", "#1", "#2"]);
    }
}
