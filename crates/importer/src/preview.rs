use std::path::Path;

/// Records counted before the preview stops reading.
pub const MAX_PREVIEW_ROWS: usize = 10_000;

/// Header row and data row count of a CSV file, shown before uploading.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CsvPreview {
    pub headers: Vec<String>,
    /// At most `MAX_PREVIEW_ROWS`.
    pub rows: usize,
    /// More records follow the counted ones.
    pub truncated: bool,
}

impl CsvPreview {
    pub fn rows_label(&self) -> String {
        if self.truncated {
            format!("{}+", self.rows)
        } else {
            self.rows.to_string()
        }
    }
}

/// Reads the header and counts records, up to `MAX_PREVIEW_ROWS`. Rows with a
/// different field count than the header are still counted; the server
/// decides what is valid.
pub fn read_preview(path: impl AsRef<Path>) -> Result<CsvPreview, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let headers = reader
        .headers()?
        .iter()
        .map(str::to_string)
        .collect::<Vec<_>>();

    let mut rows = 0;
    let mut truncated = false;
    let mut record = csv::ByteRecord::new();
    while reader.read_byte_record(&mut record)? {
        if rows == MAX_PREVIEW_ROWS {
            truncated = true;
            break;
        }
        rows += 1;
    }

    Ok(CsvPreview {
        headers,
        rows,
        truncated,
    })
}
