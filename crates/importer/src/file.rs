use std::path::{Path, PathBuf};

use crate::{error::ClientError, size::format_byte_size};

const CSV_SUFFIX: &str = ".csv";

/// A file chosen for upload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub size: u64,
    pub path: PathBuf,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, size: u64, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            size,
            path: path.into(),
        }
    }

    /// Builds the handle from a path on disk, reading its size.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ClientError> {
        let path = path.as_ref();
        let metadata = std::fs::metadata(path).map_err(|source| ClientError::Io {
            path: path.display().to_string(),
            source,
        })?;
        if !metadata.is_file() {
            return Err(ClientError::Io {
                path: path.display().to_string(),
                source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "not a file"),
            });
        }

        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self::new(name, metadata.len(), path))
    }

    /// Case-sensitive: `data.CSV` is rejected.
    pub fn is_csv(&self) -> bool {
        self.name.ends_with(CSV_SUFFIX)
    }

    pub fn display_size(&self) -> String {
        format_byte_size(self.size)
    }
}

/// Extracts the first path from a dropped or pasted payload.
///
/// Terminals deliver a dropped file as its path, optionally quoted, escaped
/// with backslashes or written as a `file://` URI. Only the first path is
/// kept when several files are dropped.
pub fn parse_dropped_path(payload: &str) -> Option<PathBuf> {
    let first = payload.lines().map(str::trim).find(|line| !line.is_empty())?;

    let unquoted = match first.chars().next() {
        Some(quote @ ('\'' | '"')) => {
            let rest = &first[1..];
            match rest.find(quote) {
                Some(end) => &rest[..end],
                None => rest,
            }
        }
        _ => first,
    };

    let path = match unquoted.strip_prefix("file://") {
        Some(uri) => uri.replace("%20", " "),
        None => unescape_spaces(unquoted),
    };
    if path.is_empty() {
        return None;
    }
    Some(PathBuf::from(path))
}

/// Turns shell-escaped spaces (`my\ file.csv`) back into plain spaces.
fn unescape_spaces(path: &str) -> String {
    path.replace("\\ ", " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_suffix_is_case_sensitive() {
        assert!(SelectedFile::new("data.csv", 10, "data.csv").is_csv());
        assert!(!SelectedFile::new("data.CSV", 10, "data.CSV").is_csv());
        assert!(!SelectedFile::new("data.csv.txt", 10, "x").is_csv());
        assert!(!SelectedFile::new("csv", 10, "csv").is_csv());
    }

    #[test]
    fn from_path_reads_name_and_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("transactions.csv");
        std::fs::write(&path, "date,amount\n").unwrap();

        let file = SelectedFile::from_path(&path).unwrap();
        assert_eq!(file.name, "transactions.csv");
        assert_eq!(file.size, 12);
        assert_eq!(file.path, path);
    }

    #[test]
    fn from_path_rejects_missing_file_and_directories() {
        let dir = tempfile::tempdir().unwrap();
        assert!(SelectedFile::from_path(dir.path().join("nope.csv")).is_err());
        assert!(SelectedFile::from_path(dir.path()).is_err());
    }

    #[test]
    fn dropped_path_variants() {
        assert_eq!(
            parse_dropped_path("'/tmp/my file.csv' ").unwrap(),
            PathBuf::from("/tmp/my file.csv")
        );
        assert_eq!(
            parse_dropped_path("/tmp/my\\ file.csv").unwrap(),
            PathBuf::from("/tmp/my file.csv")
        );
        assert_eq!(
            parse_dropped_path("file:///tmp/my%20file.csv\n/tmp/other.csv").unwrap(),
            PathBuf::from("/tmp/my file.csv")
        );
        assert!(parse_dropped_path("  \n ").is_none());
    }
}
