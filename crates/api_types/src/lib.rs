use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

/// Occurrences of each error kind reported by an import, keyed by kind label
/// (e.g. `category_not_found`).
pub type ErrorSummary = BTreeMap<String, u64>;

/// Reads `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

pub mod category {
    use super::*;

    /// Response body of `POST /api/categories/csv_import`.
    #[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(default)]
    pub struct CategoriesImportSummary {
        pub categories_created: u64,
        /// Rows whose category already existed.
        pub categories_skipped: u64,
        pub groups_processed: u64,
        pub types_processed: u64,
    }
}

pub mod transaction {
    use super::*;

    /// Response body of `POST /api/transaction/csv_import`.
    ///
    /// The server answers `201 Created` when only part of the rows could be
    /// imported; the rejected rows are described in `error_details`.
    #[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(default)]
    pub struct TransactionsImportSummary {
        pub transactions_created: u64,
        pub transactions_skipped: u64,
        /// Total number of rejected rows. May exceed `error_details.len()`,
        /// the server only reports a prefix of the messages.
        pub errors: u64,
        #[serde(deserialize_with = "null_as_default")]
        pub error_details: Vec<String>,
        pub error_summary: Option<ErrorSummary>,
    }
}

pub mod error {
    use super::*;

    /// Body of a non-2xx import response.
    ///
    /// Import routes report `message`; the rest of the API uses `error`.
    /// Some bodies carry both, `message` wins.
    #[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(default)]
    pub struct ImportErrorBody {
        pub message: Option<String>,
        pub error: Option<String>,
        #[serde(deserialize_with = "null_as_default")]
        pub error_details: Vec<String>,
        pub error_summary: Option<ErrorSummary>,
    }

    impl ImportErrorBody {
        /// First non-blank of `message` and `error`.
        pub fn text(&self) -> Option<&str> {
            [self.message.as_deref(), self.error.as_deref()]
                .into_iter()
                .flatten()
                .find(|text| !text.trim().is_empty())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transactions_summary_defaults_missing_fields() {
        let summary: transaction::TransactionsImportSummary =
            serde_json::from_str(r#"{"transactions_created": 4}"#).unwrap();
        assert_eq!(summary.transactions_created, 4);
        assert_eq!(summary.errors, 0);
        assert!(summary.error_details.is_empty());
        assert!(summary.error_summary.is_none());
    }

    #[test]
    fn error_body_falls_back_to_error_field() {
        let body: error::ImportErrorBody =
            serde_json::from_str(r#"{"error": "forbidden"}"#).unwrap();
        assert_eq!(body.text(), Some("forbidden"));
    }

    #[test]
    fn error_body_prefers_message_over_error() {
        let body: error::ImportErrorBody =
            serde_json::from_str(r#"{"error": "validation", "message": "bad header row"}"#)
                .unwrap();
        assert_eq!(body.text(), Some("bad header row"));
    }

    #[test]
    fn null_error_details_read_as_empty() {
        let body: error::ImportErrorBody =
            serde_json::from_str(r#"{"message": "bad header row", "error_details": null}"#)
                .unwrap();
        assert_eq!(body.text(), Some("bad header row"));
        assert!(body.error_details.is_empty());

        let summary: transaction::TransactionsImportSummary =
            serde_json::from_str(r#"{"transactions_created": 2, "error_details": null}"#)
                .unwrap();
        assert_eq!(summary.transactions_created, 2);
        assert!(summary.error_details.is_empty());
    }

    #[test]
    fn error_summary_keeps_counts_per_kind() {
        let summary: transaction::TransactionsImportSummary = serde_json::from_str(
            r#"{"errors": 3, "error_summary": {"invalid_date": 2, "category_not_found": 1}}"#,
        )
        .unwrap();
        let kinds = summary.error_summary.unwrap();
        assert_eq!(kinds.get("invalid_date"), Some(&2));
        assert_eq!(kinds.get("category_not_found"), Some(&1));
    }
}
