use api_types::{
    ErrorSummary, category::CategoriesImportSummary, error::ImportErrorBody,
    transaction::TransactionsImportSummary,
};
use chrono::{DateTime, Utc};
use reqwest::StatusCode;

use crate::error::ClientError;

/// Message shown when a failed response carries no `message`.
pub const GENERIC_FAILURE: &str = "Upload failed";

/// Success body of an import, per target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImportSummary {
    Categories(CategoriesImportSummary),
    Transactions(TransactionsImportSummary),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureKind {
    /// Rejected locally before anything was sent.
    Validation,
    /// The request could not be completed or the answer could not be read.
    Transport,
    /// The server answered with a non-2xx status.
    Server { status: u16 },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportFailure {
    pub kind: FailureKind,
    pub message: String,
    pub error_details: Vec<String>,
    pub error_summary: Option<ErrorSummary>,
}

impl ImportFailure {
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Validation,
            message: message.into(),
            error_details: Vec::new(),
            error_summary: None,
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Transport,
            message: message.into(),
            error_details: Vec::new(),
            error_summary: None,
        }
    }

    pub fn server(status: StatusCode, body: ImportErrorBody) -> Self {
        let message = body.text().unwrap_or(GENERIC_FAILURE).to_string();
        Self {
            kind: FailureKind::Server {
                status: status.as_u16(),
            },
            message,
            error_details: body.error_details,
            error_summary: body.error_summary,
        }
    }
}

impl From<ClientError> for ImportFailure {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Server { status, body } => Self::server(status, body),
            other => Self::transport(format!("Error uploading file: {other}")),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UploadOutcome {
    Success(ImportSummary),
    Failure(ImportFailure),
}

impl UploadOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

/// Settled upload, as kept by the widget until the next reset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FinishedUpload {
    pub file_name: String,
    pub outcome: UploadOutcome,
    pub finished_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_message_is_kept_verbatim() {
        let failure = ImportFailure::server(
            StatusCode::BAD_REQUEST,
            ImportErrorBody {
                message: Some("bad header row".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(failure.message, "bad header row");
        assert_eq!(failure.kind, FailureKind::Server { status: 400 });
    }

    #[test]
    fn missing_or_blank_message_uses_generic_text() {
        let missing = ImportFailure::server(StatusCode::INTERNAL_SERVER_ERROR, Default::default());
        assert_eq!(missing.message, GENERIC_FAILURE);

        let blank = ImportFailure::server(
            StatusCode::BAD_REQUEST,
            ImportErrorBody {
                message: Some("  ".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(blank.message, GENERIC_FAILURE);
    }

    #[test]
    fn server_error_carries_details() {
        let failure = ImportFailure::from(ClientError::Server {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            body: ImportErrorBody {
                message: Some("no rows imported".to_string()),
                error: None,
                error_details: vec!["Row 2: invalid date".to_string()],
                error_summary: Some(ErrorSummary::from([("invalid_date".to_string(), 1)])),
            },
        });
        assert_eq!(failure.error_details.len(), 1);
        assert_eq!(
            failure.error_summary.unwrap().get("invalid_date"),
            Some(&1)
        );
    }

    #[test]
    fn decode_error_is_a_transport_failure() {
        let err = serde_json::from_str::<u8>("nope").unwrap_err();
        let failure = ImportFailure::from(ClientError::Decode(err));
        assert_eq!(failure.kind, FailureKind::Transport);
        assert!(failure.message.starts_with("Error uploading file: "));
    }
}
