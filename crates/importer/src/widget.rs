//! Selection and upload lifecycle of a single CSV import widget.
//!
//! ```text
//! Idle ──select──▶ Selected ──submit──▶ Uploading ──complete──▶ Finished
//!  ▲                  │                                          │
//!  └──────clear───────┴──────────────────clear───────────────────┘
//! ```
//!
//! Every transition is a method on [`ImportWidget`]. The network call itself
//! happens outside the widget: [`ImportWidget::submit`] hands out a
//! [`PendingUpload`] and the caller reports back through
//! [`ImportWidget::complete`], so the widget is `Uploading` as soon as the
//! submit returns.
use std::path::Path;

use chrono::Utc;
use thiserror::Error;

use crate::{
    client::Client,
    error::ClientError,
    file::{SelectedFile, parse_dropped_path},
    outcome::{FinishedUpload, ImportFailure, ImportSummary, UploadOutcome},
    preview::{CsvPreview, read_preview},
    target::ImportTarget,
};

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum WidgetError {
    #[error("{name} is not a CSV file")]
    NotCsv { name: String },
    #[error("{0}")]
    Unreadable(String),
    #[error("no file selected")]
    NoFileSelected,
    #[error("an upload is already in progress")]
    Busy,
}

/// How the user handed over the file. Only changes the wording of the
/// rejection message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionSource {
    Picker,
    Drop,
}

impl SelectionSource {
    fn rejection(self) -> &'static str {
        match self {
            Self::Picker => "Please select a CSV file",
            Self::Drop => "Please upload a CSV file",
        }
    }
}

/// Upload handed out by [`ImportWidget::submit`], to be sent by the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingUpload {
    pub attempt: u64,
    pub target: ImportTarget,
    pub file: SelectedFile,
}

impl PendingUpload {
    pub async fn send(&self, client: &Client) -> Result<ImportSummary, ClientError> {
        client.csv_import(self.target, &self.file).await
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WidgetState {
    Idle,
    Selected(SelectedFile),
    Uploading(PendingUpload),
    Finished(FinishedUpload),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportWidget {
    target: ImportTarget,
    state: WidgetState,
    /// Path typed into the picker field.
    input: String,
    /// Local validation message, rendered in the result slot.
    notice: Option<ImportFailure>,
    preview: Option<Result<CsvPreview, String>>,
    attempts: u64,
}

impl ImportWidget {
    pub fn new(target: ImportTarget) -> Self {
        Self {
            target,
            state: WidgetState::Idle,
            input: String::new(),
            notice: None,
            preview: None,
            attempts: 0,
        }
    }

    pub fn target(&self) -> ImportTarget {
        self.target
    }

    pub fn state(&self) -> &WidgetState {
        &self.state
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn notice(&self) -> Option<&ImportFailure> {
        self.notice.as_ref()
    }

    pub fn preview(&self) -> Option<&Result<CsvPreview, String>> {
        self.preview.as_ref()
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        match &self.state {
            WidgetState::Selected(file) => Some(file),
            WidgetState::Uploading(pending) => Some(&pending.file),
            WidgetState::Idle | WidgetState::Finished(_) => None,
        }
    }

    pub fn is_uploading(&self) -> bool {
        matches!(self.state, WidgetState::Uploading(_))
    }

    pub fn finished(&self) -> Option<&FinishedUpload> {
        match &self.state {
            WidgetState::Finished(finished) => Some(finished),
            _ => None,
        }
    }

    /// `"name (size)"` of the current file, if any.
    pub fn file_label(&self) -> Option<String> {
        self.selected_file()
            .map(|file| format!("{} ({})", file.name, file.display_size()))
    }

    /// The path field is only editable while nothing is selected.
    pub fn input_push(&mut self, ch: char) {
        if self.state == WidgetState::Idle {
            self.input.push(ch);
        }
    }

    pub fn input_pop(&mut self) {
        if self.state == WidgetState::Idle {
            self.input.pop();
        }
    }

    pub fn select_file(&mut self, file: SelectedFile) -> Result<(), WidgetError> {
        self.accept(file, SelectionSource::Picker)
    }

    pub fn drop_file(&mut self, file: SelectedFile) -> Result<(), WidgetError> {
        self.accept(file, SelectionSource::Drop)
    }

    /// Selects the file at `path`, reading its size and a short preview.
    pub fn select_path(
        &mut self,
        path: impl AsRef<Path>,
        source: SelectionSource,
    ) -> Result<(), WidgetError> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        if !name.ends_with(".csv") {
            return self.reject(
                WidgetError::NotCsv { name },
                source.rejection().to_string(),
            );
        }
        if self.is_uploading() {
            return self.busy();
        }

        let file = match SelectedFile::from_path(path) {
            Ok(file) => file,
            Err(err) => {
                let message = err.to_string();
                return self.reject(WidgetError::Unreadable(message.clone()), message);
            }
        };

        self.accept(file, source)?;
        self.preview = Some(read_preview(path).map_err(|err| err.to_string()));
        Ok(())
    }

    /// Selects whatever path the picker field holds.
    pub fn select_input(&mut self) -> Result<(), WidgetError> {
        let input = self.input.trim().to_string();
        if input.is_empty() {
            return self.reject(
                WidgetError::NoFileSelected,
                SelectionSource::Picker.rejection().to_string(),
            );
        }
        self.select_path(input, SelectionSource::Picker)
    }

    /// Handles a dropped or pasted payload. An empty payload is ignored.
    pub fn drop_payload(&mut self, payload: &str) -> Result<(), WidgetError> {
        match parse_dropped_path(payload) {
            Some(path) => self.select_path(path, SelectionSource::Drop),
            None => Ok(()),
        }
    }

    /// Back to `Idle`, forgetting the file, the typed path and any message.
    ///
    /// Also the "import another file" reset after a result. Ignored while an
    /// upload is in flight, there is no way to cancel it.
    pub fn clear_selection(&mut self) {
        if self.is_uploading() {
            tracing::warn!(target_kind = %self.target, "clear ignored while uploading");
            return;
        }
        self.state = WidgetState::Idle;
        self.input.clear();
        self.notice = None;
        self.preview = None;
    }

    /// Moves to `Uploading` and returns the upload to dispatch.
    pub fn submit(&mut self) -> Result<PendingUpload, WidgetError> {
        let file = match &self.state {
            WidgetState::Selected(file) => Some(file.clone()),
            WidgetState::Uploading(_) => return self.busy(),
            WidgetState::Idle | WidgetState::Finished(_) => None,
        };
        let Some(file) = file else {
            return self.reject(WidgetError::NoFileSelected, "No file selected".to_string());
        };

        self.attempts += 1;
        let pending = PendingUpload {
            attempt: self.attempts,
            target: self.target,
            file,
        };
        tracing::info!(
            target_kind = %self.target,
            attempt = pending.attempt,
            file = %pending.file.name,
            "upload started"
        );
        self.notice = None;
        self.state = WidgetState::Uploading(pending.clone());
        Ok(pending)
    }

    /// Settles the upload numbered `attempt`. Returns `false` when the widget
    /// is not waiting for that attempt.
    pub fn complete(
        &mut self,
        attempt: u64,
        result: Result<ImportSummary, ClientError>,
    ) -> bool {
        let file_name = match &self.state {
            WidgetState::Uploading(pending) if pending.attempt == attempt => {
                pending.file.name.clone()
            }
            _ => {
                tracing::warn!(target_kind = %self.target, attempt, "stale upload completion dropped");
                return false;
            }
        };

        let outcome = match result {
            Ok(summary) => {
                tracing::info!(target_kind = %self.target, attempt, "upload succeeded");
                UploadOutcome::Success(summary)
            }
            Err(err) => {
                tracing::warn!(target_kind = %self.target, attempt, "upload failed: {err}");
                UploadOutcome::Failure(ImportFailure::from(err))
            }
        };

        self.state = WidgetState::Finished(FinishedUpload {
            file_name,
            outcome,
            finished_at: Utc::now(),
        });
        true
    }

    /// Submits and waits for the answer. Returns the settled upload.
    pub async fn upload(&mut self, client: &Client) -> Result<&FinishedUpload, WidgetError> {
        let pending = self.submit()?;
        let result = pending.send(client).await;
        self.complete(pending.attempt, result);
        self.finished().ok_or(WidgetError::Busy)
    }

    fn accept(&mut self, file: SelectedFile, source: SelectionSource) -> Result<(), WidgetError> {
        if !file.is_csv() {
            let message = source.rejection().to_string();
            return self.reject(WidgetError::NotCsv { name: file.name }, message);
        }
        if self.is_uploading() {
            return self.busy();
        }

        tracing::info!(target_kind = %self.target, file = %file.name, size = file.size, "file selected");
        self.input = file.path.display().to_string();
        self.state = WidgetState::Selected(file);
        self.notice = None;
        self.preview = None;
        Ok(())
    }

    fn reject<T>(&mut self, err: WidgetError, message: String) -> Result<T, WidgetError> {
        tracing::warn!(target_kind = %self.target, "{err}");
        self.notice = Some(ImportFailure::validation(message));
        Err(err)
    }

    fn busy<T>(&self) -> Result<T, WidgetError> {
        tracing::warn!(target_kind = %self.target, "upload already in flight");
        Err(WidgetError::Busy)
    }
}

#[cfg(test)]
mod tests {
    use api_types::category::CategoriesImportSummary;
    use reqwest::StatusCode;

    use super::*;
    use crate::outcome::FailureKind;

    fn csv_file() -> SelectedFile {
        SelectedFile::new("categories.csv", 2048, "/tmp/categories.csv")
    }

    fn summary() -> ImportSummary {
        ImportSummary::Categories(CategoriesImportSummary {
            categories_created: 3,
            categories_skipped: 1,
            groups_processed: 2,
            types_processed: 1,
        })
    }

    #[test]
    fn select_moves_to_selected() {
        let mut widget = ImportWidget::new(ImportTarget::Categories);
        widget.select_file(csv_file()).unwrap();
        assert_eq!(widget.state(), &WidgetState::Selected(csv_file()));
        assert_eq!(widget.file_label().unwrap(), "categories.csv (2 KB)");
    }

    #[test]
    fn rejects_non_csv_and_keeps_state() {
        let mut widget = ImportWidget::new(ImportTarget::Categories);
        let err = widget
            .select_file(SelectedFile::new("report.CSV", 10, "/tmp/report.CSV"))
            .unwrap_err();
        assert!(matches!(err, WidgetError::NotCsv { .. }));
        assert_eq!(widget.state(), &WidgetState::Idle);
        assert_eq!(widget.notice().unwrap().message, "Please select a CSV file");
        assert_eq!(widget.notice().unwrap().kind, FailureKind::Validation);

        widget.select_file(csv_file()).unwrap();
        widget
            .drop_file(SelectedFile::new("notes.txt", 10, "/tmp/notes.txt"))
            .unwrap_err();
        assert_eq!(widget.state(), &WidgetState::Selected(csv_file()));
        assert_eq!(widget.notice().unwrap().message, "Please upload a CSV file");
    }

    #[test]
    fn clear_restores_initial_state() {
        let initial = ImportWidget::new(ImportTarget::Transactions);
        let mut widget = initial.clone();
        widget.select_file(csv_file()).unwrap();
        widget.clear_selection();
        assert_eq!(widget, initial);

        widget.clear_selection();
        assert_eq!(widget, initial);
    }

    #[test]
    fn clear_after_rejection_drops_the_message() {
        let initial = ImportWidget::new(ImportTarget::Categories);
        let mut widget = initial.clone();
        widget.input_push('x');
        let _ = widget.select_input();
        widget.clear_selection();
        assert_eq!(widget, initial);
    }

    #[test]
    fn submit_without_file_is_rejected() {
        let mut widget = ImportWidget::new(ImportTarget::Categories);
        assert_eq!(widget.submit().unwrap_err(), WidgetError::NoFileSelected);
        assert_eq!(widget.state(), &WidgetState::Idle);
        assert_eq!(widget.notice().unwrap().message, "No file selected");
    }

    #[test]
    fn submit_moves_to_uploading_immediately() {
        let mut widget = ImportWidget::new(ImportTarget::Categories);
        widget.select_file(csv_file()).unwrap();
        let pending = widget.submit().unwrap();
        assert_eq!(pending.attempt, 1);
        assert_eq!(pending.target, ImportTarget::Categories);
        assert!(widget.is_uploading());
        assert_eq!(widget.selected_file(), Some(&csv_file()));
    }

    #[test]
    fn double_submit_is_refused() {
        let mut widget = ImportWidget::new(ImportTarget::Categories);
        widget.select_file(csv_file()).unwrap();
        widget.submit().unwrap();
        assert_eq!(widget.submit().unwrap_err(), WidgetError::Busy);
        assert_eq!(
            widget.select_file(csv_file()).unwrap_err(),
            WidgetError::Busy
        );
        assert!(widget.is_uploading());
    }

    #[test]
    fn clear_is_ignored_while_uploading() {
        let mut widget = ImportWidget::new(ImportTarget::Categories);
        widget.select_file(csv_file()).unwrap();
        widget.submit().unwrap();
        widget.clear_selection();
        assert!(widget.is_uploading());
    }

    #[test]
    fn completion_settles_the_upload() {
        let mut widget = ImportWidget::new(ImportTarget::Categories);
        widget.select_file(csv_file()).unwrap();
        let pending = widget.submit().unwrap();
        assert!(widget.complete(pending.attempt, Ok(summary())));

        let finished = widget.finished().unwrap();
        assert_eq!(finished.file_name, "categories.csv");
        assert_eq!(finished.outcome, UploadOutcome::Success(summary()));
        assert!(widget.selected_file().is_none());
    }

    #[test]
    fn server_failure_lands_in_finished() {
        let mut widget = ImportWidget::new(ImportTarget::Categories);
        widget.select_file(csv_file()).unwrap();
        let pending = widget.submit().unwrap();
        widget.complete(
            pending.attempt,
            Err(ClientError::Server {
                status: StatusCode::BAD_REQUEST,
                body: api_types::error::ImportErrorBody {
                    message: Some("bad header row".to_string()),
                    ..Default::default()
                },
            }),
        );

        match &widget.finished().unwrap().outcome {
            UploadOutcome::Failure(failure) => assert_eq!(failure.message, "bad header row"),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn stale_completion_is_dropped() {
        let mut widget = ImportWidget::new(ImportTarget::Categories);
        widget.select_file(csv_file()).unwrap();
        let pending = widget.submit().unwrap();
        assert!(!widget.complete(pending.attempt + 1, Ok(summary())));
        assert!(widget.is_uploading());
    }

    #[test]
    fn reset_after_result_allows_a_new_attempt() {
        let mut widget = ImportWidget::new(ImportTarget::Categories);
        widget.select_file(csv_file()).unwrap();
        let first = widget.submit().unwrap();
        widget.complete(first.attempt, Ok(summary()));

        widget.clear_selection();
        assert_eq!(widget.state(), &WidgetState::Idle);

        widget.select_file(csv_file()).unwrap();
        let second = widget.submit().unwrap();
        assert_eq!(second.attempt, 2);
    }

    #[test]
    fn select_path_reads_file_and_preview() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("transactions.csv");
        std::fs::write(&path, "date,amount\n2024-01-02,10.00\n").unwrap();

        let mut widget = ImportWidget::new(ImportTarget::Transactions);
        widget.select_path(&path, SelectionSource::Picker).unwrap();
        assert_eq!(widget.selected_file().unwrap().size, 29);
        let preview = widget.preview().unwrap().as_ref().unwrap();
        assert_eq!(preview.headers, vec!["date", "amount"]);
        assert_eq!(preview.rows, 1);
    }

    #[test]
    fn select_path_reports_missing_file() {
        let mut widget = ImportWidget::new(ImportTarget::Transactions);
        let err = widget
            .select_path("/definitely/not/here.csv", SelectionSource::Picker)
            .unwrap_err();
        assert!(matches!(err, WidgetError::Unreadable(_)));
        assert_eq!(widget.state(), &WidgetState::Idle);
        assert!(widget.notice().is_some());
    }

    #[test]
    fn typed_path_is_only_editable_when_idle() {
        let mut widget = ImportWidget::new(ImportTarget::Categories);
        widget.input_push('a');
        widget.input_push('b');
        widget.input_pop();
        assert_eq!(widget.input(), "a");

        widget.select_file(csv_file()).unwrap();
        widget.input_push('z');
        assert_eq!(widget.input(), "/tmp/categories.csv");
    }

    #[test]
    fn dropped_payload_with_wrong_extension_uses_drop_message() {
        let mut widget = ImportWidget::new(ImportTarget::Categories);
        widget.drop_payload("'/tmp/photo.png'").unwrap_err();
        assert_eq!(widget.notice().unwrap().message, "Please upload a CSV file");
        assert!(widget.drop_payload("   ").is_ok());
    }
}
