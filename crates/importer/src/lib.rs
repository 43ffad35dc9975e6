//! Client side of the CSV import routes: file selection, upload lifecycle and
//! rendering of the import summary.

pub use client::Client;
pub use error::ClientError;
pub use file::{SelectedFile, parse_dropped_path};
pub use outcome::{
    FailureKind, FinishedUpload, GENERIC_FAILURE, ImportFailure, ImportSummary, UploadOutcome,
};
pub use preview::{CsvPreview, MAX_PREVIEW_ROWS, read_preview};
pub use render::{
    Counter, Emphasis, Link, MAX_ERROR_DETAILS, ResultPanel, Tone, render_result,
};
pub use size::format_byte_size;
pub use target::ImportTarget;
pub use widget::{ImportWidget, PendingUpload, SelectionSource, WidgetError, WidgetState};

mod client;
mod error;
mod file;
mod outcome;
mod preview;
mod render;
mod size;
mod target;
mod widget;
