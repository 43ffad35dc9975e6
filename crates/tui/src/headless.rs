use std::path::Path;

use importer::{Client, ImportTarget, ImportWidget, SelectionSource, render_result};

use crate::error::{AppError, Result};

/// Uploads `path` once and prints the result panel as text.
///
/// Returns an error when the file is rejected or the import failed, so the
/// process exits non-zero.
pub async fn run(client: &Client, target: ImportTarget, path: &Path) -> Result<()> {
    let mut widget = ImportWidget::new(target);
    if widget.select_path(path, SelectionSource::Picker).is_err() {
        let message = widget
            .notice()
            .map(|notice| notice.message.clone())
            .unwrap_or_else(|| "Please select a CSV file".to_string());
        return Err(AppError::Import(message));
    }

    if let Some(label) = widget.file_label() {
        println!("Uploading {label} to {}", client.endpoint(target)?);
    }

    let finished = widget
        .upload(client)
        .await
        .map_err(|err| AppError::Import(err.to_string()))?;
    let panel = render_result(&finished.outcome, target);
    for line in panel.to_lines() {
        println!("{line}");
    }

    if finished.outcome.is_success() {
        Ok(())
    } else {
        Err(AppError::Import(panel.heading.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn non_csv_file_is_refused_before_upload() {
        let client = Client::new("http://127.0.0.1:9", Duration::from_secs(1)).unwrap();
        let err = run(&client, ImportTarget::Categories, Path::new("/tmp/export.xlsx"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Import(message) if message == "Please select a CSV file"));
    }

    #[tokio::test]
    async fn unreachable_server_fails_the_run() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bank.csv");
        std::fs::write(&path, "date,amount\n").unwrap();

        let client = Client::new(&format!("http://{addr}"), Duration::from_secs(5)).unwrap();
        let err = run(&client, ImportTarget::Transactions, &path)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Import(message) if message == "Import Failed"));
    }
}
