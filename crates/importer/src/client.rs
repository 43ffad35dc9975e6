use std::time::Duration;

use api_types::error::ImportErrorBody;
use reqwest::{
    Url,
    multipart::{Form, Part},
};

use crate::{
    error::ClientError,
    file::SelectedFile,
    outcome::ImportSummary,
    target::ImportTarget,
};

const CSV_MIME: &str = "text/csv";

/// HTTP client for the CSV import routes.
#[derive(Debug, Clone)]
pub struct Client {
    base_url: Url,
    http: reqwest::Client,
}

impl Client {
    /// `timeout` bounds the whole request, upload included.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        // Without the trailing slash `join` would drop the last path segment.
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let base_url = Url::parse(&normalized)
            .map_err(|err| ClientError::InvalidUrl(format!("{base_url}: {err}")))?;
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { base_url, http })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn endpoint(&self, target: ImportTarget) -> Result<Url, ClientError> {
        self.base_url
            .join(target.endpoint())
            .map_err(|err| ClientError::InvalidUrl(err.to_string()))
    }

    /// Uploads `file` as the `file` field of a multipart body.
    ///
    /// Any 2xx status is a success: the transaction route answers `201` when
    /// the import was only partial.
    pub async fn csv_import(
        &self,
        target: ImportTarget,
        file: &SelectedFile,
    ) -> Result<ImportSummary, ClientError> {
        let endpoint = self.endpoint(target)?;
        let content = tokio::fs::read(&file.path)
            .await
            .map_err(|source| ClientError::Io {
                path: file.path.display().to_string(),
                source,
            })?;

        let part = Part::bytes(content)
            .file_name(file.name.clone())
            .mime_str(CSV_MIME)?;
        let form = Form::new().part("file", part);

        tracing::debug!(%endpoint, file = %file.name, size = file.size, "sending csv import");
        let res = self.http.post(endpoint).multipart(form).send().await?;

        let status = res.status();
        let body = res.bytes().await?;
        tracing::debug!(%status, len = body.len(), "csv import answered");

        if status.is_success() {
            let summary = match target {
                ImportTarget::Categories => ImportSummary::Categories(serde_json::from_slice(&body)?),
                ImportTarget::Transactions => {
                    ImportSummary::Transactions(serde_json::from_slice(&body)?)
                }
            };
            return Ok(summary);
        }

        let body = serde_json::from_slice::<ImportErrorBody>(&body).unwrap_or_default();
        Err(ClientError::Server { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_keeps_base_path_prefix() {
        let client = Client::new("http://127.0.0.1:5000/finance", Duration::from_secs(1)).unwrap();
        assert_eq!(
            client.endpoint(ImportTarget::Transactions).unwrap().as_str(),
            "http://127.0.0.1:5000/finance/api/transaction/csv_import"
        );
    }

    #[test]
    fn rejects_invalid_base_url() {
        let err = Client::new("not a url", Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, ClientError::InvalidUrl(_)));
    }
}
