use crate::{requests, responses};
use reqwest::StatusCode;
use reqwest::multipart::{Form, Part};
use serde::Serialize;

type ReqwestResult = Result<reqwest::Response, reqwest::Error>;

/// An API client for interfacing with the backend.
pub struct APIClient {
    pub address: String,
    pub inner_client: reqwest::Client,
}

/// Helper methods for http actions
impl APIClient {
    fn format_url(&self, path: &str) -> String {
        format!("{}/api/{path}", &self.address)
    }

    async fn post(&self, path: &str, body: &impl Serialize) -> ReqwestResult {
        self.inner_client
            .post(self.format_url(path))
            .json(body)
            .send()
            .await
    }
}

/// Methods on the backend API
impl APIClient {
    /// Create a new event. The response body is not used; any 2xx status
    /// counts as success.
    pub async fn create_event(
        &self,
        details: &requests::CreateEvent,
    ) -> Result<(), ClientError> {
        let response = self.post("admin/events", details).await?;
        ok_empty(response).await
    }
}

/// A client for the third-party media host that stores cover images.
///
/// Uploads are unsigned: the only credential is the upload preset, which
/// the media host uses to decide where and how to store the file.
pub struct MediaHostClient {
    pub upload_url: String,
    pub upload_preset: String,
    pub inner_client: reqwest::Client,
}

/// A file picked by the user, read fully into memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub name: String,
    /// Empty when the browser could not determine the type.
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl MediaHostClient {
    /// Upload an image, returning the URL the media host serves it from.
    pub async fn upload_image(
        &self,
        image: ImageFile,
    ) -> Result<String, ClientError> {
        let mut part = Part::bytes(image.data).file_name(image.name);
        if !image.mime_type.is_empty() {
            part = part.mime_str(&image.mime_type)?;
        }
        let form = Form::new()
            .part("file", part)
            .text("upload_preset", self.upload_preset.clone());

        let response = self
            .inner_client
            .post(&self.upload_url)
            .multipart(form)
            .send()
            .await?;

        // The media host reports rejections in the body, so the status code
        // alone does not decide the outcome.
        let status = response.status();
        let body = response.json::<responses::MediaUpload>().await?;
        match body.secure_url {
            Some(url) => Ok(url),
            None => {
                let reason = body.error.map(|e| e.message);
                tracing::warn!(%status, ?reason, "Media host rejected upload");
                Err(ClientError::MissingSecureUrl(reason))
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// An unhandled API error to display, containing response text.
    #[error("{1}")]
    APIError(StatusCode, String),
    #[error("Network error. Please check your connection.")]
    Network(#[from] reqwest::Error),
    /// The media host answered without a usable image URL.
    #[error(
        "Media host did not return an image URL: {}",
        .0.as_deref().unwrap_or("no reason given")
    )]
    MissingSecureUrl(Option<String>),
    /// The file picked for upload could not be read into memory.
    #[error("Could not read the selected file: {0}")]
    FileRead(String),
}

/// Check that an empty response is OK, returning a ClientError if not.
pub async fn ok_empty(response: reqwest::Response) -> Result<(), ClientError> {
    if !response.status().is_success() {
        return Err(ClientError::APIError(
            response.status(),
            response.text().await?,
        ));
    }
    Ok(())
}
