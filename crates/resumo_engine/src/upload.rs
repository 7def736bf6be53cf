use std::time::Duration;

use reqwest::multipart::{Form, Part};
use resumo_logging::{resumo_debug, resumo_info};
use url::Url;

use crate::client::build_client;
use crate::{ServerResponse, SubmissionId, UploadError, UploadFile};

#[derive(Debug, Clone)]
pub struct UploadSettings {
    pub base_url: Url,
    pub endpoint_path: String,
    pub field_name: String,
    pub connect_timeout: Duration,
}

impl UploadSettings {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            endpoint_path: "/resumir".to_string(),
            field_name: "arquivo".to_string(),
            connect_timeout: Duration::from_secs(10),
        }
    }

    pub fn endpoint(&self) -> Result<Url, UploadError> {
        self.base_url
            .join(&self.endpoint_path)
            .map_err(|err| UploadError::Request(err.to_string()))
    }
}

#[async_trait::async_trait]
pub trait Uploader: Send + Sync {
    /// Sends one file and returns the redirect target.
    async fn upload(
        &self,
        submission: SubmissionId,
        file: UploadFile,
    ) -> Result<String, UploadError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestUploader {
    client: reqwest::Client,
    settings: UploadSettings,
}

impl ReqwestUploader {
    pub fn new(settings: UploadSettings) -> Result<Self, UploadError> {
        let client = build_client(settings.connect_timeout)
            .map_err(|err| UploadError::Request(err.to_string()))?;
        Ok(Self::with_client(client, settings))
    }

    pub fn with_client(client: reqwest::Client, settings: UploadSettings) -> Self {
        Self { client, settings }
    }

    fn build_form(&self, file: UploadFile) -> Result<Form, UploadError> {
        let part = Part::bytes(file.bytes).file_name(file.name);
        let part = if file.mime_type.is_empty() {
            part
        } else {
            part.mime_str(&file.mime_type)
                .map_err(|err| UploadError::Request(err.to_string()))?
        };
        Ok(Form::new().part(self.settings.field_name.clone(), part))
    }
}

#[async_trait::async_trait]
impl Uploader for ReqwestUploader {
    async fn upload(
        &self,
        submission: SubmissionId,
        file: UploadFile,
    ) -> Result<String, UploadError> {
        let endpoint = self.settings.endpoint()?;
        resumo_info!(
            "Uploading submission={} name={} bytes={} to {}",
            submission,
            file.name,
            file.bytes.len(),
            endpoint
        );
        let form = self.build_form(file)?;

        let response = self
            .client
            .post(endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(map_reqwest_error)?;
        resumo_debug!(
            "Upload response submission={} status={} body_len={}",
            submission,
            status,
            body.len()
        );
        interpret_response(status, &body)
    }
}

/// Maps a `/resumir` response onto a redirect target or an error.
///
/// A non-2xx status is always a rejection, carrying the server's `erro` text
/// when the body has one. A 2xx status must carry a non-empty `redirect`.
pub fn interpret_response(status: u16, body: &[u8]) -> Result<String, UploadError> {
    let parsed = serde_json::from_slice::<ServerResponse>(body);

    if !(200..300).contains(&status) {
        let message = parsed
            .ok()
            .and_then(|response| response.erro)
            .filter(|message| !message.is_empty());
        return Err(UploadError::ServerRejected { status, message });
    }

    let response = parsed.map_err(|err| UploadError::MalformedResponse {
        status,
        detail: err.to_string(),
    })?;
    match response.redirect {
        Some(redirect) if !redirect.is_empty() => Ok(redirect),
        _ => Err(UploadError::MalformedResponse {
            status,
            detail: "missing redirect".to_string(),
        }),
    }
}

pub(crate) fn map_reqwest_error(err: reqwest::Error) -> UploadError {
    if err.is_timeout() {
        return UploadError::Timeout(err.to_string());
    }
    if err.is_builder() {
        return UploadError::Request(err.to_string());
    }
    UploadError::Network(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redirect_on_success() {
        let result = interpret_response(200, br#"{"redirect": "/resumo/42"}"#);
        assert_eq!(result, Ok("/resumo/42".to_string()));
    }

    #[test]
    fn any_2xx_counts_as_success() {
        let result = interpret_response(201, br#"{"redirect": "/resumo"}"#);
        assert_eq!(result, Ok("/resumo".to_string()));
    }

    #[test]
    fn server_message_on_failure() {
        let result = interpret_response(500, br#"{"erro": "internal error"}"#);
        assert_eq!(
            result,
            Err(UploadError::ServerRejected {
                status: 500,
                message: Some("internal error".to_string())
            })
        );
    }

    #[test]
    fn failure_without_json_has_no_message() {
        let result = interpret_response(502, b"<html>Bad Gateway</html>");
        assert_eq!(
            result,
            Err(UploadError::ServerRejected {
                status: 502,
                message: None
            })
        );
    }

    #[test]
    fn empty_error_text_has_no_message() {
        let result = interpret_response(400, br#"{"erro": ""}"#);
        assert!(matches!(
            result,
            Err(UploadError::ServerRejected { message: None, .. })
        ));
    }

    #[test]
    fn success_without_redirect_is_malformed() {
        let bodies: [&[u8]; 3] = [b"{}", br#"{"redirect": ""}"#, br#"{"erro": "x"}"#];
        for body in bodies {
            assert!(matches!(
                interpret_response(200, body),
                Err(UploadError::MalformedResponse { status: 200, .. })
            ));
        }
    }

    #[test]
    fn success_with_non_json_is_malformed() {
        assert!(matches!(
            interpret_response(200, b"ok"),
            Err(UploadError::MalformedResponse { .. })
        ));
    }

    #[test]
    fn endpoint_joins_base_url() {
        let settings = UploadSettings::new(Url::parse("http://localhost:5000/app/").unwrap());
        assert_eq!(
            settings.endpoint().unwrap().as_str(),
            "http://localhost:5000/resumir"
        );
    }
}
