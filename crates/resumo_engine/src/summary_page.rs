use resumo_logging::resumo_debug;
use scraper::{Html, Selector};
use thiserror::Error;
use url::Url;

/// Element holding the summary on the page the server redirects to.
pub const SUMMARY_SELECTOR: &str = "textarea#resumoTexto";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SummaryError {
    #[error("invalid summary url: {0}")]
    InvalidUrl(String),
    #[error("summary page returned status {0}")]
    HttpStatus(u16),
    #[error("network error: {0}")]
    Network(String),
    #[error("summary page has no {} element", SUMMARY_SELECTOR)]
    MissingTextArea,
    #[error("invalid selector: {0}")]
    Selector(String),
}

/// Loads the page a successful upload redirects to.
#[derive(Debug, Clone)]
pub struct SummaryPageLoader {
    client: reqwest::Client,
    base_url: Url,
}

impl SummaryPageLoader {
    pub fn new(client: reqwest::Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    /// Resolves `location` against the server and returns the text area value.
    pub async fn load(&self, location: &str) -> Result<String, SummaryError> {
        let url = self
            .base_url
            .join(location)
            .map_err(|err| SummaryError::InvalidUrl(err.to_string()))?;

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|err| SummaryError::Network(err.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(SummaryError::HttpStatus(status.as_u16()));
        }
        let html = response
            .text()
            .await
            .map_err(|err| SummaryError::Network(err.to_string()))?;
        resumo_debug!("Loaded summary page {} ({} bytes)", url, html.len());
        extract_summary_text(&html)
    }
}

pub fn extract_summary_text(html: &str) -> Result<String, SummaryError> {
    let selector =
        Selector::parse(SUMMARY_SELECTOR).map_err(|err| SummaryError::Selector(err.to_string()))?;
    let document = Html::parse_document(html);
    document
        .select(&selector)
        .next()
        .map(|area| area.text().collect::<String>())
        .ok_or(SummaryError::MissingTextArea)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_text_area_value() {
        let html = r#"<html><body>
            <h1>Resumo</h1>
            <textarea id="resumoTexto" rows="10">Primeira frase. Segunda &amp; terceira.</textarea>
            <button onclick="copiarTexto()">Copiar</button>
        </body></html>"#;

        assert_eq!(
            extract_summary_text(html).unwrap(),
            "Primeira frase. Segunda & terceira."
        );
    }

    #[test]
    fn empty_text_area_yields_empty_text() {
        let html = r#"<textarea id="resumoTexto"></textarea>"#;
        assert_eq!(extract_summary_text(html).unwrap(), "");
    }

    #[test]
    fn missing_text_area_is_an_error() {
        let html = r#"<textarea id="other">x</textarea>"#;
        assert_eq!(
            extract_summary_text(html),
            Err(SummaryError::MissingTextArea)
        );
    }
}
