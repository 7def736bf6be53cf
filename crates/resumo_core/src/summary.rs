//! Actions of the summary page: copy the summary text or save it as a file.

use std::ops::Range;

use crate::{Effect, MissingElement, PageElements};

/// Name of the downloaded summary.
pub const SUMMARY_FILENAME: &str = "resumo.txt";
/// Type of the downloaded summary.
pub const SUMMARY_MIME_TYPE: &str = "text/plain;charset=utf-8";

/// The summary text area and the two actions bound to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumoActions {
    text: String,
    selection: Option<Range<usize>>,
}

impl ResumoActions {
    /// Binds to the page's summary text area.
    pub fn bind(elements: &PageElements, text: impl Into<String>) -> Result<Self, MissingElement> {
        if !elements.summary_text {
            return Err(MissingElement::SummaryText);
        }
        Ok(Self {
            text: text.into(),
            selection: None,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Byte range currently selected in the text area.
    pub fn selection(&self) -> Option<Range<usize>> {
        self.selection.clone()
    }

    /// Replaces the text area value, as typing into it would.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.selection = None;
    }

    /// Selects the whole value and puts it on the clipboard.
    pub fn copy(&mut self) -> Effect {
        self.selection = Some(0..self.text.len());
        Effect::CopyToClipboard {
            text: self.text.clone(),
        }
    }

    /// Offers the current value as `resumo.txt`.
    pub fn save_as_file(&self) -> Effect {
        Effect::DownloadText {
            filename: SUMMARY_FILENAME.to_string(),
            mime_type: SUMMARY_MIME_TYPE.to_string(),
            content: self.text.clone(),
        }
    }
}
