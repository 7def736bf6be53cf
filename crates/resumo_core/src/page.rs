use thiserror::Error;

/// Which elements the host page provides.
///
/// Everything is optional except the summary text area, which the summary
/// actions cannot work without.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageElements {
    pub file_input: bool,
    pub dropzone: bool,
    pub success_icon: bool,
    pub error_icon: bool,
    pub error_message: bool,
    pub filename_label: bool,
    pub drag_hint: bool,
    pub back_control: bool,
    pub summary_text: bool,
}

impl PageElements {
    /// Every element present.
    pub const fn all() -> Self {
        Self {
            file_input: true,
            dropzone: true,
            success_icon: true,
            error_icon: true,
            error_message: true,
            filename_label: true,
            drag_hint: true,
            back_control: true,
            summary_text: true,
        }
    }

    /// The upload page: no summary text area.
    pub const fn upload_page() -> Self {
        Self {
            summary_text: false,
            ..Self::all()
        }
    }

    /// The summary page: only the text area and the back control.
    pub const fn summary_page() -> Self {
        Self {
            file_input: false,
            dropzone: false,
            success_icon: false,
            error_icon: false,
            error_message: false,
            filename_label: false,
            drag_hint: false,
            back_control: true,
            summary_text: true,
        }
    }
}

impl Default for PageElements {
    fn default() -> Self {
        Self::all()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MissingElement {
    #[error("summary text area is missing from the page")]
    SummaryText,
}
