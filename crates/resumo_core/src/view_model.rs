use crate::SubmissionStage;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub success_icon_visible: bool,
    pub error_icon_visible: bool,
    /// Text of the error message, when it is displayed.
    pub error_message: Option<String>,
    pub filename: String,
    /// `None` when the page has no drag-hint element.
    pub drag_hint: Option<String>,
    pub dragover: bool,
    pub stage: SubmissionStage,
    pub uploads_in_flight: usize,
    pub location: String,
}
