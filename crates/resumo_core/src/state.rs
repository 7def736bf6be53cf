use crate::view_model::AppViewModel;
use crate::{
    validate, Effect, PageElements, SelectedFile, UploadFailure, DRAG_HINT_FAILED, DRAG_HINT_IDLE,
    INVALID_FORMAT_MESSAGE,
};

pub type SubmissionId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Indicator {
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MessageLabel {
    pub text: String,
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextLabel {
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Dropzone {
    pub dragover: bool,
}

/// Status indicators of the upload page.
///
/// `None` stands for an element the page does not have; writes to it are
/// dropped. The two icons are independent flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiState {
    pub success_icon: Option<Indicator>,
    pub error_icon: Option<Indicator>,
    pub error_message: Option<MessageLabel>,
    pub filename: Option<TextLabel>,
    pub drag_hint: Option<TextLabel>,
    pub dropzone: Option<Dropzone>,
}

impl UiState {
    pub fn from_elements(elements: &PageElements) -> Self {
        Self {
            success_icon: elements.success_icon.then(Indicator::default),
            error_icon: elements.error_icon.then(Indicator::default),
            error_message: elements.error_message.then(MessageLabel::default),
            filename: elements.filename_label.then(TextLabel::default),
            drag_hint: elements.drag_hint.then(|| TextLabel {
                text: DRAG_HINT_IDLE.to_string(),
            }),
            dropzone: elements.dropzone.then(Dropzone::default),
        }
    }

    /// Neutral baseline: no icons, no message, no filename, idle hint.
    pub fn reset(&mut self) {
        self.set_success_icon(false);
        self.set_error_icon(false);
        self.hide_error_message();
        self.set_filename("");
        self.set_drag_hint(DRAG_HINT_IDLE);
    }

    fn set_success_icon(&mut self, visible: bool) {
        if let Some(icon) = self.success_icon.as_mut() {
            icon.visible = visible;
        }
    }

    fn set_error_icon(&mut self, visible: bool) {
        if let Some(icon) = self.error_icon.as_mut() {
            icon.visible = visible;
        }
    }

    fn show_error_message(&mut self, text: &str) {
        if let Some(label) = self.error_message.as_mut() {
            label.text = text.to_string();
            label.visible = true;
        }
    }

    // The previous text stays in place, only hidden.
    fn hide_error_message(&mut self) {
        if let Some(label) = self.error_message.as_mut() {
            label.visible = false;
        }
    }

    fn set_filename(&mut self, text: &str) {
        if let Some(label) = self.filename.as_mut() {
            label.text = text.to_string();
        }
    }

    fn set_drag_hint(&mut self, text: &str) {
        if let Some(label) = self.drag_hint.as_mut() {
            label.text = text.to_string();
        }
    }

    fn set_dragover(&mut self, dragover: bool) {
        if let Some(zone) = self.dropzone.as_mut() {
            zone.dragover = dragover;
        }
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::from_elements(&PageElements::all())
    }
}

/// Lifecycle of the latest submission.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionStage {
    #[default]
    Idle,
    Rejected,
    Uploading {
        submission: SubmissionId,
    },
    Succeeded {
        redirect: String,
    },
    Failed {
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    elements: PageElements,
    ui: UiState,
    stage: SubmissionStage,
    next_submission: SubmissionId,
    in_flight: usize,
    location: String,
    referrer: Option<String>,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_elements(PageElements::upload_page())
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_elements(elements: PageElements) -> Self {
        Self {
            elements,
            ui: UiState::from_elements(&elements),
            stage: SubmissionStage::Idle,
            next_submission: 1,
            in_flight: 0,
            location: crate::SITE_ROOT.to_string(),
            referrer: None,
            dirty: false,
        }
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            success_icon_visible: self.ui.success_icon.is_some_and(|icon| icon.visible),
            error_icon_visible: self.ui.error_icon.is_some_and(|icon| icon.visible),
            error_message: self
                .ui
                .error_message
                .as_ref()
                .filter(|label| label.visible)
                .map(|label| label.text.clone()),
            filename: self
                .ui
                .filename
                .as_ref()
                .map(|label| label.text.clone())
                .unwrap_or_default(),
            drag_hint: self.ui.drag_hint.as_ref().map(|label| label.text.clone()),
            dragover: self.ui.dropzone.is_some_and(|zone| zone.dragover),
            stage: self.stage.clone(),
            uploads_in_flight: self.in_flight,
            location: self.location.clone(),
        }
    }

    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    pub fn elements(&self) -> PageElements {
        self.elements
    }

    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn show_page(&mut self, location: String, referrer: Option<String>) {
        self.location = location;
        self.referrer = referrer;
        self.mark_dirty();
    }

    pub(crate) fn referrer(&self) -> Option<&str> {
        self.referrer.as_deref()
    }

    pub(crate) fn reset_ui(&mut self) {
        self.ui.reset();
        self.mark_dirty();
    }

    pub(crate) fn set_dragover(&mut self, dragover: bool) {
        self.ui.set_dragover(dragover);
        self.mark_dirty();
    }

    /// Validates `file` and, when it is a PDF, hands it to the uploader.
    pub(crate) fn submit(&mut self, file: Option<SelectedFile>) -> Option<Effect> {
        self.mark_dirty();
        if !validate(file.as_ref()) {
            self.ui.set_error_icon(true);
            self.ui.show_error_message(INVALID_FORMAT_MESSAGE);
            self.ui
                .set_filename(file.as_ref().map(|f| f.name.as_str()).unwrap_or(""));
            self.ui.set_success_icon(false);
            self.stage = SubmissionStage::Rejected;
            return None;
        }
        let file = file?;

        self.ui.set_error_icon(false);
        self.ui.hide_error_message();
        self.ui.set_success_icon(false);
        self.ui.set_filename(&file.name);

        let submission = self.next_submission;
        self.next_submission += 1;
        self.in_flight += 1;
        self.stage = SubmissionStage::Uploading { submission };
        Some(Effect::Upload { submission, file })
    }

    /// Applies an upload result. Overlapping uploads are not ordered: the
    /// last result to arrive wins.
    pub(crate) fn finish_upload(
        &mut self,
        outcome: Result<String, UploadFailure>,
    ) -> Option<Effect> {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.mark_dirty();
        match outcome {
            Ok(redirect) => {
                self.stage = SubmissionStage::Succeeded {
                    redirect: redirect.clone(),
                };
                Some(Effect::Navigate { url: redirect })
            }
            Err(failure) => {
                let message = failure.message();
                self.ui.set_drag_hint(DRAG_HINT_FAILED);
                self.ui.show_error_message(&message);
                self.ui.set_success_icon(false);
                self.ui.set_error_icon(true);
                self.stage = SubmissionStage::Failed { message };
                None
            }
        }
    }
}
