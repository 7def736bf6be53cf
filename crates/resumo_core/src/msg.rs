#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// The page was (re)displayed at `location`.
    PageShown {
        location: String,
        referrer: Option<String>,
    },
    /// User picked files through the file input.
    FileInputChanged(Vec<crate::SelectedFile>),
    /// A drag entered the dropzone.
    DragEntered,
    /// A drag moved over the dropzone.
    DragOver,
    /// A drag left the dropzone without dropping.
    DragLeft,
    /// Files were dropped on the dropzone.
    Dropped(Vec<crate::SelectedFile>),
    /// Engine completion for an upload.
    UploadFinished {
        submission: crate::SubmissionId,
        outcome: Result<String, crate::UploadFailure>,
    },
    /// User clicked the back control.
    BackClicked,
}
