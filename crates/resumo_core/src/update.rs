use crate::{AppState, Effect, Msg, SelectedFile, SITE_ROOT};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let elements = state.elements();
    let effects = match msg {
        Msg::PageShown { location, referrer } => {
            state.show_page(location, referrer);
            Vec::new()
        }
        Msg::FileInputChanged(files) => {
            if !elements.file_input {
                return (state, Vec::new());
            }
            state.reset_ui();
            submit_first(&mut state, files)
        }
        Msg::DragEntered | Msg::DragOver => {
            if elements.dropzone {
                state.set_dragover(true);
            }
            Vec::new()
        }
        Msg::DragLeft => {
            if elements.dropzone {
                state.set_dragover(false);
            }
            Vec::new()
        }
        Msg::Dropped(files) => {
            if !elements.dropzone {
                return (state, Vec::new());
            }
            state.set_dragover(false);
            state.reset_ui();
            submit_first(&mut state, files)
        }
        Msg::UploadFinished {
            submission: _,
            outcome,
        } => state.finish_upload(outcome).into_iter().collect(),
        Msg::BackClicked => {
            if !elements.back_control {
                Vec::new()
            } else if state.referrer().is_some() {
                vec![Effect::HistoryBack]
            } else {
                vec![Effect::Navigate {
                    url: SITE_ROOT.to_string(),
                }]
            }
        }
    };

    (state, effects)
}

// An empty selection leaves the freshly reset UI alone.
fn submit_first(state: &mut AppState, files: Vec<SelectedFile>) -> Vec<Effect> {
    match files.into_iter().next() {
        Some(file) => state.submit(Some(file)).into_iter().collect(),
        None => Vec::new(),
    }
}
