use std::io::{self, BufRead};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use resumo_core::{update, AppState, MissingElement, Msg, PageElements, ResumoActions};
use resumo_engine::EngineHandle;
use resumo_logging::{resumo_info, resumo_warn};

use super::clipboard::SystemClipboard;
use super::config::AppConfig;
use super::console::{load_selected_file, ConsoleCommand, ParseError, HELP};
use super::effects::{EffectRunner, HostEvent, Navigation};
use super::logging;
use super::navigation::{is_summary_location, History};
use super::render::{render, render_summary};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

pub fn run_app() -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    logging::initialize(config.log_destination);
    resumo_info!(
        "Starting resumo_app server={} downloads={:?}",
        config.server_url,
        config.download_dir
    );

    let engine = EngineHandle::new(config.upload_settings()?)?;
    let runner = EffectRunner::new(
        engine,
        config.download_dir.clone(),
        Box::new(SystemClipboard),
    );
    let mut host = Host::new(runner);

    // Console input plays the part of the page's event source.
    let (line_tx, line_rx) = mpsc::channel::<String>();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if line_tx.send(line).is_err() {
                break;
            }
        }
    });

    println!("{HELP}");
    print_lines(host.show());

    let mut input_closed = false;
    while !host.quit_requested() {
        if input_closed {
            // Keep pumping until pending work settles.
            if !host.is_busy() {
                break;
            }
            thread::sleep(POLL_INTERVAL);
        } else {
            match line_rx.recv_timeout(POLL_INTERVAL) {
                Ok(line) => print_lines(host.handle_line(&line)),
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => input_closed = true,
            }
        }
        print_lines(host.pump());
    }

    resumo_info!("resumo_app exiting");
    Ok(())
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{line}");
    }
}

enum Page {
    Upload,
    SummaryLoading,
    Summary(ResumoActions),
    /// The summary page could not be fetched.
    SummaryUnavailable,
}

/// One browser tab: the current page, its history and its side effects.
struct Host {
    state: AppState,
    page: Page,
    history: History,
    runner: EffectRunner,
    quit: bool,
}

impl Host {
    fn new(runner: EffectRunner) -> Self {
        let mut host = Self {
            state: AppState::with_elements(PageElements::upload_page()),
            page: Page::Upload,
            history: History::default(),
            runner,
            quit: false,
        };
        let location = host.history.current().to_string();
        host.dispatch(Msg::PageShown {
            location,
            referrer: None,
        });
        host
    }

    fn quit_requested(&self) -> bool {
        self.quit
    }

    fn is_busy(&self) -> bool {
        self.runner.uploads_in_flight() > 0 || matches!(self.page, Page::SummaryLoading)
    }

    fn show(&self) -> Vec<String> {
        match &self.page {
            Page::Upload => render(&self.state.view()),
            Page::Summary(actions) => render_summary(self.history.current(), actions),
            Page::SummaryLoading => vec![format!("Loading {} ...", self.history.current())],
            Page::SummaryUnavailable => vec![
                format!("== {} ==", self.history.current()),
                "Summary unavailable".to_string(),
            ],
        }
    }

    fn handle_line(&mut self, line: &str) -> Vec<String> {
        match ConsoleCommand::parse(line) {
            Ok(command) => self.handle_command(command),
            Err(ParseError::Empty) => Vec::new(),
            Err(ParseError::MissingArgument(command)) => {
                vec![format!("{command}: missing file path")]
            }
            Err(ParseError::Unknown(word)) => vec![format!("unknown command {word:?}; {HELP}")],
        }
    }

    fn handle_command(&mut self, command: ConsoleCommand) -> Vec<String> {
        match command {
            ConsoleCommand::Pick(path) => match load_selected_file(&path) {
                Ok(file) => self.dispatch(Msg::FileInputChanged(vec![file])),
                Err(err) => vec![format!("cannot read {}: {err}", path.display())],
            },
            ConsoleCommand::Drop(path) => match load_selected_file(&path) {
                Ok(file) => self.dispatch(Msg::Dropped(vec![file])),
                Err(err) => {
                    // The drag still ends.
                    let mut out = self.dispatch(Msg::DragLeft);
                    out.push(format!("cannot read {}: {err}", path.display()));
                    out
                }
            },
            ConsoleCommand::DragEnter => self.dispatch(Msg::DragEntered),
            ConsoleCommand::DragOver => self.dispatch(Msg::DragOver),
            ConsoleCommand::DragLeave => self.dispatch(Msg::DragLeft),
            ConsoleCommand::Back => self.dispatch(Msg::BackClicked),
            ConsoleCommand::Edit(text) => match self.summary_actions() {
                Ok(actions) => {
                    actions.set_text(text);
                    self.show()
                }
                Err(reason) => vec![reason],
            },
            ConsoleCommand::Copy => match self.summary_actions() {
                Ok(actions) => {
                    let effect = actions.copy();
                    let copied = actions.text().chars().count();
                    self.runner.run(vec![effect]);
                    vec![format!("Copied {copied} characters")]
                }
                Err(reason) => vec![reason],
            },
            ConsoleCommand::Save => match self.summary_actions() {
                Ok(actions) => {
                    let effect = actions.save_as_file();
                    self.runner.run(vec![effect]);
                    vec![format!("Saved {}", resumo_core::SUMMARY_FILENAME)]
                }
                Err(reason) => vec![reason],
            },
            ConsoleCommand::Show => self.show(),
            ConsoleCommand::Help => vec![HELP.to_string()],
            ConsoleCommand::Quit => {
                self.quit = true;
                Vec::new()
            }
        }
    }

    fn summary_actions(&mut self) -> Result<&mut ResumoActions, String> {
        match &mut self.page {
            Page::Summary(actions) => Ok(actions),
            Page::SummaryLoading => Err("summary is still loading".to_string()),
            Page::Upload | Page::SummaryUnavailable => {
                Err(MissingElement::SummaryText.to_string())
            }
        }
    }

    fn dispatch(&mut self, msg: Msg) -> Vec<String> {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        self.state = state;

        match self.runner.run(effects) {
            Some(navigation) => self.navigate(navigation),
            None if was_dirty && matches!(self.page, Page::Upload) => self.show(),
            None => Vec::new(),
        }
    }

    fn navigate(&mut self, navigation: Navigation) -> Vec<String> {
        match navigation {
            Navigation::To(location) => {
                self.history.push(location.clone());
                self.open(location)
            }
            Navigation::Back => match self.history.back() {
                Some(location) => {
                    let location = location.to_string();
                    self.open(location)
                }
                None => vec!["no previous page".to_string()],
            },
        }
    }

    fn open(&mut self, location: String) -> Vec<String> {
        self.runner.unload_page();
        let referrer = self.history.referrer().map(str::to_string);

        let elements = if is_summary_location(&location) {
            self.runner.load_summary(&location);
            self.page = Page::SummaryLoading;
            PageElements::summary_page()
        } else {
            self.page = Page::Upload;
            PageElements::upload_page()
        };
        self.state = AppState::with_elements(elements);

        let mut out = self.dispatch(Msg::PageShown { location, referrer });
        if matches!(self.page, Page::SummaryLoading) {
            out.extend(self.show());
        }
        out
    }

    fn pump(&mut self) -> Vec<String> {
        let mut out = Vec::new();
        while let Some(event) = self.runner.poll() {
            out.extend(self.handle_host_event(event));
        }
        out
    }

    fn handle_host_event(&mut self, event: HostEvent) -> Vec<String> {
        match event {
            HostEvent::Msg(msg) => self.dispatch(msg),
            HostEvent::SummaryLoaded { url, text } => {
                if !self.is_loading(&url) {
                    return Vec::new();
                }
                match ResumoActions::bind(&self.state.elements(), text) {
                    Ok(actions) => {
                        self.page = Page::Summary(actions);
                        self.show()
                    }
                    Err(err) => vec![err.to_string()],
                }
            }
            HostEvent::SummaryFailed { url, reason } => {
                resumo_warn!("Could not load {}: {}", url, reason);
                if !self.is_loading(&url) {
                    return Vec::new();
                }
                self.page = Page::SummaryUnavailable;
                vec![format!("Could not load {url}: {reason}")]
            }
        }
    }

    // Late results for a page already left are ignored.
    fn is_loading(&self, url: &str) -> bool {
        matches!(self.page, Page::SummaryLoading) && url == self.history.current()
    }
}
