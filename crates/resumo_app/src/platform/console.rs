use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use resumo_core::SelectedFile;

pub const HELP: &str = "commands: pick <path> | drop <path> | dragenter | dragover | dragleave | \
back | edit <text> | copy | save | show | help | quit";

/// One line typed into the console, standing in for a page event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Pick(PathBuf),
    Drop(PathBuf),
    DragEnter,
    DragOver,
    DragLeave,
    Back,
    Edit(String),
    Copy,
    Save,
    Show,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    Empty,
    MissingArgument(&'static str),
    Unknown(String),
}

impl ConsoleCommand {
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        match word.to_ascii_lowercase().as_str() {
            "" => Err(ParseError::Empty),
            "pick" => path_argument(rest, "pick").map(Self::Pick),
            "drop" => path_argument(rest, "drop").map(Self::Drop),
            "dragenter" => Ok(Self::DragEnter),
            "dragover" => Ok(Self::DragOver),
            "dragleave" => Ok(Self::DragLeave),
            "back" => Ok(Self::Back),
            "edit" => Ok(Self::Edit(rest.replace("\\n", "\n"))),
            "copy" => Ok(Self::Copy),
            "save" => Ok(Self::Save),
            "show" => Ok(Self::Show),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            other => Err(ParseError::Unknown(other.to_string())),
        }
    }
}

fn path_argument(rest: &str, command: &'static str) -> Result<PathBuf, ParseError> {
    let rest = rest.trim_matches('"');
    if rest.is_empty() {
        Err(ParseError::MissingArgument(command))
    } else {
        Ok(PathBuf::from(rest))
    }
}

/// Reads a file the way a browser hands it over: name, declared type
/// guessed from the extension, and content.
pub fn load_selected_file(path: &Path) -> io::Result<SelectedFile> {
    let content = fs::read(path)?;
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mime_type = mime_guess::from_path(path)
        .first_raw()
        .unwrap_or_default();
    Ok(SelectedFile::new(name, mime_type, content))
}
