// User-facing editor commands and their text form for the command line.

use quill_core::{ObjectId, Point, Size};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    AddText,
    Undo,
    Redo,
    SetFontFamily(String),
    ToggleBold,
    ToggleItalic,
    ToggleUnderline,
    SetFontSize(u32),
    /// Drag of the active object finished at this position.
    MoveActive(Point),
    /// Resize of the active object finished at this size.
    ResizeActive(Size),
    /// Text editing of the active object was committed.
    EditText(String),
    /// Focus whatever is under the point.
    Select(Point),
    ResizeCanvas { width: u32, height: u32 },
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::AddText => "add_text",
            Command::Undo => "undo",
            Command::Redo => "redo",
            Command::SetFontFamily(_) => "set_font_family",
            Command::ToggleBold => "toggle_bold",
            Command::ToggleItalic => "toggle_italic",
            Command::ToggleUnderline => "toggle_underline",
            Command::SetFontSize(_) => "set_font_size",
            Command::MoveActive(_) => "move_active",
            Command::ResizeActive(_) => "resize_active",
            Command::EditText(_) => "edit_text",
            Command::Select(_) => "select",
            Command::ResizeCanvas { .. } => "resize_canvas",
        }
    }
}

/// What a command did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Added(ObjectId),
    Applied,
    /// Not applicable in the current state. Not an error.
    Ignored,
}

#[derive(Debug, Error, PartialEq)]
pub enum ParseCommandError {
    #[error("empty command")]
    Empty,

    #[error("unknown command '{0}'")]
    Unknown(String),

    #[error("'{command}' expects {expected}")]
    BadArguments {
        command: String,
        expected: &'static str,
    },
}

fn numbers<T: FromStr>(
    command: &str,
    args: &[&str],
    count: usize,
    expected: &'static str,
) -> Result<Vec<T>, ParseCommandError> {
    let bad = || ParseCommandError::BadArguments {
        command: command.to_string(),
        expected,
    };
    if args.len() != count {
        return Err(bad());
    }
    args.iter().map(|a| a.parse().map_err(|_| bad())).collect()
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (head, rest) = match line.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (line, ""),
        };
        let args: Vec<&str> = rest.split_whitespace().collect();

        match head.to_ascii_lowercase().as_str() {
            "" => Err(ParseCommandError::Empty),
            "add" => Ok(Command::AddText),
            "undo" => Ok(Command::Undo),
            "redo" => Ok(Command::Redo),
            "bold" => Ok(Command::ToggleBold),
            "italic" => Ok(Command::ToggleItalic),
            "underline" => Ok(Command::ToggleUnderline),
            "font" if !rest.is_empty() => Ok(Command::SetFontFamily(rest.to_string())),
            "font" => Err(ParseCommandError::BadArguments {
                command: head.to_string(),
                expected: "a font family name",
            }),
            "size" => {
                let v = numbers::<u32>(head, &args, 1, "one positive integer")?;
                Ok(Command::SetFontSize(v[0]))
            }
            "move" => {
                let v = numbers::<f32>(head, &args, 2, "x and y")?;
                Ok(Command::MoveActive(Point::new(v[0], v[1])))
            }
            "resize" => {
                let v = numbers::<f32>(head, &args, 2, "width and height")?;
                Ok(Command::ResizeActive(Size::new(v[0], v[1])))
            }
            "text" => Ok(Command::EditText(rest.replace("\\n", "\n"))),
            "select" => {
                let v = numbers::<f32>(head, &args, 2, "x and y")?;
                Ok(Command::Select(Point::new(v[0], v[1])))
            }
            "canvas" => {
                let v = numbers::<u32>(head, &args, 2, "width and height")?;
                Ok(Command::ResizeCanvas {
                    width: v[0],
                    height: v[1],
                })
            }
            other => Err(ParseCommandError::Unknown(other.to_string())),
        }
    }
}
