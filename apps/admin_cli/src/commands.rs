//! Line commands typed at the console prompt.

use client_core::{FormField, ModalMode, UnknownField};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Login { username: String, password: String },
    Refresh,
    /// `row` is the 0-based table position; `None` opens a blank create form.
    Open { mode: ModalMode, row: Option<usize> },
    Set { field: FormField, value: String },
    Enable(bool),
    ImageAdd,
    ImageRemove(usize),
    ImageSet(usize, String),
    Confirm,
    Cancel,
    Logout,
    Help,
    Quit,
}

impl ConsoleCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Login { .. } => "login",
            Self::Refresh => "refresh",
            Self::Open { .. } => "open_modal",
            Self::Set { .. } => "set_field",
            Self::Enable(_) => "set_enabled",
            Self::ImageAdd => "image_add",
            Self::ImageRemove(_) => "image_remove",
            Self::ImageSet(..) => "image_set",
            Self::Confirm => "confirm",
            Self::Cancel => "cancel",
            Self::Logout => "logout",
            Self::Help => "help",
            Self::Quit => "quit",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command '{0}'")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error(transparent)]
    Field(#[from] UnknownField),
    #[error("'{0}' is not a valid position")]
    BadIndex(String),
}

pub const HELP: &str = "\
commands:
  login <username> <password>   sign in
  list | refresh                reload the product table
  new                           open the create form
  edit <row> | delete <row>     open the modal for a table row (1-based)
  set <field> <value>           title, category, unit, description, content,
                                origin_price, price, image_url
  enable | disable              toggle the enabled flag
  image add | image remove <i> | image set <i> <url>
  confirm | cancel              submit or close the modal
  logout | help | quit";

pub fn parse_command(line: &str) -> Result<ConsoleCommand, CommandError> {
    let (verb, rest) = split_word(line);
    match verb {
        "" => Err(CommandError::Empty),
        "login" => {
            let (username, password) = split_word(rest);
            if username.is_empty() || password.is_empty() {
                return Err(CommandError::Usage("login <username> <password>"));
            }
            Ok(ConsoleCommand::Login {
                username: username.to_string(),
                password: password.to_string(),
            })
        }
        "list" | "refresh" => Ok(ConsoleCommand::Refresh),
        "new" | "create" => Ok(ConsoleCommand::Open {
            mode: ModalMode::Create,
            row: None,
        }),
        "edit" => Ok(ConsoleCommand::Open {
            mode: ModalMode::Edit,
            row: Some(parse_row(rest, "edit <row>")?),
        }),
        "delete" => Ok(ConsoleCommand::Open {
            mode: ModalMode::Delete,
            row: Some(parse_row(rest, "delete <row>")?),
        }),
        "set" => {
            let (field, value) = split_word(rest);
            if field.is_empty() {
                return Err(CommandError::Usage("set <field> <value>"));
            }
            Ok(ConsoleCommand::Set {
                field: field.parse()?,
                value: value.to_string(),
            })
        }
        "enable" => Ok(ConsoleCommand::Enable(true)),
        "disable" => Ok(ConsoleCommand::Enable(false)),
        "image" => parse_image(rest),
        "confirm" | "submit" => Ok(ConsoleCommand::Confirm),
        "cancel" | "close" => Ok(ConsoleCommand::Cancel),
        "logout" => Ok(ConsoleCommand::Logout),
        "help" | "?" => Ok(ConsoleCommand::Help),
        "quit" | "exit" => Ok(ConsoleCommand::Quit),
        other => Err(CommandError::Unknown(other.to_string())),
    }
}

fn parse_image(rest: &str) -> Result<ConsoleCommand, CommandError> {
    const USAGE: &str = "image add | image remove <i> | image set <i> <url>";
    let (action, rest) = split_word(rest);
    match action {
        "add" => Ok(ConsoleCommand::ImageAdd),
        "remove" => Ok(ConsoleCommand::ImageRemove(parse_index(split_word(rest).0, USAGE)?)),
        "set" => {
            let (index, url) = split_word(rest);
            Ok(ConsoleCommand::ImageSet(
                parse_index(index, USAGE)?,
                url.to_string(),
            ))
        }
        _ => Err(CommandError::Usage(USAGE)),
    }
}

/// Table rows are shown 1-based.
fn parse_row(raw: &str, usage: &'static str) -> Result<usize, CommandError> {
    match parse_index(split_word(raw).0, usage)? {
        0 => Err(CommandError::BadIndex("0".into())),
        row => Ok(row - 1),
    }
}

fn parse_index(raw: &str, usage: &'static str) -> Result<usize, CommandError> {
    if raw.is_empty() {
        return Err(CommandError::Usage(usage));
    }
    raw.parse()
        .map_err(|_| CommandError::BadIndex(raw.to_string()))
}

fn split_word(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.find(char::is_whitespace) {
        Some(at) => (&s[..at], s[at..].trim()),
        None => (s, ""),
    }
}

#[cfg(test)]
#[path = "tests/commands_tests.rs"]
mod tests;
