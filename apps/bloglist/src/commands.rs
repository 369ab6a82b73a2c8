//! Commands typed at the prompt.

use shared::domain::BlogId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// 1-based position in the displayed list.
    Position(usize),
    Id(BlogId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Login {
        username: String,
        password: Option<String>,
    },
    Logout,
    List,
    ToggleForm,
    CancelForm,
    Create,
    Like(Target),
    Delete(Target),
    Help,
    Quit,
}

impl Command {
    pub fn requires_login(&self) -> bool {
        !matches!(
            self,
            Command::Login { .. } | Command::Help | Command::Quit
        )
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command '{0}', try 'help'")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
}

pub const HELP: &str = "\
commands:
  login <username> [password]   log in; the password is echoed, also when prompted
  logout                        log out and forget the saved session
  list                          show the blogs
  new                           show/hide the create blog form
  create                        fill in and submit the create blog form
  cancel                        hide the create blog form
  like <#n|id>                  like a blog by list position (#2) or id
  delete <#n|id>                remove one of your blogs
  help                          show this text
  quit                          exit";

/// `#n` is a list position; anything else is a blog id, digits included.
fn target(arg: Option<&str>, usage: &'static str) -> Result<Target, CommandError> {
    let arg = arg.ok_or(CommandError::Usage(usage))?;
    let Some(position) = arg.strip_prefix('#') else {
        return Ok(Target::Id(BlogId::from(arg)));
    };
    match position.parse::<usize>() {
        Ok(position) if position > 0 => Ok(Target::Position(position)),
        _ => Err(CommandError::Usage(usage)),
    }
}

/// `Ok(None)` for a blank line.
pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
    let mut words = line.split_whitespace();
    let Some(name) = words.next() else {
        return Ok(None);
    };
    let first = words.next();
    let second = words.next();
    if words.next().is_some() {
        return Err(CommandError::Usage(usage_for(name)));
    }

    let command = match (name.to_ascii_lowercase().as_str(), first, second) {
        ("login", Some(username), password) => Command::Login {
            username: username.to_string(),
            password: password.map(str::to_string),
        },
        ("login", None, _) => return Err(CommandError::Usage(usage_for("login"))),
        ("logout", None, None) => Command::Logout,
        ("list" | "ls", None, None) => Command::List,
        ("new", None, None) => Command::ToggleForm,
        ("cancel", None, None) => Command::CancelForm,
        ("create", None, None) => Command::Create,
        ("like", arg, None) => Command::Like(target(arg, usage_for("like"))?),
        ("delete" | "rm", arg, None) => Command::Delete(target(arg, usage_for("delete"))?),
        ("help" | "?", None, None) => Command::Help,
        ("quit" | "exit", None, None) => Command::Quit,
        (
            "logout" | "list" | "ls" | "new" | "cancel" | "create" | "like" | "delete" | "rm"
            | "help" | "?" | "quit" | "exit",
            _,
            _,
        ) => return Err(CommandError::Usage(usage_for(name))),
        _ => return Err(CommandError::Unknown(name.to_string())),
    };
    Ok(Some(command))
}

fn usage_for(name: &str) -> &'static str {
    match name.to_ascii_lowercase().as_str() {
        "login" => "login <username> [password]",
        "like" => "like <#n|id>",
        "delete" | "rm" => "delete <#n|id>",
        "logout" => "logout",
        "list" | "ls" => "list",
        "new" => "new",
        "cancel" => "cancel",
        "create" => "create",
        "quit" | "exit" => "quit",
        _ => "help",
    }
}

#[cfg(test)]
#[path = "tests/commands_tests.rs"]
mod tests;
