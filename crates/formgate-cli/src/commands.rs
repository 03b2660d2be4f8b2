//! Command parsing for the terminal front-end.
//!
//! This module parses command strings into structured [`Command`] values.

use formgate_app::{AppEvent, FieldKey, Screen};

/// Parsed command from user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Switch to the sign-up screen.
    SignUp,

    /// Switch to the login screen.
    Login,

    /// Replace a field's text on the active screen.
    Set {
        /// Field to edit.
        field: FieldKey,
        /// New text; may be empty.
        value: String,
    },

    /// Submit the active screen.
    Submit,

    /// Quit the application.
    Quit,

    /// Blank line.
    Empty,

    /// Unknown or invalid command.
    Unknown {
        /// The original input.
        input: String,
    },

    /// Command with missing or invalid arguments.
    InvalidArgs {
        /// Command name.
        command: String,
        /// Error message.
        error: String,
    },
}

impl Command {
    /// Event this command feeds into the app, if any.
    pub fn to_event(&self) -> Option<AppEvent> {
        match self {
            Self::SignUp => Some(AppEvent::Navigate(Screen::SignUp)),
            Self::Login => Some(AppEvent::Navigate(Screen::Login)),
            Self::Set { field, value } => {
                Some(AppEvent::Input { field: *field, value: value.clone() })
            },
            Self::Submit => Some(AppEvent::Submit),
            Self::Quit => Some(AppEvent::Quit),
            Self::Empty | Self::Unknown { .. } | Self::InvalidArgs { .. } => None,
        }
    }
}

/// Parse a user input string into a command.
///
/// Commands start with `/`. The field name of `/set` ends at the first run of
/// whitespace; everything after that run is the value, kept verbatim so
/// passwords may contain inner or trailing spaces.
pub fn parse(input: &str) -> Command {
    let input = input.trim_start();

    if input.trim_end().is_empty() {
        return Command::Empty;
    }

    let Some(cmd_str) = input.strip_prefix('/') else {
        return Command::Unknown { input: input.trim_end().to_string() };
    };

    let (command, args) = split_word(cmd_str);

    match command {
        "signup" => Command::SignUp,

        "login" => Command::Login,

        "set" => match split_word(args) {
            ("", _) => Command::InvalidArgs {
                command: "set".into(),
                error: "Usage: /set <field> <value>".into(),
            },
            (name, value) => match name.parse::<FieldKey>() {
                Ok(field) => Command::Set { field, value: value.to_string() },
                Err(error) => Command::InvalidArgs { command: "set".into(), error },
            },
        },

        "submit" => Command::Submit,

        "quit" | "q" => Command::Quit,

        _ => Command::Unknown { input: input.trim_end().to_string() },
    }
}

/// Split off the first word. The remainder starts after the whitespace run
/// that ends the word.
fn split_word(text: &str) -> (&str, &str) {
    let text = text.trim_start();
    match text.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim_start()),
        None => (text, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_set() {
        assert_eq!(
            parse("/set username alice"),
            Command::Set { field: FieldKey::Username, value: "alice".into() }
        );
    }

    #[test]
    fn parse_set_keeps_inner_spaces() {
        assert_eq!(
            parse("/set name Alice  Liddell"),
            Command::Set { field: FieldKey::Name, value: "Alice  Liddell".into() }
        );
    }

    #[test]
    fn parse_set_keeps_trailing_spaces() {
        assert_eq!(
            parse("/set password Secret1  "),
            Command::Set { field: FieldKey::Password, value: "Secret1  ".into() }
        );
    }

    #[test]
    fn parse_set_tolerates_extra_separators() {
        assert_eq!(
            parse("/set password  x"),
            Command::Set { field: FieldKey::Password, value: "x".into() }
        );
        assert_eq!(
            parse("/set  username\talice"),
            Command::Set { field: FieldKey::Username, value: "alice".into() }
        );
    }

    #[test]
    fn parse_set_without_value_clears() {
        assert_eq!(
            parse("/set confirm"),
            Command::Set { field: FieldKey::ConfirmPassword, value: String::new() }
        );
    }

    #[test]
    fn parse_set_missing_field() {
        assert!(matches!(parse("/set"), Command::InvalidArgs { command, .. } if command == "set"));
    }

    #[test]
    fn parse_set_unknown_field() {
        assert_eq!(
            parse("/set email a@b.c"),
            Command::InvalidArgs { command: "set".into(), error: "unknown field 'email'".into() }
        );
    }

    #[test]
    fn parse_navigation() {
        assert_eq!(parse("/signup"), Command::SignUp);
        assert_eq!(parse("/login"), Command::Login);
        assert_eq!(parse("/login").to_event(), Some(AppEvent::Navigate(Screen::Login)));
    }

    #[test]
    fn parse_submit() {
        assert_eq!(parse("/submit").to_event(), Some(AppEvent::Submit));
    }

    #[test]
    fn parse_quit() {
        assert_eq!(parse("/quit"), Command::Quit);
        assert_eq!(parse("/q"), Command::Quit);
    }

    #[test]
    fn parse_unknown_command() {
        assert!(matches!(parse("/unknown"), Command::Unknown { .. }));
        assert!(matches!(parse("hello"), Command::Unknown { .. }));
        assert_eq!(parse("hello").to_event(), None);
    }

    #[test]
    fn parse_empty() {
        assert_eq!(parse("   "), Command::Empty);
    }
}
