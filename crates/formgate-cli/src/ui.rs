//! Text rendering of the application state.

use std::fmt::{self, Write};

use formgate_app::{App, FieldKey, NoticeLevel, Screen};

const HELP: &str = "commands: /set <field> <value>, /submit, /signup, /login, /quit";

/// Render the active screen as plain text, one line per item.
pub fn render(app: &App) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "== {} ==", app.screen())?;

    if app.screen() == Screen::Home {
        let user = app.signed_in().unwrap_or("nobody");
        writeln!(out, "  signed in as {user}")?;
    }

    let errors = app.errors();
    for (key, value) in app.fields() {
        let shown = match (value.is_empty(), key) {
            (true, _) => "<empty>".to_string(),
            (false, FieldKey::Password | FieldKey::ConfirmPassword) => {
                "*".repeat(value.chars().count())
            },
            (false, _) => value.to_string(),
        };
        writeln!(out, "  {:<9} {shown}", key.as_str())?;
        for (_, message) in errors.iter().filter(|(k, _)| *k == key) {
            writeln!(out, "    ! {message}")?;
        }
    }

    if app.is_busy() {
        writeln!(out, "[submitting...]")?;
    }
    if let Some(notice) = app.notice() {
        let tag = match notice.level {
            NoticeLevel::Success => "ok",
            NoticeLevel::Error => "error",
        };
        writeln!(out, "[{tag}] {}", notice.text)?;
    }
    if app.screen() != Screen::Home {
        writeln!(out, "{HELP}")?;
    }
    Ok(out)
}
