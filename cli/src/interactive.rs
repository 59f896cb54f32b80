use dialoguer::{theme::ColorfulTheme, Confirm, Input};
use std::io;

fn theme() -> ColorfulTheme {
    ColorfulTheme::default()
}

pub fn ask_text(prompt: &str) -> io::Result<String> {
    Input::with_theme(&theme())
        .with_prompt(prompt)
        .interact_text()
}

/// Like [`ask_text`], but hitting enter alone is accepted and yields `None`.
pub fn ask_optional_text(prompt: &str) -> io::Result<Option<String>> {
    let s: String = Input::with_theme(&theme())
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?;
    let s = s.trim();
    Ok((!s.is_empty()).then(|| s.to_owned()))
}

pub fn confirm(prompt: &str) -> io::Result<bool> {
    Confirm::with_theme(&theme())
        .with_prompt(prompt)
        .interact()
}
