use crate::types::Result;
use dialoguer::{theme::ColorfulTheme, Confirm};

/// Yes/no prompt for destructive actions such as discarding the conversation.
/// Escape counts as "no".
pub fn ask_confirmation(prompt: &str, default_yes: bool) -> Result<bool> {
    let choice = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(default_yes)
        .show_default(true)
        .wait_for_newline(true)
        .interact_opt()?;
    Ok(choice.unwrap_or(false))
}
