//! Interactive confirmation gate
//!
//! The one suspension point in the whole program. Injected into the claim
//! pipeline as a capability so tests can script answers without a terminal.

use anyhow::Result;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Input;

/// Only "y" and "yes" (case-insensitive) count as affirmative.
/// Everything else, including empty input, declines.
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

pub trait ConfirmPrompt {
    fn confirm(&mut self, message: &str) -> Result<bool>;
}

/// Terminal-backed prompt
pub struct TermPrompt;

impl ConfirmPrompt for TermPrompt {
    fn confirm(&mut self, message: &str) -> Result<bool> {
        let answer: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(format!("{} [y/N]", message))
            .allow_empty(true)
            .interact_text()?;

        Ok(is_affirmative(&answer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_affirmative_answers() {
        assert!(is_affirmative("y"));
        assert!(is_affirmative("Y"));
        assert!(is_affirmative("yes"));
        assert!(is_affirmative("YES"));
        assert!(is_affirmative(" yes "));
    }

    #[test]
    fn test_negative_answers() {
        assert!(!is_affirmative(""));
        assert!(!is_affirmative("n"));
        assert!(!is_affirmative("no"));
        assert!(!is_affirmative("yep"));
        assert!(!is_affirmative("ye"));
    }
}
