//! Asking the user for generation options, rather than taking them from the command line.

use anyhow::Context;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input};

use crate::{ProgError, Request};

/// Prompt for each option of `request`, offering its current value as the default.
pub(crate) fn prompt_request(request: Request) -> Result<Request, ProgError> {
    let theme = ColorfulTheme::default();

    let mut length_input = Input::<i64>::with_theme(&theme);
    length_input
        .with_prompt("Password length")
        .validate_with(|len: &i64| -> Result<(), &'static str> {
            if *len > 0 {
                Ok(())
            } else {
                Err("the length must be a positive integer")
            }
        });
    if let Some(length) = request.length.filter(|len| *len > 0) {
        length_input.default(length);
    }
    let length = length_input
        .interact_text()
        .context("failed to get your answer to a prompt")?;

    let symbols = Confirm::with_theme(&theme)
        .with_prompt("Include symbols?")
        .default(request.symbols)
        .interact()
        .context("failed to get your answer to a prompt")?;
    let exclude_ambiguous = Confirm::with_theme(&theme)
        .with_prompt("Exclude ambiguous characters (O, 0, I, l, 1)?")
        .default(request.exclude_ambiguous)
        .interact()
        .context("failed to get your answer to a prompt")?;

    let count = Input::<usize>::with_theme(&theme)
        .with_prompt("How many passwords?")
        .default(request.count)
        .validate_with(|count: &usize| -> Result<(), &'static str> {
            if *count > 0 {
                Ok(())
            } else {
                Err("generate at least one password")
            }
        })
        .interact_text()
        .context("failed to get your answer to a prompt")?;

    Ok(Request {
        length: Some(length),
        count,
        symbols,
        exclude_ambiguous,
    })
}
