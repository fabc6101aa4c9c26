//! Rendering generated passwords for the user.

use std::borrow::Cow;
use std::io::Write;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::strength::{self, Strength};
use crate::table::{self, TableDisplay};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub(crate) enum OutputFormat {
    /// One password per line.
    #[default]
    Plain,
    /// A table with an entropy estimate for each password.
    Table,
    /// A JSON array with an entropy estimate for each password.
    Json,
}

#[derive(Serialize)]
struct AnnotatedPassword<'a> {
    password: &'a pwgen::Secret,
    entropy_bits: f64,
    strength: Strength,
}

pub(crate) fn write_passwords(
    passwords: &[pwgen::Secret],
    alphabet_len: usize,
    deterministic: bool,
    format: OutputFormat,
    mut output: impl Write,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Plain => {
            for password in passwords {
                writeln!(output, "{}", password.as_str()).context("failed to write password")?;
            }
        }
        OutputFormat::Table => {
            let annotated = annotate(passwords, alphabet_len, deterministic);
            let rows = annotated
                .iter()
                .enumerate()
                .map(|(index, item)| PasswordRow(index + 1, item))
                .collect::<Vec<_>>();
            table::display_table(&rows, output).context("failed to output table")?;
        }
        OutputFormat::Json => {
            let annotated = annotate(passwords, alphabet_len, deterministic);
            serde_json::to_writer_pretty(&mut output, &annotated)
                .context("failed to output JSON")?;
            writeln!(output).context("failed to output JSON")?;
        }
    }
    Ok(())
}

fn annotate(
    passwords: &[pwgen::Secret],
    alphabet_len: usize,
    deterministic: bool,
) -> Vec<AnnotatedPassword<'_>> {
    passwords
        .iter()
        .map(|password| {
            let bits = strength::entropy_bits(password.len(), alphabet_len, deterministic);
            AnnotatedPassword {
                password,
                entropy_bits: (bits * 100.0).round() / 100.0,
                strength: Strength::from_entropy_bits(bits),
            }
        })
        .collect()
}

struct PasswordRow<'a>(usize, &'a AnnotatedPassword<'a>);

impl TableDisplay for PasswordRow<'_> {
    fn columns() -> usize {
        4
    }

    fn column_name(column_index: usize) -> &'static str {
        match column_index {
            0 => "#",
            1 => "Password",
            2 => "Entropy (bits)",
            3 => "Strength",
            _ => panic!(),
        }
    }

    fn item(&self, column_index: usize) -> Cow<'_, str> {
        match column_index {
            0 => Cow::from(self.0.to_string()),
            1 => Cow::from(self.1.password.as_str()),
            2 => Cow::from(format!("{:.1}", self.1.entropy_bits)),
            3 => Cow::from(self.1.strength.label()),
            _ => panic!(),
        }
    }
}
