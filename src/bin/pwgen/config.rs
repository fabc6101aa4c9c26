//! Defaults read from the user's configuration file.

use std::env;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

use crate::output::OutputFormat;

#[derive(Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub(crate) struct Config {
    pub(crate) length: Option<i64>,
    pub(crate) count: Option<usize>,
    pub(crate) symbols: bool,
    pub(crate) exclude_ambiguous: bool,
    pub(crate) format: Option<OutputFormat>,
}

/// Load the configuration at `path` if one was given, otherwise the default configuration file.
///
/// An explicitly named file has to exist; a missing default file just means no configuration.
pub(crate) fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open config file {}", path.display()))?;
            parse_config(file, path)
        }
        None => {
            let path = match default_config_path() {
                Some(p) => p,
                None => return Ok(Config::default()),
            };
            match File::open(&path) {
                Ok(file) => parse_config(file, &path),
                Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Config::default()),
                Err(err) => Err(err)
                    .with_context(|| format!("failed to open config file {}", path.display())),
            }
        }
    }
}

fn parse_config(mut rdr: impl Read, path: &Path) -> anyhow::Result<Config> {
    let mut contents = String::new();
    rdr.read_to_string(&mut contents)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    // An empty YAML document isn't a mapping, but an empty file should mean "no settings".
    if contents.trim().is_empty() {
        return Ok(Config::default());
    }
    let config: Config = serde_yaml::from_str(&contents)
        .with_context(|| format!("failed to parse config file {}", path.display()))?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}

fn default_config_path() -> Option<PathBuf> {
    let home = env::var_os("HOME")?;
    let mut p = PathBuf::from(home);
    p.push(".config");
    p.push("pwgen");
    p.push("config.yaml");
    Some(p)
}
