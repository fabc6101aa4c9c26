use std::io;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use pwgen::{ByteSource, DeterministicByteSource, GenerationError, SecureByteSource};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;
mod interactive;
mod output;
mod seed;
mod strength;
mod table;

use output::OutputFormat;
use seed::SeedInput;

/// Generate a secure random password.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Length of the password (positive integer).
    #[arg(allow_negative_numbers = true)]
    length: Option<i64>,
    /// Include symbols in the password.
    #[arg(long)]
    symbols: bool,
    /// Exclude ambiguous characters (O, 0, I, l, 1).
    #[arg(long, alias = "exclude-ambigous")]
    exclude_ambiguous: bool,
    /// Number of passwords to generate.
    #[arg(long, short = 'n')]
    count: Option<usize>,
    /// Generate reproducibly from this seed (64 hex characters) instead of the OS RNG.
    ///
    /// Only meant for testing and demonstrations.
    #[arg(long, value_name = "HEX", group = "seed_input")]
    seed: Option<String>,
    /// Like --seed, but read the hex seed from a file.
    #[arg(long, value_name = "PATH", group = "seed_input")]
    seed_file: Option<PathBuf>,
    /// Like --seed, but prompt for the hex seed without echoing it.
    #[arg(long, group = "seed_input")]
    seed_prompt: bool,
    /// How to print the passwords.
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,
    /// Prompt for the password options.
    #[arg(long, short = 'i')]
    interactive: bool,
    /// Configuration file to read defaults from (default: ~/.config/pwgen/config.yaml).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Log filter directives, e.g. `debug` or `pwgen=trace`.
    #[arg(long, value_name = "FILTER", default_value = "warn")]
    log_level: String,
}

impl Args {
    fn seed_input(&self) -> Option<SeedInput<'_>> {
        if let Some(hex) = self.seed.as_deref() {
            Some(SeedInput::Hex(hex))
        } else if let Some(path) = self.seed_file.as_deref() {
            Some(SeedInput::File(path))
        } else if self.seed_prompt {
            Some(SeedInput::Prompt)
        } else {
            None
        }
    }
}

/// No single run generates more characters than this, across all of its passwords.
const MAX_TOTAL_CHARS: u128 = 1 << 24;

/// What to generate, once the command line, the config file and any prompts are merged.
#[derive(Debug, PartialEq)]
pub(crate) struct Request {
    pub(crate) length: Option<i64>,
    pub(crate) count: usize,
    pub(crate) symbols: bool,
    pub(crate) exclude_ambiguous: bool,
}

impl Request {
    /// Command line values win over the config file. Flags can only switch a feature on.
    fn merge(args: &Args, config: &config::Config) -> Request {
        Request {
            length: args.length.or(config.length),
            count: args.count.or(config.count).unwrap_or(1),
            symbols: args.symbols || config.symbols,
            exclude_ambiguous: args.exclude_ambiguous || config.exclude_ambiguous,
        }
    }

    /// Check the request can be satisfied, returning the password length.
    fn validate(&self) -> Result<i64, ProgError> {
        let length = self.length.ok_or(ProgError::MissingLength)?;
        if length <= 0 {
            return Err(ProgError::InvalidLength);
        }
        if self.count == 0 {
            return Err(ProgError::ZeroCount);
        }
        if length as u128 * self.count as u128 > MAX_TOTAL_CHARS {
            return Err(ProgError::TooLarge);
        }
        Ok(length)
    }
}

fn run() -> Result<(), ProgError> {
    let args = Args::parse();
    init_logging(&args.log_level)?;
    let config = config::load_config(args.config.as_deref())?;

    let mut request = Request::merge(&args, &config);
    if args.interactive {
        if !console::user_attended_stderr() {
            return Err(ProgError::NotATerminal);
        }
        request = interactive::prompt_request(request)?;
    }
    let length = request.validate()?;
    let format = args.format.or(config.format).unwrap_or_default();

    let alphabet = pwgen::build_alphabet(request.symbols, request.exclude_ambiguous)?;

    // One source for the whole run: with a seed, later passwords continue the stream.
    let seed_input = args.seed_input();
    let deterministic = seed_input.is_some();
    let mut source: Box<dyn ByteSource> = match seed_input {
        Some(input) => {
            let seed = seed::read_seed(input)?;
            eprintln!(
                "{} generating from a seed; anyone holding the seed can reproduce these passwords",
                console::style("warning:").yellow().bold()
            );
            Box::new(DeterministicByteSource::new(seed.as_bytes())?)
        }
        None => Box::new(SecureByteSource::new()),
    };

    let passwords = pwgen::sample_many(request.count, length, &alphabet, source.as_mut())?;
    output::write_passwords(
        &passwords,
        alphabet.len(),
        deterministic,
        format,
        io::stdout().lock(),
    )?;

    Ok(())
}

fn main() {
    match run() {
        Ok(()) => (),
        Err(err) => {
            eprintln!("{} {err:#}", console::style("error:").red().bold());
            process::exit(1);
        }
    }
}

fn init_logging(level: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(level)
        .or_else(|_| EnvFilter::try_new("warn"))
        .map_err(|e| anyhow::anyhow!("invalid log level: {}", e))?;

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr).with_target(true))
        .with(filter)
        .init();

    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum ProgError {
    #[error(
        "No password length given; pass one as an argument, set it in the config file, or use \
         --interactive."
    )]
    MissingLength,
    #[error("Length must be a positive integer.")]
    InvalidLength,
    #[error("The password count must be at least 1.")]
    ZeroCount,
    #[error(
        "That's too much to generate; length times count may be at most {}.",
        MAX_TOTAL_CHARS
    )]
    TooLarge,
    #[error("--interactive needs a terminal to prompt on.")]
    NotATerminal,
    #[error("The seed is not valid hex: {0}")]
    SeedNotHex(#[source] hex::FromHexError),
    #[error(
        "The seed must be 64 hex characters ({} bytes), but it decoded to {0} bytes.",
        pwgen::byte_source::SEED_LEN
    )]
    SeedWrongLength(usize),
    #[error("{0}")]
    Generation(GenerationError),
    #[error(transparent)]
    Other(anyhow::Error),
}

impl From<anyhow::Error> for ProgError {
    fn from(err: anyhow::Error) -> ProgError {
        ProgError::Other(err)
    }
}

impl From<GenerationError> for ProgError {
    fn from(err: GenerationError) -> ProgError {
        ProgError::Generation(err)
    }
}
