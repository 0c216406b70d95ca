mod intent;
mod render;

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use quiz_core::model::QuestionBank;
use services::{QuizConfig, QuizRunner, builtin_bank, load_bank_from_path};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use intent::{Intent, parse_intent};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidSeed { raw: String },
    InvalidDelay { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidSeed { raw } => write!(f, "invalid --seed value: {raw}"),
            ArgsError::InvalidDelay { raw } => write!(f, "invalid --delay-ms value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--bank <path.json>] [--seed <u64>] [--delay-ms <ms>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  bundled question bank, random seed, 1500 ms reveal delay");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_BANK, QUIZ_SEED, QUIZ_REVEAL_DELAY_MS, RUST_LOG");
}

#[derive(Debug)]
struct Args {
    bank: Option<PathBuf>,
    config: QuizConfig,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        Self::parse_with_env(args, |key| std::env::var(key).ok())
    }

    /// Flags win over environment variables, which win over defaults.
    fn parse_with_env(
        args: &mut impl Iterator<Item = String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ArgsError> {
        let mut parsed = Self {
            bank: env("QUIZ_BANK").map(PathBuf::from),
            config: QuizConfig::default(),
        };
        if let Some(raw) = env("QUIZ_SEED") {
            parsed.config.seed = Some(parse_seed(raw)?);
        }
        if let Some(raw) = env("QUIZ_REVEAL_DELAY_MS") {
            parsed.config.reveal_delay = parse_delay(raw)?;
        }

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--bank" => {
                    parsed.bank = Some(PathBuf::from(require_value(args, "--bank")?));
                }
                "--seed" => {
                    parsed.config.seed = Some(parse_seed(require_value(args, "--seed")?)?);
                }
                "--delay-ms" => {
                    parsed.config.reveal_delay = parse_delay(require_value(args, "--delay-ms")?)?;
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(parsed)
    }
}

fn parse_seed(raw: String) -> Result<u64, ArgsError> {
    raw.trim().parse().map_err(|_| ArgsError::InvalidSeed { raw })
}

fn parse_delay(raw: String) -> Result<Duration, ArgsError> {
    raw.trim()
        .parse()
        .map(Duration::from_millis)
        .map_err(|_| ArgsError::InvalidDelay { raw })
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_bank(path: Option<&PathBuf>) -> Result<QuestionBank, services::BankLoadError> {
    match path {
        Some(path) => {
            info!(path = %path.display(), "loading question bank");
            load_bank_from_path(path)
        }
        None => builtin_bank(),
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let args = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    // An empty or malformed bank stops here, before any session exists.
    let bank = Arc::new(load_bank(args.bank.as_ref())?);
    let runner = QuizRunner::start(bank, &args.config);

    let mut updates = runner.subscribe();
    let renderer = tokio::spawn(async move {
        println!("{}", render::render(&updates.borrow_and_update()));
        while updates.changed().await.is_ok() {
            let frame = render::render(&updates.borrow_and_update());
            println!("{frame}");
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_intent(&line) {
            Some(Intent::Answer(index)) => {
                if !runner.answer(index) {
                    info!(index, "answer not accepted");
                }
            }
            Some(Intent::Restart) => runner.restart(),
            Some(Intent::Quit) => break,
            None => warn!(input = %line.trim(), "unrecognized input"),
        }
    }

    drop(runner);
    renderer.await?;
    Ok(())
}

#[tokio::main]
async fn main() {
    init_logging();
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
