// ============================================
// src/main.rs (メインファイル)
// ============================================

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

// ターミナル UI
mod tui;

use kornum::config::Config;
use kornum::numerals::{self, NumberSystem};
use kornum::quiz::Direction;
use kornum::{AppError, QuestionGenerator, Session};

#[derive(Parser)]
#[command(name = "kornum", version, about = "Korean numbers practice")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    quiz: QuizArgs,
}

/// 出題設定（指定がなければ設定ファイル、それもなければ既定値）
#[derive(Args)]
struct QuizArgs {
    /// Number system: native (0-99) or sino (0-9999)
    #[arg(long)]
    system: Option<NumberSystem>,

    /// Quiz direction: k2e (Korean -> number) or e2k (number -> Korean)
    #[arg(long)]
    direction: Option<Direction>,

    /// Smallest number to ask
    #[arg(long, allow_negative_numbers = true)]
    min: Option<i64>,

    /// Largest number to ask
    #[arg(long, allow_negative_numbers = true)]
    max: Option<i64>,

    /// Seed for the question generator
    #[arg(long)]
    seed: Option<u64>,

    /// Delay before moving on after a correct answer (ms)
    #[arg(long)]
    auto_advance_ms: Option<u64>,

    /// Line-based quiz on stdin/stdout instead of the full-screen UI
    #[arg(long)]
    plain: bool,

    /// Settings file (defaults to settings.json in the config directory)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Print the Korean text for a number
    Convert {
        /// Number to convert
        #[arg(allow_negative_numbers = true)]
        number: i64,

        /// Number system: native or sino
        #[arg(long, default_value = "sino")]
        system: NumberSystem,
    },

    /// Print every number of a system with its Korean text
    Table {
        /// Number system: native or sino
        #[arg(long, default_value = "native")]
        system: NumberSystem,
    },
}

fn main() -> ExitCode {
    // ログは stderr へ (RUST_LOG で変更可)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("kornum=warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err}", style("error:").red().bold());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    match cli.command {
        Some(Command::Convert { number, system }) => {
            let text = numerals::try_to_korean_text(number, system)?;
            println!("{text}");
            Ok(())
        }
        Some(Command::Table { system }) => print_table(system),
        None => run_quiz(cli.quiz),
    }
}

fn print_table(system: NumberSystem) -> Result<(), AppError> {
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for n in 0..=system.max() {
        writeln!(out, "{n}\t{}", numerals::to_korean_text(n, system))?;
    }
    out.flush()?;
    Ok(())
}

fn run_quiz(args: QuizArgs) -> Result<(), AppError> {
    let config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load(),
    };

    // コマンドラインの指定で上書き
    let mut settings = config.settings();
    if let Some(system) = args.system {
        settings.system = system;
    }
    if let Some(direction) = args.direction {
        settings.direction = direction;
    }
    if let Some(min) = args.min {
        settings.range.min = min;
    }
    if let Some(max) = args.max {
        settings.range.max = max;
    }
    let delay = args
        .auto_advance_ms
        .map(Duration::from_millis)
        .unwrap_or_else(|| config.auto_advance());

    let generator = match args.seed {
        Some(seed) => QuestionGenerator::seeded(seed),
        None => QuestionGenerator::from_os_rng(),
    };
    tracing::info!(
        system = %settings.system,
        direction = %settings.direction,
        min = settings.range.min,
        max = settings.range.max,
        "starting quiz"
    );
    let mut session = Session::new(settings, generator).with_advance_delay(delay);

    let score = if args.plain {
        let stdin = io::stdin();
        let stdout = io::stdout();
        kornum::plain::run(&mut session, stdin.lock(), &mut stdout.lock())?
    } else {
        tui::run(session)?
    };
    tracing::info!(correct = score.correct, total = score.total, "quiz finished");
    Ok(())
}
