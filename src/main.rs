//! Mood Detector CLI
//!
//! Usage:
//!   mood-detector --text "your text here"      # Single evaluation
//!   mood-detector --interactive                # Interactive mode
//!   mood-detector --serve                      # HTTP API server
//!   mood-detector --text "text" --json         # JSON output

use clap::Parser;
use colored::Colorize;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::{fmt, EnvFilter};

use mood_detector::config::Config;
use mood_detector::core::{run_server, HidePolicy, LexiconScorer, MoodPresenter};
use mood_detector::types::{MoodPresentation, PresentationState, SentimentScore};
use mood_detector::{Result, VERSION};

#[derive(Parser, Debug)]
#[command(
    name = "mood-detector",
    version = VERSION,
    about = "Mood Detector - turn a line of text into an emoji, a message and a gradient",
    long_about = "Mood Detector scores the sentiment of free text and shows a matching mood.\n\n\
                  Modes:\n  \
                  --text         Analyze one text and exit\n  \
                  --interactive  Read lines from stdin (default)\n  \
                  --serve        HTTP API server mode\n\n\
                  Moods:\n  \
                  HAPPY    - score > 0.25\n  \
                  SAD      - score < -0.25\n  \
                  NEUTRAL  - -0.25 <= score <= 0.25\n  \
                  UNKNOWN  - text could not be scored"
)]
struct Args {
    /// Text to analyze (single mode)
    #[arg(short, long)]
    text: Option<String>,

    /// Interactive mode - read lines from stdin (also the default without --text/--serve)
    #[arg(short, long)]
    interactive: bool,

    /// Run as HTTP API server
    #[arg(short, long)]
    serve: bool,

    /// Server address (overrides config; default 127.0.0.1:3000)
    #[arg(long)]
    addr: Option<String>,

    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// What a new analysis does with pending flourish hides
    #[arg(long, value_enum)]
    policy: Option<HidePolicy>,

    /// Flourish visibility in milliseconds
    #[arg(long)]
    flourish_ms: Option<u64>,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,

    /// Show score breakdown
    #[arg(long)]
    verbose: bool,

    /// Log verbosity (-v info, -vv debug, -vvv trace); RUST_LOG wins
    #[arg(short = 'v', action = clap::ArgAction::Count)]
    log_level: u8,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.log_level);

    if args.no_color {
        colored::control::set_override(false);
    }

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "mood-detector failed");
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(level: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(match level {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        })
    });
    fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

async fn run(args: Args) -> Result<()> {
    let config = load_config(&args)?;

    if args.serve {
        run_server(config).await
    } else if args.interactive {
        run_interactive(&config, &args)
    } else if let Some(ref text) = args.text {
        run_single(text, &config, &args)
    } else {
        // Default to interactive if no mode specified
        run_interactive(&config, &args)
    }
}

/// Config file (if any) with CLI overrides applied
fn load_config(args: &Args) -> Result<Config> {
    let mut config = match args.config {
        Some(ref path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(ref addr) = args.addr {
        config.server.addr = addr.clone();
    }
    if let Some(policy) = args.policy {
        config.hide_policy = policy;
    }
    if let Some(ms) = args.flourish_ms {
        config.flourish_ms = ms;
    }
    config.validate()?;
    Ok(config)
}

fn build_presenter(config: &Config) -> MoodPresenter<LexiconScorer> {
    MoodPresenter::new(LexiconScorer::with_damping(config.scorer.damping))
        .with_timer(config.flourish_duration(), config.hide_policy)
}

/// Run single text evaluation
fn run_single(text: &str, config: &Config, args: &Args) -> Result<()> {
    let mut presenter = build_presenter(config);
    let (presentation, score) = presenter.analyze_with_score(text);

    if args.json {
        println!("{}", serde_json::to_string_pretty(presenter.state())?);
    } else {
        print_presentation(&presentation, &score, args);
    }
    Ok(())
}

/// Run interactive mode
fn run_interactive(config: &Config, args: &Args) -> Result<()> {
    let mut presenter = build_presenter(config);

    print_header();
    println!("Type how you feel and press Enter. Type 'quit' to exit.");
    println!();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        presenter.poll();
        print!("{}", format_prompt(presenter.state(), args.no_color));
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let line = line.trim();
        if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
            println!("\nSession ended. Analyses: {}", presenter.state().analysis_count);
            break;
        }

        // Empty lines are analyzed too: they take the "couldn't understand" path
        let (presentation, score) = presenter.analyze_with_score(line);

        if args.json {
            println!("{}", serde_json::to_string(presenter.state())?);
        } else {
            print_presentation(&presentation, &score, args);
            if presenter.show_flourish() {
                print_flourish(&presentation);
            }
        }
    }
    Ok(())
}

fn print_presentation(presentation: &MoodPresentation, score: &SentimentScore, args: &Args) {
    if args.no_color {
        println!("{}", presentation.to_parseable_string());
    } else {
        println!("{}", presentation.to_terminal_string());
    }
    if args.verbose {
        print_breakdown(score);
    }
}

/// Score breakdown
fn print_breakdown(score: &SentimentScore) {
    let value = score
        .value
        .map(|v| format!("{:+.3}", v))
        .unwrap_or_else(|| "none".to_string());
    println!("  {} {}", "score:".dimmed(), value);
    println!(
        "  {} positive={:.1} negative={:.1} negated={} intensified={} words={}",
        "signals:".dimmed(),
        score.signals.positive,
        score.signals.negative,
        score.signals.negated,
        score.signals.intensified,
        score.word_count
    );
}

/// Floating emoji cue
fn print_flourish(presentation: &MoodPresentation) {
    println!("{}", format!("        ✨ {} ✨", presentation.emoji).bold());
}

fn print_header() {
    println!("{}", "========================================".bold());
    println!("{}", format!("  🧠 Mood Detector v{}", VERSION).bold());
    println!("{}", "========================================".bold());
    println!();
}

/// Prompt shows the current emoji; a sparkle while the flourish is up
fn format_prompt(state: &PresentationState, no_color: bool) -> String {
    let sparkle = if state.show_flourish { "✨" } else { "" };
    if no_color {
        format!("[{}]{} > ", state.presentation.mood, sparkle)
    } else {
        format!(
            "{} [{}]{} > ",
            state.presentation.emoji,
            state.presentation.mood.to_string().bold(),
            sparkle
        )
    }
}
