use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use carom::app::{App, Event, Outcome};
use carom::config::Config;
use carom::db::{Database, KeyValueStore};
use carom::models::ReasonChoice;
use carom::render;

#[derive(Parser)]
#[command(name = "carom")]
#[command(about = "Turn-by-turn score tracking for carom practice")]
struct Cli {
    /// Database file (overrides the configured location)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Log engine activity to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a session interactively (default)
    Play,
    /// List archived session moyennes with overall statistics
    History,
    /// Show the turn table of an archived session
    Show {
        /// Session number as listed by `history` (starting at 1)
        number: usize,
    },
    /// Manage failure reasons
    Reasons {
        #[command(subcommand)]
        action: Option<ReasonsCommand>,
    },
    /// Print the archive as JSON
    Export,
    /// Show the active configuration
    Config {
        /// Write it to the config file
        #[arg(long)]
        init: bool,
    },
}

#[derive(Subcommand)]
enum ReasonsCommand {
    /// List reasons
    List,
    /// Append a reason
    Add { label: String },
    /// Delete a reason by its listed number (starting at 1)
    Delete { number: usize },
}

/// Initialize tracing on stderr so stdout stays clean for the UI and export.
fn init_tracing(verbose: bool) {
    let default = if verbose { "carom=debug" } else { "carom=warn" };
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| default.into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn open_database(cli_path: Option<PathBuf>, config: &Config) -> anyhow::Result<Database> {
    let path = match cli_path.or_else(|| config.database_path.clone()) {
        Some(path) => path,
        None => Database::default_path()?,
    };
    let db = Database::open(path)?;
    db.migrate()?;
    Ok(db)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load();
    let db = open_database(cli.db, &config)?;
    let mut app = App::open(db, config)?;
    let mut out = io::stdout().lock();

    match cli.command.unwrap_or(Commands::Play) {
        Commands::Play => {
            let stdin = io::stdin();
            play(&mut app, stdin.lock(), &mut out)?;
        }
        Commands::History => {
            let history = app.history();
            if history.is_empty() {
                writeln!(out, "No archived sessions")?;
            } else {
                write!(out, "{}", render::render_history(history.summaries()))?;
            }
            write!(out, "{}", render::render_overall(&app.overall()))?;
        }
        Commands::Show { number } => {
            let Some(index) = number.checked_sub(1) else {
                anyhow::bail!("Session numbers start at 1");
            };
            if let Outcome::Detail(projection) = app.dispatch(Event::RequestDetail(index))? {
                write!(out, "{}", render::render_detail(&projection))?;
                writeln!(out, "{}", render::render_sparkline(&projection.series))?;
            }
        }
        Commands::Reasons { action } => {
            match action.unwrap_or(ReasonsCommand::List) {
                ReasonsCommand::List => {}
                ReasonsCommand::Add { label } => {
                    if app.dispatch(Event::AddReason(label))? == Outcome::Ignored {
                        anyhow::bail!("Reason label must not be empty");
                    }
                }
                ReasonsCommand::Delete { number } => {
                    let outcome = match number.checked_sub(1) {
                        Some(position) => app.dispatch(Event::DeleteReason(position))?,
                        None => Outcome::Ignored,
                    };
                    if outcome == Outcome::Ignored {
                        anyhow::bail!("No reason numbered {}", number);
                    }
                }
            }
            for (i, label) in app.reasons().iter().enumerate() {
                writeln!(out, "{:>3}) {}", i + 1, label)?;
            }
        }
        Commands::Export => {
            let history = app.history();
            let export = serde_json::json!({
                "summaries": history.summaries(),
                "detail": history.details(),
            });
            writeln!(out, "{}", serde_json::to_string_pretty(&export)?)?;
        }
        Commands::Config { init } => {
            if init {
                let path = app.config().save()?;
                writeln!(out, "Wrote {}", path.display())?;
            }
            writeln!(out, "{}", serde_json::to_string_pretty(app.config())?)?;
        }
    }

    Ok(())
}

/// Answer to the reason picker: a listed number (from 1), or `0`/empty to
/// skip. `None` when the line names no choice.
fn parse_reason_choice(line: &str, catalog_len: usize) -> Option<ReasonChoice> {
    match line {
        "" | "s" | "skip" => Some(ReasonChoice::Skip),
        n => match n.parse::<usize>().ok()? {
            0 => Some(ReasonChoice::Skip),
            n if n <= catalog_len => Some(ReasonChoice::Catalog(n - 1)),
            _ => None,
        },
    }
}

/// Line-driven session loop.
///
/// Input lines: digits stage a score, `+` commits it, `<` deletes a digit,
/// `x` clears. Words: `end`, `reset`, `stats`, `quit`. After each commit the
/// next line answers the reason picker: a listed number, or `0`/empty to skip.
fn play<S, R, W>(app: &mut App<S>, input: R, out: &mut W) -> anyhow::Result<()>
where
    S: KeyValueStore,
    R: BufRead,
    W: Write,
{
    writeln!(out, "{}", render::render_stats(&app.stats(), app.staged()))?;

    for line in input.lines() {
        let line = line?;
        let line = line.trim();

        if app.reason_pending() {
            let Some(choice) = parse_reason_choice(line, app.reasons().len()) else {
                write!(out, "{}", render::render_reason_picker(app.reasons()))?;
                continue;
            };
            app.dispatch(Event::SelectReason(choice))?;
            writeln!(out, "{}", render::render_stats(&app.stats(), app.staged()))?;
            continue;
        }

        match line {
            "quit" | "q" => break,
            "stats" => {
                write!(out, "{}", render::render_projections(&app.projections()))?;
            }
            "end" => match app.dispatch(Event::EndSession)? {
                Outcome::Archived(archived) => {
                    writeln!(
                        out,
                        "Session {} archived: moyenne {}",
                        archived.index + 1,
                        archived.detail.moyenne()
                    )?;
                }
                _ => continue,
            },
            "reset" => {
                app.dispatch(Event::Reset)?;
            }
            keys => {
                for key in keys.chars() {
                    let event = match key {
                        '+' => Event::Commit,
                        '<' => Event::Backspace,
                        'x' => Event::Clear,
                        d => Event::Digit(d),
                    };
                    if let Outcome::ChooseReason { turn, choices } = app.dispatch(event)? {
                        writeln!(out, "Turn {}: {}", turn.index, turn.score)?;
                        write!(out, "{}", render::render_reason_picker(&choices))?;
                        break;
                    }
                }
                if app.reason_pending() {
                    continue;
                }
            }
        }

        writeln!(out, "{}", render::render_stats(&app.stats(), app.staged()))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App<Database> {
        let db = Database::open_memory().unwrap();
        db.migrate().unwrap();
        App::open(db, Config::default()).unwrap()
    }

    fn run(app: &mut App<Database>, input: &str) -> String {
        let mut out = Vec::new();
        play(app, input.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_parse_reason_choice() {
        assert_eq!(parse_reason_choice("", 5), Some(ReasonChoice::Skip));
        assert_eq!(parse_reason_choice("0", 5), Some(ReasonChoice::Skip));
        assert_eq!(parse_reason_choice("00", 5), Some(ReasonChoice::Skip));
        assert_eq!(parse_reason_choice("1", 5), Some(ReasonChoice::Catalog(0)));
        assert_eq!(parse_reason_choice("5", 5), Some(ReasonChoice::Catalog(4)));
        assert_eq!(parse_reason_choice("6", 5), None);
        assert_eq!(parse_reason_choice("kiss", 5), None);
    }

    #[test]
    fn test_zero_padded_answer_skips_the_reason() {
        let mut app = app();
        run(&mut app, "3+\n00\nquit\n");

        assert!(!app.reason_pending());
        assert_eq!(app.turns(), &[carom::models::Turn::new(1, 3, None)]);
    }

    #[test]
    fn test_numbered_answer_tags_the_turn() {
        let mut app = app();
        run(&mut app, "0+\n5\nquit\n");

        assert_eq!(app.turns()[0].reason.as_deref(), Some("Kiss"));
    }

    #[test]
    fn test_unknown_answer_shows_the_picker_again() {
        let mut app = app();
        let output = run(&mut app, "2+\n9\n");

        assert!(app.reason_pending());
        assert_eq!(output.matches("  0) skip").count(), 2);
    }

    #[test]
    fn test_end_archives_the_session() {
        let mut app = app();
        let output = run(&mut app, "2+\n\n4+\n\nend\n");

        assert!(output.contains("Session 1 archived: moyenne 3.00"));
        assert_eq!(app.history().summaries(), &[3.0]);
        assert!(app.turns().is_empty());
    }
}
