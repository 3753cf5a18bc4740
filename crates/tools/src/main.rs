use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use foundation::time::CalendarDate;
use session::{ExplorerSession, Viewport, parse_script};
use timeline::{DateIndex, Direction, Jump};
use tracing::info;
use tracing_subscriber::EnvFilter;
use viewpoint::RecordingViewpoint;

#[derive(Parser, Debug)]
#[command(name = "explorer", about = "Historical event explorer (headless)")]
struct Cli {
    /// Event catalog (JSON array). Defaults to the bundled catalog.
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Session config (JSON). Environment and flags override it.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Initial selected date (YYYY-MM-DD).
    #[arg(long, global = true)]
    initial_date: Option<CalendarDate>,

    /// Log at debug level regardless of RUST_LOG.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List populated dates with their event counts.
    Index,
    /// Show the events recorded on a date.
    Day { date: CalendarDate },
    /// Resolve the previous or next incident relative to a date.
    Navigate {
        date: CalendarDate,
        #[arg(long, value_enum, default_value_t = Step::Next)]
        step: Step,
    },
    /// Report catalog data-quality issues. Exits non-zero if any are found.
    Check,
    /// Run an intent script through a session and print each step.
    Replay {
        script: PathBuf,
        #[arg(long, default_value_t = 1280)]
        width: u32,
        #[arg(long, default_value_t = 720)]
        height: u32,
        /// Print steps as JSON lines.
        #[arg(long)]
        json: bool,
    },
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Step {
    Previous,
    Next,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = real_main(cli) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

fn real_main(cli: Cli) -> Result<(), String> {
    let config = tools::load_config(cli.config.as_deref(), cli.initial_date, |name| {
        std::env::var(name).ok()
    })
    .map_err(|e| e.to_string())?;
    let catalog = tools::load_catalog(cli.catalog.as_deref(), &config.date_bounds)
        .map_err(|e| e.to_string())?;

    match cli.command {
        Command::Index => {
            let index = DateIndex::build(&catalog);
            for date in index.iter() {
                println!("{date} {}", timeline::count_on(&catalog, date));
            }
            Ok(())
        }
        Command::Day { date } => {
            let mut any = false;
            for (id, event) in timeline::events_on(&catalog, date) {
                any = true;
                println!("{}", tools::render_event(id, event, &config.fallback_accent));
            }
            if !any {
                println!("no events on {date}");
            }
            Ok(())
        }
        Command::Navigate { date, step } => {
            let index = DateIndex::build(&catalog);
            let direction = match step {
                Step::Previous => Direction::Previous,
                Step::Next => Direction::Next,
            };
            match timeline::incident(direction, date, &index) {
                Jump::To(target) => println!("{target}"),
                Jump::Stay => println!("stay"),
            }
            Ok(())
        }
        Command::Check => {
            let issues = catalog.validate();
            for issue in &issues {
                println!("{issue}");
            }
            if issues.is_empty() {
                println!("ok: {} events", catalog.len());
                Ok(())
            } else {
                Err(format!("{} issue(s) found", issues.len()))
            }
        }
        Command::Replay {
            script,
            width,
            height,
            json,
        } => {
            let text = std::fs::read_to_string(&script)
                .map_err(|e| format!("read {}: {e}", script.display()))?;
            let intents = parse_script(&text).map_err(|e| e.to_string())?;

            let mut session: ExplorerSession<RecordingViewpoint> =
                ExplorerSession::new(Arc::new(catalog), config).map_err(|e| e.to_string())?;
            let catalog = Arc::clone(session.catalog());
            session.mount(Viewport { width, height }, RecordingViewpoint::new());
            let mount_commands = session
                .viewpoint_mut()
                .controller_mut()
                .map(RecordingViewpoint::drain)
                .unwrap_or_default();
            info!(intents = intents.len(), "replaying script");

            if json {
                for pov in &mount_commands {
                    let line = serde_json::json!({ "mount": pov });
                    println!("{line}");
                }
            } else {
                for pov in &mount_commands {
                    println!("camera {pov:?}");
                }
                println!("{}", tools::render_view(&session.view(), &catalog));
            }

            for step in tools::replay(&mut session, &intents) {
                if json {
                    let line = serde_json::to_string(&step).map_err(|e| format!("json: {e}"))?;
                    println!("{line}");
                    continue;
                }
                println!(
                    "-- {} {} ({:?})",
                    step.entry.seq,
                    step.entry.intent.kind(),
                    step.entry.outcome
                );
                for pov in &step.camera {
                    println!("camera {pov:?}");
                }
                println!("{}", tools::render_view(&step.view, &catalog));
            }
            Ok(())
        }
    }
}
