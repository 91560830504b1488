use std::fs::File;
use std::io::stdout;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chessboard_view::{DirectorySource, ViewConfig};
use clap::Parser;
use ratatui::{
    crossterm::{
        event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
        ExecutableCommand,
    },
    prelude::*,
};
use tracing::{info, warn};
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod app;
mod position;
mod screen;
mod ui;

use app::App;

#[derive(Parser)]
struct Args {
    /// Directory containing the piece icons and tiles
    #[arg(short, long, default_value = "assets")]
    assets: PathBuf,

    /// Path to a view config JSON file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Path to a JSON file with the starting pieces, instead of the standard setup
    #[arg(short, long)]
    position: Option<PathBuf>,

    /// Show each cell's coordinates
    #[arg(short, long, default_value_t = false)]
    mark_positions: bool,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "warn")]
    log_level: LevelFilter,

    /// Write the log to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    initialize_logging(args.log_level, args.log_file.as_deref())?;

    let config = match &args.config {
        Some(path) => ViewConfig::load(path)?,
        None => ViewConfig::default(),
    };
    let position = match &args.position {
        Some(path) => position::load(path)?,
        None => position::standard(config.dimension),
    };
    info!(assets = %args.assets.display(), "Starting");

    // Everything that can fail on bad input happens before the terminal is touched.
    let mut app = App::new(&config, &DirectorySource::new(&args.assets), position)?;
    if args.mark_positions {
        app.view.mark_position();
    }

    let _terminal = TerminalGuard::enter()?;
    run(&mut app)
}

/// Raw mode, alternate screen and mouse capture for as long as it lives.
///
/// Restores the terminal on drop, so also on errors and panics.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> anyhow::Result<Self> {
        enable_raw_mode()?;
        let guard = TerminalGuard;
        stdout().execute(EnterAlternateScreen)?;
        stdout().execute(EnableMouseCapture)?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        restore_each([
            ("disable mouse capture", || stdout().execute(DisableMouseCapture).map(drop)),
            ("leave raw mode", disable_raw_mode),
            ("leave the alternate screen", || stdout().execute(LeaveAlternateScreen).map(drop)),
        ]);
    }
}

/// Runs every step even if an earlier one failed. Returns how many failed.
fn restore_each<const N: usize>(steps: [(&str, fn() -> std::io::Result<()>); N]) -> usize {
    let mut failed = 0;
    for (step, restore) in steps {
        if let Err(err) = restore() {
            warn!(%err, "Could not {step}");
            failed += 1;
        }
    }
    failed
}

fn run(app: &mut App) -> anyhow::Result<()> {
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    while !app.should_quit {
        terminal.draw(|frame| ui::draw(frame, app))?;
        handle_events(app)?;
    }
    Ok(())
}

fn handle_events(app: &mut App) -> anyhow::Result<()> {
    if event::poll(std::time::Duration::from_millis(16))? {
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key.code),
            Event::Mouse(mouse) => app.handle_mouse(mouse),
            _ => {}
        }
    }
    Ok(())
}

fn initialize_logging(level: LevelFilter, log_file: Option<&Path>) -> anyhow::Result<()> {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    let layer = tracing_subscriber::fmt::layer().event_format(format);
    match log_file {
        Some(path) => {
            let file = File::create(path)?;
            tracing_subscriber::registry()
                .with(layer.with_ansi(false).with_writer(Mutex::new(file)))
                .with(filter)
                .init();
        }
        None => tracing_subscriber::registry()
            .with(layer.with_writer(std::io::stderr))
            .with(filter)
            .init(),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[test]
    fn terminal_restore_continues_after_a_failure() {
        static RAN: AtomicUsize = AtomicUsize::new(0);
        let failed = restore_each([
            ("fail", || {
                RAN.fetch_add(1, Ordering::SeqCst);
                Err(std::io::Error::other("no terminal"))
            }),
            ("succeed", || {
                RAN.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }),
            ("fail again", || {
                RAN.fetch_add(1, Ordering::SeqCst);
                Err(std::io::Error::other("no terminal"))
            }),
        ]);
        assert_eq!(failed, 2);
        assert_eq!(RAN.load(Ordering::SeqCst), 3);
    }
}
