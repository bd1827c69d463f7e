//! damage_tui - Console report and interactive viewer for damage comparison sheets

mod app;
mod report;
mod ui;

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use damage_core::{example_sheet, load_sheet};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Expected damage of d20 attack options across target armor classes
#[derive(Parser, Debug)]
#[command(
    name = "damage_tui",
    version,
    about = "Compare expected damage of attack options across target AC"
)]
struct Args {
    /// Sheet file (TOML); the bundled example sheet is used when omitted
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Lowest target AC, overrides the sheet
    #[arg(long)]
    min_ac: Option<i32>,

    /// Highest target AC, overrides the sheet
    #[arg(long)]
    max_ac: Option<i32>,

    /// Print the tables to stdout instead of opening the viewer
    #[arg(short, long)]
    console: bool,

    /// Write tables and weapon summaries as JSON
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log file for the interactive viewer
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Args {
    fn interactive(&self) -> bool {
        !self.console && self.output.is_none()
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.log_file.as_deref(), args.interactive())?;

    let (source, sheet) = match &args.input {
        Some(path) => (
            path.display().to_string(),
            load_sheet(path).with_context(|| format!("Failed to load sheet {}", path.display()))?,
        ),
        None => ("example sheet".to_string(), example_sheet()?),
    };
    let sheet = sheet.with_ac_bounds(args.min_ac, args.max_ac);

    info!(
        source = %source,
        attacks = sheet.attacks.len(),
        weapons = sheet.weapon_count(),
        "loaded sheet"
    );

    let table = sheet.build().context("Failed to compute damage tables")?;

    if args.console {
        print!("{}", report::render(&table));
    }

    if let Some(path) = &args.output {
        let json = table.to_json()?;
        std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
        info!(path = %path.display(), "wrote JSON export");
    }

    if args.interactive() {
        run_viewer(App::new(table, source))?;
    }

    Ok(())
}

/// Filter from `RUST_LOG`; stderr output unless the viewer owns the terminal
fn init_tracing(log_file: Option<&Path>, interactive: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "damage_core=info,damage_tui=info".into());

    let file_layer = match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            Some(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        }
        None => None,
    };
    let stderr_layer = (!interactive).then(|| fmt::layer().with_writer(io::stderr));

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .init();
    Ok(())
}

fn run_viewer(mut app: App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn event_loop(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match (key.code, key.modifiers) {
                    (KeyCode::Char('q'), _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => break,
                    (KeyCode::Tab, _) => app.next_tab(),
                    (KeyCode::BackTab, _) => app.prev_tab(),
                    (KeyCode::Char('1'), _) => app.set_tab(0),
                    (KeyCode::Char('2'), _) => app.set_tab(1),
                    (KeyCode::Char('3'), _) => app.set_tab(2),
                    (KeyCode::Char('4'), _) => app.set_tab(3),
                    (KeyCode::Char('5'), _) => app.set_tab(4),
                    (KeyCode::Up, _) | (KeyCode::Char('k'), _) => app.on_up(),
                    (KeyCode::Down, _) | (KeyCode::Char('j'), _) => app.on_down(),
                    (KeyCode::PageUp, _) => app.page_up(),
                    (KeyCode::PageDown, _) => app.page_down(),
                    (KeyCode::Char('d'), _) => app.toggle_chart_matrix(),
                    (KeyCode::Char('?'), _) => app.toggle_help(),
                    _ => {}
                }
            }
        }
    }

    Ok(())
}
