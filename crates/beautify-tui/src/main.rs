//! GML Beautify for the terminal.
//!
//! Two panes side by side: GML source on the left, beautified output on the right. Both panes
//! are re-highlighted and re-numbered on every keystroke. The window is a borderless frame
//! inside the terminal that can be dragged by its title bar, resized from its right and bottom
//! edges, minimized to a dock entry and maximized to fill the terminal.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p beautify-tui -- [file.gml] [--config gml-beautify.toml] [--log-file path]
//! ```
//!
//! The formatter is an external program configured in `gml-beautify.toml`; see
//! [`config`] for the format. Without one, beautify copies the input unchanged.
//!
//! # Shortcuts
//!
//! - F5 / Ctrl+B: beautify input into output
//! - Ctrl+O: load a file into the input pane
//! - Ctrl+S: save the output pane (`.gml` is appended when the name has no extension)
//! - Ctrl+C: copy the whole output pane
//! - Ctrl+V: paste into the input pane
//! - F6: switch pane
//! - F9 / F10: minimize / maximize or restore
//! - Ctrl+Q: close
//! - Arrows, Home/End, PageUp/PageDown, Backspace/Delete, Enter, Tab: edit the focused pane
//! - Mouse: title bar buttons `—` `▢`/`❐` `✕`, drag the title bar to move, drag the right or
//!   bottom edge or the corner to resize

mod app;
mod config;
mod formatter;
mod host;
mod pane;
mod ui;

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use config::Config;
use crossterm::{
    event::{
        self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste,
        EnableMouseCapture, Event,
    },
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::fs::OpenOptions;
use std::io::stdout;
use std::path::PathBuf;
use std::time::Duration;

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(name = "gml-beautify", version, about = "Two-pane GML beautifier")]
struct Cli {
    /// GML file to load into the input pane.
    file: Option<PathBuf>,

    /// Configuration file (defaults to ./gml-beautify.toml when present).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log file (defaults to gml-beautify.log in the temp directory).
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset (error, warn, info, debug, trace).
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn init_logging(cli: &Cli) -> Result<()> {
    let path = cli
        .log_file
        .clone()
        .unwrap_or_else(|| std::env::temp_dir().join("gml-beautify.log"));
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(cli.log_level.as_str()),
    )
    .target(env_logger::Target::Pipe(Box::new(file)))
    .format_timestamp_millis()
    .try_init()
    .context("failed to initialize logging")?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let config = Config::load(cli.config.as_deref())?;
    let palette = config.theme.palette()?;
    let (width, height) = terminal::size().context("failed to query terminal size")?;

    let mut app = App::new(&config, palette, width, height);
    if let Some(path) = &cli.file {
        app.load_file(path);
    }
    log::info!("starting with a {width}x{height} terminal");

    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result.context("event loop failed")
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> std::io::Result<()> {
    loop {
        terminal.draw(|f| app.render(f))?;

        if app.should_quit() {
            break;
        }

        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) => app.handle_key_event(key),
                Event::Mouse(mouse) => app.handle_mouse_event(mouse),
                Event::Paste(text) => app.handle_paste(&text),
                Event::Resize(width, height) => app.resize(width, height),
                _ => {}
            }
        }
    }

    log::info!("exiting");
    Ok(())
}
