use picsort::app::{App, Outcome};
use picsort::catalog::SortColumn;
use picsort::cli::Args;
use picsort::config::ConfigStore;
use picsort::tui::{
    self, handle_key_event, handle_prompt_input, FolderPrompt, PromptAction, ViewState,
};

use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::path::{Path, PathBuf};
use std::{fs, io, time::Duration};
use tracing::warn;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

fn main() -> io::Result<()> {
    let args = Args::parse_args();

    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // The guard flushes buffered log lines when main returns
    let _log_guard = init_logging();

    let store = match &args.config {
        Some(path) => ConfigStore::at(path.clone()),
        None => match ConfigStore::open_default() {
            Ok(store) => store,
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
    };

    let mut app = App::new(store);

    // CLI directory wins; otherwise reopen the last folder if it survives
    if let Some(folder) = startup_folder(&args, &app) {
        if let Err(e) = app.open_folder(&folder) {
            warn!("could not open {}: {e}", folder.display());
            app.status = Some(format!("could not open {}: {e}", folder.display()));
        }
    }
    if let (Some(sort), Some(catalog)) = (args.sort, app.catalog.as_mut()) {
        catalog.sort_by_with(SortColumn::from(sort), args.reverse);
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn startup_folder(args: &Args, app: &App) -> Option<PathBuf> {
    if let Some(directory) = &args.directory {
        return Some(directory.clone());
    }
    let last = &app.config.viewer.last_opened_directory;
    if last.is_empty() {
        return None;
    }
    let folder = Path::new(last);
    folder.is_dir().then(|| folder.to_path_buf())
}

/// Logs go to a file: the terminal belongs to the TUI.
fn init_logging() -> Option<WorkerGuard> {
    let dir = dirs::data_local_dir()?.join("picsort").join("logs");
    fs::create_dir_all(&dir).ok()?;

    let appender = tracing_appender::rolling::daily(dir, "picsort.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("picsort=info")),
        )
        .with_writer(writer)
        .with_ansi(false)
        .init();

    Some(guard)
}

/// Main application loop: one event at a time, everything synchronous
fn run_loop<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    let mut view_state = ViewState::Browsing;

    loop {
        terminal.draw(|frame| {
            tui::render(frame, app);
            if let ViewState::Prompt(prompt) = &view_state {
                tui::render_prompt_overlay(frame, prompt);
            }
        })?;

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                match &mut view_state {
                    ViewState::Prompt(prompt) => match handle_prompt_input(key) {
                        PromptAction::Input(c) => prompt.input.push(c),
                        PromptAction::Backspace => {
                            prompt.input.pop();
                        }
                        PromptAction::Accept => {
                            let FolderPrompt { target, input } = prompt.clone();
                            app.accept_prompt(target, &input);
                            view_state = ViewState::Browsing;
                        }
                        PromptAction::Cancel => view_state = ViewState::Browsing,
                        PromptAction::None => {}
                    },
                    ViewState::Browsing => match app.apply_action(handle_key_event(key)) {
                        Outcome::Quit => break,
                        Outcome::OpenPrompt(target, initial) => {
                            view_state = ViewState::Prompt(FolderPrompt::new(target, initial));
                        }
                        Outcome::Continue => {}
                    },
                }
            }
            // Resize: the next draw recomputes the fitted image from the new pane
            Event::Resize(..) => {}
            _ => {}
        }
    }

    Ok(())
}
