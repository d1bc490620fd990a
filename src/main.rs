// src/main.rs

use color_eyre::eyre::{Result, WrapErr};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::prelude::*;
use std::io::stdout;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{error, info};

mod app;
mod config;
mod core;
mod logging;
mod ui;

use app::{App, DocumentLoaded, InputMode, Screen};
use config::Config;
use crate::core::document::{DocumentRenderer, LocalDocumentRenderer};
use crate::core::viewer::LoadTicket;

rust_i18n::i18n!("locales", fallback = "es");

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    logging::initialize_logging()?;

    let config = Config::load()?;
    rust_i18n::set_locale(&config.locale);

    let catalog = config
        .catalog_source()
        .load()
        .wrap_err("the catalog could not be loaded")?;
    let renderer: Arc<dyn DocumentRenderer> = Arc::new(LocalDocumentRenderer::new(config.documents_root()));
    info!(documents = %config.documents_root().display(), "Starting edu-repo.");

    let mut app = App::new(catalog);
    if config.show_logs {
        app.toggle_logs();
    }

    // --- Setup ---
    stdout().execute(EnterAlternateScreen)?;
    stdout().execute(EnableMouseCapture)?;
    enable_raw_mode()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    terminal.clear()?;

    let result = run(&mut terminal, &mut app, &config, renderer).await;

    // --- Restore Terminal ---
    stdout().execute(LeaveAlternateScreen)?;
    stdout().execute(DisableMouseCapture)?;
    disable_raw_mode()?;

    if let Err(e) = &result {
        error!(error = %e, "Application exited with an error.");
    }
    result
}

async fn run<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    config: &Config,
    renderer: Arc<dyn DocumentRenderer>,
) -> Result<()> {
    let (tx, mut rx) = mpsc::channel::<DocumentLoaded>(8);

    while !app.should_quit {
        terminal.draw(|frame| ui::render(app, frame))?;

        if event::poll(config.tick_rate())? {
            handle_events(app, &tx, &renderer).await?;
        } else {
            app.on_tick();
        }

        while let Ok(loaded) = rx.try_recv() {
            app.on_document_loaded(loaded);
        }
    }
    info!("Quitting.");
    Ok(())
}

async fn handle_events(
    app: &mut App,
    tx: &mpsc::Sender<DocumentLoaded>,
    renderer: &Arc<dyn DocumentRenderer>,
) -> Result<()> {
    if let Event::Key(key) = event::read()? {
        if key.kind == KeyEventKind::Press {
            if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                app.quit();
                return Ok(());
            }
            if app.show_rules {
                handle_rules_input(app, key.code);
            } else if app.viewer.is_open() {
                handle_viewer_input(app, key.code);
            } else {
                match app.screen {
                    Screen::Resources => handle_resources_input(app, key, tx, renderer),
                    Screen::Vulnerabilities => handle_archive_input(app, key.code),
                }
            }
        }
    }
    Ok(())
}

/// Loads `locator` off the UI loop and reports back through `tx`.
fn spawn_load(
    ticket: LoadTicket,
    locator: String,
    tx: &mpsc::Sender<DocumentLoaded>,
    renderer: &Arc<dyn DocumentRenderer>,
) {
    let tx_clone = tx.clone();
    let renderer = Arc::clone(renderer);
    tokio::spawn(async move {
        let joined = tokio::task::spawn_blocking(move || renderer.load(&locator)).await;
        let _ = tx_clone.send(DocumentLoaded::from_join(ticket, joined)).await;
    });
}

fn handle_rules_input(app: &mut App, key_code: KeyCode) {
    match key_code {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Char('?') => app.toggle_rules(),
        KeyCode::Char('q') => app.quit(),
        _ => {}
    }
}

fn handle_viewer_input(app: &mut App, key_code: KeyCode) {
    match key_code {
        KeyCode::Left | KeyCode::PageUp => app.viewer.previous_page(),
        KeyCode::Right | KeyCode::PageDown => app.viewer.next_page(),
        KeyCode::Esc | KeyCode::Char('c') => app.close_viewer(),
        KeyCode::Char('q') => app.quit(),
        _ => {}
    }
}

/// Keys shared by both screens in normal mode. Returns `true` when consumed.
fn handle_global_input(app: &mut App, key_code: KeyCode) -> bool {
    match key_code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit(),
        KeyCode::Tab => app.switch_screen(),
        KeyCode::Char('?') => app.toggle_rules(),
        KeyCode::Char('l') => app.toggle_logs(),
        KeyCode::Char('[') if app.show_logs => app.scroll_logs_left(),
        KeyCode::Char(']') if app.show_logs => app.scroll_logs_right(),
        _ => return false,
    }
    true
}

fn handle_resources_input(
    app: &mut App,
    key: KeyEvent,
    tx: &mpsc::Sender<DocumentLoaded>,
    renderer: &Arc<dyn DocumentRenderer>,
) {
    if app.input_mode == InputMode::Search {
        match key.code {
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => app.browser.clear_search(),
            KeyCode::Char(c) => app.browser.push_search(c),
            KeyCode::Backspace => app.browser.pop_search(),
            KeyCode::Enter | KeyCode::Esc => app.leave_search(),
            _ => {}
        }
        return;
    }

    if handle_global_input(app, key.code) {
        return;
    }
    match key.code {
        KeyCode::Char('/') => app.enter_search(),
        KeyCode::Left => app.browser.previous_category(),
        KeyCode::Right => app.browser.next_category(),
        KeyCode::Up => app.browser.cursor_up(),
        KeyCode::Down => app.browser.cursor_down(),
        KeyCode::Char('r') => app.browser.toggle_focus(),
        KeyCode::Char('x') => app.viewer.dismiss_error(),
        KeyCode::Enter => {
            if let Some((ticket, locator)) = app.open_selected() {
                spawn_load(ticket, locator, tx, renderer);
            }
        }
        _ => {}
    }
}

fn handle_archive_input(app: &mut App, key_code: KeyCode) {
    if handle_global_input(app, key_code) {
        return;
    }
    match key_code {
        KeyCode::Up => app.archive.cursor_up(),
        KeyCode::Down => app.archive.cursor_down(),
        KeyCode::Enter | KeyCode::Char(' ') => app.archive.activate(),
        KeyCode::Char('e') => app.archive.expand_all(),
        KeyCode::Char('c') => app.archive.collapse_all(),
        _ => {}
    }
}
