//! Runtime: event loop and input routing for the TUI.
//!
//! Responsibilities
//! - Own the terminal lifecycle (enter/leave alternate screen, raw mode).
//! - Drive a single event loop over terminal input, settled resize widths
//!   and Ctrl+C.
//! - Route input to the main view and apply the returned `Effect`s.
//! - Redraw after input, and again while the toolbar reports that a
//!   measurement changed its layout.
//!
//! Input comes from a dedicated blocking thread that forwards crossterm
//! events over a channel. Raw `Resize` events go to the toolbar's debouncer;
//! only the settled width comes back through the resize receiver.
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, MouseEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::Backend, prelude::*};
use tokio::{
    signal,
    sync::mpsc::{self, UnboundedReceiver},
};
use toolstrip_types::{Effect, Msg, ToolbarConfig};
use tracing::{debug, info, warn};

use crate::app::App;
use crate::ui::components::{Component, ToolbarComponent};
use crate::ui::main_component::MainView;

/// Upper bound on back-to-back draws for one update. Measuring settles in
/// two passes; the bound only guards against a width that keeps flipping.
const MAX_LAYOUT_PASSES: usize = 4;

/// Spawn a dedicated input thread that blocks on terminal input and forwards
/// `crossterm` events over a Tokio channel.
fn spawn_input_thread() -> mpsc::Receiver<Event> {
    let (sender, receiver) = mpsc::channel(500);
    tokio::task::spawn_blocking(move || {
        let poll_interval = Duration::from_millis(16);
        loop {
            match event::poll(poll_interval) {
                Ok(false) => {
                    if sender.is_closed() {
                        break;
                    }
                }
                Ok(true) => match event::read() {
                    Ok(event) => {
                        // Mouse motion is never used.
                        if event.as_mouse_event().is_some_and(|e| e.kind == MouseEventKind::Moved) {
                            continue;
                        }
                        if let Err(e) = sender.blocking_send(event) {
                            warn!("Failed to send event: {}", e);
                            break;
                        }
                    }
                    Err(e) => {
                        warn!("Failed to read event: {}", e);
                        break;
                    }
                },
                Err(e) => {
                    warn!("Failed to poll events: {}", e);
                    break;
                }
            }
        }
    });
    receiver
}

/// Put the terminal into raw mode and enter the alternate screen.
///
/// Returns a ratatui `Terminal` backed by Crossterm for later drawing.
fn setup_terminal() -> Result<Terminal<CrosstermBackend<std::io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal settings and leave the alternate screen.
fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Draws the main view, repeating while the toolbar's measurement changes
/// its layout. Returns the number of draws.
pub(crate) fn render<B>(terminal: &mut Terminal<B>, app: &mut App, main_view: &mut MainView) -> Result<usize>
where
    B: Backend,
    B::Error: std::error::Error + Send + Sync + 'static,
{
    let mut passes = 0;
    loop {
        terminal.draw(|frame| main_view.render(frame, frame.area(), app))?;
        passes += 1;
        if !app.toolbar.take_needs_rerender() {
            break;
        }
        if passes == MAX_LAYOUT_PASSES {
            debug!(passes, "toolbar layout did not settle");
            break;
        }
    }
    Ok(passes)
}

/// Route raw crossterm input events to the main view.
fn handle_input_event(app: &mut App, main_view: &mut MainView, input_event: Event) -> Vec<Effect> {
    match input_event {
        Event::Key(key_event) => main_view.handle_key_events(app, key_event),
        Event::Mouse(mouse_event) => main_view.handle_mouse_events(app, mouse_event),
        Event::Resize(width, height) => main_view.handle_message(app, Msg::Resize(width, height)),
        Event::FocusGained | Event::FocusLost | Event::Paste(_) => Vec::new(),
    }
}

/// Applies effects; returns `true` when one of them asks to quit.
fn apply_effects(app: &mut App, effects: Vec<Effect>) -> bool {
    let mut quit = false;
    for effect in &effects {
        quit |= app.apply_effect(effect);
    }
    quit
}

async fn next_settled_width(receiver: &mut Option<UnboundedReceiver<u16>>) -> Option<u16> {
    match receiver.as_mut() {
        Some(receiver) => receiver.recv().await,
        None => None,
    }
}

/// Entry point for the TUI runtime: sets up the terminal, spawns the event
/// producer, runs the async event loop, and performs cleanup on exit.
pub async fn run_app(config: ToolbarConfig) -> Result<()> {
    let debounce = Duration::from_millis(config.debounce_ms);
    // An imposed width makes terminal resizes irrelevant to the toolbar.
    let (toolbar_view, mut resize_receiver) = ToolbarComponent::new(debounce, config.width.is_none());
    let mut main_view = MainView::new(toolbar_view);
    let mut app = App::new(config);

    let mut input_receiver = spawn_input_thread();
    let mut terminal = setup_terminal()?;

    let mut last_size: Option<(u16, u16)> = crossterm::terminal::size().ok();
    if let Some((width, _)) = last_size {
        main_view.handle_message(&mut app, Msg::WindowResized(width));
    }
    render(&mut terminal, &mut app, &mut main_view)?;
    info!(items = app.toolbar.items().len(), "toolbar started");

    loop {
        let mut needs_render = false;
        let mut quit = false;
        tokio::select! {
            // Terminal input events
            maybe_event = input_receiver.recv() => {
                let Some(event) = maybe_event else {
                    // Input channel closed; break out to shut down cleanly.
                    break;
                };
                if let Event::Resize(width, height) = event {
                    last_size = Some((width, height));
                }
                let effects = handle_input_event(&mut app, &mut main_view, event);
                quit = apply_effects(&mut app, effects);
                needs_render = true;
            }

            // Settled terminal width from the debouncer
            maybe_width = next_settled_width(&mut resize_receiver), if resize_receiver.is_some() => {
                match maybe_width {
                    Some(width) => {
                        debug!(width, "terminal width settled");
                        main_view.handle_message(&mut app, Msg::WindowResized(width));
                        needs_render = true;
                    }
                    None => resize_receiver = None,
                }
            }

            // Handle Ctrl+C
            _ = signal::ctrl_c() => { break; }
        }

        if quit {
            break;
        }

        // Fallback: detect terminal size changes even if no explicit Resize
        // event was received.
        if let Ok((w, h)) = crossterm::terminal::size()
            && last_size != Some((w, h))
        {
            last_size = Some((w, h));
            main_view.handle_message(&mut app, Msg::Resize(w, h));
            needs_render = true;
        }

        if needs_render {
            render(&mut terminal, &mut app, &mut main_view)?;
        }
    }

    // Dropping the view cancels a pending resize timer.
    drop(main_view);
    cleanup_terminal(&mut terminal)?;
    info!("toolbar stopped");
    Ok(())
}
