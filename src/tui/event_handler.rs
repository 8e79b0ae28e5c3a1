use super::app_logic::TuiApp;
use super::app_state::AppMode;
use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

pub(super) fn handle_events(app: &mut TuiApp) -> Result<()> {
    if event::poll(Duration::from_millis(50))? {
        if let Event::Key(key_event) = event::read()? {
            if key_event.kind == KeyEventKind::Press {
                route_key(app, key_event);
            }
        }
    }
    Ok(())
}

pub(super) fn route_key(app: &mut TuiApp, key_event: KeyEvent) {
    // Raw mode swallows SIGINT, so Ctrl-C quits from any mode.
    if key_event.modifiers.contains(KeyModifiers::CONTROL)
        && key_event.code == KeyCode::Char('c')
    {
        app.quit = true;
        return;
    }
    match app.mode {
        AppMode::Normal => app.handle_normal_mode_input(key_event),
        AppMode::Searching => app.handle_searching_mode_input(key_event),
        AppMode::ChangingDir => app.handle_changing_dir_mode_input(key_event),
    }
}
