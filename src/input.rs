//! Keyboard input handling.
//!
//! Maps terminal key events to [`App`] actions.  Adding a new keybinding is
//! a single match arm in [`handle_key_event`].
//!
//! ## For contributors
//!
//! To add a new keybinding:
//!
//! 1. Add a method on [`App`] for the action (or a [`Request`] variant if the
//!    feed service has to do the work).
//! 2. Add a `KeyCode` match arm in [`handle_key_event`] that calls it.
//! 3. Update the help text in [`crate::ui`]'s status bar.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::app::{App, Request};

/// Process a single key event, updating app state accordingly.
///
/// Only reacts to key-press events (ignoring release / repeat) so that each
/// physical keypress triggers exactly one action.
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit = true,
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Up | KeyCode::Char('k') => app.select_previous(),
        KeyCode::Home | KeyCode::Char('g') => app.select_first(),
        KeyCode::End | KeyCode::Char('G') => app.select_last(),
        KeyCode::Char('d') => app.request(Request::Discover),
        KeyCode::Char('r') => app.request(Request::Refresh),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::sample_state;
    use crossterm::event::{KeyEventState, KeyModifiers};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn q_and_esc_quit() {
        for code in [KeyCode::Char('q'), KeyCode::Esc] {
            let mut app = App::new(sample_state());
            handle_key_event(&mut app, press(code));
            assert!(app.quit);
        }
    }

    #[test]
    fn d_and_r_queue_service_requests() {
        let mut app = App::new(sample_state());
        handle_key_event(&mut app, press(KeyCode::Char('d')));
        assert_eq!(app.take_request(), Some(Request::Discover));

        handle_key_event(&mut app, press(KeyCode::Char('r')));
        assert_eq!(app.take_request(), Some(Request::Refresh));
    }

    #[test]
    fn vim_keys_navigate() {
        let mut app = App::new(sample_state());
        handle_key_event(&mut app, press(KeyCode::Char('G')));
        assert_eq!(app.list_state.selected(), Some(2));
        handle_key_event(&mut app, press(KeyCode::Char('k')));
        assert_eq!(app.list_state.selected(), Some(1));
        handle_key_event(&mut app, press(KeyCode::Char('g')));
        assert_eq!(app.list_state.selected(), Some(0));
    }

    #[test]
    fn key_release_is_ignored() {
        let mut app = App::new(sample_state());
        let release = KeyEvent {
            code: KeyCode::Char('q'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        handle_key_event(&mut app, release);
        assert!(!app.quit);
    }
}
