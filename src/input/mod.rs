use crate::app::actions::Action;
use crate::app::events::{Event, InputEvent};
use crate::app::state::{AppState, Focus};
use crossterm::event::{
    self, Event as CtEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEventKind,
};
use tokio::sync::mpsc;

pub fn spawn_input_task(tx: mpsc::Sender<Event>) {
    tokio::task::spawn_blocking(move || {
        loop {
            if event::poll(std::time::Duration::from_millis(250)).unwrap_or(false) {
                let ev = match event::read() {
                    Ok(CtEvent::Key(k)) if k.kind == KeyEventKind::Press => InputEvent::Key(k),
                    Ok(CtEvent::Mouse(m)) => InputEvent::Mouse(m),
                    Ok(CtEvent::Resize(_, _)) => InputEvent::Resize,
                    Ok(_) | Err(_) => continue,
                };
                if tx.blocking_send(Event::Input(ev)).is_err() {
                    break;
                }
            } else if tx.is_closed() {
                break;
            }
        }
    });
}

pub fn map_input_to_action(state: &AppState, ev: InputEvent) -> Option<Action> {
    match ev {
        InputEvent::Resize => Some(Action::Resize),
        InputEvent::Mouse(m) => match m.kind {
            MouseEventKind::ScrollUp => Some(Action::ScrollUp),
            MouseEventKind::ScrollDown => Some(Action::ScrollDown),
            _ => None,
        },
        InputEvent::Key(k) => map_key(state, k),
    }
}

fn map_key(state: &AppState, k: KeyEvent) -> Option<Action> {
    let ctrl = k.modifiers.contains(KeyModifiers::CONTROL);

    // Work in every focus.
    match k.code {
        KeyCode::Char('c') if ctrl => return Some(Action::Quit),
        KeyCode::Char('s') if ctrl => return Some(Action::Search),
        KeyCode::Tab => return Some(Action::FocusNext),
        KeyCode::BackTab => return Some(Action::FocusPrev),
        _ => {}
    }

    if state.focus.is_text_input() {
        handle_text_input(k)
    } else {
        handle_lyrics(k)
    }
}

fn handle_text_input(k: KeyEvent) -> Option<Action> {
    match k.code {
        KeyCode::Enter => Some(Action::Submit),
        KeyCode::Esc => Some(Action::SetFocus(Focus::Lyrics)),
        KeyCode::Backspace => Some(Action::Backspace),
        KeyCode::Char('u') if k.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(Action::ClearInput)
        }
        KeyCode::Char(c) if !k.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(Action::InputChar(c))
        }
        _ => None,
    }
}

fn handle_lyrics(k: KeyEvent) -> Option<Action> {
    match k.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),

        KeyCode::Up | KeyCode::Char('k') => Some(Action::ScrollUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::ScrollDown),
        KeyCode::Char('g') => Some(Action::ScrollTop),
        KeyCode::Char('G') => Some(Action::ScrollBottom),
        KeyCode::Char('d') if k.modifiers.contains(KeyModifiers::CONTROL) => Some(Action::PageDown),
        KeyCode::Char('u') if k.modifiers.contains(KeyModifiers::CONTROL) => Some(Action::PageUp),
        KeyCode::PageDown => Some(Action::PageDown),
        KeyCode::PageUp => Some(Action::PageUp),

        KeyCode::Char('s') | KeyCode::Enter => Some(Action::Search),
        KeyCode::Char('i') | KeyCode::Char('/') => Some(Action::SetFocus(Focus::Url)),
        KeyCode::Char('a') => Some(Action::SetFocus(Focus::ApiKey)),

        KeyCode::Char(' ') => Some(Action::TogglePause),
        KeyCode::Char(']') | KeyCode::Right | KeyCode::Char('l') => Some(Action::SeekForward),
        KeyCode::Char('[') | KeyCode::Left | KeyCode::Char('h') => Some(Action::SeekBack),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> InputEvent {
        InputEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn ctrl(c: char) -> InputEvent {
        InputEvent::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
    }

    fn focused(focus: Focus) -> AppState {
        AppState {
            focus,
            ..AppState::new()
        }
    }

    #[test]
    fn test_letters_type_into_inputs() {
        let state = focused(Focus::Url);
        assert_eq!(map_input_to_action(&state, key(KeyCode::Char('q'))), Some(Action::InputChar('q')));
        assert_eq!(map_input_to_action(&state, key(KeyCode::Char(' '))), Some(Action::InputChar(' ')));
        assert_eq!(map_input_to_action(&state, key(KeyCode::Enter)), Some(Action::Submit));
        assert_eq!(
            map_input_to_action(&state, key(KeyCode::Esc)),
            Some(Action::SetFocus(Focus::Lyrics))
        );
        assert_eq!(map_input_to_action(&state, ctrl('u')), Some(Action::ClearInput));
    }

    #[test]
    fn test_letters_are_commands_outside_inputs() {
        let state = focused(Focus::Lyrics);
        assert_eq!(map_input_to_action(&state, key(KeyCode::Char('q'))), Some(Action::Quit));
        assert_eq!(map_input_to_action(&state, key(KeyCode::Char(' '))), Some(Action::TogglePause));
        assert_eq!(map_input_to_action(&state, key(KeyCode::Char('s'))), Some(Action::Search));
        assert_eq!(map_input_to_action(&state, key(KeyCode::Char('j'))), Some(Action::ScrollDown));
        assert_eq!(map_input_to_action(&state, ctrl('u')), Some(Action::PageUp));
    }

    #[test]
    fn test_global_keys() {
        for focus in [Focus::Url, Focus::ApiKey, Focus::Lyrics] {
            let state = focused(focus);
            assert_eq!(map_input_to_action(&state, ctrl('s')), Some(Action::Search));
            assert_eq!(map_input_to_action(&state, ctrl('c')), Some(Action::Quit));
            assert_eq!(map_input_to_action(&state, key(KeyCode::Tab)), Some(Action::FocusNext));
        }
    }
}
