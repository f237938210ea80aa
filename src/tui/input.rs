use std::time::Duration;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crate::shared::InputEvent;
use super::mode::TuiState;

const VOLUME_STEP: f32 = 0.05;

// poll for terminal input, moves the cursor in tuistate, and resolves keys
// into semantic input events for the controller
pub fn poll_input(timeout: Duration, ts: &mut TuiState) -> anyhow::Result<Vec<InputEvent>> {
    if !event::poll(timeout)? {
        return Ok(vec![]);
    }

    match event::read()? {
        Event::Key(key) if key.kind == KeyEventKind::Press => Ok(handle_key(key.code, ts)),
        Event::Resize(cols, _rows) => Ok(vec![InputEvent::Resize(cols)]),
        _ => Ok(vec![]),
    }
}

pub fn handle_key(code: KeyCode, ts: &mut TuiState) -> Vec<InputEvent> {
    match code {
        KeyCode::Esc | KeyCode::Char('q') => vec![InputEvent::Quit],
        KeyCode::Char(' ') => vec![InputEvent::PlayPress],

        // cursor
        KeyCode::Left | KeyCode::Char('h') => { ts.move_cursor(0, -1); vec![] }
        KeyCode::Right | KeyCode::Char('l') => { ts.move_cursor(0, 1); vec![] }
        KeyCode::Up | KeyCode::Char('k') => { ts.move_cursor(-1, 0); vec![] }
        KeyCode::Down | KeyCode::Char('j') => { ts.move_cursor(1, 0); vec![] }

        // the cell under the cursor
        KeyCode::Enter | KeyCode::Char('x') => vec![InputEvent::ToggleCell {
            row: ts.cursor_row,
            col: ts.cursor_col,
        }],
        KeyCode::Char('c') => vec![InputEvent::Clear],

        // tempo, fine and coarse
        KeyCode::Char('[') => vec![InputEvent::AdjustTempo(-1)],
        KeyCode::Char(']') => vec![InputEvent::AdjustTempo(1)],
        KeyCode::Char('{') => vec![InputEvent::AdjustTempo(-10)],
        KeyCode::Char('}') => vec![InputEvent::AdjustTempo(10)],

        KeyCode::Char('-') => vec![InputEvent::AdjustSteps(-1)],
        KeyCode::Char('=') => vec![InputEvent::AdjustSteps(1)],

        KeyCode::Char(',') => vec![InputEvent::AdjustVolume(-VOLUME_STEP)],
        KeyCode::Char('.') => vec![InputEvent::AdjustVolume(VOLUME_STEP)],

        KeyCode::Char('r') => vec![InputEvent::Reload],

        _ => vec![],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn toggle_uses_the_cursor() {
        let mut ts = TuiState::default();
        ts.sync(6, 16);
        assert_eq!(handle_key(KeyCode::Right, &mut ts), vec![]);
        handle_key(KeyCode::Char('j'), &mut ts);
        assert_eq!(
            handle_key(KeyCode::Enter, &mut ts),
            vec![InputEvent::ToggleCell { row: 1, col: 1 }]
        );
    }

    #[test]
    fn transport_keys() {
        let mut ts = TuiState::default();
        assert_eq!(handle_key(KeyCode::Char(' '), &mut ts), vec![InputEvent::PlayPress]);
        assert_eq!(handle_key(KeyCode::Char('}'), &mut ts), vec![InputEvent::AdjustTempo(10)]);
        assert_eq!(handle_key(KeyCode::Char('-'), &mut ts), vec![InputEvent::AdjustSteps(-1)]);
        assert_eq!(handle_key(KeyCode::Esc, &mut ts), vec![InputEvent::Quit]);
        assert_eq!(handle_key(KeyCode::Char('?'), &mut ts), vec![]);
    }
}
