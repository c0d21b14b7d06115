use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEventKind};

use crate::geometry::Direction;

/// A terminal event as the game understands it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Input {
    Move(Direction),
    Pause,
    /// Any other key or a mouse click; starts the game from the intro.
    Start,
    Quit,
}

pub fn translate(event: &Event) -> Option<Input> {
    match event {
        Event::Key(key) => translate_key(key),
        Event::Mouse(mouse) => match mouse.kind {
            MouseEventKind::Down(_) => Some(Input::Start),
            _ => None,
        },
        _ => None,
    }
}

fn translate_key(key: &KeyEvent) -> Option<Input> {
    // Windows also reports releases
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if is_ctrl_c(key) {
        return Some(Input::Quit);
    }

    let input = match key.code {
        KeyCode::Up => Input::Move(Direction::Up),
        KeyCode::Down => Input::Move(Direction::Down),
        KeyCode::Left => Input::Move(Direction::Left),
        KeyCode::Right => Input::Move(Direction::Right),
        KeyCode::Char(' ') => Input::Pause,
        KeyCode::Esc => Input::Quit,
        _ => Input::Start,
    };
    Some(input)
}

fn is_ctrl_c(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{MouseButton, MouseEvent};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn arrows_become_moves() {
        assert_eq!(translate(&key(KeyCode::Up)), Some(Input::Move(Direction::Up)));
        assert_eq!(translate(&key(KeyCode::Left)), Some(Input::Move(Direction::Left)));
    }

    #[test]
    fn space_pauses_and_ctrl_c_quits() {
        assert_eq!(translate(&key(KeyCode::Char(' '))), Some(Input::Pause));
        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(translate(&ctrl_c), Some(Input::Quit));
        assert_eq!(translate(&key(KeyCode::Char('c'))), Some(Input::Start));
    }

    #[test]
    fn click_starts() {
        let click = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 3,
            row: 4,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(translate(&click), Some(Input::Start));
        assert_eq!(translate(&Event::Resize(10, 10)), None);
    }
}
