use std::io::{self, Write};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;

use pacman_turns::Dir;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum KeyAction {
    Move(Dir),
    Interrupt,
    Invalid,
}

fn action_for_key(key: KeyEvent) -> KeyAction {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('d') => KeyAction::Interrupt,
            _ => KeyAction::Invalid,
        };
    }
    match key.code {
        KeyCode::Char('w') | KeyCode::Char('k') | KeyCode::Up => KeyAction::Move(Dir::Up),
        KeyCode::Char('s') | KeyCode::Char('j') | KeyCode::Down => KeyAction::Move(Dir::Down),
        KeyCode::Char('a') | KeyCode::Char('h') | KeyCode::Left => KeyAction::Move(Dir::Left),
        KeyCode::Char('d') | KeyCode::Char('l') | KeyCode::Right => KeyAction::Move(Dir::Right),
        _ => KeyAction::Invalid,
    }
}

/// Prompts until a movement key is pressed.
pub fn read_dir(out: &mut impl Write) -> io::Result<Dir> {
    loop {
        write!(out, "Go! ")?;
        out.flush()?;
        let key = read_key()?;
        writeln!(out)?;
        match action_for_key(key) {
            KeyAction::Move(dir) => return Ok(dir),
            KeyAction::Interrupt => {
                return Err(io::Error::new(io::ErrorKind::Interrupted, "interrupted"))
            }
            KeyAction::Invalid => writeln!(out, "Wrong move!")?,
        }
    }
}

/// Waits for one key press with the terminal in raw mode.
fn read_key() -> io::Result<KeyEvent> {
    terminal::enable_raw_mode()?;
    let key = loop {
        match event::read() {
            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => break Ok(key),
            Ok(_) => continue,
            Err(err) => break Err(err),
        }
    };
    terminal::disable_raw_mode()?;
    key
}
