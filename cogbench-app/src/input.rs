//! Keyboard input on a background thread.

use cogbench_core::Key;
use console::{Key as TermKey, Term};
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};
use std::time::Instant;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// `at` is when the key was read from the terminal, not when it was handled
    Key { key: Key, at: Instant },
    /// Escape or a closed terminal: abandon the session
    Quit,
}

/// Maps a terminal key read at `at` to the engine's key identifier.
pub fn translate(key: &TermKey, at: Instant) -> Option<InputEvent> {
    let key = match key {
        TermKey::Escape => return Some(InputEvent::Quit),
        TermKey::Char(' ') => Key::space(),
        TermKey::Char(c) if c.is_ascii_digit() => Key::digit(*c as u8 - b'0'),
        TermKey::Char(c) if c.is_ascii_alphabetic() => Key::letter(*c),
        TermKey::ArrowLeft => Key::new(Key::ARROW_LEFT),
        TermKey::ArrowRight => Key::new(Key::ARROW_RIGHT),
        TermKey::ArrowUp => Key::new("ArrowUp"),
        TermKey::ArrowDown => Key::new("ArrowDown"),
        TermKey::Enter => Key::new("Enter"),
        _ => return None,
    };
    Some(InputEvent::Key { key, at })
}

/// Reads keys from the terminal until Escape, a read error, or the receiver goes away.
pub fn spawn(term: Term) -> io::Result<(Receiver<InputEvent>, JoinHandle<()>)> {
    let (tx, rx) = mpsc::channel();
    let handle = thread::Builder::new()
        .name("cogbench-input".into())
        .spawn(move || read_loop(&term, &tx))?;
    Ok((rx, handle))
}

fn read_loop(term: &Term, tx: &Sender<InputEvent>) {
    loop {
        let event = match term.read_key() {
            Ok(key) => match translate(&key, Instant::now()) {
                Some(event) => event,
                None => continue,
            },
            Err(e) => {
                debug!(error = %e, "terminal read failed");
                InputEvent::Quit
            }
        };
        let quit = event == InputEvent::Quit;
        if tx.send(event).is_err() || quit {
            return;
        }
    }
}
