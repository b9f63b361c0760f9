//! Keyboard input listener.
//!
//! Runs on its own thread, blocking on input, and steers the display loop
//! only through the shared [`ControlState`].

use std::io::{self, BufRead};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use glyphfall_core::{Command, ControlState};

/// A blocking source of input lines. Only the first character matters.
pub trait KeySource {
    /// Block until the next line arrives. `None` means the input is closed.
    fn next_line(&mut self) -> io::Result<Option<String>>;
}

/// Lines read from a buffered reader, e.g. piped stdin.
pub struct LineSource<R> {
    reader: R,
}

impl<R: BufRead> LineSource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> KeySource for LineSource<R> {
    /// Bytes that are not UTF-8 decode to replacement characters, which no
    /// command uses, so such lines are ignored rather than failing the read.
    fn next_line(&mut self) -> io::Result<Option<String>> {
        let mut line = Vec::new();
        if self.reader.read_until(b'\n', &mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&line).into_owned()))
    }
}

/// Key presses from the terminal. Raw mode is on, so each press is a line.
pub struct TerminalKeys;

impl KeySource for TerminalKeys {
    fn next_line(&mut self) -> io::Result<Option<String>> {
        loop {
            if let Event::Key(key) = event::read()?
                && let Some(line) = key_line(key)
            {
                return Ok(Some(line));
            }
        }
    }
}

/// The one-character line a key press stands for.
///
/// Esc and Ctrl-C quit. The arrow keys stand in for the speed and theme
/// cycling characters so piped input can reach the same commands.
fn key_line(key: KeyEvent) -> Option<String> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    let c = match (key.modifiers, key.code) {
        (_, KeyCode::Esc) | (KeyModifiers::CONTROL, KeyCode::Char('c' | 'C')) => 'q',
        (_, KeyCode::Up) => '+',
        (_, KeyCode::Down) => '-',
        (_, KeyCode::Left) => '<',
        (_, KeyCode::Right) => '>',
        (_, KeyCode::Char(c)) => c,
        _ => return None,
    };
    Some(c.to_string())
}

/// Why [`listen`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerExit {
    /// A quit command arrived or the exit flag was already set.
    Quit,
    /// The source ran out of input.
    Exhausted,
}

/// Read lines from `source` and apply the commands they carry.
pub fn listen<S: KeySource + ?Sized>(
    source: &mut S,
    control: &ControlState,
) -> io::Result<ListenerExit> {
    while !control.should_exit() {
        let Some(line) = source.next_line()? else {
            return Ok(ListenerExit::Exhausted);
        };
        let Some(command) = Command::from_line(&line) else {
            continue;
        };
        control.apply(command);
        match command {
            Command::SetTheme(_) | Command::CycleTheme(_) => {
                tracing::info!(theme = %control.active_theme(), "theme changed");
            }
            Command::TogglePause => tracing::info!(paused = control.is_paused(), "pause toggled"),
            Command::ToggleHelp => tracing::debug!(shown = control.help_shown(), "help toggled"),
            Command::Speed(_) | Command::Density(_) | Command::TrailLength(_) => {
                let tuning = control.tuning();
                tracing::info!(
                    tick_ms = tuning.tick_ms,
                    spawn_odds = tuning.spawn_odds,
                    trail_fraction = tuning.trail_fraction,
                    "tuning changed"
                );
            }
            Command::Quit => {
                tracing::info!("quit requested");
                return Ok(ListenerExit::Quit);
            }
        }
    }
    Ok(ListenerExit::Quit)
}

/// Start the listener thread.
///
/// With `piped` set, commands are read line by line from stdin first; once
/// stdin closes the listener carries on with terminal key presses so the
/// user can still quit.
pub fn spawn(control: Arc<ControlState>, piped: bool) -> JoinHandle<()> {
    thread::spawn(move || {
        let result = if piped {
            let stdin = io::stdin();
            match listen(&mut LineSource::new(stdin.lock()), &control) {
                Ok(ListenerExit::Exhausted) => {
                    tracing::info!("stdin closed, switching to terminal keys");
                    listen(&mut TerminalKeys, &control)
                }
                other => other,
            }
        } else {
            listen(&mut TerminalKeys, &control)
        };

        if let Err(error) = result {
            tracing::error!(%error, "input listener failed, shutting down");
            control.request_exit();
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyphfall_core::Theme;
    use std::io::Cursor;

    fn lines(input: &str) -> LineSource<Cursor<Vec<u8>>> {
        LineSource::new(Cursor::new(input.as_bytes().to_vec()))
    }

    /// Source that fails on first read.
    struct Broken;

    impl KeySource for Broken {
        fn next_line(&mut self) -> io::Result<Option<String>> {
            Err(io::Error::other("tty gone"))
        }
    }

    #[test]
    fn test_theme_keys() {
        let control = ControlState::new(Theme::Green);
        let exit = listen(&mut lines("b\nR\ny\n"), &control).unwrap();
        assert_eq!(exit, ListenerExit::Exhausted);
        assert_eq!(control.active_theme(), Theme::Yellow);
        assert!(!control.should_exit());
    }

    #[test]
    fn test_pause_toggles() {
        let control = ControlState::default();
        listen(&mut lines(" \n"), &control).unwrap();
        assert!(control.is_paused());
        listen(&mut lines("p\nP\n"), &control).unwrap();
        assert!(control.is_paused());
        listen(&mut lines("p\n"), &control).unwrap();
        assert!(!control.is_paused());
    }

    #[test]
    fn test_quit_stops_reading() {
        let control = ControlState::default();
        let mut source = lines("p\nq\nb\n");
        let exit = listen(&mut source, &control).unwrap();
        assert_eq!(exit, ListenerExit::Quit);
        assert!(control.should_exit());
        assert!(!control.is_paused());
        assert_eq!(control.active_theme(), Theme::Green);
        assert_eq!(source.next_line().unwrap().as_deref(), Some("b\n"));
    }

    #[test]
    fn test_e_also_quits() {
        let control = ControlState::default();
        let exit = listen(&mut lines("E\n"), &control).unwrap();
        assert_eq!(exit, ListenerExit::Quit);
        assert!(control.should_exit());
    }

    #[test]
    fn test_unknown_and_empty_lines_ignored() {
        let control = ControlState::default();
        let exit = listen(&mut lines("\n\nx\n42\n"), &control).unwrap();
        assert_eq!(exit, ListenerExit::Exhausted);
        assert!(!control.is_paused());
        assert!(!control.should_exit());
        assert_eq!(control.active_theme(), Theme::Green);
    }

    #[test]
    fn test_exit_observed_before_reading() {
        let control = ControlState::default();
        control.request_exit();
        let mut source = lines("b\n");
        assert_eq!(listen(&mut source, &control).unwrap(), ListenerExit::Quit);
        assert_eq!(control.active_theme(), Theme::Green);
    }

    #[test]
    fn test_invalid_utf8_line_is_ignored() {
        let control = ControlState::default();
        let mut source = LineSource::new(Cursor::new(b"\xff\xfe\nb\n".to_vec()));
        let exit = listen(&mut source, &control).unwrap();
        assert_eq!(exit, ListenerExit::Exhausted);
        assert_eq!(control.active_theme(), Theme::Blue);
        assert!(!control.should_exit());
    }

    #[test]
    fn test_last_line_without_newline() {
        let control = ControlState::default();
        listen(&mut lines("r"), &control).unwrap();
        assert_eq!(control.active_theme(), Theme::Red);
    }

    #[test]
    fn test_tuning_lines() {
        let control = ControlState::default();
        listen(&mut lines("+\n+\nw\nd\n>\nm\n"), &control).unwrap();
        let tuning = control.tuning();
        assert_eq!(tuning.tick_ms, 50);
        assert_eq!(tuning.spawn_odds, 95);
        assert!(tuning.trail_fraction > 0.6);
        assert_eq!(control.active_theme(), Theme::Blue);
        assert!(control.help_shown());
    }

    #[test]
    fn test_key_line_quit_keys() {
        let esc = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(key_line(esc).as_deref(), Some("q"));
        assert_eq!(key_line(ctrl_c).as_deref(), Some("q"));
    }

    #[test]
    fn test_key_line_chars_and_arrows() {
        let plain = |code| KeyEvent::new(code, KeyModifiers::NONE);
        assert_eq!(key_line(plain(KeyCode::Char('b'))).as_deref(), Some("b"));
        assert_eq!(key_line(plain(KeyCode::Char(' '))).as_deref(), Some(" "));
        assert_eq!(
            key_line(KeyEvent::new(KeyCode::Char('C'), KeyModifiers::SHIFT)).as_deref(),
            Some("C")
        );
        assert_eq!(key_line(plain(KeyCode::Up)).as_deref(), Some("+"));
        assert_eq!(key_line(plain(KeyCode::Down)).as_deref(), Some("-"));
        assert_eq!(key_line(plain(KeyCode::Left)).as_deref(), Some("<"));
        assert_eq!(key_line(plain(KeyCode::Right)).as_deref(), Some(">"));
        assert_eq!(key_line(plain(KeyCode::Enter)), None);
        assert_eq!(key_line(plain(KeyCode::F(1))), None);
    }

    #[test]
    fn test_key_line_skips_release_and_repeat() {
        for kind in [KeyEventKind::Release, KeyEventKind::Repeat] {
            let key = KeyEvent::new_with_kind(KeyCode::Char('q'), KeyModifiers::NONE, kind);
            assert_eq!(key_line(key), None);
        }
    }

    #[test]
    fn test_read_error_propagates() {
        let control = ControlState::default();
        assert!(listen(&mut Broken, &control).is_err());
    }
}
