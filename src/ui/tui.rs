use std::{io::Stdout, time::Duration};

use color_eyre::eyre::Result;
use crossterm::event::EventStream;
use flume::{Receiver, Sender};
use futures::{FutureExt, StreamExt};
use ratatui::crossterm::{
    self, cursor,
    event::{
        DisableBracketedPaste, EnableBracketedPaste, Event as CrosstermEvent, KeyEvent,
        KeyEventKind,
    },
    terminal::{EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{Frame, Terminal, backend::CrosstermBackend};

/// Redraw cadence; also drives the spinners.
const TICK_RATE: Duration = Duration::from_millis(33);

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TerminalEvent {
    Tick,
    /// Bracketed paste. Dropping a file onto most terminals arrives this way.
    Paste(String),
    Key(KeyEvent),
    Resize,
}

impl TerminalEvent {
    /// `None` for input the app never reacts to.
    fn from_crossterm(event: CrosstermEvent) -> Option<Self> {
        match event {
            CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Some(Self::Key(key)),
            CrosstermEvent::Paste(text) => Some(Self::Paste(text)),
            CrosstermEvent::Resize(..) => Some(Self::Resize),
            _ => None,
        }
    }
}

/// Raw-mode alternate screen with bracketed paste, plus a reader task that
/// merges terminal input with the redraw tick.
pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    event_rx: Receiver<TerminalEvent>,
    event_tx: Sender<TerminalEvent>,
}

impl Tui {
    pub fn new() -> Result<Self> {
        let terminal = Terminal::new(CrosstermBackend::new(std::io::stdout()))?;
        let (event_tx, event_rx) = flume::unbounded();
        Ok(Self {
            terminal,
            event_rx,
            event_tx,
        })
    }

    pub fn enter(&mut self) -> Result<()> {
        crossterm::terminal::enable_raw_mode()?;
        crossterm::execute!(
            std::io::stdout(),
            EnterAlternateScreen,
            EnableBracketedPaste,
            cursor::Hide
        )?;
        tokio::spawn(read_events(self.event_tx.clone()));
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        if crossterm::terminal::is_raw_mode_enabled()? {
            crossterm::execute!(std::io::stdout(), DisableBracketedPaste)?;
            Self::restore()?;
        }
        Ok(())
    }

    /// Also called from the panic hook, where no `Tui` is at hand.
    pub fn restore() -> Result<()> {
        crossterm::execute!(std::io::stdout(), LeaveAlternateScreen, cursor::Show)?;
        crossterm::terminal::disable_raw_mode()?;
        Ok(())
    }

    pub fn draw(&mut self, render: impl FnOnce(&mut Frame)) -> Result<()> {
        self.terminal.draw(render)?;
        Ok(())
    }

    #[allow(clippy::should_implement_trait)]
    pub async fn next(&self) -> Option<TerminalEvent> {
        self.event_rx.recv_async().await.ok()
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        let _ = self.exit();
    }
}

/// Runs until the `Tui` goes away.
async fn read_events(event_tx: Sender<TerminalEvent>) {
    let mut reader = EventStream::new();
    let mut tick = tokio::time::interval(TICK_RATE);
    loop {
        let event = tokio::select! {
            _ = tick.tick() => TerminalEvent::Tick,
            Some(Ok(raw)) = reader.next().fuse() => match TerminalEvent::from_crossterm(raw) {
                Some(event) => event,
                None => continue,
            },
        };
        if event_tx.send_async(event).await.is_err() {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::{KeyCode, KeyModifiers};

    fn key(kind: KeyEventKind) -> CrosstermEvent {
        CrosstermEvent::Key(KeyEvent::new_with_kind(
            KeyCode::Char('g'),
            KeyModifiers::NONE,
            kind,
        ))
    }

    #[test]
    fn only_presses_pastes_and_resizes_pass() {
        assert!(matches!(
            TerminalEvent::from_crossterm(key(KeyEventKind::Press)),
            Some(TerminalEvent::Key(_))
        ));
        assert_eq!(TerminalEvent::from_crossterm(key(KeyEventKind::Release)), None);
        assert_eq!(
            TerminalEvent::from_crossterm(CrosstermEvent::Paste("/tmp/room.png".into())),
            Some(TerminalEvent::Paste("/tmp/room.png".into()))
        );
        assert_eq!(
            TerminalEvent::from_crossterm(CrosstermEvent::Resize(80, 24)),
            Some(TerminalEvent::Resize)
        );
        assert_eq!(TerminalEvent::from_crossterm(CrosstermEvent::FocusGained), None);
    }
}
