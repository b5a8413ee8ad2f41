use ratatui::crossterm::event::{KeyEvent, KeyEventKind};
use tracing::debug;

use crate::{
    event::events::Event,
    ui::{
        app::App,
        input::InputHandler,
        tui::{TerminalEvent, Tui},
    },
};

pub struct EventHandler;

impl EventHandler {
    /// Waits for one terminal event, then drains finished background work.
    /// Returns whether a redraw is due.
    pub async fn handle_events(app: &mut App, tui: &Tui) -> color_eyre::Result<bool> {
        let mut should_render = false;
        if let Some(evt) = tui.next().await {
            Self::handle_event(app, evt);
            should_render = true;
        }

        while let Ok(evt) = app.event_rx.try_recv() {
            Self::handle_action(app, evt);
            should_render = true;
        }

        Ok(should_render)
    }

    pub fn handle_event(app: &mut App, evt: TerminalEvent) {
        match evt {
            TerminalEvent::Key(key) => Self::handle_key_event(app, key),
            TerminalEvent::Paste(text) => {
                if let Some(msg) = app.route_paste(&text) {
                    app.update(msg);
                }
            }
            TerminalEvent::Tick | TerminalEvent::Resize => {}
        }
    }

    pub fn handle_action(app: &mut App, evt: Event) {
        match &evt {
            Event::AnimationProgress { .. } => {}
            other => debug!("Event: {:?}", other),
        }
        app.session.apply(evt);
    }

    fn handle_key_event(app: &mut App, evt: KeyEvent) {
        if evt.kind != KeyEventKind::Press {
            return;
        }

        if let Some(msg) = InputHandler::handle_key(evt, app.session.state()) {
            app.update(msg);
            return;
        }

        if let Some(msg) = app.route_key(evt) {
            app.update(msg);
        }
    }
}
