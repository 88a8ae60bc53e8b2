//! Interactive terminal rendering of the consultant.
//!
//! The event loop multiplexes key presses, the animation tick and the
//! pending advisory call, so typing stays responsive while a consultation
//! is in flight.

mod render;

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures_util::StreamExt;
use ratatui::DefaultTerminal;
use tracing::debug;

use crate::application::ConsultationWidget;

pub use render::draw;

const TICK_RATE: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Continue,
    Quit,
}

pub async fn run(mut widget: ConsultationWidget) -> Result<()> {
    let mut terminal = ratatui::init();
    let result = event_loop(&mut terminal, &mut widget).await;
    ratatui::restore();
    result
}

async fn event_loop(terminal: &mut DefaultTerminal, widget: &mut ConsultationWidget) -> Result<()> {
    let mut events = EventStream::new();
    let mut ticker = tokio::time::interval(TICK_RATE);
    let mut tick: usize = 0;

    loop {
        terminal.draw(|frame| draw(frame, widget, tick))?;

        tokio::select! {
            _ = ticker.tick() => {
                tick = tick.wrapping_add(1);
            }
            _ = widget.next_completion(), if widget.is_pending() => {}
            event = events.next() => match event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    if handle_key(widget, key) == KeyOutcome::Quit {
                        break;
                    }
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e.into()),
                None => break,
            },
        }
    }

    if widget.is_pending() {
        debug!("Leaving the consultant with a pending consultation; its answer will be discarded");
    }

    Ok(())
}

/// Apply one key press to the widget.
pub fn handle_key(widget: &mut ConsultationWidget, key: KeyEvent) -> KeyOutcome {
    match key.code {
        KeyCode::Esc => return KeyOutcome::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            return KeyOutcome::Quit
        }
        KeyCode::Enter => {
            widget.submit();
        }
        KeyCode::Backspace => widget.pop_char(),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => widget.push_char(c),
        _ => {}
    }
    KeyOutcome::Continue
}
