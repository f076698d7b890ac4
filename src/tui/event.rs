use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};

/// Explorer input events, one per router operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TuiEvent {
    Quit,
    Push,
    PushAnchored,
    Present,
    PopPrevious,
    PopRoot,
    PopAnchor,
    PopNamed,
    Dismiss,
    NextTab,
    ToggleAnchor,
    ToggleAnimated,
    Resize,
}

/// Poll for an event, waiting up to `timeout`
pub fn poll_event_timeout(timeout: Duration) -> io::Result<Option<TuiEvent>> {
    if !event::poll(timeout)? {
        return Ok(None);
    }
    Ok(match event::read()? {
        Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
            log::debug!("Key event: {:?} with modifiers {:?}", key_event.code, key_event.modifiers);
            map_key(key_event.modifiers, key_event.code)
        }
        Event::Resize(_, _) => Some(TuiEvent::Resize),
        _ => None,
    })
}

pub fn map_key(modifiers: KeyModifiers, code: KeyCode) -> Option<TuiEvent> {
    match (modifiers, code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(TuiEvent::Quit),
        (_, KeyCode::Esc | KeyCode::Char('q')) => Some(TuiEvent::Quit),
        (_, KeyCode::Char('p')) => Some(TuiEvent::Push),
        (_, KeyCode::Char('P')) => Some(TuiEvent::PushAnchored),
        (_, KeyCode::Char('m')) => Some(TuiEvent::Present),
        (_, KeyCode::Char('b') | KeyCode::Backspace) => Some(TuiEvent::PopPrevious),
        (_, KeyCode::Char('r')) => Some(TuiEvent::PopRoot),
        (_, KeyCode::Char('a')) => Some(TuiEvent::PopAnchor),
        (_, KeyCode::Char('n')) => Some(TuiEvent::PopNamed),
        (_, KeyCode::Char('d')) => Some(TuiEvent::Dismiss),
        (_, KeyCode::Tab) => Some(TuiEvent::NextTab),
        (_, KeyCode::Char('x')) => Some(TuiEvent::ToggleAnchor),
        (_, KeyCode::Char('i')) => Some(TuiEvent::ToggleAnimated),
        _ => None,
    }
}
