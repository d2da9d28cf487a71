#[cfg(test)]
#[path = "events_test.rs"]
mod tests;

use anyhow::Result;
use crossterm::event::Event as CrosstermEvent;
use crossterm::event::EventStream;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyModifiers;
use crossterm::event::MouseEventKind;
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio::time;
use tui_textarea::Input;

use crate::domain::models::Event;

/// Maps a terminal key press to an app event. Shift is only visible on the
/// raw crossterm event, so Enter is split here before tui-textarea sees it.
pub fn map_key_event(keyevent: KeyEvent) -> Option<Event> {
    if keyevent.kind == KeyEventKind::Release {
        return None;
    }

    let ctrl = keyevent.modifiers.contains(KeyModifiers::CONTROL);
    match keyevent.code {
        KeyCode::Enter => {
            if keyevent.modifiers.contains(KeyModifiers::SHIFT) {
                return Some(Event::KeyboardNewline());
            }
            return Some(Event::KeyboardEnter());
        }
        KeyCode::Tab => {
            return Some(Event::ScopeNext());
        }
        KeyCode::F(n @ 1..=4) => {
            return Some(Event::QuickPrompt(usize::from(n - 1)));
        }
        KeyCode::Down => {
            return Some(Event::UIScrollDown());
        }
        KeyCode::Up => {
            return Some(Event::UIScrollUp());
        }
        KeyCode::PageDown => {
            return Some(Event::UIScrollPageDown());
        }
        KeyCode::PageUp => {
            return Some(Event::UIScrollPageUp());
        }
        KeyCode::Char('d') if ctrl => {
            return Some(Event::UIScrollPageDown());
        }
        KeyCode::Char('u') if ctrl => {
            return Some(Event::UIScrollPageUp());
        }
        KeyCode::Char('c') if ctrl => {
            return Some(Event::KeyboardCTRLC());
        }
        _ => {
            return Some(Event::KeyboardCharInput(Input::from(keyevent)));
        }
    }
}

pub struct EventsService {
    crossterm_events: EventStream,
    events: mpsc::UnboundedReceiver<Event>,
}

impl EventsService {
    pub fn new(events: mpsc::UnboundedReceiver<Event>) -> EventsService {
        return EventsService {
            crossterm_events: EventStream::new(),
            events,
        };
    }

    fn handle_crossterm(&self, event: CrosstermEvent) -> Option<Event> {
        match event {
            CrosstermEvent::Paste(text) => {
                return Some(Event::KeyboardPaste(text));
            }
            CrosstermEvent::Mouse(mouseevent) => match mouseevent.kind {
                MouseEventKind::ScrollUp => {
                    return Some(Event::UIScrollUp());
                }
                MouseEventKind::ScrollDown => {
                    return Some(Event::UIScrollDown());
                }
                _ => {
                    return None;
                }
            },
            CrosstermEvent::Key(keyevent) => {
                return map_key_event(keyevent);
            }
            CrosstermEvent::Resize(_, _) => {
                return Some(Event::UITick());
            }
            _ => return None,
        }
    }

    pub async fn next(&mut self) -> Result<Event> {
        loop {
            let evt = tokio::select! {
                event = self.events.recv() => event,
                event = self.crossterm_events.next() => match event {
                    Some(Ok(input)) => self.handle_crossterm(input),
                    Some(Err(err)) => {
                        tracing::warn!(err = ?err, "Failed to read terminal event");
                        None
                    },
                    None => None
                },
                _ = time::sleep(time::Duration::from_millis(500)) => Some(Event::UITick())
            };

            if let Some(event) = evt {
                return Ok(event);
            }
        }
    }
}
