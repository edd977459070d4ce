use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::session::Session;
use crate::view::ViewModel;

/// What the event loop should do after handling an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// Top level controller: routes keys and ticks into the [`Session`]
#[derive(Debug)]
pub struct App {
    pub session: Session,
}

impl App {
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    /// Whether the periodic tick should be running
    pub fn ticking(&self) -> bool {
        self.session.is_active()
    }

    pub fn on_tick(&mut self, now: Instant) {
        self.session.tick(now);
    }

    pub fn view(&self) -> ViewModel {
        ViewModel::from_state(self.session.state())
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> Control {
        if key.kind != KeyEventKind::Press {
            return Control::Continue;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => return Control::Quit,
            KeyCode::Char('c') if ctrl => return Control::Quit,
            KeyCode::Char('t') | KeyCode::Char('T') if ctrl => {
                self.session.handle_theme_cycle();
                return Control::Continue;
            }
            _ => {}
        }

        if self.session.state().is_finished {
            if key.code == KeyCode::Enter {
                self.session.handle_reset(now);
            }
            return Control::Continue;
        }

        match key.code {
            KeyCode::Backspace | KeyCode::Delete => {
                self.session.handle_backspace();
            }
            KeyCode::Char(c) if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) => {
                self.session.handle_character(c, now);
            }
            _ => {}
        }

        Control::Continue
    }
}
