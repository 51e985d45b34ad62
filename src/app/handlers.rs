//! Keyboard and mouse handling.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};

use super::{App, DetailState};

impl App {
    /// Handle a key press.
    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => self.quit(),
            KeyCode::Char('q') => self.quit(),
            KeyCode::Esc => {
                if self.detail == DetailState::Hidden {
                    self.quit();
                } else {
                    self.close_detail();
                }
            }
            KeyCode::Char('j') | KeyCode::Down => self.move_selection(1),
            KeyCode::Char('k') | KeyCode::Up => self.move_selection(-1),
            KeyCode::PageDown => self.page_down(),
            KeyCode::PageUp => self.page_up(),
            KeyCode::Char('s') => self.cycle_status_filter(),
            KeyCode::Char('c') => self.clear_filters(),
            KeyCode::Char('r') => {
                self.retry();
            }
            KeyCode::Enter => self.open_detail(),
            _ => {}
        }
    }

    /// Handle a mouse event. Only the wheel is used.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::ScrollDown => self.move_selection(1),
            MouseEventKind::ScrollUp => self.move_selection(-1),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ItineraryFilters, VoyageClient};
    use crate::config::AppConfig;
    use crate::models::ItineraryStatus;
    use crossterm::event::{KeyEventKind, KeyEventState};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn app() -> App {
        let client = VoyageClient::new("http://127.0.0.1:59999");
        App::with_client(&AppConfig::default(), client, ItineraryFilters::new())
    }

    #[tokio::test]
    async fn test_quit_keys() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('q')));
        assert!(app.should_quit);

        let mut app = self::app();
        app.handle_key(key(KeyCode::Esc));
        assert!(app.should_quit);
    }

    #[tokio::test]
    async fn test_esc_closes_detail_first() {
        let mut app = app();
        app.detail = DetailState::Loading { id: 3 };
        app.handle_key(key(KeyCode::Esc));
        assert!(!app.should_quit);
        assert_eq!(app.detail, DetailState::Hidden);
    }

    #[tokio::test]
    async fn test_filter_keys() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('s')));
        assert_eq!(app.filters.status, Some(ItineraryStatus::Scheduled));
        assert!(app.list.is_loading());

        app.handle_key(key(KeyCode::Char('c')));
        assert!(app.filters.is_empty());
        assert_eq!(app.list.epoch(), 2);
    }
}
