//! # TitleBar Component
//!
//! Top line showing the app label and the last status message.
//!
//! Purely presentational: it receives all data as props and has no
//! internal state.
//!
//! 1. **Status message**: `"Wayfinder | wayfinder v0.1.0 | settled: push Detail"`
//! 2. **Default**: `"Wayfinder | wayfinder v0.1.0"`

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Span;

pub struct TitleBar {
    /// App label (e.g. "wayfinder v0.1.0 (debug)")
    pub app_label: String,
    /// Status message (e.g. "settled: pop to Root")
    pub status_message: String,
    /// Whether the next request is animated
    pub animated: bool,
}

impl TitleBar {
    pub fn new(app_label: String, status_message: String, animated: bool) -> Self {
        Self {
            app_label,
            status_message,
            animated,
        }
    }

    pub fn text(&self) -> String {
        let mode = if self.animated { "" } else { " [instant]" };
        if self.status_message.is_empty() {
            format!("Wayfinder | {}{mode}", self.app_label)
        } else {
            format!(
                "Wayfinder | {}{mode} | {}",
                self.app_label, self.status_message
            )
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Span::raw(self.text()), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn rendered(title_bar: &mut TitleBar) -> String {
        let backend = TestBackend::new(80, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                title_bar.render(f, f.area());
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_title_bar_with_status_message() {
        let mut title_bar = TitleBar::new(
            "movies v1.0.0".to_string(),
            "settled: push Detail".to_string(),
            true,
        );
        let text = rendered(&mut title_bar);

        assert!(text.contains("Wayfinder"));
        assert!(text.contains("movies v1.0.0"));
        assert!(text.contains("settled: push Detail"));
        assert!(!text.contains("[instant]"));
    }

    #[test]
    fn test_title_bar_default_no_status() {
        let mut title_bar = TitleBar::new("movies v1.0.0".to_string(), String::new(), true);
        let text = rendered(&mut title_bar);

        assert!(text.contains("movies v1.0.0"));
        assert_eq!(text.matches('|').count(), 1);
    }

    #[test]
    fn test_title_bar_marks_instant_mode() {
        let title_bar = TitleBar::new("movies".to_string(), String::new(), false);
        assert_eq!(title_bar.text(), "Wayfinder | movies [instant]");
    }
}
