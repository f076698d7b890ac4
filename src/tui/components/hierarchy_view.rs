//! # Hierarchy View
//!
//! Left pane: the whole container tree as an indented outline, with the
//! visible screen highlighted. Right pane: the stack the visible screen
//! lives in, plus that screen's properties.
//!
//! Both panes render from a snapshot (`Arc<Hierarchy>`) taken once per frame,
//! so they never disagree with each other even while the router is busy.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, List, ListItem, Paragraph};

use crate::core::hierarchy::{Hierarchy, NodeKind, Relation, ScreenNode};
use crate::core::screen::ScreenId;
use crate::tui::component::Component;

pub struct HierarchyView<'a> {
    pub hierarchy: &'a Hierarchy,
    pub visible: Option<ScreenId>,
}

impl<'a> HierarchyView<'a> {
    pub fn new(hierarchy: &'a Hierarchy, visible: Option<ScreenId>) -> Self {
        Self { hierarchy, visible }
    }
}

/// One outline row per installed screen, root first.
pub fn outline_lines(hierarchy: &Hierarchy, visible: Option<ScreenId>) -> Vec<String> {
    hierarchy
        .outline()
        .into_iter()
        .map(|(depth, node, relation)| {
            let marker = if Some(node.id) == visible { "▶ " } else { "  " };
            format!(
                "{marker}{}{}{}{}",
                "  ".repeat(depth),
                relation_prefix(relation),
                node.type_name,
                flags(node)
            )
        })
        .collect()
}

fn relation_prefix(relation: Relation) -> &'static str {
    match relation {
        Relation::Root | Relation::StackEntry => "",
        Relation::Tab { selected: true } => "[tab*] ",
        Relation::Tab { selected: false } => "[tab] ",
        Relation::Presented => "[modal] ",
    }
}

fn flags(node: &ScreenNode) -> String {
    let mut flags = String::new();
    match &node.kind {
        NodeKind::Stack(stack) => flags.push_str(&format!(" ({} deep)", stack.len())),
        NodeKind::Tabs { children, .. } => flags.push_str(&format!(" ({} tabs)", children.len())),
        NodeKind::Leaf => {}
    }
    if node.anchor {
        flags.push_str(" ⚓");
    }
    flags
}

/// Active stack (root first) and the visible screen's properties.
pub fn detail_lines(hierarchy: &Hierarchy, visible: Option<ScreenId>) -> Vec<String> {
    let Some(visible) = visible else {
        return vec!["nothing on display".to_string()];
    };
    let mut lines = Vec::new();
    match hierarchy.containing_stack(visible) {
        Some(stack_id) => {
            let names = hierarchy.stack_names(stack_id);
            lines.push(format!("stack: {}", names.join(" › ")));
        }
        None => lines.push("stack: none (pop is a no-op)".to_string()),
    }
    if let Some(modal) = hierarchy.modal_layer(visible) {
        let name = hierarchy.type_name(modal).unwrap_or("?");
        lines.push(format!("modal: {name} (d dismisses)"));
    }
    if let Some(node) = hierarchy.get(visible) {
        lines.push(format!("visible: {} [{}]", node.type_name, node.id));
        for (key, value) in node.properties.iter() {
            lines.push(format!("  {key} = {value}"));
        }
    }
    lines
}

impl Component for HierarchyView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [tree_area, detail_area] =
            Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)]).areas(area);

        let items: Vec<ListItem> = outline_lines(self.hierarchy, self.visible)
            .into_iter()
            .map(|line| {
                let style = if line.starts_with('▶') {
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                ListItem::new(Line::from(Span::styled(line, style)))
            })
            .collect();
        frame.render_widget(List::new(items).block(Block::bordered().title("Hierarchy")), tree_area);

        let detail: Vec<Line> = detail_lines(self.hierarchy, self.visible)
            .into_iter()
            .map(Line::from)
            .collect();
        frame.render_widget(
            Paragraph::new(detail).block(Block::bordered().title("Visible")),
            detail_area,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::locator::find_visible_screen;
    use crate::core::screen::Screen;
    use crate::test_support::{anchored_abcd, nav_of};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_outline_highlights_visible_and_anchor() {
        let (hierarchy, _) = anchored_abcd();
        let visible = find_visible_screen(&hierarchy);

        let lines = outline_lines(&hierarchy, visible);

        assert_eq!(lines.len(), 5);
        assert!(lines[0].contains("Nav (4 deep)"));
        assert!(lines[2].ends_with("B ⚓"));
        assert!(lines[4].starts_with('▶'));
        assert!(lines[4].ends_with('D'));
    }

    #[test]
    fn test_outline_marks_tabs() {
        let tabs = Screen::tabs("Tabs", vec![nav_of(&["Feed"]), nav_of(&["Me"])], 0);
        let hierarchy = crate::core::Hierarchy::with_root(tabs);

        let lines = outline_lines(&hierarchy, find_visible_screen(&hierarchy));

        assert!(lines.iter().any(|line| line.contains("[tab*] Nav")));
        assert!(lines.iter().any(|line| line.contains("[tab] Nav")));
    }

    #[test]
    fn test_detail_lines_for_stackless_screen() {
        let hierarchy = crate::core::Hierarchy::with_root(Screen::new("Splash"));
        let lines = detail_lines(&hierarchy, hierarchy.root());
        assert_eq!(lines[0], "stack: none (pop is a no-op)");
    }

    #[test]
    fn test_detail_lines_without_visible() {
        let hierarchy = crate::core::Hierarchy::new();
        assert_eq!(detail_lines(&hierarchy, None), ["nothing on display"]);
    }

    #[test]
    fn test_renders_both_panes() {
        let (hierarchy, _) = anchored_abcd();
        let visible = find_visible_screen(&hierarchy);
        let backend = TestBackend::new(100, 12);
        let mut terminal = Terminal::new(backend).unwrap();

        terminal
            .draw(|f| HierarchyView::new(&hierarchy, visible).render(f, f.area()))
            .unwrap();

        let text = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>();
        assert!(text.contains("Hierarchy"));
        assert!(text.contains("Visible"));
        assert!(text.contains("stack: A › B › C › D"));
    }
}
