use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;

use crate::core::app::AppContext;
use crate::core::hierarchy::Hierarchy;
use crate::core::locator::find_visible_screen;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{HierarchyView, TitleBar};

const HELP: &str = "p push · P push anchored · m modal · b back · r root · a anchor · n named · \
                    d dismiss · Tab next tab · x toggle anchor · i instant · q quit";

pub fn draw_ui(frame: &mut Frame, app: &AppContext, hierarchy: &Hierarchy, tui: &TuiState) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Min(0), Length(1)]);
    let [title_area, main_area, help_area] = layout.areas(frame.area());

    let mut title_bar = TitleBar::new(app.label(), tui.status_message.clone(), tui.animated);
    title_bar.render(frame, title_area);

    let visible = find_visible_screen(hierarchy);
    HierarchyView::new(hierarchy, visible).render(frame, main_area);

    frame.render_widget(
        Span::styled(HELP, Style::default().add_modifier(Modifier::DIM)),
        help_area,
    );
}
