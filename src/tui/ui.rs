use crate::query::ResultView;
use crate::tui::app::App;
use crate::tui::navigation::Focus;
use crate::utils::html_to_text;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

/// Renderer handed to the navigation controller
pub fn render_result(view: &ResultView<'_>) -> ListItem<'static> {
    let mut title = vec![Span::styled(
        view.owner_name.to_string(),
        Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
    )];
    if let Some(member) = view.member_name {
        title.push(Span::styled(member.to_string(), Style::default().fg(Color::Yellow)));
    }
    title.push(Span::styled(
        format!("  {:.2}", view.score),
        Style::default().fg(Color::DarkGray),
    ));

    let mut lines = vec![Line::from(title)];
    if let Some(summary) = view.summary {
        lines.push(Line::from(Span::styled(
            format!("  {}", html_to_text(summary)),
            Style::default().fg(Color::Gray),
        )));
    }
    ListItem::new(lines)
}

pub fn draw(f: &mut Frame, app: &App<'_, ListItem<'static>>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Query input
            Constraint::Min(5),    // Results
            Constraint::Length(1), // Status bar
        ])
        .split(f.area());

    draw_query_input(f, app, chunks[0]);
    draw_results_list(f, app, chunks[1]);
    draw_status_bar(f, app, chunks[2]);
}

fn focused_border(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    }
}

fn draw_query_input(f: &mut Frame, app: &App<'_, ListItem<'static>>, area: Rect) {
    let focused = app.nav.focus() == Focus::Input;
    let input = Paragraph::new(app.query.as_str())
        .style(Style::default().fg(Color::Yellow))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(focused_border(focused))
                .title(" Search (Tab: results, Enter: open, Esc: leave) "),
        );

    f.render_widget(input, area);

    if focused {
        let width = app.query.chars().count() as u16;
        f.set_cursor_position((area.x + width + 1, area.y + 1));
    }
}

fn draw_results_list(f: &mut Frame, app: &App<'_, ListItem<'static>>, area: Rect) {
    let focused = app.nav.focus() == Focus::Results;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(focused_border(focused))
        .title(format!(" Results ({}) ", app.nav.results().len()));

    if app.nav.no_results() && !app.query.is_empty() {
        let empty = Paragraph::new("No results.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = app
        .nav
        .results()
        .iter()
        .map(|result| result.item.clone())
        .collect();

    let list = List::new(items).block(block).highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    );

    let mut state = ListState::default().with_selected(app.nav.cursor());
    f.render_stateful_widget(list, area, &mut state);
}

fn draw_status_bar(f: &mut Frame, app: &App<'_, ListItem<'static>>, area: Rect) {
    let status =
        Paragraph::new(app.status_message.as_str()).style(Style::default().fg(Color::Cyan));

    f.render_widget(status, area);
}
