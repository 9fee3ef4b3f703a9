use crate::tui::app::AppState;
use ratatui::prelude::*;
use ratatui::widgets::*;

use super::layout::{centered_rect, inner};

const TITLE_ART: [&str; 5] = [
    r" ____  _   _ __  __ __  __ __   __",
    r"|  _ \| | | |  \/  |  \/  |\ \ / /",
    r"| |_) | | | | |\/| | |\/| | \ V / ",
    r"|  _ <| |_| | |  | | |  | |  | |  ",
    r"|_| \_\\___/|_|  |_|_|  |_|  |_|  ",
];

pub(super) fn draw_menu(f: &mut Frame, app: &AppState) {
    let area = centered_rect(70, 80, f.area());
    f.render_widget(Clear, area);
    f.render_widget(Block::default().title("New table").borders(Borders::ALL), area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(TITLE_ART.len() as u16 + 1),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(inner(area));

    let art: Vec<Line> = TITLE_ART
        .iter()
        .map(|l| Line::styled(*l, Style::default().fg(Color::Green)))
        .collect();
    f.render_widget(Paragraph::new(art).alignment(Alignment::Center), rows[0]);

    let items: Vec<ListItem> = app.menu_items_display().into_iter().map(ListItem::new).collect();
    let list = List::new(items)
        .block(Block::default().title("Settings").borders(Borders::TOP))
        .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");
    let mut state = ListState::default().with_selected(Some(app.menu_index));
    f.render_stateful_widget(list, rows[1], &mut state);

    let dim = Style::default().add_modifier(Modifier::DIM);
    let footer = vec![
        Line::from("You are Player 1; the other seats draw and discard on their own."),
        Line::styled("Enter deal   Up/Down select   +/- change   Esc back   Q quit", dim),
    ];
    f.render_widget(Paragraph::new(footer).wrap(Wrap { trim: true }), rows[2]);
}
