use ratatui::layout::Constraint;
use ratatui::prelude::{Direction, Layout, Rect};
use std::rc::Rc;

/// Area inside a one-cell border.
pub(super) fn inner(area: Rect) -> Rect {
    Rect {
        x: area.x.saturating_add(1),
        y: area.y.saturating_add(1),
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    }
}

pub(super) fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let rows = split_percent(Direction::Vertical, percent_y, r);
    split_percent(Direction::Horizontal, percent_x, rows[1])[1]
}

fn split_percent(direction: Direction, percent: u16, r: Rect) -> Rc<[Rect]> {
    let margin = (100 - percent.min(100)) / 2;
    Layout::default()
        .direction(direction)
        .constraints([
            Constraint::Percentage(margin),
            Constraint::Percentage(percent),
            Constraint::Percentage(margin),
        ])
        .split(r)
}

/// `n` equal columns of at most `max_width` cells each, left-aligned.
pub(super) fn columns(area: Rect, n: usize, max_width: u16) -> Rc<[Rect]> {
    let n = n.max(1) as u16;
    let width = (area.width / n).min(max_width);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints((0..n).map(|_| Constraint::Length(width)).collect::<Vec<_>>())
        .split(area)
}
