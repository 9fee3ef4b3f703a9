use crate::agents::AgentKind;
use crate::cards::{Card, Suit};
use crate::engine::GameEngine;
use crate::game::{Phase, TurnRecord};
use crate::player::Player;
use crate::tui::app::{AppState, HUMAN_SEAT};
use ratatui::prelude::*;
use ratatui::widgets::*;

use super::layout::{centered_rect, columns, inner};

const CARD_WIDTH: u16 = 7;

pub(super) fn draw_table(f: &mut Frame, app: &AppState) {
    let size = f.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // header
            Constraint::Length(7), // seats
            Constraint::Min(7),    // hand
            Constraint::Length(4), // status bar
        ])
        .split(size);

    draw_header(f, chunks[0], app);
    draw_seats(f, chunks[1], app);
    draw_hand(f, chunks[2], app);
    draw_status(f, chunks[3], app);

    if app.help_open() {
        draw_help(f);
    } else if app.history_open() {
        draw_history(f, app);
    } else if app.game_started && app.game.is_game_over() {
        draw_report(f, app);
    }
}

fn draw_header(f: &mut Frame, area: Rect, app: &AppState) {
    let game = &app.game;
    let limit = match game.hand_limit() {
        Some(n) => n.to_string(),
        None => "off".to_string(),
    };
    let seed = app.seed().map(|s| format!("  Seed: {s}")).unwrap_or_default();
    let lines = vec![
        Line::from(format!(
            "Deck: {} left   Turn: {}   To act: Player {}",
            game.deck_len(),
            game.turns() + 1,
            game.current() + 1
        )),
        Line::from(format!("Hand limit: {limit}{seed}")),
    ];
    let header = Paragraph::new(lines).block(Block::default().title("rummy-rs").borders(Borders::ALL));
    f.render_widget(header, area);
}

fn draw_seats(f: &mut Frame, area: Rect, app: &AppState) {
    let players = app.game.players();
    let cols = columns(area, players.len(), area.width);
    for (idx, p) in players.iter().enumerate() {
        render_seat(f, cols[idx], app, idx, p);
    }
}

fn render_seat(f: &mut Frame, area: Rect, app: &AppState, idx: usize, p: &Player) {
    let mut title = format!("P{}", idx + 1);
    match app.agents.agent_kind(idx) {
        Some(AgentKind::Human) => title.push_str(" [You]"),
        Some(AgentKind::Bot) => title.push_str(" [Bot]"),
        _ => {}
    }
    let over = app.game.is_game_over();
    let acting = !over && idx == app.game.current();
    if acting {
        title.push_str(" [Act]");
    }
    let mut block = Block::default().title(title).borders(Borders::ALL);
    if over && app.game_started && app.game.report().winner == idx {
        block = block.border_style(Style::default().fg(Color::Green));
    } else if acting {
        block = block.border_style(Style::default().fg(Color::Yellow));
    }
    let dim = Style::default().add_modifier(Modifier::DIM);
    let top_discard = match p.discard_pile().last() {
        Some(&c) => card_span(c),
        None => Span::styled("--", dim),
    };
    let score = if over || idx == HUMAN_SEAT {
        Span::raw(p.score().to_string())
    } else {
        Span::styled("?", dim)
    };
    let lines = vec![
        Line::from(format!("Cards: {}", p.hand().len())),
        Line::from(format!("Melds: {}", p.melds().len())),
        Line::from(vec![
            Span::raw(format!("Discards: {}  top ", p.discard_pile().len())),
            top_discard,
        ]),
        Line::from(vec![Span::raw("Score: "), score]),
    ];
    f.render_widget(block, area);
    f.render_widget(Paragraph::new(lines), inner(area));
}

fn draw_hand(f: &mut Frame, area: Rect, app: &AppState) {
    let hand = app.game.hand(HUMAN_SEAT);
    let title = format!("Your hand ({} cards)", hand.len());
    let block = Block::default().title(title).borders(Borders::ALL);
    let hand_inner = inner(area);
    f.render_widget(block, area);
    if hand.is_empty() {
        return;
    }
    let cards_area = Rect { height: hand_inner.height.min(5), ..hand_inner };
    let slots = columns(cards_area, hand.len(), CARD_WIDTH);
    let selected = app.index_entry_text().parse::<usize>().ok();
    let drawn = last_drawn(app);
    for (i, &card) in hand.iter().enumerate() {
        let border = if selected == Some(i + 1) {
            Some(Color::Magenta)
        } else if drawn == Some(card) && i + 1 == hand.len() {
            Some(Color::Yellow)
        } else {
            None
        };
        render_card_widget(f, slots[i], i + 1, card, border);
    }
}

// The card the human just drew while a discard is still owed.
fn last_drawn(app: &AppState) -> Option<Card> {
    if app.game.phase() == Phase::AwaitingDiscard && app.game.current() == HUMAN_SEAT {
        return app.game.hand(HUMAN_SEAT).last().copied();
    }
    None
}

fn draw_status(f: &mut Frame, area: Rect, app: &AppState) {
    f.render_widget(Block::default().borders(Borders::ALL).title("Status"), area);
    let status_inner = inner(area);
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(status_inner);

    let mut left: Vec<Line> = Vec::new();
    if !app.game_started {
        left.push(Line::from("Press Space to deal."));
    } else if app.game.is_game_over() {
        left.push(Line::from("Game over. Space: new game"));
    } else if app.index_entry_active() {
        let len = app.game.hand(HUMAN_SEAT).len();
        left.push(Line::from(format!(
            "Discard which card (1-{len})? {}_",
            app.index_entry_text()
        )));
    } else if app.game.current() == HUMAN_SEAT {
        left.push(Line::from("Your turn: D draw, X discard"));
    } else {
        left.push(Line::from(format!("Player {} is playing...", app.game.current() + 1)));
    }
    if let Some(err) = app.index_entry_error().or(app.action_error()) {
        left.push(Line::from(Span::styled(err.to_string(), Style::default().fg(Color::Red))));
    } else if let Some(rec) = app.game.history_recent(1).first() {
        left.push(Line::from(history_line(rec)));
    }
    f.render_widget(Paragraph::new(left), cols[0]);

    let keys = vec![
        Line::from(Span::styled(
            "D draw  X discard  Enter confirm",
            Style::default().add_modifier(Modifier::DIM),
        )),
        Line::from(Span::styled(
            "H history  M menu  ? help  Q quit",
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];
    f.render_widget(Paragraph::new(keys).alignment(Alignment::Right), cols[1]);
}

fn history_line(rec: &TurnRecord) -> String {
    let mut parts = vec![format!("#{} P{}", rec.turn + 1, rec.seat + 1)];
    if let Some(c) = rec.drawn {
        parts.push(format!("drew {}", c.code()));
    }
    if let Some(c) = rec.discarded {
        parts.push(format!("discarded {}", c.code()));
    }
    if rec.drawn.is_none() && rec.discarded.is_none() {
        parts.push("passed".to_string());
    }
    parts.join(" ")
}

fn draw_history(f: &mut Frame, app: &AppState) {
    let area = centered_rect(60, 80, f.area());
    let block = Block::default().title("History").borders(Borders::ALL);
    let entries = app.game.history_recent(AppState::HISTORY_PAGE_SIZE);
    let mut lines: Vec<Line> = if entries.is_empty() {
        vec![Line::from("No turns yet.")]
    } else {
        entries.iter().map(|r| Line::from(history_line(r))).collect()
    };
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Close: H or Esc",
        Style::default().add_modifier(Modifier::DIM),
    )));
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner(area));
}

fn draw_report(f: &mut Frame, app: &AppState) {
    let area = centered_rect(50, 50, f.area());
    let report = app.game.report();
    let block = Block::default()
        .title("Game over")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));
    let mut lines: Vec<Line> = report.to_string().lines().map(|l| Line::from(l.to_string())).collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Space: new game  M: menu  Q: quit",
        Style::default().add_modifier(Modifier::DIM),
    )));
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner(area));
}

fn draw_help(f: &mut Frame) {
    let area = centered_rect(60, 70, f.area());
    let block = Block::default().title("Help").borders(Borders::ALL);
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let lines = vec![
        Line::from(Span::styled("Table:", bold)),
        Line::from("- Space: deal / new game"),
        Line::from("- D: draw a card"),
        Line::from("- X: discard without drawing"),
        Line::from("- H: history"),
        Line::from(""),
        Line::from(Span::styled("Discard:", bold)),
        Line::from("- 0-9: card number"),
        Line::from("- Backspace: delete digit"),
        Line::from("- Enter: confirm"),
        Line::from("- Esc: clear"),
        Line::from(""),
        Line::from(Span::styled("Menu:", bold)),
        Line::from("- M: open / close menu"),
        Line::from("- Up / Down: move selection"),
        Line::from("- + / -: adjust value"),
        Line::from("- Enter: apply and deal"),
        Line::from("- Q: quit"),
        Line::from(""),
        Line::from("Lowest score when the deck runs out wins."),
        Line::from("Close help: ? or Esc"),
    ];
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner(area));
}

fn suit_glyph_and_style(s: Suit) -> (char, Style) {
    match s {
        Suit::Hearts => ('♥', Style::default().fg(Color::Red)),
        Suit::Diamonds => ('♦', Style::default().fg(Color::Red)),
        Suit::Spades => ('♠', Style::default().fg(Color::White)),
        Suit::Clubs => ('♣', Style::default().fg(Color::White)),
    }
}

fn card_span(c: Card) -> Span<'static> {
    let (glyph, style) = suit_glyph_and_style(c.suit());
    Span::styled(format!("{}{}", c.rank(), glyph), style)
}

fn render_card_widget(f: &mut Frame, area: Rect, index: usize, card: Card, border: Option<Color>) {
    let mut block = Block::default()
        .borders(Borders::ALL)
        .title(index.to_string())
        .title_alignment(Alignment::Center);
    if let Some(color) = border {
        block = block.border_style(Style::default().fg(color));
    }
    let card_inner = inner(area);
    f.render_widget(block, area);
    let para = Paragraph::new(Line::from(card_span(card))).alignment(Alignment::Center);
    f.render_widget(para, card_inner);
}
