//! Plain-text views of cards for console output. Nothing here mutates state.

use crate::cards::Card;

/// `[HA] [S7] ...` for every card, in order.
pub fn deck_line(cards: &[Card]) -> String {
    cards.iter().map(|c| format!("[{}]", c.code())).collect::<Vec<_>>().join(" ")
}

/// `[1: HA] [2: S7] ...` with the 1-based positions used for discards.
pub fn hand_line(cards: &[Card]) -> String {
    cards
        .iter()
        .enumerate()
        .map(|(i, c)| format!("[{}: {}]", i + 1, c.code()))
        .collect::<Vec<_>>()
        .join(" ")
}

const CARD_HEIGHT: usize = 6;

fn card_rows(card: Card) -> [String; CARD_HEIGHT] {
    [
        " _________ ".to_string(),
        "|         |".to_string(),
        format!("|    {}    |", card.rank().to_char()),
        format!("|    {}    |", card.suit().to_char()),
        "|         |".to_string(),
        "|_________|".to_string(),
    ]
}

/// One ASCII block per card, stacked vertically.
pub fn ascii_cards(cards: &[Card]) -> String {
    ascii_cards_wide(cards, 1)
}

/// The same blocks laid side by side, `per_row` cards per band.
pub fn ascii_cards_wide(cards: &[Card], per_row: usize) -> String {
    let per_row = per_row.max(1);
    let mut out = String::new();
    for chunk in cards.chunks(per_row) {
        let blocks: Vec<[String; CARD_HEIGHT]> = chunk.iter().map(|&c| card_rows(c)).collect();
        for line in 0..CARD_HEIGHT {
            let row: Vec<&str> = blocks.iter().map(|b| b[line].as_str()).collect();
            out.push_str(row.join(" ").trim_end());
            out.push('\n');
        }
    }
    out
}
