use super::{
    csv::Row,
    models::Card,
};

// Candidate order matters: the first matching cell in the header row wins.
pub const FRONT_HEADERS: &[&str] = &["front", "term", "question", "prompt", "word", "italian", "a"];
pub const BACK_HEADERS: &[&str] =
    &["back", "definition", "answer", "response", "meaning", "english", "b"];

pub fn is_front_header(value: &str) -> bool {
    FRONT_HEADERS.contains(&value)
}

pub fn is_back_header(value: &str) -> bool {
    BACK_HEADERS.contains(&value)
}

/// True for any member of the recognized header vocabulary. Expects a lower-cased value.
pub fn is_recognized_header(value: &str) -> bool {
    is_front_header(value) || is_back_header(value)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    pub front: usize,
    pub back: usize,
    pub has_header: bool,
}

impl ColumnLayout {
    pub fn infer(first_row: &[String]) -> Self {
        let header: Vec<String> = first_row.iter().map(|cell| cell.to_lowercase()).collect();

        let front = header.iter().position(|value| is_front_header(value)).unwrap_or(0);
        let back = match header.iter().position(|value| is_back_header(value)) {
            Some(index) if index != front => index,
            _ => {
                if front == 0 {
                    1
                } else {
                    0
                }
            }
        };
        let has_header = header.iter().any(|value| is_recognized_header(value));

        Self { front, back, has_header }
    }

    fn data_start(&self) -> usize {
        if self.has_header {
            1
        } else {
            0
        }
    }
}

/// Turns tokenized rows into cards, sniffing a header row when one is present.
pub fn infer_cards(rows: &[Row]) -> Vec<Card> {
    let Some(first_row) = rows.first() else {
        return Vec::new();
    };

    let layout = ColumnLayout::infer(first_row);

    rows.iter()
        .skip(layout.data_start())
        .filter_map(|row| {
            let front = cell_at(row, layout.front);
            let back = cell_at(row, layout.back);
            if front.is_empty() || back.is_empty() {
                None
            } else {
                Some(Card::new(front, back))
            }
        })
        .collect()
}

fn cell_at(row: &[String], index: usize) -> &str {
    row.get(index).map(|cell| cell.trim()).unwrap_or("")
}
