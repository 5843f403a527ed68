use super::{
    columns::is_recognized_header,
    csv::parse_rows,
};

const GENERIC_HEADERS: &[&str] = &["front", "back", "a", "b"];

/// Builds a display name for a tab from its header row, e.g. `Italian / English`.
///
/// Returns `None` when the first row is not a recognized header or only carries generic labels,
/// in which case the caller picks its own name.
pub fn suggest_deck_name(csv_text: &str) -> Option<String> {
    let rows = parse_rows(csv_text);
    let header = rows.first()?;

    if !header.iter().any(|cell| is_recognized_header(&cell.to_lowercase())) {
        return None;
    }

    let parts: Vec<String> = header
        .iter()
        .filter(|cell| !cell.is_empty())
        .filter(|cell| !GENERIC_HEADERS.contains(&cell.to_lowercase().as_str()))
        .map(|cell| title_case(cell))
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" / "))
    }
}

fn title_case(value: &str) -> String {
    value
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => {
                    first.to_uppercase().collect::<String>()
                        + chars.as_str().to_lowercase().as_str()
                }
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Ordinal name used when neither the header nor discovery offers one.
pub fn ordinal_deck_name(position: usize) -> String {
    format!("Deck {}", position)
}
