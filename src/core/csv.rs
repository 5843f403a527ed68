pub type Row = Vec<String>;

/// Splits delimited text into rows of trimmed cells.
///
/// Quotes toggle a literal section in which commas and line breaks are kept, `""` inside a
/// quoted section is an escaped quote, and an unterminated quote simply runs to the end of the
/// input. Rows whose cells are all empty after trimming are dropped.
pub fn parse_rows(text: &str) -> Vec<Row> {
    let mut rows = Vec::new();
    let mut row: Row = Vec::new();
    let mut cell = String::new();
    let mut in_quotes = false;

    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '"' => {
                if in_quotes && chars.peek() == Some(&'"') {
                    cell.push('"');
                    chars.next();
                } else {
                    in_quotes = !in_quotes;
                }
            }
            ',' if !in_quotes => {
                row.push(cell.trim().to_string());
                cell.clear();
            }
            '\n' | '\r' if !in_quotes => {
                if c == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                row.push(cell.trim().to_string());
                cell.clear();
                push_row(&mut rows, std::mem::take(&mut row));
            }
            _ => cell.push(c),
        }
    }

    if !cell.is_empty() || !row.is_empty() {
        row.push(cell.trim().to_string());
        push_row(&mut rows, row);
    }

    rows
}

fn push_row(rows: &mut Vec<Row>, row: Row) {
    if row.iter().any(|cell| !cell.is_empty()) {
        rows.push(row);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote(value: &str) -> String {
        format!("\"{}\"", value.replace('"', "\"\""))
    }

    #[test]
    fn test_simple_rows() {
        let rows = parse_rows("front,back\ndog, canine \n");
        assert_eq!(rows, vec![vec!["front", "back"], vec!["dog", "canine"]]);
    }

    #[test]
    fn test_all_line_endings() {
        let rows = parse_rows("a,b\r\nc,d\re,f\ng,h");
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[1], vec!["c", "d"]);
        assert_eq!(rows[3], vec!["g", "h"]);
    }

    #[test]
    fn test_blank_lines_are_dropped() {
        let rows = parse_rows("\n\na,b\n , \n\r\nc,d\n\n");
        assert_eq!(rows, vec![vec!["a", "b"], vec!["c", "d"]]);
    }

    #[test]
    fn test_quoted_cells_keep_literals() {
        for literal in ["one, two", "line\nbreak", "say \"hi\"", "crlf\r\ninside"] {
            let text = format!("{},tail", quote(literal));
            let rows = parse_rows(&text);
            assert_eq!(rows, vec![vec![literal.to_string(), "tail".to_string()]], "{literal:?}");
        }
    }

    #[test]
    fn test_unterminated_quote_runs_to_end() {
        let rows = parse_rows("a,\"open cell,\nstill open");
        assert_eq!(rows, vec![vec!["a", "open cell,\nstill open"]]);
    }

    #[test]
    fn test_degenerate_inputs() {
        assert!(parse_rows("").is_empty());
        assert!(parse_rows("\"").is_empty());
        assert!(parse_rows(",,,\n").is_empty());
    }

    #[test]
    fn test_trailing_comma_keeps_empty_cell() {
        let rows = parse_rows("a,");
        assert_eq!(rows, vec![vec!["a", ""]]);
    }
}
