//! A1-notation helpers for addressing grid cells.

/// Converts a 1-based column index to its A1 letter form
/// (1 → `"A"`, 26 → `"Z"`, 27 → `"AA"`).
#[must_use]
pub fn column_letter(mut col: u32) -> String {
    let mut letters = String::new();
    while col > 0 {
        let rem = (col - 1) % 26;
        col = (col - 1) / 26;
        let letter = char::from(b'A' + u8::try_from(rem).unwrap_or(0));
        letters.insert(0, letter);
    }
    letters
}

/// `"{sheet}!{col}{row}"` for a single cell.
#[must_use]
pub fn cell_range(sheet: &str, col: u32, row: u32) -> String {
    format!("{sheet}!{}{row}", column_letter(col))
}

/// `"{sheet}!{col}{start}:{col}{end}"` for a vertical block in one column.
#[must_use]
pub fn column_block_range(sheet: &str, col: u32, start_row: u32, end_row: u32) -> String {
    let letter = column_letter(col);
    format!("{sheet}!{letter}{start_row}:{letter}{end_row}")
}
