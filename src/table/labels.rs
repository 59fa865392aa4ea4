/// Converts a 0-based column index to Excel-style column letters
/// using bijective base-26 encoding (0 -> "A", 25 -> "Z", 26 -> "AA").
pub fn column_letters(index: usize) -> String {
    let mut column = index as u32 + 1;
    let mut letters = String::new();
    while column > 0 {
        column -= 1;
        let digit = char::from_u32(65 + column % 26).expect("Hardcode letters");
        column /= 26;
        letters.insert(0, digit);
    }
    letters
}

/// Generates column labels for the first `count` columns: A, B, ..., Z, AA, AB, ...
pub fn column_labels(count: usize) -> Vec<String> {
    (0..count).map(column_letters).collect()
}

/// Generates 1-based row labels for the first `count` rows: "1", "2", ...
pub fn row_labels(count: usize) -> Vec<String> {
    (1..=count).map(|row| row.to_string()).collect()
}
