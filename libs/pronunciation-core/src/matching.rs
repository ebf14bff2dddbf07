//! Edit distance between normalized phrases.

/// Calculate the Levenshtein distance between two strings.
///
/// Fills the full `(len(b) + 1) x (len(a) + 1)` table; inputs are bounded by a
/// lesson's expected phrase, so no row compaction or early exit is done.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    let m = a_chars.len();
    let n = b_chars.len();

    let mut table = vec![vec![0usize; m + 1]; n + 1];
    for (i, row) in table.iter_mut().enumerate() {
        row[0] = i;
    }
    for (j, cell) in table[0].iter_mut().enumerate() {
        *cell = j;
    }

    for i in 1..=n {
        for j in 1..=m {
            table[i][j] = if b_chars[i - 1] == a_chars[j - 1] {
                table[i - 1][j - 1]
            } else {
                1 + table[i - 1][j] // deletion
                    .min(table[i][j - 1]) // insertion
                    .min(table[i - 1][j - 1]) // substitution
            };
        }
    }

    table[n][m]
}
