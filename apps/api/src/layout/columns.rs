//! Column distribution for tag rows.
//!
//! Entries are sliced into contiguous chunks of `ceil(total / n)`: column 0 is
//! filled completely before column 1 starts. This is not round-robin, and the
//! trailing columns may be short or empty (10 entries over 4 columns gives
//! 3, 3, 3, 1).

/// Splits `entries` into exactly `columns` contiguous chunks.
pub fn chunk_columns<T: Clone>(entries: &[T], columns: usize) -> Vec<Vec<T>> {
    let columns = columns.max(1);
    let mut out: Vec<Vec<T>> = vec![Vec::new(); columns];
    if entries.is_empty() {
        return out;
    }

    let per_column = entries.len().div_ceil(columns);
    for (i, entry) in entries.iter().enumerate() {
        let col = i / per_column;
        if col < columns {
            out[col].push(entry.clone());
        }
    }
    out
}

/// Number of rows needed to render the chunked columns.
pub fn row_count<T>(columns: &[Vec<T>]) -> usize {
    columns.iter().map(Vec::len).max().unwrap_or(0)
}
