use rogue_core::Cell;

/// Manhattan (L1) distance between two cells.
#[inline]
pub fn manhattan(a: Cell, b: Cell) -> i32 {
    a.distance(b)
}

/// Depth bound of the fallback explorer for a `rows × cols` map:
/// `floor(sqrt(rows * cols) / 2)`.
pub fn depth_limit(rows: i32, cols: i32) -> usize {
    let area = (rows.max(0) as f64) * (cols.max(0) as f64);
    (area.sqrt() / 2.0).floor() as usize
}
