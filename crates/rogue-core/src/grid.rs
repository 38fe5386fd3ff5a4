//! A fixed-size terrain grid addressed by [`Cell`].

use crate::error::GridError;
use crate::geom::{Cell, Range};
use crate::terrain::TerrainKind;

/// Largest side length accepted by the constructors.
pub const MAX_SIDE: usize = 1 << 15;

/// A rectangular grid of [`TerrainKind`] values, stored row-major.
///
/// The grid is read-only to the searches; the caller owns it for the
/// duration of a planning call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerrainGrid {
    tiles: Vec<TerrainKind>,
    bounds: Range,
}

impl TerrainGrid {
    /// Create a grid of `rows × cols` cells, all [`TerrainKind::Unknown`].
    pub fn new(rows: usize, cols: usize) -> Result<Self, GridError> {
        check_dims(rows, cols)?;
        Ok(Self {
            tiles: vec![TerrainKind::Unknown; rows * cols],
            bounds: Range::sized(rows as i32, cols as i32),
        })
    }

    /// Build a grid from rows of tiles. Every row must have the same length.
    pub fn from_rows<R>(rows: &[R]) -> Result<Self, GridError>
    where
        R: AsRef<[TerrainKind]>,
    {
        let cols = rows.first().map_or(0, |r| r.as_ref().len());
        check_dims(rows.len(), cols)?;
        let mut tiles = Vec::with_capacity(rows.len() * cols);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(GridError::NonRectangular {
                    row: i,
                    expected: cols,
                    found: row.len(),
                });
            }
            tiles.extend_from_slice(row);
        }
        Ok(Self {
            tiles,
            bounds: Range::sized(rows.len() as i32, cols as i32),
        })
    }

    /// Parse a grid from whitespace-separated rows of tile letters, e.g.
    /// `"PPP PMP SSS"` or one row per line.
    pub fn parse(s: &str) -> Result<Self, GridError> {
        let mut rows = Vec::new();
        for (r, word) in s.split_whitespace().enumerate() {
            let mut row = Vec::with_capacity(word.len());
            for (c, ch) in word.chars().enumerate() {
                let tile =
                    TerrainKind::from_char(ch).ok_or(GridError::InvalidTile { ch, row: r, col: c })?;
                row.push(tile);
            }
            rows.push(row);
        }
        Self::from_rows(&rows)
    }

    /// The bounding range of the grid.
    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> i32 {
        self.bounds.rows()
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> i32 {
        self.bounds.cols()
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Always false for a constructed grid; provided for API symmetry.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Whether `c` lies inside the grid.
    #[inline]
    pub fn contains(&self, c: Cell) -> bool {
        self.bounds.contains(c)
    }

    #[inline]
    fn index(&self, c: Cell) -> Option<usize> {
        if !self.bounds.contains(c) {
            return None;
        }
        Some(c.row as usize * self.cols() as usize + c.col as usize)
    }

    /// The tile at `c`, or `None` if out of bounds.
    #[inline]
    pub fn at(&self, c: Cell) -> Option<TerrainKind> {
        self.index(c).map(|i| self.tiles[i])
    }

    /// The tile at `c`. Out-of-bounds cells read as [`TerrainKind::Wall`].
    #[inline]
    pub fn tile_at(&self, c: Cell) -> TerrainKind {
        self.at(c).unwrap_or(TerrainKind::Wall)
    }

    /// Set the tile at `c`. Does nothing if out of bounds.
    pub fn set(&mut self, c: Cell, tile: TerrainKind) {
        if let Some(i) = self.index(c) {
            self.tiles[i] = tile;
        }
    }

    /// Fill the whole grid with `tile`.
    pub fn fill(&mut self, tile: TerrainKind) {
        self.tiles.fill(tile);
    }

    /// Count cells holding `tile`.
    pub fn count(&self, tile: TerrainKind) -> usize {
        self.tiles.iter().filter(|&&t| t == tile).count()
    }

    /// Iterate over `(Cell, TerrainKind)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Cell, TerrainKind)> + '_ {
        self.bounds.iter().zip(self.tiles.iter().copied())
    }
}

impl std::fmt::Display for TerrainGrid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, row) in self.tiles.chunks(self.cols() as usize).enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for t in row {
                write!(f, "{t}")?;
            }
        }
        Ok(())
    }
}

fn check_dims(rows: usize, cols: usize) -> Result<(), GridError> {
    if rows == 0 || cols == 0 {
        return Err(GridError::Empty);
    }
    if rows > MAX_SIDE || cols > MAX_SIDE {
        return Err(GridError::TooLarge { rows, cols });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::TerrainKind::*;

    #[test]
    fn parse_and_lookup() {
        let g = TerrainGrid::parse("PPP PMP SSS").unwrap();
        assert_eq!(g.rows(), 3);
        assert_eq!(g.cols(), 3);
        assert_eq!(g.at(Cell::new(1, 1)), Some(Mountain));
        assert_eq!(g.at(Cell::new(2, 0)), Some(Sand));
        assert_eq!(g.at(Cell::new(3, 0)), None);
    }

    #[test]
    fn out_of_bounds_reads_as_wall() {
        let g = TerrainGrid::parse("PP\nPP").unwrap();
        assert_eq!(g.tile_at(Cell::new(-1, 0)), Wall);
        assert_eq!(g.tile_at(Cell::new(0, 2)), Wall);
        assert_eq!(g.tile_at(Cell::new(1, 1)), Path);
    }

    #[test]
    fn new_grid_is_unknown() {
        let g = TerrainGrid::new(4, 5).unwrap();
        assert_eq!(g.len(), 20);
        assert_eq!(g.count(Unknown), 20);
    }

    #[test]
    fn set_and_fill() {
        let mut g = TerrainGrid::new(3, 3).unwrap();
        g.fill(Path);
        g.set(Cell::new(1, 2), Wall);
        g.set(Cell::new(9, 9), Wall);
        assert_eq!(g.count(Wall), 1);
        assert_eq!(g.tile_at(Cell::new(1, 2)), Wall);
    }

    #[test]
    fn non_rectangular_rejected() {
        let err = TerrainGrid::parse("PPP PP").unwrap_err();
        assert_eq!(
            err,
            GridError::NonRectangular {
                row: 1,
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn empty_and_invalid_rejected() {
        assert_eq!(TerrainGrid::parse("  ").unwrap_err(), GridError::Empty);
        assert_eq!(TerrainGrid::new(0, 4).unwrap_err(), GridError::Empty);
        assert_eq!(
            TerrainGrid::parse("PP PX").unwrap_err(),
            GridError::InvalidTile {
                ch: 'X',
                row: 1,
                col: 1
            }
        );
    }

    #[test]
    fn iter_pairs_cells_with_tiles() {
        let g = TerrainGrid::parse("PS MW").unwrap();
        let items: Vec<_> = g.iter().collect();
        assert_eq!(items.len(), 4);
        assert_eq!(items[1], (Cell::new(0, 1), Sand));
        assert_eq!(items[3], (Cell::new(1, 1), Wall));
    }

    #[test]
    fn display_round_trips_through_parse() {
        let g = TerrainGrid::parse("PSM\nWUP").unwrap();
        assert_eq!(g.to_string(), "PSM\nWUP");
        assert_eq!(TerrainGrid::parse(&g.to_string()).unwrap(), g);
    }
}
