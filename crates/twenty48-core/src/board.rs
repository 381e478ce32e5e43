//! The square tile grid and the line slide/merge routine.
//!
//! This module contains:
//! - `Board`, a row-major N×N grid of tile values (0 = empty)
//! - `slide_line`, the compaction + single-pass merge applied to every line
//! - The bordered text rendering used by the console driver

use crate::grid::Cell;
use serde::{Deserialize, Serialize};

/// Value of a single cell; 0 means no tile
pub type Tile = u64;

/// Empty cell marker
pub const EMPTY: Tile = 0;

/// Largest tile a cell can hold. Tiles this large no longer merge.
pub const MAX_TILE: Tile = 1 << 63;

/// Whether `value` is a tile: a power of two ≥ 2
pub fn is_tile(value: Tile) -> bool {
    value >= 2 && value.is_power_of_two()
}

/// Whether `value` may appear on a board (empty or a tile)
pub fn is_valid_tile(value: Tile) -> bool {
    value == EMPTY || is_tile(value)
}

/// Whether two equal tiles of `value` combine when they meet
fn can_merge(value: Tile) -> bool {
    value != EMPTY && value < MAX_TILE
}

/// Slide one line towards its leading edge (index 0).
///
/// Empty cells are dropped, then equal neighbours are merged scanning from
/// the leading edge. A merged tile is skipped over, so each tile merges at
/// most once per move. Tiles at `MAX_TILE` stay side by side. The result is
/// padded with empties to the input length.
pub fn slide_line(line: &[Tile]) -> Vec<Tile> {
    let compacted: Vec<Tile> = line.iter().copied().filter(|&v| v != EMPTY).collect();

    let mut merged = Vec::with_capacity(line.len());
    let mut i = 0;
    while i < compacted.len() {
        if i + 1 < compacted.len()
            && compacted[i] == compacted[i + 1]
            && can_merge(compacted[i])
        {
            merged.push(compacted[i] * 2);
            i += 2;
        } else {
            merged.push(compacted[i]);
            i += 1;
        }
    }

    merged.resize(line.len(), EMPTY);
    merged
}

/// An N×N grid of tiles
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    size: usize,
    cells: Vec<Tile>,
}

impl Board {
    /// Create an all-empty board
    pub fn empty(size: usize) -> Self {
        Self {
            size,
            cells: vec![EMPTY; size * size],
        }
    }

    /// Build a board from rows. Returns `None` unless the rows form a
    /// non-empty square.
    pub fn from_rows(rows: &[Vec<Tile>]) -> Option<Self> {
        let size = rows.len();
        if size == 0 || rows.iter().any(|r| r.len() != size) {
            return None;
        }
        Some(Self {
            size,
            cells: rows.iter().flatten().copied().collect(),
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, cell: Cell) -> Tile {
        self.cells[cell.row * self.size + cell.col]
    }

    pub fn set(&mut self, cell: Cell, value: Tile) {
        self.cells[cell.row * self.size + cell.col] = value;
    }

    /// Copy of the grid as rows
    pub fn rows(&self) -> Vec<Vec<Tile>> {
        self.cells.chunks(self.size).map(<[Tile]>::to_vec).collect()
    }

    /// Largest tile on the board (0 when empty)
    pub fn max_tile(&self) -> Tile {
        self.cells.iter().copied().max().unwrap_or(EMPTY)
    }

    /// Sum of all tiles, saturating at `Tile::MAX`
    pub fn total(&self) -> Tile {
        self.cells.iter().fold(0, |acc, &v| acc.saturating_add(v))
    }

    /// Cells currently holding no tile, in row-major order
    pub fn empty_cells(&self) -> Vec<Cell> {
        Cell::all(self.size)
            .filter(|&c| self.get(c) == EMPTY)
            .collect()
    }

    /// Whether some cell could merge with its right or lower neighbour
    pub fn has_adjacent_pair(&self) -> bool {
        Cell::all(self.size).any(|c| {
            let value = self.get(c);
            if !can_merge(value) {
                return false;
            }
            c.right(self.size).is_some_and(|n| self.get(n) == value)
                || c.below(self.size).is_some_and(|n| self.get(n) == value)
        })
    }

    /// Render with a border, each value right-aligned to `width` columns.
    ///
    /// ```text
    /// -------------
    /// | 2 |   |   |
    /// |-----------|
    /// ...
    /// ```
    pub fn render(&self, width: usize) -> String {
        let inner = (width + 3) * self.size;
        let border = format!("{}\n", "-".repeat(inner + 1));
        let divider = format!("|{}|\n", "-".repeat(inner.saturating_sub(1)));

        let mut out = border.clone();
        for (r, row) in self.cells.chunks(self.size).enumerate() {
            for &value in row {
                let text = if value == EMPTY {
                    String::new()
                } else {
                    value.to_string()
                };
                out.push_str(&format!("| {text:>width$} "));
            }
            out.push_str("|\n");
            if r + 1 != self.size {
                out.push_str(&divider);
            }
        }
        out.push_str(&border);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_slide_merges_leading_pair() {
        assert_eq!(slide_line(&[2, 2, 4, 0]), vec![4, 4, 0, 0]);
    }

    #[test]
    fn test_slide_merges_each_tile_once() {
        assert_eq!(slide_line(&[2, 2, 2, 2]), vec![4, 4, 0, 0]);
        assert_eq!(slide_line(&[4, 4, 8, 0]), vec![8, 8, 0, 0]);
        assert_eq!(slide_line(&[2, 2, 2, 0]), vec![4, 2, 0, 0]);
    }

    #[test]
    fn test_slide_mismatched_values_unchanged() {
        assert_eq!(slide_line(&[4, 2, 2, 4]), vec![4, 4, 4, 0]);
        assert_eq!(slide_line(&[4, 2, 4, 2]), vec![4, 2, 4, 2]);
    }

    #[test]
    fn test_slide_compacts_across_gaps() {
        assert_eq!(slide_line(&[0, 2, 0, 2]), vec![4, 0, 0, 0]);
        assert_eq!(slide_line(&[0, 0, 0, 8]), vec![8, 0, 0, 0]);
        assert_eq!(slide_line(&[0, 0, 0, 0]), vec![0, 0, 0, 0]);
        assert_eq!(slide_line(&[16]), vec![16]);
    }

    #[test]
    fn test_slide_conserves_sum() {
        let lines: [&[Tile]; 5] = [
            &[2, 2, 4, 0],
            &[2, 2, 2, 2],
            &[8, 0, 8, 8],
            &[0, 4, 4, 4],
            &[2, 4, 8, 16],
        ];
        for line in lines {
            let slid = slide_line(line);
            assert_eq!(slid.len(), line.len());
            assert_eq!(slid.iter().sum::<Tile>(), line.iter().sum::<Tile>());
            assert!(slid.iter().all(|&v| is_valid_tile(v)));
        }
    }

    #[test]
    fn test_largest_tiles_do_not_merge() {
        assert_eq!(
            slide_line(&[MAX_TILE, MAX_TILE, 0, 0]),
            vec![MAX_TILE, MAX_TILE, 0, 0]
        );
        assert_eq!(
            slide_line(&[0, MAX_TILE, 0, MAX_TILE]),
            vec![MAX_TILE, MAX_TILE, 0, 0]
        );
        assert_eq!(slide_line(&[MAX_TILE / 2, MAX_TILE / 2]), vec![MAX_TILE, 0]);

        let ceiling =
            Board::from_rows(&[vec![MAX_TILE, MAX_TILE], vec![MAX_TILE, MAX_TILE]]).unwrap();
        assert!(!ceiling.has_adjacent_pair());
    }

    #[test]
    fn test_valid_tiles() {
        assert!(!is_tile(0));
        assert!(is_tile(MAX_TILE));
        assert!(is_valid_tile(0));
        assert!(is_valid_tile(2));
        assert!(is_valid_tile(1024));
        assert!(!is_valid_tile(1));
        assert!(!is_valid_tile(6));
    }

    #[test]
    fn test_from_rows_requires_square() {
        assert!(Board::from_rows(&[]).is_none());
        assert!(Board::from_rows(&[vec![2, 0], vec![0]]).is_none());

        let board = Board::from_rows(&[vec![2, 0], vec![0, 4]]).unwrap();
        assert_eq!(board.size(), 2);
        assert_eq!(board.get(Cell::new(1, 1)), 4);
        assert_eq!(board.max_tile(), 4);
        assert_eq!(board.empty_cells(), vec![Cell::new(0, 1), Cell::new(1, 0)]);
    }

    #[test]
    fn test_adjacent_pairs() {
        let open = Board::from_rows(&[vec![2, 4], vec![2, 8]]).unwrap();
        assert!(open.has_adjacent_pair());

        let stuck = Board::from_rows(&[vec![2, 4], vec![4, 2]]).unwrap();
        assert!(!stuck.has_adjacent_pair());
    }

    #[test]
    fn test_render_right_aligned() {
        let board = Board::from_rows(&[vec![2, 0], vec![16, 128]]).unwrap();
        let expected = "\
-------------
|   2 |     |
|-----------|
|  16 | 128 |
-------------
";
        assert_eq!(board.render(3), expected);
    }
}
