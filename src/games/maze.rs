use std::ops::RangeInclusive;

use rand::Rng;

use crate::geom::Aabb;

/// The chase maze, 20x15 cells of 40px: `#` wall, `.` path.
/// Rows 7, 9 and 11 run off both screen edges.
pub const CLASSIC_LAYOUT: [&str; 15] = [
    "####################",
    "#........#.........#",
    "#.##.###.#.###.###.#",
    "#..................#",
    "#.##.#.#####.#.###.#",
    "#....#...#...#.....#",
    "####.###.#.###.#####",
    "...#.#.......#.#....",
    "####.#.##.##.#.#####",
    ".......#...#........",
    "####.#.#####.#.#####",
    "...#.#.......#.#....",
    "####.#.#####.#.#####",
    "#........#.........#",
    "#.##.###.#.###.###.#",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Path,
    Wall,
}

/// Where a random path cell may be drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    /// Any cell of the grid
    Anywhere,
    /// Cells off the outer ring
    Interior,
}

/// Immutable grid maze with one precomputed collision rectangle per wall cell.
#[derive(Debug, Clone)]
pub struct Maze {
    cols: usize,
    rows: usize,
    cell_size: f32,
    cells: Vec<Cell>,
    walls: Vec<Aabb>,
}

impl Maze {
    pub fn classic(cell_size: f32) -> Self {
        Self::from_rows(&CLASSIC_LAYOUT, cell_size)
    }

    /// Builds a maze from text rows, `#` for walls and anything else for
    /// path. Short rows are padded with path.
    pub fn from_rows(layout: &[&str], cell_size: f32) -> Self {
        let rows = layout.len();
        let cols = layout.iter().map(|r| r.chars().count()).max().unwrap_or(0);
        let mut cells = vec![Cell::Path; cols * rows];
        let mut walls = Vec::new();

        for (row, line) in layout.iter().enumerate() {
            for (col, ch) in line.chars().enumerate() {
                if ch == '#' {
                    cells[row * cols + col] = Cell::Wall;
                    walls.push(Aabb::new(
                        col as f32 * cell_size,
                        row as f32 * cell_size,
                        cell_size,
                        cell_size,
                    ));
                }
            }
        }

        Self { cols, rows, cell_size, cells, walls }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    pub fn cell(&self, col: usize, row: usize) -> Option<Cell> {
        if col < self.cols && row < self.rows {
            Some(self.cells[row * self.cols + col])
        } else {
            None
        }
    }

    pub fn is_path(&self, col: usize, row: usize) -> bool {
        self.cell(col, row) == Some(Cell::Path)
    }

    pub fn walls(&self) -> &[Aabb] {
        &self.walls
    }

    pub fn collides(&self, rect: &Aabb) -> bool {
        self.walls.iter().any(|wall| wall.intersects(rect))
    }

    /// Top-left of a `size` square centred in cell `(col, row)`.
    pub fn cell_origin(&self, col: usize, row: usize, size: f32) -> (f32, f32) {
        let inset = ((self.cell_size - size) / 2.0).floor();
        (
            col as f32 * self.cell_size + inset,
            row as f32 * self.cell_size + inset,
        )
    }

    fn region_bounds(&self, region: Region) -> Option<(RangeInclusive<usize>, RangeInclusive<usize>)> {
        match region {
            Region::Anywhere if self.cols > 0 && self.rows > 0 => {
                Some((0..=self.cols - 1, 0..=self.rows - 1))
            }
            Region::Interior if self.cols > 2 && self.rows > 2 => {
                Some((1..=self.cols - 2, 1..=self.rows - 2))
            }
            _ => None,
        }
    }

    /// Uniformly random path cell inside `region`, found by rejection
    /// sampling. `None` when the region holds no path at all.
    pub fn random_path_cell<R: Rng>(&self, rng: &mut R, region: Region) -> Option<(usize, usize)> {
        let (cols, rows) = self.region_bounds(region)?;
        let any_path = rows
            .clone()
            .any(|row| cols.clone().any(|col| self.is_path(col, row)));
        if !any_path {
            return None;
        }
        loop {
            let col = rng.gen_range(cols.clone());
            let row = rng.gen_range(rows.clone());
            if self.is_path(col, row) {
                return Some((col, row));
            }
        }
    }
}
