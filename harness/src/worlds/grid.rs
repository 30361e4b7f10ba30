//! `GridWorld`: a 2-D occupancy grid parsed from ASCII.
//!
//! # Map format
//!
//! One line per row, top row first. Leading and trailing whitespace on each
//! line is ignored, and blank lines are skipped.
//!
//! | Glyph | Meaning |
//! |-------|---------|
//! | `.` | free cell, weight 1 |
//! | `1`-`9` | free cell with that weight |
//! | `#` | blocked |
//!
//! Cell `(x, y)` has node id `y * width + x`, so the top-left cell is node 0.
//!
//! # Moves
//!
//! Entering a cell costs its weight. Diagonal moves (with
//! [`Connectivity::Eight`]) cost `sqrt(2)` times the weight of the destination
//! and are only allowed when both orthogonal cells they pass are free.
//! Heuristic estimates are scaled by the cheapest cell weight in the map.

use waypoint_kernel::proof::canon::{canonical_json_bytes, CanonError};
use waypoint_kernel::proof::hash::{canonical_hash, ContentHash, HashDomain};
use waypoint_search::node::NodeId;

use crate::contract::{Expansion, NeighborProvider};
use crate::heuristics::{compute_heuristic, Coord, Heuristic};

/// Orthogonal offsets: north, east, south, west.
const ORTHOGONAL: [(i64, i64); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

/// Diagonal offsets: north-east, south-east, south-west, north-west.
const DIAGONAL: [(i64, i64); 4] = [(1, -1), (1, 1), (-1, 1), (-1, -1)];

/// Which neighbor cells a move may reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Connectivity {
    #[default]
    Four,
    Eight,
}

impl Connectivity {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Four => "four",
            Self::Eight => "eight",
        }
    }
}

/// Error from [`GridWorld::from_ascii`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridParseError {
    /// The map has no rows.
    Empty,
    /// A row is a different width from the first row.
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// A cell glyph is not `.`, `#` or `1`-`9`.
    UnknownGlyph { row: usize, col: usize, glyph: char },
    /// `width * height` does not fit the node id range.
    TooLarge { width: usize, height: usize },
}

impl std::fmt::Display for GridParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => f.write_str("grid map has no rows"),
            Self::RaggedRow {
                row,
                expected,
                found,
            } => write!(f, "row {row} has {found} cells, expected {expected}"),
            Self::UnknownGlyph { row, col, glyph } => {
                write!(f, "unknown glyph {glyph:?} at row {row}, column {col}")
            }
            Self::TooLarge { width, height } => {
                write!(f, "grid {width}x{height} exceeds the node id range")
            }
        }
    }
}

impl std::error::Error for GridParseError {}

/// Weighted occupancy grid.
#[derive(Debug, Clone)]
pub struct GridWorld {
    world_id: String,
    width: u32,
    height: u32,
    /// Row-major; `None` is blocked.
    cells: Vec<Option<u8>>,
    connectivity: Connectivity,
    heuristic: Heuristic,
    min_weight: u8,
}

impl GridWorld {
    /// Parse an ASCII map.
    ///
    /// # Errors
    ///
    /// Returns [`GridParseError`] for empty maps, ragged rows, unknown glyphs,
    /// or maps with more cells than there are node ids.
    pub fn from_ascii(
        map: &str,
        connectivity: Connectivity,
        heuristic: Heuristic,
    ) -> Result<Self, GridParseError> {
        let rows: Vec<&str> = map
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        let Some(first) = rows.first() else {
            return Err(GridParseError::Empty);
        };
        let width = first.chars().count();
        let height = rows.len();

        let mut cells = Vec::with_capacity(width * height);
        for (row, line) in rows.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(GridParseError::RaggedRow {
                    row,
                    expected: width,
                    found,
                });
            }
            for (col, glyph) in line.chars().enumerate() {
                let cell = match glyph {
                    '.' => Some(1),
                    '#' => None,
                    // Checked range, so the digit fits in u8.
                    #[allow(clippy::cast_possible_truncation)]
                    '1'..='9' => glyph.to_digit(10).map(|d| d as u8),
                    _ => return Err(GridParseError::UnknownGlyph { row, col, glyph }),
                };
                cells.push(cell);
            }
        }

        let too_large = GridParseError::TooLarge { width, height };
        let (Ok(w), Ok(h)) = (u32::try_from(width), u32::try_from(height)) else {
            return Err(too_large);
        };
        if w.checked_mul(h).is_none() {
            return Err(too_large);
        }

        let min_weight = cells.iter().flatten().copied().min().unwrap_or(1);
        Ok(Self {
            world_id: format!(
                "grid:v1:{w}x{h}:{}:{}",
                connectivity.as_str(),
                heuristic.as_str()
            ),
            width: w,
            height: h,
            cells,
            connectivity,
            heuristic,
            min_weight,
        })
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn connectivity(&self) -> Connectivity {
        self.connectivity
    }

    #[must_use]
    pub fn heuristic(&self) -> Heuristic {
        self.heuristic
    }

    /// Node id of cell `(x, y)`, or `None` outside the grid.
    #[must_use]
    pub fn node_id(&self, (x, y): Coord) -> Option<NodeId> {
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    /// Cell of node `id`, or `None` outside the grid.
    #[must_use]
    pub fn coord(&self, id: NodeId) -> Option<Coord> {
        let coord = (id % self.width, id / self.width);
        (coord.1 < self.height).then_some(coord)
    }

    /// Weight of the cell at `coord`; `None` if blocked or outside the grid.
    #[must_use]
    pub fn weight(&self, coord: Coord) -> Option<u8> {
        let id = self.node_id(coord)?;
        self.cells[id as usize]
    }

    #[must_use]
    pub fn is_free(&self, coord: Coord) -> bool {
        self.weight(coord).is_some()
    }

    /// Free cell one step from `(x, y)` in direction `(dx, dy)`.
    fn step(&self, (x, y): Coord, (dx, dy): (i64, i64)) -> Option<(Coord, u8)> {
        let nx = u32::try_from(i64::from(x) + dx).ok()?;
        let ny = u32::try_from(i64::from(y) + dy).ok()?;
        let weight = self.weight((nx, ny))?;
        Some(((nx, ny), weight))
    }

    fn estimate(&self, from: Coord, goal: Option<Coord>) -> f64 {
        goal.map_or(0.0, |g| {
            compute_heuristic(from, g, self.heuristic) * f64::from(self.min_weight)
        })
    }

    /// The map as canonical JSON (normalized rows, moves, heuristic).
    #[must_use]
    pub fn fixture_json(&self) -> serde_json::Value {
        let rows: Vec<String> = self
            .cells
            .chunks(self.width as usize)
            .map(|row| {
                row.iter()
                    .map(|cell| match cell {
                        None => '#',
                        Some(1) => '.',
                        Some(w) => char::from(b'0' + w),
                    })
                    .collect()
            })
            .collect();
        serde_json::json!({
            "schema_version": "grid.v1",
            "width": self.width,
            "height": self.height,
            "rows": rows,
            "connectivity": self.connectivity.as_str(),
            "heuristic": self.heuristic.as_str(),
        })
    }

    /// Content digest of [`fixture_json`](Self::fixture_json).
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if canonicalization fails.
    pub fn fixture_digest(&self) -> Result<ContentHash, CanonError> {
        let bytes = canonical_json_bytes(&self.fixture_json())?;
        Ok(canonical_hash(HashDomain::WorldFixture, &bytes))
    }
}

impl NeighborProvider for GridWorld {
    fn world_id(&self) -> &str {
        &self.world_id
    }

    fn expand(&self, node: NodeId, goal: NodeId) -> Expansion {
        let mut expansion = Expansion::new();
        let Some(here) = self.coord(node).filter(|&c| self.is_free(c)) else {
            return expansion;
        };
        let goal = self.coord(goal);

        for offset in ORTHOGONAL {
            if let Some((to, weight)) = self.step(here, offset) {
                if let Some(id) = self.node_id(to) {
                    expansion.push(id, f64::from(weight), self.estimate(to, goal));
                }
            }
        }
        if self.connectivity == Connectivity::Eight {
            for (dx, dy) in DIAGONAL {
                let corners_free =
                    self.step(here, (dx, 0)).is_some() && self.step(here, (0, dy)).is_some();
                if !corners_free {
                    continue;
                }
                if let Some((to, weight)) = self.step(here, (dx, dy)) {
                    if let Some(id) = self.node_id(to) {
                        let cost = std::f64::consts::SQRT_2 * f64::from(weight);
                        expansion.push(id, cost, self.estimate(to, goal));
                    }
                }
            }
        }
        expansion
    }
}
