//! Distance heuristics for grid worlds.
//!
//! All functions work on unit-cost cells. Worlds with weighted cells scale the
//! result by their cheapest cell weight so the estimate never exceeds the true
//! remaining cost.
//!
//! ```
//! use waypoint_harness::heuristics::{compute_heuristic, Heuristic};
//!
//! let manhattan = compute_heuristic((0, 0), (3, 4), Heuristic::Manhattan);
//! assert!((manhattan - 7.0).abs() < 1e-10);
//!
//! let euclidean = compute_heuristic((0, 0), (3, 4), Heuristic::Euclidean);
//! assert!((euclidean - 5.0).abs() < 1e-10);
//! ```

/// Grid cell coordinate `(x, y)`.
pub type Coord = (u32, u32);

/// Which estimate a world hands the engine as `heuristic_costs`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Heuristic {
    /// Always 0; the search degenerates to Dijkstra.
    Zero,
    /// `|dx| + |dy|`. Admissible for 4-connected grids.
    #[default]
    Manhattan,
    /// Straight-line distance. Admissible for any connectivity.
    Euclidean,
    /// `max(|dx|, |dy|)`. Admissible for 8-connected grids.
    Chebyshev,
    /// Diagonal distance with `sqrt(2)` diagonal steps. The tightest
    /// admissible estimate for 8-connected grids.
    Octile,
}

impl Heuristic {
    pub const ALL: [Self; 5] = [
        Self::Zero,
        Self::Manhattan,
        Self::Euclidean,
        Self::Chebyshev,
        Self::Octile,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Zero => "zero",
            Self::Manhattan => "manhattan",
            Self::Euclidean => "euclidean",
            Self::Chebyshev => "chebyshev",
            Self::Octile => "octile",
        }
    }
}

impl std::fmt::Display for Heuristic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Estimated unit-cost distance from `from` to `to`.
#[must_use]
pub fn compute_heuristic(from: Coord, to: Coord, heuristic: Heuristic) -> f64 {
    let dx = f64::from(from.0.abs_diff(to.0));
    let dy = f64::from(from.1.abs_diff(to.1));
    match heuristic {
        Heuristic::Zero => 0.0,
        Heuristic::Manhattan => dx + dy,
        Heuristic::Euclidean => dx.hypot(dy),
        Heuristic::Chebyshev => dx.max(dy),
        Heuristic::Octile => {
            let (lo, hi) = if dx < dy { (dx, dy) } else { (dy, dx) };
            std::f64::consts::SQRT_2.mul_add(lo, hi - lo)
        }
    }
}
