//! Grid boundary handling.

use serde::{Deserialize, Serialize};

/// Moore neighbourhood offsets as `(row, col)` deltas.
///
/// Row offset varies slowest. Neighbour lists are always produced in this
/// order.
pub const MOORE_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// How the grid treats its edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topology {
    /// Edges wrap around; every cell has exactly 8 neighbours.
    #[default]
    Toroidal,

    /// Edges are hard walls; border cells have fewer neighbours.
    Bounded,
}

impl Topology {
    /// Map a boolean "wrap edges" flag to a topology.
    pub fn from_toroidal(toroidal: bool) -> Self {
        if toroidal {
            Topology::Toroidal
        } else {
            Topology::Bounded
        }
    }

    /// Resolve `(row + d_row, col + d_col)` on a `height` x `width` grid.
    ///
    /// Toroidal wrapping always yields a coordinate, even when it lands back
    /// on the origin cell (dimensions of 1) or repeats an earlier neighbour
    /// (dimensions of 2). Bounded topology yields `None` off the edge.
    pub fn resolve(
        self,
        row: usize,
        col: usize,
        d_row: isize,
        d_col: isize,
        height: usize,
        width: usize,
    ) -> Option<(usize, usize)> {
        let r = row as isize + d_row;
        let c = col as isize + d_col;

        match self {
            Topology::Toroidal => Some((
                r.rem_euclid(height as isize) as usize,
                c.rem_euclid(width as isize) as usize,
            )),
            Topology::Bounded => {
                if r < 0 || c < 0 || r >= height as isize || c >= width as isize {
                    None
                } else {
                    Some((r as usize, c as usize))
                }
            }
        }
    }
}
