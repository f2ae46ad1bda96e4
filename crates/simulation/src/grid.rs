//! Cell storage and Moore neighbourhood lookup.

use crate::SimRng;
use misinfo_types::{
    CellState, GridError, PopulationCounts, SimulationConfig, Topology, MOORE_OFFSETS,
};
use std::fmt;
use std::ops::Index;

/// Neighbour tally for one cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NeighborCounts {
    /// Neighbours currently believing.
    pub believers: usize,
    /// Neighbours currently corrected.
    pub corrected: usize,
    /// Neighbour coordinates visited, duplicates included.
    pub total: usize,
}

impl NeighborCounts {
    /// Unaware neighbours (everything not counted otherwise).
    pub fn unaware(&self) -> usize {
        self.total - self.believers - self.corrected
    }

    /// Fraction of neighbours believing, 0 for a cell with no neighbours.
    pub fn believer_ratio(&self) -> f64 {
        self.ratio(self.believers)
    }

    /// Fraction of neighbours corrected, 0 for a cell with no neighbours.
    pub fn corrected_ratio(&self) -> f64 {
        self.ratio(self.corrected)
    }

    fn ratio(&self, count: usize) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            count as f64 / self.total as f64
        }
    }
}

/// Fixed-size `height` x `width` grid of cell states.
///
/// Stored row-major with the origin at the top-left, indexed `(row, col)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    topology: Topology,
    cells: Vec<CellState>,
}

impl Grid {
    /// Grid with every cell in `state`.
    pub fn filled(width: usize, height: usize, topology: Topology, state: CellState) -> Self {
        Self {
            width,
            height,
            topology,
            cells: vec![state; width * height],
        }
    }

    /// Build from explicit rows, normalising each value into a [`CellState`].
    ///
    /// Fails on a row count other than `height`, any row length other than
    /// `width`, or any value that is not a valid state.
    pub fn from_rows<T>(
        rows: &[Vec<T>],
        width: usize,
        height: usize,
        topology: Topology,
    ) -> Result<Self, GridError>
    where
        T: Copy + fmt::Debug + TryInto<CellState>,
    {
        if rows.len() != height {
            return Err(GridError::HeightMismatch {
                expected: height,
                actual: rows.len(),
            });
        }

        let mut cells = Vec::with_capacity(width * height);
        for (row, values) in rows.iter().enumerate() {
            if values.len() != width {
                return Err(GridError::WidthMismatch {
                    row,
                    expected: width,
                    actual: values.len(),
                });
            }
            for (col, &value) in values.iter().enumerate() {
                let state = value.try_into().map_err(|_| GridError::InvalidCell {
                    row,
                    col,
                    value: format!("{:?}", value),
                })?;
                cells.push(state);
            }
        }

        Ok(Self {
            width,
            height,
            topology,
            cells,
        })
    }

    /// Randomly populate a grid from the configured initial densities.
    ///
    /// One uniform draw per cell, row-major. The believer band is tested
    /// first, then the corrected band; the remainder is unaware.
    pub fn random(config: &SimulationConfig, rng: &mut SimRng) -> Self {
        let believer_band = config.initial_believer_density;
        let corrected_band = believer_band + config.initial_corrected_density;

        let cells = (0..config.cell_count())
            .map(|_| {
                let draw = rng.uniform();
                if draw < believer_band {
                    CellState::Believer
                } else if draw < corrected_band {
                    CellState::Corrected
                } else {
                    CellState::Unaware
                }
            })
            .collect();

        Self {
            width: config.width,
            height: config.height,
            topology: config.topology,
            cells,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// State at `(row, col)`, or `None` out of range.
    pub fn get(&self, row: usize, col: usize) -> Option<CellState> {
        if row < self.height && col < self.width {
            Some(self.cells[row * self.width + col])
        } else {
            None
        }
    }

    /// Overwrite one cell. Only the engine writes, and only into its scratch buffer.
    pub(crate) fn set(&mut self, row: usize, col: usize, state: CellState) {
        self.cells[row * self.width + col] = state;
    }

    /// Moore neighbour coordinates of `(row, col)`.
    ///
    /// Toroidal grids always return 8 entries, which may repeat or include
    /// the cell itself when a dimension is smaller than 3. Bounded grids
    /// drop coordinates off the edge.
    pub fn neighbors(&self, row: usize, col: usize) -> Vec<(usize, usize)> {
        self.neighbor_coords(row, col).collect()
    }

    fn neighbor_coords(
        &self,
        row: usize,
        col: usize,
    ) -> impl Iterator<Item = (usize, usize)> + '_ {
        MOORE_OFFSETS.into_iter().filter_map(move |(d_row, d_col)| {
            self.topology
                .resolve(row, col, d_row, d_col, self.height, self.width)
        })
    }

    /// Count believer and corrected neighbours of `(row, col)`.
    pub fn count_neighbor_states(&self, row: usize, col: usize) -> NeighborCounts {
        let mut counts = NeighborCounts::default();
        for (r, c) in self.neighbor_coords(row, col) {
            match self[(r, c)] {
                CellState::Believer => counts.believers += 1,
                CellState::Corrected => counts.corrected += 1,
                CellState::Unaware => {}
            }
            counts.total += 1;
        }
        counts
    }

    /// Tally the whole population.
    pub fn population(&self) -> PopulationCounts {
        self.cells.iter().copied().collect()
    }

    /// Rows as slices, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[CellState]> {
        self.cells.chunks(self.width.max(1))
    }

    /// Copy out as nested rows.
    pub fn to_rows(&self) -> Vec<Vec<CellState>> {
        self.rows().map(<[CellState]>::to_vec).collect()
    }
}

impl Index<(usize, usize)> for Grid {
    type Output = CellState;

    fn index(&self, (row, col): (usize, usize)) -> &CellState {
        assert!(
            row < self.height && col < self.width,
            "cell ({}, {}) out of range for {}x{} grid",
            row,
            col,
            self.height,
            self.width
        );
        &self.cells[row * self.width + col]
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for state in row {
                write!(f, "{}", state.symbol())?;
            }
        }
        Ok(())
    }
}
