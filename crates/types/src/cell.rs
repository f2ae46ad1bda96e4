//! Belief state of a single cell.

use crate::InvalidCellState;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Belief state of one individual on the grid.
///
/// The integer codes (`0`, `1`, `2`) are the wire representation used when a
/// caller supplies an explicit initial grid of raw values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum CellState {
    /// Has not been exposed to the misinformation.
    Unaware = 0,
    /// Currently believes the misinformation.
    Believer = 1,
    /// Has been corrected, but may relapse.
    Corrected = 2,
}

impl CellState {
    /// All states, in code order.
    pub const ALL: [CellState; 3] = [
        CellState::Unaware,
        CellState::Believer,
        CellState::Corrected,
    ];

    /// Raw integer code.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Single-character symbol used by grid renderings (`U`, `B`, `C`).
    pub fn symbol(self) -> char {
        match self {
            CellState::Unaware => 'U',
            CellState::Believer => 'B',
            CellState::Corrected => 'C',
        }
    }
}

impl fmt::Display for CellState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellState::Unaware => write!(f, "unaware"),
            CellState::Believer => write!(f, "believer"),
            CellState::Corrected => write!(f, "corrected"),
        }
    }
}

macro_rules! impl_try_from_code {
    ($($int:ty),* $(,)?) => {
        $(
            impl TryFrom<$int> for CellState {
                type Error = InvalidCellState;

                fn try_from(value: $int) -> Result<Self, Self::Error> {
                    match value {
                        0 => Ok(CellState::Unaware),
                        1 => Ok(CellState::Believer),
                        2 => Ok(CellState::Corrected),
                        other => Err(InvalidCellState(other.to_string())),
                    }
                }
            }
        )*
    };
}

impl_try_from_code!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

impl TryFrom<char> for CellState {
    type Error = InvalidCellState;

    /// Accepts the symbols produced by [`CellState::symbol`], case-insensitive,
    /// plus `.` as a shorthand for unaware.
    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value.to_ascii_uppercase() {
            'U' | '.' => Ok(CellState::Unaware),
            'B' => Ok(CellState::Believer),
            'C' => Ok(CellState::Corrected),
            other => Err(InvalidCellState(format!("{:?}", other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_round_trip_through_integers() {
        for state in CellState::ALL {
            assert_eq!(CellState::try_from(state.code()), Ok(state));
            assert_eq!(CellState::try_from(state.code() as i64), Ok(state));
        }
    }

    #[test]
    fn test_out_of_range_codes_are_rejected() {
        assert_eq!(
            CellState::try_from(3u8),
            Err(InvalidCellState("3".to_string()))
        );
        assert!(CellState::try_from(-1i32).is_err());
        assert!(CellState::try_from(255usize).is_err());
    }

    #[test]
    fn test_symbols() {
        assert_eq!(CellState::try_from('b'), Ok(CellState::Believer));
        assert_eq!(CellState::try_from('.'), Ok(CellState::Unaware));
        assert_eq!(CellState::try_from('C'), Ok(CellState::Corrected));
        assert!(CellState::try_from('x').is_err());

        for state in CellState::ALL {
            assert_eq!(CellState::try_from(state.symbol()), Ok(state));
        }
    }
}
