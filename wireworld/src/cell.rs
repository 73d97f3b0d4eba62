// cell.rs - The four Wireworld cell states

use std::fmt;

/// State of a single grid cell.
///
/// The discriminants are the cell ordinals; the persistence record collapses
/// them to a conductive class (see [`crate::codec`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Cell {
    #[default]
    Dead = 0,
    Wire = 1,
    ElectronHead = 2,
    ElectronTail = 3,
}

impl Cell {
    /// Every state, in ordinal order.
    pub const ALL: [Cell; 4] = [
        Cell::Dead,
        Cell::Wire,
        Cell::ElectronHead,
        Cell::ElectronTail,
    ];

    pub fn ordinal(self) -> u8 {
        self as u8
    }

    /// Successor on the primary edit action: Dead → Wire → Head → Tail → Wire.
    pub fn cycled(self) -> Cell {
        match self {
            Cell::Dead => Cell::Wire,
            Cell::Wire => Cell::ElectronHead,
            Cell::ElectronHead => Cell::ElectronTail,
            Cell::ElectronTail => Cell::Wire,
        }
    }

    /// Anything but `Dead` can carry a signal.
    pub fn is_conductive(self) -> bool {
        self != Cell::Dead
    }
}

impl TryFrom<u8> for Cell {
    type Error = u8;

    fn try_from(ordinal: u8) -> Result<Self, Self::Error> {
        Cell::ALL.get(ordinal as usize).copied().ok_or(ordinal)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Cell::Dead => "dead",
            Cell::Wire => "wire",
            Cell::ElectronHead => "head",
            Cell::ElectronTail => "tail",
        };
        f.write_str(name)
    }
}
