//! Ballot layout: the party-symbol grid and the bands around it.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::domain::ballot::BorderDir;

pub const ROWS: u8 = 4;
pub const COLS: u8 = 5;

/// Symbols printed on the last row; the remaining last-row cells are decorative.
pub const LAST_ROW_SYMBOLS: u8 = 3;

/// Vertical extent of the symbol grid, in percent of ballot height.
pub const GRID_BAND_PCT: RangeInclusive<u8> = 20..=86;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartySymbol {
    pub name: &'static str,
    pub icon: &'static str,
}

pub const PARTY_SYMBOLS: [PartySymbol; 18] = [
    PartySymbol { name: "Tree", icon: "🌳" },
    PartySymbol { name: "Sun", icon: "☀️" },
    PartySymbol { name: "Bell", icon: "🔔" },
    PartySymbol { name: "Plough", icon: "🌾" },
    PartySymbol { name: "Umbrella", icon: "☂️" },
    PartySymbol { name: "Cow", icon: "🐄" },
    PartySymbol { name: "Pen", icon: "🖊️" },
    PartySymbol { name: "Lantern", icon: "🏮" },
    PartySymbol { name: "Boat", icon: "⛵" },
    PartySymbol { name: "Book", icon: "📖" },
    PartySymbol { name: "Key", icon: "🔑" },
    PartySymbol { name: "Bicycle", icon: "🚲" },
    PartySymbol { name: "House", icon: "🏠" },
    PartySymbol { name: "Fish", icon: "🐟" },
    PartySymbol { name: "Drum", icon: "🥁" },
    PartySymbol { name: "Rose", icon: "🌹" },
    PartySymbol { name: "Mountain", icon: "⛰️" },
    PartySymbol { name: "Lamp", icon: "🪔" },
];

const _: () = assert!(
    PARTY_SYMBOLS.len() == ((ROWS - 1) * COLS + LAST_ROW_SYMBOLS) as usize,
    "party symbol table must fill every non-decorative cell"
);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub row: u8,
    pub col: u8,
}

impl Cell {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Inside the grid bounds (decorative cells included).
    pub fn in_bounds(self) -> bool {
        self.row < ROWS && self.col < COLS
    }

    /// Carries a party symbol, so a mark here can express intent.
    pub fn is_playable(self) -> bool {
        self.in_bounds() && !(self.row == ROWS - 1 && self.col >= LAST_ROW_SYMBOLS)
    }

    pub fn symbol(self) -> Option<&'static PartySymbol> {
        if !self.is_playable() {
            return None;
        }
        PARTY_SYMBOLS.get((self.row * COLS + self.col) as usize)
    }

    /// The cell on the other side of the border in `dir`, if the grid has one.
    pub fn neighbour(self, dir: BorderDir) -> Option<Cell> {
        match dir {
            BorderDir::Right if self.col < COLS - 1 => Some(Cell::new(self.row, self.col + 1)),
            BorderDir::Bottom if self.row < ROWS - 1 => Some(Cell::new(self.row + 1, self.col)),
            _ => None,
        }
    }
}

/// All symbol cells in row-major order.
pub fn playable_cells() -> Vec<Cell> {
    (0..ROWS)
        .flat_map(|row| (0..COLS).map(move |col| Cell::new(row, col)))
        .filter(|cell| cell.is_playable())
        .collect()
}

/// Every (cell, direction) pair whose border separates two symbol cells.
pub fn border_positions() -> Vec<(Cell, BorderDir)> {
    playable_cells()
        .into_iter()
        .flat_map(|cell| [(cell, BorderDir::Right), (cell, BorderDir::Bottom)])
        .filter(|&(cell, dir)| cell.neighbour(dir).is_some_and(Cell::is_playable))
        .collect()
}
