//! Named hover shapes for the squares grid.

use smallvec::SmallVec;

/// Integer grid cell `(column, row)`.
pub type Cell = (i64, i64);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HoverPattern {
    #[default]
    Single,
    #[serde(alias = "cross")]
    Plus,
    /// Cells within Manhattan distance 2.
    Diamond,
    Square3x3,
    Square5x5,
    LineHorizontal,
    LineVertical,
    LShape,
}

impl HoverPattern {
    /// Offsets relative to the hovered cell, the hovered cell included.
    pub fn offsets(self) -> SmallVec<[Cell; 25]> {
        match self {
            Self::Single => SmallVec::from_slice(&[(0, 0)]),
            Self::Plus => SmallVec::from_slice(&[(0, 0), (-1, 0), (1, 0), (0, -1), (0, 1)]),
            Self::Diamond => square(2)
                .into_iter()
                .filter(|(dx, dy)| dx.abs() + dy.abs() <= 2)
                .collect(),
            Self::Square3x3 => square(1),
            Self::Square5x5 => square(2),
            Self::LineHorizontal => (-2..=2).map(|dx| (dx, 0)).collect(),
            Self::LineVertical => (-2..=2).map(|dy| (0, dy)).collect(),
            Self::LShape => SmallVec::from_slice(&[(0, 0), (0, 1), (0, 2), (1, 2)]),
        }
    }

    /// Cells highlighted when the pointer sits on `center`.
    pub fn cells(self, center: Cell) -> impl Iterator<Item = Cell> {
        self.offsets()
            .into_iter()
            .map(move |(dx, dy)| (center.0 + dx, center.1 + dy))
    }
}

fn square(radius: i64) -> SmallVec<[Cell; 25]> {
    let mut out = SmallVec::new();
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            out.push((dx, dy));
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/canvas/pattern.rs"]
mod tests;
