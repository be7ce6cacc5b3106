//! Grid math
//!
//! Re-exports glam with the integer helpers the grid phases share.

pub use glam::*;

/// The eight neighbouring offsets, row by row.
pub const NEIGHBOR_OFFSETS: [IVec2; 8] = [
    IVec2::new(-1, -1),
    IVec2::new(0, -1),
    IVec2::new(1, -1),
    IVec2::new(-1, 0),
    IVec2::new(1, 0),
    IVec2::new(-1, 1),
    IVec2::new(0, 1),
    IVec2::new(1, 1),
];

/// One grid step from `from` toward `to`, per axis sign. Diagonals allowed.
#[inline]
pub fn step_toward(from: IVec2, to: IVec2) -> IVec2 {
    (to - from).signum()
}

/// Squared euclidean distance between two cells.
#[inline]
pub fn distance2(a: IVec2, b: IVec2) -> i32 {
    (a - b).length_squared()
}

/// Rectangle of valid cells `[0, width) x [0, height)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridBounds {
    pub width: i32,
    pub height: i32,
}

impl GridBounds {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        0 <= x && x < self.width && 0 <= y && y < self.height
    }

    #[inline]
    pub fn is_edge(&self, x: i32, y: i32) -> bool {
        x == 0 || y == 0 || x == self.width - 1 || y == self.height - 1
    }

    /// In-bounds neighbours of `(x, y)`.
    pub fn neighbors(&self, x: i32, y: i32) -> impl Iterator<Item = IVec2> + '_ {
        let centre = IVec2::new(x, y);
        NEIGHBOR_OFFSETS
            .iter()
            .map(move |offset| centre + *offset)
            .filter(move |cell| self.contains(cell.x, cell.y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_is_signed_per_axis() {
        assert_eq!(step_toward(IVec2::new(2, 2), IVec2::new(9, -4)), IVec2::new(1, -1));
        assert_eq!(step_toward(IVec2::new(2, 2), IVec2::new(2, 5)), IVec2::new(0, 1));
        assert_eq!(step_toward(IVec2::new(2, 2), IVec2::new(2, 2)), IVec2::ZERO);
    }

    #[test]
    fn corner_has_three_neighbors() {
        let bounds = GridBounds::new(5, 5);
        assert_eq!(bounds.neighbors(0, 0).count(), 3);
        assert_eq!(bounds.neighbors(2, 2).count(), 8);
        assert_eq!(bounds.neighbors(4, 2).count(), 5);
    }

    #[test]
    fn edges() {
        let bounds = GridBounds::new(5, 4);
        assert!(bounds.is_edge(0, 2));
        assert!(bounds.is_edge(2, 3));
        assert!(!bounds.is_edge(2, 2));
        assert!(!bounds.contains(5, 0));
    }
}
