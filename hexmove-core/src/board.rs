//! Hex grid geometry with axial coordinates

use serde::{Deserialize, Serialize};

/// Axial hex coordinates
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Hex {
    pub q: i32,
    pub r: i32,
}

impl Hex {
    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// Distance between two hexes
    pub fn distance_to(&self, other: Hex) -> i32 {
        let dq = (self.q - other.q).abs();
        let dr = (self.r - other.r).abs();
        let ds = ((self.q + self.r) - (other.q + other.r)).abs();
        (dq + dr + ds) / 2
    }

    /// Get neighbor in direction (0-5)
    pub fn neighbor(&self, direction: u8) -> Hex {
        let (dq, dr) = DIRECTIONS[direction as usize % 6];
        Hex::new(self.q + dq, self.r + dr)
    }

    /// Direction of an adjacent hex, `None` if `other` is not a neighbor
    pub fn direction_to(&self, other: Hex) -> Option<u8> {
        let delta = (other.q - self.q, other.r - self.r);
        DIRECTIONS
            .iter()
            .position(|&d| d == delta)
            .map(|d| d as u8)
    }

    /// The two hexes flanking a step from `self` towards `direction`.
    ///
    /// Both flanks touch the origin and the destination, so they are the only
    /// tiles that can exert zone of control on the step.
    pub fn flanks(&self, direction: u8) -> [Hex; 2] {
        let [right, left] = flank_directions(direction);
        [self.neighbor(right), self.neighbor(left)]
    }
}

impl std::fmt::Display for Hex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.q, self.r)
    }
}

impl std::str::FromStr for Hex {
    type Err = String;

    /// Parse `q,r`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (q, r) = s
            .trim()
            .trim_start_matches('(')
            .trim_end_matches(')')
            .split_once(',')
            .ok_or_else(|| format!("expected q,r but got {s:?}"))?;
        let q = q.trim().parse::<i32>().map_err(|e| format!("bad q in {s:?}: {e}"))?;
        let r = r.trim().parse::<i32>().map_err(|e| format!("bad r in {s:?}: {e}"))?;
        Ok(Hex::new(q, r))
    }
}

/// Direction vectors in axial coordinates (dq, dr)
/// Index: 0=N, 1=NE, 2=SE, 3=S, 4=SW, 5=NW (clockwise)
pub const DIRECTIONS: [(i32, i32); 6] = [
    (0, -1),  // N
    (1, -1),  // NE
    (1, 0),   // SE
    (0, 1),   // S
    (-1, 1),  // SW
    (-1, 0),  // NW
];

pub const NORTH: u8 = 0;
pub const NORTH_EAST: u8 = 1;
pub const SOUTH_EAST: u8 = 2;
pub const SOUTH: u8 = 3;
pub const SOUTH_WEST: u8 = 4;
pub const NORTH_WEST: u8 = 5;

/// Clockwise and counter-clockwise neighbors of a direction
pub fn flank_directions(direction: u8) -> [u8; 2] {
    [(direction + 1) % 6, (direction + 5) % 6]
}

/// Bitmask with only `direction` set, for per-edge flags such as rivers
pub const fn edge_bit(direction: u8) -> u8 {
    1 << (direction % 6)
}
