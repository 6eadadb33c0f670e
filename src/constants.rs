use crate::cubie::Corner::{self, *};
use crate::cubie::Edge::{self, *};
use crate::facelet::Color;
use crate::moves::Move::{self, *};

pub const ALL_CORNERS: [Corner; 8] = [URF, UFL, ULB, UBR, DFR, DLF, DBL, DRB];
pub const ALL_EDGES: [Edge; 12] = [UR, UF, UL, UB, DR, DF, DL, DB, FR, FL, BL, BR];
pub const ALL_COLORS: [Color; 6] = [Color::U, Color::R, Color::F, Color::D, Color::L, Color::B];
pub const ALL_MOVES: [Move; 18] = [
    U, U2, U3, R, R2, R3, F, F2, F3, D, D2, D3, L, L2, L3, B, B2, B3,
];

pub const SOLVED: u16 = 0;

/// number of possible face moves
pub const N_MOVE: usize = 18;
/// 3^7 possible corner orientations
pub const N_TWIST: usize = 2187;
/// 2^11 possible edge orientations
pub const N_FLIP: usize = 2048;
/// C(12,4) possible positions of the four slice edges, order ignored
pub const N_SLICE: usize = 495;
/// 4! permutations of the four slice edges among themselves
pub const N_PERM_4: usize = 24;
/// 8! permutations of the eight non-slice edges
pub const N_EDGE8: usize = 40320;
/// 8! corner permutations
pub const N_CORNERS: usize = 40320;
/// 12! full edge permutations, used only for random cube generation
pub const N_EDGE: usize = 479001600;
