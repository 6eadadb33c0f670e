use std::{fmt, str::FromStr};

use self::Move::*;
use crate::cubie::{Corner::*, CubieCube, Edge::*};
use crate::error::Error;

/// Layer moves, Up, Right, Front, Down, Left, Back.
///
/// Plain = clockwise, `2` = double, `3` = counter-clockwise (rendered `'`).
#[rustfmt::skip]
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Move {
    U, U2, U3,
    R, R2, R3,
    F, F2, F3,
    D, D2, D3,
    L, L2, L3,
    B, B2, B3,
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            U3 => write!(f, "U'"),
            D3 => write!(f, "D'"),
            R3 => write!(f, "R'"),
            L3 => write!(f, "L'"),
            F3 => write!(f, "F'"),
            B3 => write!(f, "B'"),
            _ => write!(f, "{:?}", self),
        }
    }
}

impl FromStr for Move {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "R" => Ok(R),
            "R'" => Ok(R3),
            "R2" => Ok(R2),
            "L" => Ok(L),
            "L'" => Ok(L3),
            "L2" => Ok(L2),
            "U" => Ok(U),
            "U'" => Ok(U3),
            "U2" => Ok(U2),
            "D" => Ok(D),
            "D'" => Ok(D3),
            "D2" => Ok(D2),
            "F" => Ok(F),
            "F'" => Ok(F3),
            "F2" => Ok(F2),
            "B" => Ok(B),
            "B'" => Ok(B3),
            "B2" => Ok(B2),
            _ => Err(Error::InvalidScramble(s.to_string())),
        }
    }
}

#[rustfmt::skip]
impl Move {
    /// Index 0..17 into the six basic-move-cube/move-table layout: face =
    /// `idx / 3` (U,R,F,D,L,B), power = `idx % 3` (quarter, half, three-quarter).
    pub fn index(self) -> usize {
        match self {
            U => 0, U2 => 1, U3 => 2,
            R => 3, R2 => 4, R3 => 5,
            F => 6, F2 => 7, F3 => 8,
            D => 9, D2 => 10, D3 => 11,
            L => 12, L2 => 13, L3 => 14,
            B => 15, B2 => 16, B3 => 17,
        }
    }

    /// Which of the six faces (0..5: U,R,F,D,L,B) this move turns.
    pub fn face(self) -> usize {
        self.index() / 3
    }

    pub fn is_inverse(&self, other: Move) -> bool {
        matches!(
            (&self, other),
            (U | U2 | U3, D | D2 | D3)
            | (R | R2 | R3, L | L2 | L3)
            | (F | F2 | F3, B | B2 | B3),
        )
    }

    pub fn is_same_layer(&self, other: Move) -> bool {
        matches!(
            (&self, other),
            (U | U2 | U3, U | U2 | U3)
            | (D | D2 | D3, D | D2 | D3)
            | (R | R2 | R3, R | R2 | R3)
            | (L | L2 | L3, L | L2 | L3)
            | (F | F2 | F3, F | F2 | F3)
            | (B | B2 | B3, B | B2 | B3)
        )
    }

    pub fn get_inverse(self) -> Self {
        match self {
            U => U3, U3 => U,
            U2 => U2,
            D => D3, D3 => D,
            D2 => D2,
            R => R3, R3 => R,
            R2 => R2,
            L => L3, L3 => L,
            L2 => L2,
            F => F3, F3 => F,
            F2 => F2,
            B => B3, B3 => B,
            B2 => B2,
        }
    }
}

/// The basic move cube for a clockwise quarter turn of U.
pub const U_MOVE: CubieCube = CubieCube {
    cp: [UBR, URF, UFL, ULB, DFR, DLF, DBL, DRB],
    co: [0, 0, 0, 0, 0, 0, 0, 0],
    ep: [UB, UR, UF, UL, DR, DF, DL, DB, FR, FL, BL, BR],
    eo: [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
};

/// The basic move cube for a clockwise quarter turn of R.
pub const R_MOVE: CubieCube = CubieCube {
    cp: [DFR, UFL, ULB, URF, DRB, DLF, DBL, UBR],
    co: [2, 0, 0, 1, 1, 0, 0, 2],
    ep: [FR, UF, UL, UB, BR, DF, DL, DB, DR, FL, BL, UR],
    eo: [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
};

/// The basic move cube for a clockwise quarter turn of F.
pub const F_MOVE: CubieCube = CubieCube {
    cp: [UFL, DLF, ULB, UBR, URF, DFR, DBL, DRB],
    co: [1, 2, 0, 0, 2, 1, 0, 0],
    ep: [UR, FL, UL, UB, DR, FR, DL, DB, UF, DF, BL, BR],
    eo: [0, 1, 0, 0, 0, 1, 0, 0, 1, 1, 0, 0],
};

/// The basic move cube for a clockwise quarter turn of D.
pub const D_MOVE: CubieCube = CubieCube {
    cp: [URF, UFL, ULB, UBR, DLF, DBL, DRB, DFR],
    co: [0, 0, 0, 0, 0, 0, 0, 0],
    ep: [UR, UF, UL, UB, DF, DL, DB, DR, FR, FL, BL, BR],
    eo: [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
};

/// The basic move cube for a clockwise quarter turn of L.
pub const L_MOVE: CubieCube = CubieCube {
    cp: [URF, ULB, DBL, UBR, DFR, UFL, DLF, DRB],
    co: [0, 1, 2, 0, 0, 2, 1, 0],
    ep: [UR, UF, BL, UB, DR, DF, FL, DB, FR, UL, DL, BR],
    eo: [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
};

/// The basic move cube for a clockwise quarter turn of B.
pub const B_MOVE: CubieCube = CubieCube {
    cp: [URF, UFL, UBR, DRB, DFR, DLF, ULB, DBL],
    co: [0, 0, 1, 2, 0, 0, 2, 1],
    ep: [UR, UF, UL, BR, DR, DF, DL, BL, FR, FL, UB, DB],
    eo: [0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 1, 1],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_round_trips_through_from_str() {
        for mv in [
            U, U2, U3, R, R2, R3, F, F2, F3, D, D2, D3, L, L2, L3, B, B2, B3,
        ] {
            let rendered = mv.to_string();
            let parsed: Move = rendered.parse().unwrap();
            assert_eq!(mv, parsed);
        }
    }

    #[test]
    fn from_str_rejects_garbage() {
        assert!("Q".parse::<Move>().is_err());
        assert!("".parse::<Move>().is_err());
        assert!("U4".parse::<Move>().is_err());
    }

    #[test]
    fn inverse_is_involutive() {
        for mv in [U, R, F, D, L, B, U2, R2, F2, D2, L2, B2, U3, R3, F3, D3, L3, B3] {
            assert_eq!(mv.get_inverse().get_inverse(), mv);
        }
    }

    #[test]
    fn same_layer_opposite_moves() {
        assert!(U.is_same_layer(U3));
        assert!(!U.is_same_layer(D));
        assert!(U.is_inverse(D2));
        assert!(!U.is_inverse(R));
    }

    #[test]
    fn index_is_a_bijection_0_to_17() {
        let moves = [
            U, U2, U3, R, R2, R3, F, F2, F3, D, D2, D3, L, L2, L3, B, B2, B3,
        ];
        let mut seen = [false; 18];
        for mv in moves {
            seen[mv.index()] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }
}
