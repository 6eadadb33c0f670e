use std::fmt;

use crate::constants::{ALL_CORNERS, ALL_EDGES};
use crate::cubie::CubieCube;
use crate::error::Error;

/// Names the colors of the cube facelets: up, right, front, down, left, back.
#[rustfmt::skip]
#[derive(Debug, PartialEq, PartialOrd, Clone, Copy, Eq, Hash)]
pub enum Color {
    U, R, F, D, L, B,
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl TryFrom<(char, usize)> for Color {
    type Error = Error;
    fn try_from((value, index): (char, usize)) -> Result<Self, Self::Error> {
        match value {
            'U' => Ok(Color::U),
            'R' => Ok(Color::R),
            'F' => Ok(Color::F),
            'D' => Ok(Color::D),
            'L' => Ok(Color::L),
            'B' => Ok(Color::B),
            c => Err(Error::FaceletInvalidCharacter(c, index)),
        }
    }
}

/// Cube on the facelet level.
///
/// The facelet representation follows the ordering: U-R-F-D-L-B.
///
/// A solved facelet string is
/// `UUUUUUUUURRRRRRRRRFFFFFFFFFDDDDDDDDDLLLLLLLLLBBBBBBBBB`.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct FaceCube {
    pub f: [Color; 54],
}

#[rustfmt::skip]
pub const SOLVED_FACE_CUBE: FaceCube = FaceCube {
    f: [
        Color::U, Color::U, Color::U, Color::U, Color::U, Color::U, Color::U, Color::U, Color::U,
        Color::R, Color::R, Color::R, Color::R, Color::R, Color::R, Color::R, Color::R, Color::R,
        Color::F, Color::F, Color::F, Color::F, Color::F, Color::F, Color::F, Color::F, Color::F,
        Color::D, Color::D, Color::D, Color::D, Color::D, Color::D, Color::D, Color::D, Color::D,
        Color::L, Color::L, Color::L, Color::L, Color::L, Color::L, Color::L, Color::L, Color::L,
        Color::B, Color::B, Color::B, Color::B, Color::B, Color::B, Color::B, Color::B, Color::B,
    ],
};

impl Default for FaceCube {
    fn default() -> Self {
        SOLVED_FACE_CUBE
    }
}

impl TryFrom<&str> for FaceCube {
    type Error = Error;
    fn try_from(cube_string: &str) -> Result<Self, Self::Error> {
        if cube_string.chars().count() != 54 {
            return Err(Error::FaceletInvalidLength(cube_string.chars().count()));
        }

        let mut face_cube = FaceCube::default();
        for (i, c) in cube_string.chars().enumerate() {
            face_cube.f[i] = Color::try_from((c, i))?;
        }
        Ok(face_cube)
    }
}

impl fmt::Display for FaceCube {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.f.iter().fold(String::new(), |acc, c| format!("{acc}{c}"));
        write!(f, "{s}")
    }
}

impl TryFrom<&CubieCube> for FaceCube {
    type Error = Error;
    fn try_from(cc: &CubieCube) -> Result<Self, Self::Error> {
        cc.verify()?;

        let mut face = FaceCube::default();

        for (i, &c) in CENTER_FACELET.iter().enumerate() {
            face.f[c as usize] = CENTER_COLOR[i];
        }

        for (i, corner_faces) in CORNER_FACELET.iter().enumerate() {
            let corner = cc.cp[i] as usize;
            for (j, &facelet) in corner_faces.iter().enumerate() {
                face.f[facelet as usize] = CORNER_COLOR[corner][(j + 3 - cc.co[i] as usize) % 3];
            }
        }

        for (i, edge_faces) in EDGE_FACELET.iter().enumerate() {
            let edge = cc.ep[i] as usize;
            for (j, &facelet) in edge_faces.iter().enumerate() {
                face.f[facelet as usize] = EDGE_COLOR[edge][(j + cc.eo[i] as usize) % 2];
            }
        }

        Ok(face)
    }
}

impl TryFrom<&FaceCube> for CubieCube {
    type Error = Error;
    fn try_from(face: &FaceCube) -> Result<Self, Self::Error> {
        let mut cc = CubieCube::default();
        let mut corner_found = [false; 8];
        let mut edge_found = [false; 12];

        for i in 0..8 {
            let facelets = CORNER_FACELET[i];
            let mut ori = 0usize;
            for (k, &fac) in facelets.iter().enumerate() {
                if face.f[fac as usize] == Color::U || face.f[fac as usize] == Color::D {
                    ori = k;
                    break;
                }
            }
            let col1 = face.f[facelets[(ori + 1) % 3] as usize];
            let col2 = face.f[facelets[(ori + 2) % 3] as usize];

            let mut matched = false;
            for (j, colors) in CORNER_COLOR.iter().enumerate() {
                if colors[(ori + 1) % 3] == col1 && colors[(ori + 2) % 3] == col2 {
                    cc.cp[i] = ALL_CORNERS[j];
                    cc.co[i] = ori as u8;
                    corner_found[j] = true;
                    matched = true;
                    break;
                }
            }
            if !matched {
                return Err(Error::CubeVerificationFailed("facelet_corner_unmatched".into()));
            }
        }
        if corner_found.iter().any(|&found| !found) {
            return Err(Error::CubeVerificationFailed("not_all_corners_unique".into()));
        }

        for i in 0..12 {
            let facelets = EDGE_FACELET[i];
            let f0 = face.f[facelets[0] as usize];
            let f1 = face.f[facelets[1] as usize];

            let mut matched = false;
            for (j, colors) in EDGE_COLOR.iter().enumerate() {
                if f0 == colors[0] && f1 == colors[1] {
                    cc.ep[i] = ALL_EDGES[j];
                    cc.eo[i] = 0;
                    edge_found[j] = true;
                    matched = true;
                    break;
                }
                if f0 == colors[1] && f1 == colors[0] {
                    cc.ep[i] = ALL_EDGES[j];
                    cc.eo[i] = 1;
                    edge_found[j] = true;
                    matched = true;
                    break;
                }
            }
            if !matched {
                return Err(Error::CubeVerificationFailed("facelet_edge_unmatched".into()));
            }
        }
        if edge_found.iter().any(|&found| !found) {
            return Err(Error::CubeVerificationFailed("not_all_edges_unique".into()));
        }

        // Conversion stops here: it does not check orientation-sum parity
        // or edge/corner-permutation parity agreement. Those are `verify`'s
        // job, invoked separately by callers that need a legal cube.
        Ok(cc)
    }
}

/// The names of the facelet positions of the cube.
///
/// ```text
///             |************|
///             |*U1**U2**U3*|
///             |*U4**U5**U6*|
///             |*U7**U8**U9*|
/// ************|************|************|************|
/// *L1**L2**L3*|*F1**F2**F3*|*R1**R2**R3*|*B1**B2**B3*|
/// *L4**L5**L6*|*F4**F5**F6*|*R4**R5**R6*|*B4**B5**B6*|
/// *L7**L8**L9*|*F7**F8**F9*|*R7**R8**R9*|*B7**B8**B9*|
/// ************|************|************|************|
///             |*D1**D2**D3*|
///             |*D4**D5**D6*|
///             |*D7**D8**D9*|
///             |************|
/// ```
/// A facelet string "UBL..." means position U1 holds the U color, U2 holds
/// the B color, U3 holds the L color, and so on in the order U1..U9,
/// R1..R9, F1..F9, D1..D9, L1..L9, B1..B9.
#[rustfmt::skip]
#[allow(non_camel_case_types)]
#[derive(Debug, PartialEq, PartialOrd, Clone, Copy)]
pub enum Facelet {
    U1, U2, U3, U4, _U5, U6, U7, U8, U9,
    R1, R2, R3, R4, _R5, R6, R7, R8, R9,
    F1, F2, F3, F4, _F5, F6, F7, F8, F9,
    D1, D2, D3, D4, _D5, D6, D7, D8, D9,
    L1, L2, L3, L4, _L5, L6, L7, L8, L9,
    B1, B2, B3, B4, _B5, B6, B7, B8, B9,
}

pub const CENTER_FACELET: [Facelet; 6] = [
    Facelet::_U5, Facelet::_R5, Facelet::_F5, Facelet::_D5, Facelet::_L5, Facelet::_B5,
];

pub const CENTER_COLOR: [Color; 6] = [
    Color::U, Color::R, Color::F, Color::D, Color::L, Color::B,
];

/// Map the corner positions to facelet positions.
pub const CORNER_FACELET: [[Facelet; 3]; 8] = [
    [Facelet::U9, Facelet::R1, Facelet::F3], //URF
    [Facelet::U7, Facelet::F1, Facelet::L3], //UFL
    [Facelet::U1, Facelet::L1, Facelet::B3], //ULB
    [Facelet::U3, Facelet::B1, Facelet::R3], //UBR
    [Facelet::D3, Facelet::F9, Facelet::R7], //DFR
    [Facelet::D1, Facelet::L9, Facelet::F7], //DLF
    [Facelet::D7, Facelet::B9, Facelet::L7], //DBL
    [Facelet::D9, Facelet::R9, Facelet::B7], //DRB
];

/// Map the edge positions to facelet positions.
pub const EDGE_FACELET: [[Facelet; 2]; 12] = [
    [Facelet::U6, Facelet::R2],
    [Facelet::U8, Facelet::F2],
    [Facelet::U4, Facelet::L2],
    [Facelet::U2, Facelet::B2],
    [Facelet::D6, Facelet::R8],
    [Facelet::D2, Facelet::F8],
    [Facelet::D4, Facelet::L8],
    [Facelet::D8, Facelet::B8],
    [Facelet::F6, Facelet::R4],
    [Facelet::F4, Facelet::L6],
    [Facelet::B6, Facelet::L4],
    [Facelet::B4, Facelet::R6],
];

/// Map the corner positions to facelet colors.
pub const CORNER_COLOR: [[Color; 3]; 8] = [
    [Color::U, Color::R, Color::F],
    [Color::U, Color::F, Color::L],
    [Color::U, Color::L, Color::B],
    [Color::U, Color::B, Color::R],
    [Color::D, Color::F, Color::R],
    [Color::D, Color::L, Color::F],
    [Color::D, Color::B, Color::L],
    [Color::D, Color::R, Color::B],
];

/// Map the edge positions to facelet colors.
pub const EDGE_COLOR: [[Color; 2]; 12] = [
    [Color::U, Color::R],
    [Color::U, Color::F],
    [Color::U, Color::L],
    [Color::U, Color::B],
    [Color::D, Color::R],
    [Color::D, Color::F],
    [Color::D, Color::L],
    [Color::D, Color::B],
    [Color::F, Color::R],
    [Color::F, Color::L],
    [Color::B, Color::L],
    [Color::B, Color::R],
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solved_facelet_round_trips_to_solved_cubie() {
        let face = FaceCube::try_from(SOLVED_FACE_CUBE.to_string().as_str()).unwrap();
        assert_eq!(face, SOLVED_FACE_CUBE);
        let cc = CubieCube::try_from(&face).unwrap();
        assert_eq!(cc, CubieCube::default());
    }

    #[test]
    fn cubie_to_facelet_to_cubie_round_trips() {
        let mut cc = CubieCube::default();
        cc.randomize();
        let face = FaceCube::try_from(&cc).unwrap();
        let back = CubieCube::try_from(&face).unwrap();
        assert_eq!(cc, back);
    }

    #[test]
    fn rejects_wrong_length() {
        let s = "UUUUUUUUU".to_string() + &"R".repeat(44);
        assert_eq!(s.len(), 53);
        let err = FaceCube::try_from(s.as_str()).unwrap_err();
        assert!(matches!(err, Error::FaceletInvalidLength(53)));
    }

    #[test]
    fn rejects_invalid_character() {
        let mut s: Vec<char> = SOLVED_FACE_CUBE.to_string().chars().collect();
        s[51] = 'X';
        let s: String = s.into_iter().collect();
        let err = FaceCube::try_from(s.as_str()).unwrap_err();
        assert!(matches!(err, Error::FaceletInvalidCharacter('X', 51)));
    }
}
