use std::fmt;

use rand::random;

use crate::constants::{ALL_CORNERS, ALL_EDGES, N_CORNERS, N_EDGE, N_EDGE8, N_FLIP, N_PERM_4, N_SLICE, N_TWIST};
use crate::error::{Error, VerifyError};
use crate::moves::{Move, B_MOVE, D_MOVE, F_MOVE, L_MOVE, R_MOVE, U_MOVE};

/// The 8 corner slots, described by the layer they sit in.
#[rustfmt::skip]
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
pub enum Corner {
    URF, UFL, ULB, UBR, DFR, DLF, DBL, DRB,
}

impl fmt::Display for Corner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl TryFrom<u8> for Corner {
    type Error = Error;
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        use Corner::*;
        match value {
            0 => Ok(URF),
            1 => Ok(UFL),
            2 => Ok(ULB),
            3 => Ok(UBR),
            4 => Ok(DFR),
            5 => Ok(DLF),
            6 => Ok(DBL),
            7 => Ok(DRB),
            _ => Err(Error::CubeVerificationFailed("invalid_corner_index".into())),
        }
    }
}

/// The 12 edge slots, described by the layers they sit between.
#[rustfmt::skip]
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
pub enum Edge {
    UR, UF, UL, UB, DR, DF, DL, DB, FR, FL, BL, BR,
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl TryFrom<u8> for Edge {
    type Error = Error;
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        use Edge::*;
        match value {
            0 => Ok(UR),
            1 => Ok(UF),
            2 => Ok(UL),
            3 => Ok(UB),
            4 => Ok(DR),
            5 => Ok(DF),
            6 => Ok(DL),
            7 => Ok(DB),
            8 => Ok(FR),
            9 => Ok(FL),
            10 => Ok(BL),
            11 => Ok(BR),
            _ => Err(Error::CubeVerificationFailed("invalid_edge_index".into())),
        }
    }
}

/// Cube on the cubie level: a group element over corner/edge permutation and
/// orientation. Moves compose by `multiply`; the six basic move cubes in
/// `crate::moves` are the generators.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct CubieCube {
    pub cp: [Corner; 8],
    pub co: [u8; 8],
    pub ep: [Edge; 12],
    pub eo: [u8; 12],
}

pub const SOLVED_CUBIE_CUBE: CubieCube = CubieCube {
    cp: [
        Corner::URF,
        Corner::UFL,
        Corner::ULB,
        Corner::UBR,
        Corner::DFR,
        Corner::DLF,
        Corner::DBL,
        Corner::DRB,
    ],
    co: [0, 0, 0, 0, 0, 0, 0, 0],
    ep: [
        Edge::UR,
        Edge::UF,
        Edge::UL,
        Edge::UB,
        Edge::DR,
        Edge::DF,
        Edge::DL,
        Edge::DB,
        Edge::FR,
        Edge::FL,
        Edge::BL,
        Edge::BR,
    ],
    eo: [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
};

impl Default for CubieCube {
    fn default() -> Self {
        SOLVED_CUBIE_CUBE
    }
}

impl fmt::Display for CubieCube {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = String::new();
        for i in 0..8 {
            s.push_str(&format!("({},{})", self.cp[i], self.co[i]));
        }
        for i in 0..12 {
            s.push_str(&format!("({},{})", self.ep[i], self.eo[i]));
        }
        write!(f, "{s}")
    }
}

/// Six basic move cube constants, accessed by face index 0..5 (U,R,F,D,L,B).
pub fn basic_move_cubes() -> [CubieCube; 6] {
    [U_MOVE, R_MOVE, F_MOVE, D_MOVE, L_MOVE, B_MOVE]
}

impl CubieCube {
    /// Multiply this cube with `b`, restricted to the corners.
    /// `cp'[i] = self.cp[b.cp[i]]`; `co'[i] = (self.co[b.cp[i]] + b.co[i]) mod 3`.
    pub fn corner_multiply(&mut self, b: CubieCube) {
        let mut cp = [Corner::URF; 8];
        let mut co = [0u8; 8];
        for i in 0..8 {
            cp[i] = self.cp[b.cp[i] as usize];
            co[i] = (self.co[b.cp[i] as usize] + b.co[i]) % 3;
        }
        self.cp = cp;
        self.co = co;
    }

    /// Multiply this cube with `b`, restricted to the edges, `mod 2`.
    pub fn edge_multiply(&mut self, b: CubieCube) {
        let mut ep = [Edge::UR; 12];
        let mut eo = [0u8; 12];
        for i in 0..12 {
            ep[i] = self.ep[b.ep[i] as usize];
            eo[i] = (self.eo[b.ep[i] as usize] + b.eo[i]) % 2;
        }
        self.ep = ep;
        self.eo = eo;
    }

    /// `corner_multiply` composed with `edge_multiply`.
    pub fn multiply(&mut self, b: CubieCube) {
        self.corner_multiply(b);
        self.edge_multiply(b);
    }

    /// Compose with the i-th basic move cube (i in 0..5: U,R,F,D,L,B).
    pub fn apply_move(&mut self, i: usize) {
        self.multiply(basic_move_cubes()[i]);
    }

    /// Composes `self` in place with each move in `moves`, in order, by
    /// repeatedly multiplying the move's basic face turn.
    pub fn multiply_moves(&mut self, moves: &[Move]) {
        let bmc = basic_move_cubes();
        for &m in moves {
            for _ in 0..(m.index() % 3 + 1) {
                self.multiply(bmc[m.face()]);
            }
        }
    }

    /// Returns a new cube obtained by composing `self` with each move in
    /// `moves`, in order, without mutating `self`.
    pub fn apply_moves(&self, moves: &[Move]) -> CubieCube {
        let mut c = *self;
        c.multiply_moves(moves);
        c
    }

    /// Classic permutation inverse; orientations negated modulo their base
    /// and re-indexed through the inverse permutation.
    pub fn inverse(&self) -> Self {
        let mut d = CubieCube::default();
        for (e, &ei) in ALL_EDGES.iter().enumerate() {
            d.ep[self.ep[e] as usize] = ei;
        }
        for e in 0..12 {
            d.eo[e] = self.eo[d.ep[e] as usize];
        }
        for (c, &ci) in ALL_CORNERS.iter().enumerate() {
            d.cp[self.cp[c] as usize] = ci;
        }
        for c in 0..8 {
            let ori = self.co[d.cp[c] as usize];
            d.co[c] = (3 - ori) % 3;
        }
        d
    }

    /// Parity (number of inversions mod 2) of the corner permutation. `true`
    /// means even.
    pub fn corner_parity(&self) -> bool {
        let mut s = 0;
        for i in (1..8).rev() {
            for j in (0..i).rev() {
                if self.cp[j] > self.cp[i] {
                    s += 1;
                }
            }
        }
        s % 2 == 0
    }

    /// Parity (number of inversions mod 2) of the edge permutation.
    pub fn edge_parity(&self) -> bool {
        let mut s = 0;
        for i in (1..12).rev() {
            for j in (0..i).rev() {
                if self.ep[j] > self.ep[i] {
                    s += 1;
                }
            }
        }
        s % 2 == 0
    }

    /// Checks every invariant of a legal cube, returning the first violation
    /// found.
    pub fn verify(&self) -> Result<(), VerifyError> {
        let mut edge_count = [0u8; 12];
        for &e in &self.ep {
            edge_count[e as usize] += 1;
        }
        if edge_count.iter().any(|&c| c != 1) {
            return Err(VerifyError::NotAllEdgesUnique);
        }

        let mut corner_count = [0u8; 8];
        for &c in &self.cp {
            corner_count[c as usize] += 1;
        }
        if corner_count.iter().any(|&c| c != 1) {
            return Err(VerifyError::NotAllCornersUnique);
        }

        if self.eo.iter().map(|&x| x as u32).sum::<u32>() % 2 != 0 {
            return Err(VerifyError::EdgeOrientationInvalid);
        }

        if self.co.iter().map(|&x| x as u32).sum::<u32>() % 3 != 0 {
            return Err(VerifyError::CornerOrientationInvalid);
        }

        if self.edge_parity() != self.corner_parity() {
            return Err(VerifyError::ParityMismatch);
        }

        Ok(())
    }

    /// twist = Σ co[i]·3^(6-i) for i in 0..7; co[7] is forced by the parity
    /// invariant and excluded.
    pub fn get_twist(&self) -> u16 {
        let mut twist: u16 = 0;
        for i in 0..7 {
            twist = 3 * twist + self.co[i] as u16;
        }
        twist
    }

    pub fn set_twist(&mut self, twist: u16) {
        let mut twistparity: u16 = 0;
        let mut twist = twist;
        for i in (0..7).rev() {
            self.co[i] = (twist % 3) as u8;
            twistparity += self.co[i] as u16;
            twist /= 3;
        }
        self.co[7] = ((3 - twistparity % 3) % 3) as u8;
    }

    /// flip analogous to twist, base 2 over eo[0..10]; eo[11] forced.
    pub fn get_flip(&self) -> u16 {
        let mut flip: u16 = 0;
        for i in 0..11 {
            flip = 2 * flip + self.eo[i] as u16;
        }
        flip
    }

    pub fn set_flip(&mut self, flip: u16) {
        let mut flipparity: u16 = 0;
        let mut flip = flip;
        for i in (0..11).rev() {
            self.eo[i] = (flip % 2) as u8;
            flipparity += self.eo[i] as u16;
            flip /= 2;
        }
        self.eo[11] = ((2 - flipparity % 2) % 2) as u8;
    }

    /// Combinatorial rank of the set of positions occupied by slice edges
    /// (FR, FL, BL, BR), ignoring their mutual order.
    pub fn get_udslice(&self) -> u16 {
        let mut a = 0u32;
        let mut x = 0u32;
        for j in (0..12).rev() {
            if self.ep[j] >= Edge::FR {
                a += c_nk(11 - j as u32, x + 1);
                x += 1;
            }
        }
        a as u16
    }

    /// Places the slice edges at the positions implied by `idx`, in
    /// canonical order FR,FL,BL,BR, and the remaining edges (canonical
    /// order) into what's left. Only the positions matter here; `set_edge4`
    /// fixes up their mutual order afterward.
    pub fn set_udslice(&mut self, idx: u16) {
        const SLICE_EDGE: [Edge; 4] = [Edge::FR, Edge::FL, Edge::BL, Edge::BR];
        const OTHER_EDGE: [Edge; 8] = [
            Edge::UR,
            Edge::UF,
            Edge::UL,
            Edge::UB,
            Edge::DR,
            Edge::DF,
            Edge::DL,
            Edge::DB,
        ];
        let mut a = idx as u32;
        let mut placed = [false; 12];

        let mut x = 4i32;
        for j in 0..12u32 {
            if a >= c_nk(11 - j, x as u32) {
                self.ep[j as usize] = SLICE_EDGE[(4 - x) as usize];
                placed[j as usize] = true;
                a -= c_nk(11 - j, x as u32);
                x -= 1;
            }
        }
        let mut x = 0usize;
        for j in 0..12 {
            if !placed[j] {
                self.ep[j] = OTHER_EDGE[x];
                x += 1;
            }
        }
    }

    /// Lehmer-code rank of the slice edges among themselves. Only meaningful
    /// once `get_udslice() == 0` (the slice edges occupy slots 8..11).
    pub fn get_edge4(&self) -> u16 {
        lehmer_rank(&self.ep[8..12], &[Edge::FR, Edge::FL, Edge::BL, Edge::BR])
    }

    pub fn set_edge4(&mut self, idx: u16) {
        let perm = lehmer_unrank(idx, &[Edge::FR, Edge::FL, Edge::BL, Edge::BR]);
        self.ep[8..12].copy_from_slice(&perm);
    }

    /// Lehmer-code rank of the eight non-slice edges among themselves. Only
    /// meaningful once `get_udslice() == 0` (they occupy slots 0..7).
    pub fn get_edge8(&self) -> u16 {
        const CANON: [Edge; 8] = [
            Edge::UR,
            Edge::UF,
            Edge::UL,
            Edge::UB,
            Edge::DR,
            Edge::DF,
            Edge::DL,
            Edge::DB,
        ];
        lehmer_rank(&self.ep[0..8], &CANON)
    }

    pub fn set_edge8(&mut self, idx: u16) {
        const CANON: [Edge; 8] = [
            Edge::UR,
            Edge::UF,
            Edge::UL,
            Edge::UB,
            Edge::DR,
            Edge::DF,
            Edge::DL,
            Edge::DB,
        ];
        let perm = lehmer_unrank(idx, &CANON);
        self.ep[0..8].copy_from_slice(&perm);
    }

    /// Lehmer-code rank of the corner permutation.
    pub fn get_corners(&self) -> u16 {
        lehmer_rank(&self.cp, &ALL_CORNERS)
    }

    pub fn set_corners(&mut self, idx: u16) {
        self.cp = lehmer_unrank(idx, &ALL_CORNERS);
    }

    /// Full 12! edge permutation rank, used only for random cube generation.
    pub fn get_edge(&self) -> u32 {
        lehmer_rank_wide(&self.ep, &ALL_EDGES)
    }

    pub fn set_edge(&mut self, idx: u32) {
        self.ep = lehmer_unrank_wide(idx, &ALL_EDGES);
    }

    /// Picks a uniformly random legal cube: flip and twist uniform, then
    /// corner/edge permutations redrawn until their parities agree.
    pub fn randomize(&mut self) {
        self.set_edge(random::<u32>() % (N_EDGE as u32));
        loop {
            let corner_idx = (random::<u32>() % (N_CORNERS as u32)) as u16;
            self.set_corners(corner_idx);
            if self.edge_parity() == self.corner_parity() {
                break;
            }
            self.set_edge(random::<u32>() % (N_EDGE as u32));
        }
        self.set_flip((random::<u32>() % (N_FLIP as u32)) as u16);
        self.set_twist((random::<u32>() % (N_TWIST as u32)) as u16);
    }
}

/// Rotate the slice `arr[left..=right]` right by one (last element wraps to
/// front).
fn rotate_right<T: Copy>(arr: &mut [T], left: usize, right: usize) {
    let temp = arr[right];
    for i in (left + 1..=right).rev() {
        arr[i] = arr[i - 1];
    }
    arr[left] = temp;
}

/// Rotate the slice `arr[left..=right]` left by one (first element wraps to
/// back).
fn rotate_left<T: Copy>(arr: &mut [T], left: usize, right: usize) {
    let temp = arr[left];
    for i in left..right {
        arr[i] = arr[i + 1];
    }
    arr[right] = temp;
}

/// Binomial coefficient `n choose k`.
fn c_nk(n: u32, k: u32) -> u32 {
    let mut k = k;
    if n < k {
        return 0;
    }
    if k > n / 2 {
        k = n - k;
    }
    let mut s = 1u32;
    let mut i = n;
    let mut j = 1u32;
    while i != n - k {
        s *= i;
        s /= j;
        i -= 1;
        j += 1;
    }
    s
}

/// Factorial-number-system rank of `perm` relative to `canon`, both of
/// length n: counts, for each position from the end, how many rotations
/// bring the canonical value into place.
fn lehmer_rank<T: Copy + PartialEq, const N: usize>(perm: &[T], canon: &[T; N]) -> u16 {
    let mut work: [T; N] = *canon;
    work.copy_from_slice(perm);
    let mut b: u32 = 0;
    for j in (1..N).rev() {
        let mut k = 0u32;
        while work[j] != canon[j] {
            rotate_left(&mut work, 0, j);
            k += 1;
        }
        b = (j as u32 + 1) * b + k;
    }
    b as u16
}

/// Inverse of `lehmer_rank`: reconstructs the permutation with rank `idx`
/// relative to `canon`.
fn lehmer_unrank<T: Copy, const N: usize>(idx: u16, canon: &[T; N]) -> [T; N] {
    let mut perm: [T; N] = *canon;
    let mut idx = idx as u32;
    for j in 0..N {
        let mut k = idx % (j as u32 + 1);
        idx /= j as u32 + 1;
        while k > 0 {
            rotate_right(&mut perm, 0, j);
            k -= 1;
        }
    }
    perm
}

/// Same as `lehmer_rank` but widened to `u32`, for the 12! full edge
/// permutation which overflows `u16`.
fn lehmer_rank_wide<T: Copy + PartialEq, const N: usize>(perm: &[T], canon: &[T; N]) -> u32 {
    let mut work: [T; N] = *canon;
    work.copy_from_slice(perm);
    let mut b: u32 = 0;
    for j in (1..N).rev() {
        let mut k = 0u32;
        while work[j] != canon[j] {
            rotate_left(&mut work, 0, j);
            k += 1;
        }
        b = (j as u32 + 1) * b + k;
    }
    b
}

/// Same as `lehmer_unrank` but taking a `u32` rank.
fn lehmer_unrank_wide<T: Copy, const N: usize>(idx: u32, canon: &[T; N]) -> [T; N] {
    let mut perm: [T; N] = *canon;
    let mut idx = idx;
    for j in 0..N {
        let mut k = idx % (j as u32 + 1);
        idx /= j as u32 + 1;
        while k > 0 {
            rotate_right(&mut perm, 0, j);
            k -= 1;
        }
    }
    perm
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::{B_MOVE, D_MOVE, F_MOVE, L_MOVE, R_MOVE, U_MOVE};

    #[test]
    fn solved_is_default() {
        assert_eq!(CubieCube::default(), SOLVED_CUBIE_CUBE);
        assert!(CubieCube::default().verify().is_ok());
    }

    #[test]
    fn move_to_the_fourth_is_identity() {
        for mv in [U_MOVE, R_MOVE, F_MOVE, D_MOVE, L_MOVE, B_MOVE] {
            let mut c = CubieCube::default();
            for _ in 0..4 {
                c.multiply(mv);
            }
            assert_eq!(c, CubieCube::default());
        }
    }

    #[test]
    fn inverse_of_inverse_is_identity() {
        let mut c = CubieCube::default();
        c.multiply(R_MOVE);
        c.multiply(U_MOVE);
        c.multiply(F_MOVE);
        let ic = c.inverse();
        let iic = ic.inverse();
        assert_eq!(c, iic);
        let mut product = ic;
        product.multiply(c);
        assert_eq!(product, CubieCube::default());
    }

    #[test]
    fn twist_round_trips() {
        let mut c = CubieCube::default();
        for t in 0..N_TWIST as u16 {
            c.set_twist(t);
            assert_eq!(c.get_twist(), t);
        }
    }

    #[test]
    fn flip_round_trips() {
        let mut c = CubieCube::default();
        for f in (0..N_FLIP as u16).step_by(37) {
            c.set_flip(f);
            assert_eq!(c.get_flip(), f);
        }
    }

    #[test]
    fn udslice_round_trips() {
        let mut c = CubieCube::default();
        for s in 0..N_SLICE as u16 {
            c.set_udslice(s);
            assert_eq!(c.get_udslice(), s);
        }
    }

    #[test]
    fn corners_round_trip() {
        let mut c = CubieCube::default();
        for i in (0..N_CORNERS as u16).step_by(977) {
            c.set_corners(i);
            assert_eq!(c.get_corners(), i);
        }
    }

    #[test]
    fn edge4_round_trips() {
        let mut c = CubieCube::default();
        for i in 0..N_PERM_4 as u16 {
            c.set_edge4(i);
            assert_eq!(c.get_edge4(), i);
        }
    }

    #[test]
    fn edge8_round_trips() {
        let mut c = CubieCube::default();
        for i in (0..N_EDGE8 as u16).step_by(977) {
            c.set_edge8(i);
            assert_eq!(c.get_edge8(), i);
        }
    }

    #[test]
    fn parity_matches_after_move() {
        let mut c = CubieCube::default();
        c.multiply(R_MOVE);
        c.multiply(U_MOVE);
        c.multiply(R_MOVE);
        c.multiply(U_MOVE);
        assert_eq!(c.edge_parity(), c.corner_parity());
        assert_eq!(c.co.iter().map(|&x| x as u32).sum::<u32>() % 3, 0);
        assert_eq!(c.eo.iter().map(|&x| x as u32).sum::<u32>() % 2, 0);
    }

    #[test]
    fn randomize_always_verifies() {
        for _ in 0..50 {
            let mut c = CubieCube::default();
            c.randomize();
            assert!(c.verify().is_ok());
        }
    }

    #[test]
    fn apply_moves_matches_repeated_apply_move() {
        let mut c = CubieCube::default();
        c.multiply_moves(&[Move::R, Move::U, Move::R3, Move::U3]);
        let mut expected = CubieCube::default();
        expected.multiply(R_MOVE);
        expected.multiply(U_MOVE);
        expected.multiply(R_MOVE);
        expected.multiply(R_MOVE);
        expected.multiply(R_MOVE);
        expected.multiply(U_MOVE);
        expected.multiply(U_MOVE);
        expected.multiply(U_MOVE);
        assert_eq!(c, expected);
    }

    #[test]
    fn apply_moves_does_not_mutate_receiver() {
        let c = CubieCube::default();
        let moved = c.apply_moves(&[Move::R, Move::U]);
        assert_eq!(c, CubieCube::default());
        assert_ne!(moved, c);
    }
}
