//! Move tables: O(1) coordinate transitions indexed by move code `0..17`
//! (`3*face + (power-1)`). Built once by walking the coordinate graph with a
//! scratch cubie cube, then cached to disk.

use std::fs;

use crate::constants::{N_CORNERS, N_EDGE8, N_FLIP, N_MOVE, N_PERM_4, N_SLICE, N_TWIST};
use crate::cubie::{basic_move_cubes, CubieCube};
use crate::error::Error;
use crate::{decode_table, write_table};

/// Move code `0..17` for face `0..5` (U,R,F,D,L,B) and power `1..3`
/// (quarter, half, three-quarter turn).
pub fn move_code(face: usize, power: usize) -> usize {
    3 * face + (power - 1)
}

/// `true` for the ten moves that stay inside G1 (U,D any power; R,F,L,B
/// only a half turn) — the only moves whose edge4/edge8/corner transition is
/// defined.
fn is_g1_move(face: usize, power: usize) -> bool {
    face == 0 || face == 3 || power == 2
}

fn build_phase1_table<F, G>(
    fname: &str,
    n_coord: usize,
    mut set: F,
    mut get: G,
    apply: fn(&mut CubieCube, CubieCube),
) -> Result<Vec<i32>, Error>
where
    F: FnMut(&mut CubieCube, u16),
    G: FnMut(&CubieCube) -> i32,
{
    let cached = fs::read(fname).unwrap_or_default();
    if !cached.is_empty() {
        return decode_table(&cached);
    }

    eprintln!("building {fname}...");
    let bmc = basic_move_cubes();
    let mut table = vec![0i32; n_coord * N_MOVE];
    let mut a = CubieCube::default();
    for x in 0..n_coord {
        if x % 200 == 0 {
            eprint!(".");
        }
        set(&mut a, x as u16);
        for face in 0..6 {
            for power in 1..=3 {
                apply(&mut a, bmc[face]);
                table[N_MOVE * x + move_code(face, power)] = get(&a);
            }
            apply(&mut a, bmc[face]);
        }
    }
    eprintln!();
    if let Err(e) = write_table(fname, &table) {
        eprintln!("warning: failed to cache {fname}: {e}");
    }
    Ok(table)
}

fn build_phase2_table<F, G>(
    fname: &str,
    n_coord: usize,
    mut set: F,
    mut get: G,
    apply: fn(&mut CubieCube, CubieCube),
) -> Result<Vec<i32>, Error>
where
    F: FnMut(&mut CubieCube, u16),
    G: FnMut(&CubieCube) -> i32,
{
    let cached = fs::read(fname).unwrap_or_default();
    if !cached.is_empty() {
        return decode_table(&cached);
    }

    eprintln!("building {fname}...");
    let bmc = basic_move_cubes();
    let mut table = vec![-1i32; n_coord * N_MOVE];
    let mut a = CubieCube::default();
    for x in 0..n_coord {
        if x % 2000 == 0 {
            eprint!(".");
        }
        set(&mut a, x as u16);
        for face in 0..6 {
            for power in 1..=3 {
                apply(&mut a, bmc[face]);
                if is_g1_move(face, power) {
                    table[N_MOVE * x + move_code(face, power)] = get(&a);
                }
            }
            apply(&mut a, bmc[face]);
        }
    }
    eprintln!();
    if let Err(e) = write_table(fname, &table) {
        eprintln!("warning: failed to cache {fname}: {e}");
    }
    Ok(table)
}

pub fn twist_move() -> Result<Vec<i32>, Error> {
    build_phase1_table(
        "tables/move_twist",
        N_TWIST,
        CubieCube::set_twist,
        |c| c.get_twist() as i32,
        CubieCube::corner_multiply,
    )
}

pub fn flip_move() -> Result<Vec<i32>, Error> {
    build_phase1_table(
        "tables/move_flip",
        N_FLIP,
        CubieCube::set_flip,
        |c| c.get_flip() as i32,
        CubieCube::edge_multiply,
    )
}

pub fn udslice_move() -> Result<Vec<i32>, Error> {
    build_phase1_table(
        "tables/move_udslice",
        N_SLICE,
        CubieCube::set_udslice,
        |c| c.get_udslice() as i32,
        CubieCube::edge_multiply,
    )
}

pub fn edge4_move() -> Result<Vec<i32>, Error> {
    build_phase2_table(
        "tables/move_edge4",
        N_PERM_4,
        CubieCube::set_edge4,
        |c| c.get_edge4() as i32,
        CubieCube::edge_multiply,
    )
}

pub fn edge8_move() -> Result<Vec<i32>, Error> {
    build_phase2_table(
        "tables/move_edge8",
        N_EDGE8,
        CubieCube::set_edge8,
        |c| c.get_edge8() as i32,
        CubieCube::edge_multiply,
    )
}

pub fn corner_move() -> Result<Vec<i32>, Error> {
    build_phase2_table(
        "tables/move_corner",
        N_CORNERS,
        CubieCube::set_corners,
        |c| c.get_corners() as i32,
        CubieCube::corner_multiply,
    )
}

/// The six move tables bundled together, as held by the process-wide
/// singleton.
pub struct MoveTables {
    pub twist_move: Vec<i32>,
    pub flip_move: Vec<i32>,
    pub udslice_move: Vec<i32>,
    pub edge4_move: Vec<i32>,
    pub edge8_move: Vec<i32>,
    pub corner_move: Vec<i32>,
}

impl MoveTables {
    pub fn build() -> Result<Self, Error> {
        Ok(Self {
            twist_move: twist_move()?,
            flip_move: flip_move()?,
            udslice_move: udslice_move()?,
            edge4_move: edge4_move()?,
            edge8_move: edge8_move()?,
            corner_move: corner_move()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twist_move_has_no_negative_entries() {
        let table = twist_move().unwrap();
        assert_eq!(table.len(), N_TWIST * N_MOVE);
        assert!(table.iter().all(|&v| (0..N_TWIST as i32).contains(&v)));
    }

    #[test]
    fn flip_move_has_no_negative_entries() {
        let table = flip_move().unwrap();
        assert_eq!(table.len(), N_FLIP * N_MOVE);
        assert!(table.iter().all(|&v| (0..N_FLIP as i32).contains(&v)));
    }

    #[test]
    fn udslice_move_has_no_negative_entries() {
        let table = udslice_move().unwrap();
        assert_eq!(table.len(), N_SLICE * N_MOVE);
        assert!(table.iter().all(|&v| (0..N_SLICE as i32).contains(&v)));
    }

    #[test]
    fn corner_move_marks_illegal_moves_with_minus_one() {
        let table = corner_move().unwrap();
        assert_eq!(table.len(), N_CORNERS * N_MOVE);
        // solved corner (x=0) via a quarter turn of R (face 1, power 1) is
        // illegal in phase 2.
        assert_eq!(table[move_code(1, 1)], -1);
        // a half turn of R is always legal.
        assert_ne!(table[move_code(1, 2)], -1);
        // any power of U is always legal.
        assert_ne!(table[move_code(0, 1)], -1);
        assert_ne!(table[move_code(0, 2)], -1);
        assert_ne!(table[move_code(0, 3)], -1);
    }

    #[test]
    fn edge4_move_round_trips_solved_state_under_u_turn() {
        let table = edge4_move().unwrap();
        // the slice edges are untouched by U, so edge4 stays 0 at x=0.
        assert_eq!(table[move_code(0, 1)], 0);
    }
}
