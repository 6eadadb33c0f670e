//! Pruning tables: admissible lower bounds on the remaining move count,
//! built by breadth-first search over composite coordinate pairs and cached
//! to disk exactly like the move tables in [`crate::coord`].

use std::collections::VecDeque;
use std::fs;

use crate::constants::{N_CORNERS, N_EDGE8, N_FLIP, N_MOVE, N_PERM_4, N_SLICE, N_TWIST};
use crate::coord::MoveTables;
use crate::error::Error;
use crate::{decode_table, write_table};

/// BFS over the composite coordinate `outer * n_inner + inner`, using the
/// two move tables to step both halves of the pair together. A `-1` entry in
/// either move table means the move doesn't apply at this coordinate and the
/// transition is skipped rather than followed.
fn build_pruning_table(
    fname: &str,
    n_outer: usize,
    n_inner: usize,
    outer_move: &[i32],
    inner_move: &[i32],
) -> Result<Vec<i32>, Error> {
    let cached = fs::read(fname).unwrap_or_default();
    if !cached.is_empty() {
        return decode_table(&cached);
    }

    eprintln!("building {fname}...");
    let size = n_outer * n_inner;
    let mut table = vec![-1i32; size];
    table[0] = 0;
    let mut queue = VecDeque::new();
    queue.push_back(0usize);
    let mut visited = 1usize;
    while let Some(idx) = queue.pop_front() {
        if visited % 20000 == 0 {
            eprint!(".");
        }
        let outer = idx / n_inner;
        let inner = idx % n_inner;
        let dist = table[idx];
        for m in 0..N_MOVE {
            let no = outer_move[N_MOVE * outer + m];
            let ni = inner_move[N_MOVE * inner + m];
            if no < 0 || ni < 0 {
                continue;
            }
            let nidx = no as usize * n_inner + ni as usize;
            if table[nidx] == -1 {
                table[nidx] = dist + 1;
                visited += 1;
                queue.push_back(nidx);
            }
        }
    }
    eprintln!();
    if let Err(e) = write_table(fname, &table) {
        eprintln!("warning: failed to cache {fname}: {e}");
    }
    Ok(table)
}

/// The four pruning tables bundled together, as held by the process-wide
/// singleton. Each gives the minimum number of moves from a coordinate pair
/// to the pair's solved value `(0, 0)`.
pub struct PruningTables {
    pub udslice_twist_prune: Vec<i32>,
    pub udslice_flip_prune: Vec<i32>,
    pub edge4_edge8_prune: Vec<i32>,
    pub edge4_corner_prune: Vec<i32>,
}

impl PruningTables {
    pub fn build(mv: &MoveTables) -> Result<Self, Error> {
        Ok(Self {
            udslice_twist_prune: build_pruning_table(
                "tables/prune_udslice_twist",
                N_SLICE,
                N_TWIST,
                &mv.udslice_move,
                &mv.twist_move,
            )?,
            udslice_flip_prune: build_pruning_table(
                "tables/prune_udslice_flip",
                N_SLICE,
                N_FLIP,
                &mv.udslice_move,
                &mv.flip_move,
            )?,
            edge4_edge8_prune: build_pruning_table(
                "tables/prune_edge4_edge8",
                N_PERM_4,
                N_EDGE8,
                &mv.edge4_move,
                &mv.edge8_move,
            )?,
            edge4_corner_prune: build_pruning_table(
                "tables/prune_edge4_corner",
                N_PERM_4,
                N_CORNERS,
                &mv.edge4_move,
                &mv.corner_move,
            )?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn udslice_twist_prune_distance_zero_at_solved() {
        let mv = MoveTables::build().unwrap();
        let table = build_pruning_table(
            "tables/test_prune_udslice_twist",
            N_SLICE,
            N_TWIST,
            &mv.udslice_move,
            &mv.twist_move,
        )
        .unwrap();
        assert_eq!(table.len(), N_SLICE * N_TWIST);
        assert_eq!(table[0], 0);
        let _ = fs::remove_file("tables/test_prune_udslice_twist");
    }

    #[test]
    fn udslice_flip_prune_one_move_away_from_solved() {
        let mv = MoveTables::build().unwrap();
        let table = build_pruning_table(
            "tables/test_prune_udslice_flip",
            N_SLICE,
            N_FLIP,
            &mv.udslice_move,
            &mv.flip_move,
        )
        .unwrap();
        // flip=0, udslice=0 is solved; a U turn leaves both at 0, so no
        // neighbor can be farther than 1.
        let after_u = mv.flip_move[N_MOVE * 0] as usize;
        assert!(table[after_u] <= 1);
        let _ = fs::remove_file("tables/test_prune_udslice_flip");
    }

    #[test]
    fn edge4_edge8_prune_is_fully_connected() {
        let mv = MoveTables::build().unwrap();
        let table = build_pruning_table(
            "tables/test_prune_edge4_edge8",
            N_PERM_4,
            N_EDGE8,
            &mv.edge4_move,
            &mv.edge8_move,
        )
        .unwrap();
        assert!(table.iter().all(|&v| v >= 0));
        let _ = fs::remove_file("tables/test_prune_edge4_edge8");
    }
}
