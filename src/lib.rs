//! # kociemba
//! `kociemba`: crate for manipulating and solving the 3x3 Rubik's cube with [Kociemba's two phase algorithm](http://kociemba.org/cube.htm).

#[macro_use]
extern crate lazy_static;

/// Module containing functions for scrambling the cube.
pub mod scramble;

/// Error define.
pub mod error;

/// Module containing 3x3 cube constants.
pub mod constants;

/// Module for represent a cube on the coordinate level.
pub mod coord;

/// Module for represent a cube on the cubie level.
pub mod cubie;

/// Module for represent a cube on the facelet level.
pub mod facelet;

/// Module for represent move and create/load move tables.
pub mod moves;

/// Module for create/load pruning tables. The pruning tables cut the search tree during the search.
pub mod pruning;

/// Module for Solver.
pub mod solver;

pub use crate::moves::Move;

use std::{fs, path::Path};
use bincode::{
    config::{self, Configuration},
    decode_from_slice, encode_to_vec,
    error::DecodeError,
    Decode, Encode,
};
use serde::{de::DeserializeOwned, Serialize};

use crate::coord::MoveTables;
use crate::error::{Error, TableSaveIoError};
use crate::pruning::PruningTables;

const CONFIG: Configuration = config::standard();

fn write_table<P, T: Encode>(path: P, table: &T) -> Result<(), Error>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| Error::TablesSaveFailed(TableSaveIoError(e)))?;
        }
    }
    let encoded = encode_to_vec(table, CONFIG)?;
    fs::write(path, encoded).map_err(|e| Error::TablesSaveFailed(TableSaveIoError(e)))?;
    Ok(())
}

fn decode_table<T: Decode>(bytes: &[u8]) -> Result<T, Error> {
    let (decoded, written) = decode_from_slice(bytes, CONFIG)?;
    let additional = bytes.len() - written;

    if additional != 0 {
        return Err(DecodeError::UnexpectedEnd { additional })?;
    }
    Ok(decoded)
}

fn write_table_json<P, T: Serialize>(path: P, table: &T) -> Result<(), Error>
where
    P: AsRef<Path>,
{
    let file = fs::File::create(path).map_err(|e| Error::TablesSaveFailed(TableSaveIoError(e)))?;
    serde_json::to_writer(file, table)?;
    Ok(())
}

fn read_table_json<P, T: DeserializeOwned>(path: P) -> Result<T, Error>
where
    P: AsRef<Path>,
{
    let file = fs::File::open(path)?;
    let table = serde_json::from_reader(file)?;
    Ok(table)
}

/// Every precomputed table the solver needs: six move tables plus four
/// pruning tables, held for the lifetime of the process.
pub struct Tables {
    pub moves: MoveTables,
    pub pruning: PruningTables,
}

impl Tables {
    fn build() -> Self {
        let moves = MoveTables::build().expect("failed to build move tables");
        let pruning = PruningTables::build(&moves).expect("failed to build pruning tables");
        Self { moves, pruning }
    }
}

lazy_static! {
    /// Process-wide singleton holding every move/pruning table, built lazily
    /// on first access. Table construction is pure computation and cannot
    /// fail; only persistence (handled inside the individual builders) can,
    /// and a persistence failure there still yields an in-memory table.
    pub static ref TABLES: Tables = Tables::build();
}

/// The ten tables in the fixed order §6 specifies for the binary wire
/// format, as `(table, element count)` pairs.
fn binary_table_order(t: &Tables) -> [&[i32]; 10] {
    [
        &t.moves.twist_move,
        &t.moves.flip_move,
        &t.moves.udslice_move,
        &t.moves.edge4_move,
        &t.moves.edge8_move,
        &t.moves.corner_move,
        &t.pruning.udslice_twist_prune,
        &t.pruning.udslice_flip_prune,
        &t.pruning.edge4_edge8_prune,
        &t.pruning.edge4_corner_prune,
    ]
}

/// Serializes every table to `path` as a single file in the binary wire
/// format described in §6: the ten tables concatenated in a fixed order,
/// each entry a little-endian signed 32-bit integer, no framing or length
/// prefixes.
pub fn save_tables_binary<P: AsRef<Path>>(path: P) -> Result<(), Error> {
    let t = &*TABLES;
    let tables = binary_table_order(t);
    let total: usize = tables.iter().map(|t| t.len()).sum();
    let mut buf = Vec::with_capacity(total * 4);
    for table in tables {
        for &v in table {
            buf.extend_from_slice(&v.to_le_bytes());
        }
    }
    fs::write(path, buf).map_err(|e| Error::TablesSaveFailed(TableSaveIoError(e)))
}

/// Loads every table from a file written by `save_tables_binary`, checking
/// the total byte length against the expected size before splitting it back
/// into the ten tables in order. Returns `tables_load_invalid_data` if the
/// file is truncated or padded.
pub fn load_tables_binary<P: AsRef<Path>>(path: P) -> Result<Tables, Error> {
    use crate::constants::{N_CORNERS, N_EDGE8, N_FLIP, N_MOVE, N_PERM_4, N_SLICE, N_TWIST};

    let bytes = fs::read(path)?;
    let lens = [
        N_TWIST * N_MOVE,
        N_FLIP * N_MOVE,
        N_SLICE * N_MOVE,
        N_PERM_4 * N_MOVE,
        N_EDGE8 * N_MOVE,
        N_CORNERS * N_MOVE,
        N_SLICE * N_TWIST,
        N_SLICE * N_FLIP,
        N_PERM_4 * N_EDGE8,
        N_PERM_4 * N_CORNERS,
    ];
    let total: usize = lens.iter().sum();
    if bytes.len() != total * 4 {
        return Err(Error::TablesLoadInvalidData);
    }

    let mut offset = 0usize;
    let mut next_table = |len: usize| -> Vec<i32> {
        let table = bytes[offset..offset + len * 4]
            .chunks_exact(4)
            .map(|c| i32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect();
        offset += len * 4;
        table
    };

    Ok(Tables {
        moves: MoveTables {
            twist_move: next_table(lens[0]),
            flip_move: next_table(lens[1]),
            udslice_move: next_table(lens[2]),
            edge4_move: next_table(lens[3]),
            edge8_move: next_table(lens[4]),
            corner_move: next_table(lens[5]),
        },
        pruning: PruningTables {
            udslice_twist_prune: next_table(lens[6]),
            udslice_flip_prune: next_table(lens[7]),
            edge4_edge8_prune: next_table(lens[8]),
            edge4_corner_prune: next_table(lens[9]),
        },
    })
}

/// Serializes every table to a single JSON file (the optional alternate
/// format), one field per table.
pub fn save_tables_json<P: AsRef<Path>>(path: P) -> Result<(), Error> {
    #[derive(serde::Serialize)]
    struct AllTables<'a> {
        twist_move: &'a [i32],
        flip_move: &'a [i32],
        udslice_move: &'a [i32],
        edge4_move: &'a [i32],
        edge8_move: &'a [i32],
        corner_move: &'a [i32],
        udslice_twist_prune: &'a [i32],
        udslice_flip_prune: &'a [i32],
        edge4_edge8_prune: &'a [i32],
        edge4_corner_prune: &'a [i32],
    }

    let t = &*TABLES;
    let all = AllTables {
        twist_move: &t.moves.twist_move,
        flip_move: &t.moves.flip_move,
        udslice_move: &t.moves.udslice_move,
        edge4_move: &t.moves.edge4_move,
        edge8_move: &t.moves.edge8_move,
        corner_move: &t.moves.corner_move,
        udslice_twist_prune: &t.pruning.udslice_twist_prune,
        udslice_flip_prune: &t.pruning.udslice_flip_prune,
        edge4_edge8_prune: &t.pruning.edge4_edge8_prune,
        edge4_corner_prune: &t.pruning.edge4_corner_prune,
    };
    write_table_json(path, &all)
}

#[derive(serde::Deserialize)]
struct AllTablesOwned {
    twist_move: Vec<i32>,
    flip_move: Vec<i32>,
    udslice_move: Vec<i32>,
    edge4_move: Vec<i32>,
    edge8_move: Vec<i32>,
    corner_move: Vec<i32>,
    udslice_twist_prune: Vec<i32>,
    udslice_flip_prune: Vec<i32>,
    edge4_edge8_prune: Vec<i32>,
    edge4_corner_prune: Vec<i32>,
}

/// Loads every table from a JSON file written by `save_tables_json` and
/// checks each array against its expected length, returning
/// `tables_load_invalid_data` on mismatch.
pub fn load_tables_json<P: AsRef<Path>>(path: P) -> Result<Tables, Error> {
    use crate::constants::{N_CORNERS, N_EDGE8, N_FLIP, N_MOVE, N_PERM_4, N_SLICE, N_TWIST};

    let raw: AllTablesOwned = read_table_json(path)?;

    let expected = [
        (raw.twist_move.len(), N_TWIST * N_MOVE),
        (raw.flip_move.len(), N_FLIP * N_MOVE),
        (raw.udslice_move.len(), N_SLICE * N_MOVE),
        (raw.edge4_move.len(), N_PERM_4 * N_MOVE),
        (raw.edge8_move.len(), N_EDGE8 * N_MOVE),
        (raw.corner_move.len(), N_CORNERS * N_MOVE),
        (raw.udslice_twist_prune.len(), N_SLICE * N_TWIST),
        (raw.udslice_flip_prune.len(), N_SLICE * N_FLIP),
        (raw.edge4_edge8_prune.len(), N_PERM_4 * N_EDGE8),
        (raw.edge4_corner_prune.len(), N_PERM_4 * N_CORNERS),
    ];
    if expected.iter().any(|&(got, want)| got != want) {
        return Err(Error::TablesLoadInvalidData);
    }

    Ok(Tables {
        moves: MoveTables {
            twist_move: raw.twist_move,
            flip_move: raw.flip_move,
            udslice_move: raw.udslice_move,
            edge4_move: raw.edge4_move,
            edge8_move: raw.edge8_move,
            corner_move: raw.corner_move,
        },
        pruning: PruningTables {
            udslice_twist_prune: raw.udslice_twist_prune,
            udslice_flip_prune: raw.udslice_flip_prune,
            edge4_edge8_prune: raw.edge4_edge8_prune,
            edge4_corner_prune: raw.edge4_corner_prune,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binary_round_trip_matches_in_memory_tables() {
        let dir = std::env::temp_dir().join("kociemba_test_binary_round_trip");
        save_tables_binary(&dir).unwrap();
        let loaded = load_tables_binary(&dir).unwrap();
        let built = &*TABLES;
        assert_eq!(loaded.moves.twist_move, built.moves.twist_move);
        assert_eq!(loaded.moves.flip_move, built.moves.flip_move);
        assert_eq!(loaded.moves.udslice_move, built.moves.udslice_move);
        assert_eq!(loaded.moves.edge4_move, built.moves.edge4_move);
        assert_eq!(loaded.moves.edge8_move, built.moves.edge8_move);
        assert_eq!(loaded.moves.corner_move, built.moves.corner_move);
        assert_eq!(loaded.pruning.udslice_twist_prune, built.pruning.udslice_twist_prune);
        assert_eq!(loaded.pruning.udslice_flip_prune, built.pruning.udslice_flip_prune);
        assert_eq!(loaded.pruning.edge4_edge8_prune, built.pruning.edge4_edge8_prune);
        assert_eq!(loaded.pruning.edge4_corner_prune, built.pruning.edge4_corner_prune);
        let _ = std::fs::remove_file(&dir);
    }

    #[test]
    fn json_round_trip_matches_in_memory_tables() {
        let path = std::env::temp_dir().join("kociemba_test_tables.json");
        save_tables_json(&path).unwrap();
        let loaded = load_tables_json(&path).unwrap();
        let built = &*TABLES;
        assert_eq!(loaded.moves.corner_move, built.moves.corner_move);
        assert_eq!(loaded.pruning.edge4_corner_prune, built.pruning.edge4_corner_prune);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn load_tables_binary_rejects_truncated_file() {
        let path = std::env::temp_dir().join("kociemba_test_truncated.bin");
        std::fs::write(&path, [0u8; 3]).unwrap();
        assert!(matches!(
            load_tables_binary(&path),
            Err(Error::TablesLoadInvalidData)
        ));
        let _ = std::fs::remove_file(&path);
    }
}
