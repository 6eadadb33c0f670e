//! Two-phase IDA* search: drive the cube into the subgroup `G1 =
//! <U,D,R2,L2,F2,B2>` (phase 1), then solve within `G1` (phase 2).

use std::time::{Duration, Instant};

use crate::constants::{ALL_MOVES, N_CORNERS, N_EDGE8, N_FLIP, N_MOVE, N_TWIST};
use crate::coord::move_code;
use crate::cubie::CubieCube;
use crate::error::Error;
use crate::facelet::FaceCube;
use crate::moves::Move;
use crate::TABLES;

/// Bounds a single `search` call: a maximum solution length and an absolute
/// deadline.
pub struct SearchConfig {
    pub allowed_length: usize,
    pub timeout: Duration,
}

/// Scratch arrays for one `search` call, indexed by move count from the
/// start of the search. `axis`/`power` record the move taken to reach index
/// `i` from `i-1`; the coordinate arrays record the state at index `i`.
struct Scratch {
    axis: Vec<usize>,
    power: Vec<usize>,
    twist: Vec<u16>,
    flip: Vec<u16>,
    udslice: Vec<u16>,
    corner: Vec<u16>,
    edge4: Vec<u16>,
    edge8: Vec<u16>,
}

impl Scratch {
    fn new(allowed_length: usize) -> Self {
        let len = allowed_length + 1;
        Self {
            axis: vec![0; len],
            power: vec![0; len],
            twist: vec![0; len],
            flip: vec![0; len],
            udslice: vec![0; len],
            corner: vec![0; len],
            edge4: vec![0; len],
            edge8: vec![0; len],
        }
    }

    fn moves(&self, count: usize) -> Vec<Move> {
        (1..=count)
            .map(|i| ALL_MOVES[move_code(self.axis[i], self.power[i])])
            .collect()
    }
}

fn h1(s: &Scratch, n: usize) -> i32 {
    let udslice = s.udslice[n] as usize;
    let twist = s.twist[n] as usize;
    let flip = s.flip[n] as usize;
    let h = std::cmp::max(
        TABLES.pruning.udslice_twist_prune[udslice * N_TWIST + twist],
        TABLES.pruning.udslice_flip_prune[udslice * N_FLIP + flip],
    );
    if twist == 0 && flip == 0 && udslice != 0 {
        h + 1
    } else {
        h
    }
}

fn h2(s: &Scratch, n: usize) -> i32 {
    let edge4 = s.edge4[n] as usize;
    let edge8 = s.edge8[n] as usize;
    let corner = s.corner[n] as usize;
    std::cmp::max(
        TABLES.pruning.edge4_corner_prune[edge4 * N_CORNERS + corner],
        TABLES.pruning.edge4_edge8_prune[edge4 * N_EDGE8 + edge8],
    )
}

/// `true` if turning `face` right after a move on `prev_axis` would be
/// redundant (same or opposite face, no modular wrap on the `+3` side).
fn same_axis(face: usize, prev_axis: usize) -> bool {
    face == prev_axis || face == prev_axis + 3
}

fn phase1_search(
    orig: &CubieCube,
    s: &mut Scratch,
    n: usize,
    togo1: i32,
    allowed_length: usize,
    deadline: Instant,
) -> Result<Option<Vec<Move>>, Error> {
    if Instant::now() >= deadline {
        return Err(Error::SolvingTimeout);
    }

    if h1(s, n) == 0 {
        if let Some(sol) = phase2_entry(orig, s, n, allowed_length, deadline)? {
            return Ok(Some(sol));
        }
        return Ok(None);
    }

    if h1(s, n) > togo1 || togo1 == 0 {
        return Ok(None);
    }

    let prev_axis = if n > 0 { Some(s.axis[n]) } else { None };
    for face in 0..6 {
        if let Some(prev) = prev_axis {
            if same_axis(face, prev) {
                continue;
            }
        }
        let base_twist = s.twist[n];
        let base_flip = s.flip[n];
        let base_udslice = s.udslice[n];
        for power in 1..=3usize {
            let mc = move_code(face, power);
            let twist = TABLES.moves.twist_move[N_MOVE * base_twist as usize + mc] as u16;
            let flip = TABLES.moves.flip_move[N_MOVE * base_flip as usize + mc] as u16;
            let udslice = TABLES.moves.udslice_move[N_MOVE * base_udslice as usize + mc] as u16;

            s.axis[n + 1] = face;
            s.power[n + 1] = power;
            s.twist[n + 1] = twist;
            s.flip[n + 1] = flip;
            s.udslice[n + 1] = udslice;

            if let Some(sol) = phase1_search(orig, s, n + 1, togo1 - 1, allowed_length, deadline)?
            {
                return Ok(Some(sol));
            }
        }
    }
    Ok(None)
}

fn phase2_entry(
    orig: &CubieCube,
    s: &mut Scratch,
    n: usize,
    allowed_length: usize,
    deadline: Instant,
) -> Result<Option<Vec<Move>>, Error> {
    if Instant::now() >= deadline {
        return Err(Error::SolvingTimeout);
    }

    let replayed = orig.apply_moves(&s.moves(n));
    s.edge4[n] = replayed.get_edge4();
    s.edge8[n] = replayed.get_edge8();
    s.corner[n] = replayed.get_corners();

    let remaining = allowed_length - n;
    for togo2 in 0..remaining {
        if let Some(sol) = phase2_search(s, n, togo2 as i32) {
            return Ok(Some(sol));
        }
    }
    Ok(None)
}

/// Legal phase-2 faces: U/D at any power, the four side faces only as a
/// half turn.
fn is_phase2_move(face: usize, power: usize) -> bool {
    face == 0 || face == 3 || power == 2
}

fn phase2_search(s: &mut Scratch, n: usize, togo2: i32) -> Option<Vec<Move>> {
    if h2(s, n) == 0 {
        return Some(s.moves(n));
    }
    if h2(s, n) > togo2 || togo2 == 0 {
        return None;
    }

    let prev_axis = if n > 0 { Some(s.axis[n]) } else { None };
    for face in 0..6 {
        if let Some(prev) = prev_axis {
            if same_axis(face, prev) {
                continue;
            }
        }
        let base_edge4 = s.edge4[n];
        let base_edge8 = s.edge8[n];
        let base_corner = s.corner[n];
        for power in 1..=3usize {
            if !is_phase2_move(face, power) {
                continue;
            }
            let mc = move_code(face, power);
            let edge4 = TABLES.moves.edge4_move[N_MOVE * base_edge4 as usize + mc] as u16;
            let edge8 = TABLES.moves.edge8_move[N_MOVE * base_edge8 as usize + mc] as u16;
            let corner = TABLES.moves.corner_move[N_MOVE * base_corner as usize + mc] as u16;

            s.axis[n + 1] = face;
            s.power[n + 1] = power;
            s.edge4[n + 1] = edge4;
            s.edge8[n + 1] = edge8;
            s.corner[n + 1] = corner;

            if let Some(sol) = phase2_search(s, n + 1, togo2 - 1) {
                return Some(sol);
            }
        }
    }
    None
}

/// Finds a solution of at most `config.allowed_length` moves, or `None` if
/// none exists within that bound. Fails fast with
/// [`Error::SolvingTimeout`] if `config.timeout` elapses first.
pub fn search(cc: &CubieCube, config: SearchConfig) -> Result<Option<Vec<Move>>, Error> {
    let deadline = Instant::now() + config.timeout;
    let mut scratch = Scratch::new(config.allowed_length);
    scratch.twist[0] = cc.get_twist();
    scratch.flip[0] = cc.get_flip();
    scratch.udslice[0] = cc.get_udslice();

    for togo1 in 0..config.allowed_length {
        if let Some(sol) = phase1_search(cc, &mut scratch, 0, togo1 as i32, config.allowed_length, deadline)? {
            return Ok(Some(sol));
        }
    }
    Ok(None)
}

/// Best-effort search: tries decreasing solution lengths starting at 25
/// moves, returning the shortest solution found before `timeout` elapses.
/// A timeout on an inner `search` call is swallowed so whatever has already
/// been found (possibly nothing) is returned.
pub fn search_best(cc: &CubieCube, timeout: Duration) -> Option<Vec<Move>> {
    search_best_from(cc, 25, timeout)
}

fn search_best_from(cc: &CubieCube, start_length: usize, timeout: Duration) -> Option<Vec<Move>> {
    let deadline = Instant::now() + timeout;
    let mut best = None;
    let mut allowed_length = start_length;
    while allowed_length > 0 {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            break;
        }
        match search(
            cc,
            SearchConfig {
                allowed_length,
                timeout: remaining,
            },
        ) {
            Ok(Some(sol)) => {
                allowed_length = sol.len();
                best = Some(sol);
                if allowed_length == 0 {
                    break;
                }
                allowed_length -= 1;
            }
            Ok(None) => break,
            Err(Error::SolvingTimeout) => break,
            Err(_) => break,
        }
    }
    best
}

/// Parses a facelet string, verifies it, and returns a best-effort solution
/// of at most `max_length` moves within `timeout` seconds.
pub fn solve(cubestring: &str, max_length: usize, timeout: f64) -> Result<Vec<Move>, Error> {
    let face_cube = FaceCube::try_from(cubestring)?;
    let cc = CubieCube::try_from(&face_cube)?;
    cc.verify()?;

    search_best_from(&cc, max_length, Duration::from_secs_f64(timeout))
        .ok_or(Error::SolvingTimeout)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solved_cube_has_empty_solution() {
        let cc = CubieCube::default();
        let sol = search(
            &cc,
            SearchConfig {
                allowed_length: 5,
                timeout: Duration::from_secs(5),
            },
        )
        .unwrap();
        assert_eq!(sol, Some(vec![]));
    }

    #[test]
    fn search_best_solves_a_scrambled_cube() {
        let mut cc = CubieCube::default();
        cc.multiply_moves(&[Move::R, Move::U, Move::R3, Move::F, Move::U2]);
        let sol = search_best(&cc, Duration::from_secs(10)).expect("solution found");
        let solved = cc.apply_moves(&sol);
        assert_eq!(solved, CubieCube::default());
    }

    #[test]
    fn search_respects_allowed_length() {
        let mut cc = CubieCube::default();
        cc.multiply_moves(&[Move::R, Move::U, Move::R3, Move::U3]);
        let sol = search(
            &cc,
            SearchConfig {
                allowed_length: 8,
                timeout: Duration::from_secs(10),
            },
        )
        .unwrap();
        if let Some(ref moves) = sol {
            assert!(moves.len() <= 8);
            assert_eq!(cc.apply_moves(moves), CubieCube::default());
        }
    }

    #[test]
    fn solve_parses_and_solves_solved_facelet_string() {
        let sol = solve(
            "UUUUUUUUURRRRRRRRRFFFFFFFFFDDDDDDDDDLLLLLLLLLBBBBBBBBB",
            20,
            5.0,
        )
        .unwrap();
        assert!(sol.is_empty());
    }

    #[test]
    fn solve_rejects_invalid_length() {
        let err = solve("UUU", 20, 1.0).unwrap_err();
        assert!(matches!(err, Error::FaceletInvalidLength(3)));
    }
}
