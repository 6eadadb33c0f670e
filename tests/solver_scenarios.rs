//! Concrete scenarios from the reference corpus: known scrambles, the
//! superflip, the solved cube, and the invalid-input cases.

use kociemba::cubie::CubieCube;
use kociemba::error::Error;
use kociemba::facelet::FaceCube;
use kociemba::solver::solve;

const SCRAMBLE_54: &str = "DFLRUBRDFRLDURRLRRUFDFFLBDFULUUDULBURBBBLRBFLFLBDBDFUD";
const SUPERFLIP: &str = "UBULURUFURURFRBRDRFUFLFRFDFDFDLDRDBDLULBLFLDLBUBRBLBDB";
const SOLVED: &str = "UUUUUUUUURRRRRRRRRFFFFFFFFFDDDDDDDDDLLLLLLLLLBBBBBBBBB";

fn assert_solves(cubestring: &str, max_length: usize) {
    let moves = solve(cubestring, max_length, 15.0).expect("solution found within budget");
    assert!(
        moves.len() <= max_length,
        "solution of {} moves exceeds requested bound {}",
        moves.len(),
        max_length
    );

    let face = FaceCube::try_from(cubestring).unwrap();
    let start = CubieCube::try_from(&face).unwrap();
    let finished = start.apply_moves(&moves);
    assert_eq!(finished, CubieCube::default(), "solution does not reach the solved state");
}

#[test]
fn scrambled_cube_solves_within_23_moves() {
    assert_solves(SCRAMBLE_54, 23);
}

#[test]
fn superflip_solves_within_23_moves() {
    // The superflip is one of the hardest positions God's-number-wise; the
    // two-phase algorithm is not guaranteed optimal, so this only checks
    // correctness and the same non-optimal bound the reference solution
    // uses, not an exact move sequence.
    assert_solves(SUPERFLIP, 23);
}

#[test]
fn solved_cube_yields_empty_solution() {
    let moves = solve(SOLVED, 20, 5.0).unwrap();
    assert!(moves.is_empty());
}

#[test]
fn invalid_length_53_is_rejected() {
    let short = &SOLVED[..53];
    let err = solve(short, 20, 1.0).unwrap_err();
    assert!(matches!(err, Error::FaceletInvalidLength(53)));
}

#[test]
fn invalid_character_at_index_51_is_rejected() {
    let mut chars: Vec<char> = SOLVED.chars().collect();
    chars[51] = 'X';
    let bad: String = chars.into_iter().collect();
    let err = solve(&bad, 20, 1.0).unwrap_err();
    assert!(matches!(err, Error::FaceletInvalidCharacter('X', 51)));
}

#[test]
fn random_cubes_always_verify_and_solve() {
    for _ in 0..5 {
        let mut cc = CubieCube::default();
        cc.randomize();
        assert!(cc.verify().is_ok());

        let face = FaceCube::try_from(&cc).unwrap();
        let cubestring = face.to_string();
        let moves = solve(&cubestring, 25, 20.0).expect("random cube should be solvable");
        let finished = cc.apply_moves(&moves);
        assert_eq!(finished, CubieCube::default());
    }
}
