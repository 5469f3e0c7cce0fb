use crate::board::Board;
use crate::types::Player;

// Positional weights, row-major, symmetric in all four quadrants.
// Corners dominate; the squares touching a corner give the corner away.
#[rustfmt::skip]
const POSITION_WEIGHTS: [i32; 64] = [
    100, -10,  10,   5,   5,  10, -10, 100,
    -10, -20,  -5,  -5,  -5,  -5, -20, -10,
     10,  -5,   5,   1,   1,   5,  -5,  10,
      5,  -5,   1,   1,   1,   1,  -5,   5,
      5,  -5,   1,   1,   1,   1,  -5,   5,
     10,  -5,   5,   1,   1,   5,  -5,  10,
    -10, -20,  -5,  -5,  -5,  -5, -20, -10,
    100, -10,  10,   5,   5,  10, -10, 100,
];

const MOBILITY_WEIGHT: i32 = 10;

// Past this many discs the game is material-driven.
const ENDGAME_THRESHOLD: u8 = 50;
const ENDGAME_DISC_WEIGHT: i32 = 50;

/// Scores `board` from `for_player`'s perspective: positional weights plus
/// mobility differential, with material added once the endgame starts.
/// Antisymmetric between the two players.
pub fn evaluate(board: &Board, for_player: Player) -> i32 {
    let opponent = for_player.opponent();
    let mut score = 0;

    let mut bits = board.side_bits(for_player);
    while bits != 0 {
        score += POSITION_WEIGHTS[bits.trailing_zeros() as usize];
        bits &= bits - 1;
    }

    bits = board.side_bits(opponent);
    while bits != 0 {
        score -= POSITION_WEIGHTS[bits.trailing_zeros() as usize];
        bits &= bits - 1;
    }

    let my_mobility = board.legal_moves(for_player).count_ones() as i32;
    let opp_mobility = board.legal_moves(opponent).count_ones() as i32;
    score += (my_mobility - opp_mobility) * MOBILITY_WEIGHT;

    if board.total_count() > ENDGAME_THRESHOLD {
        let my_discs = board.side_bits(for_player).count_ones() as i32;
        let opp_discs = board.side_bits(opponent).count_ones() as i32;
        score += (my_discs - opp_discs) * ENDGAME_DISC_WEIGHT;
    }

    score
}
