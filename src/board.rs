use crate::types::{Cell, Player, Position};

const BOARD_SIZE: usize = 8;
const NUM_SQUARES: usize = BOARD_SIZE * BOARD_SIZE;
const DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Othello board state represented by two bitboards.
///
/// A `Board` is a plain value: applying a move produces a new board and
/// never aliases the old one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    black: u64,
    white: u64,
}

impl Board {
    /// Creates the canonical opening:
    /// black at (3,4) and (4,3), white at (3,3) and (4,4).
    pub fn new() -> Self {
        Self {
            black: bit(28) | bit(35),
            white: bit(27) | bit(36),
        }
    }

    pub fn from_bitboards(black: u64, white: u64) -> Self {
        debug_assert_eq!(black & white, 0, "a square cannot hold both colors");
        Self { black, white }
    }

    /// Bit mask of the given side's discs.
    pub(crate) fn side_bits(&self, player: Player) -> u64 {
        match player {
            Player::Black => self.black,
            Player::White => self.white,
        }
    }

    /// Returns the legal move mask for the given side.
    pub fn legal_moves(&self, player: Player) -> u64 {
        let me = self.side_bits(player);
        let opp = self.side_bits(player.opponent());
        let occupied = me | opp;
        let mut legal = 0u64;

        for pos in 0..NUM_SQUARES {
            let move_bit = bit(pos);
            if (occupied & move_bit) != 0 {
                continue;
            }
            if Self::collect_flips(pos, me, opp) != 0 {
                legal |= move_bit;
            }
        }

        legal
    }

    /// Legal destinations in row-major order. The order is part of the
    /// contract: the AI tie-breaks on it, so results must be reproducible.
    pub fn legal_positions(&self, player: Player) -> Vec<Position> {
        let mut mask = self.legal_moves(player);
        let mut out = Vec::new();

        while mask != 0 {
            out.push(Position::from_index(mask.trailing_zeros() as usize));
            mask &= mask - 1;
        }

        out
    }

    pub fn is_legal_move(&self, player: Player, pos: Position) -> bool {
        if !pos.in_bounds() {
            return false;
        }
        let me = self.side_bits(player);
        let opp = self.side_bits(player.opponent());
        Self::collect_flips(pos.index(), me, opp) != 0
    }

    /// Places one disc and flips every captured run, in all qualifying
    /// directions at once. Returns the new board and the flipped mask, or
    /// `None` when the move is illegal for `player`.
    pub fn apply(&self, player: Player, pos: Position) -> Option<(Board, u64)> {
        if !pos.in_bounds() {
            return None;
        }

        let me = self.side_bits(player);
        let opp = self.side_bits(player.opponent());
        let flips = Self::collect_flips(pos.index(), me, opp);
        if flips == 0 {
            return None;
        }

        let next_me = me | bit(pos.index()) | flips;
        let next_opp = opp & !flips;
        let next = match player {
            Player::Black => Board {
                black: next_me,
                white: next_opp,
            },
            Player::White => Board {
                black: next_opp,
                white: next_me,
            },
        };

        Some((next, flips))
    }

    pub fn cell(&self, pos: Position) -> Cell {
        if !pos.in_bounds() {
            return Cell::Empty;
        }
        let square = bit(pos.index());
        if (self.black & square) != 0 {
            Cell::Black
        } else if (self.white & square) != 0 {
            Cell::White
        } else {
            Cell::Empty
        }
    }

    /// Returns `(black_count, white_count)`.
    pub fn count(&self) -> (u8, u8) {
        (self.black.count_ones() as u8, self.white.count_ones() as u8)
    }

    pub fn empty_count(&self) -> u8 {
        let (black_count, white_count) = self.count();
        NUM_SQUARES as u8 - black_count - white_count
    }

    pub fn total_count(&self) -> u8 {
        (self.black | self.white).count_ones() as u8
    }

    /// Converts board to `[u8; 64]` where 0=empty, 1=black, 2=white.
    pub fn to_array(&self) -> [u8; NUM_SQUARES] {
        let mut board = [0u8; NUM_SQUARES];
        for (pos, cell) in board.iter_mut().enumerate() {
            let square = bit(pos);
            *cell = if (self.black & square) != 0 {
                1
            } else if (self.white & square) != 0 {
                2
            } else {
                0
            };
        }
        board
    }

    /// Flips captured by placing on `pos`, over all 8 ray directions.
    /// A ray captures only a non-empty run of opponent discs terminated by
    /// an own disc; reaching empty or the edge first captures nothing.
    fn collect_flips(pos: usize, me: u64, opp: u64) -> u64 {
        if pos >= NUM_SQUARES {
            return 0;
        }

        let move_bit = bit(pos);
        if ((me | opp) & move_bit) != 0 {
            return 0;
        }

        let (row, col) = pos_to_row_col(pos);
        let mut flips = 0u64;

        for (dr, dc) in DIRECTIONS {
            let mut r = row + dr;
            let mut c = col + dc;
            let mut line = 0u64;
            let mut has_opponent = false;

            while in_bounds(r, c) {
                let square = bit((r as usize) * BOARD_SIZE + c as usize);
                if (opp & square) != 0 {
                    has_opponent = true;
                    line |= square;
                } else if (me & square) != 0 {
                    if has_opponent {
                        flips |= line;
                    }
                    break;
                } else {
                    break;
                }

                r += dr;
                c += dc;
            }
        }

        flips
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

fn bit(pos: usize) -> u64 {
    if pos < NUM_SQUARES { 1u64 << pos } else { 0 }
}

fn pos_to_row_col(pos: usize) -> (i32, i32) {
    ((pos / BOARD_SIZE) as i32, (pos % BOARD_SIZE) as i32)
}

fn in_bounds(row: i32, col: i32) -> bool {
    (0..BOARD_SIZE as i32).contains(&row) && (0..BOARD_SIZE as i32).contains(&col)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn idx(row: usize, col: usize) -> usize {
        row * BOARD_SIZE + col
    }

    fn pos(row: u8, col: u8) -> Position {
        Position::new(row, col)
    }

    #[test]
    fn initial_black_legal_moves_are_four_expected_squares() {
        let board = Board::new();

        let expected = bit(idx(2, 3)) | bit(idx(3, 2)) | bit(idx(4, 5)) | bit(idx(5, 4));

        assert_eq!(board.legal_moves(Player::Black), expected);
        assert_eq!(
            board.legal_positions(Player::Black),
            vec![pos(2, 3), pos(3, 2), pos(4, 5), pos(5, 4)]
        );
    }

    #[test]
    fn apply_flips_opponent_discs_and_updates_counts() {
        let board = Board::new();

        let (next, flips) = board.apply(Player::Black, pos(2, 3)).unwrap();

        assert_eq!(flips, bit(idx(3, 3)));
        assert_eq!(next.count(), (4, 1));
        assert_eq!(next.empty_count(), 59);
        // The starting board value is untouched.
        assert_eq!(board.count(), (2, 2));

        assert_eq!(next.cell(pos(2, 3)), Cell::Black);
        assert_eq!(next.cell(pos(3, 3)), Cell::Black);
        assert_eq!(next.cell(pos(3, 4)), Cell::Black);
        assert_eq!(next.cell(pos(4, 3)), Cell::Black);
        assert_eq!(next.cell(pos(4, 4)), Cell::White);
    }

    #[test]
    fn illegal_apply_returns_none() {
        let board = Board::new();

        assert!(board.apply(Player::Black, pos(0, 0)).is_none());
        // Occupied target.
        assert!(board.apply(Player::Black, pos(3, 3)).is_none());
        // Out of range.
        assert!(board.apply(Player::Black, pos(8, 0)).is_none());
    }

    #[test]
    fn own_disc_as_immediate_neighbor_never_captures() {
        // Black at (0,1), white at (0,2): black playing (0,0) sees its own
        // disc first along the only occupied ray, so nothing captures.
        let board = Board::from_bitboards(bit(idx(0, 1)), bit(idx(0, 2)));

        assert!(!board.is_legal_move(Player::Black, pos(0, 0)));
        // From the other end the white run is bracketed and (0,3) is legal.
        assert!(board.is_legal_move(Player::Black, pos(0, 3)));
    }

    #[test]
    fn run_reaching_empty_or_edge_does_not_capture() {
        // White run reaches the right edge with no black terminator.
        let edge = Board::from_bitboards(0, bit(idx(0, 6)) | bit(idx(0, 7)));
        assert!(!edge.is_legal_move(Player::Black, pos(0, 5)));

        // White run followed by an empty square before any black disc.
        let gap = Board::from_bitboards(bit(idx(0, 4)), bit(idx(0, 1)));
        assert!(!gap.is_legal_move(Player::Black, pos(0, 0)));
    }

    #[test]
    fn apply_flips_all_qualifying_directions_at_once() {
        // Black brackets white runs left, right, and up from (3,3).
        let black = bit(idx(3, 0)) | bit(idx(3, 6)) | bit(idx(0, 3));
        let white = bit(idx(3, 1))
            | bit(idx(3, 2))
            | bit(idx(3, 4))
            | bit(idx(3, 5))
            | bit(idx(1, 3))
            | bit(idx(2, 3));
        let board = Board::from_bitboards(black, white);

        let (next, flips) = board.apply(Player::Black, pos(3, 3)).unwrap();

        assert_eq!(flips, white);
        assert_eq!(next.count(), (10, 0));
    }

    #[test]
    fn legal_moves_query_is_idempotent() {
        let board = Board::new();
        assert_eq!(
            board.legal_moves(Player::White),
            board.legal_moves(Player::White)
        );
        assert_eq!(
            board.legal_positions(Player::White),
            board.legal_positions(Player::White)
        );
    }

    #[test]
    fn disc_conservation_holds_after_moves() {
        let mut board = Board::new();
        let mut player = Player::Black;

        for _ in 0..16 {
            let moves = board.legal_positions(player);
            let Some(&mv) = moves.first() else {
                player = player.opponent();
                continue;
            };
            let (next, _) = board.apply(player, mv).unwrap();
            board = next;
            player = player.opponent();

            let (black, white) = board.count();
            assert_eq!(black as u16 + white as u16 + board.empty_count() as u16, 64);
        }
    }
}
