//! Property-based tests for the rule laws.

use proptest::prelude::*;

use parlor_games::core::Player;
use parlor_games::games::battle2048::{slide, slide_line, board_from_rows, SIZE};
use parlor_games::games::pipe_puzzle::{Openings, Pipe};
use parlor_games::games::snakes_ladders::{SnakesLaddersBuilder, FINISH};
use parlor_games::games::treasure_hunt::{Flip, Treasure, TreasureHunt};
use parlor_games::{Direction, Minigame};

/// Strategy: a 2048 line of empty cells and small powers of two.
fn line_strategy() -> impl Strategy<Value = [u32; SIZE]> {
    prop::array::uniform4(prop_oneof![Just(0u32), Just(2), Just(4), Just(8), Just(16)])
}

fn treasure_strategy() -> impl Strategy<Value = Treasure> {
    prop::sample::select(Treasure::ALL.to_vec())
}

proptest! {
    // 1. Four quarter turns restore any pipe
    #[test]
    fn pipe_rotation_cycles(bits in 0u8..16) {
        let openings = Openings::from_bits_truncate(bits);
        let mut pipe = Pipe::new(openings);
        for _ in 0..4 {
            pipe.rotate();
        }
        prop_assert_eq!(pipe, Pipe::new(openings));
    }

    // 2. Rotation keeps the number of openings
    #[test]
    fn pipe_rotation_keeps_openings(bits in 0u8..16) {
        let openings = Openings::from_bits_truncate(bits);
        prop_assert_eq!(openings.rotate_cw().bits().count_ones(), bits.count_ones());
    }

    // 3. Sliding never creates or destroys value
    #[test]
    fn slide_preserves_total(line in line_strategy()) {
        let (out, _) = slide_line(line);
        prop_assert_eq!(out.iter().sum::<u32>(), line.iter().sum::<u32>());
    }

    // 4. The merge score counts each merged tile once
    #[test]
    fn slide_score_matches_tile_loss(line in line_strategy()) {
        let (out, score) = slide_line(line);
        let before = line.iter().filter(|&&v| v != 0).count();
        let after = out.iter().filter(|&&v| v != 0).count();
        prop_assert!(after <= before);
        prop_assert_eq!(score == 0, before == after);
    }

    // 5. Result is packed toward the wall
    #[test]
    fn slide_packs_left(line in line_strategy()) {
        let (out, _) = slide_line(line);
        let first_empty = out.iter().position(|&v| v == 0).unwrap_or(SIZE);
        prop_assert!(out[first_empty..].iter().all(|&v| v == 0));
    }

    // 6. Sliding left then right is the same as mirroring
    #[test]
    fn slide_right_mirrors_left(rows in prop::array::uniform4(line_strategy())) {
        let board = board_from_rows(rows);
        let mirrored = board_from_rows(rows.map(|mut row| { row.reverse(); row }));

        let right = slide(&board, Direction::Right);
        let left = slide(&mirrored, Direction::Left);

        prop_assert_eq!(right.score, left.score);
        for r in 0..SIZE {
            let mut row = right.board.row(r).to_vec();
            row.reverse();
            prop_assert_eq!(row.as_slice(), left.board.row(r));
        }
    }

    // 7. Tokens never leave the track
    #[test]
    fn tokens_stay_on_track(rolls in prop::collection::vec(1u8..=6, 1..80)) {
        let mut game = SnakesLaddersBuilder::new().build(0);
        for roll in rolls {
            if game.is_over() {
                break;
            }
            game.advance(roll).unwrap();
            if !game.is_over() {
                game.resolve().unwrap();
            }
        }
        for player in Player::all() {
            prop_assert!((1..=FINISH).contains(&game.position(player)));
        }
    }

    // 8. Treasure scores add up to what was flipped
    #[test]
    fn treasure_scores_add_up(layout in prop::collection::vec(treasure_strategy(), 1..36)) {
        let expected: i32 = layout.iter().map(|t| t.points()).sum();
        let mut game = TreasureHunt::with_layout(layout.clone());
        for i in 0..layout.len() {
            game.apply(&Flip(i)).unwrap();
            game.resolve().unwrap();
        }
        let scores = game.scores();
        prop_assert!(game.is_over());
        prop_assert_eq!(scores[Player::Celeste] + scores[Player::Sally], i64::from(expected));
    }
}
