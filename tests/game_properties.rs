use twenty48::domain::board::{Board, BoardSettings};
use twenty48::domain::grid::SIZE;
use twenty48::domain::models::Direction;
use twenty48::domain::services::PlayerStrategy;
use twenty48::infrastructure::ai::RandomBot;

fn non_empty(board: &Board) -> usize {
    board.values().iter().flatten().filter(|&&v| v != 0).count()
}

#[test]
fn test_random_games_keep_invariants() {
    for seed in 0..12u64 {
        let mut board = Board::with_seed(seed);
        let mut bot = RandomBot::with_seed(seed);

        for _ in 0..400 {
            let Some(direction) = bot.get_move(&board) else {
                assert!(board.has_lost());
                break;
            };

            let score_before = board.score();
            let count_before = non_empty(&board);
            let outcome = board.apply_move(direction);

            assert!(outcome.changed, "bot only picks legal moves");
            assert!(board.score() >= score_before);
            assert_eq!(board.score() - score_before, outcome.points);

            for value in board.values().iter().flatten() {
                assert!(*value == 0 || (value.is_power_of_two() && *value >= 2));
                assert!(*value <= 2048 * 2);
            }

            let motions = board.motions();
            let merges = motions.iter().filter(|m| m.merged_into.is_some()).count() / 2;
            let produced: u64 = board
                .tiles()
                .iter()
                .filter(|t| t.merged_from().is_some())
                .map(|t| u64::from(t.value()))
                .sum();
            assert_eq!(produced, outcome.points);

            // One new tile per changing move.
            assert_eq!(non_empty(&board), count_before - merges + 1);
            let spawned = board.tile(outcome.spawned.unwrap()).unwrap();
            assert!(spawned.value() == 2 || spawned.value() == 4);
            assert_eq!(motions.iter().filter(|m| m.is_new).count(), 1);

            // Every cell holds a distinct tile.
            let mut ids: Vec<_> = board.cells().iter().flatten().copied().collect();
            ids.sort();
            ids.dedup();
            assert_eq!(ids.len(), SIZE * SIZE);
        }
    }
}

#[test]
fn test_same_seed_same_game() {
    let a = Board::with_seed(2024);
    let b = Board::with_seed(2024);
    assert_eq!(a.values(), b.values());

    let moves = [Direction::Left, Direction::Up, Direction::Right, Direction::Down];
    let (mut a, mut b) = (a, b);
    for _ in 0..10 {
        for d in moves {
            a = a.make_move(d);
            b = b.make_move(d);
        }
    }
    assert_eq!(a.values(), b.values());
    assert_eq!(a.score(), b.score());
}

#[test]
fn test_spawn_probability_extremes() {
    let fours = Board::with_settings(BoardSettings {
        four_probability: 1.0,
        seed: Some(8),
    })
    .unwrap();
    assert!(fours.values().iter().flatten().all(|&v| v == 0 || v == 4));

    let twos = Board::with_settings(BoardSettings {
        four_probability: 0.0,
        seed: Some(8),
    })
    .unwrap();
    assert!(twos.values().iter().flatten().all(|&v| v == 0 || v == 2));
}

#[test]
fn test_invalid_probability_is_rejected() {
    let result = Board::with_settings(BoardSettings {
        four_probability: -0.5,
        seed: None,
    });
    assert!(result.is_err());
}
