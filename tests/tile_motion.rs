use twenty48::domain::board::{Board, BoardSettings};
use twenty48::domain::models::{Direction, Position};

fn board(values: [[u32; 4]; 4]) -> Board {
    Board::from_values(values, BoardSettings::seeded(5)).unwrap()
}

#[test]
fn test_sliding_tile_reports_its_path() {
    let mut b = board([[0, 0, 0, 2], [0; 4], [0; 4], [0; 4]]);
    let id = b.cells()[0][3];

    b.apply_move(Direction::Left);

    let tile = b.tile(id).unwrap();
    assert_eq!(tile.previous(), Some(Position::new(0, 3)));
    assert_eq!(tile.position(), Some(Position::new(0, 0)));
    assert_eq!(tile.effective_from(), Some(Position::new(0, 3)));
    assert_eq!(tile.effective_to(b.tiles()), Some(Position::new(0, 0)));
    assert!(tile.has_moved(b.tiles()));
    assert!(!tile.is_new());
}

#[test]
fn test_resting_tile_has_not_moved() {
    let mut b = board([[2, 0, 0, 0], [0, 0, 0, 4], [0; 4], [0; 4]]);
    let resting = b.cells()[0][0];

    b.apply_move(Direction::Left);

    let tile = b.tile(resting).unwrap();
    assert_eq!(tile.position(), Some(Position::new(0, 0)));
    assert!(!tile.has_moved(b.tiles()));
    assert!(!tile.is_new());
}

#[test]
fn test_consumed_tiles_travel_into_the_survivor() {
    let mut b = board([[0, 0, 2, 2], [0; 4], [0; 4], [0; 4]]);
    let first = b.cells()[0][2];
    let second = b.cells()[0][3];

    b.apply_move(Direction::Left);
    let product = b.cells()[0][0];
    let tiles = b.tiles();

    let consumed = b.tile(second).unwrap();
    assert_eq!(consumed.merged_into(), Some(product));
    assert_eq!(consumed.effective_from(), Some(Position::new(0, 3)));
    assert_eq!(consumed.effective_to(tiles), Some(Position::new(0, 0)));
    assert!(consumed.has_moved(tiles));
    assert!(!consumed.is_new());

    let consumed = b.tile(first).unwrap();
    assert_eq!(consumed.effective_from(), Some(Position::new(0, 2)));
    assert_eq!(consumed.effective_to(tiles), Some(Position::new(0, 0)));

    let survivor = b.tile(product).unwrap();
    assert_eq!(survivor.value(), 4);
    assert!(!survivor.is_new());
    assert!(survivor.has_moved(tiles));
    assert_eq!(survivor.previous(), None);
}

#[test]
fn test_spawned_tile_is_new() {
    let mut b = board([[0, 0, 0, 2], [0; 4], [0; 4], [0; 4]]);
    let outcome = b.apply_move(Direction::Left);

    let spawned = b.tile(outcome.spawned.unwrap()).unwrap();
    assert!(spawned.is_new());
    assert!(!spawned.has_moved(b.tiles()));
    assert!(spawned.value() == 2 || spawned.value() == 4);

    let fresh: Vec<_> = b.motions().into_iter().filter(|m| m.is_new).collect();
    assert_eq!(fresh.len(), 1);
    assert_eq!(fresh[0].id, spawned.id());
}

#[test]
fn test_merged_tiles_are_kept_for_exactly_one_move() {
    let mut b = board([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]);
    let left = b.cells()[0][0];
    let right = b.cells()[0][1];

    b.apply_move(Direction::Left);
    assert!(b.tile(left).is_some());
    assert!(b.tile(right).is_some());

    // Even a move that changes nothing advances the cleanup.
    b.apply_move(Direction::Left);
    assert!(b.tile(left).is_none());
    assert!(b.tile(right).is_none());
}

#[test]
fn test_grid_tiles_are_never_collected() {
    let mut b = Board::with_seed(17);
    for step in 0..40 {
        let direction = Direction::ALL[step % 4];
        b.apply_move(direction);
        for line in b.cells() {
            for &id in line {
                assert!(b.tile(id).is_some());
            }
        }
    }
}

#[test]
fn test_motions_cover_merges() {
    let mut b = board([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]);
    b.apply_move(Direction::Left);
    let product = b.cells()[0][0];

    let motions = b.motions();
    let consumed: Vec<_> = motions
        .iter()
        .filter(|m| m.merged_into == Some(product))
        .collect();
    assert_eq!(consumed.len(), 2);
    assert!(consumed.iter().all(|m| m.to == Some(Position::new(0, 0)) && m.moved));

    // Empty placeholders are never reported.
    assert!(motions.iter().all(|m| m.value != 0));
}
