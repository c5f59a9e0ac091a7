use crate::domain::models::Position;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identity of a tile, independent of its value and position.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileId(u64);

impl TileId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tile {
    id: TileId,
    value: u32,
    position: Option<Position>,
    previous: Option<Position>,
    merged_into: Option<TileId>,
    merged_from: Option<(TileId, TileId)>,
    marked_for_removal: bool,
}

impl Tile {
    fn new(id: TileId, value: u32) -> Self {
        Self {
            id,
            value,
            position: None,
            previous: None,
            merged_into: None,
            merged_from: None,
            marked_for_removal: false,
        }
    }

    pub fn id(&self) -> TileId {
        self.id
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn is_empty(&self) -> bool {
        self.value == 0
    }

    pub fn position(&self) -> Option<Position> {
        self.position
    }

    pub fn previous(&self) -> Option<Position> {
        self.previous
    }

    pub fn merged_into(&self) -> Option<TileId> {
        self.merged_into
    }

    pub fn merged_from(&self) -> Option<(TileId, TileId)> {
        self.merged_from
    }

    pub fn is_marked_for_removal(&self) -> bool {
        self.marked_for_removal
    }

    pub fn move_to(&mut self, position: Position) {
        self.previous = self.position;
        self.position = Some(position);
    }

    /// Freshly spawned by the last move: no history and no part in a merge.
    pub fn is_new(&self) -> bool {
        self.previous.is_none() && self.merged_into.is_none() && self.merged_from.is_none()
    }

    /// Where the tile starts its travel for the last move. A consumed tile starts
    /// from the cell it held when it was merged away.
    pub fn effective_from(&self) -> Option<Position> {
        if self.merged_into.is_some() {
            self.position
        } else {
            self.previous
        }
    }

    /// Where the tile ends up after the last move. A consumed tile ends on its survivor.
    pub fn effective_to(&self, tiles: &TileArena) -> Option<Position> {
        match self.merged_into {
            Some(survivor) => tiles.get(survivor).and_then(|t| t.position),
            None => self.position,
        }
    }

    pub fn has_moved(&self, tiles: &TileArena) -> bool {
        if self.merged_into.is_some() || self.merged_from.is_some() {
            return true;
        }
        match self.effective_from() {
            Some(from) => Some(from) != self.effective_to(tiles),
            None => false,
        }
    }
}

/// Owner of every tile a board has created, keyed by id.
///
/// Ids are handed out by the arena's own counter and never reused. Tiles leave the
/// arena only through [`TileArena::collect_stale`].
#[derive(Clone, Debug, Default)]
pub struct TileArena {
    tiles: Vec<Tile>,
    index: FxHashMap<TileId, usize>,
    next_id: u64,
}

impl TileArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn get(&self, id: TileId) -> Option<&Tile> {
        self.index.get(&id).map(|&slot| &self.tiles[slot])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    pub(crate) fn get_mut(&mut self, id: TileId) -> Option<&mut Tile> {
        match self.index.get(&id) {
            Some(&slot) => Some(&mut self.tiles[slot]),
            None => None,
        }
    }

    pub(crate) fn value_of(&self, id: TileId) -> u32 {
        self.get(id).map_or(0, |t| t.value)
    }

    pub(crate) fn insert(&mut self, value: u32) -> TileId {
        let id = TileId(self.next_id);
        self.next_id += 1;
        self.index.insert(id, self.tiles.len());
        self.tiles.push(Tile::new(id, value));
        id
    }

    /// Creates the product of merging `first` and `second`.
    pub(crate) fn merge(&mut self, first: TileId, second: TileId) -> TileId {
        let value = self.value_of(first) + self.value_of(second);
        let product = self.insert(value);
        if let Some(tile) = self.get_mut(product) {
            tile.merged_from = Some((first, second));
        }
        for consumed in [first, second] {
            if let Some(tile) = self.get_mut(consumed) {
                tile.merged_into = Some(product);
            }
        }
        product
    }

    /// Drops tiles that were already marked on the previous call, then marks everything
    /// that is left. Tiles still on the grid get unmarked when positions are refreshed,
    /// so only tiles that dropped off the grid two moves ago are removed.
    ///
    /// Merge products stop counting as merged once the next move starts.
    pub(crate) fn collect_stale(&mut self) -> usize {
        let before = self.tiles.len();
        self.tiles.retain(|t| !t.marked_for_removal);
        let removed = before - self.tiles.len();
        if removed > 0 {
            self.index.clear();
            for (slot, tile) in self.tiles.iter().enumerate() {
                self.index.insert(tile.id, slot);
            }
        }
        for tile in &mut self.tiles {
            tile.marked_for_removal = true;
            tile.merged_from = None;
        }
        removed
    }

    pub(crate) fn place(&mut self, id: TileId, position: Position) {
        if let Some(tile) = self.get_mut(id) {
            tile.move_to(position);
            tile.marked_for_removal = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique_and_increasing() {
        let mut arena = TileArena::new();
        let a = arena.insert(2);
        let b = arena.insert(2);
        assert!(a < b);
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn test_merge_links_both_sources() {
        let mut arena = TileArena::new();
        let a = arena.insert(2);
        let b = arena.insert(2);
        let c = arena.merge(a, b);

        assert_eq!(arena.value_of(c), 4);
        assert_eq!(arena.get(a).unwrap().merged_into(), Some(c));
        assert_eq!(arena.get(b).unwrap().merged_into(), Some(c));
        assert_eq!(arena.get(c).unwrap().merged_from(), Some((a, b)));
    }

    #[test]
    fn test_collect_stale_needs_two_passes() {
        let mut arena = TileArena::new();
        let keep = arena.insert(2);
        let drop = arena.insert(4);

        assert_eq!(arena.collect_stale(), 0);
        arena.place(keep, Position::new(0, 0));

        assert_eq!(arena.collect_stale(), 1);
        assert!(arena.get(drop).is_none());
        assert_eq!(arena.get(keep).unwrap().value(), 2);
    }

    #[test]
    fn test_move_to_records_previous() {
        let mut arena = TileArena::new();
        let id = arena.insert(8);
        arena.place(id, Position::new(1, 1));
        arena.place(id, Position::new(1, 3));

        let tile = arena.get(id).unwrap();
        assert_eq!(tile.previous(), Some(Position::new(1, 1)));
        assert_eq!(tile.position(), Some(Position::new(1, 3)));
        assert!(tile.has_moved(&arena));
        assert!(!tile.is_new());
    }
}
