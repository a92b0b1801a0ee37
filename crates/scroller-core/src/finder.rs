//! Grid-bucketed spatial index.
//!
//! The plane is cut into square cells of side `cell_size`, each identified by
//! its floor-divided origin. Every registered key is stored in each cell its
//! last recorded rectangle touches, so a range query only visits the cells the
//! query rectangle spans instead of every registered key.
//!
//! The index owns no entities. Keys are cheap handles (see
//! [`crate::store::Handle`]) and the caller pushes the current rectangle of an
//! entity on every `add`/`update`.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::hash::Hash;

use crate::geometry::{Pt, Rect};

/// Default side length of a grid cell, in world units.
pub const DEFAULT_CELL_SIZE: i32 = 100;

/// Origin of the cell containing `p`. Rounds toward negative infinity so that
/// negative coordinates land in the correct cell.
pub fn cell_origin(p: Pt, cell_size: i32) -> Pt {
    Pt::new(
        p.x.div_euclid(cell_size) * cell_size,
        p.y.div_euclid(cell_size) * cell_size,
    )
}

/// Origins of every cell whose square area intersects `rect`.
pub fn cells_spanning(rect: &Rect, cell_size: i32) -> Vec<Pt> {
    let top_left = cell_origin(Pt::new(rect.left, rect.top), cell_size);
    let bottom_right = cell_origin(Pt::new(rect.right, rect.bottom), cell_size);

    let cols = ((bottom_right.x - top_left.x) / cell_size + 1) as usize;
    let rows = ((bottom_right.y - top_left.y) / cell_size + 1) as usize;
    let mut cells = Vec::with_capacity(cols * rows);

    let mut x = top_left.x;
    while x <= bottom_right.x {
        let mut y = top_left.y;
        while y <= bottom_right.y {
            cells.push(Pt::new(x, y));
            y += cell_size;
        }
        x += cell_size;
    }
    cells
}

/// Spatial grid over keys of type `K`.
#[derive(Debug, Clone)]
pub struct Finder<K> {
    cell_size: i32,
    /// Last recorded rectangle per registered key.
    rects: HashMap<K, Rect>,
    /// Keys overlapping each non-empty cell.
    cells: HashMap<Pt, HashSet<K>>,
}

impl<K> Default for Finder<K>
where
    K: Copy + Eq + Hash + Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Finder<K>
where
    K: Copy + Eq + Hash + Ord,
{
    pub fn new() -> Self {
        Self::with_cell_size(DEFAULT_CELL_SIZE)
    }

    pub fn with_cell_size(cell_size: i32) -> Self {
        assert!(cell_size > 0, "cell size must be positive, got {cell_size}");
        Self {
            cell_size,
            rects: HashMap::new(),
            cells: HashMap::new(),
        }
    }

    pub fn cell_size(&self) -> i32 {
        self.cell_size
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    pub fn contains(&self, key: K) -> bool {
        self.rects.contains_key(&key)
    }

    /// Rectangle recorded for `key` by the last `add`/`update`.
    pub fn rect_of(&self, key: K) -> Option<Rect> {
        self.rects.get(&key).copied()
    }

    /// Number of non-empty cells. Empty cells are always pruned.
    pub fn occupied_cells(&self) -> usize {
        self.cells.len()
    }

    /// Register `key` with `rect`. Adding a key twice re-indexes it.
    pub fn add(&mut self, key: K, rect: Rect) {
        if self.rects.contains_key(&key) {
            self.update(key, rect);
            return;
        }
        for cell in cells_spanning(&rect, self.cell_size) {
            self.cells.entry(cell).or_default().insert(key);
        }
        self.rects.insert(key, rect);
    }

    /// Move `key` to `rect`, touching only the cells that changed.
    ///
    /// Returns `false` and does nothing if `key` was never added.
    pub fn update(&mut self, key: K, rect: Rect) -> bool {
        let Some(old_rect) = self.rects.get_mut(&key) else {
            return false;
        };
        let old_rect = std::mem::replace(old_rect, rect);
        if old_rect == rect {
            return true;
        }

        let old_cells: HashSet<Pt> = cells_spanning(&old_rect, self.cell_size)
            .into_iter()
            .collect();
        let new_cells: HashSet<Pt> = cells_spanning(&rect, self.cell_size)
            .into_iter()
            .collect();

        for cell in old_cells.difference(&new_cells) {
            self.detach(*cell, key);
        }
        for cell in new_cells.difference(&old_cells) {
            self.cells.entry(*cell).or_default().insert(key);
        }
        true
    }

    /// Unregister `key`. Returns `false` if it was not registered.
    pub fn remove(&mut self, key: K) -> bool {
        let Some(rect) = self.rects.remove(&key) else {
            return false;
        };
        for cell in cells_spanning(&rect, self.cell_size) {
            self.detach(cell, key);
        }
        true
    }

    /// Every registered key whose recorded rectangle intersects `rect`.
    pub fn query(&self, rect: &Rect) -> BTreeSet<K> {
        let mut found = BTreeSet::new();
        for cell in cells_spanning(rect, self.cell_size) {
            let Some(keys) = self.cells.get(&cell) else {
                continue;
            };
            for key in keys {
                // Cell membership over-approximates; filter on the real rect.
                if self.rects.get(key).is_some_and(|r| r.intersects(rect)) {
                    found.insert(*key);
                }
            }
        }
        found
    }

    pub fn clear(&mut self) {
        self.rects.clear();
        self.cells.clear();
    }

    fn detach(&mut self, cell: Pt, key: K) {
        if let Some(keys) = self.cells.get_mut(&cell) {
            keys.remove(&key);
            if keys.is_empty() {
                self.cells.remove(&cell);
            }
        }
    }

    #[cfg(test)]
    fn cells_of(&self, key: K) -> BTreeSet<Pt> {
        self.cells
            .iter()
            .filter(|(_, keys)| keys.contains(&key))
            .map(|(cell, _)| *cell)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell_set(rect: Rect) -> BTreeSet<Pt> {
        cells_spanning(&rect, 100).into_iter().collect()
    }

    #[test]
    fn cell_origin_floors_negative_coordinates() {
        assert_eq!(cell_origin(Pt::new(0, 0), 100), Pt::new(0, 0));
        assert_eq!(cell_origin(Pt::new(99, 199), 100), Pt::new(0, 100));
        assert_eq!(cell_origin(Pt::new(-1, -1), 100), Pt::new(-100, -100));
        assert_eq!(cell_origin(Pt::new(-100, -101), 100), Pt::new(-100, -200));
    }

    #[test]
    fn single_cell_rect() {
        assert_eq!(
            cell_set(Rect::new(10, 10, 90, 90)),
            BTreeSet::from([Pt::new(0, 0)])
        );
    }

    #[test]
    fn two_cell_rect() {
        assert_eq!(
            cell_set(Rect::new(50, 10, 150, 20)),
            BTreeSet::from([Pt::new(0, 0), Pt::new(100, 0)])
        );
    }

    #[test]
    fn four_cell_rect_across_origin() {
        assert_eq!(
            cell_set(Rect::new(-10, -10, 10, 10)),
            BTreeSet::from([
                Pt::new(-100, -100),
                Pt::new(-100, 0),
                Pt::new(0, -100),
                Pt::new(0, 0),
            ])
        );
    }

    #[test]
    fn rect_ending_on_cell_boundary_includes_next_cell() {
        // Closed bounds: right == 100 touches cell 100.
        assert_eq!(
            cell_set(Rect::new(0, 0, 100, 0)),
            BTreeSet::from([Pt::new(0, 0), Pt::new(100, 0)])
        );
    }

    #[test]
    fn query_filters_cell_false_positives() {
        let mut finder = Finder::new();
        finder.add(1u32, Rect::new(0, 0, 10, 10));
        finder.add(2u32, Rect::new(80, 80, 90, 90));

        // Same cell as both, but only overlaps the first.
        let hits = finder.query(&Rect::new(5, 5, 20, 20));
        assert_eq!(hits, BTreeSet::from([1]));
    }

    #[test]
    fn query_has_no_duplicates_for_multi_cell_entities() {
        let mut finder = Finder::new();
        finder.add(7u32, Rect::new(-250, -250, 250, 250));
        let hits = finder.query(&Rect::new(-300, -300, 300, 300));
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn update_moves_between_cells_and_prunes() {
        let mut finder = Finder::new();
        finder.add(1u32, Rect::new(10, 10, 20, 20));
        assert!(finder.update(1, Rect::new(510, 10, 520, 20)));

        assert!(finder.query(&Rect::new(0, 0, 99, 99)).is_empty());
        assert_eq!(finder.query(&Rect::new(500, 0, 599, 99)).len(), 1);
        assert_eq!(finder.occupied_cells(), 1);
        assert_eq!(finder.cells_of(1), BTreeSet::from([Pt::new(500, 0)]));
    }

    #[test]
    fn update_within_shared_cells_keeps_membership_exact() {
        let mut finder = Finder::new();
        finder.add(1u32, Rect::new(50, 50, 150, 60));
        finder.update(1, Rect::new(150, 50, 250, 60));
        assert_eq!(
            finder.cells_of(1),
            BTreeSet::from([Pt::new(100, 0), Pt::new(200, 0)])
        );
        assert_eq!(finder.rect_of(1), Some(Rect::new(150, 50, 250, 60)));
    }

    #[test]
    fn update_and_remove_of_unknown_key_are_noops() {
        let mut finder: Finder<u32> = Finder::new();
        assert!(!finder.update(3, Rect::new(0, 0, 1, 1)));
        assert!(!finder.remove(3));
        assert!(finder.is_empty());
        assert_eq!(finder.occupied_cells(), 0);
    }

    #[test]
    fn remove_prunes_every_cell() {
        let mut finder = Finder::new();
        finder.add(1u32, Rect::new(0, 0, 350, 350));
        finder.add(2u32, Rect::new(0, 0, 5, 5));
        assert!(finder.remove(1));
        assert_eq!(finder.occupied_cells(), 1);
        assert!(!finder.contains(1));
        assert_eq!(finder.query(&Rect::new(0, 0, 400, 400)), BTreeSet::from([2]));
    }

    #[test]
    fn custom_cell_size() {
        let mut finder = Finder::with_cell_size(16);
        finder.add(1u32, Rect::new(0, 0, 40, 4));
        assert_eq!(finder.occupied_cells(), 3);
        assert_eq!(finder.cell_size(), 16);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn arb_rect() -> impl Strategy<Value = Rect> {
            (-600i32..600, -600i32..600, 0i32..250, 0i32..250)
                .prop_map(|(l, t, w, h)| Rect::new(l, t, l + w, t + h))
        }

        #[derive(Debug, Clone)]
        enum Op {
            Add(u8, Rect),
            Update(u8, Rect),
            Remove(u8),
        }

        fn arb_op() -> impl Strategy<Value = Op> {
            prop_oneof![
                (0u8..16, arb_rect()).prop_map(|(k, r)| Op::Add(k, r)),
                (0u8..16, arb_rect()).prop_map(|(k, r)| Op::Update(k, r)),
                (0u8..16).prop_map(Op::Remove),
            ]
        }

        proptest! {
            #[test]
            fn query_matches_brute_force(
                ops in proptest::collection::vec(arb_op(), 0..60),
                probe in arb_rect(),
            ) {
                let mut finder = Finder::new();
                let mut model: HashMap<u8, Rect> = HashMap::new();
                for op in ops {
                    match op {
                        Op::Add(k, r) => {
                            finder.add(k, r);
                            model.insert(k, r);
                        },
                        Op::Update(k, r) => {
                            let tracked = finder.update(k, r);
                            prop_assert_eq!(tracked, model.contains_key(&k));
                            if let Some(slot) = model.get_mut(&k) {
                                *slot = r;
                            }
                        },
                        Op::Remove(k) => {
                            finder.remove(k);
                            model.remove(&k);
                        },
                    }
                }

                let expected: BTreeSet<u8> = model
                    .iter()
                    .filter(|(_, r)| r.intersects(&probe))
                    .map(|(k, _)| *k)
                    .collect();
                prop_assert_eq!(finder.query(&probe), expected);

                // Cell membership is exactly the cells of the recorded rect.
                for (k, r) in &model {
                    prop_assert_eq!(finder.cells_of(*k), cell_set(*r));
                }
            }

            #[test]
            fn unrelated_entities_do_not_change_query(
                probe in arb_rect(),
                base in proptest::collection::vec(arb_rect(), 0..20),
                far_dx in 2000i32..5000,
            ) {
                let mut finder = Finder::new();
                for (i, r) in base.iter().enumerate() {
                    finder.add(i as u32, *r);
                }
                let before = finder.query(&probe);

                let far = Rect::new(
                    probe.right + far_dx,
                    probe.top,
                    probe.right + far_dx + 10,
                    probe.top + 10,
                );
                finder.add(10_000, far);
                prop_assert_eq!(finder.query(&probe), before.clone());
                finder.remove(10_000);
                prop_assert_eq!(finder.query(&probe), before);
            }

            #[test]
            fn cells_cover_exactly_intersecting_squares(rect in arb_rect()) {
                let cells = cell_set(rect);
                // Brute force over a window that surely contains the rect.
                for cx in (-800..=900).step_by(100) {
                    for cy in (-800..=900).step_by(100) {
                        let square = Rect::new(cx, cy, cx + 99, cy + 99);
                        prop_assert_eq!(
                            cells.contains(&Pt::new(cx, cy)),
                            square.intersects(&rect),
                            "cell ({}, {}) vs {:?}", cx, cy, rect
                        );
                    }
                }
            }
        }
    }
}
