// Copyright 2025 the Quadrille Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;

use crate::element::Element;
use crate::rng::Rand64;

/// How removal strips dependency edges pointing at the removed element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CascadeMode {
    /// Strip edges from the removed element's recorded ancestors only.
    ///
    /// O(ancestors); correct as long as the ancestor back-references are
    /// complete, which the wiring API guarantees.
    #[default]
    Ancestors,
    /// Scan every element in the registry and strip edges to the removed id.
    ///
    /// O(n); the safe fallback when edges may have been wired by hand.
    Safe,
}

/// Insertion-ordered element arena with id and name lookup.
///
/// See the crate docs for the ordering invariant and the dependency-edge
/// model. All mutation goes through methods on this type; there is no
/// ambient/global registry, so multiple boards coexist freely.
#[derive(Clone, Debug)]
pub struct Registry {
    board_id: String,
    counter: u64,
    rng: Rand64,
    elements: Vec<Element>,
    by_id: HashMap<String, usize>,
    by_name: HashMap<String, String>,
}

impl Registry {
    /// Creates an empty registry for the board with the given id.
    ///
    /// The board id prefixes every minted element id.
    #[must_use]
    pub fn new(board_id: &str) -> Self {
        let mut seed = 0_u64;
        for b in board_id.bytes() {
            seed = seed.wrapping_mul(31).wrapping_add(u64::from(b));
        }
        Self {
            board_id: String::from(board_id),
            counter: 0,
            rng: Rand64::new(seed),
            elements: Vec::new(),
            by_id: HashMap::new(),
            by_name: HashMap::new(),
        }
    }

    /// The id prefix used when minting element ids.
    #[must_use]
    pub fn board_id(&self) -> &str {
        &self.board_id
    }

    /// The monotone object counter (total registrations so far).
    #[must_use]
    pub fn object_count(&self) -> u64 {
        self.counter
    }

    /// Number of live elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if no elements are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Registers an element and returns its id.
    ///
    /// An empty id is replaced by a minted `<boardId><typeTag><counter>` id.
    /// Either way, a colliding id gets a random suffix until it is unique.
    /// The element is appended to the insertion-ordered sequence and its
    /// [`Element::pos`] is assigned.
    pub fn register(&mut self, mut element: Element) -> String {
        let num = self.counter;
        self.counter += 1;

        if element.id.is_empty() {
            element.id = format!("{}{}{}", self.board_id, element.kind().type_tag(), num);
        }
        while self.by_id.contains_key(&element.id) {
            let suffix = self.rng.next_below(0x1_0000);
            element.id = format!("{}{:04x}", element.id, suffix);
        }

        element.pos = self.elements.len();
        let id = element.id.clone();
        if let Some(name) = &element.name {
            self.by_name.insert(name.clone(), id.clone());
        }
        self.by_id.insert(id.clone(), element.pos);
        self.elements.push(element);
        id
    }

    /// Looks an element up by id, falling back to name lookup.
    ///
    /// Unknown keys return `None`; this never panics or errors.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<&Element> {
        self.resolve_id(key).and_then(|id| self.get(&id))
    }

    /// Shared access by exact id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Element> {
        self.by_id.get(id).map(|&i| &self.elements[i])
    }

    /// Mutable access by exact id.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut Element> {
        match self.by_id.get(id) {
            Some(&i) => Some(&mut self.elements[i]),
            None => None,
        }
    }

    /// The element at the given insertion-order position.
    #[must_use]
    pub fn at(&self, pos: usize) -> Option<&Element> {
        self.elements.get(pos)
    }

    /// Mutable access by insertion-order position.
    pub fn at_mut(&mut self, pos: usize) -> Option<&mut Element> {
        self.elements.get_mut(pos)
    }

    /// Iterates elements in insertion (= dependency) order.
    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter()
    }

    /// Iterates elements mutably in insertion order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.elements.iter_mut()
    }

    /// Ids in insertion order.
    #[must_use]
    pub fn ids_in_order(&self) -> Vec<String> {
        self.elements.iter().map(|e| e.id.clone()).collect()
    }

    /// Elements matching a predicate, in insertion order.
    pub fn filter<'a, F>(&'a self, mut predicate: F) -> Vec<&'a Element>
    where
        F: FnMut(&Element) -> bool,
    {
        self.elements.iter().filter(|e| predicate(e)).collect()
    }

    /// Records a dependency edge: `child` depends on `parent`.
    ///
    /// Adds `child` to the parent's strong child list and `parent` to the
    /// child's weak ancestor list, deduplicated. Unknown ids are ignored.
    pub fn wire_dependency(&mut self, parent: &str, child: &str) {
        if !self.by_id.contains_key(parent) || !self.by_id.contains_key(child) {
            return;
        }
        if let Some(p) = self.get_mut(parent)
            && !p.children.iter().any(|c| c == child)
        {
            p.children.push(String::from(child));
        }
        if let Some(c) = self.get_mut(child)
            && !c.ancestors.iter().any(|a| a == parent)
        {
            c.ancestors.push(String::from(parent));
        }
    }

    /// Removes a dependency edge previously recorded with
    /// [`Registry::wire_dependency`]. Unknown ids are ignored.
    pub fn unwire_dependency(&mut self, parent: &str, child: &str) {
        if let Some(p) = self.get_mut(parent) {
            p.children.retain(|c| c != child);
        }
        if let Some(c) = self.get_mut(child) {
            c.ancestors.retain(|a| a != parent);
        }
    }

    /// Removes an element and everything that depends on it.
    ///
    /// Children are removed recursively first, then dependency edges
    /// pointing at the element are stripped according to `mode`, then the
    /// element itself is spliced out of the sequence and every later
    /// element's stored position is decremented. Removing an unknown key is
    /// a silent no-op.
    pub fn remove(&mut self, key: &str, mode: CascadeMode) {
        let Some(id) = self.resolve_id(key) else {
            return;
        };

        // Cascade into children first. The list is cloned because removal
        // reshuffles the arena under us.
        let children: Vec<String> = match self.get(&id) {
            Some(el) => el.children.iter().cloned().collect(),
            None => return,
        };
        for child in children {
            self.remove(&child, mode);
        }

        // The cascade may have removed `id` itself (mutual dependencies).
        let Some(pos) = self.by_id.get(&id).copied() else {
            return;
        };

        match mode {
            CascadeMode::Safe => {
                for el in &mut self.elements {
                    el.children.retain(|c| c != &id);
                    el.ancestors.retain(|a| a != &id);
                }
            }
            CascadeMode::Ancestors => {
                let ancestors: Vec<String> =
                    self.elements[pos].ancestors.iter().cloned().collect();
                for anc in ancestors {
                    if let Some(a) = self.get_mut(&anc) {
                        a.children.retain(|c| c != &id);
                    }
                }
            }
        }

        let removed = self.elements.remove(pos);
        for el in &mut self.elements[pos..] {
            el.pos -= 1;
        }
        self.by_id.remove(&id);
        for idx in self.by_id.values_mut() {
            if *idx > pos {
                *idx -= 1;
            }
        }
        if let Some(name) = &removed.name {
            self.by_name.remove(name);
        }
    }

    /// Removes several elements, each with the same cascade mode.
    pub fn remove_many<'a, I>(&mut self, keys: I, mode: CascadeMode)
    where
        I: IntoIterator<Item = &'a str>,
    {
        for key in keys {
            self.remove(key, mode);
        }
    }

    /// Verifies the position invariant: every element's stored `pos` equals
    /// its actual index and the id map agrees. Intended for tests and debug
    /// assertions.
    #[must_use]
    pub fn positions_consistent(&self) -> bool {
        self.elements.iter().enumerate().all(|(i, el)| {
            el.pos == i && self.by_id.get(&el.id).copied() == Some(i)
        })
    }

    /// Random generator shared with the pipeline (label-order shuffling).
    pub fn rng_mut(&mut self) -> &mut Rand64 {
        &mut self.rng
    }

    fn resolve_id(&self, key: &str) -> Option<String> {
        if self.by_id.contains_key(key) {
            return Some(String::from(key));
        }
        self.by_name.get(key).cloned()
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use kurbo::Point;
    use quadrille_coords::CoordinateSystem;

    use crate::element::{Element, Geometry};

    use super::{CascadeMode, Registry};

    fn cs() -> CoordinateSystem {
        CoordinateSystem::new(Point::new(250.0, 250.0), 50.0, 50.0)
    }

    fn point(cs: &CoordinateSystem, x: f64, y: f64) -> Element {
        Element::new(Geometry::point(cs, Point::new(x, y)))
    }

    #[test]
    fn minted_ids_carry_board_prefix_and_counter() {
        let cs = cs();
        let mut reg = Registry::new("brd7");
        let a = reg.register(point(&cs, 0.0, 0.0));
        let b = reg.register(point(&cs, 1.0, 0.0));
        assert_eq!(a, "brd7P0");
        assert_eq!(b, "brd7P1");
        assert_eq!(reg.object_count(), 2);
    }

    #[test]
    fn colliding_explicit_id_gets_a_suffix() {
        let cs = cs();
        let mut reg = Registry::new("b");
        let a = reg.register(Element::with_id(Geometry::point(&cs, Point::ZERO), "dup"));
        let b = reg.register(Element::with_id(Geometry::point(&cs, Point::ZERO), "dup"));
        assert_eq!(a, "dup");
        assert_ne!(b, "dup");
        assert!(b.starts_with("dup"));
        assert!(reg.get(&b).is_some());
    }

    #[test]
    fn lookup_resolves_names() {
        let cs = cs();
        let mut reg = Registry::new("b");
        let mut el = point(&cs, 0.0, 0.0);
        el.name = Some(String::from("A"));
        let id = reg.register(el);

        assert_eq!(reg.lookup("A").map(|e| e.id.clone()), Some(id));
        assert!(reg.lookup("nonsense").is_none());
    }

    #[test]
    fn removal_keeps_positions_dense() {
        let cs = cs();
        let mut reg = Registry::new("b");
        let ids: alloc::vec::Vec<String> =
            (0..5).map(|i| reg.register(point(&cs, f64::from(i), 0.0))).collect();

        reg.remove(&ids[1], CascadeMode::Ancestors);
        assert_eq!(reg.len(), 4);
        assert!(reg.positions_consistent());

        reg.remove(&ids[3], CascadeMode::Ancestors);
        assert_eq!(reg.len(), 3);
        assert!(reg.positions_consistent());

        // Unknown removal is a no-op.
        reg.remove("missing", CascadeMode::Ancestors);
        assert_eq!(reg.len(), 3);
        assert!(reg.positions_consistent());
    }

    #[test]
    fn ancestor_cascade_removes_dependents() {
        let cs = cs();
        let mut reg = Registry::new("b");
        let c = reg.register(point(&cs, 0.0, 0.0));
        let r = reg.register(point(&cs, 1.0, 0.0));
        let circle = reg.register(Element::new(Geometry::Circle {
            center: c.clone(),
            radius: crate::CircleRadius::Through(r.clone()),
        }));
        reg.wire_dependency(&c, &circle);
        reg.wire_dependency(&r, &circle);

        reg.remove(&c, CascadeMode::Ancestors);
        assert!(reg.lookup(&circle).is_none());
        assert!(reg.lookup(&c).is_none());
        // The through-point survives, with its child edge stripped.
        let r_el = reg.lookup(&r).unwrap();
        assert!(r_el.children.is_empty());
        assert!(reg.positions_consistent());
    }

    #[test]
    fn safe_mode_strips_edges_everywhere() {
        let cs = cs();
        let mut reg = Registry::new("b");
        let a = reg.register(point(&cs, 0.0, 0.0));
        let b = reg.register(point(&cs, 1.0, 0.0));
        // Wire an edge by hand without the ancestor back-reference.
        reg.get_mut(&a).unwrap().children.push(b.clone());
        // Make b not depend on a for cascade purposes, then remove b.
        reg.get_mut(&a).unwrap().children.clear();
        reg.get_mut(&b).unwrap().children.push(a.clone());

        reg.remove(&a, CascadeMode::Safe);
        let b_el = reg.lookup(&b).unwrap();
        assert!(b_el.children.is_empty());
    }

    #[test]
    fn unwire_removes_both_edge_halves() {
        let cs = cs();
        let mut reg = Registry::new("b");
        let a = reg.register(point(&cs, 0.0, 0.0));
        let b = reg.register(point(&cs, 1.0, 0.0));
        reg.wire_dependency(&a, &b);
        reg.unwire_dependency(&a, &b);
        assert!(reg.get(&a).unwrap().children.is_empty());
        assert!(reg.get(&b).unwrap().ancestors.is_empty());
        // Removing a now has no cascade into b.
        reg.remove(&a, CascadeMode::Ancestors);
        assert!(reg.lookup(&b).is_some());
    }

    #[test]
    fn wire_dependency_deduplicates() {
        let cs = cs();
        let mut reg = Registry::new("b");
        let a = reg.register(point(&cs, 0.0, 0.0));
        let b = reg.register(point(&cs, 1.0, 0.0));
        reg.wire_dependency(&a, &b);
        reg.wire_dependency(&a, &b);
        assert_eq!(reg.get(&a).unwrap().children.len(), 1);
        assert_eq!(reg.get(&b).unwrap().ancestors.len(), 1);
    }
}
