// Copyright 2025 the Quadrille Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Vec2};
use quadrille_events::PointerId;

/// One active pointer from down to up/cancel.
#[derive(Clone, Debug)]
pub struct PointerSession {
    /// The pointer this session tracks.
    pub pointer: PointerId,
    /// Id of the dragged element, or `None` for a background gesture.
    pub target: Option<String>,
    /// Screen position at pointer down.
    pub start: Point,
    /// Screen position before the latest move.
    pub previous: Point,
    /// Latest screen position.
    pub current: Point,
    /// Element screen position minus pointer position, captured at down.
    /// Dragging a coordinate-bearing element preserves this offset so the
    /// element does not jump under the finger.
    pub grab_offset: Vec2,
    /// Whether the pointer has travelled beyond the click slop.
    pub moved: bool,
}

impl PointerSession {
    /// Screen-space delta of the latest move step.
    #[must_use]
    pub fn step(&self) -> Vec2 {
        self.current - self.previous
    }

    /// Total screen-space travel since pointer down.
    #[must_use]
    pub fn travel(&self) -> Vec2 {
        self.current - self.start
    }
}

/// All live pointer sessions, in pointer-down order.
///
/// At most two sessions may own the same element. A third finger landing
/// on an already two-fingered element is rejected at [`SessionTable::begin`]
/// and the caller drops the pointer entirely; its later moves find no
/// session and are ignored.
#[derive(Clone, Debug, Default)]
pub struct SessionTable {
    sessions: Vec<PointerSession>,
}

impl SessionTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a session, unless the target already has two fingers on it.
    ///
    /// Returns `false` (and records nothing) when rejected. A pointer that
    /// already has a session is also rejected; a down for a live pointer
    /// means the host skipped an up, and the existing session wins.
    pub fn begin(
        &mut self,
        pointer: PointerId,
        target: Option<&str>,
        pos: Point,
        grab_offset: Vec2,
    ) -> bool {
        if self.get(pointer).is_some() {
            return false;
        }
        if let Some(id) = target {
            if self.fingers_on(id) >= 2 {
                return false;
            }
        }
        self.sessions.push(PointerSession {
            pointer,
            target: target.map(String::from),
            start: pos,
            previous: pos,
            current: pos,
            grab_offset,
            moved: false,
        });
        true
    }

    /// Records a move for a live pointer. Unknown pointers are ignored.
    pub fn record_move(&mut self, pointer: PointerId, pos: Point, slop: f64) -> bool {
        let Some(s) = self.sessions.iter_mut().find(|s| s.pointer == pointer) else {
            return false;
        };
        s.previous = s.current;
        s.current = pos;
        if (s.current - s.start).hypot() > slop {
            s.moved = true;
        }
        true
    }

    /// Ends a session, returning it if the pointer was live.
    pub fn end(&mut self, pointer: PointerId) -> Option<PointerSession> {
        let idx = self.sessions.iter().position(|s| s.pointer == pointer)?;
        Some(self.sessions.remove(idx))
    }

    /// The session for a pointer, if live.
    #[must_use]
    pub fn get(&self, pointer: PointerId) -> Option<&PointerSession> {
        self.sessions.iter().find(|s| s.pointer == pointer)
    }

    /// Number of live sessions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether no session is live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Number of fingers currently on an element.
    #[must_use]
    pub fn fingers_on(&self, id: &str) -> usize {
        self.sessions
            .iter()
            .filter(|s| s.target.as_deref() == Some(id))
            .count()
    }

    /// The sessions on an element, in down order.
    #[must_use]
    pub fn sessions_on(&self, id: &str) -> Vec<&PointerSession> {
        self.sessions
            .iter()
            .filter(|s| s.target.as_deref() == Some(id))
            .collect()
    }

    /// The background sessions (no element target), in down order.
    #[must_use]
    pub fn background_sessions(&self) -> Vec<&PointerSession> {
        self.sessions.iter().filter(|s| s.target.is_none()).collect()
    }

    /// Resets the step baseline (`previous = current`) of every session
    /// with the given target.
    ///
    /// Two-finger handlers read both fingers' steps on every frame, while
    /// moves arrive one pointer at a time; committing after applying a
    /// frame keeps the unmoved finger's motion from being applied again on
    /// the next one.
    pub fn commit_steps(&mut self, target: Option<&str>) {
        for s in &mut self.sessions {
            if s.target.as_deref() == target {
                s.previous = s.current;
            }
        }
    }

    /// Drops every session, e.g. on gesture cancel.
    pub fn clear(&mut self) {
        self.sessions.clear();
    }

    /// Drops every session whose target is the given element.
    pub fn release_target(&mut self, id: &str) {
        self.sessions.retain(|s| s.target.as_deref() != Some(id));
    }
}
