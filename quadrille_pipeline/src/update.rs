// Copyright 2025 the Quadrille Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use quadrille_coords::CoordinateSystem;
use quadrille_registry::{ElementFlags, ElementKind, Registry};

use crate::renderer::Renderer;

/// Rendering fidelity hint for the current update.
///
/// Boards drop to [`UpdateQuality::Low`] while a drag or animation is in
/// flight so backends can skip expensive niceties (anti-aliasing, exact
/// curve sampling) and return to [`UpdateQuality::High`] on the settling
/// update.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UpdateQuality {
    /// Full fidelity.
    #[default]
    High,
    /// Reduced fidelity for in-flight gestures.
    Low,
}

/// Phase 1: flag the elements that must recompute.
///
/// A regular update touches every element that participates in regular
/// updates; a full update (pan, zoom, resize) touches everything,
/// including elements that opted out of regular updates.
pub fn prepare_update(registry: &mut Registry, full: bool) {
    for el in registry.iter_mut() {
        el.needs_update = full || el.needs_regular_update;
    }
}

/// Phase 2: recompute flagged elements in dependency order.
///
/// Registry insertion order is dependency order (elements are constructed
/// after their ancestors), so one forward sweep settles every derived
/// position. Groups are swept in a second pass so they observe their
/// members' final positions regardless of registration order.
///
/// Returns the number of elements recomputed. The update flags stay set;
/// [`update_renderer`] consumes them.
pub fn update_elements(registry: &mut Registry, cs: &CoordinateSystem) -> usize {
    let mut updated = 0;
    for pass_groups in [false, true] {
        for el in registry.iter_mut() {
            if el.needs_update && (el.kind() == ElementKind::Group) == pass_groups {
                el.update_coords(cs);
                updated += 1;
            }
        }
    }
    updated
}

/// Phase 3: push recomputed elements to the renderer and clear their
/// update flags.
///
/// Immediate-mode backends get a cleared surface and every visible element
/// in paint order: layer first, then the depth override where present,
/// then insertion order. Retained-mode backends get only the flagged
/// elements, in registry order, with labels last: label draw order within
/// a frame is randomized so no label consistently paints over its
/// neighbors when they overlap.
///
/// Every pass is bracketed by [`Renderer::suspend_redraw`] and
/// [`Renderer::unsuspend_redraw`] so backends present one frame per pass.
/// The quality hint is forwarded to every [`Renderer::display`] call.
pub fn update_renderer<R: Renderer + ?Sized>(
    registry: &mut Registry,
    renderer: &mut R,
    quality: UpdateQuality,
) {
    renderer.suspend_redraw();
    if renderer.kind().is_immediate() {
        renderer.clear();
        let mut order: Vec<(i32, i32, usize)> = registry
            .iter()
            .filter(|el| el.flags.contains(ElementFlags::VISIBLE))
            .map(|el| (el.layer, el.depth.unwrap_or(0), el.pos))
            .collect();
        order.sort_unstable();
        for &(_, _, pos) in &order {
            if let Some(el) = registry.at(pos) {
                renderer.display(el, true, quality);
            }
        }
    } else {
        let mut labels: Vec<usize> = Vec::new();
        let flagged: Vec<usize> = registry
            .iter()
            .filter(|el| el.needs_update)
            .map(|el| el.pos)
            .collect();
        for pos in flagged {
            let Some(el) = registry.at(pos) else {
                continue;
            };
            if el.label_of.is_some() {
                labels.push(pos);
            } else {
                renderer.display(el, el.flags.contains(ElementFlags::VISIBLE), quality);
            }
        }
        registry.rng_mut().shuffle(&mut labels);
        for pos in labels {
            if let Some(el) = registry.at(pos) {
                renderer.display(el, el.flags.contains(ElementFlags::VISIBLE), quality);
            }
        }
    }
    for el in registry.iter_mut() {
        el.needs_update = false;
    }
    renderer.unsuspend_redraw();
}
