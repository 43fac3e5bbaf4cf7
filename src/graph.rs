//! Graph Traversal
//!
//! Walks the dependency graph induced by material-typed inputs. The base
//! material performs no cycle detection when edges are created, so every
//! walk here carries a visited set and terminates on arbitrary graphs,
//! cycles included.
//!
//! These are the consumer-side halves of the compiler handshake: scan what
//! is reachable, gather what it references, check dirtiness, and clear the
//! flags once the compiled representation is synchronized.

use rustc_hash::FxHashSet;

use crate::store::{MaterialHandle, MaterialStore, TextureHandle};

/// Every material reachable from `root` through material-typed inputs, in
/// depth-first order with `root` first.
///
/// Each material appears once even when reached along several paths or
/// through a cycle. Handles whose target is no longer in the store are
/// skipped with a warning; the referencing material keeps its stale edge.
#[must_use]
pub fn dependencies(store: &MaterialStore, root: MaterialHandle) -> Vec<MaterialHandle> {
    let mut visited = FxHashSet::default();
    let mut order = Vec::new();
    let mut stack = vec![root];

    while let Some(handle) = stack.pop() {
        if !visited.insert(handle) {
            continue;
        }
        let Some(material) = store.get(handle) else {
            log::warn!("material {handle:?} is referenced but missing from the store");
            continue;
        };
        order.push(handle);
        // Reverse keeps depth-first order aligned with input name order.
        let children: Vec<_> = material.materials().collect();
        stack.extend(children.into_iter().rev());
    }
    order
}

/// Deduplicated texture handles referenced anywhere in the graph reachable
/// from `root`.
#[must_use]
pub fn collect_textures(store: &MaterialStore, root: MaterialHandle) -> Vec<TextureHandle> {
    let mut seen = FxHashSet::default();
    let mut textures = Vec::new();
    for handle in dependencies(store, root) {
        if let Some(material) = store.get(handle) {
            for texture in material.textures() {
                if seen.insert(texture) {
                    textures.push(texture);
                }
            }
        }
    }
    textures
}

/// Whether any material reachable from `root` is dirty.
///
/// Dirtiness does not propagate upward on its own; a compiler that caches
/// whole graphs uses this scan to decide when to recompile.
#[must_use]
pub fn any_dirty(store: &MaterialStore, root: MaterialHandle) -> bool {
    dependencies(store, root)
        .iter()
        .filter_map(|&handle| store.get(handle))
        .any(|material| material.is_dirty())
}

/// Clears the dirty flag of every material reachable from `root`.
///
/// Called by the consuming compiler once its cached compiled state is
/// synchronized. Works through shared references: the dirty flag is
/// settable without write access to the rest of the material.
pub fn mark_compiled(store: &MaterialStore, root: MaterialHandle) {
    for handle in dependencies(store, root) {
        if let Some(material) = store.get(handle) {
            material.set_dirty(false);
        }
    }
}
