//! Module implement a slot arena backing the tree's nodes.
//!
//! Slot 0 is reserved at construction for the sentinel, it is never freed
//! and never handed out by `alloc()`. Freed slots are recycled LIFO and
//! their generation is bumped, so that a handle to a freed node cannot
//! alias a node allocated later into the same slot. Every arena is
//! stamped with a process wide id, handles minted by one arena are not
//! live in another.

use std::{
    ops::{Index, IndexMut},
    sync::atomic::{AtomicU32, Ordering::SeqCst},
};

use crate::node::NodeId;

struct Slot<T> {
    generation: u32,
    value: Option<T>,
}

// zero is left for the sentinel handle.
static ARENA_ID: AtomicU32 = AtomicU32::new(1);

pub(crate) struct Arena<T> {
    id: u32,
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
}

impl<T> Arena<T> {
    pub(crate) fn new(sentinel: T) -> Arena<T> {
        let slot = Slot {
            generation: NodeId::NIL.generation,
            value: Some(sentinel),
        };
        Arena {
            id: ARENA_ID.fetch_add(1, SeqCst),
            slots: vec![slot],
            free: Vec::default(),
        }
    }

    /// Number of live values, excluding the sentinel.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.slots.len() - 1 - self.free.len()
    }

    pub(crate) fn alloc(&mut self, value: T) -> NodeId {
        match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.value = Some(value);
                NodeId {
                    arena: self.id,
                    index,
                    generation: slot.generation,
                }
            }
            None => {
                if self.slots.len() > (u32::MAX as usize) {
                    panic!("arena exhausted {} slots", self.slots.len())
                }
                let index = self.slots.len() as u32;
                self.slots.push(Slot {
                    generation: 0,
                    value: Some(value),
                });
                NodeId {
                    arena: self.id,
                    index,
                    generation: 0,
                }
            }
        }
    }

    /// Check whether `id` refers to a live value. The sentinel is not
    /// counted as live.
    pub(crate) fn contains(&self, id: NodeId) -> bool {
        !id.is_nil() && self.get(id).is_some()
    }

    pub(crate) fn get(&self, id: NodeId) -> Option<&T> {
        match self.slot(id) {
            Some(slot) => slot.value.as_ref(),
            None => None,
        }
    }

    fn slot(&self, id: NodeId) -> Option<&Slot<T>> {
        let arena = if id.is_nil() { 0 } else { self.id };
        match self.slots.get(id.to_index()) {
            Some(slot) if id.arena == arena && slot.generation == id.generation => {
                Some(slot)
            }
            _ => None,
        }
    }

    /// Release the slot and return its value. Returns None for the sentinel
    /// and for stale handles.
    pub(crate) fn take(&mut self, id: NodeId) -> Option<T> {
        if !self.contains(id) {
            return None;
        }
        let slot = &mut self.slots[id.to_index()];
        let value = slot.value.take();
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        value
    }

    /// Drop every value except the sentinel. Slots are kept for reuse and
    /// generations are bumped, handles issued before `clear()` stay stale.
    pub(crate) fn clear(&mut self) {
        self.free.clear();
        for (index, slot) in self.slots.iter_mut().enumerate().skip(1).rev() {
            if slot.value.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
            }
            self.free.push(index as u32);
        }
    }
}

impl<T> Index<NodeId> for Arena<T> {
    type Output = T;

    #[inline]
    fn index(&self, id: NodeId) -> &T {
        match self.slots[id.to_index()].value.as_ref() {
            Some(value) => value,
            None => panic!("arena slot {:?} is vacant, call the programmer", id),
        }
    }
}

impl<T> IndexMut<NodeId> for Arena<T> {
    #[inline]
    fn index_mut(&mut self, id: NodeId) -> &mut T {
        match self.slots[id.to_index()].value.as_mut() {
            Some(value) => value,
            None => panic!("arena slot {:?} is vacant, call the programmer", id),
        }
    }
}

#[cfg(test)]
#[path = "arena_test.rs"]
mod arena_test;
