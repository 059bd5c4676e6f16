/*
** This file is a part of Tinder (XMPP stanza object model)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Tinder is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

mod error;

use std::sync::atomic::AtomicU32;
use std::sync::atomic::Ordering;

pub use error::NoMemory;

const MIN_SLOTS: usize = 8;

static NEXT_ARENA_ID: AtomicU32 = AtomicU32::new(1);

fn next_arena_id() -> u32 {
    NEXT_ARENA_ID.fetch_add(1, Ordering::Relaxed)
}

/// Handle of a node stored in an [Arena].
///
/// A handle remembers which arena issued it and which occupant of the
/// slot it names. Arenas refuse handles issued by another arena, including
/// the source of a clone, and handles of freed slots, so a handle can never
/// reach into a tree it does not belong to.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct NodeId {
    arena: u32,
    index: u32,
    generation: u32,
}

/// Memory usage figures of an arena.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ArenaStats {
    /// Number of slots holding a live value.
    pub nr_slots: usize,
    /// Number of freed slots waiting for reuse.
    pub nr_free: usize,
    /// Number of slots the arena can hold without growing.
    pub capacity: usize,
}

#[derive(Clone)]
struct Slot<T> {
    generation: u32,
    next_free: Option<u32>,
    value: T,
}

/// A slot arena for the nodes of a single XML document.
///
/// Freed slots are reused by later allocations. Freeing bumps the
/// generation of the slot, which invalidates the handles issued for the
/// previous occupant.
pub struct Arena<T> {
    id: u32,
    slots: Vec<Slot<T>>,
    free_head: Option<u32>,
    nr_free: usize,
}

impl<T> Arena<T> {
    /// Creates a new 'Arena' with the default initial capacity.
    pub fn new() -> Result<Arena<T>, NoMemory> {
        Self::with_capacity(0)
    }

    pub fn with_capacity(nr_slots: usize) -> Result<Arena<T>, NoMemory> {
        let mut slots = Vec::new();
        slots.try_reserve_exact(nr_slots.max(MIN_SLOTS))?;
        Ok(Arena {
            id: next_arena_id(),
            slots,
            free_head: None,
            nr_free: 0,
        })
    }

    /// Moves the value into a free slot and returns its index.
    pub fn alloc(&mut self, value: T) -> Result<u32, NoMemory> {
        if let Some(index) = self.free_head {
            let slot = &mut self.slots[index as usize];
            self.free_head = slot.next_free.take();
            self.nr_free -= 1;
            slot.value = value;
            return Ok(index);
        }
        let index = u32::try_from(self.slots.len()).map_err(|_| NoMemory)?;
        if self.slots.len() == self.slots.capacity() {
            self.slots.try_reserve(self.slots.len())?;
        }
        self.slots.push(Slot {
            generation: 0,
            next_free: None,
            value,
        });
        Ok(index)
    }

    /// Returns the slot for reuse, leaving the given value in it until
    /// then. Handles of the slot stop resolving.
    pub fn free(&mut self, index: u32, vacant: T) {
        let slot = &mut self.slots[index as usize];
        slot.generation = slot.generation.wrapping_add(1);
        slot.next_free = self.free_head;
        slot.value = vacant;
        self.free_head = Some(index);
        self.nr_free += 1;
    }

    /// Makes a public handle for an index issued by this arena.
    pub fn handle(&self, index: u32) -> NodeId {
        NodeId {
            arena: self.id,
            index,
            generation: self.slots[index as usize].generation,
        }
    }

    /// Returns the index behind the handle if this arena issued it and
    /// the slot still holds the same value.
    pub fn resolve(&self, id: NodeId) -> Option<u32> {
        if id.arena != self.id {
            return None;
        }
        let slot = self.slots.get(id.index as usize)?;
        (slot.generation == id.generation).then_some(id.index)
    }

    pub fn owns(&self, id: NodeId) -> bool {
        self.resolve(id).is_some()
    }

    pub fn get(&self, index: u32) -> &T {
        &self.slots[index as usize].value
    }

    pub fn get_mut(&mut self, index: u32) -> &mut T {
        &mut self.slots[index as usize].value
    }

    pub fn stats(&self) -> ArenaStats {
        ArenaStats {
            nr_slots: self.slots.len() - self.nr_free,
            nr_free: self.nr_free,
            capacity: self.slots.capacity(),
        }
    }
}

impl<T: Clone> Clone for Arena<T> {
    /// Copies every slot into an arena with a new identity.
    fn clone(&self) -> Self {
        Arena {
            id: next_arena_id(),
            slots: self.slots.clone(),
            free_head: self.free_head,
            nr_free: self.nr_free,
        }
    }
}

impl<T> std::fmt::Debug for Arena<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Arena")
            .field("id", &self.id)
            .field("nr_slots", &self.slots.len())
            .field("nr_free", &self.nr_free)
            .finish()
    }
}

#[cfg(test)]
mod tests;
