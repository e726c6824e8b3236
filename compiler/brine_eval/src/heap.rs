//! Index-addressed heap with a free list.
//!
//! Chunks are never removed. Freed slots go on the free list and the next
//! allocation reuses them, so an index handed out stays meaningful until
//! the collector frees its chunk. Indices are the only pointer type.

use crate::value::Value;
use std::fmt;
use thiserror::Error;

/// Stable address of a heap chunk.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HeapIndex(usize);

impl HeapIndex {
    pub const fn new(index: usize) -> Self {
        HeapIndex(index)
    }

    #[inline]
    pub const fn get(self) -> usize {
        self.0
    }
}

impl fmt::Display for HeapIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum HeapError {
    #[error("dereferencing a value not on the heap")]
    NotOnHeap(HeapIndex),
    #[error("dereferencing a null pointer")]
    NullPointer(HeapIndex),
}

#[derive(Debug)]
pub(crate) struct Chunk {
    pub(crate) data: Value,
    pub(crate) used: bool,
    pub(crate) marked: bool,
}

#[derive(Debug, Default)]
pub struct Heap {
    pub(crate) chunks: Vec<Chunk>,
    free: Vec<usize>,
}

impl Heap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value`, reusing a freed chunk when one exists.
    pub fn allocate(&mut self, value: Value) -> HeapIndex {
        if let Some(index) = self.free.pop() {
            let chunk = &mut self.chunks[index];
            chunk.data = value;
            chunk.used = true;
            chunk.marked = false;
            HeapIndex(index)
        } else {
            self.chunks.push(Chunk {
                data: value,
                used: true,
                marked: false,
            });
            HeapIndex(self.chunks.len() - 1)
        }
    }

    /// Release a chunk. Its data is left in place and never read again
    /// until the slot is reallocated. Freeing a free or unknown index
    /// does nothing and returns `false`.
    pub fn free(&mut self, index: HeapIndex) -> bool {
        match self.chunks.get_mut(index.0) {
            Some(chunk) if chunk.used => {
                chunk.used = false;
                chunk.marked = false;
                self.free.push(index.0);
                true
            }
            _ => false,
        }
    }

    pub fn deref(&self, index: HeapIndex) -> Result<&Value, HeapError> {
        match self.chunks.get(index.0) {
            None => Err(HeapError::NotOnHeap(index)),
            Some(chunk) if !chunk.used => Err(HeapError::NullPointer(index)),
            Some(chunk) => Ok(&chunk.data),
        }
    }

    pub fn deref_mut(&mut self, index: HeapIndex) -> Result<&mut Value, HeapError> {
        match self.chunks.get_mut(index.0) {
            None => Err(HeapError::NotOnHeap(index)),
            Some(chunk) if !chunk.used => Err(HeapError::NullPointer(index)),
            Some(chunk) => Ok(&mut chunk.data),
        }
    }

    /// Follow a chain of `Ref`s starting at `index` to the last chunk
    /// in it, the one holding actual data.
    pub fn terminal(&self, mut index: HeapIndex) -> Result<HeapIndex, HeapError> {
        // a chain longer than the heap must revisit a chunk
        for _ in 0..=self.chunks.len() {
            match self.deref(index)? {
                Value::Ref(next) => index = *next,
                _ => return Ok(index),
            }
        }
        Err(HeapError::NotOnHeap(index))
    }

    pub fn is_used(&self, index: HeapIndex) -> bool {
        self.chunks.get(index.0).is_some_and(|c| c.used)
    }

    /// Number of chunks currently in use.
    pub fn live_count(&self) -> usize {
        self.chunks.len() - self.free.len()
    }

    /// Number of chunks ever created, used or free.
    pub fn capacity(&self) -> usize {
        self.chunks.len()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests unwrap to fail loudly on unexpected state")]
mod tests;
