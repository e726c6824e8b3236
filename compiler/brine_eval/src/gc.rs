//! Mark-sweep collection over heap chunks.
//!
//! Roots are the values of every variable in every active frame. Marking
//! walks inline arrays, objects and bound receivers looking for `Ref`s,
//! then follows each newly marked chunk's own data. Sweeping frees every
//! used chunk left unmarked and clears marks on the survivors.
//!
//! Values held only on an in-flight RPN stack are not roots.

use crate::heap::{Heap, HeapIndex};
use crate::value::Value;

/// Adaptive trigger: collect once `threshold` chunks have been allocated
/// since the previous collection, then move the threshold to twice the
/// surviving live set.
#[derive(Clone, Debug)]
pub struct GcState {
    allocated_since: usize,
    threshold: usize,
    enabled: bool,
    collections: usize,
}

impl GcState {
    pub fn new(initial_threshold: usize, enabled: bool) -> Self {
        GcState {
            allocated_since: 0,
            threshold: initial_threshold,
            enabled,
            collections: 0,
        }
    }

    /// Record one heap-allocating declaration. Returns whether a
    /// collection is due.
    pub fn note_allocation(&mut self) -> bool {
        self.allocated_since += 1;
        self.enabled && self.allocated_since >= self.threshold
    }

    /// Reset the counter after a collection that left `live` chunks.
    pub fn reset(&mut self, live: usize) {
        self.allocated_since = 0;
        self.threshold = 2 * live;
        self.collections += 1;
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    pub fn collections(&self) -> usize {
        self.collections
    }
}

/// Collect every chunk unreachable from `roots`. Returns the number freed.
pub fn collect<'v>(heap: &mut Heap, roots: impl IntoIterator<Item = &'v Value>) -> usize {
    let mut worklist = Vec::new();
    for root in roots {
        push_refs(root, &mut worklist);
    }
    mark(heap, worklist);
    sweep(heap)
}

/// Collect the heap indices directly reachable from `value` without
/// crossing into the heap.
fn push_refs(value: &Value, out: &mut Vec<HeapIndex>) {
    let mut pending = vec![value];
    while let Some(value) = pending.pop() {
        match value {
            Value::Ref(index) => out.push(*index),
            Value::Array(array) => pending.extend(&array.elements),
            Value::Object(object) => pending.extend(&object.members),
            Value::Function(func) => out.extend(func.this_ref),
            _ => {}
        }
    }
}

fn mark(heap: &mut Heap, mut worklist: Vec<HeapIndex>) {
    while let Some(index) = worklist.pop() {
        let Some(chunk) = heap.chunks.get_mut(index.get()) else {
            continue;
        };
        if !chunk.used || chunk.marked {
            continue;
        }
        chunk.marked = true;
        push_refs(&chunk.data, &mut worklist);
    }
}

fn sweep(heap: &mut Heap) -> usize {
    let mut garbage = Vec::new();
    for (i, chunk) in heap.chunks.iter_mut().enumerate() {
        if !chunk.used {
            continue;
        }
        if chunk.marked {
            chunk.marked = false;
        } else {
            garbage.push(HeapIndex::new(i));
        }
    }
    for index in &garbage {
        heap.free(*index);
    }
    garbage.len()
}
