use crate::traceability::domain::ProductNode;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// Source of generation numbers handed to each new store
static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

/// NodeStore - per-build cache of product records keyed by id
///
/// Seeded from the caller's product list and extended as the resolver
/// fetches unknown ids. A store lives for one build only; every store gets
/// its own generation number so results can be traced back to it.
///
/// Concurrent `put`s of the same id are allowed. The last write wins and the
/// id keeps the position of its first insertion.
#[derive(Debug)]
pub struct NodeStore {
    nodes: DashMap<String, (u64, ProductNode)>,
    next_sequence: AtomicU64,
    generation: u64,
}

impl NodeStore {
    pub fn new() -> Self {
        Self {
            nodes: DashMap::new(),
            next_sequence: AtomicU64::new(0),
            generation: NEXT_GENERATION.fetch_add(1, Ordering::Relaxed),
        }
    }

    /// Creates a fresh store holding `nodes` in the given order
    pub fn seeded<I>(nodes: I) -> Self
    where
        I: IntoIterator<Item = ProductNode>,
    {
        let store = Self::new();
        for node in nodes {
            store.put(node);
        }
        store
    }

    pub fn get(&self, id: &str) -> Option<ProductNode> {
        self.nodes.get(id).map(|entry| entry.value().1.clone())
    }

    pub fn has(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn put(&self, node: ProductNode) {
        match self.nodes.entry(node.id.clone()) {
            Entry::Occupied(mut occupied) => occupied.get_mut().1 = node,
            Entry::Vacant(vacant) => {
                let sequence = self.next_sequence.fetch_add(1, Ordering::Relaxed);
                vacant.insert((sequence, node));
            }
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Snapshot of every stored product in first-insertion order
    pub fn all(&self) -> Vec<ProductNode> {
        let mut entries: Vec<(u64, ProductNode)> = self
            .nodes
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        entries.sort_by_key(|(sequence, _)| *sequence);
        entries.into_iter().map(|(_, node)| node).collect()
    }
}

impl Default for NodeStore {
    fn default() -> Self {
        Self::new()
    }
}
