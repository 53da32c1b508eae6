//! Crawl frontier: pending URLs plus the visited set
//!
//! In priority order the frontier pops by link category first, then prefers
//! links found on pages over static path guesses, then insertion order. In
//! FIFO order only insertion order counts.

use crate::crawler::parser::LinkCategory;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};
use url::Url;

/// Where a frontier entry came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LinkOrigin {
    /// Seed URL or a link found on a fetched page
    Discovered,

    /// One of the static contact paths joined to the seed's origin
    StaticPath,
}

/// How entries are ordered when popped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontierOrder {
    /// Category, then origin, then insertion order
    Priority,

    /// Insertion order only
    Fifo,
}

/// Sort key; lower pops first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Priority {
    rank: u8,
    origin: LinkOrigin,
    seq: u64,
}

/// A URL queued for fetching with priority information
#[derive(Debug, Clone)]
struct QueuedUrl {
    url: Url,
    priority: Priority,
}

// Reverse comparison so the lowest priority key is popped first from the max-heap
impl Ord for QueuedUrl {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.url.as_str().cmp(self.url.as_str()))
    }
}

impl PartialOrd for QueuedUrl {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for QueuedUrl {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority && self.url == other.url
    }
}

impl Eq for QueuedUrl {}

/// Pending URLs and the set of URLs already visited
///
/// A visited URL is never handed out again, and pushing a visited URL is a
/// no-op. Pushing a URL that is already pending only has an effect when the
/// new entry would pop earlier; the stale entry is skipped when reached.
#[derive(Debug)]
pub struct Frontier {
    order: FrontierOrder,
    heap: BinaryHeap<QueuedUrl>,
    pending: HashMap<String, Priority>,
    visited: HashSet<String>,
    next_seq: u64,
}

impl Frontier {
    /// Creates an empty frontier
    pub fn new(order: FrontierOrder) -> Self {
        Self {
            order,
            heap: BinaryHeap::new(),
            pending: HashMap::new(),
            visited: HashSet::new(),
            next_seq: 0,
        }
    }

    /// Queues a URL
    ///
    /// Returns true if the URL was queued or moved forward.
    pub fn push(&mut self, url: Url, category: LinkCategory, origin: LinkOrigin) -> bool {
        let key = url.as_str().to_string();
        if self.visited.contains(&key) {
            return false;
        }

        let priority = match self.order {
            FrontierOrder::Priority => Priority {
                rank: category.rank(),
                origin,
                seq: self.next_seq,
            },
            FrontierOrder::Fifo => Priority {
                rank: 0,
                origin: LinkOrigin::Discovered,
                seq: self.next_seq,
            },
        };

        if let Some(existing) = self.pending.get(&key) {
            // Ignore the sequence number so equal entries are not re-queued
            if (priority.rank, priority.origin) >= (existing.rank, existing.origin) {
                return false;
            }
        }

        self.next_seq += 1;
        self.pending.insert(key, priority);
        self.heap.push(QueuedUrl { url, priority });
        true
    }

    /// Pops the next URL that has not been visited
    pub fn pop(&mut self) -> Option<Url> {
        while let Some(queued) = self.heap.pop() {
            let key = queued.url.as_str();

            if self.visited.contains(key) {
                continue;
            }

            // A better entry for the same URL was pushed later
            match self.pending.get(key) {
                Some(best) if *best == queued.priority => {
                    self.pending.remove(key);
                    return Some(queued.url);
                }
                _ => continue,
            }
        }

        None
    }

    /// Records a URL as visited and drops any pending entry for it
    ///
    /// Returns false if the URL had already been visited.
    pub fn mark_visited(&mut self, url: &Url) -> bool {
        self.pending.remove(url.as_str());
        self.visited.insert(url.as_str().to_string())
    }

    /// Returns true if the URL has been visited
    pub fn is_visited(&self, url: &Url) -> bool {
        self.visited.contains(url.as_str())
    }

    /// Number of distinct URLs still pending
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Returns whether no URL is pending
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Number of URLs visited so far
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }
}
