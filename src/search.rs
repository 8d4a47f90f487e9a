/// This module implements the best-first search shared by the planners, a variant of
/// [pathfinding's astar function](https://docs.rs/pathfinding/latest/pathfinding/directed/astar/index.html)
/// that keeps an explicit closed set, records the order in which nodes are expanded and breaks
/// priority ties by insertion order.
use fxhash::{FxBuildHasher, FxHashSet};
use indexmap::map::Entry::{Occupied, Vacant};
use indexmap::IndexMap;
use num_traits::Zero;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

use log::warn;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

use std::hash::Hash;

struct SmallestCostHolder<K> {
    estimated_cost: K,
    cost: K,
    index: usize,
    insertion: usize,
}

impl<K: PartialOrd> Eq for SmallestCostHolder<K> {}

impl<K: PartialOrd> PartialEq for SmallestCostHolder<K> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<K: PartialOrd> PartialOrd for SmallestCostHolder<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: PartialOrd> Ord for SmallestCostHolder<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so that the max-heap pops the smallest estimate first, then the entry that
        // was pushed first.
        match other
            .estimated_cost
            .partial_cmp(&self.estimated_cost)
            .unwrap_or(Ordering::Equal)
        {
            Ordering::Equal => other.insertion.cmp(&self.insertion),
            s => s,
        }
    }
}

/// Result of a single [best_first_search](SearchRecord::best_first_search).
#[derive(Clone, Debug)]
pub struct SearchOutcome<N, C> {
    /// Nodes from start to goal, [None] if the goal was not reached.
    pub path: Option<Vec<N>>,
    /// Cost of `path`.
    pub cost: Option<C>,
    /// Every node that was expanded, in expansion order.
    pub expanded: Vec<N>,
}

/// The mutable state of one search run. It is consumed by the search, so nothing carries over
/// from one run to the next.
pub struct SearchRecord<N, C> {
    frontier: BinaryHeap<SmallestCostHolder<C>>,
    /// Cost-so-far and parent index of every node that was ever pushed. The position of a node
    /// in this map is its index.
    parents: FxIndexMap<N, (usize, C)>,
    closed: FxHashSet<usize>,
    expanded: Vec<N>,
    insertions: usize,
}

impl<N, C> Default for SearchRecord<N, C>
where
    N: Eq + Hash + Clone,
    C: Zero + PartialOrd + Copy,
{
    fn default() -> Self {
        SearchRecord::new()
    }
}

impl<N, C> SearchRecord<N, C>
where
    N: Eq + Hash + Clone,
    C: Zero + PartialOrd + Copy,
{
    pub fn new() -> SearchRecord<N, C> {
        SearchRecord {
            frontier: BinaryHeap::new(),
            parents: FxIndexMap::default(),
            closed: FxHashSet::default(),
            expanded: Vec::new(),
            insertions: 0,
        }
    }

    fn push(&mut self, index: usize, cost: C, estimated_cost: C) {
        self.frontier.push(SmallestCostHolder {
            estimated_cost,
            cost,
            index,
            insertion: self.insertions,
        });
        self.insertions += 1;
    }

    fn reverse_path(&self, goal: usize) -> Vec<N> {
        let mut path: Vec<N> = itertools::unfold(goal, |i| {
            self.parents.get_index(*i).map(|(node, &(parent, _))| {
                *i = parent;
                node.clone()
            })
        })
        .collect();
        path.reverse();
        path
    }

    /// Runs a best-first search from `start`. Entries are popped in order of
    /// `cost + estimate(node)`; stale entries left behind by cost improvements are discarded
    /// when popped instead of being removed from the frontier. With `estimate` returning zero
    /// everywhere this is Dijkstra's algorithm, with an admissible estimate it is A*.
    ///
    /// If `max_expansions` is given the search gives up once that many nodes have been
    /// expanded, returning no path but the partial expansion trace.
    pub fn best_first_search<FN, IN, FH, FS>(
        mut self,
        start: &N,
        mut successors: FN,
        mut estimate: FH,
        mut success: FS,
        max_expansions: Option<usize>,
    ) -> SearchOutcome<N, C>
    where
        FN: FnMut(&N) -> IN,
        IN: IntoIterator<Item = (N, C)>,
        FH: FnMut(&N) -> C,
        FS: FnMut(&N) -> bool,
    {
        self.parents
            .insert(start.clone(), (usize::MAX, Zero::zero()));
        let h = estimate(start);
        self.push(0, Zero::zero(), h);

        while let Some(SmallestCostHolder { cost, index, .. }) = self.frontier.pop() {
            // The same node may have been pushed several times as cheaper routes to it were
            // found. Only the first pop counts, the rest are stale.
            if !self.closed.insert(index) {
                continue;
            }
            if max_expansions.is_some_and(|limit| self.expanded.len() >= limit) {
                warn!(
                    "Search stopped after expanding {} nodes",
                    self.expanded.len()
                );
                break;
            }
            let node = match self.parents.get_index(index) {
                Some((node, _)) => node.clone(),
                None => continue,
            };
            self.expanded.push(node.clone());
            if success(&node) {
                let path = self.reverse_path(index);
                return SearchOutcome {
                    path: Some(path),
                    cost: Some(cost),
                    expanded: self.expanded,
                };
            }
            for (successor, move_cost) in successors(&node) {
                let new_cost = cost + move_cost;
                let h; // estimate(&successor)
                let n; // index for successor
                match self.parents.entry(successor) {
                    Vacant(e) => {
                        h = estimate(e.key());
                        n = e.index();
                        e.insert((index, new_cost));
                    }
                    Occupied(mut e) => {
                        // Closed nodes already hold their final cost.
                        if self.closed.contains(&e.index()) || e.get().1 <= new_cost {
                            continue;
                        }
                        h = estimate(e.key());
                        n = e.index();
                        e.insert((index, new_cost));
                    }
                }
                self.push(n, new_cost, new_cost + h);
            }
        }
        SearchOutcome {
            path: None,
            cost: None,
            expanded: self.expanded,
        }
    }
}
