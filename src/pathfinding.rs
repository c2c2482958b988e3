//! Dijkstra's shortest path over any [`Queue`]
//!
//! The open set lives in the queue, keyed by the best known cost from the
//! start. When a cheaper route to an open node is found its entry is lowered
//! in place with [`Queue::decrease_key`] instead of being re-inserted, so
//! every node appears in the queue at most once.
//!
//! Because the queue breaks ties first-in first-out, nodes with equal cost
//! are expanded in discovery order and the search is fully deterministic.
//!
//! # Example
//!
//! ```rust
//! use stable_pqueue::pathfinding::{dijkstra, SearchNode};
//! use stable_pqueue::IndexedPriorityQueue;
//!
//! #[derive(Clone, PartialEq, Eq, Hash, Debug)]
//! struct GridPos { x: i32, y: i32, goal_x: i32, goal_y: i32 }
//!
//! impl SearchNode for GridPos {
//!     type Cost = u32;
//!
//!     fn successors(&self) -> Vec<(Self, Self::Cost)> {
//!         [(1, 0), (-1, 0), (0, 1), (0, -1)]
//!             .iter()
//!             .map(|(dx, dy)| (GridPos { x: self.x + dx, y: self.y + dy, ..self.clone() }, 1))
//!             .collect()
//!     }
//!
//!     fn is_goal(&self) -> bool {
//!         self.x == self.goal_x && self.y == self.goal_y
//!     }
//! }
//!
//! let start = GridPos { x: 0, y: 0, goal_x: 2, goal_y: 2 };
//! let (path, cost) = dijkstra::<_, IndexedPriorityQueue<_, _>>(&start).unwrap();
//! assert_eq!(cost, 4);
//! assert_eq!(path.len(), 5);
//! ```

use crate::traits::{Priority, Queue};
use rustc_hash::{FxHashMap, FxHashSet};
use std::cmp::Ordering;
use std::hash::Hash;
use std::ops::Add;

/// Trait for types that can be used as path costs.
///
/// `Default` must be the zero cost.
pub trait Cost: Priority + Add<Output = Self> + Default {}

impl<T> Cost for T where T: Priority + Add<Output = Self> + Default {}

/// Trait for nodes in a search graph.
///
/// The node carries all context needed to generate successors and to
/// recognise a goal.
pub trait SearchNode: Clone + Eq + Hash {
    /// The cost type for edge weights
    type Cost: Cost;

    /// Returns all successor nodes along with the cost to reach them.
    fn successors(&self) -> Vec<(Self, Self::Cost)>;

    /// Returns true if this node is a goal state.
    fn is_goal(&self) -> bool;
}

/// Best known route to a node
struct Visit<N: SearchNode> {
    cost: N::Cost,
    came_from: Option<N>,
}

fn reconstruct_path<N: SearchNode>(visits: &FxHashMap<N, Visit<N>>, goal: N) -> Vec<N> {
    let mut path = vec![goal];
    while let Some(prev) = path
        .last()
        .and_then(|node| visits.get(node))
        .and_then(|visit| visit.came_from.clone())
    {
        path.push(prev);
    }
    path.reverse();
    path
}

/// Runs Dijkstra's algorithm from `start` until a node's `is_goal()` returns true.
///
/// # Type Parameters
/// - `N`: The node type implementing [`SearchNode`]
/// - `Q`: The queue used for the open set
///
/// # Returns
/// - `Some((path, cost))` with the path from `start` to the goal, inclusive
/// - `None` if no goal is reachable
pub fn dijkstra<N, Q>(start: &N) -> Option<(Vec<N>, N::Cost)>
where
    N: SearchNode,
    Q: Queue<N, N::Cost>,
{
    let mut open = Q::new();
    let mut visits: FxHashMap<N, Visit<N>> = FxHashMap::default();
    let mut closed: FxHashSet<N> = FxHashSet::default();

    open.enqueue(start.clone(), N::Cost::default());
    visits.insert(
        start.clone(),
        Visit {
            cost: N::Cost::default(),
            came_from: None,
        },
    );

    while let Ok(cost) = open.peek_priority() {
        let Ok(node) = open.dequeue() else {
            break;
        };

        if node.is_goal() {
            log::debug!(
                "goal reached after closing {} nodes, {} still open",
                closed.len(),
                open.len()
            );
            return Some((reconstruct_path(&visits, node), cost));
        }

        for (next, step) in node.successors() {
            if closed.contains(&next) {
                continue;
            }
            let tentative = cost + step;

            match visits.get(&next) {
                Some(visit) if tentative.cmp_priority(&visit.cost) != Ordering::Less => continue,
                Some(_) => {
                    if open.decrease_key(&next, tentative).is_err() {
                        continue;
                    }
                }
                None => open.enqueue(next.clone(), tentative),
            }

            visits.insert(
                next,
                Visit {
                    cost: tentative,
                    came_from: Some(node.clone()),
                },
            );
        }

        closed.insert(node);
    }

    log::debug!("search exhausted after closing {} nodes", closed.len());
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::priority_queue::PriorityQueue;

    /// Diamond where the direct edge to `3` is more expensive than the detour
    #[derive(Clone, PartialEq, Eq, Hash, Debug)]
    struct Diamond(u8);

    impl SearchNode for Diamond {
        type Cost = u32;

        fn successors(&self) -> Vec<(Self, u32)> {
            match self.0 {
                0 => vec![(Diamond(3), 10), (Diamond(1), 1), (Diamond(2), 4)],
                1 => vec![(Diamond(2), 1)],
                2 => vec![(Diamond(3), 1)],
                _ => vec![],
            }
        }

        fn is_goal(&self) -> bool {
            self.0 == 3
        }
    }

    #[test]
    fn test_decrease_key_improves_route() {
        let (path, cost) = dijkstra::<_, PriorityQueue<_, _>>(&Diamond(0)).unwrap();
        assert_eq!(cost, 3);
        assert_eq!(path, vec![Diamond(0), Diamond(1), Diamond(2), Diamond(3)]);
    }

    #[test]
    fn test_start_is_goal() {
        let (path, cost) = dijkstra::<_, PriorityQueue<_, _>>(&Diamond(3)).unwrap();
        assert_eq!(cost, 0);
        assert_eq!(path, vec![Diamond(3)]);
    }
}
