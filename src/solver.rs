//! Search algorithms over the puzzle state space.
//!
//! Four strategies share one skeleton: pop a state from a frontier, check
//! the wall-clock budget, test the goal, mark the state visited (structural
//! grid+hand identity, so re-reaching a board via a different move order is
//! pruned), and push its successors. They differ only in frontier
//! discipline:
//! - [`bfs`]: FIFO queue, depth-limited; finds a minimum-move solution.
//! - [`dfs`]: LIFO stack; fast to *a* solution, no length guarantee.
//! - [`greedy`]: best-first on the heuristic value alone.
//! - [`a_star`]: best-first on heuristic value + moves made so far.
//!
//! Every terminal failure (timeout, exhausted frontier, depth limit) is
//! `None`; callers cannot distinguish "unsolvable" from "out of budget" by
//! the return value alone.
use std::collections::{BinaryHeap, HashSet, VecDeque};
use std::rc::Rc;
use std::time::{Duration, Instant};

use crate::engine::{Action, Grid, Piece, State};
use crate::levels::Level;

/// Default depth cutoff for [`bfs`]. At the typical branching factor a
/// 100-move frontier is far beyond reachable memory anyway; the cutoff
/// exists to bound pathological inputs.
pub const MAX_DEPTH: u32 = 100;

/// Default wall-clock budget for a single search.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Evaluation function used by the informed searches. Lower is better.
pub type Heuristic = fn(&Grid, &[Piece]) -> i64;

/// Resource limits applied to a search run.
#[derive(Clone, Copy, Debug)]
pub struct SearchLimits {
    /// Wall-clock budget, polled each time a state is popped.
    pub timeout: Duration,
    /// Depth cutoff; only [`bfs`] enforces it. The bound is exclusive: a
    /// popped state with `moves >= max_depth` is still goal-tested but not
    /// expanded.
    pub max_depth: u32,
}

impl Default for SearchLimits {
    fn default() -> Self {
        SearchLimits {
            timeout: DEFAULT_TIMEOUT,
            max_depth: MAX_DEPTH,
        }
    }
}

/// Heap entry ordering a frontier by ascending priority, with insertion
/// order as the tie-break. `BinaryHeap` is a max-heap, so the comparison is
/// reversed.
struct Scored {
    priority: i64,
    seq: u64,
    state: Rc<State>,
}

impl PartialEq for Scored {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority && self.seq == other.seq
    }
}

impl Eq for Scored {}

impl PartialOrd for Scored {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Scored {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Breadth-first search. Returns a goal state with the minimum number of
/// moves, or `None` if the frontier exhausts, the timeout elapses, or every
/// open path hits `limits.max_depth`.
pub fn bfs(initial: &Rc<State>, level: &Level, limits: &SearchLimits) -> Option<Rc<State>> {
    let start = Instant::now();
    let mut visited: HashSet<Rc<State>> = HashSet::new();
    let mut frontier: VecDeque<Rc<State>> = VecDeque::new();
    frontier.push_back(Rc::clone(initial));

    while let Some(state) = frontier.pop_front() {
        if start.elapsed() >= limits.timeout {
            return None;
        }
        if state.is_goal() {
            return Some(state);
        }
        if !visited.insert(Rc::clone(&state)) {
            continue;
        }
        if state.moves() >= limits.max_depth {
            continue;
        }
        for successor in state.successors(level) {
            frontier.push_back(successor);
        }
    }
    None
}

/// Depth-first search. Successors are pushed in reverse so the
/// first-generated child is explored first. No depth cutoff; DFS commits to
/// a branch until the timeout or the visited set stops it.
pub fn dfs(initial: &Rc<State>, level: &Level, limits: &SearchLimits) -> Option<Rc<State>> {
    let start = Instant::now();
    let mut visited: HashSet<Rc<State>> = HashSet::new();
    let mut frontier: Vec<Rc<State>> = vec![Rc::clone(initial)];

    while let Some(state) = frontier.pop() {
        if start.elapsed() >= limits.timeout {
            return None;
        }
        if state.is_goal() {
            return Some(state);
        }
        if !visited.insert(Rc::clone(&state)) {
            continue;
        }
        for successor in state.successors(level).into_iter().rev() {
            frontier.push(successor);
        }
    }
    None
}

/// Greedy best-first search: always expands the frontier state with the
/// lowest heuristic value, ignoring path cost.
pub fn greedy(
    initial: &Rc<State>,
    heuristic: Heuristic,
    level: &Level,
    limits: &SearchLimits,
) -> Option<Rc<State>> {
    best_first(initial, level, limits, |state| {
        heuristic(state.grid(), state.pieces())
    })
}

/// A* search: expands by heuristic value plus moves made so far. With these
/// heuristics (not proven admissible) the result is not guaranteed
/// minimum-move; use [`bfs`] when optimality matters.
pub fn a_star(
    initial: &Rc<State>,
    heuristic: Heuristic,
    level: &Level,
    limits: &SearchLimits,
) -> Option<Rc<State>> {
    best_first(initial, level, limits, |state| {
        heuristic(state.grid(), state.pieces()) + state.moves() as i64
    })
}

fn best_first(
    initial: &Rc<State>,
    level: &Level,
    limits: &SearchLimits,
    priority: impl Fn(&State) -> i64,
) -> Option<Rc<State>> {
    let start = Instant::now();
    let mut visited: HashSet<Rc<State>> = HashSet::new();
    let mut frontier: BinaryHeap<Scored> = BinaryHeap::new();
    let mut seq: u64 = 0;
    frontier.push(Scored {
        priority: priority(initial),
        seq,
        state: Rc::clone(initial),
    });

    while let Some(Scored { state, .. }) = frontier.pop() {
        if start.elapsed() >= limits.timeout {
            return None;
        }
        if state.is_goal() {
            return Some(state);
        }
        if !visited.insert(Rc::clone(&state)) {
            continue;
        }
        for successor in state.successors(level) {
            seq += 1;
            frontier.push(Scored {
                priority: priority(&successor),
                seq,
                state: successor,
            });
        }
    }
    None
}

/// Walks the parent chain from `goal` back to the root, collecting the
/// action that produced each state, and returns them root-first. The root
/// itself has no action, so a goal at depth k yields exactly k actions.
pub fn reconstruct_path(goal: &State) -> Vec<Action> {
    let mut actions = Vec::new();
    let mut current = Some(goal);
    while let Some(state) = current {
        if let Some(action) = state.action() {
            actions.push(action.clone());
        }
        current = state.parent().map(Rc::as_ref);
    }
    actions.reverse();
    actions
}

/// Runs a greedy search from `state` and returns the first action of the
/// found path, if any. This backs the interactive hint command.
pub fn suggest_move(
    state: &Rc<State>,
    heuristic: Heuristic,
    level: &Level,
    limits: &SearchLimits,
) -> Option<Action> {
    let goal = greedy(state, heuristic, level, limits)?;
    reconstruct_path(&goal).into_iter().next()
}
