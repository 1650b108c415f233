//! Best-first (A*) search over board states.
//!
//! Nodes live in an arena and refer to their parent by index, so the path can be
//! rebuilt from the goal node after the frontier and closed map are dropped.
use crate::engine::{Board, Fingerprint, Move};
use crate::heuristics::Heuristic;
use fxhash::FxHashMap;
use log::{debug, info, trace};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

type NodeId = usize;

/// A board snapshot reached during the search. Never modified after creation.
#[derive(Clone, Debug)]
struct SearchNode {
    board: Board,
    last_move: Option<Move>,
    g: u32,
    h: u32,
    f: u32,
    parent: Option<NodeId>,
}

/// Frontier key. `BinaryHeap` is a max-heap, so the ordering is inverted: the
/// "greatest" entry has the lowest `f`, then the lowest `h`, then the highest `g`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct FrontierEntry {
    f: u32,
    h: u32,
    g: u32,
    node: NodeId,
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .cmp(&self.f)
            .then_with(|| other.h.cmp(&self.h))
            .then_with(|| self.g.cmp(&other.g))
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Node counters reported for a search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes popped from the frontier and expanded, not counting the final goal pop.
    pub expanded: u64,
    /// Nodes ever pushed onto the frontier, the root included.
    pub explored: u64,
}

/// A path from the initial board to the goal.
#[derive(Clone, Debug)]
pub struct Solution {
    path: Vec<Board>,
    moves: Vec<Move>,
    /// Number of slides, i.e. the `g` of the goal node.
    pub cost: u32,
    pub stats: SearchStats,
}

impl Solution {
    /// Every board from the initial one to the goal, both included.
    pub fn path(&self) -> &[Board] {
        &self.path
    }

    /// The slide that produced each board after the first.
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }
}

/// How a search ended.
#[derive(Clone, Debug)]
pub enum SearchOutcome {
    /// The goal was popped from the frontier.
    Solved(Solution),
    /// The frontier emptied without reaching the goal.
    Exhausted(SearchStats),
}

impl SearchOutcome {
    pub fn stats(&self) -> SearchStats {
        match self {
            SearchOutcome::Solved(solution) => solution.stats,
            SearchOutcome::Exhausted(stats) => *stats,
        }
    }

    pub fn solution(&self) -> Option<&Solution> {
        match self {
            SearchOutcome::Solved(solution) => Some(solution),
            SearchOutcome::Exhausted(_) => None,
        }
    }
}

/// State of one A* run: the node arena, the frontier and the closed map.
struct AStar {
    goal: Fingerprint,
    size: usize,
    heuristic: Heuristic,
    arena: Vec<SearchNode>,
    frontier: BinaryHeap<FrontierEntry>,
    closed: FxHashMap<Fingerprint, u32>,
    expanded: u64,
    explored: u64,
}

impl AStar {
    fn new(initial: &Board, goal: &Board, heuristic: Heuristic) -> Self {
        let mut search = AStar {
            goal: goal.fingerprint(),
            size: initial.size(),
            heuristic,
            arena: Vec::new(),
            frontier: BinaryHeap::new(),
            closed: FxHashMap::default(),
            expanded: 0,
            explored: 0,
        };
        let h = heuristic.estimate(initial);
        search.push(SearchNode {
            board: initial.clone(),
            last_move: None,
            g: 0,
            h,
            f: h,
            parent: None,
        });
        search
    }

    fn push(&mut self, node: SearchNode) {
        let id = self.arena.len();
        self.frontier.push(FrontierEntry {
            f: node.f,
            h: node.h,
            g: node.g,
            node: id,
        });
        self.arena.push(node);
        self.explored += 1;
    }

    fn run(mut self) -> SearchOutcome {
        debug!(
            "A* with {} from h={} on a {}x{} board",
            self.heuristic,
            self.arena[0].h,
            self.size,
            self.size
        );

        while let Some(entry) = self.frontier.pop() {
            let current = entry.node;
            let fingerprint = self.arena[current].board.fingerprint();
            self.closed.insert(fingerprint.clone(), self.arena[current].f);

            if fingerprint == self.goal {
                return SearchOutcome::Solved(self.finish(current));
            }
            self.expanded += 1;
            self.expand(current);
        }

        let stats = self.stats();
        info!(
            "{}: frontier exhausted after {} expansions, {} nodes explored",
            self.heuristic, stats.expanded, stats.explored
        );
        SearchOutcome::Exhausted(stats)
    }

    fn expand(&mut self, current: NodeId) {
        let (g, last_move) = {
            let node = &self.arena[current];
            trace!("expand g={} h={} f={}", node.g, node.h, node.f);
            (node.g, node.last_move)
        };

        for mv in Move::ALL {
            if last_move.is_some_and(|previous| mv.is_reverse_of(previous)) {
                continue;
            }
            let Some(board) = self.arena[current].board.try_move(mv) else {
                continue;
            };

            let g_next = g + 1;
            let h_next = self.heuristic.estimate(&board);
            let f_next = g_next + h_next;
            let fingerprint = board.fingerprint();

            let improves = self
                .closed
                .get(&fingerprint)
                .map_or(true, |&recorded| recorded > f_next);
            if !improves {
                continue;
            }

            self.closed.insert(fingerprint, f_next);
            self.push(SearchNode {
                board,
                last_move: Some(mv),
                g: g_next,
                h: h_next,
                f: f_next,
                parent: Some(current),
            });
        }
    }

    fn stats(&self) -> SearchStats {
        SearchStats {
            expanded: self.expanded,
            explored: self.explored,
        }
    }

    /// Walks parent links from `goal` back to the root.
    fn finish(&self, goal: NodeId) -> Solution {
        let stats = self.stats();
        let cost = self.arena[goal].g;

        let mut path = Vec::with_capacity(cost as usize + 1);
        let mut moves = Vec::with_capacity(cost as usize);
        let mut cursor = Some(goal);
        while let Some(id) = cursor {
            let node = &self.arena[id];
            if let Some(mv) = node.last_move {
                moves.push(mv);
            }
            path.push(node.board.clone());
            cursor = node.parent;
        }
        path.reverse();
        moves.reverse();

        info!(
            "{}: solved in {} moves, {} expanded, {} explored, {} distinct states",
            self.heuristic,
            cost,
            stats.expanded,
            stats.explored,
            self.closed.len()
        );
        Solution {
            path,
            moves,
            cost,
            stats,
        }
    }
}

/// Searches for a shortest slide sequence from `initial` to `goal` using A* guided by
/// `heuristic`.
///
/// The frontier is ordered by lowest `f = g + h`, then lowest `h`, then highest `g`.
/// A generated board is pushed when its fingerprint is new or when its `f` beats the
/// value recorded for that fingerprint, so a board that was already expanded is
/// reopened if a cheaper route to it turns up. The slide that would undo the previous
/// one is never generated.
///
/// With an admissible heuristic and a solvable board the result is an optimal
/// `SearchOutcome::Solved`. `Heuristic::Euclidean` still terminates but may return a
/// longer path. An unsolvable board yields `SearchOutcome::Exhausted` once its reachable
/// half of the state space is used up, which is only practical for small boards;
/// callers should check `crate::solvability::is_solvable` first.
///
/// # Arguments
/// * `initial`: The starting board.
/// * `goal`: The board to reach. Must have the same size as `initial`.
/// * `heuristic`: The cost estimator that drives the search.
///
/// # Examples
/// ```
/// use npuzzle_solver::engine::Board;
/// use npuzzle_solver::heuristics::Heuristic;
/// use npuzzle_solver::solver::solve_astar;
/// use npuzzle_solver::utils::board_from_rows;
///
/// let start = board_from_rows(&[&[1, 2, 3], &[4, 5, 6], &[7, 0, 8]]).unwrap();
/// let outcome = solve_astar(&start, &Board::goal(3), Heuristic::Manhattan);
/// let solution = outcome.solution().unwrap();
/// assert_eq!(solution.cost, 1);
/// assert_eq!(solution.path().len(), 2);
/// ```
pub fn solve_astar(initial: &Board, goal: &Board, heuristic: Heuristic) -> SearchOutcome {
    debug_assert_eq!(initial.size(), goal.size());
    AStar::new(initial, goal, heuristic).run()
}
