use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet, VecDeque};

use crate::error::{Error, Result};
use crate::grid::Position;
use crate::search::{SearchContext, SearchPhase, SearchProgress, SearchSide, SearchState};

/// Result of running one strategy to a terminal phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRun {
    pub phase: SearchPhase,
    /// Start-to-goal positions, inclusive. `None` unless `phase` is `Succeeded`.
    pub path: Option<Vec<Position>>,
    pub end_reached: Option<Position>,
    /// Bidirectional search only.
    pub meeting_point: Option<Position>,
    pub path_cost: Option<u32>,
    pub nodes_explored: usize,
    pub max_frontier_size: usize,
    /// Bookkeeping entries held when the run ended, summed over both sides.
    pub state_size: usize,
}

impl SearchRun {
    fn terminal(
        phase: SearchPhase,
        nodes_explored: usize,
        max_frontier_size: usize,
        state_size: usize,
    ) -> Self {
        Self {
            phase,
            path: None,
            end_reached: None,
            meeting_point: None,
            path_cost: None,
            nodes_explored,
            max_frontier_size,
            state_size,
        }
    }

    fn with_path(mut self, path: Vec<Position>) -> Self {
        self.end_reached = path.last().copied();
        self.path_cost = Some(path.len().saturating_sub(1) as u32);
        self.path = Some(path);
        self
    }
}

/// Walk `predecessors` backward from `from` until `to` is reached and return
/// the positions in forward order (`to` first, `from` last).
///
/// Returns an empty vector when the chain from `from` never reaches `to`.
/// `from == to` yields the single-element path. The walk is capped at one
/// step more than the number of predecessor entries, so a cyclic map fails
/// with [`Error::PathReconstruction`] instead of looping.
pub fn reconstruct_path(
    predecessors: &HashMap<Position, Position>,
    from: Position,
    to: Position,
) -> Result<Vec<Position>> {
    let limit = predecessors.len() + 1;
    let mut path = Vec::new();
    let mut current = from;
    loop {
        if path.len() >= limit {
            return Err(Error::PathReconstruction {
                from,
                to,
                reason: format!("exceeded {limit} steps"),
            });
        }
        path.push(current);
        if current == to {
            break;
        }
        match predecessors.get(&current) {
            Some(&previous) => current = previous,
            None => return Ok(Vec::new()),
        }
    }
    path.reverse();
    Ok(path)
}

/// Follow `predecessors` from `from` until a position without a predecessor
/// (a search root) and return the chain in walk order (`from` first).
pub fn trace_to_root(
    predecessors: &HashMap<Position, Position>,
    from: Position,
) -> Result<Vec<Position>> {
    let limit = predecessors.len() + 1;
    let mut chain = vec![from];
    let mut current = from;
    while let Some(&previous) = predecessors.get(&current) {
        if chain.len() >= limit {
            return Err(Error::PathReconstruction {
                from,
                to: previous,
                reason: format!("exceeded {limit} steps"),
            });
        }
        chain.push(previous);
        current = previous;
    }
    Ok(chain)
}

/// Reconstruct the path to a popped goal, treating a broken chain as a defect.
fn goal_path(state: &SearchState, goal: Position, start: Position) -> Result<Vec<Position>> {
    let path = reconstruct_path(&state.predecessors, goal, start)?;
    if path.is_empty() {
        return Err(Error::PathReconstruction {
            from: goal,
            to: start,
            reason: "predecessor chain is broken".to_string(),
        });
    }
    Ok(path)
}

fn conclude(ctx: &mut SearchContext<'_>, state: &SearchState, phase: SearchPhase) -> SearchRun {
    ctx.phase(phase);
    SearchRun::terminal(
        phase,
        state.nodes_explored,
        state.max_frontier_size,
        state.footprint(),
    )
}

fn begin(ctx: &mut SearchContext<'_>) {
    ctx.phase(SearchPhase::Initialized);
    ctx.phase(SearchPhase::Running);
}

/// Breadth-first search with a FIFO frontier.
///
/// Neighbours are admitted once, the first time they are discovered, so the
/// predecessor map is never rewritten.
pub fn search_bfs(ctx: &mut SearchContext<'_>) -> Result<SearchRun> {
    let grid = ctx.grid;
    let start = grid.find_start();
    let mut state = SearchState::new();
    let mut queue = VecDeque::new();

    state.seed(start);
    queue.push_back(start);
    state.track_frontier(queue.len());
    begin(ctx);

    loop {
        if ctx.deadline.expired() {
            return Ok(conclude(ctx, &state, SearchPhase::TimedOut));
        }
        let Some(current) = queue.pop_front() else {
            break;
        };
        state.expand(current);

        if grid.is_goal(current) {
            let path = goal_path(&state, current, start)?;
            return Ok(conclude(ctx, &state, SearchPhase::Succeeded).with_path(path));
        }

        if ctx.wants_checkpoint(state.nodes_explored) {
            ctx.report(&SearchProgress {
                side: SearchSide::Forward,
                current,
                frontier: queue.iter().copied().collect(),
                visited: &state.visited,
                nodes_explored: state.nodes_explored,
            });
        }

        for next in grid.open_neighbors(current) {
            if state.is_visited(next) {
                continue;
            }
            if state.discover(next, current) {
                queue.push_back(next);
            }
        }
        state.track_frontier(queue.len());
    }

    Ok(conclude(ctx, &state, SearchPhase::Exhausted))
}

/// Depth-first search with a LIFO frontier.
///
/// Neighbours are pushed in reverse expansion order so the first neighbour
/// (up) is explored first. At push time walls, visited cells, and cells that
/// already have a predecessor are skipped; the visited check is repeated on
/// pop.
pub fn search_dfs(ctx: &mut SearchContext<'_>) -> Result<SearchRun> {
    let grid = ctx.grid;
    let start = grid.find_start();
    let mut state = SearchState::new();
    let mut stack = vec![start];

    state.seed(start);
    state.track_frontier(stack.len());
    begin(ctx);

    loop {
        if ctx.deadline.expired() {
            return Ok(conclude(ctx, &state, SearchPhase::TimedOut));
        }
        let Some(current) = stack.pop() else {
            break;
        };
        if !state.expand(current) {
            continue;
        }

        if grid.is_goal(current) {
            let path = goal_path(&state, current, start)?;
            return Ok(conclude(ctx, &state, SearchPhase::Succeeded).with_path(path));
        }

        if ctx.wants_checkpoint(state.nodes_explored) {
            ctx.report(&SearchProgress {
                side: SearchSide::Forward,
                current,
                frontier: stack.clone(),
                visited: &state.visited,
                nodes_explored: state.nodes_explored,
            });
        }

        let neighbours: Vec<Position> = grid.open_neighbors(current).collect();
        for next in neighbours.into_iter().rev() {
            if state.is_visited(next) {
                continue;
            }
            if state.discover(next, current) {
                stack.push(next);
            }
        }
        state.track_frontier(stack.len());
    }

    Ok(conclude(ctx, &state, SearchPhase::Exhausted))
}

/// Dijkstra's algorithm: best-first by accumulated step cost.
pub fn search_dijkstra(ctx: &mut SearchContext<'_>) -> Result<SearchRun> {
    best_first(ctx, |_| 0)
}

/// A* search ordered by `cost + heuristic`, where the heuristic is the
/// Manhattan distance to the nearest goal. Admissible for any number of goals.
pub fn search_a_star(ctx: &mut SearchContext<'_>) -> Result<SearchRun> {
    let grid = ctx.grid;
    best_first(ctx, |pos| grid.nearest_goal_distance(pos))
}

fn best_first(
    ctx: &mut SearchContext<'_>,
    heuristic: impl Fn(Position) -> u32,
) -> Result<SearchRun> {
    let grid = ctx.grid;
    let start = grid.find_start();
    let mut state = SearchState::new();
    let mut heap = BinaryHeap::new();
    let mut open: HashSet<Position> = HashSet::new();

    state.seed(start);
    heap.push(QueueEntry::new(start, 0, heuristic(start)));
    open.insert(start);
    state.track_frontier(open.len());
    begin(ctx);

    loop {
        if ctx.deadline.expired() {
            return Ok(conclude(ctx, &state, SearchPhase::TimedOut));
        }
        let Some(entry) = heap.pop() else {
            break;
        };
        let current = entry.position;
        if state.is_visited(current) {
            continue;
        }
        if state.cost(current).is_some_and(|best| best < entry.cost) {
            continue;
        }
        open.remove(&current);
        state.expand(current);

        if grid.is_goal(current) {
            let path = goal_path(&state, current, start)?;
            let mut run = conclude(ctx, &state, SearchPhase::Succeeded).with_path(path);
            run.path_cost = state.cost(current);
            return Ok(run);
        }

        if ctx.wants_checkpoint(state.nodes_explored) {
            ctx.report(&SearchProgress {
                side: SearchSide::Forward,
                current,
                frontier: open.iter().copied().collect(),
                visited: &state.visited,
                nodes_explored: state.nodes_explored,
            });
        }

        for next in grid.open_neighbors(current) {
            if state.is_visited(next) {
                continue;
            }
            let tentative = entry.cost + 1;
            if state.relax(next, current, tentative) {
                heap.push(QueueEntry::new(next, tentative, heuristic(next)));
                open.insert(next);
            }
        }
        state.track_frontier(open.len());
    }

    Ok(conclude(ctx, &state, SearchPhase::Exhausted))
}

/// Bidirectional breadth-first search.
///
/// One FIFO queue is rooted at the start, the other at every goal. The
/// shorter queue (forward on ties) is advanced one node at a time; the search
/// succeeds when a popped node has already been discovered by the other side.
pub fn search_bidirectional(ctx: &mut SearchContext<'_>) -> Result<SearchRun> {
    let grid = ctx.grid;
    let start = grid.find_start();
    let mut forward = SearchState::new();
    let mut backward = SearchState::new();
    let mut forward_queue = VecDeque::from([start]);
    let mut backward_queue: VecDeque<Position> = grid.find_goals().iter().copied().collect();

    forward.seed(start);
    for &goal in grid.find_goals() {
        backward.seed(goal);
    }
    let mut max_frontier_size = forward_queue.len() + backward_queue.len();
    begin(ctx);

    let outcome = |ctx: &mut SearchContext<'_>,
                   forward: &SearchState,
                   backward: &SearchState,
                   phase: SearchPhase,
                   max_frontier_size: usize| {
        ctx.phase(phase);
        SearchRun::terminal(
            phase,
            forward.nodes_explored + backward.nodes_explored,
            max_frontier_size,
            forward.footprint() + backward.footprint(),
        )
    };

    while !forward_queue.is_empty() && !backward_queue.is_empty() {
        if ctx.deadline.expired() {
            return Ok(outcome(
                ctx,
                &forward,
                &backward,
                SearchPhase::TimedOut,
                max_frontier_size,
            ));
        }

        let (side, queue, state, other) = if forward_queue.len() <= backward_queue.len() {
            (
                SearchSide::Forward,
                &mut forward_queue,
                &mut forward,
                &backward,
            )
        } else {
            (
                SearchSide::Backward,
                &mut backward_queue,
                &mut backward,
                &forward,
            )
        };

        let Some(current) = queue.pop_front() else {
            break;
        };
        state.expand(current);

        if other.is_discovered(current) {
            let path = join_at(&forward, &backward, current)?;
            let mut run = outcome(
                ctx,
                &forward,
                &backward,
                SearchPhase::Succeeded,
                max_frontier_size,
            )
            .with_path(path);
            run.meeting_point = Some(current);
            return Ok(run);
        }

        let explored = forward.nodes_explored + backward.nodes_explored;
        let (queue, state) = match side {
            SearchSide::Forward => (&mut forward_queue, &mut forward),
            SearchSide::Backward => (&mut backward_queue, &mut backward),
        };

        if ctx.wants_checkpoint(explored) {
            ctx.report(&SearchProgress {
                side,
                current,
                frontier: queue.iter().copied().collect(),
                visited: &state.visited,
                nodes_explored: explored,
            });
        }

        for next in grid.open_neighbors(current) {
            if state.discover(next, current) {
                queue.push_back(next);
            }
        }
        max_frontier_size = max_frontier_size.max(forward_queue.len() + backward_queue.len());
    }

    Ok(outcome(
        ctx,
        &forward,
        &backward,
        SearchPhase::Exhausted,
        max_frontier_size,
    ))
}

/// Start-to-meeting half from the forward tree, then meeting-to-goal from the
/// backward tree.
fn join_at(
    forward: &SearchState,
    backward: &SearchState,
    meeting: Position,
) -> Result<Vec<Position>> {
    let mut chain = trace_to_root(&forward.predecessors, meeting)?;
    chain.reverse();
    let toward_goal = trace_to_root(&backward.predecessors, meeting)?;
    chain.extend(toward_goal.into_iter().skip(1));
    Ok(chain)
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct QueueEntry {
    position: Position,
    cost: u32,
    heuristic: u32,
    estimate: u32,
}

impl QueueEntry {
    fn new(position: Position, cost: u32, heuristic: u32) -> Self {
        Self {
            position,
            cost,
            heuristic,
            estimate: cost + heuristic,
        }
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by estimate.
        other
            .estimate
            .cmp(&self.estimate)
            .then_with(|| other.heuristic.cmp(&self.heuristic))
            .then_with(|| other.position.cmp(&self.position))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;
    use crate::maze::parse_maze;
    use crate::search::{Deadline, NoopObserver, ProgressRecorder};

    type Strategy = fn(&mut SearchContext<'_>) -> Result<SearchRun>;

    fn run(grid: &Grid, strategy: Strategy) -> SearchRun {
        let mut observer = NoopObserver;
        let mut ctx = SearchContext::new(grid, Deadline::unbounded(), &mut observer);
        strategy(&mut ctx).expect("search completes")
    }

    fn p(row: usize, col: usize) -> Position {
        Position::new(row, col)
    }

    #[test]
    fn reconstruct_walks_back_and_reverses() {
        let predecessors = HashMap::from([(p(0, 2), p(0, 1)), (p(0, 1), p(0, 0))]);
        let path = reconstruct_path(&predecessors, p(0, 2), p(0, 0)).expect("acyclic");
        assert_eq!(path, vec![p(0, 0), p(0, 1), p(0, 2)]);
    }

    #[test]
    fn reconstruct_same_endpoint_is_single_step() {
        let path = reconstruct_path(&HashMap::new(), p(1, 1), p(1, 1)).expect("trivial");
        assert_eq!(path, vec![p(1, 1)]);
    }

    #[test]
    fn reconstruct_disconnected_is_empty() {
        let predecessors = HashMap::from([(p(0, 2), p(0, 1))]);
        let path = reconstruct_path(&predecessors, p(0, 2), p(0, 0)).expect("no cycle");
        assert!(path.is_empty());
    }

    #[test]
    fn reconstruct_cycle_is_capped() {
        let predecessors = HashMap::from([(p(0, 1), p(0, 2)), (p(0, 2), p(0, 1))]);
        let err = reconstruct_path(&predecessors, p(0, 1), p(0, 0)).expect_err("cycle");
        assert!(matches!(err, Error::PathReconstruction { .. }));

        let err = trace_to_root(&predecessors, p(0, 1)).expect_err("cycle");
        assert!(err.to_string().contains("exceeded 3 steps"));
    }

    #[test]
    fn trace_to_root_stops_at_root() {
        let predecessors = HashMap::from([(p(2, 0), p(1, 0)), (p(1, 0), p(0, 0))]);
        let chain = trace_to_root(&predecessors, p(2, 0)).expect("acyclic");
        assert_eq!(chain, vec![p(2, 0), p(1, 0), p(0, 0)]);
    }

    #[test]
    fn queue_entry_pops_lowest_estimate_then_lowest_heuristic() {
        let mut heap = BinaryHeap::new();
        heap.push(QueueEntry::new(p(0, 0), 4, 2));
        heap.push(QueueEntry::new(p(0, 1), 2, 4));
        heap.push(QueueEntry::new(p(0, 2), 1, 1));
        assert_eq!(heap.pop().map(|e| e.position), Some(p(0, 2)));
        assert_eq!(heap.pop().map(|e| e.position), Some(p(0, 0)));
        assert_eq!(heap.pop().map(|e| e.position), Some(p(0, 1)));
    }

    #[test]
    fn state_size_grows_with_explored_area() {
        let grid = parse_maze("2 0 0 0\n0 0 0 0\n0 0 0 3").expect("maze");
        let strategies: [Strategy; 5] = [
            search_bfs,
            search_dfs,
            search_dijkstra,
            search_a_star,
            search_bidirectional,
        ];
        for strategy in strategies {
            let result = run(&grid, strategy);
            assert!(result.state_size >= result.nodes_explored);
            assert!(result.state_size > 0);
        }
    }

    #[test]
    fn bfs_explores_in_level_order_on_open_grid() {
        let grid = parse_maze("2 0 0\n0 0 0\n0 0 3").expect("maze");
        let result = run(&grid, search_bfs);
        assert_eq!(result.phase, SearchPhase::Succeeded);
        assert_eq!(result.path.as_ref().map(Vec::len), Some(5));
        assert_eq!(result.nodes_explored, 9);
        assert_eq!(result.end_reached, Some(p(2, 2)));
    }

    #[test]
    fn dfs_prefers_down_before_right() {
        let grid = parse_maze("2 0 0\n0 0 0\n0 0 3").expect("maze");
        let result = run(&grid, search_dfs);
        assert_eq!(result.phase, SearchPhase::Succeeded);
        assert_eq!(
            result.path,
            Some(vec![p(0, 0), p(1, 0), p(2, 0), p(2, 1), p(2, 2)])
        );
        assert_eq!(result.nodes_explored, 5);
    }

    #[test]
    fn best_first_records_path_cost() {
        let grid = parse_maze("2 0 0\n1 1 0\n3 0 0").expect("maze");
        for strategy in [search_dijkstra as Strategy, search_a_star] {
            let result = run(&grid, strategy);
            assert_eq!(result.path_cost, Some(6));
            assert_eq!(result.path.as_ref().map(Vec::len), Some(7));
        }
    }

    #[test]
    fn a_star_explores_no_more_than_dijkstra() {
        let grid = parse_maze(
            "2 0 0 0 0 0\n0 0 0 0 0 0\n0 0 0 0 0 0\n0 0 0 0 0 0\n0 0 0 0 0 3",
        )
        .expect("maze");
        let dijkstra = run(&grid, search_dijkstra);
        let a_star = run(&grid, search_a_star);
        assert_eq!(dijkstra.path_cost, a_star.path_cost);
        assert!(a_star.nodes_explored <= dijkstra.nodes_explored);
    }

    #[test]
    fn bidirectional_follows_single_corridor() {
        let grid = parse_maze("2 0 0 0 3\n1 1 1 1 1\n0 0 0 0 0").expect("maze");
        let result = run(&grid, search_bidirectional);
        assert_eq!(result.phase, SearchPhase::Succeeded);
        assert_eq!(
            result.path,
            Some(vec![p(0, 0), p(0, 1), p(0, 2), p(0, 3), p(0, 4)])
        );
        let meeting = result.meeting_point.expect("meeting point recorded");
        assert!(result.path.as_ref().is_some_and(|path| path.contains(&meeting)));
        assert_eq!(result.end_reached, Some(p(0, 4)));
    }

    #[test]
    fn bidirectional_backward_side_advances_when_shorter() {
        let grid = parse_maze("0 0 0 0 0\n0 0 2 0 0\n0 0 0 0 0\n1 1 0 1 1\n1 1 3 1 1")
            .expect("maze");
        let mut recorder = ProgressRecorder::new(1);
        let result = {
            let mut ctx = SearchContext::new(&grid, Deadline::unbounded(), &mut recorder);
            search_bidirectional(&mut ctx).expect("search completes")
        };
        assert_eq!(
            result.path,
            Some(vec![p(1, 2), p(2, 2), p(3, 2), p(4, 2)])
        );
        assert!(recorder
            .frames
            .iter()
            .any(|frame| frame.side == SearchSide::Backward));
    }

    #[test]
    fn exhausted_when_goal_is_walled_off() {
        let grid = parse_maze("2 0 1 0\n0 0 1 0\n0 0 1 3").expect("maze");
        for strategy in [
            search_bfs as Strategy,
            search_dfs,
            search_dijkstra,
            search_a_star,
            search_bidirectional,
        ] {
            let result = run(&grid, strategy);
            assert_eq!(result.phase, SearchPhase::Exhausted);
            assert!(result.path.is_none());
            assert!(result.end_reached.is_none());
        }
    }

    #[test]
    fn zero_budget_times_out_before_first_pop() {
        let grid = parse_maze("2 0 0\n0 0 0\n0 0 3").expect("maze");
        let mut observer = NoopObserver;
        let mut ctx = SearchContext::new(
            &grid,
            Deadline::new(Some(std::time::Duration::ZERO)),
            &mut observer,
        );
        let result = search_bfs(&mut ctx).expect("search completes");
        assert_eq!(result.phase, SearchPhase::TimedOut);
        assert_eq!(result.nodes_explored, 0);
        assert!(result.path.is_none());
    }

    #[test]
    fn observer_sees_phases_and_checkpoints() {
        let grid = parse_maze("2 0 0 0\n0 0 0 0\n0 0 0 3").expect("maze");
        let mut recorder = ProgressRecorder::new(2);
        {
            let mut ctx = SearchContext::new(&grid, Deadline::unbounded(), &mut recorder);
            search_bfs(&mut ctx).expect("search completes");
        }
        assert_eq!(
            recorder.phases,
            vec![
                SearchPhase::Initialized,
                SearchPhase::Running,
                SearchPhase::Succeeded
            ]
        );
        assert!(!recorder.frames.is_empty());
        assert!(recorder
            .frames
            .iter()
            .all(|frame| frame.nodes_explored % 2 == 0 && frame.visited.contains(&frame.current)));
    }
}
