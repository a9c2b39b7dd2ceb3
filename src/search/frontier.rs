use {
    std::{collections::HashSet, hash::Hash, mem::swap},
};

/// The frontier emptied before any goal vertex was produced. This is a legitimate search outcome,
/// not a panic and not a sentinel distance.
#[derive(Debug, Eq, PartialEq)]
pub struct NotReachable;

pub struct FrontierSearchState<V> {
    pending_starts: Vec<(V, usize)>,
    curr_frontier: Vec<V>,
    next_frontier: Vec<V>,
    explored: HashSet<(V, usize)>,
    neighbors: Vec<V>,
}

impl<V> FrontierSearchState<V> {
    fn clear(&mut self) {
        self.pending_starts.clear();
        self.curr_frontier.clear();
        self.next_frontier.clear();
        self.explored.clear();
        self.neighbors.clear();
    }
}

impl<V> Default for FrontierSearchState<V> {
    fn default() -> Self {
        Self {
            pending_starts: Default::default(),
            curr_frontier: Default::default(),
            next_frontier: Default::default(),
            explored: Default::default(),
            neighbors: Default::default(),
        }
    }
}

/// A level-order breadth-first search over an implicit, possibly time-varying graph.
///
/// The frontier at step `s` holds exactly the vertices first reached in `s` steps, so the step at
/// which a goal vertex is produced is the length of a shortest path to it. Vertices are deduped by
/// `(vertex, step % period)`: when the edge relation repeats with some period, two visits to the
/// same vertex at the same phase see identical futures, and keeping only the first guarantees the
/// explored set (and with it the search) is finite even though the step counter is not.
pub trait FrontierSearch {
    type Vertex: Clone + Eq + Hash;

    /// One or more source vertices, each tagged with its own elapsed-step count. A vertex joins
    /// the frontier once the step counter reaches its tag. Non-zero tags chain legs of a journey
    /// through a time-varying field.
    fn starts(&self, starts: &mut Vec<(Self::Vertex, usize)>);
    fn is_goal(&self, vertex: &Self::Vertex) -> bool;

    /// The vertices reachable from `vertex` in one step, where arrival happens at `step + 1`.
    fn neighbors(&self, vertex: &Self::Vertex, step: usize, neighbors: &mut Vec<Self::Vertex>);

    /// The period with which the edge relation repeats, or `None` for a static graph.
    fn period(&self) -> Option<usize> {
        None
    }

    /// An optional budget on the number of steps expanded. Exhausting it is reported as
    /// `NotReachable`.
    fn step_cap(&self) -> Option<usize> {
        None
    }

    /// Invoked once per vertex admitted to a frontier, in level order.
    fn visit(&mut self, _vertex: &Self::Vertex, _step: usize) {}

    fn reset(&mut self);

    fn run_internal(
        &mut self,
        state: &mut FrontierSearchState<Self::Vertex>,
    ) -> Result<usize, NotReachable> {
        self.reset();

        state.clear();

        self.starts(&mut state.pending_starts);

        let Some(mut step) = state
            .pending_starts
            .iter()
            .map(|(_, start_step)| *start_step)
            .min()
        else {
            return Err(NotReachable);
        };

        loop {
            let phase: usize = self.period().map_or(0_usize, |period| step % period);
            let mut index: usize = 0_usize;

            while index < state.pending_starts.len() {
                if state.pending_starts[index].1 == step {
                    let (start, _) = state.pending_starts.swap_remove(index);

                    if self.is_goal(&start) {
                        return Ok(step);
                    }

                    if state.explored.insert((start.clone(), phase)) {
                        self.visit(&start, step);
                        state.curr_frontier.push(start);
                    }
                } else {
                    index += 1_usize;
                }
            }

            if state.curr_frontier.is_empty() {
                // Only later-tagged starts remain. Jump ahead to the earliest of them.
                let Some(next_start_step) = state
                    .pending_starts
                    .iter()
                    .map(|(_, start_step)| *start_step)
                    .min()
                else {
                    return Err(NotReachable);
                };

                step = next_start_step;

                continue;
            }

            if self.step_cap().is_some_and(|step_cap| step >= step_cap) {
                return Err(NotReachable);
            }

            let next_step: usize = step + 1_usize;
            let next_phase: usize = self
                .period()
                .map_or(0_usize, |period| next_step % period);

            while let Some(current) = state.curr_frontier.pop() {
                self.neighbors(&current, step, &mut state.neighbors);

                for neighbor in state.neighbors.drain(..) {
                    if self.is_goal(&neighbor) {
                        return Ok(next_step);
                    }

                    if state.explored.insert((neighbor.clone(), next_phase)) {
                        self.visit(&neighbor, next_step);
                        state.next_frontier.push(neighbor);
                    }
                }
            }

            swap(&mut state.curr_frontier, &mut state.next_frontier);

            step = next_step;
        }
    }

    fn run(&mut self) -> Result<usize, NotReachable> {
        self.run_internal(&mut FrontierSearchState::default())
    }
}

struct ClosureSearch<'g, G, V, P, N> {
    graph: &'g G,
    start: V,
    is_goal: P,
    neighbors: N,
}

impl<'g, G, V, P, N> FrontierSearch for ClosureSearch<'g, G, V, P, N>
where
    V: Clone + Eq + Hash,
    P: Fn(&G, &V) -> bool,
    N: Fn(&G, &V, &mut Vec<V>),
{
    type Vertex = V;

    fn starts(&self, starts: &mut Vec<(Self::Vertex, usize)>) {
        starts.push((self.start.clone(), 0_usize));
    }

    fn is_goal(&self, vertex: &Self::Vertex) -> bool {
        (self.is_goal)(self.graph, vertex)
    }

    fn neighbors(&self, vertex: &Self::Vertex, _step: usize, neighbors: &mut Vec<Self::Vertex>) {
        (self.neighbors)(self.graph, vertex, neighbors)
    }

    fn reset(&mut self) {}
}

/// The length of a shortest path from `start` to any vertex satisfying `is_goal`, over the static
/// implicit graph described by `neighbors`. A pure function of its arguments.
pub fn shortest_path<G, V, P, N>(
    graph: &G,
    start: V,
    is_goal: P,
    neighbors: N,
) -> Result<usize, NotReachable>
where
    V: Clone + Eq + Hash,
    P: Fn(&G, &V) -> bool,
    N: Fn(&G, &V, &mut Vec<V>),
{
    ClosureSearch {
        graph,
        start,
        is_goal,
        neighbors,
    }
    .run()
}
