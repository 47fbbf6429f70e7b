use super::error::EmdError;
use super::network::Network;
use crate::Quanta;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// anything that can price a balanced flow network.
///
/// returns Σ cost × flow over the network's edges for a minimum-cost
/// assignment of flow that zeroes every balance. the network's preflow
/// is not included.
pub trait Solver {
    fn solve(&self, network: &Network) -> Result<Quanta, EmdError>;
}

impl<S> Solver for &S
where
    S: Solver,
{
    fn solve(&self, network: &Network) -> Result<Quanta, EmdError> {
        (**self).solve(network)
    }
}

/// successive shortest augmenting paths with node potentials.
///
/// each round takes the node with the largest remaining supply, runs
/// Dijkstra over reduced costs until it settles any node with remaining
/// demand, and pushes as much flow as that path allows. potentials are
/// re-weighted after every search so reduced costs stay non-negative.
///
/// every round zeroes either the source's supply, the sink's demand, or
/// a backward residual on the path, and strictly lowers total positive
/// balance, so the loop ends after at most ΣP rounds of O(E log V).
#[derive(Debug, Default, Copy, Clone)]
pub struct SuccessiveShortestPaths;

impl Solver for SuccessiveShortestPaths {
    fn solve(&self, network: &Network) -> Result<Quanta, EmdError> {
        Residual::from(network).minimize()
    }
}

/// per-solve state over an arena of arcs.
///
/// edge e of the network owns arcs 2e (forward, unbounded, cost c) and
/// 2e + 1 (backward, capacity flow[e], cost -c). nodes hold arc ids.
struct Residual<'a> {
    network: &'a Network,
    arcs: Vec<Vec<usize>>,
    flow: Vec<Quanta>,
    balance: Vec<Quanta>,
    potential: Vec<Quanta>,
    // dijkstra scratch, reset every round
    distance: Vec<Quanta>,
    settled: Vec<bool>,
    parent: Vec<Option<usize>>,
    heap: BinaryHeap<Reverse<(Quanta, usize)>>,
}

impl Residual<'_> {
    fn tail(&self, arc: usize) -> usize {
        let edge = self.network.edges()[arc / 2];
        if arc % 2 == 0 { edge.from } else { edge.to }
    }
    fn head(&self, arc: usize) -> usize {
        let edge = self.network.edges()[arc / 2];
        if arc % 2 == 0 { edge.to } else { edge.from }
    }
    fn cost(&self, arc: usize) -> Quanta {
        let edge = self.network.edges()[arc / 2];
        if arc % 2 == 0 { edge.cost } else { -edge.cost }
    }
    /// None for unbounded forward arcs
    fn capacity(&self, arc: usize) -> Option<Quanta> {
        if arc % 2 == 0 { None } else { Some(self.flow[arc / 2]) }
    }
    fn reduced(&self, arc: usize) -> Quanta {
        self.cost(arc) + self.potential[self.tail(arc)] - self.potential[self.head(arc)]
    }

    fn minimize(mut self) -> Result<Quanta, EmdError> {
        let mut rounds = 0usize;
        while let Some(source) = self.source() {
            let sink = self.search(source)?;
            self.reweight(sink);
            let delta = self.bottleneck(source, sink);
            self.augment(source, sink, delta);
            rounds += 1;
        }
        log::debug!("{:<32}{:<32}", "augmenting rounds", rounds);
        self.total()
    }

    /// largest remaining supply, lowest index on ties
    fn source(&self) -> Option<usize> {
        (0..self.balance.len())
            .filter(|&v| self.balance[v] > 0)
            .max_by_key(|&v| (self.balance[v], Reverse(v)))
    }

    /// dijkstra over reduced costs from `source`,
    /// stopping at the first settled node with remaining demand.
    fn search(&mut self, source: usize) -> Result<usize, EmdError> {
        self.distance.fill(Quanta::MAX);
        self.settled.fill(false);
        self.parent.fill(None);
        self.heap.clear();
        self.distance[source] = 0;
        self.heap.push(Reverse((0, source)));
        while let Some(Reverse((d, u))) = self.heap.pop() {
            if self.settled[u] || d > self.distance[u] {
                continue;
            }
            self.settled[u] = true;
            if self.balance[u] < 0 {
                return Ok(u);
            }
            for i in 0..self.arcs[u].len() {
                let arc = self.arcs[u][i];
                if self.capacity(arc) == Some(0) {
                    continue;
                }
                let v = self.head(arc);
                if self.settled[v] {
                    continue;
                }
                let r = self.reduced(arc);
                debug_assert!(r >= 0, "negative reduced cost on arc {}", arc);
                let alt = d + r;
                if alt < self.distance[v] {
                    self.distance[v] = alt;
                    self.parent[v] = Some(arc);
                    self.heap.push(Reverse((alt, v)));
                }
            }
        }
        Err(EmdError::Infeasible {
            source,
            supply: self.balance[source],
        })
    }

    /// π(v) += d(v) - d(sink) for every settled v.
    /// unsettled nodes are treated as if they sat at d(sink), which keeps
    /// every residual arc's reduced cost non-negative.
    fn reweight(&mut self, sink: usize) {
        let horizon = self.distance[sink];
        for v in 0..self.potential.len() {
            if self.settled[v] {
                self.potential[v] += self.distance[v] - horizon;
            }
        }
    }

    /// walk the shortest path tree back from `sink` to `source`
    fn path(&self, source: usize, sink: usize) -> Vec<usize> {
        let mut path = Vec::new();
        let mut v = sink;
        while v != source {
            let arc = self.parent[v].expect("settled node has a parent");
            path.push(arc);
            v = self.tail(arc);
        }
        path
    }

    fn bottleneck(&self, source: usize, sink: usize) -> Quanta {
        self.path(source, sink)
            .into_iter()
            .filter_map(|arc| self.capacity(arc))
            .fold(self.balance[source].min(-self.balance[sink]), Quanta::min)
    }

    fn augment(&mut self, source: usize, sink: usize, delta: Quanta) {
        debug_assert!(delta > 0, "empty augmentation");
        for arc in self.path(source, sink) {
            match arc % 2 {
                0 => self.flow[arc / 2] += delta,
                _ => self.flow[arc / 2] -= delta,
            }
        }
        self.balance[source] -= delta;
        self.balance[sink] += delta;
        log::trace!("{:<32}{:>8} -> {:<8}{:>16}", "augment", source, sink, delta);
    }

    /// Σ cost × flow over every edge, checked
    fn total(&self) -> Result<Quanta, EmdError> {
        self.network
            .edges()
            .iter()
            .zip(self.flow.iter())
            .try_fold(0 as Quanta, |total, (edge, flow)| {
                edge.cost
                    .checked_mul(*flow)
                    .and_then(|c| total.checked_add(c))
            })
            .ok_or(EmdError::Overflow { scale: f64::NAN })
    }
}

impl<'a> From<&'a Network> for Residual<'a> {
    fn from(network: &'a Network) -> Self {
        debug_assert!(network.balance().iter().sum::<Quanta>() == 0, "unbalanced network");
        let n = network.n();
        let mut arcs = vec![Vec::new(); n];
        for (e, edge) in network.edges().iter().enumerate() {
            arcs[edge.from].push(2 * e);
            arcs[edge.to].push(2 * e + 1);
        }
        Self {
            network,
            arcs,
            flow: vec![0; network.edges().len()],
            balance: network.balance().to_vec(),
            potential: vec![0; n],
            distance: vec![Quanta::MAX; n],
            settled: vec![false; n],
            parent: vec![None; n],
            heap: BinaryHeap::with_capacity(n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emd::network::Edge;

    fn edge(from: usize, to: usize, cost: Quanta) -> Edge {
        Edge { from, to, cost }
    }

    #[test]
    fn is_empty_network_free() {
        let network = Network::from((vec![0, 0], vec![edge(0, 1, 5)]));
        assert_eq!(SuccessiveShortestPaths.solve(&network), Ok(0));
    }
    #[test]
    fn is_cheapest_route_taken() {
        // 0 -> 2 directly costs 10, via 1 costs 3 + 3
        let network = Network::from((
            vec![4, 0, -4],
            vec![edge(0, 2, 10), edge(0, 1, 3), edge(1, 2, 3)],
        ));
        assert_eq!(SuccessiveShortestPaths.solve(&network), Ok(24));
    }
    #[test]
    fn is_flow_rerouted_through_backward_arc() {
        // the first round sends 0 -> 2 -> 3, taking the only sink source 1
        // can reach. the second round must undo it through the backward arc.
        //
        //   0 --1--> 2 --1--> 3 (sink, 1)
        //   1 --1--> 2
        //   0 --5--> 4 (sink, 1)
        let network = Network::from((
            vec![1, 1, 0, -1, -1],
            vec![edge(0, 2, 1), edge(2, 3, 1), edge(1, 2, 1), edge(0, 4, 5)],
        ));
        // 1 -> 2 -> 3 (2) + 0 -> 4 (5)
        assert_eq!(SuccessiveShortestPaths.solve(&network), Ok(7));
    }
    #[test]
    fn is_transportation_optimal() {
        // 2 x 2 assignment where the greedy diagonal is not optimal
        //   costs: s0->t0 1, s0->t1 2, s1->t0 2, s1->t1 100
        let network = Network::from((
            vec![1, 1, -1, -1],
            vec![edge(0, 2, 1), edge(0, 3, 2), edge(1, 2, 2), edge(1, 3, 100)],
        ));
        assert_eq!(SuccessiveShortestPaths.solve(&network), Ok(4));
    }
    #[test]
    fn is_total_priced_over_edges() {
        // forward arcs price at +c, backward arcs at -c, the total at c × flow
        let network = Network::from((vec![2, -2], vec![edge(0, 1, 3)]));
        let residual = Residual::from(&network);
        assert_eq!(residual.cost(0), 3);
        assert_eq!(residual.cost(1), -3);
        assert_eq!(residual.minimize(), Ok(6));
    }
    #[test]
    fn is_unreachable_demand_infeasible() {
        let network = Network::from((vec![3, -3], vec![edge(1, 0, 1)]));
        assert_eq!(
            SuccessiveShortestPaths.solve(&network),
            Err(EmdError::Infeasible {
                source: 0,
                supply: 3
            })
        );
    }
}
