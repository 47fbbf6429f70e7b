use crate::Quanta;

/// a quantized transportation problem: integer supply vector P,
/// integer demand vector Q and a row-major |P| × |Q| cost matrix C.
///
/// P and Q are interchangeable. the side with more mass becomes the
/// supply side when the flow network is built.
#[derive(Debug, Clone, PartialEq)]
pub struct Problem {
    supply: Vec<Quanta>,
    demand: Vec<Quanta>,
    costs: Vec<Quanta>,
}

impl Problem {
    pub fn new(supply: Vec<Quanta>, demand: Vec<Quanta>, costs: Vec<Quanta>) -> Self {
        assert!(supply.len() * demand.len() == costs.len(), "cost matrix shape");
        assert!(supply.iter().chain(demand.iter()).all(|x| *x >= 0), "negative mass");
        assert!(costs.iter().all(|c| *c >= 0), "negative cost");
        Self {
            supply,
            demand,
            costs,
        }
    }
    pub fn cost(&self, i: usize, j: usize) -> Quanta {
        self.costs[i * self.demand.len() + j]
    }
    /// the same problem with supply and demand exchanged
    pub fn transpose(&self) -> Self {
        let (m, n) = (self.supply.len(), self.demand.len());
        Self {
            supply: self.demand.clone(),
            demand: self.supply.clone(),
            costs: (0..n)
                .flat_map(|j| (0..m).map(move |i| (i, j)))
                .map(|(i, j)| self.cost(i, j))
                .collect(),
        }
    }
    fn oriented(&self) -> std::borrow::Cow<'_, Self> {
        let p = self.supply.iter().sum::<Quanta>();
        let q = self.demand.iter().sum::<Quanta>();
        if q > p {
            std::borrow::Cow::Owned(self.transpose())
        } else {
            std::borrow::Cow::Borrowed(self)
        }
    }
}

/// directed edge with unbounded capacity and non-negative cost.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Edge {
    pub from: usize,
    pub to: usize,
    pub cost: Quanta,
}

/// A min-cost-flow instance: signed node balances (supply positive,
/// demand negative, summing to zero) and the edges between them.
///
/// `preflow` is cost already committed by the builder for mass whose
/// routing was forced. it is not part of the solver's job but belongs
/// to the total.
#[derive(Debug, Clone, PartialEq)]
pub struct Network {
    balance: Vec<Quanta>,
    edges: Vec<Edge>,
    preflow: Quanta,
}

impl Network {
    pub fn n(&self) -> usize {
        self.balance.len()
    }
    pub fn balance(&self) -> &[Quanta] {
        &self.balance
    }
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }
    pub fn preflow(&self) -> Quanta {
        self.preflow
    }
    /// EMD-HAT network with degenerate nodes folded into the threshold node
    pub fn reduced(problem: &Problem) -> Self {
        Builder::from(problem.oriented().as_ref()).reduce()
    }
    /// EMD-HAT network with every source and sink kept
    pub fn complete(problem: &Problem) -> Self {
        Builder::from(problem.oriented().as_ref()).keep()
    }
}

/// arbitrary instances, e.g. for exercising a Solver directly
impl From<(Vec<Quanta>, Vec<Edge>)> for Network {
    fn from((balance, edges): (Vec<Quanta>, Vec<Edge>)) -> Self {
        assert!(edges.iter().all(|e| e.from < balance.len() && e.to < balance.len()));
        assert!(edges.iter().all(|e| e.cost >= 0), "negative edge cost");
        Self {
            balance,
            edges,
            preflow: 0,
        }
    }
}

/// Lays out the EMD-HAT flow network over m sources and n sinks:
///
/// ```text
///   0 .. m        sources, +P[i]
///   m .. m+n      sinks,   -Q[j]
///   m+n           THRESHOLD, absorbs ΣP - ΣQ at zero cost, relays at maxC
///   m+n+1         ARTIFICIAL, reaches everything at maxC + 1
/// ```
///
/// pairs priced at maxC get no direct edge. the threshold node already
/// offers that price to every (source, sink) pair.
struct Builder {
    m: usize,
    n: usize,
    max: Quanta,
    balance: Vec<Quanta>,
    edges: Vec<Edge>,
    /// nodes with at least one sub-threshold edge
    live: Vec<bool>,
}

impl Builder {
    fn threshold(&self) -> usize {
        self.m + self.n
    }
    fn artificial(&self) -> usize {
        self.m + self.n + 1
    }

    /// drop zero-balance nodes and nodes whose only route is the threshold
    /// node. their mass is folded into the threshold balance, and a sink's
    /// forced inflow is charged at maxC up front.
    fn reduce(self) -> Network {
        let mut preflow = 0;
        let mut balance = self.balance.clone();
        let threshold = self.threshold();
        let names = (0..self.m + self.n)
            .map(|v| match (self.balance[v], self.live[v]) {
                (0, _) => None,
                (_, true) => Some(v),
                (b, false) => {
                    if v >= self.m {
                        preflow -= b * self.max;
                    }
                    balance[threshold] += b;
                    None
                }
            })
            .chain([Some(threshold), Some(self.artificial())])
            .collect::<Vec<_>>();
        log::trace!(
            "{:<32}{:<32}",
            "folded into threshold",
            names.iter().filter(|v| v.is_none()).count()
        );
        self.rename(names, balance, preflow)
    }

    fn keep(self) -> Network {
        let names = (0..self.balance.len()).map(Some).collect();
        let balance = self.balance.clone();
        self.rename(names, balance, 0)
    }

    /// renumber surviving nodes contiguously, in their original order
    fn rename(self, names: Vec<Option<usize>>, balance: Vec<Quanta>, preflow: Quanta) -> Network {
        let mut index = vec![None; names.len()];
        let survivors = names.iter().flatten().copied().collect::<Vec<_>>();
        for (new, &old) in survivors.iter().enumerate() {
            index[old] = Some(new);
        }
        Network {
            balance: survivors.iter().map(|&v| balance[v]).collect(),
            edges: self
                .edges
                .iter()
                .filter_map(|e| match (index[e.from], index[e.to]) {
                    (Some(from), Some(to)) => Some(Edge { from, to, ..*e }),
                    _ => None,
                })
                .collect(),
            preflow,
        }
    }
}

impl From<&Problem> for Builder {
    fn from(problem: &Problem) -> Self {
        let m = problem.supply.len();
        let n = problem.demand.len();
        let max = problem.costs.iter().copied().max().unwrap_or(0);
        let excess = problem.supply.iter().sum::<Quanta>() - problem.demand.iter().sum::<Quanta>();
        debug_assert!(excess >= 0, "heavier side must supply");
        let mut builder = Self {
            m,
            n,
            max,
            balance: std::iter::empty()
                .chain(problem.supply.iter().copied())
                .chain(problem.demand.iter().map(|q| -q))
                .chain([-excess, 0])
                .collect(),
            edges: Vec::new(),
            live: vec![false; m + n],
        };
        for i in (0..m).filter(|&i| problem.supply[i] != 0) {
            for j in (0..n).filter(|&j| problem.demand[j] != 0) {
                let cost = problem.cost(i, j);
                if cost < max {
                    builder.edges.push(Edge { from: i, to: m + j, cost });
                    builder.live[i] = true;
                    builder.live[m + j] = true;
                }
            }
        }
        let threshold = builder.threshold();
        let artificial = builder.artificial();
        for i in 0..m {
            builder.edges.push(Edge { from: i, to: threshold, cost: 0 });
        }
        for j in 0..n {
            builder.edges.push(Edge { from: threshold, to: m + j, cost: max });
        }
        for v in 0..artificial {
            builder.edges.push(Edge { from: v, to: artificial, cost: max + 1 });
            builder.edges.push(Edge { from: artificial, to: v, cost: max + 1 });
        }
        builder
    }
}
