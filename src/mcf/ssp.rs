/*
 * Copyright (c) 2023 Frank Fischer <frank-fischer@shadow-soft.de>
 *
 * This program is free software: you can redistribute it and/or
 * modify it under the terms of the GNU General Public License as
 * published by the Free Software Foundation, either version 3 of the
 * License, or (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful, but
 * WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
 * General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see  <http://www.gnu.org/licenses/>
 */

//! Minimum cost flows by successive shortest paths.
//!
//! The algorithm sends flow from the source to the sink along a
//! cheapest residual path until the requested flow value is reached.
//! Each partial flow obtained this way is a minimum cost flow of its
//! value, hence so is the final one.
//!
//! Node potentials turn the residual costs into nonnegative reduced
//! costs, so all path computations except the first can use Dijkstra's
//! algorithm with an addressable heap. The initial potentials are
//! computed by a Bellman-Ford pass, which tolerates negative edge
//! costs. The initial residual network must not contain a negative
//! cost cycle; use [`cycle_canceling`][crate::mcf::cycle_canceling]
//! if it may.
//!
//! # Example
//!
//! ```
//! use flownet::mcf::{successive_shortest_paths, SolutionState};
//! use flownet::traits::*;
//! use flownet::{Buildable, Builder, FlowNet, Net};
//!
//! // two parallel routes of different cost
//! let g = Net::new_with(|b| {
//!     let n = b.add_nodes(4);
//!     b.add_edge(n[0], n[1]);
//!     b.add_edge(n[1], n[3]);
//!     b.add_edge(n[0], n[2]);
//!     b.add_edge(n[2], n[3]);
//! });
//! let costs = vec![5, 5, 1, 1];
//! let mut net = FlowNet::new(&g, |_| 3, |e| costs[g.edge_id(e)]);
//!
//! let (state, value) = successive_shortest_paths(&mut net, 0, 3, 4);
//!
//! // three units over the cheap route, the fourth over the expensive one
//! assert_eq!(state, SolutionState::Optimal);
//! assert_eq!(value, 4);
//! assert_eq!(net.total_cost(), 16);
//! ```

use crate::collections::{BinHeap, ItemPriQueue};
use crate::flownet::FlowNet;
use crate::mcf::SolutionState;
use crate::traits::IndexDigraph;

use crate::num::traits::{Bounded, NumAssign, Signed};

use std::cmp::min;

/// Successive shortest path algorithm for minimum cost flows.
pub struct SuccessiveShortestPaths<F> {
    /// Node potentials.
    pot: Vec<F>,
    /// Reduced distance labels of the current path computation.
    dist: Vec<F>,
    /// Parent directed edge of each node in the shortest path tree.
    link: Vec<usize>,
    /// Heap items of the nodes currently queued.
    items: Vec<Option<u32>>,
    heap: BinHeap<usize, F>,
    /// The flow value sent in the latest run.
    value: F,
    /// Number of augmenting paths of the latest run.
    pub cnt_augment: usize,
    /// Number of successful relaxation steps of the latest run.
    pub cnt_relax: usize,
}

impl<F> SuccessiveShortestPaths<F>
where
    F: NumAssign + Signed + Bounded + Ord + Copy + std::fmt::Debug,
{
    /// Create a new algorithm instance for networks of the size of `net`.
    pub fn new<'a, G>(net: &FlowNet<'a, G, F>) -> Self
    where
        G: IndexDigraph<'a>,
    {
        let n = net.num_nodes();
        SuccessiveShortestPaths {
            pot: vec![F::zero(); n],
            dist: vec![F::zero(); n],
            link: vec![usize::max_value(); n],
            items: vec![None; n],
            heap: BinHeap::new(),
            value: F::zero(),
            cnt_augment: 0,
            cnt_relax: 0,
        }
    }

    /// Return the flow value sent in the latest run.
    ///
    /// If the run returned [`SolutionState::Infeasible`] this is the
    /// maximal value sendable from the source to the sink.
    pub fn value(&self) -> F {
        self.value
    }

    /// Send `value` units of flow from `src` to `snk` at minimum cost.
    ///
    /// The flow already on the network is kept and extended, so the
    /// result is only a minimum cost flow if the initial flow was one
    /// of its value (the zero flow in the common case).
    ///
    /// Returns [`SolutionState::Optimal`] if the requested value has
    /// been sent and [`SolutionState::Infeasible`] if the sink cannot
    /// absorb that much flow. In the latter case the network carries
    /// a maximum flow from `src` to `snk`.
    pub fn solve<'a, G>(
        &mut self,
        net: &mut FlowNet<'a, G, F>,
        src: usize,
        snk: usize,
        value: F,
    ) -> SolutionState
    where
        G: IndexDigraph<'a>,
    {
        assert_ne!(src, snk, "Source and sink node must not be equal");
        assert!(value >= F::zero(), "Requested flow value must be nonnegative");

        self.value = F::zero();
        self.cnt_augment = 0;
        self.cnt_relax = 0;
        self.init_potentials(net);

        while self.value < value {
            if !self.shortest_path(net, src, snk) {
                log::debug!("sink unreachable after {:?} of {:?} units", self.value, value);
                return SolutionState::Infeasible;
            }

            // augment along the path, at most up to the requested value
            let mut df = value - self.value;
            let mut u = snk;
            while u != src {
                let d = self.link[u];
                df = min(df, net.res(d));
                u = net.tail(d);
            }
            let mut u = snk;
            while u != src {
                let d = self.link[u];
                net.add_flow(d, df);
                u = net.tail(d);
            }
            self.value += df;
            self.cnt_augment += 1;
            log::debug!("augmented {:?} units, {:?} of {:?} sent", df, self.value, value);

            // make the reduced costs of the next round nonnegative
            let dsnk = self.dist[snk];
            for (p, &d) in self.pot.iter_mut().zip(&self.dist) {
                *p += min(d, dsnk);
            }
        }

        SolutionState::Optimal
    }

    /// Compute initial node potentials by Bellman-Ford.
    ///
    /// All nodes start with potential zero, so the final potential of
    /// a node is the cost of the cheapest residual walk ending there.
    /// Panics if the residual network contains a negative cost cycle.
    fn init_potentials<'a, G>(&mut self, net: &FlowNet<'a, G, F>)
    where
        G: IndexDigraph<'a>,
    {
        let n = net.num_nodes();
        for p in self.pot.iter_mut() {
            *p = F::zero();
        }
        for round in 0.. {
            let mut changed = false;
            for u in 0..n {
                let pu = self.pot[u];
                for &(d, v) in net.adj(u) {
                    if net.res(d) > F::zero() && pu + net.rcost(d) < self.pot[v] {
                        self.pot[v] = pu + net.rcost(d);
                        self.cnt_relax += 1;
                        changed = true;
                    }
                }
            }
            if !changed {
                break;
            }
            assert!(round + 1 < n, "Residual network contains a negative cost cycle");
        }
    }

    /// Run Dijkstra's algorithm with reduced costs from `src`.
    ///
    /// Returns `true` if the sink has been reached. In this case
    /// `link` describes a cheapest residual path from `src` to `snk`
    /// and `dist` contains reduced distance labels that are exact for
    /// all nodes closer than the sink and at least `dist[snk]` for
    /// all others.
    fn shortest_path<'a, G>(&mut self, net: &FlowNet<'a, G, F>, src: usize, snk: usize) -> bool
    where
        G: IndexDigraph<'a>,
    {
        for u in 0..net.num_nodes() {
            self.dist[u] = F::max_value();
            self.link[u] = usize::max_value();
            self.items[u] = None;
        }
        self.heap.clear();

        self.dist[src] = F::zero();
        self.items[src] = Some(self.heap.push(src, F::zero()));
        while let Some((u, du)) = self.heap.pop_min() {
            self.items[u] = None;
            if u == snk {
                return true;
            }
            for &(d, v) in net.adj(u) {
                if !net.res(d).is_zero() {
                    let dv = du + net.rcost(d) + self.pot[u] - self.pot[v];
                    if dv < self.dist[v] {
                        self.dist[v] = dv;
                        self.link[v] = d;
                        self.cnt_relax += 1;
                        if let Some(item) = self.items[v].as_mut() {
                            self.heap.decrease_key(item, dv);
                        } else {
                            self.items[v] = Some(self.heap.push(v, dv));
                        }
                    }
                }
            }
        }

        false
    }
}

/// Send `value` units of flow from `src` to `snk` at minimum cost.
///
/// This is a convenience wrapper creating a
/// [`SuccessiveShortestPaths`] instance and running it once. Returns
/// the solution state and the flow value actually sent, which is less
/// than `value` exactly if the state is
/// [`SolutionState::Infeasible`].
pub fn successive_shortest_paths<'a, G, F>(
    net: &mut FlowNet<'a, G, F>,
    src: usize,
    snk: usize,
    value: F,
) -> (SolutionState, F)
where
    G: IndexDigraph<'a>,
    F: NumAssign + Signed + Bounded + Ord + Copy + std::fmt::Debug,
{
    let mut paths = SuccessiveShortestPaths::new(net);
    let state = paths.solve(net, src, snk, value);
    (state, paths.value())
}

#[cfg(test)]
mod tests {
    use super::successive_shortest_paths;
    use crate::mcf::SolutionState;
    use crate::traits::*;
    use crate::{Buildable, Builder, FlowNet, Net};

    fn routes() -> Net {
        Net::new_with(|b| {
            let n = b.add_nodes(3);
            b.add_edge(n[0], n[1]);
            b.add_edge(n[0], n[2]);
            b.add_edge(n[2], n[1]);
        })
    }

    #[test]
    fn test_negative_costs() {
        // the indirect route is cheaper and has a negative cost edge
        let g = routes();
        let costs = vec![4i64, -2, 1];
        let mut net = FlowNet::new(&g, |_| 2i64, |e| costs[g.edge_id(e)]);

        let (state, value) = successive_shortest_paths(&mut net, 0, 1, 3);
        assert_eq!(state, SolutionState::Optimal);
        assert_eq!(value, 3);
        assert_eq!(net.total_cost(), 2 * (-1) + 4);
        assert_eq!(net.flow(g.id2edge(1)), 2);
    }

    #[test]
    fn test_infeasible() {
        let g = routes();
        let costs = vec![4i64, -2, 1];
        let mut net = FlowNet::new(&g, |_| 2i64, |e| costs[g.edge_id(e)]);

        // at most 4 units fit through the two routes
        let (state, value) = successive_shortest_paths(&mut net, 0, 1, 5);
        assert_eq!(state, SolutionState::Infeasible);
        assert_eq!(value, 4);
        assert_eq!(net.excess(0), 4);
        assert_eq!(net.excess(1), -4);
    }

    #[test]
    fn test_zero_value() {
        let g = routes();
        let mut net = FlowNet::new(&g, |_| 2i64, |_| 1i64);

        let (state, value) = successive_shortest_paths(&mut net, 0, 1, 0);
        assert_eq!(state, SolutionState::Optimal);
        assert_eq!(value, 0);
        assert_eq!(net.total_cost(), 0);
    }

    #[test]
    fn test_extends_existing_flow() {
        let g = routes();
        let costs = vec![0i64, 0, 0];
        let mut net = FlowNet::new(&g, |_| 2i64, |e| costs[g.edge_id(e)]);

        net.set_flow(g.id2edge(0), 2);
        let (state, value) = successive_shortest_paths(&mut net, 0, 1, 2);
        assert_eq!(state, SolutionState::Optimal);
        assert_eq!(value, 2);
        // two units were already there
        assert_eq!(net.excess(0), 4);
    }

    #[test]
    #[should_panic(expected = "negative cost cycle")]
    fn test_negative_cycle_panics() {
        let g = Net::new_with(|b| {
            let n = b.add_nodes(2);
            b.add_edge(n[0], n[1]);
            b.add_edge(n[1], n[0]);
        });
        let costs = vec![1i64, -2];
        let mut net = FlowNet::new(&g, |_| 1i64, |e| costs[g.edge_id(e)]);

        successive_shortest_paths(&mut net, 0, 1, 1);
    }
}
