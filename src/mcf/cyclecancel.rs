/*
 * Copyright (c) 2022, 2023 Frank Fischer <frank-fischer@shadow-soft.de>
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

//! Minimum cost flows by cycle canceling.
//!
//! A feasible flow has minimum cost among all flows of the same value
//! if and only if its residual network contains no cycle of negative
//! total cost. The algorithm, going back to Klein, turns this
//! optimality criterion into a method: starting from any feasible
//! flow it repeatedly finds a negative cost cycle in the residual
//! network and pushes as much flow as possible around it. Every
//! cancellation strictly decreases the total cost and leaves the flow
//! value unchanged, so the final flow is optimal for its value.
//!
//! Negative cycles are found with a label correcting shortest path
//! computation over the residual network. Because the labels do not
//! converge in the presence of a negative cycle, the computation
//! periodically inspects its own predecessor structure instead: as
//! soon as the parent pointers contain a cycle, that cycle is a
//! negative cost cycle of the residual network.
//!
//! The feasible starting flow is *not* computed here. Use
//! [`edmondskarp`][crate::maxflow::edmondskarp] or
//! [`FlowNet::set_flow`][crate::FlowNet::set_flow] to establish one.
//!
//! # Example
//!
//! ```
//! use flownet::classes;
//! use flownet::mcf::{cycle_canceling, SolutionState};
//! use flownet::traits::*;
//! use flownet::{FlowNet, Net};
//!
//! // a directed 4-cycle carrying a suboptimal circulation of 3 units
//! let g: Net = classes::cycle(4);
//! let costs = vec![2, -4, 1, -1];
//! let mut net = FlowNet::new(&g, |_| 5, |e| costs[g.edge_id(e)]);
//! for e in g.edges() {
//!     net.set_flow(e, 3);
//! }
//! assert_eq!(net.total_cost(), -6);
//!
//! assert_eq!(cycle_canceling(&mut net), SolutionState::Optimal);
//!
//! // the circulation has been saturated to 5 units on the cycle of cost -2
//! assert_eq!(net.total_cost(), -10);
//! for e in g.edges() {
//!     assert_eq!(net.flow(e), 5);
//! }
//! ```

use crate::flownet::FlowNet;
use crate::mcf::SolutionState;
use crate::traits::IndexDigraph;

use crate::num::traits::{Bounded, NumAssign, Signed};

use std::cmp::min;
use std::collections::VecDeque;

/// Cycle canceling algorithm for minimum cost flows.
///
/// The struct owns all per-node state of the negative cycle
/// detection, so one instance can be reused for several computations
/// on networks with the same number of nodes. It must not be shared
/// between computations running at the same time.
pub struct CycleCanceling<F> {
    /// Distance labels of the current detection run.
    dist: Vec<F>,
    /// Parent directed edge of each node.
    ///
    /// An entry is `usize::max_value()` if the node has no parent.
    /// Unlike a shortest path tree this structure may contain cycles:
    /// a cycle appears exactly when the residual network contains a
    /// negative cost cycle, and finding one is the whole point of the
    /// detection run.
    link: Vec<usize>,
    /// Walk labels of the cycle checks, `0` meaning unlabeled.
    label: Vec<usize>,
    /// FIFO queue of nodes with pending relaxations.
    queue: VecDeque<usize>,
    /// Whether a node is currently queued.
    in_queue: Vec<bool>,
    /// Number of successful edge relaxations.
    pub cnt_relax: usize,
    /// Number of completed relaxation passes.
    pub cnt_passes: usize,
    /// Number of canceled cycles.
    pub cnt_cycles: usize,
    /// Optional bound on the number of cancellations.
    ///
    /// The algorithm has no intrinsic timeout. If a bound is set and
    /// reached, `solve` stops early and returns
    /// [`SolutionState::Unknown`].
    pub max_cancel: Option<usize>,
}

impl<F> CycleCanceling<F>
where
    F: NumAssign + Signed + Bounded + Ord + Copy + std::fmt::Debug,
{
    /// Create a new algorithm instance for networks of the size of `net`.
    pub fn new<'a, G>(net: &FlowNet<'a, G, F>) -> Self
    where
        G: IndexDigraph<'a>,
    {
        let n = net.num_nodes();
        CycleCanceling {
            dist: vec![F::zero(); n],
            link: vec![usize::max_value(); n],
            label: vec![0; n],
            queue: VecDeque::with_capacity(n),
            in_queue: vec![false; n],
            cnt_relax: 0,
            cnt_passes: 0,
            cnt_cycles: 0,
            max_cancel: None,
        }
    }

    /// Cancel negative cost cycles until none remains.
    ///
    /// The network must already carry a feasible flow of the intended
    /// value. On return with [`SolutionState::Optimal`] the flow is a
    /// minimum cost flow of that value. The flow value itself is
    /// never changed.
    ///
    /// The statistics counters are reset at the start of the run.
    pub fn solve<'a, G>(&mut self, net: &mut FlowNet<'a, G, F>) -> SolutionState
    where
        G: IndexDigraph<'a>,
    {
        self.cnt_relax = 0;
        self.cnt_passes = 0;
        self.cnt_cycles = 0;

        loop {
            if self.max_cancel.map_or(false, |k| self.cnt_cycles >= k) {
                return SolutionState::Unknown;
            }
            match self.find_cycle(net) {
                Some(z) => self.cancel(net, z),
                None => return SolutionState::Optimal,
            }
        }
    }

    /// Search for a negative cost cycle in the residual network.
    ///
    /// Returns the id of a node lying on such a cycle or `None` if no
    /// negative cycle exists. The absence of a cycle is the success
    /// criterion of [`solve`][CycleCanceling::solve], not an error.
    ///
    /// The search runs a label correcting computation with all nodes
    /// as starting points. A relaxation pass ends when the node that
    /// was the last queued at the start of the pass is dequeued; at
    /// the end of every pass the parent structure is checked for a
    /// cycle. This catches a cycle as soon as it can be proven to
    /// exist rather than waiting for the (then never attained)
    /// convergence of the distance labels.
    pub fn find_cycle<'a, G>(&mut self, net: &FlowNet<'a, G, F>) -> Option<usize>
    where
        G: IndexDigraph<'a>,
    {
        let n = net.num_nodes();
        if n == 0 {
            return None;
        }

        for u in 0..n {
            self.dist[u] = F::zero();
            self.link[u] = usize::max_value();
            self.in_queue[u] = true;
        }
        self.queue.clear();
        self.queue.extend(0..n);

        let mut last_of_pass = n - 1;
        while let Some(u) = self.queue.pop_front() {
            self.in_queue[u] = false;

            let du = self.dist[u];
            for &(d, v) in net.adj(u) {
                if net.res(d) > F::zero() {
                    let dv = du + net.rcost(d);
                    if dv < self.dist[v] {
                        self.dist[v] = dv;
                        self.link[v] = d;
                        self.cnt_relax += 1;
                        if !self.in_queue[v] {
                            self.in_queue[v] = true;
                            self.queue.push_back(v);
                        }
                    }
                }
            }

            if u == last_of_pass {
                self.cnt_passes += 1;
                if let Some(z) = self.cycle_check(net) {
                    return Some(z);
                }
                if let Some(&w) = self.queue.back() {
                    last_of_pass = w;
                }
            }
        }

        None
    }

    /// Check the parent structure for a cycle.
    ///
    /// Each walk follows the parent pointers from an unlabeled start
    /// node, labeling the visited nodes with the id of the walk. A
    /// walk ends at a node without parent, at a node labeled by an
    /// earlier walk (the remainder has been checked before) or at a
    /// node labeled by the current walk. The latter closes a cycle
    /// and the node is returned.
    fn cycle_check<'a, G>(&mut self, net: &FlowNet<'a, G, F>) -> Option<usize>
    where
        G: IndexDigraph<'a>,
    {
        for l in self.label.iter_mut() {
            *l = 0;
        }

        let mut walk = 0;
        for start in 0..self.label.len() {
            if self.label[start] != 0 {
                continue;
            }
            walk += 1;
            let mut u = start;
            loop {
                if self.label[u] == walk {
                    return Some(u);
                }
                if self.label[u] != 0 {
                    break;
                }
                self.label[u] = walk;
                let d = self.link[u];
                if d == usize::max_value() {
                    break;
                }
                u = net.tail(d);
            }
        }

        None
    }

    /// Cancel the cycle through the node `z`.
    ///
    /// The node must lie on a cycle of the parent structure computed
    /// by the last call to [`find_cycle`][CycleCanceling::find_cycle].
    /// The cycle is traversed twice: the first walk computes the
    /// bottleneck residual capacity as a running minimum starting
    /// from `F::max_value()`, the second walk pushes the bottleneck
    /// along every edge of the cycle.
    pub fn cancel<'a, G>(&mut self, net: &mut FlowNet<'a, G, F>, z: usize)
    where
        G: IndexDigraph<'a>,
    {
        let mut df = F::max_value();
        let mut len = 0;
        let mut u = z;
        loop {
            let d = self.link[u];
            df = min(df, net.res(d));
            len += 1;
            u = net.tail(d);
            if u == z {
                break;
            }
        }

        let mut u = z;
        loop {
            let d = self.link[u];
            log::trace!("push {:?} units along {} -> {}", df, net.tail(d), net.head(d));
            net.add_flow(d, df);
            u = net.tail(d);
            if u == z {
                break;
            }
        }

        self.cnt_cycles += 1;
        log::debug!(
            "canceled cycle of length {} with {:?} units, total cost now {:?}",
            len,
            df,
            net.total_cost()
        );
    }
}

/// Cancel negative cost cycles in the residual network of `net`.
///
/// This is a convenience wrapper creating a [`CycleCanceling`]
/// instance and running it to completion. The network must already
/// carry a feasible flow; afterwards its flow has minimum cost among
/// all flows of the same value.
pub fn cycle_canceling<'a, G, F>(net: &mut FlowNet<'a, G, F>) -> SolutionState
where
    G: IndexDigraph<'a>,
    F: NumAssign + Signed + Bounded + Ord + Copy + std::fmt::Debug,
{
    let mut cycles = CycleCanceling::new(net);
    cycles.solve(net)
}

#[cfg(test)]
mod tests {
    use super::{cycle_canceling, CycleCanceling};
    use crate::classes;
    use crate::mcf::SolutionState;
    use crate::traits::*;
    use crate::{Buildable, Builder, FlowNet, Net};

    #[test]
    fn test_no_cycle_in_optimal_network() {
        // nonnegative costs and zero flow, nothing to cancel
        let g: Net = classes::complete_bipartite(3, 3);
        let net = FlowNet::new(&g, |_| 10i64, |e| g.edge_id(e) as i64);

        let mut cycles = CycleCanceling::new(&net);
        assert_eq!(cycles.find_cycle(&net), None);
        assert!(cycles.cnt_passes >= 1);
    }

    #[test]
    fn test_detects_seeded_cycle() {
        // a negative 4-cycle 0 -> 1 -> 2 -> 3 -> 0 inside a larger
        // graph with nonnegative edges
        let g = Net::new_with(|b| {
            let n = b.add_nodes(8);
            for i in 0..4 {
                b.add_edge(n[i], n[(i + 1) % 4]);
            }
            for i in 0..4 {
                b.add_edge(n[i], n[4 + i]);
                b.add_edge(n[4 + i], n[(i + 1) % 4]);
            }
        });
        let costs: Vec<i64> = vec![1, -2, 1, -3, 5, 5, 5, 5, 5, 5, 5, 5];
        let net = FlowNet::new(&g, |_| 9i64, |e| costs[g.edge_id(e)]);

        let mut cycles = CycleCanceling::new(&net);
        let z = cycles.find_cycle(&net).expect("seeded cycle not found");

        // certify the result by walking the parent structure
        let mut cost = 0;
        let mut steps = 0;
        let mut u = z;
        loop {
            let d = cycles.link[u];
            assert!(d != usize::max_value());
            assert!(net.res(d) > 0);
            cost += net.rcost(d);
            u = net.tail(d);
            steps += 1;
            assert!(steps <= g.num_nodes(), "walk does not close");
            if u == z {
                break;
            }
        }
        assert!(cost < 0);
    }

    #[test]
    fn test_bottleneck() {
        // all edges cheap, residual capacities 5, 3, 8, 2
        let g: Net = classes::cycle(4);
        let caps = vec![5i32, 3, 8, 2];
        let mut net = FlowNet::new(&g, |e| caps[g.edge_id(e)], |_| -1);

        let mut cycles = CycleCanceling::new(&net);
        let z = cycles.find_cycle(&net).expect("cycle not found");
        cycles.cancel(&mut net, z);

        for e in g.edges() {
            assert_eq!(net.flow(e), 2);
        }
        // the smallest edge is saturated
        assert_eq!(net.res(net.forward(g.id2edge(3))), 0);
        assert_eq!(cycles.cnt_cycles, 1);
    }

    #[test]
    fn test_max_cancel() {
        let g: Net = classes::cycle(3);
        let mut net = FlowNet::new(&g, |_| 4i32, |_| -1);

        let mut cycles = CycleCanceling::new(&net);
        cycles.max_cancel = Some(0);
        assert_eq!(cycles.solve(&mut net), SolutionState::Unknown);
        assert_eq!(cycles.cnt_cycles, 0);

        cycles.max_cancel = None;
        assert_eq!(cycles.solve(&mut net), SolutionState::Optimal);
        assert_eq!(net.total_cost(), -12);
    }

    #[test]
    fn test_flow_value_unchanged() {
        // parallel routes of different cost between two terminals
        let g = Net::new_with(|b| {
            let n = b.add_nodes(4);
            b.add_edge(n[0], n[1]);
            b.add_edge(n[1], n[3]);
            b.add_edge(n[0], n[2]);
            b.add_edge(n[2], n[3]);
        });
        let costs = vec![5i64, 5, 1, 1];
        let mut net = FlowNet::new(&g, |_| 3i64, |e| costs[g.edge_id(e)]);

        // an expensive feasible flow over the top route
        net.set_flow(g.id2edge(0), 3);
        net.set_flow(g.id2edge(1), 3);
        assert_eq!(net.total_cost(), 30);

        assert_eq!(cycle_canceling(&mut net), SolutionState::Optimal);

        // value preserved, flow rerouted over the cheap route
        assert_eq!(net.excess(0), 3);
        assert_eq!(net.excess(3), -3);
        assert_eq!(net.excess(1), 0);
        assert_eq!(net.excess(2), 0);
        assert_eq!(net.total_cost(), 6);
    }
}
