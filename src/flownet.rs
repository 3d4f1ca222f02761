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

//! A flow network with residual bookkeeping.
//!
//! All flow algorithms in this crate operate on a [`FlowNet`], a flow
//! carrying view of an [`IndexDigraph`][crate::traits::IndexDigraph].
//! The network works with *directed edge* numbers: edge `e` of the
//! graph corresponds to the forward directed edge `2e` and the
//! reverse directed edge `2e + 1`, so `d ^ 1` is the opposite
//! direction of `d`. The residual capacity of a directed edge equals
//! the flow that can still be pushed along it, the residual cost is
//! the cost of the underlying edge, negated in the reverse direction.
//!
//! # Example
//!
//! ```
//! use flownet::{Buildable, Builder, FlowNet, Net};
//! use flownet::traits::*;
//!
//! let g = Net::new_with(|b| {
//!     let nodes = b.add_nodes(3);
//!     b.add_edge(nodes[0], nodes[1]);
//!     b.add_edge(nodes[1], nodes[2]);
//! });
//! let upper = vec![4, 2];
//! let cost = vec![1, 3];
//! let mut net = FlowNet::new(&g, |e| upper[g.edge_id(e)], |e| cost[g.edge_id(e)]);
//!
//! let d = net.forward(g.id2edge(0));
//! assert_eq!(net.res(d), 4);
//! assert_eq!(net.res(d ^ 1), 0);
//!
//! net.add_flow(d, 3);
//! assert_eq!(net.res(d), 1);
//! assert_eq!(net.res(d ^ 1), 3);
//! assert_eq!(net.rcost(d), 1);
//! assert_eq!(net.rcost(d ^ 1), -1);
//! assert_eq!(net.total_cost(), 3);
//! ```

use crate::traits::IndexDigraph;

use crate::num::traits::{NumAssign, Signed};

/// A directed graph with edge capacities, edge costs and a current flow.
///
/// The per-edge state is kept in a single vector of length `2m`: the
/// slot of the forward directed edge holds the flow, the slot of the
/// reverse directed edge the remaining capacity. Hence the residual
/// capacity of a directed edge `d` is the value in the slot of `d ^ 1`
/// and pushing flow along `d` moves value from one slot to the other.
/// The capacity bounds `0 <= flow <= upper` hold as long as no slot
/// becomes negative.
pub struct FlowNet<'a, G, F>
where
    G: 'a + IndexDigraph<'a>,
{
    g: &'a G,
    /// Incident directed edges `(d, mate)` of each node.
    neighs: Vec<Vec<(usize, usize)>>,
    /// Flow and remaining capacity of each edge.
    flow: Vec<F>,
    /// Cost of each edge in forward direction.
    costs: Vec<F>,
}

impl<'a, G, F> FlowNet<'a, G, F>
where
    G: IndexDigraph<'a>,
    F: NumAssign + Signed + Ord + Copy,
{
    /// Create a network over the graph `g` with edge capacities
    /// `upper` and edge costs `cost`, carrying zero flow.
    pub fn new<Us, Cs>(g: &'a G, upper: Us, cost: Cs) -> Self
    where
        Us: Fn(G::Edge) -> F,
        Cs: Fn(G::Edge) -> F,
    {
        FlowNet {
            g,
            neighs: g
                .nodes()
                .map(|u| {
                    g.outedges(u)
                        .map(|(e, v)| (g.edge_id(e) << 1, g.node_id(v)))
                        .chain(g.inedges(u).map(|(e, v)| ((g.edge_id(e) << 1) | 1, g.node_id(v))))
                        .collect()
                })
                .collect(),
            flow: (0..2 * g.num_edges())
                .map(|d| {
                    if (d & 1) == 0 {
                        F::zero()
                    } else {
                        upper(g.id2edge(d >> 1))
                    }
                })
                .collect(),
            costs: (0..g.num_edges()).map(|e| cost(g.id2edge(e))).collect(),
        }
    }

    /// Return the underlying graph.
    pub fn as_graph(&self) -> &'a G {
        self.g
    }

    /// Return the number of nodes.
    pub fn num_nodes(&self) -> usize {
        self.neighs.len()
    }

    /// Return the number of edges.
    pub fn num_edges(&self) -> usize {
        self.costs.len()
    }

    /// Return the directed edges incident to the node with id `u`.
    ///
    /// Each entry is a pair `(d, v)` of a directed edge leaving `u`
    /// and the id of its other endpoint.
    pub fn adj(&self, u: usize) -> &[(usize, usize)] {
        &self.neighs[u]
    }

    /// Return the forward directed edge of `e`.
    pub fn forward(&self, e: G::Edge) -> usize {
        self.g.edge_id(e) << 1
    }

    /// Return the edge underlying a directed edge.
    pub fn edge(&self, d: usize) -> G::Edge {
        self.g.id2edge(d >> 1)
    }

    /// Return the id of the node a directed edge leaves.
    pub fn tail(&self, d: usize) -> usize {
        let e = self.g.id2edge(d >> 1);
        if (d & 1) == 0 {
            self.g.node_id(self.g.src(e))
        } else {
            self.g.node_id(self.g.snk(e))
        }
    }

    /// Return the id of the node a directed edge enters.
    pub fn head(&self, d: usize) -> usize {
        self.tail(d ^ 1)
    }

    /// Return the residual capacity of a directed edge.
    pub fn res(&self, d: usize) -> F {
        self.flow[d ^ 1]
    }

    /// Return the residual cost of a directed edge.
    pub fn rcost(&self, d: usize) -> F {
        let c = self.costs[d >> 1];
        if (d & 1) == 0 {
            c
        } else {
            -c
        }
    }

    /// Push `df` units of flow along the directed edge `d`.
    ///
    /// The amount must not exceed the residual capacity of `d`.
    pub fn add_flow(&mut self, d: usize, df: F) {
        debug_assert!(df >= F::zero(), "Flow amount must be nonnegative");
        debug_assert!(df <= self.res(d), "Flow amount exceeds residual capacity");
        self.flow[d] += df;
        self.flow[d ^ 1] -= df;
    }

    /// Return the flow on edge `e`.
    pub fn flow(&self, e: G::Edge) -> F {
        self.flow[self.g.edge_id(e) << 1]
    }

    /// Set the flow on edge `e` to `f`.
    ///
    /// The value must satisfy `0 <= f <= upper(e)`.
    pub fn set_flow(&mut self, e: G::Edge, f: F) {
        let d = self.g.edge_id(e) << 1;
        let upper = self.flow[d] + self.flow[d | 1];
        debug_assert!(f >= F::zero() && f <= upper, "Flow out of bounds");
        self.flow[d] = f;
        self.flow[d | 1] = upper - f;
    }

    /// Return the net flow leaving the node with id `u`.
    ///
    /// This is the flow on outgoing minus the flow on incoming edges;
    /// it vanishes on all nodes but the source and the sink of a flow
    /// and everywhere for a circulation.
    pub fn excess(&self, u: usize) -> F {
        let mut x = F::zero();
        for &(d, _) in &self.neighs[u] {
            if (d & 1) == 0 {
                x += self.flow[d];
            } else {
                x -= self.flow[d ^ 1];
            }
        }
        x
    }

    /// Return the total cost of the current flow.
    pub fn total_cost(&self) -> F {
        let mut c = F::zero();
        for e in 0..self.costs.len() {
            c += self.flow[e << 1] * self.costs[e];
        }
        c
    }
}

#[cfg(test)]
mod tests {
    use super::FlowNet;
    use crate::classes;
    use crate::traits::*;
    use crate::{Buildable, Builder, Net};

    fn diamond() -> (Net, Vec<i32>, Vec<i32>) {
        // two parallel paths of length 2
        let g = Net::new_with(|b| {
            let n = b.add_nodes(4);
            b.add_edge(n[0], n[1]);
            b.add_edge(n[1], n[3]);
            b.add_edge(n[0], n[2]);
            b.add_edge(n[2], n[3]);
        });
        let upper = vec![4, 4, 2, 2];
        let costs = vec![1, 2, 3, -1];
        (g, upper, costs)
    }

    #[test]
    fn test_residuals() {
        let (g, upper, costs) = diamond();
        let mut net = FlowNet::new(&g, |e| upper[g.edge_id(e)], |e| costs[g.edge_id(e)]);

        for e in g.edges() {
            let d = net.forward(e);
            assert_eq!(net.res(d), upper[g.edge_id(e)]);
            assert_eq!(net.res(d ^ 1), 0);
            assert_eq!(net.flow(e), 0);
        }

        let d = net.forward(g.id2edge(0));
        net.add_flow(d, 3);
        assert_eq!(net.res(d), 1);
        assert_eq!(net.res(d ^ 1), 3);
        assert_eq!(net.flow(g.id2edge(0)), 3);

        // push one unit back
        net.add_flow(d ^ 1, 1);
        assert_eq!(net.res(d), 2);
        assert_eq!(net.flow(g.id2edge(0)), 2);
    }

    #[test]
    fn test_rcost() {
        let (g, upper, costs) = diamond();
        let net = FlowNet::new(&g, |e| upper[g.edge_id(e)], |e| costs[g.edge_id(e)]);

        for e in g.edges() {
            let d = net.forward(e);
            assert_eq!(net.rcost(d), costs[g.edge_id(e)]);
            assert_eq!(net.rcost(d ^ 1), -costs[g.edge_id(e)]);
        }
    }

    #[test]
    fn test_endpoints() {
        let (g, upper, costs) = diamond();
        let net = FlowNet::new(&g, |e| upper[g.edge_id(e)], |e| costs[g.edge_id(e)]);

        for e in g.edges() {
            let d = net.forward(e);
            assert_eq!(net.tail(d), g.node_id(g.src(e)));
            assert_eq!(net.head(d), g.node_id(g.snk(e)));
            assert_eq!(net.tail(d ^ 1), g.node_id(g.snk(e)));
            assert_eq!(net.head(d ^ 1), g.node_id(g.src(e)));
            assert_eq!(net.edge(d), e);
            assert_eq!(net.edge(d ^ 1), e);
        }

        for u in net.adj(0) {
            assert_eq!(net.tail(u.0), 0);
            assert_eq!(net.head(u.0), u.1);
        }
    }

    #[test]
    fn test_circulation_cost() {
        let g: Net = classes::cycle(4);
        let costs = vec![2, -4, 1, -1];
        let mut net = FlowNet::new(&g, |_| 5, |e| costs[g.edge_id(e)]);

        for e in g.edges() {
            net.set_flow(e, 3);
        }

        for u in 0..net.num_nodes() {
            assert_eq!(net.excess(u), 0);
        }
        assert_eq!(net.total_cost(), 3 * (2 - 4 + 1 - 1));
    }

    #[test]
    fn test_excess() {
        let (g, upper, costs) = diamond();
        let mut net = FlowNet::new(&g, |e| upper[g.edge_id(e)], |e| costs[g.edge_id(e)]);

        // a 0 -> 1 -> 3 flow of two units
        net.set_flow(g.id2edge(0), 2);
        net.set_flow(g.id2edge(1), 2);

        assert_eq!(net.excess(0), 2);
        assert_eq!(net.excess(1), 0);
        assert_eq!(net.excess(2), 0);
        assert_eq!(net.excess(3), -2);
    }
}
