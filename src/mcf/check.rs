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

//! Verification of flows and optimality certificates.
//!
//! The functions in this module check the defining properties of a
//! flow directly from their definitions. They share no code with the
//! solvers, so they can certify solver results in tests.
//!
//! # Example
//!
//! ```
//! use flownet::classes;
//! use flownet::mcf::{cycle_cost, negative_cycle, verify_circulation};
//! use flownet::traits::*;
//! use flownet::{FlowNet, Net};
//!
//! let g: Net = classes::cycle(4);
//! let costs = vec![2, -4, 1, -1];
//! let mut net = FlowNet::new(&g, |_| 5, |e| costs[g.edge_id(e)]);
//! for e in g.edges() {
//!     net.set_flow(e, 3);
//! }
//!
//! assert_eq!(verify_circulation(&net), Ok(()));
//!
//! // the forward cycle has cost -2, so the circulation is not optimal
//! let cycle = negative_cycle(&net).unwrap();
//! assert_eq!(cycle.len(), 4);
//! assert_eq!(cycle_cost(&net, &cycle), -2);
//! ```

use crate::flownet::FlowNet;
use crate::traits::IndexDigraph;

use crate::num::traits::{NumAssign, Signed};

use std::error;
use std::fmt;

/// A violation of the flow properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowError {
    /// The flow on the edge with this id is negative or exceeds the
    /// upper bound.
    Capacity(usize),
    /// The node with this id has nonzero excess.
    Conservation(usize),
}

impl fmt::Display for FlowError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FlowError::Capacity(e) => write!(fmt, "Flow on edge {} is out of bounds", e),
            FlowError::Conservation(u) => write!(fmt, "Flow at node {} is not conserved", u),
        }
    }
}

impl error::Error for FlowError {}

fn verify_capacities<'a, G, F>(net: &FlowNet<'a, G, F>) -> Result<(), FlowError>
where
    G: IndexDigraph<'a>,
    F: NumAssign + Signed + Ord + Copy,
{
    for e in 0..net.num_edges() {
        // both residuals are nonnegative iff 0 <= flow <= upper
        if net.res(e << 1) < F::zero() || net.res(e << 1 | 1) < F::zero() {
            return Err(FlowError::Capacity(e));
        }
    }
    Ok(())
}

/// Verify that `net` carries a feasible flow from `src` to `snk`.
///
/// The flow on each edge must be within bounds and all nodes except
/// the two terminals must conserve flow. The first violation found is
/// returned as an error.
pub fn verify_flow<'a, G, F>(
    net: &FlowNet<'a, G, F>,
    src: usize,
    snk: usize,
) -> Result<(), FlowError>
where
    G: IndexDigraph<'a>,
    F: NumAssign + Signed + Ord + Copy,
{
    verify_capacities(net)?;
    for u in 0..net.num_nodes() {
        if u != src && u != snk && !net.excess(u).is_zero() {
            return Err(FlowError::Conservation(u));
        }
    }
    Ok(())
}

/// Verify that `net` carries a feasible circulation.
///
/// Like [`verify_flow`] but every node must conserve flow.
pub fn verify_circulation<'a, G, F>(net: &FlowNet<'a, G, F>) -> Result<(), FlowError>
where
    G: IndexDigraph<'a>,
    F: NumAssign + Signed + Ord + Copy,
{
    verify_capacities(net)?;
    for u in 0..net.num_nodes() {
        if !net.excess(u).is_zero() {
            return Err(FlowError::Conservation(u));
        }
    }
    Ok(())
}

/// Search the residual network of `net` for a negative cost cycle.
///
/// Returns the directed edges of such a cycle in traversal order, the
/// head of each edge being the tail of the next, or `None` if no
/// negative cycle exists. By the optimality criterion the latter
/// proves the flow on `net` to be a minimum cost flow of its value.
///
/// This runs a plain edge list Bellman-Ford with the full round count
/// and is considerably slower than
/// [`CycleCanceling::find_cycle`][crate::mcf::CycleCanceling::find_cycle].
/// It is meant as an independent check of results, not as a building
/// block of a solver.
pub fn negative_cycle<'a, G, F>(net: &FlowNet<'a, G, F>) -> Option<Vec<usize>>
where
    G: IndexDigraph<'a>,
    F: NumAssign + Signed + Ord + Copy,
{
    let n = net.num_nodes();
    let mut dist = vec![F::zero(); n];
    let mut link = vec![usize::max_value(); n];

    // relax all residual edges for n full rounds
    let mut entry = None;
    for _ in 0..n {
        let mut last = None;
        for d in 0..2 * net.num_edges() {
            if net.res(d) > F::zero() {
                let (u, v) = (net.tail(d), net.head(d));
                if dist[u] + net.rcost(d) < dist[v] {
                    dist[v] = dist[u] + net.rcost(d);
                    link[v] = d;
                    last = Some(v);
                }
            }
        }
        match last {
            None => return None,
            Some(v) => entry = Some(v),
        }
    }

    // a node has been updated in the n-th round, hence a negative
    // cycle exists and n backward steps must lead into it
    let mut u = entry?;
    for _ in 0..n {
        u = net.tail(link[u]);
    }

    let start = u;
    let mut cycle = vec![];
    loop {
        let d = link[u];
        cycle.push(d);
        u = net.tail(d);
        if u == start {
            break;
        }
    }
    cycle.reverse();
    Some(cycle)
}

/// Return the total residual cost of a directed closed walk.
pub fn cycle_cost<'a, G, F>(net: &FlowNet<'a, G, F>, cycle: &[usize]) -> F
where
    G: IndexDigraph<'a>,
    F: NumAssign + Signed + Ord + Copy,
{
    cycle.iter().fold(F::zero(), |c, &d| c + net.rcost(d))
}

#[cfg(test)]
mod tests {
    use super::{cycle_cost, negative_cycle, verify_circulation, verify_flow, FlowError};
    use crate::classes;
    use crate::traits::*;
    use crate::{FlowNet, Net};

    #[test]
    fn test_verify_flow() {
        let g: Net = classes::path(3);
        let mut net = FlowNet::new(&g, |_| 7i64, |_| 1i64);
        for e in g.edges() {
            net.set_flow(e, 4);
        }

        assert_eq!(verify_flow(&net, 0, 3), Ok(()));
        // with the wrong terminals the path ends are unbalanced
        assert_eq!(verify_flow(&net, 1, 2), Err(FlowError::Conservation(0)));
        assert_eq!(verify_circulation(&net), Err(FlowError::Conservation(0)));
    }

    #[test]
    fn test_verify_circulation() {
        let g: Net = classes::cycle(5);
        let mut net = FlowNet::new(&g, |_| 3i64, |_| -1i64);
        for e in g.edges() {
            net.set_flow(e, 3);
        }
        assert_eq!(verify_circulation(&net), Ok(()));

        net.set_flow(g.id2edge(2), 1);
        assert_eq!(verify_circulation(&net), Err(FlowError::Conservation(2)));
    }

    #[test]
    fn test_no_negative_cycle() {
        let g: Net = classes::complete_bipartite(3, 2);
        let net = FlowNet::new(&g, |_| 5i64, |e| g.edge_id(e) as i64);
        assert_eq!(negative_cycle(&net), None);
    }

    #[test]
    fn test_negative_cycle_closed() {
        let g: Net = classes::cycle(6);
        let costs = vec![1i64, 1, -2, 1, -3, 0];
        let net = FlowNet::new(&g, |_| 2i64, |e| costs[g.edge_id(e)]);

        let cycle = negative_cycle(&net).expect("cycle not found");
        // a closed walk of negative cost over residual edges
        assert!(cycle_cost(&net, &cycle) < 0);
        for w in cycle.windows(2) {
            assert_eq!(net.head(w[0]), net.tail(w[1]));
        }
        assert_eq!(net.head(cycle[cycle.len() - 1]), net.tail(cycle[0]));
        for &d in &cycle {
            assert!(net.res(d) > 0);
        }
    }

    #[test]
    fn test_negative_cycle_uses_residual_edges() {
        // the negative cycle only appears after the flow blocks an edge
        let g: Net = classes::cycle(3);
        let costs = vec![5i64, 1, 1];
        let mut net = FlowNet::new(&g, |_| 2i64, |e| costs[g.edge_id(e)]);
        assert_eq!(negative_cycle(&net), None);

        // pushing along the expensive cycle makes its reversal profitable
        for e in g.edges() {
            net.set_flow(e, 2);
        }
        let cycle = negative_cycle(&net).expect("cycle not found");
        assert_eq!(cycle_cost(&net, &cycle), -7);
        assert!(cycle.iter().all(|&d| d & 1 == 1));
    }

    #[test]
    fn test_empty_network() {
        let g = Net::default();
        let net = FlowNet::new(&g, |_| 0i64, |_| 0i64);
        assert_eq!(verify_circulation(&net), Ok(()));
        assert_eq!(negative_cycle(&net), None);
    }
}
