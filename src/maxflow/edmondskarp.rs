/*
 * Copyright (c) 2019-2023 Frank Fischer <frank-fischer@shadow-soft.de>
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

//! The max flow algorithm of Edmonds and Karp.
//!
//! Flow is augmented along shortest residual paths found by breadth
//! first search until the sink becomes unreachable. The flow already
//! on the network is kept, so the algorithm reports the value pushed
//! in the current run only.
//!
//! # Example
//!
//! ```
//! use flownet::maxflow::edmondskarp;
//! use flownet::mcf::verify_flow;
//! use flownet::traits::*;
//! use flownet::{Buildable, Builder, FlowNet, Net};
//!
//! let g = Net::new_with(|b| {
//!     let n = b.add_nodes(4);
//!     b.add_edge(n[0], n[1]);
//!     b.add_edge(n[0], n[2]);
//!     b.add_edge(n[1], n[3]);
//!     b.add_edge(n[2], n[3]);
//!     b.add_edge(n[1], n[2]);
//! });
//! let caps = vec![3, 2, 2, 4, 2];
//! let mut net = FlowNet::new(&g, |e| caps[g.edge_id(e)], |_| 0);
//!
//! assert_eq!(edmondskarp(&mut net, 0, 3), 5);
//! assert_eq!(verify_flow(&net, 0, 3), Ok(()));
//! assert_eq!(net.excess(0), 5);
//! ```

use crate::flownet::FlowNet;
use crate::traits::IndexDigraph;

use crate::num::traits::{NumAssign, Signed};

use std::cmp::min;
use std::collections::VecDeque;

/// Max flow algorithm of Edmonds and Karp.
pub struct EdmondsKarp<F> {
    /// Parent directed edge and parent node of the breadth first search.
    pred: Vec<(usize, usize)>,
    queue: VecDeque<usize>,
    /// The flow value sent in the latest run.
    value: F,
}

impl<F> EdmondsKarp<F>
where
    F: NumAssign + Signed + Ord + Copy,
{
    /// Create a new algorithm instance for networks of the size of `net`.
    pub fn new<'a, G>(net: &FlowNet<'a, G, F>) -> Self
    where
        G: IndexDigraph<'a>,
    {
        EdmondsKarp {
            pred: vec![(usize::max_value(), usize::max_value()); net.num_nodes()],
            queue: VecDeque::with_capacity(net.num_nodes()),
            value: F::zero(),
        }
    }

    /// Return the flow value sent in the latest run.
    pub fn value(&self) -> F {
        self.value
    }

    /// Augment the flow on `net` until `snk` is unreachable from `src`.
    pub fn solve<'a, G>(&mut self, net: &mut FlowNet<'a, G, F>, src: usize, snk: usize)
    where
        G: IndexDigraph<'a>,
    {
        self.run(net, src, snk, None);
    }

    /// Augment the flow on `net` by exactly `value` units.
    ///
    /// Stops as soon as `value` units have been sent in this run.
    /// Returns `false` if the value cannot be reached; the network
    /// then carries a maximum flow.
    pub fn solve_value<'a, G>(
        &mut self,
        net: &mut FlowNet<'a, G, F>,
        src: usize,
        snk: usize,
        value: F,
    ) -> bool
    where
        G: IndexDigraph<'a>,
    {
        self.run(net, src, snk, Some(value));
        self.value == value
    }

    fn run<'a, G>(&mut self, net: &mut FlowNet<'a, G, F>, src: usize, snk: usize, target: Option<F>)
    where
        G: IndexDigraph<'a>,
    {
        assert_ne!(src, snk, "Source and sink node must not be equal");

        self.value = F::zero();
        loop {
            if let Some(t) = target {
                if self.value >= t {
                    return;
                }
            }

            // bfs from source to sink over the residual network
            self.pred.fill((usize::max_value(), usize::max_value()));

            // just some dummy edge
            self.pred[src] = (0, 0);
            self.queue.clear();
            self.queue.push_back(src);
            'bfs: while let Some(u) = self.queue.pop_front() {
                for &(d, v) in net.adj(u) {
                    if self.pred[v].0 == usize::max_value() && !net.res(d).is_zero() {
                        self.pred[v] = (d, u);
                        self.queue.push_back(v);
                        if v == snk {
                            break 'bfs;
                        }
                    }
                }
            }

            // sink cannot be reached -> stop
            if self.pred[snk].0 == usize::max_value() {
                break;
            }

            // compute augmentation value
            let mut df = net.res(self.pred[snk].0);
            let mut v = snk;
            while v != src {
                let (d, u) = self.pred[v];
                df = min(df, net.res(d));
                v = u;
            }
            if let Some(t) = target {
                df = min(df, t - self.value);
            }

            debug_assert!(!df.is_zero());

            // now augment the flow
            let mut v = snk;
            while v != src {
                let (d, u) = self.pred[v];
                net.add_flow(d, df);
                v = u;
            }

            self.value += df;
        }
    }
}

/// Solve the max flow problem with the algorithm of Edmonds and Karp.
///
/// Augments the flow on `net` along shortest residual paths from
/// `src` to `snk` until no such path remains and returns the value
/// sent in this run.
pub fn edmondskarp<'a, G, F>(net: &mut FlowNet<'a, G, F>, src: usize, snk: usize) -> F
where
    G: IndexDigraph<'a>,
    F: NumAssign + Signed + Ord + Copy,
{
    let mut maxflow = EdmondsKarp::new(net);
    maxflow.solve(net, src, snk);
    maxflow.value()
}
