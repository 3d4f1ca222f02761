// Copyright (c) 2016-2022 Frank Fischer <frank-fischer@shadow-soft.de>
//
// This program is free software: you can redistribute it and/or
// modify it under the terms of the GNU General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful, but
// WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
// General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see  <http://www.gnu.org/licenses/>
//

//! Implementation of Kruskal's algorithm for minimum spanning trees.

use crate::collections::DisjointSets;
use crate::traits::IndexGraph;

/// Run Kruskal's algorithm to solve the *Minimum Spanning Tree*
/// problem on a graph.
///
/// * `g` is the undirected graph, `weights` the edge weights
///
/// The algorithm actually solves a minimum spanning *forest* problem
/// if the graph is not connected. This can easily be verified by
/// checking the number of returned edges.
///
/// # Example
///
/// ```
/// use flownet::mst::kruskal;
/// use flownet::traits::*;
/// use flownet::{Buildable, Builder, Net};
///
/// let g = Net::new_with(|b| {
///     let n = b.add_nodes(5);
///     b.add_edge(n[0], n[1]);
///     b.add_edge(n[1], n[2]);
///     b.add_edge(n[0], n[2]);
///     b.add_edge(n[2], n[3]);
///     b.add_edge(n[3], n[4]);
///     b.add_edge(n[2], n[4]);
/// });
/// let weights = vec![1, 2, 3, 4, 5, 7];
///
/// let tree = kruskal(&g, |e| weights[g.edge_id(e)]);
///
/// assert_eq!(tree.len(), 4);
/// assert_eq!(tree.iter().map(|&e| weights[g.edge_id(e)]).sum::<i32>(), 12);
/// ```
pub fn kruskal<'a, G, W, F>(g: &'a G, weights: F) -> Vec<G::Edge>
where
    G: IndexGraph<'a>,
    W: Ord,
    F: Fn(G::Edge) -> W,
{
    let mut edges: Vec<_> = g.edges().collect();
    edges.sort_by_key(|&e| weights(e));

    let mut comps = DisjointSets::new(g.num_nodes());
    let mut tree = Vec::with_capacity(g.num_nodes().saturating_sub(1));

    for e in edges {
        let (u, v) = g.enodes(e);
        let uroot = comps.find(g.node_id(u));
        let vroot = comps.find(g.node_id(v));
        if uroot != vroot {
            tree.push(e);
            comps.link(uroot, vroot);
            if comps.num_sets() == 1 {
                break;
            }
        }
    }

    tree
}
