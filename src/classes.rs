// Copyright (c) 2016-2021 Frank Fischer <frank-fischer@shadow-soft.de>
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

//! Constructors for some common graph classes.

use crate::builder::{Buildable, Builder};
use crate::traits::Graph;

/// Returns a path with `m` edges on `m + 1` nodes.
///
/// If `G` is a digraph, edge `i` runs from node `i` to node `i + 1`,
/// so the first node is the only source and the last node the only
/// sink.
pub fn path<'a, G>(m: usize) -> G
where
    G: Graph<'a> + Buildable,
{
    let mut b = G::Builder::with_capacities(m + 1, m);
    let nodes = b.add_nodes(m + 1);
    for (u, v) in nodes.iter().zip(nodes.iter().skip(1)) {
        b.add_edge(*u, *v);
    }
    b.into_graph()
}

/// Returns a cycle on `n` nodes.
///
/// If `G` is a digraph, each node `i` has exactly one outgoing edge,
/// leading to node `(i + 1) % n`.
///
/// # Example
///
/// ```
/// use flownet::classes;
/// use flownet::traits::*;
/// use flownet::Net;
///
/// let g: Net = classes::cycle(4);
/// assert_eq!(g.num_nodes(), 4);
/// assert_eq!(g.num_edges(), 4);
/// for e in g.edges() {
///     assert_eq!((g.node_id(g.src(e)) + 1) % 4, g.node_id(g.snk(e)));
/// }
/// ```
pub fn cycle<'a, G>(n: usize) -> G
where
    G: Graph<'a> + Buildable,
{
    let mut b = G::Builder::with_capacities(n, n);
    let nodes = b.add_nodes(n);
    for (u, v) in nodes.iter().zip(nodes.iter().cycle().skip(1)) {
        b.add_edge(*u, *v);
    }
    b.into_graph()
}

/// Returns a complete bipartite graph on `n + m` nodes.
///
/// The first `n` nodes form one side of the bipartition, the last `m`
/// nodes the other side, and each pair of nodes from different sides
/// is connected. If `G` is a digraph, all edges leave the first side.
pub fn complete_bipartite<'a, G>(n: usize, m: usize) -> G
where
    G: Graph<'a> + Buildable,
{
    let mut b = G::Builder::with_capacities(n + m, n * m);
    let nodes = b.add_nodes(n + m);
    for &u in &nodes[..n] {
        for &v in &nodes[n..] {
            b.add_edge(u, v);
        }
    }
    b.into_graph()
}
