/*
 * Copyright (c) 2020-2022 Frank Fischer <frank-fischer@shadow-soft.de>
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

//! Traits for constructing graphs.
//!
//! The graph types in this crate are immutable once built, because
//! the algorithms address nodes and edges by dense ids that must not
//! change. A graph is therefore constructed through a [`Builder`],
//! which collects nodes and edges and is finally converted into the
//! actual graph.

/// A trait to construct graphs node by node and edge by edge.
pub trait Builder
where
    Self: Sized,
{
    /// The graph type produced by this builder.
    type Graph;

    /// The type of a node.
    type Node: Copy + Eq;

    /// The type of an edge.
    type Edge: Copy + Eq;

    /// Create an empty builder.
    fn new() -> Self {
        Self::with_capacities(0, 0)
    }

    /// Create an empty builder with preallocated memory.
    ///
    /// The arguments are hints for the expected number of nodes and
    /// edges. The builder may use them to reserve memory up front,
    /// the final graph is not restricted by them.
    fn with_capacities(nnodes: usize, nedges: usize) -> Self;

    /// Reserve memory for `nnodes` additional nodes and `nedges`
    /// additional edges.
    fn reserve(&mut self, nnodes: usize, nedges: usize);

    /// Return the number of nodes added so far.
    fn num_nodes(&self) -> usize;

    /// Return the number of edges added so far.
    fn num_edges(&self) -> usize;

    /// Add a new node and return it.
    fn add_node(&mut self) -> Self::Node;

    /// Add `n` new nodes and return them in order of creation.
    fn add_nodes(&mut self, n: usize) -> Vec<Self::Node> {
        (0..n).map(|_| self.add_node()).collect()
    }

    /// Add a new edge from `u` to `v` and return it.
    fn add_edge(&mut self, u: Self::Node, v: Self::Node) -> Self::Edge;

    /// Return a unique id of the node `u` within this builder.
    fn node2id(&self, u: Self::Node) -> usize;

    /// Return a unique id of the edge `e` within this builder.
    fn edge2id(&self, e: Self::Edge) -> usize;

    /// Consume the builder and return the finished graph.
    fn into_graph(self) -> Self::Graph;
}

/// A graph type with a default builder.
pub trait Buildable
where
    Self: Sized,
{
    /// The default builder of this graph type.
    type Builder: Builder<Graph = Self>;

    /// Create a new builder for this graph type.
    fn new_builder() -> Self::Builder {
        Self::Builder::new()
    }

    /// Build a graph by passing a builder to the closure `f`.
    ///
    /// # Example
    ///
    /// ```
    /// use flownet::{Buildable, Builder, Net};
    /// use flownet::traits::FiniteGraph;
    ///
    /// let g = Net::new_with(|b| {
    ///     let nodes = b.add_nodes(4);
    ///     b.add_edge(nodes[0], nodes[1]);
    ///     b.add_edge(nodes[1], nodes[3]);
    ///     b.add_edge(nodes[0], nodes[2]);
    ///     b.add_edge(nodes[2], nodes[3]);
    /// });
    ///
    /// assert_eq!(g.num_nodes(), 4);
    /// assert_eq!(g.num_edges(), 4);
    /// ```
    fn new_with<F>(f: F) -> Self
    where
        F: FnOnce(&mut Self::Builder),
    {
        let mut b = Self::new_builder();
        f(&mut b);
        b.into_graph()
    }
}

#[cfg(test)]
mod tests {
    use super::{Buildable, Builder};
    use crate::traits::*;
    use crate::Net;

    #[test]
    fn test_builder_ids() {
        let mut b = Net::new_builder();
        let nodes = b.add_nodes(5);
        assert_eq!(b.num_nodes(), 5);
        for (i, &u) in nodes.iter().enumerate() {
            assert_eq!(b.node2id(u), i);
        }

        let e = b.add_edge(nodes[2], nodes[4]);
        let f = b.add_edge(nodes[4], nodes[0]);
        assert_eq!(b.num_edges(), 2);
        assert_eq!(b.edge2id(e), 0);
        assert_eq!(b.edge2id(f), 1);

        let g = b.into_graph();
        assert_eq!(g.num_nodes(), 5);
        assert_eq!(g.num_edges(), 2);
        assert_eq!(g.node_id(g.src(g.id2edge(1))), 4);
        assert_eq!(g.node_id(g.snk(g.id2edge(1))), 0);
    }
}
