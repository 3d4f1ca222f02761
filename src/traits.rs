/*
 * Copyright (c) 2020-2023 Frank Fischer <frank-fischer@shadow-soft.de>
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

//! Traits for graph data structures.
//!
//! The traits describe graphs on two levels:
//!
//! 1. `Graph`: an undirected graph, edges have no defined source or
//!    sink.
//! 2. `Digraph`: a directed graph, each edge has a designated source
//!    and a designated sink node. Furthermore, there is the concept
//!    of "outgoing" and "incoming" edges. A `Digraph` is also a
//!    `Graph`, which basically means ignoring the direction
//!    information of the edges.
//!
//! The algorithms in this crate additionally require numbered nodes
//! and edges, described by `IndexGraph` and `IndexDigraph`. All
//! iteration is done with standard iterators borrowing the graph.

/// Base information of a graph.
pub trait GraphType<'a> {
    /// Type of a node.
    type Node: 'a + Copy + Eq;

    /// Type of an edge.
    type Edge: 'a + Copy + Eq;
}

/// A (finite) graph with a known number of nodes and edges.
///
/// Finite graphs also provide access to the list of all nodes and edges.
pub trait FiniteGraph<'a>: GraphType<'a> {
    /// Type of an iterator over all nodes.
    type NodeIt: Iterator<Item = Self::Node>;

    /// Type of an iterator over all edges.
    type EdgeIt: Iterator<Item = Self::Edge>;

    /// Return the number of nodes in the graph.
    fn num_nodes(&self) -> usize;

    /// Return the number of edges in the graph.
    fn num_edges(&self) -> usize;

    /// Return an iterator over all nodes.
    fn nodes(&'a self) -> Self::NodeIt;

    /// Return an iterator over all edges.
    ///
    /// This iterator traverses only the forward edges.
    fn edges(&'a self) -> Self::EdgeIt;

    /// Return the nodes connected by an edge.
    ///
    /// The order of the nodes is undefined.
    fn enodes(&'a self, e: Self::Edge) -> (Self::Node, Self::Node);
}

/// A (finite) directed graph with a known number of nodes and edges.
///
/// For each edge the source and the sink node may be returned.
pub trait FiniteDigraph<'a>: FiniteGraph<'a> {
    /// Return the source node of an edge.
    fn src(&'a self, e: Self::Edge) -> Self::Node;

    /// Return the sink node of an edge.
    fn snk(&'a self, e: Self::Edge) -> Self::Node;
}

/// A graph with list access to undirected incident edges.
pub trait Undirected<'a>: GraphType<'a> {
    /// Type of an iterator over all incident edges.
    type NeighIt: Iterator<Item = (Self::Edge, Self::Node)>;

    /// Return an iterator over the edges adjacent to some node.
    ///
    /// The iterator produces the incident edge together with the
    /// endpoint opposite to `u`.
    fn neighs(&'a self, u: Self::Node) -> Self::NeighIt;
}

/// A graph with list access to directed incident edges.
///
/// Note that each directed graph is also an undirected graph by
/// simply ignoring the direction of each edge. Hence, each type
/// implementing `Directed` must also implement `Undirected`.
pub trait Directed<'a>: Undirected<'a> {
    /// Type of an iterator over edges leaving a node.
    type OutIt: Iterator<Item = (Self::Edge, Self::Node)>;

    /// Type of an iterator over edges entering a node.
    type InIt: Iterator<Item = (Self::Edge, Self::Node)>;

    /// Return an iterator over the edges leaving a node.
    ///
    /// The iterator produces the leaving edge together with its sink
    /// node.
    fn outedges(&'a self, u: Self::Node) -> Self::OutIt;

    /// Return an iterator over the edges entering a node.
    ///
    /// The iterator produces the entering edge together with its
    /// source node.
    fn inedges(&'a self, u: Self::Node) -> Self::InIt;
}

/// A trait for general undirected, finite graphs.
pub trait Graph<'a>: FiniteGraph<'a> + Undirected<'a> {}

impl<'a, G> Graph<'a> for G where G: FiniteGraph<'a> + Undirected<'a> {}

/// A trait for general directed, finite graphs.
pub trait Digraph<'a>: Graph<'a> + FiniteDigraph<'a> + Directed<'a> {}

impl<'a, G> Digraph<'a> for G where G: FiniteDigraph<'a> + Directed<'a> {}

/// An item that has an index.
pub trait Indexable {
    fn index(&self) -> usize;
}

/// Associates nodes and edges with unique ids.
///
/// The ids of nodes and edges are dense, i.e. nodes are numbered
/// `0..num_nodes()` and edges `0..num_edges()`. All algorithms in
/// this crate store their per-node and per-edge state in vectors
/// indexed by these ids.
pub trait IndexGraph<'a>: Graph<'a> {
    /// Return a unique id associated with a node.
    fn node_id(&self, u: Self::Node) -> usize;

    /// Return the node associated with the given id.
    ///
    /// The method panics if the id is invalid.
    fn id2node(&'a self, id: usize) -> Self::Node;

    /// Return a unique id associated with an edge.
    ///
    /// The returned id is the same for the edge and its reverse edge.
    fn edge_id(&self, e: Self::Edge) -> usize;

    /// Return the edge associated with the given id.
    ///
    /// The method returns the forward edge.
    ///
    /// The method panics if the id is invalid.
    fn id2edge(&'a self, id: usize) -> Self::Edge;
}

/// A `Digraph` that is also an `IndexGraph`.
pub trait IndexDigraph<'a>: IndexGraph<'a> + Digraph<'a> {}

impl<'a, T> IndexDigraph<'a> for T where T: IndexGraph<'a> + Digraph<'a> {}
