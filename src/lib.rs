// Copyright (c) 2015-2023 Frank Fischer <frank-fischer@shadow-soft.de>
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

//#![forbid(unsafe_code)]

//! A library for network flow algorithms, in particular minimum cost flows.

mod num {
    pub use num_iter as iter;
    pub use num_traits as traits;
}

// # Data structures

pub mod traits;
pub use self::traits::{Digraph, Graph};
pub use self::traits::{IndexDigraph, IndexGraph};

pub mod builder;
pub use crate::builder::{Buildable, Builder};

pub mod vecgraph;
pub use self::vecgraph::VecGraph;

/// Graph classes
pub mod classes;

/// The default graph type.
///
/// A vector graph with up to 2^31 nodes and edges.
pub type Net = self::VecGraph<u32>;

pub mod collections;

pub mod flownet;
pub use self::flownet::FlowNet;

// # Algorithms

pub mod maxflow;
pub mod mcf;
pub mod mst;
