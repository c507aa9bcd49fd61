//! Unit Conversions
//!
//! A directed graph of conversion rates between units. Each node is a [`Unit`]
//! and each edge carries the factor that converts an amount in the source unit
//! into the target unit. The first edge defined for a source is its default
//! edge, used by [`UnitConverter`] when no direct edge reaches the target.

use petgraph::{
    graph::{DiGraph, EdgeIndex, NodeIndex},
    visit::EdgeRef,
};
use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use serde::Deserialize;
use smallvec::SmallVec;

use crate::units::Unit;

pub mod converter;
pub mod error;

pub use converter::{DEFAULT_MAX_HOPS, UnitConverter};
pub use error::ConversionError;

/// A directed conversion rate from one unit to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ConversionEdge {
    /// Source unit
    pub from: Unit,

    /// Target unit
    pub to: Unit,

    /// Multiplying an amount in `from` by this factor yields an amount in `to`
    pub factor: Decimal,
}

impl ConversionEdge {
    /// Creates a new conversion edge.
    pub fn new(from: Unit, to: Unit, factor: Decimal) -> Self {
        Self { from, to, factor }
    }
}

/// A direct conversion that disagrees with a two-edge path between the same units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Inconsistency {
    /// The direct edge
    pub direct: ConversionEdge,

    /// The intermediate unit of the disagreeing path
    pub via: Unit,

    /// Combined factor along the two-edge path
    pub path_factor: Decimal,
}

/// Conversion table backed by a directed graph.
#[derive(Debug, Clone, Default)]
pub struct ConversionTable {
    graph: DiGraph<Unit, Decimal>,
    nodes: FxHashMap<Unit, NodeIndex>,
    defaults: FxHashMap<NodeIndex, EdgeIndex>,
}

impl ConversionTable {
    /// Create an empty conversion table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a conversion edge.
    ///
    /// Returns `false` if an edge between the same units already exists, in which
    /// case the earlier definition is kept.
    pub fn add_edge(&mut self, edge: ConversionEdge) -> bool {
        let from = self.node(edge.from);
        let to = self.node(edge.to);

        if self.graph.find_edge(from, to).is_some() {
            return false;
        }

        let index = self.graph.add_edge(from, to, edge.factor);

        self.defaults.entry(from).or_insert(index);

        true
    }

    /// Look up the factor of a direct edge from `from` to `to`.
    pub fn direct(&self, from: Unit, to: Unit) -> Option<Decimal> {
        let from = self.nodes.get(&from)?;
        let to = self.nodes.get(&to)?;
        let edge = self.graph.find_edge(*from, *to)?;

        self.graph.edge_weight(edge).copied()
    }

    /// Look up the default (first defined) edge leaving `from`.
    pub fn default_edge(&self, from: Unit) -> Option<ConversionEdge> {
        let node = self.nodes.get(&from)?;
        let edge = self.defaults.get(node)?;

        self.edge(*edge)
    }

    /// Number of conversion edges in the table.
    pub fn len(&self) -> usize {
        self.graph.edge_count()
    }

    /// Whether the table has no edges.
    pub fn is_empty(&self) -> bool {
        self.graph.edge_count() == 0
    }

    /// Iterate over all edges in definition order.
    pub fn edges(&self) -> impl Iterator<Item = ConversionEdge> + '_ {
        self.graph.edge_indices().filter_map(|edge| self.edge(edge))
    }

    /// Find direct edges whose factor disagrees with a two-edge path between the
    /// same units.
    ///
    /// `tolerance` is relative to the direct factor, so `0.001` accepts paths
    /// within 0.1% of the direct rate. Edges whose factors overflow when combined
    /// are not compared.
    pub fn inconsistencies(&self, tolerance: Decimal) -> Vec<Inconsistency> {
        let mut found = Vec::new();

        for direct in self.graph.edge_references() {
            let (from, to) = (direct.source(), direct.target());
            let Some(allowed) = direct.weight().checked_mul(tolerance).map(|d| d.abs()) else {
                continue;
            };

            let paths: SmallVec<[(NodeIndex, Decimal); 4]> = self
                .graph
                .edges(from)
                .filter(|first| first.target() != to && first.target() != from)
                .filter_map(|first| {
                    let second = self.graph.find_edge(first.target(), to)?;
                    let second = self.graph.edge_weight(second)?;

                    Some((first.target(), first.weight().checked_mul(*second)?))
                })
                .collect();

            for (via, path_factor) in paths {
                let difference = path_factor.checked_sub(*direct.weight()).map(|d| d.abs());

                if difference.is_some_and(|difference| difference <= allowed) {
                    continue;
                }

                let (Some(direct), Some(via)) = (self.edge(direct.id()), self.unit(via)) else {
                    continue;
                };

                found.push(Inconsistency {
                    direct,
                    via,
                    path_factor,
                });
            }
        }

        found
    }

    fn node(&mut self, unit: Unit) -> NodeIndex {
        *self
            .nodes
            .entry(unit)
            .or_insert_with(|| self.graph.add_node(unit))
    }

    fn unit(&self, node: NodeIndex) -> Option<Unit> {
        self.graph.node_weight(node).copied()
    }

    fn edge(&self, edge: EdgeIndex) -> Option<ConversionEdge> {
        let (from, to) = self.graph.edge_endpoints(edge)?;
        let factor = self.graph.edge_weight(edge)?;

        Some(ConversionEdge::new(self.unit(from)?, self.unit(to)?, *factor))
    }
}

impl FromIterator<ConversionEdge> for ConversionTable {
    fn from_iter<I: IntoIterator<Item = ConversionEdge>>(iter: I) -> Self {
        let mut table = Self::new();

        for edge in iter {
            table.add_edge(edge);
        }

        table
    }
}
