//! Graphviz DOT rendering.
//!
//! Nodes are named `n0`, `n1`, ... in [`Graph::nodes`] order; edges are
//! written grouped by source node in the same order. The per-node and
//! per-edge lines can be customised with renderer callbacks.
//!
//! ```rust
//! use labeled_digraph::prelude::*;
//! let mut g: Graph<&str> = Graph::new();
//! let a = g.new_node(Some("a"), ());
//! let b = g.create_node(None, ());
//! g.new_edge(a, b, Some("x"), ());
//! let dot = DotRenderer::new().render_to_string(&g, "G").unwrap();
//! assert_eq!(
//!     dot,
//!     "digraph G {\nrankdir=\"LR\";\n  n0 [label=\"a\"];\n  n1;\n  n0 -> n1 [label=\"x\"];\n}\n"
//! );
//! ```

use std::fmt::Display;
use std::io::{self, Write};

use hashbrown::HashMap;

use crate::topology::bounds::Label;
use crate::topology::entity::{EdgeRef, NodeRef};
use crate::topology::graph::Graph;
use crate::topology::ids::NodeId;

/// Writes one node line given its DOT id.
pub type NodeRenderer<L, N, E> =
    Box<dyn Fn(&str, NodeRef<'_, L, N, E>, &mut dyn Write) -> io::Result<()>>;
/// Writes one edge line given the DOT ids of its endpoints.
pub type EdgeRenderer<L, N, E> =
    Box<dyn Fn(&str, &str, EdgeRef<'_, L, N, E>, &mut dyn Write) -> io::Result<()>>;

/// DOT writer with optional custom node and edge renderers.
pub struct DotRenderer<L, N = (), E = ()> {
    node_renderer: Option<NodeRenderer<L, N, E>>,
    edge_renderer: Option<EdgeRenderer<L, N, E>>,
}

impl<L, N, E> Default for DotRenderer<L, N, E> {
    fn default() -> Self {
        DotRenderer {
            node_renderer: None,
            edge_renderer: None,
        }
    }
}

/// `  id [label="<label>"];` or `  id;` for unlabeled nodes.
pub fn default_node_render<L: Display, N, E>(
    id: &str,
    node: NodeRef<'_, L, N, E>,
    out: &mut dyn Write,
) -> io::Result<()> {
    match node.label() {
        Some(label) => writeln!(out, "  {id} [label=\"{label}\"];"),
        None => writeln!(out, "  {id};"),
    }
}

/// `  from -> to [label="<label>"];` or `  from -> to;` for unlabeled edges.
pub fn default_edge_render<L: Display, N, E>(
    from: &str,
    to: &str,
    edge: EdgeRef<'_, L, N, E>,
    out: &mut dyn Write,
) -> io::Result<()> {
    match edge.label() {
        Some(label) => writeln!(out, "  {from} -> {to} [label=\"{label}\"];"),
        None => writeln!(out, "  {from} -> {to};"),
    }
}

impl<L, N, E> DotRenderer<L, N, E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_node_renderer<F>(mut self, f: F) -> Self
    where
        F: Fn(&str, NodeRef<'_, L, N, E>, &mut dyn Write) -> io::Result<()> + 'static,
    {
        self.node_renderer = Some(Box::new(f));
        self
    }

    pub fn with_edge_renderer<F>(mut self, f: F) -> Self
    where
        F: Fn(&str, &str, EdgeRef<'_, L, N, E>, &mut dyn Write) -> io::Result<()> + 'static,
    {
        self.edge_renderer = Some(Box::new(f));
        self
    }
}

impl<L: Label + Display, N, E> DotRenderer<L, N, E> {
    fn render_node(&self, id: &str, node: NodeRef<'_, L, N, E>, out: &mut dyn Write) -> io::Result<()> {
        match &self.node_renderer {
            Some(f) => f(id, node, out),
            None => default_node_render(id, node, out),
        }
    }

    fn render_edge(
        &self,
        from: &str,
        to: &str,
        edge: EdgeRef<'_, L, N, E>,
        out: &mut dyn Write,
    ) -> io::Result<()> {
        match &self.edge_renderer {
            Some(f) => f(from, to, edge, out),
            None => default_edge_render(from, to, edge, out),
        }
    }

    /// Writes `graph` as a DOT digraph called `name`.
    pub fn render<W: Write>(&self, graph: &Graph<L, N, E>, name: &str, out: &mut W) -> io::Result<()> {
        writeln!(out, "digraph {name} {{")?;
        writeln!(out, "rankdir=\"LR\";")?;

        let nodes: Vec<NodeRef<'_, L, N, E>> = graph.nodes().collect();
        let mut ids: HashMap<NodeId, String> = HashMap::with_capacity(nodes.len());
        for (i, node) in nodes.iter().enumerate() {
            let id = format!("n{i}");
            self.render_node(&id, *node, out)?;
            ids.insert(node.id(), id);
        }
        for node in &nodes {
            for edge in node.out_edges() {
                let Some((from, to)) = edge.endpoint_ids() else {
                    continue;
                };
                let (Some(from), Some(to)) = (ids.get(&from), ids.get(&to)) else {
                    continue;
                };
                self.render_edge(from, to, edge, out)?;
            }
        }

        writeln!(out, "}}")
    }

    /// Renders into a `String`.
    pub fn render_to_string(&self, graph: &Graph<L, N, E>, name: &str) -> io::Result<String> {
        let mut buf = Vec::new();
        self.render(graph, name, &mut buf)?;
        String::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}
