//! Minimal GraphML reader for round-trip assertions.
//!
//! Understands only the self-closing `<node id=".."/>` and
//! `<edge source=".." target=".."/>` elements that topogen writes, plus the
//! enclosing `graphml` and `graph` elements.

use std::collections::BTreeSet;

use thiserror::Error;

/// Nodes and undirected edges recovered from a graph description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedGraph {
    /// Node identifiers in document order.
    pub nodes: Vec<usize>,
    /// Edges in document order, as written.
    pub edges: Vec<(usize, usize)>,
    /// Value of the `edgedefault` attribute on the `graph` element.
    pub edge_default: Option<String>,
}

impl ParsedGraph {
    /// Returns the edges normalised so the smaller endpoint comes first.
    #[must_use]
    pub fn edge_set(&self) -> BTreeSet<(usize, usize)> {
        self.edges
            .iter()
            .map(|&(source, target)| (source.min(target), source.max(target)))
            .collect()
    }
}

/// Errors raised when a document does not match the expected shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphmlParseError {
    /// A required attribute was missing from an element.
    #[error("line {line}: `{element}` element lacks `{attribute}`")]
    MissingAttribute {
        /// One-based line number.
        line: usize,
        /// Element name.
        element: &'static str,
        /// Attribute name.
        attribute: &'static str,
    },
    /// An identifier was not a decimal integer.
    #[error("line {line}: `{value}` is not a node identifier")]
    InvalidIdentifier {
        /// One-based line number.
        line: usize,
        /// Offending attribute value.
        value: String,
    },
    /// The root or graph element was never closed.
    #[error("document ends without closing `{element}`")]
    Unterminated {
        /// Element left open.
        element: &'static str,
    },
}

/// Parses a topogen graph description.
///
/// # Errors
/// Returns [`GraphmlParseError`] when an element lacks an attribute, an
/// identifier is not numeric, or the document is not closed.
///
/// # Examples
/// ```
/// use topogen_test_support::graphml::parse_graphml;
///
/// let doc = r#"<graphml><graph id="G" edgedefault="undirected">
/// <node id="0"/><node id="1"/>
/// <edge source="0" target="1"/>
/// </graph></graphml>"#;
/// let parsed = parse_graphml(doc)?;
/// assert_eq!(parsed.nodes, vec![0, 1]);
/// assert_eq!(parsed.edges, vec![(0, 1)]);
/// # Ok::<(), topogen_test_support::graphml::GraphmlParseError>(())
/// ```
pub fn parse_graphml(document: &str) -> Result<ParsedGraph, GraphmlParseError> {
    let mut parsed = ParsedGraph::default();
    let mut closed_graph = false;
    let mut closed_root = false;

    for (index, line) in document.lines().enumerate() {
        let line_number = index + 1;
        for element in line.split('<').skip(1) {
            let element = element.trim_end();
            if element.starts_with("node ") {
                let id = attribute(element, "id").ok_or(GraphmlParseError::MissingAttribute {
                    line: line_number,
                    element: "node",
                    attribute: "id",
                })?;
                parsed.nodes.push(identifier(id, line_number)?);
            } else if element.starts_with("edge ") {
                let source = required(element, "edge", "source", line_number)?;
                let target = required(element, "edge", "target", line_number)?;
                parsed.edges.push((source, target));
            } else if element.starts_with("graph ") {
                parsed.edge_default = attribute(element, "edgedefault").map(str::to_owned);
            } else if element.starts_with("/graph>") {
                closed_graph = true;
            } else if element.starts_with("/graphml>") {
                closed_root = true;
            }
        }
    }

    if !closed_graph {
        return Err(GraphmlParseError::Unterminated { element: "graph" });
    }
    if !closed_root {
        return Err(GraphmlParseError::Unterminated { element: "graphml" });
    }
    Ok(parsed)
}

fn required(
    element: &str,
    name: &'static str,
    key: &'static str,
    line: usize,
) -> Result<usize, GraphmlParseError> {
    let value = attribute(element, key).ok_or(GraphmlParseError::MissingAttribute {
        line,
        element: name,
        attribute: key,
    })?;
    identifier(value, line)
}

fn attribute<'a>(element: &'a str, key: &str) -> Option<&'a str> {
    let needle = format!(" {key}=\"");
    let start = element.find(&needle)? + needle.len();
    let rest = element.get(start..)?;
    let end = rest.find('"')?;
    rest.get(..end)
}

fn identifier(value: &str, line: usize) -> Result<usize, GraphmlParseError> {
    value
        .parse()
        .map_err(|_| GraphmlParseError::InvalidIdentifier {
            line,
            value: value.to_owned(),
        })
}
