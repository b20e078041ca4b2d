//! GraphML serialization of generated topologies.
//!
//! The output frames every node and each undirected edge once inside a
//! single `<graph edgedefault="undirected">` element. Node identifiers are
//! the decimal node indices.

use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use tempfile::{Builder, NamedTempFile};
use tracing::{debug, instrument};

use crate::{Result, adjacency::AdjacencyMatrix, error::TopologyError};

const HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<graphml xmlns="http://graphml.graphdrawing.org/xmlns"
    xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
    xsi:schemaLocation="http://graphml.graphdrawing.org/xmlns
     http://graphml.graphdrawing.org/xmlns/1.0/graphml.xsd">
  <graph id="G" edgedefault="undirected">
"#;

const FOOTER: &str = "  </graph>\n</graphml>\n";

/// Renders `graph` as GraphML into `writer`.
///
/// Nodes are emitted in ascending order followed by edges in row-major
/// `(i, j)` order with `i < j`.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// use topogen_core::{AdjacencyMatrix, render_graphml};
///
/// let mut graph = AdjacencyMatrix::new(2);
/// graph.connect(0, 1)?;
/// let mut buffer = Vec::new();
/// render_graphml(&graph, &mut buffer)?;
/// let text = String::from_utf8(buffer)?;
/// assert!(text.contains(r#"<node id="1"/>"#));
/// assert!(text.contains(r#"<edge source="0" target="1"/>"#));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn render_graphml(graph: &AdjacencyMatrix, mut writer: impl Write) -> io::Result<()> {
    writer.write_all(HEADER.as_bytes())?;
    for node in 0..graph.node_count() {
        writeln!(writer, r#"    <node id="{node}"/>"#)?;
    }
    for (source, target) in graph.edges() {
        writeln!(writer, r#"    <edge source="{source}" target="{target}"/>"#)?;
    }
    writer.write_all(FOOTER.as_bytes())?;
    Ok(())
}

/// Writes `graph` as GraphML to `path`.
///
/// The document is staged in a temporary file beside `path` and only renamed
/// into place once fully flushed, so a failed write never leaves a truncated
/// file at the destination. The staging file is removed on every error path.
///
/// A replaced destination keeps its permissions. A new file receives the
/// permissions of a plain create, `0o666` less the process umask on Unix.
///
/// # Errors
/// Returns [`TopologyError::Io`] when the destination directory cannot be
/// written, rendering fails, or the final rename fails.
#[instrument(name = "write_graphml", skip(graph), fields(nodes = graph.node_count()))]
pub fn write_graphml(graph: &AdjacencyMatrix, path: &Path) -> Result<()> {
    let io_error = |source: io::Error| TopologyError::Io {
        path: path.to_path_buf(),
        source,
    };

    let directory = staging_directory(path);
    let staging = staging_file(&directory).map_err(io_error)?;
    let mut writer = BufWriter::new(staging);
    render_graphml(graph, &mut writer).map_err(io_error)?;
    let staged = writer
        .into_inner()
        .map_err(|err| io_error(err.into_error()))?;
    preserve_permissions(path, staged.as_file()).map_err(io_error)?;
    staged.as_file().sync_all().map_err(io_error)?;
    staged.persist(path).map_err(|err| io_error(err.error))?;

    debug!(path = %path.display(), edges = graph.edge_count(), "wrote graph description");
    Ok(())
}

#[cfg(unix)]
fn staging_file(directory: &Path) -> io::Result<NamedTempFile> {
    use std::os::unix::fs::PermissionsExt;

    // The requested mode is masked by the umask, as for any new file.
    Builder::new()
        .permissions(fs::Permissions::from_mode(0o666))
        .tempfile_in(directory)
}

#[cfg(not(unix))]
fn staging_file(directory: &Path) -> io::Result<NamedTempFile> {
    Builder::new().tempfile_in(directory)
}

fn preserve_permissions(path: &Path, staged: &File) -> io::Result<()> {
    match fs::metadata(path) {
        Ok(existing) => staged.set_permissions(existing.permissions()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err),
    }
}

fn staging_directory(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
