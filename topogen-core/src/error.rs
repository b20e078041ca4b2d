//! Error types for the topogen core library.
//!
//! Defines the error enum exposed by the public API, its stable codes, and a
//! convenient result alias.

use std::{fmt, io, path::PathBuf};

use thiserror::Error;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// Error type produced while configuring, generating, or writing a topology.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum TopologyError {
    /// Node count must be greater than zero.
    #[error("node_count must be at least 1 (got {got})")]
    InvalidNodeCount {
        /// The invalid node count supplied by the caller.
        got: usize,
    },
    /// Node count is too large for its adjacency table to be addressed.
    #[error("node_count must not exceed {max} (got {got})")]
    NodeCountTooLarge {
        /// The node count supplied by the caller.
        got: usize,
        /// Largest supported node count.
        max: usize,
    },
    /// Edge probability must lie within `[0, 1]`.
    #[error("edge_probability must lie within [0, 1] (got {got})")]
    InvalidEdgeProbability {
        /// The invalid probability supplied by the caller.
        got: f64,
    },
    /// A node index exceeded the graph bounds.
    #[error("node {index} is out of bounds for a graph of {node_count} nodes")]
    NodeOutOfBounds {
        /// The offending node index.
        index: usize,
        /// Number of nodes in the graph.
        node_count: usize,
    },
    /// An edge would have connected a node to itself.
    #[error("refusing to add a self-loop on node {node}")]
    SelfLoop {
        /// Node named by both endpoints.
        node: usize,
    },
    /// The component list handed to the repairer contained an empty entry.
    #[error("component at position {position} contains no nodes")]
    EmptyComponent {
        /// Position of the empty component in the list.
        position: usize,
    },
    /// Writing the graph description failed.
    #[error("failed to write `{path}`: {source}")]
    Io {
        /// Destination that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
}

define_error_codes! {
    /// Stable codes describing [`TopologyError`] variants.
    enum TopologyErrorCode for TopologyError {
        /// Node count must be greater than zero.
        InvalidNodeCount => InvalidNodeCount { .. } => "TOPOGEN_INVALID_NODE_COUNT",
        /// Node count is too large for its adjacency table.
        NodeCountTooLarge => NodeCountTooLarge { .. } => "TOPOGEN_NODE_COUNT_TOO_LARGE",
        /// Edge probability must lie within `[0, 1]`.
        InvalidEdgeProbability => InvalidEdgeProbability { .. } => "TOPOGEN_INVALID_EDGE_PROBABILITY",
        /// A node index exceeded the graph bounds.
        NodeOutOfBounds => NodeOutOfBounds { .. } => "TOPOGEN_NODE_OUT_OF_BOUNDS",
        /// An edge would have connected a node to itself.
        SelfLoop => SelfLoop { .. } => "TOPOGEN_SELF_LOOP",
        /// The component list contained an empty entry.
        EmptyComponent => EmptyComponent { .. } => "TOPOGEN_EMPTY_COMPONENT",
        /// Writing the graph description failed.
        Io => Io { .. } => "TOPOGEN_IO",
    }
}

impl TopologyError {
    /// Returns `true` when the error stems from invalid generation parameters.
    ///
    /// Configuration errors are raised before any sampling takes place.
    ///
    /// # Examples
    /// ```
    /// use topogen_core::TopologyError;
    ///
    /// assert!(TopologyError::InvalidNodeCount { got: 0 }.is_configuration());
    /// assert!(!TopologyError::SelfLoop { node: 3 }.is_configuration());
    /// ```
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::InvalidNodeCount { .. }
                | Self::NodeCountTooLarge { .. }
                | Self::InvalidEdgeProbability { .. }
        )
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, TopologyError>;
