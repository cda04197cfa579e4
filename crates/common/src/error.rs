use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Indicates an attempt to access a node index that exceeds the graph size (N).
    NodeIndexOutOfBounds(usize),

    /// An edge record carries a negative, NaN or infinite weight.
    InvalidWeight { from: usize, to: usize, weight: f64 },

    /// No adjacency entry `from -> to` exists to be removed.
    EdgeNotFound { from: usize, to: usize },

    /// The target cannot be reached from the source.
    Unreachable { source: usize, target: usize },

    /// The ranked store holds no entries.
    EmptyStore,

    /// The ranked store holds fewer distinct distances than the query needs.
    InsufficientCandidates { requested: usize, available: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::NodeIndexOutOfBounds(n) => write!(f, "Node index {} is out of bounds.", n),

            Error::InvalidWeight { from, to, weight } => write!(
                f,
                "Edge {} -> {} has invalid weight {} (weights must be finite and non-negative).",
                from, to, weight
            ),

            Error::EdgeNotFound { from, to } => {
                write!(f, "No edge {} -> {} found in the adjacency list.", from, to)
            }

            Error::Unreachable { source, target } => {
                write!(f, "Target {} is unreachable from source {}.", target, source)
            }

            Error::EmptyStore => write!(f, "Ranked store is empty."),

            Error::InsufficientCandidates {
                requested,
                available,
            } => write!(
                f,
                "Requested {} ranked candidates but only {} are available.",
                requested, available
            ),
        }
    }
}

impl std::error::Error for Error {}
