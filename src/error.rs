use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for construction, configuration loading and collision geometry.
///
/// Construction errors are surfaced immediately and never recovered internally.
/// `DegenerateGeometry` is raised per pair during collision resolution and is
/// always handled by the resolver itself; stepping never returns it.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid user or API parameter.
    #[error("invalid parameter: {0}")]
    InvalidParam(String),

    /// Per-particle arrays disagree on the particle count.
    #[error("length mismatch: {what} has {found} entries, expected {expected}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    /// A pair refers to a particle index the system does not have.
    #[error("pair ({i}, {j}) out of range for {len} particles")]
    PairOutOfRange { i: usize, j: usize, len: usize },

    /// A matrix does not have the shape its partner requires.
    #[error("shape mismatch: {what} is {found:?}, expected {expected:?}")]
    ShapeMismatch {
        what: &'static str,
        expected: (usize, usize),
        found: (usize, usize),
    },

    /// Two particle centers coincide, so the line of centers is undefined.
    #[error("degenerate contact: particles {i} and {j} have coincident centers")]
    DegenerateGeometry { i: usize, j: usize },

    /// Malformed scenario document.
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    /// Propagated I/O errors (e.g., reading a scenario file).
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
