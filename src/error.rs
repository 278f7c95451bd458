use thiserror::Error;

/// Top-level error type for hull construction.
#[derive(Debug, Error)]
pub enum HullError {
    #[error(transparent)]
    Degenerate(#[from] DegenerateInputError),

    #[error(transparent)]
    Invariant(#[from] InvariantViolation),

    #[error(transparent)]
    Precondition(#[from] PreconditionError),
}

/// The input admits no 3D hull.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DegenerateInputError {
    #[error("need at least {required} distinct points, found {found}")]
    TooFewPoints { required: usize, found: usize },

    #[error("point {index} has a non-finite coordinate")]
    NonFinite { index: usize },

    #[error("all points are collinear")]
    Collinear,

    #[error("all points are coplanar")]
    Coplanar,
}

/// A geometric invariant broke during construction.
///
/// Signals a bug or a pathological epsilon; the construction is aborted.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvariantViolation {
    #[error("no valid third point for edge ({from}, {to})")]
    NoWrapCandidate { from: usize, to: usize },

    #[error("directed edge ({from}, {to}) is already owned by another face")]
    EdgeAlreadyOwned { from: usize, to: usize },

    #[error("horizon edge ({from}, {to}) has no neighbouring face")]
    OpenEdge { from: usize, to: usize },

    #[error("point {point} lies {distance} outside face {face:?}")]
    PointOutsideFace {
        point: usize,
        face: [usize; 3],
        distance: f64,
    },

    #[error("face not found: {0}")]
    FaceNotFound(String),
}

/// The caller asked for something the current state cannot do.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PreconditionError {
    #[error("construction has already finished")]
    Finished,

    #[error("no construction in progress; call reset first")]
    NotInitialized,

    #[error("need at least 4 points, requested {0}")]
    TooFewPoints(usize),

    #[error("invalid configuration: {parameter} = {value}")]
    InvalidConfig { parameter: &'static str, value: f64 },
}

/// Convenience type alias for results using [`HullError`].
pub type Result<T> = std::result::Result<T, HullError>;
