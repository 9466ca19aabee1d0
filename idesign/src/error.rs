/// Main error type
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum Error {
    /// A vector contains a minimum value lower than required.
    #[error("minimal value for each value in vector {vector} is {ge_value}")]
    MinValue {
        /// Vector name
        vector: &'static str,
        /// Value constraint
        dim: usize,
        /// Value at position dim
        value: usize,
        /// Required minimum value
        ge_value: usize,
    },
    /// Minimal dimensional distance requirement is violated.
    #[error(
        "min distance between vectors {vector1} and {vector2} found on dim {dim} with {distance} but should > {gt_distance}"
    )]
    MinDistanceBetweenVectors {
        /// Name of vector1.
        vector1: &'static str,
        /// Name of vector2.
        vector2: &'static str,
        /// Dimension on which the distance requirement is violated.
        dim: usize,
        /// Found distance between dim-values of vector1 and vector2.
        distance: f64,
        /// Minimal required distance.
        gt_distance: f64,
    },
    /// Two given tensors do not have the same shape.
    #[error(
        "mat {mat1} with shape {shape1:?} and {mat2} with {shape2:?} have different len on dim {dim1} and {dim2}"
    )]
    ShapeMismatch {
        /// Name of matrix 1.
        mat1: &'static str,
        /// Name of matrix .
        mat2: &'static str,
        /// Affected shape of dimension on matrix 1.
        dim1: usize,
        /// Affected shape of dimension on matrix 2.
        dim2: usize,
        /// Shape of matrix 1.
        shape1: (usize, usize),
        /// Shape of matrix 2.
        shape2: (usize, usize),
    },
    /// The quadratic model is only defined for one to four factors.
    #[error("quadratic model supports 1 to 4 factors but {factors} were requested")]
    UnsupportedFactors {
        /// Requested number of factors.
        factors: usize,
    },
    /// The design has not more runs than the model has terms.
    #[error("design with {runs} runs cannot estimate {terms} model terms, more runs are required")]
    TooFewRuns {
        /// Requested number of (unique) design runs.
        runs: usize,
        /// Number of model terms.
        terms: usize,
    },
    /// More distinct runs are requested than the candidate set holds.
    #[error("{runs} distinct runs requested but candidate set holds only {candidates} points")]
    TooManyRuns {
        /// Requested number of distinct design runs.
        runs: usize,
        /// Number of candidate points.
        candidates: usize,
    },
    /// A design refers to a point outside the candidate set.
    #[error("candidate index {index} out of range for candidate set with {candidates} points")]
    CandidateIndex {
        /// Offending candidate index.
        index: usize,
        /// Number of candidate points.
        candidates: usize,
    },
    /// A design point differs from the candidate its index names.
    #[error("design row {row} is not candidate {index} of the candidate set")]
    CandidateMismatch {
        /// Design row.
        row: usize,
        /// Candidate index stored for the row.
        index: usize,
    },
    /// A replicated design uses the same candidate for more than one point.
    #[error("replicated design uses candidate {index} more than once")]
    DuplicateCandidate {
        /// Candidate index used more than once.
        index: usize,
    },
    /// No random starting design with a full rank information matrix was found.
    #[error("no full rank starting design found within {attempts} attempts")]
    InfeasibleStart {
        /// Number of sampling attempts made.
        attempts: usize,
    },
    /// Every restart of a multi start search failed.
    #[error("all {runs} restarts failed")]
    NoSuccessfulRun {
        /// Number of restarts attempted.
        runs: usize,
    },
}

/// Main result type
pub type Result<T> = std::result::Result<T, Error>;
