#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![doc = include_str!("../../README.md")]
mod candidate_set;
mod error;
mod exact_design;
mod grid;
mod multi_start;
mod optimality;
mod point_exchange;
mod quadratic_model;
mod region_moments;
mod replication;
mod starting_design;
mod utils;

pub use candidate_set::CandidateSet;
pub use error::{Error, Result};
pub use exact_design::ExactDesign;
pub use grid::Grid;
pub use multi_start::{DesignSize, MultiStart, RunRecord, SearchReport};
pub use optimality::{IOptimality, Optimality};
pub use point_exchange::{ExchangeCriteria, ExchangeOutcome, PointExchange, StopReason};
pub use quadratic_model::{QuadraticModel, QuadraticTerm, number_of_terms, quadratic_exponents};
pub use region_moments::region_moments;
pub use replication::Replication;
pub use starting_design::{StartOptions, random_design, random_replicated_design};
pub use utils::{MatrixDRows, numerical_rank};
