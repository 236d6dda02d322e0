//! Acquire candidate routes from external route generators.
//!
//! The [`CandidateSource`] trait abstracts whatever produces raw routes near
//! a location: an HTTP route generator, a catalogue on disk, or a test stub.
//! Implementations own their clients and are handed to callers explicitly,
//! so the recommendation engine never depends on ambient state.
//!
//! An empty candidate list is a valid answer; errors are reserved for
//! failures of the source itself.

mod error;
mod provider;

pub use error::CandidateError;
pub use provider::{CandidateQuery, CandidateSource};
