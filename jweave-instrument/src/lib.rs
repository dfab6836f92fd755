//! Probe synthesis: builds and splices tracing instructions into method
//! bodies.
//!
//! The entry point is [`Instrumenter::instrument`], invoked once per method
//! per pass. Each probe prints a message carrying one of the tags in
//! [`probe`]; the tag text is a wire contract for downstream log consumers.

pub mod coerce;
pub mod concat;
pub mod config;
pub mod error;
pub mod filter;
pub mod fragment;
pub mod orchestrator;
pub mod print;
pub mod probe;
pub mod temp;

pub use config::InstrumentConfig;
pub use error::{Error, Result};
pub use filter::Blacklist;
pub use orchestrator::{Instrumenter, RunSummary};
pub use probe::{ACTIVITY_TAG, CONTROL_TAG, FRAGMENT_TAG, METHOD_TAG, ProbeSynthesizer};
pub use temp::TempAllocator;
