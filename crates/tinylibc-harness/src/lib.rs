//! Conformance harness for tinylibc.
//!
//! Fixtures describe a call and its expected observable result. They are
//! either written by hand (`fixtures/`) or captured from the host C library
//! ([`capture`]), then replayed against the `tinylibc-abi` entry points
//! ([`runner`]) and summarised ([`verify`], [`report`]).

pub mod capture;
pub mod fixtures;
pub mod report;
pub mod runner;
pub mod verify;

pub use fixtures::{FixtureCase, FixtureSet};
pub use report::ConformanceReport;
pub use runner::TestRunner;
pub use verify::{VerificationResult, VerificationSummary};
