//! httpx Domain - Core pipeline types
//!
//! This crate defines the request/response model and the named steps
//! (builders and assertions) that the httpx pipeline applies.
//! All types here are pure Rust with no I/O.

pub mod error;
pub mod exchange;
pub mod naming;
pub mod status;
pub mod step;

pub use error::{AssertionError, AssertionResult, BoxError, BuildError, BuildResult};
pub use exchange::{Request, RequestContext, Response, new_request};
pub use naming::{function_name, name_of};
pub use status::StatusExpectation;
pub use step::{Assertion, RequestBuilder};
pub use tokio_util::sync::CancellationToken;
