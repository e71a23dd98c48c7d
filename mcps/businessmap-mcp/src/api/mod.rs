//! Businessmap REST API access
//!
//! [`RestTransport`] is the seam between tool handlers and HTTP: the
//! production [`HttpTransport`] talks to the real API, tests substitute a
//! scripted implementation. [`BusinessMapClient`] maps each upstream
//! endpoint onto the transport and wraps every outcome in an [`Envelope`].

pub mod client;
pub mod envelope;
pub mod error;
pub mod transport;

pub use client::{BusinessMapClient, CardQuery, LaneChanges, NewLane};
pub use envelope::{Envelope, ErrorBody, ErrorKind};
pub use error::{ApiError, ApiResult};
pub use transport::{HttpTransport, RestTransport};
