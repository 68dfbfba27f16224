//! HTTP transport for remote survey data.
//!
//! The choices resolver only needs "issue one GET, get back a status and a
//! body". [`HttpTransport`] is that seam; [`UreqTransport`] implements it on top
//! of a blocking `ureq::Agent`, and [`mock::MockTransport`] serves scripted
//! responses for tests.

pub mod http;
pub mod mock;

pub use http::{HttpRequest, HttpResponse, HttpTransport, UreqTransport};
pub use mock::MockTransport;
