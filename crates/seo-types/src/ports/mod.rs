//! Port interfaces for dependency inversion.
//!
//! Backend-agnostic trait definitions; concrete adapters live in `seo-fetch`.

pub mod http;

pub use http::{HttpClient, HttpRequest, HttpResponse};
