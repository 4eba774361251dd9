//! Transport layer for the Todoist SDK.

pub mod http;

pub use http::HttpTransport;
