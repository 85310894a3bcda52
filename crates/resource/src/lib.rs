//! Resource providers for the Inspecta report engine.
//!
//! This crate provides platform-specific implementations of the
//! `ResourceProvider` trait from inspecta-traits.
//!
//! ## Available Providers
//!
//! - [`FilesystemResourceProvider`]: Loads resources from the local filesystem
//! - [`HttpResourceProvider`]: Issues an HTTP GET per resource
//! - [`RoutingResourceProvider`]: Sends `http(s)://` references to HTTP and
//!   everything else to the filesystem
//!
//! ## Re-exports
//!
//! - [`InMemoryResourceProvider`]: Pre-populated in-memory storage

mod filesystem;
mod http;
mod routing;

pub use filesystem::FilesystemResourceProvider;
pub use http::HttpResourceProvider;
pub use routing::RoutingResourceProvider;

pub use inspecta_traits::InMemoryResourceProvider;
