//! Inbound adapters: HTTP server, request handlers, CSV import reader.

pub mod handlers;
pub mod import;
pub mod server;

pub use server::HttpServer;
