//! HTTP adapter for the blog admin backend.

mod client;

pub use client::HttpBlogBackend;
