//! Storycase Web
//!
//! Password-gated form that turns a user story and its acceptance criteria
//! into a downloadable test case PDF.

pub mod pages;
pub mod server;

pub use server::{serve, WebServer, WebServerConfig};
