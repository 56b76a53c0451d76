//! editora - marketplace backend for video-editing freelancers
//!
//! Stores users, editor profiles, portfolios, briefs and reviews in SQLite
//! and serves a multi-criteria profile search through a CLI and a small
//! REST API.

pub mod app;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod search;
pub mod server;
pub mod storage;
pub mod test_utils;

pub use error::{EditoraError, Result};
