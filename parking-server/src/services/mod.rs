//! Services
//!
//! - [`http`] - router assembly and HTTP serving

pub mod http;
