//! Next arrivals at a transit stop.
//!
//! Answers: "what is arriving next at this stop, on which route, in which
//! direction, and in how many minutes?" by merging MBTA real-time
//! predictions with scheduled times.

pub mod aggregate;
pub mod board;
pub mod cache;
pub mod clock;
pub mod config;
pub mod domain;
pub mod error;
pub mod fetcher;
pub mod mbta;
pub mod resolver;


pub use board::NextArrivals;
pub use error::Error;
