//! In-memory task and category stores with simulated latency.
//!
//! # Overview
//! Implements `taskflow_core::TaskService` and `CategoryService` over owned
//! collections. Each store keeps its rows behind a `tokio::sync::RwLock`
//! and sleeps for a configurable latency before every operation takes
//! effect, standing in for a remote API.
//!
//! # Design
//! - Every value returned is a clone; callers can mutate it freely.
//! - Ids are assigned under the write lock from a high-water mark, so they
//!   increase monotonically and are never reused.
//! - Lookups accept anything implementing `IntoId`; values that are not an
//!   id at all are reported as `NotFound`.

pub mod category;
pub mod delay;
pub mod seed;
pub mod task;
mod table;

pub use category::CategoryStore;
pub use delay::{delay, Latency, LatencyProfile};
pub use seed::{Seed, SeedError};
pub use task::TaskStore;
