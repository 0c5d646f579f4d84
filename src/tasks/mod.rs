//! Background Tasks Module
//!
//! Contains background tasks owned by cache instances.
//!
//! # Tasks
//! - TTL Sweeper: Removes expired entries on a fixed period until stopped

mod sweeper;

pub(crate) use sweeper::Sweeper;
