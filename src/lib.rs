//! Employee time tracking
//!
//! This crate records clock-in, clock-out and break entries per employee and
//! produces monthly and yearly worked-versus-target-hours reports. It covers
//! loose date/time input parsing, net-minute calculation including shifts
//! that cross midnight, duplicate-safe persistence in SQLite, and
//! aggregation against a business-day target.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod parsing;
pub mod storage;
