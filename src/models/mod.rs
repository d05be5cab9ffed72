//! Core data models for the time tracker.
//!
//! This module contains the employee and time entry types shared by the
//! calculation, storage and presentation layers.

mod employee;
mod time_entry;

pub use employee::{Employee, Gender, MAX_NAME_LENGTH, NewEmployee};
pub use time_entry::{NewTimeEntry, TimeEntry};
