//! Row types for the `ideas` and `applications` tables and their conversion
//! into domain records.

pub mod application;
pub mod idea;
