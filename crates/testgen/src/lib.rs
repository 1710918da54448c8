//! Random relation schemas for testing and benchmarking.

pub mod generator;
