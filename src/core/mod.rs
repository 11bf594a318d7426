// @file: oi_chart/src/core/mod.rs
// @description: Exports domain logic and data structures.
// @author: LAS.

pub mod errors;
pub mod fetcher;
pub mod interfaces;
pub mod models;
pub mod windows;
