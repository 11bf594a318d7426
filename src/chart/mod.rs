// @file: oi_chart/src/chart/mod.rs
// @description: Figure model, composition from assembled tables, and HTML output.
// @author: LAS.

pub mod composer;
pub mod figure;
pub mod render;
