pub mod api;
pub mod algorithm;
pub mod consts;
pub mod strength;
