//! Code Runner - an endless-runner game engine.
//!
//! The library holds the whole simulation and its persistence so it can be
//! driven headless from tests. The terminal shell lives in the binary.

pub mod config;
pub mod core;
pub mod daily;
pub mod modes;
pub mod obstacles;
pub mod physics;
pub mod power_ups;
pub mod scoring;
pub mod session;
pub mod simulator;
pub mod storage;
pub mod utils;
