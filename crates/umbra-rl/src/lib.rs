//! Roguelike sight utilities for umbra: cost-bounded ray propagation.

pub mod fov;

pub use fov::{FOV, LightNode, Lighter};
