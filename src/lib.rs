//! Passive Tree Library
//!
//! This library provides the bundled passive skill tree documents (node
//! positions and node tooltips) behind a typed accessor, along with the
//! scanner geometry that produces those documents from detected circles.

// Module declarations
pub mod cli;
pub mod config;
pub mod constants;
pub mod scanner;
pub mod tree_data;

pub use tree_data::{load_data, TreeData};
