#[macro_use]
pub mod graph;
pub mod circuits;
pub mod data_structures;
pub use circuits::*;
pub use graph::*;
