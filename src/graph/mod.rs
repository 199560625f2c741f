#[macro_use]
mod gate;
mod handles;
mod network;
mod step;
pub use gate::*;
pub use handles::*;
pub use network::*;
pub use step::*;
