mod adder;
mod ring_oscillator;
mod sr_latch;
mod word_input;
pub use adder::*;
pub use ring_oscillator::*;
pub use sr_latch::*;
pub use word_input::*;
