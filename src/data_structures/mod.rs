mod output_state;
pub use output_state::*;
