// ABOUTME: Concrete tool implementations exposed to the model.
// ABOUTME: Currently the wildfire terminology lookup.

mod term_lookup;

pub use term_lookup::*;
