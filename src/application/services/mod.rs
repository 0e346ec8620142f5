mod closure_resolver;

pub use closure_resolver::{ClosureResolver, MAX_RESOLUTION_DEPTH};
