mod coordinate_matcher;
mod redundancy_detector;

pub use coordinate_matcher::{CoordinateMatcher, GlobPattern};
pub use redundancy_detector::RedundancyDetector;
