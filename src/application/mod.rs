/// Application layer - the pipeline, the analyses it drives and their DTOs
///
/// This layer orchestrates domain services and reaches infrastructure only
/// through ports.
pub mod dto;
pub mod pipeline;
pub mod services;
pub mod use_cases;

pub use pipeline::Pipeline;
