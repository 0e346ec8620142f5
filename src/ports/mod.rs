/// Ports module defining interfaces for hexagonal architecture
///
/// Inbound ports are implemented by the analyses and driven by the pipeline;
/// outbound ports are implemented by adapters and used by the analyses.
pub mod inbound;
pub mod outbound;
