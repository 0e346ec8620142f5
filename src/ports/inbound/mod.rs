/// Inbound ports (driving ports)
///
/// The pipeline drives every analysis through this interface.
pub mod scanning_analysis;

pub use scanning_analysis::ScanningAnalysis;
