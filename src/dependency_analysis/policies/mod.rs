mod license_classification;
mod relocation_table;

pub use license_classification::LicenseClassification;
pub use relocation_table::{Relocation, RelocationTable};
