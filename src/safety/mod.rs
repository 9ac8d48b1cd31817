//! Safety heuristics: keyword threat scan and crisis phrase detection

pub mod crisis;
pub mod threat_scan;

pub use crisis::{CrisisEnvelope, CrisisMatch};
pub use threat_scan::ScanResult;
