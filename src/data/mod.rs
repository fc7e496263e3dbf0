//! Data sources for the demo workflow.

pub mod synthetic;

pub use synthetic::{IEC_60751_A, IEC_60751_B, IEC_60751_C, generate_samples, iec_60751};
