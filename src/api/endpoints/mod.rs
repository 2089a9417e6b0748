//! Route handlers.
//!
//! Each module corresponds to one surface of the service: the
//! consultation form, the stored history, the medicine-label upload,
//! and the liveness probe.

pub mod consult;
pub mod health;
pub mod medicine;
pub mod records;
