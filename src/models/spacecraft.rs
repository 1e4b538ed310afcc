//! Spacecraft and launch vehicle models, organized by engineering domain.

pub mod propulsion;
