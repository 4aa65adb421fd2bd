//! Tuning constants for the Pictor state core.
//!
//! Centralized so behaviour knobs are easy to find and adjust.

/// Navigation and preload behaviour.
pub mod navigation {
    /// How many sections past the current one to request when forward
    /// navigation crosses a section boundary. With a lookahead of 2 the
    /// prefetch stays one section ahead of the furthest loaded point.
    pub const PRELOAD_LOOKAHEAD_SECTIONS: usize = 2;
}
