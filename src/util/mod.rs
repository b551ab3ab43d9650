//! Host-side helpers.

/// Resize rate limiting.
pub mod throttle;

pub use throttle::ResizeThrottle;
