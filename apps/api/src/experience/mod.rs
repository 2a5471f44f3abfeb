// Technology experience derived from the job timeline.
// Pure functions only; callers recompute on every request.

pub mod aggregator;
pub mod format;
pub mod period;
