// ABOUTME: Tunable constants shared by the sampler, interpreter and dataset dedup

/// Inclusive lower bound on a freshly-sampled integer input.
pub const INPUT_MIN: i64 = -256;
/// Inclusive upper bound on a freshly-sampled integer input.
pub const INPUT_MAX: i64 = 255;

/// Inclusive lower bound an accepted example's integer values must satisfy.
pub const INTEGER_MIN: i64 = -256;
/// Inclusive upper bound an accepted example's integer values must satisfy.
pub const INTEGER_MAX: i64 = 255;

/// Default upper bound used for a list's length when unconstrained.
pub const LIST_LENGTH: usize = 20;

/// Number of examples that make up one dataset "bundle".
pub const EXAMPLE_NUM: usize = 5;
