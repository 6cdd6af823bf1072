//! Monotonic millisecond clock arithmetic
//!
//! The simulator clock is a wrapping 32-bit millisecond counter. Every
//! comparison goes through these helpers so that a deadline set just before
//! the counter wraps still fires just after it.

/// Milliseconds on the wrapping simulator clock
pub type Millis = u32;

/// Deadline `delta` milliseconds after `now`
pub fn after(now: Millis, delta: u32) -> Millis {
    now.wrapping_add(delta)
}

/// Whether `now` is at or past `deadline`
///
/// Valid as long as the two instants are less than ~24.8 days apart.
pub fn deadline_reached(now: Millis, deadline: Millis) -> bool {
    (now.wrapping_sub(deadline) as i32) >= 0
}

/// Milliseconds from `earlier` to `now`
pub fn elapsed(now: Millis, earlier: Millis) -> u32 {
    now.wrapping_sub(earlier)
}
