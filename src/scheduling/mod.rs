//! Scheduling core: time encoding, day validation, and room status
//! derivation.

mod day;
pub mod status;
mod time;

pub use day::Weekday;
pub use status::{RoomStatus, StatusReport};
pub use time::time_to_minutes;

/// Half-open interval overlap test.
///
/// `[s1, e1)` and `[s2, e2)` conflict iff `s1 < e2 && s2 < e1`; two entries
/// that merely share a boundary instant do not conflict, so a 9:00-10:00
/// class and a 10:00-11:00 class can coexist.
pub fn overlaps(s1: u32, e1: u32, s2: u32, e2: u32) -> bool {
    s1 < e2 && s2 < e1
}
