//! Splits a module's contact time into bounded lesson blocks.
//!
//! Blocks aim for 90 minutes and stay within 60 to 180. The last block absorbs whatever
//! rounding and clamping left over, so the durations always sum to the module total.
//! A module that only warrants one block gets the whole total, even past 180.

use crate::models::module::minutes_for_hours;

pub const PREFERRED_LESSON_MINUTES: u32 = 90;
pub const MIN_LESSON_MINUTES: u32 = 60;
pub const MAX_LESSON_MINUTES: u32 = 180;

/// Allocates lesson durations for `contact_hours` of instruction. Hours that do not
/// convert to a minute total yield no blocks.
pub fn allocate_durations(contact_hours: f64) -> Vec<u32> {
    minutes_for_hours(contact_hours)
        .map(allocate_minutes)
        .unwrap_or_default()
}

/// Allocates lesson durations for an exact minute total. Zero minutes yields no blocks.
pub fn allocate_minutes(total_minutes: u32) -> Vec<u32> {
    if total_minutes == 0 {
        return Vec::new();
    }

    let block_count = block_count_for(total_minutes);
    if block_count == 1 {
        return vec![total_minutes];
    }

    let mut durations = Vec::with_capacity(block_count);
    let mut remaining = total_minutes;

    for position in 0..block_count {
        let blocks_left = (block_count - position) as u32;
        if blocks_left == 1 {
            durations.push(remaining);
            break;
        }

        let ideal = (remaining as f64 / blocks_left as f64).round() as u32;
        let duration = ideal
            .clamp(MIN_LESSON_MINUTES, MAX_LESSON_MINUTES)
            .min(remaining);
        durations.push(duration);
        remaining -= duration;
    }

    durations
}

/// Number of blocks whose average length lands inside the allowed bounds.
fn block_count_for(total_minutes: u32) -> usize {
    let total = total_minutes as f64;
    let count = ((total / PREFERRED_LESSON_MINUTES as f64).round() as usize).max(1);
    let average = total / count as f64;

    if average > MAX_LESSON_MINUTES as f64 {
        (total / MAX_LESSON_MINUTES as f64).ceil() as usize
    } else if average < MIN_LESSON_MINUTES as f64 {
        ((total / MIN_LESSON_MINUTES as f64).floor() as usize).max(1)
    } else {
        count
    }
}
