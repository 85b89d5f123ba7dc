//! Small editing helpers shared by the form panels.

use std::ops::RangeInclusive;

/// Append a typed character, ignoring control characters.
pub fn push(buffer: &mut String, c: char) {
    if !c.is_control() {
        buffer.push(c);
    }
}

/// Step a numeric field by one, staying inside `range`.
pub fn step(value: u32, up: bool, range: &RangeInclusive<u32>) -> u32 {
    let next = if up {
        value.saturating_add(1)
    } else {
        value.saturating_sub(1)
    };
    next.clamp(*range.start(), *range.end())
}
