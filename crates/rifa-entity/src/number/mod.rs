//! Pure number-domain logic for the fixed 1000-slot number space.
//!
//! Every raffle sells the same space of three-digit numbers, `"000"`
//! through `"999"`. Nothing here touches storage; callers supply the
//! taken/selected/conflict sets and get classifications back.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Display state of a single number in the selection grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumberState {
    /// Free for selection.
    Available,
    /// Claimed by a non-rejected ticket.
    Taken,
    /// Locally picked by the current customer.
    Selected,
    /// Flagged after a failed reservation attempt.
    Conflict,
}

/// Format a slot index as its canonical three-digit string.
///
/// The number space is 0..=999; values are reduced into it so a caller
/// bug cannot produce a four-digit string that would never match a
/// stored number.
pub fn format_number(n: u16) -> String {
    format!("{:03}", n % 1000)
}

/// Whether `s` is a canonical number string: exactly three ASCII digits.
pub fn is_valid_number(s: &str) -> bool {
    s.len() == 3 && s.bytes().all(|b| b.is_ascii_digit())
}

/// Classify a number against the three relevant sets.
///
/// Precedence: conflict > selected > taken > available. A number flagged
/// as conflicting after a failed reservation shows as conflict even while
/// still locally selected.
pub fn classify(
    number: &str,
    taken: &HashSet<String>,
    selected: &HashSet<String>,
    conflicts: &HashSet<String>,
) -> NumberState {
    if conflicts.contains(number) {
        NumberState::Conflict
    } else if selected.contains(number) {
        NumberState::Selected
    } else if taken.contains(number) {
        NumberState::Taken
    } else {
        NumberState::Available
    }
}
