//! Newtype identifiers for the core domain sets.
//!
//! Raw `u32`s for mechanics, bases, periods and shifts are easy to transpose
//! at call sites (`assign(base, period)` vs `assign(period, base)`); these
//! wrappers make such a swap a compile error.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! domain_id {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub u32);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u32> for $name {
            fn from(value: u32) -> Self {
                Self(value)
            }
        }
    };
}

domain_id!(MechanicId);
domain_id!(BaseId);
domain_id!(PeriodId);
domain_id!(ShiftId);

/// Display letter for a base, fixed for the current deployment (§3).
pub fn base_letter(base: BaseId) -> Option<char> {
    match base.0 {
        1 => Some('A'),
        2 => Some('B'),
        3 => Some('C'),
        _ => None,
    }
}

/// Shift presentation name, fixed for the current deployment (§3).
pub fn shift_name(shift: ShiftId) -> &'static str {
    if shift.0 == 1 {
        "Day"
    } else {
        "Night"
    }
}
