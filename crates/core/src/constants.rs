//! Application-wide constants.

/// Decimal precision applied to summary values exposed over the API.
pub const DISPLAY_DECIMAL_PRECISION: u32 = 8;
