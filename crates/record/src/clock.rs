//! Wall-clock collaborator
//!
//! Timestamps come from a trait object so tests can pin them.

use chrono::Local;

/// Source of formatted record timestamps
pub trait Clock: Send + Sync {
    /// Current local time as `YYYY-MM-DD HH:MM:SS`
    fn now(&self) -> String;
}

/// System wall clock in the local timezone
#[derive(Debug, Default, Clone, Copy)]
pub struct WallClock;

impl Clock for WallClock {
    fn now(&self) -> String {
        Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wall_clock_format() {
        let stamp = WallClock.now();
        // YYYY-MM-DD HH:MM:SS is exactly 19 chars
        assert_eq!(stamp.len(), 19);
        assert_eq!(&stamp[4..5], "-");
        assert_eq!(&stamp[10..11], " ");
        assert_eq!(&stamp[13..14], ":");
    }
}
