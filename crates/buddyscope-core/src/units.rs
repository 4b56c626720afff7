//! Size units and conversion to the common base unit (KB).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kilobytes per megabyte, the only conversion factor in the system.
pub const KB_PER_MB: u64 = 1024;

/// A user-facing size unit.
///
/// The allocator service manages sizes internally in KB; user input may
/// arrive in either unit and is normalized with [`to_base_kb`] before
/// any comparison. Serializes to the wire strings `"MB"` / `"KB"`.
///
/// # Examples
///
/// ```
/// use buddyscope_core::{to_base_kb, SizeUnit};
///
/// assert_eq!(to_base_kb(3, SizeUnit::Mb), 3072);
/// assert_eq!(to_base_kb(512, SizeUnit::Kb), 512);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SizeUnit {
    /// Megabytes.
    #[serde(rename = "MB")]
    Mb,
    /// Kilobytes, the base unit.
    #[serde(rename = "KB")]
    Kb,
}

impl fmt::Display for SizeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mb => write!(f, "MB"),
            Self::Kb => write!(f, "KB"),
        }
    }
}

/// Normalize a size expressed in `unit` to the base unit (KB).
///
/// Pure and total for any non-negative input; values below one unit are
/// a user error handled by validation, not here.
pub fn to_base_kb(value: u64, unit: SizeUnit) -> u64 {
    match unit {
        SizeUnit::Mb => value * KB_PER_MB,
        SizeUnit::Kb => value,
    }
}

/// Render a KB size with the largest exact unit.
///
/// Whole-MB multiples render as `"N MB"`, everything else as `"N KB"`.
/// Used as the fallback label when a snapshot node carries no
/// server-formatted label.
///
/// # Examples
///
/// ```
/// use buddyscope_core::format_size_kb;
///
/// assert_eq!(format_size_kb(2048), "2 MB");
/// assert_eq!(format_size_kb(512), "512 KB");
/// assert_eq!(format_size_kb(1536), "1536 KB");
/// ```
pub fn format_size_kb(kb: u64) -> String {
    if kb >= KB_PER_MB && kb % KB_PER_MB == 0 {
        format!("{} MB", kb / KB_PER_MB)
    } else {
        format!("{kb} KB")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mb_to_kb_factor() {
        assert_eq!(to_base_kb(1, SizeUnit::Mb), 1024);
        assert_eq!(to_base_kb(8, SizeUnit::Mb), 8192);
        assert_eq!(to_base_kb(0, SizeUnit::Mb), 0);
    }

    #[test]
    fn kb_is_identity() {
        assert_eq!(to_base_kb(0, SizeUnit::Kb), 0);
        assert_eq!(to_base_kb(1023, SizeUnit::Kb), 1023);
    }

    #[test]
    fn display_matches_wire_names() {
        assert_eq!(SizeUnit::Mb.to_string(), "MB");
        assert_eq!(SizeUnit::Kb.to_string(), "KB");
    }

    #[test]
    fn format_prefers_whole_mb() {
        assert_eq!(format_size_kb(1024), "1 MB");
        assert_eq!(format_size_kb(4096), "4 MB");
    }

    #[test]
    fn format_keeps_kb_for_fractions() {
        assert_eq!(format_size_kb(1), "1 KB");
        assert_eq!(format_size_kb(1025), "1025 KB");
        assert_eq!(format_size_kb(0), "0 KB");
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn mb_round_trip(x in 0u64..1 << 40) {
                prop_assert_eq!(to_base_kb(x, SizeUnit::Mb), x * 1024);
                prop_assert_eq!(to_base_kb(x, SizeUnit::Kb), x);
            }
        }
    }
}
