//! Sort modes for directory listings.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, FromRepr, IntoEnumIterator};

/// Sort order for file listings.
///
/// Directories always sort before files; the mode chooses the secondary
/// ordering within each group.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumIter, FromRepr, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Case-insensitive name, ascending.
    #[default]
    #[strum(to_string = "name")]
    Name,
    /// File size ascending; directories count as zero.
    #[strum(to_string = "size")]
    Size,
    /// Modification time, most recent first.
    #[strum(to_string = "modified")]
    Modified,
    /// Lowercase extension, then name.
    #[strum(to_string = "type")]
    Type,
}

impl SortMode {
    /// Cycle to the next sort mode.
    pub fn next(self) -> Self {
        let next = (self as usize + 1) % Self::iter().count();
        Self::from_repr(next).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_wraps() {
        assert_eq!(SortMode::Name.next(), SortMode::Size);
        assert_eq!(SortMode::Size.next(), SortMode::Modified);
        assert_eq!(SortMode::Modified.next(), SortMode::Type);
        assert_eq!(SortMode::Type.next(), SortMode::Name);
    }

    #[test]
    fn test_display_labels() {
        assert_eq!(SortMode::Name.to_string(), "name");
        assert_eq!(SortMode::Type.to_string(), "type");
    }
}
