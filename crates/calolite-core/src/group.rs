//! Detector groups and their tri-state header value.
//!
//! A [`DetectorGroup`] bundles several channels for combined show/hide
//! control. The group itself stores no visibility: its [`TriState`] is always
//! derived from the visibility of its members.

use serde::{Deserialize, Serialize};

/// Checked / unchecked / partially-checked value shown on a group header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TriState {
    /// No member is visible.
    Unchecked,
    /// Some, but not all, members are visible.
    PartiallyChecked,
    /// Every member is visible.
    #[default]
    Checked,
}

impl TriState {
    /// Aggregates member visibility into a header value.
    ///
    /// An empty member list is reported as unchecked.
    #[must_use]
    pub fn from_counts(visible: usize, total: usize) -> Self {
        if visible == 0 {
            TriState::Unchecked
        } else if visible >= total {
            TriState::Checked
        } else {
            TriState::PartiallyChecked
        }
    }

    /// Aggregates an iterator of member visibilities.
    pub fn from_members(members: impl IntoIterator<Item = bool>) -> Self {
        let (visible, total) = members
            .into_iter()
            .fold((0, 0), |(v, t), on| (v + usize::from(on), t + 1));
        Self::from_counts(visible, total)
    }

    /// The state a user click moves the header to.
    ///
    /// Unchecked goes to checked and checked goes to unchecked. A partially
    /// checked header goes to unchecked, never straight to checked.
    #[must_use]
    pub fn next_on_click(self) -> Self {
        match self {
            TriState::Unchecked => TriState::Checked,
            TriState::Checked | TriState::PartiallyChecked => TriState::Unchecked,
        }
    }

    /// Returns true only for the fully checked state.
    #[must_use]
    pub fn is_checked(self) -> bool {
        self == TriState::Checked
    }

    /// Display name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            TriState::Unchecked => "unchecked",
            TriState::PartiallyChecked => "partial",
            TriState::Checked => "checked",
        }
    }
}

/// A named, fixed set of detector channels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectorGroup {
    /// The unique display name of this group.
    name: String,
    /// Member channel names, in display order.
    members: Vec<String>,
}

impl DetectorGroup {
    /// Creates a new group with the given members.
    pub fn new<I, S>(name: impl Into<String>, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            members: members.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the name of this group.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the member channel names.
    pub fn members(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(String::as_str)
    }

    /// Returns whether this group contains a channel.
    #[must_use]
    pub fn contains(&self, channel: &str) -> bool {
        self.members.iter().any(|m| m == channel)
    }

    /// Returns the number of member channels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns true if this group has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Computes the header value from a member visibility lookup.
    pub fn tri_state(&self, is_visible: impl Fn(&str) -> bool) -> TriState {
        TriState::from_members(self.members().map(is_visible))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_group_creation() {
        let group = DetectorGroup::new("Tile Barrel", ["TileBar0", "TileBar1", "TileBar2"]);
        assert_eq!(group.name(), "Tile Barrel");
        assert_eq!(group.len(), 3);
        assert!(group.contains("TileBar1"));
        assert!(!group.contains("TileGap1"));
    }

    #[test]
    fn test_members_keep_order() {
        let group = DetectorGroup::new("g", ["b", "a", "c"]);
        let members: Vec<&str> = group.members().collect();
        assert_eq!(members, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_click_cycle() {
        assert_eq!(TriState::Unchecked.next_on_click(), TriState::Checked);
        assert_eq!(TriState::Checked.next_on_click(), TriState::Unchecked);
        assert_eq!(TriState::PartiallyChecked.next_on_click(), TriState::Unchecked);
    }

    #[test]
    fn test_tile_barrel_partial() {
        let group = DetectorGroup::new("Tile Barrel", ["TileBar0", "TileBar1", "TileBar2"]);
        assert_eq!(group.tri_state(|m| m != "TileBar1"), TriState::PartiallyChecked);
        assert_eq!(group.tri_state(|_| true), TriState::Checked);
        assert_eq!(group.tri_state(|_| false), TriState::Unchecked);
    }

    proptest! {
        #[test]
        fn tri_state_matches_subset(mask in proptest::collection::vec(any::<bool>(), 1..8)) {
            let visible = mask.iter().filter(|&&on| on).count();
            let state = TriState::from_members(mask.iter().copied());
            if visible == 0 {
                prop_assert_eq!(state, TriState::Unchecked);
            } else if visible == mask.len() {
                prop_assert_eq!(state, TriState::Checked);
            } else {
                prop_assert_eq!(state, TriState::PartiallyChecked);
            }
        }
    }
}
