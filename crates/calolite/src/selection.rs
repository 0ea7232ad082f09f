//! Event selection as delivered by the event picker.

use std::fmt;
use std::str::FromStr;

use calolite_core::EventId;

/// What the event picker currently points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventSelection {
    /// The "no event" entry.
    #[default]
    None,
    /// A concrete event number.
    Event(EventId),
}

impl From<EventId> for EventSelection {
    fn from(id: EventId) -> Self {
        Self::Event(id)
    }
}

impl From<Option<EventId>> for EventSelection {
    fn from(id: Option<EventId>) -> Self {
        id.map_or(Self::None, Self::Event)
    }
}

impl fmt::Display for EventSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Event(id) => write!(f, "{id}"),
        }
    }
}

/// Text that names neither an event number nor the empty selection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is neither an event number nor \"none\"")]
pub struct ParseSelectionError(String);

impl FromStr for EventSelection {
    type Err = ParseSelectionError;

    /// Parses picker text: `none`, `<Default>` or an empty string select no
    /// event; anything else must be an event number.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        if text.is_empty() || text.eq_ignore_ascii_case("none") || text == "<Default>" {
            return Ok(Self::None);
        }
        text.parse::<EventId>()
            .map(Self::Event)
            .map_err(|_| ParseSelectionError(s.to_string()))
    }
}
