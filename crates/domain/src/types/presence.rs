//! Chat platform presence values

use serde::{Deserialize, Serialize};

use crate::impl_status_conversions;

/// Presence status as reported and accepted by the chat platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresenceStatus {
    Online,
    Away,
    #[serde(rename = "dnd")]
    DoNotDisturb,
    Offline,
}

impl_status_conversions!(PresenceStatus {
    Online => "online",
    Away => "away",
    DoNotDisturb => "dnd",
    Offline => "offline",
});

impl PresenceStatus {
    /// The presence the engine restores once every tracked event has ended.
    pub const AVAILABLE: Self = Self::Online;
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn wire_strings_match_display() {
        assert_eq!(PresenceStatus::DoNotDisturb.to_string(), "dnd");
        assert_eq!(PresenceStatus::from_str("DND").unwrap(), PresenceStatus::DoNotDisturb);
        assert_eq!(
            serde_json::to_string(&PresenceStatus::DoNotDisturb).unwrap(),
            r#""dnd""#
        );
        assert_eq!(
            serde_json::from_str::<PresenceStatus>(r#""away""#).unwrap(),
            PresenceStatus::Away
        );
    }
}
