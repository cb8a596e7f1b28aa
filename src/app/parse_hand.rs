use tracing::warn;

use crate::app::discard::ResourceList;

/// The shapes a hand file can come in.
#[derive(Debug)]
enum HandFormat {
    /// just the cards, `{"brick": 1, "wood": 2, ...}`
    Resources(ResourceList),
    /// a whole player as the game server describes them, only `resources` is read
    Player(Player),
}

#[derive(serde::Deserialize, Debug)]
struct Player {
    resources: ResourceList,
}

impl TryFrom<&[u8]> for HandFormat {
    type Error = serde_json::Error;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        serde_json::from_slice::<ResourceList>(value)
            .map_err(|err| {
                warn!(?err, "failed to parse as a resource list");
            })
            .map(HandFormat::Resources)
            .or_else(|_| {
                serde_json::from_slice::<Player>(value)
                    .map_err(|err| {
                        warn!(?err, "failed to parse as a player");
                        err
                    })
                    .map(HandFormat::Player)
            })
    }
}

impl From<HandFormat> for ResourceList {
    fn from(hand_format: HandFormat) -> Self {
        match hand_format {
            HandFormat::Resources(resources) => resources,
            HandFormat::Player(Player { resources }) => resources,
        }
    }
}

/// Reads a hand from JSON, either a bare resource list or a player carrying one.
pub(crate) fn from_json_slice(bytes: &[u8]) -> Result<ResourceList, serde_json::Error> {
    HandFormat::try_from(bytes).map(ResourceList::from)
}
