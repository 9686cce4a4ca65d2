use crate::core::{BubbleSize, EntityId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Full authoritative state, nested by team, as delivered by
/// [`RemoteGateway::bootstrap`](super::RemoteGateway::bootstrap).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RemoteState {
    pub teams: Vec<RemoteTeam>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteTeam {
    pub id: EntityId,
    pub name: String,
    pub colors: Vec<RemoteColor>,
    pub bubbles: Vec<RemoteBubble>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteColor {
    pub id: EntityId,
    pub name: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteBubble {
    pub id: EntityId,
    pub color_id: EntityId,
    pub created_at: DateTime<Utc>,
    pub description: String,
    pub size: BubbleSize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_snapshot_wire_shape() {
        let raw = json!({
            "teams": [{
                "id": "t1",
                "name": "Private",
                "colors": [{ "id": "c1", "name": "Lime", "color": "#44ff00" }],
                "bubbles": [{
                    "id": "b1",
                    "colorId": "c1",
                    "createdAt": "2023-09-21T10:20:00Z",
                    "description": "hello",
                    "size": "m"
                }]
            }]
        });

        let state: RemoteState = serde_json::from_value(raw).unwrap();
        assert_eq!(state.teams.len(), 1);
        let bubble = &state.teams[0].bubbles[0];
        assert_eq!(bubble.color_id, "c1");
        assert_eq!(bubble.size, BubbleSize::Medium);

        let round_tripped: RemoteState =
            serde_json::from_value(serde_json::to_value(&state).unwrap()).unwrap();
        assert_eq!(round_tripped, state);
    }
}
