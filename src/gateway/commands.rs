use crate::core::{BubbleSize, EntityId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One typed mutation command accepted by the remote authority.
///
/// Wire format matches the remote protocol exactly: a `type` tag in
/// snake_case, a camelCase `data` payload, and optional update fields
/// omitted when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum MutationCommand {
    #[serde(rename_all = "camelCase")]
    CreateBubble {
        id: EntityId,
        team_id: EntityId,
        color_id: EntityId,
        created_at: DateTime<Utc>,
        description: String,
        size: BubbleSize,
    },
    DeleteBubble {
        id: EntityId,
    },
    #[serde(rename_all = "camelCase")]
    UpdateBubble {
        id: EntityId,
        #[serde(skip_serializing_if = "Option::is_none")]
        color_id: Option<EntityId>,
        #[serde(skip_serializing_if = "Option::is_none")]
        description: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        size: Option<BubbleSize>,
    },
    #[serde(rename_all = "camelCase")]
    CreateColor {
        id: EntityId,
        team_id: EntityId,
        name: String,
        color: String,
    },
    #[serde(rename_all = "camelCase")]
    DeleteColor {
        id: EntityId,
        /// The alternative color every referencing bubble is reassigned to.
        swap_id: EntityId,
    },
    #[serde(rename_all = "camelCase")]
    UpdateColor {
        id: EntityId,
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        color: Option<String>,
    },
}

impl MutationCommand {
    /// The command's wire tag, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            MutationCommand::CreateBubble { .. } => "create_bubble",
            MutationCommand::DeleteBubble { .. } => "delete_bubble",
            MutationCommand::UpdateBubble { .. } => "update_bubble",
            MutationCommand::CreateColor { .. } => "create_color",
            MutationCommand::DeleteColor { .. } => "delete_color",
            MutationCommand::UpdateColor { .. } => "update_color",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_update_bubble_omits_absent_fields() {
        let command = MutationCommand::UpdateBubble {
            id: "b1".into(),
            color_id: None,
            description: Some("x".into()),
            size: None,
        };
        let value = serde_json::to_value(&command).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "update_bubble",
                "data": { "id": "b1", "description": "x" }
            })
        );
    }

    #[test]
    fn test_delete_color_carries_swap_id() {
        let command = MutationCommand::DeleteColor {
            id: "c1".into(),
            swap_id: "c2".into(),
        };
        let value = serde_json::to_value(&command).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "delete_color",
                "data": { "id": "c1", "swapId": "c2" }
            })
        );
    }

    #[test]
    fn test_create_bubble_wire_shape() {
        let command = MutationCommand::CreateBubble {
            id: "b1".into(),
            team_id: "t1".into(),
            color_id: "c1".into(),
            created_at: "2023-09-21T10:20:00Z".parse().unwrap(),
            description: "hi".into(),
            size: BubbleSize::Large,
        };
        let value = serde_json::to_value(&command).unwrap();
        assert_eq!(value["type"], "create_bubble");
        assert_eq!(value["data"]["teamId"], "t1");
        assert_eq!(value["data"]["size"], "l");

        let parsed: MutationCommand = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, command);
    }
}
