use super::{Action, ActionContext, Plan};
use crate::core::{BubbleSize, EntityId, EntityKind, Result, ResourceKey};
use crate::gateway::MutationCommand;
use crate::model::{AnyEntity, Bubble, BubbleArgs};

/// Insert a new bubble. Keys are empty: a fresh entity has nothing to
/// contend on.
#[derive(Debug, Clone)]
pub struct CreateBubble {
    pub args: BubbleArgs,
}

impl CreateBubble {
    pub fn new(args: BubbleArgs) -> Self {
        Self { args }
    }
}

impl Action for CreateBubble {
    fn id(&self) -> &'static str {
        "create_bubble"
    }

    fn keys(&self, _ctx: &ActionContext) -> Vec<ResourceKey> {
        Vec::new()
    }

    fn plan(&self, _ctx: &ActionContext) -> Result<Plan> {
        let args = self.args.clone();
        let command = MutationCommand::CreateBubble {
            id: args.id.clone(),
            team_id: args.team_id.clone(),
            color_id: args.color_id.clone(),
            created_at: args.created_at,
            description: args.description.clone(),
            size: args.size,
        };
        Ok(
            Plan::new(command, "Failed to create the bubble").effect(move |ctx| {
                let id = args.id.clone();
                ctx.store().add([AnyEntity::Bubble(Bubble::new(args))]);
                Ok(Some(Box::new(move |ctx: &ActionContext| {
                    ctx.store().delete(EntityKind::Bubble, &id)
                })))
            }),
        )
    }
}

/// Remove a bubble; the inverse reinserts the full prior record.
#[derive(Debug, Clone)]
pub struct DeleteBubble {
    pub id: EntityId,
}

impl DeleteBubble {
    pub fn new(id: impl Into<EntityId>) -> Self {
        Self { id: id.into() }
    }
}

impl Action for DeleteBubble {
    fn id(&self) -> &'static str {
        "delete_bubble"
    }

    fn keys(&self, _ctx: &ActionContext) -> Vec<ResourceKey> {
        vec![self.id.clone()]
    }

    fn plan(&self, _ctx: &ActionContext) -> Result<Plan> {
        let id = self.id.clone();
        let command = MutationCommand::DeleteBubble { id: id.clone() };
        Ok(
            Plan::new(command, "Failed to delete the bubble").effect(move |ctx| {
                let bubble = ctx.store().bubble(&id)?;
                ctx.store().delete(EntityKind::Bubble, &id)?;
                Ok(Some(Box::new(move |ctx: &ActionContext| {
                    ctx.store().add([AnyEntity::Bubble(bubble)]);
                    Ok(())
                })))
            }),
        )
    }
}

/// Reassign a bubble to another color.
#[derive(Debug, Clone)]
pub struct SetBubbleColor {
    pub id: EntityId,
    pub color_id: EntityId,
}

impl SetBubbleColor {
    pub fn new(id: impl Into<EntityId>, color_id: impl Into<EntityId>) -> Self {
        Self {
            id: id.into(),
            color_id: color_id.into(),
        }
    }
}

impl Action for SetBubbleColor {
    fn id(&self) -> &'static str {
        "set_bubble_color_id"
    }

    fn keys(&self, _ctx: &ActionContext) -> Vec<ResourceKey> {
        vec![self.id.clone()]
    }

    fn plan(&self, _ctx: &ActionContext) -> Result<Plan> {
        let id = self.id.clone();
        let color_id = self.color_id.clone();
        let command = MutationCommand::UpdateBubble {
            id: id.clone(),
            color_id: Some(color_id.clone()),
            description: None,
            size: None,
        };
        Ok(
            Plan::new(command, "Failed to set the bubble's color").effect(move |ctx| {
                let prior = ctx.store().update_bubble(&id, |bubble| {
                    let prior = bubble.color_id.clone();
                    bubble.set_color_id(color_id);
                    prior
                })?;
                Ok(Some(Box::new(move |ctx: &ActionContext| {
                    ctx.store()
                        .update_bubble(&id, |bubble| bubble.set_color_id(prior))
                })))
            }),
        )
    }
}

/// Replace a bubble's description.
#[derive(Debug, Clone)]
pub struct SetBubbleDescription {
    pub id: EntityId,
    pub description: String,
}

impl SetBubbleDescription {
    pub fn new(id: impl Into<EntityId>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
        }
    }
}

impl Action for SetBubbleDescription {
    fn id(&self) -> &'static str {
        "set_bubble_description"
    }

    fn keys(&self, _ctx: &ActionContext) -> Vec<ResourceKey> {
        vec![self.id.clone()]
    }

    fn plan(&self, _ctx: &ActionContext) -> Result<Plan> {
        let id = self.id.clone();
        let description = self.description.clone();
        let command = MutationCommand::UpdateBubble {
            id: id.clone(),
            color_id: None,
            description: Some(description.clone()),
            size: None,
        };
        Ok(
            Plan::new(command, "Failed to set the bubble's description").effect(move |ctx| {
                let prior = ctx.store().update_bubble(&id, |bubble| {
                    let prior = bubble.description.clone();
                    bubble.set_description(description);
                    prior
                })?;
                Ok(Some(Box::new(move |ctx: &ActionContext| {
                    ctx.store()
                        .update_bubble(&id, |bubble| bubble.set_description(prior))
                })))
            }),
        )
    }
}

/// Resize a bubble.
#[derive(Debug, Clone)]
pub struct SetBubbleSize {
    pub id: EntityId,
    pub size: BubbleSize,
}

impl SetBubbleSize {
    pub fn new(id: impl Into<EntityId>, size: BubbleSize) -> Self {
        Self {
            id: id.into(),
            size,
        }
    }
}

impl Action for SetBubbleSize {
    fn id(&self) -> &'static str {
        "set_bubble_size"
    }

    fn keys(&self, _ctx: &ActionContext) -> Vec<ResourceKey> {
        vec![self.id.clone()]
    }

    fn plan(&self, _ctx: &ActionContext) -> Result<Plan> {
        let id = self.id.clone();
        let size = self.size;
        let command = MutationCommand::UpdateBubble {
            id: id.clone(),
            color_id: None,
            description: None,
            size: Some(size),
        };
        Ok(
            Plan::new(command, "Failed to set the bubble's size").effect(move |ctx| {
                let prior = ctx.store().update_bubble(&id, |bubble| {
                    let prior = bubble.size;
                    bubble.set_size(size);
                    prior
                })?;
                Ok(Some(Box::new(move |ctx: &ActionContext| {
                    ctx.store().update_bubble(&id, |bubble| bubble.set_size(prior))
                })))
            }),
        )
    }
}
