use super::{Action, ActionContext, Plan};
use crate::core::{EntityId, EntityKind, Result, ResourceKey};
use crate::gateway::MutationCommand;
use crate::model::{AnyEntity, Color, ColorArgs};
use std::collections::HashSet;

/// Insert a new color.
#[derive(Debug, Clone)]
pub struct CreateColor {
    pub args: ColorArgs,
}

impl CreateColor {
    pub fn new(args: ColorArgs) -> Self {
        Self { args }
    }
}

impl Action for CreateColor {
    fn id(&self) -> &'static str {
        "create_color"
    }

    fn keys(&self, _ctx: &ActionContext) -> Vec<ResourceKey> {
        Vec::new()
    }

    fn plan(&self, _ctx: &ActionContext) -> Result<Plan> {
        let args = self.args.clone();
        let command = MutationCommand::CreateColor {
            id: args.id.clone(),
            team_id: args.team_id.clone(),
            name: args.name.clone(),
            color: args.color.clone(),
        };
        Ok(
            Plan::new(command, "Failed to create the color").effect(move |ctx| {
                let id = args.id.clone();
                ctx.store().add([AnyEntity::Color(Color::new(args))]);
                Ok(Some(Box::new(move |ctx: &ActionContext| {
                    ctx.store().delete(EntityKind::Color, &id)
                })))
            }),
        )
    }
}

/// Cascading color deletion.
///
/// Deleting a color requires an alternative color in the same team; every
/// bubble referencing the deleted color is reassigned to the alternative in
/// the same effect that removes the color. Without an alternative the whole
/// action is a no-op. The inverse re-inserts the color and restores exactly
/// the bubbles that were reassigned — the affected set is captured when the
/// effect applies, since the store may look different by the time of undo.
#[derive(Debug, Clone)]
pub struct DeleteColor {
    pub id: EntityId,
}

impl DeleteColor {
    pub fn new(id: impl Into<EntityId>) -> Self {
        Self { id: id.into() }
    }
}

impl Action for DeleteColor {
    fn id(&self) -> &'static str {
        "delete_color"
    }

    /// The target color plus every bubble the cascade will touch.
    fn keys(&self, ctx: &ActionContext) -> Vec<ResourceKey> {
        let mut keys = vec![self.id.clone()];
        if let Ok(color) = ctx.store().color(&self.id) {
            for bubble in ctx.store().bubbles() {
                if bubble.team_id == color.team_id && bubble.color_id == self.id {
                    keys.push(bubble.id.clone());
                }
            }
        }
        keys
    }

    fn plan(&self, ctx: &ActionContext) -> Result<Plan> {
        let color = ctx.store().color(&self.id)?;
        let team = color.team()?;
        let alternative = team
            .colors()?
            .into_iter()
            .find(|candidate| candidate.id != self.id);
        let Some(alternative) = alternative else {
            // no other color to swap to: refuse the cascade entirely
            return Ok(Plan::empty());
        };

        let id = self.id.clone();
        let swap_id = alternative.id.clone();
        let command = MutationCommand::DeleteColor {
            id: id.clone(),
            swap_id: swap_id.clone(),
        };
        Ok(
            Plan::new(command, "Failed to delete the color").effect(move |ctx| {
                let color = ctx.store().color(&id)?;
                let mut swapped = HashSet::new();
                for bubble in ctx.store().bubbles() {
                    if bubble.team_id == color.team_id && bubble.color_id == id {
                        ctx.store()
                            .update_bubble(&bubble.id, |b| b.set_color_id(swap_id.clone()))?;
                        swapped.insert(bubble.id.clone());
                    }
                }
                ctx.store().delete(EntityKind::Color, &id)?;
                Ok(Some(Box::new(move |ctx: &ActionContext| {
                    ctx.store().add([AnyEntity::Color(color)]);
                    for bubble_id in &swapped {
                        ctx.store()
                            .update_bubble(bubble_id, |b| b.set_color_id(id.clone()))?;
                    }
                    Ok(())
                })))
            }),
        )
    }
}

/// Rename a color.
#[derive(Debug, Clone)]
pub struct SetColorName {
    pub id: EntityId,
    pub name: String,
}

impl SetColorName {
    pub fn new(id: impl Into<EntityId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

impl Action for SetColorName {
    fn id(&self) -> &'static str {
        "set_color_name"
    }

    fn keys(&self, _ctx: &ActionContext) -> Vec<ResourceKey> {
        vec![self.id.clone()]
    }

    fn plan(&self, _ctx: &ActionContext) -> Result<Plan> {
        let id = self.id.clone();
        let name = self.name.clone();
        let command = MutationCommand::UpdateColor {
            id: id.clone(),
            name: Some(name.clone()),
            color: None,
        };
        Ok(
            Plan::new(command, "Failed to set the color's name").effect(move |ctx| {
                let prior = ctx.store().update_color(&id, |color| {
                    let prior = color.name.clone();
                    color.set_name(name);
                    prior
                })?;
                Ok(Some(Box::new(move |ctx: &ActionContext| {
                    ctx.store().update_color(&id, |color| color.set_name(prior))
                })))
            }),
        )
    }
}

/// Replace a color's value string.
#[derive(Debug, Clone)]
pub struct SetColorValue {
    pub id: EntityId,
    pub color: String,
}

impl SetColorValue {
    pub fn new(id: impl Into<EntityId>, color: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            color: color.into(),
        }
    }
}

impl Action for SetColorValue {
    fn id(&self) -> &'static str {
        "set_color_color"
    }

    fn keys(&self, _ctx: &ActionContext) -> Vec<ResourceKey> {
        vec![self.id.clone()]
    }

    fn plan(&self, _ctx: &ActionContext) -> Result<Plan> {
        let id = self.id.clone();
        let color = self.color.clone();
        let command = MutationCommand::UpdateColor {
            id: id.clone(),
            name: None,
            color: Some(color.clone()),
        };
        Ok(
            Plan::new(command, "Failed to set the color's value").effect(move |ctx| {
                let prior = ctx.store().update_color(&id, |target| {
                    let prior = target.color.clone();
                    target.set_color(color);
                    prior
                })?;
                Ok(Some(Box::new(move |ctx: &ActionContext| {
                    ctx.store().update_color(&id, |target| target.set_color(prior))
                })))
            }),
        )
    }
}
