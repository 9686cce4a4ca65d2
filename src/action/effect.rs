use super::ActionContext;
use crate::core::Result;
use crate::gateway::MutationCommand;

/// Inverse of an applied effect. Invoking it restores the store to the
/// state it had immediately before the effect ran.
pub type Undo = Box<dyn FnOnce(&ActionContext) -> Result<()> + Send>;

/// One reversible local mutation.
///
/// Applying an effect mutates the entity store and returns the inverse
/// operation. Prior values are captured at apply time, not at planning
/// time, so an inverse always restores exactly what the effect displaced.
pub struct Effect {
    apply: Box<dyn FnOnce(&ActionContext) -> Result<Option<Undo>> + Send>,
}

impl Effect {
    pub fn new(
        apply: impl FnOnce(&ActionContext) -> Result<Option<Undo>> + Send + 'static,
    ) -> Self {
        Self {
            apply: Box::new(apply),
        }
    }

    /// Perform the local mutation, yielding the inverse (if any).
    pub fn apply(self, ctx: &ActionContext) -> Result<Option<Undo>> {
        (self.apply)(ctx)
    }
}

impl std::fmt::Debug for Effect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Effect")
    }
}

/// Output of an action's planning step: the ordered effect list, the single
/// remote confirmation command, and the user-facing notice posted if that
/// command fails.
///
/// An empty plan (no effects, no command) is a complete no-op: drivers
/// touch neither the store nor the gateway.
#[derive(Debug, Default)]
pub struct Plan {
    pub(crate) effects: Vec<Effect>,
    pub(crate) command: Option<MutationCommand>,
    pub(crate) failure_notice: Option<String>,
}

impl Plan {
    /// The no-op plan.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(command: MutationCommand, failure_notice: impl Into<String>) -> Self {
        Self {
            effects: Vec::new(),
            command: Some(command),
            failure_notice: Some(failure_notice.into()),
        }
    }

    /// Append an effect to the plan, in production order.
    pub fn effect(
        mut self,
        apply: impl FnOnce(&ActionContext) -> Result<Option<Undo>> + Send + 'static,
    ) -> Self {
        self.effects.push(Effect::new(apply));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty() && self.command.is_none()
    }

    pub(crate) fn into_parts(self) -> (Vec<Effect>, Option<MutationCommand>, Option<String>) {
        (self.effects, self.command, self.failure_notice)
    }
}
