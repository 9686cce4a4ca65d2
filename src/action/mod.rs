// ============================================================================
// Action Protocol
// ============================================================================
//
// A mutation is described as a named action: the resource keys it will
// touch, and a planning step producing an ordered list of reversible
// effects plus one remote confirmation command. Execution drivers decide
// when effects hit the store (optimistically or buffered); the protocol
// itself never talks to the gateway.
//
// An action struct carries its bound arguments, so constructing one is
// partial application: every action exposes the same zero-argument
// plan/keys surface to the drivers regardless of arity.
//
// ============================================================================

pub mod bubble;
pub mod color;
pub mod context;
pub mod effect;

pub use bubble::{CreateBubble, DeleteBubble, SetBubbleColor, SetBubbleDescription, SetBubbleSize};
pub use color::{CreateColor, DeleteColor, SetColorName, SetColorValue};
pub use context::ActionContext;
pub use effect::{Effect, Plan, Undo};

use crate::core::{Result, ResourceKey};

/// A named, parameterized mutation descriptor.
pub trait Action: Send + Sync + 'static {
    /// Stable identifier for logging and diagnostics.
    fn id(&self) -> &'static str;

    /// The resource keys this action will touch. Every entity the effects
    /// mutate must be covered; an under-declared key set opens a race
    /// window.
    fn keys(&self, ctx: &ActionContext) -> Vec<ResourceKey>;

    /// Plan the mutation against current store state. Must not mutate the
    /// store; all mutation happens when the driver applies the returned
    /// effects.
    fn plan(&self, ctx: &ActionContext) -> Result<Plan>;
}
