/// Observable driver status, for UI feedback.
///
/// Optimistic drivers only surface `Idle` and `Queued` (execution proceeds
/// detached once the locks are held); blocking drivers pass through all
/// three.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionStatus {
    Idle,
    Queued,
    Executing,
}

impl ActionStatus {
    pub fn is_idle(&self) -> bool {
        matches!(self, ActionStatus::Idle)
    }

    pub fn is_queued(&self) -> bool {
        matches!(self, ActionStatus::Queued)
    }

    pub fn is_executing(&self) -> bool {
        matches!(self, ActionStatus::Executing)
    }
}

impl std::fmt::Display for ActionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionStatus::Idle => write!(f, "idle"),
            ActionStatus::Queued => write!(f, "queued"),
            ActionStatus::Executing => write!(f, "executing"),
        }
    }
}
