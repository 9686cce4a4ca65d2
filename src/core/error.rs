use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    /// An entity kind tag could not be mapped to a known kind. Indicates a
    /// programming defect, never expected in normal operation.
    #[error("Unknown entity kind: '{0}'")]
    UnknownEntityKind(String),

    /// The referenced entity is not present in the store. Store contracts
    /// require the entity to be registered before it is looked up or removed.
    #[error("Entity '{0}' not found")]
    EntityNotFound(String),

    /// A relationship was resolved through an entity that has not been
    /// registered in a store yet.
    #[error("Entity '{0}' is not attached to a store")]
    DetachedEntity(String),

    /// A blocking driver was invoked while a previous invocation was still
    /// in flight.
    #[error("Cannot execute action while it is not idle")]
    NotIdle,

    /// The remote authority rejected or failed to confirm a mutation.
    /// Recoverable: local state is rolled back (or never applied) and the
    /// caller may re-invoke the action.
    #[error("Remote mutation failed: {0}")]
    RemoteMutationFailed(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;
