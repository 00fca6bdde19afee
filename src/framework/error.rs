//! # Framework Errors
//!
//! Errors raised by the document store itself, as opposed to the entity errors
//! each collection defines for its own business rules.

/// Errors that can occur within the actor framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}

impl FrameworkError {
    /// Recovers the typed entity error carried by `EntityError`.
    ///
    /// Returns `Err(self)` unchanged when this is not an entity error or when the
    /// boxed error is of a different type.
    pub fn into_entity_error<E>(self) -> Result<E, Self>
    where
        E: std::error::Error + 'static,
    {
        match self {
            FrameworkError::EntityError(inner) => match inner.downcast::<E>() {
                Ok(typed) => Ok(*typed),
                Err(other) => Err(FrameworkError::EntityError(other)),
            },
            other => Err(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error, PartialEq)]
    #[error("boom")]
    struct Boom;

    #[derive(Debug, thiserror::Error)]
    #[error("other")]
    struct Other;

    #[test]
    fn entity_error_downcasts_to_original_type() {
        let err = FrameworkError::EntityError(Box::new(Boom));
        assert_eq!(err.into_entity_error::<Boom>().unwrap(), Boom);
    }

    #[test]
    fn mismatched_entity_error_is_returned_unchanged() {
        let err = FrameworkError::EntityError(Box::new(Other));
        let back = err.into_entity_error::<Boom>().unwrap_err();
        assert!(matches!(back, FrameworkError::EntityError(_)));

        let closed = FrameworkError::ActorClosed.into_entity_error::<Boom>();
        assert!(matches!(closed, Err(FrameworkError::ActorClosed)));
    }
}
