//! Newtype domain identifiers.
//!
//! Every domain concept that has an identity is represented as a distinct
//! newtype wrapping a [`Uuid`]. This prevents accidentally interchanging a
//! [`QuestionId`] with a [`QuizId`] even though both are UUIDs under the hood.
//!
//! Both identifiers are generated internally — the model never supplies them.
//! A [`QuestionId`] is minted when a record is parsed out of model output; a
//! [`QuizId`] is minted when accepted records are grouped for persistence.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Macro for UUID-wrapped newtypes.
// Generates: struct (Copy), new_random(), from_uuid(), as_uuid(), Display.
// ---------------------------------------------------------------------------
macro_rules! uuid_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(Uuid);

        impl $name {
            /// Generates a new random identifier.
            pub fn new_random() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates an identifier from an existing UUID (e.g. deserialised from storage).
            pub fn from_uuid(id: Uuid) -> Self {
                Self(id)
            }

            /// Returns the underlying [`Uuid`].
            pub fn as_uuid(self) -> Uuid {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

uuid_id! {
    /// Identifies a single generated question record.
    ///
    /// Assigned at parse time, one per item in the model's `questions` array.
    QuestionId
}

uuid_id! {
    /// Identifies a saved quiz: one topic plus the question records accepted
    /// from a single generation run.
    QuizId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_ids_are_distinct() {
        assert_ne!(QuestionId::new_random(), QuestionId::new_random());
    }

    #[test]
    fn from_uuid_round_trips() {
        let raw = Uuid::new_v4();
        assert_eq!(QuizId::from_uuid(raw).as_uuid(), raw);
    }
}
