//! Typed IDs for the records the engine consumes.
//!
//! A `BudgetItemId` can never be passed where a `ServiceEventId` is expected,
//! even though both are UUIDs on the wire.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Macro to generate typed ID wrappers.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Creates a new random ID using UUID v7 (time-ordered).
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Creates an ID from an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Creates an ID from a raw 128-bit value. Handy for fixtures.
            #[must_use]
            pub const fn from_u128(value: u128) -> Self {
                Self(Uuid::from_u128(value))
            }

            /// Returns the inner UUID.
            #[must_use]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }

            /// Remainder of the ID's integer value modulo `modulus`.
            ///
            /// Returns 0 when `modulus` is 0.
            #[must_use]
            pub const fn bucket(self, modulus: u128) -> u128 {
                if modulus == 0 {
                    0
                } else {
                    self.0.as_u128() % modulus
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

typed_id!(BudgetPlanId, "Unique identifier for a budget plan.");
typed_id!(BudgetItemId, "Unique identifier for a budget line item.");
typed_id!(
    ServiceEventId,
    "Unique identifier for a service event (session or billable occurrence)."
);
typed_id!(GoalId, "Unique identifier for a goal.");
typed_id!(SubgoalId, "Unique identifier for a subgoal.");

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_typed_id_from_uuid() {
        let uuid = Uuid::new_v4();
        let id = BudgetItemId::from_uuid(uuid);
        assert_eq!(id.into_inner(), uuid);
    }

    #[test]
    fn test_typed_id_display_round_trips_through_from_str() {
        let id = ServiceEventId::new();
        let parsed = ServiceEventId::from_str(&id.to_string()).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_typed_id_from_str_error() {
        assert!(GoalId::from_str("not-a-uuid").is_err());
    }

    #[test]
    fn test_bucket_uses_integer_value() {
        assert_eq!(BudgetItemId::from_u128(7).bucket(7), 0);
        assert_eq!(BudgetItemId::from_u128(12).bucket(5), 2);
        assert_eq!(BudgetItemId::from_u128(12).bucket(0), 0);
    }
}
