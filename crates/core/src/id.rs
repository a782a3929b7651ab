//! Strongly-typed identifiers used across the domain.
//!
//! Identifiers are numeric (store-assigned sequences), which keeps them
//! usable as JSON object keys in order and deal payloads.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of an ingredient in the inventory.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IngredientId(i64);

/// Identifier of a recipe owned by the external recipe service.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeId(i64);

/// Identifier of a promotional deal.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DealId(i64);

macro_rules! impl_numeric_newtype {
    ($t:ty, $name:literal) => {
        impl $t {
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<i64> for $t {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$t> for i64 {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let value = s
                    .trim()
                    .parse::<i64>()
                    .map_err(|e| DomainError::invalid_id(format!("{}: {}", $name, e)))?;
                Ok(Self(value))
            }
        }
    };
}

impl_numeric_newtype!(IngredientId, "IngredientId");
impl_numeric_newtype!(RecipeId, "RecipeId");
impl_numeric_newtype!(DealId, "DealId");

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    #[test]
    fn parses_from_path_segments() {
        assert_eq!("42".parse::<IngredientId>().unwrap(), IngredientId::new(42));
        match "abc".parse::<RecipeId>() {
            Err(DomainError::InvalidId(msg)) => assert!(msg.starts_with("RecipeId")),
            other => panic!("expected InvalidId, got {other:?}"),
        }
    }

    #[test]
    fn ids_work_as_json_object_keys() {
        let mut map = BTreeMap::new();
        map.insert(IngredientId::new(3), 1u32);
        map.insert(IngredientId::new(1), 2u32);

        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"1":2,"3":1}"#);

        let back: BTreeMap<IngredientId, u32> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, map);
    }
}
