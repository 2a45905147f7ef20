//! Quest reward values.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// Non-negative coin reward that always fits the store's signed 64-bit column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct RewardCoins(i64);

impl RewardCoins {
    pub const ZERO: RewardCoins = RewardCoins(0);

    /// Create a coin reward.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` for negative amounts.
    pub fn new(amount: i64) -> Result<Self, DomainError> {
        if amount < 0 {
            return Err(DomainError::validation(format!(
                "Reward coins cannot be negative: {}",
                amount
            )));
        }
        Ok(Self(amount))
    }

    /// Parse free-text input such as `"500"`.
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let trimmed = input.trim();
        let amount: i64 = trimmed
            .parse()
            .map_err(|_| DomainError::parse(format!("Not a whole number: {:?}", trimmed)))?;
        Self::new(amount)
    }

    pub fn amount(self) -> i64 {
        self.0
    }
}

impl fmt::Display for RewardCoins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for RewardCoins {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RewardCoins> for i64 {
    fn from(coins: RewardCoins) -> i64 {
        coins.0
    }
}

/// Opaque reward item payload.
///
/// The bytes are produced by the host's item serializer and are never
/// interpreted here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RewardItem(Vec<u8>);

impl RewardItem {
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

/// Snapshot of the item an actor is holding, as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeldItem {
    /// Host material identifier, e.g. `"diamond_sword"` or `"air"`
    pub material: String,
    pub amount: u32,
    /// Serialized item as produced by the host
    pub payload: RewardItem,
}

impl HeldItem {
    pub fn new(material: impl Into<String>, amount: u32, payload: RewardItem) -> Self {
        Self {
            material: material.into(),
            amount,
            payload,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.amount == 0 || self.payload.as_bytes().is_empty()
    }

    pub fn is_air(&self) -> bool {
        let material = self.material.trim();
        material.eq_ignore_ascii_case("air")
            || material.eq_ignore_ascii_case("minecraft:air")
            || material.is_empty()
    }

    /// The payload to use as a quest reward, if this is a real item.
    pub fn into_reward(self) -> Option<RewardItem> {
        if self.is_empty() || self.is_air() {
            None
        } else {
            Some(self.payload)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coins_parse_accepts_whole_numbers() {
        assert_eq!(RewardCoins::parse(" 500 ").unwrap().amount(), 500);
        assert_eq!(RewardCoins::parse("0").unwrap(), RewardCoins::ZERO);
    }

    #[test]
    fn coins_parse_rejects_negative_and_text() {
        assert!(matches!(
            RewardCoins::parse("-1"),
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            RewardCoins::parse("lots"),
            Err(DomainError::Parse(_))
        ));
        assert!(RewardCoins::parse("9223372036854775808").is_err());
    }

    #[test]
    fn held_air_is_not_a_reward() {
        let air = HeldItem::new("AIR", 1, RewardItem::from_bytes(vec![1]));
        assert!(air.into_reward().is_none());
    }

    #[test]
    fn held_empty_stack_is_not_a_reward() {
        let empty = HeldItem::new("diamond", 0, RewardItem::from_bytes(vec![1]));
        assert!(empty.into_reward().is_none());
    }

    #[test]
    fn held_item_yields_payload() {
        let item = HeldItem::new("diamond", 3, RewardItem::from_bytes(vec![9, 8, 7]));
        assert_eq!(
            item.into_reward().unwrap().as_bytes(),
            &[9, 8, 7]
        );
    }
}
