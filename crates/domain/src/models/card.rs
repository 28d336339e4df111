//! Physical card models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A physical card tracked by the registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Card {
    pub card_id: Uuid,
    pub card_serial_no: i32,
    pub user_id: Option<Uuid>,
    pub printed: bool,
    pub assigned: bool,
    pub is_deleted: bool,
    pub label: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Binding state of a card, derived from its flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BindingState {
    Unbound,
    Printed,
    Assigned,
    Deleted,
}

impl Card {
    /// The card's binding state. Deleted wins over everything; an owned or
    /// assigned card reports `Assigned`.
    pub fn binding_state(&self) -> BindingState {
        if self.is_deleted {
            BindingState::Deleted
        } else if self.user_id.is_some() || self.assigned {
            BindingState::Assigned
        } else if self.printed {
            BindingState::Printed
        } else {
            BindingState::Unbound
        }
    }

    /// Whether this card can be redeemed during registration: ownerless,
    /// not deleted, and pre-provisioned stock (printed or assigned).
    pub fn is_eligible(&self) -> bool {
        self.user_id.is_none() && !self.is_deleted && (self.printed || self.assigned)
    }
}

/// Admin request for bulk card provisioning.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct ProvisionCardsRequest {
    #[validate(range(min = 1, max = 10000, message = "count must be between 1 and 10000"))]
    pub count: i32,

    #[validate(length(min = 1, max = 100, message = "Label must be 1-100 characters"))]
    pub label: String,

    #[serde(default)]
    pub printed: bool,
}

/// Admin listing filter, mirroring the operator's card views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardFilter {
    /// Cards bound to a user.
    Used,
    /// Unprovisioned stock (neither printed nor assigned).
    Unused,
    /// Printed cards.
    Printed,
}

/// A card as returned to operators, with the link its QR code encodes.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct CardResponse {
    pub card_id: Uuid,
    pub card_serial_no: i32,
    pub card_link: String,
    pub user_id: Option<Uuid>,
    pub binding_state: BindingState,
    pub printed: bool,
    pub assigned: bool,
    pub label: Option<String>,
}

impl CardResponse {
    /// Builds the operator view of a card; `profile_base_url` comes from
    /// the links configuration.
    pub fn from_card(card: Card, profile_base_url: &str) -> Self {
        let card_link = format!("{}/{}", profile_base_url.trim_end_matches('/'), card.card_id);
        Self {
            binding_state: card.binding_state(),
            card_id: card.card_id,
            card_serial_no: card.card_serial_no,
            card_link,
            user_id: card.user_id,
            printed: card.printed,
            assigned: card.assigned,
            label: card.label,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(printed: bool, assigned: bool, user: Option<Uuid>, deleted: bool) -> Card {
        Card {
            card_id: Uuid::new_v4(),
            card_serial_no: 7,
            user_id: user,
            printed,
            assigned,
            is_deleted: deleted,
            label: Some("batch-1".to_string()),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_binding_state_transitions() {
        assert_eq!(card(false, false, None, false).binding_state(), BindingState::Unbound);
        assert_eq!(card(true, false, None, false).binding_state(), BindingState::Printed);
        assert_eq!(
            card(true, true, Some(Uuid::new_v4()), false).binding_state(),
            BindingState::Assigned
        );
        assert_eq!(card(true, true, None, true).binding_state(), BindingState::Deleted);
    }

    #[test]
    fn test_eligibility_requires_provisioned_ownerless_stock() {
        assert!(card(true, false, None, false).is_eligible());
        assert!(card(false, true, None, false).is_eligible());
        // fresh stock, never printed: an arbitrary UUID guess must not pass
        assert!(!card(false, false, None, false).is_eligible());
        // already owned
        assert!(!card(true, false, Some(Uuid::new_v4()), false).is_eligible());
        // deleted
        assert!(!card(true, false, None, true).is_eligible());
    }

    #[test]
    fn test_card_response_link() {
        let c = card(true, false, None, false);
        let id = c.card_id;
        let resp = CardResponse::from_card(c, "https://cards.example.com/p/");
        assert_eq!(resp.card_link, format!("https://cards.example.com/p/{}", id));
    }
}
