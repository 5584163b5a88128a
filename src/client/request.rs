/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/
use crate::utils::QuotecastError;
use serde_json::json;
use std::fmt;
use std::str::FromStr;

/// Whether a subscription request adds or removes fields from the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Starts streaming the labels, sent as `req`.
    Subscribe,
    /// Stops streaming the labels, sent as `rel`.
    Unsubscribe,
}

impl Action {
    /// Verb used in control data: `req` to subscribe, `rel` to release.
    pub fn verb(&self) -> &'static str {
        match self {
            Action::Subscribe => "req",
            Action::Unsubscribe => "rel",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Subscribe => write!(f, "SUBSCRIBE"),
            Action::Unsubscribe => write!(f, "UNSUBSCRIBE"),
        }
    }
}

/// Wire value of the action, `0` for SUBSCRIBE and `1` for UNSUBSCRIBE.
impl TryFrom<i32> for Action {
    type Error = QuotecastError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Action::Subscribe),
            1 => Ok(Action::Unsubscribe),
            other => Err(QuotecastError::InvalidAction(other.to_string())),
        }
    }
}

impl FromStr for Action {
    type Err = QuotecastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SUBSCRIBE" | "req" => Ok(Action::Subscribe),
            "UNSUBSCRIBE" | "rel" => Ok(Action::Unsubscribe),
            other => Err(QuotecastError::InvalidAction(other.to_string())),
        }
    }
}

/// Request to subscribe or unsubscribe a list of labels (fields) of one product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionRequest {
    /// Subscribe or unsubscribe.
    pub action: Action,
    /// Product (vwd) identifier the labels belong to.
    pub product_id: u64,
    /// Field names, sent in this order.
    pub label_list: Vec<String>,
}

impl SubscriptionRequest {
    /// Creates a request for `labels` of `product_id`, keeping the label order.
    pub fn new<I, S>(action: Action, product_id: u64, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            action,
            product_id,
            label_list: labels.into_iter().map(Into::into).collect(),
        }
    }

    /// Control tokens joined by `;`, with a trailing `;`.
    ///
    /// Labels keep their order and duplicates, e.g. `req(360148977.B);req(360148977.A);`.
    /// An empty label list still yields the trailing `;`.
    pub fn control_tokens(&self) -> String {
        let verb = self.action.verb();
        let tokens: Vec<String> = self
            .label_list
            .iter()
            .map(|label| format!("{}({}.{})", verb, self.product_id, label))
            .collect();
        tokens.join(";") + ";"
    }

    /// Body posted to the session endpoint: `{"controlData":"<tokens>"}`.
    pub fn control_data(&self) -> String {
        json!({ "controlData": self.control_tokens() }).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscribe_payload_preserves_order() {
        let request = SubscriptionRequest::new(Action::Subscribe, 360148977, ["B", "A"]);
        assert_eq!(
            request.control_data(),
            r#"{"controlData":"req(360148977.B);req(360148977.A);"}"#
        );
    }

    #[test]
    fn test_unsubscribe_uses_rel() {
        let request = SubscriptionRequest::new(Action::Unsubscribe, 123, ["Volume"]);
        assert_eq!(request.control_data(), r#"{"controlData":"rel(123.Volume);"}"#);
    }

    #[test]
    fn test_duplicate_labels_are_kept() {
        let request =
            SubscriptionRequest::new(Action::Subscribe, 1, ["LastPrice", "LastPrice", "Ask"]);
        assert_eq!(
            request.control_tokens(),
            "req(1.LastPrice);req(1.LastPrice);req(1.Ask);"
        );
    }

    #[test]
    fn test_empty_label_list() {
        let request = SubscriptionRequest::new(Action::Subscribe, 1, Vec::<String>::new());
        assert_eq!(request.control_tokens(), ";");
        assert_eq!(request.control_data(), r#"{"controlData":";"}"#);
    }

    #[test]
    fn test_action_from_wire_value() {
        assert_eq!(Action::try_from(0).unwrap(), Action::Subscribe);
        assert_eq!(Action::try_from(1).unwrap(), Action::Unsubscribe);
        assert!(matches!(
            Action::try_from(2),
            Err(QuotecastError::InvalidAction(value)) if value == "2"
        ));
    }

    #[test]
    fn test_action_from_str() {
        assert_eq!("SUBSCRIBE".parse::<Action>().unwrap(), Action::Subscribe);
        assert_eq!("rel".parse::<Action>().unwrap(), Action::Unsubscribe);
        assert!(matches!(
            "subscribe".parse::<Action>(),
            Err(QuotecastError::InvalidAction(_))
        ));
    }

    #[test]
    fn test_action_display_round_trips() {
        for action in [Action::Subscribe, Action::Unsubscribe] {
            assert_eq!(action.to_string().parse::<Action>().unwrap(), action);
        }
    }
}
