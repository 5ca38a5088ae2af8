//! Solana Actions wire types (GET metadata, POST request/response, actions.json).

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionType {
    Action,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkedActionType {
    Post,
}

/// Response body of `GET /api/tip`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionGetResponse {
    #[serde(rename = "type")]
    pub kind: ActionType,
    pub icon: String,
    pub title: String,
    pub description: String,
    pub label: String,
    pub links: ActionLinks,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionLinks {
    pub actions: Vec<LinkedAction>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkedAction {
    #[serde(rename = "type")]
    pub kind: LinkedActionType,
    pub label: String,
    pub href: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<ActionParameter>,
}

/// User-supplied value substituted into a `{name}` token of an href.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionParameter {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    pub name: String,
    pub label: String,
    #[serde(default)]
    pub required: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionPostRequest {
    pub account: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionPostResponse {
    /// Base64 of the unsigned, wire-encoded transaction.
    pub transaction: String,
    pub message: String,
}

/// Body of every failed `/api/tip` call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionErrorBody {
    pub message: String,
}

/// `GET /actions.json`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionsJson {
    pub rules: Vec<ActionRule>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionRule {
    pub path_pattern: String,
    pub api_path: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn linked_action_omits_empty_parameters() {
        let action = LinkedAction {
            kind: LinkedActionType::Post,
            label: "0.1 SOL".into(),
            href: "/api/tip?amount=0.1".into(),
            parameters: vec![],
        };
        assert_eq!(
            serde_json::to_value(&action).unwrap(),
            json!({ "type": "post", "label": "0.1 SOL", "href": "/api/tip?amount=0.1" })
        );
    }

    #[test]
    fn rules_use_camel_case() {
        let rules = ActionsJson {
            rules: vec![ActionRule {
                path_pattern: "/tip".into(),
                api_path: "/api/tip".into(),
            }],
        };
        assert_eq!(
            serde_json::to_value(&rules).unwrap(),
            json!({ "rules": [{ "pathPattern": "/tip", "apiPath": "/api/tip" }] })
        );
    }

    #[test]
    fn post_request_ignores_unknown_fields() {
        let req: ActionPostRequest =
            serde_json::from_value(json!({ "account": "abc", "data": {} })).unwrap();
        assert_eq!(req.account, "abc");
    }
}
