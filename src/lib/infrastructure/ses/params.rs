//! AWS Query API parameter encoding

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::domain::mail::{errors::ProviderError, DeliveryOptions};

/// SES Query API version
pub const API_VERSION: &str = "2010-12-01";

/// Form parameters of a Query API request
pub type QueryParams = BTreeMap<String, String>;

/// Starts a parameter set with `Action` and `Version`
pub fn query_params(action: &str) -> QueryParams {
    let mut params = BTreeMap::new();
    params.insert("Action".to_string(), action.to_string());
    params.insert("Version".to_string(), API_VERSION.to_string());
    params
}

/// Adds every option, flattened under its own key
pub fn add_options(params: &mut QueryParams, options: &DeliveryOptions) {
    for (key, value) in options.iter() {
        flatten_into(params, key, value);
    }
}

/// Adds `value`'s serde form under `prefix`
pub fn add_serialized(
    params: &mut QueryParams,
    prefix: &str,
    value: &impl Serialize,
) -> Result<(), ProviderError> {
    let value =
        serde_json::to_value(value).map_err(|e| ProviderError::InvalidRequest(e.to_string()))?;

    flatten_into(params, prefix, &value);

    Ok(())
}

/// Flattens a JSON value into Query API keys.
///
/// Objects become `Parent.Child`, arrays become `Parent.member.N` counted from 1, and nulls are
/// skipped.
fn flatten_into(params: &mut QueryParams, prefix: &str, value: &Value) {
    match value {
        Value::Null => {}
        Value::Bool(b) => {
            params.insert(prefix.to_string(), b.to_string());
        }
        Value::Number(n) => {
            params.insert(prefix.to_string(), n.to_string());
        }
        Value::String(s) => {
            params.insert(prefix.to_string(), s.clone());
        }
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                flatten_into(params, &format!("{prefix}.member.{}", i + 1), item);
            }
        }
        Value::Object(fields) => {
            for (key, item) in fields {
                let key = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten_into(params, &key, item);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use crate::domain::mail::{Destination, DeliveryOptions};

    use super::*;

    #[test]
    fn test_query_params_basic() {
        let params = query_params("GetSendQuota");

        assert_eq!(params.get("Action").map(String::as_str), Some("GetSendQuota"));
        assert_eq!(params.get("Version").map(String::as_str), Some(API_VERSION));
    }

    #[test]
    fn test_destination_is_flattened_into_members() -> TestResult {
        let mut params = QueryParams::new();
        let destination = Destination {
            to_addresses: vec!["b@x.com".to_string(), "c@x.com".to_string()],
            cc_addresses: None,
            bcc_addresses: Some(vec!["d@x.com".to_string()]),
        };

        add_serialized(&mut params, "Destination", &destination)?;

        assert_eq!(
            params,
            QueryParams::from([
                ("Destination.ToAddresses.member.1".to_string(), "b@x.com".to_string()),
                ("Destination.ToAddresses.member.2".to_string(), "c@x.com".to_string()),
                ("Destination.BccAddresses.member.1".to_string(), "d@x.com".to_string()),
            ])
        );

        Ok(())
    }

    #[test]
    fn test_options_are_flattened_by_key() {
        let mut params = QueryParams::new();
        let options = DeliveryOptions::new()
            .with("ConfigurationSetName", "marketing")
            .with("ReplyToAddresses", json!(["r@x.com"]))
            .with("Tags", json!([{ "Name": "campaign", "Value": "spring" }]));

        add_options(&mut params, &options);

        assert_eq!(
            params.get("ConfigurationSetName").map(String::as_str),
            Some("marketing")
        );
        assert_eq!(
            params.get("ReplyToAddresses.member.1").map(String::as_str),
            Some("r@x.com")
        );
        assert_eq!(
            params.get("Tags.member.1.Name").map(String::as_str),
            Some("campaign")
        );
    }
}
