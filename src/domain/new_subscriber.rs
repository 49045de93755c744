use serde::Serialize;

use crate::domain::subscriber_attributes::SubscriberAttributes;
use crate::domain::subscriber_email::SubscriberEmail;

/// Subscriber record as accepted by the remote create and update endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct NewSubscriber {
    pub email_address: String,
    pub custom_fields: Vec<CustomField>,
    pub resubscribe: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CustomField {
    pub key: String,
    pub value: String,
}

impl CustomField {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl NewSubscriber {
    pub fn new(email: &SubscriberEmail, attributes: &SubscriberAttributes) -> Self {
        NewSubscriber {
            email_address: String::from(email.as_ref()),
            custom_fields: attributes.custom_fields(),
            resubscribe: false,
        }
    }
}
