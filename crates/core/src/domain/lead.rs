use serde::{Deserialize, Serialize};

/// Free-audit request captured by the landing page form.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub lot_size: String,
}

/// A lead whose fields passed validation, trimmed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub name: String,
    pub email: String,
    pub lot_size: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadReceipt {
    pub title: String,
    pub message: String,
}

impl LeadReceipt {
    pub fn received() -> Self {
        Self {
            title: "Audit Request Sent!".to_string(),
            message: "We've received your request and will be in touch shortly.".to_string(),
        }
    }
}
