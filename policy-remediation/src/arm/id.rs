//! Identifiers for subscription-scoped remediations.
//!
//! Ids are opaque keys: they render to the Resource Manager form for logs and
//! error messages and are never parsed back.

use std::fmt;

use serde::{Deserialize, Serialize};

const PROVIDER_SEGMENT: &str = "providers/Microsoft.PolicyInsights/remediations";

/// A remediation scoped to a subscription.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RemediationId {
    pub subscription_id: String,
    pub remediation_name: String,
}

impl RemediationId {
    pub fn new(subscription_id: impl Into<String>, remediation_name: impl Into<String>) -> Self {
        Self {
            subscription_id: subscription_id.into(),
            remediation_name: remediation_name.into(),
        }
    }
}

impl fmt::Display for RemediationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "/subscriptions/{}/{}/{}",
            self.subscription_id, PROVIDER_SEGMENT, self.remediation_name
        )
    }
}
