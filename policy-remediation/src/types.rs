//! Remote remediation model and the resource configuration/state mapped onto it.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::arm::id::RemediationId;

/// How the remediation discovers the resources it should remediate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ResourceDiscoveryMode {
    #[default]
    ExistingNonCompliant,
    ReEvaluateCompliance,
}

impl fmt::Display for ResourceDiscoveryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExistingNonCompliant => f.write_str("ExistingNonCompliant"),
            Self::ReEvaluateCompliance => f.write_str("ReEvaluateCompliance"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemediationFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locations: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailureThreshold {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentage: Option<f64>,
}

/// Properties of a remediation as reported by the remote service
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemediationProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_assignment_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_definition_reference_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_discovery_mode: Option<ResourceDiscoveryMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provisioning_state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<RemediationFilters>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parallel_deployments: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_threshold: Option<FailureThreshold>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_on: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated_on: Option<DateTime<Utc>>,
}

impl RemediationProperties {
    /// Remote entities without a discovery mode behave as `ExistingNonCompliant`.
    pub fn discovery_mode(&self) -> ResourceDiscoveryMode {
        self.resource_discovery_mode.unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Remediation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<RemediationProperties>,
}

/// User configuration for a subscription policy remediation
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SubscriptionPolicyRemediation {
    pub name: String,
    pub subscription_id: String,
    pub policy_assignment_id: String,
    #[serde(default)]
    pub failure_percentage: Option<f64>,
    #[serde(default)]
    pub parallel_deployments: Option<i64>,
    #[serde(default)]
    pub resource_count: Option<i64>,
    #[serde(default)]
    pub location_filters: Vec<String>,
    #[serde(default)]
    pub policy_definition_reference_id: Option<String>,
    #[serde(default)]
    pub resource_discovery_mode: ResourceDiscoveryMode,
}

impl SubscriptionPolicyRemediation {
    pub fn id(&self) -> RemediationId {
        RemediationId::new(self.subscription_id.clone(), self.name.clone())
    }

    /// Build the request properties sent on create/update
    pub fn to_properties(&self) -> RemediationProperties {
        let filters = (!self.location_filters.is_empty()).then(|| RemediationFilters {
            locations: Some(self.location_filters.clone()),
        });

        RemediationProperties {
            policy_assignment_id: Some(self.policy_assignment_id.clone()),
            policy_definition_reference_id: self
                .policy_definition_reference_id
                .clone()
                .filter(|v| !v.is_empty()),
            resource_discovery_mode: Some(self.resource_discovery_mode),
            filters,
            resource_count: self.resource_count,
            parallel_deployments: self.parallel_deployments,
            failure_threshold: self.failure_percentage.map(|percentage| FailureThreshold {
                percentage: Some(percentage),
            }),
            ..Default::default()
        }
    }
}

/// The observed state of a remediation, in configuration terms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemediationState {
    pub id: String,
    pub config: SubscriptionPolicyRemediation,
    pub provisioning_state: Option<String>,
}

impl RemediationState {
    pub(crate) fn from_properties(id: &RemediationId, props: &RemediationProperties) -> Self {
        let config = SubscriptionPolicyRemediation {
            name: id.remediation_name.clone(),
            subscription_id: id.subscription_id.clone(),
            policy_assignment_id: props.policy_assignment_id.clone().unwrap_or_default(),
            failure_percentage: props
                .failure_threshold
                .as_ref()
                .and_then(|threshold| threshold.percentage),
            parallel_deployments: props.parallel_deployments,
            resource_count: props.resource_count,
            location_filters: props
                .filters
                .as_ref()
                .and_then(|filters| filters.locations.clone())
                .unwrap_or_default(),
            policy_definition_reference_id: props.policy_definition_reference_id.clone(),
            resource_discovery_mode: props.discovery_mode(),
        };

        Self {
            id: id.to_string(),
            config,
            provisioning_state: props.provisioning_state.clone(),
        }
    }
}
