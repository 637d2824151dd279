//! In-memory remediations client shared by the lifecycle integration tests.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use policy_remediation::{
    ClientError, ClientResult, Remediation, RemediationId, RemediationsClient,
    ResourceDiscoveryMode, SubscriptionPolicyRemediation,
};

pub const SUBSCRIPTION: &str = "00000000-0000-0000-0000-000000000000";
pub const ASSIGNMENT: &str = "/subscriptions/00000000-0000-0000-0000-000000000000/providers/Microsoft.Authorization/policyAssignments/require-tags";

#[derive(Default)]
pub struct InMemoryRemediationsClient {
    remediations: Mutex<HashMap<RemediationId, Remediation>>,
    /// Provisioning states reported by successive reads once cancellation was requested.
    states_after_cancel: Mutex<VecDeque<&'static str>>,
    get_error: Mutex<Option<ClientError>>,
    delete_error: Mutex<Option<ClientError>>,
    /// Acknowledge PUTs without storing them, as if the entity vanished right after.
    discard_puts: AtomicBool,
    pub gets: AtomicUsize,
    pub puts: AtomicUsize,
    pub cancels: AtomicUsize,
    pub deletes: AtomicUsize,
}

impl InMemoryRemediationsClient {
    pub fn with_states_after_cancel(self, states: &[&'static str]) -> Self {
        *self.states_after_cancel.lock().unwrap() = states.iter().copied().collect();
        self
    }

    pub fn fail_gets_with(&self, error: ClientError) {
        *self.get_error.lock().unwrap() = Some(error);
    }

    pub fn fail_deletes_with(&self, error: ClientError) {
        *self.delete_error.lock().unwrap() = Some(error);
    }

    pub fn discard_puts(&self) {
        self.discard_puts.store(true, Ordering::SeqCst);
    }

    pub fn insert(&self, id: &RemediationId, remediation: Remediation) {
        self.remediations
            .lock()
            .unwrap()
            .insert(id.clone(), remediation);
    }

    pub fn contains(&self, id: &RemediationId) -> bool {
        self.remediations.lock().unwrap().contains_key(id)
    }

    pub fn count(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RemediationsClient for InMemoryRemediationsClient {
    async fn get_at_subscription(&self, id: &RemediationId) -> ClientResult<Remediation> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = self.get_error.lock().unwrap().clone() {
            return Err(error);
        }

        let mut remediations = self.remediations.lock().unwrap();
        let remediation = remediations.get_mut(id).ok_or(ClientError::NotFound)?;

        if self.cancels.load(Ordering::SeqCst) > 0 {
            let mut states = self.states_after_cancel.lock().unwrap();
            let next = if states.len() > 1 {
                states.pop_front()
            } else {
                states.front().copied()
            };
            if let (Some(state), Some(props)) = (next, remediation.properties.as_mut()) {
                props.provisioning_state = Some(state.to_string());
            }
        }
        Ok(remediation.clone())
    }

    async fn create_or_update_at_subscription(
        &self,
        id: &RemediationId,
        parameters: &Remediation,
    ) -> ClientResult<Remediation> {
        self.puts.fetch_add(1, Ordering::SeqCst);
        let mut stored = parameters.clone();
        stored.id = Some(id.to_string());
        stored.name = Some(id.remediation_name.clone());
        stored.resource_type = Some("Microsoft.PolicyInsights/remediations".to_string());
        if let Some(props) = stored.properties.as_mut() {
            props.provisioning_state = Some("Accepted".to_string());
        }
        if !self.discard_puts.load(Ordering::SeqCst) {
            self.insert(id, stored.clone());
        }
        Ok(stored)
    }

    async fn cancel_at_subscription(&self, id: &RemediationId) -> ClientResult<Remediation> {
        self.cancels.fetch_add(1, Ordering::SeqCst);
        self.remediations
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or(ClientError::NotFound)
    }

    async fn delete_at_subscription(&self, id: &RemediationId) -> ClientResult<()> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = self.delete_error.lock().unwrap().clone() {
            return Err(error);
        }
        self.remediations
            .lock()
            .unwrap()
            .remove(id)
            .map(|_| ())
            .ok_or(ClientError::NotFound)
    }
}

pub fn remediation_config(name: &str, mode: ResourceDiscoveryMode) -> SubscriptionPolicyRemediation {
    SubscriptionPolicyRemediation {
        name: name.to_string(),
        subscription_id: SUBSCRIPTION.to_string(),
        policy_assignment_id: ASSIGNMENT.to_string(),
        location_filters: vec!["westeurope".to_string(), "northeurope".to_string()],
        resource_count: Some(500),
        parallel_deployments: Some(10),
        failure_percentage: Some(0.1),
        resource_discovery_mode: mode,
        ..Default::default()
    }
}
