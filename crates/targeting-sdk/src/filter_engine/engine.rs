//! Core FilterEngine implementation

use super::types::{EvaluationRequest, EvaluationResponse, ValidationResult};
use crate::config::EngineConfig;
use crate::error::{Result, SdkError};
use chrono::Utc;
use std::sync::Arc;
use targeting_core::{Filter, FilterValidator, ReferenceData, ValidationError};
use targeting_repository::{FilterRepository, RepositoryError};
use targeting_runtime::{FilterEvaluator, ListService, RecordLookup};
use tokio::sync::Mutex;

pub struct FilterEngine {
    /// Filter storage
    repository: Arc<dyn FilterRepository>,

    /// Evaluator bound to the membership lookup
    evaluator: FilterEvaluator,

    /// List service, when membership is served by one
    lists: Option<ListService>,

    /// Configuration
    config: EngineConfig,

    /// Held across name check and save so names stay unique under concurrency
    write_lock: Mutex<()>,
}

impl FilterEngine {
    /// Create an engine from its parts; see [`FilterEngineBuilder`](crate::FilterEngineBuilder)
    pub fn new(
        repository: Arc<dyn FilterRepository>,
        evaluator: FilterEvaluator,
        lists: Option<ListService>,
        config: EngineConfig,
    ) -> Self {
        Self {
            repository,
            evaluator,
            lists,
            config,
            write_lock: Mutex::new(()),
        }
    }

    /// Get configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// List service backing distribution-list conditions, if any
    pub fn list_service(&self) -> Option<&ListService> {
        self.lists.as_ref()
    }

    /// Underlying evaluator
    pub fn evaluator(&self) -> &FilterEvaluator {
        &self.evaluator
    }

    // ========== Management ==========

    /// Validate and store a new filter
    ///
    /// Any id or timestamps on the input are ignored; the stored filter is
    /// returned with its assigned ids and positions.
    pub async fn create_filter(&self, mut filter: Filter) -> Result<Filter> {
        FilterValidator::validate(&filter)?;

        let _guard = self.write_lock.lock().await;
        if self.repository.exists_by_name(&filter.name).await? {
            return Err(ValidationError::DuplicateName { name: filter.name }.into());
        }

        filter.id = None;
        filter.date_create = None;
        filter.last_update = None;
        clear_child_ids(&mut filter);

        let stored = self.repository.save(filter).await?;
        tracing::info!("Created filter {:?} '{}'", stored.id, stored.name);
        Ok(stored)
    }

    /// Replace a stored filter's name, description, active flag, conditions
    /// and groups; the target reference stays as stored
    pub async fn update_filter(&self, id: i64, filter: Filter) -> Result<Filter> {
        let _guard = self.write_lock.lock().await;
        let existing = self
            .repository
            .load_by_id(id)
            .await?
            .ok_or(SdkError::FilterNotFound(id))?;

        FilterValidator::validate(&filter)?;

        if self.repository.exists_by_name_excluding(&filter.name, id).await? {
            return Err(ValidationError::DuplicateName { name: filter.name }.into());
        }

        let mut updated = Filter {
            id: Some(id),
            target_id: existing.target_id,
            date_create: existing.date_create,
            last_update: existing.last_update,
            ..filter
        };
        clear_child_ids(&mut updated);

        let stored = self.repository.save(updated).await?;
        tracing::info!("Updated filter {} '{}'", id, stored.name);
        Ok(stored)
    }

    /// Delete a stored filter
    pub async fn delete_filter(&self, id: i64) -> Result<()> {
        match self.repository.delete_by_id(id).await {
            Ok(()) => {
                tracing::info!("Deleted filter {}", id);
                Ok(())
            }
            Err(RepositoryError::NotFound { .. }) => Err(SdkError::FilterNotFound(id)),
            Err(e) => Err(e.into()),
        }
    }

    /// Get a stored filter by id
    pub async fn get_filter(&self, id: i64) -> Result<Option<Filter>> {
        Ok(self.repository.load_by_id(id).await?)
    }

    /// All stored filters
    pub async fn list_filters(&self) -> Result<Vec<Filter>> {
        Ok(self.repository.list().await?)
    }

    /// Stored filters of one marketing target
    pub async fn list_filters_by_target(&self, target_id: i64) -> Result<Vec<Filter>> {
        Ok(self.repository.list_by_target(target_id).await?)
    }

    // ========== Validation ==========

    /// Structural validation only; nothing is persisted or looked up
    pub fn validate(&self, filter: &Filter) -> ValidationResult {
        ValidationResult::from_outcome(FilterValidator::validate(filter))
    }

    /// Vocabularies for client UIs
    pub fn reference_data(&self) -> ReferenceData {
        ReferenceData::current()
    }

    // ========== Evaluation ==========

    /// Evaluate a filter against a record
    pub async fn evaluate<R>(&self, filter: &Filter, record: &R) -> bool
    where
        R: RecordLookup + ?Sized,
    {
        if !self.config.trace_evaluations {
            return self.evaluator.evaluate(filter, record).await;
        }

        let trace = self.evaluator.evaluate_with_trace(filter, record).await;
        match serde_json::to_string(&trace) {
            Ok(json) => tracing::info!(target: "targeting_sdk::trace", "{}", json),
            Err(e) => tracing::warn!("Failed to serialize evaluation trace: {}", e),
        }
        trace.matched
    }

    /// Evaluate a stored filter; a missing filter or storage failure is `false`
    pub async fn evaluate_by_id<R>(&self, id: i64, record: &R) -> bool
    where
        R: RecordLookup + ?Sized,
    {
        match self.repository.load_by_id(id).await {
            Ok(Some(filter)) => self.evaluate(&filter, record).await,
            Ok(None) => {
                tracing::debug!("Filter {} not found, not matched", id);
                false
            }
            Err(e) => {
                tracing::warn!("Failed to load filter {}: {}", id, e);
                false
            }
        }
    }

    /// Evaluate an inline filter or a stored one
    pub async fn evaluate_request(&self, request: &EvaluationRequest) -> Result<EvaluationResponse> {
        let (matched, filter_id) = match (&request.filter, request.filter_id) {
            (Some(filter), _) => (self.evaluate(filter, &request.user_request).await, filter.id),
            (None, Some(id)) => (self.evaluate_by_id(id, &request.user_request).await, Some(id)),
            (None, None) => {
                return Err(SdkError::InvalidRequest(
                    "Either filter or filterId is required".to_string(),
                ))
            }
        };

        Ok(EvaluationResponse {
            matched,
            filter_id,
            evaluated_at: Utc::now(),
        })
    }
}

/// New content replaces the old, so groups and conditions get fresh ids
fn clear_child_ids(filter: &mut Filter) {
    for condition in &mut filter.conditions {
        condition.id = None;
    }
    for group in &mut filter.groups {
        group.id = None;
        for condition in &mut group.conditions {
            condition.id = None;
        }
    }
}
