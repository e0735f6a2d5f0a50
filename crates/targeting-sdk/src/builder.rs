//! Builder pattern for FilterEngine

use crate::config::EngineConfig;
use crate::error::{Result, SdkError};
use crate::filter_engine::FilterEngine;
use std::path::PathBuf;
use std::sync::Arc;
use targeting_repository::{FilterRepository, RepositoryConfig};
use targeting_runtime::{FilterEvaluator, ListLoader, ListService, MembershipLookup};

/// Builder for FilterEngine
///
/// # Example
///
/// ```rust,ignore
/// use targeting_sdk::{FilterEngineBuilder, RepositoryConfig};
///
/// // Filters on disk, distribution lists from YAML configs
/// let engine = FilterEngineBuilder::new()
///     .with_repository(RepositoryConfig::file_system("data/filters"))
///     .with_lists_dir("config/lists")
///     .build()
///     .await?;
///
/// // Everything in memory (for testing)
/// let engine = FilterEngineBuilder::new().build().await?;
/// ```
pub struct FilterEngineBuilder {
    config: EngineConfig,
    repository: Option<Arc<dyn FilterRepository>>,
    list_service: Option<ListService>,
    membership: Option<Arc<dyn MembershipLookup>>,
}

impl FilterEngineBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            config: EngineConfig::new(),
            repository: None,
            list_service: None,
            membership: None,
        }
    }

    /// Start from an existing configuration
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Set repository configuration
    pub fn with_repository(mut self, config: RepositoryConfig) -> Self {
        self.config.repository = config;
        self
    }

    /// Use an already constructed repository instead of the configured one
    pub fn with_repository_instance(mut self, repository: Arc<dyn FilterRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    /// Load distribution lists from the YAML configs in `dir`
    pub fn with_lists_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.lists_dir = Some(dir.into());
        self
    }

    /// Set list service for distribution-list lookups
    pub fn with_list_service(mut self, service: ListService) -> Self {
        self.list_service = Some(service);
        self
    }

    /// Resolve distribution-list membership through a custom lookup
    ///
    /// Takes precedence over any list service or lists directory.
    pub fn with_membership(mut self, membership: Arc<dyn MembershipLookup>) -> Self {
        self.membership = Some(membership);
        self
    }

    /// Enable evaluation tracing
    pub fn enable_trace(mut self, enable: bool) -> Self {
        self.config.trace_evaluations = enable;
        self
    }

    /// Build the filter engine
    pub async fn build(self) -> Result<FilterEngine> {
        let repository = match self.repository {
            Some(repository) => repository,
            None => self
                .config
                .repository
                .build()
                .await
                .map_err(|e| SdkError::Config(format!("Failed to open repository: {}", e)))?,
        };

        let (evaluator, lists) = match self.membership {
            Some(membership) => (FilterEvaluator::new(membership), None),
            None => {
                let service = match (self.list_service, &self.config.lists_dir) {
                    (Some(service), _) => service,
                    (None, Some(dir)) => ListLoader::new(dir).build_service().await?,
                    (None, None) => ListService::new(),
                };
                (FilterEvaluator::new(Arc::new(service.clone())), Some(service))
            }
        };

        tracing::info!(
            "Filter engine ready (repository: {:?}, trace: {})",
            self.config.repository.source,
            self.config.trace_evaluations
        );

        Ok(FilterEngine::new(repository, evaluator, lists, self.config))
    }
}

impl Default for FilterEngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
