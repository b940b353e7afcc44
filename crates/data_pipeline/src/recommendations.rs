use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use models::{ClientFinancialProfile, GoalProjection};
use serde_json::{Map, Value};
use tracing::debug;

use crate::cache::{RecommendationCache, recommendation_cache_key};

/// External source of free-form goal advice. Its output is opaque to the
/// pipeline and is copied into the report unchanged.
pub trait RecommendationProvider: Send + Sync {
    fn name(&self) -> &str;
    fn recommend(
        &self,
        profile: &ClientFinancialProfile,
        projection: &GoalProjection,
    ) -> Result<Option<Value>>;
}

/// Serves recommendations from a JSON object keyed by goal id.
pub struct FileRecommendationProvider {
    by_goal: Map<String, Value>,
}

impl FileRecommendationProvider {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Reading recommendations file: {}", path.display()))?;
        let value: Value = serde_json::from_str(&raw)
            .with_context(|| format!("Parsing recommendations JSON in {}", path.display()))?;
        Self::from_value(value).with_context(|| format!("Loading {}", path.display()))
    }

    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(by_goal) => Ok(Self { by_goal }),
            other => Err(anyhow!(
                "recommendations must be an object keyed by goal id, got {}",
                type_name(&other)
            )),
        }
    }
}

fn type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl RecommendationProvider for FileRecommendationProvider {
    fn name(&self) -> &str {
        "file"
    }

    fn recommend(
        &self,
        _profile: &ClientFinancialProfile,
        projection: &GoalProjection,
    ) -> Result<Option<Value>> {
        Ok(self.by_goal.get(&projection.goal.id).cloned())
    }
}

/// Consults the cache before the provider and stores fresh answers.
pub struct CachedRecommender<'a> {
    provider: &'a dyn RecommendationProvider,
    cache: &'a dyn RecommendationCache,
}

impl<'a> CachedRecommender<'a> {
    pub fn new(provider: &'a dyn RecommendationProvider, cache: &'a dyn RecommendationCache) -> Self {
        Self { provider, cache }
    }

    pub fn recommend(
        &self,
        profile: &ClientFinancialProfile,
        projection: &GoalProjection,
    ) -> Result<Option<Value>> {
        let key = recommendation_cache_key(profile, &projection.goal);
        if let Some(hit) = self.cache.get(&key) {
            debug!(goal = %projection.goal.id, "Recommendation cache hit");
            return Ok(Some(hit));
        }
        let fresh = self
            .provider
            .recommend(profile, projection)
            .with_context(|| {
                format!(
                    "Recommendation provider '{}' failed for goal {}",
                    self.provider.name(),
                    projection.goal.id
                )
            })?;
        if let Some(value) = &fresh {
            self.cache.put(&key, value.clone());
        }
        Ok(fresh)
    }
}
