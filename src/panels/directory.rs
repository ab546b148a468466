//! Category taxonomy and severity levels.

use crate::api::{CategoriesResponse, DashboardApi, SeverityLevelsResponse};
use crate::error::ApiError;
use crate::model::humanize;

pub const CATEGORIES_FAILED: &str = "Could not load categories.";
pub const SEVERITY_LEVELS_FAILED: &str = "Could not load severity levels.";

/// Load state of one list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DirectoryList {
    #[default]
    Loading,
    Loaded(Vec<String>),
    Failed,
}

impl DirectoryList {
    fn from_outcome<T>(
        outcome: Result<T, ApiError>,
        names: impl FnOnce(T) -> Vec<String>,
        what: &str,
    ) -> Self {
        match outcome {
            Ok(response) => Self::Loaded(names(response)),
            Err(err) => {
                tracing::warn!(error = %err, list = what, "directory fetch failed");
                Self::Failed
            }
        }
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// Lists the category names and severity levels the service knows about.
///
/// The two lists are fetched separately and fail independently.
#[derive(Debug, Default)]
pub struct CategoryDirectory {
    categories: DirectoryList,
    severity_levels: DirectoryList,
}

impl CategoryDirectory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn fetch_categories(api: &dyn DashboardApi) -> Result<CategoriesResponse, ApiError> {
        api.categories().await
    }

    pub async fn fetch_severity_levels(
        api: &dyn DashboardApi,
    ) -> Result<SeverityLevelsResponse, ApiError> {
        api.severity_levels().await
    }

    pub fn apply_categories(&mut self, outcome: Result<CategoriesResponse, ApiError>) {
        self.categories = DirectoryList::from_outcome(outcome, |r| r.categories, "categories");
    }

    pub fn apply_severity_levels(&mut self, outcome: Result<SeverityLevelsResponse, ApiError>) {
        self.severity_levels =
            DirectoryList::from_outcome(outcome, |r| r.severity_levels, "severity levels");
    }

    #[must_use]
    pub const fn categories(&self) -> &DirectoryList {
        &self.categories
    }

    #[must_use]
    pub const fn severity_levels(&self) -> &DirectoryList {
        &self.severity_levels
    }

    /// Rendered category entries, separators replaced by spaces.
    #[must_use]
    pub fn category_entries(&self) -> Vec<String> {
        match &self.categories {
            DirectoryList::Loading => Vec::new(),
            DirectoryList::Loaded(names) => names.iter().map(|n| humanize(n)).collect(),
            DirectoryList::Failed => vec![CATEGORIES_FAILED.to_string()],
        }
    }

    /// Rendered severity entries, as sent.
    #[must_use]
    pub fn severity_entries(&self) -> Vec<String> {
        match &self.severity_levels {
            DirectoryList::Loading => Vec::new(),
            DirectoryList::Loaded(names) => names.clone(),
            DirectoryList::Failed => vec![SEVERITY_LEVELS_FAILED.to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories_are_humanized() {
        let mut directory = CategoryDirectory::new();
        directory.apply_categories(Ok(CategoriesResponse {
            categories: vec!["billing_issue".to_string(), "staff_behaviour".to_string()],
        }));
        assert_eq!(
            directory.category_entries(),
            ["billing issue", "staff behaviour"]
        );
    }

    #[test]
    fn test_lists_fail_independently() {
        let mut directory = CategoryDirectory::new();
        directory.apply_categories(Err(ApiError::transport("refused")));
        directory.apply_severity_levels(Ok(SeverityLevelsResponse {
            severity_levels: vec!["low".to_string(), "critical".to_string()],
        }));

        assert_eq!(directory.category_entries(), [CATEGORIES_FAILED]);
        assert_eq!(directory.severity_entries(), ["low", "critical"]);
    }

    #[test]
    fn test_loading_renders_nothing() {
        let directory = CategoryDirectory::new();
        assert!(directory.categories().is_loading());
        assert!(directory.category_entries().is_empty());
        assert!(directory.severity_entries().is_empty());
    }
}
