//! Resource accessors, one per remote collection.

mod comments;
mod completed;
mod health;
mod labels;
mod projects;
mod sections;
mod tasks;

pub use comments::{CommentsApi, CreateCommentRequest, UpdateCommentRequest};
pub use completed::{CompletedApi, CompletionFilters};
pub use health::HealthApi;
pub use labels::{CreateLabelRequest, LabelsApi, UpdateLabelRequest};
pub use projects::{CreateProjectRequest, ProjectsApi, UpdateProjectRequest};
pub use sections::{CreateSectionRequest, SectionsApi, UpdateSectionRequest};
pub use tasks::{
    CreateTaskRequest, QuickAddRequest, TaskFields, TaskFilters, TasksApi, UpdateTaskRequest,
};

use serde::Serialize;
use std::fmt::Display;
use todoist_core::types::ResourceId;

/// Ordered query parameters. Unset values are never pushed, so the query
/// string holds exactly the filters the caller set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct QueryPairs(Vec<(&'static str, String)>);

impl QueryPairs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `key` if `value` is set.
    pub fn push_opt<T: Display + ?Sized>(&mut self, key: &'static str, value: Option<&T>) {
        if let Some(value) = value {
            self.0.push((key, value.to_string()));
        }
    }

    pub fn as_slice(&self) -> &[(&'static str, String)] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Comma-join ids for array filters.
pub(crate) fn join_ids(ids: &[ResourceId]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}
