//! # Todoist SDK
//!
//! Rate-limited async client for the Todoist REST API.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use todoist_sdk::{TodoistClient, TodoistResult};
//! use todoist_sdk::api::TaskFilters;
//!
//! #[tokio::main]
//! async fn main() -> TodoistResult<()> {
//!     let client = TodoistClient::builder()
//!         .api_key("0123456789abcdef0123456789abcdef01234567")
//!         .build()?;
//!
//!     let filters = TaskFilters {
//!         filter: Some("today | overdue".to_string()),
//!         ..Default::default()
//!     };
//!     let tasks = client.tasks().list(&filters).await?;
//!     println!("Found {} tasks", tasks.len());
//!
//!     let window = client.rate_window();
//!     println!("{} requests used this window", window.requests_in_window);
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod transport;

pub use client::{TodoistClient, TodoistClientBuilder};
pub use config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use error::{ErrorKind, TodoistError, TodoistResult};

// Re-export core types for convenience
pub use todoist_core::{
    types::{
        Collaborator, Color, Comment, CompletedTask, CompletedTasksResponse, DayItem, Label,
        ListResponse, Page, ProductivityStats, Project, Record, ResourceId, Section, Task,
        TaskDue,
    },
    RateLimits, RateWindow,
};
