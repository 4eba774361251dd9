use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Identifier of a Todoist resource.
///
/// Older API versions hand out numeric ids, the v1 API uses strings. The id is
/// kept in whichever shape it arrived so it round-trips unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceId {
    Number(u64),
    Text(String),
}

impl From<u64> for ResourceId {
    fn from(id: u64) -> Self {
        Self::Number(id)
    }
}

impl From<&str> for ResourceId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_string())
    }
}

impl From<String> for ResourceId {
    fn from(id: String) -> Self {
        Self::Text(id)
    }
}

impl std::fmt::Display for ResourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(id) => write!(f, "{}", id),
            Self::Text(id) => write!(f, "{}", id),
        }
    }
}

/// Color of a project or label, either a numeric color id or a color name
/// such as `berry_red`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Color {
    Id(u32),
    Name(String),
}

/// Read access to a record as the API sent it.
///
/// Records keep the remote payload verbatim: explicit nulls, unknown fields
/// and missing fields all survive a decode and re-encode unchanged. The
/// typed accessors are lenient and return `None` for anything absent, null
/// or of an unexpected shape.
pub trait Record {
    fn fields(&self) -> &Map<String, Value>;

    /// Field value, with JSON null treated as absent
    fn field(&self, key: &str) -> Option<&Value> {
        self.fields().get(key).filter(|value| !value.is_null())
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.field(key).and_then(Value::as_str)
    }

    fn bool_field(&self, key: &str) -> Option<bool> {
        self.field(key).and_then(Value::as_bool)
    }

    fn id_field(&self, key: &str) -> Option<ResourceId> {
        match self.field(key)? {
            Value::String(id) => Some(ResourceId::Text(id.clone())),
            Value::Number(id) => id.as_u64().map(ResourceId::Number),
            _ => None,
        }
    }

    fn id(&self) -> Option<ResourceId> {
        self.id_field("id")
    }
}

macro_rules! record {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Map<String, Value>);

        impl Record for $name {
            fn fields(&self) -> &Map<String, Value> {
                &self.0
            }
        }

        impl From<Map<String, Value>> for $name {
            fn from(fields: Map<String, Value>) -> Self {
                Self(fields)
            }
        }

        impl From<$name> for Value {
            fn from(record: $name) -> Self {
                Value::Object(record.0)
            }
        }
    };
}

record!(
    /// A Todoist project
    Project
);
record!(
    /// A section inside a project
    Section
);
record!(
    /// A Todoist task
    Task
);
record!(
    /// A comment on a task or project
    Comment
);
record!(
    /// A personal label
    Label
);
record!(
    /// A user collaborating on a shared project
    Collaborator
);
record!(
    /// One entry of the completed-tasks listings
    CompletedTask
);
record!(
    /// Page of completed tasks
    CompletedTasksResponse
);
record!(
    /// Completion count for a single day
    DayItem
);
record!(
    /// Karma and completion statistics
    ProductivityStats
);

/// Decode the objects of an array field, skipping anything else.
fn objects<T: From<Map<String, Value>>>(value: Option<&Value>) -> Vec<T> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.as_object().cloned().map(T::from))
                .collect()
        })
        .unwrap_or_default()
}

impl Project {
    pub fn name(&self) -> Option<&str> {
        self.str_field("name")
    }

    pub fn parent_id(&self) -> Option<ResourceId> {
        self.id_field("parent_id")
    }

    pub fn color(&self) -> Option<Color> {
        self.field("color")
            .and_then(|color| serde_json::from_value(color.clone()).ok())
    }

    pub fn is_favorite(&self) -> bool {
        self.bool_field("is_favorite")
            .or_else(|| self.bool_field("favorite"))
            .unwrap_or(false)
    }

    pub fn is_inbox(&self) -> bool {
        self.bool_field("inbox_project").unwrap_or(false)
    }
}

impl Section {
    pub fn name(&self) -> Option<&str> {
        self.str_field("name")
    }

    pub fn project_id(&self) -> Option<ResourceId> {
        self.id_field("project_id")
    }
}

/// Due date of a task, decoded on demand from [`Task::due`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TaskDue {
    /// Human readable form, e.g. "every monday"
    pub string: Option<String>,
    pub date: Option<String>,
    pub datetime: Option<String>,
    pub is_recurring: Option<bool>,
    pub recurring: Option<bool>,
    pub timezone: Option<String>,
}

impl TaskDue {
    pub fn recurs(&self) -> bool {
        self.is_recurring.or(self.recurring).unwrap_or(false)
    }
}

impl Task {
    pub fn content(&self) -> Option<&str> {
        self.str_field("content")
    }

    pub fn project_id(&self) -> Option<ResourceId> {
        self.id_field("project_id")
    }

    pub fn section_id(&self) -> Option<ResourceId> {
        self.id_field("section_id")
    }

    pub fn parent_id(&self) -> Option<ResourceId> {
        self.id_field("parent_id")
    }

    pub fn priority(&self) -> Option<u8> {
        self.field("priority")
            .and_then(Value::as_u64)
            .and_then(|p| u8::try_from(p).ok())
    }

    /// Due date, if set. Fields of an unexpected type read as unset.
    pub fn due(&self) -> Option<TaskDue> {
        let due = self.field("due")?.as_object()?;
        let lenient: Map<String, Value> = due
            .iter()
            .filter(|(_, value)| value.is_string() || value.is_boolean())
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        serde_json::from_value(Value::Object(lenient)).ok()
    }
}

impl Comment {
    pub fn content(&self) -> Option<&str> {
        self.str_field("content")
    }

    pub fn task_id(&self) -> Option<ResourceId> {
        self.id_field("task_id")
    }

    pub fn project_id(&self) -> Option<ResourceId> {
        self.id_field("project_id")
    }

    /// File attachment metadata, untouched
    pub fn attachment(&self) -> Option<&Value> {
        self.field("attachment")
    }
}

impl Label {
    pub fn name(&self) -> Option<&str> {
        self.str_field("name")
    }

    pub fn color(&self) -> Option<Color> {
        self.field("color")
            .and_then(|color| serde_json::from_value(color.clone()).ok())
    }

    pub fn is_favorite(&self) -> bool {
        self.bool_field("is_favorite")
            .or_else(|| self.bool_field("favorite"))
            .unwrap_or(false)
    }
}

impl Collaborator {
    pub fn name(&self) -> Option<&str> {
        self.str_field("name")
    }

    pub fn email(&self) -> Option<&str> {
        self.str_field("email")
    }
}

impl CompletedTask {
    pub fn content(&self) -> Option<&str> {
        self.str_field("content")
    }

    pub fn task_id(&self) -> Option<ResourceId> {
        self.id_field("task_id")
    }

    pub fn completed_at(&self) -> Option<&str> {
        self.str_field("completed_at")
    }
}

impl CompletedTasksResponse {
    pub fn items(&self) -> Vec<CompletedTask> {
        objects(self.field("items"))
    }

    pub fn next_cursor(&self) -> Option<&str> {
        self.str_field("next_cursor")
    }
}

impl DayItem {
    pub fn day(&self) -> Option<&str> {
        self.str_field("date").or_else(|| self.str_field("day"))
    }

    pub fn completed(&self) -> Option<u64> {
        self.field("total_completed")
            .or_else(|| self.field("completed"))
            .and_then(Value::as_u64)
    }
}

impl ProductivityStats {
    pub fn karma(&self) -> Option<f64> {
        self.field("karma").and_then(Value::as_f64)
    }

    /// "up" or "down"
    pub fn karma_trend(&self) -> Option<&str> {
        self.str_field("karma_trend")
    }

    pub fn days_items(&self) -> Vec<DayItem> {
        objects(self.field("days_items"))
    }
}

/// A listing as returned by the API: either a bare array, or a page
/// envelope `{"results": [...], "next_cursor": ...}`. Either shape
/// re-encodes exactly as received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListResponse<T> {
    Items(Vec<T>),
    Page(Page<T>),
}

/// Paginated envelope of a listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub results: Vec<T>,
    /// `next_cursor` and anything else next to `results`
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

impl<T> ListResponse<T> {
    pub fn items(&self) -> &[T] {
        match self {
            Self::Items(items) => items,
            Self::Page(page) => &page.results,
        }
    }

    pub fn into_items(self) -> Vec<T> {
        match self {
            Self::Items(items) => items,
            Self::Page(page) => page.results,
        }
    }

    pub fn len(&self) -> usize {
        self.items().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }

    pub fn next_cursor(&self) -> Option<&str> {
        match self {
            Self::Items(_) => None,
            Self::Page(page) => page.rest.get("next_cursor").and_then(Value::as_str),
        }
    }
}
