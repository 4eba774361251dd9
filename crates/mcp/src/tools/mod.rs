pub mod comments;
pub mod labels;
pub mod productivity;
pub mod projects;
pub mod sections;
pub mod tasks;
mod registry;

pub use comments::{
    CreateCommentTool, DeleteCommentTool, GetCommentTool, ListCommentsTool, UpdateCommentTool,
};
pub use labels::{CreateLabelTool, DeleteLabelTool, GetLabelTool, ListLabelsTool, UpdateLabelTool};
pub use productivity::{
    GetCompletedTasksByProjectTool, GetCompletedTasksTool, GetProductivityStatsTool,
};
pub use projects::{
    CreateProjectTool, DeleteProjectTool, GetProjectCollaboratorsTool, GetProjectTool,
    ListProjectsTool, UpdateProjectTool,
};
pub use registry::{
    created_result, json_result, json_schema_any_object, json_schema_array, json_schema_boolean,
    json_schema_number, json_schema_object, json_schema_string, parse_args, Tool, ToolRegistry,
};
pub use sections::{
    CreateSectionTool, DeleteSectionTool, GetSectionTool, ListSectionsTool, UpdateSectionTool,
};
pub use tasks::{
    CloseTaskTool, CreateTaskTool, DeleteTaskTool, GetTaskTool, ListTasksTool, QuickAddTaskTool,
    ReopenTaskTool, UpdateTaskTool,
};

use std::sync::Arc;
use todoist_sdk::TodoistClient;

/// Registry holding every Todoist tool, in advertised order.
pub fn todoist_registry(client: TodoistClient) -> ToolRegistry {
    let mut registry = ToolRegistry::new();

    // Projects
    registry.register(Arc::new(ListProjectsTool::new(client.clone())));
    registry.register(Arc::new(CreateProjectTool::new(client.clone())));
    registry.register(Arc::new(GetProjectTool::new(client.clone())));
    registry.register(Arc::new(UpdateProjectTool::new(client.clone())));
    registry.register(Arc::new(DeleteProjectTool::new(client.clone())));
    registry.register(Arc::new(GetProjectCollaboratorsTool::new(client.clone())));

    // Tasks
    registry.register(Arc::new(ListTasksTool::new(client.clone())));
    registry.register(Arc::new(CreateTaskTool::new(client.clone())));
    registry.register(Arc::new(GetTaskTool::new(client.clone())));
    registry.register(Arc::new(UpdateTaskTool::new(client.clone())));
    registry.register(Arc::new(CloseTaskTool::new(client.clone())));
    registry.register(Arc::new(ReopenTaskTool::new(client.clone())));
    registry.register(Arc::new(DeleteTaskTool::new(client.clone())));
    registry.register(Arc::new(QuickAddTaskTool::new(client.clone())));

    // Sections
    registry.register(Arc::new(ListSectionsTool::new(client.clone())));
    registry.register(Arc::new(CreateSectionTool::new(client.clone())));
    registry.register(Arc::new(GetSectionTool::new(client.clone())));
    registry.register(Arc::new(UpdateSectionTool::new(client.clone())));
    registry.register(Arc::new(DeleteSectionTool::new(client.clone())));

    // Comments
    registry.register(Arc::new(ListCommentsTool::new(client.clone())));
    registry.register(Arc::new(CreateCommentTool::new(client.clone())));
    registry.register(Arc::new(GetCommentTool::new(client.clone())));
    registry.register(Arc::new(UpdateCommentTool::new(client.clone())));
    registry.register(Arc::new(DeleteCommentTool::new(client.clone())));

    // Labels
    registry.register(Arc::new(ListLabelsTool::new(client.clone())));
    registry.register(Arc::new(CreateLabelTool::new(client.clone())));
    registry.register(Arc::new(GetLabelTool::new(client.clone())));
    registry.register(Arc::new(UpdateLabelTool::new(client.clone())));
    registry.register(Arc::new(DeleteLabelTool::new(client.clone())));

    // Productivity
    registry.register(Arc::new(GetCompletedTasksTool::new(client.clone())));
    registry.register(Arc::new(GetCompletedTasksByProjectTool::new(client.clone())));
    registry.register(Arc::new(GetProductivityStatsTool::new(client)));

    registry
}
