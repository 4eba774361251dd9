// End-to-end tool calls against a mock Todoist API

use serde_json::{json, Value};
use todoist_core::RateLimits;
use todoist_mcp::{todoist_registry, ToolRegistry};
use todoist_sdk::TodoistClient;
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API_KEY: &str = "0123456789abcdef0123456789abcdef01234567";

fn record() -> Value {
    json!({"id": "1", "name": "n", "content": "c", "project_id": "2"})
}

fn registry_for(server: &MockServer, limits: RateLimits) -> ToolRegistry {
    let client = TodoistClient::builder()
        .base_url(server.uri())
        .api_key(API_KEY)
        .rate_limits(limits)
        .build()
        .unwrap();
    todoist_registry(client)
}

/// Mock every endpoint the tools reach with a minimal valid answer.
async fn mock_api(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/completed/get_stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"karma": 100.0})))
        .with_priority(1)
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/completed/get_(all|project)$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
        .with_priority(1)
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/projects/[^/]+/collaborators$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .with_priority(1)
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/[a-z]+$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/[a-z]+/[^/]+$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(record()))
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/quick/add"))
        .respond_with(ResponseTemplate::new(200).set_body_json(record()))
        .with_priority(1)
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path_regex(r"^/[a-z]+$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(record()))
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path_regex(r"^/[a-z]+/[^/]+(/close|/reopen)?$"))
        .respond_with(ResponseTemplate::new(204))
        .mount(server)
        .await;

    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(204))
        .mount(server)
        .await;
}

/// Minimal valid arguments for every registered tool
fn minimal_calls() -> Vec<(&'static str, Value)> {
    vec![
        ("list_projects", json!({})),
        ("create_project", json!({"name": "Home"})),
        ("get_project", json!({"project_id": 2})),
        ("update_project", json!({"project_id": 2, "name": "House"})),
        ("delete_project", json!({"project_id": 2})),
        ("get_project_collaborators", json!({"project_id": 2})),
        ("list_tasks", json!({})),
        ("create_task", json!({"content": "Water plants"})),
        ("get_task", json!({"task_id": 1})),
        ("update_task", json!({"task_id": 1, "priority": 4})),
        ("close_task", json!({"task_id": 1})),
        ("reopen_task", json!({"task_id": 1})),
        ("delete_task", json!({"task_id": 1})),
        ("quick_add_task", json!({"text": "Call mom tomorrow p1"})),
        ("list_sections", json!({})),
        ("create_section", json!({"name": "Backlog", "project_id": 2})),
        ("get_section", json!({"section_id": 3})),
        ("update_section", json!({"section_id": 3, "name": "Later"})),
        ("delete_section", json!({"section_id": 3})),
        ("list_comments", json!({"task_id": 1})),
        ("create_comment", json!({"content": "Done soon", "task_id": 1})),
        ("get_comment", json!({"comment_id": 4})),
        ("update_comment", json!({"comment_id": 4, "content": "Done"})),
        ("delete_comment", json!({"comment_id": 4})),
        ("list_labels", json!({})),
        ("create_label", json!({"name": "errand"})),
        ("get_label", json!({"label_id": 5})),
        ("update_label", json!({"label_id": 5, "favorite": true})),
        ("delete_label", json!({"label_id": 5})),
        ("get_completed_tasks", json!({"limit": 10})),
        ("get_completed_tasks_by_project", json!({"project_id": 2})),
        ("get_productivity_stats", json!({})),
    ]
}

fn expected_phrase(tool: &str) -> Option<&'static str> {
    let phrase = match tool {
        "create_project" => "Project created successfully:\n",
        "update_project" => "Project updated successfully",
        "delete_project" => "Project deleted successfully",
        "create_task" => "Task created successfully:\n",
        "update_task" => "Task updated successfully",
        "close_task" => "Task marked as completed successfully",
        "reopen_task" => "Task reopened successfully",
        "delete_task" => "Task deleted successfully",
        "quick_add_task" => "Task created via quick add:\n",
        "create_section" => "Section created successfully:\n",
        "update_section" => "Section updated successfully",
        "delete_section" => "Section deleted successfully",
        "create_comment" => "Comment created successfully:\n",
        "update_comment" => "Comment updated successfully",
        "delete_comment" => "Comment deleted successfully",
        "create_label" => "Label created successfully:\n",
        "update_label" => "Label updated successfully",
        "delete_label" => "Label deleted successfully",
        _ => return None,
    };
    Some(phrase)
}

#[tokio::test]
async fn test_every_tool_succeeds_with_minimal_arguments() {
    let server = MockServer::start().await;
    mock_api(&server).await;
    let registry = registry_for(&server, RateLimits::default());

    let calls = minimal_calls();
    assert_eq!(calls.len(), registry.len());

    for (tool, arguments) in calls {
        assert!(registry.contains(tool), "{} is not registered", tool);

        let result = registry.call(tool, arguments).await;
        let text = result.first_text().unwrap_or_default().to_string();
        assert!(!result.is_error(), "{} failed: {}", tool, text);

        match expected_phrase(tool) {
            Some(phrase) if phrase.ends_with('\n') => {
                assert!(text.starts_with(phrase), "{}: {}", tool, text);
                assert!(text.contains("\"id\": \"1\""), "{}: {}", tool, text);
            }
            Some(phrase) => assert_eq!(text, phrase, "{}", tool),
            None => {
                let parsed: Value = serde_json::from_str(&text)
                    .unwrap_or_else(|e| panic!("{} did not return JSON: {}", tool, e));
                assert!(parsed.is_array() || parsed.is_object(), "{}", tool);
            }
        }
    }
}

#[tokio::test]
async fn test_unknown_tool() {
    let server = MockServer::start().await;
    let registry = registry_for(&server, RateLimits::default());

    let result = registry.call("archive_everything", json!({})).await;

    assert!(result.is_error());
    assert_eq!(result.first_text(), Some("Error: Unknown tool: archive_everything"));
}

#[tokio::test]
async fn test_missing_required_argument_is_a_tool_error() {
    let server = MockServer::start().await;
    let registry = registry_for(&server, RateLimits::default());

    let result = registry.call("get_task", json!({})).await;

    assert!(result.is_error());
    assert!(result.first_text().unwrap().contains("task_id"));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_local_rate_limit_refuses_second_call() {
    let server = MockServer::start().await;
    mock_api(&server).await;
    let registry = registry_for(
        &server,
        RateLimits {
            max_requests: 1,
            ..RateLimits::default()
        },
    );

    let first = registry.call("list_projects", json!({})).await;
    assert!(!first.is_error());

    let second = registry.call("list_labels", json!({})).await;
    assert!(second.is_error());
    assert!(second
        .first_text()
        .unwrap()
        .starts_with("Error: Rate limit exceeded. Resets at "));

    // The refused call never reached the API
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_remote_rate_limit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/labels"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;
    let registry = registry_for(&server, RateLimits::default());

    let result = registry.call("list_labels", json!({})).await;

    assert!(result.is_error());
    assert_eq!(result.first_text(), Some("Error: Rate limit exceeded"));
}

#[tokio::test]
async fn test_remote_error_message_is_forwarded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tasks/404"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"error": "Task not found"})),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/projects"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let registry = registry_for(&server, RateLimits::default());

    let not_found = registry.call("get_task", json!({"task_id": 404})).await;
    assert!(not_found.is_error());
    assert_eq!(not_found.first_text(), Some("Error: Task not found"));

    let failed = registry.call("list_projects", json!({})).await;
    assert!(failed.is_error());
    let text = failed.first_text().unwrap();
    assert!(text.starts_with("Error: "));
    assert!(text.contains("500"), "{}", text);
}

#[tokio::test]
async fn test_remote_payloads_are_relayed_verbatim() {
    let project = json!({
        "id": "5",
        "name": "Work",
        "parent_id": null,
        "order": null,
        "color": "blue",
        "is_favorite": false
    });
    let task = json!({
        "id": "7",
        "content": "Renew passport",
        "project_id": "5",
        "section_id": null,
        "description": "",
        "labels": [],
        "due": {"string": null, "date": "2024-05-01", "is_recurring": false, "lang": "en"},
        "deadline": null
    });
    let section = json!({"id": "3", "project_id": "5", "name": "Backlog", "order": null});
    let comment = json!({
        "id": "4",
        "content": "Bring the old one",
        "task_id": "7",
        "project_id": null,
        "attachment": null
    });
    let label = json!({"id": "6", "name": "errand", "color": "charcoal", "order": null});
    let page = |item: &Value| json!({"results": [item.clone()], "next_cursor": null});

    let cases: Vec<(&str, Value, &str, &str, Value)> = vec![
        ("list_projects", json!({}), "GET", "/projects", page(&project)),
        ("create_project", json!({"name": "Work"}), "POST", "/projects", project.clone()),
        ("get_project", json!({"project_id": 5}), "GET", "/projects/5", project.clone()),
        (
            "get_project_collaborators",
            json!({"project_id": 5}),
            "GET",
            "/projects/5/collaborators",
            json!([{"id": "1", "name": "Alice", "email": null}]),
        ),
        ("list_tasks", json!({}), "GET", "/tasks", json!({"results": [task.clone()], "next_cursor": "c2"})),
        ("create_task", json!({"content": "Renew passport"}), "POST", "/tasks", task.clone()),
        ("get_task", json!({"task_id": 7}), "GET", "/tasks/7", task.clone()),
        ("quick_add_task", json!({"text": "Renew passport tomorrow"}), "POST", "/quick/add", task.clone()),
        ("list_sections", json!({"project_id": 5}), "GET", "/sections", json!([section.clone()])),
        (
            "create_section",
            json!({"name": "Backlog", "project_id": 5}),
            "POST",
            "/sections",
            section.clone(),
        ),
        ("get_section", json!({"section_id": 3}), "GET", "/sections/3", section.clone()),
        ("list_comments", json!({"task_id": 7}), "GET", "/comments", page(&comment)),
        (
            "create_comment",
            json!({"content": "Bring the old one", "task_id": 7}),
            "POST",
            "/comments",
            comment.clone(),
        ),
        ("get_comment", json!({"comment_id": 4}), "GET", "/comments/4", comment.clone()),
        ("list_labels", json!({}), "GET", "/labels", page(&label)),
        ("create_label", json!({"name": "errand"}), "POST", "/labels", label.clone()),
        ("get_label", json!({"label_id": 6}), "GET", "/labels/6", label.clone()),
        (
            "get_completed_tasks",
            json!({}),
            "GET",
            "/completed/get_all",
            json!({
                "items": [{"task_id": "7", "content": "Renew passport", "note_count": null}],
                "projects": {},
                "next_cursor": null
            }),
        ),
        (
            "get_completed_tasks_by_project",
            json!({"project_id": 5}),
            "GET",
            "/completed/get_project",
            json!({"items": [], "next_cursor": null}),
        ),
        (
            "get_productivity_stats",
            json!({}),
            "GET",
            "/completed/get_stats",
            json!({"karma": null, "karma_trend": "up", "days_items": [], "goals": {"daily_goal": 5}}),
        ),
    ];

    for (tool, arguments, http_method, endpoint, body) in cases {
        let server = MockServer::start().await;
        Mock::given(method(http_method))
            .and(path(endpoint))
            .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
            .expect(1)
            .mount(&server)
            .await;
        let registry = registry_for(&server, RateLimits::default());

        let result = registry.call(tool, arguments).await;
        let text = result.first_text().unwrap_or_default().to_string();
        assert!(!result.is_error(), "{} failed: {}", tool, text);

        let payload = match expected_phrase(tool) {
            Some(phrase) => text
                .strip_prefix(phrase)
                .unwrap_or_else(|| panic!("{} lacks its phrase: {}", tool, text)),
            None => text.as_str(),
        };
        let relayed: Value = serde_json::from_str(payload).unwrap();
        assert_eq!(relayed, body, "{}", tool);
    }
}
