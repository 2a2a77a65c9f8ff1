//! JSON-over-HTTP client for the project service

use super::ProjectService;
use crate::config::BoardConfig;
use crate::error::{BoardError, Result};
use crate::types::{
    Board, CheckItem, CheckItemId, CheckItemPatch, Checklist, ChecklistId, ChecklistPatch, Column,
    ColumnId, ColumnPatch, Comment, ProjectId, Task, TaskId, TaskPatch,
};
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{instrument, warn};
use url::Url;

const ACCESS_TOKEN_HEADER: &str = "x-access-token";

#[derive(Deserialize)]
struct BoardEnvelope {
    board: Board,
}

/// Pull a human-readable message out of an error body.
///
/// Tries `message`, then `error`, then falls back to the raw body.
fn extract_error_message(body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<Value>(body) {
        for key in ["message", "error"] {
            if let Some(msg) = json.get(key).and_then(|v| v.as_str()) {
                return msg.to_string();
            }
        }
    }
    body.to_string()
}

/// [`ProjectService`] backed by the project REST API
#[derive(Debug, Clone)]
pub struct HttpProjectService {
    client: Client,
    base_url: Url,
    access_token: Option<String>,
}

impl HttpProjectService {
    /// Build a client from loaded configuration
    pub fn from_config(config: &BoardConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            BoardError::from(figment::Error::from(format!(
                "invalid base_url '{}': {}",
                config.base_url, e
            )))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(figment::Error::from(format!(
                "base_url '{}' cannot be used as a base",
                config.base_url
            ))
            .into());
        }

        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            base_url,
            access_token: config.access_token.clone(),
        })
    }

    /// Client for `base_url` with otherwise default settings
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::from_config(&BoardConfig::default().with_base_url(base_url))
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // from_config rejects cannot-be-a-base URLs
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        let builder = self.client.request(method, self.endpoint(segments));
        match &self.access_token {
            Some(token) => builder.header(ACCESS_TOKEN_HEADER, token),
            None => builder,
        }
    }

    /// Map a non-2xx response to a `BoardError`
    async fn check_response(response: Response, resource: &str, id: &str) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = extract_error_message(&body);
        warn!(status = status.as_u16(), resource, id, %message, "project service rejected request");

        match status {
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                Err(BoardError::validation(message))
            }
            StatusCode::NOT_FOUND => Err(BoardError::not_found(resource, id)),
            _ => Err(BoardError::transport(format!(
                "{} {}",
                status.as_u16(),
                message
            ))),
        }
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        method: Method,
        segments: &[&str],
        body: Value,
        resource: &str,
        id: &str,
    ) -> Result<T> {
        let response = self.request(method, segments).json(&body).send().await?;
        let response = Self::check_response(response, resource, id).await?;
        Ok(response.json().await?)
    }

    async fn send_unit(
        &self,
        method: Method,
        segments: &[&str],
        body: Value,
        resource: &str,
        id: &str,
    ) -> Result<()> {
        let response = self.request(method, segments).json(&body).send().await?;
        Self::check_response(response, resource, id).await?;
        Ok(())
    }
}

#[async_trait]
impl ProjectService for HttpProjectService {
    #[instrument(skip(self), fields(project = %project_id))]
    async fn fetch_board(&self, project_id: &ProjectId) -> Result<Board> {
        let response = self
            .request(Method::GET, &["board", project_id.as_str()])
            .send()
            .await?;
        let response = Self::check_response(response, "board", project_id.as_str()).await?;
        let envelope: BoardEnvelope = response.json().await?;
        Ok(envelope.board)
    }

    #[instrument(skip(self), fields(project = %project_id))]
    async fn create_column(&self, project_id: &ProjectId, name: &str) -> Result<Column> {
        self.send_json(
            Method::POST,
            &["board", "columns"],
            json!({ "projectId": project_id, "name": name }),
            "project",
            project_id.as_str(),
        )
        .await
    }

    #[instrument(skip(self), fields(project = %project_id))]
    async fn update_column(
        &self,
        project_id: &ProjectId,
        column_id: &ColumnId,
        patch: &ColumnPatch,
    ) -> Result<Column> {
        self.send_json(
            Method::PUT,
            &["board", "columns"],
            json!({ "projectId": project_id, "columnId": column_id, "update": patch }),
            "column",
            column_id.as_str(),
        )
        .await
    }

    #[instrument(skip(self), fields(project = %project_id))]
    async fn clear_column(&self, project_id: &ProjectId, column_id: &ColumnId) -> Result<()> {
        self.send_unit(
            Method::POST,
            &["board", "columns", "clear"],
            json!({ "projectId": project_id, "columnId": column_id }),
            "column",
            column_id.as_str(),
        )
        .await
    }

    #[instrument(skip(self), fields(project = %project_id))]
    async fn delete_column(&self, project_id: &ProjectId, column_id: &ColumnId) -> Result<()> {
        self.send_unit(
            Method::DELETE,
            &["board", "columns"],
            json!({ "projectId": project_id, "columnId": column_id }),
            "column",
            column_id.as_str(),
        )
        .await
    }

    #[instrument(skip(self), fields(project = %project_id))]
    async fn create_task(
        &self,
        project_id: &ProjectId,
        column_id: &ColumnId,
        name: &str,
    ) -> Result<Task> {
        self.send_json(
            Method::POST,
            &["board", "tasks"],
            json!({ "projectId": project_id, "columnId": column_id, "name": name }),
            "column",
            column_id.as_str(),
        )
        .await
    }

    #[instrument(skip(self), fields(project = %project_id))]
    async fn update_task(
        &self,
        project_id: &ProjectId,
        task_id: &TaskId,
        patch: &TaskPatch,
    ) -> Result<Task> {
        self.send_json(
            Method::PUT,
            &["board", "tasks"],
            json!({ "projectId": project_id, "taskId": task_id, "update": patch }),
            "task",
            task_id.as_str(),
        )
        .await
    }

    #[instrument(skip(self), fields(project = %project_id))]
    async fn move_task(
        &self,
        project_id: &ProjectId,
        task_id: &TaskId,
        position: usize,
        column_id: Option<&ColumnId>,
    ) -> Result<()> {
        let mut body = json!({ "projectId": project_id, "taskId": task_id, "position": position });
        if let Some(column_id) = column_id {
            body["columnId"] = json!(column_id);
        }
        self.send_unit(
            Method::POST,
            &["board", "tasks", "move"],
            body,
            "task",
            task_id.as_str(),
        )
        .await
    }

    #[instrument(skip(self), fields(project = %project_id))]
    async fn delete_task(&self, project_id: &ProjectId, task_id: &TaskId) -> Result<()> {
        self.send_unit(
            Method::DELETE,
            &["board", "tasks"],
            json!({ "projectId": project_id, "taskId": task_id }),
            "task",
            task_id.as_str(),
        )
        .await
    }

    #[instrument(skip(self, message), fields(project = %project_id))]
    async fn add_comment(
        &self,
        project_id: &ProjectId,
        task_id: &TaskId,
        message: &str,
    ) -> Result<Comment> {
        self.send_json(
            Method::POST,
            &["board", "tasks", "comment"],
            json!({ "projectId": project_id, "taskId": task_id, "message": message }),
            "task",
            task_id.as_str(),
        )
        .await
    }

    #[instrument(skip(self), fields(project = %project_id))]
    async fn add_checklist(
        &self,
        project_id: &ProjectId,
        task_id: &TaskId,
        name: &str,
    ) -> Result<Checklist> {
        self.send_json(
            Method::POST,
            &["board", "tasks", "checklists"],
            json!({ "projectId": project_id, "taskId": task_id, "name": name }),
            "task",
            task_id.as_str(),
        )
        .await
    }

    #[instrument(skip(self), fields(project = %project_id))]
    async fn update_checklist(
        &self,
        project_id: &ProjectId,
        task_id: &TaskId,
        checklist_id: &ChecklistId,
        patch: &ChecklistPatch,
    ) -> Result<Checklist> {
        self.send_json(
            Method::PUT,
            &["board", "tasks", "checklists"],
            json!({
                "projectId": project_id,
                "taskId": task_id,
                "checklistId": checklist_id,
                "update": patch,
            }),
            "checklist",
            checklist_id.as_str(),
        )
        .await
    }

    #[instrument(skip(self), fields(project = %project_id))]
    async fn delete_checklist(
        &self,
        project_id: &ProjectId,
        task_id: &TaskId,
        checklist_id: &ChecklistId,
    ) -> Result<()> {
        self.send_unit(
            Method::DELETE,
            &["board", "tasks", "checklists"],
            json!({ "projectId": project_id, "taskId": task_id, "checklistId": checklist_id }),
            "checklist",
            checklist_id.as_str(),
        )
        .await
    }

    #[instrument(skip(self), fields(project = %project_id))]
    async fn add_check_item(
        &self,
        project_id: &ProjectId,
        task_id: &TaskId,
        checklist_id: &ChecklistId,
        name: &str,
    ) -> Result<CheckItem> {
        self.send_json(
            Method::POST,
            &["board", "tasks", "checklists", "items"],
            json!({
                "projectId": project_id,
                "taskId": task_id,
                "checklistId": checklist_id,
                "name": name,
            }),
            "checklist",
            checklist_id.as_str(),
        )
        .await
    }

    #[instrument(skip(self), fields(project = %project_id))]
    async fn update_check_item(
        &self,
        project_id: &ProjectId,
        task_id: &TaskId,
        checklist_id: &ChecklistId,
        check_item_id: &CheckItemId,
        patch: &CheckItemPatch,
    ) -> Result<CheckItem> {
        self.send_json(
            Method::PUT,
            &["board", "tasks", "checklists", "items"],
            json!({
                "projectId": project_id,
                "taskId": task_id,
                "checklistId": checklist_id,
                "checkItemId": check_item_id,
                "update": patch,
            }),
            "check item",
            check_item_id.as_str(),
        )
        .await
    }

    #[instrument(skip(self), fields(project = %project_id))]
    async fn delete_check_item(
        &self,
        project_id: &ProjectId,
        task_id: &TaskId,
        checklist_id: &ChecklistId,
        check_item_id: &CheckItemId,
    ) -> Result<()> {
        self.send_unit(
            Method::DELETE,
            &["board", "tasks", "checklists", "items"],
            json!({
                "projectId": project_id,
                "taskId": task_id,
                "checklistId": checklist_id,
                "checkItemId": check_item_id,
            }),
            "check item",
            check_item_id.as_str(),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn service(server: &MockServer) -> HttpProjectService {
        let config = BoardConfig::default()
            .with_base_url(format!("{}/api", server.uri()))
            .with_access_token("secret");
        HttpProjectService::from_config(&config).unwrap()
    }

    #[test]
    fn test_endpoint_joins_segments() {
        let service = HttpProjectService::new("http://localhost:8080/api/").unwrap();
        assert_eq!(
            service.endpoint(&["board", "tasks", "move"]).as_str(),
            "http://localhost:8080/api/board/tasks/move"
        );

        let service = HttpProjectService::new("http://localhost:8080/api").unwrap();
        assert_eq!(
            service.endpoint(&["board", "p 1"]).as_str(),
            "http://localhost:8080/api/board/p%201"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let err = HttpProjectService::new("not a url").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }

    #[test]
    fn test_extract_error_message() {
        assert_eq!(extract_error_message(r#"{"message":"name required"}"#), "name required");
        assert_eq!(extract_error_message(r#"{"error":"bad"}"#), "bad");
        assert_eq!(extract_error_message("plain text"), "plain text");
    }

    #[tokio::test]
    async fn test_fetch_board_unwraps_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/board/p1"))
            .and(header("x-access-token", "secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "board": {
                    "members": [{ "_id": "m1", "name": "Ada" }],
                    "columns": [{ "_id": "todo", "name": "Todo", "taskIds": ["t1"] }],
                    "tasks": [{ "_id": "t1", "columnId": "todo", "name": "Write docs" }]
                }
            })))
            .mount(&server)
            .await;

        let board = service(&server)
            .await
            .fetch_board(&"p1".into())
            .await
            .unwrap();
        assert_eq!(board.task_count(), 1);
        assert_eq!(board.task(&"t1".into()).unwrap().name, "Write docs");
        assert_eq!(board.member(&"m1".into()).unwrap().name, "Ada");
    }

    #[tokio::test]
    async fn test_create_task_posts_scoped_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/board/tasks"))
            .and(body_json(json!({ "projectId": "p1", "columnId": "todo", "name": "Ship" })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "_id": "t9", "columnId": "todo", "name": "Ship", "authorId": "m1"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let task = service(&server)
            .await
            .create_task(&"p1".into(), &"todo".into(), "Ship")
            .await
            .unwrap();
        assert_eq!(task.id, "t9");
        assert_eq!(task.author_id.unwrap(), "m1");
    }

    #[tokio::test]
    async fn test_move_task_omits_column_within_column() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/board/tasks/move"))
            .and(body_json(json!({ "projectId": "p1", "taskId": "t1", "position": 2 })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/board/tasks/move"))
            .and(body_json(json!({
                "projectId": "p1", "taskId": "t1", "position": 0, "columnId": "done"
            })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let service = service(&server).await;
        service
            .move_task(&"p1".into(), &"t1".into(), 2, None)
            .await
            .unwrap();
        service
            .move_task(&"p1".into(), &"t1".into(), 0, Some(&"done".into()))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_update_task_sends_patch() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/board/tasks"))
            .and(body_json(json!({
                "projectId": "p1", "taskId": "t1", "update": { "isSubscribed": true }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "_id": "t1", "columnId": "todo", "name": "T", "isSubscribed": true
            })))
            .mount(&server)
            .await;

        let task = service(&server)
            .await
            .update_task(&"p1".into(), &"t1".into(), &TaskPatch::new().with_subscribed(true))
            .await
            .unwrap();
        assert!(task.is_subscribed);
    }

    #[tokio::test]
    async fn test_validation_status_maps_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/board/columns"))
            .respond_with(
                ResponseTemplate::new(422).set_body_json(json!({ "message": "name is required" })),
            )
            .mount(&server)
            .await;

        let err = service(&server)
            .await
            .create_column(&"p1".into(), "")
            .await
            .unwrap_err();
        assert!(matches!(&err, BoardError::Validation { message } if message == "name is required"));
        assert!(err.is_user_facing());
    }

    #[tokio::test]
    async fn test_not_found_status() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/board/tasks"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = service(&server)
            .await
            .delete_task(&"p1".into(), &"gone".into())
            .await
            .unwrap_err();
        assert!(matches!(&err, BoardError::NotFound { resource, id } if resource == "task" && id == "gone"));
    }

    #[tokio::test]
    async fn test_server_error_is_transport() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/board/columns/clear"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&server)
            .await;

        let err = service(&server)
            .await
            .clear_column(&"p1".into(), &"todo".into())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert!(err.to_string().contains("maintenance"));
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport() {
        // Bind then release a port so nothing is listening on it
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let service = HttpProjectService::new(format!("http://127.0.0.1:{}/api", port)).unwrap();
        let err = service.fetch_board(&"p1".into()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);
    }
}
