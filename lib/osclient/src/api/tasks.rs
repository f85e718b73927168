//! `_tasks` endpoints.
//!
//! Task IDs have the form `node_id:task_number`, as returned in
//! [`ReindexResp::task`](super::ReindexResp::task).

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use http::HeaderMap;
use serde::Deserialize;
use serde_json::Value;

use super::GroupBy;
use crate::{
    ApiResult, Client, HttpClient, Method, Params, PathBuilder, Request, Requestable, Response,
    Result, ToParams, build_request,
};

/// `_tasks` endpoint group, see [`Client::tasks`].
#[derive(Debug)]
pub struct Tasks<'a, C> {
    client: &'a Client<C>,
}

impl<C: HttpClient> Client<C> {
    /// `_tasks` endpoints.
    #[must_use]
    pub fn tasks(&self) -> Tasks<'_, C> {
        Tasks { client: self }
    }
}

impl<C: HttpClient> Tasks<'_, C> {
    /// `GET /_tasks`: running tasks.
    pub async fn list(&self, req: Option<TasksListReq>) -> ApiResult<TasksListResp> {
        self.client.perform(req.unwrap_or_default()).await
    }

    /// `GET /_tasks/{task_id}`: one task, running or completed.
    pub async fn get(&self, req: TasksGetReq) -> ApiResult<TasksGetResp> {
        self.client.perform(req).await
    }

    /// `POST /_tasks[/{task_id}]/_cancel`: cancel one task, or every task
    /// matching the filters.
    pub async fn cancel(&self, req: TasksCancelReq) -> ApiResult<TasksCancelResp> {
        self.client.perform(req).await
    }
}

// ============================================================================
// List
// ============================================================================

/// Request for `GET /_tasks`.
#[derive(Debug, Clone, Default)]
pub struct TasksListReq {
    /// Extra request headers.
    pub headers: HeaderMap,
    /// Query parameters.
    pub params: TasksListParams,
}

impl Requestable for TasksListReq {
    fn into_request(self) -> Result<Request> {
        build_request(
            Method::Get,
            "/_tasks",
            None,
            self.params.to_params(),
            self.headers,
        )
    }
}

/// Query parameters of [`TasksListReq`].
#[derive(Debug, Clone, Default, Params)]
pub struct TasksListParams {
    /// Action name patterns, e.g. `*reindex`.
    pub actions: Vec<String>,
    /// Include task status details.
    pub detailed: Option<bool>,
    /// Grouping of the result.
    pub group_by: Option<GroupBy>,
    /// Restrict to these nodes.
    pub nodes: Vec<String>,
    /// Restrict to children of this task.
    pub parent_task_id: String,
    /// How long to wait for each node.
    pub timeout: Option<Duration>,
    /// Block until the matching tasks finish.
    pub wait_for_completion: Option<bool>,
    /// Pretty-print the response.
    pub pretty: bool,
    /// Human readable units in the response.
    pub human: bool,
    /// Include stack traces in error payloads.
    pub error_trace: bool,
}

/// Response of `GET /_tasks`.
///
/// Grouped by node (the default) the tasks are under [`nodes`](Self::nodes);
/// grouped by parent or not at all they are under [`tasks`](Self::tasks).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TasksListResp {
    /// Nodes keyed by node ID, each with its tasks.
    pub nodes: HashMap<String, TaskNode>,
    /// Tasks when grouped by parent or not grouped.
    pub tasks: Option<TaskList>,
    /// Nodes that failed to answer.
    pub node_failures: Vec<Value>,
    /// Tasks that failed to report.
    pub task_failures: Vec<Value>,
    #[serde(skip)]
    response: Option<Arc<Response>>,
}

api_response!(TasksListResp);

/// Tasks of a list or cancel response not grouped by node.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TaskList {
    /// `group_by=parents`: top-level tasks keyed by task ID.
    ByParent(HashMap<String, TaskInfo>),
    /// `group_by=none`: a flat list.
    Flat(Vec<TaskInfo>),
}

/// A node and its tasks.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TaskNode {
    /// Node name.
    pub name: String,
    /// Transport address, `host:port`.
    pub transport_address: String,
    /// Host name.
    pub host: String,
    /// IP address and port.
    pub ip: String,
    /// Node roles, e.g. `data` or `ingest`.
    pub roles: Vec<String>,
    /// Custom node attributes.
    pub attributes: HashMap<String, String>,
    /// Tasks keyed by task ID.
    pub tasks: HashMap<String, TaskInfo>,
}

/// A single task.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TaskInfo {
    /// Node running the task.
    pub node: String,
    /// Task number on that node.
    pub id: u64,
    /// Transport type, e.g. `transport` or `direct`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Action name, e.g. `indices:data/write/reindex`.
    pub action: String,
    /// Human readable description.
    pub description: Option<String>,
    /// Start time, epoch millis.
    pub start_time_in_millis: i64,
    /// Running time in nanoseconds.
    pub running_time_in_nanos: u64,
    /// Whether the task can be cancelled.
    pub cancellable: bool,
    /// Whether cancellation was requested.
    pub cancelled: Option<bool>,
    /// Parent task ID, for sub-tasks.
    pub parent_task_id: Option<String>,
    /// Headers the task was started with.
    pub headers: HashMap<String, String>,
    /// Action-specific progress.
    pub status: Option<Value>,
    /// CPU and memory usage, when tracked.
    pub resource_stats: Option<Value>,
    /// Child tasks, with `group_by=parents`.
    pub children: Vec<TaskInfo>,
}

impl TaskInfo {
    /// Full task ID, `node:id`.
    #[must_use]
    pub fn task_id(&self) -> String {
        format!("{}:{}", self.node, self.id)
    }
}

// ============================================================================
// Get
// ============================================================================

/// Request for `GET /_tasks/{task_id}`.
#[derive(Debug, Clone, Default)]
pub struct TasksGetReq {
    /// Task ID, `node:id`.
    pub task_id: String,
    /// Extra request headers.
    pub headers: HeaderMap,
    /// Query parameters.
    pub params: TasksGetParams,
}

impl Requestable for TasksGetReq {
    fn into_request(self) -> Result<Request> {
        let path = PathBuilder::new("/_tasks").segment(&self.task_id).build();
        build_request(Method::Get, &path, None, self.params.to_params(), self.headers)
    }
}

/// Query parameters of [`TasksGetReq`].
#[derive(Debug, Clone, Default, Params)]
pub struct TasksGetParams {
    /// How long to wait for the task.
    pub timeout: Option<Duration>,
    /// Block until the task finishes.
    pub wait_for_completion: Option<bool>,
    /// Pretty-print the response.
    pub pretty: bool,
    /// Human readable units in the response.
    pub human: bool,
    /// Include stack traces in error payloads.
    pub error_trace: bool,
}

/// Response of `GET /_tasks/{task_id}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TasksGetResp {
    /// Whether the task has finished.
    pub completed: bool,
    /// The task.
    pub task: TaskInfo,
    /// Result of the finished task, e.g. a reindex summary.
    #[serde(rename = "response")]
    pub result: Option<Value>,
    /// Failure of the finished task.
    pub error: Option<Value>,
    #[serde(skip)]
    response: Option<Arc<Response>>,
}

api_response!(TasksGetResp);

// ============================================================================
// Cancel
// ============================================================================

/// Request for `POST /_tasks[/{task_id}]/_cancel`.
#[derive(Debug, Clone, Default)]
pub struct TasksCancelReq {
    /// Task to cancel; when empty the filters in `params` select the tasks.
    pub task_id: String,
    /// Extra request headers.
    pub headers: HeaderMap,
    /// Query parameters.
    pub params: TasksCancelParams,
}

impl Requestable for TasksCancelReq {
    fn into_request(self) -> Result<Request> {
        let path = PathBuilder::new("/_tasks")
            .optional(&self.task_id)
            .literal("/_cancel")
            .build();
        build_request(Method::Post, &path, None, self.params.to_params(), self.headers)
    }
}

/// Query parameters of [`TasksCancelReq`].
#[derive(Debug, Clone, Default, Params)]
pub struct TasksCancelParams {
    /// Action name patterns.
    pub actions: Vec<String>,
    /// Restrict to these nodes.
    pub nodes: Vec<String>,
    /// Restrict to children of this task.
    pub parent_task_id: String,
    /// Block until the cancelled tasks finish.
    pub wait_for_completion: Option<bool>,
    /// Pretty-print the response.
    pub pretty: bool,
    /// Human readable units in the response.
    pub human: bool,
    /// Include stack traces in error payloads.
    pub error_trace: bool,
}

/// Response of `POST /_tasks/_cancel`, shaped like [`TasksListResp`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TasksCancelResp {
    /// Nodes keyed by node ID, each with its cancelled tasks.
    pub nodes: HashMap<String, TaskNode>,
    /// Cancelled tasks when not grouped by node.
    pub tasks: Option<TaskList>,
    /// Nodes that failed to answer.
    pub node_failures: Vec<Value>,
    /// Tasks that failed to cancel.
    pub task_failures: Vec<Value>,
    #[serde(skip)]
    response: Option<Arc<Response>>,
}

api_response!(TasksCancelResp);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::from_json;

    #[test]
    fn task_paths() {
        let request = TasksListReq {
            params: TasksListParams {
                actions: vec!["*reindex".to_string()],
                detailed: Some(true),
                group_by: Some(GroupBy::Parents),
                ..Default::default()
            },
            ..Default::default()
        }
        .into_request()
        .expect("request");
        assert_eq!(request.path(), "/_tasks");
        assert_eq!(
            request.query(),
            Some("actions=*reindex&detailed=true&group_by=parents")
        );

        let request = TasksGetReq {
            task_id: "oTUltX4IQMOUUVeiohTt8A:124".to_string(),
            ..Default::default()
        }
        .into_request()
        .expect("request");
        assert_eq!(request.method(), Method::Get);
        assert_eq!(request.path(), "/_tasks/oTUltX4IQMOUUVeiohTt8A:124");

        let request = TasksCancelReq {
            task_id: "oTUltX4IQMOUUVeiohTt8A:124".to_string(),
            ..Default::default()
        }
        .into_request()
        .expect("request");
        assert_eq!(request.method(), Method::Post);
        assert_eq!(request.path(), "/_tasks/oTUltX4IQMOUUVeiohTt8A:124/_cancel");

        let request = TasksCancelReq {
            params: TasksCancelParams {
                actions: vec!["*reindex".to_string()],
                ..Default::default()
            },
            ..Default::default()
        }
        .into_request()
        .expect("request");
        assert_eq!(request.path(), "/_tasks/_cancel");
    }

    #[test]
    fn list_by_node_decodes() {
        let body = br#"{"nodes":{"oTUltX4IQMOUUVeiohTt8A":{
            "name":"node-1","transport_address":"127.0.0.1:9300","host":"127.0.0.1","ip":"127.0.0.1:9300",
            "roles":["data","ingest"],
            "tasks":{"oTUltX4IQMOUUVeiohTt8A:124":{
                "node":"oTUltX4IQMOUUVeiohTt8A","id":124,"type":"transport",
                "action":"indices:data/write/reindex","start_time_in_millis":1700000000000,
                "running_time_in_nanos":47402,"cancellable":true,"cancelled":false,
                "headers":{}
            }}
        }}}"#;

        let resp: TasksListResp = from_json(body).expect("decode");
        let node = &resp.nodes["oTUltX4IQMOUUVeiohTt8A"];
        assert_eq!(node.roles, vec!["data", "ingest"]);
        let task = &node.tasks["oTUltX4IQMOUUVeiohTt8A:124"];
        assert_eq!(task.task_id(), "oTUltX4IQMOUUVeiohTt8A:124");
        assert!(task.cancellable);
        assert!(resp.tasks.is_none());
    }

    #[test]
    fn list_flat_decodes() {
        let body = br#"{"tasks":[
            {"node":"n1","id":1,"type":"direct","action":"cluster:monitor/tasks/lists[n]"}
        ]}"#;
        let resp: TasksListResp = from_json(body).expect("decode");
        let Some(TaskList::Flat(tasks)) = resp.tasks else {
            panic!("expected a flat task list");
        };
        assert_eq!(tasks[0].task_id(), "n1:1");
        assert!(resp.nodes.is_empty());
    }

    #[test]
    fn completed_task_decodes() {
        let body = br#"{
            "completed": true,
            "task": {"node":"n1","id":7,"type":"transport","action":"indices:data/write/reindex",
                     "status":{"total":10000,"created":10000}},
            "response": {"took":812,"created":10000}
        }"#;

        let resp: TasksGetResp = from_json(body).expect("decode");
        assert!(resp.completed);
        assert_eq!(resp.task.action, "indices:data/write/reindex");
        assert_eq!(
            resp.result.as_ref().map(|r| r["created"].clone()),
            Some(serde_json::json!(10000))
        );
        assert!(resp.error.is_none());
    }
}
