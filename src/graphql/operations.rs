//! GraphQL Operations
//!
//! Documents, variables and result shapes for every operation the views issue.

use serde::{Deserialize, Serialize};

use super::{Fetched, GraphqlClient, GraphqlError};
use crate::models::{PrivateTodo, PublicTodo, TodoId, TodoPatch};

/// Page size of "load older" in the public feed
pub const OLDER_PAGE_SIZE: i32 = 7;

// ========================
// Documents
// ========================

pub const GET_MY_TODOS: &str = r#"
query getMyTodos {
  todos(where: { is_public: { _eq: false } }, order_by: { created_at: desc }) {
    id
    title
    created_at
    is_completed
  }
}
"#;

pub const GET_OLD_PUBLIC_TODOS: &str = r#"
query getOldPublicTodos($oldestTodo: Int!, $limit: Int!) {
  todos(
    where: { is_public: { _eq: true }, id: { _lt: $oldestTodo } }
    limit: $limit
    order_by: { created_at: desc }
  ) {
    id
    is_completed
    title
    user {
      name
    }
  }
}
"#;

pub const GET_NEW_PUBLIC_TODOS: &str = r#"
query getNewPublicTodos($latestVisibleId: Int) {
  todos(
    where: { is_public: { _eq: true }, id: { _gt: $latestVisibleId } }
    order_by: { created_at: desc }
  ) {
    id
    title
    created_at
    user {
      name
    }
  }
}
"#;

pub const NOTIFY_NEW_PUBLIC_TODOS: &str = r#"
subscription notifyNewPublicTodos {
  todos(where: { is_public: { _eq: true } }, limit: 1, order_by: { created_at: desc }) {
    id
    title
    user {
      name
    }
    created_at
  }
}
"#;

pub const TOGGLE_TODO: &str = r#"
mutation toggleTodo($id: Int!, $isCompleted: Boolean!) {
  update_todos(where: { id: { _eq: $id } }, _set: { is_completed: $isCompleted }) {
    affected_rows
    returning {
      id
      title
      is_completed
    }
  }
}
"#;

pub const DELETE_TODO: &str = r#"
mutation delete_todos($id: Int!) {
  delete_todos(where: { id: { _eq: $id } }) {
    affected_rows
  }
}
"#;

pub const CLEAR_COMPLETED: &str = r#"
mutation clearCompleted {
  delete_todos(where: { is_completed: { _eq: true } }) {
    affected_rows
  }
}
"#;

pub const INSERT_TODO: &str = r#"
mutation insertTodo($todo: String!, $isPublic: Boolean!) {
  insert_todos(objects: { title: $todo, is_public: $isPublic }) {
    affected_rows
    returning {
      id
      title
      created_at
      is_completed
    }
  }
}
"#;

// ========================
// Variables
// ========================

#[derive(Serialize)]
struct NoVariables {}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OldPublicTodosVars {
    oldest_todo: TodoId,
    limit: i32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NewPublicTodosVars {
    latest_visible_id: TodoId,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ToggleTodoVars {
    id: TodoId,
    is_completed: bool,
}

#[derive(Serialize)]
struct IdVars {
    id: TodoId,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InsertTodoVars<'a> {
    todo: &'a str,
    is_public: bool,
}

// ========================
// Results
// ========================

/// `{ todos: [...] }`, the result shape of every todo query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodoList<T> {
    pub todos: Vec<T>,
}

pub type MyTodosData = TodoList<PrivateTodo>;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MutationResponse<T> {
    pub affected_rows: i32,
    #[serde(default = "Vec::new")]
    pub returning: Vec<T>,
}

#[derive(Deserialize)]
struct UpdateTodosData {
    update_todos: Option<MutationResponse<TodoPatch>>,
}

#[derive(Deserialize)]
struct DeleteTodosData {
    delete_todos: Option<MutationResponse<serde_json::Value>>,
}

#[derive(Deserialize)]
struct InsertTodosData {
    insert_todos: Option<MutationResponse<PrivateTodo>>,
}

// ========================
// Operations
// ========================

pub async fn get_my_todos(client: &GraphqlClient) -> Result<Vec<PrivateTodo>, GraphqlError> {
    let fetched: Fetched<MyTodosData> = client.query("getMyTodos", GET_MY_TODOS, &NoVariables {}).await?;
    Ok(fetched.into_complete()?.todos)
}

/// Public todos with id below `oldest_todo`, newest first, at most [`OLDER_PAGE_SIZE`]
pub async fn get_old_public_todos(client: &GraphqlClient, oldest_todo: TodoId) -> Result<Fetched<Vec<PublicTodo>>, GraphqlError> {
    let fetched: Fetched<TodoList<PublicTodo>> = client
        .query("getOldPublicTodos", GET_OLD_PUBLIC_TODOS, &OldPublicTodosVars { oldest_todo, limit: OLDER_PAGE_SIZE })
        .await?;
    Ok(fetched.map(|d| d.todos))
}

/// Public todos with id above `latest_visible_id`, newest first
pub async fn get_new_public_todos(client: &GraphqlClient, latest_visible_id: TodoId) -> Result<Fetched<Vec<PublicTodo>>, GraphqlError> {
    let fetched: Fetched<TodoList<PublicTodo>> = client
        .query("getNewPublicTodos", GET_NEW_PUBLIC_TODOS, &NewPublicTodosVars { latest_visible_id })
        .await?;
    Ok(fetched.map(|d| d.todos))
}

pub async fn toggle_todo(client: &GraphqlClient, id: TodoId, is_completed: bool) -> Result<MutationResponse<TodoPatch>, GraphqlError> {
    let data: UpdateTodosData = client
        .mutate("toggleTodo", TOGGLE_TODO, &ToggleTodoVars { id, is_completed })
        .await?;
    data.update_todos.ok_or(GraphqlError::MissingData)
}

/// Returns the number of deleted rows
pub async fn delete_todo(client: &GraphqlClient, id: TodoId) -> Result<i32, GraphqlError> {
    let data: DeleteTodosData = client.mutate("delete_todos", DELETE_TODO, &IdVars { id }).await?;
    data.delete_todos.map(|r| r.affected_rows).ok_or(GraphqlError::MissingData)
}

/// Returns the number of deleted rows
pub async fn clear_completed(client: &GraphqlClient) -> Result<i32, GraphqlError> {
    let data: DeleteTodosData = client.mutate("clearCompleted", CLEAR_COMPLETED, &NoVariables {}).await?;
    data.delete_todos.map(|r| r.affected_rows).ok_or(GraphqlError::MissingData)
}

pub async fn insert_todo(client: &GraphqlClient, title: &str, is_public: bool) -> Result<Option<PrivateTodo>, GraphqlError> {
    let data: InsertTodosData = client
        .mutate("insertTodo", INSERT_TODO, &InsertTodoVars { todo: title, is_public })
        .await?;
    let response = data.insert_todos.ok_or(GraphqlError::MissingData)?;
    Ok(response.returning.into_iter().next())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphql::GraphqlResponse;
    use serde_json::json;

    #[test]
    fn test_variable_names_match_documents() {
        let vars = serde_json::to_value(ToggleTodoVars { id: 3, is_completed: true }).unwrap();
        assert_eq!(vars, json!({ "id": 3, "isCompleted": true }));
        assert!(TOGGLE_TODO.contains("$isCompleted"));

        let vars = serde_json::to_value(OldPublicTodosVars { oldest_todo: 44, limit: OLDER_PAGE_SIZE }).unwrap();
        assert_eq!(vars, json!({ "oldestTodo": 44, "limit": 7 }));
        assert!(GET_OLD_PUBLIC_TODOS.contains("$limit: Int!"));

        let vars = serde_json::to_value(NewPublicTodosVars { latest_visible_id: 60 }).unwrap();
        assert_eq!(vars, json!({ "latestVisibleId": 60 }));

        let vars = serde_json::to_value(InsertTodoVars { todo: "milk", is_public: false }).unwrap();
        assert_eq!(vars, json!({ "todo": "milk", "isPublic": false }));

        assert_eq!(serde_json::to_value(NoVariables {}).unwrap(), json!({}));
    }

    #[test]
    fn test_decode_my_todos() {
        let body = json!({
            "data": { "todos": [
                { "id": 2, "title": "b", "created_at": "2024-03-01T10:00:00.123456+00:00", "is_completed": true },
                { "id": 1, "title": "a", "created_at": "2024-02-29T09:00:00+00:00", "is_completed": false }
            ]}
        });
        let response: GraphqlResponse<MyTodosData> = serde_json::from_value(body).unwrap();
        let todos = response.into_fetched().unwrap().into_complete().unwrap().todos;
        assert_eq!(todos.len(), 2);
        assert!(todos[0].is_completed);
        assert_eq!(todos[1].title, "a");
    }

    #[test]
    fn test_decode_public_pages() {
        // Older page: is_completed, no created_at
        let older: TodoList<PublicTodo> = serde_json::from_value(json!({
            "todos": [{ "id": 50, "is_completed": false, "title": "x", "user": { "name": "ann" } }]
        }))
        .unwrap();
        assert_eq!(older.todos[0].is_completed, Some(false));
        assert_eq!(older.todos[0].created_at, None);
        assert_eq!(older.todos[0].user.name, "ann");

        // Newer page: created_at, no is_completed
        let newer: TodoList<PublicTodo> = serde_json::from_value(json!({
            "todos": [{ "id": 61, "title": "y", "created_at": "2024-03-01T10:00:00Z", "user": { "name": "bo" } }]
        }))
        .unwrap();
        assert_eq!(newer.todos[0].is_completed, None);
        assert!(newer.todos[0].created_at.is_some());
    }

    #[test]
    fn test_decode_toggle_result() {
        let data: UpdateTodosData = serde_json::from_value(json!({
            "update_todos": { "affected_rows": 1, "returning": [{ "id": 7, "title": "t", "is_completed": true }] }
        }))
        .unwrap();
        let response = data.update_todos.unwrap();
        assert_eq!(response.affected_rows, 1);
        assert_eq!(response.returning, vec![TodoPatch { id: 7, title: "t".to_string(), is_completed: true }]);
    }

    #[test]
    fn test_decode_delete_result() {
        let data: DeleteTodosData = serde_json::from_value(json!({ "delete_todos": { "affected_rows": 4 } })).unwrap();
        assert_eq!(data.delete_todos.map(|r| r.affected_rows), Some(4));
    }
}
