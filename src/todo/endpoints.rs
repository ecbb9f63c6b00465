use chrono::{Local, NaiveDate};
use rocket::response::status::Created;
use rocket::serde::json::Json;
use rocket::{delete, get, post, put, State};
use tracing::{debug, info};

use super::data::*;
use super::dates::parse_calendar_day;
use super::helpers::*;
use super::presentation::TabsResponse;
use super::status::annotate;
use super::view::{select_view, View};
use crate::auth::AuthenticatedUser;
use crate::data::{DBConnection, MessageResponse};
use crate::internal_error::InternalResult;

/// The day statuses are derived against: the `today` query parameter when
/// given, otherwise the server's local calendar day.
fn resolve_today(today: Option<&str>) -> InternalResult<NaiveDate> {
    match today {
        Some(raw) => parse_calendar_day(raw),
        None => Ok(Local::now().date_naive()),
    }
}

#[get("/todos?<view>&<today>")]
pub fn get_todos(
    view: Option<&str>,
    today: Option<&str>,
    user: AuthenticatedUser,
    db_connection: &State<DBConnection>,
) -> InternalResult<Json<Vec<TodoResponse>>> {
    let today = resolve_today(today)?;

    let mut todos = {
        let db_connection = db_connection.lock()?;
        get_todos_from_db(user.id(), &db_connection)?
    };

    annotate(&mut todos, today);

    let todos: Vec<TodoResponse> = match view.map(View::parse) {
        Some(view) => {
            let selected = select_view(&todos, &view, today);
            debug!(%view, selected = selected.len(), total = todos.len(), "selected view");
            selected.into_iter().cloned().map(TodoResponse::from).collect()
        }
        None => todos.into_iter().map(TodoResponse::from).collect(),
    };

    Ok(Json(todos))
}

#[post("/todos?<today>", format = "json", data = "<new_todo>")]
pub fn add_todo(
    new_todo: Json<NewTodoRequest>,
    today: Option<&str>,
    user: AuthenticatedUser,
    db_connection: &State<DBConnection>,
) -> InternalResult<Created<Json<TodoResponse>>> {
    let today = resolve_today(today)?;
    let db_connection = db_connection.lock()?;

    let todo = add_todo_to_db(user.id(), new_todo.into_inner(), today, &db_connection)?;

    info!(user_id = user.id(), todo_id = todo.id, "todo created");

    Ok(Created::new(format!("/api/todos/{}", todo.id)).body(Json(TodoResponse::from(todo))))
}

#[put("/todos/<todo_id>?<today>", format = "json", data = "<update>")]
pub fn update_todo(
    todo_id: TodoID,
    update: Json<UpdateTodoRequest>,
    today: Option<&str>,
    user: AuthenticatedUser,
    db_connection: &State<DBConnection>,
) -> InternalResult<Json<TodoResponse>> {
    let today = resolve_today(today)?;
    let db_connection = db_connection.lock()?;

    let todo = update_todo_in_db(user.id(), todo_id, update.into_inner(), today, &db_connection)?;

    info!(
        user_id = user.id(),
        todo_id,
        status = %todo.status,
        is_deleted = todo.is_deleted,
        "todo updated"
    );

    Ok(Json(TodoResponse::from(todo)))
}

#[put("/todos/<todo_id>/complete")]
pub fn mark_completed(
    todo_id: TodoID,
    user: AuthenticatedUser,
    db_connection: &State<DBConnection>,
) -> InternalResult<Json<TodoResponse>> {
    let db_connection = db_connection.lock()?;

    let todo = mark_todo_completed_in_db(user.id(), todo_id, &db_connection)?;

    info!(user_id = user.id(), todo_id, "todo completed");

    Ok(Json(TodoResponse::from(todo)))
}

#[delete("/todos/<todo_id>")]
pub fn delete_todo(
    todo_id: TodoID,
    user: AuthenticatedUser,
    db_connection: &State<DBConnection>,
) -> InternalResult<Json<MessageResponse>> {
    let db_connection = db_connection.lock()?;

    delete_todo_from_db(user.id(), todo_id, &db_connection)?;

    info!(user_id = user.id(), todo_id, "todo permanently deleted");

    Ok(Json(MessageResponse::new("Todo deleted")))
}

#[get("/tabs")]
pub fn get_tabs() -> Json<TabsResponse> {
    Json(TabsResponse::new())
}
