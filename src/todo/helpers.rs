use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::warn;

use std::collections::HashMap;

use super::data::*;
use super::dates::{format_calendar_day, parse_calendar_day};
use super::status::derive_status;
use crate::auth::data::UserID;
use crate::internal_error::{InternalError, InternalResult};

const TODO_COLUMNS: &str =
    "id, title, category, start_date, due_date, completed, is_deleted, status";

struct TodoRow {
    id: TodoID,
    title: String,
    category: String,
    start_date: String,
    due_date: String,
    completed: bool,
    is_deleted: bool,
    status: String,
}

fn read_todo_row(row: &Row) -> rusqlite::Result<TodoRow> {
    Ok(TodoRow {
        id: row.get(0)?,
        title: row.get(1)?,
        category: row.get(2)?,
        start_date: row.get(3)?,
        due_date: row.get(4)?,
        completed: row.get(5)?,
        is_deleted: row.get(6)?,
        status: row.get(7)?,
    })
}

fn todo_from_row(row: TodoRow) -> InternalResult<Todo> {
    let start_date = parse_calendar_day(&row.start_date).map_err(|_| {
        InternalError::CorruptRecord(format!(
            "todo {} has start_date '{}'",
            row.id, row.start_date
        ))
    })?;
    let due_date = parse_calendar_day(&row.due_date).map_err(|_| {
        InternalError::CorruptRecord(format!("todo {} has due_date '{}'", row.id, row.due_date))
    })?;

    let category = row.category.parse().unwrap_or_else(|_| {
        warn!(todo_id = row.id, category = %row.category, "unknown category, treating as casual");
        Category::Casual
    });
    let status = row.status.parse().unwrap_or_else(|_| {
        warn!(todo_id = row.id, status = %row.status, "unknown stored status");
        Status::Pending
    });

    Ok(Todo {
        id: row.id,
        title: row.title,
        category,
        subtasks: vec![],
        start_date,
        due_date,
        completed: row.completed,
        is_deleted: row.is_deleted,
        status,
    })
}

/// Trims subtasks and drops the empty ones, keeping their order.
pub fn clean_subtasks(subtasks: Vec<String>) -> Vec<String> {
    subtasks
        .into_iter()
        .map(|subtask| subtask.trim().to_string())
        .filter(|subtask| !subtask.is_empty())
        .collect()
}

pub fn validate_todo_fields(title: &str, start_date: NaiveDate, due_date: NaiveDate) -> InternalResult<()> {
    if title.trim().is_empty() {
        return Err(InternalError::Validation("Please enter a title.".to_string()));
    }

    if start_date > due_date {
        return Err(InternalError::Validation(
            "End date cannot be before start date.".to_string(),
        ));
    }

    Ok(())
}

/// Merges a partial update into `todo`.
///
/// An explicit `status` decides completion. Without one, new dates reopen
/// the todo (that is how a completed todo gets unchecked), and the status
/// is always recomputed for `today` so nothing stale is stored or returned.
pub fn apply_update(todo: &mut Todo, update: UpdateTodoRequest, today: NaiveDate) -> InternalResult<()> {
    let dates_changed = update.start_date.is_some() || update.due_date.is_some();

    if let Some(title) = update.title {
        todo.title = title.trim().to_string();
    }
    if let Some(category) = update.category {
        todo.category = category;
    }
    if let Some(subtasks) = update.subtasks {
        todo.subtasks = clean_subtasks(subtasks);
    }
    if let Some(start_date) = update.start_date {
        todo.start_date = start_date;
    }
    if let Some(due_date) = update.due_date {
        todo.due_date = due_date;
    }
    if let Some(is_deleted) = update.is_deleted {
        todo.is_deleted = is_deleted;
    }

    validate_todo_fields(&todo.title, todo.start_date, todo.due_date)?;

    match update.status {
        Some(status) => {
            todo.completed = status == Status::Completed;
            todo.status = status;
        }
        None => {
            if dates_changed {
                todo.completed = false;
            }
            todo.status = derive_status(todo, today);
        }
    }

    Ok(())
}

fn attach_subtasks(todos: &mut [Todo], mut subtasks: HashMap<TodoID, Vec<(i64, String)>>) {
    for todo in todos.iter_mut() {
        if let Some(mut items) = subtasks.remove(&todo.id) {
            items.sort_by_key(|item| item.0);
            todo.subtasks = items.into_iter().map(|item| item.1).collect();
        }
    }
}

pub fn get_todos_from_db(user_id: UserID, db_connection: &Connection) -> InternalResult<Vec<Todo>> {
    let mut todos_statement = db_connection.prepare(&format!(
        "SELECT {} FROM todos WHERE user_id = (?1) ORDER BY id",
        TODO_COLUMNS
    ))?;

    let rows = todos_statement.query_map(params![user_id], read_todo_row)?;

    let mut todos = vec![];
    for row_result in rows {
        todos.push(todo_from_row(row_result?)?);
    }

    let mut subtasks_statement = db_connection.prepare(
        "SELECT s.todo_id, s.content, s.num FROM todo_subtasks s
         JOIN todos t ON t.id = s.todo_id WHERE t.user_id = (?1)",
    )?;

    let mut subtask_map: HashMap<TodoID, Vec<(i64, String)>> = HashMap::new();
    let mut rows = subtasks_statement.query(params![user_id])?;

    while let Some(row) = rows.next()? {
        let todo_id: TodoID = row.get(0)?;
        let content: String = row.get(1)?;
        let num: i64 = row.get(2)?;

        subtask_map.entry(todo_id).or_default().push((num, content));
    }

    attach_subtasks(&mut todos, subtask_map);

    Ok(todos)
}

pub fn get_todo_from_db(
    user_id: UserID,
    todo_id: TodoID,
    db_connection: &Connection,
) -> InternalResult<Todo> {
    let row = db_connection
        .query_row(
            &format!(
                "SELECT {} FROM todos WHERE id = (?1) AND user_id = (?2)",
                TODO_COLUMNS
            ),
            params![todo_id, user_id],
            read_todo_row,
        )
        .optional()?
        .ok_or_else(|| InternalError::NotFound(format!("Todo {} not found", todo_id)))?;

    let mut todos = vec![todo_from_row(row)?];

    let mut subtasks_statement = db_connection
        .prepare("SELECT content, num FROM todo_subtasks WHERE todo_id = (?1)")?;
    let mut subtask_map: HashMap<TodoID, Vec<(i64, String)>> = HashMap::new();
    let mut rows = subtasks_statement.query(params![todo_id])?;

    while let Some(row) = rows.next()? {
        let content: String = row.get(0)?;
        let num: i64 = row.get(1)?;

        subtask_map.entry(todo_id).or_default().push((num, content));
    }

    attach_subtasks(&mut todos, subtask_map);

    Ok(todos.remove(0))
}

pub fn add_subtasks_to_db(
    todo_id: TodoID,
    subtasks: &[String],
    db_connection: &Connection,
) -> InternalResult<()> {
    for (num, content) in subtasks.iter().enumerate() {
        db_connection.execute(
            "INSERT INTO todo_subtasks VALUES (?1, ?2, ?3)",
            params![todo_id, content, num as i64],
        )?;
    }

    Ok(())
}

pub fn delete_subtasks_from_db(todo_id: TodoID, db_connection: &Connection) -> InternalResult<()> {
    db_connection.execute(
        "DELETE FROM todo_subtasks WHERE todo_id = (?1)",
        params![todo_id],
    )?;

    Ok(())
}

pub fn add_todo_to_db(
    user_id: UserID,
    request: NewTodoRequest,
    today: NaiveDate,
    db_connection: &Connection,
) -> InternalResult<Todo> {
    let title = request.title.trim().to_string();
    validate_todo_fields(&title, request.start_date, request.due_date)?;

    let mut todo = Todo {
        id: 0,
        title,
        category: request.category,
        subtasks: clean_subtasks(request.subtasks),
        start_date: request.start_date,
        due_date: request.due_date,
        completed: false,
        is_deleted: false,
        status: Status::Upcoming,
    };
    todo.status = derive_status(&todo, today);

    let transaction = db_connection.unchecked_transaction()?;

    transaction.execute(
        "INSERT INTO todos (user_id, title, category, start_date, due_date, completed, is_deleted, status)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            user_id,
            todo.title,
            todo.category.as_str(),
            format_calendar_day(todo.start_date),
            format_calendar_day(todo.due_date),
            todo.completed,
            todo.is_deleted,
            todo.status.as_str(),
        ],
    )?;
    todo.id = transaction.last_insert_rowid();

    add_subtasks_to_db(todo.id, &todo.subtasks, &transaction)?;
    transaction.commit()?;

    Ok(todo)
}

/// Writes every field of `todo` back, replacing its subtasks. Either all of
/// it lands or none of it does.
pub fn save_todo_to_db(user_id: UserID, todo: &Todo, db_connection: &Connection) -> InternalResult<()> {
    let transaction = db_connection.unchecked_transaction()?;

    let changed = transaction.execute(
        "UPDATE todos SET title = (?1), category = (?2), start_date = (?3), due_date = (?4),
         completed = (?5), is_deleted = (?6), status = (?7) WHERE id = (?8) AND user_id = (?9)",
        params![
            todo.title,
            todo.category.as_str(),
            format_calendar_day(todo.start_date),
            format_calendar_day(todo.due_date),
            todo.completed,
            todo.is_deleted,
            todo.status.as_str(),
            todo.id,
            user_id,
        ],
    )?;

    if changed == 0 {
        return Err(InternalError::NotFound(format!("Todo {} not found", todo.id)));
    }

    delete_subtasks_from_db(todo.id, &transaction)?;
    add_subtasks_to_db(todo.id, &todo.subtasks, &transaction)?;
    transaction.commit()?;

    Ok(())
}

pub fn update_todo_in_db(
    user_id: UserID,
    todo_id: TodoID,
    update: UpdateTodoRequest,
    today: NaiveDate,
    db_connection: &Connection,
) -> InternalResult<Todo> {
    let mut todo = get_todo_from_db(user_id, todo_id, db_connection)?;

    apply_update(&mut todo, update, today)?;
    save_todo_to_db(user_id, &todo, db_connection)?;

    Ok(todo)
}

pub fn mark_todo_completed_in_db(
    user_id: UserID,
    todo_id: TodoID,
    db_connection: &Connection,
) -> InternalResult<Todo> {
    let mut todo = get_todo_from_db(user_id, todo_id, db_connection)?;

    todo.completed = true;
    todo.status = Status::Completed;
    save_todo_to_db(user_id, &todo, db_connection)?;

    Ok(todo)
}

pub fn delete_todo_from_db(user_id: UserID, todo_id: TodoID, db_connection: &Connection) -> InternalResult<()> {
    let owned: Option<TodoID> = db_connection
        .query_row(
            "SELECT id FROM todos WHERE id = (?1) AND user_id = (?2)",
            params![todo_id, user_id],
            |row| row.get(0),
        )
        .optional()?;

    if owned.is_none() {
        return Err(InternalError::NotFound(format!("Todo {} not found", todo_id)));
    }

    let transaction = db_connection.unchecked_transaction()?;

    delete_subtasks_from_db(todo_id, &transaction)?;
    transaction.execute("DELETE FROM todos WHERE id = (?1)", params![todo_id])?;
    transaction.commit()?;

    Ok(())
}
