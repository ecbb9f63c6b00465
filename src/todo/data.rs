use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

use super::dates;
use super::presentation::ColorTag;
use crate::internal_error::InternalError;

pub type TodoID = i64;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Casual,
    Important,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Casual => "casual",
            Category::Important => "important",
        }
    }
}

impl FromStr for Category {
    type Err = InternalError;

    fn from_str(s: &str) -> Result<Category, InternalError> {
        match s {
            "casual" => Ok(Category::Casual),
            "important" => Ok(Category::Important),
            other => Err(InternalError::Validation(format!(
                "Unknown category '{}'",
                other
            ))),
        }
    }
}

/// Lifecycle state of a todo relative to a given day.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Completed,
    Ongoing,
    Upcoming,
    Pending,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Completed => "completed",
            Status::Ongoing => "ongoing",
            Status::Upcoming => "upcoming",
            Status::Pending => "pending",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = InternalError;

    fn from_str(s: &str) -> Result<Status, InternalError> {
        match s {
            "completed" => Ok(Status::Completed),
            "ongoing" => Ok(Status::Ongoing),
            "upcoming" => Ok(Status::Upcoming),
            "pending" => Ok(Status::Pending),
            other => Err(InternalError::Validation(format!(
                "Unknown status '{}'",
                other
            ))),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Todo {
    pub id: TodoID,
    pub title: String,
    pub category: Category,
    pub subtasks: Vec<String>,
    #[serde(with = "dates::calendar_day")]
    pub start_date: NaiveDate,
    #[serde(with = "dates::calendar_day")]
    pub due_date: NaiveDate,
    pub completed: bool,
    pub is_deleted: bool,
    pub status: Status,
}

/// A todo as handed to the rendering layer: status already derived for the
/// requested day, plus the color tag that status maps to.
#[derive(Serialize, Debug, Clone)]
pub struct TodoResponse {
    #[serde(flatten)]
    pub todo: Todo,
    pub status_tag: ColorTag,
}

impl From<Todo> for TodoResponse {
    fn from(todo: Todo) -> TodoResponse {
        let status_tag = todo.status.tag();
        TodoResponse { todo, status_tag }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct NewTodoRequest {
    #[serde(default)]
    pub category: Category,
    pub title: String,
    #[serde(default)]
    pub subtasks: Vec<String>,
    #[serde(deserialize_with = "dates::calendar_day::deserialize")]
    pub start_date: NaiveDate,
    #[serde(deserialize_with = "dates::calendar_day::deserialize")]
    pub due_date: NaiveDate,
}

/// Partial update; absent fields are left untouched.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct UpdateTodoRequest {
    #[serde(default, deserialize_with = "dates::optional_calendar_day::deserialize")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "dates::optional_calendar_day::deserialize")]
    pub due_date: Option<NaiveDate>,
    pub is_deleted: Option<bool>,
    pub status: Option<Status>,
    pub category: Option<Category>,
    pub title: Option<String>,
    pub subtasks: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn todo_serializes_with_plain_dates() {
        let todo = Todo {
            id: 7,
            title: "Water plants".to_string(),
            category: Category::Important,
            subtasks: vec!["balcony".to_string()],
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            due_date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            completed: false,
            is_deleted: false,
            status: Status::Ongoing,
        };

        let json = serde_json::to_value(TodoResponse::from(todo)).unwrap();

        assert_eq!(json["start_date"], "2024-01-01");
        assert_eq!(json["due_date"], "2024-01-10");
        assert_eq!(json["category"], "important");
        assert_eq!(json["status"], "ongoing");
        assert_eq!(json["status_tag"], "text-orange-700");
    }

    #[test]
    fn new_todo_accepts_timestamps_and_defaults() {
        let request: NewTodoRequest = serde_json::from_str(
            r#"{"title": "Pay rent", "start_date": "2024-02-01T09:00:00.000Z", "due_date": "2024-02-03"}"#,
        )
        .unwrap();

        assert_eq!(request.category, Category::Casual);
        assert!(request.subtasks.is_empty());
        assert_eq!(request.start_date, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
    }

    #[test]
    fn update_request_leaves_missing_fields_empty() {
        let request: UpdateTodoRequest = serde_json::from_str(r#"{"is_deleted": true}"#).unwrap();

        assert_eq!(request.is_deleted, Some(true));
        assert!(request.start_date.is_none());
        assert!(request.status.is_none());
        assert!(request.title.is_none());
    }

    #[test]
    fn unknown_status_strings_do_not_parse() {
        assert!("archived".parse::<Status>().is_err());
        assert_eq!("pending".parse::<Status>().unwrap(), Status::Pending);
    }
}
