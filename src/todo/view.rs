use chrono::NaiveDate;

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use super::data::{Category, Status, Todo};

/// A named filter over the todo collection. Identifiers we do not know are
/// kept as `Other` and filter nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Today,
    Previous,
    Upcoming,
    All,
    Important,
    Pending,
    Ongoing,
    Completed,
    Trash,
    Other(String),
}

impl View {
    pub fn parse(raw: &str) -> View {
        match raw.trim().to_ascii_lowercase().as_str() {
            "today" => View::Today,
            "previous" => View::Previous,
            "upcoming" => View::Upcoming,
            "all" => View::All,
            "important" => View::Important,
            "pending" => View::Pending,
            "ongoing" => View::Ongoing,
            "completed" => View::Completed,
            "trash" => View::Trash,
            _ => View::Other(raw.to_string()),
        }
    }

    pub fn static_label(&self) -> Option<&'static str> {
        match self {
            View::Today => Some("Today"),
            View::Previous => Some("Previous"),
            View::Upcoming => Some("Upcoming"),
            View::All => Some("All"),
            View::Important => Some("Important"),
            View::Pending => Some("Pending"),
            View::Ongoing => Some("Ongoing"),
            View::Completed => Some("Completed"),
            View::Trash => Some("Trash"),
            View::Other(_) => None,
        }
    }

    /// The status a status tab selects on.
    fn status(&self) -> Option<Status> {
        match self {
            View::Pending => Some(Status::Pending),
            View::Ongoing => Some(Status::Ongoing),
            View::Completed => Some(Status::Completed),
            _ => None,
        }
    }
}

impl FromStr for View {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<View, Infallible> {
        Ok(View::parse(s))
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            View::Other(raw) => f.write_str(raw),
            known => f.write_str(known.static_label().unwrap_or_default()),
        }
    }
}

/// Whether `todo` belongs in `view`. Deleted todos only ever show up in
/// the trash. Status tabs compare against the stored status, so callers
/// annotate before filtering.
pub fn matches_view(todo: &Todo, view: &View, today: NaiveDate) -> bool {
    if todo.is_deleted && *view != View::Trash {
        return false;
    }

    match view {
        View::Today => todo.start_date == today || todo.due_date == today,
        View::Previous => todo.start_date < today || todo.due_date < today,
        View::Upcoming => todo.start_date > today,
        View::All => !todo.is_deleted,
        View::Important => todo.category == Category::Important,
        View::Pending | View::Ongoing | View::Completed => view.status() == Some(todo.status),
        View::Trash => todo.is_deleted,
        View::Other(_) => true,
    }
}

pub fn select_view<'a>(todos: &'a [Todo], view: &View, today: NaiveDate) -> Vec<&'a Todo> {
    todos
        .iter()
        .filter(|todo| matches_view(todo, view, today))
        .collect()
}
