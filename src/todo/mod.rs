pub mod data;
pub mod dates;
pub mod endpoints;
pub mod helpers;
pub mod presentation;
pub mod status;
pub mod view;

pub use data::{Category, Status, Todo, TodoID};
pub use presentation::{status_tag, ColorTag};
pub use status::{annotate, derive_status};
pub use view::{select_view, View};
