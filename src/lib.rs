#[macro_use]
extern crate rocket;

pub mod auth;
pub mod catchers;
pub mod config;
pub mod data;
pub mod internal_error;
pub mod logging;
pub mod todo;

use rocket::figment::Figment;
use rocket::fs::FileServer;
use rocket::{Build, Rocket};
use tracing::{info, warn};

use auth::endpoints as auth_endpoints;
use config::AppConfig;
use internal_error::InternalResult;
use todo::endpoints as todo_endpoints;

pub fn build() -> InternalResult<Rocket<Build>> {
    build_from(rocket::Config::figment())
}

pub fn build_from(figment: Figment) -> InternalResult<Rocket<Build>> {
    let config = AppConfig::from_figment(&figment)?;
    let connection = data::open_database(&config.database_path)?;

    let rocket = rocket::custom(figment)
        .manage(connection)
        .mount(
            "/api",
            routes![
                auth_endpoints::signup,
                auth_endpoints::login,
                auth_endpoints::logout,
                auth_endpoints::current_user,
                todo_endpoints::get_todos,
                todo_endpoints::add_todo,
                todo_endpoints::update_todo,
                todo_endpoints::mark_completed,
                todo_endpoints::delete_todo,
                todo_endpoints::get_tabs,
            ],
        )
        .register("/", catchers![catchers::default_catcher]);

    if config.static_dir.is_dir() {
        info!(dir = %config.static_dir.display(), "serving static files");
        Ok(rocket.mount("/", FileServer::from(&config.static_dir).rank(15)))
    } else {
        warn!(dir = %config.static_dir.display(), "static directory missing, serving the API only");
        Ok(rocket)
    }
}
