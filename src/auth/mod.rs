pub mod data;
pub mod endpoints;
pub mod guard;
pub mod helpers;

pub use guard::AuthenticatedUser;
