pub mod auth;
pub mod lessons;
pub mod progress;
pub mod users;
pub mod voice;
