mod card;
mod dashboard;
mod entries;
mod login;
mod table;

pub use dashboard::{DashboardPage, RootAuthed};
pub use login::LoginPage;
