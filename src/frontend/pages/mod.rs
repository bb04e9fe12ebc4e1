//! Page components, one per route.

pub mod dashboard;
pub mod login;
pub mod sections;
pub mod survey;

pub use dashboard::Dashboard;
pub use login::Login;
pub use sections::{Areas, Companies, NotFound, Questionnaires, Questions, Reports, Users};
pub use survey::Survey;
