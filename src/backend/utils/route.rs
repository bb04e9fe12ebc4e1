//! Application routing system.

use crate::frontend::components::layout::{Guard, Main};
use crate::frontend::pages::{
    Areas, Companies, Dashboard, Login, NotFound, Questionnaires, Questions, Reports, Survey,
    Users,
};

use dioxus::prelude::*;
use dioxus_router::Routable;

/// Whether a route can be shown without a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    RequiresAuth,
}

/// Main routing enum for the application.
///
/// Every route renders inside [`Guard`], which applies the navigation rules
/// in [`crate::backend::utils::guard`].
#[derive(Clone, Routable, Debug, PartialEq, Eq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Guard)]
        /// Sign-in form.
        #[route("/login")]
        Login {},
        /// Public survey answered through an invitation token.
        #[route("/survey/:token")]
        Survey { token: String },
        #[layout(Main)]
            #[route("/")]
            Dashboard {},
            #[route("/companies")]
            Companies {},
            #[route("/areas")]
            Areas {},
            #[route("/users")]
            Users {},
            #[route("/questions")]
            Questions {},
            #[route("/questionnaires")]
            Questionnaires {},
            #[route("/reports")]
            Reports {},
        #[end_layout]
        /// Anything else; redirected to the dashboard.
        #[route("/:..segments")]
        NotFound { segments: Vec<String> },
}

impl Route {
    pub const fn visibility(&self) -> Visibility {
        match self {
            Self::Login {} | Self::Survey { .. } | Self::NotFound { .. } => Visibility::Public,
            Self::Dashboard {}
            | Self::Companies {}
            | Self::Areas {}
            | Self::Users {}
            | Self::Questions {}
            | Self::Questionnaires {}
            | Self::Reports {} => Visibility::RequiresAuth,
        }
    }

    pub const fn requires_auth(&self) -> bool {
        matches!(self.visibility(), Visibility::RequiresAuth)
    }

    /// Route name as shown in navigation and logs.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Login {} => "Login",
            Self::Survey { .. } => "Survey",
            Self::Dashboard {} => "Dashboard",
            Self::Companies {} => "Companies",
            Self::Areas {} => "Areas",
            Self::Users {} => "Users",
            Self::Questions {} => "Questions",
            Self::Questionnaires {} => "Questionnaires",
            Self::Reports {} => "Reports",
            Self::NotFound { .. } => "NotFound",
        }
    }

    /// Maps a path to its route. Unmatched paths resolve to the dashboard.
    pub fn resolve(path: &str) -> Self {
        match path.parse::<Self>() {
            Ok(Self::NotFound { .. }) | Err(_) => Self::Dashboard {},
            Ok(route) => route,
        }
    }

    /// Sections listed in the sidebar, in display order.
    pub fn sections() -> [Self; 7] {
        [
            Self::Dashboard {},
            Self::Companies {},
            Self::Areas {},
            Self::Users {},
            Self::Questions {},
            Self::Questionnaires {},
            Self::Reports {},
        ]
    }
}
