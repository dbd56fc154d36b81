//! HTTP API handlers for birdlog-api

pub mod checklists;
pub mod health;
pub mod identity;
pub mod search;
pub mod species;
pub mod stats;

pub use checklists::{delete_checklist, edit_checklist, get_checklists, get_my_checklists, submit_checklist};
pub use health::health_routes;
pub use identity::CurrentUser;
pub use search::search_my_checklist;
pub use species::{get_species, search_species};
pub use stats::get_species_details;
