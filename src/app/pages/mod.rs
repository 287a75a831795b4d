//! Dioxus fullstack page components.
//!
//! `Home` and `NotFound` are public; everything else renders inside the
//! guarded dashboard shell.

mod analytics;
mod home;
mod login;
mod manage;
mod not_found;
mod overview;
mod profile;
mod restricted;
mod system_tests;

pub use analytics::Analytics;
pub use home::Home;
pub use login::Login;
pub use manage::{ManageAccommodations, ManageDestinations, ManageTours};
pub use not_found::NotFound;
pub use overview::Overview;
pub use profile::Profile;
pub use restricted::Restricted;
pub use system_tests::SystemTests;
