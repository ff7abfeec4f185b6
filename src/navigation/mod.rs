// Navigation core: where the user is, how they got there, and what has already been fetched.
mod controller;
mod state;

pub use controller::NavigationController;
pub use state::{Selection, Transition};
