mod home;
mod results;
mod session;
mod state;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use home::HomeView;
pub use results::ResultsView;
pub use session::SessionView;
pub use state::{view_state_from_resource, ViewError, ViewState};
