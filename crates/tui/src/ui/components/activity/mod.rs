pub mod activity_component;
pub mod state;

pub use activity_component::ActivityComponent;
pub use state::ActivityState;
