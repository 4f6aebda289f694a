pub mod state;
pub mod story;
pub mod trigger;

pub use state::{SearchState, StoriesAction};
pub use story::{ObjectId, Story};
pub use trigger::TriggerPolicy;
