//! The story list state machine.
//!
//! Every change to the visible list goes through [`SearchState::apply`] with
//! one of the [`StoriesAction`] variants. The match is exhaustive, so a new
//! transition cannot be added without handling it here.

use super::story::{ObjectId, Story};

#[derive(Debug, Clone, PartialEq)]
pub enum StoriesAction {
    /// A request was issued.
    FetchInit,
    /// A request resolved with a list of hits.
    FetchSuccess(Vec<Story>),
    /// A request failed for any reason.
    FetchFailure,
    /// The user dismissed a story.
    RemoveStory(ObjectId),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchState {
    pub data: Vec<Story>,
    pub is_loading: bool,
    pub is_error: bool,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, action: StoriesAction) {
        match action {
            StoriesAction::FetchInit => {
                self.is_loading = true;
                self.is_error = false;
            }
            StoriesAction::FetchSuccess(payload) => {
                self.is_loading = false;
                self.is_error = false;
                self.data = payload;
            }
            StoriesAction::FetchFailure => {
                self.is_loading = false;
                self.is_error = true;
            }
            StoriesAction::RemoveStory(id) => {
                self.data.retain(|story| story.object_id != id);
            }
        }
    }

    pub fn fetch_init(&mut self) {
        self.apply(StoriesAction::FetchInit);
    }

    pub fn fetch_success(&mut self, payload: Vec<Story>) {
        self.apply(StoriesAction::FetchSuccess(payload));
    }

    pub fn fetch_failure(&mut self) {
        self.apply(StoriesAction::FetchFailure);
    }

    pub fn remove_story(&mut self, target: &Story) {
        self.apply(StoriesAction::RemoveStory(target.object_id.clone()));
    }
}
