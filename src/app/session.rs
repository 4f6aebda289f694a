//! Search session: the search term, the trigger policy and the story list.
//!
//! The session never performs I/O on the network itself. Methods that want a
//! fetch return a [`SearchRequest`]; the caller runs it and feeds the
//! [`SearchCompletion`] back through [`SearchSession::complete`]. Only the
//! completion matching the most recently issued request is applied, so a slow
//! earlier response cannot overwrite a newer one.

use std::sync::Arc;

use crate::domain::{ObjectId, SearchState, StoriesAction, Story, TriggerPolicy};
use crate::search::{SearchCompletion, SearchRequest};
use crate::store::{PreferenceStore, SEARCH_TERM_KEY};

pub const DEFAULT_TERM: &str = "React";

/// Shown in place of any fetch error detail.
pub const FETCH_FAILURE_MESSAGE: &str = "Something went wrong ...";

pub struct SearchSession {
    store: Arc<dyn PreferenceStore + Send + Sync>,
    policy: TriggerPolicy,
    state: SearchState,
    term: String,
    active_query: String,
    last_seq: u64,
}

impl SearchSession {
    /// Seed the term from the store, falling back to `default_term` when
    /// nothing (or an empty string) was stored.
    pub fn new(
        store: Arc<dyn PreferenceStore + Send + Sync>,
        policy: TriggerPolicy,
        default_term: &str,
    ) -> Self {
        let term = match store.get(SEARCH_TERM_KEY) {
            Ok(Some(stored)) if !stored.is_empty() => stored,
            Ok(_) => default_term.to_string(),
            Err(e) => {
                tracing::warn!("Could not read stored search term: {}", e);
                default_term.to_string()
            }
        };

        Self {
            store,
            policy,
            state: SearchState::new(),
            active_query: term.clone(),
            term,
            last_seq: 0,
        }
    }

    pub fn policy(&self) -> TriggerPolicy {
        self.policy
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    /// The query the current list was (or is being) fetched for.
    pub fn active_query(&self) -> &str {
        &self.active_query
    }

    pub fn can_submit(&self) -> bool {
        self.policy.has_submit() && !self.term.is_empty()
    }

    /// The request to issue when the session starts.
    pub fn initial_request(&mut self) -> Option<SearchRequest> {
        if self.active_query.is_empty() {
            return None;
        }
        let query = self.active_query.clone();
        Some(self.begin(query))
    }

    /// Replace the search term, writing it through to the store.
    pub fn set_term(&mut self, term: impl Into<String>) -> Option<SearchRequest> {
        self.term = term.into();
        self.persist_term();

        match self.policy {
            TriggerPolicy::Eager if !self.term.is_empty() => {
                let query = self.term.clone();
                Some(self.begin(query))
            }
            TriggerPolicy::Eager | TriggerPolicy::Submit | TriggerPolicy::Filter => None,
        }
    }

    pub fn push_char(&mut self, c: char) -> Option<SearchRequest> {
        let mut term = self.term.clone();
        term.push(c);
        self.set_term(term)
    }

    pub fn pop_char(&mut self) -> Option<SearchRequest> {
        let mut term = self.term.clone();
        term.pop()?;
        self.set_term(term)
    }

    /// Copy the draft term into the active query and issue one request.
    pub fn submit(&mut self) -> Option<SearchRequest> {
        if !self.can_submit() {
            return None;
        }
        let query = self.term.clone();
        Some(self.begin(query))
    }

    /// Mark a new fetch as in flight for `query`.
    pub fn begin(&mut self, query: String) -> SearchRequest {
        self.last_seq += 1;
        self.active_query = query.clone();
        self.state.apply(StoriesAction::FetchInit);
        SearchRequest {
            seq: self.last_seq,
            query,
        }
    }

    /// Apply a finished fetch. Returns `false` when a newer request has been
    /// issued since, in which case the completion is dropped.
    pub fn complete(&mut self, completion: SearchCompletion) -> bool {
        if completion.seq != self.last_seq {
            tracing::debug!(
                "Discarding stale search #{} (latest is #{})",
                completion.seq,
                self.last_seq
            );
            return false;
        }

        match completion.outcome {
            Ok(stories) => self.state.apply(StoriesAction::FetchSuccess(stories)),
            Err(e) => {
                tracing::warn!("Search for {:?} failed: {}", self.active_query, e);
                self.state.apply(StoriesAction::FetchFailure);
            }
        }
        true
    }

    pub fn dismiss(&mut self, id: &ObjectId) {
        self.state.apply(StoriesAction::RemoveStory(id.clone()));
    }

    /// Stories to show. Under [`TriggerPolicy::Filter`] this is the fetched
    /// list narrowed to titles containing the term.
    pub fn visible_stories(&self) -> Vec<&Story> {
        match self.policy {
            TriggerPolicy::Filter => self
                .state
                .data
                .iter()
                .filter(|story| story.title_contains(&self.term))
                .collect(),
            TriggerPolicy::Eager | TriggerPolicy::Submit => self.state.data.iter().collect(),
        }
    }

    fn persist_term(&self) {
        if let Err(e) = self.store.set(SEARCH_TERM_KEY, &self.term) {
            tracing::warn!("Could not persist search term: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{Result, StoriesError};
    use crate::store::SqliteStore;

    fn store() -> Arc<SqliteStore> {
        Arc::new(SqliteStore::in_memory().unwrap())
    }

    fn session(policy: TriggerPolicy) -> (SearchSession, Arc<SqliteStore>) {
        let store = store();
        (SearchSession::new(store.clone(), policy, DEFAULT_TERM), store)
    }

    fn stories() -> Vec<Story> {
        vec![Story::new(0, "React"), Story::new(1, "Redux")]
    }

    fn ok(seq: u64, stories: Vec<Story>) -> SearchCompletion {
        SearchCompletion {
            seq,
            outcome: Ok(stories),
        }
    }

    fn failed(seq: u64) -> SearchCompletion {
        SearchCompletion {
            seq,
            outcome: Err(StoriesError::Other("boom".into())),
        }
    }

    struct BrokenStore;

    impl PreferenceStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(StoriesError::Other("unavailable".into()))
        }

        fn set(&self, _key: &str, _value: &str) -> Result<()> {
            Err(StoriesError::Other("read-only".into()))
        }
    }

    #[test]
    fn test_seeds_default_term() {
        let (session, _) = session(TriggerPolicy::Submit);
        assert_eq!(session.term(), "React");
        assert_eq!(session.active_query(), "React");
    }

    #[test]
    fn test_seeds_stored_term() {
        let store = store();
        store.set(SEARCH_TERM_KEY, "Rust").unwrap();
        let session = SearchSession::new(store, TriggerPolicy::Submit, DEFAULT_TERM);
        assert_eq!(session.term(), "Rust");
    }

    #[test]
    fn test_empty_stored_term_falls_back_to_default() {
        let store = store();
        store.set(SEARCH_TERM_KEY, "").unwrap();
        let session = SearchSession::new(store, TriggerPolicy::Submit, DEFAULT_TERM);
        assert_eq!(session.term(), "React");
    }

    #[test]
    fn test_set_term_writes_through() {
        let (mut session, store) = session(TriggerPolicy::Submit);
        session.set_term("Rust");
        assert_eq!(store.get(SEARCH_TERM_KEY).unwrap(), Some("Rust".into()));
    }

    #[test]
    fn test_store_failures_are_swallowed() {
        let mut session =
            SearchSession::new(Arc::new(BrokenStore), TriggerPolicy::Eager, DEFAULT_TERM);
        assert_eq!(session.term(), "React");
        assert!(session.set_term("Rust").is_some());
        assert_eq!(session.term(), "Rust");
    }

    #[test]
    fn test_initial_request_marks_loading() {
        let (mut session, _) = session(TriggerPolicy::Submit);
        let request = session.initial_request().unwrap();
        assert_eq!(request.query, "React");
        assert!(session.state().is_loading);
    }

    #[test]
    fn test_initial_request_skipped_for_empty_default() {
        let mut session = SearchSession::new(store(), TriggerPolicy::Submit, "");
        assert!(session.initial_request().is_none());
        assert!(!session.state().is_loading);
    }

    #[test]
    fn test_submit_policy_edits_do_not_fetch() {
        let (mut session, _) = session(TriggerPolicy::Submit);
        assert!(session.set_term("Ru").is_none());
        assert!(session.push_char('s').is_none());
        assert_eq!(session.term(), "Rus");
        assert_eq!(session.active_query(), "React");
        assert!(!session.state().is_loading);
    }

    #[test]
    fn test_submit_issues_one_request_for_draft() {
        let (mut session, _) = session(TriggerPolicy::Submit);
        session.set_term("Rust");
        let request = session.submit().unwrap();
        assert_eq!(request.query, "Rust");
        assert_eq!(session.active_query(), "Rust");
        assert!(session.state().is_loading);
    }

    #[test]
    fn test_submit_empty_draft_is_noop() {
        let (mut session, _) = session(TriggerPolicy::Submit);
        session.set_term("");
        assert!(!session.can_submit());
        assert!(session.submit().is_none());
        assert_eq!(session.active_query(), "React");
    }

    #[test]
    fn test_submit_whitespace_draft_is_sent() {
        let (mut session, _) = session(TriggerPolicy::Submit);
        session.set_term(" ");
        assert!(session.can_submit());
        assert_eq!(session.submit().unwrap().query, " ");
    }

    #[test]
    fn test_submit_unavailable_outside_submit_policy() {
        let (mut session, _) = session(TriggerPolicy::Eager);
        assert!(!session.can_submit());
        assert!(session.submit().is_none());
    }

    #[test]
    fn test_eager_policy_fetches_on_every_edit() {
        let (mut session, _) = session(TriggerPolicy::Eager);
        let first = session.set_term("R").unwrap();
        let second = session.push_char('u').unwrap();
        assert_eq!(first.query, "R");
        assert_eq!(second.query, "Ru");
        assert!(second.seq > first.seq);
    }

    #[test]
    fn test_eager_policy_skips_empty_term() {
        let (mut session, store) = session(TriggerPolicy::Eager);
        session.set_term("R");
        assert!(session.pop_char().is_none());
        assert_eq!(session.term(), "");
        assert_eq!(store.get(SEARCH_TERM_KEY).unwrap(), Some(String::new()));
    }

    #[test]
    fn test_pop_char_on_empty_term() {
        let (mut session, _) = session(TriggerPolicy::Eager);
        session.set_term("");
        assert!(session.pop_char().is_none());
        assert_eq!(session.term(), "");
    }

    #[test]
    fn test_filter_policy_narrows_by_title() {
        let (mut session, _) = session(TriggerPolicy::Filter);
        let request = session.initial_request().unwrap();
        session.complete(ok(request.seq, stories()));

        assert!(session.set_term("Red").is_none());
        let visible = session.visible_stories();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].object_id, ObjectId::Number(1));
    }

    #[test]
    fn test_filter_policy_empty_term_shows_all() {
        let (mut session, _) = session(TriggerPolicy::Filter);
        let request = session.initial_request().unwrap();
        session.complete(ok(request.seq, stories()));
        session.set_term("");
        assert_eq!(session.visible_stories().len(), 2);
    }

    #[test]
    fn test_non_filter_policy_shows_all_data() {
        let (mut session, _) = session(TriggerPolicy::Submit);
        let request = session.initial_request().unwrap();
        session.complete(ok(request.seq, stories()));
        session.set_term("Red");
        assert_eq!(session.visible_stories().len(), 2);
    }

    #[test]
    fn test_complete_success_replaces_list() {
        let (mut session, _) = session(TriggerPolicy::Submit);
        let request = session.initial_request().unwrap();
        assert!(session.complete(ok(request.seq, stories())));
        assert_eq!(session.state().data, stories());
        assert!(!session.state().is_loading);
    }

    #[test]
    fn test_complete_failure_keeps_list() {
        let (mut session, _) = session(TriggerPolicy::Submit);
        let first = session.initial_request().unwrap();
        session.complete(ok(first.seq, stories()));

        session.set_term("Rust");
        let second = session.submit().unwrap();
        assert!(session.complete(failed(second.seq)));

        assert!(session.state().is_error);
        assert!(!session.state().is_loading);
        assert_eq!(session.state().data, stories());
    }

    #[test]
    fn test_stale_completion_is_discarded() {
        let (mut session, _) = session(TriggerPolicy::Eager);
        let slow = session.set_term("Re").unwrap();
        let fast = session.set_term("Rust").unwrap();

        let fresh = vec![Story::new(10, "Rust 2024")];
        assert!(session.complete(ok(fast.seq, fresh.clone())));
        assert!(!session.complete(ok(slow.seq, stories())));

        assert_eq!(session.state().data, fresh);
        assert!(!session.state().is_loading);
    }

    #[test]
    fn test_stale_failure_does_not_flag_error() {
        let (mut session, _) = session(TriggerPolicy::Eager);
        let slow = session.set_term("Re").unwrap();
        let _fast = session.set_term("Rust").unwrap();

        assert!(!session.complete(failed(slow.seq)));
        assert!(!session.state().is_error);
        assert!(session.state().is_loading);
    }

    #[test]
    fn test_dismiss_removes_by_identity() {
        let (mut session, _) = session(TriggerPolicy::Submit);
        let request = session.initial_request().unwrap();
        session.complete(ok(request.seq, stories()));

        session.dismiss(&ObjectId::Number(0));
        let ids: Vec<_> = session
            .visible_stories()
            .iter()
            .map(|s| s.object_id.clone())
            .collect();
        assert_eq!(ids, vec![ObjectId::Number(1)]);
    }
}
