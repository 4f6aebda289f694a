use ratatui::widgets::TableState;

use crate::app::SearchSession;
use crate::domain::{ObjectId, Story};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input,
    List,
}

impl Focus {
    pub fn toggle(self) -> Self {
        match self {
            Focus::Input => Focus::List,
            Focus::List => Focus::Input,
        }
    }
}

pub const PAGE_SIZE: usize = 10;

pub struct TuiApp {
    pub session: SearchSession,
    pub focus: Focus,
    pub story_index: usize,
    pub table_state: TableState,
    pub should_quit: bool,
    pub status_message: Option<String>,
}

impl TuiApp {
    pub fn new(session: SearchSession) -> Self {
        let mut table_state = TableState::default();
        table_state.select(Some(0));

        Self {
            session,
            focus: Focus::Input,
            story_index: 0,
            table_state,
            should_quit: false,
            status_message: None,
        }
    }

    pub fn visible_count(&self) -> usize {
        self.session.visible_stories().len()
    }

    pub fn selected_story(&self) -> Option<&Story> {
        self.session.visible_stories().get(self.story_index).copied()
    }

    pub fn move_up(&mut self) {
        self.select(self.story_index.saturating_sub(1));
    }

    pub fn move_down(&mut self) {
        self.select(self.story_index + 1);
    }

    pub fn next_page(&mut self) {
        self.select(self.story_index + PAGE_SIZE);
    }

    pub fn prev_page(&mut self) {
        self.select(self.story_index.saturating_sub(PAGE_SIZE));
    }

    /// Keep the selection inside the list after it shrank or was replaced.
    pub fn clamp_selection(&mut self) {
        self.select(self.story_index);
    }

    /// Remove the selected story, returning its id and title.
    pub fn dismiss_selected(&mut self) -> Option<(ObjectId, String)> {
        let (id, title) = self
            .selected_story()
            .map(|s| (s.object_id.clone(), s.display_title().to_string()))?;
        self.session.dismiss(&id);
        self.clamp_selection();
        Some((id, title))
    }

    pub fn toggle_focus(&mut self) {
        self.focus = self.focus.toggle();
    }

    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    fn select(&mut self, index: usize) {
        let max_index = self.visible_count().saturating_sub(1);
        self.story_index = index.min(max_index);
        self.table_state.select(Some(self.story_index));
    }
}
