//! Directory view state.
//!
//! Owns the search query, the All/Online filter and the keyboard highlight.
//! The visible list is recomputed from the directory on demand; nothing is
//! cached, so the view can never disagree with the seed data.

use chirp_core::{Contact, ContactFilter, ContactId, Directory};

use crate::{KeyInput, TextInput};

/// Result of feeding a key to the directory view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectoryOutcome {
    /// Key not handled by the view.
    Ignored,
    /// View state changed; re-render.
    Updated,
    /// An entry was activated.
    Selected(ContactId),
}

/// Search, filter and highlight state of the contact list.
#[derive(Debug, Clone, Default)]
pub struct DirectoryView {
    query: TextInput,
    filter: ContactFilter,
    highlight: usize,
}

impl DirectoryView {
    /// Create a view with an empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Search query input.
    pub fn query(&self) -> &TextInput {
        &self.query
    }

    /// Active All/Online filter.
    pub fn filter(&self) -> ContactFilter {
        self.filter
    }

    /// Index of the highlighted entry within [`Self::visible`].
    pub fn highlight(&self) -> usize {
        self.highlight
    }

    /// Contacts matching the query and filter, in seed order.
    pub fn visible<'a>(&self, directory: &'a Directory) -> Vec<&'a Contact> {
        directory.filter(self.query.text(), self.filter)
    }

    /// Highlighted contact. `None` if the visible list is empty.
    pub fn highlighted<'a>(&self, directory: &'a Directory) -> Option<&'a Contact> {
        let visible = self.visible(directory);
        visible.get(self.highlight.min(visible.len().saturating_sub(1))).copied()
    }

    /// Replace the query text.
    pub fn set_query(&mut self, query: &str) {
        self.query = TextInput::new();
        for c in query.chars() {
            self.query.edit(KeyInput::Char(c));
        }
        self.highlight = 0;
    }

    /// Switch between All and Online.
    pub fn toggle_filter(&mut self) {
        self.filter = self.filter.toggled();
        self.highlight = 0;
    }

    /// Handle a key while the directory has focus.
    pub fn handle_key(&mut self, key: KeyInput, directory: &Directory) -> DirectoryOutcome {
        match key {
            KeyInput::Up => {
                self.highlight = self.highlight.saturating_sub(1);
                DirectoryOutcome::Updated
            },
            KeyInput::Down => {
                let last = self.visible(directory).len().saturating_sub(1);
                self.highlight = self.highlight.saturating_add(1).min(last);
                DirectoryOutcome::Updated
            },
            KeyInput::Enter => self
                .highlighted(directory)
                .map_or(DirectoryOutcome::Ignored, |c| DirectoryOutcome::Selected(c.id)),
            KeyInput::Ctrl('o') => {
                self.toggle_filter();
                DirectoryOutcome::Updated
            },
            KeyInput::Char(_) | KeyInput::Backspace | KeyInput::Delete => {
                self.query.edit(key);
                self.highlight = 0;
                DirectoryOutcome::Updated
            },
            key if self.query.edit(key) => DirectoryOutcome::Updated,
            _ => DirectoryOutcome::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory() -> Directory {
        let contacts = vec![
            Contact::new(1, "Ana").with_last_message("see you").with_presence(true, "online"),
            Contact::new(2, "Netstat Bob").with_last_message("port taken"),
            Contact::new(3, "Chen").with_last_message("ANA said hi").with_presence(true, "online"),
        ];
        Directory::from_contacts(contacts).unwrap()
    }

    fn type_query(view: &mut DirectoryView, directory: &Directory, text: &str) {
        for c in text.chars() {
            view.handle_key(KeyInput::Char(c), directory);
        }
    }

    #[test]
    fn query_filters_by_name_or_last_message() {
        let directory = directory();
        let mut view = DirectoryView::new();
        type_query(&mut view, &directory, "ana");

        let ids: Vec<_> = view.visible(&directory).iter().map(|c| c.id.0).collect();
        assert_eq!(ids, [1, 3]);
    }

    #[test]
    fn netstat_query_finds_bob() {
        let directory = directory();
        let mut view = DirectoryView::new();
        type_query(&mut view, &directory, "netstat");

        let names: Vec<_> = view.visible(&directory).iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Netstat Bob"]);
    }

    #[test]
    fn no_match_has_nothing_to_select() {
        let directory = directory();
        let mut view = DirectoryView::new();
        view.set_query("zzz-nomatch");

        assert!(view.visible(&directory).is_empty());
        assert!(view.highlighted(&directory).is_none());
        assert_eq!(view.handle_key(KeyInput::Enter, &directory), DirectoryOutcome::Ignored);
    }

    #[test]
    fn arrows_move_highlight_within_bounds() {
        let directory = directory();
        let mut view = DirectoryView::new();

        view.handle_key(KeyInput::Up, &directory);
        assert_eq!(view.highlight(), 0);

        for _ in 0..5 {
            view.handle_key(KeyInput::Down, &directory);
        }
        assert_eq!(view.highlight(), 2);

        assert_eq!(
            view.handle_key(KeyInput::Enter, &directory),
            DirectoryOutcome::Selected(ContactId(3))
        );
    }

    #[test]
    fn editing_query_resets_highlight() {
        let directory = directory();
        let mut view = DirectoryView::new();
        view.handle_key(KeyInput::Down, &directory);
        view.handle_key(KeyInput::Char('n'), &directory);

        assert_eq!(view.highlight(), 0);
    }

    #[test]
    fn ctrl_o_toggles_online_filter() {
        let directory = directory();
        let mut view = DirectoryView::new();

        view.handle_key(KeyInput::Ctrl('o'), &directory);
        assert_eq!(view.filter(), ContactFilter::Online);
        let ids: Vec<_> = view.visible(&directory).iter().map(|c| c.id.0).collect();
        assert_eq!(ids, [1, 3]);

        view.handle_key(KeyInput::Ctrl('o'), &directory);
        assert_eq!(view.filter(), ContactFilter::All);
    }

    #[test]
    fn cursor_keys_edit_query() {
        let directory = directory();
        let mut view = DirectoryView::new();
        type_query(&mut view, &directory, "bo");

        assert_eq!(view.handle_key(KeyInput::Home, &directory), DirectoryOutcome::Updated);
        assert_eq!(view.query().cursor(), 0);
        assert_eq!(view.handle_key(KeyInput::Tab, &directory), DirectoryOutcome::Ignored);
    }
}
