use ratatui::widgets::ListState;

use livescroll_news::FeedState;

/// Work the user asked the service to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request {
    Discover,
    Refresh,
}

pub struct App {
    /// Latest state published by the feed service.
    pub feed: FeedState,
    /// List selection state for scrolling.
    pub list_state: ListState,
    /// Whether the user has requested to quit.
    pub quit: bool,
    /// Request waiting to be handed to the service.
    pending: Option<Request>,
}

impl App {
    pub fn new(feed: FeedState) -> Self {
        Self {
            feed,
            list_state: ListState::default(),
            quit: false,
            pending: None,
        }
    }

    /// Take a newly published state, keeping the selection in range.
    pub fn sync(&mut self, feed: FeedState) {
        self.feed = feed;
        match self.list_state.selected() {
            Some(_) if self.feed.items.is_empty() => self.list_state.select(None),
            Some(i) if i >= self.feed.items.len() => {
                self.list_state.select(Some(self.feed.items.len() - 1))
            }
            _ => {}
        }
    }

    pub fn request(&mut self, request: Request) {
        self.pending = Some(request);
    }

    pub fn take_request(&mut self) -> Option<Request> {
        self.pending.take()
    }

    // -- navigation ----------------------------------------------------------

    pub fn select_next(&mut self) {
        if self.feed.items.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => (i + 1).min(self.feed.items.len() - 1),
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn select_previous(&mut self) {
        if self.feed.items.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => i.saturating_sub(1),
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn select_first(&mut self) {
        if !self.feed.items.is_empty() {
            self.list_state.select(Some(0));
        }
    }

    pub fn select_last(&mut self) {
        if !self.feed.items.is_empty() {
            self.list_state.select(Some(self.feed.items.len() - 1));
        }
    }
}
