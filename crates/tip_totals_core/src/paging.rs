use crate::record::TipRecord;

/// One page of a table scan. `next_token` is present while more data remains.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanPage<T> {
    pub items: Vec<TipRecord>,
    pub next_token: Option<T>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum CursorState<T> {
    Unstarted,
    Continue(T),
    Exhausted,
}

/// Paging state for a continuation-token scan.
///
/// The cursor hands out the start token for each request and terminates once
/// a page arrives without a next token. It never yields a request after that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanCursor<T> {
    state: CursorState<T>,
    pages_seen: usize,
}

impl<T> Default for ScanCursor<T> {
    fn default() -> Self {
        Self {
            state: CursorState::Unstarted,
            pages_seen: 0,
        }
    }
}

impl<T> ScanCursor<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes the exclusive-start token for the next request.
    /// `Some(None)` is the first request; `None` means the scan is finished.
    pub fn next_request(&mut self) -> Option<Option<T>> {
        match std::mem::replace(&mut self.state, CursorState::Exhausted) {
            CursorState::Unstarted => Some(None),
            CursorState::Continue(token) => Some(Some(token)),
            CursorState::Exhausted => None,
        }
    }

    pub fn advance(&mut self, next_token: Option<T>) {
        self.pages_seen += 1;
        self.state = match next_token {
            Some(token) => CursorState::Continue(token),
            None => CursorState::Exhausted,
        };
    }

    pub fn pages_seen(&self) -> usize {
        self.pages_seen
    }
}
