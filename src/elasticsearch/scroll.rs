use crate::elasticsearch::search::{decode, Hit, SearchResponse};
use crate::elasticsearch::Transport;
use crate::error::{Error, Result};
use std::collections::VecDeque;
use std::time::Duration;
use tracing::{debug, warn};

/// Pulls hits one at a time, fetching the next scroll page only once the
/// current one is used up.  The first empty page ends the scroll for good.
pub struct ScrollIterator<'a, T: Transport> {
    transport: &'a T,
    queue: VecDeque<Hit>,
    scroll_id: Option<String>,
    keep_alive: Duration,
}

impl<'a, T: Transport> ScrollIterator<'a, T> {
    pub fn new(transport: &'a T, initial: SearchResponse, keep_alive: Duration) -> Self {
        ScrollIterator {
            transport,
            queue: initial.hits.hits.into(),
            scroll_id: initial.scroll_id,
            keep_alive,
        }
    }

    pub fn scroll_id(&self) -> Option<&str> {
        self.scroll_id.as_deref()
    }

    /// Is another hit available?  May issue one continuation request when
    /// the buffered page is empty.
    pub fn has_next(&mut self) -> Result<bool> {
        if self.queue.is_empty() {
            self.fetch_next_page()?;
        }
        Ok(!self.queue.is_empty())
    }

    pub fn next_hit(&mut self) -> Result<Hit> {
        if !self.has_next()? {
            warn!("next hit requested from an exhausted scroll");
            return Err(Error::ScrollExhausted);
        }
        self.queue.pop_front().ok_or(Error::ScrollExhausted)
    }

    fn fetch_next_page(&mut self) -> Result<()> {
        let scroll_id = match &self.scroll_id {
            Some(scroll_id) => scroll_id,
            None => return Ok(()),
        };

        debug!(keep_alive = ?self.keep_alive, "continuing scroll");
        let reply = self.transport.continue_scroll(self.keep_alive, scroll_id)?;
        let response = decode(&reply)?;

        if response.hits.hits.is_empty() {
            debug!("scroll returned an empty page");
            self.scroll_id = None;
        } else {
            debug!(hits = response.hits.hits.len(), "scroll page received");
            self.queue = response.hits.hits.into();
            self.scroll_id = response.scroll_id;
        }
        Ok(())
    }
}

impl<T: Transport> Iterator for ScrollIterator<'_, T> {
    type Item = Result<Hit>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.has_next() {
            Ok(true) => self.queue.pop_front().map(Ok),
            Ok(false) => None,
            Err(e) => Some(Err(e)),
        }
    }
}
