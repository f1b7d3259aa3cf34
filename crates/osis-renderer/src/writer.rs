//! Output buffer for a single render pass.
//!
//! OSIS announces some structures after the point where their HTML has to appear (a pre-verse
//! heading arrives after the verse tag it must precede, an empty verse is only known to be empty
//! once it closes). The writer therefore supports truncating back to a remembered position and a
//! single-slot retroactive insertion: the tail of the buffer is held aside, new content is appended
//! in its place, and the tail is put back when the insertion finishes.

use std::fmt;

use crate::context::VerseInfo;

pub const BR: &str = "<br />";
pub const NBSP: &str = "&#160;";
pub const ZERO_WIDTH_SPACE: &str = "&#x200b;";
pub const QUOTE: &str = "&quot;";
pub const BREAKLINE: &str = "<div class='breakline'></div>";

#[derive(Debug, Default)]
pub struct HtmlTextWriter {
    buffer: String,
    temp_store: String,
    /// Tail of `buffer` held aside while an insertion is in progress.
    overwritten: String,
    insertion_requests: usize,
    dont_write_requests: usize,
    temp_store_requests: usize,
}

impl HtmlTextWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `text` to the main buffer, the temp store, or nowhere.
    ///
    /// Returns true only when the text landed in the main buffer.
    pub fn write(&mut self, text: &str) -> bool {
        if self.dont_write_requests > 0 {
            false
        } else if self.temp_store_requests > 0 {
            self.temp_store.push_str(text);
            false
        } else {
            self.buffer.push_str(text);
            true
        }
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.buffer.len()
    }

    /// Truncates the buffer back to `position`, discarding everything written since.
    pub fn remove_after(&mut self, position: usize) {
        let position = self.checked_position(position);
        self.buffer.truncate(position);
    }

    /// Starts redirecting writes to `position`.
    ///
    /// Only the outermost call moves the buffer tail aside; nested calls just count, so there is
    /// never more than one held tail.
    pub fn begin_insert_at(&mut self, position: usize) {
        self.insertion_requests += 1;
        if self.insertion_requests == 1 {
            let position = self.checked_position(position);
            self.overwritten = self.buffer.split_off(position);
        }
    }

    pub fn finish_inserting(&mut self) {
        match self.insertion_requests {
            0 => tracing::warn!("finish_inserting called with no insertion in progress"),
            1 => {
                let tail = std::mem::take(&mut self.overwritten);
                self.buffer.push_str(&tail);
                self.insertion_requests = 0;
            }
            _ => self.insertion_requests -= 1,
        }
    }

    /// Closes any insertion left open, e.g. a pre-verse start milestone whose end milestone never
    /// arrived, so the held tail is not lost.
    pub fn abort_any_unterminated_insertion(&mut self) {
        if self.insertion_requests > 0 {
            tracing::debug!(
                depth = self.insertion_requests,
                "closing unterminated insertion"
            );
            self.insertion_requests = 1;
            self.finish_inserting();
        }
    }

    #[inline]
    pub fn is_inserting(&self) -> bool {
        self.insertion_requests > 0
    }

    /// Writes `text` before the current verse number if nothing has been written for the verse yet,
    /// otherwise at the end of the buffer. Returns whether the text was inserted before the verse.
    pub fn write_optionally_before_verse(&mut self, text: &str, verse: &VerseInfo) -> bool {
        let before_verse = !verse.is_text_since_verse;
        if before_verse {
            self.begin_insert_at(verse.position_to_insert_before_verse);
        }
        self.write(text);
        if before_verse {
            self.finish_inserting();
        }
        before_verse
    }

    /// Suppresses (true) or re-enables (false) all writes. Calls nest.
    pub fn set_dont_write(&mut self, dont_write: bool) {
        if dont_write {
            self.dont_write_requests += 1;
        } else if self.dont_write_requests == 0 {
            tracing::warn!("set_dont_write(false) without a matching suppression");
        } else {
            self.dont_write_requests -= 1;
        }
    }

    pub fn write_to_temp_store(&mut self) {
        self.temp_store_requests += 1;
    }

    pub fn finish_writing_to_temp_store(&mut self) {
        if self.temp_store_requests == 0 {
            tracing::warn!("finish_writing_to_temp_store without a matching request");
        } else {
            self.temp_store_requests -= 1;
        }
    }

    pub fn clear_temp_store(&mut self) {
        self.temp_store.clear();
    }

    pub fn temp_store_string(&self) -> &str {
        &self.temp_store
    }

    /// The main buffer as it stands. A tail held aside by an open insertion is not included.
    pub fn html(&self) -> &str {
        &self.buffer
    }

    pub fn into_html(mut self) -> String {
        self.abort_any_unterminated_insertion();
        self.buffer
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Positions are byte offsets recorded from `position()`; one recorded before a truncation can
    /// outlive it, so clamp rather than panic.
    fn checked_position(&self, position: usize) -> usize {
        if position > self.buffer.len() {
            tracing::warn!(
                position,
                len = self.buffer.len(),
                "stale writer position clamped to end of buffer"
            );
            return self.buffer.len();
        }
        let mut position = position;
        while !self.buffer.is_char_boundary(position) {
            position -= 1;
        }
        position
    }
}

impl fmt::Write for HtmlTextWriter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.write(s);
        Ok(())
    }
}
