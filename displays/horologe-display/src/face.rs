//! Clock face state
//!
//! The three fields always come from the same line: a new message replaces
//! the previous one wholesale.

use horologe_protocol::TimeMessage;

/// Clock face shown on the display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockFace {
    /// Most recently accepted message, `None` until the first one arrives
    message: Option<TimeMessage>,
    /// Whether the face needs to be redrawn
    dirty: bool,
}

impl Default for ClockFace {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockFace {
    /// Create an empty face
    ///
    /// Starts dirty so the placeholder is drawn at boot.
    pub const fn new() -> Self {
        Self {
            message: None,
            dirty: true,
        }
    }

    /// Replace the shown message and mark the face dirty
    pub fn apply(&mut self, message: TimeMessage) {
        self.message = Some(message);
        self.dirty = true;
    }

    /// Currently shown message
    pub fn message(&self) -> Option<&TimeMessage> {
        self.message.as_ref()
    }

    /// Check if the face needs redrawing
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark the face as clean (after rendering)
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Mark the face as dirty (needs redraw)
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ClockFace {
    fn format(&self, f: defmt::Formatter) {
        match &self.message {
            Some(message) => defmt::write!(f, "ClockFace[{}, dirty={}]", message, self.dirty),
            None => defmt::write!(f, "ClockFace[empty, dirty={}]", self.dirty),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_face_is_dirty_and_empty() {
        let face = ClockFace::new();
        assert!(face.is_dirty());
        assert!(face.message().is_none());
    }

    #[test]
    fn test_apply_replaces_all_fields() {
        let mut face = ClockFace::new();
        face.apply(TimeMessage::parse("14:37,2025-12-11,Thursday").unwrap());
        face.mark_clean();

        face.apply(TimeMessage::parse("00:01,2025-12-12,Friday").unwrap());
        assert!(face.is_dirty());

        let message = face.message().unwrap();
        assert_eq!(message.time(), "00:01");
        assert_eq!(message.date(), "2025-12-12");
        assert_eq!(message.weekday(), "Friday");
    }

    #[test]
    fn test_mark_clean_and_dirty() {
        let mut face = ClockFace::new();
        face.mark_clean();
        assert!(!face.is_dirty());
        face.mark_dirty();
        assert!(face.is_dirty());
    }
}
