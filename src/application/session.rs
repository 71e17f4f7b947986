use std::collections::HashMap;

use crate::domain::value_objects::{ImagePath, UserId};

/// Admin configuration state, owned by the command layer and passed per request.
///
/// Holds the round-robin cursor used by "next image" and the picture each
/// admin is currently editing.
#[derive(Debug, Clone, Default)]
pub struct ConfigSession {
    cursor: usize,
    selections: HashMap<UserId, ImagePath>,
}

impl ConfigSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current cursor position, then advance it
    pub fn advance(&mut self) -> usize {
        let at = self.cursor;
        self.cursor = self.cursor.wrapping_add(1);
        at
    }

    pub fn select(&mut self, user: UserId, path: ImagePath) {
        self.selections.insert(user, path);
    }

    pub fn selection(&self, user: UserId) -> Option<&ImagePath> {
        self.selections.get(&user)
    }
}
