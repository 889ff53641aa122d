use std::fmt;
use uuid::Uuid;

/// Identity of an entry inside a running store. Not persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryId(Uuid);

impl EntryId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub id: EntryId,
    pub title: String,
    pub content: String,
}

impl Entry {
    pub fn new(title: impl Into<String>) -> Self {
        Self::with_content(title, String::new())
    }

    pub fn with_content(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: EntryId::new(),
            title: title.into(),
            content: content.into(),
        }
    }

    /// First line of the content, for single-row previews.
    pub fn preview(&self) -> &str {
        self.content.lines().next().unwrap_or("")
    }

    pub fn is_multiline(&self) -> bool {
        self.content.contains('\n')
    }
}

/// Titles made only of whitespace are treated as empty.
pub fn is_valid_title(title: &str) -> bool {
    !title.trim().is_empty()
}
