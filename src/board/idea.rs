//! Idea records and the line splitter that produces them

use serde::{Deserialize, Serialize};
use std::fmt;

/// One suggested idea on the board
///
/// `text` is a single trimmed line of model output and is never parsed
/// further, even when it reads as "Title: description".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Idea {
    /// Display text, immutable after creation
    pub text: String,
    /// Set once the user discards the idea; the record itself is kept
    pub removed: bool,
    /// Set once the user marks the idea as favored
    pub liked: bool,
    /// Free-text annotation; no command sets it yet
    pub memo: String,
}

impl Idea {
    /// Creates an unflagged idea with an empty memo
    ///
    /// # Examples
    ///
    /// ```
    /// use ideaboard::board::Idea;
    ///
    /// let idea = Idea::new("Pet taxi: rides for pets to the vet");
    /// assert!(!idea.removed);
    /// assert!(!idea.liked);
    /// assert!(idea.memo.is_empty());
    /// ```
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            removed: false,
            liked: false,
            memo: String::new(),
        }
    }
}

/// Storage position of an idea within a board
///
/// Ideas are never deleted, so an id stays valid until the board is reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IdeaId(pub usize);

impl fmt::Display for IdeaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Splits raw model output into idea records
///
/// Each line is trimmed and blank lines are dropped. Every surviving line
/// becomes exactly one unflagged [`Idea`].
///
/// # Examples
///
/// ```
/// use ideaboard::board::split_ideas;
///
/// let ideas = split_ideas("A\n\nB  \n");
/// assert_eq!(ideas.len(), 2);
/// assert_eq!(ideas[0].text, "A");
/// assert_eq!(ideas[1].text, "B");
/// ```
pub fn split_ideas(raw: &str) -> Vec<Idea> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(Idea::new)
        .collect()
}

/// Partitions ideas into (kept, removed), preserving relative order in each
pub fn partition(ideas: &[Idea]) -> (Vec<Idea>, Vec<Idea>) {
    ideas.iter().cloned().partition(|idea| !idea.removed)
}
