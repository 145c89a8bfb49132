//! Session state machine
//!
//! A session is either waiting for a topic or showing a board of ideas for
//! one. Every transition consumes the current state and hands back the next
//! one; nothing is held in ambient storage, so tests drive transitions
//! directly.
//!
//! ```text
//! TopicEntry --set_topic--> Board --generate_more/remove/like--> Board
//!     ^                       |
//!     +--------reset----------+
//! ```

use crate::board::gateway::{Gateway, GenerationOutcome};
use crate::board::idea::{partition, split_ideas, Idea, IdeaId};
use crate::prompts::build_prompt;
use std::fmt;
use thiserror::Error;

/// A non-blank brainstorming topic
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic(String);

impl Topic {
    /// Builds a topic from user input, trimming surrounding whitespace
    ///
    /// # Errors
    ///
    /// Returns `SessionError::EmptyTopic` if the input is blank
    ///
    /// # Examples
    ///
    /// ```
    /// use ideaboard::board::Topic;
    ///
    /// assert_eq!(Topic::new("  space travel ").unwrap().as_str(), "space travel");
    /// assert!(Topic::new("   ").is_err());
    /// ```
    pub fn new(input: &str) -> Result<Self, SessionError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(SessionError::EmptyTopic);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Topic text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Invalid transition requests
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Topic input was blank
    #[error("Topic cannot be empty")]
    EmptyTopic,

    /// A topic is already set; reset first
    #[error("A topic is already set; use /reset to start over")]
    TopicAlreadySet,

    /// The action needs a board but no topic is set yet
    #[error("No topic set yet; enter a topic first")]
    NoTopic,

    /// Visible position outside 1..=visible
    #[error("No idea at position {position} (board shows {visible} ideas)")]
    InvalidPosition {
        /// Requested 1-based position
        position: usize,
        /// Number of visible ideas
        visible: usize,
    },
}

/// A refused transition, handing the unchanged state back to the caller
#[derive(Error, Debug)]
#[error("{error}")]
pub struct Rejected {
    /// The state as it was before the request
    pub state: SessionState,
    /// Why the transition was refused
    pub error: SessionError,
}

/// What a generating transition reports to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationNotice {
    /// This many ideas were appended to the board
    Added(usize),
    /// The model call failed; no ideas were added
    Failed(String),
}

/// The next state plus an optional notice for the UI
#[derive(Debug)]
pub struct Transition {
    /// State after the transition
    pub state: SessionState,
    /// Set by transitions that call the model
    pub notice: Option<GenerationNotice>,
}

impl Transition {
    fn quiet(state: SessionState) -> Self {
        Self {
            state,
            notice: None,
        }
    }
}

/// Outcome of a transition request
pub type TransitionResult = std::result::Result<Transition, Rejected>;

/// Brainstorming session state
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Waiting for the user to enter a topic
    #[default]
    TopicEntry,
    /// Showing ideas for a topic
    Board {
        /// The session topic
        topic: Topic,
        /// Every generated idea in generation order, removed ones included
        ideas: Vec<Idea>,
    },
}

impl SessionState {
    /// Fresh session waiting for a topic
    pub fn new() -> Self {
        Self::TopicEntry
    }

    /// Current topic, if a board is open
    pub fn topic(&self) -> Option<&Topic> {
        match self {
            Self::TopicEntry => None,
            Self::Board { topic, .. } => Some(topic),
        }
    }

    /// All stored ideas in generation order
    pub fn ideas(&self) -> &[Idea] {
        match self {
            Self::TopicEntry => &[],
            Self::Board { ideas, .. } => ideas,
        }
    }

    /// Whether a board is open
    pub fn is_board(&self) -> bool {
        matches!(self, Self::Board { .. })
    }

    /// Non-removed ideas as `(position, id, idea)`, positions starting at 1
    ///
    /// Positions are computed from the live list on every call, so they
    /// shift as soon as an idea is removed.
    pub fn visible(&self) -> impl Iterator<Item = (usize, IdeaId, &Idea)> {
        self.ideas()
            .iter()
            .enumerate()
            .filter(|(_, idea)| !idea.removed)
            .enumerate()
            .map(|(pos, (index, idea))| (pos + 1, IdeaId(index), idea))
    }

    /// Number of visible ideas
    pub fn visible_count(&self) -> usize {
        self.ideas().iter().filter(|idea| !idea.removed).count()
    }

    /// Removed ideas in generation order
    pub fn removed(&self) -> impl Iterator<Item = &Idea> {
        self.ideas().iter().filter(|idea| idea.removed)
    }

    /// Liked ideas in generation order
    pub fn liked(&self) -> impl Iterator<Item = &Idea> {
        self.ideas().iter().filter(|idea| idea.liked)
    }

    /// Maps a visible position to the stored idea it shows
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoTopic` before a topic is set and
    /// `SessionError::InvalidPosition` for positions outside the board
    pub fn resolve(&self, position: usize) -> Result<IdeaId, SessionError> {
        if !self.is_board() {
            return Err(SessionError::NoTopic);
        }
        self.visible()
            .find(|(pos, _, _)| *pos == position)
            .map(|(_, id, _)| id)
            .ok_or(SessionError::InvalidPosition {
                position,
                visible: self.visible_count(),
            })
    }

    /// Sets the topic and seeds the board with a first round of ideas
    ///
    /// Input is trimmed first; whitespace-only input counts as empty and is
    /// refused with [`SessionError::EmptyTopic`] without calling the model.
    /// The board opens even when generation fails; it then holds no ideas
    /// and the notice carries the failure message.
    pub async fn set_topic(self, gateway: &Gateway, input: &str) -> TransitionResult {
        if self.is_board() {
            return Err(self.reject(SessionError::TopicAlreadySet));
        }
        let topic = match Topic::new(input) {
            Ok(topic) => topic,
            Err(error) => return Err(self.reject(error)),
        };

        tracing::info!(topic = %topic, "Topic set");
        let prompt = build_prompt(topic.as_str(), &[], &[]);
        let outcome = gateway.generate(&prompt).await;
        let (ideas, notice) = absorb(Vec::new(), outcome);

        Ok(Transition {
            state: Self::Board { topic, ideas },
            notice: Some(notice),
        })
    }

    /// Asks for more ideas conditioned on what was kept and removed
    ///
    /// New ideas are appended after the existing ones. Nothing is reordered
    /// or de-duplicated.
    pub async fn generate_more(self, gateway: &Gateway) -> TransitionResult {
        let (topic, ideas) = match self {
            Self::Board { topic, ideas } => (topic, ideas),
            Self::TopicEntry => return Err(Self::TopicEntry.reject(SessionError::NoTopic)),
        };

        let (kept, removed) = partition(&ideas);
        tracing::info!(
            kept = kept.len(),
            removed = removed.len(),
            "Generating more ideas"
        );
        let prompt = build_prompt(topic.as_str(), &kept, &removed);
        let outcome = gateway.generate(&prompt).await;
        let (ideas, notice) = absorb(ideas, outcome);

        Ok(Transition {
            state: Self::Board { topic, ideas },
            notice: Some(notice),
        })
    }

    /// Flags the idea shown at `position` as removed
    pub fn remove(self, position: usize) -> TransitionResult {
        self.flag(position, |idea| idea.removed = true)
    }

    /// Flags the idea shown at `position` as liked
    pub fn like(self, position: usize) -> TransitionResult {
        self.flag(position, |idea| idea.liked = true)
    }

    /// Drops the topic and every idea, returning to topic entry
    pub fn reset(self) -> Self {
        if let Self::Board { ideas, .. } = &self {
            tracing::info!(discarded = ideas.len(), "Session reset");
        }
        Self::TopicEntry
    }

    fn flag(self, position: usize, apply: impl FnOnce(&mut Idea)) -> TransitionResult {
        let id = match self.resolve(position) {
            Ok(id) => id,
            Err(error) => return Err(self.reject(error)),
        };

        let mut state = self;
        if let Self::Board { ideas, .. } = &mut state {
            apply(&mut ideas[id.0]);
            tracing::debug!(position, id = %id, "Idea flagged");
        }
        Ok(Transition::quiet(state))
    }

    fn reject(self, error: SessionError) -> Rejected {
        Rejected { state: self, error }
    }
}

fn absorb(mut ideas: Vec<Idea>, outcome: GenerationOutcome) -> (Vec<Idea>, GenerationNotice) {
    match outcome {
        GenerationOutcome::Success(text) => {
            let fresh = split_ideas(&text);
            let added = fresh.len();
            ideas.extend(fresh);
            (ideas, GenerationNotice::Added(added))
        }
        GenerationOutcome::Failure(message) => (ideas, GenerationNotice::Failed(message)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::ScriptedProvider;

    fn board(texts: &[&str]) -> SessionState {
        SessionState::Board {
            topic: Topic::new("space travel").unwrap(),
            ideas: texts.iter().map(|t| Idea::new(*t)).collect(),
        }
    }

    fn visible_texts(state: &SessionState) -> Vec<String> {
        state.visible().map(|(_, _, i)| i.text.clone()).collect()
    }

    #[test]
    fn test_initial_state_is_topic_entry() {
        let state = SessionState::new();
        assert_eq!(state, SessionState::TopicEntry);
        assert!(state.topic().is_none());
        assert!(state.ideas().is_empty());
    }

    #[tokio::test]
    async fn test_set_topic_seeds_board_from_first_prompt() {
        let provider = ScriptedProvider::new().with_response("Idea 1\n\nIdea 2\n");
        let gateway = Gateway::new(Box::new(provider.clone()));

        let transition = SessionState::new()
            .set_topic(&gateway, "space travel")
            .await
            .unwrap();

        assert_eq!(transition.notice, Some(GenerationNotice::Added(2)));
        assert_eq!(transition.state.topic().unwrap().as_str(), "space travel");
        assert_eq!(visible_texts(&transition.state), vec!["Idea 1", "Idea 2"]);
        assert_eq!(
            provider.prompts(),
            vec![build_prompt("space travel", &[], &[])]
        );
    }

    #[tokio::test]
    async fn test_set_topic_failure_still_opens_empty_board() {
        let provider = ScriptedProvider::new().with_failure("invalid api key");
        let gateway = Gateway::new(Box::new(provider.clone()));

        let transition = SessionState::new()
            .set_topic(&gateway, "space travel")
            .await
            .unwrap();

        assert!(transition.state.is_board());
        assert!(transition.state.ideas().is_empty());
        match transition.notice {
            Some(GenerationNotice::Failed(message)) => assert!(message.contains("invalid api key")),
            other => panic!("expected failure notice, got {:?}", other),
        }
        assert_eq!(provider.prompts().len(), 1);
    }

    #[tokio::test]
    async fn test_set_topic_rejects_blank_topic_without_calling_model() {
        let provider = ScriptedProvider::new();
        let gateway = Gateway::new(Box::new(provider.clone()));

        let rejected = SessionState::new()
            .set_topic(&gateway, "   ")
            .await
            .unwrap_err();

        assert_eq!(rejected.error, SessionError::EmptyTopic);
        assert_eq!(rejected.state, SessionState::TopicEntry);
        assert!(provider.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_set_topic_twice_is_rejected() {
        let gateway = Gateway::new(Box::new(ScriptedProvider::new()));
        let state = board(&["X"]);

        let rejected = state.clone().set_topic(&gateway, "other").await.unwrap_err();

        assert_eq!(rejected.error, SessionError::TopicAlreadySet);
        assert_eq!(rejected.state, state);
    }

    #[tokio::test]
    async fn test_generate_more_conditions_on_kept_and_removed() {
        let provider = ScriptedProvider::new().with_response("New 1\nNew 2");
        let gateway = Gateway::new(Box::new(provider.clone()));
        let state = board(&["A", "B", "C"]).remove(2).unwrap().state;

        let transition = state.generate_more(&gateway).await.unwrap();

        let expected = build_prompt(
            "space travel",
            &[Idea::new("A"), Idea::new("C")],
            &[Idea {
                removed: true,
                ..Idea::new("B")
            }],
        );
        assert_eq!(provider.prompts(), vec![expected]);
        assert_eq!(transition.notice, Some(GenerationNotice::Added(2)));

        let texts: Vec<&str> = transition
            .state
            .ideas()
            .iter()
            .map(|i| i.text.as_str())
            .collect();
        assert_eq!(texts, vec!["A", "B", "C", "New 1", "New 2"]);
        assert_eq!(visible_texts(&transition.state), vec!["A", "C", "New 1", "New 2"]);
    }

    #[tokio::test]
    async fn test_generate_more_keeps_duplicates() {
        let provider = ScriptedProvider::new().with_response("A");
        let gateway = Gateway::new(Box::new(provider));

        let transition = board(&["A"]).generate_more(&gateway).await.unwrap();

        assert_eq!(visible_texts(&transition.state), vec!["A", "A"]);
    }

    #[tokio::test]
    async fn test_generate_more_failure_leaves_ideas_unchanged() {
        let provider = ScriptedProvider::new().with_failure("timeout");
        let gateway = Gateway::new(Box::new(provider));
        let state = board(&["A", "B"]);

        let transition = state.clone().generate_more(&gateway).await.unwrap();

        assert_eq!(transition.state, state);
        assert!(matches!(
            transition.notice,
            Some(GenerationNotice::Failed(_))
        ));
    }

    #[tokio::test]
    async fn test_generate_more_requires_topic() {
        let gateway = Gateway::new(Box::new(ScriptedProvider::new()));
        let rejected = SessionState::new()
            .generate_more(&gateway)
            .await
            .unwrap_err();
        assert_eq!(rejected.error, SessionError::NoTopic);
        assert_eq!(rejected.state, SessionState::TopicEntry);
    }

    #[test]
    fn test_remove_first_visible_flags_underlying_record() {
        let mut state = board(&["X", "Y", "Z"]);
        if let SessionState::Board { ideas, .. } = &mut state {
            ideas[2].liked = true;
        }

        let state = state.remove(1).unwrap().state;

        assert!(state.ideas()[0].removed);
        assert_eq!(visible_texts(&state), vec!["Y", "Z"]);
        assert!(!state.ideas()[1].liked);
        assert!(state.ideas()[2].liked);
        assert_eq!(state.ideas().len(), 3);
    }

    #[test]
    fn test_visible_positions_shift_after_removal() {
        let state = board(&["A", "B", "C", "D"]).remove(2).unwrap().state;
        // Visible is now [A, C, D]; position 2 must map to C, not B
        let state = state.remove(2).unwrap().state;

        let removed: Vec<&str> = state.removed().map(|i| i.text.as_str()).collect();
        assert_eq!(removed, vec!["B", "C"]);
        assert_eq!(visible_texts(&state), vec!["A", "D"]);
        assert_eq!(state.resolve(2).unwrap(), IdeaId(3));
    }

    #[test]
    fn test_like_marks_without_changing_visibility_or_order() {
        let state = board(&["A", "B", "C"]).remove(1).unwrap().state;

        let state = state.like(2).unwrap().state;

        assert!(state.ideas()[2].liked);
        assert!(!state.ideas()[1].liked);
        assert_eq!(visible_texts(&state), vec!["B", "C"]);
        let liked: Vec<&str> = state.liked().map(|i| i.text.as_str()).collect();
        assert_eq!(liked, vec!["C"]);
    }

    #[test]
    fn test_invalid_position_is_rejected_with_state_intact() {
        let state = board(&["A", "B"]);

        for position in [0, 3] {
            let rejected = state.clone().remove(position).unwrap_err();
            assert_eq!(
                rejected.error,
                SessionError::InvalidPosition {
                    position,
                    visible: 2
                }
            );
            assert_eq!(rejected.state, state);
        }
    }

    #[test]
    fn test_like_without_topic_is_rejected() {
        let rejected = SessionState::new().like(1).unwrap_err();
        assert_eq!(rejected.error, SessionError::NoTopic);
    }

    #[tokio::test]
    async fn test_reset_returns_to_fresh_start() {
        let state = board(&["1", "2", "3", "4", "5"]);
        assert_eq!(state.ideas().len(), 5);

        let state = state.reset();
        assert_eq!(state, SessionState::TopicEntry);
        assert!(state.topic().is_none());
        assert!(state.ideas().is_empty());

        // The following set_topic behaves exactly like a fresh process
        let provider = ScriptedProvider::new().with_response("Fresh");
        let gateway = Gateway::new(Box::new(provider.clone()));
        let transition = state.set_topic(&gateway, "oceans").await.unwrap();
        assert_eq!(provider.prompts(), vec![build_prompt("oceans", &[], &[])]);
        assert_eq!(visible_texts(&transition.state), vec!["Fresh"]);
    }

    #[test]
    fn test_rejected_displays_inner_error() {
        let rejected = SessionState::new().remove(1).unwrap_err();
        assert_eq!(rejected.to_string(), "No topic set yet; enter a topic first");
    }
}
