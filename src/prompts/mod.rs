//! Prompt construction for idea generation
//!
//! Builds the instruction block sent to the model for every generation
//! round. The prompt carries the topic, the ideas the user kept, the ideas
//! the user removed, and a fixed set of directives that steer the next batch
//! away from both.

use crate::board::Idea;

/// Number of ideas requested from the model per generation round
pub const IDEAS_PER_ROUND: usize = 5;

/// Marker rendered in place of an empty idea list
pub const EMPTY_LIST_MARKER: &str = "none";

/// Builds the generation prompt for a topic
///
/// Only the `text` of each idea is interpolated. Both lists are enumerated
/// from 1 in the order given; an empty list renders as [`EMPTY_LIST_MARKER`].
///
/// # Arguments
///
/// * `topic` - The brainstorming topic
/// * `kept` - Ideas the user kept, in board order
/// * `removed` - Ideas the user removed, in board order
///
/// # Examples
///
/// ```
/// use ideaboard::board::Idea;
/// use ideaboard::prompts::build_prompt;
///
/// let kept = vec![Idea::new("Dog cafe: coffee with adoptable dogs")];
/// let prompt = build_prompt("pets", &kept, &[]);
/// assert!(prompt.contains("\"pets\""));
/// assert!(prompt.contains("1. Dog cafe: coffee with adoptable dogs"));
/// ```
pub fn build_prompt(topic: &str, kept: &[Idea], removed: &[Idea]) -> String {
    format!(
        r#"You are a creative brainstorming assistant.

The brainstorming topic chosen by the user is:
- Topic: "{topic}"

Ideas the user has KEPT so far:
{kept}

Ideas the user has REMOVED:
{removed}

When proposing new ideas, follow these guidelines:
- Do not overlap with the topics or functions of the kept ideas.
- Do not resemble the removed ideas in type or purpose.
- Each idea should reflect a different type or a different angle (for example: audience, mechanism, monetization).
- Do not be bound too tightly by feasibility; include creative and experimental ideas as well.
- Propose exactly {count} ideas, each written as a title followed by a short description.
- Keep each description to 1-2 sentences, roughly 50-100 characters.
"#,
        topic = topic,
        kept = enumerate_ideas(kept),
        removed = enumerate_ideas(removed),
        count = IDEAS_PER_ROUND,
    )
}

fn enumerate_ideas(ideas: &[Idea]) -> String {
    if ideas.is_empty() {
        return EMPTY_LIST_MARKER.to_string();
    }

    ideas
        .iter()
        .enumerate()
        .map(|(i, idea)| format!("{}. {}", i + 1, idea.text))
        .collect::<Vec<_>>()
        .join("\n")
}
