//! Deterministic prompt serialization from structured turns.
//!
//! ```rust
//! use pchat::{Turn, assemble};
//!
//! let turns = vec![Turn::system("Be concise.")];
//! let prompt = assemble(&turns, "Hello");
//!
//! assert_eq!(prompt, "System: Be concise.\nUser: Hello\nAssistant:");
//! ```

use crate::{Role, Turn};

/// Flattens a session snapshot plus the pending user message into one prompt
/// string. Pure and infallible: identical input always yields the identical
/// string, the input sequence is never mutated, and empty contents are
/// serialized as bare role labels. The trailing `Assistant:` line is the
/// continuation cue for the generator.
pub fn assemble(turns: &[Turn], pending_user_message: &str) -> String {
    let mut lines = Vec::with_capacity(turns.len() + 2);

    for turn in turns {
        lines.push(render(turn.role, &turn.content));
    }

    lines.push(render(Role::User, pending_user_message));
    lines.push("Assistant:".to_string());

    lines.join("\n")
}

fn render(role: Role, content: &str) -> String {
    match role {
        Role::System => format!("System: {content}"),
        Role::User => format!("User: {content}"),
        // anything that is neither system nor user speaks as the assistant
        _ => format!("Assistant: {content}"),
    }
}
