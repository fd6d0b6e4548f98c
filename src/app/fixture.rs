//! Backing list for the demo: a JSON fixture file or a generated sample.

use crate::app::{
    config::UserConfig,
    error::{context, Result},
};
use convlist::list::{
    ConversationId, ConversationRecord, Fixture, MemorySource, MessageId, MessageRecord,
};
use eyre::WrapErr;
use std::path::Path;

const SAMPLE_NAMES: [&str; 12] = [
    "Ada Lovelace",
    "Alan Turing",
    "Barbara Liskov",
    "Dennis Ritchie",
    "Edsger Dijkstra",
    "Frances Allen",
    "Grace Hopper",
    "John McCarthy",
    "Ken Thompson",
    "Leslie Lamport",
    "Margaret Hamilton",
    "Niklaus Wirth",
];

const SAMPLE_LINES: [&str; 5] = [
    "Did you see the review comments?",
    "I pushed a fix, it should be green now.",
    "Lunch at noon?",
    "Here is the longer version of what I meant earlier: the scheduler keeps the ready queue sorted, so inserting is the expensive part, not picking the next task.",
    "Thanks!",
];

pub fn load_source(config: &UserConfig) -> Result<MemorySource> {
    match &config.fixture_path {
        Some(path) => load_fixture(path),
        None => Ok(sample_source()),
    }
}

pub fn load_fixture(path: &Path) -> Result<MemorySource> {
    let text = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("Failed to read fixture {}", path.display()))?;
    let source = MemorySource::from_json(&text)
        .map_err(|e| context::fixture(format!("Invalid fixture {}: {}", path.display(), e)))?;

    tracing::info!(
        "Loaded {} list entries from fixture {}",
        source.len(),
        path.display()
    );
    Ok(source)
}

/// Generated list with an inbox entry and a few dozen conversations.
pub fn sample_source() -> MemorySource {
    let conversations = (0..36)
        .map(|i| {
            let name = SAMPLE_NAMES[i % SAMPLE_NAMES.len()];
            let round = i / SAMPLE_NAMES.len();
            let title = if round == 0 {
                name.to_string()
            } else {
                format!("{} ({})", name, round + 1)
            };
            let messages = (0..4 + (i * 7) % 17)
                .map(|m| MessageRecord {
                    id: MessageId::new(format!("c{}-m{}", i, m)),
                    text: SAMPLE_LINES[(i + m) % SAMPLE_LINES.len()].to_string(),
                })
                .collect();

            ConversationRecord {
                id: ConversationId::new(format!("c{}", i)),
                title,
                messages,
            }
        })
        .collect();

    MemorySource::new(Fixture {
        connection_requests: true,
        conversations,
    })
}
