use crate::domain::event::EventRecord;
use anyhow::{Context, Result};

const SAMPLE_EVENTS: &str = include_str!("../data/sample_events.json");

/// The hard-coded listing shown on the events page.
pub fn sample_events() -> Result<Vec<EventRecord>> {
    serde_json::from_str(SAMPLE_EVENTS).context("parse bundled sample events")
}
