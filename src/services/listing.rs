use crate::entities::{Event, File};
use std::collections::HashMap;

/// Equi-join files onto events by event id. Files are indexed first so the
/// join stays O(n + m); events keep their scan order and events without
/// files get an empty list. Files referencing an event id outside `events`
/// are dropped.
pub fn group_files_by_event(events: Vec<Event>, files: Vec<File>) -> Vec<(Event, Vec<File>)> {
    let mut files_by_event: HashMap<String, Vec<File>> = HashMap::new();
    for file in files {
        files_by_event
            .entry(file.event_id.clone())
            .or_default()
            .push(file);
    }

    events
        .into_iter()
        .map(|event| {
            let event_files = files_by_event.remove(&event.event_id).unwrap_or_default();
            (event, event_files)
        })
        .collect()
}
