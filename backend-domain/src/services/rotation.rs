use std::collections::{HashMap, VecDeque};

use crate::entities::GameEvent;

/// Old-style rotation group labels.
pub const GUERRILLA_GROUPS: [&str; 5] = ["A", "B", "C", "D", "E"];
/// New-style rotation group labels.
pub const STARTER_GROUPS: [&str; 3] = ["RED", "BLUE", "GREEN"];

/// One rendered rotation slot: a display name plus one cell per group label,
/// in label order.
#[derive(Debug, Clone, PartialEq)]
pub struct RotationRow<'a> {
    pub name: String,
    pub cells: Vec<Option<&'a GameEvent>>,
}

/// Reassembles events sharing a display name into parallel per-group rows.
///
/// Names keep their first-appearance order. Within a name, events are
/// consumed earliest-open-first per group label; rows are emitted until
/// every label bucket for that name is empty, so uneven counts per group
/// leave trailing empty cells rather than dropping events.
pub fn rotation_rows<'a>(events: &[&'a GameEvent], labels: &[&str]) -> Vec<RotationRow<'a>> {
    let mut order: Vec<&str> = Vec::new();
    let mut by_name: HashMap<&str, Vec<&'a GameEvent>> = HashMap::new();
    for &event in events {
        let name = event.name_and_modifier.as_str();
        if !by_name.contains_key(name) {
            order.push(name);
        }
        by_name.entry(name).or_default().push(event);
    }

    let mut rows = Vec::new();
    for name in order {
        let mut bucket = by_name.remove(name).unwrap_or_default();
        bucket.sort_by_key(|e| e.open_time);

        let mut by_group: HashMap<&str, VecDeque<&'a GameEvent>> = HashMap::new();
        for event in bucket {
            by_group.entry(event.group.as_str()).or_default().push_back(event);
        }

        loop {
            let mut cells = Vec::with_capacity(labels.len());
            let mut filled = false;
            for label in labels {
                let cell = by_group.get_mut(*label).and_then(|queue| queue.pop_front());
                filled |= cell.is_some();
                cells.push(cell);
            }
            if !filled {
                break;
            }
            rows.push(RotationRow {
                name: name.to_string(),
                cells,
            });
        }
    }
    rows
}
