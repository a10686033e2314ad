// Destination subscription records

use serde::{Deserialize, Serialize};

use crate::value_objects::GameServer;

/// One notification destination registered for a server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionEntry {
    pub destination_id: String,
    pub server: GameServer,
}

/// The two independent subscription classes: rotation-start alerts and
/// daily-summary pushes. A (destination, server) pair appears at most once
/// per class.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubscriptionBook {
    #[serde(default)]
    pub rotation: Vec<SubscriptionEntry>,
    #[serde(default)]
    pub daily: Vec<SubscriptionEntry>,
}

impl SubscriptionBook {
    pub fn add_rotation(&mut self, entry: SubscriptionEntry) -> bool {
        add(&mut self.rotation, entry)
    }

    pub fn remove_rotation(&mut self, destination_id: &str, server: GameServer) -> bool {
        remove(&mut self.rotation, destination_id, server)
    }

    pub fn add_daily(&mut self, entry: SubscriptionEntry) -> bool {
        add(&mut self.daily, entry)
    }

    pub fn remove_daily(&mut self, destination_id: &str, server: GameServer) -> bool {
        remove(&mut self.daily, destination_id, server)
    }

    pub fn rotation_for(&self, server: GameServer) -> impl Iterator<Item = &SubscriptionEntry> {
        self.rotation.iter().filter(move |e| e.server == server)
    }

    pub fn daily_for(&self, server: GameServer) -> impl Iterator<Item = &SubscriptionEntry> {
        self.daily.iter().filter(move |e| e.server == server)
    }
}

fn add(entries: &mut Vec<SubscriptionEntry>, entry: SubscriptionEntry) -> bool {
    if entries.contains(&entry) {
        return false;
    }
    entries.push(entry);
    true
}

fn remove(entries: &mut Vec<SubscriptionEntry>, destination_id: &str, server: GameServer) -> bool {
    let before = entries.len();
    entries.retain(|e| !(e.destination_id == destination_id && e.server == server));
    entries.len() != before
}
