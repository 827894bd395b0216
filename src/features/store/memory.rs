//! In-process store; contents are lost on restart

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{Day, ReminderStore, ReminderTime, Roster, StoreError};

#[derive(Debug, Default)]
struct MemoryState {
    time: ReminderTime,
    roster: Roster,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

impl MemoryStore {
    /// 08:00 reminder and an unassigned roster
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(time: ReminderTime, roster: Roster) -> Self {
        Self {
            state: RwLock::new(MemoryState { time, roster }),
        }
    }
}

#[async_trait]
impl ReminderStore for MemoryStore {
    async fn get_time(&self) -> Result<ReminderTime, StoreError> {
        Ok(self.state.read().await.time)
    }

    async fn set_time(&self, time: ReminderTime) -> Result<(), StoreError> {
        self.state.write().await.time = time;
        Ok(())
    }

    async fn get_roster(&self) -> Result<Roster, StoreError> {
        Ok(self.state.read().await.roster.clone())
    }

    async fn set_roster(&self, day: Day, name: &str) -> Result<(), StoreError> {
        self.state.write().await.roster.set(day, name);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_defaults() {
        let store = MemoryStore::new();
        assert_eq!(store.get_time().await.unwrap(), ReminderTime::DEFAULT);
        assert_eq!(store.get_roster().await.unwrap(), Roster::new());
    }

    #[tokio::test]
    async fn test_writes_are_visible() {
        let store = MemoryStore::new();
        let time = ReminderTime::new(18, 30).unwrap();
        store.set_time(time).await.unwrap();
        store.set_roster(Day::Saturday, "Priya").await.unwrap();

        assert_eq!(store.get_time().await.unwrap(), time);
        let roster = store.get_roster().await.unwrap();
        assert_eq!(roster.get(Day::Saturday), "Priya");
        assert_eq!(roster.get(Day::Sunday), super::super::UNASSIGNED);
    }
}
