use std::path::Path;

use async_trait::async_trait;
use tokio::fs;

use backend_domain::{SubscriptionBook, SubscriptionRepository};

pub struct SubscriptionFileRepository;

impl SubscriptionFileRepository {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SubscriptionFileRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SubscriptionRepository for SubscriptionFileRepository {
    async fn load(&self, path: &str) -> anyhow::Result<SubscriptionBook> {
        if !Path::new(path).exists() {
            return Ok(SubscriptionBook::default());
        }
        let content = fs::read_to_string(path).await?;
        let book: SubscriptionBook = serde_json::from_str(&content)?;
        Ok(book)
    }

    async fn save(&self, path: &str, book: &SubscriptionBook) -> anyhow::Result<()> {
        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }
        let content = serde_json::to_string(book)?;
        fs::write(path, content).await?;
        Ok(())
    }
}

/// Loads the display-name denylist (lowercase fragments) from YAML. A
/// missing file is an empty list, not an error.
pub async fn load_excluded_names(path: &str) -> anyhow::Result<Vec<String>> {
    if !Path::new(path).exists() {
        return Ok(Vec::new());
    }
    let content = fs::read_to_string(path).await?;
    let names: Vec<String> = serde_yaml::from_str(&content)?;
    Ok(names
        .into_iter()
        .map(|name| name.trim().to_lowercase())
        .filter(|name| !name.is_empty())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use backend_domain::{GameServer, SubscriptionEntry};

    #[tokio::test]
    async fn book_round_trips_through_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("subscriptions.json");
        let path = path.to_str().unwrap();

        let mut book = SubscriptionBook::default();
        book.add_rotation(SubscriptionEntry {
            destination_id: "chan-1".to_string(),
            server: GameServer::Na,
        });
        book.add_daily(SubscriptionEntry {
            destination_id: "chan-2".to_string(),
            server: GameServer::Jp,
        });

        let repo = SubscriptionFileRepository::new();
        repo.save(path, &book).await.unwrap();
        let loaded = repo.load(path).await.unwrap();
        assert_eq!(loaded.rotation, book.rotation);
        assert_eq!(loaded.daily, book.daily);
    }

    #[tokio::test]
    async fn missing_file_loads_an_empty_book() {
        let repo = SubscriptionFileRepository::new();
        let book = repo.load("/nonexistent/subscriptions.json").await.unwrap();
        assert!(book.rotation.is_empty());
        assert!(book.daily.is_empty());
    }

    #[tokio::test]
    async fn save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/dir/subscriptions.json");
        let repo = SubscriptionFileRepository::new();
        repo.save(path.to_str().unwrap(), &SubscriptionBook::default())
            .await
            .unwrap();
        assert!(path.exists());
    }

    #[tokio::test]
    async fn excluded_names_lowercase_and_drop_blanks() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("excluded_names.yaml");
        fs::write(&path, "- Castle of Satan\n- '  '\n- TAMADRA\n")
            .await
            .unwrap();
        let names = load_excluded_names(path.to_str().unwrap()).await.unwrap();
        assert_eq!(names, vec!["castle of satan".to_string(), "tamadra".to_string()]);
    }

    #[tokio::test]
    async fn missing_denylist_is_empty() {
        let names = load_excluded_names("/nonexistent/excluded.yaml").await.unwrap();
        assert!(names.is_empty());
    }
}
