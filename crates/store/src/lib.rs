//! JSON-file persistence adapter.
//!
//! Implements the [`quiz::QuestionStore`] trait over a single JSON document
//! on disk. The document is loaded once when the store is opened and
//! rewritten in full after every mutation; list operations serve owned
//! snapshots from memory, sorted newest-first.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** File layout and encoding live here. The [`quiz`] crate
//! sees only [`quiz::QuestionStore`]; the pipeline never touches this state.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::debug;

use quiz::{QuestionId, QuestionRecord, QuestionStore, Quiz, QuizId, StoreError};

/// The on-disk document: every saved quiz and standalone question.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreDocument {
    quizzes: Vec<Quiz>,
    questions: Vec<QuestionRecord>,
}

/// A [`QuestionStore`] backed by one JSON file.
///
/// Concurrent readers share the in-memory document; mutations take the write
/// lock, apply the change, and rewrite the file before returning, so the file
/// never lags behind an acknowledged mutation.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    document: RwLock<StoreDocument>,
}

impl JsonFileStore {
    /// Opens the store at `path`, creating an empty one if the file does not
    /// exist yet.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_owned();
        let document = if path.exists() {
            let data = tokio::fs::read_to_string(&path)
                .await
                .map_err(|err| StoreError::Io {
                    message: format!("failed to read {}: {err}", path.display()),
                })?;
            serde_json::from_str(&data).map_err(|err| StoreError::Corrupt {
                message: format!("{} is not a store document: {err}", path.display()),
            })?
        } else {
            StoreDocument::default()
        };

        Ok(Self {
            path,
            document: RwLock::new(document),
        })
    }

    /// Rewrites the backing file from the given document state.
    async fn persist(&self, document: &StoreDocument) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|err| StoreError::Io {
                    message: format!("failed to create {}: {err}", parent.display()),
                })?;
        }

        let data = serde_json::to_string_pretty(document).map_err(|err| StoreError::Io {
            message: format!("failed to encode store document: {err}"),
        })?;
        tokio::fs::write(&self.path, data)
            .await
            .map_err(|err| StoreError::Io {
                message: format!("failed to write {}: {err}", self.path.display()),
            })?;

        debug!(path = %self.path.display(), "store document rewritten");
        Ok(())
    }
}

/// Sorts a snapshot newest-first by creation time.
fn newest_first<T>(mut items: Vec<T>, created_at: impl Fn(&T) -> quiz::Timestamp) -> Vec<T> {
    items.sort_by_key(|item| std::cmp::Reverse(created_at(item)));
    items
}

#[async_trait]
impl QuestionStore for JsonFileStore {
    async fn save_quiz(&self, quiz: Quiz) -> Result<(), StoreError> {
        let mut document = self.document.write().await;
        document.quizzes.push(quiz);
        self.persist(&document).await
    }

    async fn list_quizzes(&self) -> Result<Vec<Quiz>, StoreError> {
        let document = self.document.read().await;
        Ok(newest_first(document.quizzes.clone(), |q| q.created_at))
    }

    async fn save_question(&self, question: QuestionRecord) -> Result<(), StoreError> {
        let mut document = self.document.write().await;
        document.questions.push(question);
        self.persist(&document).await
    }

    async fn list_questions(&self) -> Result<Vec<QuestionRecord>, StoreError> {
        let document = self.document.read().await;
        Ok(newest_first(document.questions.clone(), |q| q.created_at))
    }

    async fn delete_quiz(&self, id: QuizId) -> Result<bool, StoreError> {
        let mut document = self.document.write().await;
        let before = document.quizzes.len();
        document.quizzes.retain(|quiz| quiz.id != id);
        let removed = document.quizzes.len() != before;
        if removed {
            self.persist(&document).await?;
        }
        Ok(removed)
    }

    async fn delete_question(&self, id: QuestionId) -> Result<bool, StoreError> {
        let mut document = self.document.write().await;
        let before = document.questions.len();
        document.questions.retain(|question| question.id != id);
        let removed = document.questions.len() != before;
        if removed {
            self.persist(&document).await?;
        }
        Ok(removed)
    }

    async fn delete_all(&self) -> Result<(), StoreError> {
        let mut document = self.document.write().await;
        document.quizzes.clear();
        document.questions.clear();
        self.persist(&document).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz::Timestamp;

    fn scratch_path() -> PathBuf {
        std::env::temp_dir()
            .join("quizgen-store-tests")
            .join(format!("{}.json", uuid::Uuid::new_v4()))
    }

    fn record(text: &str, created_at: Timestamp) -> QuestionRecord {
        QuestionRecord {
            id: QuestionId::new_random(),
            prompt_text: text.to_owned(),
            options: vec!["A) True".into(), "B) False".into()],
            correct_option: "A) True".into(),
            created_at,
        }
    }

    #[tokio::test]
    async fn open_on_missing_file_starts_empty() {
        let store = JsonFileStore::open(scratch_path()).await.unwrap();
        assert!(store.list_quizzes().await.unwrap().is_empty());
        assert!(store.list_questions().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn saved_quizzes_survive_reopen() {
        let path = scratch_path();

        let store = JsonFileStore::open(&path).await.unwrap();
        let quiz = Quiz::new("Topic", vec![record("Q", Timestamp::now())]);
        let id = quiz.id;
        store.save_quiz(quiz).await.unwrap();
        drop(store);

        let reopened = JsonFileStore::open(&path).await.unwrap();
        let quizzes = reopened.list_quizzes().await.unwrap();
        assert_eq!(quizzes.len(), 1);
        assert_eq!(quizzes[0].id, id);
        assert_eq!(quizzes[0].topic, "Topic");
    }

    #[tokio::test]
    async fn lists_are_sorted_newest_first() {
        let store = JsonFileStore::open(scratch_path()).await.unwrap();

        let old = Timestamp::from_utc(chrono_past(60));
        let new = Timestamp::from_utc(chrono_past(0));
        store.save_question(record("old", old)).await.unwrap();
        store.save_question(record("new", new)).await.unwrap();

        let questions = store.list_questions().await.unwrap();
        assert_eq!(questions[0].prompt_text, "new");
        assert_eq!(questions[1].prompt_text, "old");
    }

    #[tokio::test]
    async fn delete_by_id_removes_exactly_one() {
        let store = JsonFileStore::open(scratch_path()).await.unwrap();
        let keep = record("keep", Timestamp::now());
        let doomed = record("drop", Timestamp::now());
        let drop_id = doomed.id;
        store.save_question(keep).await.unwrap();
        store.save_question(doomed).await.unwrap();

        assert!(store.delete_question(drop_id).await.unwrap());
        assert!(!store.delete_question(drop_id).await.unwrap());

        let remaining = store.list_questions().await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].prompt_text, "keep");
    }

    #[tokio::test]
    async fn delete_all_empties_both_collections() {
        let store = JsonFileStore::open(scratch_path()).await.unwrap();
        store
            .save_quiz(Quiz::new("T", vec![record("Q", Timestamp::now())]))
            .await
            .unwrap();
        store
            .save_question(record("standalone", Timestamp::now()))
            .await
            .unwrap();

        store.delete_all().await.unwrap();
        assert!(store.list_quizzes().await.unwrap().is_empty());
        assert!(store.list_questions().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn corrupt_file_is_reported_not_clobbered() {
        let path = scratch_path();
        tokio::fs::create_dir_all(path.parent().unwrap())
            .await
            .unwrap();
        tokio::fs::write(&path, "not a store document").await.unwrap();

        match JsonFileStore::open(&path).await {
            Err(StoreError::Corrupt { .. }) => {}
            other => panic!("expected corrupt-store error, got {other:?}"),
        }
        // The unreadable file is left in place for inspection.
        assert!(path.exists());
    }

    fn chrono_past(seconds: i64) -> chrono::DateTime<chrono::Utc> {
        chrono::Utc::now() - chrono::Duration::seconds(seconds)
    }
}
