//! Versioned, typed access to the three persisted slots: the auto-saved form,
//! the manual draft and the saved result.
//!
//! Values are written as `{"version", "savedAt", "data"}`. Blobs written before
//! versioning are the bare payload and read back as version 0.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::generation::package::RecruitmentPackage;
use crate::models::form::DraftForm;
use crate::store::{KeyValueStore, StoreError};

pub const SCHEMA_VERSION: u64 = 1;

pub const AUTOSAVE_KEY: &str = "recruitAI_state";
pub const MANUAL_DRAFT_KEY: &str = "recruitAI_manual_draft";
pub const SAVED_RESULT_KEY: &str = "recruitAI_saved_result";

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Envelope<T> {
    version: u64,
    saved_at: DateTime<Utc>,
    data: T,
}

/// A decoded slot. `saved_at` is unknown for legacy blobs without a timestamp.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stored<T> {
    pub version: u64,
    pub saved_at: Option<DateTime<Utc>>,
    pub data: T,
}

fn corrupt(key: &str, reason: impl ToString) -> StoreError {
    StoreError::Corrupt {
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

pub(crate) fn encode<T: Serialize>(
    data: &T,
    saved_at: DateTime<Utc>,
) -> Result<String, StoreError> {
    serde_json::to_string(&Envelope {
        version: SCHEMA_VERSION,
        saved_at,
        data,
    })
    .map_err(|e| StoreError::Unavailable(format!("failed to serialize value: {e}")))
}

pub(crate) fn decode<T: DeserializeOwned>(key: &str, raw: &str) -> Result<Stored<T>, StoreError> {
    let value: Value = serde_json::from_str(raw).map_err(|e| corrupt(key, e))?;

    let is_envelope = value.get("data").is_some();
    match value.get("version").and_then(Value::as_u64) {
        Some(version) if is_envelope => {
            if version > SCHEMA_VERSION {
                return Err(StoreError::UnsupportedVersion {
                    key: key.to_string(),
                    version,
                });
            }
            let envelope: Envelope<T> =
                serde_json::from_value(value).map_err(|e| corrupt(key, e))?;
            Ok(Stored {
                version: envelope.version,
                saved_at: Some(envelope.saved_at),
                data: envelope.data,
            })
        }
        _ => {
            debug!("Reading unversioned value under '{key}'");
            // Manual drafts carried a millisecond `timestamp` before versioning.
            let saved_at = value
                .get("timestamp")
                .and_then(Value::as_i64)
                .and_then(DateTime::from_timestamp_millis);
            let data: T = serde_json::from_value(value).map_err(|e| corrupt(key, e))?;
            Ok(Stored {
                version: 0,
                saved_at,
                data,
            })
        }
    }
}

/// Typed facade over a `KeyValueStore`.
#[derive(Clone)]
pub struct DraftStore {
    inner: Arc<dyn KeyValueStore>,
}

impl DraftStore {
    pub fn new(inner: Arc<dyn KeyValueStore>) -> Self {
        Self { inner }
    }

    async fn save<T: Serialize + Sync>(
        &self,
        key: &str,
        data: &T,
    ) -> Result<DateTime<Utc>, StoreError> {
        let saved_at = Utc::now();
        self.inner.set(key, encode(data, saved_at)?).await?;
        debug!("Saved '{key}'");
        Ok(saved_at)
    }

    async fn clear(&self, key: &str) -> Result<(), StoreError> {
        self.inner.delete(key).await?;
        debug!("Cleared '{key}'");
        Ok(())
    }

    async fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<Stored<T>>, StoreError> {
        let Some(raw) = self.inner.get(key).await? else {
            return Ok(None);
        };
        decode(key, &raw).map(Some)
    }

    pub async fn autosave(&self, form: &DraftForm) -> Result<DateTime<Utc>, StoreError> {
        self.save(AUTOSAVE_KEY, form).await
    }

    /// A corrupt auto-saved form is logged and treated as absent so the
    /// user starts from an empty form instead of an error.
    pub async fn load_autosave(&self) -> Result<Option<Stored<DraftForm>>, StoreError> {
        match self.load(AUTOSAVE_KEY).await {
            Err(e @ StoreError::Corrupt { .. }) => {
                warn!("Ignoring auto-saved form: {e}");
                Ok(None)
            }
            other => other,
        }
    }

    pub async fn save_manual_draft(&self, form: &DraftForm) -> Result<DateTime<Utc>, StoreError> {
        self.save(MANUAL_DRAFT_KEY, form).await
    }

    pub async fn load_manual_draft(&self) -> Result<Option<Stored<DraftForm>>, StoreError> {
        self.load(MANUAL_DRAFT_KEY).await
    }

    pub async fn clear_manual_draft(&self) -> Result<(), StoreError> {
        self.clear(MANUAL_DRAFT_KEY).await
    }

    pub async fn save_result(
        &self,
        package: &RecruitmentPackage,
    ) -> Result<DateTime<Utc>, StoreError> {
        self.save(SAVED_RESULT_KEY, package).await
    }

    /// Saved results are re-validated: a blob that parses but breaks package
    /// invariants is reported as corrupt.
    pub async fn load_result(&self) -> Result<Option<Stored<RecruitmentPackage>>, StoreError> {
        let stored: Option<Stored<RecruitmentPackage>> = self.load(SAVED_RESULT_KEY).await?;
        if let Some(s) = &stored {
            s.data
                .validate()
                .map_err(|e| corrupt(SAVED_RESULT_KEY, e))?;
        }
        Ok(stored)
    }

    pub async fn clear_result(&self) -> Result<(), StoreError> {
        self.clear(SAVED_RESULT_KEY).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::package::tests::sample_package;
    use crate::models::form::ExperienceLevel;
    use crate::store::MemoryStore;

    fn drafts() -> (Arc<MemoryStore>, DraftStore) {
        let memory = Arc::new(MemoryStore::new());
        let store = DraftStore::new(memory.clone());
        (memory, store)
    }

    fn form() -> DraftForm {
        DraftForm {
            raw_notes: "Backend engineer, Go".to_string(),
            experience_level: ExperienceLevel::Senior,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_manual_draft_round_trip_is_versioned() {
        let (memory, drafts) = drafts();
        let saved_at = drafts.save_manual_draft(&form()).await.unwrap();

        let raw = memory.get(MANUAL_DRAFT_KEY).await.unwrap().unwrap();
        let json: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json["version"], SCHEMA_VERSION);
        assert_eq!(json["data"]["rawNotes"], "Backend engineer, Go");

        let stored = drafts.load_manual_draft().await.unwrap().unwrap();
        assert_eq!(stored.version, SCHEMA_VERSION);
        assert_eq!(stored.saved_at, Some(saved_at));
        assert_eq!(stored.data, form());
    }

    #[tokio::test]
    async fn test_missing_slots_read_as_none() {
        let (_, drafts) = drafts();
        assert!(drafts.load_manual_draft().await.unwrap().is_none());
        assert!(drafts.load_result().await.unwrap().is_none());
        assert!(drafts.load_autosave().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_clear_removes_only_its_slot() {
        let (memory, drafts) = drafts();
        drafts.save_manual_draft(&form()).await.unwrap();
        drafts.save_result(&sample_package()).await.unwrap();

        drafts.clear_manual_draft().await.unwrap();
        assert!(drafts.load_manual_draft().await.unwrap().is_none());
        assert!(memory.get(MANUAL_DRAFT_KEY).await.unwrap().is_none());
        assert!(drafts.load_result().await.unwrap().is_some());

        drafts.clear_result().await.unwrap();
        assert!(drafts.load_result().await.unwrap().is_none());
        // Clearing an empty slot is not an error.
        drafts.clear_result().await.unwrap();
    }

    #[tokio::test]
    async fn test_legacy_manual_draft_reads_as_version_zero() {
        let (memory, drafts) = drafts();
        let legacy = r#"{"rawNotes":"Old notes","inputJobTitle":"","experienceLevel":"Entry-Level",
            "jobFamily":"","companyMission":"","companyValues":"","companyCulture":"",
            "timestamp":1700000000000}"#;
        memory.set(MANUAL_DRAFT_KEY, legacy.to_string()).await.unwrap();

        let stored = drafts.load_manual_draft().await.unwrap().unwrap();
        assert_eq!(stored.version, 0);
        assert_eq!(stored.data.raw_notes, "Old notes");
        assert_eq!(stored.data.experience_level, ExperienceLevel::Entry);
        assert_eq!(
            stored.saved_at.map(|t| t.timestamp_millis()),
            Some(1_700_000_000_000)
        );
    }

    #[tokio::test]
    async fn test_legacy_result_reads_as_version_zero() {
        let (memory, drafts) = drafts();
        let legacy = serde_json::to_string(&sample_package()).unwrap();
        memory.set(SAVED_RESULT_KEY, legacy).await.unwrap();

        let stored = drafts.load_result().await.unwrap().unwrap();
        assert_eq!(stored.version, 0);
        assert!(stored.saved_at.is_none());
        assert_eq!(stored.data, sample_package());
    }

    #[tokio::test]
    async fn test_corrupt_manual_draft_is_an_error() {
        let (memory, drafts) = drafts();
        memory.set(MANUAL_DRAFT_KEY, "{not json".to_string()).await.unwrap();
        assert!(matches!(
            drafts.load_manual_draft().await,
            Err(StoreError::Corrupt { .. })
        ));
    }

    #[tokio::test]
    async fn test_corrupt_autosave_is_ignored() {
        let (memory, drafts) = drafts();
        memory.set(AUTOSAVE_KEY, "[1, 2".to_string()).await.unwrap();
        assert!(drafts.load_autosave().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_newer_schema_version_is_rejected() {
        let (memory, drafts) = drafts();
        let future = r#"{"version":99,"savedAt":"2030-01-01T00:00:00Z","data":{}}"#;
        memory.set(MANUAL_DRAFT_KEY, future.to_string()).await.unwrap();
        assert!(matches!(
            drafts.load_manual_draft().await,
            Err(StoreError::UnsupportedVersion { version: 99, .. })
        ));
    }

    #[tokio::test]
    async fn test_invalid_saved_result_is_corrupt() {
        let (_, drafts) = drafts();
        let mut package = sample_package();
        package.job_title.clear();
        drafts.save_result(&package).await.unwrap();
        assert!(matches!(
            drafts.load_result().await,
            Err(StoreError::Corrupt { .. })
        ));
    }
}
