//! Lock-scoped atomic mutation over the JSONL store.
//!
//! The core hands back the next state for a snapshot; making that
//! update safe against concurrent writers is this module's job. One
//! `.lock` file guards each store path: load, mutate, persist, release.

use crate::memory::{MemoryStore, StoreError};
use chrono::{DateTime, Utc};
use civicwatch_core::{Issue, IssueStatus};
use std::error::Error as StdError;
use std::ffi::OsString;
use std::fmt::{Display, Formatter};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Lock-file path for a store path (`issues.jsonl` -> `issues.jsonl.lock`).
pub fn store_lock_path(issues_path: &Path) -> PathBuf {
    let mut path: OsString = issues_path.as_os_str().to_os_string();
    path.push(".lock");
    PathBuf::from(path)
}

#[derive(Debug)]
pub enum AtomicMutationError<E> {
    LockBusy { lock_path: String },
    LockIo { lock_path: String, message: String },
    Store(StoreError),
    Mutation(E),
}

impl<E> AtomicMutationError<E> {
    fn lock_busy(lock_path: &Path) -> Self {
        Self::LockBusy {
            lock_path: lock_path.display().to_string(),
        }
    }

    fn lock_io(lock_path: &Path, message: impl Into<String>) -> Self {
        Self::LockIo {
            lock_path: lock_path.display().to_string(),
            message: message.into(),
        }
    }
}

impl<E: Display> Display for AtomicMutationError<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LockBusy { lock_path } => write!(f, "issue-store lock busy: {lock_path}"),
            Self::LockIo { lock_path, message } => {
                write!(f, "failed to acquire issue-store lock {lock_path}: {message}")
            }
            Self::Store(err) => write!(f, "{err}"),
            Self::Mutation(err) => write!(f, "{err}"),
        }
    }
}

impl<E> StdError for AtomicMutationError<E> where
    E: Display + std::fmt::Debug + StdError + 'static
{
}

/// Execute one lock-scoped store mutation against an issues JSONL path.
///
/// The mutator returns `(value, changed)` where:
/// - `value` is returned to the caller
/// - `changed=true` persists the store to JSONL before lock release.
pub fn mutate_store_jsonl<T, E, F>(
    path: impl AsRef<Path>,
    mutator: F,
) -> Result<T, AtomicMutationError<E>>
where
    F: FnOnce(&mut MemoryStore) -> Result<(T, bool), E>,
{
    let path = path.as_ref();
    let _guard = StoreFileLockGuard::acquire(path).map_err(|err| match err {
        AtomicMutationError::LockBusy { lock_path } => AtomicMutationError::LockBusy { lock_path },
        AtomicMutationError::LockIo { lock_path, message } => {
            AtomicMutationError::LockIo { lock_path, message }
        }
        AtomicMutationError::Store(source) => AtomicMutationError::Store(source),
        AtomicMutationError::Mutation(unreachable) => match unreachable {},
    })?;

    let mut store = MemoryStore::load_jsonl(path).map_err(AtomicMutationError::Store)?;
    let (value, changed) = mutator(&mut store).map_err(AtomicMutationError::Mutation)?;
    if changed {
        store
            .save_jsonl(path)
            .map_err(AtomicMutationError::Store)?;
    }
    Ok(value)
}

/// One status-transition request against a stored issue.
#[derive(Debug, Clone)]
pub struct TransitionRequest {
    pub issue_id: String,
    pub new_status: IssueStatus,
    pub description: String,
    pub updated_by: String,
    pub now: DateTime<Utc>,
}

impl TransitionRequest {
    pub fn new(issue_id: impl Into<String>, new_status: IssueStatus) -> Self {
        Self {
            issue_id: issue_id.into(),
            new_status,
            description: String::new(),
            updated_by: String::new(),
            now: Utc::now(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TransitionJsonlError {
    #[error("updated_by is required")]
    InvalidActor,

    #[error(transparent)]
    Atomic(#[from] AtomicMutationError<StoreError>),
}

/// Atomically apply a status transition to one issue in a JSONL store.
///
/// Loads the store under the lock, applies the transition to the
/// current snapshot, and persists before release, so two concurrent
/// updates to the same issue serialize instead of losing an event.
/// Returns the updated record.
pub fn transition_issue_jsonl(
    path: impl AsRef<Path>,
    request: TransitionRequest,
) -> Result<Issue, TransitionJsonlError> {
    let updated_by = request.updated_by.trim().to_string();
    if updated_by.is_empty() {
        return Err(TransitionJsonlError::InvalidActor);
    }

    let issue = mutate_store_jsonl(path.as_ref(), |store| {
        store.transition(
            &request.issue_id,
            request.new_status,
            request.description.clone(),
            updated_by.clone(),
            request.now,
        )?;
        let issue = store
            .issue(&request.issue_id)
            .cloned()
            .ok_or_else(|| StoreError::IssueNotFound(request.issue_id.clone()))?;
        Ok::<_, StoreError>((issue, true))
    })?;

    tracing::info!(
        issue_id = %issue.id,
        status = %request.new_status,
        "issue transitioned"
    );
    Ok(issue)
}

/// Atomically bump an issue's view counter in a JSONL store. Returns
/// the updated record.
pub fn record_view_jsonl(
    path: impl AsRef<Path>,
    issue_id: &str,
) -> Result<Issue, AtomicMutationError<StoreError>> {
    mutate_store_jsonl(path.as_ref(), |store| {
        store.record_view(issue_id)?;
        let issue = store
            .issue(issue_id)
            .cloned()
            .ok_or_else(|| StoreError::IssueNotFound(issue_id.to_string()))?;
        Ok::<_, StoreError>((issue, true))
    })
}

struct StoreFileLockGuard {
    lock_path: PathBuf,
    _file: File,
}

impl StoreFileLockGuard {
    fn acquire(path: &Path) -> Result<Self, AtomicMutationError<std::convert::Infallible>> {
        let lock_path = store_lock_path(path);
        if let Some(parent) = lock_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .map_err(|e| AtomicMutationError::lock_io(&lock_path, e.to_string()))?;
        }

        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&lock_path)
        {
            Ok(mut file) => {
                let _ = writeln!(
                    file,
                    "pid={}\nutc={}",
                    std::process::id(),
                    Utc::now().to_rfc3339()
                );
                Ok(Self {
                    lock_path,
                    _file: file,
                })
            }
            Err(err) if err.kind() == std::io::ErrorKind::AlreadyExists => {
                Err(AtomicMutationError::lock_busy(&lock_path))
            }
            Err(err) => Err(AtomicMutationError::lock_io(&lock_path, err.to_string())),
        }
    }
}

impl Drop for StoreFileLockGuard {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.lock_path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use civicwatch_core::{Category, EnrichmentPipeline, RawSubmission, TransitionError};
    use std::time::{SystemTime, UNIX_EPOCH};

    fn at(millis: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(millis)
            .single()
            .expect("fixed time")
    }

    fn temp_issues_path(prefix: &str) -> PathBuf {
        let unique = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after unix epoch")
            .as_nanos();
        let root = std::env::temp_dir().join(format!("civicwatch-store-{prefix}-{unique}"));
        fs::create_dir_all(&root).expect("temp dir should be created");
        root.join("issues.jsonl")
    }

    fn seeded_store(path: &Path) {
        let mut store = MemoryStore::default();
        let issue = EnrichmentPipeline::default()
            .enrich(
                RawSubmission {
                    title: "Burst pipe".to_string(),
                    category: Some(Category::WaterLeak),
                    latitude: Some(-2.0),
                    longitude: Some(3.0),
                    submitted_at: Some(at(0)),
                    ..Default::default()
                },
                at(0),
            )
            .into_issue();
        store.add_issue(issue);
        store.save_jsonl(path).expect("seed store should save");
    }

    #[test]
    fn transition_persists_through_the_lock_scoped_path() {
        let path = temp_issues_path("transition");
        seeded_store(&path);

        let mut request = TransitionRequest::new("cw-1", IssueStatus::Acknowledged);
        request.description = "Crew en route.".to_string();
        request.updated_by = "dept:water_supply".to_string();
        request.now = at(1000);

        let updated = transition_issue_jsonl(&path, request).expect("transition should succeed");
        assert_eq!(updated.status, Some(IssueStatus::Acknowledged));
        assert_eq!(updated.timeline.len(), 2);

        let reloaded = MemoryStore::load_jsonl(&path).expect("store should reload");
        let stored = reloaded.issue("cw-1").expect("issue should exist");
        assert_eq!(stored.status, Some(IssueStatus::Acknowledged));
        assert_eq!(stored.timeline.len(), 2);
    }

    #[test]
    fn transition_requires_an_actor() {
        let path = temp_issues_path("actor");
        seeded_store(&path);

        let mut request = TransitionRequest::new("cw-1", IssueStatus::Acknowledged);
        request.updated_by = "   ".to_string();
        request.now = at(1000);

        let err = transition_issue_jsonl(&path, request).expect_err("blank actor must be rejected");
        assert!(matches!(err, TransitionJsonlError::InvalidActor));
    }

    #[test]
    fn missing_issue_surfaces_not_found_through_the_atomic_layer() {
        let path = temp_issues_path("missing");
        seeded_store(&path);

        let mut request = TransitionRequest::new("cw-404", IssueStatus::Resolved);
        request.updated_by = "ops".to_string();
        request.now = at(1000);

        let err = transition_issue_jsonl(&path, request).expect_err("missing issue must error");
        assert!(matches!(
            err,
            TransitionJsonlError::Atomic(AtomicMutationError::Mutation(
                StoreError::IssueNotFound(id)
            )) if id == "cw-404"
        ));
    }

    #[test]
    fn rejected_edges_leave_the_stored_record_untouched() {
        let path = temp_issues_path("rejected");
        seeded_store(&path);

        let mut resolve = TransitionRequest::new("cw-1", IssueStatus::Resolved);
        resolve.updated_by = "ops".to_string();
        resolve.now = at(1000);
        transition_issue_jsonl(&path, resolve).expect("open -> resolved");

        let mut reopen = TransitionRequest::new("cw-1", IssueStatus::Open);
        reopen.updated_by = "ops".to_string();
        reopen.now = at(2000);
        let err = transition_issue_jsonl(&path, reopen).expect_err("reopen must be rejected");
        assert!(matches!(
            err,
            TransitionJsonlError::Atomic(AtomicMutationError::Mutation(StoreError::Transition(
                TransitionError::InvalidTransition { .. }
            )))
        ));

        let reloaded = MemoryStore::load_jsonl(&path).expect("store should reload");
        let stored = reloaded.issue("cw-1").expect("issue should exist");
        assert_eq!(stored.status, Some(IssueStatus::Resolved));
        assert_eq!(stored.timeline.len(), 2);
    }

    #[test]
    fn record_view_persists_the_counter() {
        let path = temp_issues_path("views");
        seeded_store(&path);

        let first = record_view_jsonl(&path, "cw-1").expect("view should record");
        assert_eq!(first.view_count, 1);
        let second = record_view_jsonl(&path, "cw-1").expect("view should record");
        assert_eq!(second.view_count, 2);

        let reloaded = MemoryStore::load_jsonl(&path).expect("store should reload");
        assert_eq!(
            reloaded.issue("cw-1").expect("issue should exist").view_count,
            2
        );
    }

    #[test]
    fn mutation_is_rejected_while_the_lock_is_held() {
        let path = temp_issues_path("lock");
        seeded_store(&path);

        let lock_path = store_lock_path(&path);
        fs::write(&lock_path, "busy\n").expect("lock should be created");

        let mut request = TransitionRequest::new("cw-1", IssueStatus::Acknowledged);
        request.updated_by = "ops".to_string();
        let result = transition_issue_jsonl(&path, request);

        match result {
            Err(TransitionJsonlError::Atomic(AtomicMutationError::LockBusy {
                lock_path: reported,
            })) => {
                assert_eq!(reported, lock_path.display().to_string());
            }
            other => panic!("expected lock busy error, got {other:?}"),
        }
        let _ = fs::remove_file(lock_path);
    }
}
