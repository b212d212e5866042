//! File-system report store.

use std::path::PathBuf;

use async_trait::async_trait;
use pipeline::{ArtifactPath, ReportStore, RunReport, SquadError};
use tracing::info;

/// Writes the rendered report to one fixed file, replacing it each run.
#[derive(Debug, Clone)]
pub struct FileReportStore {
    path: ArtifactPath,
}

impl FileReportStore {
    /// Creates a store that writes to `path`.
    pub fn new(path: ArtifactPath) -> Self {
        Self { path }
    }

    fn write_error(&self, e: std::io::Error) -> SquadError {
        SquadError::ArtifactWrite {
            path: self.path.clone(),
            message: e.to_string(),
        }
    }
}

#[async_trait]
impl ReportStore for FileReportStore {
    async fn save(&self, report: &RunReport) -> Result<ArtifactPath, SquadError> {
        let path = PathBuf::from(self.path.as_str());

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| self.write_error(e))?;
        }

        tokio::fs::write(&path, report.render())
            .await
            .map_err(|e| self.write_error(e))?;

        info!(path = %self.path, run_id = %report.run_id, "run report written");
        Ok(self.path.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pipeline::{RoleOutcome, RunId, Timestamp};

    fn report(marker: &str) -> RunReport {
        let now = Timestamp::now();
        RunReport {
            run_id: RunId::new_random(),
            request: "r".into(),
            plan: RoleOutcome::success(format!("plan {marker}")),
            build: RoleOutcome::success(format!("build {marker}")),
            audit: RoleOutcome::success(format!("audit {marker}")),
            started_at: now,
            finished_at: now,
        }
    }

    #[tokio::test]
    async fn creates_parent_directory_and_writes_rendering() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("artifacts").join("last_run_report.md");
        let store = FileReportStore::new(ArtifactPath::new(target.to_string_lossy()).unwrap());

        let r = report("one");
        let written = store.save(&r).await.unwrap();

        assert_eq!(written.as_str(), target.to_string_lossy());
        assert_eq!(std::fs::read_to_string(&target).unwrap(), r.render());
    }

    #[tokio::test]
    async fn overwrites_previous_report() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("report.md");
        std::fs::write(&target, "a much longer stale report that must not survive").unwrap();
        let store = FileReportStore::new(ArtifactPath::new(target.to_string_lossy()).unwrap());

        store.save(&report("new")).await.unwrap();

        let contents = std::fs::read_to_string(&target).unwrap();
        assert!(contents.starts_with("# Run Report\n## Plan\nplan new"));
        assert!(!contents.contains("stale"));
    }

    #[tokio::test]
    async fn unwritable_destination_is_artifact_write_error() {
        let dir = tempfile::tempdir().unwrap();
        // The destination is an existing directory.
        let store = FileReportStore::new(ArtifactPath::new(dir.path().to_string_lossy()).unwrap());

        assert!(matches!(
            store.save(&report("x")).await,
            Err(SquadError::ArtifactWrite { .. })
        ));
    }
}
