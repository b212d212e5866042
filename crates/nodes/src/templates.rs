//! File-system prompt template store: `<dir>/<role>.md`.

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use pipeline::{PromptTemplates, Role, SquadError};
use tracing::debug;

/// Reads role templates from a directory.
#[derive(Debug, Clone)]
pub struct FsPromptTemplates {
    dir: PathBuf,
}

impl FsPromptTemplates {
    /// Creates a store rooted at `dir`. The directory need not exist.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, role: Role) -> PathBuf {
        self.dir.join(format!("{}.md", role.as_str()))
    }
}

#[async_trait]
impl PromptTemplates for FsPromptTemplates {
    async fn load(&self, role: Role) -> Result<String, SquadError> {
        let path = self.path_for(role);
        match tokio::fs::read_to_string(&path).await {
            Ok(text) => {
                debug!(%role, path = %path.display(), "loaded prompt template");
                Ok(text)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(String::new()),
            Err(e) => Err(SquadError::TemplateUnreadable {
                name: role.as_str().to_string(),
                message: format!("{}: {e}", path.display()),
            }),
        }
    }
}
