//! The squad driver: Planner → Builder → Auditor, then the report.
//!
//! Each stage's prompt is built from the previous stages' output text, so a
//! stage cannot start until the one before it has returned. A failed stage
//! does not stop the run: its error text is threaded forward as content and
//! ends up in the report like any other output.

use std::sync::Arc;

use pipeline::{
    ArtifactPath, PromptTemplates, ReportStore, Role, RoleOutcome, RunId, RunReport, SquadError,
    Timestamp,
};
use tracing::{info, info_span, warn, Instrument};

use crate::gateway::ProviderRouter;
use crate::prompts;

/// Request used when the caller supplies none.
pub const DEFAULT_REQUEST: &str = "Analyze the current code and propose improvements.";

/// A finished run: the report and where it was written.
#[derive(Debug, Clone)]
pub struct SquadRun {
    /// The three stage outcomes.
    pub report: RunReport,
    /// Location of the persisted report.
    pub artifact: ArtifactPath,
}

/// Runs the three fixed stages and persists the report.
pub struct SquadRunner {
    router: ProviderRouter,
    templates: Arc<dyn PromptTemplates>,
    store: Arc<dyn ReportStore>,
}

impl SquadRunner {
    /// Creates a runner from its collaborators.
    pub fn new(
        router: ProviderRouter,
        templates: Arc<dyn PromptTemplates>,
        store: Arc<dyn ReportStore>,
    ) -> Self {
        Self {
            router,
            templates,
            store,
        }
    }

    /// Runs the squad on `request`, or on [`DEFAULT_REQUEST`] if `request` is
    /// `None` or blank.
    ///
    /// # Errors
    ///
    /// Only [`SquadError::ArtifactWrite`]: stage failures are recorded in the
    /// report, never returned.
    pub async fn run(&self, request: Option<&str>) -> Result<SquadRun, SquadError> {
        let request = request
            .filter(|r| !r.trim().is_empty())
            .unwrap_or(DEFAULT_REQUEST);
        let run_id = RunId::new_random();
        let span = info_span!("squad_run", %run_id);

        self.run_stages(run_id, request).instrument(span).await
    }

    async fn run_stages(&self, run_id: RunId, request: &str) -> Result<SquadRun, SquadError> {
        info!(request, "squad activated");
        let started_at = Timestamp::now();

        let prompt = prompts::planner_prompt(&self.template(Role::Planner).await, request);
        let plan = self.stage(1, Role::Planner, &prompt).await;
        let plan_text = plan.text();

        let prompt = prompts::builder_prompt(&self.template(Role::Builder).await, &plan_text);
        let build = self.stage(2, Role::Builder, &prompt).await;
        let build_text = build.text();

        let prompt = prompts::auditor_prompt(
            &self.template(Role::Auditor).await,
            &plan_text,
            &build_text,
        );
        let audit = self.stage(3, Role::Auditor, &prompt).await;

        let report = RunReport {
            run_id,
            request: request.to_string(),
            plan,
            build,
            audit,
            started_at,
            finished_at: Timestamp::now(),
        };

        let artifact = self.store.save(&report).await?;

        info!(
            artifact = %artifact,
            degraded = report.is_degraded(),
            elapsed_ms = report.started_at.millis_until(report.finished_at),
            "squad mission completed"
        );

        Ok(SquadRun { report, artifact })
    }

    async fn stage(&self, phase: u8, role: Role, prompt: &str) -> RoleOutcome {
        info!(phase, %role, "stage started");
        let outcome = self.router.invoke(role, prompt).await;
        if outcome.is_success() {
            info!(phase, %role, output = %outcome, "stage finished");
        } else {
            warn!(phase, %role, output = %outcome, "stage degraded; continuing with error text");
        }
        outcome
    }

    /// Loads the role template; an unreadable template is logged and treated
    /// as absent so the run still completes.
    async fn template(&self, role: Role) -> String {
        match self.templates.load(role).await {
            Ok(text) => text,
            Err(error) => {
                warn!(%role, %error, "prompt template ignored");
                String::new()
            }
        }
    }
}

impl std::fmt::Debug for SquadRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SquadRunner")
            .field("router", &self.router)
            .finish_non_exhaustive()
    }
}
