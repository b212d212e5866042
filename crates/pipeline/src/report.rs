//! The run report: the one artefact a squad run produces.

use serde::{Deserialize, Serialize};

use crate::{Role, RoleOutcome, RunId, Timestamp};

/// The three stage outcomes of one run, in stage order.
///
/// The fields are fixed rather than a list so a report can never hold more
/// or fewer than three sections, or hold them out of order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    /// Identifier of the run that produced this report.
    pub run_id: RunId,
    /// The request the run was started with.
    pub request: String,
    /// Planner outcome.
    pub plan: RoleOutcome,
    /// Builder outcome.
    pub build: RoleOutcome,
    /// Auditor outcome.
    pub audit: RoleOutcome,
    /// When the planner stage started.
    pub started_at: Timestamp,
    /// When the auditor stage finished.
    pub finished_at: Timestamp,
}

impl RunReport {
    /// Returns the outcome recorded for `role`.
    pub fn outcome(&self, role: Role) -> &RoleOutcome {
        match role {
            Role::Planner => &self.plan,
            Role::Builder => &self.build,
            Role::Auditor => &self.audit,
        }
    }

    /// Iterates `(role, outcome)` pairs in stage order.
    pub fn sections(&self) -> impl Iterator<Item = (Role, &RoleOutcome)> {
        Role::ALL.into_iter().map(move |role| (role, self.outcome(role)))
    }

    /// Returns `true` if any stage produced something other than provider text.
    pub fn is_degraded(&self) -> bool {
        self.sections().any(|(_, outcome)| !outcome.is_success())
    }

    /// Renders the Markdown document written to the artefact path.
    ///
    /// Only the stage texts are rendered; run id and timestamps are left out
    /// so two runs with identical stage output produce identical documents.
    /// Heading lines inside a stage text are escaped, so the document always
    /// has exactly the Plan, Build and Audit sections.
    pub fn render(&self) -> String {
        let mut doc = String::from("# Run Report");
        for (role, outcome) in self.sections() {
            doc.push_str("\n## ");
            doc.push_str(role.section_title());
            doc.push('\n');
            push_section_body(&mut doc, &outcome.text());
        }
        doc
    }
}

/// Appends `text`, escaping ATX heading lines that sit outside fenced code.
fn push_section_body(doc: &mut String, text: &str) {
    let mut fence: Option<&str> = None;

    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            doc.push('\n');
        }
        let content = line.trim_start_matches(' ');
        let indent = line.len() - content.len();
        // Four or more spaces is an indented code block, never a heading.
        if indent < 4 {
            if let Some(open) = fence {
                if content.starts_with(open) {
                    fence = None;
                }
            } else if content.starts_with("```") || content.starts_with("~~~") {
                fence = Some(&content[..3]);
            } else if content.starts_with('#') {
                doc.push_str(&line[..indent]);
                doc.push('\\');
                doc.push_str(content);
                continue;
            }
        }
        doc.push_str(line);
    }
}
