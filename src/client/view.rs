use tracing::debug;

use crate::client::api::{ApiError, WorkflowsClient};
use crate::models::Workflow;

const NAME_REQUIRED: &str = "Name is required";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewPhase {
    Unauthenticated,
    Loading,
    Ready,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    pub id: i32,
    pub draft: String,
}

/// The synchronized list view. Owns a cached copy of the server's workflow
/// list and mediates every mutation through the server; the cache changes
/// only after the server confirms.
///
/// Load failures and mutation failures land in separate slots so a failed
/// add or edit never evicts an already-loaded list.
#[derive(Debug)]
pub struct WorkflowsView {
    phase: ViewPhase,
    workflows: Vec<Workflow>,
    new_name: String,
    editing: Option<EditSession>,
    pending_delete: Option<i32>,
    load_error: Option<String>,
    mutation_error: Option<String>,
    in_flight: bool,
}

impl Default for WorkflowsView {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkflowsView {
    pub fn new() -> Self {
        Self {
            phase: ViewPhase::Unauthenticated,
            workflows: Vec::new(),
            new_name: String::new(),
            editing: None,
            pending_delete: None,
            load_error: None,
            mutation_error: None,
            in_flight: false,
        }
    }

    pub fn phase(&self) -> ViewPhase {
        self.phase
    }

    pub fn workflows(&self) -> &[Workflow] {
        &self.workflows
    }

    pub fn new_name(&self) -> &str {
        &self.new_name
    }

    pub fn editing(&self) -> Option<&EditSession> {
        self.editing.as_ref()
    }

    pub fn pending_delete(&self) -> Option<i32> {
        self.pending_delete
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn mutation_error(&self) -> Option<&str> {
        self.mutation_error.as_deref()
    }

    /// True while a request is outstanding; the triggering control must stay
    /// disabled until this clears.
    pub fn is_busy(&self) -> bool {
        self.in_flight
    }

    pub fn set_new_name(&mut self, name: impl Into<String>) {
        self.new_name = name.into();
    }

    pub fn set_edit_draft(&mut self, draft: impl Into<String>) {
        if let Some(session) = self.editing.as_mut() {
            session.draft = draft.into();
        }
    }

    /// Fetch the full list. Called once login completes, and again for any
    /// manual reload; a reload is also the recovery path after a failed load.
    pub async fn load(&mut self, client: &WorkflowsClient) {
        if self.in_flight {
            return;
        }
        self.phase = ViewPhase::Loading;
        self.load_error = None;

        self.in_flight = true;
        let result = client.list_workflows().await;
        self.in_flight = false;

        match result {
            Ok(workflows) => {
                self.workflows = workflows;
                self.phase = ViewPhase::Ready;
            }
            Err(ApiError::Unauthorized) | Err(ApiError::Token(_)) => {
                self.phase = ViewPhase::Unauthenticated;
            }
            Err(e) => {
                self.load_error = Some(e.to_string());
            }
        }
    }

    /// Create a workflow from the pending-name buffer. An empty trimmed name
    /// is rejected locally without contacting the server.
    pub async fn submit_new(&mut self, client: &WorkflowsClient) {
        if self.in_flight || self.phase != ViewPhase::Ready {
            return;
        }
        self.mutation_error = None;

        let name = self.new_name.trim().to_string();
        if name.is_empty() {
            self.mutation_error = Some(NAME_REQUIRED.to_string());
            return;
        }

        self.in_flight = true;
        let result = client.create_workflow(&name).await;
        self.in_flight = false;

        match result {
            Ok(workflow) => {
                debug!("Created workflow {}", workflow.id);
                // Appended as-is; order is reconciled on the next full load.
                self.workflows.push(workflow);
                self.new_name.clear();
            }
            Err(e) => self.fail_mutation(e),
        }
    }

    /// Open an edit session, capturing the record's current name as the
    /// draft. Unknown ids are ignored.
    pub fn start_edit(&mut self, id: i32) {
        if let Some(workflow) = self.workflows.iter().find(|w| w.id == id) {
            self.editing = Some(EditSession {
                id,
                draft: workflow.name.clone(),
            });
            self.mutation_error = None;
        }
    }

    /// Discard the draft without issuing a request.
    pub fn cancel_edit(&mut self) {
        self.editing = None;
        self.mutation_error = None;
    }

    /// Submit the edit draft. An empty trimmed draft aborts locally; on
    /// success the returned record replaces the cached one by id.
    pub async fn submit_edit(&mut self, client: &WorkflowsClient) {
        if self.in_flight || self.phase != ViewPhase::Ready {
            return;
        }
        let Some(session) = self.editing.clone() else {
            return;
        };
        self.mutation_error = None;

        let draft = session.draft.trim().to_string();
        if draft.is_empty() {
            self.mutation_error = Some(NAME_REQUIRED.to_string());
            return;
        }

        self.in_flight = true;
        let result = client.update_workflow(session.id, &draft).await;
        self.in_flight = false;

        match result {
            Ok(updated) => {
                if let Some(slot) = self.workflows.iter_mut().find(|w| w.id == updated.id) {
                    *slot = updated;
                }
                self.editing = None;
            }
            Err(e) => self.fail_mutation(e),
        }
    }

    /// Arm the delete confirmation gate for a record. No request is issued
    /// until the deletion is confirmed.
    pub fn request_delete(&mut self, id: i32) {
        if self.workflows.iter().any(|w| w.id == id) {
            self.pending_delete = Some(id);
        }
    }

    /// Decline the confirmation; state is left unchanged.
    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Delete the armed record. On success it is removed from the cache; on
    /// failure the cache is left as-is for the next reload to reconcile.
    pub async fn confirm_delete(&mut self, client: &WorkflowsClient) {
        if self.in_flight || self.phase != ViewPhase::Ready {
            return;
        }
        let Some(id) = self.pending_delete.take() else {
            return;
        };
        self.mutation_error = None;

        self.in_flight = true;
        let result = client.delete_workflow(id).await;
        self.in_flight = false;

        match result {
            Ok(deleted) => {
                self.workflows.retain(|w| w.id != deleted.id);
            }
            Err(e) => self.fail_mutation(e),
        }
    }

    fn fail_mutation(&mut self, error: ApiError) {
        match error {
            // An unusable credential means a trip back through the login
            // flow, not an inline message.
            ApiError::Unauthorized | ApiError::Token(_) => {
                self.phase = ViewPhase::Unauthenticated;
            }
            e => {
                self.mutation_error = Some(e.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready_view(workflows: Vec<Workflow>) -> WorkflowsView {
        let mut view = WorkflowsView::new();
        view.phase = ViewPhase::Ready;
        view.workflows = workflows;
        view
    }

    fn workflow(id: i32, name: &str) -> Workflow {
        Workflow {
            id,
            name: name.to_string(),
        }
    }

    #[test]
    fn test_new_view_starts_unauthenticated() {
        let view = WorkflowsView::new();
        assert_eq!(view.phase(), ViewPhase::Unauthenticated);
        assert!(view.workflows().is_empty());
        assert!(!view.is_busy());
    }

    #[test]
    fn test_start_edit_captures_current_name() {
        let mut view = ready_view(vec![workflow(1, "Onboarding")]);
        view.start_edit(1);

        let session = view.editing().expect("edit session should be open");
        assert_eq!(session.id, 1);
        assert_eq!(session.draft, "Onboarding");
    }

    #[test]
    fn test_start_edit_ignores_unknown_id() {
        let mut view = ready_view(vec![workflow(1, "Onboarding")]);
        view.start_edit(999);
        assert!(view.editing().is_none());
    }

    #[test]
    fn test_cancel_edit_discards_draft_and_error() {
        let mut view = ready_view(vec![workflow(1, "Onboarding")]);
        view.start_edit(1);
        view.set_edit_draft("Renamed");
        view.mutation_error = Some("previous failure".to_string());

        view.cancel_edit();

        assert!(view.editing().is_none());
        assert!(view.mutation_error().is_none());
    }

    #[test]
    fn test_delete_gate_arms_and_disarms() {
        let mut view = ready_view(vec![workflow(1, "Onboarding")]);

        view.request_delete(1);
        assert_eq!(view.pending_delete(), Some(1));

        view.cancel_delete();
        assert_eq!(view.pending_delete(), None);

        view.request_delete(999);
        assert_eq!(view.pending_delete(), None);
    }

    #[test]
    fn test_error_slots_are_independent() {
        let mut view = ready_view(vec![workflow(1, "Onboarding")]);
        view.mutation_error = Some("add failed".to_string());

        assert!(view.load_error().is_none());
        assert_eq!(view.workflows().len(), 1);
    }
}
