//! Agent roster state holder.
//!
//! The registry is seeded with exactly four fixed role slots (Developer,
//! Researcher, Tester, Bug Fixer) and is never resized. Status transitions
//! are caller-driven and unconstrained; binding to a model happens only
//! after a successful handshake through a [`ModelProbe`], and there is no
//! unbind operation.
//!
//! The probe runs before any lock is taken, so a slow or hung handshake for
//! one agent never blocks reads, status updates, or other agents' probes.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info, warn};

use taskforge_core::types::{Agent, AgentStatus};
use taskforge_ollama::{ModelProbe, ProbeError};
use taskforge_store::{AGENTS_SLOT, SlotStore, SlotStoreExt};

/// Why binding an agent to a model failed.
#[derive(Debug, thiserror::Error)]
pub enum ConnectError {
    /// The handshake with the model endpoint failed; the agent stays
    /// unbound.
    #[error(
        "Failed to connect to Ollama. Please make sure Ollama is running \
         and the model is available. ({source})"
    )]
    Probe {
        /// The underlying handshake failure.
        #[from]
        source: ProbeError,
    },
}

/// Owner of the fixed four-agent roster.
pub struct AgentRegistry {
    store: Arc<dyn SlotStore>,
    agents: RwLock<Arc<Vec<Agent>>>,
}

impl AgentRegistry {
    /// Create a registry backed by `store`: restores the persisted roster
    /// from the `agents` slot, or seeds (and persists) the default roster
    /// when the slot is absent.
    pub fn new(store: Arc<dyn SlotStore>) -> Self {
        let agents = match store.get_json::<Vec<Agent>>(AGENTS_SLOT) {
            Ok(Some(saved)) => saved,
            Ok(None) => {
                let seed = Agent::default_roster();
                if let Err(e) = store.put_json(AGENTS_SLOT, &seed) {
                    warn!(error = %e, "failed to persist seeded agent roster");
                }
                seed
            }
            Err(e) => {
                warn!(error = %e, "failed to restore agent roster, seeding defaults");
                Agent::default_roster()
            }
        };
        Self {
            store,
            agents: RwLock::new(Arc::new(agents)),
        }
    }

    /// Snapshot of the roster.
    #[must_use]
    pub fn agents(&self) -> Arc<Vec<Agent>> {
        self.agents.read().clone()
    }

    /// Set status and current task for `agent_id` in one step. Unknown ids
    /// are ignored.
    pub fn update_agent_status(&self, agent_id: &str, status: AgentStatus, current_task: &str) {
        self.mutate(|agents| {
            let Some(agent) = agents.iter_mut().find(|a| a.id == agent_id) else {
                return false;
            };
            agent.status = status;
            agent.current_task = current_task.to_string();
            true
        });
    }

    /// Bind `agent_id` to `model` after a successful handshake.
    ///
    /// The probe runs first, without touching registry state; on failure the
    /// agent stays exactly as it was and the error carries a human-readable
    /// cause. An unknown `agent_id` skips the handshake and no-ops.
    pub async fn connect_to_model(
        &self,
        agent_id: &str,
        model: &str,
        probe: &dyn ModelProbe,
    ) -> Result<(), ConnectError> {
        if !self.agents.read().iter().any(|a| a.id == agent_id) {
            warn!(agent_id, "connect requested for unknown agent");
            return Ok(());
        }

        probe.probe(model).await?;

        self.mutate(|agents| {
            let Some(agent) = agents.iter_mut().find(|a| a.id == agent_id) else {
                return false;
            };
            agent.ollama_instance = model.to_string();
            true
        });
        info!(agent_id, model, "agent bound to model");
        Ok(())
    }

    /// Clone-edit-swap, then mirror the full roster to the `agents` slot.
    fn mutate(&self, edit: impl FnOnce(&mut Vec<Agent>) -> bool) {
        let mut guard = self.agents.write();
        let mut next = (**guard).clone();
        if !edit(&mut next) {
            return;
        }

        let next = Arc::new(next);
        *guard = Arc::clone(&next);
        drop(guard);

        if let Err(e) = self.store.put_json(AGENTS_SLOT, next.as_ref()) {
            warn!(error = %e, "failed to persist agent roster");
        }
        debug!("agent roster updated");
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
