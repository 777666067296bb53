use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use crate::collaborator::Collaborator;
use crate::context::AgentContext;
use crate::error::AgentError;
use crate::phases;
use crate::state::AgentState;
use crate::trace::{Transition, TransitionLog};
use crate::transitions::{self, TransitionTable};

/// Observability callback invoked synchronously with every accepted
/// transition, in order, before phase logic proceeds. Must not panic and
/// must not block — a panicking hook is fatal to the run.
pub struct TransitionHook(pub Arc<dyn Fn(&Transition) + Send + Sync>);

impl std::fmt::Debug for TransitionHook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<hook>")
    }
}

impl Clone for TransitionHook {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

/// Drives one run of the Observe→Think→Act→Reflect cycle to completion or
/// failure, validating every state change against the transition table.
///
/// A controller owns exactly one [`AgentContext`] and one [`TransitionLog`]
/// at a time; `run()` replaces both, so they are always 1:1 with the latest
/// run. A controller is not safe for concurrent reentry — `run()` takes
/// `&mut self` — but independent controllers share nothing and may run
/// concurrently.
pub struct AgentLoop {
    collaborator:  Box<dyn Collaborator>,
    hook:          Option<TransitionHook>,
    transitions:   TransitionTable,
    seed_metadata: HashMap<String, serde_json::Value>,
    state:         AgentState,
    context:       AgentContext,
    log:           TransitionLog,
}

impl std::fmt::Debug for AgentLoop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentLoop")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl AgentLoop {
    /// Creates a controller. Prefer [`crate::AgentLoopBuilder`] for
    /// ergonomic construction.
    pub fn new(
        collaborator:  Box<dyn Collaborator>,
        hook:          Option<TransitionHook>,
        seed_metadata: HashMap<String, serde_json::Value>,
    ) -> Self {
        Self {
            collaborator,
            hook,
            transitions: transitions::build_transition_table(),
            seed_metadata,
            state:   AgentState::Idle,
            context: AgentContext::default(),
            log:     TransitionLog::new(),
        }
    }

    /// Run the four-phase cycle for the given task.
    ///
    /// Each iteration issues four collaborator calls, so keep
    /// `max_iterations` small (3–10 is typical). Returns the most recent
    /// action's result once the termination policy stops the loop; any
    /// phase failure records a transition to `Error` and returns an
    /// [`AgentError`] carrying the failing state and cause. The context
    /// and transition log remain readable after either outcome.
    pub async fn run(
        &mut self,
        task: impl Into<String>,
        max_iterations: usize,
    ) -> Result<String, AgentError> {
        let task = task.into();

        // Input validation happens before any transition leaves Idle;
        // prior context/log are untouched on rejection.
        if task.trim().is_empty() {
            return Err(AgentError::EmptyTask);
        }
        if max_iterations == 0 {
            return Err(AgentError::ZeroIterations);
        }

        self.reset();
        self.context = AgentContext::new(task, max_iterations);
        self.context.metadata.extend(
            self.seed_metadata.iter().map(|(k, v)| (k.clone(), v.clone())),
        );

        tracing::info!(
            run_id = %self.context.run_id,
            task   = %self.context.task,
            max_iterations,
            "run started"
        );

        loop {
            // ── Observe ── (Idle -> Observe first, Reflect -> Observe after)
            self.advance(AgentState::Observe, None)?;
            let observation = self.invoke(phases::observe_prompt(&self.context)).await?;
            self.context.observations.push(observation);

            // ── Think ──
            self.advance(AgentState::Think, None)?;
            let thought = self.invoke(phases::think_prompt(&self.context)).await?;
            self.context.thoughts.push(thought);

            // ── Act ──
            self.advance(AgentState::Act, None)?;
            let result = self.invoke(phases::act_prompt(&self.context)).await?;
            let plan = self.context.latest_thought().unwrap_or_default().to_string();
            self.context.record_action(plan, result);

            // ── Reflect ── the decision point: continue, stop, or fail
            self.advance(AgentState::Reflect, None)?;
            let reflection = self.invoke(phases::reflect_prompt(&self.context)).await?;
            let signalled = phases::completion_signalled(&reflection);
            self.context.reflections.push(reflection);
            self.context.iteration += 1;

            tracing::debug!(
                run_id    = %self.context.run_id,
                iteration = self.context.iteration,
                signalled,
                "cycle finished"
            );

            if signalled || self.context.iteration >= self.context.max_iterations {
                let reason = if signalled {
                    "completion signal in reflection"
                } else {
                    "iteration limit reached"
                };
                self.advance(AgentState::Complete, Some(reason))?;

                let answer = self
                    .context
                    .latest_action()
                    .map(|a| a.result.clone())
                    .unwrap_or_default();
                tracing::info!(run_id = %self.context.run_id, reason, "run complete");
                return Ok(answer);
            }
        }
    }

    /// Attempts `current -> to`, records it, and notifies the hook.
    ///
    /// An illegal pair is a defect in the controller's own sequencing and
    /// is always fatal: it is recorded as a `-> Error` transition and the
    /// run fails. A panicking hook is treated the same way.
    fn advance(
        &mut self,
        to: AgentState,
        message: Option<&str>,
    ) -> Result<(), AgentError> {
        let from = self.state;

        if !transitions::is_legal(&self.transitions, from, to) {
            let err = AgentError::IllegalTransition { from, to };
            self.fail(
                err.to_string(),
                serde_json::json!({ "attempted": to.as_str() }),
            );
            return Err(err);
        }

        let mut transition = Transition::new(from, to);
        if let Some(msg) = message {
            transition = transition.with_message(msg);
        }

        tracing::info!(%from, %to, "transition");
        self.log.record(transition.clone());
        self.state = to;

        if let Some(hook) = &self.hook {
            let hook = hook.clone();
            if let Err(panic) = catch_unwind(AssertUnwindSafe(|| (hook.0)(&transition))) {
                let detail = panic_detail(panic);
                let err = AgentError::HookPanic { from, to, detail: detail.clone() };
                self.fail(
                    format!("transition hook panicked: {detail}"),
                    serde_json::json!({ "panic": detail }),
                );
                return Err(err);
            }
        }

        Ok(())
    }

    /// One collaborator call — the only suspension point in the loop.
    /// Empty output violates the collaborator contract and fails the run
    /// exactly like any other collaborator error.
    async fn invoke(&mut self, prompt: String) -> Result<String, AgentError> {
        let phase = self.state;
        tracing::debug!(%phase, prompt_len = prompt.len(), "invoking collaborator");

        let outcome = match self.collaborator.complete(&prompt).await {
            Ok(text) if text.trim().is_empty() => {
                Err(crate::collaborator::CollaboratorError::EmptyResponse)
            }
            other => other,
        };

        match outcome {
            Ok(text) => Ok(text),
            Err(source) => {
                self.fail(
                    source.to_string(),
                    serde_json::json!({ "phase": phase.as_str() }),
                );
                Err(AgentError::Collaborator { state: phase, source })
            }
        }
    }

    /// Records `current -> Error` with the failure detail and moves there.
    /// The hook still sees the Error transition, but a panic at this point
    /// is swallowed — the run is already failing.
    fn fail(&mut self, message: String, data: serde_json::Value) {
        tracing::error!(from = %self.state, %message, "run failed");

        let transition = Transition::new(self.state, AgentState::Error)
            .with_message(message)
            .with_data(data);
        self.log.record(transition.clone());
        self.state = AgentState::Error;

        if let Some(hook) = &self.hook {
            let hook = hook.clone();
            let _ = catch_unwind(AssertUnwindSafe(|| (hook.0)(&transition)));
        }
    }

    /// Discards prior context and log and returns the controller to Idle.
    pub fn reset(&mut self) {
        self.state   = AgentState::Idle;
        self.context = AgentContext::default();
        self.log     = TransitionLog::new();
    }

    /// Returns the current state (useful for inspection after run).
    pub fn current_state(&self) -> AgentState {
        self.state
    }

    /// Read-only view of the run's context, kept after termination.
    pub fn context(&self) -> &AgentContext {
        &self.context
    }

    /// Read-only view of the full transition log, kept after termination.
    pub fn transition_log(&self) -> &TransitionLog {
        &self.log
    }
}

fn panic_detail(panic: Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
