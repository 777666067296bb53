//! Pure prompt builders, one per phase, plus the termination vocabulary.
//!
//! Phase dispatch is an explicit match over [`AgentState`] in the
//! controller; these functions hold the only phase-specific logic. They
//! read the context and return a prompt string — no side effects, no
//! failure modes.

use crate::context::AgentContext;

/// Words that, appearing anywhere in a reflection (case-insensitive),
/// signal that the task is finished.
pub const COMPLETION_SIGNALS: &[&str] = &["complete", "done", "finished"];

/// Observe: situate the collaborator in the task, the iteration index and
/// whatever happened last cycle.
pub fn observe_prompt(ctx: &AgentContext) -> String {
    let mut prompt = format!(
        "You are an autonomous agent working on the following task.\n\
         Task: {}\n\
         Iteration {} of {}.\n",
        ctx.task,
        ctx.iteration + 1,
        ctx.max_iterations,
    );

    if let Some(obs) = ctx.latest_observation() {
        prompt.push_str(&format!("Previous observation: {obs}\n"));
    }
    if let Some(action) = ctx.latest_action() {
        prompt.push_str(&format!("Last action result: {}\n", action.result));
    }

    prompt.push_str("Describe the current situation relevant to the task.");
    prompt
}

/// Think: reason from the latest observation toward a next step.
pub fn think_prompt(ctx: &AgentContext) -> String {
    format!(
        "Observation: {}\n\
         Given this observation, reason step by step about the single best \
         next action toward completing the task: {}",
        ctx.latest_observation().unwrap_or("(none)"),
        ctx.task,
    )
}

/// Act: execute the latest thought.
pub fn act_prompt(ctx: &AgentContext) -> String {
    format!(
        "Plan: {}\n\
         Carry out this plan and report the concrete result.",
        ctx.latest_thought().unwrap_or("(none)"),
    )
}

/// Reflect: evaluate the latest action's result against the task.
pub fn reflect_prompt(ctx: &AgentContext) -> String {
    format!(
        "The last action produced: {}\n\
         Evaluate progress on the task: {}\n\
         If the task is finished, say so explicitly using the word \
         \"complete\". Otherwise describe what remains.",
        ctx.latest_action().map(|a| a.result.as_str()).unwrap_or("(none)"),
        ctx.task,
    )
}

/// Returns true if the reflection text contains an explicit completion
/// signal from the fixed vocabulary.
pub fn completion_signalled(reflection: &str) -> bool {
    let lower = reflection.to_lowercase();
    COMPLETION_SIGNALS.iter().any(|signal| lower.contains(signal))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completion_signal_is_case_insensitive() {
        assert!(completion_signalled("Task is COMPLETE"));
        assert!(completion_signalled("we are done here"));
        assert!(completion_signalled("Finished."));
        assert!(!completion_signalled("still working on it"));
        assert!(!completion_signalled("ok"));
    }

    #[test]
    fn prompts_carry_latest_history() {
        let mut ctx = AgentContext::new("count to three", 3);
        ctx.observations.push("nothing counted yet".to_string());
        ctx.thoughts.push("say one".to_string());
        ctx.record_action("say one", "one");

        assert!(observe_prompt(&ctx).contains("count to three"));
        assert!(think_prompt(&ctx).contains("nothing counted yet"));
        assert!(act_prompt(&ctx).contains("say one"));
        assert!(reflect_prompt(&ctx).contains("one"));
    }
}
