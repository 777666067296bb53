//! # Anthropic Loop Example
//!
//! Runs the cycle against the Anthropic Messages API, with transient
//! failures retried by the back-off wrapper.
//!
//! # Usage
//! ```bash
//! ANTHROPIC_API_KEY=sk-ant-... cargo run --example anthropic_loop
//! RUST_LOG=info ANTHROPIC_API_KEY=sk-ant-... cargo run --example anthropic_loop
//! ```

use agentloop::{AgentLoopBuilder, AnthropicCollaborator, RetryingCollaborator};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    println!("=== agentloop-rs Anthropic Loop Example ===\n");

    // Reads ANTHROPIC_API_KEY from the environment. Retry lives in the
    // wrapper — the controller itself treats any surviving failure as
    // fatal to the run.
    let anthropic = AnthropicCollaborator::from_env("claude-sonnet-4-5")?;
    let collaborator = RetryingCollaborator::new(Arc::new(anthropic), 3);

    let mut agent = AgentLoopBuilder::new()
        .collaborator(Box::new(collaborator))
        .on_transition(|t| {
            println!("  ══ {} ──> {} ══", t.from, t.to);
        })
        .build()?;

    let task = "Outline a three-step plan for learning the Rust borrow checker, \
                then refine it to its single most important step.";

    match agent.run(task, 3).await {
        Ok(answer) => {
            println!("\nFinal answer:\n{answer}");
        }
        Err(err) => {
            // The log survives failure: print it so the exact phase and
            // iteration of breakdown can be inspected.
            eprintln!("\nRun failed: {err}");
            agent.transition_log().print();
        }
    }

    Ok(())
}
