//! # Basic Loop Example
//!
//! Drives the four-phase cycle with a scripted mock collaborator and
//! prints the resulting transition log. No network calls are made.
//!
//! # Usage
//! ```bash
//! cargo run --example basic_loop
//! RUST_LOG=debug cargo run --example basic_loop
//! ```

use agentloop::{AgentLoopBuilder, MockCollaborator};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured logging — set RUST_LOG=debug|info|warn
    tracing_subscriber::fmt::init();

    println!("=== agentloop-rs Basic Loop Example ===\n");

    let collaborator = MockCollaborator::replies(vec![
        "The kettle is cold and empty.",
        "Fill the kettle and switch it on.",
        "Kettle filled and heating; water at 60°C.",
        "Progress made but the water is not boiling yet.",
        "The kettle is heating; water at 95°C.",
        "Wait for the boil, then pour.",
        "Water boiled and poured over the tea leaves.",
        "The tea is brewing — the task is complete.",
    ]);

    let mut agent = AgentLoopBuilder::new()
        .collaborator(Box::new(collaborator))
        .on_transition(|t| {
            println!("  ══ {} ──> {} ══", t.from, t.to);
        })
        .build()?;

    let answer = agent.run("make a cup of tea", 5).await?;

    println!("\nFinal answer: {answer}");
    println!(
        "Iterations used: {} of {}",
        agent.context().iteration,
        agent.context().max_iterations
    );

    agent.transition_log().print();
    Ok(())
}
