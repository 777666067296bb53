use std::collections::HashMap;
use crate::state::AgentState;

pub type TransitionTable = HashMap<AgentState, Vec<AgentState>>;

/// Builds the complete transition table for the four-phase cycle.
/// This is the single source of truth for legal phase ordering; any
/// (from, to) pair not in this table is illegal and causes the
/// controller to fail with AgentError::IllegalTransition.
///
/// ```text
/// Idle     -> {Observe, Error}
/// Observe  -> {Think, Error}
/// Think    -> {Act, Error}
/// Act      -> {Reflect, Error}
/// Reflect  -> {Observe, Complete, Error}
/// Complete -> {}          (terminal)
/// Error    -> {}          (terminal)
/// ```
///
/// Every non-terminal state may move to Error — any phase can fail.
/// Reflect is the only state with three successors because it is the
/// decision point: continue, stop, or fail.
pub fn build_transition_table() -> TransitionTable {
    let mut t = HashMap::new();

    t.insert(AgentState::Idle,    vec![AgentState::Observe, AgentState::Error]);
    t.insert(AgentState::Observe, vec![AgentState::Think,   AgentState::Error]);
    t.insert(AgentState::Think,   vec![AgentState::Act,     AgentState::Error]);
    t.insert(AgentState::Act,     vec![AgentState::Reflect, AgentState::Error]);
    t.insert(AgentState::Reflect, vec![
        AgentState::Observe, AgentState::Complete, AgentState::Error,
    ]);

    // Terminal states carry empty successor sets rather than being absent,
    // so lookups for them are still well-defined.
    t.insert(AgentState::Complete, vec![]);
    t.insert(AgentState::Error,    vec![]);

    t
}

/// Validates that a given (from, to) pair is legal. Pure, no side effects.
pub fn is_legal(table: &TransitionTable, from: AgentState, to: AgentState) -> bool {
    table.get(&from).map_or(false, |succ| succ.contains(&to))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_states_have_no_successors() {
        let t = build_transition_table();
        assert!(t[&AgentState::Complete].is_empty());
        assert!(t[&AgentState::Error].is_empty());
        assert!(!is_legal(&t, AgentState::Complete, AgentState::Observe));
        assert!(!is_legal(&t, AgentState::Error, AgentState::Idle));
    }

    #[test]
    fn every_non_terminal_state_may_fail() {
        let t = build_transition_table();
        for from in [
            AgentState::Idle,
            AgentState::Observe,
            AgentState::Think,
            AgentState::Act,
            AgentState::Reflect,
        ] {
            assert!(is_legal(&t, from, AgentState::Error), "{from} -> Error");
        }
    }

    #[test]
    fn cycle_order_is_fixed() {
        let t = build_transition_table();
        assert!(is_legal(&t, AgentState::Idle,    AgentState::Observe));
        assert!(is_legal(&t, AgentState::Observe, AgentState::Think));
        assert!(is_legal(&t, AgentState::Think,   AgentState::Act));
        assert!(is_legal(&t, AgentState::Act,     AgentState::Reflect));
        assert!(is_legal(&t, AgentState::Reflect, AgentState::Observe));
        assert!(is_legal(&t, AgentState::Reflect, AgentState::Complete));

        // Phases cannot be skipped or reordered.
        assert!(!is_legal(&t, AgentState::Idle,    AgentState::Think));
        assert!(!is_legal(&t, AgentState::Observe, AgentState::Act));
        assert!(!is_legal(&t, AgentState::Act,     AgentState::Observe));
        assert!(!is_legal(&t, AgentState::Reflect, AgentState::Reflect));
        // Idle is never revisited after the first transition out of it.
        assert!(!is_legal(&t, AgentState::Reflect, AgentState::Idle));
    }
}
