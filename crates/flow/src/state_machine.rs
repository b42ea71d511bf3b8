use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Review state of the generated content shown in the output panel.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackState {
    #[default]
    Idle,
    Generated,
    Feedback,
    Regenerating,
    Finalized,
    Failed,
}

/// A single permitted edge in the feedback flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateTransition {
    pub from: FeedbackState,
    pub to: FeedbackState,
    pub trigger: String,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid feedback transition from {from:?} to {to:?}")]
pub struct TransitionError {
    pub from: FeedbackState,
    pub to: FeedbackState,
}

/// Guards the feedback flow with a fixed transition table.
///
/// `Finalized` has no outgoing edges and `Regenerating` has no edge to
/// itself, so a second regeneration cannot start while one is in flight.
#[derive(Debug, Clone)]
pub struct FeedbackStateMachine {
    state: FeedbackState,
    transitions: Vec<StateTransition>,
}

impl FeedbackStateMachine {
    pub fn new() -> Self {
        use FeedbackState::*;

        let transitions = [
            (Idle, Generated, "content_shown"),
            (Generated, Feedback, "request_improvement"),
            (Generated, Finalized, "accept"),
            (Feedback, Generated, "cancel"),
            (Feedback, Regenerating, "submit_feedback"),
            (Regenerating, Generated, "regeneration_complete"),
            (Regenerating, Failed, "regeneration_failed"),
            (Failed, Regenerating, "retry"),
            (Failed, Feedback, "edit_feedback"),
            (Failed, Generated, "dismiss_error"),
        ]
        .into_iter()
        .map(|(from, to, trigger)| StateTransition {
            from,
            to,
            trigger: trigger.to_string(),
        })
        .collect();

        Self {
            state: FeedbackState::Idle,
            transitions,
        }
    }

    pub fn state(&self) -> FeedbackState {
        self.state
    }

    pub fn transitions(&self) -> &[StateTransition] {
        &self.transitions
    }

    pub fn can_transition(&self, from: FeedbackState, to: FeedbackState) -> bool {
        self.transitions.iter().any(|t| t.from == from && t.to == to)
    }

    pub fn transition(&mut self, to: FeedbackState) -> Result<(), TransitionError> {
        if self.can_transition(self.state, to) {
            debug!(from = ?self.state, to = ?to, "feedback state transition");
            self.state = to;
            Ok(())
        } else {
            Err(TransitionError {
                from: self.state,
                to,
            })
        }
    }

    /// Back to `Idle`, from anywhere. Used when the output panel is hidden.
    pub fn reset(&mut self) {
        self.state = FeedbackState::Idle;
    }

    pub fn is_terminal(&self) -> bool {
        self.state == FeedbackState::Finalized
    }
}

impl Default for FeedbackStateMachine {
    fn default() -> Self {
        Self::new()
    }
}
