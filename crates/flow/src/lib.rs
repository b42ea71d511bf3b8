//! Form/output flow controller: form state, the generation loader and the
//! review/feedback state machine around a campaign backend.

pub mod controller;
pub mod form;
pub mod loader;
pub mod state_machine;

pub use controller::{FlowController, FlowError};
pub use form::CampaignForm;
pub use loader::GenerationLoader;
pub use state_machine::{FeedbackState, FeedbackStateMachine, TransitionError};
