//! Mock content-generation backend: category template buckets, feedback
//! driven rewrites, campaign synthesis and per-channel output rendering.

pub mod backend;
pub mod feedback;
pub mod generator;
pub mod outputs;
pub mod store;
pub mod synthesis;
pub mod templates;

pub use backend::{CampaignBackend, MockBackend};
pub use feedback::FeedbackEngine;
pub use generator::ContentGenerator;
pub use outputs::{ChannelOutputs, OutputTab};
pub use store::CampaignStore;
