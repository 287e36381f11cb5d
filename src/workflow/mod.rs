pub mod batch_ctx;
pub mod batch_flow;
pub mod dataset_flow;
pub mod invitation_flow;

pub use batch_ctx::BatchCtx;
pub use batch_flow::{BatchFlow, BatchOutcome};
pub use dataset_flow::fill_dataset;
pub use invitation_flow::{
    wait_for_completion, InvitationFlow, InvitationOutcome, PollConfig, PollReport, StatusSource,
};
