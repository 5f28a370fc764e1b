//! Startup admission: authorization gates, storage quota, first-run diversion
//! and the hand-off to the recording and overlay services.

pub mod config;
pub mod first_run;
pub mod host;
pub mod notice;
pub mod orchestrator;
pub mod state;

#[cfg(feature = "app")]
pub mod commands;


pub use config::{NavigationTarget, StartupConfig};
pub use first_run::FirstRunGate;
pub use host::StartupHost;
pub use notice::Notice;
pub use orchestrator::Orchestrator;
pub use state::{
    AuthorizationOutcome, AuthorizationRequest, CorrelationToken, FinishAction, PendingRequest,
    ResumeDisposition, StartupState, TerminationReason,
};
