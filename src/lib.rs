//! Resolution Voting Library
//!
//! This crate provides the dispute-arbitration voting engine of a
//! ride-hailing platform: arbitrator registration, dispute lifecycle
//! management, and plurality-vote resolution, modeled on the on-chain
//! resolution-voting contract surface.

pub mod arbitration;
pub mod config;
pub mod error;

pub use arbitration::{
    ArbitrationCourt, Arbitrator, ArbitratorStatus, CourtStats, Dispute, Ruling,
};
pub use config::{
    ArbitrationConfig, DEFAULT_MAX_ARBITRATORS, DEFAULT_MIN_STAKE, DEFAULT_MIN_VOTES,
    DEFAULT_REPUTATION_THRESHOLD, DEFAULT_VOTING_PERIOD,
};
pub use error::{Error, Result};
