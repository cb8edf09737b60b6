//! Error types for the resolution voting engine.
//!
//! Contract-level rejections map onto the numeric error codes of the
//! on-chain contract via [`Error::code`]. Ambient failures (configuration,
//! IO, engine internals) carry no code.

use thiserror::Error;

/// Result type alias using the resolution voting Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Resolution voting error types.
#[derive(Error, Debug)]
pub enum Error {
    /// Caller is not allowed to perform the operation (code 100).
    #[error("Caller {0} is not authorized")]
    NotAuthorized(String),

    /// Voting window has ended or the dispute's panel is full (code 101).
    #[error("Voting is closed for dispute {0}")]
    VotingClosed(u64),

    /// Arbitrator already voted on this dispute (code 103).
    #[error("Arbitrator {caller} already voted on dispute {dispute_id}")]
    AlreadyVoted {
        /// Principal that attempted the second vote.
        caller: String,
        /// Target dispute.
        dispute_id: u64,
    },

    /// Caller is not a registered, active arbitrator (code 104).
    #[error("{0} is not an active arbitrator")]
    NotArbitrator(String),

    /// Voting window has not opened yet (code 105).
    #[error("Voting has not started for dispute {0}")]
    VotingNotStarted(u64),

    /// Vote value outside the recognized rulings (code 106).
    #[error("Invalid vote value {0}")]
    InvalidVote(u64),

    /// Dispute has already been resolved (code 107).
    #[error("Dispute {0} is already resolved")]
    DisputeResolved(u64),

    /// Not enough votes cast to resolve the dispute (code 108).
    #[error("Dispute {dispute_id} has {votes} of {required} required votes")]
    InsufficientVotes {
        /// Target dispute.
        dispute_id: u64,
        /// Votes cast so far.
        votes: usize,
        /// Votes required for resolution.
        required: usize,
    },

    /// Stake below the registration minimum (code 109).
    #[error("Stake {stake} is below the minimum {minimum}")]
    InvalidStake {
        /// Offered stake.
        stake: u64,
        /// Configured minimum.
        minimum: u64,
    },

    /// No dispute with the given id (code 113).
    #[error("Dispute {0} not found")]
    DisputeNotFound(u64),

    /// Principal is already in the arbitrator registry (code 123).
    #[error("Arbitrator {0} is already registered")]
    AlreadyRegistered(String),

    /// Reputation below the registration threshold (code 125).
    #[error("Reputation {reputation} is below the threshold {threshold}")]
    InvalidReputation {
        /// Offered reputation score.
        reputation: u64,
        /// Configured threshold.
        threshold: u64,
    },

    /// Dispute fee must be nonzero (code 128).
    #[error("Invalid dispute fee {0}")]
    InvalidFee(u64),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal error (poisoned lock or similar engine failure).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Numeric code returned by the on-chain contract for this rejection,
    /// or `None` for ambient errors with no wire representation.
    pub fn code(&self) -> Option<u32> {
        match self {
            Error::NotAuthorized(_) => Some(100),
            Error::VotingClosed(_) => Some(101),
            Error::AlreadyVoted { .. } => Some(103),
            Error::NotArbitrator(_) => Some(104),
            Error::VotingNotStarted(_) => Some(105),
            Error::InvalidVote(_) => Some(106),
            Error::DisputeResolved(_) => Some(107),
            Error::InsufficientVotes { .. } => Some(108),
            Error::InvalidStake { .. } => Some(109),
            Error::DisputeNotFound(_) => Some(113),
            Error::AlreadyRegistered(_) => Some(123),
            Error::InvalidReputation { .. } => Some(125),
            Error::InvalidFee(_) => Some(128),
            Error::Config(_) | Error::Io(_) | Error::Internal(_) => None,
        }
    }
}
