//! Dispute arbitration court for ride-hailing resolution voting.
//!
//! This module implements the contract surface of the resolution-voting
//! scheme as a deterministic in-memory engine:
//!
//! - **Arbitrator registry**: stake- and reputation-gated registration
//! - **Dispute lifecycle**: creation, per-arbitrator voting, plurality resolution
//! - **Voting windows**: block-height based voting periods with an optional
//!   evidence delay before voting opens
//! - **Slashing**: admin-gated removal of misbehaving arbitrators
//!
//! Every operation is atomic: it either fully applies its effect or rejects
//! with one of the contract error codes (see [`crate::error::Error::code`])
//! and leaves state untouched.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use resolution_voting::{ArbitrationConfig, ArbitrationCourt, Ruling};
//!
//! let court = ArbitrationCourt::new(ArbitrationConfig::default(), deployer)?;
//!
//! court.register_arbitrator(arbitrator1, 1000, 50)?;
//! court.register_arbitrator(arbitrator2, 1000, 50)?;
//! court.register_arbitrator(arbitrator3, 1000, 50)?;
//!
//! let id = court.create_dispute(driver, passenger, evidence_hash, 1000)?;
//! court.cast_vote(arbitrator1, id, Ruling::FavorDriver.as_u64())?;
//! court.cast_vote(arbitrator2, id, Ruling::FavorDriver.as_u64())?;
//! court.cast_vote(arbitrator3, id, Ruling::FavorPassenger.as_u64())?;
//!
//! let outcome = court.resolve_dispute(id)?;
//! assert_eq!(outcome, Ruling::FavorDriver);
//! ```

use serde::{Deserialize, Serialize};
use std::cmp::Ordering as CmpOrdering;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use crate::config::ArbitrationConfig;
use crate::error::{Error, Result};

// ========== Rulings ==========

/// Ruling options for a dispute, sharing the contract's numeric space.
///
/// The same three categories are used for cast votes and for resolved
/// outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ruling {
    /// Favor the driver (value 1).
    FavorDriver = 1,
    /// Favor the passenger (value 2).
    FavorPassenger = 2,
    /// Tie / inconclusive (value 3).
    Tie = 3,
}

impl TryFrom<u64> for Ruling {
    type Error = Error;

    fn try_from(value: u64) -> Result<Self> {
        match value {
            1 => Ok(Ruling::FavorDriver),
            2 => Ok(Ruling::FavorPassenger),
            3 => Ok(Ruling::Tie),
            other => Err(Error::InvalidVote(other)),
        }
    }
}

impl Ruling {
    /// Get human-readable ruling name.
    pub fn name(&self) -> &'static str {
        match self {
            Ruling::FavorDriver => "Favor Driver",
            Ruling::FavorPassenger => "Favor Passenger",
            Ruling::Tie => "Tie",
        }
    }

    /// Numeric value of this ruling on the contract wire.
    pub fn as_u64(&self) -> u64 {
        *self as u64
    }
}

// ========== Arbitrators ==========

/// Arbitrator status in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArbitratorStatus {
    /// Arbitrator may vote on disputes.
    Active,
    /// Arbitrator has been slashed and may no longer vote.
    Slashed,
}

impl ArbitratorStatus {
    /// Get human-readable status name.
    pub fn name(&self) -> &'static str {
        match self {
            ArbitratorStatus::Active => "Active",
            ArbitratorStatus::Slashed => "Slashed",
        }
    }

    /// Check if the arbitrator may vote.
    pub fn is_active(&self) -> bool {
        matches!(self, ArbitratorStatus::Active)
    }
}

/// A registered arbitrator.
///
/// Stake and reputation are fixed at registration; only the status can
/// change afterwards, via slashing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Arbitrator {
    /// Principal identity, unique in the registry.
    pub principal: String,
    /// Staked amount (micro-STX).
    pub stake: u64,
    /// Reputation score at registration.
    pub reputation: u64,
    /// Current status.
    pub status: ArbitratorStatus,
    /// Block height at registration.
    pub registered_at: u64,
}

impl Arbitrator {
    /// Create a new active arbitrator.
    pub fn new(principal: impl Into<String>, stake: u64, reputation: u64, height: u64) -> Self {
        Self {
            principal: principal.into(),
            stake,
            reputation,
            status: ArbitratorStatus::Active,
            registered_at: height,
        }
    }
}

// ========== Disputes ==========

/// A fare dispute between a driver and a passenger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dispute {
    /// Dispute id, unique and strictly increasing from 1.
    pub id: u64,
    /// Driver party.
    pub driver: String,
    /// Passenger party.
    pub passenger: String,
    /// Opaque hash of the submitted evidence bundle.
    pub evidence_hash: Vec<u8>,
    /// Arbitration fee escrowed at creation.
    pub fee: u64,
    /// Votes cast so far, one entry per arbitrator.
    pub votes: HashMap<String, Ruling>,
    /// Whether the dispute has been resolved.
    pub resolved: bool,
    /// Final outcome, set exactly once at resolution.
    pub outcome: Option<Ruling>,
    /// Block height the dispute was opened at.
    pub opened_at: u64,
    /// First block height at which votes are accepted.
    pub voting_opens_at: u64,
    /// Last block height at which votes are accepted.
    pub voting_closes_at: u64,
}

impl Dispute {
    /// Number of votes cast so far.
    pub fn vote_count(&self) -> usize {
        self.votes.len()
    }

    /// Check if an arbitrator has voted on this dispute.
    pub fn has_voted(&self, principal: &str) -> bool {
        self.votes.contains_key(principal)
    }

    /// Check if a principal is a party to this dispute.
    pub fn involves(&self, principal: &str) -> bool {
        self.driver == principal || self.passenger == principal
    }

    /// Plurality outcome over the cast votes.
    ///
    /// Tie votes never count toward a win: strictly more driver-favor votes
    /// resolve for the driver, strictly more passenger-favor votes for the
    /// passenger, and equal substantive counts resolve to a tie.
    pub fn plurality(&self) -> Ruling {
        let mut driver = 0usize;
        let mut passenger = 0usize;
        for ruling in self.votes.values() {
            match ruling {
                Ruling::FavorDriver => driver += 1,
                Ruling::FavorPassenger => passenger += 1,
                Ruling::Tie => {}
            }
        }

        match driver.cmp(&passenger) {
            CmpOrdering::Greater => Ruling::FavorDriver,
            CmpOrdering::Less => Ruling::FavorPassenger,
            CmpOrdering::Equal => Ruling::Tie,
        }
    }
}

// ========== Statistics ==========

/// Statistics for court operations.
#[derive(Debug, Default)]
pub struct CourtStats {
    /// Arbitrators registered.
    pub arbitrators_registered: AtomicU64,
    /// Arbitrators slashed.
    pub arbitrators_slashed: AtomicU64,
    /// Disputes created.
    pub disputes_created: AtomicU64,
    /// Votes cast.
    pub votes_cast: AtomicU64,
    /// Disputes resolved.
    pub disputes_resolved: AtomicU64,
}

impl CourtStats {
    /// Record an arbitrator registration.
    pub fn record_registration(&self) {
        self.arbitrators_registered.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a slashing.
    pub fn record_slash(&self) {
        self.arbitrators_slashed.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a dispute creation.
    pub fn record_dispute_created(&self) {
        self.disputes_created.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a cast vote.
    pub fn record_vote(&self) {
        self.votes_cast.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a dispute resolution.
    pub fn record_resolution(&self) {
        self.disputes_resolved.fetch_add(1, Ordering::Relaxed);
    }
}

// ========== Arbitration Court ==========

/// In-memory arbitration court implementing the resolution-voting contract
/// surface.
///
/// State is held behind `RwLock`s so the court can be shared across threads,
/// but every operation is synchronous and atomic; there is no suspension
/// point between a precondition check and its effect.
pub struct ArbitrationCourt {
    config: ArbitrationConfig,
    admin: String,
    height: AtomicU64,
    next_dispute_id: AtomicU64,
    arbitrators: RwLock<HashMap<String, Arbitrator>>,
    disputes: RwLock<HashMap<u64, Dispute>>,
    stats: Arc<CourtStats>,
}

impl ArbitrationCourt {
    /// Create a new court with the given configuration and admin principal.
    pub fn new(config: ArbitrationConfig, admin: impl Into<String>) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            config,
            admin: admin.into(),
            height: AtomicU64::new(0),
            next_dispute_id: AtomicU64::new(1),
            arbitrators: RwLock::new(HashMap::new()),
            disputes: RwLock::new(HashMap::new()),
            stats: Arc::new(CourtStats::default()),
        })
    }

    /// Get the court configuration.
    pub fn config(&self) -> &ArbitrationConfig {
        &self.config
    }

    /// Get the admin principal.
    pub fn admin(&self) -> &str {
        &self.admin
    }

    /// Get court statistics.
    pub fn stats(&self) -> &CourtStats {
        &self.stats
    }

    /// Current logical block height.
    pub fn height(&self) -> u64 {
        self.height.load(Ordering::Relaxed)
    }

    /// Advance the logical block height, returning the new height.
    pub fn advance_blocks(&self, blocks: u64) -> u64 {
        self.height.fetch_add(blocks, Ordering::Relaxed) + blocks
    }

    /// Register an arbitrator.
    ///
    /// Rejects a duplicate principal, a stake below `min_stake`, or a
    /// reputation below `reputation_threshold`, in that order; a rejected
    /// registration never mutates the registry.
    pub fn register_arbitrator(
        &self,
        principal: impl Into<String>,
        stake: u64,
        reputation: u64,
    ) -> Result<()> {
        let principal = principal.into();

        let mut arbitrators = self
            .arbitrators
            .write()
            .map_err(|e| Error::Internal(format!("Lock error: {}", e)))?;

        if arbitrators.contains_key(&principal) {
            return Err(Error::AlreadyRegistered(principal));
        }
        if stake < self.config.min_stake {
            return Err(Error::InvalidStake {
                stake,
                minimum: self.config.min_stake,
            });
        }
        if reputation < self.config.reputation_threshold {
            return Err(Error::InvalidReputation {
                reputation,
                threshold: self.config.reputation_threshold,
            });
        }

        let height = self.height();
        arbitrators.insert(
            principal.clone(),
            Arbitrator::new(principal.clone(), stake, reputation, height),
        );
        self.stats.record_registration();

        tracing::info!(arbitrator = %principal, stake, reputation, "Registered arbitrator");

        Ok(())
    }

    /// Create a dispute between a driver and a passenger.
    ///
    /// A zero fee is rejected without allocating an id. On success returns
    /// the new dispute id; ids are unique and strictly increasing from 1.
    pub fn create_dispute(
        &self,
        driver: impl Into<String>,
        passenger: impl Into<String>,
        evidence_hash: Vec<u8>,
        fee: u64,
    ) -> Result<u64> {
        if fee == 0 {
            return Err(Error::InvalidFee(fee));
        }

        let height = self.height();
        let voting_opens_at = height + self.config.evidence_period;
        let voting_closes_at = voting_opens_at + self.config.voting_period;

        let id = self.next_dispute_id.fetch_add(1, Ordering::Relaxed);
        let dispute = Dispute {
            id,
            driver: driver.into(),
            passenger: passenger.into(),
            evidence_hash,
            fee,
            votes: HashMap::new(),
            resolved: false,
            outcome: None,
            opened_at: height,
            voting_opens_at,
            voting_closes_at,
        };

        let mut disputes = self
            .disputes
            .write()
            .map_err(|e| Error::Internal(format!("Lock error: {}", e)))?;
        disputes.insert(id, dispute);
        self.stats.record_dispute_created();

        tracing::info!(dispute_id = id, fee, voting_closes_at, "Created dispute");

        Ok(id)
    }

    /// Cast a vote on a dispute.
    ///
    /// Preconditions, checked in order: the caller is a registered, active
    /// arbitrator; the dispute exists; it is not resolved; its voting window
    /// has opened; the window has not closed and the panel is not full; the
    /// caller has not voted on it before; the vote value is a recognized
    /// ruling. Each failure maps to a distinct error code and records
    /// nothing.
    pub fn cast_vote(&self, caller: &str, dispute_id: u64, vote: u64) -> Result<()> {
        {
            let arbitrators = self
                .arbitrators
                .read()
                .map_err(|e| Error::Internal(format!("Lock error: {}", e)))?;

            let active = arbitrators
                .get(caller)
                .map(|a| a.status.is_active())
                .unwrap_or(false);
            if !active {
                return Err(Error::NotArbitrator(caller.to_string()));
            }
        }

        let height = self.height();
        let mut disputes = self
            .disputes
            .write()
            .map_err(|e| Error::Internal(format!("Lock error: {}", e)))?;

        let dispute = disputes
            .get_mut(&dispute_id)
            .ok_or(Error::DisputeNotFound(dispute_id))?;

        if dispute.resolved {
            return Err(Error::DisputeResolved(dispute_id));
        }
        if height < dispute.voting_opens_at {
            return Err(Error::VotingNotStarted(dispute_id));
        }
        if height > dispute.voting_closes_at || dispute.vote_count() >= self.config.max_arbitrators
        {
            return Err(Error::VotingClosed(dispute_id));
        }
        if dispute.has_voted(caller) {
            return Err(Error::AlreadyVoted {
                caller: caller.to_string(),
                dispute_id,
            });
        }
        let ruling = Ruling::try_from(vote)?;

        dispute.votes.insert(caller.to_string(), ruling);
        self.stats.record_vote();

        tracing::debug!(arbitrator = %caller, dispute_id, ruling = ruling.name(), "Vote cast");

        Ok(())
    }

    /// Resolve a dispute by plurality of its cast votes.
    ///
    /// Fails if the dispute does not exist, was already resolved, or has
    /// fewer than `min_votes` votes. On success the dispute is marked
    /// resolved, the outcome is recorded, and the outcome is returned; a
    /// second resolution attempt is rejected.
    pub fn resolve_dispute(&self, dispute_id: u64) -> Result<Ruling> {
        let mut disputes = self
            .disputes
            .write()
            .map_err(|e| Error::Internal(format!("Lock error: {}", e)))?;

        let dispute = disputes
            .get_mut(&dispute_id)
            .ok_or(Error::DisputeNotFound(dispute_id))?;

        if dispute.resolved {
            return Err(Error::DisputeResolved(dispute_id));
        }
        if dispute.vote_count() < self.config.min_votes {
            return Err(Error::InsufficientVotes {
                dispute_id,
                votes: dispute.vote_count(),
                required: self.config.min_votes,
            });
        }

        let outcome = dispute.plurality();
        dispute.resolved = true;
        dispute.outcome = Some(outcome);
        self.stats.record_resolution();

        tracing::info!(dispute_id, outcome = outcome.name(), "Resolved dispute");

        Ok(outcome)
    }

    /// Slash an arbitrator, removing their right to vote.
    ///
    /// Only the admin may slash; the target must be a registered, active
    /// arbitrator.
    pub fn slash_arbitrator(&self, caller: &str, principal: &str) -> Result<()> {
        if caller != self.admin {
            return Err(Error::NotAuthorized(caller.to_string()));
        }

        let mut arbitrators = self
            .arbitrators
            .write()
            .map_err(|e| Error::Internal(format!("Lock error: {}", e)))?;

        let arbitrator = arbitrators
            .get_mut(principal)
            .ok_or_else(|| Error::NotArbitrator(principal.to_string()))?;

        if !arbitrator.status.is_active() {
            return Err(Error::NotArbitrator(principal.to_string()));
        }

        arbitrator.status = ArbitratorStatus::Slashed;
        self.stats.record_slash();

        tracing::warn!(arbitrator = %principal, "Slashed arbitrator");

        Ok(())
    }

    /// Get an arbitrator record by principal.
    pub fn get_arbitrator(&self, principal: &str) -> Result<Arbitrator> {
        let arbitrators = self
            .arbitrators
            .read()
            .map_err(|e| Error::Internal(format!("Lock error: {}", e)))?;

        arbitrators
            .get(principal)
            .cloned()
            .ok_or_else(|| Error::NotArbitrator(principal.to_string()))
    }

    /// Get a dispute record by id.
    pub fn get_dispute(&self, dispute_id: u64) -> Result<Dispute> {
        let disputes = self
            .disputes
            .read()
            .map_err(|e| Error::Internal(format!("Lock error: {}", e)))?;

        disputes
            .get(&dispute_id)
            .cloned()
            .ok_or(Error::DisputeNotFound(dispute_id))
    }

    /// Number of registered arbitrators, slashed included.
    pub fn arbitrator_count(&self) -> Result<usize> {
        let arbitrators = self
            .arbitrators
            .read()
            .map_err(|e| Error::Internal(format!("Lock error: {}", e)))?;

        Ok(arbitrators.len())
    }

    /// Get all unresolved disputes.
    pub fn open_disputes(&self) -> Result<Vec<Dispute>> {
        let disputes = self
            .disputes
            .read()
            .map_err(|e| Error::Internal(format!("Lock error: {}", e)))?;

        Ok(disputes.values().filter(|d| !d.resolved).cloned().collect())
    }

    /// Get disputes where a principal is the driver or the passenger.
    pub fn disputes_for_party(&self, principal: &str) -> Result<Vec<Dispute>> {
        let disputes = self
            .disputes
            .read()
            .map_err(|e| Error::Internal(format!("Lock error: {}", e)))?;

        Ok(disputes
            .values()
            .filter(|d| d.involves(principal))
            .cloned()
            .collect())
    }
}

static_assertions::assert_impl_all!(ArbitrationCourt: Send, Sync);
