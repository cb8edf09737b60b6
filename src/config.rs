//! Arbitration court configuration management.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};

/// Default minimum stake to register as an arbitrator (micro-STX).
pub const DEFAULT_MIN_STAKE: u64 = 1000;

/// Default reputation threshold for arbitrator registration.
pub const DEFAULT_REPUTATION_THRESHOLD: u64 = 50;

/// Default number of votes required to resolve a dispute.
pub const DEFAULT_MIN_VOTES: usize = 3;

/// Default panel cap: maximum votes accepted on a single dispute.
pub const DEFAULT_MAX_ARBITRATORS: usize = 7;

/// Default voting window length in blocks (~2 days at one block per minute).
pub const DEFAULT_VOTING_PERIOD: u64 = 2880;

/// Tunable thresholds for an arbitration court.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArbitrationConfig {
    /// Minimum stake required to register as an arbitrator.
    pub min_stake: u64,

    /// Minimum reputation score required to register.
    pub reputation_threshold: u64,

    /// Votes required before a dispute can be resolved.
    pub min_votes: usize,

    /// Maximum votes accepted on a single dispute.
    pub max_arbitrators: usize,

    /// Length of a dispute's voting window, in blocks.
    pub voting_period: u64,

    /// Blocks between dispute creation and the start of voting.
    #[serde(default)]
    pub evidence_period: u64,
}

impl Default for ArbitrationConfig {
    fn default() -> Self {
        Self {
            min_stake: DEFAULT_MIN_STAKE,
            reputation_threshold: DEFAULT_REPUTATION_THRESHOLD,
            min_votes: DEFAULT_MIN_VOTES,
            max_arbitrators: DEFAULT_MAX_ARBITRATORS,
            voting_period: DEFAULT_VOTING_PERIOD,
            evidence_period: 0,
        }
    }
}

impl ArbitrationConfig {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents).map_err(|e| Error::Config(e.to_string()))
    }

    /// Save configuration to a TOML file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Set the minimum registration stake.
    pub fn with_min_stake(mut self, stake: u64) -> Self {
        self.min_stake = stake;
        self
    }

    /// Set the reputation threshold.
    pub fn with_reputation_threshold(mut self, threshold: u64) -> Self {
        self.reputation_threshold = threshold;
        self
    }

    /// Set the number of votes required for resolution.
    pub fn with_min_votes(mut self, votes: usize) -> Self {
        self.min_votes = votes;
        self
    }

    /// Set the per-dispute panel cap.
    pub fn with_max_arbitrators(mut self, count: usize) -> Self {
        self.max_arbitrators = count;
        self
    }

    /// Set the voting window length in blocks.
    pub fn with_voting_period(mut self, blocks: u64) -> Self {
        self.voting_period = blocks;
        self
    }

    /// Set the evidence period in blocks.
    pub fn with_evidence_period(mut self, blocks: u64) -> Self {
        self.evidence_period = blocks;
        self
    }

    /// Check that the configuration is internally consistent.
    pub fn validate(&self) -> Result<()> {
        if self.min_votes == 0 {
            return Err(Error::Config("min_votes must be at least 1".to_string()));
        }
        if self.min_votes > self.max_arbitrators {
            return Err(Error::Config(format!(
                "min_votes ({}) cannot exceed max_arbitrators ({})",
                self.min_votes, self.max_arbitrators
            )));
        }
        if self.voting_period == 0 {
            return Err(Error::Config("voting_period must be nonzero".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config_matches_contract_constants() {
        let config = ArbitrationConfig::default();

        assert_eq!(config.min_stake, 1000);
        assert_eq!(config.reputation_threshold, 50);
        assert_eq!(config.min_votes, 3);
        assert_eq!(config.max_arbitrators, 7);
        assert_eq!(config.voting_period, 2880);
        assert_eq!(config.evidence_period, 0);
    }

    #[test]
    fn test_config_builder_pattern() {
        let config = ArbitrationConfig::default()
            .with_min_stake(5000)
            .with_reputation_threshold(75)
            .with_min_votes(5)
            .with_voting_period(100);

        assert_eq!(config.min_stake, 5000);
        assert_eq!(config.reputation_threshold, 75);
        assert_eq!(config.min_votes, 5);
        assert_eq!(config.voting_period, 100);
    }

    #[test]
    fn test_default_config_validates() {
        assert!(ArbitrationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_min_votes() {
        let config = ArbitrationConfig::default().with_min_votes(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_min_votes_above_panel_cap() {
        let config = ArbitrationConfig::default()
            .with_min_votes(8)
            .with_max_arbitrators(7);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_voting_period() {
        let config = ArbitrationConfig::default().with_voting_period(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_config_from_toml() {
        // Arrange
        let toml_content = r#"
min_stake = 2000
reputation_threshold = 60
min_votes = 3
max_arbitrators = 5
voting_period = 1440
evidence_period = 144
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();

        // Act
        let config = ArbitrationConfig::load(temp_file.path()).unwrap();

        // Assert
        assert_eq!(config.min_stake, 2000);
        assert_eq!(config.reputation_threshold, 60);
        assert_eq!(config.max_arbitrators, 5);
        assert_eq!(config.voting_period, 1440);
        assert_eq!(config.evidence_period, 144);
    }

    #[test]
    fn test_load_config_defaults_evidence_period() {
        let toml_content = r#"
min_stake = 1000
reputation_threshold = 50
min_votes = 3
max_arbitrators = 7
voting_period = 2880
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = ArbitrationConfig::load(temp_file.path()).unwrap();
        assert_eq!(config.evidence_period, 0);
    }

    #[test]
    fn test_save_and_reload_round_trips() {
        let config = ArbitrationConfig::default()
            .with_min_stake(3000)
            .with_evidence_period(10);

        let temp_file = NamedTempFile::new().unwrap();
        config.save(temp_file.path()).unwrap();

        let loaded = ArbitrationConfig::load(temp_file.path()).unwrap();
        assert_eq!(loaded.min_stake, 3000);
        assert_eq!(loaded.reputation_threshold, config.reputation_threshold);
        assert_eq!(loaded.evidence_period, 10);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let result = ArbitrationConfig::load("/nonexistent/arbitration.toml");
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
