//! Configuration types for genesis generation
//!
//! Values come from (lowest to highest precedence): presets, an optional TOML
//! file, `QC_GENESIS_*` environment variables, and CLI flags. The resulting
//! structs are passed explicitly into every pipeline step.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared_types::TransactionType;
use tracing::info;

use crate::error::{GenesisError, Result};

/// Unix time of the network epoch (2017-03-21T13:00:00Z).
pub const NETWORK_EPOCH_UNIX: i64 = 1_490_101_200;

/// Upper bound on founding delegates.
pub const MAX_FORGERS: u32 = 1024;

/// Network identity and fee rules
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct NetworkConfig {
    /// Network name (mainnet, devnet, testnet, or custom)
    pub name: String,

    /// Address version byte
    pub pub_key_hash: u8,

    /// Network epoch; transaction timestamps count seconds from here
    pub epoch: DateTime<Utc>,

    /// Fee rules used for provisional draft fees
    #[serde(default)]
    pub fees: FeeConfig,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self::devnet()
    }
}

impl NetworkConfig {
    fn preset(name: &str, pub_key_hash: u8) -> Self {
        Self {
            name: name.to_string(),
            pub_key_hash,
            epoch: DateTime::<Utc>::from_timestamp(NETWORK_EPOCH_UNIX, 0).unwrap_or_default(),
            fees: FeeConfig::default(),
        }
    }

    /// Mainnet preset.
    pub fn mainnet() -> Self {
        Self::preset("mainnet", 0x17)
    }

    /// Devnet preset.
    pub fn devnet() -> Self {
        Self::preset("devnet", 0x1e)
    }

    /// Testnet preset.
    pub fn testnet() -> Self {
        Self::preset("testnet", 0x17)
    }

    /// Look up a preset by name.
    pub fn by_name(name: &str) -> Result<Self> {
        match name {
            "mainnet" => Ok(Self::mainnet()),
            "devnet" => Ok(Self::devnet()),
            "testnet" => Ok(Self::testnet()),
            other => Err(GenesisError::InvalidConfig(format!(
                "unknown network preset '{other}'"
            ))),
        }
    }

    /// Seconds elapsed since the network epoch, clamped into `u32`.
    pub fn epoch_seconds(&self, now: DateTime<Utc>) -> u32 {
        let elapsed = (now - self.epoch).num_seconds();
        u32::try_from(elapsed.max(0)).unwrap_or(u32::MAX)
    }
}

/// Fee rules.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct FeeConfig {
    /// Fixed fee per transaction type
    #[serde(default)]
    pub static_fees: StaticFees,

    /// Size-based fee rules
    #[serde(default)]
    pub dynamic: DynamicFeeConfig,
}

impl FeeConfig {
    /// Fee a draft of `tx_type` with `unsigned_len` body bytes would pay.
    pub fn fee_for(&self, tx_type: TransactionType, unsigned_len: usize) -> u64 {
        if !self.dynamic.enabled {
            return self.static_fees.for_type(tx_type);
        }

        let addon = self.dynamic.addon_bytes.for_type(tx_type);
        let size = addon.saturating_add(unsigned_len as u64);
        self.dynamic.min_fee.saturating_mul(size)
    }
}

/// Fixed fees in minor units.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct StaticFees {
    /// Transfer fee
    pub transfer: u64,
    /// Delegate registration fee
    pub delegate_registration: u64,
}

impl Default for StaticFees {
    fn default() -> Self {
        Self {
            transfer: 10_000_000,
            delegate_registration: 2_500_000_000,
        }
    }
}

impl StaticFees {
    fn for_type(&self, tx_type: TransactionType) -> u64 {
        match tx_type {
            TransactionType::Transfer => self.transfer,
            TransactionType::DelegateRegistration => self.delegate_registration,
        }
    }
}

/// Size-based fee configuration.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct DynamicFeeConfig {
    /// Use size-based fees instead of static ones
    pub enabled: bool,

    /// Fee per byte in minor units
    pub min_fee: u64,

    /// Bytes added to the real size per transaction type
    pub addon_bytes: AddonBytes,
}

impl Default for DynamicFeeConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            min_fee: 3_000,
            addon_bytes: AddonBytes::default(),
        }
    }
}

/// Per-type addon bytes.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct AddonBytes {
    /// Transfer addon
    pub transfer: u64,
    /// Delegate registration addon
    pub delegate_registration: u64,
}

impl Default for AddonBytes {
    fn default() -> Self {
        Self {
            transfer: 100,
            delegate_registration: 400,
        }
    }
}

impl AddonBytes {
    fn for_type(&self, tx_type: TransactionType) -> u64 {
        match tx_type {
            TransactionType::Transfer => self.transfer,
            TransactionType::DelegateRegistration => self.delegate_registration,
        }
    }
}

/// Genesis parameters
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct GenesisParams {
    /// Number of founding delegates
    pub forgers: u32,

    /// Premine in minor units, as a decimal string
    pub premine: String,

    /// Genesis block timestamp (seconds since epoch, normally 0)
    #[serde(default)]
    pub timestamp: u32,
}

impl Default for GenesisParams {
    fn default() -> Self {
        Self {
            forgers: 51,
            premine: "12500000000000000".to_string(),
            timestamp: 0,
        }
    }
}

impl GenesisParams {
    /// Premine as a `u64`.
    pub fn premine_amount(&self) -> Result<u64> {
        self.premine.trim().parse::<u64>().map_err(|e| {
            GenesisError::InvariantViolation(format!(
                "premine '{}' is not an unsigned 64-bit amount: {e}",
                self.premine
            ))
        })
    }

    /// Validate before any entropy is consumed.
    pub fn validate(&self) -> Result<()> {
        self.premine_amount()?;

        if self.forgers > MAX_FORGERS {
            return Err(GenesisError::InvariantViolation(format!(
                "forger count {} exceeds maximum {MAX_FORGERS}",
                self.forgers
            )));
        }

        Ok(())
    }
}

/// Top-level tool configuration
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct GenesisToolConfig {
    /// Network the genesis block is for
    #[serde(default)]
    pub network: NetworkConfig,

    /// Genesis parameters
    #[serde(default)]
    pub genesis: GenesisParams,
}

impl GenesisToolConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        toml::from_str(raw).map_err(|e| GenesisError::InvalidConfig(e.to_string()))
    }

    /// Load from an optional TOML file, falling back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let raw = std::fs::read_to_string(path).map_err(|e| {
            GenesisError::InvalidConfig(format!("cannot read {}: {e}", path.display()))
        })?;
        let config = Self::from_toml_str(&raw)?;
        info!(
            path = %path.display(),
            network = %config.network.name,
            "Loaded genesis configuration"
        );
        Ok(config)
    }

    /// Apply `QC_GENESIS_*` overrides from the environment.
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(name) = lookup("QC_GENESIS_NETWORK") {
            self.network = NetworkConfig::by_name(&name)?;
        }

        if let Some(forgers) = lookup("QC_GENESIS_FORGERS") {
            self.genesis.forgers = forgers.trim().parse().map_err(|_| {
                GenesisError::InvalidConfig(format!(
                    "QC_GENESIS_FORGERS must be a non-negative integer, got '{forgers}'"
                ))
            })?;
        }

        if let Some(premine) = lookup("QC_GENESIS_PREMINE") {
            self.genesis.premine = premine;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_presets() {
        assert_eq!(NetworkConfig::mainnet().pub_key_hash, 0x17);
        assert_eq!(NetworkConfig::devnet().pub_key_hash, 0x1e);
        assert_eq!(NetworkConfig::by_name("testnet").unwrap().name, "testnet");
        assert!(NetworkConfig::by_name("moonnet").is_err());
        assert_eq!(NetworkConfig::devnet().epoch.timestamp(), NETWORK_EPOCH_UNIX);
    }

    #[test]
    fn test_epoch_seconds() {
        let network = NetworkConfig::devnet();
        let later = network.epoch + chrono::Duration::seconds(90);
        let earlier = network.epoch - chrono::Duration::seconds(90);

        assert_eq!(network.epoch_seconds(later), 90);
        assert_eq!(network.epoch_seconds(earlier), 0);
    }

    #[test]
    fn test_static_and_dynamic_fees() {
        let mut fees = FeeConfig::default();
        assert_eq!(fees.fee_for(TransactionType::Transfer, 200), 10_000_000);

        fees.dynamic.enabled = true;
        assert_eq!(
            fees.fee_for(TransactionType::DelegateRegistration, 140),
            3_000 * (400 + 140)
        );
    }

    #[test]
    fn test_premine_validation() {
        let mut params = GenesisParams::default();
        assert_eq!(params.premine_amount().unwrap(), 12_500_000_000_000_000);

        params.premine = "18446744073709551616".to_string(); // u64::MAX + 1
        assert!(matches!(
            params.validate(),
            Err(GenesisError::InvariantViolation(_))
        ));

        params.premine = "-5".to_string();
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_forger_bound() {
        let params = GenesisParams {
            forgers: MAX_FORGERS + 1,
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(GenesisError::InvariantViolation(_))
        ));
    }

    #[test]
    fn test_toml_config() {
        let raw = r#"
            [network]
            name = "localnet"
            pub_key_hash = 63
            epoch = "2020-01-01T00:00:00Z"

            [network.fees.dynamic]
            enabled = true
            min_fee = 1000
            addon_bytes = { transfer = 100, delegate_registration = 400 }

            [genesis]
            forgers = 3
            premine = "1000"
        "#;

        let config = GenesisToolConfig::from_toml_str(raw).unwrap();
        assert_eq!(config.network.name, "localnet");
        assert_eq!(config.network.pub_key_hash, 63);
        assert!(config.network.fees.dynamic.enabled);
        assert_eq!(config.network.fees.static_fees, StaticFees::default());
        assert_eq!(config.genesis.forgers, 3);
        assert_eq!(config.genesis.timestamp, 0);
    }

    #[test]
    fn test_negative_forgers_rejected_by_parser() {
        let raw = "[genesis]\nforgers = -1\npremine = \"1\"\n";
        assert!(GenesisToolConfig::from_toml_str(raw).is_err());
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            ("QC_GENESIS_NETWORK", "mainnet"),
            ("QC_GENESIS_FORGERS", "7"),
            ("QC_GENESIS_PREMINE", "500"),
        ]
        .into_iter()
        .collect();

        let mut config = GenesisToolConfig::default();
        config
            .apply_overrides(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.network, NetworkConfig::mainnet());
        assert_eq!(config.genesis.forgers, 7);
        assert_eq!(config.genesis.premine, "500");
    }

    #[test]
    fn test_unparseable_forger_override_rejected() {
        for raw in ["-1", "many", ""] {
            let mut config = GenesisToolConfig::default();
            let result = config
                .apply_overrides(|key| (key == "QC_GENESIS_FORGERS").then(|| raw.to_string()));

            assert!(
                matches!(result, Err(GenesisError::InvalidConfig(_))),
                "'{raw}' should be rejected"
            );
            assert_eq!(config.genesis.forgers, GenesisParams::default().forgers);
        }
    }
}
