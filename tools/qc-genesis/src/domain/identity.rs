//! Founding identities
//!
//! An identity is a BIP-39 mnemonic plus everything derived from it: the
//! secp256k1 keypair (`secret = sha256(mnemonic)`) and the network address.

use rand::rngs::OsRng;
use rand::RngCore;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use shared_crypto::{encode_address, generate_mnemonic, Secp256k1KeyPair, Secp256k1PublicKey};
use tracing::debug;

use crate::error::Result;

/// A founding wallet.
///
/// Immutable once created. Owns its secret key, so it is moved rather than
/// cloned between pipeline steps.
#[derive(Debug)]
pub struct Identity {
    address: String,
    mnemonic: String,
    keypair: Secp256k1KeyPair,
    username: Option<String>,
}

impl Identity {
    /// Rebuild the identity behind a known mnemonic.
    pub fn from_mnemonic(mnemonic: impl Into<String>, pub_key_hash: u8) -> Result<Self> {
        let mnemonic = mnemonic.into();
        let keypair = Secp256k1KeyPair::from_passphrase(&mnemonic)?;
        let address = encode_address(pub_key_hash, &keypair.public_key());
        Ok(Self {
            address,
            mnemonic,
            keypair,
            username: None,
        })
    }

    /// Tag the identity with a delegate username.
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Network address.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// BIP-39 passphrase.
    pub fn mnemonic(&self) -> &str {
        &self.mnemonic
    }

    /// Signing keypair.
    pub fn keypair(&self) -> &Secp256k1KeyPair {
        &self.keypair
    }

    /// Compressed public key.
    pub fn public_key(&self) -> Secp256k1PublicKey {
        self.keypair.public_key()
    }

    /// Delegate username, if any.
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Consume the identity, keeping only its mnemonic.
    pub fn into_mnemonic(self) -> String {
        self.mnemonic
    }
}

impl Serialize for Identity {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Identity", 4)?;
        state.serialize_field("address", &self.address)?;
        state.serialize_field("mnemonic", &self.mnemonic)?;
        state.serialize_field("publicKey", &self.public_key().to_hex())?;
        state.serialize_field("username", &self.username)?;
        state.end()
    }
}

/// Creates random identities for one network.
///
/// Generic over the entropy source: production uses [`OsRng`], test
/// harnesses pass a seeded generator to pin the output.
pub struct IdentityFactory<R: RngCore = OsRng> {
    pub_key_hash: u8,
    rng: R,
}

impl IdentityFactory<OsRng> {
    /// Factory backed by the operating system entropy source.
    pub fn from_os_entropy(pub_key_hash: u8) -> Self {
        Self::new(pub_key_hash, OsRng)
    }
}

impl<R: RngCore> IdentityFactory<R> {
    /// Factory backed by `rng`.
    pub fn new(pub_key_hash: u8, rng: R) -> Self {
        Self { pub_key_hash, rng }
    }

    /// Address version byte identities are encoded for.
    pub fn pub_key_hash(&self) -> u8 {
        self.pub_key_hash
    }

    /// Generate a fresh identity.
    ///
    /// Entropy exhaustion is fatal and not retried.
    pub fn create_identity(&mut self) -> Result<Identity> {
        let mnemonic = generate_mnemonic(&mut self.rng)?;
        let identity = Identity::from_mnemonic(mnemonic, self.pub_key_hash)?;
        debug!(address = %identity.address, "Created identity");
        Ok(identity)
    }
}
