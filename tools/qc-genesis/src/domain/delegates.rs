//! Founding delegate set

use rand::RngCore;
use tracing::info;

use super::identity::{Identity, IdentityFactory};
use crate::error::Result;

/// Username of the delegate at zero-based `index`.
pub fn delegate_username(index: u32) -> String {
    format!("genesis_{}", u64::from(index) + 1)
}

/// Create `count` delegates named `genesis_1 ..= genesis_<count>`.
///
/// The returned order is the order their registrations are built in; the
/// block re-sorts transactions anyway.
pub fn build_delegates<R: RngCore>(
    factory: &mut IdentityFactory<R>,
    count: u32,
) -> Result<Vec<Identity>> {
    let delegates = (0..count)
        .map(|i| Ok(factory.create_identity()?.with_username(delegate_username(i))))
        .collect::<Result<Vec<_>>>()?;

    info!(count = delegates.len(), "Built founding delegates");
    Ok(delegates)
}
