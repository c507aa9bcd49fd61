//! Whole-package pricing
//!
//! Some goods (bottles of cream, cartons of milk) can only be bought in whole
//! packages. The cheapest way to cover a required volume is then the cheapest
//! of "enough packages of one size" across every size on offer.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::trace;

/// Errors that can occur while pricing whole packages.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BulkPricingError {
    /// No offers were provided, so no package can cover the volume.
    #[error("no offers available to cover the required volume")]
    NoOffersAvailable,

    /// A required or package volume was zero or negative.
    #[error("invalid volume: {0}")]
    InvalidVolume(Decimal),

    /// The spend for a package size does not fit in a decimal.
    #[error("whole-package spend overflowed for volume {0}")]
    Overflow(Decimal),
}

/// A price for one whole package of a given volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BulkOffer {
    /// Price of one package
    pub price: Decimal,

    /// Volume of one package, in base units
    pub package_volume: Decimal,
}

impl BulkOffer {
    /// Creates a new offer.
    pub fn new(price: Decimal, package_volume: Decimal) -> Self {
        Self {
            price,
            package_volume,
        }
    }
}

/// Calculates the minimum spend covering `required_volume` when only whole
/// packages can be bought.
///
/// Offers are deduplicated by package volume keeping the cheapest price. For
/// each distinct volume, one package is enough if it covers the requirement,
/// otherwise `ceil(required / volume)` packages are needed.
///
/// # Errors
///
/// - [`BulkPricingError::InvalidVolume`]: the required volume or a package volume
///   is zero or negative.
/// - [`BulkPricingError::NoOffersAvailable`]: `offers` is empty.
/// - [`BulkPricingError::Overflow`]: a package count times its price overflows.
pub fn cheapest_bulk_price(
    required_volume: Decimal,
    offers: &[BulkOffer],
) -> Result<Decimal, BulkPricingError> {
    if required_volume <= Decimal::ZERO {
        return Err(BulkPricingError::InvalidVolume(required_volume));
    }

    let mut cheapest_by_volume: BTreeMap<Decimal, Decimal> = BTreeMap::new();

    for offer in offers {
        if offer.package_volume <= Decimal::ZERO {
            return Err(BulkPricingError::InvalidVolume(offer.package_volume));
        }

        cheapest_by_volume
            .entry(offer.package_volume)
            .and_modify(|price| *price = (*price).min(offer.price))
            .or_insert(offer.price);
    }

    let mut cheapest: Option<Decimal> = None;

    for (volume, price) in cheapest_by_volume {
        let packages = packages_needed(required_volume, volume)?;
        let candidate = packages
            .checked_mul(price)
            .ok_or(BulkPricingError::Overflow(volume))?;

        trace!(%volume, %price, %packages, %candidate, "whole-package candidate");

        if cheapest.is_none_or(|best| candidate < best) {
            cheapest = Some(candidate);
        }
    }

    cheapest.ok_or(BulkPricingError::NoOffersAvailable)
}

/// Number of whole packages of `volume` needed to cover `required`.
fn packages_needed(required: Decimal, volume: Decimal) -> Result<Decimal, BulkPricingError> {
    if required <= volume {
        return Ok(Decimal::ONE);
    }

    required
        .checked_div(volume)
        .map(|packages| packages.ceil())
        .ok_or(BulkPricingError::InvalidVolume(volume))
}
