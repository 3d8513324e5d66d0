//! Pick one representation out of the registered content types.
//!
//! The [`Engine`](crate::Engine) hands a [`Negotiator`] the raw `Accept` value and the
//! content types it can render; the negotiator answers with exactly one of them.
//! [`AcceptNegotiator`] implements RFC 7231 §5.3.2 and is registered by default:
//!
//! ```
//! # use skyzen_render::negotiation::{AcceptNegotiator, Negotiator};
//! # use skyzen_render::content_type::{JSON, XML, XHTML};
//! let negotiator = AcceptNegotiator::new(JSON);
//! let accept = "text/html, application/xhtml+xml, application/xml;q=0.9, */*;q=0.8";
//!
//! assert_eq!(negotiator.negotiate(accept, &[JSON, XML]).unwrap(), XML);
//! assert_eq!(negotiator.negotiate(accept, &[JSON, XML, XHTML]).unwrap(), XHTML);
//! ```

pub mod accept;

use core::cmp::Reverse;

use skyzen_render_core::{ContentType, NegotiationError};
use tracing::trace;

/// Name of the strategy every engine registers and uses unless told otherwise.
pub const DEFAULT_NEGOTIATOR: &str = "";

/// A content negotiation strategy.
pub trait Negotiator: Send + Sync {
    /// Choose one of `offered` for the client preferences in `accept`.
    ///
    /// # Errors
    ///
    /// Returns [`NegotiationError::NotAcceptable`] if none of `offered` is acceptable.
    fn negotiate(
        &self,
        accept: &str,
        offered: &[ContentType],
    ) -> Result<ContentType, NegotiationError>;
}

/// Quality-and-specificity negotiation over the `Accept` header.
///
/// Every candidate is scored by the most specific range that matches it. Candidates are
/// then ranked by quality, by the specificity of that range, by the range's position in
/// the header, by whether a full wildcard matched the default content type, and finally
/// by their own order in `offered`. Ranges with `q=0` exclude the candidates they match.
#[derive(Debug, Clone)]
pub struct AcceptNegotiator {
    default: ContentType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Rank {
    quality: accept::Quality,
    specificity: u8,
    position: Reverse<usize>,
    is_default: bool,
    offered: Reverse<usize>,
}

impl AcceptNegotiator {
    /// A negotiator that prefers `default` whenever a wildcard is all that matched.
    #[must_use]
    pub const fn new(default: ContentType) -> Self {
        Self { default }
    }

    fn rank(
        &self,
        ranges: &[accept::MediaRange<'_>],
        candidate: &ContentType,
        index: usize,
    ) -> Option<Rank> {
        let (specificity, range) = ranges
            .iter()
            .filter_map(|range| range.specificity(candidate).map(|score| (score, range)))
            .max_by_key(|(score, range)| (*score, Reverse(range.position())))?;

        if range.quality() == 0 {
            return None;
        }

        Some(Rank {
            quality: range.quality(),
            specificity,
            position: Reverse(range.position()),
            is_default: specificity == 0 && *candidate == self.default,
            offered: Reverse(index),
        })
    }
}

impl Negotiator for AcceptNegotiator {
    fn negotiate(
        &self,
        accept: &str,
        offered: &[ContentType],
    ) -> Result<ContentType, NegotiationError> {
        let ranges = accept::parse(accept);

        let mut best: Option<(Rank, &ContentType)> = None;
        for (index, candidate) in offered.iter().enumerate() {
            let Some(rank) = self.rank(&ranges, candidate, index) else {
                continue;
            };
            trace!(%candidate, ?rank, "candidate ranked");
            if best.as_ref().is_none_or(|(current, _)| rank > *current) {
                best = Some((rank, candidate));
            }
        }

        best.map(|(_, content_type)| content_type.clone())
            .ok_or_else(|| NegotiationError::NotAcceptable {
                accept: accept.to_owned(),
            })
    }
}

/// Always answers the same content type, provided it is offered. Ignores `Accept`.
#[derive(Debug, Clone)]
pub struct FixedNegotiator(pub ContentType);

impl Negotiator for FixedNegotiator {
    fn negotiate(
        &self,
        accept: &str,
        offered: &[ContentType],
    ) -> Result<ContentType, NegotiationError> {
        if offered.contains(&self.0) {
            Ok(self.0.clone())
        } else {
            Err(NegotiationError::NotAcceptable {
                accept: accept.to_owned(),
            })
        }
    }
}
