//! `Accept` header parsing.

use smallvec::SmallVec;
use skyzen_render_core::ContentType;

/// Quality in thousandths: `q=0.8` is `800`.
pub type Quality = u16;

/// The best possible quality, `q=1`.
pub const MAX_QUALITY: Quality = 1000;

/// Parsed ranges; most headers carry only a few.
pub type MediaRanges<'a> = SmallVec<[MediaRange<'a>; 8]>;

/// One `type/subtype;params;q=x` entry of an `Accept` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaRange<'a> {
    kind: &'a str,
    subtype: &'a str,
    params: SmallVec<[(&'a str, &'a str); 2]>,
    quality: Quality,
    position: usize,
}

impl<'a> MediaRange<'a> {
    /// Parse a single range. Returns `None` for malformed input.
    ///
    /// A lone `*` is accepted as `*/*`. Parameters after `q` are accept-extensions and
    /// ignored.
    #[must_use]
    pub fn parse(raw: &'a str, position: usize) -> Option<Self> {
        let mut parts = raw.split(';');
        let essence = parts.next()?.trim();
        let (kind, subtype) = match essence.split_once('/') {
            Some((kind, subtype)) => (kind.trim(), subtype.trim()),
            None if essence == "*" => ("*", "*"),
            None => return None,
        };
        if kind.is_empty() || subtype.is_empty() || (kind == "*" && subtype != "*") {
            return None;
        }

        let mut params = SmallVec::new();
        let mut quality = MAX_QUALITY;
        for param in parts.filter(|param| !param.trim().is_empty()) {
            let (key, value) = param.split_once('=')?;
            let (key, value) = (key.trim(), value.trim().trim_matches('"'));
            if key.eq_ignore_ascii_case("q") {
                quality = parse_quality(value)?;
                break;
            }
            params.push((key, value));
        }

        Some(Self {
            kind,
            subtype,
            params,
            quality,
            position,
        })
    }

    /// Quality of this range, in thousandths.
    #[must_use]
    pub const fn quality(&self) -> Quality {
        self.quality
    }

    /// Index of this range within the header.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// How specifically this range matches `candidate`, or `None` if it does not.
    ///
    /// `*/*` scores 0, `type/*` 1, `type/subtype` 2 and `type/subtype;param=x` 3. Every
    /// range parameter must also be present on the candidate.
    #[must_use]
    pub fn specificity(&self, candidate: &ContentType) -> Option<u8> {
        let essence = candidate.essence();
        let (kind, subtype) = essence.split_once('/')?;

        let score = if self.kind == "*" {
            0
        } else if !self.kind.eq_ignore_ascii_case(kind) {
            return None;
        } else if self.subtype == "*" {
            1
        } else if self.subtype.eq_ignore_ascii_case(subtype) {
            2
        } else {
            return None;
        };

        if !self
            .params
            .iter()
            .all(|(key, value)| candidate.has_param(key, value))
        {
            return None;
        }

        Some(if self.params.is_empty() { score } else { score + 1 })
    }
}

/// Parse a full `Accept` value, skipping malformed ranges.
///
/// A value made only of empty ranges (blank, `","`, `" , "`) reads as `*/*`. A value whose
/// ranges are all malformed parses to nothing.
#[must_use]
pub fn parse(header: &str) -> MediaRanges<'_> {
    let mut ranges = header.split(',').filter(|raw| !raw.trim().is_empty()).peekable();
    if ranges.peek().is_none() {
        return MediaRange::parse("*/*", 0).into_iter().collect();
    }
    ranges
        .enumerate()
        .filter_map(|(position, raw)| MediaRange::parse(raw, position))
        .collect()
}

/// Parse a `qvalue`: `0`, `1`, or up to three decimals.
fn parse_quality(value: &str) -> Option<Quality> {
    let (whole, fraction) = value.split_once('.').unwrap_or((value, ""));
    if fraction.len() > 3 || !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let mut thousandths: Quality = 0;
    for (index, digit) in fraction.bytes().enumerate() {
        let scale = [100, 10, 1][index];
        thousandths += Quality::from(digit - b'0') * scale;
    }
    match whole {
        "0" => Some(thousandths),
        "1" if thousandths == 0 => Some(MAX_QUALITY),
        _ => None,
    }
}
