//!
//! Slide index arithmetic, free of any DOM.
//!

use crate::error::Error;

///
/// What happens to an index that lands outside `[1, N]`.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OvershootPolicy {
    /// Above N resets to 1, below 1 resets to N,
    /// no matter how far out of range the index is.
    Reset,

    /// Cycle modulo N, so advancing by N + 2 lands two slides further.
    Wrap,
}

/// Bring a raw 1-based index into `[1, len]`.
/// Returns `None` when there is nothing to index into.
pub fn normalize(raw: i64, len: usize, policy: OvershootPolicy) -> Option<usize> {
    if len == 0 {
        return None;
    }

    let n = len as i64;

    let index = match policy {
        OvershootPolicy::Reset => {
            if raw > n {
                1
            } else if raw < 1 {
                n
            } else {
                raw
            }
        }
        // (raw - 1) mod n, without overflowing at i64::MIN
        OvershootPolicy::Wrap => (raw.rem_euclid(n) + n - 1) % n + 1,
    };

    Some(index as usize)
}

///
/// The outcome of one render, computed before touching any element.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderPlan {
    /// Normalized 1-based slide index.
    pub index: usize,

    /// 0-based position of the slide to show.
    pub visible: usize,

    /// 0-based position of the indicator to activate.
    /// `None` when the indicator collection is too short.
    pub active: Option<usize>,
}

impl RenderPlan {
    pub fn compute(
        raw: i64,
        n_slides: usize,
        n_indicators: usize,
        policy: OvershootPolicy,
    ) -> Result<Self, Error> {
        let index = normalize(raw, n_slides, policy).ok_or(Error::NoSlides)?;
        let position = index - 1;

        Ok(Self {
            index,
            visible: position,
            active: if position < n_indicators {
                Some(position)
            } else {
                None
            },
        })
    }
}
