//! `repeat`, `repeat-mode` and `weight` attribute parsing.

use crate::graph::RepeatMode;

use super::BuildError;

/// Parse a repeat specifier into inclusive `(min, max)` bounds.
///
/// Accepted forms: `"n"`, `"m-n"` and `"-n"` (minimum 0). Open upper
/// bounds (`"m-"`) are rejected.
pub fn parse_repeat(spec: &str) -> Result<(u32, u32), BuildError> {
    let invalid = |reason| BuildError::InvalidRepeat {
        spec: spec.to_owned(),
        reason,
    };
    let number = |text: &str| {
        text.trim()
            .parse::<u32>()
            .map_err(|_| invalid("bounds must be non-negative integers"))
    };

    let (min, max) = match spec.split_once('-') {
        None => {
            let n = number(spec)?;
            (n, n)
        }
        Some((_, hi)) if hi.trim().is_empty() => {
            return Err(invalid("repeat must have an explicit upper bound"));
        }
        Some((lo, hi)) if lo.trim().is_empty() => (0, number(hi)?),
        Some((lo, hi)) => (number(lo)?, number(hi)?),
    };

    if min > max {
        return Err(invalid("minimum exceeds maximum"));
    }
    Ok((min, max))
}

/// Parse the `repeat-mode` attribute. Missing means `normal`.
pub fn parse_mode(mode: Option<&str>) -> Result<RepeatMode, BuildError> {
    match mode.map(str::trim) {
        None | Some("normal") => Ok(RepeatMode::Normal),
        Some("lazy") => Ok(RepeatMode::Lazy),
        Some("greedy") => Ok(RepeatMode::Greedy),
        Some(other) => Err(BuildError::InvalidRepeat {
            spec: other.to_owned(),
            reason: "repeat-mode must be lazy, normal or greedy",
        }),
    }
}

pub fn parse_weight(weight: Option<&str>) -> Result<Option<f64>, BuildError> {
    let Some(text) = weight else {
        return Ok(None);
    };
    match text.trim().parse::<f64>() {
        Ok(w) if w.is_finite() => Ok(Some(w)),
        _ => Err(BuildError::InvalidWeight(text.to_owned())),
    }
}
