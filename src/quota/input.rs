use crate::model::MetaValue;

/// Why a submitted limit was refused
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LimitInputError {
    #[error("post limit is empty")]
    Empty,
    #[error("post limit '{0}' is not an integer")]
    NotInteger(String),
    #[error("post limit {0} is negative")]
    Negative(String),
    #[error("post limit '{0}' is too large")]
    Overflow(String),
}

/// Parses a limit submitted through the profile form
///
/// Accepts a decimal integer with optional surrounding whitespace and an
/// optional leading `+`. Leading zeros, fractions and exponents are refused.
pub fn parse_limit_input(raw: &str) -> Result<u64, LimitInputError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(LimitInputError::Empty);
    }

    let (negative, digits) = match trimmed.as_bytes()[0] {
        b'-' => (true, &trimmed[1..]),
        b'+' => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let well_formed = !digits.is_empty()
        && digits.bytes().all(|b| b.is_ascii_digit())
        && (digits == "0" || !digits.starts_with('0'));
    if !well_formed {
        return Err(LimitInputError::NotInteger(raw.to_string()));
    }

    if negative {
        return if digits == "0" {
            Ok(0)
        } else {
            Err(LimitInputError::Negative(trimmed.to_string()))
        };
    }

    // Limits are stored as signed integers by most hosts
    digits
        .parse::<i64>()
        .map(|n| n as u64)
        .map_err(|_| LimitInputError::Overflow(trimmed.to_string()))
}

/// Reads a limit from its stored metadata form
///
/// Returns `None` for anything that is not a positive integer. `Err` carries
/// the offending value when it is malformed rather than simply unset.
pub fn decode_stored_limit(value: &MetaValue) -> Result<Option<u64>, String> {
    match value {
        MetaValue::Int(n) if *n > 0 => Ok(Some(*n as u64)),
        MetaValue::Int(0) => Ok(None),
        MetaValue::Int(n) => Err(n.to_string()),
        MetaValue::Bool(false) => Ok(None),
        MetaValue::Bool(true) => Err("true".to_string()),
        MetaValue::Text(s) if s.trim().is_empty() => Ok(None),
        // Stored text is read leniently, "05" is still a limit of 5
        MetaValue::Text(s) => match s.trim().parse::<u64>() {
            Ok(0) => Ok(None),
            Ok(limit) => Ok(Some(limit)),
            Err(_) => Err(s.clone()),
        },
    }
}
