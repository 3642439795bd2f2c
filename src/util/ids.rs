//! Sequential identifiers of the form `PREFIX_0001`.

use thiserror::Error;

/// Minimum number of digits in a generated identifier
const ID_DIGITS: usize = 4;

/// Errors raised while scanning existing identifiers
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdError {
    #[error("Malformed {prefix} identifier: '{id}' (expected {prefix}_<digits>)")]
    Malformed { prefix: String, id: String },
}

/// Parse the numeric suffix of `id`, which must read `{prefix}_{digits}`.
pub fn parse_id(prefix: &str, id: &str) -> Result<u32, IdError> {
    let malformed = || IdError::Malformed {
        prefix: prefix.to_string(),
        id: id.to_string(),
    };

    let digits = id
        .strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix('_'))
        .ok_or_else(malformed)?;

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed());
    }

    digits.parse().map_err(|_| malformed())
}

/// Format an identifier, zero-padded to at least four digits.
pub fn format_id(prefix: &str, number: u32) -> String {
    format!("{}_{:0width$}", prefix, number, width = ID_DIGITS)
}

/// Generate the next identifier for `prefix`.
///
/// Takes the highest numeric suffix among `existing_ids` and adds one.
/// Starts at `{prefix}_0001` when there are no existing identifiers.
/// Every existing identifier must match `{prefix}_{digits}`.
pub fn generate_id<'a, I>(prefix: &str, existing_ids: I) -> Result<String, IdError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut max = 0u32;
    for id in existing_ids {
        max = max.max(parse_id(prefix, id)?);
    }

    let next = max.checked_add(1).ok_or_else(|| IdError::Malformed {
        prefix: prefix.to_string(),
        id: format_id(prefix, max),
    })?;

    Ok(format_id(prefix, next))
}
