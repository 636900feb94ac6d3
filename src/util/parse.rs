use crate::error::{internal::InternalError, AppError};

/// Parses a u64 value from String
///
/// # Arguments
/// - `value` - The String to attempt to parse into `u64`
///
/// # Returns
/// - `Ok(u64)` - Successfully parsed String to `u64`
/// - `Err(AppError::InternalError(ParseStringId))` - Failed to parse
///   the string as a u64
pub fn parse_u64_from_string(value: String) -> Result<u64, AppError> {
    let result = value
        .parse::<u64>()
        .map_err(|e| InternalError::ParseStringId { value, source: e })?;

    Ok(result)
}

/// Parses a poll button custom id of the form `poll:{poll_id}:{option_index}`.
///
/// Returns `None` for anything that isn't a poll button.
pub fn parse_poll_custom_id(custom_id: &str) -> Option<(u64, usize)> {
    let mut parts = custom_id.split(':');

    if parts.next()? != "poll" {
        return None;
    }
    let poll_id = parts.next()?.parse().ok()?;
    let index = parts.next()?.parse().ok()?;

    parts.next().is_none().then_some((poll_id, index))
}

/// Builds the custom id parsed by [`parse_poll_custom_id`].
pub fn poll_custom_id(poll_id: u64, index: usize) -> String {
    format!("poll:{}:{}", poll_id, index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_snowflake_strings() {
        assert_eq!(parse_u64_from_string("1234".to_string()).unwrap(), 1234);
        assert!(parse_u64_from_string("abc".to_string()).is_err());
    }

    #[test]
    fn poll_custom_ids_round_trip() {
        let id = poll_custom_id(987654321, 3);
        assert_eq!(id, "poll:987654321:3");
        assert_eq!(parse_poll_custom_id(&id), Some((987654321, 3)));
    }

    #[test]
    fn rejects_foreign_custom_ids() {
        assert_eq!(parse_poll_custom_id("vote:1:2"), None);
        assert_eq!(parse_poll_custom_id("poll:1"), None);
        assert_eq!(parse_poll_custom_id("poll:1:x"), None);
        assert_eq!(parse_poll_custom_id("poll:1:2:3"), None);
    }
}
