//! Result-entry reference parsing
//!
//! A rendered feed entry is an opaque href. The two numeric fields the
//! finder needs are recovered by pattern: the digit run after the item path
//! marker, and the digit run after the position query parameter. A href
//! without both is not a valid entry and is simply not a match candidate.

use regex::Regex;

/// The two extractable fields of a valid result entry
///
/// Both stay `String` deliberately: matching is exact string equality, and
/// leading zeros must round-trip unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryIds {
    pub item_id: String,
    pub position_id: String,
}

/// Parse a feed href into its `(item_id, position_id)` pair
///
/// `pattern` is the pre-compiled config regex with two capture groups.
/// Returns `None` for malformed references, which makes "not a valid entry"
/// a distinguishable case rather than a scan-time surprise.
#[must_use]
pub fn parse_entry(pattern: &Regex, href: &str) -> Option<EntryIds> {
    let captures = pattern.captures(href)?;
    Some(EntryIds {
        item_id: captures.get(1)?.as_str().to_string(),
        position_id: captures.get(2)?.as_str().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RankConfig;

    fn pattern() -> Regex {
        RankConfig::default().entry_pattern().clone()
    }

    #[test]
    fn parses_item_and_position() {
        let ids = parse_entry(
            &pattern(),
            "https://ohou.se/productions/4821/selling?affect_type=StoreSearch&affect_id=7",
        )
        .unwrap();
        assert_eq!(ids.item_id, "4821");
        assert_eq!(ids.position_id, "7");
    }

    #[test]
    fn relative_href_parses_too() {
        let ids = parse_entry(&pattern(), "/productions/100?affect_id=3").unwrap();
        assert_eq!(ids.item_id, "100");
        assert_eq!(ids.position_id, "3");
    }

    #[test]
    fn leading_zeros_round_trip() {
        let ids = parse_entry(&pattern(), "/productions/0042/selling?affect_id=007").unwrap();
        assert_eq!(ids.item_id, "0042");
        assert_eq!(ids.position_id, "007");
    }

    #[test]
    fn missing_position_param_is_not_an_entry() {
        assert_eq!(parse_entry(&pattern(), "/productions/4821/selling"), None);
    }

    #[test]
    fn unrelated_href_is_not_an_entry() {
        assert_eq!(parse_entry(&pattern(), "/advices/123?affect_id=9"), None);
        assert_eq!(parse_entry(&pattern(), ""), None);
    }
}
