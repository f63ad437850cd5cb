//! Topic reference parsing.
//!
//! Pipeline steps refer to topics by reference strings that may carry a
//! field qualifier after a `:` separator, e.g. `orders:amount` selects the
//! `amount` field of messages on the `orders` topic. `:` is not a legal
//! character in a Kafka topic name, so the split is unambiguous.

/// Splits a topic reference into its bare topic name and optional field
/// qualifier. A reference without a qualifier (or with an empty one) maps to
/// itself.
pub fn parse_topic_reference(reference: &str) -> (&str, Option<&str>) {
    match reference.split_once(':') {
        Some((topic, qualifier)) if !qualifier.is_empty() => (topic, Some(qualifier)),
        Some((topic, _)) => (topic, None),
        None => (reference, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_reference() {
        assert_eq!(parse_topic_reference("orders"), ("orders", None));
    }

    #[test]
    fn reference_with_qualifier() {
        assert_eq!(
            parse_topic_reference("orders:amount"),
            ("orders", Some("amount"))
        );
    }

    #[test]
    fn empty_qualifier_is_dropped() {
        assert_eq!(parse_topic_reference("orders:"), ("orders", None));
    }

    #[test]
    fn qualifier_may_contain_separators() {
        assert_eq!(
            parse_topic_reference("orders:items:0"),
            ("orders", Some("items:0"))
        );
    }
}
