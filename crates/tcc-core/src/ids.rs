//! ID prefix constants.
//!
//! IDs are `{prefix}-{8 hex chars}`, e.g. `trk-a3f8b2c1`. The random part is
//! generated by the database (see `tcc-db`).

pub const PREFIX_USER: &str = "usr";
pub const PREFIX_BRANCH: &str = "brn";
pub const PREFIX_TRUCK: &str = "trk";
pub const PREFIX_CONSIGNMENT: &str = "cns";
pub const PREFIX_ACTIVITY: &str = "act";

/// Prefix for human-facing consignment tracking numbers (`TCC-1A2B3C4D`).
pub const TRACKING_PREFIX: &str = "TCC";

pub const ALL_PREFIXES: &[&str] = &[
    PREFIX_USER,
    PREFIX_BRANCH,
    PREFIX_TRUCK,
    PREFIX_CONSIGNMENT,
    PREFIX_ACTIVITY,
];

/// Check that `id` looks like `{prefix}-{8 lowercase hex}`.
#[must_use]
pub fn has_prefix(id: &str, prefix: &str) -> bool {
    id.strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix('-'))
        .is_some_and(|hex| hex.len() == 8 && hex.chars().all(|c| c.is_ascii_hexdigit()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixes_are_unique() {
        let mut sorted = ALL_PREFIXES.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), ALL_PREFIXES.len());
    }

    #[test]
    fn has_prefix_accepts_well_formed() {
        assert!(has_prefix("trk-a3f8b2c1", PREFIX_TRUCK));
    }

    #[test]
    fn has_prefix_rejects_wrong_prefix_or_length() {
        assert!(!has_prefix("brn-a3f8b2c1", PREFIX_TRUCK));
        assert!(!has_prefix("trk-a3f8", PREFIX_TRUCK));
        assert!(!has_prefix("trka3f8b2c1", PREFIX_TRUCK));
        assert!(!has_prefix("trk-zzzzzzzz", PREFIX_TRUCK));
    }
}
