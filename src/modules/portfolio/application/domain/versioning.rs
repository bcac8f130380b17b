pub const FIRST_VERSION_LABEL: &str = "v1.0";

/// Width of the `portfolio_versions.version` column.
pub const MAX_LABEL_LEN: usize = 20;

/// Label following the most recently created one: `vMAJOR.MINOR` bumps MINOR,
/// anything else (or no previous version) restarts at `v1.0`.
pub fn next_label(previous: Option<&str>) -> String {
    previous
        .and_then(parse_label)
        .and_then(|(major, minor)| Some(format!("v{}.{}", major, minor.checked_add(1)?)))
        .unwrap_or_else(|| FIRST_VERSION_LABEL.to_string())
}

fn parse_label(label: &str) -> Option<(u32, u32)> {
    let rest = label.strip_prefix('v')?;
    let mut parts = rest.split('.');
    let major = parts.next()?.parse().ok()?;
    let minor = parts.next()?.parse().ok()?;
    Some((major, minor))
}

/// Labels for versions supplied at portfolio creation: an explicit label wins,
/// otherwise `v1.{index}` by input position.
pub fn initial_label(supplied: Option<&str>, index: usize) -> String {
    match supplied.map(str::trim).filter(|s| !s.is_empty()) {
        Some(label) => label.to_string(),
        None => format!("v1.{}", index),
    }
}

/// Leaves exactly one `true` in a non-empty slice: the first requested one,
/// or the first element when none was requested.
pub fn normalise_active(flags: &mut [bool]) {
    let winner = flags.iter().position(|f| *f).unwrap_or(0);
    for (i, flag) in flags.iter_mut().enumerate() {
        *flag = i == winner;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_label_sequence() {
        let mut label = next_label(None);
        let mut seen = vec![label.clone()];
        for _ in 0..3 {
            label = next_label(Some(&label));
            seen.push(label.clone());
        }

        assert_eq!(seen, vec!["v1.0", "v1.1", "v1.2", "v1.3"]);
    }

    #[test]
    fn test_next_label_keeps_major() {
        assert_eq!(next_label(Some("v2.9")), "v2.10");
        assert_eq!(next_label(Some("v3.0.7")), "v3.1");
    }

    #[test]
    fn test_next_label_unparsable_restarts() {
        assert_eq!(next_label(Some("final")), "v1.0");
        assert_eq!(next_label(Some("v1")), "v1.0");
        assert_eq!(next_label(Some("vX.2")), "v1.0");
        assert_eq!(next_label(Some("")), "v1.0");
    }

    #[test]
    fn test_next_label_minor_overflow_restarts() {
        assert_eq!(next_label(Some("v1.4294967295")), "v1.0");
        assert_eq!(next_label(Some("v7.4294967294")), "v7.4294967295");
    }

    #[test]
    fn test_initial_label() {
        assert_eq!(initial_label(None, 0), "v1.0");
        assert_eq!(initial_label(Some("  "), 2), "v1.2");
        assert_eq!(initial_label(Some("beta"), 1), "beta");
    }

    #[test]
    fn test_normalise_active() {
        let mut none = [false, false, false];
        normalise_active(&mut none);
        assert_eq!(none, [true, false, false]);

        let mut many = [false, true, true];
        normalise_active(&mut many);
        assert_eq!(many, [false, true, false]);

        let mut empty: [bool; 0] = [];
        normalise_active(&mut empty);
    }
}
