/// Returns `true` if `v1` is a strictly higher dotted version than `v2`.
///
/// Only the components of `v1` are walked. Components of `v2` beyond
/// `v1`'s length are never inspected, so `1.2` is not lower than `1.2.5`.
/// Components that are not non-negative integers, and components missing
/// from `v2`, compare as `0`.
#[must_use]
pub fn version_greater(v1: &str, v2: &str) -> bool {
    let mut rhs = v2.split('.');

    for component in v1.split('.') {
        let num1 = parse_component(Some(component));
        let num2 = parse_component(rhs.next());

        if num1 != num2 {
            return num1 > num2;
        }
    }

    false
}

fn parse_component(component: Option<&str>) -> u64 {
    component
        .and_then(|c| c.parse::<u64>().ok())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_higher_minor_wins() {
        assert!(version_greater("2.0", "1.9"));
        assert!(!version_greater("1.9", "2.0"));
    }

    #[test]
    fn test_equal_is_not_greater() {
        for v in ["0", "1.0", "1.2.3", "10.20.30", "1.x.3", ""] {
            assert!(!version_greater(v, v), "{v} should not be greater than itself");
        }
    }

    #[test]
    fn test_iteration_bound_is_lhs_length() {
        assert!(!version_greater("1.2", "1.2.5"));
        assert!(!version_greater("1", "1.0.0.1"));
    }

    #[test]
    fn test_extra_lhs_component_compared_against_zero() {
        assert!(version_greater("1.2.5", "1.2"));
        assert!(!version_greater("1.2.0", "1.2"));
    }

    #[test]
    fn test_numeric_not_lexicographic() {
        assert!(version_greater("1.10", "1.9"));
        assert!(!version_greater("1.9", "1.10"));
    }

    #[test]
    fn test_unparseable_components_are_zero() {
        assert!(version_greater("1.1", "1.beta"));
        assert!(!version_greater("1.beta", "1.0"));
        assert!(!version_greater("1.-1", "1.0"));
    }

    #[test]
    fn test_deterministic() {
        let pairs = [("3.1", "3.0.9"), ("0.0.1", "0.0.2"), ("7", "6.99")];
        for (a, b) in pairs {
            assert_eq!(version_greater(a, b), version_greater(a, b));
        }
    }
}
