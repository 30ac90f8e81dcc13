//! Derived date-of-birth composition

/// Join the raw day, month and year inputs into `dd/mm/yyyy`.
///
/// Partial or invalid parts are carried through unchanged.
pub fn compose_dob(day: &str, month: &str, year: &str) -> String {
    format!("{day}/{month}/{year}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_composes_full_date() {
        assert_eq!(compose_dob("05", "12", "1990"), "05/12/1990");
    }

    #[test]
    fn test_keeps_partial_parts() {
        assert_eq!(compose_dob("5", "", "19"), "5//19");
        assert_eq!(compose_dob("", "", ""), "//");
    }

    #[test]
    fn test_is_idempotent() {
        let first = compose_dob("31", "02", "2000");
        let second = compose_dob("31", "02", "2000");
        assert_eq!(first, second);
    }
}
