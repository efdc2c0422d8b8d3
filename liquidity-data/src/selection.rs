//! Per-row payment-method selection reducer.
//!
//! Every row starts with the full available set active. Clicking a method
//! while everything is active narrows the view to just that method; from any
//! strict subset a click is a plain toggle. An empty selection is allowed and
//! simply collapses the specific-liquidity display back to aggregate values.

/// Apply one payment-method click to a row's active set.
///
/// Pure function of (available, active, method); the caller is responsible
/// for issuing the follow-up liquidity fetch for the returned set. A method
/// not present in `available` leaves the selection unchanged, preserving the
/// `active ⊆ available` invariant.
pub fn toggle_method(available: &[String], active: &[String], method: &str) -> Vec<String> {
    if !available.iter().any(|m| m == method) {
        return active.to_vec();
    }

    // "All selected" is the default state; a click narrows to the one method.
    if active.len() == available.len() {
        return vec![method.to_string()];
    }

    if active.iter().any(|m| m == method) {
        active.iter().filter(|m| *m != method).cloned().collect()
    } else {
        let mut next = active.to_vec();
        next.push(method.to_string());
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn methods(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_full_set_collapses_to_clicked_method() {
        let available = methods(&["Bank Transfer", "Wise", "Revolut"]);
        let next = toggle_method(&available, &available, "Wise");
        assert_eq!(next, methods(&["Wise"]));
    }

    #[test]
    fn test_subset_toggle_removes_present_method() {
        let available = methods(&["Bank Transfer", "Wise", "Revolut"]);
        let active = methods(&["Bank Transfer", "Wise"]);
        let next = toggle_method(&available, &active, "Wise");
        assert_eq!(next, methods(&["Bank Transfer"]));
    }

    #[test]
    fn test_subset_toggle_adds_absent_method() {
        let available = methods(&["Bank Transfer", "Wise", "Revolut"]);
        let active = methods(&["Bank Transfer"]);
        let next = toggle_method(&available, &active, "Revolut");
        assert_eq!(next, methods(&["Bank Transfer", "Revolut"]));
    }

    #[test]
    fn test_selection_may_become_empty() {
        let available = methods(&["Bank Transfer", "Wise"]);
        let active = methods(&["Wise"]);
        let next = toggle_method(&available, &active, "Wise");
        assert!(next.is_empty());

        // From empty, a click re-activates the method.
        let next = toggle_method(&available, &next, "Bank Transfer");
        assert_eq!(next, methods(&["Bank Transfer"]));
    }

    #[test]
    fn test_unknown_method_is_ignored() {
        let available = methods(&["Bank Transfer"]);
        let active = methods(&["Bank Transfer"]);
        let next = toggle_method(&available, &active, "Cash in Person");
        assert_eq!(next, active);
    }
}
