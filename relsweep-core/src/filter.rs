//! Filter engine: decides whether a candidate unit is in scope for a run.
//!
//! Evaluation order, first match decides:
//! 1. deny-list hit on id/name -> excluded
//! 2. non-empty allow-list without a hit -> excluded
//! 3. missing any required tag -> excluded
//! 4. carrying any excluded tag -> excluded
//! 5. otherwise included

use tracing::debug;

use relsweep_model::filter::tag_value_wanted;
use relsweep_model::{FilterCriteria, Unit, UnitId};

use crate::error::{OrchestratorError, Result};
use crate::resume::ResumeTracker;

/// Pure scope predicate; no side effects beyond a trace log.
pub fn is_in_scope(unit: &Unit, criteria: &FilterCriteria) -> bool {
    if criteria
        .excluded_units
        .iter()
        .any(|entry| unit.is_named(entry))
    {
        return false;
    }

    if !criteria.included_units.is_empty()
        && !criteria
            .included_units
            .iter()
            .any(|entry| unit.is_named(entry))
    {
        return false;
    }

    if !criteria.included_tags.is_empty() {
        let all_present = criteria
            .included_tags
            .iter()
            .all(|(key, value)| unit.tags.matches(key, tag_value_wanted(value)));
        if !all_present {
            return false;
        }
    }

    if criteria
        .excluded_tags
        .iter()
        .any(|(key, value)| unit.tags.matches(key, tag_value_wanted(value)))
    {
        return false;
    }

    true
}

/// Guard-rail check run before any scheduling. Malformed criteria abort the
/// whole run.
pub fn validate_criteria(criteria: &FilterCriteria) -> Result<()> {
    let conflicts = criteria.conflicting_units();
    if !conflicts.is_empty() {
        return Err(OrchestratorError::FilterConfig(format!(
            "units listed as both included and excluded: {}",
            conflicts.join(", ")
        )));
    }
    Ok(())
}

/// Apply filter criteria and resume gating to the enumerated candidates,
/// preserving enumeration order.
pub fn select_units(
    candidates: Vec<Unit>,
    criteria: &FilterCriteria,
    resume_from: Option<UnitId>,
) -> Result<Vec<Unit>> {
    validate_criteria(criteria)?;

    let mut tracker = ResumeTracker::new(resume_from);
    let mut selected = Vec::new();
    for unit in candidates {
        if !is_in_scope(&unit, criteria) {
            debug!(unit = %unit.id, "unit filtered out of scope");
            continue;
        }
        if tracker.should_skip(&unit) {
            debug!(unit = %unit.id, "unit skipped, before resume point");
            continue;
        }
        selected.push(unit);
    }
    tracker.finish(selected.len());
    Ok(selected)
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, BTreeSet};

    use relsweep_model::Tags;

    use super::*;

    fn unit(id: &str, tags: Tags) -> Unit {
        Unit::new(id, format!("{id}-name")).with_tags(tags)
    }

    fn criteria() -> FilterCriteria {
        FilterCriteria::default()
    }

    #[test]
    fn exclusion_beats_matching_included_tags() {
        let mut c = criteria();
        c.excluded_units = BTreeSet::from(["sub-1".to_owned()]);
        c.included_tags = BTreeMap::from([("env".to_owned(), "prod".to_owned())]);

        let u = unit("sub-1", Tags::from([("env", "prod")]));
        assert!(!is_in_scope(&u, &c));
    }

    #[test]
    fn allow_list_excludes_everything_else() {
        let mut c = criteria();
        c.included_units = BTreeSet::from(["sub-1".to_owned()]);

        assert!(is_in_scope(&unit("sub-1", Tags::new()), &c));
        assert!(!is_in_scope(&unit("sub-2", Tags::new()), &c));
    }

    #[test]
    fn allow_list_matches_display_name() {
        let mut c = criteria();
        c.included_units = BTreeSet::from(["SUB-1-NAME".to_owned()]);
        assert!(is_in_scope(&unit("sub-1", Tags::new()), &c));
    }

    #[test]
    fn included_tags_all_must_match() {
        let mut c = criteria();
        c.included_tags = BTreeMap::from([
            ("env".to_owned(), "prod".to_owned()),
            ("owner".to_owned(), String::new()),
        ]);

        let both = unit("a", Tags::from([("env", "prod"), ("owner", "sre")]));
        let env_only = unit("b", Tags::from([("env", "prod")]));
        let wrong_value = unit("c", Tags::from([("env", "dev"), ("owner", "sre")]));

        assert!(is_in_scope(&both, &c));
        assert!(!is_in_scope(&env_only, &c));
        assert!(!is_in_scope(&wrong_value, &c));
    }

    #[test]
    fn excluded_tags_any_match_excludes() {
        let mut c = criteria();
        c.excluded_tags =
            BTreeMap::from([("decommissioned".to_owned(), String::new())]);

        let marked = unit("a", Tags::from([("decommissioned", "true")]));
        let clean = unit("b", Tags::from([("env", "prod")]));

        assert!(!is_in_scope(&marked, &c));
        assert!(is_in_scope(&clean, &c));
    }

    #[test]
    fn empty_criteria_include_everything() {
        assert!(is_in_scope(&unit("a", Tags::new()), &criteria()));
    }

    #[test]
    fn conflicting_include_exclude_is_rejected() {
        let mut c = criteria();
        c.included_units = BTreeSet::from(["sub-1".to_owned()]);
        c.excluded_units = BTreeSet::from(["sub-1".to_owned()]);
        assert!(matches!(
            validate_criteria(&c),
            Err(OrchestratorError::FilterConfig(_))
        ));
    }

    #[test]
    fn select_units_applies_filter_then_resume_in_order() {
        let units = vec![
            unit("a", Tags::new()),
            unit("b", Tags::new()),
            unit("c", Tags::new()),
            unit("d", Tags::new()),
        ];
        let selected =
            select_units(units, &criteria(), Some(UnitId::from("c"))).unwrap();
        let ids: Vec<&str> =
            selected.iter().map(|u| u.id.as_str()).collect();
        assert_eq!(ids, ["c", "d"]);
    }

    #[test]
    fn resume_point_absent_selects_nothing() {
        let units = vec![unit("a", Tags::new()), unit("b", Tags::new())];
        let selected =
            select_units(units, &criteria(), Some(UnitId::from("zz"))).unwrap();
        assert!(selected.is_empty());
    }
}
