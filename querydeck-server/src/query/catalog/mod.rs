//! Static catalog of every query the server can run.

pub mod company;
pub mod vitals;

use super::QueryDefinition;

static ALL: [&QueryDefinition; 21] = [
    &company::EMPLOYEES,
    &company::EMPLOYEE_DETAILS,
    &company::DEPARTMENT_SALARY_STATS,
    &company::DEPARTMENT_EMPLOYEE_COUNT,
    &company::DEPARTMENT_PROJECT_COUNT,
    &company::DEPARTMENT_BUDGET_ANALYSIS,
    &company::PROJECT_DURATION_ANALYSIS,
    &company::PROJECT_RESOURCE_ALLOCATION,
    &company::PROJECT_COMPLETION_STATUS,
    &company::PROJECT_EMPLOYEE_ASSIGNMENTS,
    &company::HOURS_WORKED_ANALYSIS,
    &company::PROJECT_PARTICIPATION,
    &company::EMPLOYEE_WORKLOAD,
    &company::CROSS_DEPARTMENT_COLLABORATION,
    &vitals::PATIENT_AUTHORIZATION_SUMMARY,
    &vitals::ACTIVE_ALERTS,
    &vitals::HIGH_RISK_PATIENTS_V1,
    &vitals::HIGH_RISK_PATIENTS_V2,
    &vitals::DEVICE_STATUS_OVERVIEW,
    &vitals::HIGH_HEART_RATE,
    &vitals::EMERGENCY_DISPATCH_SUMMARY,
];

/// Every definition, grouped by schema.
pub fn all() -> &'static [&'static QueryDefinition] {
    &ALL
}

/// Find a definition by name. Without a version, the highest one wins.
pub fn lookup(name: &str, version: Option<u32>) -> Option<&'static QueryDefinition> {
    let mut candidates = ALL.iter().copied().filter(|def| def.name == name);
    match version {
        Some(version) => candidates.find(|def| def.version == version),
        None => candidates.max_by_key(|def| def.version),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn ids_are_unique() {
        let ids: HashSet<_> = all().iter().map(|def| def.id()).collect();
        assert_eq!(ids.len(), all().len());
    }

    #[test]
    fn placeholders_match_declared_parameters() {
        for def in all() {
            let placeholders = def.sql.matches('?').count();
            assert_eq!(placeholders, def.parameters.len(), "{}", def.id());
        }
    }

    #[test]
    fn sql_has_no_schema_prefix() {
        for def in all() {
            assert!(!def.sql.contains("vital_watchers."), "{}", def.id());
        }
    }

    #[test]
    fn lookup_prefers_latest_version() {
        let latest = lookup("vitals.high_risk_patients", None).unwrap();
        assert_eq!(latest.version, 2);
        assert!(latest.sql.contains("Heart_Rate_Exceeded"));

        let first = lookup("vitals.high_risk_patients", Some(1)).unwrap();
        assert!(!first.sql.contains("Heart_Rate_Exceeded"));

        assert!(lookup("vitals.high_risk_patients", Some(3)).is_none());
        assert!(lookup("company.nope", None).is_none());
    }

    #[test]
    fn only_employee_details_takes_parameters() {
        let parameterized: Vec<_> = all()
            .iter()
            .filter(|def| !def.parameters.is_empty())
            .map(|def| def.name)
            .collect();
        assert_eq!(parameterized, ["company.employee_details"]);
    }
}
