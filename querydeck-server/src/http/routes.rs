//! The server's route list.

use super::table::{DuplicateRoute, RouteTable};
use crate::query::catalog::{company, vitals};
use crate::render::views::{AuthorizationSummary, DispatchSummary};
use crate::render::Renderer;

/// Every endpoint: the vital watchers group under `/api/queryN`, then the
/// COMPANY analytics.
pub fn default_routes() -> Result<RouteTable, DuplicateRoute> {
    let mut table = RouteTable::new();
    register_vitals(&mut table)?;
    register_company(&mut table)?;
    Ok(table)
}

fn register_vitals(table: &mut RouteTable) -> Result<(), DuplicateRoute> {
    table
        .get(
            "/api/query1/patient-authorization-summary",
            &vitals::PATIENT_AUTHORIZATION_SUMMARY,
            Renderer::html(AuthorizationSummary),
            "Failed to retrieve patient authorization summary. Please try again later.",
        )?
        .get(
            "/api/query2/active-alerts",
            &vitals::ACTIVE_ALERTS,
            Renderer::Json,
            "Failed to fetch active alert data.",
        )?
        .get(
            "/api/query3/high-risk-patients",
            &vitals::HIGH_RISK_PATIENTS_V2,
            Renderer::Json,
            "Failed to retrieve high-risk patient data.",
        )?
        .get(
            "/api/query3/v1/high-risk-patients",
            &vitals::HIGH_RISK_PATIENTS_V1,
            Renderer::Json,
            "Failed to retrieve high-risk patient data.",
        )?
        .get(
            "/api/query4/device-status-overview",
            &vitals::DEVICE_STATUS_OVERVIEW,
            Renderer::Json,
            "Failed to retrieve device status overview.",
        )?
        .get(
            "/api/query5/high-heart-rate-data",
            &vitals::HIGH_HEART_RATE,
            Renderer::Json,
            "Failed to retrieve high heart rate data.",
        )?
        .get(
            "/api/query6/emergency-dispatch-summary",
            &vitals::EMERGENCY_DISPATCH_SUMMARY,
            Renderer::html(DispatchSummary),
            "Failed to retrieve emergency dispatch summary. Please try again later or contact system administrator.",
        )?;
    Ok(())
}

fn register_company(table: &mut RouteTable) -> Result<(), DuplicateRoute> {
    let json = [
        (
            "/api/employees",
            &company::EMPLOYEES,
            "Error fetching employee list",
        ),
        (
            "/api/employees/details",
            &company::EMPLOYEE_DETAILS,
            "Error retrieving employee details",
        ),
        (
            "/api/departments/salary-stats",
            &company::DEPARTMENT_SALARY_STATS,
            "Error fetching department salary statistics",
        ),
        (
            "/api/departments/employee-count",
            &company::DEPARTMENT_EMPLOYEE_COUNT,
            "Error fetching employee count",
        ),
        (
            "/api/departments/project-count",
            &company::DEPARTMENT_PROJECT_COUNT,
            "Error fetching projects per department",
        ),
        (
            "/api/departments/budget-analysis",
            &company::DEPARTMENT_BUDGET_ANALYSIS,
            "Error fetching department budget analysis",
        ),
        (
            "/api/projects/duration-analysis",
            &company::PROJECT_DURATION_ANALYSIS,
            "Error fetching project duration analysis",
        ),
        (
            "/api/projects/resource-allocation",
            &company::PROJECT_RESOURCE_ALLOCATION,
            "Error fetching resource allocation",
        ),
        (
            "/api/projects/completion-status",
            &company::PROJECT_COMPLETION_STATUS,
            "Error fetching project completion status",
        ),
        (
            "/api/projects/employee-assignments",
            &company::PROJECT_EMPLOYEE_ASSIGNMENTS,
            "Error fetching employee assignments",
        ),
        (
            "/api/works-on/hours-worked",
            &company::HOURS_WORKED_ANALYSIS,
            "Error fetching hours worked analysis",
        ),
        (
            "/api/works-on/participation-metrics",
            &company::PROJECT_PARTICIPATION,
            "Error fetching project participation metrics",
        ),
        (
            "/api/works-on/workload-distribution",
            &company::EMPLOYEE_WORKLOAD,
            "Error fetching employee workload distribution",
        ),
        (
            "/api/works-on/cross-department-collaboration",
            &company::CROSS_DEPARTMENT_COLLABORATION,
            "Error fetching cross-department collaboration",
        ),
    ];

    for (path, query, failure_message) in json {
        table.get(path, query, Renderer::Json, failure_message)?;
    }
    Ok(())
}
