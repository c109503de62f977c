//! COMPANY schema: EMPLOYEE, DEPARTMENT, PROJECT, WORKS_ON.

use crate::query::{ParamSpec, QueryDefinition};

pub static EMPLOYEES: QueryDefinition = QueryDefinition {
    name: "company.employees",
    version: 1,
    sql: r#"
        SELECT Ssn AS SSN, Fname, Lname
        FROM EMPLOYEE
        ORDER BY Ssn
    "#,
    parameters: &[],
    ordering: "Ssn ascending",
};

pub static EMPLOYEE_DETAILS: QueryDefinition = QueryDefinition {
    name: "company.employee_details",
    version: 1,
    sql: r#"
        SELECT
            CONCAT(e.Fname, ' ', e.Lname) AS EmployeeName,
            CONCAT(m.Fname, ' ', m.Lname) AS ManagerName,
            d.Dname AS DepartmentName,
            e.Salary AS Salary,
            e.Bdate AS BirthDate
        FROM EMPLOYEE e
        LEFT JOIN EMPLOYEE m ON e.Super_ssn = m.Ssn
        JOIN DEPARTMENT d ON e.Dno = d.Dnumber
        WHERE e.Ssn = ?
    "#,
    parameters: &[ParamSpec::text("SSN")],
    ordering: "at most one row (Ssn is the key)",
};

pub static DEPARTMENT_SALARY_STATS: QueryDefinition = QueryDefinition {
    name: "company.department_salary_stats",
    version: 1,
    sql: r#"
        SELECT
            d.Dname AS DepartmentName,
            AVG(e.Salary) AS AverageSalary,
            MAX(e.Salary) AS MaxSalary,
            MIN(e.Salary) AS MinSalary
        FROM DEPARTMENT d
        LEFT JOIN EMPLOYEE e ON d.Dnumber = e.Dno
        GROUP BY d.Dname
        HAVING AVG(e.Salary) IS NOT NULL
        ORDER BY AverageSalary DESC
    "#,
    parameters: &[],
    ordering: "AverageSalary descending",
};

pub static DEPARTMENT_EMPLOYEE_COUNT: QueryDefinition = QueryDefinition {
    name: "company.department_employee_count",
    version: 1,
    sql: r#"
        SELECT
            d.Dname AS DepartmentName,
            COUNT(e.Ssn) AS EmployeeCount
        FROM DEPARTMENT d
        LEFT JOIN EMPLOYEE e ON d.Dnumber = e.Dno
        GROUP BY d.Dname
        ORDER BY EmployeeCount DESC
    "#,
    parameters: &[],
    ordering: "EmployeeCount descending",
};

pub static DEPARTMENT_PROJECT_COUNT: QueryDefinition = QueryDefinition {
    name: "company.department_project_count",
    version: 1,
    sql: r#"
        SELECT
            d.Dname AS DepartmentName,
            COUNT(p.Pnumber) AS ProjectCount
        FROM DEPARTMENT d
        LEFT JOIN PROJECT p ON d.Dnumber = p.Dnum
        GROUP BY d.Dname
        ORDER BY ProjectCount DESC
    "#,
    parameters: &[],
    ordering: "ProjectCount descending",
};

pub static DEPARTMENT_BUDGET_ANALYSIS: QueryDefinition = QueryDefinition {
    name: "company.department_budget_analysis",
    version: 1,
    sql: r#"
        SELECT
            d.Dname AS DepartmentName,
            SUM(e.Salary) AS TotalSalaryCost,
            ROUND((SUM(e.Salary) / (SELECT SUM(Salary) FROM EMPLOYEE)) * 100, 2) AS SalaryPercentage
        FROM DEPARTMENT d
        LEFT JOIN EMPLOYEE e ON d.Dnumber = e.Dno
        GROUP BY d.Dname
        HAVING SUM(e.Salary) > 0
        ORDER BY TotalSalaryCost DESC
    "#,
    parameters: &[],
    ordering: "TotalSalaryCost descending",
};

pub static PROJECT_DURATION_ANALYSIS: QueryDefinition = QueryDefinition {
    name: "company.project_duration_analysis",
    version: 1,
    sql: r#"
        SELECT
            p.Pname AS ProjectName,
            SUM(w.Hours) AS TotalHoursWorked
        FROM PROJECT p
        LEFT JOIN WORKS_ON w ON p.Pnumber = w.Pno
        GROUP BY p.Pname
        ORDER BY TotalHoursWorked DESC, p.Pname
    "#,
    parameters: &[],
    ordering: "TotalHoursWorked descending, then Pname",
};

pub static PROJECT_RESOURCE_ALLOCATION: QueryDefinition = QueryDefinition {
    name: "company.project_resource_allocation",
    version: 1,
    sql: r#"
        SELECT
            p.Pname AS ProjectName,
            COUNT(w.Essn) AS TotalEmployees
        FROM PROJECT p
        LEFT JOIN WORKS_ON w ON p.Pnumber = w.Pno
        GROUP BY p.Pname
        ORDER BY TotalEmployees DESC
    "#,
    parameters: &[],
    ordering: "TotalEmployees descending",
};

pub static PROJECT_COMPLETION_STATUS: QueryDefinition = QueryDefinition {
    name: "company.project_completion_status",
    version: 1,
    sql: r#"
        SELECT
            p.Pname AS ProjectName,
            CASE
                WHEN SUM(w.Hours) > 0 THEN 'In Progress'
                ELSE 'Not Started'
            END AS Status
        FROM PROJECT p
        LEFT JOIN WORKS_ON w ON p.Pnumber = w.Pno
        GROUP BY p.Pname
        ORDER BY Status, p.Pname
    "#,
    parameters: &[],
    ordering: "Status, then Pname",
};

pub static PROJECT_EMPLOYEE_ASSIGNMENTS: QueryDefinition = QueryDefinition {
    name: "company.project_employee_assignments",
    version: 1,
    sql: r#"
        SELECT
            p.Pname AS ProjectName,
            CONCAT(e.Fname, ' ', e.Lname) AS EmployeeName,
            w.Hours AS AssignedHours
        FROM PROJECT p
        JOIN WORKS_ON w ON p.Pnumber = w.Pno
        JOIN EMPLOYEE e ON w.Essn = e.Ssn
        ORDER BY p.Pname, e.Lname, e.Fname
    "#,
    parameters: &[],
    ordering: "Pname, then Lname, then Fname",
};

pub static HOURS_WORKED_ANALYSIS: QueryDefinition = QueryDefinition {
    name: "company.hours_worked_analysis",
    version: 1,
    sql: r#"
        SELECT
            e.Ssn AS EmployeeID,
            CONCAT(e.Fname, ' ', e.Lname) AS EmployeeName,
            SUM(w.Hours) AS TotalHoursWorked
        FROM EMPLOYEE e
        JOIN WORKS_ON w ON e.Ssn = w.Essn
        GROUP BY e.Ssn, e.Fname, e.Lname
        HAVING SUM(w.Hours) > 20
        ORDER BY TotalHoursWorked DESC
    "#,
    parameters: &[],
    ordering: "TotalHoursWorked descending (only totals above 20)",
};

pub static PROJECT_PARTICIPATION: QueryDefinition = QueryDefinition {
    name: "company.project_participation",
    version: 1,
    sql: r#"
        SELECT
            p.Pname AS ProjectName,
            COUNT(DISTINCT w.Essn) AS NumberOfParticipants
        FROM PROJECT p
        LEFT JOIN WORKS_ON w ON p.Pnumber = w.Pno
        GROUP BY p.Pname
        HAVING COUNT(DISTINCT w.Essn) > 0
        ORDER BY NumberOfParticipants DESC
    "#,
    parameters: &[],
    ordering: "NumberOfParticipants descending",
};

pub static EMPLOYEE_WORKLOAD: QueryDefinition = QueryDefinition {
    name: "company.employee_workload",
    version: 1,
    sql: r#"
        SELECT
            e.Ssn AS EmployeeID,
            CONCAT(e.Fname, ' ', e.Lname) AS EmployeeName,
            d.Dname AS DepartmentName,
            COALESCE(SUM(w.Hours), 0) AS TotalHoursWorked
        FROM EMPLOYEE e
        LEFT JOIN WORKS_ON w ON e.Ssn = w.Essn
        LEFT JOIN DEPARTMENT d ON e.Dno = d.Dnumber
        GROUP BY e.Ssn, e.Fname, e.Lname, d.Dname
        ORDER BY TotalHoursWorked DESC
    "#,
    parameters: &[],
    ordering: "TotalHoursWorked descending",
};

pub static CROSS_DEPARTMENT_COLLABORATION: QueryDefinition = QueryDefinition {
    name: "company.cross_department_collaboration",
    version: 1,
    sql: r#"
        SELECT
            p.Pnumber AS ProjectNumber,
            p.Pname AS ProjectName,
            COUNT(DISTINCT e.Dno) AS DepartmentsInvolved
        FROM WORKS_ON w
        JOIN EMPLOYEE e ON w.Essn = e.Ssn
        JOIN PROJECT p ON w.Pno = p.Pnumber
        GROUP BY p.Pnumber, p.Pname
        HAVING COUNT(DISTINCT e.Dno) > 1
        ORDER BY DepartmentsInvolved DESC
    "#,
    parameters: &[],
    ordering: "DepartmentsInvolved descending",
};
