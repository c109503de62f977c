//! Vital watchers schema: patients, vitals, alerts, patch devices,
//! providers and emergency dispatch.

use crate::query::QueryDefinition;

pub static PATIENT_AUTHORIZATION_SUMMARY: QueryDefinition = QueryDefinition {
    name: "vitals.patient_authorization_summary",
    version: 1,
    sql: r#"
        SELECT
            UA.User_ID,
            UA.Patient_ID,
            UA.User_code AS Authorization_Code,
            UA.Activation AS Is_Activated,
            P.Email AS Authorized_Email,
            P.Full_name AS Patient_Name,
            P.Age AS Patient_Age,
            P.Medical_History AS Medical_History,
            HS.Date AS Last_Health_Check_Date,
            HS.Vital_signs AS Vital_Signs,
            HS.Treatments AS Treatments_Provided,
            HS.Provider_notes AS Provider_Notes,
            CONCAT(PR.First_name, ' ', PR.Last_name) AS Provider_Name
        FROM USER_AUTHORIZATION AS UA
            JOIN PATIENTS AS P ON UA.Patient_ID = P.Patient_ID
            JOIN HEALTH_SUMMARY AS HS ON P.Patient_ID = HS.Patient_ID
            JOIN PROVIDERS AS PR ON HS.Provider_ID = PR.Provider_ID
        ORDER BY
            UA.Activation DESC,
            P.Full_name ASC,
            HS.Date DESC
    "#,
    parameters: &[],
    ordering: "Activation descending, then Full_name, then Date descending",
};

pub static ACTIVE_ALERTS: QueryDefinition = QueryDefinition {
    name: "vitals.active_alerts",
    version: 1,
    sql: r#"
        SELECT
            A.Alert_ID,
            CONCAT(P.First_name, ' ', P.Last_name) AS Patient_Name,
            A.Alert_type,
            A.Time_stamp AS Alert_Time,
            PD.Patch_status AS Device_Status
        FROM ALERTS AS A
            INNER JOIN PATIENTS AS P ON A.Patient_ID = P.Patient_ID
            INNER JOIN PATCH_DEVICE AS PD ON A.Device_ID = PD.Device_ID
        WHERE A.Resolved = 'F' AND PD.Patch_status = 'Active'
        ORDER BY A.Time_stamp DESC
    "#,
    parameters: &[],
    ordering: "Time_stamp descending",
};

/// Unresolved CRITICAL/HIGH alerts joined with vitals, device and provider.
pub static HIGH_RISK_PATIENTS_V1: QueryDefinition = QueryDefinition {
    name: "vitals.high_risk_patients",
    version: 1,
    sql: r#"
        SELECT
            P.Patient_ID,
            P.Full_name AS Patient_Name,
            P.Age AS Patient_Age,
            P.Medical_history AS Medical_History,
            V.Blood_pressure,
            V.Heart_rate,
            V.Body_temperature,
            V.Oxygen_saturation,
            V.Breathing_rate,
            A.Alert_type AS Alert_Level,
            A.Time_stamp AS Alert_Time,
            PD.Patch_status AS Device_Status,
            PD.Patient_address AS Monitoring_Location,
            CONCAT(PR.First_name, ' ', PR.Last_name) AS Provider_Name
        FROM PATIENTS AS P
            INNER JOIN ALERTS AS A ON P.Patient_ID = A.Patient_ID
            INNER JOIN VITALS AS V ON P.Patient_ID = V.Patient_ID
            LEFT JOIN PATCH_DEVICE AS PD ON P.Patient_ID = PD.Patient_ID
            LEFT JOIN HEALTH_SUMMARY AS HS ON P.Patient_ID = HS.Patient_ID
            LEFT JOIN PROVIDERS AS PR ON HS.Provider_ID = PR.Provider_ID
        WHERE A.Resolved = 'F'
          AND A.Alert_type IN ('CRITICAL', 'HIGH')
        ORDER BY A.Time_stamp DESC
    "#,
    parameters: &[],
    ordering: "Time_stamp descending",
};

/// v1 plus one 0/1 flag per vital, checked against the VITAL_THRESHOLDS
/// critical band for that category.
pub static HIGH_RISK_PATIENTS_V2: QueryDefinition = QueryDefinition {
    name: "vitals.high_risk_patients",
    version: 2,
    sql: r#"
        SELECT
            P.Patient_ID,
            P.Full_name AS Patient_Name,
            P.Age AS Patient_Age,
            P.Medical_history AS Medical_History,
            V.Blood_pressure,
            V.Heart_rate,
            V.Body_temperature,
            V.Oxygen_saturation,
            V.Breathing_rate,
            A.Alert_type AS Alert_Level,
            A.Time_stamp AS Alert_Time,
            PD.Patch_status AS Device_Status,
            PD.Patient_address AS Monitoring_Location,
            CONCAT(PR.First_name, ' ', PR.Last_name) AS Provider_Name,
            CASE
                WHEN V.Blood_pressure < (SELECT Minimum_value FROM VITAL_THRESHOLDS WHERE Vital_category = 'Blood Pressure' AND Vital_level = 'BP_Critical')
                  OR V.Blood_pressure > (SELECT Maximum_value FROM VITAL_THRESHOLDS WHERE Vital_category = 'Blood Pressure' AND Vital_level = 'BP_Critical')
                THEN 1 ELSE 0
            END AS Blood_Pressure_Exceeded,
            CASE
                WHEN V.Heart_rate < (SELECT Minimum_value FROM VITAL_THRESHOLDS WHERE Vital_category = 'Heart Rate' AND Vital_level = 'HR_Critical')
                  OR V.Heart_rate > (SELECT Maximum_value FROM VITAL_THRESHOLDS WHERE Vital_category = 'Heart Rate' AND Vital_level = 'HR_Critical')
                THEN 1 ELSE 0
            END AS Heart_Rate_Exceeded,
            CASE
                WHEN V.Body_temperature < (SELECT Minimum_value FROM VITAL_THRESHOLDS WHERE Vital_category = 'Body Temperature' AND Vital_level = 'BT_High Fever')
                  OR V.Body_temperature > (SELECT Maximum_value FROM VITAL_THRESHOLDS WHERE Vital_category = 'Body Temperature' AND Vital_level = 'BT_High Fever')
                THEN 1 ELSE 0
            END AS Body_Temperature_Exceeded,
            CASE
                WHEN V.Oxygen_saturation < (SELECT Minimum_value FROM VITAL_THRESHOLDS WHERE Vital_category = 'Oxygen Saturation' AND Vital_level = 'OS_Critical')
                  OR V.Oxygen_saturation > (SELECT Maximum_value FROM VITAL_THRESHOLDS WHERE Vital_category = 'Oxygen Saturation' AND Vital_level = 'OS_Critical')
                THEN 1 ELSE 0
            END AS Oxygen_Saturation_Exceeded,
            CASE
                WHEN V.Breathing_rate < (SELECT Minimum_value FROM VITAL_THRESHOLDS WHERE Vital_category = 'Breathing Rate' AND Vital_level = 'BR_Critical')
                  OR V.Breathing_rate > (SELECT Maximum_value FROM VITAL_THRESHOLDS WHERE Vital_category = 'Breathing Rate' AND Vital_level = 'BR_Critical')
                THEN 1 ELSE 0
            END AS Breathing_Rate_Exceeded
        FROM PATIENTS AS P
            INNER JOIN ALERTS AS A ON P.Patient_ID = A.Patient_ID
            INNER JOIN VITALS AS V ON P.Patient_ID = V.Patient_ID
            LEFT JOIN PATCH_DEVICE AS PD ON P.Patient_ID = PD.Patient_ID
            LEFT JOIN HEALTH_SUMMARY AS HS ON P.Patient_ID = HS.Patient_ID
            LEFT JOIN PROVIDERS AS PR ON HS.Provider_ID = PR.Provider_ID
        WHERE A.Resolved = 'F'
          AND A.Alert_type IN ('CRITICAL', 'HIGH')
        ORDER BY A.Time_stamp DESC
    "#,
    parameters: &[],
    ordering: "Time_stamp descending",
};

pub static DEVICE_STATUS_OVERVIEW: QueryDefinition = QueryDefinition {
    name: "vitals.device_status_overview",
    version: 1,
    sql: r#"
        SELECT
            PD.Device_ID,
            PD.Patient_ID,
            CONCAT(P.First_name, ' ', P.Last_name) AS Patient_Name,
            PD.Patch_status AS Device_Status,
            PD.Vital_status AS Vital_Status,
            PD.Thresholds_ID AS Threshold_ID,
            PD.Patient_address AS Monitoring_Location
        FROM PATCH_DEVICE AS PD
            INNER JOIN PATIENTS AS P ON PD.Patient_ID = P.Patient_ID
        ORDER BY PD.Device_ID
    "#,
    parameters: &[],
    ordering: "Device_ID ascending",
};

/// Top ten HIGH/ELEVATED heart-rate alerts, already in the client's shape.
pub static HIGH_HEART_RATE: QueryDefinition = QueryDefinition {
    name: "vitals.high_heart_rate",
    version: 1,
    sql: r#"
        SELECT
            p.Patient_ID AS patientId,
            CONCAT(p.First_name, ' ', p.Last_name) AS patientName,
            v.Heart_rate AS heartRate,
            a.Alert_type AS alertType,
            a.Time_stamp AS alertTime
        FROM PATIENTS p
            JOIN VITALS v ON p.Patient_ID = v.Patient_ID
            JOIN ALERTS a ON p.Patient_ID = a.Patient_ID
        WHERE a.Alert_type IN ('HIGH', 'ELEVATED')
        ORDER BY v.Heart_rate DESC, a.Time_stamp DESC
        LIMIT 10
    "#,
    parameters: &[],
    ordering: "Heart_rate descending, then Time_stamp descending; at most 10 rows",
};

/// Dispatches with the latest vitals reading per patient.
pub static EMERGENCY_DISPATCH_SUMMARY: QueryDefinition = QueryDefinition {
    name: "vitals.emergency_dispatch_summary",
    version: 1,
    sql: r#"
        SELECT
            ED.Dispatch_ID,
            ED.Patient_ID,
            ED.Alert_ID,
            ED.Dispatch_time,
            ED.Arrival_time,
            ED.Status AS Dispatch_Status,
            ED.Notes AS Dispatch_Notes,
            P.First_name,
            P.Last_name,
            P.Full_name AS Patient_Name,
            P.Age AS Patient_Age,
            P.Medical_history,
            P.Patient_phone_num,
            P.Patient_address,
            A.Alert_type,
            A.Time_stamp AS Alert_Time,
            PD.Vital_status,
            PD.Patch_status,
            V.Blood_pressure,
            V.Heart_rate,
            V.Body_temperature,
            V.Oxygen_saturation,
            V.Breathing_rate,
            V.Time_stamp AS Vitals_Time
        FROM EMERGENCY_DISPATCH AS ED
            JOIN PATIENTS AS P ON ED.Patient_ID = P.Patient_ID
            JOIN ALERTS AS A ON ED.Alert_ID = A.Alert_ID
            JOIN PATCH_DEVICE AS PD ON P.Patient_ID = PD.Patient_ID
            JOIN VITALS AS V ON P.Patient_ID = V.Patient_ID
        WHERE V.Time_stamp = (
            SELECT MAX(Time_stamp)
            FROM VITALS V2
            WHERE V2.Patient_ID = P.Patient_ID
        )
        ORDER BY
            CASE ED.Status
                WHEN 'Pending' THEN 1
                WHEN 'Dispatched' THEN 2
                WHEN 'Arrived' THEN 3
                WHEN 'Resolved' THEN 4
            END,
            ED.Dispatch_time DESC
    "#,
    parameters: &[],
    ordering: "Pending, Dispatched, Arrived, Resolved; then Dispatch_time descending",
};
