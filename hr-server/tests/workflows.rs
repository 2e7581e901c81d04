//! End-to-end flows through the in-memory adapters

mod common;

use axum::body::Body;
use chrono::{Datelike, Utc};
use common::{TestApp, assert_failure, read_bytes};
use http::{Method, Request, StatusCode, header};
use serde_json::json;

#[tokio::test]
async fn test_asset_assignment_lifecycle() {
    let app = TestApp::new();
    let admin = app.admin_token();
    let employee = app.employee_token(12);

    let (status, body) = app
        .post(
            "/api/Asset",
            Some(&admin),
            json!({ "assetTag": "LT-100", "name": "ThinkPad", "category": "IT" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let asset_id = body["data"]["id"].as_i64().unwrap();

    let assign = json!({ "assetId": asset_id, "employeeId": 12, "condition": "New" });
    let (status, body) = app
        .post("/api/AssetAssignment/assign-to-employee", Some(&admin), assign.clone())
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["assignedBy"], "admin-1");
    let assignment_id = body["data"]["id"].as_i64().unwrap();

    let (status, _) = app
        .post("/api/AssetAssignment/assign-to-employee", Some(&admin), assign)
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = app.get("/api/AssetAssignment/my-assets", Some(&employee)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let (status, body) = app
        .post(
            &format!("/api/AssetAssignment/{assignment_id}/return"),
            Some(&admin),
            json!({ "condition": "Good" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["isActive"], false);

    let (status, body) = app
        .get(&format!("/api/AssetAssignment/asset/{asset_id}/history"), Some(&admin))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_leave_request_approval_moves_balance() {
    let app = TestApp::new();
    let employee = app.employee_token(21);
    let manager = app.token("manager-1", Some(2), "Manager", &["leave:manage", "leave:approve"]);
    let year = Utc::now().year();

    let (status, body) = app
        .post(
            "/api/LeaveManagement/requests",
            Some(&employee),
            json!({
                "leaveTypeId": 1,
                "startDate": format!("{year}-03-02"),
                "endDate": format!("{year}-03-06"),
                "reason": "Family trip"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["days"], 5);
    let request_id = body["data"]["id"].as_i64().unwrap();

    // Another employee cannot read it
    let stranger = app.employee_token(22);
    let (status, body) = app
        .get(&format!("/api/LeaveManagement/requests/{request_id}"), Some(&stranger))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_failure(&body);

    let (status, body) = app
        .post(
            &format!("/api/LeaveManagement/requests/{request_id}/approve"),
            Some(&manager),
            json!({ "comment": "Enjoy" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "Approved");
    assert_eq!(body["data"]["reviewedBy"], "manager-1");

    let (status, body) = app.get("/api/LeaveManagement/balances/my", Some(&employee)).await;
    assert_eq!(status, StatusCode::OK);
    let annual = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .find(|b| b["leaveTypeId"] == 1)
        .unwrap()
        .clone();
    assert_eq!(annual["usedDays"], 5);
    assert_eq!(annual["remainingDays"], 15);

    // Decided requests cannot be approved twice
    let (status, _) = app
        .post(
            &format!("/api/LeaveManagement/requests/{request_id}/approve"),
            Some(&manager),
            json!({}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_expense_flow_feeds_reports_and_csv_export() {
    let app = TestApp::new();
    let employee = app.employee_token(31);
    let finance = app.token(
        "finance-1",
        Some(3),
        "Manager",
        &["expenses:read_all", "expenses:approve", "reports:view"],
    );
    let today = Utc::now().date_naive();

    let (status, body) = app
        .post(
            "/api/Expense",
            Some(&employee),
            json!({
                "categoryId": 1,
                "amount": 120.5,
                "currency": "EUR",
                "expenseDate": today.to_string(),
                "description": "Train to client site",
                "department": "Sales",
                "receiptUrl": "https://receipts.example.com/r/1"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["status"], "Draft");
    let expense_id = body["data"]["id"].as_i64().unwrap();

    let (status, body) = app
        .post(&format!("/api/Expense/{expense_id}/submit"), Some(&employee), json!({}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "Submitted");

    // Submitted expenses are frozen for the owner
    let (status, _) = app
        .send(
            Method::DELETE,
            &format!("/api/Expense/{expense_id}"),
            Some(&employee),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app
        .post(&format!("/api/Expense/{expense_id}/approve"), Some(&finance), json!({}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "Approved");

    let (status, body) = app
        .get("/api/FinancialReports/department-costs", Some(&finance))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["departments"][0]["department"], "Sales");
    assert_eq!(body["data"]["departments"][0]["employeeCount"], 1);

    let request = Request::builder()
        .uri("/api/FinancialReports/export?reportType=DepartmentCosts")
        .header(header::AUTHORIZATION, format!("Bearer {finance}"))
        .body(Body::empty())
        .unwrap();
    let response = app.request(request).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "text/csv");
    let disposition = response.headers()[header::CONTENT_DISPOSITION]
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.starts_with("attachment; filename=\"department-costs_all_all"));

    let csv = String::from_utf8(read_bytes(response).await).unwrap();
    let mut lines = csv.lines();
    assert_eq!(
        lines.next(),
        Some("Department,Approved Amount,Pending Amount,Expense Count,Employee Count")
    );
    assert!(lines.next().unwrap().starts_with("Sales,120.5"));
}

#[tokio::test]
async fn test_inverted_report_period_is_400() {
    let app = TestApp::new();
    let token = app.token("finance-1", Some(3), "Manager", &["reports:view"]);

    let (status, body) = app
        .get(
            "/api/FinancialReports/expense-summary?from=2026-05-01&to=2026-04-01",
            Some(&token),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"], json!(["from: must not be after to"]));
}

#[tokio::test]
async fn test_role_permission_ceiling() {
    let app = TestApp::new();
    let lead = app.token("lead-1", Some(5), "Manager", &["roles:write", "assets:read"]);

    let (status, body) = app
        .post(
            "/api/Role",
            Some(&lead),
            json!({ "name": "Auditor", "permissions": ["assets:read"] }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["isSystem"], false);

    let (status, body) = app
        .post(
            "/api/Role",
            Some(&lead),
            json!({ "name": "Approver", "permissions": ["expenses:approve"] }),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_failure(&body);

    let (status, _) = app
        .post(
            "/api/Role",
            Some(&lead),
            json!({ "name": "Broken", "permissions": ["teleport:now"] }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Assigning Admin would hand out `all`
    let (status, _) = app
        .post(
            "/api/Role/assign",
            Some(&lead),
            json!({ "userId": "user-77", "roleId": 1 }),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_system_roles_are_immutable() {
    let app = TestApp::new();
    let admin = app.admin_token();

    let (status, body) = app
        .send(Method::DELETE, "/api/Role/1", Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_failure(&body);

    let (status, body) = app.get("/api/Role/permissions", Some(&admin)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 17);
}

#[tokio::test]
async fn test_report_schedule_run_records_history() {
    let app = TestApp::new();
    let token = app.token("finance-1", Some(3), "Manager", &["reports:schedule"]);

    let (status, body) = app
        .post(
            "/api/ReportSchedules",
            Some(&token),
            json!({
                "name": "Monthly costs",
                "reportType": "DepartmentCosts",
                "cronExpression": "0 6 1 * *",
                "recipients": ["finance@example.com"]
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["createdBy"], "finance-1");
    let id = body["data"]["id"].as_i64().unwrap();

    let (status, body) = app
        .post(&format!("/api/ReportSchedules/{id}/run"), Some(&token), json!({}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "Completed");

    let (status, body) = app
        .get(&format!("/api/ReportSchedules/{id}/runs"), Some(&token))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let (status, body) = app
        .post(
            "/api/ReportSchedules",
            Some(&token),
            json!({
                "name": "Broken",
                "reportType": "ExpenseSummary",
                "cronExpression": "every monday",
                "recipients": ["finance@example.com"]
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_failure(&body);

    let (status, _) = app.get("/api/ReportSchedules/404/runs", Some(&token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_email_campaign_send() {
    let app = TestApp::new();
    let token = app.token("comms-1", Some(6), "Manager", &["email:manage"]);

    let (status, body) = app
        .post(
            "/api/Email/campaigns",
            Some(&token),
            json!({
                "name": "Benefits update",
                "subject": "New benefits",
                "bodyHtml": "<p>Hello</p>",
                "recipients": ["a@example.com", "b@example.com"]
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["data"]["id"].as_i64().unwrap();

    let (status, body) = app
        .post(&format!("/api/Email/campaigns/{id}/send"), Some(&token), json!({}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["sentCount"], 2);

    let (status, _) = app
        .post(&format!("/api/Email/campaigns/{id}/cancel"), Some(&token), json!({}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_blank_required_names_are_rejected() {
    let app = TestApp::new();
    let admin = app.admin_token();

    let (status, body) = app
        .post(
            "/api/Asset",
            Some(&admin),
            json!({ "assetTag": "   ", "name": "ThinkPad", "category": "IT" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_failure(&body);
    assert_eq!(body["errors"], json!(["assetTag: must not be blank"]));

    let (status, body) = app
        .post("/api/Role", Some(&admin), json!({ "name": "   " }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"], json!(["name: must not be blank"]));

    let (status, body) = app
        .post("/api/Role", Some(&admin), json!({ "name": "Auditor" }))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let role_id = body["data"]["id"].as_i64().unwrap();
    let (status, body) = app
        .send(
            Method::PUT,
            &format!("/api/Role/{role_id}"),
            Some(&admin),
            Some(json!({ "name": " \t " })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_failure(&body);

    let schedule = json!({
        "name": "  ",
        "reportType": "ExpenseSummary",
        "cronExpression": "0 6 1 * *",
        "recipients": ["finance@example.com"]
    });
    let (status, body) = app.post("/api/ReportSchedules", Some(&admin), schedule).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"], json!(["name: must not be blank"]));
}
