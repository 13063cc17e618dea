//! Integration tests for the school fee engine API.
//!
//! This test suite drives the HTTP router against the bundled demo school
//! configuration and covers:
//! - Monthly breakdowns with dynamic transport pricing
//! - The late-fee window
//! - Multi-month totals and submission payloads
//! - Paid/due reconciliation
//! - Report summaries
//! - Error cases

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;
use tower::ServiceExt;

use school_fee_engine::api::{AppState, create_router};
use school_fee_engine::config::ConfigLoader;

// =============================================================================
// Test Helpers
// =============================================================================

fn create_router_for_test() -> Router {
    let config = ConfigLoader::load("./config/demo_school").expect("Failed to load config");
    create_router(AppState::new(config))
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

async fn post(uri: &str, body: Value) -> (StatusCode, Value) {
    post_raw(uri, body.to_string()).await
}

async fn post_raw(uri: &str, body: String) -> (StatusCode, Value) {
    let response = create_router_for_test()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

fn student(class_name: &str, vehicle_price: &str) -> Value {
    json!({
        "id": "stu_001",
        "name": "Asha Verma",
        "rollNumber": "17",
        "className": class_name,
        "section": "A",
        "vehiclePrice": vehicle_price
    })
}

fn amount(value: &Value) -> Decimal {
    match value {
        Value::String(s) => decimal(s),
        Value::Number(n) => decimal(&n.to_string()),
        other => panic!("Expected an amount, got {}", other),
    }
}

fn component_amount(breakdown: &Value, kind: &str) -> Option<Decimal> {
    breakdown["components"]
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["kind"] == kind)
        .map(|c| amount(&c["amount"]))
}

fn month_names(value: &Value) -> Vec<String> {
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m.as_str().unwrap().to_string())
        .collect()
}

const ALL_MONTHS: [&str; 12] = [
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
    "January",
    "February",
    "March",
];

// =============================================================================
// SECTION 1: Monthly breakdowns
// =============================================================================

#[tokio::test]
async fn test_tuition_and_dynamic_transport_from_request_catalog() {
    let catalog = json!([
        {
            "className": "5-A",
            "session": "2024-25",
            "selectedFee": "Tuition Fee",
            "amount": "500",
            "feeTypeMode": "Static",
            "monthsApplicable": ALL_MONTHS
        },
        {
            "className": "5-A",
            "session": "2024-25",
            "selectedFee": "Transportation Fee",
            "feeTypeMode": "Dynamic",
            "monthsApplicable": ALL_MONTHS
        }
    ]);

    let (status, body) = post(
        "/fees/month",
        json!({
            "profile": student("5-A", "300"),
            "session": "2024-25",
            "month": "June",
            "now": "2024-06-15",
            "catalog": catalog
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["components"].as_array().unwrap().len(), 2);
    assert_eq!(component_amount(&body, "Tuition Fee"), Some(decimal("500")));
    assert_eq!(
        component_amount(&body, "Transportation Fee"),
        Some(decimal("300"))
    );
    assert_eq!(amount(&body["monthTotal"]), decimal("800"));
}

#[tokio::test]
async fn test_configured_schedule_defaults_to_current_session() {
    let (status, body) = post(
        "/fees/month",
        json!({ "profile": student("5-A", "300"), "month": "June", "now": "2024-06-15" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["session"], "2024-25");
    assert_eq!(amount(&body["monthTotal"]), decimal("800"));
}

#[tokio::test]
async fn test_static_transport_ignores_vehicle_price() {
    let (status, body) = post(
        "/fees/month",
        json!({ "profile": student("6-A", "300"), "month": "July", "now": "2024-07-01" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        component_amount(&body, "Transportation Fee"),
        Some(decimal("400"))
    );
    // 600 tuition + 400 transport + 120 laboratory.
    assert_eq!(amount(&body["monthTotal"]), decimal("1120"));
}

#[tokio::test]
async fn test_previous_session_schedule() {
    let (status, body) = post(
        "/fees/month",
        json!({
            "profile": student("5-A", "250"),
            "session": "2023-24",
            "month": "May",
            "now": "2023-05-01"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(amount(&body["monthTotal"]), decimal("700"));
}

#[tokio::test]
async fn test_breakdown_carries_audit_steps() {
    let (_, body) = post(
        "/fees/month",
        json!({ "profile": student("5-A", "300"), "month": "July", "now": "2024-08-15" }),
    )
    .await;

    let rules: Vec<&str> = body["auditSteps"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["ruleId"].as_str().unwrap())
        .collect();
    assert_eq!(
        rules,
        vec!["static_fee", "dynamic_transport_fee", "late_fee_window"]
    );
}

// =============================================================================
// SECTION 2: Late-fee window
// =============================================================================

#[tokio::test]
async fn test_june_not_surcharged_in_august() {
    let (status, body) = post(
        "/fees/month",
        json!({ "profile": student("5-A", "300"), "month": "June", "now": "2024-08-15" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(component_amount(&body, "Late Fee"), None);
    assert_eq!(amount(&body["monthTotal"]), decimal("800"));
}

#[tokio::test]
async fn test_july_surcharged_in_august() {
    let (_, body) = post(
        "/fees/month",
        json!({ "profile": student("5-A", "300"), "month": "July", "now": "2024-08-15" }),
    )
    .await;

    assert_eq!(component_amount(&body, "Late Fee"), Some(decimal("50")));
    assert_eq!(amount(&body["monthTotal"]), decimal("850"));
}

#[tokio::test]
async fn test_exam_month_with_late_fee() {
    let (_, body) = post(
        "/fees/month",
        json!({ "profile": student("5-A", "300"), "month": "September", "now": "2024-10-01" }),
    )
    .await;

    // 500 tuition + 300 transport + 150 exam + 50 late.
    assert_eq!(component_amount(&body, "Exam Fee"), Some(decimal("150")));
    assert_eq!(amount(&body["monthTotal"]), decimal("1000"));
}

#[tokio::test]
async fn test_wrap_around_surcharges_autumn_months_in_february() {
    let (_, body) = post(
        "/fees/month",
        json!({ "profile": student("5-A", "0"), "month": "November", "now": "2025-02-10" }),
    )
    .await;

    assert_eq!(component_amount(&body, "Late Fee"), Some(decimal("50")));
}

// =============================================================================
// SECTION 3: Totals and submission payloads
// =============================================================================

#[tokio::test]
async fn test_total_for_selected_months() {
    let (status, body) = post(
        "/fees/total",
        json!({
            "profile": student("5-A", "300"),
            "months": ["May", "April", "May"],
            "now": "2024-04-05"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(month_names(&body["months"]), vec!["April", "May"]);
    // April: 500 + 300 + 1000 admission; May: 500 + 300.
    assert_eq!(amount(&body["total"]), decimal("2600"));
}

#[tokio::test]
async fn test_payload_splits_amounts_per_month() {
    let (status, body) = post(
        "/fees/payload",
        json!({
            "profile": student("5-A", "300"),
            "months": ["July", "April"],
            "now": "2024-08-10"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let drafts = body.as_array().unwrap();
    assert_eq!(drafts.len(), 2);

    let april = &drafts[0];
    assert_eq!(april["month"], "April");
    assert_eq!(april["studentId"], "stu_001");
    assert_eq!(april["section"], "A");
    assert_eq!(amount(&april["totalAmount"]), decimal("1500"));
    assert_eq!(amount(&april["transportAmount"]), decimal("300"));
    assert_eq!(amount(&april["lateAmount"]), decimal("0"));
    assert_eq!(amount(&april["allTotalAmount"]), decimal("1800"));
    assert_eq!(
        amount(&april["feeAmounts"]["Admission Fee"]),
        decimal("1000")
    );

    let july = &drafts[1];
    assert_eq!(july["month"], "July");
    assert_eq!(amount(&july["lateAmount"]), decimal("50"));
    assert_eq!(amount(&july["allTotalAmount"]), decimal("850"));
    assert!(july["feeAmounts"].get("Late Fee").is_none());
    assert!(july["feeAmounts"].get("Transportation Fee").is_none());
}

#[tokio::test]
async fn test_payload_total_matches_total_endpoint() {
    let request = json!({
        "profile": student("5-A", "300"),
        "months": ["April", "July", "September", "January"],
        "now": "2025-01-20"
    });

    let (_, drafts) = post("/fees/payload", request.clone()).await;
    let (_, total) = post("/fees/total", request).await;

    let payload_sum: Decimal = drafts
        .as_array()
        .unwrap()
        .iter()
        .map(|d| amount(&d["allTotalAmount"]))
        .sum();
    assert_eq!(payload_sum, amount(&total["total"]));
}

// =============================================================================
// SECTION 4: Reconciliation
// =============================================================================

fn paid_record(month: &str) -> Value {
    json!({
        "studentId": "stu_001",
        "month": month,
        "status": "Paid",
        "totalAmount": "500",
        "transportAmount": "300",
        "lateAmount": "0",
        "allTotalAmount": "800",
        "feeAmounts": { "Tuition Fee": "500" }
    })
}

#[tokio::test]
async fn test_no_records_all_months_due() {
    let (status, body) = post(
        "/payments/reconcile",
        json!({ "profile": student("5-A", "300"), "records": [] }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paidMonths"].as_array().unwrap().is_empty());
    assert_eq!(month_names(&body["dueMonths"]), ALL_MONTHS.to_vec());
    let rows = body["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 12);
    assert!(rows.iter().all(|r| r["status"] == "Unpaid"));
    assert!(rows.iter().all(|r| r["name"] == "Asha Verma"));
}

#[tokio::test]
async fn test_april_and_may_paid_rest_due_in_calendar_order() {
    let (_, body) = post(
        "/payments/reconcile",
        json!({
            "profile": student("5-A", "300"),
            "records": [paid_record("May"), paid_record("April")]
        }),
    )
    .await;

    assert_eq!(month_names(&body["paidMonths"]), vec!["April", "May"]);
    assert_eq!(month_names(&body["dueMonths"]), ALL_MONTHS[2..].to_vec());
}

#[tokio::test]
async fn test_outstanding_due_rows_are_priced() {
    let (status, body) = post(
        "/payments/reconcile",
        json!({
            "profile": student("5-A", "300"),
            "records": [paid_record("April")],
            "includeOutstanding": true,
            "now": "2024-08-10"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let rows = body["rows"].as_array().unwrap();
    assert_eq!(rows[0]["status"], "Paid");
    assert_eq!(amount(&rows[0]["allTotalAmount"]), decimal("800"));
    // June: below the late-fee window.
    assert_eq!(rows[2]["month"], "June");
    assert_eq!(amount(&rows[2]["allTotalAmount"]), decimal("800"));
    // July: surcharged in August.
    assert_eq!(rows[3]["month"], "July");
    assert_eq!(amount(&rows[3]["allTotalAmount"]), decimal("850"));
}

#[tokio::test]
async fn test_sparse_records_with_lowercase_months_reconcile() {
    let (status, body) = post(
        "/payments/reconcile",
        json!({
            "profile": student("5-A", "300"),
            "records": [
                {
                    "month": "april",
                    "totalAmount": "500",
                    "transportAmount": null,
                    "lateAmount": null,
                    "allTotalAmount": null,
                    "feeAmounts": { "Tuition Fee": "500", "Canteen Fee": "40" }
                },
                { "month": " MAY ", "feeAmounts": null }
            ]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(month_names(&body["paidMonths"]), vec!["April", "May"]);
    let rows = body["rows"].as_array().unwrap();
    assert_eq!(amount(&rows[0]["allTotalAmount"]), decimal("500"));
    assert!(rows[0]["feeAmounts"].get("Canteen Fee").is_none());
    assert_eq!(amount(&rows[1]["allTotalAmount"]), Decimal::ZERO);
}

// =============================================================================
// SECTION 5: Report summaries
// =============================================================================

#[tokio::test]
async fn test_summary_of_reconciled_rows() {
    let (_, reconciled) = post(
        "/payments/reconcile",
        json!({
            "profile": student("5-A", "300"),
            "records": [paid_record("April"), paid_record("May")],
            "includeOutstanding": true,
            "now": "2024-06-10"
        }),
    )
    .await;

    let (status, body) = post(
        "/reports/summary",
        json!({ "rows": reconciled["rows"].clone() }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let summary = &body["summary"];
    assert_eq!(summary["totalStudents"], 12);
    assert_eq!(summary["paidCount"], 2);
    assert_eq!(summary["dueCount"], 10);
    assert_eq!(amount(&summary["totalCollected"]), decimal("1600"));

    let row_total: Decimal = reconciled["rows"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| amount(&r["allTotalAmount"]))
        .sum();
    assert_eq!(
        amount(&summary["totalCollected"]) + amount(&summary["totalDue"]),
        row_total
    );
    assert_eq!(body["byMonth"].as_object().unwrap().len(), 12);
}

#[tokio::test]
async fn test_summary_with_month_filter() {
    let (_, reconciled) = post(
        "/payments/reconcile",
        json!({ "profile": student("5-A", "300"), "records": [paid_record("April")] }),
    )
    .await;

    let (_, body) = post(
        "/reports/summary",
        json!({ "rows": reconciled["rows"].clone(), "filter": { "month": "April" } }),
    )
    .await;

    assert_eq!(body["summary"]["totalStudents"], 1);
    assert_eq!(body["summary"]["paidCount"], 1);
    assert!(body["byMonth"].get("April").is_some());
}

#[tokio::test]
async fn test_summary_of_no_rows() {
    let (status, body) = post("/reports/summary", json!({ "rows": [] })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["summary"]["totalStudents"], 0);
    assert_eq!(amount(&body["summary"]["totalDue"]), Decimal::ZERO);
}

// =============================================================================
// SECTION 6: Error cases
// =============================================================================

#[tokio::test]
async fn test_malformed_json_returns_400() {
    let (status, body) = post_raw("/fees/month", "{ not json".to_string()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "MALFORMED_JSON");
}

#[tokio::test]
async fn test_unknown_selected_month_returns_400() {
    let (status, body) = post(
        "/fees/total",
        json!({ "profile": student("5-A", "300"), "months": ["April", "Aprl"] }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "UNKNOWN_MONTH");
}

#[tokio::test]
async fn test_malformed_catalog_entries_are_skipped() {
    let (status, body) = post(
        "/fees/month",
        json!({
            "profile": student("5-A", "0"),
            "session": "2024-25",
            "month": "April",
            "now": "2024-04-01",
            "catalog": [
                { "className": "5-A", "session": "2024-25", "amount": "70", "monthsApplicable": ["April"] },
                { "className": "5-A", "session": "2024-25", "selectedFee": "Sports Fee", "amount": "-5", "monthsApplicable": ["April"] },
                { "className": "5-A", "session": "2024-25", "selectedFee": "Library Fee", "amount": "20", "monthsApplicable": ["April"] }
            ]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["components"].as_array().unwrap().len(), 1);
    assert_eq!(amount(&body["monthTotal"]), decimal("20"));
}

#[tokio::test]
async fn test_catalog_entries_with_nulls_contribute_zero() {
    let (status, body) = post(
        "/fees/month",
        json!({
            "profile": student("5-A", "0"),
            "session": "2024-25",
            "month": "April",
            "now": "2024-04-01",
            "catalog": [
                { "className": "5-A", "session": "2024-25", "selectedFee": "Tuition Fee", "amount": "500", "monthsApplicable": ["April", null] },
                { "className": "5-A", "session": "2024-25", "selectedFee": "Sports Fee", "amount": null, "monthsApplicable": ["April"] },
                { "className": "5-A", "session": "2024-25", "selectedFee": "Exam Fee", "amount": "150", "monthsApplicable": null }
            ]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(component_amount(&body, "Tuition Fee"), Some(decimal("500")));
    assert_eq!(component_amount(&body, "Sports Fee"), Some(Decimal::ZERO));
    assert_eq!(component_amount(&body, "Exam Fee"), None);
    assert_eq!(amount(&body["monthTotal"]), decimal("500"));
}

#[tokio::test]
async fn test_summary_filter_month_is_case_insensitive() {
    let (_, reconciled) = post(
        "/payments/reconcile",
        json!({ "profile": student("5-A", "300"), "records": [paid_record("April")] }),
    )
    .await;

    let (status, body) = post(
        "/reports/summary",
        json!({ "rows": reconciled["rows"].clone(), "filter": { "month": "april" } }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["summary"]["totalStudents"], 1);
}
