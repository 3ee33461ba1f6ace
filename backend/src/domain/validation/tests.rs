//! Behaviour of the derived validators.

use super::*;
use crate::domain::schema::{CONTACT_SUBMISSIONS, USERS};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

#[fixture]
fn schemas() -> Schemas {
    Schemas::new()
}

fn full_submission() -> Value {
    json!({
        "name": "John Doe",
        "email": "john@example.com",
        "company": "Acme Corp",
        "service": "accounting",
        "message": "I need help"
    })
}

fn without(mut payload: Value, field: &str) -> Value {
    if let Some(object) = payload.as_object_mut() {
        object.remove(field);
    }
    payload
}

fn with(mut payload: Value, field: &str, value: Value) -> Value {
    if let Some(object) = payload.as_object_mut() {
        object.insert(field.to_owned(), value);
    }
    payload
}

fn issue_kind(failure: &ValidationFailure, field: &str) -> Option<IssueKind> {
    failure.issue_for(field).map(FieldIssue::kind)
}

#[rstest]
fn insert_view_requires_only_undefaulted_non_null_columns() {
    let users = Validator::insert(&USERS);
    let required: Vec<_> = users.required_fields().collect();
    assert_eq!(required, ["username", "password"]);

    let submissions = Validator::insert(&CONTACT_SUBMISSIONS);
    let required: Vec<_> = submissions.required_fields().collect();
    assert_eq!(required, ["name", "email", "message"]);
}

#[rstest]
fn select_view_requires_every_column() {
    let validator = Validator::select(&CONTACT_SUBMISSIONS);
    let required: Vec<_> = validator.required_fields().collect();
    let declared: Vec<_> = CONTACT_SUBMISSIONS.columns().iter().map(|c| c.name()).collect();
    assert_eq!(required, declared);
    assert_eq!(validator.view(), View::Select);
    assert_eq!(validator.table(), "contact_submissions");
}

#[rstest]
fn public_submission_validator_declares_exactly_the_public_fields(schemas: Schemas) {
    let fields: Vec<_> = schemas.create_contact_submission().fields().collect();
    assert_eq!(fields, PUBLIC_SUBMISSION_FIELDS);
}

#[rstest]
fn pick_ignores_unknown_names() {
    let validator = Validator::insert(&USERS).pick(&["username", "nickname"]);
    let fields: Vec<_> = validator.fields().collect();
    assert_eq!(fields, ["username"]);
}

#[rstest]
fn accepts_a_complete_submission(schemas: Schemas) {
    let record = schemas
        .create_contact_submission()
        .validate(&full_submission())
        .expect("complete submission is valid");
    let names: Vec<_> = record.field_names().collect();
    assert_eq!(names, PUBLIC_SUBMISSION_FIELDS);
    assert_eq!(record.to_json(), full_submission());
}

#[rstest]
#[case("not-an-email")]
#[case("john at example dot com")]
#[case("@")]
fn email_format_is_not_checked(schemas: Schemas, #[case] email: &str) {
    let payload = with(full_submission(), "email", json!(email));
    assert!(schemas.create_contact_submission().validate(&payload).is_ok());
}

#[rstest]
#[case("name")]
#[case("email")]
#[case("message")]
fn rejects_submissions_missing_a_required_field(schemas: Schemas, #[case] field: &str) {
    let payload = without(full_submission(), field);
    let failure = schemas
        .create_contact_submission()
        .validate(&payload)
        .expect_err("required field absent");
    let missing: Vec<_> = failure.missing_fields().collect();
    assert_eq!(missing, [field]);
}

#[rstest]
#[case("company")]
#[case("service")]
fn optional_submission_fields_may_be_omitted_or_null(schemas: Schemas, #[case] field: &str) {
    let validator = schemas.create_contact_submission();
    let omitted = validator
        .validate(&without(full_submission(), field))
        .expect("optional field omitted");
    assert!(!omitted.contains(field));

    let nulled = validator
        .validate(&with(full_submission(), field, Value::Null))
        .expect("optional field null");
    assert_eq!(nulled.get(field), Some(&FieldValue::Null));
}

#[rstest]
fn name_only_submission_reports_email_and_message(schemas: Schemas) {
    let failure = schemas
        .create_contact_submission()
        .validate(&json!({"name": "John Doe"}))
        .expect_err("incomplete submission");
    let missing: Vec<_> = failure.missing_fields().collect();
    assert_eq!(missing, ["email", "message"]);
    assert!(failure.issue_for("company").is_none());
    assert!(failure.issue_for("service").is_none());
}

#[rstest]
fn client_supplied_generated_columns_are_stripped(schemas: Schemas) {
    let payload = with(
        with(full_submission(), "id", json!(99)),
        "created_at",
        json!("2020-01-01T00:00:00Z"),
    );
    let record = schemas
        .create_contact_submission()
        .validate(&payload)
        .expect("extra keys are ignored");
    assert!(!record.contains("id"));
    assert!(!record.contains("created_at"));
}

#[rstest]
fn unknown_keys_are_stripped(schemas: Schemas) {
    let payload = with(full_submission(), "newsletter", json!(true));
    let record = schemas
        .create_contact_submission()
        .validate(&payload)
        .expect("unknown keys are ignored");
    assert!(!record.contains("newsletter"));
}

#[rstest]
#[case("name", 255)]
#[case("email", 255)]
#[case("company", 255)]
#[case("service", 255)]
#[case("message", 2000)]
fn enforces_column_length_limits(schemas: Schemas, #[case] field: &str, #[case] max: usize) {
    let validator = schemas.create_contact_submission();
    let at_limit = with(full_submission(), field, json!("x".repeat(max)));
    assert!(validator.validate(&at_limit).is_ok());

    let over_limit = with(full_submission(), field, json!("x".repeat(max + 1)));
    let failure = validator.validate(&over_limit).expect_err("value too long");
    assert_eq!(
        issue_kind(&failure, field),
        Some(IssueKind::TooLong {
            max,
            actual: max + 1
        })
    );
}

#[rstest]
fn length_counts_characters_not_bytes(schemas: Schemas) {
    let payload = with(full_submission(), "name", json!("é".repeat(255)));
    assert!(schemas.create_contact_submission().validate(&payload).is_ok());
}

#[rstest]
#[case(json!(42))]
#[case(json!(true))]
#[case(json!(["John"]))]
#[case(json!({"first": "John"}))]
#[case(Value::Null)]
fn rejects_non_string_required_text(schemas: Schemas, #[case] value: Value) {
    let payload = with(full_submission(), "name", value);
    let failure = schemas
        .create_contact_submission()
        .validate(&payload)
        .expect_err("name must be a string");
    assert_eq!(
        issue_kind(&failure, "name"),
        Some(IssueKind::InvalidType { expected: "string" })
    );
}

#[rstest]
fn rejects_empty_required_text_but_not_empty_optional_text(schemas: Schemas) {
    let validator = schemas.create_contact_submission();
    let failure = validator
        .validate(&with(full_submission(), "message", json!("")))
        .expect_err("empty message");
    assert_eq!(issue_kind(&failure, "message"), Some(IssueKind::Empty));

    assert!(
        validator
            .validate(&with(full_submission(), "company", json!("")))
            .is_ok()
    );
}

#[rstest]
#[case(json!("name=John"))]
#[case(json!([1, 2, 3]))]
#[case(Value::Null)]
fn rejects_payloads_that_are_not_objects(schemas: Schemas, #[case] payload: Value) {
    let failure = schemas
        .create_contact_submission()
        .validate(&payload)
        .expect_err("not an object");
    assert_eq!(issue_kind(&failure, PAYLOAD_FIELD), Some(IssueKind::NotAnObject));
}

#[rstest]
fn reports_every_issue_in_column_order(schemas: Schemas) {
    let failure = schemas
        .create_contact_submission()
        .validate(&json!({"email": 7, "company": "x".repeat(300)}))
        .expect_err("several issues");
    let fields: Vec<_> = failure.issues().iter().map(FieldIssue::field).collect();
    assert_eq!(fields, ["name", "email", "company", "message"]);
}

#[rstest]
fn validation_is_idempotent(schemas: Schemas) {
    let validator = schemas.create_contact_submission();
    for payload in [full_submission(), json!({"name": "John Doe"})] {
        assert_eq!(validator.validate(&payload), validator.validate(&payload));
    }
}

#[rstest]
fn accepts_a_complete_user(schemas: Schemas) {
    let record = schemas
        .insert_user()
        .validate(&json!({"username": "johndoe", "password": "securePassword123"}))
        .expect("valid user");
    let names: Vec<_> = record.field_names().collect();
    assert_eq!(names, ["username", "password"]);
}

#[rstest]
#[case(json!({"password": "securePassword123"}), "username")]
#[case(json!({"username": "johndoe"}), "password")]
fn rejects_users_missing_credentials(
    schemas: Schemas,
    #[case] payload: Value,
    #[case] missing_field: &str,
) {
    let failure = schemas
        .insert_user()
        .validate(&payload)
        .expect_err("credential missing");
    let missing: Vec<_> = failure.missing_fields().collect();
    assert_eq!(missing, [missing_field]);
}

#[rstest]
fn insert_user_checks_optional_generated_columns_when_present(schemas: Schemas) {
    let failure = schemas
        .insert_user()
        .validate(&json!({
            "id": "not-a-uuid",
            "username": "johndoe",
            "password": "securePassword123",
            "created_at": "yesterday"
        }))
        .expect_err("bad generated columns");
    assert_eq!(
        issue_kind(&failure, "id"),
        Some(IssueKind::InvalidFormat { expected: "UUID" })
    );
    assert_eq!(
        issue_kind(&failure, "created_at"),
        Some(IssueKind::InvalidFormat {
            expected: "RFC 3339 timestamp"
        })
    );
}

#[rstest]
fn select_view_requires_nullable_keys_but_accepts_null(schemas: Schemas) {
    let row = json!({
        "id": 1,
        "name": "John Doe",
        "email": "john@example.com",
        "company": null,
        "service": null,
        "message": "I need help",
        "created_at": "2025-01-06T09:30:00+02:00"
    });
    let validator = schemas.select_contact_submission();
    let record = validator.validate(&row).expect("complete row");
    assert_eq!(record.len(), 7);

    let failure = validator
        .validate(&without(row, "company"))
        .expect_err("select view needs every key");
    let missing: Vec<_> = failure.missing_fields().collect();
    assert_eq!(missing, ["company"]);
}

#[rstest]
#[case(json!(1.5))]
#[case(json!("1"))]
#[case(json!(4_294_967_296_i64))]
fn select_view_requires_32_bit_integer_ids(schemas: Schemas, #[case] id: Value) {
    let row = json!({
        "id": id,
        "name": "John Doe",
        "email": "john@example.com",
        "company": null,
        "service": null,
        "message": "I need help",
        "created_at": "2025-01-06T09:30:00Z"
    });
    let failure = schemas
        .select_contact_submission()
        .validate(&row)
        .expect_err("bad id");
    assert_eq!(
        issue_kind(&failure, "id"),
        Some(IssueKind::InvalidType {
            expected: "32-bit integer"
        })
    );
}

#[rstest]
fn insert_output_plus_generated_columns_satisfies_select_view(schemas: Schemas) {
    let mut row = schemas
        .create_contact_submission()
        .validate(&without(full_submission(), "service"))
        .expect("valid submission")
        .to_json();
    if let Some(object) = row.as_object_mut() {
        object.insert("id".to_owned(), json!(1));
        object.insert("service".to_owned(), Value::Null);
        object.insert("created_at".to_owned(), json!("2025-01-06T09:30:00Z"));
    }
    assert!(schemas.select_contact_submission().validate(&row).is_ok());
}

#[rstest]
fn parse_reports_shape_mismatches_separately(schemas: Schemas) {
    let result: Result<crate::domain::ContactSubmission, ParseError> = schemas
        .create_contact_submission()
        .parse(&full_submission());
    assert!(matches!(
        result,
        Err(ParseError::Shape(RecordError::Missing { field: "id" }))
    ));
}
