//! Schema compiler scenario tests
//!
//! End-to-end checks of compile + validate on realistic descriptor lists.

use formforge_forms::{
	CompiledSchema, FieldDescriptor, FieldType, FormDefinition, ValidationConfig, Widget, compile,
};
use rstest::*;
use serde_json::{Value, json};
use std::collections::HashMap;

fn values(raw: Value) -> HashMap<String, Value> {
	serde_json::from_value(raw).unwrap()
}

#[fixture]
fn email_age_schema() -> CompiledSchema {
	compile(&[
		FieldDescriptor::new(FieldType::Email, "email")
			.with_validation(ValidationConfig::new().required()),
		FieldDescriptor::new(FieldType::Number, "age")
			.with_validation(ValidationConfig::new().with_min(18.0).with_max(99.0)),
	])
}

#[rstest]
fn test_invalid_email_and_underage(email_age_schema: CompiledSchema) {
	// Act
	let errors = email_age_schema
		.validate(&values(json!({"email": "not-an-email", "age": 10})))
		.unwrap_err();

	// Assert
	assert_eq!(errors.len(), 2);
	assert_eq!(errors.get("email").unwrap(), ["email must be a valid email"]);
	let age = errors.get("age").unwrap();
	assert_eq!(age.len(), 1);
	assert!(age[0].contains("at least 18"));
}

#[rstest]
fn test_valid_email_and_age(email_age_schema: CompiledSchema) {
	// Act
	let data = email_age_schema
		.validate(&values(json!({"email": "a@b.com", "age": 25})))
		.unwrap();

	// Assert
	assert_eq!(data, values(json!({"email": "a@b.com", "age": 25})));
}

#[rstest]
fn test_numeric_string_is_coerced(email_age_schema: CompiledSchema) {
	// Act
	let data = email_age_schema
		.validate(&values(json!({"email": "a@b.com", "age": "30"})))
		.unwrap();

	// Assert
	assert_eq!(data.get("age"), Some(&json!(30)));
}

#[rstest]
#[case(json!({"tags": []}), false)]
#[case(json!({}), false)]
#[case(json!({"tags": ["x"]}), true)]
fn test_checkbox_min_items(#[case] submitted: Value, #[case] valid: bool) {
	// Arrange
	let schema = compile(&[FieldDescriptor::new(FieldType::Checkbox, "tags")
		.with_option("X", "x")
		.with_validation(ValidationConfig::new().with_min_items(1))]);

	// Act
	let result = schema.validate_json(&submitted);

	// Assert
	assert_eq!(result.is_ok(), valid);
}

#[rstest]
#[case(json!({"tags": ["a"]}), None)]
#[case(json!({"tags": ["a", "b"]}), Some("Tags must have at most 1 item(s)"))]
fn test_checkbox_max_items(#[case] submitted: Value, #[case] expected: Option<&str>) {
	// Arrange
	let schema = compile(&[FieldDescriptor::new(FieldType::Checkbox, "tags")
		.with_label("Tags")
		.with_option("A", "a")
		.with_option("B", "b")
		.with_validation(ValidationConfig::new().with_max_items(1))]);

	// Act
	let result = schema.validate_json(&submitted);

	// Assert
	match expected {
		None => assert!(result.is_ok()),
		Some(message) => assert_eq!(result.unwrap_err().get("tags").unwrap(), [message]),
	}
}

#[rstest]
#[case(json!([]), Some("Attachments must have at least 1 item(s)"))]
#[case(json!([{"name": "a.pdf", "size": 10}]), None)]
#[case(json!(["https://cdn.example.com/a.pdf", {"name": "b.pdf", "size": 10}]), None)]
#[case(
	json!([{"name": "a.pdf", "size": 10}, {"name": "b.pdf", "size": 10}, {"name": "c.pdf", "size": 10}]),
	Some("Attachments must have at most 2 item(s)")
)]
fn test_multiple_file_item_bounds(#[case] files: Value, #[case] expected: Option<&str>) {
	// Arrange
	let schema = compile(&[FieldDescriptor::new(FieldType::File, "attachments")
		.with_label("Attachments")
		.multiple()
		.with_validation(ValidationConfig::new().with_min_items(1).with_max_items(2))]);

	// Act
	let result = schema.validate_json(&json!({"attachments": files}));

	// Assert
	match expected {
		None => assert!(result.is_ok()),
		Some(message) => assert_eq!(
			result.unwrap_err().get("attachments").unwrap(),
			[message]
		),
	}
}

#[rstest]
fn test_multiple_file_max_size() {
	// Arrange
	let schema = compile(&[FieldDescriptor::new(FieldType::File, "attachments")
		.multiple()
		.with_validation(ValidationConfig::new().with_max_size(1_048_576))]);
	let two_mb = json!({"name": "big.pdf", "size": 2 * 1_048_576});
	let one_mb = json!({"name": "ok.pdf", "size": 1_048_576});
	let small = json!({"name": "tiny.pdf", "size": 300});

	// Act
	let too_big = schema.validate_json(&json!({"attachments": [two_mb]}));
	let fine = schema.validate_json(&json!({"attachments": [one_mb, small]}));

	// Assert
	let errors = too_big.unwrap_err();
	assert!(errors.get("attachments").unwrap()[0].contains("1 MB"));
	assert_eq!(
		fine.unwrap().get("attachments"),
		Some(&json!([{"name": "ok.pdf", "size": 1_048_576}, {"name": "tiny.pdf", "size": 300}]))
	);
}

#[rstest]
fn test_password_rules_are_reported_separately() {
	// Arrange
	let schema = compile(&[FieldDescriptor::new(FieldType::Password, "password")
		.with_validation(ValidationConfig::new().with_pattern())]);

	// Act
	let no_upper = schema
		.validate_json(&json!({"password": "secret1!"}))
		.unwrap_err();
	let no_digit = schema
		.validate_json(&json!({"password": "Secret!!"}))
		.unwrap_err();

	// Assert
	let no_upper = no_upper.get("password").unwrap();
	let no_digit = no_digit.get("password").unwrap();
	assert_eq!(no_upper.len(), 1);
	assert_eq!(no_digit.len(), 1);
	assert_ne!(no_upper[0], no_digit[0]);
}

#[rstest]
fn test_required_number_treats_garbage_as_missing() {
	// Arrange
	let schema = compile(&[FieldDescriptor::new(FieldType::Number, "budget")
		.with_label("Budget")
		.with_validation(ValidationConfig::new().required())]);

	// Act
	let empty = schema.validate_json(&json!({"budget": ""})).unwrap_err();
	let garbage = schema.validate_json(&json!({"budget": "lots"})).unwrap_err();

	// Assert
	assert_eq!(empty, garbage);
	assert_eq!(garbage.get("budget").unwrap(), ["Budget is required"]);
}

#[rstest]
fn test_errors_stay_with_their_field() {
	// Arrange
	let schema = compile(&[
		FieldDescriptor::new(FieldType::ShortText, "first")
			.with_label("First")
			.with_validation(ValidationConfig::new().required().with_min_length(2)),
		FieldDescriptor::new(FieldType::Slider, "volume")
			.with_label("Volume")
			.with_validation(ValidationConfig::new().with_max(10.0)),
		FieldDescriptor::new(FieldType::Switch, "ok"),
	]);

	// Act
	let errors = schema
		.validate_json(&json!({"first": "", "volume": 11}))
		.unwrap_err();

	// Assert
	assert_eq!(
		errors.get("first").unwrap(),
		["First is required", "First must be at least 2 characters"]
	);
	assert_eq!(errors.get("volume").unwrap(), ["Volume must be at most 10"]);
	assert!(!errors.contains("ok"));
}

#[rstest]
fn test_agent_settings_definition_end_to_end() {
	// Arrange
	let definition = FormDefinition::from_json_str(
		r#"{
			"title": "Agent settings",
			"fields": [
				{"type": "shortText", "name": "name", "label": "Agent name",
				 "validation": {"required": true, "maxLength": 40}},
				{"type": "longText", "name": "system_prompt", "rows": 8,
				 "validation": {"maxLength": 2000}},
				{"type": "select", "name": "model",
				 "options": [{"label": "Small", "value": "small"}, {"label": "Large", "value": "large"}],
				 "validation": {"required": true}},
				{"type": "slider", "name": "temperature", "validation": {"min": 0, "max": 2}},
				{"type": "switch", "name": "public"}
			]
		}"#,
	)
	.unwrap();
	let schema = definition.compile();

	// Act
	let data = schema
		.validate_json(&json!({
			"name": "Support bot",
			"model": "small",
			"temperature": 0.7
		}))
		.unwrap();

	// Assert
	assert_eq!(
		data,
		values(json!({
			"name": "Support bot",
			"model": "small",
			"temperature": 0.7,
			"public": false
		}))
	);
	let plan = schema.metadata();
	assert_eq!(plan[1].control, Widget::TextArea);
	assert_eq!(plan[1].attrs.rows, Some(8));
	assert_eq!(plan[3].attrs.max, Some(2.0));
	assert_eq!(plan[3].attrs.step, Some(1.0));
}
