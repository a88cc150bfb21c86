//! Form definitions stored as data files
//!
//! A definition is a titled descriptor list kept in JSON (as form builders
//! export it) or TOML (hand-written, one `[[fields]]` table per field).
//! Loading runs [`check_descriptors`] so malformed lists are reported
//! instead of asserted.

use crate::descriptor::FieldDescriptor;
use crate::lint::{SchemaError, check_descriptors};
use crate::schema::CompiledSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum DefinitionError {
	#[error("Failed to read form definition: {0}")]
	Io(#[from] std::io::Error),
	#[error("Invalid JSON form definition: {0}")]
	Json(#[from] serde_json::Error),
	#[error("Invalid TOML form definition: {0}")]
	Toml(#[from] toml::de::Error),
	#[error("Unsupported form definition format: {0}")]
	UnsupportedFormat(String),
	#[error(transparent)]
	Schema(#[from] SchemaError),
}

pub type DefinitionResult<T> = Result<T, DefinitionError>;

/// Titled, ordered descriptor list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormDefinition {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub title: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	#[serde(default)]
	pub fields: Vec<FieldDescriptor>,
}

impl FormDefinition {
	/// Parse and check a JSON definition
	///
	/// # Examples
	///
	/// ```
	/// use formforge_forms::FormDefinition;
	///
	/// let definition = FormDefinition::from_json_str(r#"{
	///     "title": "Contact",
	///     "fields": [
	///         {"type": "email", "name": "email", "validation": {"required": true}},
	///         {"type": "longText", "name": "message", "rows": 6}
	///     ]
	/// }"#).unwrap();
	///
	/// assert_eq!(definition.title.as_deref(), Some("Contact"));
	/// assert_eq!(definition.fields.len(), 2);
	/// ```
	pub fn from_json_str(raw: &str) -> DefinitionResult<Self> {
		let definition: Self = serde_json::from_str(raw)?;
		definition.checked()
	}

	/// Parse and check a TOML definition
	///
	/// # Examples
	///
	/// ```
	/// use formforge_forms::FormDefinition;
	///
	/// let definition = FormDefinition::from_toml_str(r#"
	///     title = "Agent settings"
	///
	///     [[fields]]
	///     type = "shortText"
	///     name = "agent_name"
	///     validation = { required = true, maxLength = 60 }
	/// "#).unwrap();
	///
	/// assert_eq!(definition.fields[0].name, "agent_name");
	/// ```
	pub fn from_toml_str(raw: &str) -> DefinitionResult<Self> {
		let definition: Self = toml::from_str(raw)?;
		definition.checked()
	}

	/// Load a definition file, choosing the format by extension
	pub fn from_path(path: impl AsRef<Path>) -> DefinitionResult<Self> {
		let path = path.as_ref();
		let extension = path
			.extension()
			.and_then(|ext| ext.to_str())
			.map(str::to_ascii_lowercase);

		let loader: fn(&str) -> DefinitionResult<Self> = match extension.as_deref() {
			Some("json") => Self::from_json_str,
			Some("toml") => Self::from_toml_str,
			_ => {
				return Err(DefinitionError::UnsupportedFormat(
					path.display().to_string(),
				));
			}
		};

		let raw = fs::read_to_string(path)?;
		let definition = loader(&raw)?;
		tracing::debug!(
			path = %path.display(),
			fields = definition.fields.len(),
			"loaded form definition"
		);
		Ok(definition)
	}

	fn checked(self) -> DefinitionResult<Self> {
		check_descriptors(&self.fields)?;
		Ok(self)
	}

	pub fn compile(&self) -> CompiledSchema {
		CompiledSchema::compile(&self.fields)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::descriptor::FieldType;
	use rstest::rstest;
	use serde_json::json;
	use std::io::Write;

	const CONTACT_TOML: &str = r#"
title = "Contact"

[[fields]]
type = "email"
name = "email"
label = "Email"
validation = { required = true }

[[fields]]
type = "select"
name = "topic"
options = [
	{ label = "Sales", value = "sales" },
	{ label = "Support", value = "support" },
]
"#;

	#[rstest]
	fn test_toml_definition_compiles() {
		// Arrange
		let definition = FormDefinition::from_toml_str(CONTACT_TOML).unwrap();

		// Act
		let schema = definition.compile();
		let result = schema.validate_json(&json!({"topic": "sales"}));

		// Assert
		assert_eq!(definition.fields[1].field_type, FieldType::Select);
		assert_eq!(definition.fields[1].options.len(), 2);
		assert_eq!(
			result.unwrap_err().get("email").unwrap(),
			["Email is required"]
		);
	}

	#[rstest]
	fn test_duplicate_names_are_reported() {
		// Arrange
		let raw = r#"{"fields": [
			{"type": "shortText", "name": "a"},
			{"type": "shortText", "name": "a"}
		]}"#;

		// Act
		let err = FormDefinition::from_json_str(raw).unwrap_err();

		// Assert
		assert!(matches!(
			err,
			DefinitionError::Schema(SchemaError::DuplicateField(ref name)) if name == "a"
		));
	}

	#[rstest]
	fn test_malformed_json() {
		let err = FormDefinition::from_json_str("{\"fields\": [").unwrap_err();

		assert!(matches!(err, DefinitionError::Json(_)));
	}

	#[rstest]
	fn test_from_path_by_extension() {
		// Arrange
		let dir = tempfile::tempdir().unwrap();
		let toml_path = dir.path().join("contact.toml");
		let json_path = dir.path().join("contact.JSON");
		fs::File::create(&toml_path)
			.unwrap()
			.write_all(CONTACT_TOML.as_bytes())
			.unwrap();
		fs::write(
			&json_path,
			r#"{"fields": [{"type": "switch", "name": "subscribed"}]}"#,
		)
		.unwrap();

		// Act
		let from_toml = FormDefinition::from_path(&toml_path).unwrap();
		let from_json = FormDefinition::from_path(&json_path).unwrap();

		// Assert
		assert_eq!(from_toml.title.as_deref(), Some("Contact"));
		assert_eq!(from_json.fields[0].field_type, FieldType::Switch);
	}

	#[rstest]
	fn test_from_path_rejects_unknown_extension() {
		// Arrange
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("contact.yaml");
		fs::write(&path, "fields: []").unwrap();

		// Act
		let err = FormDefinition::from_path(&path).unwrap_err();

		// Assert
		assert!(matches!(err, DefinitionError::UnsupportedFormat(_)));
	}

	#[rstest]
	fn test_missing_file() {
		let err = FormDefinition::from_path("/nonexistent/form.json").unwrap_err();

		assert!(matches!(err, DefinitionError::Io(_)));
	}
}
