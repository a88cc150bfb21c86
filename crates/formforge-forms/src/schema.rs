//! Descriptor-list compiler
//!
//! [`compile`] turns an ordered descriptor list into a [`CompiledSchema`].
//! Compilation is pure and infallible: invalid submitted values are reported
//! by [`CompiledSchema::validate`], while invalid descriptor lists are a
//! programmer error (see [`check_descriptors`](crate::lint::check_descriptors)
//! for a reported variant).

use crate::descriptor::FieldDescriptor;
use crate::error::ValidationErrors;
use crate::metadata::FieldMetadata;
use crate::rules::FieldRule;
use serde_json::Value;
use std::collections::HashMap;

/// Normalized value map returned by a successful validation
pub type ValidatedData = HashMap<String, Value>;

pub type ValidationResult = Result<ValidatedData, ValidationErrors>;

/// Compile a descriptor list
///
/// Field names must be unique. Duplicates trip a debug assertion; release
/// builds keep the last descriptor for a name.
///
/// # Examples
///
/// ```
/// use formforge_forms::{compile, FieldDescriptor, FieldType, ValidationConfig};
/// use serde_json::json;
/// use std::collections::HashMap;
///
/// let schema = compile(&[
///     FieldDescriptor::new(FieldType::Email, "email")
///         .with_validation(ValidationConfig::new().required()),
///     FieldDescriptor::new(FieldType::Number, "age")
///         .with_validation(ValidationConfig::new().with_min(18.0).with_max(99.0)),
/// ]);
///
/// let mut values = HashMap::new();
/// values.insert("email".to_string(), json!("not-an-email"));
/// values.insert("age".to_string(), json!(10));
///
/// let errors = schema.validate(&values).unwrap_err();
/// assert_eq!(errors.get("email").unwrap(), ["email must be a valid email"]);
/// assert_eq!(errors.get("age").unwrap(), ["age must be at least 18"]);
/// ```
pub fn compile(descriptors: &[FieldDescriptor]) -> CompiledSchema {
	CompiledSchema::compile(descriptors)
}

/// Immutable validator produced by [`compile`]
///
/// Holds one [`FieldRule`] per descriptor, in descriptor order, plus the
/// render plan. Safe to share across threads and to validate repeatedly.
#[derive(Debug, Clone)]
pub struct CompiledSchema {
	rules: Vec<FieldRule>,
	metadata: Vec<FieldMetadata>,
}

impl CompiledSchema {
	pub fn compile(descriptors: &[FieldDescriptor]) -> Self {
		let unique = last_per_name(descriptors);
		debug_assert!(
			unique.len() == descriptors.len(),
			"duplicate field name in descriptor list"
		);

		let schema = Self::from_unique(&unique);
		tracing::debug!(fields = schema.rules.len(), "compiled form schema");
		schema
	}

	fn from_unique(descriptors: &[&FieldDescriptor]) -> Self {
		Self {
			rules: descriptors
				.iter()
				.map(|descriptor| FieldRule::from_descriptor(descriptor))
				.collect(),
			metadata: descriptors
				.iter()
				.map(|descriptor| FieldMetadata::from_descriptor(descriptor))
				.collect(),
		}
	}

	/// Validate a submitted value map
	///
	/// Every described field is checked; missing entries count as absent and
	/// undescribed keys are ignored. On success the map holds only described
	/// fields with their normalized values.
	pub fn validate(&self, values: &HashMap<String, Value>) -> ValidationResult {
		self.run(|name| values.get(name))
	}

	/// Validate a JSON object; anything else is treated as an empty map
	///
	/// # Examples
	///
	/// ```
	/// use formforge_forms::{compile, FieldDescriptor, FieldType, ValidationConfig};
	/// use serde_json::json;
	///
	/// let schema = compile(&[FieldDescriptor::new(FieldType::Checkbox, "tags")
	///     .with_validation(ValidationConfig::new().with_min_items(1))]);
	///
	/// assert!(schema.validate_json(&json!({"tags": []})).is_err());
	///
	/// let data = schema.validate_json(&json!({"tags": ["x"], "extra": 1})).unwrap();
	/// assert_eq!(data.get("tags"), Some(&json!(["x"])));
	/// assert!(!data.contains_key("extra"));
	/// ```
	pub fn validate_json(&self, values: &Value) -> ValidationResult {
		let object = values.as_object();
		self.run(|name| object.and_then(|map| map.get(name)))
	}

	fn run<'a>(&self, lookup: impl Fn(&str) -> Option<&'a Value>) -> ValidationResult {
		let mut data = ValidatedData::with_capacity(self.rules.len());
		let mut errors = ValidationErrors::new();

		for rule in &self.rules {
			match rule.apply(lookup(rule.name())) {
				Ok(Some(value)) => {
					data.insert(rule.name().to_string(), value);
				}
				Ok(None) => {}
				Err(field_errors) => {
					errors.insert(
						rule.name(),
						field_errors.iter().map(ToString::to_string).collect(),
					);
				}
			}
		}

		if errors.is_empty() {
			tracing::trace!(fields = data.len(), "form values passed validation");
			Ok(data)
		} else {
			tracing::trace!(failed = errors.len(), "form values failed validation");
			Err(errors)
		}
	}

	pub fn rule(&self, name: &str) -> Option<&FieldRule> {
		self.rules.iter().find(|rule| rule.name() == name)
	}

	pub fn rules(&self) -> &[FieldRule] {
		&self.rules
	}

	pub fn field_names(&self) -> impl Iterator<Item = &str> {
		self.rules.iter().map(FieldRule::name)
	}

	/// Render plan for the generic form renderer
	pub fn metadata(&self) -> &[FieldMetadata] {
		&self.metadata
	}

	pub fn len(&self) -> usize {
		self.rules.len()
	}

	pub fn is_empty(&self) -> bool {
		self.rules.is_empty()
	}
}

// One descriptor per name: the last one, at the first one's position.
fn last_per_name(descriptors: &[FieldDescriptor]) -> Vec<&FieldDescriptor> {
	let mut unique: Vec<&FieldDescriptor> = Vec::with_capacity(descriptors.len());
	let mut positions: HashMap<&str, usize> = HashMap::with_capacity(descriptors.len());

	for descriptor in descriptors {
		match positions.get(descriptor.name.as_str()) {
			Some(&index) => unique[index] = descriptor,
			None => {
				positions.insert(descriptor.name.as_str(), unique.len());
				unique.push(descriptor);
			}
		}
	}

	unique
}
