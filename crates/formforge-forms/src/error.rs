use serde::Serialize;
use std::collections::HashMap;

/// A single failed constraint on a single field
///
/// The `Display` output is the user-facing message rendered next to the
/// field's control.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FieldError {
	#[error("{label} must be {expected}")]
	InvalidType { label: String, expected: &'static str },
	#[error("{label} must be a valid email")]
	InvalidEmail { label: String },
	#[error("{label} is required")]
	Required { label: String },
	#[error("{label} must be at least {min} characters")]
	TooShort { label: String, min: usize },
	#[error("{label} must be at most {max} characters")]
	TooLong { label: String, max: usize },
	#[error("{label} must be at least {min}")]
	TooSmall { label: String, min: f64 },
	#[error("{label} must be at most {max}")]
	TooLarge { label: String, max: f64 },
	#[error("{label} must have at least {min} item(s)")]
	TooFewItems { label: String, min: usize },
	#[error("{label} must have at most {max} item(s)")]
	TooManyItems { label: String, max: usize },
	#[error("{label} must contain at least one uppercase letter")]
	MissingUppercase { label: String },
	#[error("{label} must contain at least one lowercase letter")]
	MissingLowercase { label: String },
	#[error("{label} must contain at least one number")]
	MissingDigit { label: String },
	#[error("{label} must contain at least one special character")]
	MissingSymbol { label: String },
	#[error("Each file in {label} must be at most {max_mb} MB")]
	FileTooLarge { label: String, max_mb: u64 },
}

pub type FieldResult<T> = Result<T, FieldError>;

/// Per-field error messages from a failed validation
///
/// Maps each failing field name to its messages, in constraint order.
/// Fields that passed never appear.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(transparent)]
#[error("{} field(s) failed validation", .errors.len())]
pub struct ValidationErrors {
	errors: HashMap<String, Vec<String>>,
}

impl ValidationErrors {
	pub(crate) fn new() -> Self {
		Self::default()
	}

	pub(crate) fn insert(&mut self, field: impl Into<String>, messages: Vec<String>) {
		if !messages.is_empty() {
			self.errors.insert(field.into(), messages);
		}
	}

	/// Messages for one field, if it failed
	pub fn get(&self, field: &str) -> Option<&[String]> {
		self.errors.get(field).map(Vec::as_slice)
	}

	pub fn contains(&self, field: &str) -> bool {
		self.errors.contains_key(field)
	}

	/// Number of failing fields
	pub fn len(&self) -> usize {
		self.errors.len()
	}

	pub fn is_empty(&self) -> bool {
		self.errors.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
		self.errors
			.iter()
			.map(|(field, messages)| (field.as_str(), messages.as_slice()))
	}

	pub fn field_errors(&self) -> &HashMap<String, Vec<String>> {
		&self.errors
	}

	pub fn into_inner(self) -> HashMap<String, Vec<String>> {
		self.errors
	}
}
