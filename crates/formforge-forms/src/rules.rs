//! Per-field rule chains
//!
//! A [`FieldRule`] is the compiled form of one descriptor: a base kind that
//! coerces the submitted value, followed by an ordered list of independent
//! [`Constraint`]s. Every constraint is evaluated, so one submission can
//! surface several messages for the same field.

use crate::descriptor::{BaseKind, FieldDescriptor, FieldType};
use crate::error::{FieldError, FieldResult};
use regex::Regex;
use serde_json::{Number, Value};
use std::sync::LazyLock;

// local-part "@" domain "." TLD, matched against the lowercased value.
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(
		r"(?i)^[a-z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-z0-9](?:[a-z0-9-]*[a-z0-9])?(?:\.[a-z0-9](?:[a-z0-9-]*[a-z0-9])?)*\.[a-z]{2,}$",
	)
	.expect("EMAIL_REGEX: invalid regex pattern")
});

const BYTES_PER_MB: f64 = 1_048_576.0;

/// Submitted value after base-kind coercion
#[derive(Debug, Clone, PartialEq)]
pub enum Coerced {
	Absent,
	Text(String),
	Number(Number),
	List(Vec<String>),
	Bool(bool),
	/// Upload value as submitted: one item or an array of items
	Files(Value),
}

impl Coerced {
	/// Absent, empty string, or empty sequence
	pub fn is_blank(&self) -> bool {
		match self {
			Coerced::Absent => true,
			Coerced::Text(s) => s.is_empty(),
			Coerced::List(items) => items.is_empty(),
			Coerced::Files(Value::Array(items)) => items.is_empty(),
			Coerced::Files(Value::String(s)) => s.is_empty(),
			Coerced::Number(_) | Coerced::Bool(_) | Coerced::Files(_) => false,
		}
	}

	fn file_items(&self) -> &[Value] {
		match self {
			Coerced::Files(Value::Array(items)) => items.as_slice(),
			Coerced::Files(single) => std::slice::from_ref(single),
			_ => &[],
		}
	}

	fn item_count(&self) -> Option<usize> {
		match self {
			Coerced::List(items) => Some(items.len()),
			Coerced::Files(_) => Some(self.file_items().len()),
			_ => None,
		}
	}

	/// Normalized value for the success map; `None` omits the key
	pub fn into_value(self) -> Option<Value> {
		match self {
			Coerced::Absent => None,
			Coerced::Text(s) => Some(Value::String(s)),
			Coerced::Number(n) => Some(Value::Number(n)),
			Coerced::List(items) => Some(Value::Array(
				items.into_iter().map(Value::String).collect(),
			)),
			Coerced::Bool(b) => Some(Value::Bool(b)),
			Coerced::Files(v) => Some(v),
		}
	}
}

/// Coerce a raw value into the shape `kind` expects
///
/// On a type mismatch returns the expectation used in the error message.
pub fn coerce(kind: BaseKind, value: Option<&Value>) -> Result<Coerced, &'static str> {
	let value = match value {
		None | Some(Value::Null) => {
			return Ok(match kind {
				BaseKind::StringList => Coerced::List(Vec::new()),
				BaseKind::Boolean => Coerced::Bool(false),
				_ => Coerced::Absent,
			});
		}
		Some(v) => v,
	};

	match kind {
		BaseKind::Text => match value {
			Value::String(s) => Ok(Coerced::Text(s.clone())),
			_ => Err("text"),
		},
		BaseKind::Email => match value {
			Value::String(s) => Ok(Coerced::Text(s.to_lowercase())),
			_ => Err("text"),
		},
		// Anything that is not a number becomes absent instead of an error.
		BaseKind::Number => Ok(match value {
			Value::Number(n) => Coerced::Number(n.clone()),
			Value::String(s) => parse_number(s).map_or(Coerced::Absent, Coerced::Number),
			_ => Coerced::Absent,
		}),
		BaseKind::Numeric => match value {
			Value::Number(n) => Ok(Coerced::Number(n.clone())),
			Value::String(s) if s.trim().is_empty() => Ok(Coerced::Absent),
			Value::String(s) => parse_number(s).map(Coerced::Number).ok_or("a number"),
			_ => Err("a number"),
		},
		BaseKind::StringList => match value {
			Value::Array(items) => items
				.iter()
				.map(|item| item.as_str().map(str::to_string))
				.collect::<Option<Vec<_>>>()
				.map(Coerced::List)
				.ok_or("a list of options"),
			_ => Err("a list of options"),
		},
		BaseKind::Boolean => match value {
			Value::Bool(b) => Ok(Coerced::Bool(*b)),
			_ => Err("true or false"),
		},
		BaseKind::Files => Ok(Coerced::Files(value.clone())),
	}
}

fn parse_number(raw: &str) -> Option<Number> {
	let raw = raw.trim();
	if raw.is_empty() {
		return None;
	}
	if let Ok(i) = raw.parse::<i64>() {
		return Some(Number::from(i));
	}
	raw.parse::<f64>()
		.ok()
		.filter(|f| f.is_finite())
		.and_then(Number::from_f64)
}

/// One independent check on a coerced value
#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
	Required,
	EmailFormat,
	MinLength(usize),
	MaxLength(usize),
	Min(f64),
	Max(f64),
	MinItems(usize),
	MaxItems(usize),
	Uppercase,
	Lowercase,
	Digit,
	Symbol,
	/// Per-item ceiling in bytes
	MaxFileSize(u64),
}

impl Constraint {
	/// Validation key this constraint was derived from
	pub fn key(&self) -> &'static str {
		match self {
			Constraint::Required => "required",
			Constraint::EmailFormat => "email",
			Constraint::MinLength(_) => "minLength",
			Constraint::MaxLength(_) => "maxLength",
			Constraint::Min(_) => "min",
			Constraint::Max(_) => "max",
			Constraint::MinItems(_) => "minItems",
			Constraint::MaxItems(_) => "maxItems",
			Constraint::Uppercase
			| Constraint::Lowercase
			| Constraint::Digit
			| Constraint::Symbol => "pattern",
			Constraint::MaxFileSize(_) => "maxSize",
		}
	}

	/// Check `value`; values the constraint cannot measure pass
	pub fn check(&self, value: &Coerced, label: &str) -> FieldResult<()> {
		match (self, value) {
			(Constraint::Required, v) if v.is_blank() => Err(FieldError::Required {
				label: label.to_string(),
			}),
			(Constraint::EmailFormat, Coerced::Text(s)) if !EMAIL_REGEX.is_match(s) => {
				Err(FieldError::InvalidEmail { label: label.to_string() })
			}
			(Constraint::MinLength(min), Coerced::Text(s)) if s.chars().count() < *min => {
				Err(FieldError::TooShort {
					label: label.to_string(),
					min: *min,
				})
			}
			(Constraint::MaxLength(max), Coerced::Text(s)) if s.chars().count() > *max => {
				Err(FieldError::TooLong {
					label: label.to_string(),
					max: *max,
				})
			}
			(Constraint::Min(min), Coerced::Number(n)) if n.as_f64().is_some_and(|n| n < *min) => {
				Err(FieldError::TooSmall {
					label: label.to_string(),
					min: *min,
				})
			}
			(Constraint::Max(max), Coerced::Number(n)) if n.as_f64().is_some_and(|n| n > *max) => {
				Err(FieldError::TooLarge {
					label: label.to_string(),
					max: *max,
				})
			}
			(Constraint::MinItems(min), v) if v.item_count().is_some_and(|n| n < *min) => {
				Err(FieldError::TooFewItems {
					label: label.to_string(),
					min: *min,
				})
			}
			(Constraint::MaxItems(max), v) if v.item_count().is_some_and(|n| n > *max) => {
				Err(FieldError::TooManyItems {
					label: label.to_string(),
					max: *max,
				})
			}
			(Constraint::Uppercase, Coerced::Text(s)) if !s.chars().any(|c| c.is_ascii_uppercase()) => {
				Err(FieldError::MissingUppercase { label: label.to_string() })
			}
			(Constraint::Lowercase, Coerced::Text(s)) if !s.chars().any(|c| c.is_ascii_lowercase()) => {
				Err(FieldError::MissingLowercase { label: label.to_string() })
			}
			(Constraint::Digit, Coerced::Text(s)) if !s.chars().any(|c| c.is_ascii_digit()) => {
				Err(FieldError::MissingDigit { label: label.to_string() })
			}
			(Constraint::Symbol, Coerced::Text(s)) if s.chars().all(|c| c.is_ascii_alphanumeric()) => {
				Err(FieldError::MissingSymbol { label: label.to_string() })
			}
			(Constraint::MaxFileSize(max), v)
				if v
					.file_items()
					.iter()
					.any(|item| file_size(item).is_some_and(|size| size > *max as f64)) =>
			{
				Err(FieldError::FileTooLarge {
					label: label.to_string(),
					max_mb: (*max as f64 / BYTES_PER_MB).round() as u64,
				})
			}
			_ => Ok(()),
		}
	}
}

// Uploaded files carry a numeric `size`; plain strings are stored URLs.
fn file_size(item: &Value) -> Option<f64> {
	item.get("size").and_then(Value::as_f64)
}

/// Constraints derived from a descriptor, plus validation keys that do not
/// apply to its base kind
pub(crate) fn plan_constraints(descriptor: &FieldDescriptor) -> (Vec<Constraint>, Vec<&'static str>) {
	let kind = descriptor.field_type.base_kind();
	let mut constraints = Vec::new();
	let mut dropped = Vec::new();

	let config = descriptor.validation.as_ref();
	if config.is_some_and(|config| config.required) {
		constraints.push(Constraint::Required);
	}
	if kind == BaseKind::Email {
		constraints.push(Constraint::EmailFormat);
	}

	let Some(config) = config else {
		return (constraints, dropped);
	};

	let sequence = kind == BaseKind::StringList || (kind == BaseKind::Files && descriptor.multiple);
	let mut push = |applies: bool, key: &'static str, items: &[Constraint]| {
		if applies {
			constraints.extend_from_slice(items);
		} else {
			dropped.push(key);
		}
	};

	if let Some(n) = config.min_length {
		push(kind.is_string(), "minLength", &[Constraint::MinLength(n)]);
	}
	if let Some(n) = config.max_length {
		push(kind.is_string(), "maxLength", &[Constraint::MaxLength(n)]);
	}
	if let Some(n) = config.min {
		push(kind.is_numeric(), "min", &[Constraint::Min(n)]);
	}
	if let Some(n) = config.max {
		push(kind.is_numeric(), "max", &[Constraint::Max(n)]);
	}
	if let Some(n) = config.min_items {
		push(sequence, "minItems", &[Constraint::MinItems(n)]);
	}
	if let Some(n) = config.max_items {
		push(sequence, "maxItems", &[Constraint::MaxItems(n)]);
	}
	if config.pattern {
		push(
			descriptor.field_type == FieldType::Password,
			"pattern",
			&[
				Constraint::Uppercase,
				Constraint::Lowercase,
				Constraint::Digit,
				Constraint::Symbol,
			],
		);
	}
	if let Some(n) = config.max_size {
		push(kind == BaseKind::Files, "maxSize", &[Constraint::MaxFileSize(n)]);
	}

	(constraints, dropped)
}

/// Compiled validation rule for one field
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRule {
	name: String,
	label: String,
	kind: BaseKind,
	constraints: Vec<Constraint>,
}

impl FieldRule {
	/// Compile a descriptor, dropping constraints that do not apply
	///
	/// # Examples
	///
	/// ```
	/// use formforge_forms::{FieldDescriptor, FieldRule, FieldType, ValidationConfig};
	/// use formforge_forms::rules::Constraint;
	///
	/// let rule = FieldRule::from_descriptor(
	///     &FieldDescriptor::new(FieldType::Number, "age")
	///         .with_validation(ValidationConfig::new().with_min(18.0).with_min_length(2)),
	/// );
	/// assert_eq!(rule.constraints(), &[Constraint::Min(18.0)]);
	/// ```
	pub fn from_descriptor(descriptor: &FieldDescriptor) -> Self {
		let (constraints, dropped) = plan_constraints(descriptor);
		for key in dropped {
			tracing::warn!(
				field = %descriptor.name,
				field_type = %descriptor.field_type,
				"ignoring validation key '{}' that does not apply to this field type",
				key
			);
		}
		Self {
			name: descriptor.name.clone(),
			label: descriptor.display_label().to_string(),
			kind: descriptor.field_type.base_kind(),
			constraints,
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn label(&self) -> &str {
		&self.label
	}

	pub fn kind(&self) -> BaseKind {
		self.kind
	}

	pub fn constraints(&self) -> &[Constraint] {
		&self.constraints
	}

	/// Run the whole chain against one submitted value
	///
	/// Returns the normalized value (`None` when the field is absent and
	/// optional) or every triggered error in constraint order. A value of
	/// the wrong type yields a single type error.
	pub fn apply(&self, value: Option<&Value>) -> Result<Option<Value>, Vec<FieldError>> {
		let coerced = coerce(self.kind, value).map_err(|expected| {
			vec![FieldError::InvalidType {
				label: self.label.clone(),
				expected,
			}]
		})?;

		let errors: Vec<FieldError> = self
			.constraints
			.iter()
			.filter_map(|constraint| constraint.check(&coerced, &self.label).err())
			.collect();

		if errors.is_empty() {
			Ok(coerced.into_value())
		} else {
			Err(errors)
		}
	}
}
