//! Declarative field descriptors
//!
//! A descriptor list is the only input the compiler consumes. It is authored
//! once (by a form builder or a hand-written list) and never mutated.

use serde::{Deserialize, Serialize};

/// Closed set of input types a form can contain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldType {
	ShortText,
	LongText,
	Password,
	Email,
	Number,
	Select,
	Radio,
	Checkbox,
	Switch,
	Slider,
	Date,
	Time,
	File,
	Rating,
}

impl FieldType {
	/// Every field type, in declaration order
	pub const ALL: [FieldType; 14] = [
		FieldType::ShortText,
		FieldType::LongText,
		FieldType::Password,
		FieldType::Email,
		FieldType::Number,
		FieldType::Select,
		FieldType::Radio,
		FieldType::Checkbox,
		FieldType::Switch,
		FieldType::Slider,
		FieldType::Date,
		FieldType::Time,
		FieldType::File,
		FieldType::Rating,
	];

	/// Base value kind the compiler derives from this type
	///
	/// # Examples
	///
	/// ```
	/// use formforge_forms::{BaseKind, FieldType};
	///
	/// assert_eq!(FieldType::Radio.base_kind(), BaseKind::Text);
	/// assert_eq!(FieldType::Rating.base_kind(), BaseKind::Numeric);
	/// assert_eq!(FieldType::Checkbox.base_kind(), BaseKind::StringList);
	/// ```
	pub fn base_kind(self) -> BaseKind {
		match self {
			FieldType::ShortText
			| FieldType::LongText
			| FieldType::Password
			| FieldType::Select
			| FieldType::Radio
			| FieldType::Date
			| FieldType::Time => BaseKind::Text,
			FieldType::Email => BaseKind::Email,
			FieldType::Number => BaseKind::Number,
			FieldType::Slider | FieldType::Rating => BaseKind::Numeric,
			FieldType::Checkbox => BaseKind::StringList,
			FieldType::Switch => BaseKind::Boolean,
			FieldType::File => BaseKind::Files,
		}
	}

	/// Whether the type renders a choice among `options`
	pub fn has_options(self) -> bool {
		matches!(
			self,
			FieldType::Select | FieldType::Radio | FieldType::Checkbox
		)
	}

	/// Serialized tag, e.g. `"shortText"`
	pub fn as_str(self) -> &'static str {
		match self {
			FieldType::ShortText => "shortText",
			FieldType::LongText => "longText",
			FieldType::Password => "password",
			FieldType::Email => "email",
			FieldType::Number => "number",
			FieldType::Select => "select",
			FieldType::Radio => "radio",
			FieldType::Checkbox => "checkbox",
			FieldType::Switch => "switch",
			FieldType::Slider => "slider",
			FieldType::Date => "date",
			FieldType::Time => "time",
			FieldType::File => "file",
			FieldType::Rating => "rating",
		}
	}
}

impl std::fmt::Display for FieldType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Value shape a field type validates against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseKind {
	/// Plain string
	Text,
	/// String matching an email address, normalized to lowercase
	Email,
	/// Lenient number: values that fail coercion count as absent
	Number,
	/// Strict number (slider, rating)
	Numeric,
	/// Sequence of strings, empty when absent
	StringList,
	/// Boolean, `false` when absent
	Boolean,
	/// Opaque upload value, single item or sequence
	Files,
}

impl BaseKind {
	pub fn is_string(self) -> bool {
		matches!(self, BaseKind::Text | BaseKind::Email)
	}

	pub fn is_numeric(self) -> bool {
		matches!(self, BaseKind::Number | BaseKind::Numeric)
	}
}

/// One selectable choice of a select, radio, or checkbox field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOption {
	pub label: String,
	pub value: String,
}

impl FieldOption {
	pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
		Self {
			label: label.into(),
			value: value.into(),
		}
	}
}

/// Kind of upload a file field accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
	#[default]
	Docs,
	Image,
	Video,
}

/// Optional constraint set attached to a descriptor
///
/// Every key is independent. Keys that do not apply to the field's base kind
/// (for example `min_length` on a number) are dropped at compile time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ValidationConfig {
	#[serde(skip_serializing_if = "std::ops::Not::not")]
	pub required: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub min_length: Option<usize>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub max_length: Option<usize>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub min: Option<f64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub max: Option<f64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub min_items: Option<usize>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub max_items: Option<usize>,
	/// Per-file ceiling in bytes
	#[serde(skip_serializing_if = "Option::is_none")]
	pub max_size: Option<u64>,
	/// Enables the four-part password composition check
	#[serde(skip_serializing_if = "std::ops::Not::not")]
	pub pattern: bool,
}

impl ValidationConfig {
	/// Create an empty constraint set
	///
	/// # Examples
	///
	/// ```
	/// use formforge_forms::ValidationConfig;
	///
	/// let config = ValidationConfig::new().required().with_min_length(3);
	/// assert!(config.required);
	/// assert_eq!(config.min_length, Some(3));
	/// assert_eq!(config.max_length, None);
	/// ```
	pub fn new() -> Self {
		Self::default()
	}

	pub fn required(mut self) -> Self {
		self.required = true;
		self
	}

	pub fn with_min_length(mut self, min_length: usize) -> Self {
		self.min_length = Some(min_length);
		self
	}

	pub fn with_max_length(mut self, max_length: usize) -> Self {
		self.max_length = Some(max_length);
		self
	}

	pub fn with_min(mut self, min: f64) -> Self {
		self.min = Some(min);
		self
	}

	pub fn with_max(mut self, max: f64) -> Self {
		self.max = Some(max);
		self
	}

	pub fn with_min_items(mut self, min_items: usize) -> Self {
		self.min_items = Some(min_items);
		self
	}

	pub fn with_max_items(mut self, max_items: usize) -> Self {
		self.max_items = Some(max_items);
		self
	}

	pub fn with_max_size(mut self, max_size: u64) -> Self {
		self.max_size = Some(max_size);
		self
	}

	pub fn with_pattern(mut self) -> Self {
		self.pattern = true;
		self
	}
}

/// Describes one input of a form
///
/// Serialized with the same camelCase keys form builders emit:
///
/// ```
/// use formforge_forms::{FieldDescriptor, FieldType};
///
/// let field: FieldDescriptor = serde_json::from_str(
///     r#"{"type": "shortText", "name": "title", "helperText": "Shown in lists",
///         "validation": {"required": true, "maxLength": 80}}"#,
/// ).unwrap();
///
/// assert_eq!(field.field_type, FieldType::ShortText);
/// assert_eq!(field.helper_text.as_deref(), Some("Shown in lists"));
/// assert_eq!(field.validation.unwrap().max_length, Some(80));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
	#[serde(rename = "type")]
	pub field_type: FieldType,
	/// Key of the field in value maps and error maps
	pub name: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub label: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub placeholder: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub helper_text: Option<String>,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub options: Vec<FieldOption>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub validation: Option<ValidationConfig>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub default_value: Option<serde_json::Value>,
	/// Accepted MIME types or extensions for file fields
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub accept: Vec<String>,
	#[serde(default, skip_serializing_if = "std::ops::Not::not")]
	pub multiple: bool,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub step: Option<f64>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub rows: Option<u32>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub file_type: Option<FileKind>,
}

impl FieldDescriptor {
	/// Create a descriptor with only a type and a name
	///
	/// # Examples
	///
	/// ```
	/// use formforge_forms::{FieldDescriptor, FieldType};
	///
	/// let field = FieldDescriptor::new(FieldType::Email, "email");
	/// assert_eq!(field.name, "email");
	/// assert!(field.validation.is_none());
	/// assert!(!field.multiple);
	/// ```
	pub fn new(field_type: FieldType, name: impl Into<String>) -> Self {
		Self {
			field_type,
			name: name.into(),
			label: None,
			placeholder: None,
			helper_text: None,
			options: Vec::new(),
			validation: None,
			default_value: None,
			accept: Vec::new(),
			multiple: false,
			step: None,
			rows: None,
			file_type: None,
		}
	}

	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.label = Some(label.into());
		self
	}

	pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
		self.placeholder = Some(placeholder.into());
		self
	}

	pub fn with_helper_text(mut self, helper_text: impl Into<String>) -> Self {
		self.helper_text = Some(helper_text.into());
		self
	}

	/// Append a `{label, value}` choice
	///
	/// # Examples
	///
	/// ```
	/// use formforge_forms::{FieldDescriptor, FieldType};
	///
	/// let field = FieldDescriptor::new(FieldType::Select, "plan")
	///     .with_option("Free", "free")
	///     .with_option("Pro", "pro");
	/// assert_eq!(field.options.len(), 2);
	/// assert_eq!(field.options[1].value, "pro");
	/// ```
	pub fn with_option(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
		self.options.push(FieldOption::new(label, value));
		self
	}

	pub fn with_options(mut self, options: impl IntoIterator<Item = FieldOption>) -> Self {
		self.options.extend(options);
		self
	}

	pub fn with_validation(mut self, validation: ValidationConfig) -> Self {
		self.validation = Some(validation);
		self
	}

	pub fn with_default(mut self, default_value: serde_json::Value) -> Self {
		self.default_value = Some(default_value);
		self
	}

	pub fn with_accept(mut self, accept: impl IntoIterator<Item = impl Into<String>>) -> Self {
		self.accept = accept.into_iter().map(Into::into).collect();
		self
	}

	pub fn multiple(mut self) -> Self {
		self.multiple = true;
		self
	}

	pub fn with_step(mut self, step: f64) -> Self {
		self.step = Some(step);
		self
	}

	pub fn with_rows(mut self, rows: u32) -> Self {
		self.rows = Some(rows);
		self
	}

	pub fn with_file_type(mut self, file_type: FileKind) -> Self {
		self.file_type = Some(file_type);
		self
	}

	/// Label used in error messages: the label if set, otherwise the name
	///
	/// # Examples
	///
	/// ```
	/// use formforge_forms::{FieldDescriptor, FieldType};
	///
	/// let bare = FieldDescriptor::new(FieldType::ShortText, "nickname");
	/// assert_eq!(bare.display_label(), "nickname");
	///
	/// let labelled = bare.with_label("Nickname");
	/// assert_eq!(labelled.display_label(), "Nickname");
	/// ```
	pub fn display_label(&self) -> &str {
		self.label.as_deref().unwrap_or(&self.name)
	}

	pub fn is_required(&self) -> bool {
		self.validation.as_ref().is_some_and(|v| v.required)
	}
}
