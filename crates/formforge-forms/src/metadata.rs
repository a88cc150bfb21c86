//! Render plan for generic form renderers
//!
//! Compiled rules carry validation state only; renderers need display data
//! as well. [`FieldMetadata`] is the plain, serializable view a
//! renderer maps to concrete controls.
//!
//! ```mermaid
//! flowchart LR
//!     Descriptors["FieldDescriptor list"] -->|"compile()"| Schema["CompiledSchema"]
//!     Descriptors -->|"render_plan()"| Plan["Vec&lt;FieldMetadata&gt;"]
//!     Plan --> Renderer["UI renderer"]
//!     Schema -->|"validate()"| Errors["per-field messages"]
//!     Errors --> Renderer
//! ```
//!
//! ## Example
//!
//! ```
//! use formforge_forms::{FieldDescriptor, FieldType, ValidationConfig, Widget, render_plan};
//!
//! let plan = render_plan(&[FieldDescriptor::new(FieldType::Rating, "score")
//!     .with_label("Score")
//!     .with_validation(ValidationConfig::new().required())]);
//!
//! assert_eq!(plan[0].control, Widget::Rating);
//! assert!(plan[0].required);
//! assert_eq!(plan[0].attrs.max, Some(5.0));
//!
//! let json = serde_json::to_string(&plan).unwrap();
//! assert!(json.contains("\"control\":\"rating\""));
//! ```

use crate::descriptor::{FieldDescriptor, FieldOption, FieldType, FileKind};
use crate::rules::{Constraint, plan_constraints};
use serde::{Deserialize, Serialize};

/// Control a renderer draws for a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Widget {
	TextInput,
	TextArea,
	PasswordInput,
	EmailInput,
	NumberInput,
	Select,
	RadioGroup,
	CheckboxGroup,
	Switch,
	Slider,
	DatePicker,
	TimePicker,
	FileInput,
	Rating,
}

impl From<FieldType> for Widget {
	fn from(field_type: FieldType) -> Self {
		match field_type {
			FieldType::ShortText => Widget::TextInput,
			FieldType::LongText => Widget::TextArea,
			FieldType::Password => Widget::PasswordInput,
			FieldType::Email => Widget::EmailInput,
			FieldType::Number => Widget::NumberInput,
			FieldType::Select => Widget::Select,
			FieldType::Radio => Widget::RadioGroup,
			FieldType::Checkbox => Widget::CheckboxGroup,
			FieldType::Switch => Widget::Switch,
			FieldType::Slider => Widget::Slider,
			FieldType::Date => Widget::DatePicker,
			FieldType::Time => Widget::TimePicker,
			FieldType::File => Widget::FileInput,
			FieldType::Rating => Widget::Rating,
		}
	}
}

/// Control attributes derived from the descriptor and its constraints
///
/// Only constraints that apply to the field's type are reflected here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FieldAttrs {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub min_length: Option<usize>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub max_length: Option<usize>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub min: Option<f64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub max: Option<f64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub step: Option<f64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub rows: Option<u32>,
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub accept: Vec<String>,
	#[serde(skip_serializing_if = "std::ops::Not::not")]
	pub multiple: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub max_items: Option<usize>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub max_size: Option<u64>,
	/// Human-readable `max_size`, e.g. "1.0 MB"
	#[serde(skip_serializing_if = "Option::is_none")]
	pub max_size_label: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub file_type: Option<FileKind>,
}

/// Everything a renderer needs to draw one field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldMetadata {
	pub name: String,
	pub control: Widget,
	pub label: Option<String>,
	pub placeholder: Option<String>,
	pub help_text: Option<String>,
	pub required: bool,
	#[serde(default)]
	pub options: Vec<FieldOption>,
	pub default_value: Option<serde_json::Value>,
	#[serde(default)]
	pub attrs: FieldAttrs,
}

impl FieldMetadata {
	pub fn from_descriptor(descriptor: &FieldDescriptor) -> Self {
		Self {
			name: descriptor.name.clone(),
			control: descriptor.field_type.into(),
			label: descriptor.label.clone(),
			placeholder: descriptor.placeholder.clone(),
			help_text: descriptor.helper_text.clone(),
			required: descriptor.is_required(),
			options: descriptor.options.clone(),
			default_value: descriptor.default_value.clone(),
			attrs: attrs_for(descriptor),
		}
	}
}

fn attrs_for(descriptor: &FieldDescriptor) -> FieldAttrs {
	let mut attrs = FieldAttrs {
		step: descriptor.step,
		rows: descriptor.rows,
		..FieldAttrs::default()
	};

	let (constraints, _) = plan_constraints(descriptor);
	for constraint in constraints {
		match constraint {
			Constraint::MinLength(n) => attrs.min_length = Some(n),
			Constraint::MaxLength(n) => attrs.max_length = Some(n),
			Constraint::Min(n) => attrs.min = Some(n),
			Constraint::Max(n) => attrs.max = Some(n),
			Constraint::MinItems(_) => {}
			Constraint::MaxItems(n) => attrs.max_items = Some(n),
			Constraint::MaxFileSize(n) => {
				attrs.max_size = Some(n);
				attrs.max_size_label = Some(format_file_size(n));
			}
			Constraint::EmailFormat
			| Constraint::Required
			| Constraint::Uppercase
			| Constraint::Lowercase
			| Constraint::Digit
			| Constraint::Symbol => {}
		}
	}

	match descriptor.field_type {
		FieldType::Slider => {
			attrs.min.get_or_insert(0.0);
			attrs.max.get_or_insert(100.0);
			attrs.step.get_or_insert(1.0);
		}
		FieldType::Rating => {
			attrs.min.get_or_insert(1.0);
			attrs.max.get_or_insert(5.0);
		}
		FieldType::File => {
			attrs.accept = descriptor.accept.clone();
			attrs.multiple = descriptor.multiple;
			attrs.file_type = Some(descriptor.file_type.unwrap_or_default());
			if !descriptor.multiple {
				attrs.max_items = Some(1);
			}
		}
		_ => {}
	}

	attrs
}

/// Build the render plan for a descriptor list, in descriptor order
pub fn render_plan(descriptors: &[FieldDescriptor]) -> Vec<FieldMetadata> {
	descriptors.iter().map(FieldMetadata::from_descriptor).collect()
}

/// Format a byte count for display next to upload controls
///
/// # Examples
///
/// ```
/// use formforge_forms::metadata::format_file_size;
///
/// assert_eq!(format_file_size(512), "512 B");
/// assert_eq!(format_file_size(1536), "1.5 KB");
/// assert_eq!(format_file_size(5 * 1024 * 1024), "5.0 MB");
/// ```
pub fn format_file_size(bytes: u64) -> String {
	const KB: u64 = 1024;
	const MB: u64 = 1024 * 1024;

	if bytes >= MB {
		format!("{:.1} MB", bytes as f64 / MB as f64)
	} else if bytes >= KB {
		format!("{:.1} KB", bytes as f64 / KB as f64)
	} else {
		format!("{} B", bytes)
	}
}
