//! Checked authoring for user-built descriptor lists
//!
//! [`compile`](crate::compile) treats a malformed list as a programmer error.
//! Form builders that accept lists from end users call
//! [`check_descriptors`] first to get a reportable error instead.

use crate::descriptor::{FieldDescriptor, FieldType};
use crate::rules::plan_constraints;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
	#[error("Field at position {position} has an empty name")]
	EmptyName { position: usize },
	#[error("Field name '{0}' is used more than once")]
	DuplicateField(String),
	#[error("Validation key '{constraint}' does not apply to {field_type} field '{field}'")]
	IncompatibleConstraint {
		field: String,
		constraint: &'static str,
		field_type: FieldType,
	},
	#[error("{field_type} field '{field}' has no options")]
	MissingOptions { field: String, field_type: FieldType },
	#[error("Field '{field}' has {lower} greater than {upper}")]
	InvertedBounds {
		field: String,
		lower: &'static str,
		upper: &'static str,
	},
}

pub type SchemaResult<T> = Result<T, SchemaError>;

/// Check a descriptor list for authoring mistakes
///
/// Returns the first problem found, scanning descriptors in order.
///
/// # Examples
///
/// ```
/// use formforge_forms::{FieldDescriptor, FieldType, ValidationConfig};
/// use formforge_forms::lint::{check_descriptors, SchemaError};
///
/// let fields = [
///     FieldDescriptor::new(FieldType::ShortText, "name"),
///     FieldDescriptor::new(FieldType::Email, "name"),
/// ];
/// assert_eq!(
///     check_descriptors(&fields),
///     Err(SchemaError::DuplicateField("name".to_string()))
/// );
/// ```
pub fn check_descriptors(descriptors: &[FieldDescriptor]) -> SchemaResult<()> {
	let mut seen = HashSet::with_capacity(descriptors.len());

	for (position, descriptor) in descriptors.iter().enumerate() {
		if descriptor.name.trim().is_empty() {
			return Err(SchemaError::EmptyName { position });
		}
		if !seen.insert(descriptor.name.as_str()) {
			return Err(SchemaError::DuplicateField(descriptor.name.clone()));
		}
		if descriptor.field_type.has_options() && descriptor.options.is_empty() {
			return Err(SchemaError::MissingOptions {
				field: descriptor.name.clone(),
				field_type: descriptor.field_type,
			});
		}

		let (_, dropped) = plan_constraints(descriptor);
		if let Some(constraint) = dropped.first().copied() {
			return Err(SchemaError::IncompatibleConstraint {
				field: descriptor.name.clone(),
				constraint,
				field_type: descriptor.field_type,
			});
		}

		check_bounds(descriptor)?;
	}

	Ok(())
}

fn check_bounds(descriptor: &FieldDescriptor) -> SchemaResult<()> {
	let Some(config) = descriptor.validation.as_ref() else {
		return Ok(());
	};

	let inverted = |lower: &'static str, upper: &'static str| SchemaError::InvertedBounds {
		field: descriptor.name.clone(),
		lower,
		upper,
	};

	if let (Some(lo), Some(hi)) = (config.min_length, config.max_length)
		&& lo > hi
	{
		return Err(inverted("minLength", "maxLength"));
	}
	if let (Some(lo), Some(hi)) = (config.min, config.max)
		&& lo > hi
	{
		return Err(inverted("min", "max"));
	}
	if let (Some(lo), Some(hi)) = (config.min_items, config.max_items)
		&& lo > hi
	{
		return Err(inverted("minItems", "maxItems"));
	}

	Ok(())
}
