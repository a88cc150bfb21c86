//! # Formforge
//!
//! Declarative form schemas for Rust: describe inputs once as a list of field
//! descriptors, then validate submissions and drive generic renderers from
//! the same list.
//!
//! ## Feature Flags
//!
//! - `forms` (default) - Schema compiler, validation, render plans, and
//!   definition loading (via `formforge-forms`)
//!
//! ## Quick Example
//!
//! ```rust
//! use formforge::prelude::*;
//! use serde_json::json;
//!
//! let schema = compile(&[
//!     FieldDescriptor::new(FieldType::ShortText, "display_name")
//!         .with_label("Display name")
//!         .with_validation(ValidationConfig::new().required().with_min_length(2)),
//!     FieldDescriptor::new(FieldType::LongText, "bio")
//!         .with_validation(ValidationConfig::new().with_max_length(160)),
//! ]);
//!
//! let errors = schema.validate_json(&json!({"display_name": "J"})).unwrap_err();
//! assert_eq!(
//!     errors.get("display_name").unwrap(),
//!     ["Display name must be at least 2 characters"]
//! );
//! ```

#[cfg(feature = "forms")]
pub use formforge_forms as forms;

#[cfg(feature = "forms")]
pub use formforge_forms::{
	CompiledSchema, DefinitionError, FieldDescriptor, FieldError, FieldMetadata, FieldType,
	FormDefinition, SchemaError, ValidationConfig, ValidationErrors, compile, render_plan,
};

/// Commonly used types
#[cfg(feature = "forms")]
pub mod prelude {
	pub use formforge_forms::{
		CompiledSchema, FieldDescriptor, FieldOption, FieldType, FileKind, FormDefinition,
		ValidationConfig, ValidationErrors, Widget, check_descriptors, compile, render_plan,
	};
}
