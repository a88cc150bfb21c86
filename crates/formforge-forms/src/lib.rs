//! Form-schema compilation and validation for Formforge
//!
//! This crate turns a declarative list of field descriptors into:
//! - A validator that checks a submitted value map and reports every failed
//!   constraint per field
//! - A serializable render plan for generic form renderers
//! - Checked loading of descriptor lists from JSON or TOML definitions
//!
//! Compilation and validation are pure and synchronous. A compiled schema is
//! immutable and can be shared freely between threads.

pub mod definition;
pub mod descriptor;
pub mod error;
pub mod lint;
pub mod metadata;
pub mod rules;
pub mod schema;

pub use definition::{DefinitionError, DefinitionResult, FormDefinition};
pub use descriptor::{
	BaseKind, FieldDescriptor, FieldOption, FieldType, FileKind, ValidationConfig,
};
pub use error::{FieldError, FieldResult, ValidationErrors};
pub use lint::{SchemaError, SchemaResult, check_descriptors};
pub use metadata::{FieldAttrs, FieldMetadata, Widget, format_file_size, render_plan};
pub use rules::{Constraint, FieldRule};
pub use schema::{CompiledSchema, ValidatedData, ValidationResult, compile};
