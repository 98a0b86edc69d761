//! Extraction: parsed artifacts to translation records.
//!
//! Both scanners work on a single artifact, share no state, and never fail:
//! whatever they cannot resolve statically becomes a dynamic record for the
//! registry to report.
//!
//! - `markup`: templates (`translate` elements/attributes, filter interpolations)
//! - `script`: calls to the translation service, through `service_ref`
//!   (callee normalization and matchers), `arguments` and `suppressions`

pub mod arguments;
pub mod conventions;
pub mod interpolation;
pub mod markup;
pub mod script;
pub mod service_ref;
pub mod suppressions;

pub use conventions::{MarkupConventions, ScriptConventions};
pub use markup::scan_markup;
pub use script::scan_script;
