// Library exports for eqstudio

pub mod document;
pub mod error;
pub mod recent;
pub mod serialize;
pub mod session;
pub mod settings;
pub mod span;
pub mod studio;
pub mod templates;

pub use document::{Cursor, HostDocument, TextDocument};
pub use error::{Error, Result};
pub use recent::RecentFormulas;
pub use serialize::{Replacement, delimit, insert_at, replace};
pub use session::{AcceptOutcome, Edit, FormulaSession, MathField};
pub use settings::{MemorySettingsStore, Settings, SettingsStore, TomlSettingsStore};
pub use span::{Detection, MathMode, MathSpan, locate};
pub use studio::Studio;
