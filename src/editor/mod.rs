//! Edit Instruction Translator
//!
//! Turns a plain-language instruction plus the current page into a complete
//! replacement page, or a structured refusal, with one call to a hosted chat
//! completion model.
//!
//! ```text
//! ┌──────────────┐    directive + page    ┌───────────────────┐
//! │EditTranslator│ ─────────────────────▶ │ CompletionBackend │
//! │              │ ◀───────────────────── │ (OpenAI / mock)   │
//! └──────┬───────┘        raw text        └───────────────────┘
//!        │ unfence → refusal? → whole document?
//!        ▼
//!   EditResult | Rejected | InvalidOutput
//! ```

pub mod backend;
pub mod directive;
pub mod output;
pub mod translator;

pub use backend::{CompletionBackend, CompletionError, MockBackend, OpenAiBackend};
pub use translator::{EditRequest, EditResult, EditTranslator};
