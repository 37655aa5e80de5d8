//! Item processor module.
//!
//! Resolves the three input paths and the output path of one base name,
//! checks that the inputs exist and hands complete items to the engine.
//! Incomplete items are skipped; engine errors become failed results and
//! never escape as errors.
//!
//! # Example
//!
//! ```ignore
//! use sidemux_core::processor::ItemProcessor;
//!
//! let processor = ItemProcessor::new(engine, Extensions::default());
//! let result = processor
//!     .process("song", &LanguageTag::default(), Path::new("."), &Shutdown::never())
//!     .await;
//!
//! if result.is_skipped() {
//!     println!("{}: {}", result.base_name(), result.detail().unwrap_or_default());
//! }
//! ```

mod item;
mod types;

pub use item::ItemProcessor;
pub use types::{ConversionItem, ConversionResult, InputRole, Outcome};
