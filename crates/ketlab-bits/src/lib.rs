//! Ketlab bit-string experiment.
//!
//! A short sequence of text and array steps over digit strings:
//!
//! 1. slice a text (`"0123"[0:2]` → `01`)
//! 2. split a text on whitespace (`"1010"` → `['1010']`)
//! 3. map the digits of `"1010"` to a `u8` array `[1, 0, 1, 0]`
//! 4. reshape it to `(1, 4)` and drop the result
//! 5. negate, then replace zeros by one → `[-1  1 -1  1]`
//!
//! The literals live in [`ExperimentConfig`], whose defaults reproduce the
//! values above and which can be overridden from YAML.
//!
//! ```rust
//! use ketlab_bits::{BitSignExperiment, ExperimentConfig};
//!
//! let report = BitSignExperiment::new(ExperimentConfig::default()).run().unwrap();
//! assert_eq!(report.slice_line(), "01");
//! assert_eq!(report.split_line(), "['1010']");
//! assert_eq!(report.array_line(), "[-1  1 -1  1]");
//! ```

pub mod config;
pub mod digits;
pub mod error;
pub mod experiment;
pub mod text;

pub use config::{ExperimentConfig, SliceRange};
pub use digits::{digits_to_u8, format_array, reshape_discarded, sign_transform};
pub use error::{BitsError, BitsResult};
pub use experiment::{BitSignExperiment, BitSignReport};
pub use text::{python_list_repr, slice_chars, split_whitespace};
