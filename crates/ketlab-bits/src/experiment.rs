//! The bit-sign experiment as one runnable unit.

use ndarray::Array1;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::config::ExperimentConfig;
use crate::digits::{digits_to_u8, format_array, reshape_discarded, sign_transform};
use crate::error::BitsResult;
use crate::text::{python_list_repr, slice_chars, split_whitespace};

/// Runs the text and array steps described by an [`ExperimentConfig`].
#[derive(Debug, Clone)]
pub struct BitSignExperiment {
    config: ExperimentConfig,
}

/// Everything the experiment prints, in order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BitSignReport {
    pub slice: String,
    pub split: Vec<String>,
    pub digits: Vec<u8>,
    pub signs: Vec<i16>,
}

impl BitSignExperiment {
    pub fn new(config: ExperimentConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExperimentConfig {
        &self.config
    }

    /// Run every step. Any digit or shape error stops the run.
    #[instrument(skip(self))]
    pub fn run(&self) -> BitsResult<BitSignReport> {
        let cfg = &self.config;

        let slice = slice_chars(&cfg.slice_text, &cfg.slice);
        debug!(scalar = cfg.scalar, "scalar assigned, unused");
        let split = split_whitespace(&cfg.split_text);

        let digits = digits_to_u8(&cfg.digits)?;
        reshape_discarded(&digits, cfg.shape)?;
        let signs = sign_transform(&digits);
        debug!(?digits, ?signs, "sign transform done");

        Ok(BitSignReport {
            slice,
            split,
            digits: digits.to_vec(),
            signs: signs.to_vec(),
        })
    }
}

impl BitSignReport {
    pub fn slice_line(&self) -> String {
        self.slice.clone()
    }

    pub fn split_line(&self) -> String {
        python_list_repr(&self.split)
    }

    pub fn array_line(&self) -> String {
        format_array(&Array1::from(self.signs.clone()))
    }

    /// The three printed lines, in order.
    pub fn lines(&self) -> [String; 3] {
        [self.slice_line(), self.split_line(), self.array_line()]
    }
}
