//! Ordered step execution.

use polars::prelude::DataFrame;
use tracing::trace;

use crate::error::{Result, TransformError};
use crate::steps::Step;

/// An ordered list of steps applied to one frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformPlan {
    steps: Vec<Step>,
}

impl TransformPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a step.
    #[must_use]
    pub fn then(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn step_names(&self) -> Vec<&'static str> {
        self.steps.iter().map(Step::name).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Runs every step in order; the first failure stops the plan.
    pub fn execute(&self, df: DataFrame) -> Result<DataFrame> {
        self.steps.iter().try_fold(df, |df, step| {
            let rows_in = df.height();
            let df = step.apply(df).map_err(|source| TransformError::Step {
                step: step.name(),
                source: Box::new(source),
            })?;
            trace!(step = step.name(), rows_in, rows_out = df.height(), "step applied");
            Ok(df)
        })
    }
}

impl FromIterator<Step> for TransformPlan {
    fn from_iter<I: IntoIterator<Item = Step>>(iter: I) -> Self {
        Self {
            steps: iter.into_iter().collect(),
        }
    }
}
