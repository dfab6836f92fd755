//! The pass entry point: eligibility, synthesis, splice, validation.

use jweave_model::{AnalysisContext, ClassModel, MethodModel};

use crate::config::InstrumentConfig;
use crate::error::Result;
use crate::filter::{Blacklist, is_eligible};
use crate::probe::ProbeSynthesizer;

/// Counts for one instrumentation run.
#[derive(Debug, Default, Clone, Copy)]
pub struct RunSummary {
    pub instrumented: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Drives probe synthesis over method bodies.
pub struct Instrumenter {
    config: InstrumentConfig,
    blacklist: Blacklist,
}

impl Instrumenter {
    pub fn new(config: InstrumentConfig, blacklist: Blacklist) -> Instrumenter {
        Instrumenter { config, blacklist }
    }

    /// Instrument one method in place. Returns whether a probe was spliced.
    ///
    /// The probe lands immediately before the first substantive unit, after
    /// the binding prologue, and the body is re-validated afterwards; a
    /// validation failure is fatal for this method only.
    ///
    /// Not idempotent: a second invocation on the same body splices a second
    /// probe. Invoke at most once per method per pass.
    pub fn instrument(
        &self,
        ctx: &AnalysisContext,
        class_name: &str,
        method: &mut MethodModel,
    ) -> Result<bool> {
        let Some(body) = method.body.take() else {
            return Ok(false);
        };

        let class = match ctx.class(class_name) {
            Ok(c) => c,
            Err(e) => {
                method.body = Some(body);
                return Err(e.into());
            }
        };
        if !is_eligible(class, method, &self.blacklist, &self.config) {
            log::debug!("skipping {}", method.signature(class_name));
            method.body = Some(body);
            return Ok(false);
        }

        let synthesizer = ProbeSynthesizer::new(ctx, &self.config);
        let batch = match synthesizer.build_probe(class, method, &body) {
            Ok(b) => b,
            Err(e) => {
                method.body = Some(body);
                return Err(e);
            }
        };

        let mut body = body;
        body.splice(batch);
        let validated = body.validate();
        method.body = Some(body);
        validated?;
        Ok(true)
    }

    /// Instrument every method of every class, logging and counting
    /// per-method failures instead of aborting the run.
    pub fn instrument_program(
        &self,
        ctx: &AnalysisContext,
        classes: &mut [ClassModel],
    ) -> RunSummary {
        let mut summary = RunSummary::default();
        for class in classes {
            let class_name = class.name.clone();
            for method in &mut class.methods {
                match self.instrument(ctx, &class_name, method) {
                    Ok(true) => summary.instrumented += 1,
                    Ok(false) => summary.skipped += 1,
                    Err(e) => {
                        log::error!(
                            "failed to instrument {}: {e}",
                            method.signature(&class_name)
                        );
                        summary.failed += 1;
                    }
                }
            }
        }
        summary
    }
}
