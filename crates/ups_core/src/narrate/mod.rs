//! Narration: turning a scored event into a title + summary.
//!
//! One adapter, two interchangeable backends selected at construction time:
//! a deterministic template generator and a generative text backend. The
//! adapter's `narrate*` methods never fail; every backend problem degrades
//! to fixed generic text.

pub mod generative;
pub mod template;

pub use generative::{
    fallback_narrative, GenerativeNarrator, TextGeneration, TextGenerationError,
};
pub use template::{TemplateNarrator, TREND_DELTA};

use crate::models::{AnomalyResult, NarrationContext, Narrative, Tone};

/// Backend choice, fixed when the adapter is built.
enum NarrationBackend {
    Template(TemplateNarrator),
    Generative(GenerativeNarrator),
}

pub struct NarrationAdapter {
    backend: NarrationBackend,
}

impl NarrationAdapter {
    /// Pure rule-based narration; no I/O, always succeeds.
    pub fn rule_based() -> Self {
        Self { backend: NarrationBackend::Template(TemplateNarrator) }
    }

    /// Narration through an external text-generation client.
    pub fn generative(client: Box<dyn TextGeneration>) -> Self {
        Self { backend: NarrationBackend::Generative(GenerativeNarrator::new(client)) }
    }

    /// Narrate one scored innings. Infallible by contract.
    pub fn narrate(
        &self,
        result: &AnomalyResult,
        context: &NarrationContext,
        tone: Tone,
    ) -> Narrative {
        match &self.backend {
            NarrationBackend::Template(narrator) => narrator.narrate(result, context, tone),
            NarrationBackend::Generative(narrator) => narrator.narrate(result, context, tone),
        }
    }

    /// Narrate an ordered sequence of scored innings. Infallible by contract.
    pub fn narrate_sequence(&self, results: &[AnomalyResult], tone: Tone) -> Narrative {
        match &self.backend {
            NarrationBackend::Template(narrator) => narrator.narrate_sequence(results, tone),
            NarrationBackend::Generative(narrator) => narrator.narrate_sequence(results, tone),
        }
    }
}
