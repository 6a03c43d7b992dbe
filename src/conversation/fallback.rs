//! Fallback policy — deterministic, mode-specific placeholder answers used
//! when the collaborator fails. Pure and synchronous; never fails.

use rand::seq::IndexedRandom;

use super::mode::{Mode, Persona};
use super::prompt::QUESTION_PLACEHOLDER;

/// Fixed fallback for each mode's page persona.
#[must_use]
pub fn page_fallback(mode: Mode) -> &'static str {
    match mode {
        Mode::Art => {
            "The canvas of creativity sometimes needs a moment to breathe. Art is the bridge between what we \
             see and what we feel. What part of art intrigues you most?"
        }
        Mode::Science => {
            "I could not process that inquiry just now. Please rephrase your question or try a different \
             scientific topic."
        }
        Mode::Commercial => {
            "I could not process that commercial inquiry just now. Please rephrase your business question."
        }
        Mode::Terminal => {
            "NEURAL NETWORK ERROR\nSignal lost in the grid. I'm a cyberpunk AI, not a search engine. Try \
             something more... digital. Type \"help\" for guidance."
        }
    }
}

/// The randomized fallback set for each mode's assistant persona.
/// Each entry interpolates the user's question.
#[must_use]
pub fn assistant_fallbacks(mode: Mode) -> &'static [&'static str] {
    match mode {
        Mode::Art => &[
            "Creatively speaking, {question} inspires a masterpiece. What colors come to mind?",
            "Art flows through everything. {question} is your canvas, so paint it boldly!",
            "In artistic mode: {question} evokes surreal visions and neon dreams.",
        ],
        Mode::Science => &[
            "Scientifically analyzing {question}: the data suggests fascinating possibilities.",
            "Science mode: {question} involves quantum leaps in understanding.",
            "Futuristic research shows {question} could revolutionize our knowledge.",
        ],
        Mode::Commercial => &[
            "Business opportunity detected: {question} has high ROI potential.",
            "Commercial mode: {question} is a market disruptor waiting to happen.",
            "Financial guru says: {question} could yield exponential returns.",
        ],
        Mode::Terminal => &[
            "As a tech expert, I see {question} as an opportunity for innovation. Let's code something amazing!",
            "In the world of technology, {question} could be optimized with the right algorithms.",
            "Tech mode activated: {question} requires a systematic approach.",
        ],
    }
}

/// Pick the fallback answer for a failed request.
///
/// Page persona: the mode's fixed string. Assistant persona: a uniformly
/// random member of the mode's set with the question interpolated.
#[must_use]
pub fn fallback_answer(mode: Mode, persona: Persona, question: &str) -> String {
    match persona {
        Persona::Page => page_fallback(mode).to_string(),
        Persona::Assistant => {
            let set = assistant_fallbacks(mode);
            let template = set.choose(&mut rand::rng()).copied().unwrap_or(QUESTION_PLACEHOLDER);
            template.replace(QUESTION_PLACEHOLDER, question.trim())
        }
    }
}

/// Fallback for the terminal `motivate` command.
pub const MOTIVATE_FALLBACK: &str = "Code is the weapon of the future. Debug your doubts, compile your dreams, \
     and deploy your destiny.";

/// Fallback for the business-plan generator.
pub const BUSINESS_PLAN_FALLBACK: &str = "The plan generator is unavailable right now. Please try again shortly.";

#[cfg(test)]
#[path = "fallback_test.rs"]
mod tests;
