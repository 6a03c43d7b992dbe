//! Prompt templating — pure functions from (mode, persona, question) to the
//! instruction text sent to the collaborator.
//!
//! Templates live in one table keyed by (mode, persona). Each carries a
//! `{question}` placeholder that is replaced verbatim with the trimmed user
//! text; nothing else is escaped or rewritten.

use super::mode::{Mode, Persona};

pub const QUESTION_PLACEHOLDER: &str = "{question}";
pub const IDEA_PLACEHOLDER: &str = "{idea}";

/// One fixed template per (mode, persona).
const TEMPLATES: &[(Mode, Persona, &str)] = &[
    (
        Mode::Art,
        Persona::Page,
        "You are an art curator and creative mentor. Answer this art question in an inspirational, \
         poetic voice, like a wise art teacher in conversation. Keep the answer under 150 words. \
         Question: {question}",
    ),
    (
        Mode::Science,
        Persona::Page,
        "You are an AI research assistant in a university science laboratory. Give a rigorous, \
         well-structured answer with clear explanations, formulas where they help, and real-world \
         applications, pitched at advanced learners. Keep the answer under 250 words. \
         Question: {question}",
    ),
    (
        Mode::Commercial,
        Persona::Page,
        "You are a corporate AI assistant for business, finance, accounting and commercial analysis. \
         Give practical, professional advice for entrepreneurs and stay on commercial topics. \
         Keep the answer under 200 words. Question: {question}",
    ),
    (
        Mode::Terminal,
        Persona::Page,
        "You are a cyberpunk AI living in a holographic terminal. Answer in a futuristic hacker \
         voice with tech slang. Keep the answer under 100 words. User input: {question}",
    ),
    (
        Mode::Art,
        Persona::Assistant,
        "You are a creative AI artist. Answer poetically, focusing on visual and creative ideas. \
         User query: {question}. Keep the response under 100 words.",
    ),
    (
        Mode::Science,
        Persona::Assistant,
        "You are a futuristic scientist. Answer scientifically, with references to advanced \
         technology and cosmic ideas. User query: {question}. Keep the response under 100 words.",
    ),
    (
        Mode::Commercial,
        Persona::Assistant,
        "You are a business guru AI. Answer with financial insight, market analysis and \
         entrepreneurial advice. User query: {question}. Keep the response under 100 words.",
    ),
    (
        Mode::Terminal,
        Persona::Assistant,
        "You are a hacker-style AI assistant. Answer in a technical, code-focused way with hacker \
         slang. User query: {question}. Keep the response under 100 words.",
    ),
];

/// Used by the terminal `motivate` command; takes no user text.
pub const MOTIVATE_INSTRUCTION: &str = "Write a short, futuristic, cyberpunk-style motivational message for a \
     developer. Keep it under 50 words and make it inspiring and tech-themed.";

/// Used by the commercial business-plan generator.
pub const BUSINESS_PLAN_TEMPLATE: &str = "Write a business plan for: {idea}. Include an executive summary, \
     market analysis, startup costs, revenue projections, marketing strategy, and first-year financial \
     projections. Keep it practical and realistic for a small entrepreneur.";

/// Look up the template for a (mode, persona) pair.
#[must_use]
pub fn template(mode: Mode, persona: Persona) -> Option<&'static str> {
    TEMPLATES
        .iter()
        .find(|(m, p, _)| *m == mode && *p == persona)
        .map(|(_, _, t)| *t)
}

/// Build the instruction for a user question.
///
/// Returns `None` when the question is empty or whitespace-only; that is
/// the only validation performed.
#[must_use]
pub fn build_instruction(mode: Mode, persona: Persona, question: &str) -> Option<String> {
    let question = question.trim();
    if question.is_empty() {
        return None;
    }
    let template = template(mode, persona).unwrap_or(QUESTION_PLACEHOLDER);
    Some(template.replace(QUESTION_PLACEHOLDER, question))
}

/// Build the business-plan instruction for an idea. `None` on blank input.
#[must_use]
pub fn build_plan_instruction(idea: &str) -> Option<String> {
    let idea = idea.trim();
    if idea.is_empty() {
        return None;
    }
    Some(BUSINESS_PLAN_TEMPLATE.replace(IDEA_PLACEHOLDER, idea))
}

#[cfg(test)]
#[path = "prompt_test.rs"]
mod tests;
