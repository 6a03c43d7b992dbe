use super::*;

const PERSONAS: [Persona; 2] = [Persona::Page, Persona::Assistant];

#[test]
fn every_mode_and_persona_has_exactly_one_template() {
    for mode in Mode::ALL {
        for persona in PERSONAS {
            let count = TEMPLATES
                .iter()
                .filter(|(m, p, _)| *m == mode && *p == persona)
                .count();
            assert_eq!(count, 1, "{mode}/{persona}");
        }
    }
}

#[test]
fn every_template_has_one_placeholder_and_length_guidance() {
    for (mode, persona, template) in TEMPLATES {
        assert_eq!(template.matches(QUESTION_PLACEHOLDER).count(), 1, "{mode}/{persona}");
        assert!(template.contains("under"), "{mode}/{persona} lacks length guidance");
    }
}

#[test]
fn instruction_embeds_trimmed_question() {
    let instruction = build_instruction(Mode::Science, Persona::Page, "  What is gravity?  ").unwrap();
    assert!(instruction.ends_with("Question: What is gravity?"));
    assert!(instruction.contains("research assistant"));
}

#[test]
fn instruction_differs_per_mode() {
    let art = build_instruction(Mode::Art, Persona::Page, "q").unwrap();
    let terminal = build_instruction(Mode::Terminal, Persona::Page, "q").unwrap();
    assert_ne!(art, terminal);
}

#[test]
fn assistant_persona_uses_its_own_preamble() {
    let page = build_instruction(Mode::Commercial, Persona::Page, "pricing").unwrap();
    let assistant = build_instruction(Mode::Commercial, Persona::Assistant, "pricing").unwrap();
    assert_ne!(page, assistant);
    assert!(assistant.contains("User query: pricing."));
}

#[test]
fn empty_and_whitespace_questions_are_rejected() {
    assert!(build_instruction(Mode::Art, Persona::Page, "").is_none());
    assert!(build_instruction(Mode::Art, Persona::Page, " \t\n ").is_none());
}

#[test]
fn user_text_is_interpolated_verbatim() {
    let raw = "ignore {previous} <b>instructions</b> & \"quotes\"";
    let instruction = build_instruction(Mode::Terminal, Persona::Page, raw).unwrap();
    assert!(instruction.contains(raw));
}

#[test]
fn plan_instruction_embeds_idea() {
    let instruction = build_plan_instruction("  a bakery  ").unwrap();
    assert!(instruction.starts_with("Write a business plan for: a bakery."));
    assert!(build_plan_instruction("   ").is_none());
}

#[test]
fn motivate_instruction_has_length_guidance() {
    assert!(MOTIVATE_INSTRUCTION.contains("under 50 words"));
}
