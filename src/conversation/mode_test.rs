use super::*;

#[test]
fn parse_known_modes_case_insensitive() {
    assert_eq!("art".parse::<Mode>().unwrap(), Mode::Art);
    assert_eq!("Science".parse::<Mode>().unwrap(), Mode::Science);
    assert_eq!(" COMMERCIAL ".parse::<Mode>().unwrap(), Mode::Commercial);
    assert_eq!("terminal".parse::<Mode>().unwrap(), Mode::Terminal);
}

#[test]
fn tech_is_an_alias_for_terminal() {
    assert_eq!("tech".parse::<Mode>().unwrap(), Mode::Terminal);
    let parsed: Mode = serde_json::from_str("\"tech\"").unwrap();
    assert_eq!(parsed, Mode::Terminal);
}

#[test]
fn unknown_mode_errors_with_code() {
    let err = "gallery".parse::<Mode>().unwrap_err();
    assert_eq!(err.to_string(), "unknown mode: gallery");
    assert_eq!(err.error_code(), "E_INVALID_MODE");
}

#[test]
fn display_matches_serde_name() {
    for mode in Mode::ALL {
        let json = serde_json::to_string(&mode).unwrap();
        assert_eq!(json, format!("\"{mode}\""));
        assert_eq!(mode.as_str().parse::<Mode>().unwrap(), mode);
    }
}

#[test]
fn persona_defaults_to_page() {
    assert_eq!(Persona::default(), Persona::Page);
    assert_eq!(serde_json::to_string(&Persona::Assistant).unwrap(), "\"assistant\"");
    assert_eq!(Persona::Assistant.to_string(), "assistant");
}

#[test]
fn page_greetings_follow_mode() {
    assert!(Mode::Art.greeting(Persona::Page).is_none());
    assert!(Mode::Science.greeting(Persona::Page).unwrap().contains("Research Laboratory"));
    assert!(Mode::Commercial.greeting(Persona::Page).unwrap().contains("Corporate"));
    assert!(Mode::Terminal.greeting(Persona::Page).unwrap().contains("help"));
}

#[test]
fn assistant_greeting_names_the_mode() {
    for mode in Mode::ALL {
        let greeting = mode.greeting(Persona::Assistant).unwrap();
        assert!(greeting.contains(&format!("in {mode} mode")));
    }
}
