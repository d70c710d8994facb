use trial_extract::*;

fn spec(name: &str, domains: &[&str], patterns: &[&str], category: &str) -> ServiceSpec {
    ServiceSpec {
        name: name.into(),
        domains: domains.iter().map(|d| (*d).to_string()).collect(),
        patterns: patterns.iter().map(|p| (*p).to_string()).collect(),
        category: category.into(),
    }
}

// --- Built-in table ---

#[test]
fn test_builtin_table_size() {
    let registry = ServiceRegistry::builtin();
    assert_eq!(registry.len(), 20);
    assert!(!registry.is_empty());
}

#[test]
fn test_builtin_resolves_senders() {
    let registry = ServiceRegistry::builtin();

    let service = registry.resolve("noreply@notion.so", "").unwrap();
    assert_eq!(service.name, "Notion");
    assert_eq!(service.category, "Productivity");

    let service = registry.resolve("team@figma.com", "").unwrap();
    assert_eq!(service.name, "Figma");
    assert_eq!(service.category, "Design");
}

#[test]
fn test_builtin_matches_subdomain_senders() {
    let registry = ServiceRegistry::builtin();
    let service = registry.resolve("Netflix <info@mailer.netflix.com>", "").unwrap();
    assert_eq!(service.name, "Netflix");
}

#[test]
fn test_resolve_lowercases_sender() {
    let registry = ServiceRegistry::builtin();
    let service = registry.resolve("NOREPLY@NOTION.SO", "").unwrap();
    assert_eq!(service.name, "Notion");
}

#[test]
fn test_domain_match_outranks_content_match() {
    let registry = ServiceRegistry::builtin();
    // Content mentions figma, but the sender domain decides
    let service = registry
        .resolve("noreply@notion.so", "your figma workspace")
        .unwrap();
    assert_eq!(service.name, "Notion");
}

#[test]
fn test_content_fallback_when_domain_is_unknown() {
    let registry = ServiceRegistry::builtin();
    let service = registry
        .resolve("me@gmail.com", "thanks for your spotify receipt")
        .unwrap();
    assert_eq!(service.name, "Spotify");
}

#[test]
fn test_content_matches_follow_table_order() {
    let registry = ServiceRegistry::builtin();
    // Both services match on content; the earlier table entry wins
    let service = registry
        .resolve("me@gmail.com", "adobe photoshop assets exported from figma")
        .unwrap();
    assert_eq!(service.name, "Figma");
}

#[test]
fn test_unknown_everything_resolves_to_none() {
    let registry = ServiceRegistry::builtin();
    assert!(registry
        .resolve("billing@tiny-unknown-saas.io", "your invoice is attached")
        .is_none());
}

#[test]
fn test_iter_exposes_priority_order() {
    let registry = ServiceRegistry::builtin();
    let first = registry.iter().next().unwrap();
    assert_eq!(first.name, "Netflix");
}

// --- Injected registries ---

#[test]
fn test_from_specs_preserves_order_as_priority() {
    let registry = ServiceRegistry::from_specs(vec![
        spec("First", &["example.com"], &[], "A"),
        spec("Second", &["example.com"], &[], "B"),
    ])
    .unwrap();

    let service = registry.resolve("user@example.com", "").unwrap();
    assert_eq!(service.name, "First");
}

#[test]
fn test_from_specs_lowercases_domains() {
    let registry =
        ServiceRegistry::from_specs(vec![spec("Acme", &["EXAMPLE.COM"], &[], "Tools")]).unwrap();
    assert!(registry.resolve("user@example.com", "").is_some());
}

#[test]
fn test_from_specs_rejects_empty_name() {
    let result = ServiceRegistry::from_specs(vec![
        spec("Valid", &["valid.io"], &[], "Tools"),
        spec("   ", &["blank.io"], &[], "Tools"),
    ]);
    assert!(matches!(result, Err(RegistryError::EmptyName(1))));
}

#[test]
fn test_from_specs_rejects_bad_pattern() {
    let result = ServiceRegistry::from_specs(vec![spec("Broken", &[], &["("], "Tools")]);
    match result {
        Err(RegistryError::InvalidPattern { service, pattern, .. }) => {
            assert_eq!(service, "Broken");
            assert_eq!(pattern, "(");
        }
        other => panic!("expected InvalidPattern, got {other:?}"),
    }
}

#[test]
fn test_from_specs_accepts_unmatchable_descriptor() {
    // No domains and no patterns is legal, it just never matches
    let registry = ServiceRegistry::from_specs(vec![spec("Ghost", &[], &[], "Misc")]).unwrap();
    assert_eq!(registry.len(), 1);
    assert!(registry.resolve("ghost@ghost.io", "ghost").is_none());
}

#[test]
fn test_from_json_round_trip() {
    let json = r#"[
        {
            "name": "Acme Cloud",
            "domains": ["acme.dev"],
            "patterns": ["acme cloud"],
            "category": "Infrastructure"
        }
    ]"#;

    let registry = ServiceRegistry::from_json(json).unwrap();
    assert_eq!(registry.len(), 1);

    let service = registry.resolve("billing@acme.dev", "").unwrap();
    assert_eq!(service.name, "Acme Cloud");
    assert_eq!(service.category, "Infrastructure");
}

#[test]
fn test_from_json_defaults_missing_lists() {
    let json = r#"[{ "name": "Minimal", "category": "Misc" }]"#;
    let registry = ServiceRegistry::from_json(json).unwrap();
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_from_json_rejects_malformed_document() {
    assert!(matches!(
        ServiceRegistry::from_json("not json"),
        Err(RegistryError::Malformed(_))
    ));
}

#[test]
fn test_service_spec_serde_round_trip() {
    let original = spec("Acme", &["acme.dev"], &["acme"], "Tools");
    let json = serde_json::to_string(&original).unwrap();
    let back: ServiceSpec = serde_json::from_str(&json).unwrap();
    assert_eq!(original, back);
}

#[test]
fn test_registry_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ServiceRegistry>();
    assert_send_sync::<TrialParser>();
}

#[test]
fn test_parser_exposes_its_registry() {
    let registry = ServiceRegistry::from_specs(vec![spec("Only", &["only.io"], &[], "Misc")]).unwrap();
    let parser = TrialParser::with_registry(registry);
    assert_eq!(parser.registry().len(), 1);

    let default_parser = TrialParser::new();
    assert_eq!(default_parser.registry().len(), ServiceRegistry::builtin().len());
}
