use trial_extract::*;

#[test]
fn test_every_trial_phrase_is_detected() {
    for phrase in TRIAL_KEYWORDS {
        let text = format!("notice: {phrase} today");
        assert!(KeywordHits::scan(&text).trial, "missed phrase: {phrase}");
    }
}

#[test]
fn test_every_billing_word_is_detected() {
    for word in BILLING_KEYWORDS {
        let text = format!("about your {word} yesterday");
        assert!(KeywordHits::scan(&text).billing, "missed word: {word}");
    }
}

#[test]
fn test_substring_matching_is_intentional() {
    // "invoiced" contains "invoice"; no word boundaries are applied
    let hits = KeywordHits::scan("you were invoiced yesterday");
    assert!(hits.billing);
    assert!(!hits.trial);
}

#[test]
fn test_no_keywords_no_hits() {
    let hits = KeywordHits::scan("see you at the standup tomorrow");
    assert!(!hits.trial);
    assert!(!hits.billing);
    assert!(!hits.any());
}

#[test]
fn test_any_is_true_for_either_class() {
    assert!(KeywordHits::scan("your free trial started").any());
    assert!(KeywordHits::scan("payment confirmed").any());
}

#[test]
fn test_search_text_joins_subject_and_body_lowercased() {
    let email = EmailMessage::new("m1", "Hello World", "Second PART", "a@b.c", "");
    assert_eq!(search_text(&email), "hello world second part");
}

#[test]
fn test_is_candidate_is_case_insensitive() {
    let email = EmailMessage::new(
        "m2",
        "YOUR FREE TRIAL IS ENDING",
        "Act before it converts.",
        "noreply@example.com",
        "",
    );
    assert!(is_candidate(&email));
}

#[test]
fn test_is_candidate_scans_body_too() {
    let email = EmailMessage::new(
        "m3",
        "Quick note",
        "This receipt confirms your payment.",
        "noreply@example.com",
        "",
    );
    assert!(is_candidate(&email));
}

#[test]
fn test_is_candidate_rejects_neutral_mail() {
    let email = EmailMessage::new(
        "m4",
        "Team offsite",
        "Agenda attached. See everyone Thursday.",
        "boss@example.com",
        "",
    );
    assert!(!is_candidate(&email));
}
