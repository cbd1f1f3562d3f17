use serde_json::json;

use matchlink_core::document::{build_document, DocumentConfig, BIO_MAX_CHARS};
use matchlink_core::profile::Profile;
use matchlink_core::role::role_score;

fn profile(value: serde_json::Value) -> Profile {
    Profile::from_value(value).expect("profile")
}

#[test]
fn profile_parses_with_only_an_id() {
    let p = profile(json!({ "id": "p1" }));
    assert_eq!(p.id, "p1");
    assert!(p.name.is_none());
    assert!(p.skills.is_empty());
    assert!(p.objectives.is_empty());
}

#[test]
fn profile_preserves_unknown_fields() {
    let p = profile(json!({
        "id": "p1",
        "name": "Ada",
        "linkedin_url": "https://example.com/ada",
        "timezone": "UTC+1"
    }));
    assert_eq!(p.extra.len(), 2, "unrecognized fields are kept opaquely");
    assert_eq!(p.extra["timezone"], json!("UTC+1"));
}

#[test]
fn profile_accepts_current_role_alias() {
    let p = profile(json!({ "id": "p1", "currentRole": "CTO" }));
    assert_eq!(p.current_role.as_deref(), Some("CTO"));
}

#[test]
fn profile_rejects_missing_or_empty_id() {
    assert!(Profile::from_value(json!({ "name": "no id" })).is_err());
    assert!(Profile::from_value(json!({ "id": "  " })).is_err());
}

#[test]
fn document_repeats_sections_and_excludes_role_fields() {
    let p = profile(json!({
        "id": "p1",
        "skills": ["Fundraising", "VC"],
        "solutions": ["Intro platform"],
        "bio": "Helps founders raise.",
        "role": "Investor",
        "title": "General Partner",
        "headline": "Ex-operator turned VC"
    }));
    let cfg = DocumentConfig::default();
    let doc = build_document(&p, &cfg);

    assert_eq!(doc.matches("Skills: Fundraising, VC").count(), cfg.skills_repeat);
    assert_eq!(doc.matches("Solutions: Intro platform").count(), cfg.solutions_repeat);
    assert_eq!(doc.matches("Background:").count(), cfg.bio_repeat);
    assert!(!doc.contains("Investor"), "role fields never enter the document");
    assert!(!doc.contains("General Partner"));
    assert!(!doc.contains("Ex-operator"));
}

#[test]
fn document_clips_bio_without_splitting_code_points() {
    let long_bio = "é".repeat(BIO_MAX_CHARS + 50);
    let p = profile(json!({ "id": "p1", "bio": long_bio }));
    let doc = build_document(&p, &DocumentConfig::default());
    let line = doc.lines().rev().find(|l| l.starts_with("Background:")).expect("bio line");
    let clipped = line.trim_start_matches("Background: ");
    assert_eq!(clipped.chars().count(), BIO_MAX_CHARS);
}

#[test]
fn document_is_deterministic() {
    let p = profile(json!({ "id": "p1", "skills": ["a", "b"], "bio": "x" }));
    let cfg = DocumentConfig::default();
    assert_eq!(build_document(&p, &cfg), build_document(&p, &cfg));
}

#[test]
fn role_score_zero_without_role_fields() {
    let p = profile(json!({ "id": "p1", "skills": ["fundraising"] }));
    assert_eq!(role_score("fundraising", &p), 0.0);
}

#[test]
fn role_score_zero_without_overlap() {
    let p = profile(json!({ "id": "p1", "role": "Investor" }));
    assert_eq!(role_score("backend engineering", &p), 0.0);
}

#[test]
fn role_score_counts_overlap_normalized_by_objective_length() {
    let p = profile(json!({ "id": "p1", "role": "Senior Engineer, CTO" }));
    // "cto" matches one of two objective words.
    let s = role_score("technical cto", &p);
    assert!((s - 0.5).abs() < 1e-6, "got {s}");
}

#[test]
fn role_score_uses_alternate_roles_list() {
    let p = profile(json!({ "id": "p1", "roles": ["cofounder", "advisor"] }));
    assert!(role_score("technical cofounder", &p) > 0.0);
}

#[test]
fn role_score_is_clamped_and_monotone_in_overlap() {
    let one = profile(json!({ "id": "a", "role": "growth" }));
    let two = profile(json!({ "id": "b", "role": "growth marketing" }));
    let objective = "growth marketing lead";
    let s1 = role_score(objective, &one);
    let s2 = role_score(objective, &two);
    assert!(s2 >= s1, "more overlap never lowers the score");
    assert!(s2 <= 1.0);

    let all = profile(json!({ "id": "c", "role": "growth marketing lead ops" }));
    assert!((role_score(objective, &all) - 1.0).abs() < 1e-6);
}
