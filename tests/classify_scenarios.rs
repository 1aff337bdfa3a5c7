use std::io::Write;
use std::sync::Arc;

use phonon::{
    ClassifierConfig, DictionaryError, MatchMode, PhraseDictionary, PhraseRiskClassifier,
    PhraseTier, RiskLevel,
};
use pretty_assertions::assert_eq;

fn classifier() -> PhraseRiskClassifier {
    PhraseRiskClassifier::default()
}

#[test]
fn wire_transfer_request_is_high() {
    let r = classifier().classify("Please send money via wire transfer immediately");
    assert_eq!(r.risk, RiskLevel::High);
    assert!(r.matched_phrases.contains(&"send money".to_string()));
    assert!(r.matched_phrases.contains(&"wire transfer".to_string()));
    assert!(r.reason.starts_with("High-risk phrases detected: "));
}

#[test]
fn phishing_link_is_medium() {
    let r = classifier().classify("Click this link to confirm your identity");
    assert_eq!(r.risk, RiskLevel::Medium);
    assert_eq!(
        r.matched_phrases,
        vec!["click this link".to_string(), "confirm your identity".to_string()]
    );
}

#[test]
fn lone_medium_phrase_is_not_promoted_by_its_own_words() {
    let r = classifier().classify("Please confirm your identity");
    assert_eq!(r.risk, RiskLevel::Low);
    assert_eq!(r.matched_phrases, vec!["confirm your identity".to_string()]);

    let r = classifier().classify("You are owed a tax refund");
    assert_eq!(r.risk, RiskLevel::Low);
    assert_eq!(r.matched_phrases, vec!["tax refund".to_string()]);
}

#[test]
fn lone_call_back_is_low_with_evidence() {
    let r = classifier().classify("Let's schedule a call back tomorrow");
    assert_eq!(r.risk, RiskLevel::Low);
    assert_eq!(r.matched_phrases, vec!["call back".to_string()]);
}

#[test]
fn small_talk_matches_nothing() {
    let r = classifier().classify("The weather is nice today");
    assert_eq!(r.risk, RiskLevel::Low);
    assert!(r.matched_phrases.is_empty());
    assert_eq!(r.reason, "No suspicious phrases detected");
}

#[test]
fn high_dominates_any_amount_of_medium_and_low() {
    let r = classifier().classify(
        "Dear customer, urgent security alert, act now, special offer, free delivery, \
         just buy a gift card",
    );
    assert_eq!(r.risk, RiskLevel::High);
    assert_eq!(r.matched_phrases, vec!["gift card".to_string()]);
}

#[test]
fn single_medium_without_low_is_low() {
    let r = classifier().classify("There is unusual activity on the server");
    assert_eq!(r.risk, RiskLevel::Low);
    assert_eq!(r.matched_phrases, vec!["unusual activity".to_string()]);
}

#[test]
fn one_medium_and_one_low_is_medium() {
    let r = classifier().classify("Dear customer, this is a security alert");
    assert_eq!(r.risk, RiskLevel::Medium);
    assert_eq!(
        r.matched_phrases,
        vec!["security alert".to_string(), "dear customer".to_string()]
    );
}

#[test]
fn degenerate_inputs_fall_through_to_no_match() {
    let long = "z".repeat(200_000);
    for input in ["", "   \n\t", "?!.,;:-", long.as_str()] {
        let r = classifier().classify(input);
        assert_eq!(r.risk, RiskLevel::Low, "input {:?}", &input[..input.len().min(16)]);
        assert!(r.matched_phrases.is_empty());
        assert_eq!(r.reason, "No suspicious phrases detected");
    }
}

#[test]
fn case_does_not_change_the_result() {
    let upper = classifier().classify("SEND MONEY now");
    let lower = classifier().classify("send money now");
    assert_eq!(upper, lower);
    assert_eq!(upper.risk, RiskLevel::High);
    // Matches are reported in dictionary (lower-case) form, not input casing.
    assert_eq!(upper.matched_phrases, vec!["send money".to_string()]);
}

#[test]
fn classification_is_deterministic() {
    let clf = classifier();
    let text = "Congratulations, you have won! Claim your prize via this link";
    assert_eq!(clf.classify(text), clf.classify(text));
}

#[test]
fn shared_dictionary_is_usable_from_many_threads() {
    let clf = Arc::new(classifier());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let clf = Arc::clone(&clf);
            std::thread::spawn(move || clf.classify("please send money").risk)
        })
        .collect();
    for h in handles {
        assert_eq!(h.join().unwrap(), RiskLevel::High);
    }
}

#[test]
fn arabic_high_risk_phrase() {
    let r = classifier().classify("من فضلك أرسل المال الآن");
    assert_eq!(r.risk, RiskLevel::High);
    assert_eq!(r.matched_phrases, vec!["أرسل المال".to_string()]);
}

#[test]
fn vocalized_arabic_still_matches() {
    let r = classifier().classify("أعطني رَمْز التحقق");
    assert_eq!(r.risk, RiskLevel::High);
    assert_eq!(r.matched_phrases, vec!["رمز التحقق".to_string()]);
}

#[test]
fn arabic_medium_plus_low() {
    let r = classifier().classify("عزيزي العميل، تم تعليق حسابك");
    assert_eq!(r.risk, RiskLevel::Medium);
    assert_eq!(
        r.matched_phrases,
        vec!["تم تعليق حسابك".to_string(), "عزيزي العميل".to_string()]
    );
}

#[test]
fn word_boundary_mode_is_opt_in() {
    let text = "Carefree weekend, enjoy the freedom";
    assert!(!classifier().classify(text).matched_phrases.is_empty());
    let strict = classifier().with_match_mode(MatchMode::WordBoundary);
    assert!(strict.classify(text).matched_phrases.is_empty());
}

fn write_dictionary(json: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file
}

#[test]
fn loads_dictionary_from_json_file() {
    let file = write_dictionary(
        r#"{"version": 7, "high": ["Pay The Fee"], "medium": ["hurry"], "low": ["hello"]}"#,
    );
    let dict = PhraseDictionary::load_from_file(file.path()).unwrap();
    assert_eq!(dict.version(), 7);
    assert_eq!(dict.phrases(PhraseTier::High), ["pay the fee"]);

    let config = ClassifierConfig {
        phrase_file: Some(file.path().to_path_buf()),
        ..ClassifierConfig::default()
    };
    let clf = PhraseRiskClassifier::from_config(&config).unwrap();
    assert_eq!(clf.classify("hello, hurry").risk, RiskLevel::Medium);
    assert_eq!(clf.classify("send money").risk, RiskLevel::Low);
}

#[test]
fn invalid_dictionary_files_are_rejected() {
    let file = write_dictionary(r#"{"high": ["x"], "medium": [], "low": ["y"]}"#);
    assert!(matches!(
        PhraseDictionary::load_from_file(file.path()),
        Err(DictionaryError::EmptyTier(PhraseTier::Medium))
    ));

    let file = write_dictionary("not json");
    assert!(matches!(
        PhraseDictionary::load_from_file(file.path()),
        Err(DictionaryError::Parse(_))
    ));

    let missing = std::path::Path::new("/nonexistent/phonon/phrases.json");
    assert!(matches!(
        PhraseDictionary::load_from_file(missing),
        Err(DictionaryError::Io(_))
    ));
}
