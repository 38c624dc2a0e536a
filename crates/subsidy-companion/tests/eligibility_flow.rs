use subsidy_companion::programs::domain::RuleType;
use subsidy_companion::programs::eligibility::{
    evaluate, AnswerField, Eligibility, EligibilityAnswers, COST_SHARE_RANGE, DOCUMENT_CHECKLIST,
    PAYMENT_CAP_RANGE,
};
use subsidy_companion::programs::practices::PracticeCatalog;
use subsidy_companion::wizard::{Page, SubmissionView, WizardSession, SUBMISSION_EMPTY_PROMPT};

fn complete_answers(location: &str) -> EligibilityAnswers {
    EligibilityAnswers {
        operation: "row-crop".to_string(),
        scale: "51-200-acres".to_string(),
        location: location.to_string(),
        practice: "soil-health".to_string(),
        land_control: String::new(),
        compliance_id: String::new(),
    }
}

#[test]
fn result_stays_hidden_until_core_answers_arrive() {
    let mut answers = EligibilityAnswers::default();
    assert!(evaluate(&answers).is_none());
    assert_eq!(answers.missing().len(), 4);

    answers.set(AnswerField::Operation, "dairy");
    answers.set(AnswerField::Scale, "under-50-acres");
    assert!(evaluate(&answers).is_none());
    assert_eq!(answers.missing(), vec!["Location", "Planned practice"]);

    answers.set(AnswerField::Location, "us-iowa");
    assert!(evaluate(&answers).is_none());

    answers.set(AnswerField::Practice, "cover-crops");
    assert!(answers.missing().is_empty());
    assert!(evaluate(&answers).is_some());
}

#[test]
fn us_territories_resolve_to_eqip_with_pinned_date() {
    let result = evaluate(&complete_answers("us-iowa")).expect("complete answers evaluate");

    assert_eq!(result.eligible, Eligibility::Likely);
    assert_eq!(
        result.program,
        "Environmental Quality Incentives Program (EQIP)"
    );
    assert_eq!(result.rule_type, RuleType::RankingCutoff);
    assert_eq!(result.next_date, "November 15, 2024");
    assert_eq!(result.cost_share, COST_SHARE_RANGE);
    assert_eq!(result.cap, PAYMENT_CAP_RANGE);
    assert_eq!(result.checklist, DOCUMENT_CHECKLIST.to_vec());
}

#[test]
fn canadian_territories_resolve_to_cap_agriinvest() {
    let result = evaluate(&complete_answers("canada-alberta")).expect("complete answers evaluate");

    assert_eq!(
        result.program,
        "Canadian Agricultural Partnership (CAP) - AgriInvest"
    );

    let view = result.to_view();
    assert_eq!(view.rule_type_label, "Ranking cutoff");
    assert_eq!(view.eligible_label, "Likely");
}

#[test]
fn quoted_bands_hold_for_every_territory() {
    for location in [
        "us-iowa",
        "canada-alberta",
        "australia-nsw",
        "newzealand-canterbury",
        "brazil-mato-grosso",
        "chile-araucania",
        "somewhere-else",
    ] {
        let result = evaluate(&complete_answers(location)).expect("complete answers evaluate");
        assert_eq!(result.eligible, Eligibility::Likely, "for {location}");
        assert_eq!(result.cost_share, COST_SHARE_RANGE, "for {location}");
        assert_eq!(result.cap, PAYMENT_CAP_RANGE, "for {location}");
        assert_eq!(result.checklist.len(), 3, "for {location}");
    }
}

#[test]
fn optional_answers_gate_plan_actions_only() {
    let mut answers = complete_answers("us-iowa");
    let baseline = evaluate(&answers).expect("complete answers evaluate");
    assert!(!answers.plan_actions_enabled());

    answers.set(AnswerField::LandControl, "owned");
    assert!(!answers.plan_actions_enabled());
    assert_eq!(evaluate(&answers), Some(baseline.clone()));

    answers.set(AnswerField::ComplianceId, "FSA-204-1187");
    assert!(answers.plan_actions_enabled());
    assert_eq!(evaluate(&answers), Some(baseline));
}

#[test]
fn wizard_pages_are_reachable_in_any_order() {
    let mut session = WizardSession::new();
    assert_eq!(session.current_page(), Page::Home);

    for page in [
        Page::Deadlines,
        Page::Help,
        Page::Eligibility,
        Page::Home,
        Page::Submission,
    ] {
        assert_eq!(session.go_to(page), page);
        assert_eq!(session.current_page(), page);
    }
}

#[test]
fn assistant_drawer_toggles_without_losing_answers() {
    let mut session = WizardSession::new();
    session.answer(AnswerField::Operation, "orchard");

    assert!(!session.assistant_open());
    assert!(session.toggle_assistant());
    assert!(!session.toggle_assistant());
    assert_eq!(session.answers().operation, "orchard");
}

#[test]
fn submission_page_shows_empty_state_before_the_screen_runs() {
    let session = WizardSession::new();
    let practices = PracticeCatalog::standard();

    match session.submission_view(&practices) {
        SubmissionView::Empty { prompt, redirect } => {
            assert_eq!(prompt, SUBMISSION_EMPTY_PROMPT);
            assert_eq!(redirect, Page::Eligibility);
        }
        SubmissionView::Ready(_) => panic!("expected empty submission state"),
    }
}

#[test]
fn wizard_assembles_the_pack_once_answers_complete() {
    let mut session = WizardSession::new();
    let practices = PracticeCatalog::standard();

    session.go_to(Page::Eligibility);
    session.answer(AnswerField::Operation, "row-crop");
    session.answer(AnswerField::Scale, "201-500-acres");
    session.answer(AnswerField::Location, "us-nebraska");
    session.answer(AnswerField::Practice, "soil-health");

    session.go_to(Page::Submission);
    let pack = match session.submission_view(&practices) {
        SubmissionView::Ready(pack) => pack,
        SubmissionView::Empty { .. } => panic!("expected assembled pack"),
    };

    assert_eq!(pack.country_label, "United States");
    assert_eq!(pack.practice_name, "Soil Health Management");
    assert_eq!(pack.practice_plan.len(), 3);
    assert_eq!(
        pack.eligibility.program,
        "Environmental Quality Incentives Program (EQIP)"
    );
    assert!(!pack.actions_enabled);

    session.answer(AnswerField::LandControl, "leased-long-term");
    session.answer(AnswerField::ComplianceId, "FSA-204-1187");
    match session.submission_view(&practices) {
        SubmissionView::Ready(pack) => assert!(pack.actions_enabled),
        SubmissionView::Empty { .. } => panic!("expected assembled pack"),
    }
}

#[test]
fn unknown_practice_falls_back_to_the_generic_plan() {
    let mut answers = complete_answers("us-iowa");
    answers.set(AnswerField::Practice, "experimental-agroforestry");

    let practices = PracticeCatalog::standard();
    let result = evaluate(&answers).expect("complete answers evaluate");
    let pack = subsidy_companion::programs::eligibility::assemble_pack(
        &answers, &result, &practices,
    );

    assert_eq!(pack.practice_name, "experimental-agroforestry");
    assert!(!pack.practice_plan.is_empty());
}

#[test]
fn wizard_tips_track_the_current_page() {
    let mut session = WizardSession::new();
    let home_tips = session.tips(0);
    assert!(home_tips[0].contains("eligibility check"));

    session.go_to(Page::Eligibility);
    let eligibility_tips = session.tips(0);
    assert!(eligibility_tips[0].contains("question(s) left"));

    session.go_to(Page::Submission);
    let submission_tips = session.tips(3);
    assert!(submission_tips.iter().any(|tip| tip.contains("unlock")));
    assert!(submission_tips.iter().any(|tip| tip.contains("3 program deadline(s)")));
}
