use crate::programs::eligibility::EligibilityAnswers;

use super::Page;

/// Context-sensitive guidance for the assistant drawer. Pure derivation from
/// the current page and session state, so tips stay deterministic in tests.
pub fn assistant_tips(
    page: Page,
    answers: &EligibilityAnswers,
    upcoming_deadlines: usize,
) -> Vec<String> {
    let mut tips = Vec::new();

    match page {
        Page::Home => {
            tips.push(
                "Start with the eligibility check; it takes four answers and unlocks the rest of the wizard."
                    .to_string(),
            );
        }
        Page::Eligibility => {
            let missing = answers.missing();
            if missing.is_empty() {
                tips.push(
                    "All core questions answered; review the suggested program below.".to_string(),
                );
            } else {
                tips.push(format!(
                    "{} question(s) left before your result appears: {}",
                    missing.len(),
                    missing.join(", ")
                ));
            }
        }
        Page::Practices => {
            tips.push(
                "Pick the practice you are most likely to fund this season; you can re-run the check for others later."
                    .to_string(),
            );
        }
        Page::Submission => {
            if answers.plan_actions_enabled() {
                tips.push(
                    "Land control and compliance records are on file; plan actions are unlocked."
                        .to_string(),
                );
            } else {
                tips.push(
                    "Add your land control details and compliance records ID to unlock the plan actions."
                        .to_string(),
                );
            }
        }
        Page::Deadlines => {
            tips.push(
                "Ranking cutoffs batch applications for scoring; signup deadlines close enrollment outright."
                    .to_string(),
            );
        }
        Page::Help => {
            tips.push(
                "Your local service center can confirm eligibility details this wizard can only estimate."
                    .to_string(),
            );
        }
    }

    if upcoming_deadlines > 0 && page != Page::Deadlines {
        tips.push(format!(
            "{} program deadline(s) fall within the next month; check the deadlines page before finalizing plans.",
            upcoming_deadlines
        ));
    }

    tips
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eligibility_tips_name_the_missing_answers() {
        let mut answers = EligibilityAnswers::default();
        answers.operation = "row-crop".to_string();

        let tips = assistant_tips(Page::Eligibility, &answers, 0);
        assert_eq!(tips.len(), 1);
        assert!(tips[0].contains("3 question(s)"));
        assert!(tips[0].contains("Location"));
    }

    #[test]
    fn deadline_nudge_appears_on_other_pages_only() {
        let answers = EligibilityAnswers::default();

        let home_tips = assistant_tips(Page::Home, &answers, 2);
        assert!(home_tips.iter().any(|tip| tip.contains("2 program deadline(s)")));

        let deadline_tips = assistant_tips(Page::Deadlines, &answers, 2);
        assert!(!deadline_tips
            .iter()
            .any(|tip| tip.contains("program deadline(s)")));
    }
}
