//! Tests for schedule, candidate, and comment types.

use super::*;
use rstest::rstest;
use serde_json::json;

#[rstest]
#[case::empty("")]
#[case::blank("   \t")]
#[case::newlines("\n\r\n")]
fn blank_titles_fall_back_to_default(#[case] raw: &str) {
    assert_eq!(ScheduleTitle::from_input(raw).as_ref(), DEFAULT_SCHEDULE_TITLE);
}

#[rstest]
fn titles_blank_within_the_limit_fall_back_to_default() {
    let raw = format!("{}late text", " ".repeat(NAME_MAX));
    assert_eq!(ScheduleTitle::from_input(&raw).as_ref(), DEFAULT_SCHEDULE_TITLE);
}

#[rstest]
fn long_titles_are_truncated_by_character() {
    let raw = "予".repeat(NAME_MAX + 10);
    let title = ScheduleTitle::from_input(&raw);
    assert_eq!(title.as_ref().chars().count(), NAME_MAX);
}

#[rstest]
fn titles_keep_inner_whitespace() {
    let title = ScheduleTitle::from_input(" Team lunch ");
    assert_eq!(title.as_ref(), " Team lunch ");
}

#[rstest]
fn stored_titles_reject_overlong_values() {
    let result = ScheduleTitle::new("a".repeat(NAME_MAX + 1));
    assert_eq!(
        result,
        Err(ScheduleValidationError::TitleTooLong { max: NAME_MAX })
    );
}

#[rstest]
fn candidate_names_are_trimmed() {
    let name = CandidateName::new("  Friday 19:00 ").expect("valid name");
    assert_eq!(name.as_ref(), "Friday 19:00");
}

#[rstest]
fn candidate_names_reject_blank_values() {
    assert_eq!(
        CandidateName::new(" "),
        Err(ScheduleValidationError::EmptyCandidateName)
    );
}

#[rstest]
fn parse_skips_blank_lines_and_keeps_order() {
    let names = parse_candidate_names("\n b \r\n\n a\n  \n c").expect("valid input");
    let labels: Vec<&str> = names.iter().map(AsRef::as_ref).collect();
    assert_eq!(labels, ["b", "a", "c"]);
}

#[rstest]
fn parse_of_blank_input_is_empty() {
    let names = parse_candidate_names("  \n\n").expect("blank input is legal");
    assert!(names.is_empty());
}

#[rstest]
fn parse_reports_line_of_overlong_candidate() {
    let text = format!("ok\n\n{}", "x".repeat(NAME_MAX + 1));
    let result = parse_candidate_names(&text);
    assert_eq!(
        result,
        Err(ScheduleValidationError::CandidateNameTooLong {
            line: 3,
            max: NAME_MAX
        })
    );
}

#[rstest]
fn schedule_id_parses_uuid_strings() {
    let id: ScheduleId = "3fa85f64-5717-4562-b3fc-2c963f66afa6"
        .parse()
        .expect("valid UUID");
    assert_eq!(id.to_string(), "3fa85f64-5717-4562-b3fc-2c963f66afa6");
}

#[rstest]
fn schedule_id_rejects_garbage() {
    let result: Result<ScheduleId, _> = "not-a-uuid".parse();
    assert_eq!(result, Err(ScheduleValidationError::InvalidScheduleId));
}

#[rstest]
fn comment_text_defaults_to_empty() {
    let payload = json!({
        "scheduleId": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
        "participant": { "id": 1, "provider": "github" }
    });
    let comment: Comment = serde_json::from_value(payload).expect("valid comment");
    assert_eq!(comment.text, "");
}
