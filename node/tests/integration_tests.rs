//! Integration tests for the LMDB-backed verification service.
//!
//! Each test opens a fresh environment in a temporary directory and drives
//! the engine through the same entry points the CLI uses.

use std::io::Write;

use veriskill_node::{NodeError, ServiceConfig, VerificationService};
use veriskill_types::{
    AnswerOption, Domain, LocalizedText, Question, Role, Step, TrustBadge, UserId,
    VehicleCategory, VerificationStatus,
};
use veriskill_verification::VerificationError;

fn temp_service() -> (VerificationService, tempfile::TempDir) {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let config = ServiceConfig {
        data_dir: dir.path().join("data"),
        map_size_mb: 16,
        ..ServiceConfig::default()
    };
    let service = VerificationService::open(&config).expect("failed to open service");
    (service, dir)
}

/// Ten questions, option 0 correct on each.
fn bank(prefix: &str) -> Vec<Question> {
    (0..10)
        .map(|i| {
            Question::new(
                format!("{prefix}-{i}").as_str(),
                LocalizedText::english(format!("{prefix} question {i}")),
                vec![
                    AnswerOption::new(LocalizedText::english("right"), true),
                    AnswerOption::new(LocalizedText::english("wrong"), false),
                    AnswerOption::new(LocalizedText::english("also wrong"), false),
                ],
            )
        })
        .collect()
}

/// `correct` answers of 0 followed by wrong answers, ten in total.
fn answers(correct: usize) -> Vec<usize> {
    (0..10).map(|i| if i < correct { 0 } else { 1 }).collect()
}

fn uid(s: &str) -> UserId {
    UserId::new(s).unwrap()
}

#[test]
fn technician_runs_both_steps_and_gets_admin_confirmation() {
    let (service, _dir) = temp_service();
    service.store_questions(Role::Technician, Step::One, &bank("t1")).unwrap();
    service.store_questions(Role::Technician, Step::Two, &bank("t2")).unwrap();

    let user = uid("tech-1");
    service
        .orchestrator()
        .register(
            user.clone(),
            Role::Technician,
            Some(Domain::Ev),
            Some(VehicleCategory::ThreeWheeler),
        )
        .unwrap();

    let first = service.attempt(&user, Step::One, &answers(8)).unwrap();
    assert!(first.passed);
    assert_eq!(first.percentage, 80);
    assert_eq!(first.next_status, VerificationStatus::Step1Completed);
    assert_eq!(first.next_step, Some(Step::Two));
    assert_eq!(
        service.orchestrator().trust_badge(&user).unwrap(),
        TrustBadge::Pending
    );

    let second = service.attempt(&user, Step::Two, &answers(7)).unwrap();
    assert!(second.passed);
    assert_eq!(second.next_status, VerificationStatus::Verified);
    assert!(!second.has_next_step);

    assert_eq!(
        service.orchestrator().trust_badge(&user).unwrap(),
        TrustBadge::QuizPassed
    );
    let badge = service.admin().set_admin_verified(&user, true).unwrap();
    assert_eq!(badge, TrustBadge::FullyVerified);
}

#[test]
fn failed_second_step_is_terminal_until_retry() {
    let (service, _dir) = temp_service();
    service.store_questions(Role::Technician, Step::One, &bank("t1")).unwrap();
    service.store_questions(Role::Technician, Step::Two, &bank("t2")).unwrap();

    let user = uid("tech-2");
    service
        .orchestrator()
        .register(user.clone(), Role::Technician, Some(Domain::Bs6), None)
        .unwrap();
    service.attempt(&user, Step::One, &answers(9)).unwrap();

    let outcome = service.attempt(&user, Step::Two, &answers(6)).unwrap();
    assert!(!outcome.passed);
    assert_eq!(outcome.next_status, VerificationStatus::Failed);

    let progress = service.orchestrator().progress(&user).unwrap();
    assert_eq!(progress.status, VerificationStatus::Failed);
    assert_eq!(progress.step, 2);
    assert_eq!(progress.last_score, Some((6, 10)));
    assert!(progress.retry_available_at.is_some());

    let err = service.attempt(&user, Step::Two, &answers(10)).unwrap_err();
    assert!(matches!(
        err,
        NodeError::Verification(VerificationError::InvalidStepRequest { .. })
    ));
}

#[test]
fn aspirant_reads_the_technician_bank() {
    let (service, _dir) = temp_service();
    service.store_questions(Role::Aspirant, Step::One, &bank("t1")).unwrap();

    let tech = uid("tech-3");
    service
        .orchestrator()
        .register(tech.clone(), Role::Technician, None, None)
        .unwrap();
    let session = service.orchestrator().begin_step(&tech, Step::One).unwrap();
    assert_eq!(session.questions().len(), 10);

    let aspirant = uid("asp-1");
    service
        .orchestrator()
        .register(aspirant.clone(), Role::Aspirant, None, None)
        .unwrap();
    let outcome = service.attempt(&aspirant, Step::One, &answers(7)).unwrap();
    assert_eq!(outcome.next_status, VerificationStatus::Verified);
}

#[test]
fn empty_bank_is_reported_and_nothing_is_written() {
    let (service, _dir) = temp_service();
    let user = uid("sales-1");
    service
        .orchestrator()
        .register(user.clone(), Role::Sales, None, None)
        .unwrap();

    let err = service.attempt(&user, Step::One, &answers(10)).unwrap_err();
    assert!(matches!(
        err,
        NodeError::Verification(VerificationError::NoQuestionsAvailable { .. })
    ));
    let progress = service.orchestrator().progress(&user).unwrap();
    assert_eq!(progress.status, VerificationStatus::Pending);
    assert_eq!(progress.last_score, None);
}

#[test]
fn json_import_stores_the_set() {
    let (service, dir) = temp_service();
    let path = dir.path().join("workshop.json");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(
        br#"[
            {
                "id": "w-1",
                "prompt": { "en": "Torque for wheel nuts?", "hi": "..." },
                "options": [
                    { "text": { "en": "40 Nm" } },
                    { "text": { "en": "90 Nm" }, "is_correct": true }
                ]
            }
        ]"#,
    )
    .unwrap();

    assert_eq!(service.import_questions(Role::Workshop, Step::One, &path).unwrap(), 1);

    let user = uid("shop-1");
    service
        .orchestrator()
        .register(user.clone(), Role::Workshop, None, None)
        .unwrap();
    let outcome = service.attempt(&user, Step::One, &[1]).unwrap();
    assert!(outcome.passed);
    assert_eq!(outcome.next_status, VerificationStatus::Verified);
}

#[test]
fn malformed_import_is_rejected() {
    let (service, dir) = temp_service();
    let path = dir.path().join("bad.json");
    std::fs::write(
        &path,
        r#"[{ "id": "x", "prompt": { "en": "?" }, "options": [{ "text": { "en": "only" } }] }]"#,
    )
    .unwrap();
    assert!(matches!(
        service.import_questions(Role::Sales, Step::One, &path),
        Err(NodeError::InvalidQuestionSet(_))
    ));

    std::fs::write(&path, "not json").unwrap();
    assert!(matches!(
        service.import_questions(Role::Sales, Step::One, &path),
        Err(NodeError::InvalidQuestionSet(_))
    ));
}

#[test]
fn records_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let config = ServiceConfig {
        data_dir: dir.path().to_path_buf(),
        map_size_mb: 16,
        ..ServiceConfig::default()
    };
    let user = uid("tech-4");
    {
        let service = VerificationService::open(&config).unwrap();
        service.store_questions(Role::Technician, Step::One, &bank("t1")).unwrap();
        service
            .orchestrator()
            .register(user.clone(), Role::Technician, Some(Domain::Ev), None)
            .unwrap();
        service.attempt(&user, Step::One, &answers(7)).unwrap();
    }

    let service = VerificationService::open(&config).unwrap();
    let progress = service.orchestrator().progress(&user).unwrap();
    assert_eq!(progress.status, VerificationStatus::Step1Completed);
    assert_eq!(progress.next_step, Some(Step::Two));
}

#[test]
fn answer_list_must_match_the_question_count() {
    let (service, _dir) = temp_service();
    service.store_questions(Role::Sales, Step::One, &bank("s1")).unwrap();
    let user = uid("sales-2");
    service
        .orchestrator()
        .register(user.clone(), Role::Sales, None, None)
        .unwrap();

    let mut extra = answers(10);
    extra.push(0);
    assert!(matches!(
        service.attempt(&user, Step::One, &extra),
        Err(NodeError::AnswerCount {
            expected: 10,
            given: 11
        })
    ));
    let progress = service.orchestrator().progress(&user).unwrap();
    assert_eq!(progress.status, VerificationStatus::Pending);
    assert_eq!(progress.last_score, None);
}
