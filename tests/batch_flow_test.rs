mod common;

use std::time::Duration;

use bcss_ui_driver::error::{AppError, AssertionError};
use bcss_ui_driver::models::{BatchRequest, ExpectedStatus};
use bcss_ui_driver::services::ArtefactKind;
use bcss_ui_driver::workflow::{BatchCtx, BatchFlow, BatchOutcome};
use common::{FakeDriver, FixedStatus};

const LYNCH_DESCRIPTION: &str = "Lynch Surveillance Pre-invitation";
const LYNCH_SENT: &str = "G2 Lynch Pre-invitation Sent";

fn lynch_request() -> BatchRequest {
    BatchRequest::new(
        "G1",
        LYNCH_DESCRIPTION,
        Some(ExpectedStatus::One(LYNCH_SENT.to_string())),
    )
}

fn ctx(request: &BatchRequest) -> BatchCtx {
    BatchCtx::new("测试场景", 1, &request.batch_type, &request.description)
}

fn flow(dir: &std::path::Path) -> BatchFlow {
    BatchFlow::with_settings(dir, Duration::from_secs(5))
}

#[tokio::test]
async fn test_lynch_batch_is_archived_and_subject_status_checked() {
    let downloads = tempfile::tempdir().unwrap();
    let driver = FakeDriver::new()
        .with_batch("40001", "G1", "Other letters", "Open")
        .with_batch("40002", "G1", LYNCH_DESCRIPTION, "Prepared")
        .with_csv_numbers(vec!["999 000 1112", "9990002223"]);
    let lookup = FixedStatus::new(LYNCH_SENT);
    let request = lynch_request();

    let outcome = flow(downloads.path())
        .run(&driver, &lookup, &request, &ctx(&request))
        .await
        .unwrap();

    let BatchOutcome::Processed {
        batch_id,
        nhs_numbers,
        artefacts,
    } = outcome
    else {
        panic!("批次应被处理");
    };
    assert_eq!(batch_id, "40002");
    assert_eq!(nhs_numbers, vec!["9990001112", "9990002223"]);
    assert_eq!(artefacts.len(), 1);

    // 只查询第一个号码
    assert_eq!(*lookup.queried.borrow(), vec!["9990001112".to_string()]);

    assert!(driver.did("fill #eventCodeFilter G1"));
    assert!(driver.did("click input[value='Prepare Batch']"));
    assert!(driver.did("fill #batchIdFilter 40002"));
    assert!(driver.dialogs_accepted.get());

    // 下载文件处理后被删除
    assert_eq!(std::fs::read_dir(downloads.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_lynch_letter_pdf_feeds_status_check() {
    let downloads = tempfile::tempdir().unwrap();
    let driver = FakeDriver::new()
        .with_batch("40010", "G1", LYNCH_DESCRIPTION, "Open")
        .with_pdf_letters();
    let lookup = FixedStatus::new(LYNCH_SENT);
    let request = lynch_request();

    let outcome = flow(downloads.path())
        .run(&driver, &lookup, &request, &ctx(&request))
        .await
        .unwrap();

    let BatchOutcome::Processed {
        nhs_numbers,
        artefacts,
        ..
    } = outcome
    else {
        panic!("批次应被处理");
    };
    assert_eq!(artefacts.len(), 1);
    assert_eq!(artefacts[0].kind, ArtefactKind::Pdf);
    assert_eq!(nhs_numbers, vec!["1234567890"]);
    assert_eq!(*lookup.queried.borrow(), vec!["1234567890".to_string()]);
    assert_eq!(std::fs::read_dir(downloads.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_prepared_batch_with_several_documents() {
    let downloads = tempfile::tempdir().unwrap();
    let driver = FakeDriver::new()
        .with_batch("40003", "G1", LYNCH_DESCRIPTION, "Prepared")
        .with_documents(2, 2)
        .already_prepared();
    let lookup = FixedStatus::new(LYNCH_SENT);
    let request = lynch_request();

    let outcome = flow(downloads.path())
        .run(&driver, &lookup, &request, &ctx(&request))
        .await
        .unwrap();

    match outcome {
        BatchOutcome::Processed {
            nhs_numbers,
            artefacts,
            ..
        } => {
            assert_eq!(artefacts.len(), 2);
            assert_eq!(nhs_numbers.len(), 2);
        }
        BatchOutcome::Skipped => panic!("批次不应被跳过"),
    }
    assert!(!driver.did("click input[value='Prepare Batch']"));
    assert!(driver.did("click_nth input[value='Retrieve'] 1"));
}

#[tokio::test]
async fn test_missing_batch_fails_with_type_and_description() {
    let downloads = tempfile::tempdir().unwrap();
    let driver = FakeDriver::new().with_batch("40004", "G1", LYNCH_DESCRIPTION, "Archived");
    let lookup = FixedStatus::new(LYNCH_SENT);
    let request = lynch_request();

    let err = flow(downloads.path())
        .run(&driver, &lookup, &request, &ctx(&request))
        .await
        .unwrap_err();

    assert!(err.is_assertion());
    assert!(err
        .to_string()
        .contains("No G1 Lynch Surveillance Pre-invitation batch found"));
    assert!(lookup.queried.borrow().is_empty());
}

#[tokio::test]
async fn test_optional_digital_leaflet_batch_is_skipped() {
    let downloads = tempfile::tempdir().unwrap();
    let driver = FakeDriver::new();
    let lookup = FixedStatus::new("S9 Pre-invitation Sent");
    let request = BatchRequest::new(
        "S1",
        "Pre-invitation (FIT) (digital leaflet)",
        Some(ExpectedStatus::One("S9 Pre-invitation Sent".to_string())),
    );

    let outcome = flow(downloads.path())
        .run(&driver, &lookup, &request, &ctx(&request))
        .await
        .unwrap();

    assert_eq!(outcome, BatchOutcome::Skipped);
    assert!(!driver.did("click input[value='Prepare Batch']"));
    assert!(lookup.queried.borrow().is_empty());
}

#[tokio::test]
async fn test_unexpected_event_status_is_reported() {
    let downloads = tempfile::tempdir().unwrap();
    let driver = FakeDriver::new().with_batch("40005", "G1", LYNCH_DESCRIPTION, "Open");
    let lookup = FixedStatus::new("G1 Selected for Lynch Surveillance");
    let request = lynch_request();

    let err = flow(downloads.path())
        .run(&driver, &lookup, &request, &ctx(&request))
        .await
        .unwrap_err();

    match err {
        AppError::Assertion(AssertionError::EventStatusMismatch {
            nhs_number,
            actual,
            expected,
        }) => {
            assert_eq!(nhs_number, "9990001112");
            assert_eq!(actual, "G1 Selected for Lynch Surveillance");
            assert_eq!(expected, vec![LYNCH_SENT.to_string()]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_any_of_expected_statuses() {
    let downloads = tempfile::tempdir().unwrap();
    let driver = FakeDriver::new().with_batch("40006", "S1", "Pre-invitation (FIT)", "Open");
    let lookup = FixedStatus::new("S9 Pre-invitation Sent");
    let request = BatchRequest::new(
        "S1",
        "Pre-invitation (FIT)",
        Some(ExpectedStatus::AnyOf(vec![
            "S9 Pre-invitation Sent".to_string(),
            "S10 Invitation & FIT Kit Sent".to_string(),
        ])),
    );

    let outcome = flow(downloads.path())
        .run(&driver, &lookup, &request, &ctx(&request))
        .await
        .unwrap();

    assert!(matches!(outcome, BatchOutcome::Processed { .. }));
}
