use archive_date_dialog::{
    AuditAction, ConfirmForm, DialogConfig, DialogError, DialogResponse, FieldChange, Item,
    Session, ValidationPolicy, Version, VersionKey, ARCHIVE_DATE_FIELD,
    ARCHIVE_VERSION_DATE_FIELD,
};

use crate::support::{self, Fixture, DB, PATH};

fn versioned_item() -> Item {
    Item::new(DB, support::item_id(), PATH)
        .with_field(ARCHIVE_DATE_FIELD, "20230601T000000Z")
        .with_version(Version::new("en", 1).with_field(ARCHIVE_VERSION_DATE_FIELD, "20230101T000000Z"))
        .with_version(Version::new("da", 1))
}

#[test]
fn round_trip_through_storage() {
    let fixture = Fixture::with_config(
        support::plain_item(),
        DialogConfig {
            display_utc_offset_minutes: -300,
            ..DialogConfig::default()
        },
    );
    let admin = support::admin();

    for date in ["20240115T103000", "20251231T235959", "20000229T000000"] {
        let mut form = fixture.dialog.open(&fixture.request, &admin).unwrap().form();
        form.item_date = date.to_string();
        form.set_version_date(&VersionKey::new("en", 1), date);
        fixture.dialog.confirm(&fixture.request, &admin, &form).unwrap();

        let view = fixture.dialog.open(&fixture.request, &admin).unwrap();
        assert_eq!(view.item_date, date);
        assert_eq!(view.rows[0].date, date);
    }
}

#[test]
fn stored_value_is_canonical_utc() {
    let fixture = Fixture::with_config(
        support::plain_item(),
        DialogConfig {
            display_utc_offset_minutes: 60,
            ..DialogConfig::default()
        },
    );
    let report = fixture
        .dialog
        .confirm(&fixture.request, &support::admin(), &ConfirmForm::new("2024-01-15 10:00"))
        .unwrap();

    assert_eq!(report.item, FieldChange::Set("20240115T090000Z".into()));
    assert_eq!(fixture.item().archive_date(), "20240115T090000Z");
    assert_eq!(
        fixture.audit_messages(),
        vec![format!(
            "Set Item Archive date: {}, date: 20240115T090000",
            support::item_descriptor()
        )]
    );
}

#[test]
fn unparsable_item_date_writes_nothing() {
    let fixture = Fixture::new(versioned_item());
    let before = fixture.item();

    let form = ConfirmForm::new("not-a-date")
        .with_version_date(VersionKey::new("en", 1), "")
        .with_version_date(VersionKey::new("da", 1), "2024-02-01");
    let err = fixture
        .dialog
        .confirm(&fixture.request, &support::admin(), &form)
        .unwrap_err();

    assert!(matches!(
        err,
        DialogError::InvalidDateFormat { ref value, version: None } if value == "not-a-date"
    ));
    assert_eq!(fixture.item(), before);
    assert!(fixture.audit_messages().is_empty());
}

#[test]
fn clearing_emits_one_record_only_when_previously_set() {
    let fixture = Fixture::new(versioned_item());
    let form = ConfirmForm::new("")
        .with_version_date(VersionKey::new("en", 1), "")
        .with_version_date(VersionKey::new("da", 1), "");
    let report = fixture
        .dialog
        .confirm(&fixture.request, &support::admin(), &form)
        .unwrap();

    assert_eq!(report.item, FieldChange::Cleared);
    assert_eq!(report.version(&VersionKey::new("en", 1)), Some(&FieldChange::Cleared));
    assert_eq!(report.version(&VersionKey::new("da", 1)), Some(&FieldChange::Unchanged));
    assert_eq!(
        fixture.audit_messages(),
        vec![
            format!("Clear Item Archive date: {}", support::item_descriptor()),
            format!(
                "Clear Version Archive date: {}",
                support::version_descriptor("en", 1)
            ),
        ]
    );

    let item = fixture.item();
    assert_eq!(item.archive_date(), "");
    assert!(item.versions.iter().all(|v| v.archive_version_date().is_empty()));

    // a second clear finds nothing to clear
    fixture
        .dialog
        .confirm(&fixture.request, &support::admin(), &form)
        .unwrap();
    assert_eq!(fixture.audit_messages().len(), 2);
}

#[test]
fn unparsable_version_date_is_treated_as_clear() {
    let fixture = Fixture::new(versioned_item());
    let form = ConfirmForm::new("2024-01-15")
        .with_version_date(VersionKey::new("en", 1), "tomorrow-ish")
        .with_version_date(VersionKey::new("da", 1), "2024-02-01");

    let response = fixture
        .dialog
        .submit(&fixture.request, &support::admin(), &form)
        .unwrap();
    let DialogResponse::Close(report) = response else {
        panic!("expected the dialog to close, got {response:?}");
    };
    assert_eq!(report.version(&VersionKey::new("en", 1)), Some(&FieldChange::Cleared));
    assert_eq!(
        report.version(&VersionKey::new("da", 1)),
        Some(&FieldChange::Set("20240201T000000Z".into()))
    );

    let item = fixture.item();
    assert_eq!(item.archive_date(), "20240115T000000Z");
    let en = item.version(&VersionKey::new("en", 1)).unwrap();
    assert_eq!(en.archive_version_date(), "");
    let da = item.version(&VersionKey::new("da", 1)).unwrap();
    assert_eq!(da.archive_version_date(), "20240201T000000Z");

    let actions: Vec<_> = fixture.audit.lock().unwrap().iter().map(|r| r.action).collect();
    assert_eq!(
        actions,
        vec![AuditAction::SetItem, AuditAction::SetVersion, AuditAction::ClearVersion]
    );
}

#[test]
fn strict_version_policy_alerts_without_writing() {
    let config = DialogConfig {
        version_date_policy: ValidationPolicy::Strict,
        ..DialogConfig::default()
    };
    let fixture = Fixture::with_config(versioned_item(), config);
    let before = fixture.item();

    let form = ConfirmForm::new("2024-01-15").with_version_date(VersionKey::new("da", 1), "31/31/31");
    let response = fixture
        .dialog
        .submit(&fixture.request, &support::admin(), &form)
        .unwrap();

    assert_eq!(
        response,
        DialogResponse::Alert("Failed to parse date 31/31/31. No changes have been made.".into())
    );
    assert_eq!(fixture.item(), before);
    assert!(fixture.audit_messages().is_empty());
}

#[test]
fn audit_records_carry_the_caller() {
    let fixture = Fixture::new(support::plain_item());
    let session = Session::for_user("sitecore\\editor", &["admin"]);
    fixture
        .dialog
        .confirm(&fixture.request, &session, &ConfirmForm::new("2024-01-15"))
        .unwrap();

    let records = fixture.audit.lock().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].actor, "sitecore\\editor");
    assert_eq!(records[0].value.as_deref(), Some("20240115T000000"));
}

#[test]
fn confirm_rechecks_access() {
    let fixture = Fixture::new(support::plain_item());
    let err = fixture
        .dialog
        .confirm(
            &fixture.request,
            &Session::for_user("sitecore\\author", &["author"]),
            &ConfirmForm::new("2024-01-15"),
        )
        .unwrap_err();
    assert!(matches!(err, DialogError::AccessDenied));
    assert_eq!(fixture.item().archive_date(), "");
}

#[test]
fn structural_errors_propagate_from_submit() {
    let fixture = Fixture::new(support::plain_item());
    let missing = archive_date_dialog::DialogRequest::new(
        "{00000000-0000-0000-0000-000000000001}",
        DB,
    );
    let err = fixture
        .dialog
        .submit(&missing, &support::admin(), &ConfirmForm::new("2024-01-15"))
        .unwrap_err();
    assert!(matches!(err, DialogError::NotFound { .. }));
}

#[test]
fn versions_are_refetched_on_confirm() {
    let fixture = Fixture::new(support::plain_item());
    let form = fixture
        .dialog
        .open(&fixture.request, &support::admin())
        .unwrap()
        .form();

    // a version appears between open and confirm
    fixture
        .dialog
        .store()
        .insert(&support::plain_item().with_version(Version::new("fr", 1)))
        .unwrap();

    let report = fixture
        .dialog
        .confirm(&fixture.request, &support::admin(), &form)
        .unwrap();
    assert_eq!(report.skipped, vec![VersionKey::new("fr", 1)]);
    assert_eq!(report.version(&VersionKey::new("en", 1)), Some(&FieldChange::Unchanged));
}
