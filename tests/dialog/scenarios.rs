//! End-to-end walkthroughs of the dialog.

use archive_date_dialog::{ConfirmForm, DialogResponse, FieldChange, VersionKey};

use crate::support::{self, Fixture};

#[test]
fn set_item_date_on_fresh_item() {
    let fixture = Fixture::new(support::plain_item());
    let admin = support::admin();

    let view = fixture.dialog.open(&fixture.request, &admin).unwrap();
    assert_eq!(view.item_date, "");
    assert_eq!(view.rows.len(), 1);
    assert_eq!(view.rows[0].date, "");

    let mut form = view.form();
    form.item_date = "2024-01-15".into();
    form.set_version_date(&VersionKey::new("en", 1), "");

    let response = fixture.dialog.submit(&fixture.request, &admin, &form).unwrap();
    let DialogResponse::Close(report) = response else {
        panic!("expected close, got {response:?}");
    };
    assert_eq!(report.item, FieldChange::Set("20240115T000000Z".into()));
    assert_eq!(report.version(&VersionKey::new("en", 1)), Some(&FieldChange::Unchanged));

    let item = fixture.item();
    assert_eq!(item.archive_date(), "20240115T000000Z");
    assert_eq!(item.versions[0].archive_version_date(), "");

    let messages = fixture.audit_messages();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].starts_with("Set Item Archive date: "));
}

#[test]
fn clear_existing_item_date() {
    let fixture = Fixture::new(support::archived_item("20230601T000000Z"));
    let admin = support::admin();

    let mut form = fixture.dialog.open(&fixture.request, &admin).unwrap().form();
    assert_eq!(form.item_date, "20230601T000000");
    form.item_date.clear();

    let response = fixture.dialog.submit(&fixture.request, &admin, &form).unwrap();
    assert!(matches!(response, DialogResponse::Close(_)));
    assert_eq!(fixture.item().archive_date(), "");

    let messages = fixture.audit_messages();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].starts_with("Clear Item Archive date: "));
}

#[test]
fn bad_item_date_alerts() {
    let fixture = Fixture::new(support::archived_item("20230601T000000Z"));
    let admin = support::admin();
    let before = fixture.item();

    let response = fixture
        .dialog
        .submit(&fixture.request, &admin, &ConfirmForm::new("not-a-date"))
        .unwrap();
    assert_eq!(
        response,
        DialogResponse::Alert("Failed to parse date not-a-date. No changes have been made.".into())
    );
    assert_eq!(fixture.item(), before);
    assert!(fixture.audit_messages().is_empty());
}
