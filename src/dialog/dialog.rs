use crate::access::{AccessPolicy, RolePolicy, Session};
use crate::audit::{self, AuditAction, AuditRecord, AuditSink};
use crate::config::{ConfigError, DialogConfig};
use crate::dates::{self, DateInput, DisplayZone};
use crate::error::DialogError;
use crate::store::{
    EditContext, Item, ItemStore, RecordRef, VersionKey, ARCHIVE_DATE_FIELD,
    ARCHIVE_VERSION_DATE_FIELD,
};

use super::request::DialogRequest;
use super::view::{
    ConfirmForm, ConfirmReport, DialogResponse, DialogView, FieldChange, VersionChange,
    VersionRow,
};

/// One validated field write waiting to be applied.
struct PendingChange {
    record: RecordRef,
    revision: u64,
    field: &'static str,
    previous: String,
    input: DateInput,
    subject: String,
    set_action: AuditAction,
    clear_action: AuditAction,
}

/// Archive date dialog over a store, an access policy and an audit sink.
pub struct ArchiveDateDialog<S, A = RolePolicy, L = audit::LogAuditSink> {
    store: S,
    access: A,
    audit: L,
    zone: DisplayZone,
    config: DialogConfig,
}

impl<S: ItemStore, L: AuditSink> ArchiveDateDialog<S, RolePolicy, L> {
    /// Dialog gated by the configured roles.
    pub fn from_config(store: S, audit: L, config: DialogConfig) -> Result<Self, ConfigError> {
        let access = config.role_policy();
        Self::new(store, access, audit, config)
    }
}

impl<S: ItemStore, A: AccessPolicy, L: AuditSink> ArchiveDateDialog<S, A, L> {
    pub fn new(store: S, access: A, audit: L, config: DialogConfig) -> Result<Self, ConfigError> {
        let zone = config.display_zone()?;
        Ok(Self {
            store,
            access,
            audit,
            zone,
            config,
        })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn audit_sink(&self) -> &L {
        &self.audit
    }

    pub fn config(&self) -> &DialogConfig {
        &self.config
    }

    /// Load the item and build the dialog's initial values. Writes nothing.
    pub fn open(
        &self,
        request: &DialogRequest,
        session: &Session,
    ) -> Result<DialogView, DialogError> {
        self.check_access(session)?;
        let item = self.resolve(request)?;

        let mut versions: Vec<_> = item.versions.iter().collect();
        versions.sort_by(|a, b| a.key.cmp(&b.key));

        let rows = versions
            .into_iter()
            .map(|version| VersionRow {
                key: version.key.clone(),
                date: self.display(&item.version_record(&version.key), version.archive_version_date()),
            })
            .collect::<Vec<_>>();

        tracing::debug!(
            item = %item.id,
            database = %item.database,
            versions = rows.len(),
            "archive date dialog opened"
        );

        Ok(DialogView {
            item_id: item.id,
            database: item.database.clone(),
            path: item.path.clone(),
            item_date: self.display(&item.record(), item.archive_date()),
            rows,
        })
    }

    /// Validate and apply the submitted dates.
    ///
    /// The item date is validated before anything is written; under the
    /// default configuration an unparsable item date aborts with
    /// `InvalidDateFormat` and no field is touched, while an unparsable
    /// version date clears that version.
    pub fn confirm(
        &self,
        request: &DialogRequest,
        session: &Session,
        form: &ConfirmForm,
    ) -> Result<ConfirmReport, DialogError> {
        self.check_access(session)?;
        let item = self.resolve(request)?;

        let item_change = self.plan_item(&item, &form.item_date)?;
        let (version_changes, skipped) = self.plan_versions(&item, form)?;

        let actor = session.actor();
        let item_outcome = self.apply(actor, item_change)?;

        let mut versions = Vec::with_capacity(version_changes.len());
        for (key, change) in version_changes {
            let change = self.apply(actor, change)?;
            versions.push(VersionChange { key, change });
        }

        tracing::info!(
            item = %item.id,
            database = %item.database,
            versions = versions.len(),
            skipped = skipped.len(),
            "archive dates saved"
        );

        Ok(ConfirmReport {
            item: item_outcome,
            versions,
            skipped,
        })
    }

    /// Confirm and answer the way the dialog does: close on success, alert
    /// on a date the operator has to fix. Other errors propagate.
    pub fn submit(
        &self,
        request: &DialogRequest,
        session: &Session,
        form: &ConfirmForm,
    ) -> Result<DialogResponse, DialogError> {
        match self.confirm(request, session, form) {
            Ok(report) => Ok(DialogResponse::Close(report)),
            Err(err) if err.is_user_error() => {
                let message = err.alert_message().unwrap_or_else(|| err.to_string());
                tracing::debug!(error = %err, "archive date dialog alert");
                Ok(DialogResponse::Alert(message))
            }
            Err(err) => Err(err),
        }
    }

    fn check_access(&self, session: &Session) -> Result<(), DialogError> {
        if self.access.can_access_archive_dialog(session) {
            Ok(())
        } else {
            tracing::warn!(user = session.actor(), "archive date dialog access denied");
            Err(DialogError::AccessDenied)
        }
    }

    fn resolve(&self, request: &DialogRequest) -> Result<Item, DialogError> {
        let id = request.item_id()?;
        if request.db.trim().is_empty() || !self.store.database_exists(&request.db)? {
            return Err(DialogError::InvalidRequest(format!(
                "database {:?}",
                request.db
            )));
        }
        self.store
            .get_item(&request.db, &id)?
            .ok_or_else(|| DialogError::NotFound {
                database: request.db.clone(),
                id,
            })
    }

    /// Display form of a stored value; unreadable values show blank.
    fn display(&self, record: &RecordRef, stored: &str) -> String {
        match self.zone.to_display(stored) {
            Ok(shown) => shown,
            Err(err) => {
                tracing::warn!(%record, error = %err, "stored archive date is unreadable");
                String::new()
            }
        }
    }

    fn plan_item(&self, item: &Item, value: &str) -> Result<PendingChange, DialogError> {
        let input = self
            .config
            .item_date_policy
            .apply(self.zone.parse_input(value))
            .map_err(|err| {
                tracing::warn!(item = %item.id, error = %err, "item archive date rejected");
                DialogError::InvalidDateFormat {
                    value: value.to_string(),
                    version: None,
                }
            })?;

        Ok(PendingChange {
            record: item.record(),
            revision: item.revision,
            field: ARCHIVE_DATE_FIELD,
            previous: item.archive_date().to_string(),
            input,
            subject: audit::format_item(item),
            set_action: AuditAction::SetItem,
            clear_action: AuditAction::ClearItem,
        })
    }

    fn plan_versions(
        &self,
        item: &Item,
        form: &ConfirmForm,
    ) -> Result<(Vec<(VersionKey, PendingChange)>, Vec<VersionKey>), DialogError> {
        let mut versions: Vec<_> = item.versions.iter().collect();
        versions.sort_by(|a, b| a.key.cmp(&b.key));

        let mut planned = Vec::with_capacity(versions.len());
        let mut skipped = Vec::new();

        for version in versions {
            let Some(value) = form.version_date(&version.key) else {
                tracing::debug!(item = %item.id, version = %version.key, "no input for version");
                skipped.push(version.key.clone());
                continue;
            };

            let input = self
                .config
                .version_date_policy
                .apply(self.zone.parse_input(value))
                .map_err(|err| {
                    tracing::warn!(
                        item = %item.id,
                        version = %version.key,
                        error = %err,
                        "version archive date rejected"
                    );
                    DialogError::InvalidDateFormat {
                        value: value.to_string(),
                        version: Some(version.key.clone()),
                    }
                })?;

            planned.push((
                version.key.clone(),
                PendingChange {
                    record: item.version_record(&version.key),
                    revision: version.revision,
                    field: ARCHIVE_VERSION_DATE_FIELD,
                    previous: version.archive_version_date().to_string(),
                    input,
                    subject: audit::format_version(item, &version.key),
                    set_action: AuditAction::SetVersion,
                    clear_action: AuditAction::ClearVersion,
                },
            ));
        }

        Ok((planned, skipped))
    }

    /// Audit one change, then write it under an edit context.
    ///
    /// The audit record is emitted before the edit begins, so a write that
    /// then fails (a revision conflict, say) still leaves its "Set"/"Clear"
    /// line in the audit log. The error reaches the caller unchanged.
    fn apply(&self, actor: &str, change: PendingChange) -> Result<FieldChange, DialogError> {
        let outcome = match change.input {
            DateInput::Set(at) => {
                self.audit.record(&AuditRecord {
                    actor: actor.to_string(),
                    action: change.set_action,
                    subject: change.subject.clone(),
                    value: Some(dates::audit_format(at)),
                })?;
                FieldChange::Set(dates::to_storage(at))
            }
            DateInput::Clear if !change.previous.is_empty() => {
                self.audit.record(&AuditRecord {
                    actor: actor.to_string(),
                    action: change.clear_action,
                    subject: change.subject.clone(),
                    value: None,
                })?;
                FieldChange::Cleared
            }
            DateInput::Clear => FieldChange::Unchanged,
        };

        let stored = change.input.to_storage();
        let mut edit = EditContext::begin(&self.store, change.record, change.revision)?;
        if stored != change.previous {
            edit.set(change.field, stored);
        }
        edit.commit()?;

        Ok(outcome)
    }
}
