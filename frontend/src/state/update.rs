//! Multi-sheet update session.
//!
//! Tracks the two uploaded workbooks, the selected sheet pair, the key
//! column choices for that pair and the queue of merge instructions sent
//! as one batch at the end.

use super::RequestSequence;
use crate::{AppError, AppResult, CommonColumnsRequest, MergeInstruction, MultiTabUpdateRequest};

/// Which update card is on screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UpdateStage {
    #[default]
    BaseUpload,
    UpdateUpload,
    Configure,
}

/// State of the key column selector.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum KeyColumns {
    /// Request in flight, selector disabled
    #[default]
    Loading,
    /// The sheets share no column
    NoneInCommon,
    /// The request failed
    Unavailable,
    Ready { columns: Vec<String>, selected: String },
}

impl KeyColumns {
    /// Whether the selector accepts input.
    pub fn is_enabled(&self) -> bool {
        matches!(self, KeyColumns::Ready { .. })
    }

    /// Selected key, only when the selector is enabled and non-empty.
    pub fn selected(&self) -> Option<&str> {
        match self {
            KeyColumns::Ready { columns, selected }
                if !selected.is_empty() && columns.contains(selected) =>
            {
                Some(selected.as_str())
            }
            _ => None,
        }
    }

    /// Text of the disabled placeholder option, if one is shown.
    pub fn placeholder(&self) -> Option<&'static str> {
        match self {
            KeyColumns::Loading => Some("Looking for common columns..."),
            KeyColumns::NoneInCommon => Some("No columns in common"),
            KeyColumns::Unavailable => Some("Columns unavailable"),
            KeyColumns::Ready { .. } => None,
        }
    }
}

/// Ordered merge instructions built by the user.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MergeQueue {
    instructions: Vec<MergeInstruction>,
}

impl MergeQueue {
    pub fn push(&mut self, instruction: MergeInstruction) {
        self.instructions.push(instruction);
    }

    /// Remove the entry at `index`; out-of-range indices change nothing.
    pub fn remove(&mut self, index: usize) -> Option<MergeInstruction> {
        (index < self.instructions.len()).then(|| self.instructions.remove(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = &MergeInstruction> {
        self.instructions.iter()
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct UpdateSession {
    stage: UpdateStage,
    base_sheets: Vec<String>,
    update_sheets: Vec<String>,
    base_sheet: String,
    update_sheet: String,
    key_columns: KeyColumns,
    queue: MergeQueue,
    column_requests: RequestSequence,
}

impl UpdateSession {
    pub fn apply_base_upload(&mut self, sheets: Vec<String>) {
        self.base_sheet = sheets.first().cloned().unwrap_or_default();
        self.base_sheets = sheets;
        self.stage = UpdateStage::UpdateUpload;
    }

    pub fn apply_update_upload(&mut self, sheets: Vec<String>) {
        self.update_sheet = sheets.first().cloned().unwrap_or_default();
        self.update_sheets = sheets;
        self.stage = UpdateStage::Configure;
    }

    pub fn select_base_sheet(&mut self, sheet: String) {
        self.base_sheet = sheet;
    }

    pub fn select_update_sheet(&mut self, sheet: String) {
        self.update_sheet = sheet;
    }

    /// Disable the key selector and return the ticket and body for a
    /// common-columns request on the current pair.
    pub fn begin_common_columns(&mut self) -> (u64, CommonColumnsRequest) {
        self.key_columns = KeyColumns::Loading;
        let request = CommonColumnsRequest {
            base_sheet: self.base_sheet.clone(),
            update_sheet: self.update_sheet.clone(),
        };
        (self.column_requests.issue(), request)
    }

    /// Install the common columns for `ticket`; the first one is selected.
    /// Returns `false` for a superseded request.
    pub fn apply_common_columns(&mut self, ticket: u64, columns: Vec<String>) -> bool {
        if !self.column_requests.is_current(ticket) {
            return false;
        }
        self.key_columns = match columns.first().cloned() {
            None => KeyColumns::NoneInCommon,
            Some(selected) => KeyColumns::Ready { columns, selected },
        };
        true
    }

    /// Leave the selector disabled after a failed request.
    pub fn fail_common_columns(&mut self, ticket: u64) {
        if self.column_requests.is_current(ticket) {
            self.key_columns = KeyColumns::Unavailable;
        }
    }

    pub fn select_key_column(&mut self, column: String) {
        if let KeyColumns::Ready { selected, .. } = &mut self.key_columns {
            *selected = column;
        }
    }

    /// Queue the current sheet pair and key column.
    ///
    /// Refused, leaving the queue untouched, while the key selector is
    /// disabled or has no value.
    pub fn enqueue(&mut self) -> AppResult<MergeInstruction> {
        let key_column = self
            .key_columns
            .selected()
            .ok_or_else(|| AppError::Validation("Select a valid key column.".to_string()))?
            .to_string();
        let instruction = MergeInstruction {
            base_tab: self.base_sheet.clone(),
            update_tab: self.update_sheet.clone(),
            key_column,
        };
        self.queue.push(instruction.clone());
        Ok(instruction)
    }

    pub fn remove_instruction(&mut self, index: usize) -> Option<MergeInstruction> {
        self.queue.remove(index)
    }

    /// "Process all" is offered only for a non-empty queue.
    pub fn can_process(&self) -> bool {
        !self.queue.is_empty()
    }

    pub fn batch_request(&self) -> Option<MultiTabUpdateRequest> {
        self.can_process().then(|| MultiTabUpdateRequest {
            instructions: self.queue.iter().cloned().collect(),
        })
    }

    pub fn stage(&self) -> UpdateStage {
        self.stage
    }

    pub fn base_sheets(&self) -> &[String] {
        &self.base_sheets
    }

    pub fn update_sheets(&self) -> &[String] {
        &self.update_sheets
    }

    pub fn base_sheet(&self) -> &str {
        &self.base_sheet
    }

    pub fn update_sheet(&self) -> &str {
        &self.update_sheet
    }

    pub fn key_columns(&self) -> &KeyColumns {
        &self.key_columns
    }

    pub fn queue(&self) -> &MergeQueue {
        &self.queue
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|item| item.to_string()).collect()
    }

    fn configured() -> UpdateSession {
        let mut session = UpdateSession::default();
        session.apply_base_upload(names(&["Clients", "Orders"]));
        session.apply_update_upload(names(&["Clients new", "Orders new"]));
        session
    }

    fn ready(session: &mut UpdateSession, columns: &[&str]) {
        let (ticket, _) = session.begin_common_columns();
        assert!(session.apply_common_columns(ticket, names(columns)));
    }

    fn instruction(base: &str, update: &str, key: &str) -> MergeInstruction {
        MergeInstruction { base_tab: base.into(), update_tab: update.into(), key_column: key.into() }
    }

    #[test]
    fn test_uploads_advance_stages() {
        let mut session = UpdateSession::default();
        assert_eq!(session.stage(), UpdateStage::BaseUpload);

        session.apply_base_upload(names(&["Clients", "Orders"]));
        assert_eq!(session.stage(), UpdateStage::UpdateUpload);
        assert_eq!(session.base_sheet(), "Clients");

        session.apply_update_upload(names(&["Clients new"]));
        assert_eq!(session.stage(), UpdateStage::Configure);
        assert_eq!(session.update_sheet(), "Clients new");
        assert_eq!(session.update_sheets(), ["Clients new"]);
    }

    #[test]
    fn test_common_columns_request_uses_current_pair() {
        let mut session = configured();
        session.select_base_sheet("Orders".into());
        session.select_update_sheet("Orders new".into());

        let (_, request) = session.begin_common_columns();
        assert_eq!(
            request,
            CommonColumnsRequest { base_sheet: "Orders".into(), update_sheet: "Orders new".into() }
        );
        assert!(!session.key_columns().is_enabled());
    }

    #[test]
    fn test_no_common_columns_keeps_selector_disabled() {
        let mut session = configured();
        ready(&mut session, &[]);
        assert_eq!(session.key_columns(), &KeyColumns::NoneInCommon);
        assert_eq!(session.key_columns().placeholder(), Some("No columns in common"));
        assert!(!session.key_columns().is_enabled());
    }

    #[test]
    fn test_stale_common_columns_are_discarded() {
        let mut session = configured();
        let (first, _) = session.begin_common_columns();
        let (second, _) = session.begin_common_columns();

        assert!(session.apply_common_columns(second, names(&["ID"])));
        assert!(!session.apply_common_columns(first, names(&["Name"])));
        session.fail_common_columns(first);

        assert_eq!(session.key_columns().selected(), Some("ID"));
    }

    #[test]
    fn test_failed_lookup_disables_selector() {
        let mut session = configured();
        let (ticket, _) = session.begin_common_columns();
        session.fail_common_columns(ticket);
        assert_eq!(session.key_columns(), &KeyColumns::Unavailable);
    }

    #[test]
    fn test_enqueue_rejected_without_valid_key() {
        let mut session = configured();

        // Selector disabled while the lookup is pending.
        session.begin_common_columns();
        assert!(matches!(session.enqueue(), Err(AppError::Validation(_))));
        assert!(session.queue().is_empty());

        // Selector disabled because nothing is shared.
        ready(&mut session, &[]);
        assert!(session.enqueue().is_err());

        // Enabled but empty value.
        ready(&mut session, &["ID", "Name"]);
        session.select_key_column(String::new());
        let err = session.enqueue().unwrap_err();
        assert_eq!(err.to_string(), "Select a valid key column.");
        assert_eq!(session.queue().len(), 0);
        assert!(!session.can_process());
    }

    #[test]
    fn test_enqueue_appends_instruction() {
        let mut session = configured();
        ready(&mut session, &["ID", "Name"]);
        session.select_key_column("Name".into());

        let queued = session.enqueue().unwrap();
        assert_eq!(queued, instruction("Clients", "Clients new", "Name"));
        assert!(session.can_process());
        assert_eq!(
            session.batch_request(),
            Some(MultiTabUpdateRequest { instructions: vec![queued] })
        );
    }

    #[test]
    fn test_remove_keeps_relative_order() {
        let mut session = configured();
        ready(&mut session, &["ID"]);
        session.enqueue().unwrap();
        session.select_base_sheet("Orders".into());
        session.select_update_sheet("Orders new".into());
        ready(&mut session, &["Ref"]);
        session.enqueue().unwrap();
        session.select_base_sheet("Clients".into());
        ready(&mut session, &["Ref"]);
        session.enqueue().unwrap();

        let removed = session.remove_instruction(1);
        assert_eq!(removed, Some(instruction("Orders", "Orders new", "Ref")));

        let remaining: Vec<_> = session.queue().iter().cloned().collect();
        assert_eq!(
            remaining,
            vec![instruction("Clients", "Clients new", "ID"), instruction("Clients", "Orders new", "Ref")]
        );
        assert_eq!(session.remove_instruction(5), None);
        assert_eq!(session.queue().len(), 2);
    }

    #[test]
    fn test_process_enabled_iff_queue_non_empty() {
        let mut session = configured();
        assert!(!session.can_process());
        assert_eq!(session.batch_request(), None);

        ready(&mut session, &["ID"]);
        session.enqueue().unwrap();
        assert!(session.can_process());

        session.remove_instruction(0);
        assert!(!session.can_process());
        assert_eq!(session.batch_request(), None);
    }
}
