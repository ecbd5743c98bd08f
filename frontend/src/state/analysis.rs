//! Inconsistency review session.
//!
//! Holds what the analysis panels render: the uploaded workbook's sheets,
//! the column checkboxes, the last report and the per-sheet staging summary.

use std::collections::{BTreeSet, HashSet};

use super::RequestSequence;
use crate::{AnalysisReport, AnalysisUpload, AnalyzeRequest, AppError, AppResult, StageRequest};

/// Which analysis card is on screen (results and summary overlay step 2).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AnalysisStage {
    #[default]
    Upload,
    Configure,
}

/// Removal count recorded for a sheet after its decisions were staged.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct StagedSheet {
    pub sheet: String,
    pub removals: usize,
}

/// Report of the last analysis plus the rows the user ticked.
#[derive(Clone, Debug, PartialEq)]
pub struct AnalysisResults {
    sheet_title: String,
    report: AnalysisReport,
    marked: BTreeSet<u32>,
}

impl AnalysisResults {
    pub fn sheet_title(&self) -> &str {
        &self.sheet_title
    }

    pub fn report(&self) -> &AnalysisReport {
        &self.report
    }

    pub fn is_marked(&self, row_index: u32) -> bool {
        self.marked.contains(&row_index)
    }

    /// Marked rows in table order.
    fn rows_to_remove(&self) -> Vec<u32> {
        self.report
            .rows
            .iter()
            .map(|row| row.row_index)
            .filter(|row_index| self.marked.contains(row_index))
            .collect()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AnalysisSession {
    stage: AnalysisStage,
    file_name: String,
    sheets: Vec<String>,
    current_sheet: String,
    columns: Vec<String>,
    selected: HashSet<String>,
    results: Option<AnalysisResults>,
    summary: Vec<StagedSheet>,
    column_requests: RequestSequence,
}

impl AnalysisSession {
    /// Start a session from a fresh upload. The first sheet is current.
    pub fn apply_upload(&mut self, upload: AnalysisUpload) {
        *self = Self {
            stage: AnalysisStage::Configure,
            current_sheet: upload.sheets.first().cloned().unwrap_or_default(),
            file_name: upload.file_name,
            sheets: upload.sheets,
            columns: upload.columns,
            column_requests: self.column_requests,
            ..Self::default()
        };
    }

    /// Switch sheets and return the ticket for the column request.
    ///
    /// Results belong to the previous sheet, so they are dropped right away.
    pub fn begin_sheet_change(&mut self, sheet: String) -> u64 {
        self.current_sheet = sheet;
        self.results = None;
        self.column_requests.issue()
    }

    /// Install the columns fetched for `ticket`. Returns `false` and changes
    /// nothing when a newer sheet change superseded the request.
    pub fn apply_columns(&mut self, ticket: u64, columns: Vec<String>) -> bool {
        if !self.column_requests.is_current(ticket) {
            return false;
        }
        self.columns = columns;
        self.selected.clear();
        self.results = None;
        true
    }

    pub fn set_column_selected(&mut self, column: &str, selected: bool) {
        if selected {
            if self.columns.iter().any(|known| known == column) {
                self.selected.insert(column.to_string());
            }
        } else {
            self.selected.remove(column);
        }
    }

    pub fn is_column_selected(&self, column: &str) -> bool {
        self.selected.contains(column)
    }

    /// Checked columns, in the order the checkboxes are shown.
    pub fn selected_columns(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter(|column| self.selected.contains(*column))
            .cloned()
            .collect()
    }

    /// Body for `/api/analyze`, refused when no column is checked.
    pub fn analyze_request(&self) -> AppResult<AnalyzeRequest> {
        let columns = self.selected_columns();
        if columns.is_empty() {
            return Err(AppError::Validation("Select at least one column.".to_string()));
        }
        Ok(AnalyzeRequest { sheet_title: self.current_sheet.clone(), columns })
    }

    /// Show a report. Reports for a sheet that is no longer current are
    /// ignored and `false` is returned.
    pub fn apply_report(&mut self, sheet_title: String, report: AnalysisReport) -> bool {
        if sheet_title != self.current_sheet {
            return false;
        }
        self.results = Some(AnalysisResults { sheet_title, report, marked: BTreeSet::new() });
        true
    }

    pub fn set_row_marked(&mut self, row_index: u32, marked: bool) {
        if let Some(results) = self.results.as_mut() {
            if marked {
                results.marked.insert(row_index);
            } else {
                results.marked.remove(&row_index);
            }
        }
    }

    /// Body for `/api/stage_tab_changes`; `None` while no results are shown.
    pub fn staging_request(&self) -> Option<StageRequest> {
        self.results.as_ref().map(|results| StageRequest {
            sheet_title: results.sheet_title.clone(),
            rows_to_remove: results.rows_to_remove(),
        })
    }

    /// Record a successful staging: the sheet's summary count is replaced,
    /// not added to, and the results card closes.
    pub fn record_staged(&mut self, sheet: &str, removals: usize) {
        match self.summary.iter_mut().find(|entry| entry.sheet == sheet) {
            Some(entry) => entry.removals = removals,
            None => self.summary.push(StagedSheet { sheet: sheet.to_string(), removals }),
        }
        self.results = None;
    }

    pub fn stage(&self) -> AnalysisStage {
        self.stage
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn sheets(&self) -> &[String] {
        &self.sheets
    }

    pub fn current_sheet(&self) -> &str {
        &self.current_sheet
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn results(&self) -> Option<&AnalysisResults> {
        self.results.as_ref()
    }

    /// Confirm is offered whenever results are on screen, even empty ones.
    pub fn can_confirm(&self) -> bool {
        self.results.is_some()
    }

    pub fn summary(&self) -> &[StagedSheet] {
        &self.summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FlaggedRow;
    use serde_json::{json, Map};

    fn uploaded(sheets: &[&str], columns: &[&str]) -> AnalysisSession {
        let mut session = AnalysisSession::default();
        session.apply_upload(AnalysisUpload {
            file_name: "inventory.xlsx".into(),
            sheets: sheets.iter().map(|s| s.to_string()).collect(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
        });
        session
    }

    fn flagged(row_index: u32, city: &str) -> FlaggedRow {
        let mut cells = Map::new();
        cells.insert("City".into(), json!(city));
        FlaggedRow { row_index, issue: Some("Infrequent value in 'City'".into()), cells }
    }

    fn report(rows: Vec<FlaggedRow>) -> AnalysisReport {
        AnalysisReport { headers: vec!["City".into()], rows }
    }

    #[test]
    fn test_upload_selects_first_sheet() {
        let session = uploaded(&["Sheet1", "Sheet2"], &["A", "B"]);
        assert_eq!(session.stage(), AnalysisStage::Configure);
        assert_eq!(session.file_name(), "inventory.xlsx");
        assert_eq!(session.current_sheet(), "Sheet1");
        assert_eq!(session.columns(), ["A", "B"]);
        assert!(session.selected_columns().is_empty());
        assert!(session.results().is_none());
    }

    #[test]
    fn test_empty_selection_is_refused() {
        let session = uploaded(&["Sheet1"], &["A", "B"]);
        let err = session.analyze_request().unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(err.to_string(), "Select at least one column.");
    }

    #[test]
    fn test_analyze_request_keeps_column_order() {
        let mut session = uploaded(&["Sheet1"], &["A", "B", "C"]);
        session.set_column_selected("C", true);
        session.set_column_selected("A", true);
        session.set_column_selected("Unknown", true);

        let request = session.analyze_request().unwrap();
        assert_eq!(request.sheet_title, "Sheet1");
        assert_eq!(request.columns, vec!["A", "C"]);

        session.set_column_selected("A", false);
        assert_eq!(session.selected_columns(), vec!["C"]);
    }

    #[test]
    fn test_zero_flagged_rows_enables_confirm() {
        let mut session = uploaded(&["Sheet1"], &["A", "B"]);
        session.set_column_selected("A", true);
        session.set_column_selected("B", true);
        assert!(!session.can_confirm());

        let request = session.analyze_request().unwrap();
        assert_eq!(request.columns, vec!["A", "B"]);
        assert!(session.apply_report(request.sheet_title, AnalysisReport::default()));

        assert!(session.can_confirm());
        let results = session.results().unwrap();
        assert!(results.report().rows.is_empty());
        assert_eq!(
            session.staging_request(),
            Some(StageRequest { sheet_title: "Sheet1".into(), rows_to_remove: vec![] })
        );
    }

    #[test]
    fn test_sheet_change_hides_results_before_columns_arrive() {
        let mut session = uploaded(&["Sheet1", "Sheet2"], &["A"]);
        session.set_column_selected("A", true);
        session.apply_report("Sheet1".into(), report(vec![flagged(4, "Lx")]));
        assert!(session.results().is_some());

        let ticket = session.begin_sheet_change("Sheet2".into());
        assert!(session.results().is_none());
        assert!(!session.can_confirm());
        assert_eq!(session.current_sheet(), "Sheet2");

        assert!(session.apply_columns(ticket, vec!["X".into(), "Y".into()]));
        assert_eq!(session.columns(), ["X", "Y"]);
        assert!(session.selected_columns().is_empty());
    }

    #[test]
    fn test_stale_column_response_is_discarded() {
        let mut session = uploaded(&["Sheet1", "Sheet2", "Sheet3"], &["A"]);
        let first = session.begin_sheet_change("Sheet2".into());
        let second = session.begin_sheet_change("Sheet3".into());

        assert!(session.apply_columns(second, vec!["Z".into()]));
        assert!(!session.apply_columns(first, vec!["Y".into()]));
        assert_eq!(session.current_sheet(), "Sheet3");
        assert_eq!(session.columns(), ["Z"]);
    }

    #[test]
    fn test_report_for_previous_sheet_is_ignored() {
        let mut session = uploaded(&["Sheet1", "Sheet2"], &["A"]);
        session.begin_sheet_change("Sheet2".into());
        assert!(!session.apply_report("Sheet1".into(), report(vec![flagged(2, "Porto")])));
        assert!(session.results().is_none());
    }

    #[test]
    fn test_staging_collects_marked_rows_in_table_order() {
        let mut session = uploaded(&["Sheet1"], &["City"]);
        session.apply_report(
            "Sheet1".into(),
            report(vec![flagged(9, "a"), flagged(3, "b"), flagged(5, "c")]),
        );
        session.set_row_marked(5, true);
        session.set_row_marked(9, true);
        session.set_row_marked(3, true);
        session.set_row_marked(3, false);

        let results = session.results().unwrap();
        assert!(results.is_marked(9));
        assert!(!results.is_marked(3));

        let request = session.staging_request().unwrap();
        assert_eq!(request.rows_to_remove, vec![9, 5]);
    }

    #[test]
    fn test_restaging_overwrites_summary_count() {
        let mut session = uploaded(&["Sheet1", "Sheet2"], &["City"]);
        session.apply_report("Sheet1".into(), report(vec![flagged(2, "a")]));
        session.record_staged("Sheet1", 3);
        assert!(session.results().is_none());

        session.record_staged("Sheet2", 2);
        session.record_staged("Sheet1", 1);

        assert_eq!(
            session.summary(),
            [
                StagedSheet { sheet: "Sheet1".into(), removals: 1 },
                StagedSheet { sheet: "Sheet2".into(), removals: 2 },
            ]
        );
    }
}
