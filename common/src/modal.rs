//! State machine behind the CSV upload modal.
//!
//! The phases are derived from the state rather than stored:
//!
//! - `Idle`: no file selected.
//! - `Previewing`: a file is selected; its preview may be present or absent
//!   (read still pending, or the text could not be parsed).
//! - `Uploading`: a request is in flight, confirming is disabled.
//! - `Completed`: the outcome of the last attempt is displayed.
//!
//! File reads complete asynchronously. Every selection issues a new
//! [`ReadTicket`] and only the result carrying the latest ticket is applied,
//! so a slow read of an earlier file cannot overwrite a newer preview.

use crate::model::csv::{parse_preview, CsvPreview, ParseFailure};
use crate::model::outcome::UploadOutcome;
use crate::model::template::{get_template, Template};
use crate::session::AuthSession;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalPhase {
    Idle,
    Previewing,
    Uploading,
    Completed,
}

/// Identifies one asynchronous file read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadTicket(u64);

#[derive(Debug, Clone)]
pub struct UploadModalState<F> {
    table_name: String,
    selected_file: Option<F>,
    preview: Option<CsvPreview>,
    outcome: Option<UploadOutcome>,
    is_loading: bool,
    latest_read: u64,
}

impl<F: Clone> UploadModalState<F> {
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            selected_file: None,
            preview: None,
            outcome: None,
            is_loading: false,
            latest_read: 0,
        }
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn template(&self) -> Template {
        get_template(&self.table_name)
    }

    /// Comma separated header list shown as the required format.
    pub fn required_headers(&self) -> String {
        self.template().headers.join(", ")
    }

    pub fn selected_file(&self) -> Option<&F> {
        self.selected_file.as_ref()
    }

    pub fn preview(&self) -> Option<&CsvPreview> {
        self.preview.as_ref()
    }

    pub fn outcome(&self) -> Option<&UploadOutcome> {
        self.outcome.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn phase(&self) -> ModalPhase {
        if self.is_loading {
            ModalPhase::Uploading
        } else if self.outcome.is_some() {
            ModalPhase::Completed
        } else if self.selected_file.is_some() {
            ModalPhase::Previewing
        } else {
            ModalPhase::Idle
        }
    }

    pub fn can_confirm(&self) -> bool {
        self.selected_file.is_some() && !self.is_loading
    }

    pub fn confirm_label(&self) -> &'static str {
        if self.is_loading {
            "Uploading..."
        } else {
            "Confirm Upload"
        }
    }

    /// Replaces the selected file.
    ///
    /// The previous preview and outcome are discarded. Returns the ticket the
    /// caller must hand back to [`apply_read`](Self::apply_read) once the file
    /// text is available, or `None` when the selection was cleared.
    pub fn select_file(&mut self, file: Option<F>) -> Option<ReadTicket> {
        self.latest_read += 1;
        self.preview = None;
        self.outcome = None;
        self.selected_file = file;
        self.selected_file
            .as_ref()
            .map(|_| ReadTicket(self.latest_read))
    }

    /// Applies a completed file read. Results of superseded reads are dropped.
    ///
    /// Returns whether the state changed; on a parse failure the preview is
    /// left cleared and the failure is returned for logging.
    pub fn apply_read(
        &mut self,
        ticket: ReadTicket,
        text: Result<String, String>,
    ) -> Result<bool, ParseFailure> {
        if ticket.0 != self.latest_read || self.selected_file.is_none() {
            return Ok(false);
        }
        let parsed = text
            .map_err(ParseFailure::Unreadable)
            .and_then(|text| parse_preview(&text));
        match parsed {
            Ok(preview) => {
                self.preview = Some(preview);
                Ok(true)
            }
            Err(failure) => {
                self.preview = None;
                Err(failure)
            }
        }
    }

    /// Moves to `Uploading` and hands back the file to send.
    ///
    /// Refuses (returns `None`, state untouched) without a file, without a
    /// token, or while another upload of this modal is in flight.
    pub fn begin_upload(&mut self, session: &AuthSession) -> Option<F> {
        if self.is_loading || !session.is_authenticated() {
            return None;
        }
        let file = self.selected_file.clone()?;
        self.is_loading = true;
        self.outcome = None;
        Some(file)
    }

    /// Settles the in-flight upload. Loading always ends here.
    pub fn finish_upload(&mut self, outcome: Option<UploadOutcome>) {
        self.is_loading = false;
        self.outcome = outcome;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::outcome::OutcomeKind;
    use crate::upload::testing::SpyTransport;
    use crate::upload::UploadClient;

    const SIX_LINE_CSV: &str = "rollno,name,program,yearofadmission,batch,branch,department,pwd,state,category,gender,status\n\
        1,A,BTech,2023,Jan,CSE,Computer Science,FALSE,Kerala,Gen,Male,Ongoing\n\
        2,B,BTech,2023,Jan,CSE,Computer Science,FALSE,Kerala,Gen,Male,Ongoing\n\
        3,C,BTech,2023,Jan,CSE,Computer Science,FALSE,Kerala,Gen,Male,Ongoing\n\
        4,D,BTech,2023,Jan,CSE,Computer Science,FALSE,Kerala,Gen,Male,Ongoing\n\
        5,E,BTech,2023,Jan,CSE,Computer Science,FALSE,Kerala,Gen,Male,Ongoing\n";

    fn signed_in() -> AuthSession {
        AuthSession::from_token(Some("t".to_string()))
    }

    #[test]
    fn starts_idle() {
        let state: UploadModalState<String> = UploadModalState::new("student");
        assert_eq!(state.phase(), ModalPhase::Idle);
        assert!(!state.can_confirm());
        assert_eq!(state.confirm_label(), "Confirm Upload");
        assert!(state.required_headers().starts_with("rollno, name, program"));
    }

    #[test]
    fn stale_reads_are_ignored() {
        let mut state = UploadModalState::new("student");
        let first = state.select_file(Some("first.csv".to_string())).unwrap();
        let second = state.select_file(Some("second.csv".to_string())).unwrap();

        assert_eq!(state.apply_read(second, Ok("b\n2".to_string())), Ok(true));
        assert_eq!(state.apply_read(first, Ok("a\n1".to_string())), Ok(false));
        assert_eq!(state.preview().unwrap().header, vec!["b"]);
    }

    #[test]
    fn parse_failure_clears_the_preview() {
        let mut state = UploadModalState::new("student");
        let ticket = state.select_file(Some("f.csv".to_string())).unwrap();
        state.apply_read(ticket, Ok("a\n1".to_string())).unwrap();

        let ticket = state.select_file(Some("g.csv".to_string())).unwrap();
        assert_eq!(
            state.apply_read(ticket, Ok("   ".to_string())),
            Err(ParseFailure::Empty)
        );
        assert!(state.preview().is_none());
        assert_eq!(state.phase(), ModalPhase::Previewing);
        assert!(state.can_confirm());
    }

    #[test]
    fn clearing_the_selection_returns_to_idle() {
        let mut state = UploadModalState::new("student");
        state.select_file(Some("f.csv".to_string()));
        assert_eq!(state.select_file(None), None);
        assert_eq!(state.phase(), ModalPhase::Idle);
    }

    #[test]
    fn begin_upload_requires_file_and_token() {
        let mut state: UploadModalState<String> = UploadModalState::new("student");
        assert_eq!(state.begin_upload(&signed_in()), None);

        state.select_file(Some("f.csv".to_string()));
        assert_eq!(state.begin_upload(&AuthSession::new()), None);
        assert!(!state.is_loading());

        assert_eq!(state.begin_upload(&signed_in()), Some("f.csv".to_string()));
        assert_eq!(state.phase(), ModalPhase::Uploading);
        assert!(!state.can_confirm());
        assert_eq!(state.confirm_label(), "Uploading...");
        assert_eq!(state.begin_upload(&signed_in()), None);
    }

    #[test]
    fn new_selection_clears_previous_outcome() {
        let mut state = UploadModalState::new("student");
        state.select_file(Some("f.csv".to_string()));
        state.begin_upload(&signed_in());
        state.finish_upload(Some(UploadOutcome::error("Bad row")));
        assert_eq!(state.phase(), ModalPhase::Completed);

        state.select_file(Some("g.csv".to_string()));
        assert!(state.outcome().is_none());
        assert_eq!(state.phase(), ModalPhase::Previewing);
    }

    #[tokio::test]
    async fn student_upload_end_to_end() {
        let session = signed_in();
        let client = UploadClient::new(SpyTransport::replying(200, "{}"));
        let mut state = UploadModalState::new("student");

        let ticket = state.select_file(Some(SIX_LINE_CSV.to_string())).unwrap();
        state
            .apply_read(ticket, Ok(SIX_LINE_CSV.to_string()))
            .unwrap();
        assert_eq!(state.preview().unwrap().rows.len(), 5);
        assert_eq!(state.preview().unwrap().header.len(), 12);

        let file = state.begin_upload(&session).unwrap();
        let outcome = client
            .upload(Some(&file), state.table_name(), &session)
            .await;
        state.finish_upload(outcome);

        let requests = client.transport().requests.borrow();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].endpoint, "/api/upload-csv");
        assert_eq!(requests[0].table_name, "student");
        assert_eq!(requests[0].file, SIX_LINE_CSV);

        let outcome = state.outcome().unwrap();
        assert_eq!(outcome.kind, OutcomeKind::Success);
        assert_eq!(outcome.text, "Upload successful!");
        assert!(state.can_confirm());
        assert_eq!(state.confirm_label(), "Confirm Upload");
    }
}
