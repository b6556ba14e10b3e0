use common::modal::ReadTicket;
use common::model::outcome::UploadOutcome;
use common::session::AuthSession;

pub enum Msg {
    FileChanged(Option<web_sys::File>),
    FileRead(ReadTicket, Result<String, String>),
    DownloadTemplate,
    Confirm,
    UploadFinished(Option<UploadOutcome>),
    Close,
    SessionChanged(AuthSession),
}
