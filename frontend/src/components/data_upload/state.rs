//! Component state of the upload modal.
//!
//! The upload flow itself lives in `common::modal::UploadModalState`; this
//! struct adds what only the browser needs: the session context handle and a
//! reference to the file input so it can be cleared on reset.

use common::modal::UploadModalState;
use common::session::AuthSession;
use web_sys::{File, HtmlInputElement};
use yew::context::ContextHandle;
use yew::prelude::*;

use super::messages::Msg;

pub struct DataUploadModal {
    pub modal: UploadModalState<File>,

    /// Session from the nearest `ContextProvider<AuthSession>`; anonymous when none.
    pub session: AuthSession,

    _session_handle: Option<ContextHandle<AuthSession>>,

    pub file_input_ref: NodeRef,
}

impl DataUploadModal {
    pub fn new(ctx: &Context<Self>) -> Self {
        let (session, handle) = ctx
            .link()
            .context::<AuthSession>(ctx.link().callback(Msg::SessionChanged))
            .unzip();

        Self {
            modal: UploadModalState::new(ctx.props().table_name.as_str()),
            session: session.unwrap_or_default(),
            _session_handle: handle,
            file_input_ref: NodeRef::default(),
        }
    }

    /// Drops the selection, preview and outcome, e.g. when the modal closes.
    pub fn reset(&mut self, table_name: &str) {
        self.modal = UploadModalState::new(table_name);
        if let Some(input) = self.file_input_ref.cast::<HtmlInputElement>() {
            input.set_value("");
        }
    }
}
