//! Update function for the upload modal.
//!
//! State transitions are delegated to `UploadModalState`; this module only
//! starts the asynchronous work (file reads, the upload request) and feeds
//! their results back as messages.

use common::upload::UploadClient;
use gloo_file::futures::read_as_text;
use yew::platform::spawn_local;
use yew::prelude::*;

use super::helpers::{download_template, show_toast};
use super::messages::Msg;
use super::state::DataUploadModal;
use super::transport::GlooTransport;

pub fn update(component: &mut DataUploadModal, ctx: &Context<DataUploadModal>, msg: Msg) -> bool {
    match msg {
        Msg::SessionChanged(session) => {
            component.session = session;
            true
        }
        Msg::FileChanged(file) => {
            if component.modal.is_loading() {
                return false;
            }
            if let Some(ticket) = component.modal.select_file(file.clone()) {
                if let Some(file) = file {
                    let link = ctx.link().clone();
                    spawn_local(async move {
                        let file = gloo_file::File::from(file);
                        let text = read_as_text(&file).await.map_err(|e| e.to_string());
                        link.send_message(Msg::FileRead(ticket, text));
                    });
                }
            }
            true
        }
        Msg::FileRead(ticket, text) => match component.modal.apply_read(ticket, text) {
            Ok(changed) => changed,
            Err(failure) => {
                gloo_console::error!(format!("Failed to parse CSV preview: {}", failure));
                true
            }
        },
        Msg::DownloadTemplate => {
            if let Err(err) = download_template(component.modal.table_name()) {
                gloo_console::error!("Template download failed:", err);
            }
            false
        }
        Msg::Confirm => {
            let Some(file) = component.modal.begin_upload(&component.session) else {
                return false;
            };
            let session = component.session.clone();
            let table_name = component.modal.table_name().to_string();
            let link = ctx.link().clone();
            spawn_local(async move {
                let client = UploadClient::new(GlooTransport);
                let outcome = client.upload(Some(&file), &table_name, &session).await;
                link.send_message(Msg::UploadFinished(outcome));
            });
            true
        }
        Msg::UploadFinished(outcome) => {
            if let Some(outcome) = outcome.as_ref().filter(|o| o.is_success()) {
                show_toast(&outcome.text);
            }
            component.modal.finish_upload(outcome);
            true
        }
        Msg::Close => {
            if !component.modal.is_loading() {
                ctx.props().on_close.emit(());
            }
            false
        }
    }
}
