//! View rendering for the upload modal.
//!
//! Layout, top to bottom: warning box with the template download, the required
//! header list, the file picker, the preview table (first five rows), the
//! outcome message and the Cancel / Confirm buttons.

use common::modal::ModalPhase;
use common::model::csv::CsvPreview;
use common::model::outcome::OutcomeKind;
use web_sys::HtmlInputElement;
use yew::html::Scope;
use yew::prelude::*;

use super::messages::Msg;
use super::state::DataUploadModal;
use crate::components::modal_sheet::ModalSheet;

pub fn view(component: &DataUploadModal, ctx: &Context<DataUploadModal>) -> Html {
    if !ctx.props().is_open {
        return html! {};
    }
    let link = ctx.link();
    let modal = &component.modal;

    html! {
        <ModalSheet
            title={format!("Upload Data: {}", modal.table_name())}
            on_close={link.callback(|_| Msg::Close)}
        >
            { build_warning_box(link) }
            <div class="required-format-section">
                <strong>{"Required Column Headers:"}</strong>
                <div class="required-headers">{ modal.required_headers() }</div>
            </div>
            { build_file_input(component, link) }
            { build_preview(modal.preview()) }
            { build_status(component) }
            <div class="upload-actions">
                <button
                    class="cancel-btn"
                    disabled={modal.is_loading()}
                    onclick={link.callback(|_| Msg::Close)}
                >
                    {"Cancel"}
                </button>
                <button
                    class="upload-btn"
                    disabled={!modal.can_confirm()}
                    onclick={link.callback(|_| Msg::Confirm)}
                >
                    { modal.confirm_label() }
                </button>
            </div>
        </ModalSheet>
    }
}

fn build_warning_box(link: &Scope<DataUploadModal>) -> Html {
    html! {
        <div class="warning-box">
            <span class="warning-icon">{"⚠️"}</span>
            <div>
                <strong>{"Warning:"}</strong>
                {" You are directly modifying the database. Ensure the CSV format matches the table schema exactly."}
                <div class="download-template-row">
                    <button
                        class="download-template-btn"
                        onclick={link.callback(|_| Msg::DownloadTemplate)}
                    >
                        {"Download CSV Template"}
                    </button>
                </div>
            </div>
        </div>
    }
}

fn build_file_input(component: &DataUploadModal, link: &Scope<DataUploadModal>) -> Html {
    let onchange = link.callback(|e: Event| {
        let input: HtmlInputElement = e.target_unchecked_into();
        Msg::FileChanged(input.files().and_then(|files| files.get(0)))
    });

    html! {
        <div class="file-input-container">
            <input
                type="file"
                accept=".csv"
                ref={component.file_input_ref.clone()}
                disabled={component.modal.is_loading()}
                {onchange}
            />
        </div>
    }
}

fn build_preview(preview: Option<&CsvPreview>) -> Html {
    let Some(preview) = preview else {
        return html! {};
    };

    html! {
        <div class="preview-section">
            <h4>{"CSV Preview (First 5 Rows)"}</h4>
            <table class="preview-table">
                <thead>
                    <tr>
                        { for preview.header.iter().map(|head| html! { <th>{ head.clone() }</th> }) }
                    </tr>
                </thead>
                <tbody>
                    { for preview.rows.iter().map(|row| html! {
                        <tr>
                            { for row.iter().map(|cell| html! { <td>{ cell.clone() }</td> }) }
                        </tr>
                    }) }
                </tbody>
            </table>
        </div>
    }
}

fn build_status(component: &DataUploadModal) -> Html {
    let modal = &component.modal;
    match (modal.phase(), modal.outcome()) {
        (ModalPhase::Uploading, _) => html! {
            <div class="status-message pending">{"Uploading file..."}</div>
        },
        (ModalPhase::Completed, Some(outcome)) => {
            let kind = match outcome.kind {
                OutcomeKind::Success => "success",
                OutcomeKind::Error => "error",
            };
            html! {
                <div class={classes!("status-message", kind)}>{ outcome.text.clone() }</div>
            }
        }
        _ => html! {},
    }
}
