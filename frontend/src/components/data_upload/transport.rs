//! `UploadTransport` over the browser's fetch API.
//!
//! The selected `File` goes into a `FormData` untouched; the browser writes the
//! multipart boundary, so no content type is set here.

use common::requests::{AUTHORIZATION_HEADER, CSV_FILE_FIELD, TABLE_NAME_FIELD};
use common::upload::{TransportError, TransportResponse, UploadRequest, UploadTransport};
use gloo_net::http::Request;
use wasm_bindgen::JsValue;
use web_sys::{File, FormData};

pub struct GlooTransport;

fn js_error(value: JsValue) -> TransportError {
    TransportError(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
}

impl UploadTransport for GlooTransport {
    type File = File;

    async fn send(
        &self,
        request: UploadRequest<'_, File>,
    ) -> Result<TransportResponse, TransportError> {
        let form = FormData::new().map_err(js_error)?;
        form.append_with_str(TABLE_NAME_FIELD, request.table_name)
            .map_err(js_error)?;
        form.append_with_blob_and_filename(CSV_FILE_FIELD, request.file, &request.file.name())
            .map_err(js_error)?;

        let response = Request::post(request.endpoint)
            .header(AUTHORIZATION_HEADER, &request.authorization)
            .body(form)
            .map_err(|e| TransportError(e.to_string()))?
            .send()
            .await
            .map_err(|e| TransportError(e.to_string()))?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Ok(TransportResponse { status, body })
    }
}
