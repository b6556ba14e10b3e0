//! Properties of the `DataUploadModal`.
//!
//! The bearer token is not a property: the modal reads the `AuthSession`
//! provided as a context by the dashboard shell.

use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct DataUploadProps {
    /// When `false` nothing is rendered.
    pub is_open: bool,

    /// Emitted by the Cancel button, the close button and the backdrop.
    /// Ignored while an upload is in flight.
    pub on_close: Callback<()>,

    /// Upload target sent as the `table_name` form field. Names outside the
    /// template catalog are still accepted; they just have no template.
    pub table_name: AttrValue,
}
