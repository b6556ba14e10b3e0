//! CSV upload modal: root module wiring the Yew `Component` implementation
//! with submodules for state, update logic, view rendering, and helpers.
//!
//! Responsibilities
//! - Re-export `DataUploadModal`.
//! - Delegate to `update::update` and `view::view`.
//! - Reset the modal when it closes or its table changes, so reopening starts
//!   without a selection.

use yew::prelude::*;

mod helpers;
mod messages;
mod props;
mod state;
mod transport;
mod update;
mod view;

use messages::Msg;
use props::DataUploadProps;
pub use state::DataUploadModal;

impl Component for DataUploadModal {
    type Message = Msg;
    type Properties = DataUploadProps;

    fn create(ctx: &Context<Self>) -> Self {
        DataUploadModal::new(ctx)
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        let props = ctx.props();
        let closed = old_props.is_open && !props.is_open;
        if (closed || old_props.table_name != props.table_name) && !self.modal.is_loading() {
            self.reset(props.table_name.as_str());
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }
}
