use crate::components::data_upload::DataUploadModal;
use crate::session::load_session;
use common::model::table::TableId;
use common::session::AuthSession;
use web_sys::HtmlSelectElement;
use yew::prelude::*;

pub enum Msg {
    SelectTable(TableId),
    OpenUpload,
    CloseUpload,
}

/// Dashboard shell: picks an upload target and hosts the upload modal.
pub struct App {
    session: AuthSession,
    table: TableId,
    upload_open: bool,
}

impl Component for App {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            session: load_session(),
            table: TableId::Student,
            upload_open: false,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::SelectTable(table) => {
                self.table = table;
                true
            }
            Msg::OpenUpload => {
                self.upload_open = true;
                true
            }
            Msg::CloseUpload => {
                self.upload_open = false;
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let on_select = link.batch_callback(|e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            select.value().parse::<TableId>().ok().map(Msg::SelectTable)
        });
        let current = self.table;

        html! {
            <ContextProvider<AuthSession> context={self.session.clone()}>
                <div class="dashboard-root">
                    <header class="dashboard-header">
                        <h1>{"University Dashboard"}</h1>
                        if !self.session.is_authenticated() {
                            <span class="session-hint">{"Sign in to upload data."}</span>
                        }
                    </header>
                    <section class="upload-panel">
                        <label for="table-select">{"Table"}</label>
                        <select id="table-select" onchange={on_select}>
                            { for TableId::ALL.iter().map(|table| html! {
                                <option value={table.as_str()} selected={*table == current}>
                                    { table.as_str() }
                                </option>
                            }) }
                        </select>
                        <button
                            class="upload-data-btn"
                            disabled={!self.session.is_authenticated()}
                            onclick={link.callback(|_| Msg::OpenUpload)}
                        >
                            {"Upload data"}
                        </button>
                    </section>
                    <DataUploadModal
                        is_open={self.upload_open}
                        on_close={link.callback(|_| Msg::CloseUpload)}
                        table_name={AttrValue::from(self.table.as_str())}
                    />
                </div>
            </ContextProvider<AuthSession>>
        }
    }
}
