use uuid::Uuid;
use yew::{html, AttrValue, Callback, Component, Context, Html, MouseEvent, Properties};

/// Overlay dialog. Clicking the backdrop or the close button emits `on_close`;
/// clicks inside the content do not reach the backdrop.
pub struct ModalSheet {
    pub id: String,
}

#[derive(Properties, PartialEq)]
pub struct Props {
    #[prop_or_default]
    pub children: Html,
    pub title: AttrValue,
    pub on_close: Callback<()>,
}

impl Component for ModalSheet {
    type Message = ();
    type Properties = Props;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            id: format!("id-{}", Uuid::new_v4()),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        let title_id = format!("{}-title", self.id);
        let close = props.on_close.reform(|_: MouseEvent| ());

        html! {
            <div class="modal-overlay" onclick={close.clone()}>
                <div
                    class="modal-content"
                    id={self.id.clone()}
                    role="dialog"
                    aria-labelledby={title_id.clone()}
                    onclick={Callback::from(|e: MouseEvent| e.stop_propagation())}
                >
                    <div class="modal-header">
                        <h2 id={title_id}>{ props.title.clone() }</h2>
                        <button class="close-btn" onclick={close}>{"×"}</button>
                    </div>
                    <div class="modal-body">
                        { props.children.clone() }
                    </div>
                </div>
            </div>
        }
    }
}
