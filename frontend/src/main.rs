use crate::app::App;

mod app;
mod components;
mod session;

fn main() {
    yew::Renderer::<App>::new().render();
}
