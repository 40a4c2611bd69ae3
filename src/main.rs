mod components;
mod constants;
mod model;
mod service;
mod util;

use components::app::App;

fn main() {
    yew::Renderer::<App>::new().render();
}
