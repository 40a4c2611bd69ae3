use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct CenterLoadingProps {
    /// Preload failed; this screen is terminal until the page is reloaded.
    #[prop_or_default]
    pub failed: bool,
}

#[function_component(CenterLoading)]
pub fn center_loading(props: &CenterLoadingProps) -> Html {
    let (message, color) = if props.failed {
        ("Failed to load game assets. Please refresh the page.", "#f85149")
    } else {
        ("Loading assets...", "#e6edf3")
    };
    html! {
        <div style="display:flex; align-items:center; justify-content:center; width:100vw; height:100vh; background:#0e1116;">
            <div style={format!("font-size:18px; color:{color};")}>{ message }</div>
        </div>
    }
}
