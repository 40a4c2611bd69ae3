use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct CompleteOverlayProps {
    pub on_play_again: Callback<()>,
}

#[function_component(CompleteOverlay)]
pub fn complete_overlay(props: &CompleteOverlayProps) -> Html {
    let play_again_cb = props.on_play_again.clone();
    let play_again_btn = Callback::from(move |_| play_again_cb.emit(()));
    html! {
        <div style="display:flex; flex-direction:column; align-items:center; justify-content:center; width:100vw; height:100vh; background:linear-gradient(#a78bfa, #4c1d95); color:#ffffff;">
            <h1 style="margin:0 0 16px 0; font-size:56px;">{"🎉 Congratulations! 🎉"}</h1>
            <p style="margin:0 0 8px 0; font-size:28px;">{"You cleared every shift!"}</p>
            <p style="margin:0; font-size:20px;">{"You're a master cashier! 💰"}</p>
            <button
                onclick={play_again_btn}
                style="margin-top:32px; padding:16px 32px; font-size:20px; font-weight:600; color:#ffffff; background:#2ea043; border:none; border-radius:12px; cursor:pointer;"
            >
                {"Play Again"}
            </button>
        </div>
    }
}
