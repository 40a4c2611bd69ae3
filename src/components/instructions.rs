use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct InstructionsProps {
    pub on_start: Callback<()>,
}

#[function_component(Instructions)]
pub fn instructions(props: &InstructionsProps) -> Html {
    let start_cb = props.on_start.clone();
    let start_btn = Callback::from(move |_| start_cb.emit(()));
    html! {
        <div style="display:flex; align-items:center; justify-content:center; width:100vw; height:100vh; background:#0e1116;">
            <div style="background:rgba(0,0,0,0.87); border:2px solid #30363d; padding:28px 36px; border-radius:14px; max-width:520px; width:90%; box-shadow:0 0 0 1px #1a1f24, 0 6px 18px rgba(0,0,0,0.6); font-size:14px; line-height:1.4; color:#e6edf3;">
                <h2 style="margin:0 0 12px 0; font-size:22px; color:#58a6ff; text-align:center;">{"Cashier Chaos"}</h2>
                <p style="margin:4px 0 10px 0; text-align:center; opacity:0.85;">{"Count fast, hand back exact change, keep the line moving."}</p>
                <ul style="margin:0 0 12px 18px; padding:0; list-style:disc; display:flex; flex-direction:column; gap:4px;">
                    <li>{"Each customer pays for their order; give exact change from the drawer."}</li>
                    <li>{"Click denominations to build the change, then confirm the handoff."}</li>
                    <li>{"Wrong change or a too-slow handoff costs a life."}</li>
                    <li>{"Lose every life and the shift ends; serve everyone to clear the level."}</li>
                    <li>{"Later shifts are busier and less forgiving."}</li>
                </ul>
                <div style="display:flex; justify-content:center; margin-top:8px;">
                    <button onclick={start_btn}>{"Start Shift"}</button>
                </div>
            </div>
        </div>
    }
}
