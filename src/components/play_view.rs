use yew::prelude::*;

use crate::service::SessionHandle;
use crate::util::format_cents;

#[derive(Properties, PartialEq, Clone)]
pub struct PlayViewProps {
    pub service: SessionHandle,
}

/// Active play surface: the engine renders the shift into the surface
/// node; this component only overlays the seeded HUD values.
#[function_component(PlayView)]
pub fn play_view(props: &PlayViewProps) -> Html {
    let service = &props.service;
    let snapshot = service.play_state();
    let level_display = service.current_level() + 1;
    html! {
        <div style="position:relative; width:100vw; height:100vh; background:#0e1116;">
            <div id="engine-surface" style="position:absolute; inset:0;"></div>
            <div style="position:absolute; top:12px; left:12px; background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:8px; min-width:180px; display:flex; flex-direction:column; gap:6px; color:#e6edf3;">
                <div>{ format!("Level: {}", level_display) }</div>
                {
                    match snapshot {
                        Some(s) => html! {
                            <>
                                <div>{ format!("Lives: {}", s.remaining_lives) }</div>
                                <div>{ format!("Customer: {}", s.customer + 1) }</div>
                                <div>{ format!("Drawer: {}", format_cents(s.cash.total_cents())) }</div>
                            </>
                        },
                        None => html! {},
                    }
                }
            </div>
        </div>
    }
}
