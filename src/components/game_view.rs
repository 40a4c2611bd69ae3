use std::cell::RefCell;
use std::rc::Rc;

use gloo::dialogs::alert;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::app::RemountContext;
use super::center_loading::CenterLoading;
use super::complete_overlay::CompleteOverlay;
use super::instructions::Instructions;
use super::play_view::PlayView;
use crate::model::{
    CashDrawer, LifecycleAction, LifecycleState, Phase, PlaySnapshot, SessionOutcome,
};
use crate::service::{SessionEndDirective, SessionHandle, handle_session_end};
use crate::util::{cerror, clog};

#[derive(Properties, PartialEq, Clone)]
pub struct GameViewProps {
    pub service: SessionHandle,
    pub instructions_seen: Rc<RefCell<bool>>,
}

/// Session lifecycle controller: sequences preload -> start/init/listen ->
/// ready, interprets the end-of-session signal, and picks which surface is
/// visible.
#[function_component(GameView)]
pub fn game_view(props: &GameViewProps) -> Html {
    let lifecycle = use_reducer({
        let seen = *props.instructions_seen.borrow();
        move || LifecycleState::fresh(!seen)
    });
    let remount = use_context::<RemountContext>().expect("RemountContext not provided");

    {
        let service = props.service.clone();
        let lifecycle = lifecycle.clone();
        let remount = remount.clone();
        use_effect_with((), move |_| {
            let teardown = service.clone();
            spawn_local(async move {
                match service.preload_assets().await {
                    Ok(()) => {
                        service.start_session();
                        service.init_state(PlaySnapshot {
                            cash: CashDrawer::empty(),
                            customer: 0,
                            remaining_lives: service.current_level_details().lives,
                        });
                        // The one listener for this handle; registered
                        // before the phase is marked ready.
                        service.set_session_end_listener({
                            let service = service.clone();
                            let lifecycle = lifecycle.clone();
                            let remount = remount.clone();
                            Callback::from(move |outcome: SessionOutcome| {
                                match handle_session_end(&service, outcome) {
                                    SessionEndDirective::GameComplete => {
                                        lifecycle.dispatch(LifecycleAction::SessionComplete);
                                    }
                                    SessionEndDirective::AdvanceLevel { next } => {
                                        alert(&format!(
                                            "Level {} Complete! Moving to next level...",
                                            next + 1
                                        ));
                                        remount.refresh.emit(());
                                    }
                                    SessionEndDirective::RetryLevel { reason } => {
                                        alert(&format!("Game Over: {reason}"));
                                        remount.refresh.emit(());
                                    }
                                }
                            })
                        });
                        clog(&format!(
                            "session started at level {}",
                            service.current_level() + 1
                        ));
                        lifecycle.dispatch(LifecycleAction::AssetsReady);
                    }
                    Err(err) => {
                        // Fail fast: no retry, no fallback assets. The page
                        // has to be reloaded externally.
                        cerror(&format!("asset loading error: {err}"));
                        alert("Failed to load game assets. Please refresh the page.");
                        lifecycle.dispatch(LifecycleAction::AssetsFailed);
                    }
                }
            });
            // Always reset on exit, whichever phase teardown happens in.
            move || teardown.reset_session()
        });
    }

    let on_start = {
        let lifecycle = lifecycle.clone();
        let seen = props.instructions_seen.clone();
        Callback::from(move |_| {
            *seen.borrow_mut() = true;
            lifecycle.dispatch(LifecycleAction::DismissInstructions);
        })
    };

    let on_play_again = {
        let lifecycle = lifecycle.clone();
        let seen = props.instructions_seen.clone();
        let service = props.service.clone();
        let remount = remount.clone();
        Callback::from(move |_| {
            lifecycle.dispatch(LifecycleAction::PlayAgain);
            *seen.borrow_mut() = false;
            service.reset_progress();
            remount.refresh.emit(());
        })
    };

    match lifecycle.phase() {
        Phase::ShowingInstructions => html! { <Instructions {on_start} /> },
        Phase::LoadingAssets => html! { <CenterLoading failed={lifecycle.load_failed} /> },
        Phase::GameComplete => html! { <CompleteOverlay {on_play_again} /> },
        Phase::Playing => html! { <PlayView service={props.service.clone()} /> },
    }
}
