use std::cell::RefCell;
use std::rc::Rc;

use yew::prelude::*;

use super::game_view::GameView;
use crate::constants::{ASSETS, LEVELS};
use crate::service::{GameService, SessionHandle};

// Remount coordinator context (so any descendant can request a full
// subtree restart without prop drilling).
#[derive(Clone, PartialEq)]
pub struct RemountContext {
    pub refresh: Callback<()>,
}

/// App shell. Bumping the epoch swaps the key on the game subtree, which
/// unmounts and recreates it from scratch (fresh `GameService` included),
/// as if the page had just been entered. The instructions-seen flag lives
/// up here, above the remount boundary, so it survives level-advance
/// restarts.
#[function_component(App)]
pub fn app() -> Html {
    let epoch = use_state(|| 0u32);
    let instructions_seen = use_mut_ref(|| false);

    let refresh = {
        let epoch = epoch.clone();
        Callback::from(move |_| epoch.set(*epoch + 1))
    };
    let remount = RemountContext { refresh };

    html! {
        <ContextProvider<RemountContext> context={remount}>
            <GameRoot key={*epoch} instructions_seen={instructions_seen} />
        </ContextProvider<RemountContext>>
    }
}

#[derive(Properties, PartialEq, Clone)]
struct GameRootProps {
    pub instructions_seen: Rc<RefCell<bool>>,
}

// A new session handle is built on every mount of this component, so each
// remount cycle owns exactly one.
#[function_component(GameRoot)]
fn game_root(props: &GameRootProps) -> Html {
    let service = use_memo((), |_| SessionHandle::new(GameService::new(&LEVELS, &ASSETS)));
    html! {
        <GameView
            service={(*service).clone()}
            instructions_seen={props.instructions_seen.clone()}
        />
    }
}
