pub mod styles;
pub mod hooks;
pub mod components;
pub mod pages;
pub mod config;
pub mod storage;
pub mod gate_client;

use shared::WheelVariant;
use yew::prelude::*;
use yew_router::prelude::*;
use crate::pages::wheel::PrizeWheel;

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
   #[at("/")] Home,
   #[at("/cadastro")] LeadGated,
   #[not_found]
   #[at("/404")] NotFound,
}

#[function_component(App)]
pub fn app() -> Html {
    html! {
        <BrowserRouter>
            <div class="min-h-screen w-full">
                <div class="mx-auto">
                    <Switch<Route> render={switch} />
                </div>
            </div>
        </BrowserRouter>
    }
}

pub fn switch(route: Route) -> Html {
   match route {
       Route::Home => html! { <PrizeWheel key="standalone" variant={WheelVariant::Standalone} /> },
       Route::LeadGated => html! { <PrizeWheel key="lead-gated" variant={WheelVariant::LeadGated} /> },
       Route::NotFound => html! { <Redirect<Route> to={Route::Home} /> },
   }
}
