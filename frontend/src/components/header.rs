use yew::prelude::*;

use crate::services::auth::Identity;
use crate::Page;

#[derive(Properties, PartialEq)]
pub struct HeaderProps {
    pub page: Page,
    pub identity: Option<Identity>,
    pub on_navigate: Callback<Page>,
    pub on_sign_out: Callback<()>,
}

#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    let nav_button = |target: Page, label: &'static str| {
        let on_navigate = props.on_navigate.clone();
        let class = classes!("nav-link", (props.page == target).then_some("active"));
        html! {
            <button {class} onclick={Callback::from(move |_: MouseEvent| on_navigate.emit(target))}>
                {label}
            </button>
        }
    };

    let on_sign_out = {
        let on_sign_out = props.on_sign_out.clone();
        Callback::from(move |_: MouseEvent| on_sign_out.emit(()))
    };

    html! {
        <header class="header">
            <div class="container">
                <h1>{"Volleyball Club Attendance"}</h1>
                {match &props.identity {
                    Some(identity) => html! {
                        <div class="header-right">
                            <nav class="header-nav">
                                {nav_button(Page::CheckIn, "Check in")}
                                {nav_button(Page::Admin, "Admin")}
                            </nav>
                            <span class="identity">{&identity.name}</span>
                            <button class="btn btn-secondary" onclick={on_sign_out}>{"Sign out"}</button>
                        </div>
                    },
                    None => html! {},
                }}
            </div>
        </header>
    }
}
