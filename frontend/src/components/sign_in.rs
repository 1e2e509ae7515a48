use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::services::auth::{AuthSession, Identity};

#[derive(Properties, PartialEq)]
pub struct SignInProps {
    pub session: AuthSession,
    pub on_signed_in: Callback<Identity>,
}

/// Stores an access token issued elsewhere; there is no login request.
#[function_component(SignIn)]
pub fn sign_in(props: &SignInProps) -> Html {
    let name = use_state(String::new);
    let token = use_state(String::new);
    let error = use_state(|| Option::<String>::None);

    let on_name_input = {
        let name = name.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            name.set(input.value());
        })
    };

    let on_token_input = {
        let token = token.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            token.set(input.value());
        })
    };

    let on_submit = {
        let name = name.clone();
        let token = token.clone();
        let error = error.clone();
        let session = props.session.clone();
        let on_signed_in = props.on_signed_in.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let display_name = name.trim();
            if display_name.is_empty() {
                error.set(Some("Enter your name".to_string()));
                return;
            }

            let identity = Identity {
                name: display_name.to_string(),
            };
            match session.sign_in(&token, &identity) {
                Ok(()) => {
                    error.set(None);
                    on_signed_in.emit(identity);
                }
                Err(message) => error.set(Some(message)),
            }
        })
    };

    html! {
        <section class="sign-in">
            <h2>{"Sign in"}</h2>
            <form onsubmit={on_submit}>
                <div class="form-group">
                    <label for="sign-in-name">{"Name"}</label>
                    <input id="sign-in-name" type="text" value={(*name).clone()} oninput={on_name_input} />
                </div>
                <div class="form-group">
                    <label for="sign-in-token">{"Access token"}</label>
                    <input id="sign-in-token" type="password" value={(*token).clone()} oninput={on_token_input} />
                </div>
                {if let Some(message) = &*error {
                    html! { <div class="error-message">{message}</div> }
                } else {
                    html! {}
                }}
                <button type="submit" class="btn btn-primary">{"Sign in"}</button>
            </form>
        </section>
    }
}
