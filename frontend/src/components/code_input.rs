use shared::CODE_LENGTH;
use wasm_bindgen::JsCast;
use web_sys::{ClipboardEvent, HtmlInputElement};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct CodeInputProps {
    /// One string per cell, empty when blank
    pub cells: Vec<String>,
    pub focus: usize,
    pub disabled: bool,
    pub on_digit: Callback<(usize, char)>,
    pub on_backspace: Callback<usize>,
    pub on_paste: Callback<(usize, String)>,
    pub on_focus: Callback<usize>,
    pub on_submit: Callback<()>,
}

/// Six single-character boxes. Input is interpreted by the caller; this
/// component only forwards key presses, pastes and focus changes.
#[function_component(CodeInput)]
pub fn code_input(props: &CodeInputProps) -> Html {
    let refs = use_memo((), |_| {
        (0..CODE_LENGTH)
            .map(|_| NodeRef::default())
            .collect::<Vec<_>>()
    });

    // Move the caret to whichever cell the state says is focused
    {
        let refs = refs.clone();
        use_effect_with((props.focus, props.disabled), move |&(focus, disabled)| {
            if !disabled {
                if let Some(input) = refs.get(focus).and_then(|r| r.cast::<HtmlInputElement>()) {
                    let _ = input.focus();
                }
            }
            || ()
        });
    }

    let cells = (0..CODE_LENGTH).map(|index| {
        let value = props.cells.get(index).cloned().unwrap_or_default();

        let onkeydown = {
            let on_digit = props.on_digit.clone();
            let on_backspace = props.on_backspace.clone();
            let on_focus = props.on_focus.clone();
            let on_submit = props.on_submit.clone();
            Callback::from(move |e: KeyboardEvent| {
                let key = e.key();
                match key.as_str() {
                    "Backspace" => {
                        e.prevent_default();
                        on_backspace.emit(index);
                    }
                    "Enter" => {
                        e.prevent_default();
                        on_submit.emit(());
                    }
                    "ArrowLeft" if index > 0 => on_focus.emit(index - 1),
                    "ArrowRight" if index + 1 < CODE_LENGTH => on_focus.emit(index + 1),
                    _ => {
                        let mut chars = key.chars();
                        if let (Some(ch), None) = (chars.next(), chars.next()) {
                            // Single printable key; anything but a digit is dropped
                            if !(e.ctrl_key() || e.meta_key()) {
                                e.prevent_default();
                                on_digit.emit((index, ch));
                            }
                        }
                    }
                }
            })
        };

        // Soft keyboards may skip keydown; keep the box in sync with state
        let oninput = {
            let on_digit = props.on_digit.clone();
            let value = value.clone();
            Callback::from(move |e: InputEvent| {
                let input: HtmlInputElement = e.target_unchecked_into();
                let typed = input.value();
                input.set_value(&value);
                if let Some(ch) = typed.chars().last() {
                    on_digit.emit((index, ch));
                }
            })
        };

        let onpaste = {
            let on_paste = props.on_paste.clone();
            Callback::from(move |e: Event| {
                e.prevent_default();
                let text = e
                    .dyn_ref::<ClipboardEvent>()
                    .and_then(|event| event.clipboard_data())
                    .and_then(|data| data.get_data("text").ok())
                    .unwrap_or_default();
                on_paste.emit((index, text));
            })
        };

        let onfocus = {
            let on_focus = props.on_focus.clone();
            Callback::from(move |_: FocusEvent| on_focus.emit(index))
        };

        html! {
            <input
                ref={refs[index].clone()}
                class={classes!("code-cell", (!value.is_empty()).then_some("filled"))}
                type="text"
                inputmode="numeric"
                maxlength="1"
                autocomplete="one-time-code"
                aria-label={format!("Digit {}", index + 1)}
                disabled={props.disabled}
                value={value.clone()}
                {onkeydown}
                {oninput}
                {onpaste}
                {onfocus}
            />
        }
    });

    html! {
        <div class="code-input">{for cells}</div>
    }
}
