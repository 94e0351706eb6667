//! Labelled form fields bound to one field of a form signal.
//!
//! ```rust
//! # use leptos::prelude::*;
//! # use contracts::domain::a002_client::aggregate::ClientDraft;
//! # use frontend::shared::components::form::{bind, TextField};
//! # fn _example() -> impl IntoView {
//! let form = RwSignal::new(ClientDraft::default());
//! let (name, set_name) = bind(form, |f| f.name.clone(), |f, v| f.name = v);
//! view! { <TextField label="Nombre" value=name on_input=set_name required=true /> }
//! # }
//! ```

use leptos::prelude::*;

/// Read/write pair for one text-like field of `form`.
pub fn bind<F>(
    form: RwSignal<F>,
    get: fn(&F) -> String,
    set: fn(&mut F, String),
) -> (Signal<String>, Callback<String>)
where
    F: Send + Sync + 'static,
{
    (
        Signal::derive(move || form.with(get)),
        Callback::new(move |value: String| form.update(|f| set(f, value))),
    )
}

/// Same as [`bind`] for boolean fields.
pub fn bind_flag<F>(
    form: RwSignal<F>,
    get: fn(&F) -> bool,
    set: fn(&mut F, bool),
) -> (Signal<bool>, Callback<bool>)
where
    F: Send + Sync + 'static,
{
    (
        Signal::derive(move || form.with(get)),
        Callback::new(move |value: bool| form.update(|f| set(f, value))),
    )
}

/// `Some(text)` unless blank.
pub fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Id select values: `""` means none.
pub fn parse_id(value: &str) -> Option<i64> {
    value.trim().parse().ok()
}

pub fn id_value(id: Option<i64>) -> String {
    id.map(|v| v.to_string()).unwrap_or_default()
}

#[component]
pub fn TextField(
    #[prop(into)] label: String,
    #[prop(into)] value: Signal<String>,
    on_input: Callback<String>,
    /// "text" (default), "email", "password", "tel", "date", "number"
    #[prop(optional)]
    input_type: Option<&'static str>,
    #[prop(optional)] placeholder: Option<&'static str>,
    #[prop(optional)] required: bool,
    #[prop(optional, into)] disabled: MaybeProp<bool>,
) -> impl IntoView {
    view! {
        <div class="form__group">
            <label class="form__label">
                {label}
                {required.then(|| view! { <span class="form__required">" *"</span> })}
            </label>
            <input
                class="form__input"
                type=input_type.unwrap_or("text")
                prop:value=move || value.get()
                placeholder=placeholder.unwrap_or_default()
                disabled=move || disabled.get().unwrap_or(false)
                on:input=move |ev| on_input.run(event_target_value(&ev))
            />
        </div>
    }
}

#[component]
pub fn TextAreaField(
    #[prop(into)] label: String,
    #[prop(into)] value: Signal<String>,
    on_input: Callback<String>,
    #[prop(optional)] rows: Option<u32>,
) -> impl IntoView {
    view! {
        <div class="form__group">
            <label class="form__label">{label}</label>
            <textarea
                class="form__textarea"
                rows=rows.unwrap_or(3)
                prop:value=move || value.get()
                on:input=move |ev| on_input.run(event_target_value(&ev))
            ></textarea>
        </div>
    }
}

/// `<select>` over `(value, label)` pairs with a leading empty option.
#[component]
pub fn SelectField(
    #[prop(into)] label: String,
    #[prop(into)] value: Signal<String>,
    on_change: Callback<String>,
    #[prop(into)] options: Signal<Vec<(String, String)>>,
    /// Label of the empty option; `None` hides it.
    #[prop(optional)]
    empty_label: Option<&'static str>,
    #[prop(optional)] required: bool,
) -> impl IntoView {
    view! {
        <div class="form__group">
            <label class="form__label">
                {label}
                {required.then(|| view! { <span class="form__required">" *"</span> })}
            </label>
            <select
                class="form__select"
                prop:value=move || value.get()
                on:change=move |ev| on_change.run(event_target_value(&ev))
            >
                {empty_label.map(|l| view! { <option value="">{l}</option> })}
                <For
                    each=move || options.get()
                    key=|(val, label)| (val.clone(), label.clone())
                    children=move |(val, label)| {
                        let current = val.clone();
                        view! {
                            <option value=val selected=move || value.get() == current>
                                {label}
                            </option>
                        }
                    }
                />
            </select>
        </div>
    }
}

#[component]
pub fn CheckField(
    #[prop(into)] label: String,
    #[prop(into)] checked: Signal<bool>,
    on_change: Callback<bool>,
) -> impl IntoView {
    view! {
        <label class="form__checkbox-wrapper">
            <input
                type="checkbox"
                class="form__checkbox"
                prop:checked=move || checked.get()
                on:change=move |ev| on_change.run(event_target_checked(&ev))
            />
            <span class="form__checkbox-label">{label}</span>
        </label>
    }
}

/// Inline error line; renders nothing while `message` is `None`.
#[component]
pub fn FormError(#[prop(into)] message: Signal<Option<String>>) -> impl IntoView {
    move || {
        message
            .get()
            .map(|m| view! { <div class="form__error" role="alert">{m}</div> })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank("  ".into()), None);
        assert_eq!(non_blank("Calle 5".into()), Some("Calle 5".into()));
    }

    #[test]
    fn test_id_round_trip_for_selects() {
        assert_eq!(parse_id(""), None);
        assert_eq!(parse_id("12"), Some(12));
        assert_eq!(id_value(Some(12)), "12");
        assert_eq!(id_value(None), "");
    }
}
