use contracts::domain::a004_task_type::TaskType;
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use thaw::*;

use crate::shared::components::form::{
    bind, id_value, non_blank, parse_id, FormError, SelectField, TextAreaField, TextField,
};
use crate::shared::components::modal::Modal;
use crate::shared::data::use_data;
use crate::shared::details_model::DetailsViewModel;

/// Accepts "45", "45.5" and "45,5".
fn parse_minutes(value: &str) -> Option<f64> {
    value.trim().replace(',', ".").parse().ok()
}

#[component]
#[allow(non_snake_case)]
pub fn TaskTypeDetails(initial: Option<TaskType>, on_close: Callback<()>) -> impl IntoView {
    let data = use_data();
    let vm = DetailsViewModel::new(data.task_types, initial.as_ref());
    let form = vm.form;

    let (name, set_name) = bind(form, |f| f.name.clone(), |f, v| f.name = v);
    let (description, set_description) = bind(
        form,
        |f| f.description.clone().unwrap_or_default(),
        |f, v| f.description = non_blank(v),
    );
    let (category, set_category) = bind(
        form,
        |f| id_value(f.category_id),
        |f, v| f.category_id = parse_id(&v),
    );

    // Keep the raw text so partial input like "1," survives re-render.
    let minutes_text = RwSignal::new(form.with_untracked(|f| {
        f.estimated_minutes.map(|m| m.to_string()).unwrap_or_default()
    }));
    let set_minutes = Callback::new(move |value: String| {
        form.update(|f| f.estimated_minutes = parse_minutes(&value));
        minutes_text.set(value);
    });

    let category_options = Signal::derive(move || {
        data.categories
            .items
            .get()
            .into_iter()
            .map(|c| (c.id.to_string(), c.name))
            .collect::<Vec<_>>()
    });

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let raw = minutes_text.get_untracked();
        if !raw.trim().is_empty() && parse_minutes(&raw).is_none() {
            vm.error.set(Some("El tiempo estimado debe ser un número".to_string()));
            return;
        }
        vm.save_command(on_close);
    };

    view! {
        <Modal title=Signal::derive(move || vm.title()) on_close=on_close>
            <form class="form" on:submit=on_submit>
                <TextField label="Nombre" value=name on_input=set_name required=true />
                <SelectField
                    label="Categoría"
                    value=category
                    on_change=set_category
                    options=category_options
                    empty_label="Seleccione..."
                    required=true
                />
                <TextAreaField label="Descripción" value=description on_input=set_description />
                <TextField
                    label="Tiempo estimado (minutos)"
                    value=minutes_text
                    on_input=set_minutes
                    placeholder="Ej. 45"
                />
                <FormError message=vm.error />
                <div class="form__actions">
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_close.run(())>
                        "Cancelar"
                    </Button>
                    <button type="submit" class="button button--primary" disabled=move || vm.saving.get()>
                        {move || if vm.saving.get() { "Guardando..." } else { "Guardar" }}
                    </button>
                </div>
            </form>
        </Modal>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minutes_accepts_decimal_comma() {
        assert_eq!(parse_minutes("45"), Some(45.0));
        assert_eq!(parse_minutes(" 12,5 "), Some(12.5));
        assert_eq!(parse_minutes("abc"), None);
        assert_eq!(parse_minutes(""), None);
    }
}
