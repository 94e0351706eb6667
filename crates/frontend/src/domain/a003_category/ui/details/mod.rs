use contracts::domain::a003_category::Category;
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use thaw::*;

use crate::shared::components::form::{bind, non_blank, FormError, TextAreaField, TextField};
use crate::shared::components::modal::Modal;
use crate::shared::data::use_data;
use crate::shared::details_model::DetailsViewModel;

#[component]
#[allow(non_snake_case)]
pub fn CategoryDetails(initial: Option<Category>, on_close: Callback<()>) -> impl IntoView {
    let vm = DetailsViewModel::new(use_data().categories, initial.as_ref());
    let form = vm.form;

    let (name, set_name) = bind(form, |f| f.name.clone(), |f, v| f.name = v);
    let (description, set_description) = bind(
        form,
        |f| f.description.clone().unwrap_or_default(),
        |f, v| f.description = non_blank(v),
    );

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        vm.save_command(on_close);
    };

    view! {
        <Modal title=Signal::derive(move || vm.title()) on_close=on_close>
            <form class="form" on:submit=on_submit>
                <TextField label="Nombre" value=name on_input=set_name required=true />
                <TextAreaField label="Descripción" value=description on_input=set_description />
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
