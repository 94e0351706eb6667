use contracts::domain::a001_branch::Branch;
use contracts::geo::Coordinates;
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use thaw::*;

use crate::maps::LocationPicker;
use crate::shared::components::form::{bind, bind_flag, non_blank, CheckField, FormError, TextField};
use crate::shared::components::modal::Modal;
use crate::shared::data::use_data;
use crate::shared::details_model::DetailsViewModel;

#[component]
#[allow(non_snake_case)]
pub fn BranchDetails(initial: Option<Branch>, on_close: Callback<()>) -> impl IntoView {
    let vm = DetailsViewModel::new(use_data().branches, initial.as_ref());
    let form = vm.form;

    let (name, set_name) = bind(form, |f| f.name.clone(), |f, v| f.name = v);
    let (address, set_address) = bind(
        form,
        |f| f.address.clone().unwrap_or_default(),
        |f, v| f.address = non_blank(v),
    );
    let (phone, set_phone) = bind(
        form,
        |f| f.phone.clone().unwrap_or_default(),
        |f, v| f.phone = non_blank(v),
    );
    let (active, set_active) = bind_flag(form, |f| f.active, |f, v| f.active = v);
    let location = Signal::derive(move || form.with(|f| f.location()));
    let set_location =
        Callback::new(move |point: Option<Coordinates>| form.update(|f| f.set_location(point)));

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        vm.save_command(on_close);
    };

    view! {
        <Modal title=Signal::derive(move || vm.title()) on_close=on_close>
            <form class="form" on:submit=on_submit>
                <TextField label="Nombre" value=name on_input=set_name required=true />
                <TextField label="Dirección" value=address on_input=set_address />
                <TextField label="Teléfono" value=phone on_input=set_phone input_type="tel" />
                <LocationPicker value=location on_change=set_location address=address />
                <CheckField label="Activa" checked=active on_change=set_active />
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
