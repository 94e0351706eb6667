use contracts::domain::a002_client::Client;
use contracts::geo::Coordinates;
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use thaw::*;

use crate::maps::LocationPicker;
use crate::shared::components::form::{
    bind, bind_flag, id_value, non_blank, parse_id, CheckField, FormError, SelectField,
    TextAreaField, TextField,
};
use crate::shared::components::modal::Modal;
use crate::shared::data::use_data;
use crate::shared::details_model::DetailsViewModel;

#[component]
#[allow(non_snake_case)]
pub fn ClientDetails(initial: Option<Client>, on_close: Callback<()>) -> impl IntoView {
    let data = use_data();
    let vm = DetailsViewModel::new(data.clients, initial.as_ref());
    let form = vm.form;

    let (name, set_name) = bind(form, |f| f.name.clone(), |f, v| f.name = v);
    let (document, set_document) = bind(
        form,
        |f| f.document.clone().unwrap_or_default(),
        |f, v| f.document = non_blank(v),
    );
    let (phone, set_phone) = bind(
        form,
        |f| f.phone.clone().unwrap_or_default(),
        |f, v| f.phone = non_blank(v),
    );
    let (email, set_email) = bind(
        form,
        |f| f.email.clone().unwrap_or_default(),
        |f, v| f.email = non_blank(v),
    );
    let (address, set_address) = bind(
        form,
        |f| f.address.clone().unwrap_or_default(),
        |f, v| f.address = non_blank(v),
    );
    let (branch, set_branch) = bind(
        form,
        |f| id_value(f.branch_id),
        |f, v| f.branch_id = parse_id(&v),
    );
    let (notes, set_notes) = bind(
        form,
        |f| f.notes.clone().unwrap_or_default(),
        |f, v| f.notes = non_blank(v),
    );
    let (active, set_active) = bind_flag(form, |f| f.active, |f, v| f.active = v);
    let location = Signal::derive(move || form.with(|f| f.location()));
    let set_location =
        Callback::new(move |point: Option<Coordinates>| form.update(|f| f.set_location(point)));

    let branch_options = Signal::derive(move || {
        data.branches
            .items
            .get()
            .into_iter()
            .filter(|b| b.active)
            .map(|b| (b.id.to_string(), b.name))
            .collect::<Vec<_>>()
    });

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        vm.save_command(on_close);
    };

    view! {
        <Modal title=Signal::derive(move || vm.title()) on_close=on_close>
            <form class="form" on:submit=on_submit>
                <div class="form__row">
                    <TextField label="Nombre" value=name on_input=set_name required=true />
                    <TextField label="Documento (NIT / cédula)" value=document on_input=set_document />
                </div>
                <div class="form__row">
                    <TextField label="Teléfono" value=phone on_input=set_phone input_type="tel" />
                    <TextField label="Correo" value=email on_input=set_email input_type="email" />
                </div>
                <TextField label="Dirección" value=address on_input=set_address />
                <SelectField
                    label="Sucursal"
                    value=branch
                    on_change=set_branch
                    options=branch_options
                    empty_label="Sin sucursal"
                />
                <LocationPicker value=location on_change=set_location address=address />
                <TextAreaField label="Observaciones" value=notes on_input=set_notes />
                <CheckField label="Activo" checked=active on_change=set_active />
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
