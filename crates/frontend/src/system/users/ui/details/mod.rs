use contracts::system::users::{User, MIN_PASSWORD_LEN};
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use thaw::*;

use crate::shared::components::form::{
    bind, bind_flag, id_value, non_blank, parse_id, CheckField, FormError, SelectField, TextField,
};
use crate::shared::components::modal::Modal;
use crate::shared::data::use_data;
use crate::shared::details_model::DetailsViewModel;

#[component]
#[allow(non_snake_case)]
pub fn UserDetails(initial: Option<User>, on_close: Callback<()>) -> impl IntoView {
    let data = use_data();
    let vm = DetailsViewModel::new(data.users, initial.as_ref());
    let form = vm.form;
    let creating = !vm.is_edit_mode();

    let (first_name, set_first_name) =
        bind(form, |f| f.first_name.clone(), |f, v| f.first_name = v);
    let (last_name, set_last_name) = bind(
        form,
        |f| f.last_name.clone().unwrap_or_default(),
        |f, v| f.last_name = non_blank(v),
    );
    let (email, set_email) = bind(form, |f| f.email.clone(), |f, v| f.email = v);
    let (phone, set_phone) = bind(
        form,
        |f| f.phone.clone().unwrap_or_default(),
        |f, v| f.phone = non_blank(v),
    );
    let (role, set_role) = bind(
        form,
        |f| id_value(f.role_id),
        |f, v| f.role_id = parse_id(&v),
    );
    let (branch, set_branch) = bind(
        form,
        |f| id_value(f.branch_id),
        |f, v| f.branch_id = parse_id(&v),
    );
    let (password, set_password) = bind(
        form,
        |f| f.password.clone().unwrap_or_default(),
        |f, v| f.password = non_blank(v),
    );
    let (active, set_active) = bind_flag(form, |f| f.active, |f, v| f.active = v);

    let role_options = Signal::derive(move || {
        data.roles
            .items
            .get()
            .into_iter()
            .map(|r| (r.id.to_string(), r.name))
            .collect::<Vec<_>>()
    });
    let branch_options = Signal::derive(move || {
        data.branches
            .items
            .get()
            .into_iter()
            .map(|b| (b.id.to_string(), b.name))
            .collect::<Vec<_>>()
    });

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        if creating {
            if let Err(msg) = form.with_untracked(|f| f.validate_for_create()) {
                vm.error.set(Some(msg));
                return;
            }
        }
        vm.save_command(on_close);
    };

    let password_label = if creating {
        "Contraseña"
    } else {
        "Nueva contraseña (dejar vacío para conservarla)"
    };

    view! {
        <Modal title=Signal::derive(move || vm.title()) on_close=on_close>
            <form class="form" on:submit=on_submit autocomplete="off">
                <div class="form__row">
                    <TextField label="Nombre" value=first_name on_input=set_first_name required=true />
                    <TextField label="Apellido" value=last_name on_input=set_last_name />
                </div>
                <div class="form__row">
                    <TextField label="Correo" value=email on_input=set_email input_type="email" required=true />
                    <TextField label="Teléfono" value=phone on_input=set_phone input_type="tel" />
                </div>
                <div class="form__row">
                    <SelectField
                        label="Rol"
                        value=role
                        on_change=set_role
                        options=role_options
                        empty_label="Seleccione..."
                        required=true
                    />
                    <SelectField
                        label="Sucursal"
                        value=branch
                        on_change=set_branch
                        options=branch_options
                        empty_label="Sin sucursal"
                    />
                </div>
                <TextField
                    label=password_label
                    value=password
                    on_input=set_password
                    input_type="password"
                    required=creating
                />
                <p class="form__hint">{format!("Mínimo {} caracteres.", MIN_PASSWORD_LEN)}</p>
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
