use contracts::domain::a005_task::{Priority, Task, TaskState};
use contracts::domain::a005_task::status::status_id_for;
use contracts::geo::Coordinates;
use contracts::system::roles::Role;
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use thaw::*;

use crate::maps::LocationPicker;
use crate::shared::components::form::{
    bind, id_value, non_blank, parse_id, FormError, SelectField, TextAreaField, TextField,
};
use crate::shared::components::modal::Modal;
use crate::shared::data::use_data;
use crate::shared::date_utils::date_input_value;
use crate::shared::details_model::DetailsViewModel;
use crate::system::auth::context::use_auth;

fn options<T>(items: Vec<T>, f: impl Fn(T) -> (i64, String)) -> Vec<(String, String)> {
    items
        .into_iter()
        .map(|item| {
            let (id, label) = f(item);
            (id.to_string(), label)
        })
        .collect()
}

#[component]
#[allow(non_snake_case)]
pub fn TaskDetails(initial: Option<Task>, on_close: Callback<()>) -> impl IntoView {
    let data = use_data();
    let (auth_state, _) = use_auth();
    data.clients.ensure_loaded();
    data.users.ensure_loaded();
    data.task_types.ensure_loaded();
    data.branches.ensure_loaded();

    let vm = DetailsViewModel::new(data.tasks, initial.as_ref());
    let form = vm.form;

    if !vm.is_edit_mode() {
        // New tasks default to the creating advisor and their branch.
        if let Some(user) = auth_state.get_untracked().user {
            form.update(|f| {
                if user.role == Role::Asesor {
                    f.advisor_id = Some(user.id);
                }
                f.branch_id = f.branch_id.or(user.branch_id);
            });
        }
    }

    let (title, set_title) = bind(form, |f| f.title.clone(), |f, v| f.title = v);
    let (description, set_description) = bind(
        form,
        |f| f.description.clone().unwrap_or_default(),
        |f, v| f.description = non_blank(v),
    );
    let (client, set_client_raw) = bind(
        form,
        |f| id_value(f.client_id),
        |f, v| f.client_id = parse_id(&v),
    );
    let (task_type, set_task_type) = bind(
        form,
        |f| id_value(f.task_type_id),
        |f, v| f.task_type_id = parse_id(&v),
    );
    let (courier, set_courier) = bind(
        form,
        |f| id_value(f.courier_id),
        |f, v| f.courier_id = parse_id(&v),
    );
    let (advisor, set_advisor) = bind(
        form,
        |f| id_value(f.advisor_id),
        |f, v| f.advisor_id = parse_id(&v),
    );
    let (branch, set_branch) = bind(
        form,
        |f| id_value(f.branch_id),
        |f, v| f.branch_id = parse_id(&v),
    );
    let (status, set_status) = bind(
        form,
        |f| id_value(f.status_id),
        |f, v| f.status_id = parse_id(&v),
    );
    let (priority, set_priority) = bind(
        form,
        |f| f.priority.as_str().to_string(),
        |f, v| f.priority = v.parse().unwrap_or_default(),
    );
    let (scheduled, set_scheduled) = bind(
        form,
        |f| date_input_value(f.scheduled_date.as_deref()),
        |f, v| f.scheduled_date = non_blank(v),
    );
    let (due, set_due) = bind(
        form,
        |f| date_input_value(f.due_date.as_deref()),
        |f, v| f.due_date = non_blank(v),
    );
    let (address, set_address) = bind(
        form,
        |f| f.destination_address.clone().unwrap_or_default(),
        |f, v| f.destination_address = non_blank(v),
    );
    let (notes, set_notes) = bind(
        form,
        |f| f.notes.clone().unwrap_or_default(),
        |f, v| f.notes = non_blank(v),
    );
    let destination = Signal::derive(move || form.with(|f| f.destination()));
    let set_destination =
        Callback::new(move |point: Option<Coordinates>| form.update(|f| f.set_destination(point)));

    // Picking a client fills an empty destination from the client's address.
    let set_client = Callback::new(move |value: String| {
        set_client_raw.run(value.clone());
        let Some(client) = parse_id(&value).and_then(|id| data.clients.find(id)) else {
            return;
        };
        form.update(|f| {
            if f.destination_address.is_none() && f.destination().is_none() {
                f.destination_address = client.address.clone();
                f.set_destination(client.location());
            }
            if f.branch_id.is_none() {
                f.branch_id = client.branch_id;
            }
        });
    });

    let client_options = Signal::derive(move || {
        options(
            data.clients.items.get().into_iter().filter(|c| c.active).collect(),
            |c| (c.id, c.name),
        )
    });
    let type_options = Signal::derive(move || {
        options(data.task_types.items.get(), |t| (t.id, t.name))
    });
    let courier_options =
        Signal::derive(move || options(data.couriers(), |u| (u.id, u.display_name())));
    let advisor_options = Signal::derive(move || {
        options(data.users_with_role(Role::Asesor), |u| (u.id, u.display_name()))
    });
    let branch_options = Signal::derive(move || {
        options(data.branches.items.get(), |b| (b.id, b.name))
    });
    let status_options = Signal::derive(move || {
        options(data.task_statuses.items.get(), |s| (s.id, s.name))
    });
    let priority_options = Signal::derive(|| {
        Priority::ALL
            .iter()
            .map(|p| (p.as_str().to_string(), p.label().to_string()))
            .collect::<Vec<_>>()
    });

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        // Without an explicit status the task starts as pending, or
        // assigned when a courier was picked.
        data.task_statuses.items.with_untracked(|catalog| {
            form.update(|f| {
                if f.status_id.is_none() {
                    let state = if f.courier_id.is_some() {
                        TaskState::Asignada
                    } else {
                        TaskState::Pendiente
                    };
                    f.status_id = status_id_for(catalog, state);
                }
            });
        });
        vm.save_command(on_close);
    };

    view! {
        <Modal title=Signal::derive(move || vm.title()) on_close=on_close>
            <form class="form form--wide" on:submit=on_submit>
                <TextField label="Título" value=title on_input=set_title required=true />
                <div class="form__row">
                    <SelectField
                        label="Cliente"
                        value=client
                        on_change=set_client
                        options=client_options
                        empty_label="Seleccione..."
                        required=true
                    />
                    <SelectField
                        label="Tipo de tarea"
                        value=task_type
                        on_change=set_task_type
                        options=type_options
                        empty_label="Seleccione..."
                        required=true
                    />
                </div>
                <div class="form__row">
                    <SelectField
                        label="Mensajero"
                        value=courier
                        on_change=set_courier
                        options=courier_options
                        empty_label="Sin asignar"
                    />
                    <SelectField
                        label="Asesor"
                        value=advisor
                        on_change=set_advisor
                        options=advisor_options
                        empty_label="Sin asesor"
                    />
                </div>
                <div class="form__row">
                    <SelectField
                        label="Sucursal"
                        value=branch
                        on_change=set_branch
                        options=branch_options
                        empty_label="Sin sucursal"
                    />
                    <SelectField
                        label="Estado"
                        value=status
                        on_change=set_status
                        options=status_options
                        empty_label="Automático"
                    />
                    <SelectField
                        label="Prioridad"
                        value=priority
                        on_change=set_priority
                        options=priority_options
                    />
                </div>
                <div class="form__row">
                    <TextField label="Fecha programada" value=scheduled on_input=set_scheduled input_type="date" />
                    <TextField label="Fecha límite" value=due on_input=set_due input_type="date" />
                </div>
                <TextField label="Dirección de destino" value=address on_input=set_address />
                <LocationPicker
                    label="Destino"
                    value=destination
                    on_change=set_destination
                    address=address
                />
                <TextAreaField label="Descripción" value=description on_input=set_description />
                <TextAreaField label="Observaciones" value=notes on_input=set_notes rows=2 />
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
