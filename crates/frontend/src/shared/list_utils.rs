//! Sorting helpers shared by the list pages.
use leptos::ev::MouseEvent;
use leptos::prelude::*;
use std::cmp::Ordering;
use thaw::TableHeaderCell;

/// Row types that can be ordered by a named column.
pub trait Sortable {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering;
}

/// Case-insensitive comparison; `None` sorts last.
pub fn cmp_text(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Sort a list by the given field
pub fn sort_list<T: Sortable>(items: &mut [T], field: &str, ascending: bool) {
    items.sort_by(|a, b| {
        let cmp = a.compare_by_field(b, field);
        if ascending {
            cmp
        } else {
            cmp.reverse()
        }
    });
}

/// Header suffix showing the sort direction
pub fn get_sort_indicator(current_field: &str, field: &str, ascending: bool) -> &'static str {
    if current_field == field {
        if ascending {
            " ▲"
        } else {
            " ▼"
        }
    } else {
        " ⇅"
    }
}

/// Click handler for a sortable header: same field flips direction,
/// a new field sorts ascending.
pub fn create_sort_toggle(
    field: &'static str,
    sort_field: RwSignal<String>,
    sort_ascending: RwSignal<bool>,
) -> impl Fn(MouseEvent) + 'static {
    move |_| {
        if sort_field.get_untracked() == field {
            sort_ascending.update(|v| *v = !*v);
        } else {
            sort_field.set(field.to_string());
            sort_ascending.set(true);
        }
    }
}

/// Clickable column header bound to the page's sort signals.
#[component]
pub fn SortableHeader(
    label: &'static str,
    field: &'static str,
    sort_field: RwSignal<String>,
    sort_ascending: RwSignal<bool>,
) -> impl IntoView {
    view! {
        <TableHeaderCell>
            <div
                class="table__sortable-header"
                style="cursor:pointer;"
                on:click=create_sort_toggle(field, sort_field, sort_ascending)
            >
                {label}
                <span class="table__sort-indicator">
                    {move || get_sort_indicator(&sort_field.get(), field, sort_ascending.get())}
                </span>
            </div>
        </TableHeaderCell>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Row {
        name: Option<&'static str>,
        n: i64,
    }

    impl Sortable for Row {
        fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
            match field {
                "name" => cmp_text(self.name, other.name),
                _ => self.n.cmp(&other.n),
            }
        }
    }

    #[test]
    fn test_sort_list_by_text_ignores_case() {
        let mut rows = vec![
            Row { name: Some("beta"), n: 1 },
            Row { name: None, n: 2 },
            Row { name: Some("Alfa"), n: 3 },
        ];
        sort_list(&mut rows, "name", true);
        let names: Vec<_> = rows.iter().map(|r| r.name).collect();
        assert_eq!(names, vec![Some("Alfa"), Some("beta"), None]);

        sort_list(&mut rows, "n", false);
        assert_eq!(rows[0].n, 3);
    }

    #[test]
    fn test_sort_indicator() {
        assert_eq!(get_sort_indicator("name", "name", true), " ▲");
        assert_eq!(get_sort_indicator("name", "name", false), " ▼");
        assert_eq!(get_sort_indicator("name", "phone", true), " ⇅");
    }
}
