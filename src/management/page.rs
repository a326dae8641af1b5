//! Defines the route handler and view for a collection's management page.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use time::Date;

use crate::{
    Error,
    app_state::lock,
    html::{
        BUTTON_DELETE_STYLE, BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE,
        PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base,
        section,
    },
    management::{ManagedRecord, ManagementState},
    navigation::NavBar,
    record::{DonorType, FieldKind, Record, RecordField},
    timezone::local_today,
};

/// Renders the page listing the records of `R` with forms to change them.
pub async fn get_records_page<R: ManagedRecord>(
    State(state): State<ManagementState>,
) -> Result<Response, Error> {
    let today = local_today(&state.local_timezone)
        .inspect_err(|error| tracing::error!("could not get today's date: {error}"))?;
    let stores = lock(&state.stores)?;
    let collection = R::collection(&stores);

    Ok(records_view::<R>(collection.list(), &collection.selectable_keys(), today).into_response())
}

fn records_view<R: ManagedRecord>(records: &[R], keys: &[&str], today: Date) -> Markup {
    let nav_bar = NavBar::new(R::PAGE).into_html();

    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-5xl mb-6"
            {
                h1 class="text-3xl font-bold" { (R::TITLE) }
            }

            (section(
                &format!("All {}", R::TITLE),
                &format!("{} {} on record.", records.len(), R::TITLE.to_lowercase()),
                &records_table(records),
            ))

            (section(
                &format!("Add a {}", R::SINGULAR),
                "",
                &create_form::<R>(today),
            ))

            (section(
                &format!("Update a {}", R::SINGULAR),
                &format!("Changes apply to every {} with the selected name.", R::SINGULAR),
                &update_form::<R>(keys),
            ))

            (section(
                &format!("Delete a {}", R::SINGULAR),
                &format!("Removes every {} with the selected name.", R::SINGULAR),
                &delete_form::<R>(keys),
            ))
        }
    };

    base(R::TITLE, &[], &content)
}

fn records_table<R: Record>(records: &[R]) -> Markup {
    let fields = R::Field::all();

    html! {
        div class="relative overflow-x-auto"
        {
            table class="w-full text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        @for field in fields {
                            th scope="col" class=(TABLE_CELL_STYLE) { (field.label()) }
                        }
                    }
                }

                tbody
                {
                    @for record in records {
                        tr class=(TABLE_ROW_STYLE) data-record-row="true"
                        {
                            @for field in fields {
                                td class=(TABLE_CELL_STYLE) { (record.get(*field)) }
                            }
                        }
                    }

                    @if records.is_empty() {
                        tr class=(TABLE_ROW_STYLE)
                        {
                            td colspan=(fields.len()) class={(TABLE_CELL_STYLE) " text-center"}
                            {
                                "Nothing here yet. Add one below."
                            }
                        }
                    }
                }
            }
        }
    }
}

fn create_form<R: ManagedRecord>(today: Date) -> Markup {
    html! {
        form
            hx-post=(R::API)
            hx-target="#alert-container"
            hx-target-error="#alert-container"
            class="w-full space-y-4"
            data-form="create"
        {
            @for &field in R::Field::all() {
                div
                {
                    label for={"create-" (field.name())} class=(FORM_LABEL_STYLE)
                    {
                        (field.label())
                    }

                    (field_input(field, today))
                }
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE)
            {
                "Add " (R::SINGULAR)
            }
        }
    }
}

fn field_input(field: impl RecordField, today: Date) -> Markup {
    let id = format!("create-{}", field.name());
    let required = field.is_required();

    match field.kind() {
        FieldKind::Text => html! {
            input
                name=(field.name())
                id=(id)
                type="text"
                placeholder=(field.label())
                required[required]
                class=(FORM_TEXT_INPUT_STYLE);
        },
        FieldKind::Decimal => html! {
            input
                name=(field.name())
                id=(id)
                type="number"
                min="0"
                step="0.01"
                placeholder="0.00"
                required[required]
                class=(FORM_TEXT_INPUT_STYLE);
        },
        FieldKind::Integer => html! {
            input
                name=(field.name())
                id=(id)
                type="number"
                min="0"
                step="1"
                placeholder="0"
                required[required]
                class=(FORM_TEXT_INPUT_STYLE);
        },
        FieldKind::Date => html! {
            input
                name=(field.name())
                id=(id)
                type="date"
                value=(today)
                required[required]
                class=(FORM_TEXT_INPUT_STYLE);
        },
        FieldKind::DonorType => html! {
            select
                name=(field.name())
                id=(id)
                required[required]
                class=(FORM_TEXT_INPUT_STYLE)
            {
                option value="" { "Not specified" }

                @for donor_type in DonorType::ALL {
                    option value=(donor_type) { (donor_type) }
                }
            }
        },
    }
}

fn key_select(id: &str, keys: &[&str]) -> Markup {
    html! {
        select name="key" id=(id) required class=(FORM_TEXT_INPUT_STYLE)
        {
            @for key in keys {
                option value=(key) { (key) }
            }
        }
    }
}

fn update_form<R: ManagedRecord>(keys: &[&str]) -> Markup {
    let is_disabled = keys.is_empty();

    html! {
        form
            hx-put=(R::API)
            hx-target="#alert-container"
            hx-target-error="#alert-container"
            class="w-full"
            data-form="update"
        {
            fieldset disabled[is_disabled] class="space-y-4"
            {
                div
                {
                    label for="update-key" class=(FORM_LABEL_STYLE) { (R::KEY_FIELD.label()) }
                    (key_select("update-key", keys))
                }

                div
                {
                    label for="update-field" class=(FORM_LABEL_STYLE) { "Field" }

                    select name="field" id="update-field" required class=(FORM_TEXT_INPUT_STYLE)
                    {
                        @for field in R::Field::all() {
                            option value=(field.name()) { (field.label()) }
                        }
                    }
                }

                div
                {
                    label for="update-value" class=(FORM_LABEL_STYLE) { "New Value" }

                    input
                        name="value"
                        id="update-value"
                        type="text"
                        placeholder="Dates are YYYY-MM-DD"
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                button type="submit" class=(BUTTON_PRIMARY_STYLE)
                {
                    "Update " (R::SINGULAR)
                }
            }
        }
    }
}

fn delete_form<R: ManagedRecord>(keys: &[&str]) -> Markup {
    let is_disabled = keys.is_empty();

    html! {
        form
            hx-post=(R::DELETE_API)
            hx-target="#alert-container"
            hx-target-error="#alert-container"
            hx-confirm={"Delete every " (R::SINGULAR) " with this name?"}
            class="w-full"
            data-form="delete"
        {
            fieldset disabled[is_disabled] class="space-y-4"
            {
                div
                {
                    label for="delete-key" class=(FORM_LABEL_STYLE) { (R::KEY_FIELD.label()) }
                    (key_select("delete-key", keys))
                }

                button type="submit" class=(BUTTON_DELETE_STYLE)
                {
                    "Delete " (R::SINGULAR)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{extract::State, http::StatusCode};
    use scraper::{ElementRef, Html, Selector};
    use time::OffsetDateTime;

    use crate::{
        endpoints,
        management::{ManagementState, get_test_state},
        record::{Donor, Event, Volunteer},
        store::Stores,
        test_utils::{
            assert_form_input, assert_form_input_with_value, assert_hx_endpoint,
            assert_valid_html, parse_html_document,
        },
    };

    use super::get_records_page;

    #[track_caller]
    fn must_get_form_by_kind<'a>(html: &'a Html, kind: &str) -> ElementRef<'a> {
        let selector = Selector::parse(&format!("form[data-form='{kind}']")).unwrap();
        html.select(&selector)
            .next()
            .unwrap_or_else(|| panic!("no {kind} form found"))
    }

    fn is_disabled(form: &ElementRef<'_>) -> bool {
        form.select(&Selector::parse("fieldset").unwrap())
            .next()
            .expect("form has no fieldset")
            .value()
            .attr("disabled")
            .is_some()
    }

    #[tokio::test]
    async fn donors_page_lists_records() {
        let response = get_records_page::<Donor>(State(get_test_state())).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        let rows: Vec<String> = html
            .select(&Selector::parse("tr[data-record-row]").unwrap())
            .map(|row| row.text().collect())
            .collect();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].contains("John Doe"), "got {rows:?}");
        assert!(rows[1].contains("Jane Smith"), "got {rows:?}");
    }

    #[tokio::test]
    async fn create_form_has_input_per_field() {
        let response = get_records_page::<Volunteer>(State(get_test_state()))
            .await
            .unwrap();

        let html = parse_html_document(response).await;
        let form = must_get_form_by_kind(&html, "create");
        assert_hx_endpoint(&form, endpoints::VOLUNTEERS_API, "hx-post");
        assert_form_input(&form, "name", "text");
        assert_form_input(&form, "hours_volunteered", "number");
        assert_form_input(&form, "role", "text");
    }

    #[tokio::test]
    async fn create_form_defaults_date_to_today() {
        let response = get_records_page::<Donor>(State(get_test_state())).await.unwrap();

        let html = parse_html_document(response).await;
        let form = must_get_form_by_kind(&html, "create");
        let today = OffsetDateTime::now_utc().date().to_string();
        assert_form_input_with_value(&form, "date", "date", &today);
    }

    #[tokio::test]
    async fn update_and_delete_forms_use_collection_endpoints() {
        let response = get_records_page::<Event>(State(get_test_state())).await.unwrap();

        let html = parse_html_document(response).await;
        let update_form = must_get_form_by_kind(&html, "update");
        assert_hx_endpoint(&update_form, endpoints::EVENTS_API, "hx-put");
        assert!(!is_disabled(&update_form));
        let delete_form = must_get_form_by_kind(&html, "delete");
        assert_hx_endpoint(&delete_form, endpoints::DELETE_EVENTS, "hx-post");
        assert!(!is_disabled(&delete_form));

        let options: Vec<&str> = delete_form
            .select(&Selector::parse("option").unwrap())
            .filter_map(|option| option.value().attr("value"))
            .collect();
        assert_eq!(options, ["Gala", "Fundraiser"]);
    }

    #[tokio::test]
    async fn empty_collection_disables_update_and_delete() {
        let state = ManagementState {
            stores: Arc::new(Mutex::new(Stores::default())),
            local_timezone: "Etc/UTC".to_owned(),
        };

        let response = get_records_page::<Donor>(State(state)).await.unwrap();

        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        assert!(is_disabled(&must_get_form_by_kind(&html, "update")));
        assert!(is_disabled(&must_get_form_by_kind(&html, "delete")));
    }
}
