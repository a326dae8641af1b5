//! The reports page with a chart per collection and a custom analytics panel.

use std::{
    fmt::Display,
    str::FromStr,
    sync::{Arc, Mutex},
};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use charming::Chart;
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    AppState, Error,
    aggregation::{sum_by_category, sum_by_date},
    app_state::lock,
    charts::{
        ChartPanel, ValueFormat, category_bar_chart, chart_container, charts_head_elements,
        date_line_chart,
    },
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, PAGE_CONTAINER_STYLE, base,
        section,
    },
    navigation::NavBar,
    store::Stores,
};

/// The collections that can be chosen in the custom analytics panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportCategory {
    #[default]
    Donations,
    Volunteers,
    Events,
    Expenses,
}

impl ReportCategory {
    pub const ALL: [ReportCategory; 4] = [
        ReportCategory::Donations,
        ReportCategory::Volunteers,
        ReportCategory::Events,
        ReportCategory::Expenses,
    ];

    /// The category names as a readable list, e.g. for error messages.
    pub fn names() -> String {
        let names: Vec<String> = Self::ALL.iter().map(ToString::to_string).collect();

        match names.split_last() {
            Some((last, rest)) if !rest.is_empty() => format!("{} or {last}", rest.join(", ")),
            _ => names.join(""),
        }
    }

    /// The chart for this category built from the current stores.
    fn chart(self, stores: &Stores) -> Chart {
        match self {
            ReportCategory::Donations => date_line_chart(
                "Donations by Date",
                "Amount Donated",
                &sum_by_date(
                    stores.donors.list(),
                    |donor| Some(donor.date),
                    |donor| donor.amount_donated,
                ),
                ValueFormat::Currency,
            ),
            ReportCategory::Volunteers => category_bar_chart(
                "Volunteer Hours by Role",
                "Hours Volunteered",
                &sum_by_category(
                    stores.volunteers.list(),
                    |volunteer| Some(volunteer.role.clone()),
                    |volunteer| f64::from(volunteer.hours_volunteered),
                ),
                ValueFormat::Number,
            ),
            ReportCategory::Events => date_line_chart(
                "Event Attendance by Date",
                "Attendees",
                &sum_by_date(
                    stores.events.list(),
                    |event| Some(event.date),
                    |event| f64::from(event.attendees),
                ),
                ValueFormat::Number,
            ),
            ReportCategory::Expenses => date_line_chart(
                "Expenses by Date",
                "Amount",
                &sum_by_date(
                    stores.expenses.list(),
                    |expense| Some(expense.date),
                    |expense| expense.amount,
                ),
                ValueFormat::Currency,
            ),
        }
    }
}

impl Display for ReportCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportCategory::Donations => write!(f, "Donations"),
            ReportCategory::Volunteers => write!(f, "Volunteers"),
            ReportCategory::Events => write!(f, "Events"),
            ReportCategory::Expenses => write!(f, "Expenses"),
        }
    }
}

impl FromStr for ReportCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.to_string() == s)
            .ok_or_else(|| Error::UnknownCategory(s.to_owned()))
    }
}

/// The state needed for the reports page.
#[derive(Debug, Clone)]
pub struct ReportsState {
    /// The donor, volunteer, event and expense collections.
    pub stores: Arc<Mutex<Stores>>,
}

impl FromRef<AppState> for ReportsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            stores: state.stores.clone(),
        }
    }
}

/// The query string for the reports page.
#[derive(Debug, Default, Deserialize)]
pub struct ReportsQuery {
    /// The category shown in the custom analytics panel, Donations if omitted.
    pub category: Option<String>,
}

/// Display the reports page.
///
/// # Errors
/// Returns [Error::UnknownCategory] if `category` in the query string is not
/// one of [ReportCategory].
pub async fn get_reports_page(
    State(state): State<ReportsState>,
    Query(query): Query<ReportsQuery>,
) -> Result<Response, Error> {
    let category = match query.category.as_deref() {
        None | Some("") => ReportCategory::default(),
        Some(category) => category.parse()?,
    };

    let stores = lock(&state.stores)?;

    Ok(reports_view(&stores, category).into_response())
}

fn reports_view(stores: &Stores, selected: ReportCategory) -> Markup {
    let nav_bar = NavBar::new(endpoints::REPORTS_VIEW).into_html();
    let charts = [
        ChartPanel::new("donation-report-chart", ReportCategory::Donations.chart(stores)),
        ChartPanel::new("volunteer-report-chart", ReportCategory::Volunteers.chart(stores)),
        ChartPanel::new("event-report-chart", ReportCategory::Events.chart(stores)),
        ChartPanel::new("expense-report-chart", ReportCategory::Expenses.chart(stores)),
        ChartPanel::new("custom-analytics-chart", selected.chart(stores)),
    ];
    let [donations, volunteers, events, expenses, custom] = &charts;

    let content = html!(
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-5xl mb-6"
            {
                h1 class="text-3xl font-bold" { "Reporting and Analytics" }
                p class="text-gray-600 dark:text-gray-400"
                {
                    "Generate detailed reports and customize analytics."
                }
            }

            (section("Donation Report", "Donations received per day.", &chart_container(donations)))
            (section("Volunteer Report", "Hours volunteered per role.", &chart_container(volunteers)))
            (section("Event Report", "Attendees per event date.", &chart_container(events)))
            (section("Expense Report", "Money spent per day.", &chart_container(expenses)))
            (section("Custom Analytics", "", &custom_analytics(selected, custom)))
        }
    );

    base("Reports", &charts_head_elements(&charts), &content)
}

fn custom_analytics(selected: ReportCategory, chart: &ChartPanel) -> Markup {
    html! {
        form
            method="get"
            action=(endpoints::REPORTS_VIEW)
            class="flex flex-col gap-4 mb-4 sm:flex-row sm:items-end"
        {
            div class="flex-1"
            {
                label for="category" class=(FORM_LABEL_STYLE) { "Select Category" }

                select name="category" id="category" class=(FORM_TEXT_INPUT_STYLE)
                {
                    @for category in ReportCategory::ALL {
                        option value=(category) selected[category == selected] { (category) }
                    }
                }
            }

            div class="sm:w-40"
            {
                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Show" }
            }
        }

        (chart_container(chart))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{Query, State},
        http::StatusCode,
    };
    use scraper::Selector;

    use crate::{
        Error,
        seed::sample_data,
        store::Stores,
        test_utils::{assert_valid_html, parse_html_document},
    };

    use super::{ReportCategory, ReportsQuery, ReportsState, get_reports_page};

    fn get_test_state() -> ReportsState {
        ReportsState {
            stores: Arc::new(Mutex::new(Stores::from_snapshot(sample_data()).unwrap())),
        }
    }

    fn query(category: &str) -> Query<ReportsQuery> {
        Query(ReportsQuery {
            category: Some(category.to_owned()),
        })
    }

    #[test]
    fn parses_category_names() {
        assert_eq!("Events".parse::<ReportCategory>(), Ok(ReportCategory::Events));
        assert_eq!(
            "events".parse::<ReportCategory>(),
            Err(Error::UnknownCategory("events".to_owned()))
        );
    }

    #[test]
    fn names_lists_every_category() {
        assert_eq!(
            ReportCategory::names(),
            "Donations, Volunteers, Events or Expenses"
        );
    }

    #[tokio::test]
    async fn reports_page_has_every_chart() {
        let response = get_reports_page(State(get_test_state()), Query(ReportsQuery::default()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        for id in [
            "donation-report-chart",
            "volunteer-report-chart",
            "event-report-chart",
            "expense-report-chart",
            "custom-analytics-chart",
        ] {
            let selector = Selector::parse(&format!("#{id}")).unwrap();
            assert!(html.select(&selector).next().is_some(), "missing chart {id}");
        }
    }

    #[tokio::test]
    async fn selected_category_is_preselected() {
        let response = get_reports_page(State(get_test_state()), query("Expenses"))
            .await
            .unwrap();

        let html = parse_html_document(response).await;
        let selected: Vec<String> = html
            .select(&Selector::parse("option[selected]").unwrap())
            .map(|option| option.text().collect())
            .collect();
        assert_eq!(selected, ["Expenses"]);
    }

    #[tokio::test]
    async fn unknown_category_is_an_error() {
        let result = get_reports_page(State(get_test_state()), query("Bananas")).await;

        assert!(matches!(result, Err(Error::UnknownCategory(category)) if category == "Bananas"));
    }
}
