//! Dashboard HTTP handler and view rendering.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use time::Date;

use crate::{
    AppState, Error,
    aggregation::{
        count_by_category, cross_tab, merged_recent, sum_by_category, sum_by_date, total_amount,
    },
    app_state::lock,
    charts::{
        ChartPanel, ValueFormat, category_bar_chart, chart_container, charts_head_elements,
        date_line_chart, stacked_area_chart,
    },
    dashboard::tables::{Metric, events_table, metrics_view, recent_activity_table},
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, PAGE_CONTAINER_STYLE, base, format_count, format_currency, section,
    },
    navigation::NavBar,
    store::Stores,
    timezone::local_today,
};

/// How many donations and volunteer shifts are listed under recent activity.
const RECENT_ACTIVITY_LIMIT: usize = 10;

/// The state needed for displaying the dashboard page.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The donor, volunteer, event and expense collections.
    pub stores: Arc<Mutex<Stores>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            stores: state.stores.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Display a page with an overview of donations, volunteering and events.
pub async fn get_dashboard_page(State(state): State<DashboardState>) -> Result<Response, Error> {
    let today = local_today(&state.local_timezone)
        .inspect_err(|error| tracing::error!("could not get today's date: {error}"))?;
    let stores = lock(&state.stores)?;

    Ok(dashboard_view(&stores, today).into_response())
}

fn dashboard_charts(stores: &Stores) -> [ChartPanel; 6] {
    let donors = stores.donors.list();
    let volunteers = stores.volunteers.list();

    let donations_by_date = sum_by_date(
        donors,
        |donor| Some(donor.date),
        |donor| donor.amount_donated,
    );
    let hours_by_role = sum_by_category(
        volunteers,
        |volunteer| Some(volunteer.role.clone()),
        |volunteer| f64::from(volunteer.hours_volunteered),
    );
    let donations_by_type = cross_tab(
        donors,
        |donor| donor.donor_type,
        |donor| Some(donor.date),
        |donor| donor.amount_donated,
    );
    let hours_by_date = sum_by_date(
        volunteers,
        |volunteer| volunteer.date,
        |volunteer| f64::from(volunteer.hours_volunteered),
    );
    let donors_by_type: Vec<(String, f64)> =
        count_by_category(donors, |donor| donor.donor_type)
            .into_iter()
            .map(|(donor_type, count)| (donor_type.to_string(), count as f64))
            .collect();
    let volunteers_by_role: Vec<(String, f64)> =
        count_by_category(volunteers, |volunteer| Some(volunteer.role.clone()))
            .into_iter()
            .map(|(role, count)| (role, count as f64))
            .collect();

    [
        ChartPanel::new(
            "donations-chart",
            date_line_chart(
                "Donations Over Time",
                "Donations",
                &donations_by_date,
                ValueFormat::Currency,
            ),
        ),
        ChartPanel::new(
            "volunteer-hours-chart",
            category_bar_chart(
                "Volunteer Hours by Role",
                "Hours",
                &hours_by_role,
                ValueFormat::Number,
            ),
        ),
        ChartPanel::new(
            "donation-trends-chart",
            stacked_area_chart(
                "Donation Trends by Donor Type",
                &donations_by_type,
                ValueFormat::Currency,
            ),
        ),
        ChartPanel::new(
            "volunteer-engagement-chart",
            date_line_chart(
                "Volunteer Engagement Over Time",
                "Hours",
                &hours_by_date,
                ValueFormat::Number,
            ),
        ),
        ChartPanel::new(
            "donors-by-type-chart",
            category_bar_chart("Donors by Type", "Donors", &donors_by_type, ValueFormat::Number),
        ),
        ChartPanel::new(
            "volunteers-by-role-chart",
            category_bar_chart(
                "Volunteers by Role",
                "Volunteers",
                &volunteers_by_role,
                ValueFormat::Number,
            ),
        ),
    ]
}

fn dashboard_view(stores: &Stores, today: Date) -> Markup {
    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW).into_html();
    let charts = dashboard_charts(stores);
    let [
        donations_chart,
        hours_chart,
        trends_chart,
        engagement_chart,
        donors_chart,
        roles_chart,
    ] = &charts;

    let total_donations = total_amount(stores.donors.list(), |donor| donor.amount_donated);
    let total_hours = total_amount(stores.volunteers.list(), |volunteer| {
        f64::from(volunteer.hours_volunteered)
    });
    let recent = merged_recent(
        stores.donors.list(),
        stores.volunteers.list(),
        "Donation",
        "Volunteering",
        RECENT_ACTIVITY_LIMIT,
    );

    let content = html!(
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-5xl mb-6"
            {
                h1 class="text-3xl font-bold" { "Father First Dashboard" }
                p class="text-gray-600 dark:text-gray-400"
                {
                    "Track donations, volunteering and events in one place."
                }
            }

            (section(
                "Donation Overview",
                &format!(
                    "As of today, we have received a total of {} in donations.",
                    format_currency(total_donations)
                ),
                &chart_container(donations_chart),
            ))

            (section(
                "Volunteer Hours Distribution",
                &format!(
                    "Our volunteers have contributed a total of {} hours.",
                    format_count(total_hours)
                ),
                &chart_container(hours_chart),
            ))

            (section(
                "Upcoming Events",
                "Events dated today or later are marked as upcoming.",
                &events_table(stores.events.list(), today),
            ))

            (section(
                "Recent Activities",
                "The latest donations and volunteer shifts.",
                &recent_activity_table(&recent),
            ))

            (section(
                "Impact Summary",
                "",
                &metrics_view(&[
                    Metric {
                        label: "Total Donations",
                        value: format_currency(total_donations),
                    },
                    Metric {
                        label: "Total Volunteer Hours",
                        value: format_count(total_hours),
                    },
                ]),
            ))

            (section(
                "Donation Trends",
                "Donations over time, stacked by donor type.",
                &chart_container(trends_chart),
            ))

            (section(
                "Volunteer Engagement",
                "Hours volunteered over time.",
                &chart_container(engagement_chart),
            ))

            (section(
                "Donor and Volunteer Breakdown",
                "",
                &html! {
                    div class="grid grid-cols-1 xl:grid-cols-2 gap-4"
                    {
                        (chart_container(donors_chart))
                        (chart_container(roles_chart))
                    }
                },
            ))

            (section(
                "Get Involved",
                "Record a new donation or sign up a new volunteer.",
                &html! {
                    div class="flex flex-col gap-4 sm:flex-row"
                    {
                        a href=(endpoints::DONORS_VIEW) class={(BUTTON_PRIMARY_STYLE) " text-center"}
                        {
                            "Donate Now"
                        }
                        a href=(endpoints::VOLUNTEERS_VIEW) class={(BUTTON_PRIMARY_STYLE) " text-center"}
                        {
                            "Sign Up as a Volunteer"
                        }
                    }
                },
            ))
        }
    );

    base("Dashboard", &charts_head_elements(&charts), &content)
}
