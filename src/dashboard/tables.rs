//! Table and metric components for the dashboard.

use maud::{Markup, html};
use time::Date;

use crate::{
    aggregation::{Activity, RecentActivity},
    html::{
        BADGE_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, format_count,
        format_currency,
    },
    record::{Donor, Event, Volunteer},
};

const METRIC_CARD_STYLE: &str = "flex-1 p-4 rounded-lg bg-gray-50 dark:bg-gray-700";
const METRIC_LABEL_STYLE: &str = "text-sm text-gray-600 dark:text-gray-400";
const METRIC_VALUE_STYLE: &str = "text-2xl font-bold";

/// A headline number such as total donations.
pub(super) struct Metric {
    pub label: &'static str,
    pub value: String,
}

pub(super) fn metrics_view(metrics: &[Metric]) -> Markup {
    html! {
        div class="flex flex-col gap-4 sm:flex-row"
        {
            @for metric in metrics {
                div class=(METRIC_CARD_STYLE)
                {
                    p class=(METRIC_LABEL_STYLE) { (metric.label) }
                    p class=(METRIC_VALUE_STYLE) { (metric.value) }
                }
            }
        }
    }
}

/// Events with a badge on those dated `today` or later.
pub(super) fn events_table(events: &[Event], today: Date) -> Markup {
    html! {
        div class="relative overflow-x-auto"
        {
            table class="w-full text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "Event" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Attendees" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Status" }
                    }
                }

                tbody
                {
                    @for event in events {
                        tr class=(TABLE_ROW_STYLE) data-event-row="true"
                        {
                            th scope="row" class={(TABLE_CELL_STYLE) " font-medium text-gray-900 dark:text-white"}
                            {
                                (event.event_name)
                            }
                            td class=(TABLE_CELL_STYLE) { (event.date) }
                            td class=(TABLE_CELL_STYLE) { (format_count(event.attendees)) }
                            td class=(TABLE_CELL_STYLE)
                            {
                                @if event.date >= today {
                                    span class=(BADGE_STYLE) { "Upcoming" }
                                } @else {
                                    "Past"
                                }
                            }
                        }
                    }

                    @if events.is_empty() {
                        tr class=(TABLE_ROW_STYLE)
                        {
                            td colspan="4" class={(TABLE_CELL_STYLE) " text-center"}
                            {
                                "No events yet."
                            }
                        }
                    }
                }
            }
        }
    }
}

/// The latest donations and volunteer shifts, most recent first.
pub(super) fn recent_activity_table(activities: &[RecentActivity<'_, Donor, Volunteer>]) -> Markup {
    html! {
        div class="relative overflow-x-auto"
        {
            table class="w-full text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "Type" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Name" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Details" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                    }
                }

                tbody
                {
                    @for activity in activities {
                        tr class=(TABLE_ROW_STYLE) data-activity-row="true"
                        {
                            td class=(TABLE_CELL_STYLE) { (activity.source) }
                            @match activity.record {
                                Activity::First(donor) => {
                                    td class=(TABLE_CELL_STYLE) { (donor.name) }
                                    td class=(TABLE_CELL_STYLE) {
                                        "Donated " (format_currency(donor.amount_donated))
                                    }
                                }
                                Activity::Second(volunteer) => {
                                    td class=(TABLE_CELL_STYLE) { (volunteer.name) }
                                    td class=(TABLE_CELL_STYLE) {
                                        (format_count(volunteer.hours_volunteered))
                                        " hours as " (volunteer.role)
                                    }
                                }
                            }
                            td class=(TABLE_CELL_STYLE)
                            {
                                @match activity.date {
                                    Some(date) => (date),
                                    None => "-",
                                }
                            }
                        }
                    }

                    @if activities.is_empty() {
                        tr class=(TABLE_ROW_STYLE)
                        {
                            td colspan="4" class={(TABLE_CELL_STYLE) " text-center"}
                            {
                                "No recent activity."
                            }
                        }
                    }
                }
            }
        }
    }
}
