//! The navigation bar shown at the top of every page.

use maud::{Markup, html};

use crate::endpoints;

const LINK_STYLE: &str = "block rounded-lg px-3 py-2 text-gray-700 hover:bg-gray-100 \
    hover:text-blue-700 dark:text-gray-200 dark:hover:bg-gray-800 dark:hover:text-blue-300";

const CURRENT_LINK_STYLE: &str = "block rounded-lg px-3 py-2 font-semibold text-blue-700 \
    bg-blue-50 dark:bg-blue-900/30 dark:text-blue-200";

/// The pages that can be reached from the navigation bar, in display order.
const PAGES: [(&str, &str); 8] = [
    (endpoints::DASHBOARD_VIEW, "Dashboard"),
    (endpoints::DONORS_VIEW, "Donors"),
    (endpoints::VOLUNTEERS_VIEW, "Volunteers"),
    (endpoints::EVENTS_VIEW, "Events"),
    (endpoints::EXPENSES_VIEW, "Finances"),
    (endpoints::REPORTS_VIEW, "Reports"),
    (endpoints::COMMUNICATIONS_VIEW, "Communications"),
    (endpoints::SETTINGS_VIEW, "Settings"),
];

#[derive(Debug, Clone, Copy)]
struct Link<'a> {
    url: &'a str,
    title: &'a str,
    is_current: bool,
}

impl Link<'_> {
    fn into_html(self) -> Markup {
        let style = if self.is_current {
            CURRENT_LINK_STYLE
        } else {
            LINK_STYLE
        };

        html! {
            a
                href=(self.url)
                class=(style)
                aria-current=[self.is_current.then_some("page")]
            {
                (self.title)
            }
        }
    }
}

/// The navigation bar with the link to the current page highlighted.
pub struct NavBar<'a> {
    links: Vec<Link<'a>>,
}

impl NavBar<'_> {
    /// Create the navigation bar.
    ///
    /// The link whose URL equals `active_endpoint`, if any, is marked as the
    /// current page.
    pub fn new(active_endpoint: &str) -> NavBar<'_> {
        let links = PAGES
            .iter()
            .map(|&(url, title)| Link {
                url,
                title,
                is_current: url == active_endpoint,
            })
            .collect();

        NavBar { links }
    }

    pub fn into_html(self) -> Markup {
        let current_title = self
            .links
            .iter()
            .find(|link| link.is_current)
            .map_or("Menu", |link| link.title);

        html! {
            nav class="bg-white border-b border-gray-200 dark:bg-gray-900 dark:border-gray-700"
            {
                div class="max-w-screen-xl mx-auto flex flex-wrap items-center justify-between p-4"
                {
                    a
                        href=(endpoints::ROOT)
                        class="text-2xl font-semibold whitespace-nowrap dark:text-white"
                    {
                        "Father First"
                    }

                    ul class="hidden lg:flex lg:gap-1 font-medium"
                    {
                        @for link in &self.links {
                            li { (link.into_html()) }
                        }
                    }

                    details class="relative lg:hidden"
                    {
                        summary
                            class="list-none cursor-pointer rounded-lg border border-gray-200
                            px-3 py-2 text-sm font-semibold text-gray-700
                            dark:border-gray-700 dark:text-gray-200"
                        {
                            (current_title)
                        }

                        ul
                            class="absolute right-0 z-40 mt-2 w-48 rounded-xl border
                            border-gray-200 bg-white p-2 shadow-xl dark:border-gray-700
                            dark:bg-gray-900"
                        {
                            @for link in &self.links {
                                li { (link.into_html()) }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod nav_bar_tests {
    use scraper::{Html, Selector};

    use crate::{endpoints, navigation::NavBar};

    #[test]
    fn marks_only_the_current_page() {
        let pages = [
            endpoints::DASHBOARD_VIEW,
            endpoints::DONORS_VIEW,
            endpoints::VOLUNTEERS_VIEW,
            endpoints::EVENTS_VIEW,
            endpoints::EXPENSES_VIEW,
            endpoints::REPORTS_VIEW,
            endpoints::COMMUNICATIONS_VIEW,
            endpoints::SETTINGS_VIEW,
        ];

        for page in pages {
            let nav_bar = NavBar::new(page);

            for link in &nav_bar.links {
                assert_eq!(link.is_current, link.url == page, "on {page}, link {}", link.url);
            }
        }
    }

    #[test]
    fn pages_outside_the_menu_mark_nothing() {
        for endpoint in [
            endpoints::ROOT,
            endpoints::INTERNAL_ERROR_VIEW,
            endpoints::DONORS_API,
            endpoints::BACKUP,
        ] {
            let nav_bar = NavBar::new(endpoint);

            assert!(nav_bar.links.iter().all(|link| !link.is_current), "{endpoint}");
        }
    }

    #[test]
    fn mobile_menu_shows_current_page_title() {
        let html = NavBar::new(endpoints::SETTINGS_VIEW).into_html().into_string();
        let fragment = Html::parse_fragment(&html);

        let summary = fragment
            .select(&Selector::parse("summary").unwrap())
            .next()
            .expect("no mobile menu");
        assert_eq!(summary.text().collect::<String>().trim(), "Settings");
        let current = fragment
            .select(&Selector::parse(r#"a[aria-current="page"]"#).unwrap())
            .count();
        // Once in the desktop list and once in the mobile menu.
        assert_eq!(current, 2);
    }
}
