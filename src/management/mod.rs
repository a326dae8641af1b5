//! Pages and endpoints for listing, creating, updating and deleting the
//! records of each collection.
//!
//! One generic implementation serves donors, volunteers, events and expenses.
//! Each record kind describes where its page and endpoints live through
//! [ManagedRecord].

mod create_endpoint;
mod delete_endpoint;
mod page;
mod update_endpoint;

use std::sync::{Arc, Mutex};

use axum::extract::FromRef;

use crate::{
    AppState, endpoints,
    record::{Donor, Event, Expense, Record, Volunteer},
    store::{CollectionStore, Stores},
};

pub use create_endpoint::create_record_endpoint;
pub use delete_endpoint::delete_record_endpoint;
pub use page::get_records_page;
pub use update_endpoint::update_record_endpoint;

/// A record kind with its own management page.
pub trait ManagedRecord: Record {
    /// The page title, e.g. "Donors".
    const TITLE: &'static str;
    /// The lowercase name of a single record, e.g. "donor".
    const SINGULAR: &'static str;
    /// The route of the management page.
    const PAGE: &'static str;
    /// The route to create (POST) and update (PUT) records.
    const API: &'static str;
    /// The route to delete records by key.
    const DELETE_API: &'static str;

    fn collection(stores: &Stores) -> &CollectionStore<Self>;

    fn collection_mut(stores: &mut Stores) -> &mut CollectionStore<Self>;
}

impl ManagedRecord for Donor {
    const TITLE: &'static str = "Donors";
    const SINGULAR: &'static str = "donor";
    const PAGE: &'static str = endpoints::DONORS_VIEW;
    const API: &'static str = endpoints::DONORS_API;
    const DELETE_API: &'static str = endpoints::DELETE_DONORS;

    fn collection(stores: &Stores) -> &CollectionStore<Self> {
        &stores.donors
    }

    fn collection_mut(stores: &mut Stores) -> &mut CollectionStore<Self> {
        &mut stores.donors
    }
}

impl ManagedRecord for Volunteer {
    const TITLE: &'static str = "Volunteers";
    const SINGULAR: &'static str = "volunteer";
    const PAGE: &'static str = endpoints::VOLUNTEERS_VIEW;
    const API: &'static str = endpoints::VOLUNTEERS_API;
    const DELETE_API: &'static str = endpoints::DELETE_VOLUNTEERS;

    fn collection(stores: &Stores) -> &CollectionStore<Self> {
        &stores.volunteers
    }

    fn collection_mut(stores: &mut Stores) -> &mut CollectionStore<Self> {
        &mut stores.volunteers
    }
}

impl ManagedRecord for Event {
    const TITLE: &'static str = "Events";
    const SINGULAR: &'static str = "event";
    const PAGE: &'static str = endpoints::EVENTS_VIEW;
    const API: &'static str = endpoints::EVENTS_API;
    const DELETE_API: &'static str = endpoints::DELETE_EVENTS;

    fn collection(stores: &Stores) -> &CollectionStore<Self> {
        &stores.events
    }

    fn collection_mut(stores: &mut Stores) -> &mut CollectionStore<Self> {
        &mut stores.events
    }
}

impl ManagedRecord for Expense {
    const TITLE: &'static str = "Finances";
    const SINGULAR: &'static str = "expense";
    const PAGE: &'static str = endpoints::EXPENSES_VIEW;
    const API: &'static str = endpoints::EXPENSES_API;
    const DELETE_API: &'static str = endpoints::DELETE_EXPENSES;

    fn collection(stores: &Stores) -> &CollectionStore<Self> {
        &stores.expenses
    }

    fn collection_mut(stores: &mut Stores) -> &mut CollectionStore<Self> {
        &mut stores.expenses
    }
}

/// The state needed to view and change a collection.
#[derive(Debug, Clone)]
pub struct ManagementState {
    /// The donor, volunteer, event and expense collections.
    pub stores: Arc<Mutex<Stores>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for ManagementState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            stores: state.stores.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

#[cfg(test)]
pub(crate) fn get_test_state() -> ManagementState {
    use crate::seed::sample_data;

    ManagementState {
        stores: Arc::new(Mutex::new(
            Stores::from_snapshot(sample_data()).expect("sample data should be valid"),
        )),
        local_timezone: "Etc/UTC".to_owned(),
    }
}
