//! Catalog management sections. The listings themselves are served by the
//! booking backend; these pages frame them inside the shell.

use dioxus::prelude::*;

#[component]
fn ManageSection(title: &'static str, summary: &'static str, columns: Vec<&'static str>) -> Element {
    let span = columns.len();

    rsx! {
        section {
            div { class: "mb-4",
                h2 { "{title}" }
                p { "{summary}" }
            }
            article {
                table {
                    thead {
                        tr {
                            for column in columns.iter() {
                                th { key: "{column}", scope: "col", "{column}" }
                            }
                        }
                    }
                    tbody {
                        tr {
                            td { colspan: "{span}", small { "No records loaded." } }
                        }
                    }
                }
            }
        }
    }
}

#[component]
pub fn ManageTours() -> Element {
    rsx! {
        ManageSection {
            title: "Manage Tours",
            summary: "Guided tours on sale, with departures and pricing.",
            columns: vec!["Tour", "Destination", "Duration", "Price", "Status"],
        }
    }
}

#[component]
pub fn ManageAccommodations() -> Element {
    rsx! {
        ManageSection {
            title: "Manage Accommodations",
            summary: "Hotels, lodges and rentals offered with bookings.",
            columns: vec!["Property", "Location", "Rooms", "Rating"],
        }
    }
}

#[component]
pub fn ManageDestinations() -> Element {
    rsx! {
        ManageSection {
            title: "Manage Destinations",
            summary: "Destinations featured on the public site.",
            columns: vec!["Destination", "Country", "Featured"],
        }
    }
}
