//! Type, date, and tag filters for the gallery.

use chrono::{Local, NaiveDate};
use damu_core::{Debouncer, FilterSet, Settle, TAG_DEBOUNCE, TYPE_OPTIONS, format_date_for_api};
use dioxus::prelude::*;
use web_time::Instant;

/// Props for the [`SearchFilterBar`] component.
#[derive(Props, Clone, PartialEq)]
pub struct SearchFilterBarProps {
    /// Filters currently applied by the gallery.
    filters: FilterSet,
    /// A type option was chosen (empty string for all types).
    on_type_change: EventHandler<String>,
    /// A date was picked or cleared.
    on_date_change: EventHandler<Option<NaiveDate>>,
    /// The tag text settled after the debounce period.
    on_tags_change: EventHandler<String>,
}

/// Parse the value of an `<input type="date">`; empty clears the filter.
fn parse_date_input(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// Filter controls above the gallery.
///
/// The type and date controls report every change immediately. Tag text
/// is held locally and only reported once typing has paused for
/// [`TAG_DEBOUNCE`]; a spinner shows while a change is pending.
#[component]
pub fn SearchFilterBar(props: SearchFilterBarProps) -> Element {
    let committed_tags = props.filters.tags.clone();
    let mut debouncer = use_signal(|| Debouncer::new(committed_tags.clone(), TAG_DEBOUNCE));

    // Follow the committed value when the parent changes it.
    use_effect(use_reactive!(|(committed_tags,)| {
        debouncer.write().sync_committed(&committed_tags);
    }));

    let on_tags_change = props.on_tags_change;
    let mut waiting = use_signal(|| false);
    let handle_tags = move |evt: FormEvent| {
        debouncer.write().input(evt.value(), Instant::now());
        // One waiter per burst; later keystrokes only move the deadline.
        if *waiting.peek() {
            return;
        }
        waiting.set(true);
        spawn(async move {
            loop {
                let step = debouncer.write().step(Instant::now());
                match step {
                    Settle::Wait(remaining) => gloo_timers::future::sleep(remaining).await,
                    Settle::Release(tags) => {
                        on_tags_change.call(tags);
                        break;
                    }
                    Settle::Idle => break,
                }
            }
            waiting.set(false);
        });
    };

    let on_type_change = props.on_type_change;
    let on_date_change = props.on_date_change;
    let today = format_date_for_api(Local::now().date_naive());
    let selected_date = props
        .filters
        .upload_date
        .map(format_date_for_api)
        .unwrap_or_default();
    let file_type = props.filters.file_type;
    let local_tags = debouncer.read().local().to_owned();
    let pending = debouncer.read().is_pending();

    rsx! {
        div { class: "filter-bar",
            label { class: "field",
                span { "Type" }
                select {
                    value: "{file_type}",
                    onchange: move |evt| on_type_change.call(evt.value()),
                    for choice in TYPE_OPTIONS {
                        option {
                            value: choice.value,
                            selected: choice.value == file_type,
                            "{choice.label}"
                        }
                    }
                }
            }

            label { class: "field",
                span { "Upload date" }
                input {
                    r#type: "date",
                    max: "{today}",
                    value: "{selected_date}",
                    onchange: move |evt| on_date_change.call(parse_date_input(&evt.value())),
                }
            }

            label { class: "field grow",
                span { "Tags" }
                div { class: "with-spinner",
                    input {
                        r#type: "text",
                        placeholder: "Search by tags",
                        value: "{local_tags}",
                        oninput: handle_tags,
                    }
                    if pending {
                        span { class: "spinner", aria_label: "Searching" }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_input_parses_iso_day() {
        assert_eq!(
            parse_date_input("2024-02-29"),
            NaiveDate::from_ymd_opt(2024, 2, 29)
        );
    }

    #[test]
    fn empty_or_invalid_date_input_clears_filter() {
        assert_eq!(parse_date_input(""), None);
        assert_eq!(parse_date_input("2023-02-29"), None);
        assert_eq!(parse_date_input("03/01/2024"), None);
    }
}
