//! Text rendering of the listing snapshot.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use client_core::Snapshot;
use shared::domain::Application;

pub const LOADING_TEXT: &str = "Loading applications...";
pub const EMPTY_TEXT: &str = "No applications found.";

/// Whole pounds with thousands separators, e.g. `£1,234,567`.
pub fn format_currency(amount: f64) -> String {
    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}£{grouped}")
}

/// `DD-MM-YYYY`.
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%d-%m-%Y").to_string()
}

fn render_application(out: &mut String, application: &Application) {
    let fields = [
        ("Company", application.company.clone()),
        ("Name", application.full_name()),
        ("Email", application.email.clone()),
        ("Loan Amount", format_currency(application.loan_amount)),
        ("Application Date", format_date(&application.date_created)),
        ("Expiry date", format_date(&application.expiry_date)),
    ];
    for (label, value) in fields {
        let _ = writeln!(out, "  {label:<18}{value}");
    }
}

pub fn render_listing(snapshot: &Snapshot<Application>) -> String {
    let mut out = String::new();

    if snapshot.is_loading && snapshot.records.is_empty() {
        out.push_str(LOADING_TEXT);
        out.push('\n');
        return out;
    }

    if let Some(error) = &snapshot.error {
        let _ = writeln!(out, "Error: {error}");
        out.push_str("[Retry]  (type `retry`)\n");
        return out;
    }

    if snapshot.records.is_empty() {
        out.push_str(EMPTY_TEXT);
        out.push('\n');
        return out;
    }

    for (i, application) in snapshot.records.iter().enumerate() {
        if i > 0 {
            out.push_str("  ----\n");
        }
        render_application(&mut out, application);
    }

    if snapshot.has_more {
        out.push('\n');
        if snapshot.is_loading {
            out.push_str("[Loading...]\n");
        } else {
            out.push_str("[Load More]  (press Enter)\n");
        }
        if let Some(total) = snapshot.total_count.filter(|total| *total > 0) {
            let _ = writeln!(
                out,
                "Showing {} of {total} applications",
                snapshot.records.len()
            );
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use shared::domain::ApplicationId;

    fn application(id: i64, company: &str, first: &str, last: &str, amount: f64) -> Application {
        Application {
            id: ApplicationId(id),
            first_name: first.into(),
            last_name: last.into(),
            loan_amount: amount,
            loan_type: "Business Loan".into(),
            email: format!("{}.{}@example.com", first.to_lowercase(), last.to_lowercase()),
            company: company.into(),
            date_created: Utc.with_ymd_and_hms(2021, 6, 14, 4, 13, 41).unwrap(),
            expiry_date: Utc.with_ymd_and_hms(2024, 4, 9, 17, 22, 31).unwrap(),
            avatar: String::new(),
            loan_history: Vec::new(),
        }
    }

    fn john() -> Application {
        application(1, "Test Company Ltd", "John", "Doe", 50000.0)
    }

    fn snapshot(records: Vec<Application>) -> Snapshot<Application> {
        Snapshot {
            records,
            ..Snapshot::default()
        }
    }

    #[test]
    fn currency_uses_pound_sign_and_thousands_separators() {
        assert_eq!(format_currency(50000.0), "£50,000");
        assert_eq!(format_currency(1234567.0), "£1,234,567");
        assert_eq!(format_currency(999.0), "£999");
        assert_eq!(format_currency(0.0), "£0");
    }

    #[test]
    fn currency_rounds_to_whole_pounds() {
        assert_eq!(format_currency(1999.5), "£2,000");
        assert_eq!(format_currency(1000.49), "£1,000");
        assert_eq!(format_currency(-2500.0), "-£2,500");
    }

    #[test]
    fn dates_are_day_month_year_with_dashes() {
        let created = Utc.with_ymd_and_hms(2023, 12, 1, 0, 0, 0).unwrap();
        let expiry = Utc.with_ymd_and_hms(2025, 1, 15, 0, 0, 0).unwrap();
        assert_eq!(format_date(&created), "01-12-2023");
        assert_eq!(format_date(&expiry), "15-01-2025");
    }

    #[test]
    fn initial_load_shows_loading_text() {
        let view = render_listing(&Snapshot {
            is_loading: true,
            ..Snapshot::default()
        });
        assert_eq!(view.trim(), LOADING_TEXT);
    }

    #[test]
    fn error_shows_message_and_retry() {
        let view = render_listing(&Snapshot {
            error: Some("HTTP error! status: 500".into()),
            ..Snapshot::default()
        });
        assert!(view.contains("Error: HTTP error! status: 500"));
        assert!(view.contains("Retry"));
    }

    #[test]
    fn empty_listing_says_so() {
        let view = render_listing(&Snapshot {
            has_more: false,
            total_count: Some(0),
            ..Snapshot::default()
        });
        assert_eq!(view.trim(), EMPTY_TEXT);
    }

    #[test]
    fn record_fields_are_formatted() {
        let mut snap = snapshot(vec![john()]);
        snap.total_count = Some(10);
        let view = render_listing(&snap);

        for expected in [
            "Test Company Ltd",
            "John Doe",
            "john.doe@example.com",
            "£50,000",
            "14-06-2021",
            "09-04-2024",
            "Application Date",
            "Expiry date",
        ] {
            assert!(view.contains(expected), "missing {expected:?} in:\n{view}");
        }
    }

    #[test]
    fn load_more_and_progress_when_more_pages_exist() {
        let mut snap = snapshot(vec![
            john(),
            application(2, "Another Company", "Jane", "Smith", 75000.0),
        ]);
        snap.total_count = Some(20);
        let view = render_listing(&snap);

        assert!(view.contains("[Load More]"));
        assert!(view.contains("Showing 2 of 20 applications"));
        assert!(view.contains("Jane Smith"));
    }

    #[test]
    fn loading_next_page_keeps_records_and_shows_progress_button() {
        let mut snap = snapshot(vec![john()]);
        snap.is_loading = true;
        snap.total_count = Some(10);
        let view = render_listing(&snap);

        assert!(view.contains("Test Company Ltd"));
        assert!(view.contains("[Loading...]"));
        assert!(!view.contains("[Load More]"));
    }

    #[test]
    fn exhausted_listing_hides_load_more() {
        let mut snap = snapshot(vec![john()]);
        snap.has_more = false;
        snap.total_count = Some(1);
        let view = render_listing(&snap);

        assert!(!view.contains("Load More"));
        assert!(!view.contains("Showing"));
    }
}
