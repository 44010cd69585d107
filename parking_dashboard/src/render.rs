//! HTML fragments for each container.
//!
//! Every function here is pure: it takes the latest records and returns the
//! full replacement content for its container.

use crate::page::Container;
use parking_codecs::{
    counter::Counter,
    exit::UnauthorizedExitRecord,
    statistics::StatisticsSnapshot,
    timestamp,
    vehicle::{PaymentStatus, VehicleRecord},
};
use std::{borrow::Cow, fmt::Write};

/// Number of vehicles shown in the activity feed.
pub const ACTIVITY_FEED_LEN: usize = 5;

pub const DEFAULT_CURRENCY: &str = "RWF";

/// Matches the browser's `en-US` `toLocaleString()` output.
pub const DEFAULT_TIME_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub currency: String,
    pub time_format: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            currency: DEFAULT_CURRENCY.to_string(),
            time_format: DEFAULT_TIME_FORMAT.to_string(),
        }
    }
}

pub fn escape(raw: &str) -> Cow<'_, str> {
    if !raw.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(raw);
    }
    let mut out = String::with_capacity(raw.len() + 8);
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Formats a backend timestamp in UTC. Unparseable input is shown as sent.
pub fn format_time(raw: &str, options: &RenderOptions) -> String {
    match timestamp::parse(raw) {
        Some(t) => t.format(&options.time_format).to_string(),
        None => {
            tracing::debug!("Unparseable timestamp {raw:?}");
            raw.to_string()
        }
    }
}

pub fn status_badge(status: PaymentStatus) -> &'static str {
    match status {
        PaymentStatus::Paid => r#"<span class="status-badge status-paid">Paid</span>"#,
        PaymentStatus::Unpaid => r#"<span class="status-badge status-unpaid">Unpaid</span>"#,
    }
}

/// `0` is a real amount; only a missing one renders as `-`.
pub fn amount(amount: Option<&Counter>, options: &RenderOptions) -> String {
    match amount {
        Some(a) => format!("{} {}", escape(&a.to_string()), escape(&options.currency)),
        None => format!("- {}", escape(&options.currency)),
    }
}

pub fn statistics(
    stats: &StatisticsSnapshot,
    options: &RenderOptions,
) -> Vec<(Container, String)> {
    let text = |c: &Counter| escape(&c.to_string()).into_owned();
    vec![
        (Container::TotalVehicles, text(&stats.total_vehicles)),
        (Container::CurrentVehicles, text(&stats.current_vehicles)),
        (
            Container::TotalRevenue,
            format!(
                "{} {}",
                text(&stats.total_revenue),
                escape(&options.currency)
            ),
        ),
        (Container::UnauthorizedExits, text(&stats.unauthorized_exits)),
    ]
}

pub fn vehicles_table(vehicles: &[VehicleRecord], options: &RenderOptions) -> String {
    let mut out = String::new();
    for v in vehicles {
        let _ = writeln!(
            out,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape(&v.plate_number),
            escape(&format_time(&v.entry_time, options)),
            status_badge(v.payment_status),
            amount(v.payment_amount.as_ref(), options),
        );
    }
    out
}

pub fn exits_table(exits: &[UnauthorizedExitRecord], options: &RenderOptions) -> String {
    let mut out = String::new();
    for e in exits {
        let _ = writeln!(
            out,
            "<tr><td>{}</td><td>{}</td></tr>",
            escape(&e.plate_number),
            escape(&format_time(&e.exit_time, options)),
        );
    }
    out
}

/// The first [`ACTIVITY_FEED_LEN`] vehicles, in response order.
pub fn activity_feed(vehicles: &[VehicleRecord], options: &RenderOptions) -> String {
    let mut out = String::new();
    for v in vehicles.iter().take(ACTIVITY_FEED_LEN) {
        let _ = writeln!(
            out,
            concat!(
                r#"<div class="activity-item">"#,
                r#"<div class="d-flex justify-content-between align-items-center">"#,
                r#"<div><strong>{}</strong><small class="text-muted d-block">Entry: {}</small></div>"#,
                "{}</div></div>"
            ),
            escape(&v.plate_number),
            escape(&format_time(&v.entry_time, options)),
            status_badge(v.payment_status),
        );
    }
    out
}

pub fn detected_plate(plate_number: &str) -> String {
    escape(plate_number).into_owned()
}

/// A standalone document holding every mounted container.
pub fn document(snapshot: &[(Container, String)]) -> String {
    let mut out = String::from(concat!(
        "<!DOCTYPE html>\n",
        "<html lang=\"en\">\n",
        "<head><meta charset=\"utf-8\"><title>Parking dashboard</title></head>\n",
        "<body>\n"
    ));
    for (container, content) in snapshot {
        let id = container.id();
        let _ = match container {
            Container::VehiclesTable | Container::UnauthorizedExitsTable => writeln!(
                out,
                "<table>\n<tbody id=\"{id}\">\n{content}</tbody>\n</table>"
            ),
            Container::ActivityFeed => writeln!(out, "<div id=\"{id}\">\n{content}</div>"),
            _ => writeln!(out, "<span id=\"{id}\">{content}</span>"),
        };
    }
    out.push_str("</body>\n</html>\n");
    out
}
