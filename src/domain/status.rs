//! Closed status vocabulary and its display tones.
//!
//! Every status value that appears in a record's `status` field maps to one
//! [`Status`] variant. Labels and tones are exhaustive matches, so adding a status
//! forces every presentation site to handle it.

use std::str::FromStr;

/// Visual tone used to color a status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Healthy / finished states.
    Positive,
    /// States that need attention soon.
    Warning,
    /// Failed or blocking states.
    Negative,
    /// Work that is moving.
    Info,
    /// Everything else.
    Neutral,
}

/// Status of a business record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Active,
    Inactive,
    OnLeave,
    Pending,
    InProgress,
    Completed,
    Cancelled,
    Draft,
    Dispatched,
    InTransit,
    Arrived,
    OutForDelivery,
    Delivered,
    Failed,
    Unpaid,
    Paid,
    Overdue,
    Available,
    InUse,
    Maintenance,
}

impl Status {
    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
            Self::OnLeave => "On Leave",
            Self::Pending => "Pending",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
            Self::Draft => "Draft",
            Self::Dispatched => "Dispatched",
            Self::InTransit => "In Transit",
            Self::Arrived => "Arrived",
            Self::OutForDelivery => "Out for Delivery",
            Self::Delivered => "Delivered",
            Self::Failed => "Failed",
            Self::Unpaid => "Unpaid",
            Self::Paid => "Paid",
            Self::Overdue => "Overdue",
            Self::Available => "Available",
            Self::InUse => "In Use",
            Self::Maintenance => "Maintenance",
        }
    }

    /// Badge tone.
    #[must_use]
    pub const fn tone(self) -> Tone {
        match self {
            Self::Active | Self::Completed | Self::Arrived | Self::Delivered | Self::Paid | Self::Available => {
                Tone::Positive
            }
            Self::Pending | Self::OnLeave | Self::Unpaid | Self::Maintenance | Self::Draft => Tone::Warning,
            Self::Cancelled | Self::Failed | Self::Overdue => Tone::Negative,
            Self::InProgress | Self::Dispatched | Self::InTransit | Self::OutForDelivery | Self::InUse => {
                Tone::Info
            }
            Self::Inactive => Tone::Neutral,
        }
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "active" => Self::Active,
            "inactive" => Self::Inactive,
            "on_leave" => Self::OnLeave,
            "pending" => Self::Pending,
            "in_progress" => Self::InProgress,
            "completed" => Self::Completed,
            "cancelled" => Self::Cancelled,
            "draft" => Self::Draft,
            "dispatched" => Self::Dispatched,
            "in_transit" => Self::InTransit,
            "arrived" => Self::Arrived,
            "out_for_delivery" => Self::OutForDelivery,
            "delivered" => Self::Delivered,
            "failed" => Self::Failed,
            "unpaid" => Self::Unpaid,
            "paid" => Self::Paid,
            "overdue" => Self::Overdue,
            "available" => Self::Available,
            "in_use" => Self::InUse,
            "maintenance" => Self::Maintenance,
            other => return Err(format!("unknown status: {other}")),
        })
    }
}

/// Turns a snake_case option value into a title-cased label (`on_leave` → `On Leave`).
///
/// Used for categorical options that are not statuses (customer types, roles...).
#[must_use]
pub fn humanize(value: &str) -> String {
    value
        .split(['_', '-'])
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect::<String>()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_snake_case_values() {
        assert_eq!("in_transit".parse::<Status>(), Ok(Status::InTransit));
        assert_eq!(" Paid ".parse::<Status>(), Ok(Status::Paid));
        assert!("shipped".parse::<Status>().is_err());
    }

    #[test]
    fn tones_group_statuses() {
        assert_eq!(Status::Delivered.tone(), Tone::Positive);
        assert_eq!(Status::Overdue.tone(), Tone::Negative);
        assert_eq!(Status::OutForDelivery.label(), "Out for Delivery");
    }

    #[test]
    fn humanize_title_cases_words() {
        assert_eq!(humanize("corporate"), "Corporate");
        assert_eq!(humanize("on_leave"), "On Leave");
        assert_eq!(humanize(""), "");
    }
}
