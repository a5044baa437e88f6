//! Record collection kinds.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A kind of record collection the dashboard lists.
///
/// Each resource has a bundled demo fixture and a code prefix used to number new
/// records. Only some resources have a live endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Resource {
    JobOrders,
    Manifests,
    DeliveryOrders,
    Invoices,
    Customers,
    Drivers,
    Vehicles,
    VehicleTypes,
    VehicleHistory,
    Users,
}

impl Resource {
    /// Every resource, in navigation order.
    pub const ALL: [Self; 10] = [
        Self::JobOrders,
        Self::Manifests,
        Self::DeliveryOrders,
        Self::Invoices,
        Self::Customers,
        Self::Drivers,
        Self::Vehicles,
        Self::VehicleTypes,
        Self::VehicleHistory,
        Self::Users,
    ];

    /// Display title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::JobOrders => "Job Orders",
            Self::Manifests => "Manifests",
            Self::DeliveryOrders => "Delivery Orders",
            Self::Invoices => "Invoices",
            Self::Customers => "Customers",
            Self::Drivers => "Drivers",
            Self::Vehicles => "Vehicles",
            Self::VehicleTypes => "Vehicle Types",
            Self::VehicleHistory => "Vehicle History",
            Self::Users => "Users",
        }
    }

    /// Kebab-case name used in configuration (`start_screen "job-orders"`).
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::JobOrders => "job-orders",
            Self::Manifests => "manifests",
            Self::DeliveryOrders => "delivery-orders",
            Self::Invoices => "invoices",
            Self::Customers => "customers",
            Self::Drivers => "drivers",
            Self::Vehicles => "vehicles",
            Self::VehicleTypes => "vehicle-types",
            Self::VehicleHistory => "vehicle-history",
            Self::Users => "users",
        }
    }

    /// Singular noun used in modal titles ("New Customer", "Delete Invoice?").
    #[must_use]
    pub const fn singular(self) -> &'static str {
        match self {
            Self::JobOrders => "Job Order",
            Self::Manifests => "Manifest",
            Self::DeliveryOrders => "Delivery Order",
            Self::Invoices => "Invoice",
            Self::Customers => "Customer",
            Self::Drivers => "Driver",
            Self::Vehicles => "Vehicle",
            Self::VehicleTypes => "Vehicle Type",
            Self::VehicleHistory => "History Entry",
            Self::Users => "User",
        }
    }

    /// Name of the identity field.
    #[must_use]
    pub const fn id_field(self) -> &'static str {
        "code"
    }

    /// Prefix for generated codes (`JO-007`).
    #[must_use]
    pub const fn code_prefix(self) -> &'static str {
        match self {
            Self::JobOrders => "JO",
            Self::Manifests => "MF",
            Self::DeliveryOrders => "DO",
            Self::Invoices => "INV",
            Self::Customers => "CUST",
            Self::Drivers => "DRV",
            Self::Vehicles => "VH",
            Self::VehicleTypes => "VT",
            Self::VehicleHistory => "VHH",
            Self::Users => "USR",
        }
    }

    /// Path of the live list endpoint, if the resource has one.
    #[must_use]
    pub const fn endpoint(self) -> Option<&'static str> {
        match self {
            Self::JobOrders => Some("/api/v1/job-orders"),
            Self::Customers => Some("/api/v1/customers"),
            _ => None,
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}
