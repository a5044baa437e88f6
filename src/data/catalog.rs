//! Table declarations for every resource.
//!
//! Each [`TableSpec`] names the columns to show, the fields free-text search
//! looks at, the categorical filters offered, and the form schema used by the
//! create / edit modal.

use crate::domain::Resource;
use crate::forms::{FieldKind, FieldSchema};
use crate::query::CategoricalFilter;

/// How a column's cell is styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnStyle {
    Plain,
    /// Parsed into a [`crate::domain::Status`] and tinted by tone.
    Status,
    /// Right-aligned.
    Number,
}

/// One table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub field: &'static str,
    pub title: &'static str,
    /// Preferred width in cells; the last column takes the remaining width.
    pub width: usize,
    pub style: ColumnStyle,
}

const fn col(field: &'static str, title: &'static str, width: usize) -> Column {
    Column { field, title, width, style: ColumnStyle::Plain }
}

const fn num(field: &'static str, title: &'static str, width: usize) -> Column {
    Column { field, title, width, style: ColumnStyle::Number }
}

const fn status_col() -> Column {
    Column { field: "status", title: "STATUS", width: 18, style: ColumnStyle::Status }
}

/// Declarative description of a list screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSpec {
    pub resource: Resource,
    pub columns: &'static [Column],
    pub searchable: &'static [&'static str],
    pub filters: &'static [CategoricalFilter],
    pub form: &'static [FieldSchema],
}

const CUSTOMER_TYPES: &[&str] = &["corporate", "individual"];
const ACTIVE_STATES: &[&str] = &["active", "inactive"];
const DRIVER_STATES: &[&str] = &["active", "on_leave", "inactive"];
const LICENSE_CLASSES: &[&str] = &["a", "b1", "b2"];
const JOB_STATES: &[&str] = &["pending", "in_progress", "completed", "cancelled"];
const SERVICES: &[&str] = &["ftl", "ltl", "express"];
const MANIFEST_STATES: &[&str] = &["draft", "dispatched", "in_transit", "arrived"];
const DELIVERY_STATES: &[&str] = &["pending", "out_for_delivery", "delivered", "failed"];
const INVOICE_STATES: &[&str] = &["unpaid", "paid", "overdue"];
const ROLES: &[&str] = &["admin", "dispatcher", "finance", "viewer"];
const VEHICLE_STATES: &[&str] = &["available", "in_use", "maintenance"];
const VEHICLE_CATEGORIES: &[&str] = &["truck", "van", "pickup", "trailer"];
const HISTORY_EVENTS: &[&str] = &["service", "repair", "inspection", "accident"];

const fn status_filter(options: &'static [&'static str]) -> CategoricalFilter {
    CategoricalFilter { name: "status", label: "Status", field: "status", options }
}

const CODE_FIELD: FieldSchema = FieldSchema::new("code", "Code", FieldKind::Text).read_only();

const CUSTOMERS: TableSpec = TableSpec {
    resource: Resource::Customers,
    columns: &[
        col("code", "CODE", 10),
        col("name", "NAME", 24),
        col("contact", "CONTACT", 18),
        col("type", "TYPE", 12),
        col("city", "CITY", 12),
        status_col(),
    ],
    searchable: &["code", "name", "contact", "email", "city"],
    filters: &[
        CategoricalFilter { name: "type", label: "Type", field: "type", options: CUSTOMER_TYPES },
        status_filter(ACTIVE_STATES),
    ],
    form: &[
        CODE_FIELD,
        FieldSchema::new("name", "Name", FieldKind::Text).required(),
        FieldSchema::new("contact", "Contact person", FieldKind::Text).required(),
        FieldSchema::new("phone", "Phone", FieldKind::Tel),
        FieldSchema::new("email", "Email", FieldKind::Email),
        FieldSchema::new("type", "Type", FieldKind::Select(CUSTOMER_TYPES)).required(),
        FieldSchema::new("city", "City", FieldKind::Text),
        FieldSchema::new("status", "Status", FieldKind::Select(ACTIVE_STATES)).required(),
    ],
};

const DRIVERS: TableSpec = TableSpec {
    resource: Resource::Drivers,
    columns: &[
        col("code", "CODE", 9),
        col("name", "NAME", 18),
        col("phone", "PHONE", 18),
        col("license_no", "LICENSE", 15),
        col("vehicle_plate", "PLATE", 12),
        status_col(),
    ],
    searchable: &["code", "name", "phone", "license_no", "vehicle_plate"],
    filters: &[
        status_filter(DRIVER_STATES),
        CategoricalFilter { name: "license_class", label: "Class", field: "license_class", options: LICENSE_CLASSES },
    ],
    form: &[
        CODE_FIELD,
        FieldSchema::new("name", "Name", FieldKind::Text).required(),
        FieldSchema::new("phone", "Phone", FieldKind::Tel).required(),
        FieldSchema::new("license_no", "License number", FieldKind::Text).required(),
        FieldSchema::new("license_class", "License class", FieldKind::Select(LICENSE_CLASSES)).required(),
        FieldSchema::new("vehicle_plate", "Vehicle plate", FieldKind::Text),
        FieldSchema::new("joined_date", "Joined", FieldKind::Date),
        FieldSchema::new("status", "Status", FieldKind::Select(DRIVER_STATES)).required(),
    ],
};

const JOB_ORDERS: TableSpec = TableSpec {
    resource: Resource::JobOrders,
    columns: &[
        col("code", "CODE", 8),
        col("customer", "CUSTOMER", 22),
        col("origin", "FROM", 11),
        col("destination", "TO", 11),
        col("service", "SERVICE", 8),
        col("order_date", "DATE", 11),
        status_col(),
    ],
    searchable: &["code", "customer", "origin", "destination"],
    filters: &[
        status_filter(JOB_STATES),
        CategoricalFilter { name: "service", label: "Service", field: "service", options: SERVICES },
    ],
    form: &[
        CODE_FIELD,
        FieldSchema::new("customer", "Customer", FieldKind::Text).required(),
        FieldSchema::new("origin", "Origin", FieldKind::Text).required(),
        FieldSchema::new("destination", "Destination", FieldKind::Text).required(),
        FieldSchema::new("service", "Service", FieldKind::Select(SERVICES)).required(),
        FieldSchema::new("order_date", "Order date", FieldKind::Date).required(),
        FieldSchema::new("weight_kg", "Weight (kg)", FieldKind::Number),
        FieldSchema::new("pickup_at", "Pickup at", FieldKind::DateTimeLocal),
        FieldSchema::new("notes", "Notes", FieldKind::TextArea),
        FieldSchema::new("status", "Status", FieldKind::Select(JOB_STATES)).required(),
    ],
};

const MANIFESTS: TableSpec = TableSpec {
    resource: Resource::Manifests,
    columns: &[
        col("code", "CODE", 8),
        col("job_order", "JOB", 8),
        col("vehicle_plate", "PLATE", 12),
        col("driver", "DRIVER", 16),
        col("destination", "TO", 12),
        col("departure_date", "DEPARTS", 11),
        status_col(),
    ],
    searchable: &["code", "job_order", "vehicle_plate", "driver", "origin", "destination"],
    filters: &[status_filter(MANIFEST_STATES)],
    form: &[
        CODE_FIELD,
        FieldSchema::new("job_order", "Job order", FieldKind::Text).required(),
        FieldSchema::new("vehicle_plate", "Vehicle plate", FieldKind::Text),
        FieldSchema::new("driver", "Driver", FieldKind::Text),
        FieldSchema::new("origin", "Origin", FieldKind::Text).required(),
        FieldSchema::new("destination", "Destination", FieldKind::Text).required(),
        FieldSchema::new("departure_date", "Departure", FieldKind::Date).required(),
        FieldSchema::new("status", "Status", FieldKind::Select(MANIFEST_STATES)).required(),
    ],
};

const DELIVERY_ORDERS: TableSpec = TableSpec {
    resource: Resource::DeliveryOrders,
    columns: &[
        col("code", "CODE", 8),
        col("manifest", "MANIFEST", 9),
        col("recipient", "RECIPIENT", 22),
        col("city", "CITY", 11),
        col("delivery_date", "DATE", 11),
        status_col(),
    ],
    searchable: &["code", "manifest", "recipient", "address", "city"],
    filters: &[status_filter(DELIVERY_STATES)],
    form: &[
        CODE_FIELD,
        FieldSchema::new("manifest", "Manifest", FieldKind::Text).required(),
        FieldSchema::new("recipient", "Recipient", FieldKind::Text).required(),
        FieldSchema::new("address", "Address", FieldKind::TextArea).required(),
        FieldSchema::new("city", "City", FieldKind::Text).required(),
        FieldSchema::new("delivery_date", "Delivery date", FieldKind::Date).required(),
        FieldSchema::new("status", "Status", FieldKind::Select(DELIVERY_STATES)).required(),
    ],
};

const INVOICES: TableSpec = TableSpec {
    resource: Resource::Invoices,
    columns: &[
        col("code", "CODE", 9),
        col("customer", "CUSTOMER", 22),
        col("job_order", "JOB", 8),
        col("due_date", "DUE", 11),
        num("amount", "AMOUNT", 12),
        status_col(),
    ],
    searchable: &["code", "customer", "job_order"],
    filters: &[status_filter(INVOICE_STATES)],
    form: &[
        CODE_FIELD,
        FieldSchema::new("customer", "Customer", FieldKind::Text).required(),
        FieldSchema::new("job_order", "Job order", FieldKind::Text).required(),
        FieldSchema::new("issue_date", "Issued", FieldKind::Date).required(),
        FieldSchema::new("due_date", "Due", FieldKind::Date).required(),
        FieldSchema::new("amount", "Amount", FieldKind::Number).required(),
        FieldSchema::new("status", "Status", FieldKind::Select(INVOICE_STATES)).required(),
    ],
};

const USERS: TableSpec = TableSpec {
    resource: Resource::Users,
    columns: &[
        col("code", "CODE", 9),
        col("name", "NAME", 20),
        col("email", "EMAIL", 26),
        col("role", "ROLE", 12),
        status_col(),
    ],
    searchable: &["code", "name", "email"],
    filters: &[
        CategoricalFilter { name: "role", label: "Role", field: "role", options: ROLES },
        status_filter(ACTIVE_STATES),
    ],
    form: &[
        CODE_FIELD,
        FieldSchema::new("name", "Name", FieldKind::Text).required(),
        FieldSchema::new("email", "Email", FieldKind::Email).required(),
        FieldSchema::new("role", "Role", FieldKind::Select(ROLES)).required(),
        FieldSchema::new("status", "Status", FieldKind::Select(ACTIVE_STATES)).required(),
    ],
};

const VEHICLES: TableSpec = TableSpec {
    resource: Resource::Vehicles,
    columns: &[
        col("code", "CODE", 8),
        col("plate", "PLATE", 12),
        col("type", "TYPE", 9),
        col("brand", "BRAND", 18),
        num("capacity_kg", "CAPACITY", 9),
        num("year", "YEAR", 6),
        status_col(),
    ],
    searchable: &["code", "plate", "brand"],
    filters: &[
        status_filter(VEHICLE_STATES),
        CategoricalFilter { name: "type", label: "Type", field: "type", options: VEHICLE_CATEGORIES },
    ],
    form: &[
        CODE_FIELD,
        FieldSchema::new("plate", "Plate", FieldKind::Text).required(),
        FieldSchema::new("type", "Type", FieldKind::Select(VEHICLE_CATEGORIES)).required(),
        FieldSchema::new("brand", "Brand / model", FieldKind::Text),
        FieldSchema::new("capacity_kg", "Capacity (kg)", FieldKind::Number).required(),
        FieldSchema::new("year", "Year", FieldKind::Number),
        FieldSchema::new("status", "Status", FieldKind::Select(VEHICLE_STATES)).required(),
    ],
};

const VEHICLE_TYPES: TableSpec = TableSpec {
    resource: Resource::VehicleTypes,
    columns: &[
        col("code", "CODE", 8),
        col("name", "NAME", 20),
        col("category", "CATEGORY", 10),
        num("capacity_kg", "CAPACITY", 10),
        num("axles", "AXLES", 6),
    ],
    searchable: &["code", "name"],
    filters: &[CategoricalFilter {
        name: "category",
        label: "Category",
        field: "category",
        options: VEHICLE_CATEGORIES,
    }],
    form: &[
        CODE_FIELD,
        FieldSchema::new("name", "Name", FieldKind::Text).required(),
        FieldSchema::new("category", "Category", FieldKind::Select(VEHICLE_CATEGORIES)).required(),
        FieldSchema::new("capacity_kg", "Capacity (kg)", FieldKind::Number).required(),
        FieldSchema::new("axles", "Axles", FieldKind::Number),
    ],
};

const VEHICLE_HISTORY: TableSpec = TableSpec {
    resource: Resource::VehicleHistory,
    columns: &[
        col("code", "CODE", 9),
        col("plate", "PLATE", 12),
        col("date", "DATE", 11),
        col("event", "EVENT", 11),
        num("cost", "COST", 10),
        col("description", "DESCRIPTION", 28),
    ],
    searchable: &["code", "plate", "description"],
    filters: &[CategoricalFilter { name: "event", label: "Event", field: "event", options: HISTORY_EVENTS }],
    form: &[
        CODE_FIELD,
        FieldSchema::new("plate", "Plate", FieldKind::Text).required(),
        FieldSchema::new("date", "Date", FieldKind::Date).required(),
        FieldSchema::new("event", "Event", FieldKind::Select(HISTORY_EVENTS)).required(),
        FieldSchema::new("description", "Description", FieldKind::TextArea),
        FieldSchema::new("cost", "Cost", FieldKind::Number),
        FieldSchema::new("odometer_km", "Odometer (km)", FieldKind::Number),
    ],
};

/// Returns the table declaration of a resource.
#[must_use]
pub const fn table_spec(resource: Resource) -> &'static TableSpec {
    match resource {
        Resource::Customers => &CUSTOMERS,
        Resource::Drivers => &DRIVERS,
        Resource::JobOrders => &JOB_ORDERS,
        Resource::Manifests => &MANIFESTS,
        Resource::DeliveryOrders => &DELIVERY_ORDERS,
        Resource::Invoices => &INVOICES,
        Resource::Users => &USERS,
        Resource::Vehicles => &VEHICLES,
        Resource::VehicleTypes => &VEHICLE_TYPES,
        Resource::VehicleHistory => &VEHICLE_HISTORY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_spec_is_keyed_by_its_resource() {
        for resource in Resource::ALL {
            assert_eq!(table_spec(resource).resource, resource);
        }
    }

    #[test]
    fn every_form_starts_with_a_read_only_code() {
        for resource in Resource::ALL {
            let first = table_spec(resource).form[0];
            assert_eq!(first.name, resource.id_field());
            assert!(first.read_only);
        }
    }

    #[test]
    fn filter_fields_are_columns_or_form_fields() {
        for resource in Resource::ALL {
            let spec = table_spec(resource);
            for f in spec.filters {
                assert!(spec.form.iter().any(|field| field.name == f.field), "{resource}: {}", f.field);
            }
        }
    }
}
