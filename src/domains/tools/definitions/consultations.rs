//! Consultations: doctors and their specializations.

use crate::domains::tools::crud::BackendResource;

/// `/api/v1/consultations/doctors/`
pub const DOCTORS: BackendResource = BackendResource {
    domain: "consultations",
    collection: "doctors",
    singular: "doctor",
    list_tool: "get_doctors",
    summary: "doctor profiles with specializations, fees, ratings and available slots",
};

/// `/api/v1/consultations/specializations/`
pub const SPECIALIZATIONS: BackendResource = BackendResource {
    domain: "consultations",
    collection: "specializations",
    singular: "specialization",
    list_tool: "get_specializations",
    summary: "medical specializations doctors can be filtered by",
};

/// Resources of this domain, in registration order.
pub const RESOURCES: [&BackendResource; 2] = [&DOCTORS, &SPECIALIZATIONS];
