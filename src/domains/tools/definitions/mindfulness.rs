//! Mindfulness: meditation categories and audio tracks.

use crate::domains::tools::crud::BackendResource;

/// `/api/v1/mindfulness/categories/`
pub const CATEGORIES: BackendResource = BackendResource {
    domain: "mindfulness",
    collection: "categories",
    singular: "category",
    list_tool: "list_categories",
    summary: "mindfulness categories grouping tracks",
};

/// `/api/v1/mindfulness/tracks/`
pub const TRACKS: BackendResource = BackendResource {
    domain: "mindfulness",
    collection: "tracks",
    singular: "track",
    list_tool: "list_tracks",
    summary: "guided meditation and mindfulness audio tracks",
};

pub const RESOURCES: [&BackendResource; 2] = [&CATEGORIES, &TRACKS];
