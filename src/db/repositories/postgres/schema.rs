//! Diesel schema for the backend tables.

diesel::table! {
    reports (id) {
        id -> Int8,
        location -> Text,
        priority -> Text,
        status -> Text,
        ai_confidence -> Int4,
        reported_at -> Timestamptz,
        image_data -> Nullable<Bytea>,
        image_name -> Nullable<Text>,
    }
}

diesel::table! {
    cameras (id) {
        id -> Int8,
        name -> Text,
        location -> Text,
        status -> Text,
        ip_address -> Text,
    }
}

diesel::table! {
    statistics (id) {
        id -> Int4,
        images_analyzed -> Int8,
        waste_detected -> Int8,
        average_confidence -> Int8,
        detection_rate -> Int8,
    }
}

diesel::allow_tables_to_appear_in_same_query!(reports, cameras, statistics);
