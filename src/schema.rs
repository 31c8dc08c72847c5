table! {
    cities (id) {
        id -> Int4,
        name -> Varchar,
        region -> Varchar,
        description -> Text,
        coordinates -> Nullable<Varchar>,
        image_url -> Nullable<Varchar>,
        viator_id -> Nullable<Varchar>,
        destination_id -> Nullable<Varchar>,
        active -> Bool,
    }
}

table! {
    tours (id) {
        id -> Int4,
        name -> Varchar,
        description -> Text,
        price -> Float8,
        duration -> Varchar,
        city_id -> Int4,
        tour_type_id -> Int4,
        rating -> Float4,
        booking_link -> Nullable<Varchar>,
        image_url -> Nullable<Varchar>,
        is_featured -> Bool,
        included -> Nullable<Text>,
        policies -> Nullable<Text>,
        additional -> Nullable<Text>,
    }
}

table! {
    tour_types (id) {
        id -> Int4,
        name -> Varchar,
    }
}

table! {
    places_to_stay (id) {
        id -> Int4,
        name -> Varchar,
        city_id -> Int4,
        place_type_id -> Int4,
        price_range -> crate::stay::PriceRangeMapping,
        image_url -> Nullable<Varchar>,
    }
}

table! {
    place_types (id) {
        id -> Int4,
        name -> Varchar,
    }
}

table! {
    articles (id) {
        id -> Int4,
        title -> Varchar,
        content -> Text,
        category_id -> Nullable<Int4>,
        author -> Varchar,
        tags -> Nullable<Varchar>,
        feature_img -> Nullable<Varchar>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

table! {
    article_categories (id) {
        id -> Int4,
        uuid -> Varchar,
        name -> Varchar,
        slug -> Varchar,
        description -> Nullable<Text>,
    }
}

table! {
    location_mappings (id) {
        id -> Int4,
        city_id -> Int4,
        region -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

table! {
    contacts (id) {
        id -> Int4,
        name -> Varchar,
        email -> Varchar,
        subject -> Nullable<Varchar>,
        message -> Text,
        created_at -> Timestamptz,
    }
}

joinable!(tours -> cities (city_id));
joinable!(tours -> tour_types (tour_type_id));
joinable!(places_to_stay -> cities (city_id));
joinable!(places_to_stay -> place_types (place_type_id));
joinable!(articles -> article_categories (category_id));
joinable!(location_mappings -> cities (city_id));

allow_tables_to_appear_in_same_query!(
    cities,
    tours,
    tour_types,
    places_to_stay,
    place_types,
    articles,
    article_categories,
    location_mappings,
    contacts,
);
