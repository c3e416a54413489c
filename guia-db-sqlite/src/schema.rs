table! {
    categories (rowid) {
        rowid -> BigInt,
        id -> Text,
        name -> Text,
        slug -> Text,
        parent_id -> Nullable<Text>,
        marker_icon_slug -> Text,
        marker_icon_width -> Integer,
        marker_icon_height -> Integer,
    }
}

table! {
    listing_types (rowid) {
        rowid -> BigInt,
        id -> Text,
        name -> Text,
        slug -> Text,
    }
}

table! {
    listing_type_fields (rowid) {
        rowid -> BigInt,
        listing_type_rowid -> BigInt,
        position -> Integer,
        name -> Text,
        label -> Text,
        field_type -> Text,
        required -> Bool,
        options -> Nullable<Text>,
    }
}

table! {
    listings (rowid) {
        rowid -> BigInt,
        id -> Text,
        slug -> Text,
        title -> Text,
        description -> Nullable<Text>,
        category_id -> Text,
        listing_type_id -> Text,
        owner_email -> Text,
        email -> Text,
        phone -> Nullable<Text>,
        whatsapp -> Nullable<Text>,
        website -> Nullable<Text>,
        address -> Text,
        city -> Text,
        province -> Text,
        lat -> Double,
        lng -> Double,
        status -> SmallInt,
        created_at -> BigInt,
        updated_at -> BigInt,
        details -> Text,
    }
}

table! {
    users (id) {
        id -> BigInt,
        email -> Text,
        password -> Text,
        role -> SmallInt,
    }
}

joinable!(listing_type_fields -> listing_types (listing_type_rowid));

allow_tables_to_appear_in_same_query!(listing_types, listing_type_fields);
