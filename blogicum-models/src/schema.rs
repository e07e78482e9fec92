table! {
    categories (id) {
        id -> Integer,
        title -> Text,
        description -> Text,
        slug -> Text,
        is_published -> Bool,
        creation_date -> Timestamp,
    }
}

table! {
    comments (id) {
        id -> Integer,
        text -> Text,
        post_id -> Integer,
        author_id -> Integer,
        creation_date -> Timestamp,
    }
}

table! {
    locations (id) {
        id -> Integer,
        name -> Text,
        is_published -> Bool,
        creation_date -> Timestamp,
    }
}

table! {
    posts (id) {
        id -> Integer,
        title -> Text,
        text -> Text,
        pub_date -> Timestamp,
        author_id -> Integer,
        category_id -> Nullable<Integer>,
        location_id -> Nullable<Integer>,
        is_published -> Bool,
        creation_date -> Timestamp,
    }
}

table! {
    users (id) {
        id -> Integer,
        username -> Text,
        display_name -> Text,
        email -> Nullable<Text>,
        hashed_password -> Nullable<Text>,
        creation_date -> Timestamp,
    }
}

joinable!(comments -> posts (post_id));
joinable!(comments -> users (author_id));
joinable!(posts -> categories (category_id));
joinable!(posts -> locations (location_id));
joinable!(posts -> users (author_id));

allow_tables_to_appear_in_same_query!(categories, comments, locations, posts, users,);
