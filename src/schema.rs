table! {
    notes (id) {
        id -> Integer,
        title -> Text,
        text -> Text,
        slug -> Text,
        author_id -> Integer,
    }
}

table! {
    users (id) {
        id -> Integer,
        username -> Text,
        password_hash -> Text,
    }
}

joinable!(notes -> users (author_id));

allow_tables_to_appear_in_same_query!(notes, users);
