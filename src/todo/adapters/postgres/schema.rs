//! Diesel schema for list and task persistence.

diesel::table! {
    /// Task lists, optionally owned by a user.
    lists (id) {
        /// List identifier.
        id -> Uuid,
        /// List title.
        #[max_length = 255]
        title -> Varchar,
        /// Optional description.
        description -> Nullable<Text>,
        /// Owning user; null for admin-created lists.
        owner_id -> Nullable<Uuid>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Tasks; deleted together with their list.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Owning list.
        list_id -> Uuid,
        /// Task title.
        #[max_length = 255]
        title -> Varchar,
        /// Optional description.
        description -> Nullable<Text>,
        /// Optional external link.
        link -> Nullable<Text>,
        /// Optional due date.
        due_date -> Nullable<Date>,
        /// Completion flag.
        is_completed -> Bool,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(lists, tasks);
