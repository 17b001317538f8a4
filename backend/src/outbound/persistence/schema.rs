//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered users. The lifecycle only checks that an id exists.
    users (id) {
        id -> Uuid,
        full_name -> Varchar,
        email -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Job postings owned by the catalogue.
    ///
    /// `vacancies` and `applicant_count` carry `CHECK (... >= 0)` constraints
    /// and are only ever changed by relative updates.
    jobs (id) {
        id -> Uuid,
        title -> Varchar,
        description -> Text,
        company -> Varchar,
        location -> Varchar,
        salary -> Float8,
        job_type -> Varchar,
        experience -> Int4,
        employer_id -> Uuid,
        employer_name -> Varchar,
        vacancies -> Int4,
        applicant_count -> Int4,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Job applications, unique per `(user_id, job_id)`.
    applications (id) {
        id -> Uuid,
        user_id -> Uuid,
        job_id -> Uuid,
        employer_id -> Uuid,
        employer_name -> Varchar,
        /// Status label, e.g. `In Progress`.
        status -> Varchar,
        applied_at -> Timestamptz,
    }
}

diesel::table! {
    /// Append-only per-user notification log.
    notifications (id) {
        id -> Uuid,
        user_id -> Uuid,
        message -> Text,
        is_read -> Bool,
        created_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(users, jobs, applications, notifications);
