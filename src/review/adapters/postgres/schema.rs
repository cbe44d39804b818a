//! Diesel schema for pull requests and reviewer links.

diesel::table! {
    /// Pull requests with their lifecycle state.
    pull_requests (pull_request_id) {
        /// External pull request identifier.
        #[max_length = 255]
        pull_request_id -> Varchar,
        /// Display name.
        #[max_length = 255]
        pull_request_name -> Varchar,
        /// Author user identifier.
        #[max_length = 255]
        author_id -> Varchar,
        /// Lifecycle status, `OPEN` or `MERGED`.
        #[max_length = 16]
        status -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Merge timestamp, written once.
        merged_at -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    /// Reviewer assignments; one row per reviewer per pull request.
    pr_reviewers (pr_id, reviewer_id) {
        /// Reviewed pull request.
        #[max_length = 255]
        pr_id -> Varchar,
        /// Assigned reviewer.
        #[max_length = 255]
        reviewer_id -> Varchar,
        /// Assignment position, kept stable across swaps.
        slot -> Int2,
    }
}

diesel::joinable!(pr_reviewers -> pull_requests (pr_id));
diesel::allow_tables_to_appear_in_same_query!(pull_requests, pr_reviewers);
