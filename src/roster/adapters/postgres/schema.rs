//! Diesel schema for teams and users.

diesel::table! {
    /// Registered team names.
    teams (team_name) {
        /// Unique team name.
        #[max_length = 255]
        team_name -> Varchar,
    }
}

diesel::table! {
    /// Users with their current team and activity flag.
    users (user_id) {
        /// External user identifier.
        #[max_length = 255]
        user_id -> Varchar,
        /// Display name.
        #[max_length = 255]
        username -> Varchar,
        /// Owning team.
        #[max_length = 255]
        team_name -> Varchar,
        /// Whether the user is eligible for review duty.
        is_active -> Bool,
    }
}
