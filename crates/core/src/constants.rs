/// Length of the trailing window used by the weekly change feed, in days.
pub const WEEKLY_WINDOW_DAYS: i64 = 7;

/// Number of properties surfaced as "recent" on the dashboard.
pub const RECENT_PROPERTIES_LIMIT: usize = 5;

/// Fallback label for a property with neither a title nor an address.
pub const UNTITLED_PROPERTY: &str = "Untitled Property";

/// Fallback label for a user without a full name.
pub const UNNAMED_USER: &str = "Unnamed User";
