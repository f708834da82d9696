//! Database layer (Firestore).

pub mod firestore;

pub use firestore::FirestoreDb;

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
    pub const WORKOUT_PREFERENCES: &str = "workout_preferences";
    pub const MEAL_PREFERENCES: &str = "meal_preferences";
    pub const WORKOUT_PLANS: &str = "workout_plans";
    pub const MEAL_PLANS: &str = "meal_plans";
    /// Exercise name -> illustration URL catalog (keyed by url-encoded name)
    pub const EXERCISE_IMAGES: &str = "exercise_images";
}
