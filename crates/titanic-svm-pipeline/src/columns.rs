//! Column names of the passenger datasets.

pub const PASSENGER_ID: &str = "PassengerId";
pub const NAME: &str = "Name";
pub const TICKET: &str = "Ticket";
pub const CABIN: &str = "Cabin";
pub const AGE: &str = "Age";
pub const EMBARKED: &str = "Embarked";
pub const SEX: &str = "Sex";
pub const FARE: &str = "Fare";
pub const SURVIVED: &str = "Survived";

/// Most frequent port of embarkation, used for missing `Embarked` values.
pub const DEFAULT_EMBARKED: &str = "S";
