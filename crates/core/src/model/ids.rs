use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

macro_rules! define_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(i64);

        impl $name {
            /// Creates a new id from its backend value.
            #[must_use]
            pub fn new(id: i64) -> Self {
                Self(id)
            }

            /// Returns the underlying i64 value.
            #[must_use]
            pub fn value(&self) -> i64 {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.parse().map(Self)
            }
        }
    };
}

define_id!(
    /// Unique identifier for a User
    UserId
);
define_id!(
    /// Unique identifier for a Cuisine
    CuisineId
);
define_id!(
    /// Unique identifier for a Skill
    SkillId
);
define_id!(
    /// Unique identifier for a Lesson
    LessonId
);
define_id!(
    /// Unique identifier for a Quiz question
    QuizId
);
define_id!(
    /// Unique identifier for an Achievement
    AchievementId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_parse_from_path_segments() {
        assert_eq!("42".parse::<LessonId>().unwrap(), LessonId::new(42));
        assert!("nope".parse::<CuisineId>().is_err());
    }

    #[test]
    fn display_matches_backend_value() {
        assert_eq!(UserId::new(7).to_string(), "7");
    }
}
