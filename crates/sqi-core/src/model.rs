//! Core data model types for the SQI engine.
//!
//! An [`Attempt`] is one answered question. The three categorical fields keep
//! any label they are given: labels outside the known set become `Unknown`
//! and are weighted with the fallback multiplier instead of failing the parse.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Declares a label enum that round-trips through its wire string and keeps
/// unrecognised labels in an `Unknown` arm.
macro_rules! label_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $label:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $($variant,)+
            /// A label outside the known set, kept verbatim.
            Unknown(String),
        }

        impl $name {
            /// The wire label, used as the weight-table key.
            pub fn label(&self) -> &str {
                match self {
                    $($name::$variant => $label,)+
                    $name::Unknown(other) => other.as_str(),
                }
            }

            pub fn is_known(&self) -> bool {
                !matches!(self, $name::Unknown(_))
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                match s {
                    $($label => $name::$variant,)+
                    other => $name::Unknown(other.to_string()),
                }
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                $name::from(s.as_str())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.label().to_string()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

label_enum! {
    /// Syllabus importance of the question's concept.
    Importance { A => "A", B => "B", C => "C" }
}

label_enum! {
    /// Question difficulty: easy, medium or hard.
    Difficulty { E => "E", M => "M", H => "H" }
}

label_enum! {
    /// Whether the question is practical or theoretical.
    QuestionType { Practical => "Practical", Theory => "Theory" }
}

/// One answered question event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attempt {
    /// Topic the question belongs to.
    pub topic: String,
    /// Concept within the topic.
    pub concept: String,
    /// Whether the answer was correct.
    pub correct: bool,
    /// Marks awarded for a correct answer.
    pub marks: f64,
    /// Penalty for an incorrect answer.
    #[serde(default)]
    pub neg_marks: f64,
    pub importance: Importance,
    pub difficulty: Difficulty,
    #[serde(rename = "type")]
    pub kind: QuestionType,
    /// Seconds the student spent on the question.
    pub time_spent_sec: f64,
    /// Seconds the question is expected to take. Must be positive.
    pub expected_time_sec: f64,
    /// Whether the student flagged the question for review.
    #[serde(default)]
    pub marked_review: bool,
    /// How many times the student came back to the question.
    #[serde(default)]
    pub revisits: u32,
}

impl Attempt {
    /// Ratio of time spent to time expected.
    pub fn time_ratio(&self) -> f64 {
        self.time_spent_sec / self.expected_time_sec
    }
}

/// A parsed engine input: one student and their attempts in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SqiInput {
    pub student_id: String,
    pub attempts: Vec<Attempt>,
}
