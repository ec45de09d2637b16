use serde::{Deserialize, Serialize};

use super::ids::{CuisineId, LessonId, SkillId};

/// A top-level cuisine (e.g. "Italian") grouping skills.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cuisine {
    pub id: CuisineId,
    pub name: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// A skill within a cuisine, grouping lessons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub id: SkillId,
    pub cuisine_id: CuisineId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub order_index: i32,
}

/// A single lesson within a skill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub id: LessonId,
    pub skill_id: SkillId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub order_index: i32,
    #[serde(default)]
    pub xp_reward: i64,
    #[serde(default)]
    pub icon: Option<String>,
}

/// One ordered content section of a lesson (text plus optional picture).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonContent {
    pub id: i64,
    pub lesson_id: LessonId,
    #[serde(default)]
    pub section_title: Option<String>,
    pub content_text: String,
    #[serde(default)]
    pub order_index: i32,
    #[serde(default)]
    pub picture_url: Option<String>,
}
