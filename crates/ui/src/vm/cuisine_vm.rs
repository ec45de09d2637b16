use chefs_core::model::{Cuisine, CuisineId, ProgressSummary, Skill, SkillId};

/// UI-ready representation of a cuisine for the browse grid.
#[derive(Clone, Debug, PartialEq)]
pub struct CuisineCardVm {
    pub id: CuisineId,
    pub name: String,
    pub avatar: String,
    pub description: String,
    pub progress_label: Option<String>,
    pub is_favorite: bool,
}

impl CuisineCardVm {
    #[must_use]
    pub fn matches_query(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        self.name.to_lowercase().contains(query)
            || self.description.to_lowercase().contains(query)
    }
}

#[must_use]
pub fn map_cuisine_card(
    cuisine: &Cuisine,
    progress: Option<ProgressSummary>,
    is_favorite: bool,
) -> CuisineCardVm {
    CuisineCardVm {
        id: cuisine.id,
        name: cuisine.name.clone(),
        avatar: avatar_for(cuisine.icon.as_deref(), &cuisine.name),
        description: cuisine.description.clone().unwrap_or_default(),
        progress_label: progress.map(|summary| progress_label(&summary)),
        is_favorite,
    }
}

/// UI-ready representation of a skill within a cuisine page.
#[derive(Clone, Debug, PartialEq)]
pub struct SkillCardVm {
    pub id: SkillId,
    pub name: String,
    pub description: String,
    pub progress_label: Option<String>,
}

#[must_use]
pub fn map_skill_card(skill: &Skill, progress: Option<ProgressSummary>) -> SkillCardVm {
    SkillCardVm {
        id: skill.id,
        name: skill.name.clone(),
        description: skill.description.clone().unwrap_or_default(),
        progress_label: progress.map(|summary| progress_label(&summary)),
    }
}

fn progress_label(summary: &ProgressSummary) -> String {
    format!(
        "{} / {} lessons · {:.0}%",
        summary.completed(),
        summary.total(),
        summary.percentage()
    )
}

fn avatar_for(icon: Option<&str>, name: &str) -> String {
    if let Some(icon) = icon {
        if !icon.trim().is_empty() {
            return icon.to_string();
        }
    }
    name.chars()
        .next()
        .map_or_else(|| "?".to_string(), |ch| ch.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cuisine(name: &str, description: Option<&str>, icon: Option<&str>) -> Cuisine {
        Cuisine {
            id: CuisineId::new(1),
            name: name.to_string(),
            icon: icon.map(str::to_string),
            description: description.map(str::to_string),
        }
    }

    #[test]
    fn matches_query_searches_name_and_description() {
        let card = map_cuisine_card(&cuisine("Italian", Some("Pasta and more"), None), None, false);
        assert!(card.matches_query(""));
        assert!(card.matches_query("ital"));
        assert!(card.matches_query("pasta"));
        assert!(!card.matches_query("sushi"));
    }

    #[test]
    fn avatar_prefers_icon_then_first_letter() {
        let with_icon = map_cuisine_card(&cuisine("Italian", None, Some("🍝")), None, false);
        assert_eq!(with_icon.avatar, "🍝");

        let without = map_cuisine_card(&cuisine("Italian", None, None), None, false);
        assert_eq!(without.avatar, "I");
    }

    #[test]
    fn progress_label_formats_counts_and_percentage() {
        let summary = ProgressSummary::new(1, 4);
        let card = map_cuisine_card(&cuisine("Thai", None, None), Some(summary), false);
        assert_eq!(card.progress_label.as_deref(), Some("1 / 4 lessons · 25%"));
    }

    #[test]
    fn no_summary_means_no_label() {
        let card = map_cuisine_card(&cuisine("Thai", None, None), None, true);
        assert!(card.progress_label.is_none());
        assert!(card.is_favorite);
    }
}
