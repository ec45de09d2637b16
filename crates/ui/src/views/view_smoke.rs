use std::sync::Arc;

use api::InMemoryApi;
use chefs_core::model::{Cuisine, CuisineId, Lesson, LessonId, ProgressRecord, SkillId};

use super::test_harness::{ViewKind, seeded_user, setup_view_harness};

fn cuisine(id: i64, name: &str) -> Cuisine {
    Cuisine {
        id: CuisineId::new(id),
        name: name.to_string(),
        icon: None,
        description: Some(format!("All about {name} cooking")),
    }
}

fn lesson(id: i64, skill_id: i64, name: &str) -> Lesson {
    Lesson {
        id: LessonId::new(id),
        skill_id: SkillId::new(skill_id),
        name: name.to_string(),
        description: None,
        order_index: 0,
        xp_reward: 10,
        icon: None,
    }
}

#[tokio::test(flavor = "current_thread")]
async fn login_view_smoke_renders_form() {
    let api = Arc::new(InMemoryApi::new());
    let mut harness = setup_view_harness(ViewKind::Login, api, None).await;
    harness.rebuild();

    let html = harness.render();
    assert!(html.contains("Welcome back"), "missing heading in {html}");
    assert!(html.contains("Log in"), "missing submit label in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_renders_completed_count() {
    let api = Arc::new(InMemoryApi::new());
    api.seed_user(seeded_user(1, "Ada"), "secret123");
    api.seed_progress(ProgressRecord::completion(
        chefs_core::model::UserId::new(1),
        LessonId::new(5),
        100,
    ));

    let mut harness = setup_view_harness(
        ViewKind::Home,
        api,
        Some(("ada@example.com", "secret123")),
    )
    .await;
    harness.rebuild();
    harness.drive_async().await;

    let html = harness.render();
    assert!(
        html.contains("Welcome back, Ada!"),
        "missing greeting in {html}"
    );
    assert!(
        html.contains("Lessons completed: 1"),
        "missing completed count in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn cuisines_view_smoke_lists_seeded_cuisines() {
    let api = Arc::new(InMemoryApi::new());
    api.seed_user(seeded_user(1, "Ada"), "secret123");
    api.seed_cuisine(cuisine(1, "Italian"));

    let mut harness = setup_view_harness(
        ViewKind::Cuisines,
        api,
        Some(("ada@example.com", "secret123")),
    )
    .await;
    // Seeding through the harness handle still lands before the first fetch.
    harness.api.seed_cuisine(cuisine(2, "Thai"));
    harness.rebuild();
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Italian"), "missing cuisine in {html}");
    assert!(html.contains("Thai"), "missing cuisine in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn skill_view_smoke_marks_completed_lessons() {
    let api = Arc::new(InMemoryApi::new());
    api.seed_user(seeded_user(1, "Ada"), "secret123");
    api.seed_lesson(lesson(10, 3, "Stocks"));
    api.seed_lesson(lesson(11, 3, "Emulsions"));
    api.seed_progress(ProgressRecord::completion(
        chefs_core::model::UserId::new(1),
        LessonId::new(10),
        100,
    ));
    let mut harness = setup_view_harness(
        ViewKind::Skill(3),
        api,
        Some(("ada@example.com", "secret123")),
    )
    .await;
    harness.rebuild();
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Stocks"), "missing lesson in {html}");
    assert!(html.contains("Completed"), "missing completed badge in {html}");
    assert!(html.contains("Available"), "missing available status in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn achievements_view_smoke_renders_unlock_state() {
    let api = Arc::new(InMemoryApi::new());
    api.seed_user(seeded_user(1, "Ada"), "secret123");
    api.seed_achievement(chefs_core::model::Achievement {
        id: chefs_core::model::AchievementId::new(1),
        title: "First Dish".to_string(),
        description: None,
        icon: None,
    });
    api.seed_unlock(
        chefs_core::model::UserId::new(1),
        chefs_core::model::AchievementId::new(1),
    );

    let mut harness = setup_view_harness(
        ViewKind::Achievements,
        api,
        Some(("ada@example.com", "secret123")),
    )
    .await;
    harness.rebuild();
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("First Dish"), "missing badge in {html}");
    assert!(html.contains("Unlocked"), "missing unlock state in {html}");
}
