// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Progress, nutrition and day-close scenarios through the services.

mod common;

use chrono::NaiveDate;
use common::{create_test_app, create_test_state, monday, sunday, FakeGenerator, RecordingSender};
use smart_daily_bot::models::InboundEvent;
use std::sync::Arc;
use smart_daily_bot::error::AppError;
use smart_daily_bot::models::{DayStatus, UserId, WorkoutDayId};
use smart_daily_bot::services::MissingCategory;

const USER: UserId = UserId(42);

#[tokio::test]
async fn test_toggle_twice_restores_state() {
    let (_, state) = create_test_app(monday());
    let progress = state.bot.progress();

    assert!(progress
        .toggle_exercise(USER, monday(), WorkoutDayId::Monday, 2)
        .await
        .unwrap());
    assert!(!progress
        .toggle_exercise(USER, monday(), WorkoutDayId::Monday, 2)
        .await
        .unwrap());

    let record = progress.day(USER, monday()).await.unwrap();
    assert!(record.progress.exercises.is_empty());
}

#[tokio::test]
async fn test_toggle_for_wrong_day_is_rejected() {
    let (_, state) = create_test_app(monday());
    let tuesday = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();

    let err = state
        .bot
        .progress()
        .toggle_exercise(USER, tuesday, WorkoutDayId::Monday, 0)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::DayMismatch { .. }));
    assert!(err.is_rejected_toggle());
}

#[tokio::test]
async fn test_records_are_isolated_per_user_and_date() {
    let (_, state) = create_test_app(monday());
    let ledger = state.bot.ledger();

    ledger.add_meal(USER, monday(), "Rice", "300").await.unwrap();
    ledger
        .add_meal(UserId(43), monday(), "Soup", "200")
        .await
        .unwrap();
    ledger.add_meal(USER, sunday(), "Pizza", "900").await.unwrap();

    assert_eq!(ledger.record(USER, monday()).await.unwrap().intake(), 300.0);
    assert_eq!(
        ledger.record(UserId(43), monday()).await.unwrap().intake(),
        200.0
    );
    assert_eq!(ledger.record(USER, sunday()).await.unwrap().intake(), 900.0);
}

#[tokio::test]
async fn test_manual_total_overrides_meals_and_adjustment() {
    let (_, state) = create_test_app(monday());
    let ledger = state.bot.ledger();

    ledger.add_meal(USER, monday(), "Pasta", "700").await.unwrap();
    let record = ledger.adjust_kcal(USER, monday(), "-100").await.unwrap();
    assert_eq!(record.intake(), 600.0);

    let record = ledger
        .set_manual_total(USER, monday(), "2100")
        .await
        .unwrap();
    assert_eq!(record.intake(), 2100.0);

    // Later meals are still logged but the manual total wins.
    let record = ledger.add_meal(USER, monday(), "Snack", "150").await.unwrap();
    assert_eq!(record.meals.len(), 2);
    assert_eq!(record.intake(), 2100.0);
}

#[tokio::test]
async fn test_net_subtracts_burned_activity() {
    let (_, state) = create_test_app(monday());
    let ledger = state.bot.ledger();

    ledger.add_meal(USER, monday(), "Lunch", "1800").await.unwrap();
    ledger.add_activity(USER, monday(), "Run", "400").await.unwrap();
    let record = ledger
        .add_activity(USER, monday(), "Bike", "250,5")
        .await
        .unwrap();

    assert_eq!(record.burned(), 650.5);
    assert_eq!(record.net(), 1149.5);
}

#[tokio::test]
async fn test_invalid_number_leaves_record_untouched() {
    let (_, state) = create_test_app(monday());
    let ledger = state.bot.ledger();

    ledger.add_meal(USER, monday(), "Eggs", "320").await.unwrap();
    let before = ledger.record(USER, monday()).await.unwrap();

    for result in [
        ledger.add_meal(USER, monday(), "Toast", "-5").await,
        ledger.set_protein(USER, monday(), "lots").await,
        ledger.adjust_kcal(USER, monday(), "plus ten").await,
        ledger.set_manual_total(USER, monday(), "-2000").await,
        ledger.add_activity(USER, monday(), "Swim", "NaN").await,
    ] {
        assert!(matches!(result, Err(AppError::InvalidNumber(_))));
    }

    assert_eq!(ledger.record(USER, monday()).await.unwrap(), before);
}

#[tokio::test]
async fn test_close_workout_day_ok() {
    let (_, state) = create_test_app(monday());
    let progress = state.bot.progress();
    let ledger = state.bot.ledger();

    progress
        .toggle_exercise(USER, monday(), WorkoutDayId::Monday, 0)
        .await
        .unwrap();
    ledger.add_meal(USER, monday(), "Dinner", "650").await.unwrap();
    ledger.set_protein(USER, monday(), "150").await.unwrap();

    let verdict = progress.close_day(USER, monday()).await.unwrap();
    assert!(verdict.is_ok());

    let record = progress.day(USER, monday()).await.unwrap();
    assert_eq!(record.nutrition.day_status, DayStatus::Ok);
    assert!(record.nutrition.closed);
}

#[tokio::test]
async fn test_sets_alone_do_not_satisfy_workout() {
    let (_, state) = create_test_app(monday());
    let progress = state.bot.progress();
    let ledger = state.bot.ledger();

    progress
        .toggle_set(USER, monday(), WorkoutDayId::Monday, 0, 0)
        .await
        .unwrap();
    ledger.add_meal(USER, monday(), "Dinner", "650").await.unwrap();
    ledger.set_protein(USER, monday(), "150").await.unwrap();

    let verdict = progress.close_day(USER, monday()).await.unwrap();
    assert_eq!(verdict.status, DayStatus::Incomplete);
    assert_eq!(verdict.missing, vec![MissingCategory::Workout]);
}

#[tokio::test]
async fn test_close_rest_day_needs_checklist_item() {
    let (_, state) = create_test_app(sunday());
    let progress = state.bot.progress();
    let ledger = state.bot.ledger();

    ledger
        .set_manual_total(USER, sunday(), "1900")
        .await
        .unwrap();
    ledger.set_protein(USER, sunday(), "120").await.unwrap();

    let verdict = progress.close_day(USER, sunday()).await.unwrap();
    assert_eq!(verdict.missing, vec![MissingCategory::RestChecklist]);

    progress.toggle_rest_item(USER, sunday(), 1).await.unwrap();
    let verdict = progress.close_day(USER, sunday()).await.unwrap();
    assert!(verdict.is_ok());

    let record = progress.day(USER, sunday()).await.unwrap();
    assert_eq!(record.nutrition.day_status, DayStatus::Ok);
}

#[tokio::test]
async fn test_zero_protein_counts_as_missing() {
    let (_, state) = create_test_app(sunday());
    let progress = state.bot.progress();
    let ledger = state.bot.ledger();

    ledger.add_meal(USER, sunday(), "Salad", "400").await.unwrap();
    ledger.set_protein(USER, sunday(), "0").await.unwrap();
    progress.toggle_rest_item(USER, sunday(), 0).await.unwrap();

    let verdict = progress.close_day(USER, sunday()).await.unwrap();
    assert_eq!(verdict.missing, vec![MissingCategory::Protein]);
}

#[tokio::test]
async fn test_concurrent_meals_are_all_recorded() {
    let (_, state) = create_test_app(monday());

    let tasks: Vec<_> = (0..25)
        .map(|i| {
            let state = state.clone();
            tokio::spawn(async move {
                state
                    .bot
                    .ledger()
                    .add_meal(USER, monday(), &format!("Bite {}", i), "10")
                    .await
                    .unwrap();
            })
        })
        .collect();
    for task in tasks {
        task.await.unwrap();
    }

    let record = state.bot.ledger().record(USER, monday()).await.unwrap();
    assert_eq!(record.meals.len(), 25);
    assert_eq!(record.intake(), 250.0);
}

#[tokio::test]
async fn test_full_day_scenario_closes_ok() {
    let (_, state) = create_test_app(monday());
    let progress = state.bot.progress();
    let ledger = state.bot.ledger();

    progress
        .toggle_exercise(USER, monday(), WorkoutDayId::Monday, 2)
        .await
        .unwrap();
    let record = progress.day(USER, monday()).await.unwrap();
    assert_eq!(record.progress.exercises.iter().copied().collect::<Vec<_>>(), vec![2]);

    let record = ledger.add_meal(USER, monday(), "Oatmeal", "300").await.unwrap();
    assert_eq!(record.intake(), 300.0);
    let record = ledger.adjust_kcal(USER, monday(), "-50").await.unwrap();
    assert_eq!(record.intake(), 250.0);
    ledger.set_protein(USER, monday(), "140").await.unwrap();

    let verdict = progress.close_day(USER, monday()).await.unwrap();
    assert_eq!(verdict.status, DayStatus::Ok);
    assert!(verdict.missing.is_empty());
}

#[tokio::test]
async fn test_partial_workout_without_protein_lists_only_protein() {
    let (_, state) = create_test_app(monday());
    let progress = state.bot.progress();
    let ledger = state.bot.ledger();

    for i in [0, 1, 2] {
        progress
            .toggle_exercise(USER, monday(), WorkoutDayId::Monday, i)
            .await
            .unwrap();
    }
    ledger.add_meal(USER, monday(), "Day", "1800").await.unwrap();

    let verdict = progress.close_day(USER, monday()).await.unwrap();
    assert_eq!(verdict.missing, vec![MissingCategory::Protein]);

    ledger.set_protein(USER, monday(), "150").await.unwrap();
    let verdict = progress.close_day(USER, monday()).await.unwrap();
    assert!(verdict.is_ok());
}

#[tokio::test]
async fn test_marks_from_replaced_workout_do_not_close_day() {
    let generator = FakeGenerator {
        response: Some("Squat - 4x8\nDips - 3x10".to_string()),
    };
    let state = create_test_state(monday(), generator, Arc::new(RecordingSender::default()));
    let progress = state.bot.progress();
    let ledger = state.bot.ledger();

    progress
        .toggle_exercise(USER, monday(), WorkoutDayId::Monday, 5)
        .await
        .unwrap();
    state
        .bot
        .handle(&InboundEvent::callback(USER, "regen:workout"))
        .await
        .unwrap();
    ledger.add_meal(USER, monday(), "Lunch", "900").await.unwrap();
    ledger.set_protein(USER, monday(), "120").await.unwrap();

    let verdict = progress.close_day(USER, monday()).await.unwrap();
    assert_eq!(verdict.status, DayStatus::Incomplete);
    assert_eq!(verdict.missing, vec![MissingCategory::Workout]);

    let report = state
        .bot
        .stats()
        .build_report(USER, monday(), 1)
        .await
        .unwrap();
    assert_eq!((report.days[0].done, report.days[0].total), (0, 2));

    let view = state.bot.workout_view(USER, monday()).await.unwrap();
    assert!(view.text.ends_with("Done: 0/2"));
}
