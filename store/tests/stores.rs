use std::sync::Arc;
use std::time::Duration;

use chrono::{TimeZone, Utc};
use taskflow_core::{
    Category, CategoryPatch, CategoryService, Entity, NewCategory, NewTask, Priority, StoreError, Task,
    TaskPatch, TaskService,
};
use taskflow_store::{CategoryStore, Latency, Seed, TaskStore};

fn task(id: u64, order: i64) -> Task {
    Task {
        id,
        title: format!("task {id}"),
        completed: false,
        priority: Priority::Medium,
        category_id: None,
        due_date: None,
        order,
        created_at: Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap(),
        updated_at: None,
    }
}

fn task_store(ids: &[u64]) -> TaskStore {
    let tasks = ids
        .iter()
        .enumerate()
        .map(|(i, id)| task(*id, i as i64))
        .collect();
    TaskStore::with_tasks(tasks, Latency::instant())
}

// --- categories ---

#[tokio::test]
async fn create_category_in_empty_store() {
    let store = CategoryStore::new(Latency::instant());
    let created = store
        .create(NewCategory::new("Work", "#5B4FE5"))
        .await
        .unwrap();

    assert_eq!(created.id, 1);
    assert_eq!(created.name, "Work");
    assert_eq!(created.color, "#5B4FE5");
    assert_eq!(created.order, 0);
}

#[tokio::test]
async fn category_order_is_collection_size() {
    let store = CategoryStore::new(Latency::instant());
    store.create(NewCategory::new("Work", "#5B4FE5")).await.unwrap();
    let second = store
        .create(NewCategory::new("Home", "#10B981"))
        .await
        .unwrap();
    assert_eq!(second.id, 2);
    assert_eq!(second.order, 1);
}

#[tokio::test]
async fn blank_category_name_is_rejected() {
    let store = CategoryStore::new(Latency::instant());
    let err = store
        .create(NewCategory::new("   ", "#5B4FE5"))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Validation { field: "name", .. }));
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn category_update_merges_and_keeps_id() {
    let store = CategoryStore::new(Latency::instant());
    let created = store
        .create(NewCategory::new("Work", "#5B4FE5"))
        .await
        .unwrap();

    let updated = store
        .update(created.id, CategoryPatch::new().color("#EF4444"))
        .await
        .unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.name, "Work");
    assert_eq!(updated.color, "#EF4444");

    let err = store
        .update(created.id, CategoryPatch::new().name(""))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Validation { .. }));
    assert_eq!(store.get_by_id(created.id).await.unwrap().color, "#EF4444");
}

#[tokio::test]
async fn category_delete_then_get_is_not_found() {
    let store = CategoryStore::new(Latency::instant());
    let created = store
        .create(NewCategory::new("Work", "#5B4FE5"))
        .await
        .unwrap();

    let removed = store.delete(created.id).await.unwrap();
    assert_eq!(removed, created);

    let err = store.get_by_id(created.id).await.unwrap_err();
    assert_eq!(
        err,
        StoreError::NotFound {
            entity: Entity::Category,
            id: Some(created.id)
        }
    );
    assert!(store.delete(created.id).await.unwrap_err().is_not_found());
}

// --- tasks: create ---

#[tokio::test]
async fn create_task_stamps_store_owned_fields() {
    let store = task_store(&[1, 2]);
    let before = Utc::now();
    let created = store
        .create(NewTask::new("  Buy milk ").priority(Priority::High).category(3))
        .await
        .unwrap();

    assert_eq!(created.id, 3);
    assert_eq!(created.title, "Buy milk");
    assert!(!created.completed);
    assert_eq!(created.priority, Priority::High);
    assert_eq!(created.category_id, Some(3));
    assert_eq!(created.order, 2);
    assert!(created.created_at >= before);
    assert_eq!(created.updated_at, Some(created.created_at));
}

#[tokio::test]
async fn blank_task_title_is_rejected() {
    let store = task_store(&[]);
    let err = store.create(NewTask::new("")).await.unwrap_err();
    assert!(matches!(err, StoreError::Validation { field: "title", .. }));
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn ids_increase_after_deleting_a_middle_task() {
    let store = task_store(&[1, 2, 3]);
    store.delete(2).await.unwrap();

    let ids: Vec<u64> = store.get_all().await.unwrap().iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![1, 3]);

    let created = store.create(NewTask::new("next")).await.unwrap();
    assert_eq!(created.id, 4);
}

#[tokio::test]
async fn ids_are_never_reused_after_deleting_the_newest_task() {
    let store = task_store(&[1, 2, 3]);
    store.delete(3).await.unwrap();
    let created = store.create(NewTask::new("next")).await.unwrap();
    assert_eq!(created.id, 4);
}

#[tokio::test]
async fn create_fails_cleanly_when_ids_are_exhausted() {
    let store = TaskStore::with_tasks(vec![task(u64::MAX, 0)], Latency::instant());

    let err = store.create(NewTask::new("next")).await.unwrap_err();
    assert!(matches!(err, StoreError::Validation { field: "id", .. }));
    assert_eq!(store.len().await, 1);

    // The lock was released; the store keeps serving.
    let last = store.get_by_id(u64::MAX).await.unwrap();
    assert_eq!(last.title, format!("task {}", u64::MAX));

    let categories = CategoryStore::with_categories(
        vec![Category {
            id: u64::MAX,
            name: "Last".to_string(),
            color: "#5B4FE5".to_string(),
            order: 0,
        }],
        Latency::instant(),
    );
    let err = categories
        .create(NewCategory::new("Overflow", "#10B981"))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Validation { field: "id", .. }));
}

// --- tasks: update ---

#[tokio::test]
async fn update_merges_patch_and_refreshes_updated_at() {
    let store = task_store(&[1]);
    let updated = store
        .update(1, TaskPatch::new().completed(true))
        .await
        .unwrap();

    assert_eq!(updated.id, 1);
    assert!(updated.completed);
    assert_eq!(updated.title, "task 1");
    assert!(updated.updated_at.is_some());
    assert_eq!(
        updated.created_at,
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
    );
}

#[tokio::test]
async fn update_missing_task_leaves_store_unchanged() {
    let store = task_store(&[1, 2]);
    let before = store.get_all().await.unwrap();

    let err = store
        .update(99, TaskPatch::new().title("x"))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        StoreError::NotFound {
            entity: Entity::Task,
            id: Some(99)
        }
    );
    assert_eq!(store.get_all().await.unwrap(), before);
}

#[tokio::test]
async fn update_with_blank_title_is_rejected() {
    let store = task_store(&[1]);
    let err = store
        .update(1, TaskPatch::new().title("  "))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Validation { .. }));
    assert_eq!(store.get_by_id(1).await.unwrap().title, "task 1");
}

// --- tasks: reorder / delete ---

#[tokio::test]
async fn reorder_sets_order_without_renumbering() {
    let store = task_store(&[1, 2, 3]);
    let moved = store.reorder(3, 0).await.unwrap();
    assert_eq!(moved.order, 0);
    assert_eq!(moved.updated_at, None);

    let orders: Vec<i64> = store.get_all().await.unwrap().iter().map(|t| t.order).collect();
    assert_eq!(orders, vec![0, 1, 0]);

    assert!(store.reorder(42, 1).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn delete_returns_removed_task_and_get_fails() {
    let store = task_store(&[1, 2]);
    let removed = store.delete(1).await.unwrap();
    assert_eq!(removed.id, 1);
    assert!(store.get_by_id(1).await.unwrap_err().is_not_found());
    assert_eq!(store.len().await, 1);
}

// --- id coercion ---

#[tokio::test]
async fn lookups_coerce_ids() {
    let store = task_store(&[1, 2, 12]);
    assert_eq!(store.get_by_id("12").await.unwrap().id, 12);
    assert_eq!(store.get_by_id(" 2").await.unwrap().id, 2);
    assert_eq!(store.get_by_id("1abc").await.unwrap().id, 1);

    let err = store.get_by_id("abc").await.unwrap_err();
    assert_eq!(
        err,
        StoreError::NotFound {
            entity: Entity::Task,
            id: None
        }
    );
    assert!(store.get_by_id(None::<u64>).await.unwrap_err().is_not_found());
    assert!(store.delete(-1i64).await.unwrap_err().is_not_found());
}

// --- snapshots ---

#[tokio::test]
async fn returned_values_are_independent_copies() {
    let store = task_store(&[1]);
    let mut all = store.get_all().await.unwrap();
    all[0].title = "mutated".to_string();
    all.clear();

    let mut one = store.get_by_id(1).await.unwrap();
    one.completed = true;

    let fresh = store.get_by_id(1).await.unwrap();
    assert_eq!(fresh.title, "task 1");
    assert!(!fresh.completed);
}

// --- concurrency ---

#[tokio::test]
async fn concurrent_creates_get_distinct_ids() {
    let store = Arc::new(task_store(&[]));
    let handles: Vec<_> = (0..20)
        .map(|i| {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.create(NewTask::new(format!("t{i}"))).await })
        })
        .collect();

    let mut ids = Vec::new();
    for handle in handles {
        ids.push(handle.await.unwrap().unwrap().id);
    }
    ids.sort_unstable();
    assert_eq!(ids, (1..=20).collect::<Vec<u64>>());
}

// --- latency ---

#[tokio::test(start_paused = true)]
async fn simulated_latency_delays_each_operation() {
    let store = TaskStore::new(Latency::simulated_tasks());
    let start = tokio::time::Instant::now();
    store.create(NewTask::new("slow")).await.unwrap();
    assert!(start.elapsed() >= Duration::from_millis(400));

    let start = tokio::time::Instant::now();
    store.get_all().await.unwrap();
    assert!(start.elapsed() >= Duration::from_millis(300));
}

// --- seed ---

#[tokio::test]
async fn builtin_seed_populates_both_stores() {
    let seed = Seed::builtin().unwrap();
    let expected_tasks = seed.tasks.len();
    let (tasks, categories) = seed.into_stores(taskflow_store::LatencyProfile::Instant);

    assert_eq!(tasks.get_all().await.unwrap().len(), expected_tasks);
    let work = categories.get_by_id(1).await.unwrap();
    assert_eq!(work.name, "Work");

    let created = tasks.create(NewTask::new("after seed")).await.unwrap();
    assert_eq!(created.id, expected_tasks as u64 + 1);
}
