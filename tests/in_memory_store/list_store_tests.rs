//! List port behaviour of the in-memory store.

use crate::in_memory_store::helpers::{StepClock, clock, new_list, new_task, store};
use rstest::rstest;
use tasklists::todo::{
    adapters::memory::InMemoryTodoStore,
    domain::{Description, ListId, ListQuery, OwnerScope, SearchTerm, Title, UserId},
    ports::{TaskListRepository, TaskRepository, TodoRepositoryError},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rejects_duplicate_list_identifier(store: InMemoryTodoStore, clock: StepClock) {
    let list = new_list(&clock, None, "Once");
    store.store_list(&list).await.expect("first store succeeds");

    let result = store.store_list(&list).await;

    assert!(matches!(result, Err(TodoRepositoryError::DuplicateList(id)) if id == list.id()));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_and_delete_require_existing_list(store: InMemoryTodoStore, clock: StepClock) {
    let list = new_list(&clock, None, "Ghost");

    assert!(matches!(
        store.update_list(&list).await,
        Err(TodoRepositoryError::ListNotFound(_))
    ));
    assert!(matches!(
        store.delete_list(ListId::new()).await,
        Err(TodoRepositoryError::ListNotFound(_))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_replaces_stored_list(store: InMemoryTodoStore, clock: StepClock) {
    let mut list = new_list(&clock, Some(UserId::new()), "Draft");
    store.store_list(&list).await.expect("store succeeds");

    list.revise(
        Title::new("Final").expect("valid title"),
        Description::new("done"),
        &clock,
    );
    store.update_list(&list).await.expect("update succeeds");

    let found = store.find_list(list.id()).await.expect("lookup succeeds");
    assert_eq!(found, Some(list));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_cascades_to_owned_tasks(store: InMemoryTodoStore, clock: StepClock) {
    let doomed = new_list(&clock, None, "Doomed");
    let kept = new_list(&clock, None, "Kept");
    store.store_list(&doomed).await.expect("store succeeds");
    store.store_list(&kept).await.expect("store succeeds");
    let gone = new_task(&clock, doomed.id(), "gone", false);
    let stays = new_task(&clock, kept.id(), "stays", false);
    store.store_task(&gone).await.expect("store succeeds");
    store.store_task(&stays).await.expect("store succeeds");

    store.delete_list(doomed.id()).await.expect("delete succeeds");

    let remaining = store
        .find_tasks_by_lists(&[doomed.id(), kept.id()])
        .await
        .expect("lookup succeeds");
    assert_eq!(remaining, vec![stays]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn search_scopes_by_owner_and_orders_newest_first(
    store: InMemoryTodoStore,
    clock: StepClock,
) {
    let owner = UserId::new();
    let older = new_list(&clock, Some(owner), "Groceries");
    let foreign = new_list(&clock, Some(UserId::new()), "Groceries too");
    let newer = new_list(&clock, Some(owner), "More groceries");
    let unrelated = new_list(&clock, Some(owner), "Work");
    for list in [&older, &foreign, &newer, &unrelated] {
        store.store_list(list).await.expect("store succeeds");
    }

    let owned = store
        .search_lists(
            &ListQuery::new(OwnerScope::Owner(owner)).with_search(SearchTerm::new("GROCER")),
        )
        .await
        .expect("search succeeds");
    assert_eq!(owned, vec![newer.clone(), older.clone()]);

    let all = store
        .search_lists(&ListQuery::new(OwnerScope::All))
        .await
        .expect("search succeeds");
    assert_eq!(all, vec![unrelated, newer, foreign, older]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn find_lists_returns_only_existing(store: InMemoryTodoStore, clock: StepClock) {
    let stored = new_list(&clock, None, "Stored");
    store.store_list(&stored).await.expect("store succeeds");

    let found = store
        .find_lists(&[stored.id(), ListId::new()])
        .await
        .expect("lookup succeeds");

    assert_eq!(found, vec![stored]);
}
