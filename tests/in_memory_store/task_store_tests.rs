//! Task port behaviour of the in-memory store.

use crate::in_memory_store::helpers::{StepClock, clock, new_list, new_task, store};
use rstest::rstest;
use tasklists::todo::{
    adapters::memory::InMemoryTodoStore,
    domain::{
        CompletionFilter, OwnerScope, PageRequest, SearchTerm, TaskDetails, TaskId, TaskQuery,
        Title, UserId,
    },
    ports::{TaskListRepository, TaskRepository, TodoRepositoryError},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn store_task_requires_existing_list(store: InMemoryTodoStore, clock: StepClock) {
    let detached = new_list(&clock, None, "Never stored");
    let task = new_task(&clock, detached.id(), "orphan", false);

    let result = store.store_task(&task).await;

    assert!(matches!(result, Err(TodoRepositoryError::ListNotFound(id)) if id == detached.id()));
    assert!(store.find_task(task.id()).await.expect("lookup succeeds").is_none());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_task_checks_task_and_target_list(store: InMemoryTodoStore, clock: StepClock) {
    let list = new_list(&clock, None, "Home");
    store.store_list(&list).await.expect("store succeeds");
    let mut task = new_task(&clock, list.id(), "paint", false);

    assert!(matches!(
        store.update_task(&task).await,
        Err(TodoRepositoryError::TaskNotFound(_))
    ));

    store.store_task(&task).await.expect("store succeeds");
    let elsewhere = new_list(&clock, None, "Not stored");
    task.revise(
        TaskDetails {
            list_id: elsewhere.id(),
            title: Title::new("paint").expect("valid title"),
            description: None,
            link: None,
            due_date: None,
            is_completed: true,
        },
        &clock,
    );
    assert!(matches!(
        store.update_task(&task).await,
        Err(TodoRepositoryError::ListNotFound(_))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_task_requires_existing_task(store: InMemoryTodoStore) {
    let missing = TaskId::new();
    let result = store.delete_task(missing).await;
    assert!(matches!(result, Err(TodoRepositoryError::TaskNotFound(id)) if id == missing));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn search_tasks_pages_filters_and_scopes(store: InMemoryTodoStore, clock: StepClock) {
    let owner = UserId::new();
    let mine = new_list(&clock, Some(owner), "Mine");
    let theirs = new_list(&clock, Some(UserId::new()), "Theirs");
    store.store_list(&mine).await.expect("store succeeds");
    store.store_list(&theirs).await.expect("store succeeds");
    for index in 1..=12 {
        let completed = [3, 6, 9, 12].contains(&index);
        let task = new_task(&clock, mine.id(), &format!("chore {index}"), completed);
        store.store_task(&task).await.expect("store succeeds");
    }
    let foreign = new_task(&clock, theirs.id(), "chore foreign", false);
    store.store_task(&foreign).await.expect("store succeeds");

    let second_page = store
        .search_tasks(
            &TaskQuery::new(OwnerScope::Owner(owner)).with_page(PageRequest::new(2, 5)),
        )
        .await
        .expect("search succeeds");
    let titles: Vec<&str> = second_page
        .items()
        .iter()
        .map(|task| task.title().as_str())
        .collect();
    assert_eq!(titles, vec!["chore 7", "chore 6", "chore 5", "chore 4", "chore 3"]);
    assert_eq!(second_page.meta().total, 12);
    assert_eq!(second_page.meta().last_page, 3);

    let completed_only = store
        .search_tasks(
            &TaskQuery::new(OwnerScope::Owner(owner)).with_completion(CompletionFilter::Completed),
        )
        .await
        .expect("search succeeds");
    assert_eq!(completed_only.meta().total, 4);

    let searched = store
        .search_tasks(
            &TaskQuery::new(OwnerScope::All).with_search(SearchTerm::new("DETAILS FOR chore 1")),
        )
        .await
        .expect("search succeeds");
    let mut found: Vec<&str> = searched
        .items()
        .iter()
        .map(|task| task.title().as_str())
        .collect();
    found.sort_unstable();
    assert_eq!(found, vec!["chore 1", "chore 10", "chore 11", "chore 12"]);
}
