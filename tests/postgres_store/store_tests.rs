//! Port behaviour of the `PostgreSQL` store.

use crate::postgres_store::helpers::{StepClock, clock, connect, new_list, new_task};
use rstest::rstest;
use tasklists::todo::{
    domain::{
        CompletionFilter, Description, ListId, ListQuery, OwnerScope, PageRequest, SearchTerm,
        TaskId, TaskQuery, Title, UserId,
    },
    ports::{TaskListRepository, TaskRepository, TodoRepositoryError},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
#[ignore = "Requires PostgreSQL at TASKLISTS_TEST_DATABASE_URL"]
async fn stores_updates_and_finds_lists(clock: StepClock) -> eyre::Result<()> {
    let store = connect().await?;
    let mut list = new_list(&clock, Some(UserId::new()), "Round trip");
    store.store_list(&list).await?;

    list.revise(
        Title::new("Round trip, revised")?,
        Description::new("now with a description"),
        &clock,
    );
    store.update_list(&list).await?;

    assert_eq!(store.find_list(list.id()).await?, Some(list.clone()));
    assert!(matches!(
        store.store_list(&list).await,
        Err(TodoRepositoryError::DuplicateList(_))
    ));
    assert!(matches!(
        store.update_list(&new_list(&clock, None, "Missing")).await,
        Err(TodoRepositoryError::ListNotFound(_))
    ));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
#[ignore = "Requires PostgreSQL at TASKLISTS_TEST_DATABASE_URL"]
async fn deleting_a_list_cascades_to_tasks(clock: StepClock) -> eyre::Result<()> {
    let store = connect().await?;
    let list = new_list(&clock, Some(UserId::new()), "Cascade");
    store.store_list(&list).await?;
    let task = new_task(&clock, list.id(), "goes with it", false);
    store.store_task(&task).await?;

    store.delete_list(list.id()).await?;

    assert!(store.find_task(task.id()).await?.is_none());
    assert!(matches!(
        store.delete_list(list.id()).await,
        Err(TodoRepositoryError::ListNotFound(_))
    ));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
#[ignore = "Requires PostgreSQL at TASKLISTS_TEST_DATABASE_URL"]
async fn task_writes_require_existing_list_and_task(clock: StepClock) -> eyre::Result<()> {
    let store = connect().await?;
    let orphan = new_task(&clock, ListId::new(), "orphan", false);
    assert!(matches!(
        store.store_task(&orphan).await,
        Err(TodoRepositoryError::ListNotFound(_))
    ));
    assert!(matches!(
        store.update_task(&orphan).await,
        Err(TodoRepositoryError::TaskNotFound(_))
    ));
    assert!(matches!(
        store.delete_task(TaskId::new()).await,
        Err(TodoRepositoryError::TaskNotFound(_))
    ));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
#[ignore = "Requires PostgreSQL at TASKLISTS_TEST_DATABASE_URL"]
async fn list_search_is_scoped_and_escapes_wildcards(clock: StepClock) -> eyre::Result<()> {
    let store = connect().await?;
    let owner = UserId::new();
    let literal = new_list(&clock, Some(owner), "100% done");
    let wildcard_bait = new_list(&clock, Some(owner), "1000 done");
    let foreign = new_list(&clock, Some(UserId::new()), "100% done elsewhere");
    for list in [&literal, &wildcard_bait, &foreign] {
        store.store_list(list).await?;
    }

    let found = store
        .search_lists(
            &ListQuery::new(OwnerScope::Owner(owner)).with_search(SearchTerm::new("100%")),
        )
        .await?;
    assert_eq!(found, vec![literal.clone()]);

    let owned = store
        .search_lists(&ListQuery::new(OwnerScope::Owner(owner)))
        .await?;
    assert_eq!(owned, vec![wildcard_bait, literal]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
#[ignore = "Requires PostgreSQL at TASKLISTS_TEST_DATABASE_URL"]
async fn task_search_pages_and_filters(clock: StepClock) -> eyre::Result<()> {
    let store = connect().await?;
    let owner = UserId::new();
    let list = new_list(&clock, Some(owner), "Paged");
    store.store_list(&list).await?;
    for index in 1..=25 {
        let completed = index <= 10;
        store
            .store_task(&new_task(&clock, list.id(), &format!("item {index}"), completed))
            .await?;
    }

    let third = store
        .search_tasks(&TaskQuery::new(OwnerScope::Owner(owner)).with_page(PageRequest::new(3, 10)))
        .await?;
    let meta = third.meta();
    assert_eq!((meta.total, meta.last_page), (25, 3));
    assert_eq!((meta.from, meta.to), (Some(21), Some(25)));
    let titles: Vec<&str> = third
        .items()
        .iter()
        .map(|task| task.title().as_str())
        .collect();
    assert_eq!(titles, vec!["item 5", "item 4", "item 3", "item 2", "item 1"]);

    let pending = store
        .search_tasks(
            &TaskQuery::new(OwnerScope::Owner(owner))
                .with_completion(CompletionFilter::Pending)
                .with_search(SearchTerm::new("ITEM 2")),
        )
        .await?;
    let mut pending_titles: Vec<&str> = pending
        .items()
        .iter()
        .map(|task| task.title().as_str())
        .collect();
    pending_titles.sort_unstable();
    assert_eq!(
        pending_titles,
        vec!["item 20", "item 21", "item 22", "item 23", "item 24", "item 25"]
    );

    let by_list = store.find_tasks_by_lists(&[list.id()]).await?;
    assert_eq!(by_list.len(), 25);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
#[ignore = "Requires PostgreSQL at TASKLISTS_TEST_DATABASE_URL"]
async fn pending_filter_returns_incomplete_tasks_only(clock: StepClock) -> eyre::Result<()> {
    let store = connect().await?;
    let owner = UserId::new();
    let list = new_list(&clock, Some(owner), "Chores");
    store.store_list(&list).await?;
    for (title, completed) in [
        ("sweep", true),
        ("dust", false),
        ("mop", true),
        ("iron", false),
        ("cook", false),
    ] {
        store.store_task(&new_task(&clock, list.id(), title, completed)).await?;
    }
    let stranger = new_list(&clock, Some(UserId::new()), "Not mine");
    store.store_list(&stranger).await?;
    store
        .store_task(&new_task(&clock, stranger.id(), "hidden", false))
        .await?;

    let pending = store
        .search_tasks(
            &TaskQuery::new(OwnerScope::Owner(owner)).with_completion(CompletionFilter::Pending),
        )
        .await?;

    assert_eq!(pending.meta().total, 3);
    let titles: Vec<&str> = pending
        .items()
        .iter()
        .map(|task| task.title().as_str())
        .collect();
    assert_eq!(titles, vec!["cook", "iron", "dust"]);
    Ok(())
}
