//! `PostgreSQL` store implementation for lists and tasks.

use super::{
    migrations::apply_migrations,
    models::{ListChangeset, ListRow, NewListRow, NewTaskRow, TaskChangeset, TaskRow},
    schema::{lists, tasks},
};
use crate::todo::{
    domain::{
        Description, ListId, ListQuery, OwnerScope, Page, PersistedListData, PersistedTaskData,
        Task, TaskDetails, TaskId, TaskLink, TaskList, TaskQuery, Title, UserId,
    },
    ports::{TaskListRepository, TaskRepository, TodoRepositoryError, TodoRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::{Pg, PgConnection};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by the store.
pub type TodoPgPool = Pool<ConnectionManager<PgConnection>>;

/// Builds a connection pool for `database_url`.
///
/// This blocks until the pool has established its initial connections, so
/// call it from a blocking context.
///
/// # Errors
///
/// Returns [`PoolError`] when no connection can be established.
pub fn build_pool(database_url: &str, max_size: u32) -> Result<TodoPgPool, PoolError> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    Pool::builder().max_size(max_size).build(manager)
}

/// `PostgreSQL`-backed list and task store.
#[derive(Debug, Clone)]
pub struct PostgresTodoStore {
    pool: TodoPgPool,
}

impl PostgresTodoStore {
    /// Creates a new store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TodoPgPool) -> Self {
        Self { pool }
    }

    /// Applies the embedded schema migrations.
    ///
    /// # Errors
    ///
    /// Returns [`TodoRepositoryError::Persistence`] when a connection cannot
    /// be obtained or a migration statement fails.
    pub async fn migrate(&self) -> TodoRepositoryResult<()> {
        self.run_blocking(|connection| {
            apply_migrations(connection).map_err(TodoRepositoryError::persistence)
        })
        .await
    }

    async fn run_blocking<F, T>(&self, operation: F) -> TodoRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TodoRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TodoRepositoryError::persistence)?;
            operation(&mut connection)
        })
        .await
        .map_err(TodoRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskListRepository for PostgresTodoStore {
    async fn store_list(&self, list: &TaskList) -> TodoRepositoryResult<()> {
        let list_id = list.id();
        let new_row = to_new_list_row(list);

        self.run_blocking(move |connection| {
            diesel::insert_into(lists::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TodoRepositoryError::DuplicateList(list_id)
                    }
                    _ => TodoRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update_list(&self, list: &TaskList) -> TodoRepositoryResult<()> {
        let list_id = list.id();
        let changeset = ListChangeset {
            title: list.title().as_str().to_owned(),
            description: list.description().map(|text| text.as_str().to_owned()),
            updated_at: list.updated_at(),
        };

        self.run_blocking(move |connection| {
            let updated = diesel::update(lists::table.find(list_id.into_inner()))
                .set(&changeset)
                .execute(connection)
                .map_err(TodoRepositoryError::persistence)?;
            if updated == 0 {
                return Err(TodoRepositoryError::ListNotFound(list_id));
            }
            Ok(())
        })
        .await
    }

    async fn delete_list(&self, id: ListId) -> TodoRepositoryResult<()> {
        self.run_blocking(move |connection| {
            // Tasks go with the list through `ON DELETE CASCADE`.
            let deleted = diesel::delete(lists::table.find(id.into_inner()))
                .execute(connection)
                .map_err(TodoRepositoryError::persistence)?;
            if deleted == 0 {
                return Err(TodoRepositoryError::ListNotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn find_list(&self, id: ListId) -> TodoRepositoryResult<Option<TaskList>> {
        self.run_blocking(move |connection| {
            let row = lists::table
                .find(id.into_inner())
                .select(ListRow::as_select())
                .first::<ListRow>(connection)
                .optional()
                .map_err(TodoRepositoryError::persistence)?;
            row.map(row_to_list).transpose()
        })
        .await
    }

    async fn find_lists(&self, ids: &[ListId]) -> TodoRepositoryResult<Vec<TaskList>> {
        let uuids: Vec<uuid::Uuid> = ids.iter().map(|id| id.into_inner()).collect();
        self.run_blocking(move |connection| {
            let rows = lists::table
                .filter(lists::id.eq_any(uuids))
                .select(ListRow::as_select())
                .order((lists::created_at.desc(), lists::id.desc()))
                .load::<ListRow>(connection)
                .map_err(TodoRepositoryError::persistence)?;
            rows.into_iter().map(row_to_list).collect()
        })
        .await
    }

    async fn search_lists(&self, query: &ListQuery) -> TodoRepositoryResult<Vec<TaskList>> {
        let lookup = query.clone();
        self.run_blocking(move |connection| {
            let mut statement = lists::table.select(ListRow::as_select()).into_boxed();
            if let OwnerScope::Owner(owner) = lookup.scope {
                statement = statement.filter(lists::owner_id.eq(owner.into_inner()));
            }
            if let Some(term) = &lookup.search {
                let pattern = term.like_pattern();
                statement = statement.filter(
                    lists::title
                        .ilike(pattern.clone())
                        .or(lists::description.assume_not_null().ilike(pattern)),
                );
            }

            let rows = statement
                .order((lists::created_at.desc(), lists::id.desc()))
                .load::<ListRow>(connection)
                .map_err(TodoRepositoryError::persistence)?;
            rows.into_iter().map(row_to_list).collect()
        })
        .await
    }
}

#[async_trait]
impl TaskRepository for PostgresTodoStore {
    async fn store_task(&self, task: &Task) -> TodoRepositoryResult<()> {
        let task_id = task.id();
        let list_id = task.list_id();
        let new_row = to_new_task_row(task);

        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                        TodoRepositoryError::ListNotFound(list_id)
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TodoRepositoryError::DuplicateTask(task_id)
                    }
                    _ => TodoRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update_task(&self, task: &Task) -> TodoRepositoryResult<()> {
        let task_id = task.id();
        let list_id = task.list_id();
        let changeset = to_task_changeset(task);

        self.run_blocking(move |connection| {
            let updated = diesel::update(tasks::table.find(task_id.into_inner()))
                .set(&changeset)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                        TodoRepositoryError::ListNotFound(list_id)
                    }
                    _ => TodoRepositoryError::persistence(err),
                })?;
            if updated == 0 {
                return Err(TodoRepositoryError::TaskNotFound(task_id));
            }
            Ok(())
        })
        .await
    }

    async fn delete_task(&self, id: TaskId) -> TodoRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(tasks::table.find(id.into_inner()))
                .execute(connection)
                .map_err(TodoRepositoryError::persistence)?;
            if deleted == 0 {
                return Err(TodoRepositoryError::TaskNotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn find_task(&self, id: TaskId) -> TodoRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .find(id.into_inner())
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TodoRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn find_tasks_by_lists(&self, list_ids: &[ListId]) -> TodoRepositoryResult<Vec<Task>> {
        let uuids: Vec<uuid::Uuid> = list_ids.iter().map(|id| id.into_inner()).collect();
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::list_id.eq_any(uuids))
                .select(TaskRow::as_select())
                .order((tasks::created_at.desc(), tasks::id.desc()))
                .load::<TaskRow>(connection)
                .map_err(TodoRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn search_tasks(&self, query: &TaskQuery) -> TodoRepositoryResult<Page<Task>> {
        let lookup = query.clone();
        self.run_blocking(move |connection| {
            let count = filtered_tasks(&lookup)
                .count()
                .get_result::<i64>(connection)
                .map_err(TodoRepositoryError::persistence)?;
            let limit = i64::from(lookup.page.per_page());
            let offset =
                i64::try_from(lookup.page.offset()).map_err(TodoRepositoryError::persistence)?;

            let rows = filtered_tasks(&lookup)
                .select(TaskRow::as_select())
                .order((tasks::created_at.desc(), tasks::id.desc()))
                .limit(limit)
                .offset(offset)
                .load::<TaskRow>(connection)
                .map_err(TodoRepositoryError::persistence)?;

            let items = rows
                .into_iter()
                .map(row_to_task)
                .collect::<TodoRepositoryResult<Vec<_>>>()?;
            let total = u64::try_from(count).map_err(TodoRepositoryError::persistence)?;
            Ok(Page::new(items, lookup.page, total))
        })
        .await
    }
}

/// Builds the filtered, unordered task query shared by the count and the
/// page fetch.
fn filtered_tasks(query: &TaskQuery) -> tasks::BoxedQuery<'static, Pg> {
    let mut statement = tasks::table.into_boxed();
    if let OwnerScope::Owner(owner) = query.scope {
        let owned_lists = lists::table
            .filter(lists::owner_id.eq(owner.into_inner()))
            .select(lists::id);
        statement = statement.filter(tasks::list_id.eq_any(owned_lists));
    }
    if let Some(completed) = query.completion.completion() {
        statement = statement.filter(tasks::is_completed.eq(completed));
    }
    if let Some(term) = &query.search {
        let pattern = term.like_pattern();
        statement = statement.filter(
            tasks::title
                .ilike(pattern.clone())
                .or(tasks::description.assume_not_null().ilike(pattern)),
        );
    }
    statement
}

fn to_new_list_row(list: &TaskList) -> NewListRow {
    NewListRow {
        id: list.id().into_inner(),
        title: list.title().as_str().to_owned(),
        description: list.description().map(|text| text.as_str().to_owned()),
        owner_id: list.owner_id().map(|owner| owner.into_inner()),
        created_at: list.created_at(),
        updated_at: list.updated_at(),
    }
}

fn to_new_task_row(task: &Task) -> NewTaskRow {
    NewTaskRow {
        id: task.id().into_inner(),
        list_id: task.list_id().into_inner(),
        title: task.title().as_str().to_owned(),
        description: task.description().map(|text| text.as_str().to_owned()),
        link: task.link().map(|link| link.as_str().to_owned()),
        due_date: task.due_date(),
        is_completed: task.is_completed(),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    }
}

fn to_task_changeset(task: &Task) -> TaskChangeset {
    TaskChangeset {
        list_id: task.list_id().into_inner(),
        title: task.title().as_str().to_owned(),
        description: task.description().map(|text| text.as_str().to_owned()),
        link: task.link().map(|link| link.as_str().to_owned()),
        due_date: task.due_date(),
        is_completed: task.is_completed(),
        updated_at: task.updated_at(),
    }
}

fn row_to_list(row: ListRow) -> TodoRepositoryResult<TaskList> {
    let ListRow {
        id,
        title,
        description,
        owner_id,
        created_at,
        updated_at,
    } = row;

    let data = PersistedListData {
        id: ListId::from_uuid(id),
        title: Title::new(title).map_err(TodoRepositoryError::persistence)?,
        description: description.and_then(Description::new),
        owner_id: owner_id.map(UserId::from_uuid),
        created_at,
        updated_at,
    };
    Ok(TaskList::from_persisted(data))
}

fn row_to_task(row: TaskRow) -> TodoRepositoryResult<Task> {
    let TaskRow {
        id,
        list_id,
        title,
        description,
        link,
        due_date,
        is_completed,
        created_at,
        updated_at,
    } = row;

    let details = TaskDetails {
        list_id: ListId::from_uuid(list_id),
        title: Title::new(title).map_err(TodoRepositoryError::persistence)?,
        description: description.and_then(Description::new),
        link: link
            .map(TaskLink::new)
            .transpose()
            .map_err(TodoRepositoryError::persistence)?,
        due_date,
        is_completed,
    };
    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::from_uuid(id),
        details,
        created_at,
        updated_at,
    }))
}
